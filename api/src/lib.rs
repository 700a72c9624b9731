//! HTTP API layer for the Mercato auth service
//!
//! Exposes the registration-verification and forgot-password flows over
//! actix-web. All domain failures are serialized through one boundary
//! point into the uniform `{"status": "error"}` body.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
