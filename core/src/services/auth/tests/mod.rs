//! Tests for the authentication flows

mod service_tests;
