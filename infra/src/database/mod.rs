//! Database implementations

pub mod mysql;

pub use mysql::MySqlUserRepository;
