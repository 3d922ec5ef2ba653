//! Bootstrap for hosts embedding the coordinator
//!
//! Loads configuration, sets up logging, connects the database and wires the
//! coordinator together with its background invite sweeper.

pub mod database;
pub mod services;

pub use database::{init_database, run_migrations};
pub use services::{init_services, Services};
