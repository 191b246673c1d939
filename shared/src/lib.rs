//! Shared library for the Planner calendar Lambda functions.
//!
//! This crate provides the configuration, validation, SQL and response
//! plumbing used by every endpoint.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod secrets;
pub mod validate;

pub use config::Config;
pub use db::{MySqlStore, StoreConnector};
pub use error::{Error, Result};
pub use models::{Envelope, EventFilter, EventUpdate, NewEvent, Row};
pub use query::Statement;
pub use validate::{safe_get, Params, Pattern};
