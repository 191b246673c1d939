//! Calendar endpoints served through API Gateway.
//!
//! Each binary under `src/bin` wires one handler from [`handlers`] to a
//! [`shared::MySqlStore`]; the handlers themselves only see a
//! [`shared::StoreConnector`].

pub mod handlers;

pub use handlers::{create_record, delete_record, list_years, max_id, search_records, update_record};
