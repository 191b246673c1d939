//! Shared data models.

use serde::Serialize;

use crate::validate::{safe_get, Params, Pattern};
use crate::{Error, Result};

/// One result row: column name to value, in the order the store reported.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Message returned when a create request is missing a required field.
pub const INVALID_CREATE: &str = "Id, name or time was invalid.";

/// Message returned when an update request carries no usable id.
pub const INVALID_UPDATE_ID: &str = "Id was invalid.";

/// `{ok, error?}` envelope used by the JSON endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

/// Filters accepted by the read endpoint. Empty strings mean "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub name: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl EventFilter {
    pub fn from_params(params: &Params) -> Self {
        Self {
            name: safe_get(params, "name", "", None),
            year: safe_get(params, "year", "", Some(Pattern::Numeric)),
            month: safe_get(params, "month", "", Some(Pattern::Numeric)),
            day: safe_get(params, "day", "", Some(Pattern::Numeric)),
        }
    }

    /// Equality predicates in their fixed order, restricted to supplied values.
    pub fn predicates(&self) -> Vec<(&'static str, &str)> {
        [
            ("year", self.year.as_str()),
            ("month", self.month.as_str()),
            ("day", self.day.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub id: String,
    pub name: String,
    pub year: String,
    pub month: String,
    pub day: String,
    /// `HH:MM`, or empty for an all-day event
    pub time: String,
}

impl NewEvent {
    pub fn from_params(params: &Params) -> Result<Self> {
        let event = Self {
            id: safe_get(params, "id", "", Some(Pattern::Numeric)),
            name: safe_get(params, "name", "", Some(Pattern::Name)),
            year: safe_get(params, "year", "", Some(Pattern::Numeric)),
            month: safe_get(params, "month", "", Some(Pattern::Numeric)),
            day: safe_get(params, "day", "", Some(Pattern::Numeric)),
            time: safe_get(params, "time", "", Some(Pattern::Time)),
        };

        if event.id.is_empty() || event.name.is_empty() || event.year.is_empty() {
            return Err(Error::Validation(INVALID_CREATE.to_string()));
        }

        Ok(event)
    }

    /// Value bound for the `month` column; NULL when not supplied.
    pub fn stored_month(&self) -> Option<String> {
        non_empty(&self.month)
    }

    /// Value bound for the `day` column; NULL when not supplied.
    pub fn stored_day(&self) -> Option<String> {
        non_empty(&self.day)
    }

    /// Value bound for the `time` column: NULL or `HH:MM:00`.
    pub fn stored_time(&self) -> Option<String> {
        non_empty(&self.time).map(|time| format!("{}:00", time))
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// An update request. Only `id` is validated; every other column is
/// overwritten with whatever the caller sent, absent fields as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventUpdate {
    pub id: String,
    pub name: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub time: String,
}

impl EventUpdate {
    pub fn from_params(params: &Params) -> Result<Self> {
        let id = safe_get(params, "id", "", Some(Pattern::Numeric));
        if id.is_empty() {
            return Err(Error::Validation(INVALID_UPDATE_ID.to_string()));
        }

        Ok(Self {
            id,
            name: safe_get(params, "name", "", None),
            year: safe_get(params, "year", "", None),
            month: safe_get(params, "month", "", None),
            day: safe_get(params, "day", "", None),
            time: safe_get(params, "time", "", None),
        })
    }

    /// Value bound for the `time` column: NULL or the value as sent.
    pub fn stored_time(&self) -> Option<String> {
        non_empty(&self.time)
    }
}
