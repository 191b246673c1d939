//! Query-string parameter validation.
//!
//! Every parameter is checked against a literal allow-list pattern. A value
//! that is absent or fails its pattern is replaced by the caller's default;
//! there is no coercion and no trimming.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Raw query-string parameters of one request.
pub type Params = HashMap<String, String>;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("numeric pattern compiles"));
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z ]+$").expect("name pattern compiles"));
static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+:[0-9]+$").expect("time pattern compiles"));

/// Allow-list patterns used by the calendar endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `id`, `year`, `month`, `day`
    Numeric,
    /// Event names on creation
    Name,
    /// `HH:MM` on creation
    Time,
}

impl Pattern {
    pub fn is_match(self, value: &str) -> bool {
        let regex = match self {
            Pattern::Numeric => &*NUMERIC,
            Pattern::Name => &*NAME,
            Pattern::Time => &*TIME,
        };
        regex.is_match(value)
    }
}

/// Return the parameter `name` if it is present and matches `pattern`,
/// otherwise `default`.
///
/// Without a pattern any present value is accepted verbatim, the empty
/// string included.
pub fn safe_get(params: &Params, name: &str, default: &str, pattern: Option<Pattern>) -> String {
    match params.get(name) {
        Some(value) if pattern.map_or(true, |p| p.is_match(value)) => value.clone(),
        _ => default.to_string(),
    }
}
