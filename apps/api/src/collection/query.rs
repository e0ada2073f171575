//! Query-string contract for `GET /api/pokemon`.
//!
//! Raw parameters arrive as strings so malformed values surface as
//! `AppError::BadRequest` with the usual error body instead of an extractor
//! rejection. Keys not listed on [`ListParams`] are ignored.

use serde::Deserialize;

use crate::errors::AppError;

pub const DEFAULT_LIMIT: i64 = 60;
pub const MAX_LIMIT: i64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub shiny: Option<String>,
    pub ot: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFilter {
    /// Substring matched against species, nickname and trainer name.
    pub text: Option<String>,
    pub shiny: Option<bool>,
    /// Exact original-trainer name.
    pub trainer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PageWindow {
    fn default() -> Self {
        PageWindow {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: CollectionFilter,
    pub window: PageWindow,
}

impl ListParams {
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        let limit = parse_non_negative("limit", self.limit.as_deref())?
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = parse_non_negative("offset", self.offset.as_deref())?.unwrap_or(0);

        Ok(ListQuery {
            filter: CollectionFilter {
                text: non_empty(self.q),
                shiny: parse_shiny(self.shiny.as_deref())?,
                trainer: non_empty(self.ot),
            },
            window: PageWindow { limit, offset },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_non_negative(name: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(Some(n)),
        _ => Err(AppError::BadRequest(format!(
            "{name} must be a non-negative integer, got '{raw}'"
        ))),
    }
}

fn parse_shiny(raw: Option<&str>) -> Result<Option<bool>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(AppError::BadRequest(format!(
            "shiny must be true or false, got '{raw}'"
        ))),
    }
}

/// Builds a `LIKE ... ESCAPE '\'` pattern matching `text` anywhere, with
/// wildcard characters in `text` taken literally.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
