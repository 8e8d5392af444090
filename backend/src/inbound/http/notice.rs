//! Shared response payloads for the form-driven pages.
//!
//! The rendered pages the routes once served surfaced outcomes as flash
//! messages; the JSON equivalents here carry the same texts.

use serde::Serialize;
use utoipa::ToSchema;

/// User-facing outcome notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notice {
    /// Notice text, verbatim from the page contract.
    #[schema(example = "Your booking was successful")]
    pub notice: String,
}

impl Notice {
    /// Wrap a notice text.
    pub fn new(notice: impl Into<String>) -> Self {
        Self {
            notice: notice.into(),
        }
    }
}

/// Minimal descriptor returned by GET routes that used to render a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageInfo {
    /// Page name.
    #[schema(example = "login")]
    pub page: String,
    /// Week the page's form writes to, where relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<i32>,
}

impl PageInfo {
    /// Describe a page with no week context.
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            week: None,
        }
    }

    /// Attach the week the page's form targets.
    pub fn with_week(mut self, week: i32) -> Self {
        self.week = Some(week);
        self
    }
}
