//! Full page vs. fragment selection

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use std::convert::Infallible;

/// How much of the page a request wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderMode {
    /// Ordinary navigation: the complete document
    Full,
    /// Incremental HTMX fetch: only the results fragment
    Partial,
}

impl RenderMode {
    /// Header HTMX sets on every request it issues
    pub const HTMX_HEADER: &'static str = "hx-request";

    /// Decide from the value of the `HX-Request` header
    pub fn from_htmx_header(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("true") => RenderMode::Partial,
            _ => RenderMode::Full,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, RenderMode::Partial)
    }
}

/// Extract the render mode from the request headers
impl<S> FromRequestParts<S> for RenderMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(RenderMode::HTMX_HEADER)
            .and_then(|v| v.to_str().ok());

        Ok(RenderMode::from_htmx_header(value))
    }
}

/// Pages that have both a full and a fragment rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Index,
    Search,
}

impl View {
    pub fn template(&self, mode: RenderMode) -> &'static str {
        match (self, mode) {
            (View::Index, RenderMode::Full) => "polls/index.html",
            (View::Index, RenderMode::Partial) => "polls/partials/index_results.html",
            (View::Search, RenderMode::Full) => "polls/search.html",
            (View::Search, RenderMode::Partial) => "polls/partials/search_results.html",
        }
    }
}
