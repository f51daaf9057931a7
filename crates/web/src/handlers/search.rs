//! Search handler

use axum::{
    extract::{Query, RawQuery, State},
    response::Html,
};
use chrono::Utc;
use super::{last_param, QueryPairs};
use crate::{views, AppState};
use quickpoll_common::{
    errors::Result,
    polls::{RenderMode, SearchInput},
};

/// Keyword search; validation problems render as messages with a 200
pub async fn search(
    State(state): State<AppState>,
    mode: RenderMode,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<QueryPairs>,
) -> Result<Html<String>> {
    let input = match raw_query.as_deref() {
        None | Some("") => SearchInput::Unbound,
        Some(_) => SearchInput::Bound(last_param(&params, "search_text")),
    };

    let outcome = state.search.run(input, Utc::now()).await?;

    Ok(Html(views::search(mode, &outcome)))
}
