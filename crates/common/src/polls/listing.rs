//! Index listing
//!
//! The index resolves the requested page twice. The strict resolution
//! guards the request (404 on a bad page); the lenient one builds the
//! `question_list` the page renders. With a token the strict policy
//! accepts, both land on the same page.

use crate::db::models::Question;
use crate::db::Repository;
use crate::errors::Result;
use crate::polls::pagination::{Page, PageToken, PaginationPolicy};
use chrono::{DateTime, Utc};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct IndexListing {
    /// Page selected by the strict policy
    pub page_obj: Page<Question>,
    /// Page selected by the lenient policy
    pub question_list: Page<Question>,
}

impl IndexListing {
    pub fn is_paginated(&self) -> bool {
        self.page_obj.is_paginated()
    }
}

pub async fn index_listing(
    repo: &Repository,
    per_page: u64,
    token: &PageToken,
    now: DateTime<Utc>,
) -> Result<IndexListing> {
    let paginator = repo.published_paginator(now, per_page).await?;

    let strict = paginator.resolve(PaginationPolicy::Strict, token)?;
    let page_obj = repo.published_page(now, &paginator, strict).await?;

    let lenient = paginator.resolve(PaginationPolicy::Lenient, token)?;
    let question_list = if lenient == strict {
        page_obj.clone()
    } else {
        repo.published_page(now, &paginator, lenient).await?
    };

    debug!(
        total = paginator.total(),
        num_pages = paginator.num_pages(),
        page = strict,
        "Index page resolved"
    );

    Ok(IndexListing {
        page_obj,
        question_list,
    })
}
