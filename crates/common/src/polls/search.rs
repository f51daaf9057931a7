//! Search flow
//!
//! `Idle → Validating → Valid → Querying → Rendering`, or
//! `Validating → Invalid → Rendering`. Every path ends in a render;
//! validation failures and empty results are data, not errors.

use crate::config::PollsConfig;
use crate::db::models::Question;
use crate::db::Repository;
use crate::errors::{Result, ValidationError};
use crate::metrics;
use crate::polls::query::SearchQuery;
use crate::polls::validation::SearchValidator;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::info;

/// What arrived on the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// No query string at all: first visit to the search page
    Unbound,
    /// A query string, with or without `search_text`
    Bound(Option<String>),
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Idle,
    Invalid {
        raw: String,
        error: ValidationError,
    },
    Results {
        query: SearchQuery,
        questions: Vec<Question>,
    },
}

impl SearchOutcome {
    pub fn questions(&self) -> &[Question] {
        match self {
            SearchOutcome::Results { questions, .. } => questions,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            SearchOutcome::Invalid { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct SearchService {
    validator: SearchValidator,
    repo: Repository,
}

impl SearchService {
    pub fn new(config: &PollsConfig, repo: Repository) -> Self {
        Self {
            validator: SearchValidator::new(config),
            repo,
        }
    }

    pub async fn run(&self, input: SearchInput, now: DateTime<Utc>) -> Result<SearchOutcome> {
        let raw = match input {
            SearchInput::Unbound => return Ok(SearchOutcome::Idle),
            SearchInput::Bound(raw) => raw,
        };

        let normalized = match self.validator.validate(raw.as_deref()) {
            Ok(normalized) => normalized,
            Err(error) => {
                metrics::record_search_rejected(&error);
                info!(error = %error, "Search rejected");
                return Ok(SearchOutcome::Invalid {
                    raw: raw.unwrap_or_default(),
                    error,
                });
            }
        };

        let start = Instant::now();
        let query = SearchQuery::new(normalized);
        let questions = self.repo.search_published(&query, now).await?;

        metrics::record_search(start.elapsed().as_secs_f64(), query.tokens().len(), questions.len());
        info!(
            tokens = query.tokens().len(),
            results = questions.len(),
            "Search completed"
        );

        Ok(SearchOutcome::Results { query, questions })
    }
}
