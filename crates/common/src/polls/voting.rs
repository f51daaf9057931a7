//! Vote submission

use crate::db::models::{Choice, Question};
use crate::db::Repository;
use crate::errors::Result;
use crate::metrics;
use chrono::{DateTime, Utc};
use tracing::info;

#[derive(Debug, Clone)]
pub enum VoteOutcome {
    /// Counter moved; the caller redirects to the results page
    Recorded { question_id: i32, choice_id: i32 },
    /// No usable choice in the form; the caller re-renders the detail page
    MissingSelection {
        question: Question,
        choices: Vec<Choice>,
    },
}

/// Record a vote for `choice` (the raw form value) on a published question
pub async fn vote(
    repo: &Repository,
    question_id: i32,
    choice: Option<&str>,
    now: DateTime<Utc>,
) -> Result<VoteOutcome> {
    let question = repo.find_published_question(question_id, now).await?;

    let choice_id = choice.and_then(|raw| raw.trim().parse::<i32>().ok());
    let recorded = match choice_id {
        Some(choice_id) => repo.record_vote(question.id, choice_id).await?,
        None => false,
    };

    match (recorded, choice_id) {
        (true, Some(choice_id)) => {
            metrics::record_vote();
            info!(question_id, choice_id, "Vote recorded");
            Ok(VoteOutcome::Recorded {
                question_id,
                choice_id,
            })
        }
        _ => {
            info!(question_id, choice = ?choice, "Vote without a valid choice");
            let choices = repo.choices_for(question.id).await?;
            Ok(VoteOutcome::MissingSelection { question, choices })
        }
    }
}
