//! Listing, detail, results and vote handlers

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::Utc;
use tracing::debug;

use super::{last_param, QueryPairs};
use crate::{views, AppState};
use quickpoll_common::{
    errors::{AppError, Result},
    polls::{listing, voting, PageToken, RenderMode, VoteOutcome},
};

/// Path ids that are not integers name no question
fn parse_question_id(raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| AppError::unknown_id(raw))
}

fn redirect(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// `/` sends visitors to the listing
pub async fn root() -> Response {
    redirect("/polls/".to_string())
}

/// Paginated listing of published questions, newest first
pub async fn index(
    State(state): State<AppState>,
    mode: RenderMode,
    Query(params): Query<QueryPairs>,
) -> Result<Html<String>> {
    let page = last_param(&params, "page");
    let token = PageToken::parse(page.as_deref());
    let listing = listing::index_listing(
        &state.repo,
        state.config.polls.page_size,
        &token,
        Utc::now(),
    )
    .await?;

    Ok(Html(views::index(mode, &listing)))
}

/// Question with its vote form
pub async fn detail(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<Html<String>> {
    let question_id = parse_question_id(&question_id)?;
    let question = state.repo.find_published_question(question_id, Utc::now()).await?;
    let choices = state.repo.choices_for(question.id).await?;

    Ok(Html(views::detail(&question, &choices, None)))
}

/// Vote counts for a question
pub async fn results(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<Html<String>> {
    let question_id = parse_question_id(&question_id)?;
    let question = state.repo.find_published_question(question_id, Utc::now()).await?;
    let choices = state.repo.choices_for(question.id).await?;

    Ok(Html(views::results(&question, &choices)))
}

/// Record a vote, then redirect so a refresh cannot submit it twice
pub async fn vote(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    form: std::result::Result<Form<QueryPairs>, FormRejection>,
) -> Result<Response> {
    let question_id = parse_question_id(&question_id)?;

    // A body we cannot read carries no selection
    let choice = match form {
        Ok(Form(fields)) => last_param(&fields, "choice"),
        Err(rejection) => {
            debug!(question_id, error = %rejection, "Unreadable vote form");
            None
        }
    };

    let outcome = voting::vote(&state.repo, question_id, choice.as_deref(), Utc::now()).await?;

    match outcome {
        VoteOutcome::Recorded { question_id, .. } => {
            Ok(redirect(format!("/polls/{}/results/", question_id)))
        }
        VoteOutcome::MissingSelection { question, choices } => {
            let message = AppError::MissingVoteSelection.to_string();
            Ok(Html(views::detail(&question, &choices, Some(&message))).into_response())
        }
    }
}
