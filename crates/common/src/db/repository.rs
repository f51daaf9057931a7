//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations. Every
//! visibility check takes `now` from the caller so a request evaluates
//! publication exactly once and nothing is cached across requests.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, NotFound, Result};
use crate::polls::pagination::{Page, Paginator};
use crate::polls::query::SearchQuery;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Question Operations
    // ========================================================================

    /// Create a new question
    pub async fn create_question(
        &self,
        question_text: impl Into<String>,
        pub_date: DateTime<Utc>,
    ) -> Result<Question> {
        let question = QuestionActiveModel {
            question_text: Set(question_text.into()),
            pub_date: Set(pub_date),
            ..Default::default()
        };

        question.insert(self.conn()).await.map_err(Into::into)
    }

    /// Find a question that is visible at `now`
    pub async fn find_published_question(&self, id: i32, now: DateTime<Utc>) -> Result<Question> {
        let question = QuestionEntity::find_by_id(id)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::unknown_id(id))?;

        if !question.is_published(now) {
            return Err(NotFound::UnpublishedQuestion { id }.into());
        }

        Ok(question)
    }

    /// Paginator over the questions published at `now`
    pub async fn published_paginator(&self, now: DateTime<Utc>, per_page: u64) -> Result<Paginator> {
        let total = QuestionEntity::find()
            .filter(QuestionColumn::PubDate.lte(now))
            .count(self.conn())
            .await?;

        Ok(Paginator::new(per_page, total))
    }

    /// One page of published questions, newest first
    pub async fn published_page(
        &self,
        now: DateTime<Utc>,
        paginator: &Paginator,
        number: u64,
    ) -> Result<Page<Question>> {
        let questions = QuestionEntity::find()
            .filter(QuestionColumn::PubDate.lte(now))
            .order_by_desc(QuestionColumn::PubDate)
            .order_by_desc(QuestionColumn::Id)
            .offset(paginator.offset(number))
            .limit(paginator.per_page())
            .all(self.conn())
            .await?;

        Ok(paginator.page(number, questions))
    }

    /// Published questions matching any token of `query`
    pub async fn search_published(
        &self,
        query: &SearchQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Question>> {
        // No tokens: answer with nothing rather than scanning the table
        let Some(condition) = query.condition() else {
            return Ok(Vec::new());
        };

        QuestionEntity::find()
            .filter(condition)
            .filter(QuestionColumn::PubDate.lte(now))
            .order_by_asc(QuestionColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Choice Operations
    // ========================================================================

    /// Create a choice under a question
    pub async fn create_choice(
        &self,
        question_id: i32,
        choice_text: impl Into<String>,
    ) -> Result<Choice> {
        let choice = ChoiceActiveModel {
            question_id: Set(question_id),
            choice_text: Set(choice_text.into()),
            votes: Set(0),
            ..Default::default()
        };

        choice.insert(self.conn()).await.map_err(Into::into)
    }

    /// Choices of a question in creation order
    pub async fn choices_for(&self, question_id: i32) -> Result<Vec<Choice>> {
        ChoiceEntity::find()
            .filter(ChoiceColumn::QuestionId.eq(question_id))
            .order_by_asc(ChoiceColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Find a choice by ID
    pub async fn find_choice(&self, id: i32) -> Result<Option<Choice>> {
        ChoiceEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Add one vote in a single `UPDATE ... SET votes = votes + 1`
    ///
    /// Returns `false` when the choice does not exist or belongs to another
    /// question; nothing is written in that case.
    pub async fn record_vote(&self, question_id: i32, choice_id: i32) -> Result<bool> {
        let result = ChoiceEntity::update_many()
            .col_expr(ChoiceColumn::Votes, Expr::col(ChoiceColumn::Votes).add(1))
            .filter(ChoiceColumn::Id.eq(choice_id))
            .filter(ChoiceColumn::QuestionId.eq(question_id))
            .exec(self.conn())
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use chrono::Duration;

    async fn repo() -> Repository {
        let pool = DbPool::new(&DatabaseConfig::default()).await.unwrap();
        Repository::new(pool)
    }

    #[tokio::test]
    async fn test_future_question_is_not_found() {
        let repo = repo().await;
        let now = Utc::now();
        let future = repo.create_question("Future question.", now + Duration::days(5)).await.unwrap();
        let past = repo.create_question("Past question.", now - Duration::days(5)).await.unwrap();

        let err = repo.find_published_question(future.id, now).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(NotFound::UnpublishedQuestion { .. })));

        let err = repo.find_published_question(9999, now).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(NotFound::UnknownId { .. })));

        assert_eq!(repo.find_published_question(past.id, now).await.unwrap(), past);
    }

    #[tokio::test]
    async fn test_published_page_is_newest_first() {
        let repo = repo().await;
        let now = Utc::now();
        for days in [30, 20, 10, 5] {
            repo.create_question(format!("{days} days ago"), now - Duration::days(days))
                .await
                .unwrap();
        }
        repo.create_question("Future question.", now + Duration::days(30)).await.unwrap();

        let paginator = repo.published_paginator(now, 2).await.unwrap();
        assert_eq!(paginator.total(), 4);
        assert_eq!(paginator.num_pages(), 2);

        let first = repo.published_page(now, &paginator, 1).await.unwrap();
        let texts: Vec<_> = first.items.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, ["5 days ago", "10 days ago"]);

        let second = repo.published_page(now, &paginator, 2).await.unwrap();
        let texts: Vec<_> = second.items.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, ["20 days ago", "30 days ago"]);
        assert!(!second.has_next());
    }

    #[tokio::test]
    async fn test_search_is_union_of_tokens() {
        let repo = repo().await;
        let now = Utc::now();
        repo.create_question("This is a test question", now - Duration::hours(1)).await.unwrap();
        repo.create_question("Another question about cats", now - Duration::hours(1)).await.unwrap();
        repo.create_question("Dogs only", now - Duration::hours(1)).await.unwrap();
        repo.create_question("A future test", now + Duration::days(1)).await.unwrap();

        let results = repo.search_published(&SearchQuery::new("test question"), now).await.unwrap();
        let texts: Vec<_> = results.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, ["This is a test question", "Another question about cats"]);

        let results = repo.search_published(&SearchQuery::new("test"), now).await.unwrap();
        assert_eq!(results.len(), 1);

        let results = repo.search_published(&SearchQuery::new("CATS".to_lowercase()), now).await.unwrap();
        assert_eq!(results.len(), 1);

        let results = repo.search_published(&SearchQuery::new("  "), now).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_on_stored_text() {
        let repo = repo().await;
        let now = Utc::now();
        repo.create_question("WHAT'S UP?", now - Duration::hours(1)).await.unwrap();

        let results = repo.search_published(&SearchQuery::new("what's"), now).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = repo().await;
        let now = Utc::now();
        repo.create_question("Is 100% enough?", now - Duration::hours(1)).await.unwrap();
        repo.create_question("Is 1000 enough?", now - Duration::hours(1)).await.unwrap();

        let results = repo.search_published(&SearchQuery::new("100%"), now).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].question_text, "Is 100% enough?");
    }

    #[tokio::test]
    async fn test_record_vote_increments_once() {
        let repo = repo().await;
        let now = Utc::now();
        let question = repo.create_question("Pick one", now).await.unwrap();
        let other = repo.create_question("Other", now).await.unwrap();
        let choice = repo.create_choice(question.id, "A").await.unwrap();

        assert!(repo.record_vote(question.id, choice.id).await.unwrap());
        assert!(repo.record_vote(question.id, choice.id).await.unwrap());
        // Wrong question: no write
        assert!(!repo.record_vote(other.id, choice.id).await.unwrap());
        assert!(!repo.record_vote(question.id, 9999).await.unwrap());

        let choice = repo.find_choice(choice.id).await.unwrap().unwrap();
        assert_eq!(choice.votes, 2);
    }

    #[tokio::test]
    async fn test_concurrent_votes_are_not_lost() {
        let repo = repo().await;
        let question = repo.create_question("Race", Utc::now()).await.unwrap();
        let choice = repo.create_choice(question.id, "A").await.unwrap();

        let (a, b) = tokio::join!(
            repo.record_vote(question.id, choice.id),
            repo.record_vote(question.id, choice.id),
        );
        assert!(a.unwrap() && b.unwrap());

        let choice = repo.find_choice(choice.id).await.unwrap().unwrap();
        assert_eq!(choice.votes, 2);
    }

    #[tokio::test]
    async fn test_choices_in_creation_order() {
        let repo = repo().await;
        let question = repo.create_question("Order", Utc::now()).await.unwrap();
        repo.create_choice(question.id, "first").await.unwrap();
        repo.create_choice(question.id, "second").await.unwrap();

        let texts: Vec<_> = repo
            .choices_for(question.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.choice_text)
            .collect();
        assert_eq!(texts, ["first", "second"]);
    }
}
