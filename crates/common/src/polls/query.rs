//! Multi-token question filter
//!
//! Search is broadening: a question matches when its text contains ANY of
//! the tokens, compared case-insensitively.

use crate::db::models::QuestionColumn;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::Condition;

const LIKE_ESCAPE: char = '\\';

/// Normalized search text split into tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    tokens: Vec<String>,
}

impl SearchQuery {
    /// Build from validator output (already lower-cased and trimmed)
    pub fn new(normalized: impl Into<String>) -> Self {
        let text = normalized.into();
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Self { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// No tokens means no constraint, which the repository answers with nothing
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// OR of `LOWER(question_text) LIKE %token%`, or `None` without tokens
    pub fn condition(&self) -> Option<Condition> {
        if self.tokens.is_empty() {
            return None;
        }

        let condition = self.tokens.iter().fold(Condition::any(), |any, token| {
            let pattern = format!("%{}%", escape_like(token));
            any.add(
                Expr::expr(Func::lower(Expr::col(QuestionColumn::QuestionText)))
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            )
        });

        Some(condition)
    }
}

/// Make LIKE wildcards in user text match literally
fn escape_like(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for c in token.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::QuestionEntity;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait, Value};

    #[test]
    fn test_splits_on_any_whitespace() {
        let query = SearchQuery::new("test \t question\nabout");
        assert_eq!(query.tokens(), ["test", "question", "about"]);
        assert_eq!(query.text(), "test \t question\nabout");
    }

    #[test]
    fn test_whitespace_only_has_no_tokens() {
        let query = SearchQuery::new("   ");
        assert!(query.is_empty());
        assert!(query.condition().is_none());
    }

    #[test]
    fn test_condition_is_disjunction_of_tokens() {
        let query = SearchQuery::new("test question");
        let stmt = QuestionEntity::find()
            .filter(query.condition().unwrap())
            .build(DbBackend::Sqlite);

        let sql = &stmt.sql;
        assert!(sql.contains("LOWER("), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(!sql.contains(" AND "), "{sql}");
        assert_eq!(sql.matches("ESCAPE").count(), 2, "{sql}");

        let values = stmt.values.unwrap().0;
        assert_eq!(values, vec![Value::from("%test%"), Value::from("%question%")]);
    }

    #[test]
    fn test_token_wildcards_are_bound_escaped() {
        let query = SearchQuery::new("100%");
        let stmt = QuestionEntity::find()
            .filter(query.condition().unwrap())
            .build(DbBackend::Sqlite);

        assert_eq!(stmt.values.unwrap().0, vec![Value::from("%100\\%%")]);
    }

    #[test]
    fn test_wildcards_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
