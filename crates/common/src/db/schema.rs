//! Table bootstrap derived from the entity definitions

use crate::db::models::{ChoiceEntity, QuestionEntity};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

/// Create the `questions` and `choices` tables if they are missing
pub async fn create_tables(conn: &DatabaseConnection) -> Result<()> {
    create_table(conn, QuestionEntity).await?;
    create_table(conn, ChoiceEntity).await?;

    info!("Database schema ready");
    Ok(())
}

async fn create_table<E: EntityTrait>(conn: &DatabaseConnection, entity: E) -> Result<()> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();

    conn.execute(backend.build(&stmt)).await?;
    Ok(())
}
