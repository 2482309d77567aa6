//! SQLite Story Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{RepositoryError, StoryRepositoryPort};
use crate::domain::story::{
    Chapter, Genre, Protection, Story, StoryId, StoryStatus, Title,
};

/// SQLite Story Repository
pub struct SqliteStoryRepository {
    pool: DbPool,
}

impl SqliteStoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StoryRow {
    id: String,
    title: String,
    genre: String,
    password_hash: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

fn parse_uuid(value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
        .with_timezone(&Utc))
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

impl TryFrom<StoryRow> for Story {
    type Error = RepositoryError;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        Ok(Story::from_parts(
            StoryId::from_uuid(parse_uuid(&row.id)?),
            Title::new(row.title).map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            Genre::new(row.genre).map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            Protection::from_stored(row.password_hash),
            StoryStatus::from_str(&row.status).unwrap_or_default(),
            parse_time(&row.created_at)?,
            parse_time(&row.updated_at)?,
        ))
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    story_id: String,
    chapter_number: i64,
    title: Option<String>,
    content: String,
    summary: Option<String>,
    created_at: String,
}

impl TryFrom<ChapterRow> for Chapter {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        let number = u32::try_from(row.chapter_number)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        Ok(Chapter::from_parts(
            parse_uuid(&row.id)?,
            StoryId::from_uuid(parse_uuid(&row.story_id)?),
            number,
            row.title,
            row.content,
            row.summary,
            parse_time(&row.created_at)?,
        ))
    }
}

const CHAPTER_COLUMNS: &str =
    "id, story_id, chapter_number, title, content, summary, created_at";

#[async_trait]
impl StoryRepositoryPort for SqliteStoryRepository {
    async fn save(&self, story: &Story) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO stories (id, title, genre, password_hash, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                genre = excluded.genre,
                password_hash = excluded.password_hash,
                status = excluded.status,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(story.id().to_string())
        .bind(story.title().as_str())
        .bind(story.genre().as_str())
        .bind(story.protection().credential().map(|hash| hash.as_str()))
        .bind(story.status().as_str())
        .bind(story.created_at().to_rfc3339())
        .bind(story.updated_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: StoryId) -> Result<Option<Story>, RepositoryError> {
        let row: Option<StoryRow> = sqlx::query_as(
            "SELECT id, title, genre, password_hash, status, created_at, updated_at FROM stories WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Story::try_from).transpose()
    }

    async fn delete(&self, id: StoryId) -> Result<(), RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM chapters WHERE story_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let result = sqlx::query("DELETE FROM stories WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("story {}", id)));
        }

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn update_protection(
        &self,
        id: StoryId,
        protection: &Protection,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE stories
            SET password_hash = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(protection.credential().map(|hash| hash.as_str()))
        .bind(updated_at.to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("story {}", id)));
        }

        Ok(())
    }

    async fn find_chapters(&self, story_id: StoryId) -> Result<Vec<Chapter>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {} FROM chapters WHERE story_id = ? ORDER BY chapter_number ASC",
            CHAPTER_COLUMNS
        ))
        .bind(story_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Chapter::try_from).collect()
    }

    async fn find_recent_chapters(
        &self,
        story_id: StoryId,
        limit: usize,
    ) -> Result<Vec<Chapter>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {} FROM chapters WHERE story_id = ? ORDER BY chapter_number DESC LIMIT ?",
            CHAPTER_COLUMNS
        ))
        .bind(story_id.to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Chapter::try_from).collect()
    }

    async fn append_chapter(&self, chapter: &Chapter) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            r#"
            INSERT INTO chapters (id, story_id, chapter_number, title, content, summary, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(chapter.id().to_string())
        .bind(chapter.story_id().to_string())
        .bind(i64::from(chapter.number()))
        .bind(chapter.title())
        .bind(chapter.content())
        .bind(chapter.summary())
        .bind(chapter.created_at().to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return RepositoryError::Duplicate(format!(
                        "chapter {} of story {}",
                        chapter.number(),
                        chapter.story_id()
                    ));
                }
                if db.is_foreign_key_violation() {
                    return RepositoryError::NotFound(format!("story {}", chapter.story_id()));
                }
            }
            db_error(e)
        })?;

        sqlx::query("UPDATE stories SET updated_at = ? WHERE id = ?")
            .bind(chapter.created_at().to_rfc3339())
            .bind(chapter.story_id().to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }
}
