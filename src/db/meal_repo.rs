use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::{FieldError, Meal, MealDraft};

/// Errors that can occur during meal storage operations.
#[derive(Debug)]
pub enum RepoError {
    /// No meal exists with the requested id.
    NotFound,
    /// One or more field constraints were violated; nothing was written.
    Validation(Vec<FieldError>),
    /// Underlying database failure.
    Database(sqlx::Error),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::NotFound => write!(f, "Meal not found"),
            RepoError::Validation(errors) => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Invalid meal ({})", fields.join(", "))
            }
            RepoError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepoError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::Database(e)
    }
}

// Row type for database queries
#[derive(sqlx::FromRow)]
struct MealRow {
    id: i64,
    name: String,
    calories: i64,
    created_at: String,
}

impl From<MealRow> for Meal {
    fn from(row: MealRow) -> Self {
        Meal {
            id: row.id,
            name: row.name,
            calories: row.calories,
            created_at: NaiveDate::parse_from_str(&row.created_at, "%Y-%m-%d")
                .unwrap_or_else(|_| Utc::now().date_naive()),
        }
    }
}

/// Storage gateway for meal records.
///
/// Owns the lifetime of every meal row: callers never touch the table
/// directly. Cloning is cheap (the pool is shared).
#[derive(Clone)]
pub struct MealRepository {
    pool: SqlitePool,
}

impl MealRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All meals in insertion order.
    pub async fn list(&self) -> Result<Vec<Meal>, RepoError> {
        let rows: Vec<MealRow> =
            sqlx::query_as("SELECT id, name, calories, created_at FROM meals ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Meal::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Meal, RepoError> {
        let row: Option<MealRow> =
            sqlx::query_as("SELECT id, name, calories, created_at FROM meals WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Meal::from).ok_or(RepoError::NotFound)
    }

    /// Persist a new meal dated today, returning the stored record.
    pub async fn create(&self, draft: &MealDraft) -> Result<Meal, RepoError> {
        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(RepoError::Validation(errors));
        }

        let created_at = Utc::now().date_naive().format("%Y-%m-%d").to_string();

        let result = sqlx::query("INSERT INTO meals (name, calories, created_at) VALUES (?, ?, ?)")
            .bind(&draft.name)
            .bind(draft.calories)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Overwrite name and calories in place. The id and creation date
    /// are never touched.
    ///
    /// An absent id is `NotFound` even when the input is also invalid.
    pub async fn update(&self, id: i64, draft: &MealDraft) -> Result<Meal, RepoError> {
        self.get(id).await?;

        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(RepoError::Validation(errors));
        }

        let result = sqlx::query("UPDATE meals SET name = ?, calories = ? WHERE id = ?")
            .bind(&draft.name)
            .bind(draft.calories)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        self.get(id).await
    }

    /// Permanently remove a meal. Deleting an id that is already gone
    /// fails with `NotFound`.
    pub async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM meals WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
