//! Favorites persistence: trait plus the SQLite implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use weather_core::model::FavoriteCity;

use crate::error::{AppError, Result};

#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// All favorites, newest first.
    async fn list(&self) -> Result<Vec<FavoriteCity>>;

    /// Case-insensitive membership test on an already trimmed name.
    async fn exists(&self, city: &str) -> Result<bool>;

    /// Insert a new name. Fails with `AppError::Conflict` if it is already stored.
    async fn insert(&self, city: &str) -> Result<FavoriteCity>;

    /// Delete by id, returning the number of rows removed.
    async fn delete_by_id(&self, id: i64) -> Result<u64>;

    /// Delete by (case-insensitive) name, returning the number of rows removed.
    async fn delete_by_name(&self, city: &str) -> Result<u64>;

    async fn ping(&self) -> bool;
}

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    id: i64,
    city: String,
    added_at: DateTime<Utc>,
}

impl From<FavoriteRow> for FavoriteCity {
    fn from(row: FavoriteRow) -> Self {
        FavoriteCity {
            id: row.id,
            city: row.city,
            added_at: row.added_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteFavoritesRepository {
    pool: SqlitePool,
}

impl SqliteFavoritesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoritesRepository for SqliteFavoritesRepository {
    async fn list(&self) -> Result<Vec<FavoriteCity>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT id, city, added_at FROM favorites ORDER BY added_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list favorites: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(FavoriteCity::from).collect())
    }

    async fn exists(&self, city: &str) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM favorites WHERE city = ?1")
            .bind(city)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn insert(&self, city: &str) -> Result<FavoriteCity> {
        let inserted = sqlx::query_as::<_, FavoriteRow>(
            "INSERT INTO favorites (city) VALUES (?1) RETURNING id, city, added_at",
        )
        .bind(city)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Conflict {
                    city: city.to_string(),
                })
            }
            Err(e) => {
                tracing::error!("Failed to insert favorite: {:?}", e);
                Err(AppError::Database(e))
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_name(&self, city: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM favorites WHERE city = ?1")
            .bind(city)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;

    async fn repo() -> SqliteFavoritesRepository {
        let pool = database::connect("sqlite::memory:", 1).await.unwrap();
        SqliteFavoritesRepository::new(pool)
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() {
        let repo = repo().await;
        let before = Utc::now() - chrono::Duration::seconds(5);

        let fav = repo.insert("Tokyo").await.unwrap();

        assert!(fav.id > 0);
        assert_eq!(fav.city, "Tokyo");
        assert!(fav.added_at >= before);
    }

    #[tokio::test]
    async fn duplicate_insert_is_conflict_regardless_of_case() {
        let repo = repo().await;
        repo.insert("Paris").await.unwrap();

        let err = repo.insert("PARIS").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = repo().await;
        repo.insert("Paris").await.unwrap();
        repo.insert("Tokyo").await.unwrap();
        repo.insert("Lima").await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.city)
            .collect();

        assert_eq!(names, vec!["Lima", "Tokyo", "Paris"]);
    }

    #[tokio::test]
    async fn exists_ignores_case() {
        let repo = repo().await;
        repo.insert("Tokyo").await.unwrap();

        assert!(repo.exists("tokyo").await.unwrap());
        assert!(!repo.exists("Kyoto").await.unwrap());
    }

    #[tokio::test]
    async fn deletes_report_rows_affected() {
        let repo = repo().await;
        let fav = repo.insert("Oslo").await.unwrap();
        repo.insert("Rome").await.unwrap();

        assert_eq!(repo.delete_by_id(fav.id).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(fav.id).await.unwrap(), 0);
        assert_eq!(repo.delete_by_name("rome").await.unwrap(), 1);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_pool() {
        assert!(repo().await.ping().await);
    }
}
