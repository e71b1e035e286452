// src/database.rs
use crate::requirements::ProfileRequirementKey;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Per-job requirement configuration as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProfileRequirements {
    pub job_id: Uuid,
    pub requirement_keys: BTreeSet<ProfileRequirementKey>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());

        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool.as_ref().ok_or_else(|| {
            anyhow::anyhow!("Database pool not initialized. Call init_pool() first.")
        })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;
        run_migrations(pool).await?;
        info!("Database migrations completed successfully");
        Ok(())
    }
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_profile_requirements (
            job_id TEXT PRIMARY KEY,
            requirement_keys TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub struct RequirementRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RequirementRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the stored requirement set for a job, if one was ever saved.
    pub async fn get(&self, job_id: Uuid) -> Result<Option<JobProfileRequirements>> {
        let row = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
            r#"
            SELECT job_id, requirement_keys, updated_at
            FROM job_profile_requirements
            WHERE job_id = ?
            "#,
        )
        .bind(job_id.to_string())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some((job_id, keys_json, updated_at)) => {
                let requirement_keys: BTreeSet<ProfileRequirementKey> =
                    serde_json::from_str(&keys_json).with_context(|| {
                        format!("Corrupt requirement_keys for job {}", job_id)
                    })?;
                let job_id = Uuid::parse_str(&job_id)
                    .with_context(|| format!("Invalid job id in storage: {}", job_id))?;

                Ok(Some(JobProfileRequirements {
                    job_id,
                    requirement_keys,
                    updated_at,
                }))
            }
            None => Ok(None),
        }
    }

    /// Replace a job's requirement set in full. Idempotent, all-or-nothing;
    /// there are no merge semantics.
    pub async fn upsert(
        &self,
        job_id: Uuid,
        requirement_keys: &BTreeSet<ProfileRequirementKey>,
    ) -> Result<()> {
        let keys_json = serde_json::to_string(requirement_keys)
            .context("Failed to serialize requirement keys")?;

        sqlx::query(
            r#"
            INSERT INTO job_profile_requirements (job_id, requirement_keys, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(job_id) DO UPDATE SET
                requirement_keys = excluded.requirement_keys,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(job_id.to_string())
        .bind(keys_json)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        info!(
            "Saved requirement configuration for job {} ({} keys)",
            job_id,
            requirement_keys.len()
        );
        Ok(())
    }

    /// List every job with a configured requirement set.
    pub async fn list(&self) -> Result<Vec<JobProfileRequirements>> {
        let rows = sqlx::query_as::<_, (String, String, DateTime<Utc>)>(
            r#"
            SELECT job_id, requirement_keys, updated_at
            FROM job_profile_requirements
            ORDER BY job_id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut configs = Vec::with_capacity(rows.len());
        for (job_id, keys_json, updated_at) in rows {
            let requirement_keys: BTreeSet<ProfileRequirementKey> =
                serde_json::from_str(&keys_json)
                    .with_context(|| format!("Corrupt requirement_keys for job {}", job_id))?;
            let job_id = Uuid::parse_str(&job_id)
                .with_context(|| format!("Invalid job id in storage: {}", job_id))?;
            configs.push(JobProfileRequirements {
                job_id,
                requirement_keys,
                updated_at,
            });
        }

        Ok(configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // Single connection so the in-memory database is shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn sample_keys() -> BTreeSet<ProfileRequirementKey> {
        [
            ProfileRequirementKey::BasicPhone,
            ProfileRequirementKey::Resume,
            ProfileRequirementKey::Skills,
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_get_unconfigured_job_is_none() {
        let pool = test_pool().await;
        let repo = RequirementRepository::new(&pool);

        let config = repo.get(Uuid::new_v4()).await.unwrap();
        assert!(config.is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get_round_trips() {
        let pool = test_pool().await;
        let repo = RequirementRepository::new(&pool);
        let job_id = Uuid::new_v4();

        repo.upsert(job_id, &sample_keys()).await.unwrap();

        let stored = repo.get(job_id).await.unwrap().unwrap();
        assert_eq!(stored.job_id, job_id);
        assert_eq!(stored.requirement_keys, sample_keys());
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let pool = test_pool().await;
        let repo = RequirementRepository::new(&pool);
        let job_id = Uuid::new_v4();

        repo.upsert(job_id, &sample_keys()).await.unwrap();
        repo.upsert(job_id, &sample_keys()).await.unwrap();

        let stored = repo.get(job_id).await.unwrap().unwrap();
        assert_eq!(stored.requirement_keys, sample_keys());

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_fully_replaces_the_set() {
        let pool = test_pool().await;
        let repo = RequirementRepository::new(&pool);
        let job_id = Uuid::new_v4();

        repo.upsert(job_id, &sample_keys()).await.unwrap();

        let replacement: BTreeSet<ProfileRequirementKey> =
            [ProfileRequirementKey::Education].into_iter().collect();
        repo.upsert(job_id, &replacement).await.unwrap();

        let stored = repo.get(job_id).await.unwrap().unwrap();
        assert_eq!(stored.requirement_keys, replacement);
    }

    #[tokio::test]
    async fn test_empty_set_is_stored_not_deleted() {
        let pool = test_pool().await;
        let repo = RequirementRepository::new(&pool);
        let job_id = Uuid::new_v4();

        repo.upsert(job_id, &sample_keys()).await.unwrap();
        repo.upsert(job_id, &BTreeSet::new()).await.unwrap();

        let stored = repo.get(job_id).await.unwrap().unwrap();
        assert!(stored.requirement_keys.is_empty());
    }
}
