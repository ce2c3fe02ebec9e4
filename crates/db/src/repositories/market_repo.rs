//! Repository for the `markets` lookup table and its M2M edges.

use sqlx::PgPool;

use nexo_core::types::DbId;

use crate::models::market::Market;

pub struct MarketRepo;

impl MarketRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Market>, sqlx::Error> {
        sqlx::query_as::<_, Market>("SELECT id, name FROM markets ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn ids_by_names(pool: &PgPool, names: &[String]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM markets WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(pool)
            .await
    }

    pub async fn upsert(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO markets (name) VALUES (LOWER($1))
             ON CONFLICT ON CONSTRAINT uq_markets_name DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    pub async fn list_for_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Market>, sqlx::Error> {
        sqlx::query_as::<_, Market>(
            "SELECT m.id, m.name FROM project_markets pm
             JOIN markets m ON m.id = pm.market_id
             WHERE pm.project_id = $1
             ORDER BY m.name",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Markets attached to a mentor, looked up by the mentor's username.
    pub async fn list_for_mentor_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<Market>, sqlx::Error> {
        sqlx::query_as::<_, Market>(
            "SELECT m.id, m.name FROM mentor_markets mm
             JOIN markets m ON m.id = mm.market_id
             JOIN mentors mt ON mt.id = mm.mentor_id
             JOIN profiles p ON p.id = mt.profile_id
             JOIN users u ON u.id = p.user_id
             WHERE u.username = $1
             ORDER BY m.name",
        )
        .bind(username)
        .fetch_all(pool)
        .await
    }
}
