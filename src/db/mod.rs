use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;
use crate::models::{Player, PlayerPayload};

/// Builds the shared pool without opening a connection yet.
///
/// Connections are established on first use, so a database that is still
/// starting does not keep the listener from coming up.
pub fn connect_lazy(config: &Config) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .acquire_timeout(config.pool.acquire_timeout)
        .connect_lazy_with(config.database.clone())
}

pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// Player queries. Every value goes through a bind placeholder.
pub async fn list_players(pool: &PgPool) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM player"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_player(pool: &PgPool, id: i32) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT * FROM player WHERE id = $1"#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_player(
    pool: &PgPool,
    id: i32,
    payload: &PlayerPayload,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"UPDATE player SET name = $1, position = $2 WHERE id = $3 RETURNING *"#
    )
    .bind(payload.name.as_deref())
    .bind(payload.position.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_player(pool: &PgPool, payload: &PlayerPayload) -> Result<Player, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"INSERT INTO player (name, position) VALUES ($1, $2) RETURNING *"#
    )
    .bind(payload.name.as_deref())
    .bind(payload.position.as_deref())
    .fetch_one(pool)
    .await
}

/// Returns the removed row, or `None` if no player had that id.
pub async fn delete_player(pool: &PgPool, id: i32) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"DELETE FROM player WHERE id = $1 RETURNING *"#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
