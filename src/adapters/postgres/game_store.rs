//! PostgreSQL implementation of GameStore.
//!
//! Two tables: `games` archives finished sessions with the serialized
//! board, `leaderboard` keeps additive per-player tallies updated with an
//! upsert.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

use crate::domain::game::{GameSnapshot, Outcome, Slot};
use crate::ports::{GameStore, LeaderboardEntry, StoreError};

/// PostgreSQL implementation of [`GameStore`].
#[derive(Clone)]
pub struct PostgresGameStore {
    pool: PgPool,
}

impl PostgresGameStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the tables if they do not exist yet.
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id UUID PRIMARY KEY,
                player1 VARCHAR(100) NOT NULL,
                player2 VARCHAR(100),
                winner VARCHAR(100),
                status VARCHAR(20) NOT NULL,
                board_state TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                finished_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS leaderboard (
                username VARCHAR(100) PRIMARY KEY,
                wins BIGINT NOT NULL DEFAULT 0,
                losses BIGINT NOT NULL DEFAULT 0,
                draws BIGINT NOT NULL DEFAULT 0,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn bump(
        &self,
        username: &str,
        wins: i64,
        losses: i64,
        draws: i64,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO leaderboard (username, wins, losses, draws, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (username)
            DO UPDATE SET
                wins = leaderboard.wins + EXCLUDED.wins,
                losses = leaderboard.losses + EXCLUDED.losses,
                draws = leaderboard.draws + EXCLUDED.draws,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(username)
        .bind(wins)
        .bind(losses)
        .bind(draws)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl GameStore for PostgresGameStore {
    async fn save_finished_game(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        let board_state = serde_json::to_string(&snapshot.board)
            .map_err(|e| StoreError::Database(format!("failed to serialize board: {e}")))?;
        let finished_at = snapshot.last_move_at.unwrap_or(snapshot.created_at);

        sqlx::query(
            r#"
            INSERT INTO games (
                id, player1, player2, winner, status, board_state, created_at, finished_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(snapshot.id.as_uuid())
        .bind(snapshot.username(Slot::Zero).unwrap_or_default())
        .bind(snapshot.username(Slot::One))
        .bind(winner_username(snapshot))
        .bind(snapshot.status.as_str())
        .bind(board_state)
        .bind(snapshot.created_at.as_datetime())
        .bind(finished_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn record_outcome(
        &self,
        winner: Option<String>,
        loser: Option<String>,
        is_draw: bool,
    ) -> Result<(), StoreError> {
        if is_draw {
            for name in [winner, loser].into_iter().flatten() {
                self.bump(&name, 0, 0, 1).await?;
            }
        } else {
            if let Some(name) = winner {
                self.bump(&name, 1, 0, 0).await?;
            }
            if let Some(name) = loser {
                self.bump(&name, 0, 1, 0).await?;
            }
        }
        Ok(())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT username, wins, losses, draws
            FROM leaderboard
            ORDER BY wins DESC, draws DESC, losses ASC
            LIMIT 100
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(LeaderboardEntry {
                    username: row.try_get("username").map_err(db_error)?,
                    wins: row.try_get("wins").map_err(db_error)?,
                    losses: row.try_get("losses").map_err(db_error)?,
                    draws: row.try_get("draws").map_err(db_error)?,
                })
            })
            .collect()
    }
}

fn db_error(err: sqlx::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

/// Display name of the winning participant, `None` for draws.
fn winner_username(snapshot: &GameSnapshot) -> Option<&str> {
    match snapshot.winner {
        Some(Outcome::Won(slot)) => snapshot.username(slot),
        Some(Outcome::Draw) | None => None,
    }
}
