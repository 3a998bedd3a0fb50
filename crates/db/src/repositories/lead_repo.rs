//! Repository for the `leads` table.

use frontline_core::lead::LeadKind;
use frontline_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead, LeadStatusCount, UpdateLead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, name, first_name, last_name, email, phone, details, \
                        status, assigned_to, notes, created_at, updated_at";

/// Provides storage for every lead kind. Each query is scoped by kind.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead with status `new`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (kind, name, first_name, last_name, email, phone, details)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(input.kind.as_str())
            .bind(&input.name)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Find a lead of the given kind. A lead of another kind is not found.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: LeadKind,
        id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1 AND kind = $2");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Every lead of the given kind, newest first.
    pub async fn list_by_kind(pool: &PgPool, kind: LeadKind) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads WHERE kind = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }

    /// Apply a triage update. `status` must already be a valid status string.
    ///
    /// `assigned_to: Some(None)` clears the assignment. Returns `None` if no
    /// lead of this kind has the given `id`.
    pub async fn update(
        pool: &PgPool,
        kind: LeadKind,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                status = COALESCE($3, status),
                assigned_to = CASE WHEN $4 THEN $5 ELSE assigned_to END,
                notes = CASE WHEN $6 THEN $7 ELSE notes END
             WHERE id = $1 AND kind = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(kind.as_str())
            .bind(&input.status)
            .bind(input.assigned_to.is_some())
            .bind(input.assigned_to.flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Lead counts grouped by kind and status.
    pub async fn count_by_kind_and_status(
        pool: &PgPool,
    ) -> Result<Vec<LeadStatusCount>, sqlx::Error> {
        sqlx::query_as::<_, LeadStatusCount>(
            "SELECT kind, status, COUNT(*) AS count FROM leads GROUP BY kind, status",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of leads assigned to a user.
    pub async fn count_assigned_to(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads WHERE assigned_to = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
