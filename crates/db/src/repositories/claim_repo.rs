//! Repository for claim cases and their child tables.
//!
//! Every read and write is scoped to the owning user: a case that belongs to
//! someone else behaves exactly like a case that does not exist.

use frontline_core::claims::{GeneratedDeadline, GeneratedTask, TaskStatus};
use frontline_core::types::DbId;
use sqlx::PgPool;

use crate::models::claim::{
    ClaimCase, ClaimDeadline, ClaimFile, ClaimNote, ClaimTask, CreateClaimCase, CreateClaimFile,
};

const CASE_COLUMNS: &str = "id, user_id, title, case_type, claim_type, evidence_level, status, \
                             created_at, updated_at";
const TASK_COLUMNS: &str =
    "id, case_id, title, description, status, sort_order, created_at, updated_at";
const DEADLINE_COLUMNS: &str = "id, case_id, title, description, due_date, created_at";
const NOTE_COLUMNS: &str = "id, case_id, author_id, body, created_at";
const FILE_COLUMNS: &str =
    "id, case_id, file_name, content_type, size_bytes, stored_path, created_at";

pub struct ClaimRepo;

impl ClaimRepo {
    // -----------------------------------------------------------------------
    // Cases
    // -----------------------------------------------------------------------

    /// Create a case together with its generated tasks and deadlines.
    ///
    /// Runs in one transaction so a case never exists without its checklist.
    pub async fn create_case(
        pool: &PgPool,
        input: &CreateClaimCase,
        tasks: &[GeneratedTask],
        deadlines: &[GeneratedDeadline],
    ) -> Result<ClaimCase, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_case = format!(
            "INSERT INTO claim_cases (user_id, title, case_type, claim_type, evidence_level)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CASE_COLUMNS}"
        );
        let case = sqlx::query_as::<_, ClaimCase>(&insert_case)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(input.track.as_str())
            .bind(input.claim_type.as_str())
            .bind(input.evidence_level.as_str())
            .fetch_one(&mut *tx)
            .await?;

        for task in tasks {
            sqlx::query(
                "INSERT INTO claim_tasks (case_id, title, description, status, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(case.id)
            .bind(task.title)
            .bind(task.description)
            .bind(task.status.as_str())
            .bind(task.sort_order)
            .execute(&mut *tx)
            .await?;
        }

        for deadline in deadlines {
            sqlx::query(
                "INSERT INTO claim_deadlines (case_id, title, description, due_date)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(case.id)
            .bind(deadline.title)
            .bind(deadline.description)
            .bind(deadline.due_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(case)
    }

    /// The user's cases, newest first.
    pub async fn list_cases(pool: &PgPool, user_id: DbId) -> Result<Vec<ClaimCase>, sqlx::Error> {
        let query = format!(
            "SELECT {CASE_COLUMNS} FROM claim_cases
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ClaimCase>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one of the user's cases.
    pub async fn find_case(
        pool: &PgPool,
        user_id: DbId,
        case_id: DbId,
    ) -> Result<Option<ClaimCase>, sqlx::Error> {
        let query = format!("SELECT {CASE_COLUMNS} FROM claim_cases WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, ClaimCase>(&query)
            .bind(case_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Tasks of a case in checklist order.
    pub async fn list_tasks(pool: &PgPool, case_id: DbId) -> Result<Vec<ClaimTask>, sqlx::Error> {
        let query =
            format!("SELECT {TASK_COLUMNS} FROM claim_tasks WHERE case_id = $1 ORDER BY sort_order");
        sqlx::query_as::<_, ClaimTask>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    /// Move a task to a new status. Returns `None` unless the task belongs
    /// to one of the user's cases.
    pub async fn update_task_status(
        pool: &PgPool,
        user_id: DbId,
        task_id: DbId,
        status: TaskStatus,
    ) -> Result<Option<ClaimTask>, sqlx::Error> {
        let query = format!(
            "UPDATE claim_tasks SET status = $3
             WHERE id = $1
               AND case_id IN (SELECT id FROM claim_cases WHERE user_id = $2)
             RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, ClaimTask>(&query)
            .bind(task_id)
            .bind(user_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Deadlines, notes, files
    // -----------------------------------------------------------------------

    pub async fn list_deadlines(
        pool: &PgPool,
        case_id: DbId,
    ) -> Result<Vec<ClaimDeadline>, sqlx::Error> {
        let query = format!(
            "SELECT {DEADLINE_COLUMNS} FROM claim_deadlines WHERE case_id = $1 ORDER BY due_date, id"
        );
        sqlx::query_as::<_, ClaimDeadline>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_notes(pool: &PgPool, case_id: DbId) -> Result<Vec<ClaimNote>, sqlx::Error> {
        let query = format!(
            "SELECT {NOTE_COLUMNS} FROM claim_notes WHERE case_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ClaimNote>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create_note(
        pool: &PgPool,
        case_id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<ClaimNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO claim_notes (case_id, author_id, body)
             VALUES ($1, $2, $3)
             RETURNING {NOTE_COLUMNS}"
        );
        sqlx::query_as::<_, ClaimNote>(&query)
            .bind(case_id)
            .bind(author_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    pub async fn list_files(pool: &PgPool, case_id: DbId) -> Result<Vec<ClaimFile>, sqlx::Error> {
        let query = format!(
            "SELECT {FILE_COLUMNS} FROM claim_files WHERE case_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ClaimFile>(&query)
            .bind(case_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create_file(
        pool: &PgPool,
        input: &CreateClaimFile,
    ) -> Result<ClaimFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO claim_files (case_id, file_name, content_type, size_bytes, stored_path)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {FILE_COLUMNS}"
        );
        sqlx::query_as::<_, ClaimFile>(&query)
            .bind(input.case_id)
            .bind(&input.file_name)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(&input.stored_path)
            .fetch_one(pool)
            .await
    }
}
