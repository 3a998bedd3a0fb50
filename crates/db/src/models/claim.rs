//! Claims navigator models: cases and their tasks, deadlines, notes and files.

use chrono::NaiveDate;
use frontline_core::claims::{CaseTrack, ClaimType, EvidenceLevel};
use frontline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `claim_cases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCase {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub case_type: String,
    pub claim_type: String,
    pub evidence_level: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimTask {
    pub id: DbId,
    pub case_id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDeadline {
    pub id: DbId,
    pub case_id: DbId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimNote {
    pub id: DbId,
    pub case_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// Metadata for an uploaded document. The bytes live on disk at `stored_path`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimFile {
    pub id: DbId,
    pub case_id: DbId,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    #[serde(skip_serializing)]
    pub stored_path: String,
    pub created_at: Timestamp,
}

/// DTO for opening a case from navigator answers.
#[derive(Debug, Clone)]
pub struct CreateClaimCase {
    pub user_id: DbId,
    pub title: String,
    pub track: CaseTrack,
    pub claim_type: ClaimType,
    pub evidence_level: EvidenceLevel,
}

/// DTO for recording an uploaded file.
#[derive(Debug, Clone)]
pub struct CreateClaimFile {
    pub case_id: DbId,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub stored_path: String,
}
