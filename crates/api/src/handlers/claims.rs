//! Claims navigator handlers (`/claims/...`).
//!
//! Every endpoint is scoped to the caller: a case owned by someone else
//! is reported as not found.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use frontline_core::claims::{
    generate_deadlines, generate_tasks, CaseTrack, ClaimType, EvidenceLevel, TaskStatus,
};
use frontline_core::error::CoreError;
use frontline_core::types::DbId;
use frontline_db::models::claim::{
    ClaimCase, ClaimDeadline, ClaimFile, ClaimNote, ClaimTask, CreateClaimCase, CreateClaimFile,
};
use frontline_db::repositories::ClaimRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /claims/cases`: the navigator's three answers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub title: String,
    pub case_type: String,
    pub claim_type: String,
    pub evidence_level: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub body: String,
}

/// A case with its generated checklist and deadlines.
#[derive(Debug, Serialize)]
pub struct CaseWithPlan {
    pub case: ClaimCase,
    pub tasks: Vec<ClaimTask>,
    pub deadlines: Vec<ClaimDeadline>,
}

const MAX_TITLE_LENGTH: usize = 200;
const MAX_NOTE_LENGTH: usize = 10_000;

async fn owned_case(state: &AppState, user_id: DbId, case_id: DbId) -> AppResult<ClaimCase> {
    ClaimRepo::find_case(&state.pool, user_id, case_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ClaimCase",
            id: case_id,
        }))
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

/// GET /api/claims/cases
pub async fn list_cases(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ClaimCase>>>> {
    let cases = ClaimRepo::list_cases(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: cases }))
}

/// POST /api/claims/cases
///
/// Creates the case together with its checklist and deadlines.
pub async fn create_case(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateCaseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CaseWithPlan>>)> {
    let title = input.title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Title must be between 1 and {MAX_TITLE_LENGTH} characters"
        ))));
    }
    let track = CaseTrack::from_str_db(&input.case_type)?;
    let claim_type = ClaimType::from_str_db(&input.claim_type)?;
    let evidence = EvidenceLevel::from_str_db(&input.evidence_level)?;

    let tasks = generate_tasks(track, claim_type, evidence);
    let deadlines = generate_deadlines(track, claim_type, chrono::Utc::now().date_naive());

    let case = ClaimRepo::create_case(
        &state.pool,
        &CreateClaimCase {
            user_id: user.user_id,
            title: title.to_string(),
            track,
            claim_type,
            evidence_level: evidence,
        },
        &tasks,
        &deadlines,
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        case_id = case.id,
        case_type = track.as_str(),
        claim_type = claim_type.as_str(),
        tasks = tasks.len(),
        "Claim case created"
    );

    let tasks = ClaimRepo::list_tasks(&state.pool, case.id).await?;
    let deadlines = ClaimRepo::list_deadlines(&state.pool, case.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CaseWithPlan {
                case,
                tasks,
                deadlines,
            },
        }),
    ))
}

/// GET /api/claims/cases/{id}
pub async fn get_case(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ClaimCase>>> {
    let case = owned_case(&state, user.user_id, id).await?;
    Ok(Json(DataResponse { data: case }))
}

// ---------------------------------------------------------------------------
// Tasks and deadlines
// ---------------------------------------------------------------------------

/// GET /api/claims/cases/{id}/tasks
pub async fn list_tasks(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ClaimTask>>>> {
    owned_case(&state, user.user_id, id).await?;
    let tasks = ClaimRepo::list_tasks(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// PATCH /api/claims/tasks/{id}
pub async fn update_task(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<DataResponse<ClaimTask>>> {
    let status = TaskStatus::from_str_db(&input.status)?;
    let task = ClaimRepo::update_task_status(&state.pool, user.user_id, task_id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ClaimTask",
            id: task_id,
        }))?;

    tracing::info!(
        user_id = user.user_id,
        task_id,
        status = status.as_str(),
        "Claim task updated"
    );
    Ok(Json(DataResponse { data: task }))
}

/// GET /api/claims/cases/{id}/deadlines
pub async fn list_deadlines(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ClaimDeadline>>>> {
    owned_case(&state, user.user_id, id).await?;
    let deadlines = ClaimRepo::list_deadlines(&state.pool, id).await?;
    Ok(Json(DataResponse { data: deadlines }))
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// GET /api/claims/cases/{id}/notes
pub async fn list_notes(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ClaimNote>>>> {
    owned_case(&state, user.user_id, id).await?;
    let notes = ClaimRepo::list_notes(&state.pool, id).await?;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /api/claims/cases/{id}/notes
pub async fn create_note(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateNoteRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ClaimNote>>)> {
    let body = input.body.trim();
    if body.is_empty() || body.chars().count() > MAX_NOTE_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Note must be between 1 and {MAX_NOTE_LENGTH} characters"
        ))));
    }
    owned_case(&state, user.user_id, id).await?;

    let note = ClaimRepo::create_note(&state.pool, id, user.user_id, body).await?;
    tracing::info!(user_id = user.user_id, case_id = id, note_id = note.id, "Claim note added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// GET /api/claims/cases/{id}/files
pub async fn list_files(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ClaimFile>>>> {
    owned_case(&state, user.user_id, id).await?;
    let files = ClaimRepo::list_files(&state.pool, id).await?;
    Ok(Json(DataResponse { data: files }))
}

/// Reduce a client-supplied file name to a safe single path component.
fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.chars().take(120).collect()
    }
}

/// Remove a stored upload whose metadata row could not be written.
async fn discard_upload(path: &std::path::Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove orphaned upload");
    }
}

/// POST /api/claims/cases/{id}/files
///
/// Multipart form with a required `file` field. The body is streamed in
/// chunks and rejected once it exceeds the configured upload limit.
pub async fn upload_file(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ClaimFile>>)> {
    owned_case(&state, user.user_id, id).await?;
    let limit = state.config.max_upload_bytes;

    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);

        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if data.len() + chunk.len() > limit {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "File exceeds the {limit} byte upload limit"
                ))));
            }
            data.extend_from_slice(&chunk);
        }
        upload = Some((file_name, content_type, data));
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let dir = state.config.upload_dir.join("claims").join(id.to_string());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let stored_name = format!("{}-{}", uuid::Uuid::now_v7(), sanitize_file_name(&file_name));
    let path = dir.join(&stored_name);
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let created = ClaimRepo::create_file(
        &state.pool,
        &CreateClaimFile {
            case_id: id,
            file_name,
            content_type,
            size_bytes: data.len() as i64,
            stored_path: path.to_string_lossy().to_string(),
        },
    )
    .await;
    let file = match created {
        Ok(file) => file,
        Err(err) => {
            discard_upload(&path).await;
            return Err(err.into());
        }
    };

    tracing::info!(
        user_id = user.user_id,
        case_id = id,
        file_id = file.id,
        size_bytes = file.size_bytes,
        "Claim file uploaded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: file })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_reduced_to_one_safe_component() {
        assert_eq!(sanitize_file_name("DD214.pdf"), "DD214.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\my letter.pdf"), "my_letter.pdf");
        assert_eq!(sanitize_file_name(".env"), "env");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}
