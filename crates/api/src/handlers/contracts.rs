//! Affiliate contract handlers (`/contracts/...`).
//!
//! Affiliates sign every active template once. Templates offer autofill
//! values from the affiliate's W-9 so repeated details need not be retyped.

use std::collections::{HashMap, HashSet};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use frontline_core::contract_template::{ContractTemplate, FieldValues};
use frontline_core::error::CoreError;
use frontline_core::sign_all::{sign_all, SignAllFailure};
use frontline_core::signing::SigningSubmission;
use frontline_core::types::DbId;
use frontline_db::models::contract::{ContractTemplateRow, CreateSignedContract, SignedContract};
use frontline_db::models::onboarding::W9Filing;
use frontline_db::repositories::{ContractRepo, OnboardingRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAffiliate;
use crate::response::DataResponse;
use crate::state::AppState;

/// An active template as seen by one affiliate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateView {
    #[serde(flatten)]
    pub template: ContractTemplateRow,
    pub signed: bool,
    /// Suggested values for this template's fields, taken from the W-9.
    pub autofill: FieldValues,
}

/// Body of `POST /contracts/sign`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignContractRequest {
    pub template_id: DbId,
    #[serde(flatten)]
    pub submission: SigningSubmission,
}

/// Identifies a template in a sign-all report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRef {
    pub id: DbId,
    pub slug: String,
    pub title: String,
}

impl From<&ContractTemplateRow> for TemplateRef {
    fn from(row: &ContractTemplateRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug.clone(),
            title: row.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignAllResponse {
    /// Number of templates signed by this run.
    pub signed: usize,
    pub signed_contracts: Vec<SignedContract>,
    /// Templates not attempted because an earlier one failed.
    pub skipped: Vec<TemplateRef>,
    pub failed: Option<SignAllFailure<TemplateRef>>,
    pub all_done: bool,
}

/// Field values derivable from a W-9 filing.
fn w9_autofill(w9: &W9Filing) -> FieldValues {
    let mut values = FieldValues::new();
    values.insert("legal_name".into(), w9.legal_name.clone());
    if let Some(business) = &w9.business_name {
        values.insert("business_name".into(), business.clone());
    }
    values.insert(
        "address_line".into(),
        format!("{}, {}, {} {}", w9.address_line, w9.city, w9.state, w9.zip),
    );
    values
}

/// Autofill values first, then whatever the signer typed on top.
fn merge_fields(autofill: &FieldValues, submitted: FieldValues) -> FieldValues {
    let mut fields = autofill.clone();
    fields.extend(submitted.into_iter().filter(|(_, v)| !v.trim().is_empty()));
    fields
}

async fn autofill_for(pool: &PgPool, user_id: DbId) -> AppResult<FieldValues> {
    Ok(OnboardingRepo::find_w9(pool, user_id)
        .await?
        .map(|w9| w9_autofill(&w9))
        .unwrap_or_default())
}

/// Validate one submission against one template and store the signature.
async fn sign_template(
    pool: &PgPool,
    user_id: DbId,
    row: &ContractTemplateRow,
    submission: SigningSubmission,
) -> AppResult<SignedContract> {
    let template = ContractTemplate::from_json(&row.body)
        .map_err(|e| AppError::InternalError(format!("Template {} is invalid: {e}", row.slug)))?;
    let accepted = submission.accept(&template)?;
    let field_values = serde_json::to_value(&accepted.fields)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let signed = ContractRepo::create_signed(
        pool,
        &CreateSignedContract {
            user_id,
            template_id: row.id,
            signer_name: accepted.signer_name,
            initials: accepted.initials,
            field_values,
            signature_png: accepted.signature.png,
            signature_sha256: accepted.signature.sha256,
        },
    )
    .await?;

    tracing::info!(
        user_id,
        template_id = row.id,
        contract_id = signed.id,
        "Affiliate contract signed"
    );
    Ok(signed)
}

/// GET /api/contracts/templates
pub async fn list_templates(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TemplateView>>>> {
    let templates = ContractRepo::list_active_templates(&state.pool).await?;
    let signed: HashSet<DbId> = ContractRepo::list_signed_for_user(&state.pool, user.user_id)
        .await?
        .into_iter()
        .map(|s| s.template_id)
        .collect();
    let autofill = autofill_for(&state.pool, user.user_id).await?;

    let views = templates
        .into_iter()
        .map(|template| {
            let autofill = match ContractTemplate::from_json(&template.body) {
                Ok(parsed) => parsed.retain_known(autofill.clone()),
                Err(_) => FieldValues::new(),
            };
            TemplateView {
                signed: signed.contains(&template.id),
                autofill,
                template,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// GET /api/contracts/my-signed
pub async fn my_signed(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SignedContract>>>> {
    let signed = ContractRepo::list_signed_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: signed }))
}

/// POST /api/contracts/sign
///
/// Signing a template twice is rejected with 409.
pub async fn sign(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
    Json(input): Json<SignContractRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SignedContract>>)> {
    let row = ContractRepo::find_active_template(&state.pool, input.template_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContractTemplate",
            id: input.template_id,
        }))?;

    let autofill = autofill_for(&state.pool, user.user_id).await?;
    let mut submission = input.submission;
    submission.fields = merge_fields(&autofill, std::mem::take(&mut submission.fields));

    let signed = sign_template(&state.pool, user.user_id, &row, submission).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: signed })))
}

/// POST /api/contracts/sign-all
///
/// Applies one signature to every pending template, in presentation order,
/// one at a time. Stops at the first template that fails and keeps the
/// ones already signed; calling again picks up with what is still pending.
pub async fn sign_all_pending(
    RequireAffiliate(user): RequireAffiliate,
    State(state): State<AppState>,
    Json(submission): Json<SigningSubmission>,
) -> AppResult<Json<DataResponse<SignAllResponse>>> {
    let pending = ContractRepo::list_pending_templates(&state.pool, user.user_id).await?;
    let autofill = autofill_for(&state.pool, user.user_id).await?;

    let items: Vec<TemplateRef> = pending.iter().map(TemplateRef::from).collect();
    let rows: HashMap<DbId, &ContractTemplateRow> = pending.iter().map(|r| (r.id, r)).collect();
    let pool = &state.pool;
    let user_id = user.user_id;
    let (rows, autofill, submission) = (&rows, &autofill, &submission);

    let outcome = sign_all(items, move |item: TemplateRef| async move {
        let Some(row) = rows.get(&item.id).copied() else {
            return Err(CoreError::NotFound {
                entity: "ContractTemplate",
                id: item.id,
            });
        };
        let mut attempt = submission.clone();
        attempt.fields = merge_fields(autofill, std::mem::take(&mut attempt.fields));

        sign_template(pool, user_id, row, attempt)
            .await
            .map_err(|err| match err {
                AppError::Core(core) => core,
                other => {
                    tracing::error!(
                        user_id,
                        template_id = item.id,
                        error = %other,
                        "Sign-all step failed"
                    );
                    CoreError::Internal("Could not record the signature".into())
                }
            })
    })
    .await;

    tracing::info!(
        user_id,
        signed = outcome.signed_count(),
        all_done = outcome.all_done,
        failed_template = outcome.failed.as_ref().map(|f| f.item.id),
        "Sign-all finished"
    );

    Ok(Json(DataResponse {
        data: SignAllResponse {
            signed: outcome.signed_count(),
            signed_contracts: outcome.signed,
            skipped: outcome.skipped,
            failed: outcome.failed,
            all_done: outcome.all_done,
        },
    }))
}
