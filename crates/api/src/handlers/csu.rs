//! Client contract signing through a one-time link (`/csu/...`).
//!
//! Admins create a contract for a recipient and receive the link token
//! once. The recipient opens the link, signs, and can download the signed
//! agreement as a PDF.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use frontline_core::agreement_pdf::{render_agreement_pdf, AgreementDocument};
use frontline_core::contract_template::{ContractTemplate, FieldValues};
use frontline_core::error::CoreError;
use frontline_core::signing::SigningSubmission;
use frontline_core::tokens::{generate_signing_token, hash_signing_token};
use frontline_core::types::DbId;
use frontline_db::models::csu::{
    CreateCsuContract, CreateSignedAgreement, CsuContract, SignedAgreement, CSU_STATUS_SIGNED,
};
use frontline_db::repositories::CsuRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::client_ip;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const MSG_UNKNOWN_LINK: &str = "Signing link not found";
const MSG_ALREADY_SIGNED: &str = "This contract has already been signed";
const MSG_EXPIRED: &str = "This signing link has expired";

/// Request body for `POST /admin/csu/contracts`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractRequest {
    #[validate(length(min = 1, max = 200))]
    pub recipient_name: String,
    #[validate(email)]
    pub recipient_email: String,
    /// Structured contract body (title plus sections of text and fields).
    pub body: serde_json::Value,
}

/// A newly created contract and its one-time link token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedContract {
    pub contract: CsuContract,
    /// Plaintext link token. Only its digest is stored.
    pub token: String,
    pub signing_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedResponse {
    pub agreement: SignedAgreement,
    pub pdf_path: String,
}

/// Query string of the public PDF route. The link token gates the download.
#[derive(Debug, Deserialize)]
pub struct PdfAccess {
    pub token: String,
}

fn pdf_path(agreement_id: DbId, token: &str) -> String {
    format!("/api/csu/signed-agreements/{agreement_id}/pdf/public?token={token}")
}

/// Resolve a link token to a contract that can still be signed.
///
/// Unknown tokens are 404. Signed or expired contracts are 410; a pending
/// contract past its deadline is flagged expired on the way out.
async fn signable_contract(state: &AppState, token: &str) -> AppResult<CsuContract> {
    let contract = CsuRepo::find_by_token_hash(&state.pool, &hash_signing_token(token))
        .await?
        .ok_or_else(|| AppError::NotFound(MSG_UNKNOWN_LINK.into()))?;

    if contract.is_signable(Utc::now()) {
        return Ok(contract);
    }
    if contract.status == CSU_STATUS_SIGNED {
        return Err(AppError::Core(CoreError::Gone(MSG_ALREADY_SIGNED.into())));
    }
    if CsuRepo::mark_expired(&state.pool, contract.id).await? {
        tracing::info!(contract_id = contract.id, "Signing link expired");
    }
    Err(AppError::Core(CoreError::Gone(MSG_EXPIRED.into())))
}

/// Stored bodies are validated on creation, so a parse failure here is a
/// server-side problem rather than bad input.
fn stored_template(body: &serde_json::Value) -> AppResult<ContractTemplate> {
    ContractTemplate::from_json(body)
        .map_err(|e| AppError::InternalError(format!("Stored contract body is invalid: {e}")))
}

/// POST /api/admin/csu/contracts
pub async fn create_contract(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateContractRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedContract>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    ContractTemplate::from_json(&input.body)?;

    let token = generate_signing_token();
    let contract = CsuRepo::create(
        &state.pool,
        &CreateCsuContract {
            token_hash: token.hash,
            recipient_name: input.recipient_name.trim().to_string(),
            recipient_email: input.recipient_email.trim().to_lowercase(),
            body: input.body,
            expires_at: Utc::now() + Duration::days(state.config.signing_link_ttl_days),
            created_by: Some(admin.user_id),
        },
    )
    .await?;

    tracing::info!(
        user_id = admin.user_id,
        contract_id = contract.id,
        expires_at = %contract.expires_at,
        "Client contract created"
    );

    let signing_path = format!("/csu/sign/{}", token.plaintext);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedContract {
                contract,
                token: token.plaintext,
                signing_path,
            },
        }),
    ))
}

/// GET /api/csu/contract/{token}
pub async fn get_contract(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<CsuContract>>> {
    let contract = signable_contract(&state, &token).await?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/csu/sign/{token}
///
/// Every unmet condition is reported together as 422 and nothing is stored.
pub async fn sign(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    Json(submission): Json<SigningSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<SignedResponse>>)> {
    let contract = signable_contract(&state, &token).await?;
    let template = stored_template(&contract.body)?;
    let accepted = submission.accept(&template)?;

    let field_values = serde_json::to_value(&accepted.fields)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let agreement = CsuRepo::sign(
        &state.pool,
        &CreateSignedAgreement {
            contract_id: contract.id,
            signer_name: accepted.signer_name,
            initials: accepted.initials,
            field_values,
            signature_png: accepted.signature.png,
            signature_sha256: accepted.signature.sha256,
            signer_ip: client_ip(&headers),
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::Gone(MSG_ALREADY_SIGNED.into())))?;

    tracing::info!(
        contract_id = contract.id,
        agreement_id = agreement.id,
        "Client contract signed"
    );

    let pdf_path = pdf_path(agreement.id, &token);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SignedResponse {
                agreement,
                pdf_path,
            },
        }),
    ))
}

/// GET /api/csu/signed-agreements/{id}/pdf/public?token=...
///
/// The token must be the one the agreement was signed through; any other
/// token gets the same 404 as an unknown id.
pub async fn agreement_pdf(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(access): Query<PdfAccess>,
) -> AppResult<impl IntoResponse> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "SignedAgreement",
            id,
        })
    };
    let agreement = CsuRepo::find_agreement(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let contract = CsuRepo::find_by_id(&state.pool, agreement.contract_id)
        .await?
        .filter(|c| c.token_hash == hash_signing_token(&access.token))
        .ok_or_else(not_found)?;

    let template = stored_template(&contract.body)?;
    let values: FieldValues = serde_json::from_value(agreement.field_values.clone())
        .map_err(|e| AppError::InternalError(format!("Stored field values are invalid: {e}")))?;
    let sections = template.render_text(&values, Some(&agreement.initials));

    let pdf = render_agreement_pdf(&AgreementDocument {
        title: &template.title,
        sections: &sections,
        signer_name: &agreement.signer_name,
        signed_at: agreement.signed_at,
        signature_sha256: &agreement.signature_sha256,
        agreement_id: agreement.id,
    });

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("inline; filename=\"agreement-{id}.pdf\""),
            ),
        ],
        pdf,
    ))
}
