//! Affiliate contract templates and signatures.

use frontline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contract_templates` table. `body` holds a
/// [`frontline_core::contract_template::ContractTemplate`].
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTemplateRow {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub version: i32,
    pub body: serde_json::Value,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `signed_contracts` table, without the signature image.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedContract {
    pub id: DbId,
    pub user_id: DbId,
    pub template_id: DbId,
    pub signer_name: String,
    pub initials: String,
    pub field_values: serde_json::Value,
    pub signature_sha256: String,
    pub signed_at: Timestamp,
}

/// DTO for recording an affiliate's signature on one template.
#[derive(Debug, Clone)]
pub struct CreateSignedContract {
    pub user_id: DbId,
    pub template_id: DbId,
    pub signer_name: String,
    pub initials: String,
    pub field_values: serde_json::Value,
    pub signature_png: Vec<u8>,
    pub signature_sha256: String,
}
