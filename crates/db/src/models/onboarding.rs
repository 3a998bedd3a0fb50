//! Affiliate onboarding paperwork rows.

use frontline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `affiliate_w9` table. The TIN digest is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct W9Filing {
    pub id: DbId,
    pub user_id: DbId,
    pub legal_name: String,
    pub business_name: Option<String>,
    pub tax_classification: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub tin_last4: String,
    #[serde(skip_serializing)]
    pub tin_hash: String,
    pub signed_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `affiliate_nda` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NdaSignature {
    pub id: DbId,
    pub user_id: DbId,
    pub signer_name: String,
    pub signature_sha256: String,
    pub signed_at: Timestamp,
}
