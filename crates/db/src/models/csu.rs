//! Client contracts sent through a one-time signing link.

use frontline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

pub const CSU_STATUS_PENDING: &str = "pending";
pub const CSU_STATUS_SIGNED: &str = "signed";
pub const CSU_STATUS_EXPIRED: &str = "expired";

/// A row from the `csu_contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsuContract {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub recipient_name: String,
    pub recipient_email: String,
    pub body: serde_json::Value,
    pub status: String,
    pub expires_at: Timestamp,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CsuContract {
    /// Still awaiting a signature and inside its validity window.
    pub fn is_signable(&self, now: Timestamp) -> bool {
        self.status == CSU_STATUS_PENDING && self.expires_at > now
    }
}

/// DTO for issuing a new signing link.
#[derive(Debug, Clone)]
pub struct CreateCsuContract {
    pub token_hash: String,
    pub recipient_name: String,
    pub recipient_email: String,
    pub body: serde_json::Value,
    pub expires_at: Timestamp,
    pub created_by: Option<DbId>,
}

/// A row from the `signed_agreements` table, without the signature image.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAgreement {
    pub id: DbId,
    pub contract_id: DbId,
    pub signer_name: String,
    pub initials: String,
    pub field_values: serde_json::Value,
    pub signature_sha256: String,
    pub signer_ip: Option<String>,
    pub signed_at: Timestamp,
}

/// DTO for recording a completed client signature.
#[derive(Debug, Clone)]
pub struct CreateSignedAgreement {
    pub contract_id: DbId,
    pub signer_name: String,
    pub initials: String,
    pub field_values: serde_json::Value,
    pub signature_png: Vec<u8>,
    pub signature_sha256: String,
    pub signer_ip: Option<String>,
}
