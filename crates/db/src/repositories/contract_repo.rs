//! Repository for affiliate contract templates and signatures.

use frontline_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::{ContractTemplateRow, CreateSignedContract, SignedContract};

const TEMPLATE_COLUMNS: &str =
    "id, slug, title, version, body, sort_order, is_active, created_at, updated_at";
const SIGNED_COLUMNS: &str = "id, user_id, template_id, signer_name, initials, field_values, \
                               signature_sha256, signed_at";

pub struct ContractRepo;

impl ContractRepo {
    /// Active templates in presentation order.
    pub async fn list_active_templates(
        pool: &PgPool,
    ) -> Result<Vec<ContractTemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM contract_templates
             WHERE is_active = true
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, ContractTemplateRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find an active template.
    pub async fn find_active_template(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContractTemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM contract_templates WHERE id = $1 AND is_active = true"
        );
        sqlx::query_as::<_, ContractTemplateRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active templates the user has not signed yet, in presentation order.
    pub async fn list_pending_templates(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ContractTemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM contract_templates t
             WHERE t.is_active = true
               AND NOT EXISTS (
                   SELECT 1 FROM signed_contracts s
                   WHERE s.template_id = t.id AND s.user_id = $1
               )
             ORDER BY t.sort_order, t.id"
        );
        sqlx::query_as::<_, ContractTemplateRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The user's signatures, newest first.
    pub async fn list_signed_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SignedContract>, sqlx::Error> {
        let query = format!(
            "SELECT {SIGNED_COLUMNS} FROM signed_contracts
             WHERE user_id = $1
             ORDER BY signed_at DESC, id DESC"
        );
        sqlx::query_as::<_, SignedContract>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record a signature. A second signature on the same template violates
    /// `uq_signed_contracts_user_template`.
    pub async fn create_signed(
        pool: &PgPool,
        input: &CreateSignedContract,
    ) -> Result<SignedContract, sqlx::Error> {
        let query = format!(
            "INSERT INTO signed_contracts
                (user_id, template_id, signer_name, initials, field_values,
                 signature_png, signature_sha256)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SIGNED_COLUMNS}"
        );
        sqlx::query_as::<_, SignedContract>(&query)
            .bind(input.user_id)
            .bind(input.template_id)
            .bind(&input.signer_name)
            .bind(&input.initials)
            .bind(&input.field_values)
            .bind(&input.signature_png)
            .bind(&input.signature_sha256)
            .fetch_one(pool)
            .await
    }
}
