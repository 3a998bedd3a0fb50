//! Repository for tokenised client contracts and their signed agreements.

use frontline_core::types::DbId;
use sqlx::PgPool;

use crate::models::csu::{
    CreateCsuContract, CreateSignedAgreement, CsuContract, SignedAgreement, CSU_STATUS_EXPIRED,
    CSU_STATUS_PENDING, CSU_STATUS_SIGNED,
};

const CONTRACT_COLUMNS: &str = "id, token_hash, recipient_name, recipient_email, body, status, \
                                 expires_at, created_by, created_at, updated_at";
const AGREEMENT_COLUMNS: &str = "id, contract_id, signer_name, initials, field_values, \
                                  signature_sha256, signer_ip, signed_at";

pub struct CsuRepo;

impl CsuRepo {
    pub async fn create(pool: &PgPool, input: &CreateCsuContract) -> Result<CsuContract, sqlx::Error> {
        let query = format!(
            "INSERT INTO csu_contracts
                (token_hash, recipient_name, recipient_email, body, expires_at, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CONTRACT_COLUMNS}"
        );
        sqlx::query_as::<_, CsuContract>(&query)
            .bind(&input.token_hash)
            .bind(&input.recipient_name)
            .bind(&input.recipient_email)
            .bind(&input.body)
            .bind(input.expires_at)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Look a contract up by the digest of its link token, whatever its status.
    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<CsuContract>, sqlx::Error> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM csu_contracts WHERE token_hash = $1");
        sqlx::query_as::<_, CsuContract>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CsuContract>, sqlx::Error> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM csu_contracts WHERE id = $1");
        sqlx::query_as::<_, CsuContract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flag a pending contract whose window has passed.
    pub async fn mark_expired(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE csu_contracts SET status = $2 WHERE id = $1 AND status = $3 AND expires_at <= NOW()",
        )
        .bind(id)
        .bind(CSU_STATUS_EXPIRED)
        .bind(CSU_STATUS_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store the signed agreement and close the contract in one transaction.
    ///
    /// Returns `None` (and stores nothing) if the contract is no longer
    /// pending or has expired, e.g. when two submissions race.
    pub async fn sign(
        pool: &PgPool,
        input: &CreateSignedAgreement,
    ) -> Result<Option<SignedAgreement>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let closed = sqlx::query(
            "UPDATE csu_contracts SET status = $2
             WHERE id = $1 AND status = $3 AND expires_at > NOW()",
        )
        .bind(input.contract_id)
        .bind(CSU_STATUS_SIGNED)
        .bind(CSU_STATUS_PENDING)
        .execute(&mut *tx)
        .await?;

        if closed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO signed_agreements
                (contract_id, signer_name, initials, field_values, signature_png,
                 signature_sha256, signer_ip)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {AGREEMENT_COLUMNS}"
        );
        let agreement = sqlx::query_as::<_, SignedAgreement>(&query)
            .bind(input.contract_id)
            .bind(&input.signer_name)
            .bind(&input.initials)
            .bind(&input.field_values)
            .bind(&input.signature_png)
            .bind(&input.signature_sha256)
            .bind(&input.signer_ip)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(agreement))
    }

    pub async fn find_agreement(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SignedAgreement>, sqlx::Error> {
        let query = format!("SELECT {AGREEMENT_COLUMNS} FROM signed_agreements WHERE id = $1");
        sqlx::query_as::<_, SignedAgreement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
