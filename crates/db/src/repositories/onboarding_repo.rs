//! Repository for affiliate W-9 filings and NDA signatures.

use frontline_core::onboarding::W9Record;
use frontline_core::types::DbId;
use sqlx::PgPool;

use crate::models::onboarding::{NdaSignature, W9Filing};

const W9_COLUMNS: &str = "id, user_id, legal_name, business_name, tax_classification, \
                          address_line, city, state, zip, tin_last4, tin_hash, signed_at, updated_at";
const NDA_COLUMNS: &str = "id, user_id, signer_name, signature_sha256, signed_at";

pub struct OnboardingRepo;

impl OnboardingRepo {
    pub async fn find_w9(pool: &PgPool, user_id: DbId) -> Result<Option<W9Filing>, sqlx::Error> {
        let query = format!("SELECT {W9_COLUMNS} FROM affiliate_w9 WHERE user_id = $1");
        sqlx::query_as::<_, W9Filing>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the user's W-9. A resubmission resets `signed_at`.
    pub async fn upsert_w9(
        pool: &PgPool,
        user_id: DbId,
        record: &W9Record,
    ) -> Result<W9Filing, sqlx::Error> {
        let query = format!(
            "INSERT INTO affiliate_w9
                (user_id, legal_name, business_name, tax_classification, address_line,
                 city, state, zip, tin_last4, tin_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT ON CONSTRAINT uq_affiliate_w9_user DO UPDATE SET
                legal_name = EXCLUDED.legal_name,
                business_name = EXCLUDED.business_name,
                tax_classification = EXCLUDED.tax_classification,
                address_line = EXCLUDED.address_line,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                zip = EXCLUDED.zip,
                tin_last4 = EXCLUDED.tin_last4,
                tin_hash = EXCLUDED.tin_hash,
                signed_at = NOW()
             RETURNING {W9_COLUMNS}"
        );
        sqlx::query_as::<_, W9Filing>(&query)
            .bind(user_id)
            .bind(&record.legal_name)
            .bind(&record.business_name)
            .bind(&record.tax_classification)
            .bind(&record.address_line)
            .bind(&record.city)
            .bind(&record.state)
            .bind(&record.zip)
            .bind(&record.tin_last4)
            .bind(&record.tin_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_nda(pool: &PgPool, user_id: DbId) -> Result<Option<NdaSignature>, sqlx::Error> {
        let query = format!("SELECT {NDA_COLUMNS} FROM affiliate_nda WHERE user_id = $1");
        sqlx::query_as::<_, NdaSignature>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Record the NDA signature. Signing twice violates `uq_affiliate_nda_user`.
    pub async fn create_nda(
        pool: &PgPool,
        user_id: DbId,
        signer_name: &str,
        signature_sha256: &str,
    ) -> Result<NdaSignature, sqlx::Error> {
        let query = format!(
            "INSERT INTO affiliate_nda (user_id, signer_name, signature_sha256)
             VALUES ($1, $2, $3)
             RETURNING {NDA_COLUMNS}"
        );
        sqlx::query_as::<_, NdaSignature>(&query)
            .bind(user_id)
            .bind(signer_name)
            .bind(signature_sha256)
            .fetch_one(pool)
            .await
    }
}
