//! HTTP-level tests for affiliate contract signing and sign-all.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, inked_signature, post_json_auth};
use frontline_core::roles::{ROLE_ADMIN, ROLE_AFFILIATE};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn submission(fields: serde_json::Value) -> serde_json::Value {
    json!({
        "signature": inked_signature(),
        "initialsApplied": true,
        "agreeTerms": true,
        "agreeElectronic": true,
        "signerName": "Pat Partner",
        "fields": fields
    })
}

fn all_fields() -> serde_json::Value {
    json!({
        "legal_name": "Pat Partner",
        "address_line": "1 Main St, Austin, TX 78701",
        "effective_date": "2026-05-01"
    })
}

/// Add an active template after the seeded ones that needs one extra field.
async fn add_template(pool: &PgPool, slug: &str, sort_order: i32, field_key: &str) {
    let body = json!({
        "title": slug,
        "sections": [{
            "heading": "Extra",
            "segments": [
                { "type": "text", "text": "Value: " },
                { "type": "field", "key": field_key, "label": "Extra value", "kind": "text" }
            ]
        }]
    });
    sqlx::query(
        "INSERT INTO contract_templates (slug, title, version, sort_order, body)
         VALUES ($1, $1, 1, $2, $3)",
    )
    .bind(slug)
    .bind(sort_order)
    .bind(body)
    .execute(pool)
    .await
    .unwrap();
}

async fn signed_count(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM signed_contracts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn sign_all(pool: &PgPool, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/contracts/sign-all",
        body,
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Templates and single signing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn templates_report_signed_flag(pool: PgPool) {
    let (_, token) = create_user(&pool, "pat@partner.test", ROLE_AFFILIATE).await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/contracts/templates", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let templates = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0]["slug"], "affiliate-revenue-share");
    assert!(templates.iter().all(|t| t["signed"] == false));

    let mut body = submission(all_fields());
    body["templateId"] = templates[0]["id"].clone();
    let response = post_json_auth(common::build_test_app(pool.clone()), "/api/contracts/sign", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Signing the same template twice conflicts.
    let response = post_json_auth(common::build_test_app(pool.clone()), "/api/contracts/sign", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/contracts/templates", &token).await;
    let templates = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(templates[0]["signed"], true);
    assert_eq!(templates[1]["signed"], false);

    let response = get_auth(common::build_test_app(pool), "/api/contracts/my-signed", &token).await;
    let mine = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["initials"], "PP");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contract_routes_require_affiliate(pool: PgPool) {
    let (_, admin) = create_user(&pool, "admin@frontline.test", ROLE_ADMIN).await;
    let response = get_auth(common::build_test_app(pool), "/api/contracts/templates", &admin).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn w9_details_autofill_templates(pool: PgPool) {
    let (user, token) = create_user(&pool, "pat@partner.test", ROLE_AFFILIATE).await;
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/affiliate/submit-w9",
        json!({
            "legalName": "Pat Partner",
            "businessName": "Partner LLC",
            "taxClassification": "llc",
            "addressLine": "1 Main St",
            "city": "Austin",
            "state": "TX",
            "zip": "78701",
            "tin": "12-3456789",
            "signature": inked_signature()
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/contracts/templates", &token).await;
    let templates = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(templates[0]["autofill"]["legal_name"], "Pat Partner");
    assert_eq!(templates[0]["autofill"]["business_name"], "Partner LLC");
    assert_eq!(templates[0]["autofill"]["address_line"], "1 Main St, Austin, TX 78701");
    // The conduct template has no business or address fields.
    assert!(templates[1]["autofill"].get("address_line").is_none());

    // Only the date has to be typed; the rest comes from the W-9.
    let outcome = sign_all(&pool, &token, submission(json!({ "effective_date": "2026-05-01" }))).await;
    assert_eq!(outcome["signed"], 2);
    assert_eq!(outcome["allDone"], true);
    assert_eq!(signed_count(&pool, user.id).await, 2);
}

// ---------------------------------------------------------------------------
// Sign-all
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sign_all_signs_every_pending_template(pool: PgPool) {
    let (user, token) = create_user(&pool, "pat@partner.test", ROLE_AFFILIATE).await;

    let outcome = sign_all(&pool, &token, submission(all_fields())).await;
    assert_eq!(outcome["signed"], 2);
    assert_eq!(outcome["allDone"], true);
    assert!(outcome["failed"].is_null());
    assert_eq!(signed_count(&pool, user.id).await, 2);

    // Nothing left to do.
    let outcome = sign_all(&pool, &token, submission(all_fields())).await;
    assert_eq!(outcome["signed"], 0);
    assert_eq!(outcome["allDone"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sign_all_stops_at_first_failure_and_resumes(pool: PgPool) {
    let (user, token) = create_user(&pool, "pat@partner.test", ROLE_AFFILIATE).await;
    add_template(&pool, "affiliate-tax-addendum", 3, "tax_year").await;
    add_template(&pool, "affiliate-marketing-rules", 4, "marketing_ack").await;

    // The third template needs `tax_year`, which is missing: k = 2.
    let outcome = sign_all(&pool, &token, submission(all_fields())).await;
    assert_eq!(outcome["signed"], 2);
    assert_eq!(outcome["allDone"], false);
    assert_eq!(outcome["failed"]["item"]["slug"], "affiliate-tax-addendum");
    assert!(outcome["failed"]["reason"]
        .as_str()
        .unwrap()
        .contains("Extra value is required"));
    assert_eq!(outcome["skipped"][0]["slug"], "affiliate-marketing-rules");
    assert_eq!(signed_count(&pool, user.id).await, 2);

    // A rerun picks up with what is still pending.
    let mut fields = all_fields();
    fields["tax_year"] = json!("2026");
    fields["marketing_ack"] = json!("yes");
    let outcome = sign_all(&pool, &token, submission(fields)).await;
    assert_eq!(outcome["signed"], 2);
    assert_eq!(outcome["allDone"], true);
    assert_eq!(outcome["signedContracts"][0]["fieldValues"]["tax_year"], "2026");
    assert_eq!(signed_count(&pool, user.id).await, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sign_all_without_initials_signs_nothing(pool: PgPool) {
    let (user, token) = create_user(&pool, "pat@partner.test", ROLE_AFFILIATE).await;

    let mut body = submission(all_fields());
    body["initialsApplied"] = json!(false);
    let outcome = sign_all(&pool, &token, body).await;

    assert_eq!(outcome["signed"], 0);
    assert_eq!(outcome["allDone"], false);
    assert_eq!(outcome["failed"]["item"]["slug"], "affiliate-revenue-share");
    assert_eq!(outcome["skipped"].as_array().unwrap().len(), 1);
    assert_eq!(signed_count(&pool, user.id).await, 0);
}
