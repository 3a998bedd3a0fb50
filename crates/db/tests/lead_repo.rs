//! Integration tests for lead storage and triage updates.

use frontline_core::lead::{filter_leads, LeadKind, StatusFilter};
use frontline_core::roles::ROLE_AFFILIATE;
use frontline_db::models::lead::{CreateLead, UpdateLead};
use frontline_db::models::user::CreateUser;
use frontline_db::repositories::{LeadRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_lead(kind: LeadKind, name: &str, details: serde_json::Value) -> CreateLead {
    CreateLead {
        kind,
        name: Some(name.to_string()),
        first_name: None,
        last_name: None,
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: None,
        details,
    }
}

async fn new_affiliate(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Affiliate".to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: ROLE_AFFILIATE.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_scoped_by_kind_and_newest_first(pool: PgPool) {
    let first = LeadRepo::create(&pool, &new_lead(LeadKind::HelpRequest, "Jane Doe", json!({})))
        .await
        .unwrap();
    let second = LeadRepo::create(&pool, &new_lead(LeadKind::HelpRequest, "John Roe", json!({})))
        .await
        .unwrap();
    LeadRepo::create(
        &pool,
        &new_lead(LeadKind::InvestorSubmission, "Ivy Investor", json!({})),
    )
    .await
    .unwrap();

    let help = LeadRepo::list_by_kind(&pool, LeadKind::HelpRequest).await.unwrap();
    assert_eq!(help.iter().map(|l| l.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    assert!(help.iter().all(|l| l.status == "new"));

    // A lead is invisible through another kind.
    let wrong_kind = LeadRepo::find_by_id(&pool, LeadKind::InvestorSubmission, first.id)
        .await
        .unwrap();
    assert!(wrong_kind.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stored_leads_filter_on_company_details(pool: PgPool) {
    LeadRepo::create(
        &pool,
        &new_lead(
            LeadKind::AffiliateApplication,
            "Sam Smith",
            json!({ "companyName": "Patriot Roofing" }),
        ),
    )
    .await
    .unwrap();
    LeadRepo::create(&pool, &new_lead(LeadKind::AffiliateApplication, "Pat Lee", json!({})))
        .await
        .unwrap();

    let all = LeadRepo::list_by_kind(&pool, LeadKind::AffiliateApplication).await.unwrap();
    let hits = filter_leads(all, "ROOFING", StatusFilter::All);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name.as_deref(), Some("Sam Smith"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_assigns_and_clears(pool: PgPool) {
    let affiliate = new_affiliate(&pool, "aff@example.com").await;
    let lead = LeadRepo::create(&pool, &new_lead(LeadKind::HelpRequest, "Jane Doe", json!({})))
        .await
        .unwrap();

    let assigned = LeadRepo::update(
        &pool,
        LeadKind::HelpRequest,
        lead.id,
        &UpdateLead {
            status: Some("contacted".into()),
            assigned_to: Some(Some(affiliate)),
            notes: Some(Some("Called on Monday".into())),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(assigned.status, "contacted");
    assert_eq!(assigned.assigned_to, Some(affiliate));

    // Absent fields leave values unchanged.
    let untouched = LeadRepo::update(&pool, LeadKind::HelpRequest, lead.id, &UpdateLead::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.assigned_to, Some(affiliate));
    assert_eq!(untouched.notes.as_deref(), Some("Called on Monday"));

    let cleared = LeadRepo::update(
        &pool,
        LeadKind::HelpRequest,
        lead.id,
        &UpdateLead {
            assigned_to: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.assigned_to, None);
    assert_eq!(cleared.status, "contacted");
    assert_eq!(cleared.notes.as_deref(), Some("Called on Monday"));

    let no_notes = LeadRepo::update(
        &pool,
        LeadKind::HelpRequest,
        lead.id,
        &UpdateLead {
            notes: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(no_notes.notes, None);
    assert_eq!(no_notes.status, "contacted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_status_is_rejected_by_check_constraint(pool: PgPool) {
    let lead = LeadRepo::create(&pool, &new_lead(LeadKind::GeneralContact, "Jane Doe", json!({})))
        .await
        .unwrap();
    let result = LeadRepo::update(
        &pool,
        LeadKind::GeneralContact,
        lead.id,
        &UpdateLead {
            status: Some("archived".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_affiliate_unassigns_leads(pool: PgPool) {
    let affiliate = new_affiliate(&pool, "gone@example.com").await;
    let lead = LeadRepo::create(&pool, &new_lead(LeadKind::HelpRequest, "Jane Doe", json!({})))
        .await
        .unwrap();
    LeadRepo::update(
        &pool,
        LeadKind::HelpRequest,
        lead.id,
        &UpdateLead {
            assigned_to: Some(Some(affiliate)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(LeadRepo::count_assigned_to(&pool, affiliate).await.unwrap(), 1);

    assert!(UserRepo::delete_with_role(&pool, affiliate, ROLE_AFFILIATE).await.unwrap());

    let reloaded = LeadRepo::find_by_id(&pool, LeadKind::HelpRequest, lead.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.assigned_to, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn counts_group_by_kind_and_status(pool: PgPool) {
    for name in ["A One", "B Two"] {
        LeadRepo::create(&pool, &new_lead(LeadKind::HelpRequest, name, json!({})))
            .await
            .unwrap();
    }
    let counts = LeadRepo::count_by_kind_and_status(&pool).await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].kind, "help_request");
    assert_eq!(counts[0].status, "new");
    assert_eq!(counts[0].count, 2);
}
