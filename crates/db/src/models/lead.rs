//! Lead entity model and DTOs.

use frontline_core::intake::NewLeadParts;
use frontline_core::lead::{LeadKind, LeadLike, SEARCH_DETAIL_KEYS};
use frontline_core::nullable;
use frontline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: DbId,
    pub kind: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// Kind-specific answers (`helpType`, `companyName`, `zip`, ...).
    pub details: serde_json::Value,
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    /// A string value from `details`, if present.
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(serde_json::Value::as_str)
    }
}

impl LeadLike for Lead {
    fn search_fields(&self) -> Vec<Option<&str>> {
        let mut fields = vec![
            self.name.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            Some(self.email.as_str()),
        ];
        fields.extend(SEARCH_DETAIL_KEYS.iter().map(|key| self.detail_str(key)));
        fields
    }

    fn status_str(&self) -> &str {
        &self.status
    }
}

/// DTO for inserting a validated intake submission.
#[derive(Debug, Clone)]
pub struct CreateLead {
    pub kind: LeadKind,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub details: serde_json::Value,
}

impl From<NewLeadParts> for CreateLead {
    fn from(parts: NewLeadParts) -> Self {
        Self {
            kind: parts.kind,
            name: parts.name,
            first_name: parts.first_name,
            last_name: parts.last_name,
            email: parts.email,
            phone: parts.phone,
            details: parts.details,
        }
    }
}

/// Body of `PATCH /admin/{slug}/{id}`.
///
/// The lead kind comes from the URL, never from this body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLead {
    pub status: Option<String>,
    /// `null` clears the assignment; absent leaves it unchanged.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub assigned_to: Option<Option<DbId>>,
    /// Same tri-state as `assigned_to`: `null` clears the notes.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub notes: Option<Option<String>>,
}

/// One `(kind, status)` bucket for the dashboard stat cards.
#[derive(Debug, Clone, FromRow)]
pub struct LeadStatusCount {
    pub kind: String,
    pub status: String,
    pub count: i64,
}
