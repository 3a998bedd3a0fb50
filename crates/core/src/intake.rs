//! Typed intake payloads for the public lead forms.
//!
//! The kind arrives in the URL, so the body is parsed into the matching
//! variant of [`LeadSubmission`] and validated before it is flattened into
//! the shared storage shape ([`NewLeadParts`]). String values are trimmed
//! first and blank ones count as absent, so whitespace never satisfies a
//! required field.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::lead::LeadKind;

/// US five-digit ZIP code.
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid regex"));

/// Keys stored in dedicated columns rather than in `details`.
const COMMON_KEYS: &[&str] = &["name", "firstName", "lastName", "email", "phone"];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateApplicationForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub branch: Option<String>,
    #[validate(regex(path = *ZIP_RE))]
    pub zip: Option<String>,
    #[validate(length(min = 1))]
    pub help_type: String,
    #[validate(length(max = 5000))]
    pub situation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrivateDoctorRequestForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub branch: Option<String>,
    #[validate(regex(path = *ZIP_RE))]
    pub zip: Option<String>,
    #[validate(length(min = 1))]
    pub care_type: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteApplicationForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub business_name: String,
    pub industry: Option<String>,
    #[validate(length(max = 5000))]
    pub website_needs: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneralContactForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvestorSubmissionForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    #[validate(length(min = 1))]
    pub investment_interest: String,
    #[validate(length(min = 1))]
    pub investment_range: String,
    #[validate(length(max = 5000))]
    pub message: Option<String>,
}

/// One public submission, tagged by lead kind.
#[derive(Debug, Clone)]
pub enum LeadSubmission {
    AffiliateApplication(AffiliateApplicationForm),
    HelpRequest(HelpRequestForm),
    PrivateDoctorRequest(PrivateDoctorRequestForm),
    WebsiteApplication(WebsiteApplicationForm),
    GeneralContact(GeneralContactForm),
    InvestorSubmission(InvestorSubmissionForm),
}

/// A validated submission flattened into the columns of the `leads` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeadParts {
    pub kind: LeadKind,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub details: serde_json::Value,
}

/// Trim top-level string values and drop the ones left empty.
fn without_blank_strings(body: serde_json::Value) -> serde_json::Value {
    let serde_json::Value::Object(map) = body else {
        return body;
    };
    map.into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| (key, serde_json::Value::String(trimmed.to_string())))
            }
            other => Some((key, other)),
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}

impl LeadSubmission {
    /// Parse a JSON body as the payload for `kind`.
    pub fn parse(kind: LeadKind, body: serde_json::Value) -> Result<Self, CoreError> {
        let body = without_blank_strings(body);
        fn de<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, CoreError> {
            serde_json::from_value(body).map_err(|e| CoreError::Validation(e.to_string()))
        }

        Ok(match kind {
            LeadKind::AffiliateApplication => Self::AffiliateApplication(de(body)?),
            LeadKind::HelpRequest => Self::HelpRequest(de(body)?),
            LeadKind::PrivateDoctorRequest => Self::PrivateDoctorRequest(de(body)?),
            LeadKind::WebsiteApplication => Self::WebsiteApplication(de(body)?),
            LeadKind::GeneralContact => Self::GeneralContact(de(body)?),
            LeadKind::InvestorSubmission => Self::InvestorSubmission(de(body)?),
        })
    }

    pub fn kind(&self) -> LeadKind {
        match self {
            Self::AffiliateApplication(_) => LeadKind::AffiliateApplication,
            Self::HelpRequest(_) => LeadKind::HelpRequest,
            Self::PrivateDoctorRequest(_) => LeadKind::PrivateDoctorRequest,
            Self::WebsiteApplication(_) => LeadKind::WebsiteApplication,
            Self::GeneralContact(_) => LeadKind::GeneralContact,
            Self::InvestorSubmission(_) => LeadKind::InvestorSubmission,
        }
    }

    /// Run the field rules for this variant.
    pub fn validate(&self) -> Result<(), CoreError> {
        let result = match self {
            Self::AffiliateApplication(f) => f.validate(),
            Self::HelpRequest(f) => f.validate(),
            Self::PrivateDoctorRequest(f) => f.validate(),
            Self::WebsiteApplication(f) => f.validate(),
            Self::GeneralContact(f) => f.validate(),
            Self::InvestorSubmission(f) => f.validate(),
        };
        result.map_err(|errors| {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|k| k.to_string())
                .collect();
            fields.sort();
            CoreError::Validation(format!("Invalid or missing fields: {}", fields.join(", ")))
        })
    }

    /// Validate and split into the shared columns plus kind-specific details.
    pub fn into_parts(self) -> Result<NewLeadParts, CoreError> {
        self.validate()?;
        let kind = self.kind();
        let value = match &self {
            Self::AffiliateApplication(f) => serde_json::to_value(f),
            Self::HelpRequest(f) => serde_json::to_value(f),
            Self::PrivateDoctorRequest(f) => serde_json::to_value(f),
            Self::WebsiteApplication(f) => serde_json::to_value(f),
            Self::GeneralContact(f) => serde_json::to_value(f),
            Self::InvestorSubmission(f) => serde_json::to_value(f),
        }
        .map_err(|e| CoreError::Internal(e.to_string()))?;

        let serde_json::Value::Object(mut map) = value else {
            return Err(CoreError::Internal("Submission did not serialize to an object".into()));
        };

        let take = |map: &mut serde_json::Map<String, serde_json::Value>, key: &str| {
            map.remove(key)
                .and_then(|v| v.as_str().map(str::trim).map(str::to_string))
                .filter(|s| !s.is_empty())
        };

        let name = take(&mut map, "name");
        let first_name = take(&mut map, "firstName");
        let last_name = take(&mut map, "lastName");
        let email = take(&mut map, "email").unwrap_or_default();
        let phone = take(&mut map, "phone");
        debug_assert!(COMMON_KEYS.iter().all(|k| !map.contains_key(*k)));

        map.retain(|_, v| !v.is_null());

        Ok(NewLeadParts {
            kind,
            name,
            first_name,
            last_name,
            email,
            phone,
            details: serde_json::Value::Object(map),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn help_request_splits_common_and_detail_fields() {
        let body = json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.org",
            "phone": "555-0100",
            "branch": "Army",
            "zip": "78701",
            "helpType": "housing",
            "situation": "Lease ends next month"
        });
        let parts = LeadSubmission::parse(LeadKind::HelpRequest, body)
            .unwrap()
            .into_parts()
            .unwrap();

        assert_eq!(parts.kind, LeadKind::HelpRequest);
        assert_eq!(parts.first_name.as_deref(), Some("Jane"));
        assert_eq!(parts.name, None);
        assert_eq!(parts.email, "jane@example.org");
        assert_eq!(parts.details["helpType"], "housing");
        assert_eq!(parts.details["zip"], "78701");
        assert!(parts.details.get("email").is_none());
    }

    #[test]
    fn missing_kind_specific_field_is_rejected() {
        let body = json!({ "name": "Ana", "email": "ana@example.org", "subject": "Hi" });
        assert_matches!(
            LeadSubmission::parse(LeadKind::GeneralContact, body),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn bad_email_and_zip_are_reported_by_field() {
        let body = json!({
            "firstName": "Jo",
            "lastName": "Lee",
            "email": "not-an-email",
            "zip": "7870",
            "careType": "primary"
        });
        let err = LeadSubmission::parse(LeadKind::PrivateDoctorRequest, body)
            .unwrap()
            .into_parts()
            .unwrap_err();
        let CoreError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("email"));
        assert!(msg.contains("zip"));
    }

    #[test]
    fn whitespace_only_required_fields_are_rejected() {
        let body = json!({
            "name": "   ",
            "email": "ana@example.org",
            "subject": "  ",
            "message": " "
        });
        assert_matches!(
            LeadSubmission::parse(LeadKind::GeneralContact, body),
            Err(CoreError::Validation(msg)) if msg.contains("name")
        );

        let body = json!({
            "firstName": "Jo",
            "lastName": "Lee",
            "email": "jo@example.org",
            "careType": "\t"
        });
        assert_matches!(
            LeadSubmission::parse(LeadKind::PrivateDoctorRequest, body),
            Err(CoreError::Validation(msg)) if msg.contains("careType")
        );
    }

    #[test]
    fn values_are_trimmed_and_blank_optionals_dropped() {
        let body = json!({
            "name": "  Ana Ruiz ",
            "email": "ana@example.org",
            "phone": " ",
            "subject": " Volunteering ",
            "message": "How do I help?"
        });
        let parts = LeadSubmission::parse(LeadKind::GeneralContact, body)
            .unwrap()
            .into_parts()
            .unwrap();
        assert_eq!(parts.name.as_deref(), Some("Ana Ruiz"));
        assert_eq!(parts.phone, None);
        assert_eq!(parts.details["subject"], "Volunteering");
    }

    #[test]
    fn null_optional_details_are_dropped() {
        let body = json!({
            "name": "Pat",
            "email": "pat@fund.example",
            "investmentInterest": "equity",
            "investmentRange": "50k-100k"
        });
        let parts = LeadSubmission::parse(LeadKind::InvestorSubmission, body)
            .unwrap()
            .into_parts()
            .unwrap();
        assert!(parts.details.get("companyName").is_none());
        assert_eq!(parts.details["investmentRange"], "50k-100k");
    }
}
