//! Lead kinds, triage status, and in-memory filtering.
//!
//! A lead is any inbound submission awaiting triage. The six variants share
//! one storage shape; [`LeadKind`] is the discriminator that selects the
//! admin endpoint, the intake payload, and the search fields.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Lead kind
// ---------------------------------------------------------------------------

/// The six lead variants handled by the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    AffiliateApplication,
    HelpRequest,
    PrivateDoctorRequest,
    WebsiteApplication,
    GeneralContact,
    InvestorSubmission,
}

impl LeadKind {
    /// Every kind, in dashboard tab order.
    pub const ALL: [LeadKind; 6] = [
        LeadKind::AffiliateApplication,
        LeadKind::HelpRequest,
        LeadKind::PrivateDoctorRequest,
        LeadKind::WebsiteApplication,
        LeadKind::GeneralContact,
        LeadKind::InvestorSubmission,
    ];

    /// Parse the URL path segment used by the admin and intake endpoints.
    pub fn from_slug(slug: &str) -> Result<Self, CoreError> {
        match slug {
            "affiliate-applications" => Ok(Self::AffiliateApplication),
            "help-requests" => Ok(Self::HelpRequest),
            "private-doctor-requests" => Ok(Self::PrivateDoctorRequest),
            "website-applications" => Ok(Self::WebsiteApplication),
            "general-contact" => Ok(Self::GeneralContact),
            "investor-submissions" => Ok(Self::InvestorSubmission),
            _ => Err(CoreError::Validation(format!("Unknown lead type '{slug}'"))),
        }
    }

    /// URL path segment for this kind.
    pub fn slug(self) -> &'static str {
        match self {
            Self::AffiliateApplication => "affiliate-applications",
            Self::HelpRequest => "help-requests",
            Self::PrivateDoctorRequest => "private-doctor-requests",
            Self::WebsiteApplication => "website-applications",
            Self::GeneralContact => "general-contact",
            Self::InvestorSubmission => "investor-submissions",
        }
    }

    /// Parse the value stored in `leads.kind`.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid lead kind '{s}'")))
    }

    /// Database-compatible string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AffiliateApplication => "affiliate_application",
            Self::HelpRequest => "help_request",
            Self::PrivateDoctorRequest => "private_doctor_request",
            Self::WebsiteApplication => "website_application",
            Self::GeneralContact => "general_contact",
            Self::InvestorSubmission => "investor_submission",
        }
    }

    /// Entity label used in not-found errors and log lines.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::AffiliateApplication => "AffiliateApplication",
            Self::HelpRequest => "HelpRequest",
            Self::PrivateDoctorRequest => "PrivateDoctorRequest",
            Self::WebsiteApplication => "WebsiteApplication",
            Self::GeneralContact => "GeneralContact",
            Self::InvestorSubmission => "InvestorSubmission",
        }
    }
}

// ---------------------------------------------------------------------------
// Lead status
// ---------------------------------------------------------------------------

/// Triage status shared by every lead kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    InProgress,
    Closed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::InProgress,
        LeadStatus::Closed,
    ];

    /// Parse a status string from the database or a request.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(CoreError::Validation(format!(
                "Invalid lead status '{s}'. Must be one of: new, contacted, in_progress, closed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

/// Status filter applied by the admin panels: everything, or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(LeadStatus),
}

impl StatusFilter {
    /// Parse the `?status=` query value. Missing, empty and `all` mean no filter.
    pub fn parse(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Ok(Self::All),
            Some(s) => LeadStatus::from_str_db(s).map(Self::Only),
        }
    }

    fn accepts(self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.as_str() == status,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Detail keys that participate in free-text search alongside name and email.
pub const SEARCH_DETAIL_KEYS: &[&str] = &["companyName", "businessName"];

/// Anything the lead panels can filter.
pub trait LeadLike {
    /// The raw values searched by [`filter_leads`]: names, email, company fields.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Stored status string.
    fn status_str(&self) -> &str;
}

/// Lower-case and concatenate the present search fields.
pub fn search_haystack(fields: &[Option<&str>]) -> String {
    fields
        .iter()
        .flatten()
        .map(|f| f.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep the leads that contain `search_term` (case-insensitive) in their
/// search fields AND pass the status filter. Order is preserved.
pub fn filter_leads<T: LeadLike>(list: Vec<T>, search_term: &str, status: StatusFilter) -> Vec<T> {
    let needle = search_term.trim().to_lowercase();
    list.into_iter()
        .filter(|lead| {
            let matches_search =
                needle.is_empty() || search_haystack(&lead.search_fields()).contains(&needle);
            matches_search && status.accepts(lead.status_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: Option<String>,
        email: Option<String>,
        company: Option<String>,
        status: String,
    }

    impl LeadLike for Row {
        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![
                self.name.as_deref(),
                self.email.as_deref(),
                self.company.as_deref(),
            ]
        }

        fn status_str(&self) -> &str {
            &self.status
        }
    }

    fn row(name: &str, email: &str, company: Option<&str>, status: &str) -> Row {
        Row {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            company: company.map(str::to_string),
            status: status.to_string(),
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row("Jane Doe", "jane@example.org", None, "new"),
            row("Marcus Hill", "mhill@example.org", Some("Hill Logistics"), "contacted"),
            row("Ana Ruiz", "ana@ruiz.dev", Some("Ruiz Web"), "closed"),
        ]
    }

    #[test]
    fn empty_search_and_all_is_identity() {
        let list = sample();
        assert_eq!(filter_leads(list.clone(), "", StatusFilter::All), list);
    }

    #[test]
    fn search_is_case_insensitive() {
        let out = filter_leads(sample(), "jane", StatusFilter::All);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name.as_deref(), Some("Jane Doe"));

        let out = filter_leads(sample(), "HILL LOG", StatusFilter::All);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn both_predicates_must_hold() {
        let out = filter_leads(sample(), "jane", StatusFilter::Only(LeadStatus::Closed));
        assert!(out.is_empty());

        let out = filter_leads(sample(), "ruiz", StatusFilter::Only(LeadStatus::Closed));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn status_only_filter_keeps_order() {
        let mut list = sample();
        list.push(row("Zed", "z@example.org", None, "new"));
        let out = filter_leads(list, "", StatusFilter::Only(LeadStatus::New));
        let names: Vec<_> = out.iter().map(|r| r.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Jane Doe", "Zed"]);
    }

    #[test]
    fn missing_fields_are_skipped() {
        let sparse = Row {
            name: None,
            email: Some("only@mail.test".into()),
            company: None,
            status: "new".into(),
        };
        assert_eq!(search_haystack(&sparse.search_fields()), "only@mail.test");
        assert_eq!(filter_leads(vec![sparse], "only", StatusFilter::All).len(), 1);
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!(StatusFilter::parse(None).unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("all")).unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("in_progress")).unwrap(),
            StatusFilter::Only(LeadStatus::InProgress)
        );
        assert_matches!(
            StatusFilter::parse(Some("archived")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn kind_slug_and_db_tag_round_trip() {
        for kind in LeadKind::ALL {
            assert_eq!(LeadKind::from_slug(kind.slug()).unwrap(), kind);
            assert_eq!(LeadKind::from_str_db(kind.as_str()).unwrap(), kind);
        }
        assert_matches!(LeadKind::from_slug("users"), Err(CoreError::Validation(_)));
    }
}
