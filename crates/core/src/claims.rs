//! Claims navigator: answer enums, task checklist and deadline generation.
//!
//! The navigator asks three questions (which program, what kind of claim,
//! how much evidence the claimant already has) and turns the answers into an
//! ordered checklist. Generation is a flat decision table: same answers,
//! same list, every time.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Answer enums
// ---------------------------------------------------------------------------

/// Benefits program the case is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTrack {
    Va,
    Ssdi,
}

impl CaseTrack {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "va" => Ok(Self::Va),
            "ssdi" => Ok(Self::Ssdi),
            _ => Err(CoreError::Validation(format!(
                "Invalid case type '{s}'. Must be one of: va, ssdi"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Va => "va",
            Self::Ssdi => "ssdi",
        }
    }
}

/// What the claimant is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    New,
    Increase,
    Secondary,
    Appeal,
}

impl ClaimType {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "new" => Ok(Self::New),
            "increase" => Ok(Self::Increase),
            "secondary" => Ok(Self::Secondary),
            "appeal" => Ok(Self::Appeal),
            _ => Err(CoreError::Validation(format!(
                "Invalid claim type '{s}'. Must be one of: new, increase, secondary, appeal"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Increase => "increase",
            Self::Secondary => "secondary",
            Self::Appeal => "appeal",
        }
    }
}

/// How much supporting evidence the claimant already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    None,
    Some,
    ALot,
}

impl EvidenceLevel {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "none" => Ok(Self::None),
            "some" => Ok(Self::Some),
            "a_lot" => Ok(Self::ALot),
            _ => Err(CoreError::Validation(format!(
                "Invalid evidence level '{s}'. Must be one of: none, some, a_lot"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Some => "some",
            Self::ALot => "a_lot",
        }
    }
}

/// Progress of a single checklist task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(CoreError::Validation(format!(
                "Invalid task status '{s}'. Must be one of: todo, doing, done"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }
}

// ---------------------------------------------------------------------------
// Generated records
// ---------------------------------------------------------------------------

/// A checklist entry produced by [`generate_tasks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTask {
    pub title: &'static str,
    pub description: &'static str,
    pub status: TaskStatus,
    pub sort_order: i32,
}

/// A deadline produced by [`generate_deadlines`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDeadline {
    pub title: &'static str,
    pub description: &'static str,
    pub due_date: NaiveDate,
}

/// Days an intent to file keeps the effective date open.
pub const VA_INTENT_TO_FILE_DAYS: u64 = 365;

/// Days to pick a review lane after a VA decision.
pub const VA_APPEAL_WINDOW_DAYS: u64 = 365;

/// Days to request SSDI reconsideration after a denial.
pub const SSDI_APPEAL_WINDOW_DAYS: u64 = 60;

/// Build the ordered checklist for a set of navigator answers.
///
/// `sort_order` starts at 0 and increases by one per task.
pub fn generate_tasks(
    track: CaseTrack,
    claim_type: ClaimType,
    evidence: EvidenceLevel,
) -> Vec<GeneratedTask> {
    let mut tasks: Vec<(&'static str, &'static str)> = Vec::new();

    tasks.push((
        "Gather Your Records",
        "Collect discharge papers, medical records and any prior decision letters.",
    ));

    match track {
        CaseTrack::Va => {
            tasks.push((
                "File Intent to File",
                "Submit VA Form 21-0966 to lock in your effective date while you prepare.",
            ));
            match claim_type {
                ClaimType::New => {
                    tasks.push((
                        "Establish Service Connection",
                        "Show the in-service event, a current diagnosis, and the link between them.",
                    ));
                    tasks.push((
                        "Obtain Buddy Statements",
                        "Ask people who served with you to describe what they witnessed (VA Form 21-10210).",
                    ));
                }
                ClaimType::Increase => {
                    tasks.push((
                        "Document Worsening Symptoms",
                        "Keep a symptom log and note how the condition limits work and daily life.",
                    ));
                    tasks.push((
                        "Request Updated Medical Exam",
                        "Get a current exam that measures the condition against the rating criteria.",
                    ));
                }
                ClaimType::Secondary => {
                    tasks.push((
                        "Identify Primary Service-Connected Condition",
                        "Confirm which rated condition caused or aggravated the new one.",
                    ));
                    tasks.push((
                        "Obtain Medical Opinion Linking Conditions",
                        "A provider should state the secondary condition is at least as likely as not caused by the primary.",
                    ));
                }
                ClaimType::Appeal => {
                    tasks.push((
                        "Choose a Review Lane",
                        "Pick Supplemental Claim, Higher-Level Review, or a Board Appeal.",
                    ));
                    tasks.push((
                        "Submit New and Relevant Evidence",
                        "Add evidence the VA did not have when it made the decision.",
                    ));
                }
            }
            if evidence != EvidenceLevel::ALot {
                tasks.push((
                    "Consider Nexus Letter",
                    "A medical nexus opinion often decides service-connection claims with thin records.",
                ));
            }
            if evidence == EvidenceLevel::None {
                tasks.push((
                    "Request Service Treatment Records",
                    "Order your STRs and personnel file through milConnect or SF-180.",
                ));
            }
            tasks.push((
                "Prepare for C&P Exam",
                "Review your symptoms on your worst days and bring notes to the exam.",
            ));
            tasks.push((
                "Submit Claim",
                "File VA Form 21-526EZ (or the review-lane form) with all evidence attached.",
            ));
        }
        CaseTrack::Ssdi => {
            tasks.push((
                "Confirm Work Credits",
                "Check your Social Security statement for enough recent work credits.",
            ));
            match claim_type {
                ClaimType::New => {
                    tasks.push((
                        "Complete Adult Disability Report",
                        "Fill out form SSA-3368 describing conditions, providers and work history.",
                    ));
                    tasks.push((
                        "List All Treating Providers",
                        "Include names, addresses and visit dates for every provider.",
                    ));
                }
                ClaimType::Increase | ClaimType::Secondary => {
                    tasks.push((
                        "Report New or Worsened Conditions",
                        "Tell SSA about conditions that changed since your last report.",
                    ));
                }
                ClaimType::Appeal => {
                    tasks.push((
                        "Request Reconsideration",
                        "File form SSA-561 to ask for a fresh review of the denial.",
                    ));
                    tasks.push((
                        "Prepare for ALJ Hearing",
                        "If reconsideration is denied, request a hearing and organise testimony.",
                    ));
                }
            }
            if evidence != EvidenceLevel::ALot {
                tasks.push((
                    "Request Medical Source Statement",
                    "Ask your doctor to describe your functional limits in writing.",
                ));
            }
            tasks.push((
                "Submit Application to SSA",
                "Apply online, by phone, or at a local Social Security office.",
            ));
        }
    }

    tasks.push((
        "Track Deadlines",
        "Watch every response date; missed deadlines can reset your claim.",
    ));

    tasks
        .into_iter()
        .enumerate()
        .map(|(i, (title, description))| GeneratedTask {
            title,
            description,
            status: TaskStatus::Todo,
            sort_order: i as i32,
        })
        .collect()
}

/// Deadlines that start running the day the case is opened.
pub fn generate_deadlines(
    track: CaseTrack,
    claim_type: ClaimType,
    opened_on: NaiveDate,
) -> Vec<GeneratedDeadline> {
    let after = |days: u64| opened_on.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
    let mut deadlines = Vec::new();

    if track == CaseTrack::Va {
        deadlines.push(GeneratedDeadline {
            title: "Intent to File Expires",
            description: "Submit the full claim before this date to keep your effective date.",
            due_date: after(VA_INTENT_TO_FILE_DAYS),
        });
    }

    if claim_type == ClaimType::Appeal {
        let (title, days) = match track {
            CaseTrack::Va => ("Review Lane Window Closes", VA_APPEAL_WINDOW_DAYS),
            CaseTrack::Ssdi => ("Reconsideration Request Due", SSDI_APPEAL_WINDOW_DAYS),
        };
        deadlines.push(GeneratedDeadline {
            title,
            description: "Count from the date on the decision letter if it is earlier.",
            due_date: after(days),
        });
    }

    deadlines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(tasks: &[GeneratedTask]) -> Vec<&'static str> {
        tasks.iter().map(|t| t.title).collect()
    }

    #[test]
    fn va_new_without_evidence_gets_connection_buddy_and_nexus_tasks() {
        let tasks = generate_tasks(CaseTrack::Va, ClaimType::New, EvidenceLevel::None);
        let titles = titles(&tasks);
        assert!(titles.contains(&"Establish Service Connection"));
        assert!(titles.contains(&"Obtain Buddy Statements"));
        assert!(titles.contains(&"Consider Nexus Letter"));
    }

    #[test]
    fn va_new_with_plenty_of_evidence_skips_nexus_letter() {
        let tasks = generate_tasks(CaseTrack::Va, ClaimType::New, EvidenceLevel::ALot);
        let titles = titles(&tasks);
        assert!(titles.contains(&"Establish Service Connection"));
        assert!(!titles.contains(&"Consider Nexus Letter"));
    }

    #[test]
    fn sort_order_is_contiguous_from_zero_for_every_answer_set() {
        let tracks = [CaseTrack::Va, CaseTrack::Ssdi];
        let claims = [
            ClaimType::New,
            ClaimType::Increase,
            ClaimType::Secondary,
            ClaimType::Appeal,
        ];
        let evidence = [EvidenceLevel::None, EvidenceLevel::Some, EvidenceLevel::ALot];

        for track in tracks {
            for claim in claims {
                for level in evidence {
                    let tasks = generate_tasks(track, claim, level);
                    assert!(!tasks.is_empty());
                    for (i, task) in tasks.iter().enumerate() {
                        assert_eq!(task.sort_order, i as i32);
                        assert_eq!(task.status, TaskStatus::Todo);
                    }
                }
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_tasks(CaseTrack::Ssdi, ClaimType::Appeal, EvidenceLevel::Some);
        let b = generate_tasks(CaseTrack::Ssdi, ClaimType::Appeal, EvidenceLevel::Some);
        assert_eq!(a, b);
        assert_eq!(a.first().map(|t| t.title), Some("Gather Your Records"));
        assert_eq!(a.last().map(|t| t.title), Some("Track Deadlines"));
    }

    #[test]
    fn ssdi_does_not_get_va_tasks() {
        let tasks = generate_tasks(CaseTrack::Ssdi, ClaimType::New, EvidenceLevel::None);
        let titles = titles(&tasks);
        assert!(!titles.contains(&"File Intent to File"));
        assert!(titles.contains(&"Request Medical Source Statement"));
    }

    #[test]
    fn va_appeal_has_intent_and_review_window_deadlines() {
        let opened = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let deadlines = generate_deadlines(CaseTrack::Va, ClaimType::Appeal, opened);
        assert_eq!(deadlines.len(), 2);
        assert_eq!(deadlines[0].due_date, NaiveDate::from_ymd_opt(2027, 3, 1).unwrap());
    }

    #[test]
    fn ssdi_new_has_no_deadlines() {
        let opened = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert!(generate_deadlines(CaseTrack::Ssdi, ClaimType::New, opened).is_empty());
    }

    #[test]
    fn ssdi_appeal_window_is_sixty_days() {
        let opened = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let appeal = generate_deadlines(CaseTrack::Ssdi, ClaimType::Appeal, opened);
        assert_eq!(appeal.len(), 1);
        assert_eq!(appeal[0].due_date, NaiveDate::from_ymd_opt(2026, 4, 30).unwrap());
    }

    #[test]
    fn answer_strings_parse() {
        assert_eq!(CaseTrack::from_str_db("ssdi").unwrap(), CaseTrack::Ssdi);
        assert_eq!(EvidenceLevel::from_str_db("a_lot").unwrap(), EvidenceLevel::ALot);
        assert!(ClaimType::from_str_db("reopen").is_err());
        assert!(TaskStatus::from_str_db("blocked").is_err());
    }
}
