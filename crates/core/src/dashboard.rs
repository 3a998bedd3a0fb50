//! Stat-card aggregation for the admin dashboard.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::lead::{LeadKind, LeadStatus};

/// Counts for one lead kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindStats {
    pub kind: LeadKind,
    pub slug: &'static str,
    pub total: i64,
    /// Every status is present, zero when no lead has it.
    pub by_status: BTreeMap<&'static str, i64>,
}

/// Fold `(kind, status, count)` rows into one entry per kind, in tab order.
///
/// Rows with an unknown kind or status are ignored.
pub fn summarize_leads(rows: &[(String, String, i64)]) -> Vec<KindStats> {
    LeadKind::ALL
        .into_iter()
        .map(|kind| {
            let mut by_status: BTreeMap<&'static str, i64> =
                LeadStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
            for (row_kind, row_status, count) in rows {
                if row_kind != kind.as_str() {
                    continue;
                }
                if let Ok(status) = LeadStatus::from_str_db(row_status) {
                    *by_status.entry(status.as_str()).or_default() += count;
                }
            }
            KindStats {
                kind,
                slug: kind.slug(),
                total: by_status.values().sum(),
                by_status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_and_status_is_reported() {
        let rows = vec![
            ("help_request".to_string(), "new".to_string(), 3),
            ("help_request".to_string(), "closed".to_string(), 2),
            ("investor_submission".to_string(), "contacted".to_string(), 1),
            ("mystery".to_string(), "new".to_string(), 9),
        ];
        let stats = summarize_leads(&rows);
        assert_eq!(stats.len(), 6);

        let help = stats.iter().find(|s| s.kind == LeadKind::HelpRequest).unwrap();
        assert_eq!(help.total, 5);
        assert_eq!(help.by_status["new"], 3);
        assert_eq!(help.by_status["in_progress"], 0);

        let general = stats.iter().find(|s| s.kind == LeadKind::GeneralContact).unwrap();
        assert_eq!(general.total, 0);
        assert_eq!(general.by_status.len(), 4);
    }
}
