use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{License, LicenseStatus};

/// Aggregated view of the licensing book, served by the dashboard endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseDashboard {
    pub total: usize,
    pub by_status: HashMap<String, usize>,
    pub by_kind: HashMap<String, usize>,
    /// Active licenses whose end date falls within the requested window
    pub expiring_soon: Vec<ExpiringLicense>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringLicense {
    pub id: String,
    pub licensee: String,
    pub work_title: String,
    pub ends_on: NaiveDate,
    pub days_left: i64,
}

/// Build the dashboard from the full license list. `expiring_within_days`
/// bounds the expiry window; licenses already past their end date are counted
/// under their stored status, not re-derived here.
pub fn build_dashboard(licenses: &[License], expiring_within_days: i64) -> LicenseDashboard {
    let today = Utc::now().date_naive();
    // Saturate windows that do not fit in a NaiveDate instead of panicking
    let horizon = Duration::try_days(expiring_within_days)
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(if expiring_within_days >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        });

    let mut by_status: HashMap<String, usize> = HashMap::new();
    let mut by_kind: HashMap<String, usize> = HashMap::new();
    let mut expiring_soon = Vec::new();

    for license in licenses {
        *by_status
            .entry(license.status.as_str().to_string())
            .or_default() += 1;
        *by_kind
            .entry(license.kind.as_str().to_string())
            .or_default() += 1;

        if license.status == LicenseStatus::Active {
            if let Some(ends_on) = license.ends_on {
                if ends_on >= today && ends_on <= horizon {
                    expiring_soon.push(ExpiringLicense {
                        id: license.id.clone(),
                        licensee: license.licensee.clone(),
                        work_title: license.work_title.clone(),
                        ends_on,
                        days_left: (ends_on - today).num_days(),
                    });
                }
            }
        }
    }

    expiring_soon.sort_by(|a, b| a.ends_on.cmp(&b.ends_on).then_with(|| a.id.cmp(&b.id)));

    LicenseDashboard {
        total: licenses.len(),
        by_status,
        by_kind,
        expiring_soon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LicenseKind, NewLicense};

    fn license(status: LicenseStatus, kind: LicenseKind, ends_in_days: Option<i64>) -> License {
        let mut l = NewLicense {
            licensee: "Streamer Inc".to_string(),
            work_title: "Night Drive".to_string(),
            artist_id: None,
            kind,
            status: Some(status),
            territory: None,
            starts_on: None,
            ends_on: ends_in_days.map(|d| Utc::now().date_naive() + Duration::days(d)),
            fee_cents: None,
        }
        .into_license();
        l.id = format!("license-{}", ends_in_days.unwrap_or(-1));
        l
    }

    #[test]
    fn counts_by_status_and_kind() {
        let licenses = vec![
            license(LicenseStatus::Active, LicenseKind::Sync, None),
            license(LicenseStatus::Active, LicenseKind::Master, None),
            license(LicenseStatus::Expired, LicenseKind::Sync, None),
        ];
        let dashboard = build_dashboard(&licenses, 30);
        assert_eq!(dashboard.total, 3);
        assert_eq!(dashboard.by_status["active"], 2);
        assert_eq!(dashboard.by_status["expired"], 1);
        assert_eq!(dashboard.by_kind["sync"], 2);
    }

    #[test]
    fn expiring_window_only_includes_active_in_range() {
        let licenses = vec![
            license(LicenseStatus::Active, LicenseKind::Sync, Some(10)),
            license(LicenseStatus::Active, LicenseKind::Sync, Some(60)),
            license(LicenseStatus::Revoked, LicenseKind::Sync, Some(5)),
        ];
        let dashboard = build_dashboard(&licenses, 30);
        assert_eq!(dashboard.expiring_soon.len(), 1);
        assert_eq!(dashboard.expiring_soon[0].days_left, 10);
    }

    #[test]
    fn huge_window_saturates_instead_of_panicking() {
        let licenses = vec![license(LicenseStatus::Active, LicenseKind::Sync, Some(10))];
        let dashboard = build_dashboard(&licenses, i64::MAX);
        assert_eq!(dashboard.expiring_soon.len(), 1);

        let dashboard = build_dashboard(&licenses, i64::MIN);
        assert!(dashboard.expiring_soon.is_empty());

        let dashboard = build_dashboard(&[], i64::MAX);
        assert_eq!(dashboard.total, 0);
    }

    #[test]
    fn expiring_sorted_by_end_date() {
        let licenses = vec![
            license(LicenseStatus::Active, LicenseKind::Sync, Some(20)),
            license(LicenseStatus::Active, LicenseKind::Sync, Some(3)),
        ];
        let dashboard = build_dashboard(&licenses, 30);
        assert_eq!(dashboard.expiring_soon[0].days_left, 3);
        assert_eq!(dashboard.expiring_soon[1].days_left, 20);
    }
}
