use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Artist, Payment, PaymentStatus};

/// Per-artist royalty rollup served by `/artists/:id/royalties`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoyaltySummary {
    pub artist_id: String,
    pub total_paid_cents: i64,
    /// Pending plus processing
    pub outstanding_cents: i64,
    pub by_period: Vec<PeriodTotal>,
    pub by_status: HashMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub period: String,
    pub total_cents: i64,
    pub payment_count: usize,
}

/// A rendered royalty statement: the summary plus the individual lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoyaltyStatement {
    pub artist_id: String,
    pub artist_name: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub summary: RoyaltySummary,
    pub lines: Vec<StatementLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLine {
    pub payment_id: String,
    pub period: String,
    pub kind: String,
    pub status: String,
    pub amount_cents: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Roll up an artist's payments. All arithmetic is integer cents; currencies
/// are not converted, so mixed-currency rosters should filter beforehand.
pub fn summarize(artist_id: &str, payments: &[Payment]) -> RoyaltySummary {
    let mut total_paid_cents = 0i64;
    let mut outstanding_cents = 0i64;
    let mut by_status: HashMap<String, i64> = HashMap::new();

    for payment in payments {
        *by_status
            .entry(payment.status.as_str().to_string())
            .or_default() += payment.amount_cents;
        match payment.status {
            PaymentStatus::Paid => total_paid_cents += payment.amount_cents,
            PaymentStatus::Pending | PaymentStatus::Processing => {
                outstanding_cents += payment.amount_cents
            }
            PaymentStatus::Failed => {}
        }
    }

    let by_period = payments
        .iter()
        .map(|p| (p.period.clone(), p.amount_cents))
        .into_group_map()
        .into_iter()
        .map(|(period, amounts)| PeriodTotal {
            period,
            total_cents: amounts.iter().sum(),
            payment_count: amounts.len(),
        })
        .sorted_by(|a, b| a.period.cmp(&b.period))
        .collect();

    RoyaltySummary {
        artist_id: artist_id.to_string(),
        total_paid_cents,
        outstanding_cents,
        by_period,
        by_status,
    }
}

/// Assemble a statement for the artist from their payment history
pub fn build_statement(artist: &Artist, payments: &[Payment]) -> RoyaltyStatement {
    let summary = summarize(&artist.id, payments);
    let lines = payments
        .iter()
        .sorted_by(|a, b| a.period.cmp(&b.period).then_with(|| a.id.cmp(&b.id)))
        .map(|p| StatementLine {
            payment_id: p.id.clone(),
            period: p.period.clone(),
            kind: p.kind.as_str().to_string(),
            status: p.status.as_str().to_string(),
            amount_cents: p.amount_cents,
            currency: p.currency.clone(),
            memo: p.memo.clone(),
        })
        .collect();

    RoyaltyStatement {
        artist_id: artist.id.clone(),
        artist_name: artist.name.clone(),
        generated_at: chrono::Utc::now(),
        summary,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewPayment, PaymentKind};

    fn payment(period: &str, cents: i64, status: PaymentStatus) -> Payment {
        let mut p = NewPayment {
            artist_id: "artist-1".to_string(),
            amount_cents: cents,
            currency: "USD".to_string(),
            period: period.to_string(),
            kind: PaymentKind::Royalty,
            memo: None,
        }
        .into_payment();
        p.status = status;
        p
    }

    #[test]
    fn paid_and_outstanding_split() {
        let payments = vec![
            payment("2026-01", 10_000, PaymentStatus::Paid),
            payment("2026-02", 5_000, PaymentStatus::Pending),
            payment("2026-02", 2_500, PaymentStatus::Processing),
            payment("2026-03", 9_999, PaymentStatus::Failed),
        ];
        let summary = summarize("artist-1", &payments);
        assert_eq!(summary.total_paid_cents, 10_000);
        assert_eq!(summary.outstanding_cents, 7_500);
        assert_eq!(summary.by_status["failed"], 9_999);
    }

    #[test]
    fn periods_are_grouped_and_sorted() {
        let payments = vec![
            payment("2026-02", 100, PaymentStatus::Paid),
            payment("2026-01", 200, PaymentStatus::Paid),
            payment("2026-02", 300, PaymentStatus::Pending),
        ];
        let summary = summarize("artist-1", &payments);
        assert_eq!(
            summary.by_period,
            vec![
                PeriodTotal {
                    period: "2026-01".to_string(),
                    total_cents: 200,
                    payment_count: 1
                },
                PeriodTotal {
                    period: "2026-02".to_string(),
                    total_cents: 400,
                    payment_count: 2
                },
            ]
        );
    }

    #[test]
    fn statement_lines_follow_period_order() {
        let artist = crate::model::NewArtist {
            name: "Vega Nova".to_string(),
            sort_name: None,
            ipi_number: None,
            email: None,
            status: None,
            notes: None,
        }
        .into_artist();
        let payments = vec![
            payment("2026-03", 100, PaymentStatus::Paid),
            payment("2026-01", 200, PaymentStatus::Paid),
        ];
        let statement = build_statement(&artist, &payments);
        assert_eq!(statement.lines.len(), 2);
        assert_eq!(statement.lines[0].period, "2026-01");
        assert_eq!(statement.artist_name, "Vega Nova");
    }

    #[test]
    fn empty_history_is_all_zero() {
        let summary = summarize("artist-1", &[]);
        assert_eq!(summary.total_paid_cents, 0);
        assert_eq!(summary.outstanding_cents, 0);
        assert!(summary.by_period.is_empty());
    }
}
