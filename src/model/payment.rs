use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Royalty,
    Advance,
    Reimbursement,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Royalty => "royalty",
            PaymentKind::Advance => "advance",
            PaymentKind::Reimbursement => "reimbursement",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "royalty" => Some(PaymentKind::Royalty),
            "advance" => Some(PaymentKind::Advance),
            "reimbursement" => Some(PaymentKind::Reimbursement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "processing" => Some(PaymentStatus::Processing),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// A single payable line to an artist for an accounting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Id,
    pub artist_id: Id,
    pub amount_cents: i64,
    /// ISO-4217 code, e.g. "USD"
    pub currency: String,
    /// Accounting period, "YYYY-MM"
    pub period: String,
    pub kind: PaymentKind,
    pub status: PaymentStatus,
    /// Reference assigned by the payment processor on submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub artist_id: Id,
    pub amount_cents: i64,
    pub currency: String,
    pub period: String,
    pub kind: PaymentKind,
    pub memo: Option<String>,
}

impl NewPayment {
    pub fn into_payment(self) -> Payment {
        let now = Utc::now();
        Payment {
            id: generate_id(),
            artist_id: self.artist_id,
            amount_cents: self.amount_cents,
            currency: self.currency,
            period: self.period,
            kind: self.kind,
            status: PaymentStatus::Pending,
            processor_ref: None,
            memo: self.memo,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
    pub period: Option<String>,
    pub kind: Option<PaymentKind>,
    pub status: Option<PaymentStatus>,
    pub memo: Option<String>,
}

impl Payment {
    pub fn apply_update(&mut self, update: PaymentUpdate) {
        if let Some(amount_cents) = update.amount_cents {
            self.amount_cents = amount_cents;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(period) = update.period {
            self.period = period;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(memo) = update.memo {
            self.memo = Some(memo);
        }
        self.updated_at = Utc::now();
    }
}
