use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    Recording,
    Publishing,
    Distribution,
    Sync,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Recording => "recording",
            ContractKind::Publishing => "publishing",
            ContractKind::Distribution => "distribution",
            ContractKind::Sync => "sync",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "recording" => Some(ContractKind::Recording),
            "publishing" => Some(ContractKind::Publishing),
            "distribution" => Some(ContractKind::Distribution),
            "sync" => Some(ContractKind::Sync),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Draft,
    Active,
    Expired,
    Terminated,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Active => "active",
            ContractStatus::Expired => "expired",
            ContractStatus::Terminated => "terminated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ContractStatus::Draft),
            "active" => Some(ContractStatus::Active),
            "expired" => Some(ContractStatus::Expired),
            "terminated" => Some(ContractStatus::Terminated),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Id,
    pub artist_id: Id,
    pub title: String,
    pub kind: ContractKind,
    pub status: ContractStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    /// Royalty rate in basis points (250 = 2.5%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub royalty_rate_bps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContract {
    pub artist_id: Id,
    pub title: String,
    pub kind: ContractKind,
    pub status: Option<ContractStatus>,
    pub effective_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub royalty_rate_bps: Option<i32>,
    pub terms: Option<String>,
}

impl NewContract {
    pub fn into_contract(self) -> Contract {
        let now = Utc::now();
        Contract {
            id: generate_id(),
            artist_id: self.artist_id,
            title: self.title,
            kind: self.kind,
            status: self.status.unwrap_or(ContractStatus::Draft),
            effective_date: self.effective_date,
            expiry_date: self.expiry_date,
            royalty_rate_bps: self.royalty_rate_bps,
            terms: self.terms,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractUpdate {
    pub title: Option<String>,
    pub kind: Option<ContractKind>,
    pub status: Option<ContractStatus>,
    pub effective_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub royalty_rate_bps: Option<i32>,
    pub terms: Option<String>,
}

impl Contract {
    pub fn apply_update(&mut self, update: ContractUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(effective_date) = update.effective_date {
            self.effective_date = Some(effective_date);
        }
        if let Some(expiry_date) = update.expiry_date {
            self.expiry_date = Some(expiry_date);
        }
        if let Some(rate) = update.royalty_rate_bps {
            self.royalty_rate_bps = Some(rate);
        }
        if let Some(terms) = update.terms {
            self.terms = Some(terms);
        }
        self.updated_at = Utc::now();
    }
}
