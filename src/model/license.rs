use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseKind {
    Mechanical,
    Sync,
    Performance,
    Master,
}

impl LicenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseKind::Mechanical => "mechanical",
            LicenseKind::Sync => "sync",
            LicenseKind::Performance => "performance",
            LicenseKind::Master => "master",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mechanical" => Some(LicenseKind::Mechanical),
            "sync" => Some(LicenseKind::Sync),
            "performance" => Some(LicenseKind::Performance),
            "master" => Some(LicenseKind::Master),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Pending,
    Active,
    Expired,
    Revoked,
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Pending => "pending",
            LicenseStatus::Active => "active",
            LicenseStatus::Expired => "expired",
            LicenseStatus::Revoked => "revoked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(LicenseStatus::Pending),
            "active" => Some(LicenseStatus::Active),
            "expired" => Some(LicenseStatus::Expired),
            "revoked" => Some(LicenseStatus::Revoked),
            _ => None,
        }
    }
}

/// A grant of rights over a work to an outside licensee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub id: Id,
    pub licensee: String,
    pub work_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<Id>,
    pub kind: LicenseKind,
    pub status: LicenseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLicense {
    pub licensee: String,
    pub work_title: String,
    pub artist_id: Option<Id>,
    pub kind: LicenseKind,
    pub status: Option<LicenseStatus>,
    pub territory: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub fee_cents: Option<i64>,
}

impl NewLicense {
    pub fn into_license(self) -> License {
        let now = Utc::now();
        License {
            id: generate_id(),
            licensee: self.licensee,
            work_title: self.work_title,
            artist_id: self.artist_id,
            kind: self.kind,
            status: self.status.unwrap_or(LicenseStatus::Pending),
            territory: self.territory,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            fee_cents: self.fee_cents,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseUpdate {
    pub licensee: Option<String>,
    pub work_title: Option<String>,
    pub artist_id: Option<Id>,
    pub kind: Option<LicenseKind>,
    pub status: Option<LicenseStatus>,
    pub territory: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub fee_cents: Option<i64>,
}

impl License {
    pub fn apply_update(&mut self, update: LicenseUpdate) {
        if let Some(licensee) = update.licensee {
            self.licensee = licensee;
        }
        if let Some(work_title) = update.work_title {
            self.work_title = work_title;
        }
        if let Some(artist_id) = update.artist_id {
            self.artist_id = Some(artist_id);
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(territory) = update.territory {
            self.territory = Some(territory);
        }
        if let Some(starts_on) = update.starts_on {
            self.starts_on = Some(starts_on);
        }
        if let Some(ends_on) = update.ends_on {
            self.ends_on = Some(ends_on);
        }
        if let Some(fee_cents) = update.fee_cents {
            self.fee_cents = Some(fee_cents);
        }
        self.updated_at = Utc::now();
    }
}
