use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerKind {
    Distributor,
    CollectionSociety,
    Retailer,
    Ddex,
}

impl PartnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerKind::Distributor => "distributor",
            PartnerKind::CollectionSociety => "collection_society",
            PartnerKind::Retailer => "retailer",
            PartnerKind::Ddex => "ddex",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "distributor" => Some(PartnerKind::Distributor),
            "collection_society" => Some(PartnerKind::CollectionSociety),
            "retailer" => Some(PartnerKind::Retailer),
            "ddex" => Some(PartnerKind::Ddex),
            _ => None,
        }
    }
}

/// An industry partner the company exchanges data with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: Id,
    pub name: String,
    pub kind: PartnerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPartner {
    pub name: String,
    pub kind: PartnerKind,
    pub contact_email: Option<String>,
    pub feed_url: Option<String>,
    pub active: Option<bool>,
}

impl NewPartner {
    pub fn into_partner(self) -> Partner {
        let now = Utc::now();
        Partner {
            id: generate_id(),
            name: self.name,
            kind: self.kind,
            contact_email: self.contact_email,
            feed_url: self.feed_url,
            active: self.active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerUpdate {
    pub name: Option<String>,
    pub kind: Option<PartnerKind>,
    pub contact_email: Option<String>,
    pub feed_url: Option<String>,
    pub active: Option<bool>,
}

impl Partner {
    pub fn apply_update(&mut self, update: PartnerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(contact_email) = update.contact_email {
            self.contact_email = Some(contact_email);
        }
        if let Some(feed_url) = update.feed_url {
            self.feed_url = Some(feed_url);
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }
}
