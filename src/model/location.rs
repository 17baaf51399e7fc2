use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Office,
    Warehouse,
    Studio,
    Venue,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Office => "office",
            LocationKind::Warehouse => "warehouse",
            LocationKind::Studio => "studio",
            LocationKind::Venue => "venue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "office" => Some(LocationKind::Office),
            "warehouse" => Some(LocationKind::Warehouse),
            "studio" => Some(LocationKind::Studio),
            "venue" => Some(LocationKind::Venue),
            _ => None,
        }
    }
}

/// A physical or legal party location, carrying its GLN once assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gln: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub kind: LocationKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub gln: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub kind: LocationKind,
}

impl NewLocation {
    pub fn into_location(self) -> Location {
        let now = Utc::now();
        Location {
            id: generate_id(),
            name: self.name,
            gln: self.gln,
            address: self.address,
            city: self.city,
            country: self.country,
            kind: self.kind,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub gln: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub kind: Option<LocationKind>,
}

impl Location {
    pub fn apply_update(&mut self, update: LocationUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(gln) = update.gln {
            self.gln = Some(gln);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(city) = update.city {
            self.city = Some(city);
        }
        if let Some(country) = update.country {
            self.country = Some(country);
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        self.updated_at = Utc::now();
    }
}
