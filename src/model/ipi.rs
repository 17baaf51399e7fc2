use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpiRole {
    Composer,
    Author,
    Publisher,
    Performer,
}

impl IpiRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpiRole::Composer => "composer",
            IpiRole::Author => "author",
            IpiRole::Publisher => "publisher",
            IpiRole::Performer => "performer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "composer" => Some(IpiRole::Composer),
            "author" => Some(IpiRole::Author),
            "publisher" => Some(IpiRole::Publisher),
            "performer" => Some(IpiRole::Performer),
            _ => None,
        }
    }
}

/// Interested Parties Information record for a rights holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpiRecord {
    pub id: Id,
    pub party_name: String,
    /// 9 to 11 digit IPI name number
    pub ipi_number: String,
    pub role: IpiRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<Id>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIpiRecord {
    pub party_name: String,
    pub ipi_number: String,
    pub role: IpiRole,
    pub artist_id: Option<Id>,
}

impl NewIpiRecord {
    pub fn into_record(self) -> IpiRecord {
        let now = Utc::now();
        IpiRecord {
            id: generate_id(),
            party_name: self.party_name,
            ipi_number: self.ipi_number,
            role: self.role,
            artist_id: self.artist_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpiRecordUpdate {
    pub party_name: Option<String>,
    pub ipi_number: Option<String>,
    pub role: Option<IpiRole>,
    pub artist_id: Option<Id>,
}

impl IpiRecord {
    pub fn apply_update(&mut self, update: IpiRecordUpdate) {
        if let Some(party_name) = update.party_name {
            self.party_name = party_name;
        }
        if let Some(ipi_number) = update.ipi_number {
            self.ipi_number = ipi_number;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(artist_id) = update.artist_id {
            self.artist_id = Some(artist_id);
        }
        self.updated_at = Utc::now();
    }
}
