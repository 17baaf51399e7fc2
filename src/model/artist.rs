use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtistStatus {
    Active,
    Inactive,
    Pending,
}

impl ArtistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistStatus::Active => "active",
            ArtistStatus::Inactive => "inactive",
            ArtistStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ArtistStatus::Active),
            "inactive" => Some(ArtistStatus::Inactive),
            "pending" => Some(ArtistStatus::Pending),
            _ => None,
        }
    }
}

/// A roster member: performing artist, band or producer signed to the label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_name: Option<String>,
    /// Interested Parties Information number, when the artist has one assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipi_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: ArtistStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub sort_name: Option<String>,
    pub ipi_number: Option<String>,
    pub email: Option<String>,
    pub status: Option<ArtistStatus>,
    pub notes: Option<String>,
}

impl NewArtist {
    pub fn into_artist(self) -> Artist {
        let now = Utc::now();
        Artist {
            id: generate_id(),
            name: self.name,
            sort_name: self.sort_name,
            ipi_number: self.ipi_number,
            email: self.email,
            status: self.status.unwrap_or(ArtistStatus::Pending),
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for PATCH; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistUpdate {
    pub name: Option<String>,
    pub sort_name: Option<String>,
    pub ipi_number: Option<String>,
    pub email: Option<String>,
    pub status: Option<ArtistStatus>,
    pub notes: Option<String>,
}

impl Artist {
    pub fn apply_update(&mut self, update: ArtistUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(sort_name) = update.sort_name {
            self.sort_name = Some(sort_name);
        }
        if let Some(ipi_number) = update.ipi_number {
            self.ipi_number = Some(ipi_number);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_artist_defaults_to_pending() {
        let artist = NewArtist {
            name: "Vega Nova".to_string(),
            sort_name: None,
            ipi_number: None,
            email: None,
            status: None,
            notes: None,
        }
        .into_artist();
        assert_eq!(artist.status, ArtistStatus::Pending);
        assert!(!artist.id.is_empty());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ArtistStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }

    #[test]
    fn update_leaves_absent_fields_alone() {
        let mut artist = NewArtist {
            name: "Vega Nova".to_string(),
            sort_name: Some("Nova, Vega".to_string()),
            ipi_number: None,
            email: None,
            status: Some(ArtistStatus::Active),
            notes: None,
        }
        .into_artist();

        artist.apply_update(ArtistUpdate {
            email: Some("vega@example.com".to_string()),
            ..Default::default()
        });

        assert_eq!(artist.name, "Vega Nova");
        assert_eq!(artist.sort_name.as_deref(), Some("Nova, Vega"));
        assert_eq!(artist.email.as_deref(), Some("vega@example.com"));
        assert_eq!(artist.status, ArtistStatus::Active);
    }
}
