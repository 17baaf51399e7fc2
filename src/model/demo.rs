use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoStatus {
    Received,
    InReview,
    Accepted,
    Rejected,
}

impl DemoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoStatus::Received => "received",
            DemoStatus::InReview => "in_review",
            DemoStatus::Accepted => "accepted",
            DemoStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "received" => Some(DemoStatus::Received),
            "in_review" => Some(DemoStatus::InReview),
            "accepted" => Some(DemoStatus::Accepted),
            "rejected" => Some(DemoStatus::Rejected),
            _ => None,
        }
    }
}

/// An inbound demo submission, optionally tied to a roster artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demo {
    pub id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<Id>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub status: DemoStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDemo {
    pub artist_id: Option<Id>,
    pub title: String,
    pub submitted_by: Option<String>,
    pub contact_email: Option<String>,
    pub notes: Option<String>,
}

impl NewDemo {
    pub fn into_demo(self) -> Demo {
        let now = Utc::now();
        Demo {
            id: generate_id(),
            artist_id: self.artist_id,
            title: self.title,
            submitted_by: self.submitted_by,
            contact_email: self.contact_email,
            status: DemoStatus::Received,
            reviewed_by: None,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoUpdate {
    pub artist_id: Option<Id>,
    pub title: Option<String>,
    pub status: Option<DemoStatus>,
    pub reviewed_by: Option<String>,
    pub notes: Option<String>,
}

impl Demo {
    pub fn apply_update(&mut self, update: DemoUpdate) {
        if let Some(artist_id) = update.artist_id {
            self.artist_id = Some(artist_id);
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(reviewed_by) = update.reviewed_by {
            self.reviewed_by = Some(reviewed_by);
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
    fn new_demos_start_received() {
        let demo = NewDemo {
            artist_id: None,
            title: "Late Night Tapes".to_string(),
            submitted_by: Some("A. Writer".to_string()),
            contact_email: None,
            notes: None,
        }
        .into_demo();
        assert_eq!(demo.status, DemoStatus::Received);
        assert!(demo.reviewed_by.is_none());
    }

    #[test]
    fn in_review_uses_snake_case() {
        let json = serde_json::to_string(&DemoStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
        assert_eq!(DemoStatus::parse("in_review"), Some(DemoStatus::InReview));
    }
}
