use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductFormat {
    Album,
    Single,
    Ep,
    Video,
    Merch,
}

impl ProductFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductFormat::Album => "album",
            ProductFormat::Single => "single",
            ProductFormat::Ep => "ep",
            ProductFormat::Video => "video",
            ProductFormat::Merch => "merch",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "album" => Some(ProductFormat::Album),
            "single" => Some(ProductFormat::Single),
            "ep" => Some(ProductFormat::Ep),
            "video" => Some(ProductFormat::Video),
            "merch" => Some(ProductFormat::Merch),
            _ => None,
        }
    }
}

/// Where the product stands with the GS1 identifier registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Unregistered,
    Submitted,
    Registered,
    Failed,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Unregistered => "unregistered",
            RegistrationStatus::Submitted => "submitted",
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unregistered" => Some(RegistrationStatus::Unregistered),
            "submitted" => Some(RegistrationStatus::Submitted),
            "registered" => Some(RegistrationStatus::Registered),
            "failed" => Some(RegistrationStatus::Failed),
            _ => None,
        }
    }
}

/// A trade item in the catalog, carrying its GTIN once assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<Id>,
    pub format: ProductFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_name: Option<String>,
    pub registration: RegistrationStatus,
    /// Reference returned by the identifier registry on successful submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub artist_id: Option<Id>,
    pub format: ProductFormat,
    pub gtin: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub label_name: Option<String>,
}

impl NewProduct {
    pub fn into_product(self) -> Product {
        let now = Utc::now();
        Product {
            id: generate_id(),
            title: self.title,
            artist_id: self.artist_id,
            format: self.format,
            gtin: self.gtin,
            release_date: self.release_date,
            label_name: self.label_name,
            registration: RegistrationStatus::Unregistered,
            registry_ref: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub artist_id: Option<Id>,
    pub format: Option<ProductFormat>,
    pub gtin: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub label_name: Option<String>,
}

impl Product {
    pub fn apply_update(&mut self, update: ProductUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(artist_id) = update.artist_id {
            self.artist_id = Some(artist_id);
        }
        if let Some(format) = update.format {
            self.format = format;
        }
        if let Some(gtin) = update.gtin {
            // A changed GTIN invalidates any previous registration
            if self.gtin.as_deref() != Some(gtin.as_str()) {
                self.registration = RegistrationStatus::Unregistered;
                self.registry_ref = None;
            }
            self.gtin = Some(gtin);
        }
        if let Some(release_date) = update.release_date {
            self.release_date = Some(release_date);
        }
        if let Some(label_name) = update.label_name {
            self.label_name = Some(label_name);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_gtin_resets_registration() {
        let mut product = NewProduct {
            title: "Midnight Sessions".to_string(),
            artist_id: None,
            format: ProductFormat::Album,
            gtin: Some("036000291452".to_string()),
            release_date: None,
            label_name: None,
        }
        .into_product();
        product.registration = RegistrationStatus::Registered;
        product.registry_ref = Some("reg-1".to_string());

        product.apply_update(ProductUpdate {
            gtin: Some("614141000036".to_string()),
            ..Default::default()
        });

        assert_eq!(product.registration, RegistrationStatus::Unregistered);
        assert!(product.registry_ref.is_none());
    }

    #[test]
    fn same_gtin_keeps_registration() {
        let mut product = NewProduct {
            title: "Midnight Sessions".to_string(),
            artist_id: None,
            format: ProductFormat::Album,
            gtin: Some("036000291452".to_string()),
            release_date: None,
            label_name: None,
        }
        .into_product();
        product.registration = RegistrationStatus::Registered;

        product.apply_update(ProductUpdate {
            gtin: Some("036000291452".to_string()),
            title: Some("Midnight Sessions (Deluxe)".to_string()),
            ..Default::default()
        });

        assert_eq!(product.registration, RegistrationStatus::Registered);
    }
}
