//! Vendor entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{invalid, ModelError};
use crate::value_objects::{Contact, MediaReference, Rating};
use crate::{new_id, supplied_id, DEFAULT_STATUS};

/// Collection name in the document store.
pub const COLLECTION: &str = "vendors";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub rating: Rating,
    pub status: String,
    #[serde(default)]
    pub is_verified: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<MediaReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaReference>,
    #[serde(default)]
    pub legal_name: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub payment_terms: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVendor {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_deleted: Option<bool>,
    #[serde(default)]
    pub logo: Option<MediaReference>,
    #[serde(default)]
    pub cover_image: Option<MediaReference>,
    #[serde(default)]
    pub legal_name: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub payment_terms: String,
}

impl NewVendor {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(invalid("name is required"));
        }
        if let Some(contact) = &self.contact {
            contact.validate()?;
        }
        if let Some(rating) = &self.rating {
            validate_rating(rating)?;
        }
        Ok(())
    }

    pub fn into_vendor(self, now: DateTime<Utc>) -> Vendor {
        Vendor {
            id: supplied_id(self.id).unwrap_or_else(new_id),
            name: self.name,
            contact: self.contact,
            rating: self.rating.unwrap_or_default(),
            status: self
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            is_verified: self.is_verified.unwrap_or(false),
            is_deleted: self.is_deleted.unwrap_or(false),
            created_at: now,
            updated_at: now,
            logo: self.logo,
            cover_image: self.cover_image,
            legal_name: self.legal_name,
            business_type: self.business_type,
            tax_id: self.tax_id,
            payment_terms: self.payment_terms,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVendor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<MediaReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
}

impl UpdateVendor {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(invalid("name must not be empty"));
            }
        }
        if let Some(status) = &self.status {
            if status.trim().is_empty() {
                return Err(invalid("status must not be empty"));
            }
        }
        if let Some(contact) = &self.contact {
            contact.validate()?;
        }
        if let Some(rating) = &self.rating {
            validate_rating(rating)?;
        }
        Ok(())
    }
}

fn validate_rating(rating: &Rating) -> Result<(), ModelError> {
    if !rating.average.is_finite() || !(0.0..=5.0).contains(&rating.average) {
        return Err(invalid("rating.average must be between 0 and 5"));
    }
    Ok(())
}
