//! Value objects embedded in services and vendors. They have no identity of
//! their own and are replaced wholesale on update.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{invalid, ModelError};
use crate::fields::{FieldMap, FieldValue, LocalizedText};

pub const DEFAULT_CURRENCY: &str = "INR";

pub(crate) fn default_currency() -> String { DEFAULT_CURRENCY.to_string() }

fn default_true() -> bool { true }

/// Quantity-based price break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub min_quantity: u32,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAttribute {
    pub name: String,
    pub value: FieldValue,
    #[serde(default)]
    pub localized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaReference {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<LocalizedText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub average: f64,
    pub count: u64,
    /// Star value (`"1"`..`"5"`) to number of ratings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub rule_type: String,
    #[serde(default)]
    pub conditions: FieldMap,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    #[serde(default)]
    pub conditions: FieldMap,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
}

pub fn validate_price(field: &str, price: f64) -> Result<(), ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(invalid(format!("{field} must be a non-negative number")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(invalid("contact.email must be a valid email address"));
    }
    Ok(())
}

fn validate_window(
    field: &str,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<(), ModelError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(invalid(format!("{field}.valid_from must not be after valid_to")));
        }
    }
    Ok(())
}

impl PricingTier {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_price("pricing_tiers.price", self.price)
    }
}

impl PricingRule {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.rule_type.trim().is_empty() {
            return Err(invalid("pricing_rules.rule_type is required"));
        }
        validate_price("pricing_rules.price", self.price)?;
        validate_window("pricing_rules", self.valid_from, self.valid_to)
    }
}

impl AvailabilityRule {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_window("availability_rules", self.valid_from, self.valid_to)
    }
}

impl Contact {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_email(&self.email)
    }
}
