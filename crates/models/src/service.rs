//! Service entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{invalid, ModelError};
use crate::fields::{ExternalRefs, FieldMap, LocalizedText};
use crate::value_objects::{
    default_currency, validate_price, AvailabilityRule, MediaReference, PricingRule, PricingTier,
    ServiceAttribute,
};
use crate::{new_id, supplied_id, DEFAULT_STATUS};

/// Collection name in the document store.
pub const COLLECTION: &str = "services";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Atomic,
    Composite,
    Package,
}

/// A catalog service as persisted and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub category: String,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub parent_service_ids: Vec<String>,
    #[serde(default)]
    pub related_service_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub vendor_id: String,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    pub pricing_rules: Vec<PricingRule>,
    #[serde(default)]
    pub availability_rules: Vec<AvailabilityRule>,
    #[serde(default)]
    pub attributes: Vec<ServiceAttribute>,
    #[serde(default)]
    pub images: Vec<MediaReference>,
    #[serde(default)]
    pub videos: Vec<MediaReference>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: FieldMap,
    #[serde(default)]
    pub external_refs: ExternalRefs,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate record for creation. System-managed fields are optional here and
/// filled in by [`NewService::into_service`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewService {
    #[serde(default)]
    pub id: Option<String>,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub category: String,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub parent_service_ids: Vec<String>,
    #[serde(default)]
    pub related_service_ids: Vec<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub vendor_id: String,
    #[serde(default)]
    pub pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    pub pricing_rules: Vec<PricingRule>,
    #[serde(default)]
    pub availability_rules: Vec<AvailabilityRule>,
    #[serde(default)]
    pub attributes: Vec<ServiceAttribute>,
    #[serde(default)]
    pub images: Vec<MediaReference>,
    #[serde(default)]
    pub videos: Vec<MediaReference>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: FieldMap,
    #[serde(default)]
    pub external_refs: ExternalRefs,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_deleted: Option<bool>,
}

impl NewService {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_required("category", &self.category)?;
        validate_required("vendor_id", &self.vendor_id)?;
        if let Some(price) = self.base_price {
            validate_price("base_price", price)?;
        }
        validate_nested(&self.pricing_tiers, &self.pricing_rules, &self.availability_rules)
    }

    /// Build the persisted record: the id is generated when absent, both
    /// timestamps are set to `now`, `status` defaults to active and
    /// `is_deleted` to false.
    pub fn into_service(self, now: DateTime<Utc>) -> Service {
        Service {
            id: supplied_id(self.id).unwrap_or_else(new_id),
            name: self.name,
            description: self.description,
            category: self.category,
            service_type: self.service_type,
            parent_service_ids: self.parent_service_ids,
            related_service_ids: self.related_service_ids,
            base_price: self.base_price,
            currency: self.currency,
            vendor_id: self.vendor_id,
            pricing_tiers: self.pricing_tiers,
            pricing_rules: self.pricing_rules,
            availability_rules: self.availability_rules,
            attributes: self.attributes,
            images: self.images,
            videos: self.videos,
            tags: self.tags,
            metadata: self.metadata,
            external_refs: self.external_refs,
            status: self
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            is_deleted: self.is_deleted.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Only fields present in the request are written; identity,
/// `created_at` and `is_deleted` cannot be changed through this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_service_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_service_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_tiers: Option<Vec<PricingTier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_rules: Option<Vec<PricingRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_rules: Option<Vec<AvailabilityRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<ServiceAttribute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<MediaReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<MediaReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_refs: Option<ExternalRefs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateService {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(category) = &self.category {
            validate_required("category", category)?;
        }
        if let Some(vendor_id) = &self.vendor_id {
            validate_required("vendor_id", vendor_id)?;
        }
        if let Some(status) = &self.status {
            validate_required("status", status)?;
        }
        if let Some(price) = self.base_price {
            validate_price("base_price", price)?;
        }
        validate_nested(
            self.pricing_tiers.as_deref().unwrap_or_default(),
            self.pricing_rules.as_deref().unwrap_or_default(),
            self.availability_rules.as_deref().unwrap_or_default(),
        )
    }
}

fn validate_name(name: &LocalizedText) -> Result<(), ModelError> {
    if name.values().all(|v| v.trim().is_empty()) {
        return Err(invalid("name needs at least one non-empty translation"));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    Ok(())
}

fn validate_nested(
    tiers: &[PricingTier],
    rules: &[PricingRule],
    availability: &[AvailabilityRule],
) -> Result<(), ModelError> {
    tiers.iter().try_for_each(PricingTier::validate)?;
    rules.iter().try_for_each(PricingRule::validate)?;
    availability.iter().try_for_each(AvailabilityRule::validate)
}
