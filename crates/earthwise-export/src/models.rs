//! Back-office records as stored by the catalog API.
//!
//! Field names follow the API's camelCase JSON. Only what the exports
//! read is modelled; unknown fields are ignored on input.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record that can be exported and filtered.
pub trait ExportRecord: Serialize {
    /// Creation timestamp, used by date-range filters.
    fn created_at(&self) -> DateTime<Utc>;

    /// Value of `key` as seen by export filters.
    ///
    /// Defaults to the record's serialized field of that name.
    fn filter_field(&self, key: &str) -> Option<Value> {
        serialized_field(self, key)
    }
}

fn serialized_field<T: Serialize + ?Sized>(record: &T, key: &str) -> Option<Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(mut fields)) => fields.remove(key),
        _ => None,
    }
}

fn active_label(is_active: bool) -> &'static str {
    if is_active {
        "active"
    } else {
        "inactive"
    }
}

const fn default_true() -> bool {
    true
}

/// Why a visitor got in touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    #[default]
    General,
    ProductInquiry,
    QuoteRequest,
    Support,
    Partnership,
}

impl ContactType {
    /// Returns the stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::ProductInquiry => "product_inquiry",
            Self::QuoteRequest => "quote_request",
            Self::Support => "support",
            Self::Partnership => "partnership",
        }
    }
}

/// Handling state of a contact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

impl ContactStatus {
    /// Returns the stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

/// Urgency of a contact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Returns the stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_as_str!(ContactType, ContactStatus, Priority);

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub contact_type: ContactType,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExportRecord for Contact {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn filter_field(&self, key: &str) -> Option<Value> {
        match key {
            "category" => Some(Value::from(self.contact_type.as_str())),
            _ => serialized_field(self, key),
        }
    }
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub category: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// `active` or `inactive`.
    pub fn status(&self) -> &'static str {
        active_label(self.is_active)
    }

    /// Sum of variant stock; variants without a stock count add nothing.
    pub fn total_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock.unwrap_or(0)).sum()
    }

    /// Lowest and highest variant price.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.variants.iter().map(|v| v.price).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }
}

impl ExportRecord for Product {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn filter_field(&self, key: &str) -> Option<Value> {
        match key {
            "status" => Some(Value::from(self.status())),
            _ => serialized_field(self, key),
        }
    }
}

/// Votes on whether an FAQ answer helped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Helpful {
    #[serde(default)]
    pub yes: u64,
    #[serde(default)]
    pub no: u64,
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    pub answer: String,
    #[serde(default = "default_faq_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub helpful: Helpful,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_faq_category() -> String {
    "General".to_string()
}

impl Faq {
    /// `active` or `inactive`.
    pub fn status(&self) -> &'static str {
        active_label(self.is_active)
    }
}

impl ExportRecord for Faq {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn filter_field(&self, key: &str) -> Option<Value> {
        match key {
            "status" => Some(Value::from(self.status())),
            _ => serialized_field(self, key),
        }
    }
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsOverview {
    pub total_products: u64,
    pub total_contacts: u64,
    #[serde(rename = "totalFAQs")]
    pub total_faqs: u64,
    pub monthly_queries: u64,
    pub conversion_rate: Option<f64>,
    pub products_change: Option<String>,
    pub contacts_change: Option<String>,
    #[serde(rename = "faqsChange")]
    pub faqs_change: Option<String>,
    pub queries_change: Option<String>,
    pub conversion_change: Option<String>,
}
