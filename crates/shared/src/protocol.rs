use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CartLine, Lesson, SortField, SortOrder};

pub const NAME_ERROR_MESSAGE: &str = "Name must contain letters only.";
pub const PHONE_ERROR_MESSAGE: &str = "Phone number must contain 8–15 digits.";

/// Field-level checkout validation messages. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }

    /// Message text as shown next to the name input; empty when valid.
    pub fn name_message(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn phone_message(&self) -> &str {
        self.phone.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub item_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub search_term: String,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub lessons: Vec<Lesson>,
}

/// Record of a committed order. Reserved spaces stay booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub name: String,
    pub phone: String,
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub item_count: u32,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Confirmed(OrderConfirmation),
    Rejected(FormErrors),
}

impl CheckoutOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, CheckoutOutcome::Confirmed(_))
    }
}
