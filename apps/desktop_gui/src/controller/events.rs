//! Actions collected while drawing a frame, and the status banner they produce.

use shared::{
    domain::{LessonId, SortField, SortOrder},
    error::CartError,
};

/// Everything the panels can ask for. Panels only read the store while
/// drawing; these are applied after the frame is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetSearch(String),
    SetSortBy(SortField),
    SetSortOrder(SortOrder),
    AddToCart(LessonId),
    IncreaseQuantity(usize),
    DecreaseQuantity(usize),
    RemoveFromCart(usize),
    SetName(String),
    SetPhone(String),
    Checkout,
    ShowCart,
    GoHome,
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::SetSearch(_) => "set_search",
            UiAction::SetSortBy(_) => "set_sort_by",
            UiAction::SetSortOrder(_) => "set_sort_order",
            UiAction::AddToCart(_) => "add_to_cart",
            UiAction::IncreaseQuantity(_) => "increase_quantity",
            UiAction::DecreaseQuantity(_) => "decrease_quantity",
            UiAction::RemoveFromCart(_) => "remove_from_cart",
            UiAction::SetName(_) => "set_name",
            UiAction::SetPhone(_) => "set_phone",
            UiAction::Checkout => "checkout",
            UiAction::ShowCart => "show_cart",
            UiAction::GoHome => "go_home",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: StatusSeverity,
    pub message: String,
}

impl StatusBanner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: StatusSeverity::Warning,
            message: message.into(),
        }
    }
}

pub fn describe_cart_error(err: &CartError) -> String {
    match err {
        CartError::SoldOut { .. } => "No spaces left for that lesson.".to_string(),
        CartError::UnknownLesson { .. } => "That lesson is no longer available.".to_string(),
        CartError::LineOutOfRange { .. } => "That cart line no longer exists.".to_string(),
    }
}
