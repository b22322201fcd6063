//! Contact-detail validation, the order form, and the delayed post-checkout clear.

use std::{
    sync::LazyLock,
    time::{Duration, Instant},
};

use regex::Regex;
use shared::protocol::{FormErrors, NAME_ERROR_MESSAGE, PHONE_ERROR_MESSAGE};

pub const NAME_PATTERN: &str = r"^[A-Za-z ]+$";
pub const PHONE_PATTERN: &str = r"^[0-9]{8,15}$";

/// Delay between a confirmed order and the cart/form clear.
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_millis(1500);

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn is_form_valid(name: &str, phone: &str) -> bool {
    is_valid_name(name) && is_valid_phone(phone)
}

fn name_error(name: &str) -> Option<String> {
    (!is_valid_name(name)).then(|| NAME_ERROR_MESSAGE.to_string())
}

fn phone_error(phone: &str) -> Option<String> {
    (!is_valid_phone(phone)).then(|| PHONE_ERROR_MESSAGE.to_string())
}

pub fn validate_checkout_form(name: &str, phone: &str) -> FormErrors {
    FormErrors {
        name: name_error(name),
        phone: phone_error(phone),
    }
}

/// Contact fields plus the messages and confirmation flag rendered around them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    name: String,
    phone: String,
    errors: FormErrors,
    order_confirmed: bool,
}

impl OrderForm {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn order_confirmed(&self) -> bool {
        self.order_confirmed
    }

    pub fn is_valid(&self) -> bool {
        is_form_valid(&self.name, &self.phone)
    }

    /// Stores the value. A name error already on screen is re-checked so it
    /// disappears as soon as the input becomes valid.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if self.errors.name.is_some() {
            self.errors.name = name_error(&self.name);
        }
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
        if self.errors.phone.is_some() {
            self.errors.phone = phone_error(&self.phone);
        }
    }

    /// Replaces both error messages with a fresh validation of the current fields.
    pub(crate) fn validate(&mut self) -> &FormErrors {
        self.errors = validate_checkout_form(&self.name, &self.phone);
        &self.errors
    }

    pub(crate) fn confirm(&mut self) {
        self.order_confirmed = true;
    }

    pub(crate) fn unconfirm(&mut self) {
        self.order_confirmed = false;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One pending clear at most. Scheduling again replaces the deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearSchedule {
    deadline: Option<Instant>,
}

impl ClearSchedule {
    /// Returns true when an earlier pending clear was superseded.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> bool {
        self.deadline.replace(now + delay).is_some()
    }

    /// Returns true when a pending clear was dropped.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consumes the pending clear if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
