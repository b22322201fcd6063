use std::time::{Duration, Instant};

use chrono::Utc;
use shared::{
    domain::{CartLine, Lesson, LessonId, SortField, SortOrder, StoreView},
    error::CartError,
    protocol::{CartSnapshot, CatalogView, CheckoutOutcome, OrderConfirmation},
};
use tracing::{debug, info};

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod display;
pub mod search;

pub use cart::Cart;
pub use catalog::{Catalog, CatalogLoadError};
pub use checkout::{ClearSchedule, OrderForm};
pub use config::Settings;

/// Owns the catalog, the cart and the order form. Its methods are the only way
/// to change any of them; display surfaces read the derived views and call
/// these operations in response to user input.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    form: OrderForm,
    search_term: String,
    sort_by: SortField,
    sort_order: SortOrder,
    view: StoreView,
    clear_schedule: ClearSchedule,
    clear_delay: Duration,
}

impl Storefront {
    pub fn new(catalog: Catalog, clear_delay: Duration) -> Self {
        Self {
            catalog,
            cart: Cart::default(),
            form: OrderForm::default(),
            search_term: String::new(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            view: StoreView::default(),
            clear_schedule: ClearSchedule::default(),
            clear_delay,
        }
    }

    pub fn seeded() -> Self {
        Self::new(Catalog::seeded(), checkout::DEFAULT_CLEAR_DELAY)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogLoadError> {
        let catalog = Catalog::load(settings.catalog_path.as_deref())?;
        Ok(Self::new(catalog, settings.clear_delay()))
    }

    // ---------- reads ----------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn lessons(&self) -> &[Lesson] {
        self.catalog.lessons()
    }

    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.catalog.get(id)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total()
    }

    pub fn cart_item_count(&self) -> u32 {
        self.cart.item_count()
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn is_order_confirmed(&self) -> bool {
        self.form.order_confirmed()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn view(&self) -> StoreView {
        self.view
    }

    pub fn clear_delay(&self) -> Duration {
        self.clear_delay
    }

    pub fn pending_clear(&self) -> Option<Instant> {
        self.clear_schedule.deadline()
    }

    /// Lessons matching the current search term, in catalog order.
    pub fn filtered_lessons(&self) -> Vec<&Lesson> {
        search::filter_lessons(self.catalog.lessons(), &self.search_term)
    }

    /// Lessons matching the current search term, in the current sort order.
    pub fn sorted_and_filtered_lessons(&self) -> Vec<&Lesson> {
        search::sorted_and_filtered(
            self.catalog.lessons(),
            &self.search_term,
            self.sort_by,
            self.sort_order,
        )
    }

    pub fn cart_snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.cart.lines().to_vec(),
            total: self.cart.total(),
            item_count: self.cart.item_count(),
        }
    }

    pub fn catalog_view(&self) -> CatalogView {
        CatalogView {
            search_term: self.search_term.clone(),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            lessons: self
                .sorted_and_filtered_lessons()
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    // ---------- view state ----------

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_by = field;
        self.sort_order = order;
    }

    pub fn set_sort_by(&mut self, field: SortField) {
        self.sort_by = field;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn show_cart(&mut self) {
        self.view = StoreView::Cart;
    }

    pub fn go_home(&mut self) {
        self.view = StoreView::Lessons;
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            StoreView::Lessons => StoreView::Cart,
            StoreView::Cart => StoreView::Lessons,
        };
    }

    // ---------- cart ----------

    pub fn add_to_cart(&mut self, lesson_id: LessonId) -> Result<(), CartError> {
        self.cart.add(&mut self.catalog, lesson_id)
    }

    pub fn increase_quantity(&mut self, line_index: usize) -> Result<(), CartError> {
        self.cart.increase(&mut self.catalog, line_index)
    }

    pub fn decrease_quantity(&mut self, line_index: usize) -> Result<(), CartError> {
        self.cart.decrease(&mut self.catalog, line_index)
    }

    pub fn remove_from_cart(&mut self, line_index: usize) -> Result<CartLine, CartError> {
        self.cart.remove(&mut self.catalog, line_index)
    }

    // ---------- checkout ----------

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.set_name(name);
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.form.set_phone(phone);
    }

    pub fn checkout(&mut self) -> CheckoutOutcome {
        self.checkout_at(Instant::now())
    }

    /// Validates the form. On success the order is confirmed immediately and
    /// the cart/form clear is scheduled `clear_delay` after `now`; on failure
    /// only the error messages change.
    pub fn checkout_at(&mut self, now: Instant) -> CheckoutOutcome {
        let errors = self.form.validate();
        if !errors.is_empty() {
            debug!(
                name_invalid = errors.name.is_some(),
                phone_invalid = errors.phone.is_some(),
                "checkout rejected"
            );
            return CheckoutOutcome::Rejected(errors.clone());
        }

        self.form.confirm();
        if self.clear_schedule.schedule(now, self.clear_delay) {
            info!("new checkout superseded the pending cart clear");
        }

        let confirmation = OrderConfirmation {
            name: self.form.name().to_string(),
            phone: self.form.phone().to_string(),
            lines: self.cart.lines().to_vec(),
            total: self.cart.total(),
            item_count: self.cart.item_count(),
            confirmed_at: Utc::now(),
        };
        info!(
            lines = confirmation.lines.len(),
            items = confirmation.item_count,
            total = confirmation.total,
            clear_in_ms = self.clear_delay.as_millis() as u64,
            "order confirmed"
        );
        CheckoutOutcome::Confirmed(confirmation)
    }

    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Runs the pending clear once its deadline has passed. Reserved spaces
    /// are not returned to the catalog. Returns true if the clear ran.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if !self.clear_schedule.fire_if_due(now) {
            return false;
        }

        let cleared = self.cart.take_lines();
        self.form.reset();
        info!(cleared_lines = cleared.len(), "cleared cart and form after confirmed order");
        true
    }

    /// Drops a pending clear and the success indicator; cart and contact
    /// fields stay as they are.
    pub fn cancel_pending_clear(&mut self) -> bool {
        let cancelled = self.clear_schedule.cancel();
        if cancelled {
            self.form.unconfirm();
            info!("pending cart clear cancelled");
        }
        cancelled
    }

    pub fn time_until_clear(&self, now: Instant) -> Option<Duration> {
        self.clear_schedule.remaining(now)
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
