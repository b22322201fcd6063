//! Applies UI actions to the storefront and turns results into status banners.

use shared::protocol::CheckoutOutcome;
use storefront::{display::format_price, Storefront};

use crate::controller::events::{describe_cart_error, StatusBanner, UiAction};

pub fn dispatch_action(store: &mut Storefront, action: UiAction, status: &mut Option<StatusBanner>) {
    let action_name = action.name();
    tracing::debug!(action = action_name, "applying ui action");

    let cart_result = match action {
        UiAction::SetSearch(term) => {
            store.set_search_term(term);
            Ok(())
        }
        UiAction::SetSortBy(field) => {
            store.set_sort_by(field);
            Ok(())
        }
        UiAction::SetSortOrder(order) => {
            store.set_sort_order(order);
            Ok(())
        }
        UiAction::AddToCart(lesson_id) => store.add_to_cart(lesson_id).map(|()| {
            if let Some(lesson) = store.lesson(lesson_id) {
                *status = Some(StatusBanner::info(format!("{} added to cart.", lesson.subject)));
            }
        }),
        UiAction::IncreaseQuantity(index) => store.increase_quantity(index),
        UiAction::DecreaseQuantity(index) => store.decrease_quantity(index),
        UiAction::RemoveFromCart(index) => store.remove_from_cart(index).map(|line| {
            *status = Some(StatusBanner::info(format!(
                "{} removed from cart.",
                line.subject
            )));
        }),
        UiAction::SetName(name) => {
            store.set_name(name);
            Ok(())
        }
        UiAction::SetPhone(phone) => {
            store.set_phone(phone);
            Ok(())
        }
        UiAction::Checkout => {
            match store.checkout() {
                CheckoutOutcome::Confirmed(order) => {
                    *status = Some(StatusBanner::success(format!(
                        "Order confirmed for {}: {} lesson(s), {}.",
                        order.name,
                        order.item_count,
                        format_price(order.total)
                    )));
                }
                CheckoutOutcome::Rejected(_) => {
                    *status = Some(StatusBanner::warning("Please fix the highlighted details."));
                }
            }
            Ok(())
        }
        UiAction::ShowCart => {
            store.show_cart();
            Ok(())
        }
        UiAction::GoHome => {
            store.go_home();
            Ok(())
        }
    };

    if let Err(err) = cart_result {
        tracing::debug!(action = action_name, error = %err, "ui action rejected");
        *status = Some(StatusBanner::warning(describe_cart_error(&err)));
    }
}
