use std::time::{Duration, Instant};

use eframe::egui;
use shared::domain::{SortField, SortOrder, StoreView};
use storefront::{
    display::{format_price, icon_glyph},
    Storefront,
};

use crate::controller::{
    events::{StatusBanner, StatusSeverity, UiAction},
    orchestration::dispatch_action,
};

const IDLE_REPAINT: Duration = Duration::from_millis(250);
const SUCCESS_GREEN: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
const WARNING_AMBER: egui::Color32 = egui::Color32::from_rgb(214, 149, 36);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(220, 70, 70);

/// Text buffers bound to the inputs. They are refreshed from the store every
/// frame, so a cleared form shows up empty without extra bookkeeping.
#[derive(Default)]
struct InputDrafts {
    search: String,
    name: String,
    phone: String,
}

impl InputDrafts {
    fn sync_from(&mut self, store: &Storefront) {
        self.search.clear();
        self.search.push_str(store.search_term());
        self.name.clear();
        self.name.push_str(store.form().name());
        self.phone.clear();
        self.phone.push_str(store.form().phone());
    }
}

pub struct StorefrontApp {
    store: Storefront,
    drafts: InputDrafts,
    status: Option<StatusBanner>,
}

impl StorefrontApp {
    pub fn new(store: Storefront) -> Self {
        Self {
            store,
            drafts: InputDrafts::default(),
            status: None,
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let store = &self.store;
        let drafts = &mut self.drafts;
        egui::TopBottomPanel::top("storefront_top_bar")
            .frame(egui::Frame::NONE.inner_margin(egui::Margin::symmetric(14, 10)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("📚 Lesson Booking");
                    ui.add_space(16.0);

                    let cart_label = format!("🛒 Cart ({})", store.cart_item_count());
                    let cart_button = egui::Button::new(egui::RichText::new(cart_label).strong());
                    // the cart page can always be left; an empty cart cannot be opened
                    let enabled = store.view() == StoreView::Cart || store.cart_item_count() > 0;
                    if ui.add_enabled(enabled, cart_button).clicked() {
                        actions.push(match store.view() {
                            StoreView::Lessons => UiAction::ShowCart,
                            StoreView::Cart => UiAction::GoHome,
                        });
                    }
                });

                if store.view() != StoreView::Lessons {
                    return;
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label("Search");
                    let search = ui.add(
                        egui::TextEdit::singleline(&mut drafts.search)
                            .id_salt("lesson_search")
                            .hint_text("subject, location, price or spaces")
                            .desired_width(260.0),
                    );
                    if search.changed() {
                        actions.push(UiAction::SetSearch(drafts.search.clone()));
                    }

                    ui.add_space(12.0);
                    ui.label("Sort by");
                    let mut sort_by = store.sort_by();
                    egui::ComboBox::from_id_salt("sort_field")
                        .selected_text(sort_by.label())
                        .show_ui(ui, |ui| {
                            for field in SortField::ALL {
                                ui.selectable_value(&mut sort_by, field, field.label());
                            }
                        });
                    if sort_by != store.sort_by() {
                        actions.push(UiAction::SetSortBy(sort_by));
                    }

                    let mut sort_order = store.sort_order();
                    ui.radio_value(&mut sort_order, SortOrder::Asc, SortOrder::Asc.label());
                    ui.radio_value(&mut sort_order, SortOrder::Desc, SortOrder::Desc.label());
                    if sort_order != store.sort_order() {
                        actions.push(UiAction::SetSortOrder(sort_order));
                    }
                });
            });
    }

    fn show_main(&mut self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            show_status_banner(ui, self.status.as_ref());
            match self.store.view() {
                StoreView::Lessons => show_lessons(ui, &self.store, actions),
                StoreView::Cart => show_cart_page(ui, &self.store, &mut self.drafts, actions),
            }
        });
    }
}

fn show_status_banner(ui: &mut egui::Ui, status: Option<&StatusBanner>) {
    let Some(banner) = status else {
        return;
    };
    let color = match banner.severity {
        StatusSeverity::Info => ui.visuals().text_color(),
        StatusSeverity::Success => SUCCESS_GREEN,
        StatusSeverity::Warning => WARNING_AMBER,
    };
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.colored_label(color, &banner.message);
        });
    ui.add_space(8.0);
}

fn show_lessons(ui: &mut egui::Ui, store: &Storefront, actions: &mut Vec<UiAction>) {
    let lessons = store.sorted_and_filtered_lessons();
    if lessons.is_empty() {
        ui.weak("No lessons match your search.");
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for lesson in lessons {
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(10.0)
                    .inner_margin(egui::Margin::symmetric(14, 10))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(icon_glyph(&lesson.icon)).size(28.0));
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(&lesson.subject).strong().size(17.0));
                                ui.label(format!("📍 {}", lesson.location));
                                ui.label(format!("Price: {}", format_price(lesson.price)));
                                if lesson.spaces == 0 {
                                    ui.colored_label(ERROR_RED, "Sold out");
                                } else {
                                    ui.label(format!("Spaces: {}", lesson.spaces));
                                }
                            });
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let add = egui::Button::new("Add to cart");
                                if ui.add_enabled(lesson.spaces > 0, add).clicked() {
                                    actions.push(UiAction::AddToCart(lesson.id));
                                }
                            });
                        });
                    });
                ui.add_space(6.0);
            }
        });
}

fn show_cart_page(
    ui: &mut egui::Ui,
    store: &Storefront,
    drafts: &mut InputDrafts,
    actions: &mut Vec<UiAction>,
) {
    ui.horizontal(|ui| {
        if ui.button("⬅ Back to lessons").clicked() {
            actions.push(UiAction::GoHome);
        }
        ui.heading("Your cart");
    });
    ui.add_space(8.0);

    if store.cart_lines().is_empty() {
        ui.weak("Your cart is empty.");
    } else {
        egui::Grid::new("cart_lines")
            .striped(true)
            .num_columns(6)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Lesson");
                ui.strong("Location");
                ui.strong("Price");
                ui.strong("Quantity");
                ui.strong("Subtotal");
                ui.label("");
                ui.end_row();

                for (index, line) in store.cart_lines().iter().enumerate() {
                    ui.label(&line.subject);
                    ui.label(&line.location);
                    ui.label(format_price(line.price));
                    ui.horizontal(|ui| {
                        if ui.small_button("➖").clicked() {
                            actions.push(UiAction::DecreaseQuantity(index));
                        }
                        ui.label(line.quantity.to_string());
                        let can_increase = store
                            .lesson(line.lesson_id)
                            .is_some_and(|lesson| lesson.spaces > 0);
                        if ui
                            .add_enabled(can_increase, egui::Button::new("➕").small())
                            .clicked()
                        {
                            actions.push(UiAction::IncreaseQuantity(index));
                        }
                    });
                    ui.label(format_price(line.line_total()));
                    if ui.button("Remove").clicked() {
                        actions.push(UiAction::RemoveFromCart(index));
                    }
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(format!(
                "{} item(s), total {}",
                store.cart_item_count(),
                format_price(store.cart_total())
            ))
            .strong(),
        );
    }

    ui.add_space(16.0);
    ui.separator();
    show_checkout_form(ui, store, drafts, actions);
}

fn show_checkout_form(
    ui: &mut egui::Ui,
    store: &Storefront,
    drafts: &mut InputDrafts,
    actions: &mut Vec<UiAction>,
) {
    ui.heading("Checkout");
    ui.add_space(6.0);
    let errors = store.form().errors();

    ui.label(egui::RichText::new("Name").strong());
    let name = ui.add(
        egui::TextEdit::singleline(&mut drafts.name)
            .id_salt("checkout_name")
            .hint_text("Letters and spaces only")
            .desired_width(320.0),
    );
    if name.changed() {
        actions.push(UiAction::SetName(drafts.name.clone()));
    }
    if !errors.name_message().is_empty() {
        ui.colored_label(ERROR_RED, errors.name_message());
    }

    ui.label(egui::RichText::new("Phone").strong());
    let phone = ui.add(
        egui::TextEdit::singleline(&mut drafts.phone)
            .id_salt("checkout_phone")
            .hint_text("8 to 15 digits")
            .desired_width(320.0),
    );
    if phone.changed() {
        actions.push(UiAction::SetPhone(drafts.phone.clone()));
    }
    if !errors.phone_message().is_empty() {
        ui.colored_label(ERROR_RED, errors.phone_message());
    }

    ui.add_space(10.0);
    let submit = egui::Button::new(egui::RichText::new("Checkout").strong())
        .min_size(egui::vec2(160.0, 34.0));
    if ui
        .add_enabled(!store.is_order_confirmed(), submit)
        .clicked()
    {
        actions.push(UiAction::Checkout);
    }
    if !store.is_form_valid() {
        ui.weak("Enter a name and phone number to place the order.");
    }

    if store.is_order_confirmed() {
        ui.add_space(8.0);
        ui.colored_label(SUCCESS_GREEN, "✔ Order submitted successfully!");
    }
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.store.poll() {
            self.status = Some(StatusBanner::info("Order complete. Your cart has been cleared."));
        }
        self.drafts.sync_from(&self.store);

        let mut actions = Vec::new();
        self.show_top_bar(ctx, &mut actions);
        self.show_main(ctx, &mut actions);

        for action in actions {
            dispatch_action(&mut self.store, action, &mut self.status);
        }

        match self.store.time_until_clear(Instant::now()) {
            Some(remaining) => ctx.request_repaint_after(remaining.min(IDLE_REPAINT)),
            None => ctx.request_repaint_after(IDLE_REPAINT),
        }
    }
}
