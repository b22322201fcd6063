mod controller;
mod ui;

use anyhow::Context;
use eframe::egui;
use storefront::{config::load_settings, Storefront};
use tracing_subscriber::EnvFilter;

use crate::ui::StorefrontApp;

fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Storefront::from_settings(&settings).context("failed to load lesson catalog")?;
    tracing::info!(
        lessons = store.lessons().len(),
        clear_delay_ms = settings.checkout_clear_delay_ms,
        "starting storefront"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Lesson Booking")
            .with_inner_size([1024.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Lesson Booking",
        options,
        Box::new(|_cc| Ok(Box::new(StorefrontApp::new(store)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
