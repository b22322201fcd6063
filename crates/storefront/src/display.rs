//! Text helpers shared by the display surfaces.

/// Maps a lesson's icon tag to a glyph a plain-text or egui surface can draw.
pub fn icon_glyph(icon: &str) -> &'static str {
    let name = icon
        .split_whitespace()
        .find(|part| part.starts_with("fa-") && *part != "fa-solid" && *part != "fa-regular")
        .unwrap_or_default();
    match name {
        "fa-calculator" => "🧮",
        "fa-book-open" => "📖",
        "fa-seedling" => "🌱",
        "fa-flask" => "⚗",
        "fa-landmark" => "🏛",
        "fa-atom" => "⚛",
        "fa-palette" => "🎨",
        "fa-earth-europe" => "🌍",
        "fa-code" => "💻",
        "fa-chart-line" => "📈",
        _ => "📚",
    }
}

pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("£{price}")
    } else {
        format!("£{price:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_icons_map_to_glyphs() {
        assert_eq!(icon_glyph("fa-solid fa-calculator"), "🧮");
        assert_eq!(icon_glyph("fa-solid fa-code"), "💻");
        assert_eq!(icon_glyph("fa-solid fa-unicorn"), "📚");
        assert_eq!(icon_glyph(""), "📚");
    }

    #[test]
    fn prices_drop_zero_pence() {
        assert_eq!(format_price(100.0), "£100");
        assert_eq!(format_price(12.5), "£12.50");
    }
}
