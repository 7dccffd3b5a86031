//! Sample configurations for testing and demonstration.
//!
//! The button variants cover every combination of border colour, background
//! image and border radius that produces a distinct structure.

use crate::button::ButtonConfig;
use crate::style::{style_map, StyleMap, StyleValue};

const HREF: &str = "http://abcd";
const TEXT: &str = "Show me the button!";
const TILE: &str = "https://imgur.com/5BIp9d0.gif";

fn button_base() -> StyleMap {
    style_map([
        ("height", StyleValue::from(53)),
        ("width", StyleValue::from(200)),
        ("background-color", StyleValue::from("#49a9ce")),
    ])
}

fn text_base() -> StyleMap {
    style_map([
        ("color", "#ffffff"),
        ("font-family", "sans-serif"),
        ("font-size", "13px"),
        ("font-weight", "bold"),
    ])
}

fn variant(extra: &[(&str, StyleValue)], bordered: bool) -> ButtonConfig {
    let mut styles = button_base();
    for (k, v) in extra {
        styles.insert(k.to_string(), v.clone());
    }
    let mut text = text_base();
    if bordered {
        text.insert("border".to_string(), StyleValue::from("1px solid #ffffff"));
    }
    ButtonConfig::new()
        .text(TEXT)
        .href(HREF)
        .button_styles(styles)
        .text_styles(text)
}

/// Plain button: no border colour, background image or radius.
pub fn plain_button() -> ButtonConfig {
    variant(&[], false)
}

pub fn rounded_button() -> ButtonConfig {
    variant(&[("border-radius", 4.into())], false)
}

pub fn image_button() -> ButtonConfig {
    variant(&[("background-image", TILE.into())], false)
}

pub fn bordered_rounded_button() -> ButtonConfig {
    variant(
        &[("border-color", "#ffffff".into()), ("border-radius", 4.into())],
        true,
    )
}

pub fn bordered_rounded_image_button() -> ButtonConfig {
    variant(
        &[
            ("border-color", "#ffffff".into()),
            ("border-radius", 4.into()),
            ("background-image", TILE.into()),
        ],
        true,
    )
}

pub fn rounded_image_button() -> ButtonConfig {
    variant(
        &[("border-radius", 4.into()), ("background-image", TILE.into())],
        false,
    )
}

pub fn bordered_button() -> ButtonConfig {
    variant(&[("border-color", "#ffffff".into())], true)
}

/// Every sample button with a short name.
pub fn button_variants() -> Vec<(&'static str, ButtonConfig)> {
    vec![
        ("plain", plain_button()),
        ("rounded", rounded_button()),
        ("image", image_button()),
        ("bordered_rounded", bordered_rounded_button()),
        ("bordered_rounded_image", bordered_rounded_image_button()),
        ("rounded_image", rounded_image_button()),
        ("bordered", bordered_button()),
    ]
}

/// A small newsletter exercising every block type.
pub fn newsletter_config() -> &'static str {
    r##"{
    "container": {
        "background-color": "#f4f4f4",
        "width": 600,
        "class": "container"
    },
    "blocks": [
        {"type": "image", "src": "https://example.com/hero.png", "alt": "Spring sale", "href": "https://example.com"},
        {"type": "spacer", "height": 24},
        {"type": "padded", "padding": [0, 32], "blocks": [
            {"type": "paragraphs",
             "paragraphs": ["Hello there,", "Our spring collection just landed."],
             "attrs": {"style": "font-family:sans-serif;font-size:15px;color:#333333"},
             "margin": 12}
        ]},
        {"type": "spacer", "height": 24},
        {"type": "button", "text": "Shop now", "href": "https://example.com/shop",
         "button_styles": {"height": 48, "width": 220, "background-color": "#49a9ce", "border-radius": 6},
         "text_styles": {"color": "#ffffff", "font-family": "sans-serif", "font-size": "15px"}},
        {"type": "spacer", "height": 24},
        {"type": "columns", "columns": [
            {"attrs": {"width": "50%"}, "blocks": [{"type": "text", "text": "Free shipping"}]},
            {"attrs": {"width": "50%"}, "blocks": [{"type": "link", "text": "Returns", "href": "https://example.com/returns"}]}
        ]},
        {"type": "tracking_pixels", "srcs": ["https://example.com/open.gif"]}
    ]
}"##
}

/// Minimal config for unit testing.
pub fn minimal_config() -> &'static str {
    r#"{"blocks": [{"type": "text", "text": "Body text"}]}"#
}
