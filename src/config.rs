//! Email configuration – the serde description of a whole email that the
//! pipeline turns into markup. Loaded from JSON by the CLI.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::button::ButtonConfig;
use crate::container::ContainerConfig;
use crate::error::{MarkupError, Result};
use crate::style::StyleValue;

/// A complete email: optional container settings and its blocks, top to
/// bottom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Without container settings the rows are emitted without the outer
    /// background table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerConfig>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// One row-level block of an email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text {
        text: String,
        #[serde(default)]
        attrs: IndexMap<String, String>,
    },
    Paragraphs {
        paragraphs: Vec<String>,
        #[serde(default)]
        attrs: IndexMap<String, String>,
        #[serde(default = "Block::default_margin")]
        margin: StyleValue,
    },
    Button(ButtonConfig),
    Image {
        src: String,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        href: Option<String>,
    },
    Spacer {
        height: StyleValue,
    },
    Link {
        text: String,
        href: String,
    },
    /// Nested blocks surrounded by spacer rows and columns; `padding` uses
    /// CSS shorthand order (1–4 values).
    Padded {
        padding: Vec<StyleValue>,
        blocks: Vec<Block>,
    },
    Columns {
        columns: Vec<ColumnConfig>,
    },
    TrackingPixels {
        srcs: Vec<String>,
    },
}

impl Block {
    fn default_margin() -> StyleValue {
        StyleValue::Number(0.0)
    }
}

/// One column of a [`Block::Columns`] row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl EmailConfig {
    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MarkupError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_tagged_by_type() {
        let cfg = EmailConfig::from_json(
            r##"{
                "container": {"width": 600, "background-color": "#f4f4f4"},
                "blocks": [
                    {"type": "text", "text": "Hello"},
                    {"type": "spacer", "height": 24},
                    {"type": "button", "text": "Go", "href": "/go",
                     "button_styles": {"height": 40, "background-color": "#49a9ce"}}
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(cfg.blocks.len(), 3);
        assert_eq!(
            cfg.container.as_ref().map(|c| c.background_color.as_str()),
            Some("#f4f4f4")
        );
        match &cfg.blocks[2] {
            Block::Button(b) => {
                assert_eq!(b.button_style("height"), Some(&StyleValue::Number(40.0)));
                let keys: Vec<_> = b.button_styles.keys().collect();
                assert_eq!(keys, ["height", "background-color"]);
            }
            other => panic!("expected button, got {other:?}"),
        }
    }

    #[test]
    fn unknown_block_type_is_a_config_error() {
        let err = EmailConfig::from_json(r#"{"blocks": [{"type": "video"}]}"#).unwrap_err();
        assert!(matches!(err, MarkupError::Config(_)));
    }

    #[test]
    fn json_round_trip_preserves_blocks() {
        let cfg = EmailConfig {
            container: None,
            blocks: vec![Block::Link {
                text: "Docs".into(),
                href: "https://x.test".into(),
            }],
        };
        assert_eq!(EmailConfig::from_json(&cfg.to_json()).unwrap(), cfg);
    }
}
