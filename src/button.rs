//! Cross-client button: a VML shape for Outlook's Word engine plus a styled
//! anchor for every other client.
//!
//! Three independent style flags pick the structure:
//! - `border-radius` → `v:roundrect` with an `arcsize`, otherwise `v:rect`
//! - `background-image` → tiled `v:fill` child, otherwise a `fillcolor`
//! - `border-color` → `strokecolor`, otherwise `stroke="f"`
//!
//! Where the anchor lives depends on `border-color` and `background-image`
//! together. Unless both are set, a copy of the anchor sits inside the VML
//! `center` and the original is hidden from Outlook with `<!--[if !mso]>`.
//! With both set, the anchor is always emitted, carries `mso-hide:all`, and
//! the VML `center` shows the text styled from the text styles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dom::{Attributed, ConditionalComment, DomNode, ElementNode, Parent, SelfClosingNode};
use crate::error::{MarkupError, Result};
use crate::style::{hex_to_rgba, to_unit, StyleMap, StyleValue};

/// Button content and styling.
///
/// `button_styles` recognises `background-color`, `background-image`,
/// `border-color`, `border-radius`, `height` and `width`. `text_styles` are
/// merged last into the anchor's style and override anything computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub text: String,
    pub href: String,
    pub button_styles: StyleMap,
    pub text_styles: StyleMap,
}

impl ButtonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = href.into();
        self
    }

    pub fn button_styles<K, V, I>(mut self, styles: I) -> Self
    where
        K: Into<String>,
        V: Into<StyleValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.button_styles = styles
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn text_styles<K, V, I>(mut self, styles: I) -> Self
    where
        K: Into<String>,
        V: Into<StyleValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.text_styles = styles
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Configured button style; empty values read as unset.
    pub fn button_style(&self, key: &str) -> Option<&StyleValue> {
        self.button_styles.get(key).filter(|v| !v.is_empty())
    }

    /// Overwrite one button style. Empty values are ignored.
    pub fn set_button_style(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.button_styles.insert(key.into(), value);
        }
        self
    }

    fn unit(&self, key: &str) -> Option<String> {
        self.button_style(key).map(to_unit)
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.button_style(key).map(StyleValue::to_string)
    }

    fn text_style_pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.text_styles
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.to_string()))
    }

    /// `border-radius` as a percentage of `height`, rounded half away from zero.
    fn arcsize(&self) -> Result<String> {
        let radius = self
            .button_style("border-radius")
            .ok_or_else(|| MarkupError::missing_style("border-radius"))?;
        let radius = radius
            .as_number()
            .ok_or_else(|| MarkupError::invalid_style("border-radius", radius.to_string()))?;
        let height = self
            .button_style("height")
            .ok_or_else(|| MarkupError::missing_style("height"))?;
        let height_px = height
            .as_number()
            .filter(|h| *h != 0.0)
            .ok_or_else(|| MarkupError::invalid_style("height", height.to_string()))?;
        Ok(format!("{}%", (radius / height_px * 100.0).round()))
    }

    /// Anchor style: fixed base, then `recorded` flags, then text styles.
    fn anchor_styles(&self, recorded: Vec<(&'static str, String)>) -> IndexMap<String, String> {
        let mut styles: IndexMap<String, String> = [
            ("display", Some("inline-block".to_string())),
            ("text-align", Some("center".to_string())),
            ("text-decoration", Some("none".to_string())),
            ("-webkit-text-size-adjust", Some("none".to_string())),
            ("background-color", self.raw("background-color").map(|c| hex_to_rgba(&c))),
            ("line-height", self.unit("height")),
            ("width", self.unit("width")),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
        .collect();

        for (k, v) in recorded {
            styles.insert(k.to_string(), v);
        }
        for (k, v) in self.text_style_pairs() {
            styles.insert(k.to_string(), v);
        }
        styles
    }

    /// Render the button. Fails before building anything if a required style
    /// is missing or unusable.
    pub fn to_dom(&self) -> Result<DomNode> {
        if let Some((key, value)) = self
            .button_styles
            .iter()
            .chain(&self.text_styles)
            .find(|(_, v)| !v.is_finite())
        {
            return Err(MarkupError::invalid_style(key.as_str(), value.to_string()));
        }

        let background_color = self.raw("background-color");
        let background_image = self.raw("background-image");
        let border_color = self.raw("border-color");
        let mut recorded: Vec<(&'static str, String)> = Vec::new();

        let mut shape = match self.unit("border-radius") {
            Some(radius) => {
                let arcsize = self.arcsize()?;
                recorded.push(("border-radius", radius));
                ElementNode::new("v:roundrect").attr("arcsize", arcsize)
            }
            None => ElementNode::new("v:rect"),
        };
        shape = shape
            .use_whitespace(false)
            .attr("href", &self.href)
            .styles(
                [
                    ("height", self.unit("height")),
                    ("v-text-anchor", Some("middle".to_string())),
                    ("width", self.unit("width")),
                ]
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v))),
            );

        match &background_image {
            Some(image) => {
                recorded.push(("background-image", format!("url({image})")));
                shape.add_child(
                    SelfClosingNode::new("v:fill")
                        .attr("type", "tile")
                        .attr("src", image)
                        .attr_opt("color", background_color.as_deref()),
                );
            }
            None => {
                shape
                    .attributes_mut()
                    .set_opt("fillcolor", background_color.as_deref());
            }
        }
        shape.add_child(SelfClosingNode::new("w:anchorlock"));

        let wraps_anchor = !(border_color.is_some() && background_image.is_some());
        if !wraps_anchor {
            recorded.push(("mso-hide", "all".to_string()));
        }
        log::debug!(
            "button '{}': {} shape, anchor {}",
            self.text,
            shape.tag(),
            if wraps_anchor { "copied into VML" } else { "hidden from Outlook" }
        );

        let anchor = ElementNode::new("a")
            .use_whitespace(false)
            .attr("href", &self.href)
            .styles(self.anchor_styles(recorded))
            .text(&self.text);

        let mut center = ElementNode::new("center").use_whitespace(false);
        let outer: DomNode = if wraps_anchor {
            center.add_child(anchor.clone());
            ConditionalComment::new("!mso")
                .use_whitespace(false)
                .child(anchor)
                .into()
        } else {
            center.merge_styles(self.text_style_pairs());
            center.add_child(DomNode::text(&self.text));
            anchor.into()
        };
        shape.add_child(center);

        match border_color {
            Some(color) => shape.set_attr("strokecolor", color),
            None => shape.set_attr("stroke", "f"),
        };

        Ok(ElementNode::new("div")
            .use_whitespace(false)
            .child(
                ConditionalComment::new("mso")
                    .use_whitespace(false)
                    .child(shape),
            )
            .child(outer)
            .into())
    }
}

/// Render `config` into a single `div` node.
pub fn render_button(config: &ButtonConfig) -> Result<DomNode> {
    config.to_dom()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ButtonConfig {
        ButtonConfig::new()
            .text("Show me the button!")
            .href("http://abcd")
    }

    #[test]
    fn arcsize_is_rounded_percentage_of_height() {
        let b = base().button_styles([("height", 53), ("border-radius", 4)]);
        assert_eq!(b.arcsize().unwrap(), "8%");

        let b = base().button_styles([("height", "40px"), ("border-radius", "20px")]);
        assert_eq!(b.arcsize().unwrap(), "50%");
    }

    #[test]
    fn radius_without_height_fails() {
        let b = base().button_styles([("border-radius", 4)]);
        assert_eq!(
            b.to_dom().unwrap_err(),
            MarkupError::MissingRequiredStyle {
                key: "height".into()
            }
        );
    }

    #[test]
    fn zero_height_is_rejected() {
        let b = base().button_styles([("border-radius", 4), ("height", 0)]);
        assert!(matches!(
            b.to_dom(),
            Err(MarkupError::InvalidStyleValue { ref key, .. }) if key == "height"
        ));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let b = base().button_styles([("height", 53.0), ("border-radius", f64::NAN)]);
        assert_eq!(
            b.to_dom().unwrap_err(),
            MarkupError::InvalidStyleValue {
                key: "border-radius".into(),
                value: "NaN".into()
            }
        );

        let b = base().button_styles([("border-radius", 4.0), ("height", f64::NAN)]);
        assert!(matches!(
            b.to_dom(),
            Err(MarkupError::InvalidStyleValue { ref key, .. }) if key == "height"
        ));
        assert!(b.arcsize().is_err());

        let b = base()
            .button_styles([("height", 53.0), ("width", 200.0)])
            .text_styles([("line-height", f64::INFINITY)]);
        assert!(matches!(
            b.to_dom(),
            Err(MarkupError::InvalidStyleValue { ref key, .. }) if key == "line-height"
        ));
    }

    #[test]
    fn exponent_heights_are_read_in_full() {
        let b = base().button_styles([("height", "1e2"), ("border-radius", "50")]);
        assert_eq!(b.arcsize().unwrap(), "50%");
        assert!(b.to_dom().unwrap().to_html().contains(r#"<v:roundrect arcsize="50%""#));
    }

    #[test]
    fn empty_values_read_as_unset() {
        let mut b = base().button_styles([("border-color", ""), ("height", "53")]);
        assert!(b.button_style("border-color").is_none());
        b.set_button_style("height", "");
        assert_eq!(b.button_style("height"), Some(&StyleValue::from("53")));
        let html = b.to_dom().unwrap().to_html();
        assert!(html.contains(r#"stroke="f""#));
    }

    #[test]
    fn text_styles_override_computed_anchor_styles() {
        let b = base()
            .button_styles([("height", "53"), ("width", "200"), ("background-color", "#49a9ce")])
            .text_styles([("width", "auto"), ("color", "#ffffff")]);
        let styles = b.anchor_styles(Vec::new());
        assert_eq!(styles.get("width").map(String::as_str), Some("auto"));
        assert_eq!(styles.get("color").map(String::as_str), Some("#ffffff"));
        assert_eq!(
            styles.get("background-color").map(String::as_str),
            Some("rgba(73,169,206,1)")
        );
        assert_eq!(styles.get_index_of("width"), Some(6));
    }

    #[test]
    fn roundrect_records_border_radius() {
        let html = base()
            .button_styles([("height", 53), ("width", 200), ("border-radius", 4)])
            .to_dom()
            .unwrap()
            .to_html();
        assert!(html.contains(r#"<v:roundrect arcsize="8%" href="http://abcd""#));
        assert!(html.contains("border-radius:4px;"));
        assert!(html.contains("</v:roundrect>"));
    }
}
