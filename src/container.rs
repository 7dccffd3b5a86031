//! Outer email container: a full-width background cell holding a centered,
//! max-width column. Outlook and old IE ignore `max-width`, so they get a
//! fixed table opened and closed in conditional comments around the column.

use serde::{Deserialize, Serialize};

use crate::attrs::Attributes;
use crate::dom::{Attributed, DomNode, ElementNode, NodeCollection, Parent};
use crate::layout::{build_row_padding, build_table, TABLE_ATTRS, TABLE_STYLES};
use crate::style::{hex_to_rgba, to_unit, StyleValue};

const IE_CLOSE: &str = "<!--[if mso | IE]></td></tr></table><![endif]-->";

/// Container settings. Omitted fields take the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContainerConfig {
    /// Default `#FFFFFF`.
    pub background_color: String,
    pub class: Option<String>,
    /// Default `100%`.
    pub width: StyleValue,
    /// Default `none`.
    pub border: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            class: None,
            width: StyleValue::from("100%"),
            border: "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    config: ContainerConfig,
    /// Without a config only the inner table is emitted.
    enabled: bool,
}

impl Container {
    pub fn new(config: Option<ContainerConfig>) -> Self {
        Self {
            enabled: config.is_some(),
            config: config.unwrap_or_default(),
        }
    }

    pub fn width(&self) -> &StyleValue {
        &self.config.width
    }

    fn table(&self) -> ElementNode {
        build_table([("width", self.config.width.to_string())], Vec::<(String, String)>::new())
            .attr_opt("class", self.config.class.as_deref())
    }

    fn ie_open(&self) -> String {
        let mut table = Attributes::new();
        table.merge(TABLE_ATTRS);
        table.merge_styles(TABLE_STYLES);
        table.set("align", "center");

        let mut td = Attributes::new();
        td.merge_styles([
            ("line-height", "0px"),
            ("font-size", "0px"),
            ("mso-line-height-rule", "exactly"),
        ]);
        format!("<!--[if mso | IE]><table{table}><tr><td{td}><![endif]-->")
    }

    /// Wrap `body` (a collection of rows) in the container markup.
    pub fn wrap(&self, body: NodeCollection) -> Vec<DomNode> {
        let inner: Vec<DomNode> = vec![
            DomNode::text("<!-- Container -->"),
            self.table().child(body).into(),
            DomNode::text("<!-- End Container -->"),
        ];
        if !self.enabled {
            return inner;
        }

        let cell = ElementNode::new("td")
            .attr("bgcolor", &self.config.background_color)
            .style("background-color", hex_to_rgba(&self.config.background_color))
            .text(self.ie_open())
            .child(
                ElementNode::new("div")
                    .styles([
                        ("max-width", to_unit(&self.config.width)),
                        ("margin", "0px auto".to_string()),
                        ("border", self.config.border.clone()),
                    ])
                    .children(inner),
            )
            .text(IE_CLOSE);

        vec![self
            .table()
            .child(ElementNode::new("tr").child(cell))
            .text("<!-- BOTTOM SPACER FIX -->")
            .child(build_row_padding(64))
            .into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let cfg: ContainerConfig = serde_json::from_str(r#"{"width": 600}"#).unwrap();
        assert_eq!(cfg.width, StyleValue::from(600));
        assert_eq!(cfg.background_color, "#FFFFFF");
        assert_eq!(cfg.border, "none");
    }

    #[test]
    fn disabled_container_emits_inner_table_only() {
        let nodes = Container::new(None).wrap(NodeCollection::new());
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], DomNode::text("<!-- Container -->"));
        assert_eq!(nodes[1].tag(), Some("table"));
    }

    #[test]
    fn enabled_container_wraps_for_outlook() {
        let container = Container::new(Some(ContainerConfig {
            width: 600.into(),
            class: Some("wrap".into()),
            ..ContainerConfig::default()
        }));
        let nodes = container.wrap(NodeCollection::new());
        assert_eq!(nodes.len(), 1);
        let html = nodes[0].to_html();
        assert!(html.starts_with(r#"<table width="600" cellpadding="0""#));
        assert!(html.contains(r#"class="wrap""#));
        assert!(html.contains(
            r##"<td bgcolor="#FFFFFF" style="background-color:rgba(255,255,255,1);"><!--[if mso | IE]><table width="100%""##
        ));
        assert!(html.contains(r#" align="center"><tr><td style="line-height:0px;font-size:0px;mso-line-height-rule:exactly;"><![endif]-->"#));
        assert!(html.contains(r#"<div style="max-width:600px;margin:0px auto;border:none;">"#));
        assert!(html.contains(IE_CLOSE));
        assert!(html.contains("<!-- BOTTOM SPACER FIX -->"));
        assert!(html.contains(r#"<td height="64""#));
    }
}
