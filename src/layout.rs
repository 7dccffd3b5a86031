//! Table-based layout helpers – rows, columns, spacers, images and links.
//!
//! Email clients only agree on nested presentation tables, so every block is
//! a `<tr><td>` somewhere inside a [`build_table`].

use std::fmt;

use crate::button::ButtonConfig;
use crate::dom::{Attributed, DomNode, ElementNode, NodeCollection, Parent, SelfClosingNode};
use crate::error::Result;
use crate::style::{StyleMap, StyleValue};

/// Attributes every layout table starts from.
pub const TABLE_ATTRS: [(&str, &str); 5] = [
    ("width", "100%"),
    ("cellpadding", "0"),
    ("cellspacing", "0"),
    ("border", "0"),
    ("role", "presentation"),
];

/// Inline styles every layout table starts from.
pub const TABLE_STYLES: [(&str, &str); 3] = [
    ("max-width", "100%"),
    ("mso-cellspacing", "0px"),
    ("mso-padding-alt", "0px 0px 0px 0px"),
];

/// Styles of the nested tables in [`build_padded`]; no `max-width`.
const PADDED_TABLE_STYLES: [(&str, &str); 2] = [
    ("mso-cellspacing", "0px"),
    ("mso-padding-alt", "0px 0px 0px 0px"),
];

const IMG_ALT_FONT: &str = "'Helvetica Neue',Helvetica,Arial,sans-serif";

/// Attribute pairs accepted by the helpers.
pub type AttrList = Vec<(String, String)>;

/// A `<td>` described either by explicit attributes or by a width.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Attrs(AttrList),
    Width(StyleValue),
}

/// Padding in CSS shorthand order.
#[derive(Debug, Clone, PartialEq)]
pub struct Padding {
    pub top: StyleValue,
    pub right: StyleValue,
    pub bottom: StyleValue,
    pub left: StyleValue,
}

impl Padding {
    pub fn uniform(value: impl Into<StyleValue>) -> Self {
        let v = value.into();
        Self {
            top: v.clone(),
            right: v.clone(),
            bottom: v.clone(),
            left: v,
        }
    }

    /// One to four values, filled in like the CSS `padding` shorthand:
    /// right defaults to top, bottom to top, left to right. `None` when
    /// `values` is empty.
    pub fn from_shorthand(values: &[StyleValue]) -> Option<Self> {
        let top = values.first()?.clone();
        let right = values.get(1).cloned().unwrap_or_else(|| top.clone());
        let bottom = values.get(2).cloned().unwrap_or_else(|| top.clone());
        let left = values.get(3).cloned().unwrap_or_else(|| right.clone());
        Some(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

/// Source of an image: a plain `src` (+ alt, optional link) or a full
/// attribute list, kept in caller order, whose `href` entry, if any, becomes a
/// wrapping link.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSpec {
    Src {
        src: String,
        alt: Option<String>,
        href: Option<String>,
    },
    Attrs(AttrList),
}

pub fn build_table<K1, V1, K2, V2>(
    merge_attrs: impl IntoIterator<Item = (K1, V1)>,
    merge_styles: impl IntoIterator<Item = (K2, V2)>,
) -> ElementNode
where
    K1: Into<String>,
    V1: fmt::Display,
    K2: Into<String>,
    V2: fmt::Display,
{
    ElementNode::new("table")
        .attrs(TABLE_ATTRS)
        .styles(TABLE_STYLES)
        .attrs(merge_attrs)
        .styles(merge_styles)
}

/// [`build_table`] with no overrides.
pub fn default_table() -> ElementNode {
    build_table(no_pairs(), no_pairs())
}

fn no_pairs() -> Vec<(String, String)> {
    Vec::new()
}

pub fn build_rows<I>(children: I) -> ElementNode
where
    I: IntoIterator,
    I::Item: Into<DomNode>,
{
    default_table().children(children)
}

/// `<tr><td>child</td></tr>`
pub fn row(child: impl Into<DomNode>) -> ElementNode {
    ElementNode::new("tr").child(ElementNode::new("td").child(child))
}

/// A fixed-height empty row used as vertical spacing.
pub fn build_row_padding(height: impl Into<StyleValue>) -> ElementNode {
    let height: StyleValue = height.into();
    ElementNode::new("tr").child(
        ElementNode::new("td")
            .attr("height", height)
            .style("font-size", "0px")
            .use_whitespace(false)
            .text("&nbsp;"),
    )
}

/// A `<td>`. A width with no children yields an empty spacer cell.
pub fn build_column(column: Column, children: Vec<DomNode>) -> ElementNode {
    match column {
        Column::Attrs(attrs) => ElementNode::new("td").attrs(attrs).children(children),
        Column::Width(width) if children.is_empty() => ElementNode::new("td")
            .attr("width", width)
            .style("font-size", "0px")
            .use_whitespace(false)
            .text("&nbsp;"),
        Column::Width(width) => ElementNode::new("td").attr("width", width).children(children),
    }
}

/// Surround `children` with spacer rows and columns.
pub fn build_padded<I>(padding: &Padding, children: I) -> NodeCollection
where
    I: IntoIterator,
    I::Item: Into<DomNode>,
{
    let padded_table = || {
        ElementNode::new("table")
            .attrs(TABLE_ATTRS)
            .styles(PADDED_TABLE_STYLES)
    };
    NodeCollection::new()
        .child(build_row_padding(padding.top.clone()))
        .child(
            ElementNode::new("tr").child(
                ElementNode::new("td").child(
                    padded_table().child(
                        ElementNode::new("tr")
                            .child(build_column(Column::Width(padding.left.clone()), Vec::new()))
                            .child(
                                build_column(Column::Attrs(Vec::new()), Vec::new())
                                    .child(padded_table().children(children)),
                            )
                            .child(build_column(Column::Width(padding.right.clone()), Vec::new())),
                    ),
                ),
            ),
        )
        .child(build_row_padding(padding.bottom.clone()))
}

/// A row holding text (or any node) in a single cell.
pub fn build_text_row(content: impl Into<DomNode>, attrs: AttrList) -> ElementNode {
    ElementNode::new("tr").child(ElementNode::new("td").attrs(attrs).child(content))
}

/// One row per paragraph with a spacer row of `margin_height` between them.
pub fn build_text_rows<S: Into<String>>(
    paragraphs: Vec<S>,
    attrs: AttrList,
    margin_height: impl Into<StyleValue>,
) -> Vec<ElementNode> {
    let margin: StyleValue = margin_height.into();
    let mut rows = Vec::new();
    for (i, paragraph) in paragraphs.into_iter().enumerate() {
        if i != 0 {
            rows.push(build_row_padding(margin.clone()));
        }
        rows.push(build_text_row(DomNode::text(paragraph), attrs.clone()));
    }
    rows
}

pub fn build_link(text: impl Into<String>, href: impl fmt::Display) -> ElementNode {
    ElementNode::new("a")
        .attrs([("href", href.to_string()), ("target", "_blank".to_string())])
        .text(text)
        .use_whitespace(false)
}

/// A rendered [`ButtonConfig`] inside a `nowrap` text row.
pub fn build_button(
    text: impl Into<String>,
    href: impl Into<String>,
    button_styles: StyleMap,
    text_styles: StyleMap,
) -> Result<ElementNode> {
    let button = ButtonConfig::new()
        .text(text)
        .href(href)
        .button_styles(button_styles)
        .text_styles(text_styles)
        .to_dom()?;
    Ok(ElementNode::new("tr").child(ElementNode::new("td").flag("nowrap").child(button)))
}

pub fn build_img(src: &str, alt: Option<&str>, attrs: AttrList) -> SelfClosingNode {
    SelfClosingNode::new("img")
        .attr("src", src)
        .attr_opt("alt", alt)
        .attrs(attrs)
}

pub fn build_img_link(src: &str, alt: Option<&str>, href: &str, img_attrs: AttrList) -> ElementNode {
    ElementNode::new("a")
        .attrs([("href", href), ("target", "_blank")])
        .child(build_img(src, alt, img_attrs))
}

/// Build an `<img/>`, wrapped in a link when the image carries an `href`.
/// Images with alt text get a web-safe font so the alt renders legibly when
/// images are blocked.
pub fn img(spec: ImageSpec) -> DomNode {
    let (attrs, href): (AttrList, Option<String>) = match spec {
        ImageSpec::Src { src, alt, href } => (
            vec![
                ("src".to_string(), src),
                ("alt".to_string(), alt.unwrap_or_default()),
            ],
            href,
        ),
        ImageSpec::Attrs(list) => {
            let mut href = None;
            let attrs = list
                .into_iter()
                .filter_map(|(k, v)| {
                    if k == "href" {
                        href = Some(v);
                        None
                    } else {
                        Some((k, v))
                    }
                })
                .collect();
            (attrs, href)
        }
    };
    let has_alt = attrs.iter().any(|(k, v)| k == "alt" && !v.is_empty());

    let mut image = SelfClosingNode::new("img").attrs(attrs);
    if has_alt {
        image.set_style("font-family", IMG_ALT_FONT);
    }
    match href {
        Some(href) if !href.is_empty() => build_link_around(image, &href).into(),
        _ => image.into(),
    }
}

fn build_link_around(child: impl Into<DomNode>, href: &str) -> ElementNode {
    ElementNode::new("a")
        .attrs([("href", href), ("target", "_blank")])
        .child(child)
}
