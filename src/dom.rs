//! Node tree builder – the object model every markup producer composes.
//!
//! Supported node kinds:
//! - Element: `<tag ...>children</tag>`
//! - Self-closing element: `<tag .../>`
//! - Text: raw content, written as-is (no escaping)
//! - Conditional comment: `<!--[if expr]>children<![endif]-->`
//! - Collection: children concatenated without a wrapper
//!
//! Nodes are built fluently (`ElementNode::new("a").attr("href", url)`) and
//! own their children outright. `Clone` is a deep copy, so one logical element
//! can be placed in two locations without the copies sharing attributes.

use std::fmt::{self, Write as _};

use crate::attrs::Attributes;
use crate::error::{MarkupError, Result};

// ---------------------------------------------------------------------------
// DOM types
// ---------------------------------------------------------------------------

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(ElementNode),
    SelfClosing(SelfClosingNode),
    Text(String),
    Conditional(ConditionalComment),
    Collection(NodeCollection),
}

/// An element node carrying tag, attributes, and children.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    tag: String,
    attributes: Attributes,
    children: Vec<DomNode>,
    use_whitespace: bool,
}

/// A void element such as `<img/>` or `<w:anchorlock/>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfClosingNode {
    tag: String,
    attributes: Attributes,
}

/// Children only seen by clients matching `expr` (`mso`, `!mso`, `mso | IE`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalComment {
    expr: String,
    children: Vec<DomNode>,
    use_whitespace: bool,
}

/// A wrapper-less list of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCollection {
    children: Vec<DomNode>,
    use_whitespace: bool,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
            use_whitespace: true,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl SelfClosingNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl ConditionalComment {
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            children: Vec::new(),
            use_whitespace: true,
        }
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }
}

impl NodeCollection {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            use_whitespace: true,
        }
    }
}

impl Default for NodeCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl DomNode {
    pub fn text(content: impl Into<String>) -> Self {
        DomNode::Text(content.into())
    }

    /// Attributes of element-like nodes; `None` for text, comments and
    /// collections.
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            DomNode::Element(e) => Some(&e.attributes),
            DomNode::SelfClosing(e) => Some(&e.attributes),
            _ => None,
        }
    }

    pub fn attributes_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            DomNode::Element(e) => Some(&mut e.attributes),
            DomNode::SelfClosing(e) => Some(&mut e.attributes),
            _ => None,
        }
    }

    pub fn children(&self) -> &[DomNode] {
        match self {
            DomNode::Element(e) => &e.children,
            DomNode::Conditional(c) => &c.children,
            DomNode::Collection(c) => &c.children,
            DomNode::SelfClosing(_) | DomNode::Text(_) => &[],
        }
    }

    /// Tag name of element nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            DomNode::Element(e) => Some(&e.tag),
            DomNode::SelfClosing(e) => Some(&e.tag),
            _ => None,
        }
    }

    /// Append `child`; fails with [`MarkupError::InvalidChild`] on leaf nodes.
    pub fn add_child(&mut self, child: impl Into<DomNode>) -> Result<&mut Self> {
        match self {
            DomNode::Element(e) => e.children.push(child.into()),
            DomNode::Conditional(c) => c.children.push(child.into()),
            DomNode::Collection(c) => c.children.push(child.into()),
            DomNode::SelfClosing(e) => return Err(MarkupError::invalid_child(e.tag.clone())),
            DomNode::Text(_) => return Err(MarkupError::invalid_child("#text")),
        }
        Ok(self)
    }

    pub fn add_children<I>(&mut self, children: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<DomNode>,
    {
        for child in children {
            self.add_child(child)?;
        }
        Ok(self)
    }

    /// Serialise to a markup string.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

// ---------------------------------------------------------------------------
// Fluent configuration
// ---------------------------------------------------------------------------

/// Attribute and inline-style configuration with last-writer-wins merges.
///
/// The by-value methods return the node for chaining; the `set_*`/`merge_*`
/// methods mutate in place.
pub trait Attributed: Sized {
    fn attributes(&self) -> &Attributes;
    fn attributes_mut(&mut self) -> &mut Attributes;

    fn attr(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.attributes_mut().set(key, value);
        self
    }

    fn attr_opt<V: fmt::Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.attributes_mut().set_opt(key, value);
        self
    }

    fn flag(mut self, key: impl Into<String>) -> Self {
        self.attributes_mut().set_flag(key);
        self
    }

    fn attrs<K, V, I>(mut self, source: I) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
        I: IntoIterator<Item = (K, V)>,
    {
        self.attributes_mut().merge(source);
        self
    }

    fn style(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.attributes_mut().set_style(key, value);
        self
    }

    fn styles<K, V, I>(mut self, source: I) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
        I: IntoIterator<Item = (K, V)>,
    {
        self.attributes_mut().merge_styles(source);
        self
    }

    fn set_attr(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.attributes_mut().set(key, value);
        self
    }

    fn merge_attrs<K, V, I>(&mut self, source: I) -> &mut Self
    where
        K: Into<String>,
        V: fmt::Display,
        I: IntoIterator<Item = (K, V)>,
    {
        self.attributes_mut().merge(source);
        self
    }

    fn set_style(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.attributes_mut().set_style(key, value);
        self
    }

    fn merge_styles<K, V, I>(&mut self, source: I) -> &mut Self
    where
        K: Into<String>,
        V: fmt::Display,
        I: IntoIterator<Item = (K, V)>,
    {
        self.attributes_mut().merge_styles(source);
        self
    }
}

/// Child composition for nodes that can hold children.
pub trait Parent: Sized {
    fn child_nodes_mut(&mut self) -> &mut Vec<DomNode>;
    fn set_whitespace(&mut self, on: bool);

    fn add_child(&mut self, child: impl Into<DomNode>) -> &mut Self {
        self.child_nodes_mut().push(child.into());
        self
    }

    fn add_children<I>(&mut self, children: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<DomNode>,
    {
        self.child_nodes_mut()
            .extend(children.into_iter().map(Into::into));
        self
    }

    fn child(mut self, child: impl Into<DomNode>) -> Self {
        self.add_child(child);
        self
    }

    fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DomNode>,
    {
        self.add_children(children);
        self
    }

    fn text(self, content: impl Into<String>) -> Self {
        self.child(DomNode::Text(content.into()))
    }

    /// Whether a newline separates sibling children when serialised.
    fn use_whitespace(mut self, on: bool) -> Self {
        self.set_whitespace(on);
        self
    }
}

impl Attributed for ElementNode {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Attributed for SelfClosingNode {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Parent for ElementNode {
    fn child_nodes_mut(&mut self) -> &mut Vec<DomNode> {
        &mut self.children
    }
    fn set_whitespace(&mut self, on: bool) {
        self.use_whitespace = on;
    }
}

impl Parent for ConditionalComment {
    fn child_nodes_mut(&mut self) -> &mut Vec<DomNode> {
        &mut self.children
    }
    fn set_whitespace(&mut self, on: bool) {
        self.use_whitespace = on;
    }
}

impl Parent for NodeCollection {
    fn child_nodes_mut(&mut self) -> &mut Vec<DomNode> {
        &mut self.children
    }
    fn set_whitespace(&mut self, on: bool) {
        self.use_whitespace = on;
    }
}

impl From<ElementNode> for DomNode {
    fn from(node: ElementNode) -> Self {
        DomNode::Element(node)
    }
}

impl From<SelfClosingNode> for DomNode {
    fn from(node: SelfClosingNode) -> Self {
        DomNode::SelfClosing(node)
    }
}

impl From<ConditionalComment> for DomNode {
    fn from(node: ConditionalComment) -> Self {
        DomNode::Conditional(node)
    }
}

impl From<NodeCollection> for DomNode {
    fn from(node: NodeCollection) -> Self {
        DomNode::Collection(node)
    }
}

impl From<String> for DomNode {
    fn from(text: String) -> Self {
        DomNode::Text(text)
    }
}

impl From<&str> for DomNode {
    fn from(text: &str) -> Self {
        DomNode::Text(text.to_string())
    }
}

// ---------------------------------------------------------------------------
// Serialisation
// ---------------------------------------------------------------------------

/// Serialise `node` to markup. Output is deterministic for a given tree.
pub fn serialize(node: &DomNode) -> String {
    node.to_string()
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[DomNode], whitespace: bool) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if whitespace && i > 0 {
            f.write_char('\n')?;
        }
        write!(f, "{child}")?;
    }
    Ok(())
}

impl fmt::Display for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomNode::Element(e) => fmt::Display::fmt(e, f),
            DomNode::SelfClosing(e) => fmt::Display::fmt(e, f),
            DomNode::Text(t) => f.write_str(t),
            DomNode::Conditional(c) => fmt::Display::fmt(c, f),
            DomNode::Collection(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl fmt::Display for ElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}{}>", self.tag, self.attributes)?;
        write_children(f, &self.children, self.use_whitespace)?;
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for SelfClosingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}{}/>", self.tag, self.attributes)
    }
}

impl fmt::Display for ConditionalComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!--[if {}]>", self.expr)?;
        write_children(f, &self.children, self.use_whitespace)?;
        f.write_str("<![endif]-->")
    }
}

impl fmt::Display for NodeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_children(f, &self.children, self.use_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_with_attributes_and_text() {
        let a = ElementNode::new("a")
            .attr("href", "http://abcd")
            .style("color", "#fff")
            .text("Go");
        assert_eq!(
            a.to_string(),
            r#"<a href="http://abcd" style="color:#fff;">Go</a>"#
        );
    }

    #[test]
    fn self_closing_and_empty_style() {
        let img = SelfClosingNode::new("img").attr("src", "x.png").styles(Vec::<(String, String)>::new());
        assert_eq!(DomNode::from(img).to_html(), r#"<img src="x.png"/>"#);
    }

    #[test]
    fn whitespace_between_siblings_only_when_enabled() {
        let spaced = ElementNode::new("tr").child(ElementNode::new("td")).child(ElementNode::new("td"));
        assert_eq!(spaced.to_string(), "<tr><td></td>\n<td></td></tr>");

        let tight = ElementNode::new("tr")
            .use_whitespace(false)
            .child(ElementNode::new("td"))
            .child(ElementNode::new("td"));
        assert_eq!(tight.to_string(), "<tr><td></td><td></td></tr>");
    }

    #[test]
    fn conditional_comment_and_collection() {
        let cc = ConditionalComment::new("mso").child(SelfClosingNode::new("w:anchorlock"));
        assert_eq!(cc.to_string(), "<!--[if mso]><w:anchorlock/><![endif]-->");

        let coll = NodeCollection::new()
            .use_whitespace(false)
            .text("a")
            .text("b");
        assert_eq!(serialize(&coll.into()), "ab");
    }

    #[test]
    fn text_is_not_escaped() {
        assert_eq!(DomNode::text("<b>&nbsp;</b>").to_html(), "<b>&nbsp;</b>");
    }

    #[test]
    fn leaf_nodes_reject_children() {
        let mut img: DomNode = SelfClosingNode::new("img").into();
        assert_eq!(
            img.add_child("x").unwrap_err(),
            MarkupError::InvalidChild {
                parent: "img".into()
            }
        );
        let mut text = DomNode::text("hi");
        assert!(text.add_child("x").is_err());

        let mut div: DomNode = ElementNode::new("div").into();
        div.add_children(["a", "b"]).unwrap();
        assert_eq!(div.children().len(), 2);
    }

    #[test]
    fn clone_is_independent() {
        let original = ElementNode::new("a").attr("href", "#").style("color", "red");
        let mut copy = original.clone();
        copy.set_attr("href", "/other").set_style("color", "blue");
        assert_eq!(original.attributes().get("href"), Some("#"));
        assert_eq!(original.attributes().style("color"), Some("red"));
        assert_eq!(copy.attributes().style("color"), Some("blue"));
    }

    #[test]
    fn clone_copies_children_deeply() {
        let original = ElementNode::new("center")
            .child(ElementNode::new("a").style("color", "red").text("Go"));
        let mut copy = original.clone();
        let anchor = copy.child_nodes_mut()[0].attributes_mut().unwrap();
        anchor.set_style("color", "blue");
        anchor.set("href", "/x");

        assert_eq!(original.to_string(), r#"<center><a style="color:red;">Go</a></center>"#);
        assert_eq!(
            copy.to_string(),
            r#"<center><a style="color:blue;" href="/x">Go</a></center>"#
        );
    }

    #[test]
    fn serialization_is_deterministic() {
        let node: DomNode = ElementNode::new("div")
            .attrs([("b", "2"), ("a", "1")])
            .styles([("z", "1"), ("y", "2")])
            .child(ConditionalComment::new("!mso").text("x"))
            .into();
        assert_eq!(node.to_html(), node.to_html());
        assert_eq!(
            node.to_html(),
            r#"<div b="2" a="1" style="z:1;y:2;"><!--[if !mso]>x<![endif]--></div>"#
        );
    }
}
