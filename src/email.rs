//! Email body builder: collects rows and wraps them in the [`Container`].

use crate::button::ButtonConfig;
use crate::container::{Container, ContainerConfig};
use crate::dom::{Attributed, DomNode, ElementNode, NodeCollection, Parent};
use crate::error::Result;
use crate::layout::{
    build_img, build_img_link, build_padded, default_table, img, row, AttrList, ImageSpec,
    Padding,
};

/// One cell of [`HtmlEmail::add_columns`]: a `<td>` built from attributes
/// and children, or a ready-made node (usually a `<td>` already).
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnCell {
    Cell(AttrList, Vec<DomNode>),
    Node(DomNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlEmail {
    container: Container,
    body: NodeCollection,
}

impl HtmlEmail {
    pub fn new(container: Option<ContainerConfig>) -> Self {
        Self {
            container: Container::new(container),
            body: NodeCollection::new(),
        }
    }

    /// An empty body sharing this email's container settings, for building
    /// rows that end up nested inside another block.
    pub fn nested(&self) -> Self {
        Self {
            container: self.container.clone(),
            body: NodeCollection::new(),
        }
    }

    /// The collected rows, without container markup.
    pub fn into_rows(self) -> NodeCollection {
        self.body
    }

    pub fn add<I>(&mut self, children: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<DomNode>,
    {
        self.body.add_children(children);
        self
    }

    pub fn add_row(&mut self, child: impl Into<DomNode>) -> &mut Self {
        self.add([row(child)])
    }

    /// Full-width image row, linked when `href` is given.
    pub fn add_img_row(&mut self, src: &str, alt: Option<&str>, href: Option<&str>) -> &mut Self {
        let img_attrs: AttrList = vec![
            ("style".to_string(), "display:block".to_string()),
            ("width".to_string(), self.container.width().to_string()),
            ("class".to_string(), "w-100p".to_string()),
        ];
        let node: DomNode = match href {
            Some(href) => build_img_link(src, alt, href, img_attrs).into(),
            None => build_img(src, alt, img_attrs).into(),
        };
        self.add_row(node)
    }

    /// A row holding a nested table with one cell per column.
    pub fn add_columns(&mut self, columns: Vec<ColumnCell>) -> &mut Self {
        let cells = columns.into_iter().map(|c| -> DomNode {
            match c {
                ColumnCell::Cell(attrs, children) => {
                    ElementNode::new("td").attrs(attrs).children(children).into()
                }
                ColumnCell::Node(node) => node,
            }
        });
        let nested = default_table().child(ElementNode::new("tr").children(cells));
        self.add([ElementNode::new("tr").child(ElementNode::new("td").child(nested))])
    }

    /// 1×1 tracking images in a single row.
    pub fn add_tracking_pixels<S: AsRef<str>>(&mut self, srcs: &[S]) -> &mut Self {
        let pixels = srcs.iter().map(|src| {
            img(ImageSpec::Attrs(vec![
                ("src".to_string(), src.as_ref().to_string()),
                ("height".to_string(), "1".to_string()),
                ("width".to_string(), "1".to_string()),
            ]))
        });
        self.add([ElementNode::new("tr").child(ElementNode::new("td").children(pixels))])
    }

    pub fn add_padded(&mut self, padding: &Padding, children: Vec<DomNode>) -> &mut Self {
        self.add([build_padded(padding, children)])
    }

    /// Render `button` into its own row.
    pub fn add_button(&mut self, button: &ButtonConfig) -> Result<&mut Self> {
        let node = button.to_dom()?;
        Ok(self.add([ElementNode::new("tr").child(ElementNode::new("td").flag("nowrap").child(node))]))
    }

    /// A table of rows without any container markup.
    pub fn rows_table(&self) -> ElementNode {
        default_table().child(self.body.clone())
    }

    pub fn to_dom(&self) -> DomNode {
        NodeCollection::new()
            .children(self.container.wrap(self.body.clone()))
            .into()
    }

    pub fn to_html(&self) -> String {
        self.to_dom().to_html()
    }
}
