//! Pipeline – turns an [`EmailConfig`] into an [`HtmlEmail`] and then into a
//! markup string in a single call.

use crate::button::ButtonConfig;
use crate::config::{Block, EmailConfig};
use crate::dom::DomNode;
use crate::email::{ColumnCell, HtmlEmail};
use crate::error::{MarkupError, Result};
use crate::layout::{
    build_link, build_row_padding, build_rows, build_text_row, build_text_rows, AttrList, Padding,
};

/// Build the email tree described by `config`.
///
/// Fails on the first block that cannot be rendered; nothing is returned for
/// the blocks before it.
pub fn build_email(config: &EmailConfig) -> Result<HtmlEmail> {
    let mut email = HtmlEmail::new(config.container.clone());
    for block in &config.blocks {
        apply_block(&mut email, block)?;
    }
    log::debug!("built email with {} blocks", config.blocks.len());
    Ok(email)
}

/// Full pipeline: config → markup.
pub fn generate_email(config: &EmailConfig) -> Result<String> {
    Ok(build_email(config)?.to_html())
}

/// Convenience: parse a JSON config and render it.
pub fn generate_email_from_json(json: &str) -> Result<String> {
    generate_email(&EmailConfig::from_json(json)?)
}

/// Render a single button fragment.
pub fn generate_button(config: &ButtonConfig) -> Result<String> {
    Ok(config.to_dom()?.to_html())
}

fn attr_list<'a>(attrs: impl IntoIterator<Item = (&'a String, &'a String)>) -> AttrList {
    attrs
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn nested_rows(email: &HtmlEmail, blocks: &[Block]) -> Result<Vec<DomNode>> {
    let mut inner = email.nested();
    for block in blocks {
        apply_block(&mut inner, block)?;
    }
    Ok(vec![inner.into_rows().into()])
}

fn apply_block(email: &mut HtmlEmail, block: &Block) -> Result<()> {
    match block {
        Block::Text { text, attrs } => {
            email.add([build_text_row(text.as_str(), attr_list(attrs))]);
        }
        Block::Paragraphs {
            paragraphs,
            attrs,
            margin,
        } => {
            email.add(build_text_rows(
                paragraphs.clone(),
                attr_list(attrs),
                margin.clone(),
            ));
        }
        Block::Button(button) => {
            email.add_button(button)?;
        }
        Block::Image { src, alt, href } => {
            email.add_img_row(src, alt.as_deref(), href.as_deref());
        }
        Block::Spacer { height } => {
            email.add([build_row_padding(height.clone())]);
        }
        Block::Link { text, href } => {
            email.add_row(build_link(text.as_str(), href));
        }
        Block::Padded { padding, blocks } => {
            let padding = Padding::from_shorthand(padding).ok_or_else(|| {
                MarkupError::Config("padded block needs at least one padding value".to_string())
            })?;
            let rows = nested_rows(email, blocks)?;
            email.add_padded(&padding, rows);
        }
        Block::Columns { columns } => {
            let mut cells = Vec::with_capacity(columns.len());
            for column in columns {
                let rows = nested_rows(email, &column.blocks)?;
                cells.push(ColumnCell::Cell(
                    attr_list(&column.attrs),
                    vec![build_rows(rows).into()],
                ));
            }
            email.add_columns(cells);
        }
        Block::TrackingPixels { srcs } => {
            email.add_tracking_pixels(srcs.as_slice());
        }
    }
    Ok(())
}
