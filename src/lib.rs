//! # mail-forge – HTML email markup with Outlook fallbacks
//!
//! Builds email markup that renders in standards-based clients and in
//! Outlook's Word engine, which needs VML guarded by conditional comments.
//!
//! 1. **Nodes** – build a markup tree with ordered attributes and styles ([`dom`], [`attrs`])
//! 2. **Button** – render a cross-client VML + anchor button ([`button`])
//! 3. **Layout** – presentation tables, spacers, images, links ([`layout`])
//! 4. **Email** – collect rows and wrap them in a container ([`email`], [`container`])
//! 5. **Pipeline** – JSON config → markup string ([`config`], [`pipeline`])

pub mod attrs;
pub mod button;
pub mod config;
pub mod container;
pub mod dom;
pub mod email;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod style;
pub mod templates;

// Re-exports for convenience
pub use button::{render_button, ButtonConfig};
pub use dom::{serialize, Attributed, ConditionalComment, DomNode, ElementNode, NodeCollection, Parent, SelfClosingNode};
pub use error::{MarkupError, Result};
pub use pipeline::{generate_email, generate_email_from_json};
pub use style::{hex_to_rgba, styles_to_string, to_unit, StyleMap, StyleValue};
