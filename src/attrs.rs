//! Ordered attribute storage for element nodes.
//!
//! Attributes serialise in insertion order. `style` is reserved: it is kept
//! as its own ordered property map and written at the position where a style
//! was first set. Every setter is last-writer-wins per key, so applying the
//! same merge twice yields the same attributes.

use std::fmt;

use indexmap::IndexMap;

use crate::style::{parse_declarations, styles_to_string};

const STYLE: &str = "style";

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Value(String),
    /// Valueless attribute such as `nowrap`.
    Flag,
    /// Placeholder keeping the position of the style attribute.
    Style,
}

/// Attributes plus the reserved inline-style map of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: IndexMap<String, Slot>,
    styles: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, overwriting any previous value.
    ///
    /// Setting `style` replaces the style map with the declarations parsed
    /// from `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        let key = key.into();
        let value = value.to_string();
        if key == STYLE {
            self.styles.clear();
            self.merge_styles(parse_declarations(&value));
            return;
        }
        self.entries.insert(key, Slot::Value(value));
    }

    /// Like [`set`](Self::set), but a `None` value leaves the attributes
    /// untouched.
    pub fn set_opt<V: fmt::Display>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), Slot::Flag);
    }

    /// Apply `source` in order; later keys overwrite earlier ones and any
    /// pre-existing value.
    pub fn merge<K, V, I>(&mut self, source: I)
    where
        K: Into<String>,
        V: fmt::Display,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in source {
            self.set(k, v);
        }
    }

    pub fn set_style(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        if !self.entries.contains_key(STYLE) {
            self.entries.insert(STYLE.to_string(), Slot::Style);
        }
        self.styles.insert(key.into(), value.to_string());
    }

    pub fn merge_styles<K, V, I>(&mut self, source: I)
    where
        K: Into<String>,
        V: fmt::Display,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in source {
            self.set_style(k, v);
        }
    }

    /// Plain attribute value. Flags read as the empty string; `style` is
    /// available through [`style_string`](Self::style_string).
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            Slot::Value(v) => Some(v),
            Slot::Flag => Some(""),
            Slot::Style => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(Slot::Style) => !self.styles.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(String::as_str)
    }

    /// Serialised style map, `None` while it is empty.
    pub fn style_string(&self) -> Option<String> {
        if self.styles.is_empty() {
            None
        } else {
            Some(styles_to_string(&self.styles))
        }
    }
}

/// Writes ` key="value"` for every attribute, including the leading space.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, slot) in &self.entries {
            match slot {
                Slot::Value(v) => write!(f, " {key}=\"{v}\"")?,
                Slot::Flag => write!(f, " {key}")?,
                Slot::Style => {
                    if let Some(style) = self.style_string() {
                        write!(f, " {key}=\"{style}\"")?;
                    }
                }
            }
        }
        Ok(())
    }
}
