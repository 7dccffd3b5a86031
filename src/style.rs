//! Style values and the small CSS helpers every markup producer shares:
//! unit normalisation, hex → rgba conversion and `key:value;` serialisation.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from CSS property to configured value.
pub type StyleMap = IndexMap<String, StyleValue>;

/// A configured style value: a bare number (`53`) or a CSS string (`"53px"`,
/// `"#49a9ce"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Absent and empty values both count as "not set".
    pub fn is_empty(&self) -> bool {
        match self {
            StyleValue::Number(_) => false,
            StyleValue::Text(s) => s.is_empty(),
        }
    }

    /// False only for `NaN` and infinite numbers.
    pub fn is_finite(&self) -> bool {
        match self {
            StyleValue::Number(n) => n.is_finite(),
            StyleValue::Text(_) => true,
        }
    }

    /// Finite numeric value: the whole string when it is a number (`"1e2"`
    /// is `100`), otherwise the leading number of a length (`"4px"` is `4`).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            StyleValue::Text(s) if is_numeric(s) => s.trim().parse::<f64>().ok(),
            StyleValue::Text(s) => leading_number(s),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{n}"),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<&String> for StyleValue {
    fn from(s: &String) -> Self {
        StyleValue::Text(s.clone())
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<u32> for StyleValue {
    fn from(n: u32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<i64> for StyleValue {
    fn from(n: i64) -> Self {
        StyleValue::Number(n as f64)
    }
}

/// Build a [`StyleMap`] from `(key, value)` pairs, keeping their order.
pub fn style_map<K, V, I>(pairs: I) -> StyleMap
where
    K: Into<String>,
    V: Into<StyleValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Append `px` to purely numeric values; pass everything else through.
/// Non-finite numbers have no CSS form and yield an empty string.
///
/// `to_unit(&5.into())` → `"5px"`, `to_unit(&"50%".into())` → `"50%"`.
pub fn to_unit(value: &StyleValue) -> String {
    match value {
        StyleValue::Number(n) if n.is_finite() => format!("{n}px"),
        StyleValue::Number(n) => {
            log::warn!("dropping non-finite length {n}");
            String::new()
        }
        StyleValue::Text(s) if is_numeric(s) => format!("{}px", s.trim()),
        StyleValue::Text(s) => s.clone(),
    }
}

/// True for strings such as `"53"`, `"-1.5"` or `"1e3"`; false for `"53px"`,
/// `"inf"` and the empty string.
pub fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && s.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Parse the numeric prefix of a CSS length (`"4px"` → `4.0`).
pub fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// RGBA colour (0.0 – 1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
            Some(Self { r, g, b, a: 1.0 })
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()? as f32 / 255.0;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()? as f32 / 255.0;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()? as f32 / 255.0;
            Some(Self { r, g, b, a: 1.0 })
        } else {
            None
        }
    }

    /// CSS `rgba(r,g,b,a)` with 0–255 channels.
    pub fn to_css_rgba(&self) -> String {
        let channel = |v: f32| (v * 255.0).round() as u8;
        format!(
            "rgba({},{},{},{})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a
        )
    }
}

/// Convert `#RRGGBB` / `#RGB` to `rgba(...)`. Values that do not start with
/// `#` are returned unchanged.
pub fn hex_to_rgba(value: &str) -> String {
    if !value.starts_with('#') {
        return value.to_string();
    }
    match Color::from_hex(value) {
        Some(c) => c.to_css_rgba(),
        None => {
            log::warn!("'{value}' is not a hex colour; passing it through");
            value.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// Serialise declarations as `k1:v1;k2:v2;` in iteration order.
pub fn styles_to_string<K, V, I>(styles: I) -> String
where
    K: fmt::Display,
    V: fmt::Display,
    I: IntoIterator<Item = (K, V)>,
{
    styles
        .into_iter()
        .map(|(k, v)| format!("{k}:{v};"))
        .collect()
}

/// Split an inline style string into ordered `(property, value)` pairs.
/// Declarations without a `:` are dropped.
pub fn parse_declarations(style_str: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for decl in style_str.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        let mut parts = decl.splitn(2, ':');
        let prop = match parts.next() {
            Some(p) => p.trim(),
            None => continue,
        };
        let val = match parts.next() {
            Some(v) => v.trim(),
            None => continue,
        };
        out.push((prop.to_string(), val.to_string()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_appended_to_numbers_only() {
        assert_eq!(to_unit(&5.into()), "5px");
        assert_eq!(to_unit(&"53".into()), "53px");
        assert_eq!(to_unit(&"50%".into()), "50%");
        assert_eq!(to_unit(&"4px".into()), "4px");
        assert_eq!(to_unit(&1.5.into()), "1.5px");
        assert_eq!(to_unit(&" 53 ".into()), "53px");
        assert_eq!(to_unit(&f64::NAN.into()), "");
        assert_eq!(to_unit(&f64::INFINITY.into()), "");
    }

    #[test]
    fn numbers_read_whole_string_before_leading_prefix() {
        assert_eq!(StyleValue::from("1e2").as_number(), Some(100.0));
        assert_eq!(StyleValue::from(" 40 ").as_number(), Some(40.0));
        assert_eq!(StyleValue::from("20px").as_number(), Some(20.0));
        assert_eq!(StyleValue::from(f64::NAN).as_number(), None);
        assert!(!StyleValue::from(f64::NEG_INFINITY).is_finite());
        assert!(StyleValue::from("auto").is_finite());
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric("200"));
        assert!(is_numeric("-3.5"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12px"));
    }

    #[test]
    fn leading_number_of_lengths() {
        assert_eq!(leading_number("4px"), Some(4.0));
        assert_eq!(leading_number("53"), Some(53.0));
        assert_eq!(leading_number("2.5em"), Some(2.5));
        assert_eq!(leading_number("auto"), None);
    }

    #[test]
    fn color_from_hex() {
        let c = Color::from_hex("#ff0000").unwrap();
        assert!((c.r - 1.0).abs() < 0.01);
        assert!(c.g.abs() < 0.01);
        assert!(Color::from_hex("#zzzzzz").is_none());
    }

    #[test]
    fn hex_converted_others_passed_through() {
        assert_eq!(hex_to_rgba("#49a9ce"), "rgba(73,169,206,1)");
        assert_eq!(hex_to_rgba("#fff"), "rgba(255,255,255,1)");
        assert_eq!(hex_to_rgba("red"), "red");
        assert_eq!(hex_to_rgba("#nothex"), "#nothex");
    }

    #[test]
    fn declarations_round_trip_through_string() {
        let decls = parse_declarations("font-size:0px; color : #fff;;bogus");
        assert_eq!(
            decls,
            vec![
                ("font-size".to_string(), "0px".to_string()),
                ("color".to_string(), "#fff".to_string()),
            ]
        );
        assert_eq!(styles_to_string(decls), "font-size:0px;color:#fff;");
    }

    #[test]
    fn style_value_display_drops_fraction() {
        assert_eq!(StyleValue::from(53).to_string(), "53");
        assert_eq!(StyleValue::from("13px").to_string(), "13px");
        assert!(StyleValue::from("").is_empty());
    }
}
