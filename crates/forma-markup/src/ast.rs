// ── Value ─────────────────────────────────────────────────────────────────

/// A literal value in a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string: `"hello"`
    Str(String),
    /// Numeric literal: `16`, `-2.5`
    Number(f64),
    /// Color literal `#rrggbb` / `#rrggbbaa`, straight-alpha bytes.
    Color([u8; 4]),
    /// Unquoted identifier: `true`, `email`, `decimal`
    Ident(String),
}

impl Value {
    /// The text an attribute would carry for this value.
    ///
    /// Colors render as `#rrggbbaa`; numbers in their shortest decimal form.
    pub fn to_attribute_text(&self) -> String {
        match self {
            Value::Str(s) | Value::Ident(s) => s.clone(),
            Value::Number(n) => format!("{n}"),
            Value::Color([r, g, b, a]) => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

// ── Prop ──────────────────────────────────────────────────────────────────

/// A single `key: value` property inside a widget block.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub key: String,
    pub value: Value,
    /// 1-based line of the key, for diagnostics.
    pub line: usize,
}

// ── Node ──────────────────────────────────────────────────────────────────

/// A widget node.
///
/// ```fml
/// InputNumber "amount" {
///     min: 0
///     max: 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Widget type name: `"Form"`, `"InputText"`, ...
    pub widget: String,
    /// Optional inline string, used as the widget's name.
    pub content: Option<String>,
    pub props: Vec<Prop>,
    pub children: Vec<Node>,
    /// 1-based line of the widget name.
    pub line: usize,
}

impl Node {
    /// Look up a property value by key. The last occurrence wins.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.iter().rev().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Get a property as `f64` if it is a `Number`.
    pub fn prop_f64(&self, key: &str) -> Option<f64> {
        match self.prop(key)? {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a property as `&str` if it is a `Str` or `Ident`.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            Value::Str(s) | Value::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get a property as straight-alpha bytes if it is a `Color`.
    pub fn prop_color(&self, key: &str) -> Option<[u8; 4]> {
        match self.prop(key)? {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }
}

// ── Document ──────────────────────────────────────────────────────────────

/// The top-level parse result for a `.fml` source.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Node,
}
