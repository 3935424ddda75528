//! Style AST: Declaration and DeclarationValue.

/// A value token within a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationValue {
    /// An identifier like `fill`, `auto`, `left`, `bold`, `true`.
    Ident(String),
    /// An integer pixel value like `10` or `10px`.
    Number(i32),
    /// Hex color digits without the `#` prefix, e.g. `"ff00aa"`.
    Color(String),
}

impl DeclarationValue {
    /// The identifier text, if this is an identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            DeclarationValue::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A single `key: value...` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-cased property name, e.g. `"margin"`.
    pub property: String,
    /// One or more values in source order.
    pub values: Vec<DeclarationValue>,
    /// Byte offset of the property name in the style text.
    pub position: usize,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: impl Into<String>, values: Vec<DeclarationValue>, position: usize) -> Self {
        Self {
            property: property.into(),
            values,
            position,
        }
    }
}
