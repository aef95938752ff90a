//! Column types and fields
//!
//! Supported types:
//! - int: 32-bit signed integer, 4 bytes
//! - string: fixed-width string, length prefix plus padded payload

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::DescError;
use crate::config::TypeLayout;

/// Column type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// 32-bit signed integer
    Int,
    /// Fixed-width string
    String,
}

impl Type {
    /// Fixed byte length under the default layout
    pub fn byte_len(&self) -> usize {
        self.byte_len_with(&TypeLayout::default())
    }

    /// Fixed byte length under `layout`
    pub fn byte_len_with(&self, layout: &TypeLayout) -> usize {
        match self {
            Type::Int => layout.int_len,
            Type::String => layout.string_len,
        }
    }

    /// Returns the type name used in rendering and parsing
    pub fn type_name(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::String => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FromStr for Type {
    type Err = DescError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "int" => Ok(Type::Int),
            "string" => Ok(Type::String),
            other => Err(DescError::InvalidConfig(format!("unknown type '{}'", other))),
        }
    }
}

/// One (type, name) entry of a tuple descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    field_type: Type,
    name: Option<String>,
}

impl Field {
    pub fn new(field_type: Type, name: Option<String>) -> Self {
        Self { field_type, name }
    }

    /// Create a named field
    pub fn named(field_type: Type, name: impl Into<String>) -> Self {
        Self::new(field_type, Some(name.into()))
    }

    /// Create an unnamed field
    pub fn anonymous(field_type: Type) -> Self {
        Self::new(field_type, None)
    }

    pub fn field_type(&self) -> Type {
        self.field_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<(Type, &str)> for Field {
    fn from((field_type, name): (Type, &str)) -> Self {
        Field::named(field_type, name)
    }
}

impl From<(Type, String)> for Field {
    fn from((field_type, name): (Type, String)) -> Self {
        Field::named(field_type, name)
    }
}

impl From<(Type, Option<String>)> for Field {
    fn from((field_type, name): (Type, Option<String>)) -> Self {
        Field::new(field_type, name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name().unwrap_or("null"), self.field_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lengths() {
        assert_eq!(Type::Int.byte_len(), 4);
        assert_eq!(Type::String.byte_len(), 132);
    }

    #[test]
    fn test_byte_len_with_layout() {
        let layout = TypeLayout {
            int_len: 8,
            string_len: 20,
        };
        assert_eq!(Type::Int.byte_len_with(&layout), 8);
        assert_eq!(Type::String.byte_len_with(&layout), 20);
    }

    #[test]
    fn test_parse_type_names() {
        assert_eq!("int".parse::<Type>().unwrap(), Type::Int);
        assert_eq!("STRING".parse::<Type>().unwrap(), Type::String);

        let err = "float".parse::<Type>().unwrap_err();
        assert_eq!(err.code(), "TD_INVALID_CONFIG");
    }

    #[test]
    fn test_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Type::Int).unwrap(), "\"int\"");
        let t: Type = serde_json::from_str("\"string\"").unwrap();
        assert_eq!(t, Type::String);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::named(Type::Int, "id").to_string(), "id(int)");
        assert_eq!(Field::anonymous(Type::String).to_string(), "null(string)");
    }

    #[test]
    fn test_field_from_pair() {
        let field: Field = (Type::Int, "id").into();
        assert_eq!(field.name(), Some("id"));
        assert_eq!(field.field_type(), Type::Int);

        let field: Field = (Type::String, None).into();
        assert_eq!(field.name(), None);
    }
}
