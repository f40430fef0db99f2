//! Intermediate Representation (IR)
//!
//! Language-agnostic model of the classes and enums declared in a `.gen` file.
//! Serializers read it; only the parser builds it. Names are fixed at
//! creation and entries can only be appended.

use serde::Serialize;

use crate::error::ModelError;
use crate::grammar::{first_char_lower, is_name_unique};

/// A named, typed field of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataMember {
    pub name: String,
    /// Raw type expression as written in the source (e.g. `int`, `list<Bla>`)
    pub declared_type: String,
}

/// A named, integer-valued case of an enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    name: String,
    members: Vec<DataMember>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order
    pub fn members(&self) -> &[DataMember] {
        &self.members
    }

    /// Append a member. The name is stored lower camel case and must not
    /// collide with an existing member.
    pub fn add_member(&mut self, name: &str, declared_type: &str) -> Result<(), ModelError> {
        let name = first_char_lower(name);

        if !is_name_unique(self.members.iter().map(|m| m.name.as_str()), &name) {
            return Err(ModelError::DuplicateName {
                owner: self.name.clone(),
                name,
            });
        }

        self.members.push(DataMember {
            name,
            declared_type: declared_type.to_string(),
        });

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    name: String,
    values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in declaration order
    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    /// Append a value parsed from decimal text.
    pub fn add_value(&mut self, name: &str, literal: &str) -> Result<(), ModelError> {
        let value = literal
            .parse::<i64>()
            .map_err(|source| ModelError::InvalidEnumValue {
                name: name.to_string(),
                value: literal.to_string(),
                source,
            })?;

        let name = first_char_lower(name);

        if !is_name_unique(self.values.iter().map(|v| v.name.as_str()), &name) {
            return Err(ModelError::DuplicateName {
                owner: self.name.clone(),
                name,
            });
        }

        self.values.push(EnumValue { name, value });

        Ok(())
    }
}

/// Kind of declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MiddlewareKind {
    Class,
    Enum,
}

impl MiddlewareKind {
    /// The DSL keyword introducing this kind of declaration
    pub fn keyword(self) -> &'static str {
        match self {
            MiddlewareKind::Class => "class",
            MiddlewareKind::Enum => "enum",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(MiddlewareKind::Class),
            "enum" => Some(MiddlewareKind::Enum),
            _ => None,
        }
    }
}

/// One parsed declaration: a class or an enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Middleware {
    Class(Class),
    Enum(Enum),
}

impl Middleware {
    pub fn new(kind: MiddlewareKind, name: impl Into<String>) -> Self {
        match kind {
            MiddlewareKind::Class => Middleware::Class(Class::new(name)),
            MiddlewareKind::Enum => Middleware::Enum(Enum::new(name)),
        }
    }

    pub fn kind(&self) -> MiddlewareKind {
        match self {
            Middleware::Class(_) => MiddlewareKind::Class,
            Middleware::Enum(_) => MiddlewareKind::Enum,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Middleware::Class(class) => class.name(),
            Middleware::Enum(e) => e.name(),
        }
    }

    /// Number of members or values
    pub fn len(&self) -> usize {
        match self {
            Middleware::Class(class) => class.members().len(),
            Middleware::Enum(e) => e.values().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a body entry: a member type for classes, an integer literal for enums.
    pub fn add_value(&mut self, name: &str, value: &str) -> Result<(), ModelError> {
        match self {
            Middleware::Class(class) => class.add_member(name, value),
            Middleware::Enum(e) => e.add_value(name, value),
        }
    }
}
