//! Type-expression and naming helpers
//!
//! Member types in a `.gen` file are plain strings: a primitive name, a bare
//! identifier naming another declared type, `list<T>` or `map<K,V>`. Detection
//! is substring based, so `bulletlist<int>` is read as a list as well. All of
//! the string handling lives here so serializers only ever see [`TypeExpr`].

/// Element type of a `list<T>` expression.
///
/// Matches whenever `list` occurs anywhere in the expression.
pub fn is_list(type_expr: &str) -> Option<String> {
    if !type_expr.contains("list") {
        return None;
    }

    let replaced = type_expr.replace(['<', '>'], " ");
    replaced.split_whitespace().nth(1).map(String::from)
}

/// Key and value types of a `map<K,V>` expression.
///
/// Matches whenever `map` occurs anywhere in the expression and the type
/// parameters split into exactly two parts on `,`.
pub fn is_map(type_expr: &str) -> Option<(String, String)> {
    if !type_expr.contains("map") {
        return None;
    }

    let replaced = type_expr.replace(['<', '>'], " ");
    let params = replaced.split_whitespace().nth(1)?;

    let mut parts = params.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key.to_string(), value.to_string())),
        _ => None,
    }
}

/// Upper-case the first character.
pub fn first_char_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first character.
pub fn first_char_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

pub fn is_name_unique<'a, I>(existing: I, candidate: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    !existing.into_iter().any(|name| name == candidate)
}

/// A member type expression, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr<'a> {
    /// `list<T>`
    List(String),
    /// `map<K,V>`
    Map(String, String),
    /// A primitive or a reference to another declared type.
    Named(&'a str),
}

impl<'a> TypeExpr<'a> {
    /// Classify a declared type. Lists are checked before maps.
    pub fn parse(type_expr: &'a str) -> Self {
        if let Some(element) = is_list(type_expr) {
            return TypeExpr::List(element);
        }
        if let Some((key, value)) = is_map(type_expr) {
            return TypeExpr::Map(key, value);
        }
        TypeExpr::Named(type_expr)
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, TypeExpr::Named(_))
    }

    /// The type names this expression mentions, element types first.
    pub fn referenced_names(&self) -> Vec<&str> {
        match self {
            TypeExpr::List(element) => vec![element.as_str()],
            TypeExpr::Map(key, value) => vec![key.as_str(), value.as_str()],
            TypeExpr::Named(name) => vec![*name],
        }
    }
}
