//! Parser for `.gen` model files
//!
//! Line oriented: every line has its whitespace runs collapsed and is
//! trimmed, blank lines are skipped. A declaration is `class <name>` or
//! `enum <name>`, followed by a `{` line, body lines of the form
//! `<name> <value>`, and a closing `}` line.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ir::{Middleware, MiddlewareKind};

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(class|enum) ([A-Za-z_][A-Za-z0-9_]*)$").expect("declaration pattern is valid")
});

/// Read and parse a `.gen` file
pub fn parse_file(path: &Path) -> Result<Vec<Middleware>> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("gen") {
        return Err(Error::WrongExtension(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    parse(&content)
}

enum State {
    AwaitingDeclaration,
    AwaitingOpenBrace(Middleware),
    ReadingBody(Middleware),
}

/// Parse `.gen` source text into its declarations, in source order.
///
/// A declaration still open when the input ends is dropped.
pub fn parse(content: &str) -> Result<Vec<Middleware>> {
    let mut result = Vec::new();
    let mut state = State::AwaitingDeclaration;

    for (index, raw) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = normalize_line(raw);

        if line.is_empty() {
            continue;
        }

        let syntax = |message: &'static str| Error::Syntax {
            line: line_number,
            content: raw.to_string(),
            message,
        };

        state = match state {
            State::AwaitingDeclaration => {
                State::AwaitingOpenBrace(read_declaration(&line).ok_or_else(|| {
                    syntax("expected a `class <name>` or `enum <name>` declaration")
                })?)
            }
            State::AwaitingOpenBrace(middleware) => {
                if line != "{" {
                    return Err(syntax("expected `{` after declaration"));
                }
                State::ReadingBody(middleware)
            }
            State::ReadingBody(mut middleware) => match line.as_str() {
                "}" => {
                    debug!(
                        name = middleware.name(),
                        kind = middleware.kind().keyword(),
                        entries = middleware.len(),
                        "closed declaration"
                    );
                    result.push(middleware);
                    State::AwaitingDeclaration
                }
                "{" => return Err(syntax("unexpected `{` inside a declaration body")),
                _ => {
                    let (name, value) = split_pair(&line)
                        .ok_or_else(|| syntax("expected `<name> <value>` body line"))?;

                    middleware
                        .add_value(name, value)
                        .map_err(|source| Error::Member {
                            line: line_number,
                            content: raw.to_string(),
                            source,
                        })?;

                    State::ReadingBody(middleware)
                }
            },
        };
    }

    match state {
        State::AwaitingDeclaration => {}
        State::AwaitingOpenBrace(middleware) | State::ReadingBody(middleware) => {
            warn!(
                name = middleware.name(),
                kind = middleware.kind().keyword(),
                "input ended inside an unterminated declaration, discarding it"
            );
        }
    }

    Ok(result)
}

/// Collapse whitespace runs to one space and trim.
fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn read_declaration(line: &str) -> Option<Middleware> {
    let captures = DECLARATION.captures(line)?;
    let kind = MiddlewareKind::from_keyword(&captures[1])?;

    Some(Middleware::new(kind, &captures[2]))
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split(' ');
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(value), None) => Some((name, value)),
        _ => None,
    }
}
