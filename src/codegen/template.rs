//! Template rendering
//!
//! A small mustache-like engine: `{{key}}` substitutes a scalar and
//! `{{#key}}...{{/key}}` repeats its body once per element of a list (or
//! once for `true` / an object, never for `false`, null or a missing key).
//! Inside a section, keys resolve against the current element first, then
//! the enclosing scopes.
//!
//! A section tag alone on its line is removed together with that line, so
//! templates can put sections on their own lines without leaving blanks.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;

use crate::storage::FileSystem;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unclosed tag starting at byte {0}")]
    UnclosedTag(usize),

    #[error("Empty tag at byte {0}")]
    EmptyTag(usize),

    #[error("Section '{0}' is never closed")]
    UnclosedSection(String),

    #[error("Closing tag '{found}' does not match open section '{expected}'")]
    MismatchedSection { expected: String, found: String },

    #[error("Closing tag '{0}' has no open section")]
    UnexpectedClose(String),

    #[error("No value for placeholder '{0}'")]
    MissingKey(String),

    #[error("Placeholder '{0}' is not a scalar")]
    NotScalar(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Var(String),
    Open(String),
    Close(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var(String),
    Section { name: String, body: Vec<Node> },
}

/// A parsed template, reusable across contexts
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parses template source
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let tokens = tokenize(source)?;
        let nodes = build_tree(tokens)?;
        Ok(Self { nodes })
    }

    /// Renders the template against `context`
    pub fn render(&self, context: &Value) -> Result<String, TemplateError> {
        let mut out = String::new();
        let mut scopes = vec![context];
        render_nodes(&self.nodes, &mut scopes, &mut out)?;
        Ok(out)
    }
}

/// Renders template source against `context`
pub fn render_to_string(template: &str, context: &Value) -> Result<String, TemplateError> {
    Template::parse(template)?.render(context)
}

/// Renders `template` against `context` and writes it to `output_path`
pub fn render(
    fs: &dyn FileSystem,
    template: &str,
    context: &Value,
    output_path: &Path,
) -> Result<()> {
    let content = render_to_string(template, context)
        .with_context(|| format!("Failed to render {}", output_path.display()))?;

    fs.write(output_path, &content)
        .with_context(|| format!("Failed to write {}", output_path.display()))
}

fn tokenize(source: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = source;
    // True while nothing but whitespace precedes the cursor on the current line
    let mut line_clean = true;

    while let Some(start) = rest.find("{{") {
        let offset = source.len() - rest.len() + start;
        let chunk = &rest[..start];
        if chunk.contains('\n') {
            line_clean = true;
        }
        text.push_str(chunk);

        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or(TemplateError::UnclosedTag(offset))?;
        let tag = after[..end].trim();
        rest = &after[end + 2..];

        let token = match tag.chars().next() {
            Some('#') => Token::Open(tag[1..].trim().to_string()),
            Some('/') => Token::Close(tag[1..].trim().to_string()),
            _ => Token::Var(tag.to_string()),
        };

        match &token {
            Token::Open(name) | Token::Close(name) | Token::Var(name) if name.is_empty() => {
                return Err(TemplateError::EmptyTag(offset));
            }
            _ => {}
        }

        if let Token::Var(_) = token {
            line_clean = false;
        } else {
            let line_start = text.rfind('\n').map(|i| i + 1).unwrap_or(0);
            let before_blank = text[line_start..].chars().all(|c| c == ' ' || c == '\t');

            let line_end = rest.find('\n');
            let tail = &rest[..line_end.unwrap_or(rest.len())];
            let after_blank = tail.chars().all(|c| c == ' ' || c == '\t' || c == '\r');

            if line_clean && before_blank && after_blank {
                text.truncate(line_start);
                rest = &rest[line_end.map(|i| i + 1).unwrap_or(rest.len())..];
            } else {
                line_clean = false;
            }
        }

        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut text)));
        }
        tokens.push(token);
    }

    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }

    Ok(tokens)
}

fn build_tree(tokens: Vec<Token>) -> Result<Vec<Node>, TemplateError> {
    let mut stack: Vec<(String, Vec<Node>)> = vec![(String::new(), Vec::new())];

    for token in tokens {
        match token {
            Token::Text(text) => push_node(&mut stack, Node::Text(text)),
            Token::Var(name) => push_node(&mut stack, Node::Var(name)),
            Token::Open(name) => stack.push((name, Vec::new())),
            Token::Close(found) => {
                if stack.len() == 1 {
                    return Err(TemplateError::UnexpectedClose(found));
                }
                let (expected, body) = stack.pop().unwrap_or_default();
                if expected != found {
                    return Err(TemplateError::MismatchedSection { expected, found });
                }
                push_node(&mut stack, Node::Section { name: found, body });
            }
        }
    }

    if stack.len() > 1 {
        let (name, _) = stack.pop().unwrap_or_default();
        return Err(TemplateError::UnclosedSection(name));
    }

    Ok(stack.pop().map(|(_, nodes)| nodes).unwrap_or_default())
}

fn push_node(stack: &mut [(String, Vec<Node>)], node: Node) {
    if let Some((_, nodes)) = stack.last_mut() {
        nodes.push(node);
    }
}

fn lookup<'a>(scopes: &[&'a Value], name: &str) -> Option<&'a Value> {
    scopes
        .iter()
        .rev()
        .find_map(|scope| scope.as_object().and_then(|map| map.get(name)))
}

fn render_nodes<'a>(
    nodes: &[Node],
    scopes: &mut Vec<&'a Value>,
    out: &mut String,
) -> Result<(), TemplateError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(name) => match lookup(scopes, name) {
                Some(Value::String(s)) => out.push_str(s),
                Some(Value::Number(n)) => out.push_str(&n.to_string()),
                Some(Value::Bool(b)) => out.push_str(&b.to_string()),
                Some(Value::Null) | None => return Err(TemplateError::MissingKey(name.clone())),
                Some(_) => return Err(TemplateError::NotScalar(name.clone())),
            },
            Node::Section { name, body } => match lookup(scopes, name) {
                Some(Value::Array(items)) => {
                    for item in items {
                        scopes.push(item);
                        let result = render_nodes(body, scopes, out);
                        scopes.pop();
                        result?;
                    }
                }
                Some(Value::Bool(false)) | Some(Value::Null) | None => {}
                Some(value) => {
                    scopes.push(value);
                    let result = render_nodes(body, scopes, out);
                    scopes.pop();
                    result?;
                }
            },
        }
    }

    Ok(())
}
