//! URL templates
//!
//! GitHub hands out hypermedia URLs such as
//! `https://api.github.com/repos/acme/widgets/collaborators{/collaborator}`,
//! and the endpoint settings in `.orglens.toml` use the same brace syntax
//! (`{api}/orgs/{org}/members`). This module parses both into literal and
//! placeholder segments.
//!
//! Only the subset of RFC 6570 that GitHub emits is understood: simple
//! `{name}` expansion and the `/`, `?` and `&` operators. Values are inserted
//! verbatim, so a `{repo}` of `acme/widgets` keeps its slash.

use crate::error::ConfigError;

const OPERATORS: &[char] = &['+', '#', '.', '/', ';', '?', '&'];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder {
        operator: Option<char>,
        names: Vec<String>,
    },
}

/// A parsed URL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse a template, rejecting unbalanced braces and empty placeholders
    pub fn parse(template: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find(['{', '}']) {
            if rest[open..].starts_with('}') {
                return Err(invalid("unexpected '}'"));
            }
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }

            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| invalid("unclosed '{'"))?;
            let mut body = &after[..close];
            if body.contains('{') {
                return Err(invalid("nested '{'"));
            }

            let operator = body.chars().next().filter(|c| OPERATORS.contains(c));
            if let Some(op) = operator {
                body = &body[op.len_utf8()..];
            }

            let names: Vec<String> = body.split(',').map(|n| n.trim().to_string()).collect();
            if names.iter().any(String::is_empty) {
                return Err(invalid("empty placeholder name"));
            }

            segments.push(Segment::Placeholder { operator, names });
            rest = &after[close + 1..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The text preceding the first placeholder
    ///
    /// For a collaborators template this is the usable listing endpoint.
    pub fn base(&self) -> &str {
        match self.raw.find('{') {
            Some(idx) => &self.raw[..idx],
            None => &self.raw,
        }
    }

    /// Placeholder names in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().flat_map(|segment| match segment {
            Segment::Placeholder { names, .. } => {
                names.iter().map(String::as_str).collect::<Vec<_>>()
            }
            Segment::Literal(_) => Vec::new(),
        })
    }

    /// Substitute the given variables; undefined placeholders expand to nothing
    pub fn expand(&self, vars: &[(&str, &str)]) -> String {
        let lookup = |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);
        let mut out = String::with_capacity(self.raw.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { operator, names } => {
                    let mut first = true;
                    for name in names {
                        let Some(value) = lookup(name) else { continue };
                        match operator {
                            Some('/') => {
                                out.push('/');
                                out.push_str(value);
                            }
                            Some('?') | Some('&') => {
                                let sep = if first { *operator } else { Some('&') };
                                out.extend(sep);
                                out.push_str(name);
                                out.push('=');
                                out.push_str(value);
                            }
                            Some('.') => {
                                out.push('.');
                                out.push_str(value);
                            }
                            _ => {
                                if !first {
                                    out.push(',');
                                }
                                out.push_str(value);
                            }
                        }
                        first = false;
                    }
                }
            }
        }

        out
    }
}

/// Strip a hypermedia URL down to the endpoint before its first placeholder
pub fn base_endpoint(template: &str) -> Result<String, ConfigError> {
    Ok(UrlTemplate::parse(template)?.base().to_string())
}
