use std::collections::BTreeMap;

use crate::error::{BuildError, TemplateError, TemplateKind};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A pre-parsed `{{ column }}` template.
///
/// Placeholders may carry a leading dot (`{{.id}}`) and surrounding
/// whitespace; both are ignored. Substituted values are inserted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: TemplateKind,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `input` once so rendering never has to re-scan it.
    ///
    /// # Errors
    ///
    /// Returns an error for an unterminated `{{`, an empty placeholder, or a
    /// placeholder name containing braces.
    pub fn parse(kind: TemplateKind, input: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = input;
        let mut offset = 0usize;

        while let Some(start) = rest.find("{{") {
            let (before, after_start) = rest.split_at(start);
            if !before.is_empty() {
                segments.push(Segment::Literal(before.to_owned()));
            }
            let open_offset = offset.saturating_add(start);
            let after = after_start.get(2..).unwrap_or_default();
            let Some(end) = after.find("}}") else {
                return Err(TemplateError::Unterminated {
                    kind,
                    offset: open_offset,
                });
            };
            let (key_part, after_end) = after.split_at(end);
            let name = placeholder_name(key_part);
            if name.is_empty() {
                return Err(TemplateError::EmptyPlaceholder {
                    kind,
                    offset: open_offset,
                });
            }
            if name.contains(|c: char| c == '{' || c == '}' || c.is_whitespace()) {
                return Err(TemplateError::InvalidPlaceholder {
                    kind,
                    name: name.to_owned(),
                });
            }
            segments.push(Segment::Placeholder(name.to_owned()));

            let remaining = after_end.get(2..).unwrap_or_default();
            offset = offset.saturating_add(rest.len().saturating_sub(remaining.len()));
            rest = remaining;
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        Ok(Self { kind, segments })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Column names referenced by this template, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Renders against one row's column mapping.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnresolvedReference`] when a placeholder names a
    /// column the row does not have.
    pub fn render(&self, vars: &BTreeMap<&str, &str>) -> Result<String, BuildError> {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name) => {
                    let value =
                        vars.get(name.as_str())
                            .ok_or_else(|| BuildError::UnresolvedReference {
                                kind: self.kind,
                                name: name.clone(),
                            })?;
                    output.push_str(value);
                }
            }
        }
        Ok(output)
    }
}

fn placeholder_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('.').unwrap_or(trimmed).trim()
}
