//! Prompt templates with `{name}` placeholders.
//!
//! `{{` and `}}` render as literal braces. Every placeholder must be
//! supplied when formatting.

use anyhow::{Result, bail};
use compact_str::CompactString;
use llm::{Message, Role};

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Var(CompactString),
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template, rejecting unbalanced braces and empty placeholders.
    pub fn new(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = CompactString::default();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    let name = CompactString::from(name.trim());
                    if !closed {
                        bail!("unclosed placeholder `{{{name}` in template");
                    }
                    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                        bail!("invalid placeholder `{{{name}}}` in template");
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Var(name));
                }
                '}' => bail!("single `}}` in template, use `}}}}` for a literal brace"),
                c => text.push(c),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    /// Placeholder names in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Var(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Render the template with the given variables.
    pub fn format(&self, vars: &[(&str, &str)]) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => match vars.iter().find(|(k, _)| *k == name.as_str()) {
                    Some((_, value)) => out.push_str(value),
                    None => bail!("missing template variable `{name}`"),
                },
            }
        }
        Ok(out)
    }
}

/// An ordered list of role/template pairs rendered into messages
#[derive(Debug, Clone, Default)]
pub struct ChatPrompt {
    parts: Vec<(Role, Template)>,
}

impl ChatPrompt {
    /// Build a prompt from `(role, template source)` pairs.
    pub fn from_messages(parts: &[(Role, &str)]) -> Result<Self> {
        let parts = parts
            .iter()
            .map(|(role, source)| Ok((*role, Template::new(source)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { parts })
    }

    /// Placeholder names across all parts, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.parts.iter().flat_map(|(_, t)| t.variables()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Render every part into a message.
    pub fn format(&self, vars: &[(&str, &str)]) -> Result<Vec<Message>> {
        self.parts
            .iter()
            .map(|(role, template)| Ok(Message::new(*role, template.format(vars)?)))
            .collect()
    }
}
