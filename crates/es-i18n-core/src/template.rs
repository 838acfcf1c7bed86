//! Message templates with `{name}` placeholders.
//!
//! Templates are parsed once, when a bundle is built, so rendering never has
//! to deal with malformed input.
//!
//! Syntax:
//!
//! - `{name}` inserts the parameter `name`; surrounding whitespace inside the
//!   braces is ignored. Names match `[A-Za-z_][A-Za-z0-9_]*`.
//! - `{'text'}` inserts `text` verbatim, which is how literal braces are
//!   written (`{'{'}`).
//! - `|` separates plural forms. Outside of [`Template::render_plural`] it is
//!   rendered as a plain character.

use fluent_bundle::FluentValue;
use intl_memoizer::concurrent::IntlLangMemoizer;
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::plural;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed placeholder starting at byte {0}")]
    Unclosed(usize),
    #[error("empty placeholder at byte {0}")]
    Empty(usize),
    #[error("invalid placeholder name '{name}' at byte {offset}")]
    InvalidName { name: String, offset: usize },
}

/// A placeholder had no usable value in the supplied parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingParameter(pub String);

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
    Pipe,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let segments = parse_segments(&source)?;
        Ok(Self { source, segments })
    }

    /// The template text as authored.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Number of `|`-separated plural forms (at least one).
    pub fn form_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Pipe))
            .count()
            + 1
    }

    /// Renders the whole template, substituting every placeholder.
    pub fn render(
        &self,
        args: Option<&HashMap<&str, FluentValue<'_>>>,
        lang: &LanguageIdentifier,
    ) -> Result<String, MissingParameter> {
        let mut renderer = Renderer::new(args, lang);
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Pipe => out.push('|'),
                Segment::Placeholder(name) => out.push_str(&renderer.value(name)?),
            }
        }
        Ok(out)
    }

    /// Picks the plural form for `count` and renders only that form, trimmed
    /// of the whitespace around the `|` separators.
    pub fn render_plural(
        &self,
        count: i64,
        args: Option<&HashMap<&str, FluentValue<'_>>>,
        lang: &LanguageIdentifier,
    ) -> Result<String, MissingParameter> {
        let index = plural::form_index(self.form_count(), count);
        let form = self
            .segments
            .split(|segment| matches!(segment, Segment::Pipe))
            .nth(index)
            .unwrap_or_default();

        let mut renderer = Renderer::new(args, lang);
        let mut out = String::new();
        let last = form.len().saturating_sub(1);
        for (position, segment) in form.iter().enumerate() {
            match segment {
                Segment::Literal(text) => {
                    let mut text = text.as_str();
                    if position == 0 {
                        text = text.trim_start();
                    }
                    if position == last {
                        text = text.trim_end();
                    }
                    out.push_str(text);
                },
                Segment::Placeholder(name) => out.push_str(&renderer.value(name)?),
                Segment::Pipe => {},
            }
        }
        Ok(out)
    }
}

struct Renderer<'r, 'a> {
    args: Option<&'r HashMap<&'r str, FluentValue<'a>>>,
    lang: &'r LanguageIdentifier,
    memoizer: Option<IntlLangMemoizer>,
}

impl<'r, 'a> Renderer<'r, 'a> {
    fn new(args: Option<&'r HashMap<&'r str, FluentValue<'a>>>, lang: &'r LanguageIdentifier) -> Self {
        Self {
            args,
            lang,
            memoizer: None,
        }
    }

    fn value(&mut self, name: &str) -> Result<Cow<'r, str>, MissingParameter> {
        let missing = || MissingParameter(name.to_string());
        let value = self.args.and_then(|args| args.get(name)).ok_or_else(missing)?;

        match value {
            FluentValue::String(s) => Ok(Cow::Borrowed(s.as_ref())),
            FluentValue::Number(n) => Ok(n.as_string()),
            FluentValue::Custom(custom) => {
                let lang = self.lang;
                let memoizer = self
                    .memoizer
                    .get_or_insert_with(|| IntlLangMemoizer::new(lang.clone()));
                Ok(custom.as_string_threadsafe(memoizer))
            },
            FluentValue::None | FluentValue::Error => Err(missing()),
        }
    }
}

fn parse_segments(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(special) = rest.find(['{', '|']) {
        literal.push_str(&rest[..special]);
        let start = offset + special;

        if rest[special..].starts_with('|') {
            flush(&mut segments, &mut literal);
            segments.push(Segment::Pipe);
            rest = &rest[special + 1..];
            offset = start + 1;
            continue;
        }

        let after = &rest[special + 1..];
        let body = after.trim_start();
        let consumed = if let Some(quoted) = body.strip_prefix('\'') {
            let end = quoted.find('\'').ok_or(TemplateError::Unclosed(start))?;
            let tail = quoted[end + 1..].trim_start();
            if !tail.starts_with('}') {
                return Err(TemplateError::Unclosed(start));
            }
            literal.push_str(&quoted[..end]);
            after.len() - tail.len() + 1
        } else {
            let close = after.find('}').ok_or(TemplateError::Unclosed(start))?;
            let name = after[..close].trim();
            if name.is_empty() {
                return Err(TemplateError::Empty(start));
            }
            if !is_identifier(name) {
                return Err(TemplateError::InvalidName {
                    name: name.to_string(),
                    offset: start,
                });
            }
            flush(&mut segments, &mut literal);
            segments.push(Segment::Placeholder(name.to_string()));
            close + 1
        };

        rest = &after[consumed..];
        offset = start + 1 + consumed;
    }

    literal.push_str(rest);
    flush(&mut segments, &mut literal);
    Ok(segments)
}

fn flush(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
