//! `PathExpressionParser` — the textual mini-language's recursive-descent
//! parser (§4.1/§6.1).
//!
//! The grammar is deliberately small: two interchangeable outer forms,
//! whitespace-separated components, three atom shapes (field/index/
//! wildcard), annotation prefixes via `::`, and one nested
//! `(inner annotatedWith A B)` escape form. No external parsing crate earns
//! its keep over a handful of `char` cursor methods — the closest pack
//! analog, `pact-models`' `parse_path_exp`, hand-rolls its tokenizer the
//! same way for a structurally similar grammar.

use crate::error::PathExtractionError;
use crate::path_component::PathComponent;

const ESCAPE_ANNOTATION: &str = "$ion_extractor_field";
const ANNOTATED_WITH: &str = "annotatedWith";

/// Parses textual path expressions into `(components, top_level_annotations)`.
pub struct PathExpressionParser;

impl PathExpressionParser {
    /// Parse a full path expression, e.g. `"(foo 0)"` or `"A::(bar)"`.
    pub fn parse(text: &str) -> Result<(Vec<PathComponent>, Vec<String>), PathExtractionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PathExtractionError::EmptyExpression);
        }
        let mut cursor = Cursor::new(trimmed);
        let outer_annotations = cursor.take_annotation_prefix()?;
        let close = cursor.expect_open_sequence()?;
        let mut components = Vec::new();
        loop {
            cursor.skip_whitespace();
            if cursor.peek_char() == Some(close) {
                cursor.advance_char();
                break;
            }
            if cursor.is_exhausted() {
                return Err(PathExtractionError::NotASequence);
            }
            components.push(cursor.parse_component()?);
        }
        cursor.skip_whitespace();
        if !cursor.is_exhausted() {
            return Err(PathExtractionError::NotASequence);
        }
        Ok((components, outer_annotations))
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(rest: &'a str) -> Self {
        Self { rest }
    }

    fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.peek_char() {
            self.rest = &self.rest[c.len_utf8()..];
        }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// The outermost form must open with `(` or `[`; returns the matching
    /// close delimiter.
    fn expect_open_sequence(&mut self) -> Result<char, PathExtractionError> {
        self.skip_whitespace();
        match self.peek_char() {
            Some('(') => {
                self.advance_char();
                Ok(')')
            }
            Some('[') => {
                self.advance_char();
                Ok(']')
            }
            _ => Err(PathExtractionError::NotASequence),
        }
    }

    /// Consume zero or more `<segment>::` prefixes, each a bare word or a
    /// quoted string immediately followed by `::`, with no whitespace
    /// between the segment and the colons.
    fn take_annotation_prefix(&mut self) -> Result<Vec<String>, PathExtractionError> {
        let mut annotations = Vec::new();
        loop {
            self.skip_whitespace();
            let checkpoint = self.rest;
            let Some(segment) = self.try_take_segment() else {
                self.rest = checkpoint;
                break;
            };
            if self.rest.starts_with("::") {
                self.rest = &self.rest["::".len()..];
                annotations.push(segment);
            } else {
                self.rest = checkpoint;
                break;
            }
        }
        Ok(annotations)
    }

    /// Take one bare word or quoted string, stopping at whitespace, a
    /// delimiter, or `::`. Returns `None` (restoring nothing — caller must
    /// have checkpointed) if nothing could be read.
    fn try_take_segment(&mut self) -> Option<String> {
        if self.peek_char() == Some('"') {
            return self.take_quoted_string();
        }
        let end = self
            .rest
            .find(|c: char| c.is_whitespace() || "()[]".contains(c))
            .unwrap_or(self.rest.len());
        // A bare word stops at "::" even mid-scan, since "::" separates
        // annotation segments without surrounding whitespace.
        let colon_pos = self.rest[..end].find("::");
        let word_end = colon_pos.unwrap_or(end);
        if word_end == 0 {
            return None;
        }
        let word = self.rest[..word_end].to_string();
        self.rest = &self.rest[word_end..];
        Some(word)
    }

    fn take_quoted_string(&mut self) -> Option<String> {
        debug_assert_eq!(self.peek_char(), Some('"'));
        let mut chars = self.rest.char_indices();
        chars.next(); // opening quote
        for (idx, c) in chars {
            if c == '"' {
                let content = self.rest[1..idx].to_string();
                self.rest = &self.rest[idx + 1..];
                return Some(content);
            }
        }
        None
    }

    /// Parse one component: annotation prefix, then an atom or a nested
    /// `annotatedWith` sequence.
    fn parse_component(&mut self) -> Result<PathComponent, PathExtractionError> {
        let mut annotations = self.take_annotation_prefix()?;
        self.skip_whitespace();

        let escape = matches!(annotations.first().map(String::as_str), Some(ESCAPE_ANNOTATION));
        if escape {
            annotations.remove(0);
        }

        let component = match self.peek_char() {
            Some('(') | Some('[') => self.parse_annotated_with()?,
            _ => {
                let text = self
                    .try_take_segment()
                    .ok_or(PathExtractionError::NotASequence)?;
                Self::atom_to_component(&text, escape)?
            }
        };

        if annotations.is_empty() {
            Ok(component)
        } else {
            Ok(component.with_annotations(annotations))
        }
    }

    /// Parse `(inner annotatedWith A B ...)`.
    fn parse_annotated_with(&mut self) -> Result<PathComponent, PathExtractionError> {
        let close = self.expect_open_sequence()?;
        self.skip_whitespace();
        let inner = self.parse_component()?;
        self.skip_whitespace();
        let keyword = self
            .try_take_segment()
            .ok_or(PathExtractionError::NotASequence)?;
        if keyword != ANNOTATED_WITH {
            return Err(PathExtractionError::InvalidComponentType { text: keyword });
        }
        let mut annotations = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(close) {
                self.advance_char();
                break;
            }
            let sym = self
                .try_take_segment()
                .ok_or(PathExtractionError::NotASequence)?;
            annotations.push(sym);
        }
        Ok(inner.with_annotations(annotations))
    }

    fn atom_to_component(text: &str, escape: bool) -> Result<PathComponent, PathExtractionError> {
        if let Ok(index) = text.parse::<i64>() {
            return Ok(PathComponent::index(index));
        }
        if looks_like_decimal(text) || text == "true" || text == "false" {
            return Err(PathExtractionError::InvalidComponentType {
                text: text.to_string(),
            });
        }
        if text == "*" && !escape {
            return Ok(PathComponent::wildcard());
        }
        Ok(PathComponent::field(text))
    }
}

fn looks_like_decimal(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    !body.is_empty()
        && body.contains('.')
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
}
