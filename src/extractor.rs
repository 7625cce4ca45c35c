//! `Extractor` facade and `Builder` — the public entry point (§6.3).
//!
//! Grounded on the teacher's `Matcher` facade shape (a single owned
//! evaluation engine behind one `evaluate` entry point) and `lib.rs`'s
//! top-level builder/prelude convention.
//!
//! The spec's two Java-shaped overloads per entry point — `match(cursor)`
//! and `match(cursor, context)` — collapse to one Rust method each: there
//! is no contextless overload, since `Extractor<()>` plus `&mut ()` already
//! serves every caller with nothing to accumulate.

use crate::context::ExtractorConfig;
use crate::cursor::Cursor;
use crate::error::PathExtractionError;
use crate::fsm_builder::FsmBuilder;
use crate::fsm_matcher::FsmMatcher;
use crate::parser::PathExpressionParser;
use crate::path_component::PathComponent;
use crate::search_path::{Callback, SearchPath};
use crate::tree_walk::TreeWalkMatcher;

enum Matcher<T> {
    Fsm(FsmMatcher<T>),
    TreeWalk(TreeWalkMatcher<T>),
}

/// A built, immutable matcher over a fixed set of search paths.
///
/// Safe to share across threads: it holds no per-cursor state, and every
/// `match_stream`/`match_current_value` call's transient state lives on the
/// stack.
pub struct Extractor<T> {
    config: ExtractorConfig,
    matcher: Matcher<T>,
}

impl<T> Extractor<T> {
    /// Advance `cursor` through successive top-level values, invoking
    /// matched paths' callbacks with `user` as the threaded context.
    pub fn match_stream(
        &mut self,
        cursor: &mut dyn Cursor,
        user: &mut T,
    ) -> Result<(), PathExtractionError> {
        match &mut self.matcher {
            Matcher::Fsm(m) => m.match_stream(cursor, self.config, user),
            Matcher::TreeWalk(m) => m.match_stream(cursor, self.config, user),
        }
    }

    /// Run one match attempt with `cursor` already positioned on a value.
    pub fn match_current_value(
        &mut self,
        cursor: &mut dyn Cursor,
        user: &mut T,
    ) -> Result<(), PathExtractionError> {
        match &mut self.matcher {
            Matcher::Fsm(m) => m.match_current_value(cursor, self.config, user),
            Matcher::TreeWalk(m) => m.match_current_value(cursor, self.config, user),
        }
    }

    /// As [`Extractor::match_current_value`], additionally returning a
    /// [`crate::trace::MatchTrace`] of every path's outcome at every value
    /// visited — this domain's analog of turning on debug logging.
    pub fn match_current_value_traced(
        &mut self,
        cursor: &mut dyn Cursor,
        user: &mut T,
    ) -> Result<crate::trace::MatchTrace, PathExtractionError> {
        match &mut self.matcher {
            Matcher::Fsm(m) => m.match_current_value_traced(cursor, self.config, user),
            Matcher::TreeWalk(m) => m.match_current_value_traced(cursor, self.config, user),
        }
    }

    /// Is this extractor backed by the FSM matcher (as opposed to having
    /// fallen back to tree-walk)?
    #[must_use]
    pub fn is_fsm(&self) -> bool {
        matches!(self.matcher, Matcher::Fsm(_))
    }
}

/// Builds an [`Extractor`] from registered search paths and configuration.
pub struct Builder<T> {
    config: ExtractorConfig,
    paths: Vec<SearchPath<T>>,
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self {
            config: ExtractorConfig::default(),
            paths: Vec::new(),
        }
    }
}

impl<T> Builder<T> {
    /// A builder with default configuration and no registered paths.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Allow matching against a cursor that does not start at depth 0.
    #[must_use]
    pub fn with_match_relative_paths(mut self, enabled: bool) -> Self {
        self.config.match_relative_paths = enabled;
        self
    }

    /// Case-insensitive matching for both field names and annotations.
    #[must_use]
    pub fn with_match_case_insensitive(mut self, enabled: bool) -> Self {
        self.config.match_case_insensitive_all = enabled;
        self
    }

    /// Case-insensitive matching for field names only.
    #[must_use]
    pub fn with_match_field_names_case_insensitive(mut self, enabled: bool) -> Self {
        self.config.match_case_insensitive_fields = enabled;
        self
    }

    /// Register a path from its textual form (§6.1).
    pub fn with_search_path(
        mut self,
        text: &str,
        callback: Callback<T>,
    ) -> Result<Self, PathExtractionError> {
        let (components, annotations) = PathExpressionParser::parse(text)?;
        self.paths.push(SearchPath::new(components, annotations, callback));
        Ok(self)
    }

    /// Register a path from its already-parsed components.
    #[must_use]
    pub fn with_search_path_components(
        mut self,
        components: Vec<PathComponent>,
        annotations: Vec<String>,
        callback: Callback<T>,
    ) -> Self {
        self.paths.push(SearchPath::new(components, annotations, callback));
        self
    }

    /// Try compiling the registered paths into the FSM matcher; fall back
    /// to the tree-walk matcher if `FsmBuilder` rejects the path set.
    #[must_use]
    pub fn build(self) -> Extractor<T> {
        match FsmBuilder::build(self.paths, self.config, false) {
            Ok(fsm) => Extractor {
                config: self.config,
                matcher: Matcher::Fsm(fsm),
            },
            Err((paths, _)) => Extractor {
                config: self.config,
                matcher: Matcher::TreeWalk(TreeWalkMatcher::new(paths)),
            },
        }
    }

    /// Compile the registered paths into the FSM matcher only, surfacing
    /// any `UnsupportedPathExpression` instead of falling back.
    pub fn build_strict(self, strict_typing: bool) -> Result<Extractor<T>, PathExtractionError> {
        match FsmBuilder::build(self.paths, self.config, strict_typing) {
            Ok(fsm) => Ok(Extractor {
                config: self.config,
                matcher: Matcher::Fsm(fsm),
            }),
            Err((_, err)) => Err(err),
        }
    }

    /// Build the tree-walk matcher unconditionally, bypassing FSM
    /// compilation entirely.
    #[must_use]
    pub fn build_legacy(self) -> Extractor<T> {
        Extractor {
            config: self.config,
            matcher: Matcher::TreeWalk(TreeWalkMatcher::new(self.paths)),
        }
    }
}
