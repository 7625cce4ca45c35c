//! `PathExtractionError` — the one error type this crate raises.
//!
//! Every failure mode is a variant here, grouped by the taxonomy in the
//! design notes: configuration (bad path expressions), precondition (cursor
//! state the caller must guarantee), callback-contract violations, and the
//! strict-typing / FSM-build failures that only the FSM matcher can raise.
//! Nothing is recovered internally — errors surface at the call site that
//! triggered them.

use thiserror::Error;

/// Everything that can go wrong while parsing a path expression, building a
/// matcher, or running a match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathExtractionError {
    // ── Configuration: bad path expressions ─────────────────────────────
    /// The textual path expression was empty.
    #[error("ionPathExpression cannot be empty")]
    EmptyExpression,

    /// The outer value of a path expression was not a sequence (sexp or list).
    #[error("ionPathExpression must be a s-expression or list")]
    NotASequence,

    /// A component's textual form was not a field name, index, or wildcard.
    #[error("Invalid path component type: {text}")]
    InvalidComponentType {
        /// The offending component text, as written in the expression.
        text: String,
    },

    /// A `FieldMatcher`-style callback slot was registered twice for the
    /// same `SearchPath` construction, or a required builder argument was
    /// left unset.
    #[error("invalid search path configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of what was missing or malformed.
        reason: String,
    },

    // ── Precondition: cursor state the caller must guarantee ────────────
    /// `match_stream`/`match_current_value` was called with the cursor at a
    /// depth greater than zero, and `match_relative_paths` was not enabled.
    #[error(
        "cursor is at depth {depth} but match_relative_paths is not enabled on this extractor"
    )]
    RelativeCursorNotAllowed {
        /// The cursor's depth at the time of the call.
        depth: usize,
    },

    /// `match_current_value` was called with the cursor not positioned on a
    /// value (`cursor.type()` returned `None`).
    #[error("match_current_value requires the cursor to be positioned on a value")]
    CursorNotOnValue,

    // ── Callback-contract violations ────────────────────────────────────
    /// The callback returned with the cursor at a different depth than it
    /// observed on entry.
    #[error("callback left the cursor at depth {actual}, expected depth {expected}")]
    CursorDepthChanged {
        /// The depth observed just before the callback was invoked.
        expected: usize,
        /// The depth observed just after the callback returned.
        actual: usize,
    },

    /// A callback's step-out return value exceeded the reader's relative
    /// depth at the time of the call.
    #[error("callback requested step-out of {requested} container(s) but only {available} are open")]
    StepOutExceedsDepth {
        /// The step-out count the callback returned.
        requested: usize,
        /// The number of enclosing containers actually open.
        available: usize,
    },

    // ── Strict-typing violation (FSM only) ──────────────────────────────
    /// Strict-typing mode rejected a transition because the current value's
    /// kind did not permit it (e.g. a `Field` node reached from a non-struct).
    #[error("strict typing violation: expected a {expected} value, found {found}")]
    TypeMismatch {
        /// What kind of value the node required.
        expected: &'static str,
        /// What kind of value was actually present.
        found: String,
    },

    // ── FSM build failure ────────────────────────────────────────────────
    /// The registered search paths cannot be compiled into an FSM. Raised by
    /// `build_strict()`; silently caught by `build()` to fall back to the
    /// tree-walk matcher.
    #[error("unsupported path expression for FSM compilation: {reason}")]
    UnsupportedPathExpression {
        /// Why the FSM builder rejected the path set.
        reason: String,
    },
}
