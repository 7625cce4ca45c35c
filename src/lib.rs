//! ion_path_extractor - path-extraction matching engine for a self-describing,
//! hierarchical, typed data format (modeled on Ion's container/scalar value
//! model).
//!
//! # Architecture
//!
//! - [`Cursor`] — the abstract streaming reader this crate consumes; never a
//!   concrete binary/text reader (see Non-goals below).
//! - [`PathExpressionParser`] — parses the textual path-expression mini
//!   language into [`PathComponent`] lists.
//! - [`PathComponent`] / [`SearchPath`] — the parsed shape of one registered
//!   path and the callback it fires.
//! - [`TreeWalkMatcher`] — the reference matcher: walks every registered path
//!   against every value, unconditionally correct, O(paths × values).
//! - [`FsmNode`] / [`FsmBuilder`] / [`FsmMatcher`] — compiles compatible path
//!   sets into a shared transition tree, matched via one table lookup per
//!   value instead of a per-path walk.
//! - [`Extractor`] / [`Builder`] — the public facade: build once, match many
//!   times, transparently picking the FSM matcher when the registered paths
//!   allow it and falling back to tree-walk otherwise.
//!
//! # Key Design Insights
//!
//! 1. **Callback-driven extraction, not DOM materialization.** A match fires
//!    a caller-supplied callback with the cursor still positioned on the
//!    matched value; building a document-object model out of what the
//!    callback reads is the caller's business, not this crate's.
//!
//! 2. **Step-out is how a callback ends a container early.** Returning `N`
//!    from a callback asks the matcher to stop visiting `N` enclosing
//!    containers' remaining siblings, not just this one.
//!
//! 3. **The FSM matcher is an optimization, never a different matcher.**
//!    [`Builder::build`] always produces semantically identical results to
//!    the tree-walk matcher for any path set the FSM can compile; it differs
//!    only in which path sets it can compile at all (see
//!    [`FsmBuilder::build`]).
//!
//! # Example
//!
//! ```
//! use ion_path_extractor::prelude::*;
//!
//! let extractor: Extractor<Vec<i64>> = Builder::standard()
//!     .with_search_path(
//!         "(foo)",
//!         Box::new(|_cursor, hits: &mut Vec<i64>| {
//!             hits.push(1);
//!             Ok(0)
//!         }),
//!     )
//!     .unwrap()
//!     .build();
//!
//! assert!(extractor.is_fsm());
//! ```
//!
//! # Non-goals
//!
//! Full XPath/JSONPath semantics, backtracking, multithreaded match
//! execution on one cursor, a binary/text reader for the data format,
//! persistence/network I/O, a benchmark harness, and DOM materialization are
//! out of scope — see `SPEC_FULL.md` §6.

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod context;
mod cursor;
mod error;
mod extractor;
mod fsm_builder;
mod fsm_matcher;
mod fsm_node;
mod parser;
mod path_component;
mod search_path;
mod trace;
mod tree_walk;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use context::{ExtractorConfig, MatchContext};
pub use cursor::{Cursor, ScalarKind, ValueKind};
pub use error::PathExtractionError;
pub use extractor::{Builder, Extractor};
pub use parser::PathExpressionParser;
pub use path_component::PathComponent;
pub use search_path::{Callback, SearchPath};

// Matchers (usually reached only through `Extractor`, but exposed for
// callers who want to pick or inspect one directly)
pub use fsm_builder::FsmBuilder;
pub use fsm_matcher::FsmMatcher;
pub use fsm_node::FsmNode;
pub use tree_walk::TreeWalkMatcher;

// Structured evaluation tracing
pub use trace::{MatchStep, MatchTrace, PathOutcome};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use ion_path_extractor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Builder, Callback, Cursor, Extractor, ExtractorConfig, MatchContext, MatchStep,
        MatchTrace, PathComponent, PathExpressionParser, PathExtractionError, PathOutcome,
        ScalarKind, SearchPath, ValueKind,
    };
}
