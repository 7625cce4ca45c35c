//! Structured evaluation tracing — this domain's analog of the teacher's
//! `trace.rs`.
//!
//! Rather than log lines, a parallel tree of `*Trace` types mirrors the
//! runtime types and records what happened at each value the matcher
//! visited: which paths partially matched, which terminated and fired, and
//! what step-out they requested. A caller who wants that visibility calls
//! `match_current_value_traced` instead of reaching for a logging crate.

/// What a single registered path did at one visited value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// The path's `partialMatchAt` check failed at this value.
    NoMatch,
    /// The path partially matched; matching continues into children.
    Partial,
    /// The path's components were fully consumed and its callback fired.
    Terminal {
        /// The step-out count the callback returned.
        step_out: usize,
    },
}

impl PathOutcome {
    /// Did the callback fire for this path at this value?
    #[must_use]
    pub fn fired(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }
}

/// The outcome of every active path at one value the matcher visited.
#[derive(Debug, Clone)]
pub struct MatchStep {
    /// How many path components had been consumed reaching this value.
    pub path_component_index: usize,
    /// The value's position within its immediate parent container.
    pub reader_container_index: usize,
    /// The value's field name, if it is a struct field.
    pub field_name: Option<String>,
    /// The value's annotation list.
    pub annotations: Vec<String>,
    /// Per-path outcome, indexed identically to the extractor's registered
    /// search paths.
    pub outcomes: Vec<PathOutcome>,
}

/// A full record of one `match_current_value_traced` call: one [`MatchStep`]
/// per value the matcher visited, in traversal order.
#[derive(Debug, Clone, Default)]
pub struct MatchTrace {
    /// The steps recorded, in the order the matcher visited them.
    pub steps: Vec<MatchStep>,
}

impl MatchTrace {
    /// An empty trace, ready to be filled in during a match call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many terminal matches (fired callbacks) this trace recorded.
    #[must_use]
    pub fn fired_count(&self) -> usize {
        self.steps
            .iter()
            .flat_map(|step| &step.outcomes)
            .filter(|outcome| outcome.fired())
            .count()
    }
}
