//! `SearchPath` — one registered path: ordered components, a top-level
//! annotation filter, and the callback that fires on a terminal match.
//!
//! Grounded on the teacher's `FieldMatcher` (a predicate paired with a
//! reaction), generalized from a single predicate to an ordered component
//! list plus the `partialMatchAt` contract.

use crate::context::MatchContext;
use crate::error::PathExtractionError;
use crate::path_component::{annotation_list_matches, PathComponent};

/// The callback invoked when a [`SearchPath`] reaches a terminal match.
///
/// Returns the step-out count: `0` to keep iterating siblings, `N > 0` to
/// unwind `N` enclosing containers before resuming. See the crate-level
/// traversal contract for the full step-out semantics.
pub type Callback<T> =
    Box<dyn FnMut(&mut dyn crate::Cursor, &mut T) -> Result<usize, PathExtractionError> + Send + Sync>;

/// An ordered, possibly empty list of [`PathComponent`]s plus an independent
/// top-level annotation filter and a callback.
///
/// Invariant: the empty path with its top-level filter matches exactly the
/// values at the stream's current root depth whose annotation list equals
/// the filter.
pub struct SearchPath<T> {
    components: Vec<PathComponent>,
    top_level_annotations: Vec<String>,
    callback: Callback<T>,
}

impl<T> SearchPath<T> {
    /// Build a search path from its components, top-level annotation
    /// filter, and callback.
    pub fn new(
        components: Vec<PathComponent>,
        top_level_annotations: Vec<String>,
        callback: Callback<T>,
    ) -> Self {
        Self {
            components,
            top_level_annotations,
            callback,
        }
    }

    /// The number of components in this path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Is this the empty path (matches at the root)?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The component at the given index, if any.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&PathComponent> {
        self.components.get(index)
    }

    /// All components, in registration order.
    #[must_use]
    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    /// The path's top-level annotation filter.
    #[must_use]
    pub fn top_level_annotations(&self) -> &[String] {
        &self.top_level_annotations
    }

    /// Invoke the callback for a terminal match, returning its requested
    /// step-out count.
    pub fn invoke(
        &mut self,
        cursor: &mut dyn crate::Cursor,
        user: &mut T,
    ) -> Result<usize, PathExtractionError> {
        (self.callback)(cursor, user)
    }

    /// The `partialMatchAt` contract: does this path partially match at the
    /// context's `path_component_index`?
    ///
    /// - `i == 0`: match the top-level annotation filter against the
    ///   current value's annotations.
    /// - `0 < i <= len()`: the `(i - 1)`-th component matches.
    /// - `i > len()`: never matches (the path is already exhausted).
    #[must_use]
    pub fn partial_match_at(&self, ctx: &MatchContext) -> bool {
        let i = ctx.path_component_index;
        if i == 0 {
            annotation_list_matches(
                &self.top_level_annotations,
                &ctx.annotations,
                ctx.config.case_insensitive_annotations(),
            )
        } else if i <= self.len() {
            self.components[i - 1].matches(ctx)
        } else {
            false
        }
    }

    /// Is `path_component_index` at this path's terminal position (all
    /// components consumed)?
    #[must_use]
    pub fn is_terminal_at(&self, path_component_index: usize) -> bool {
        path_component_index == self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExtractorConfig;

    fn ctx(path_component_index: usize, annotations: &[&str]) -> MatchContext {
        MatchContext {
            path_component_index,
            reader_container_index: 0,
            field_name: Some("foo".to_string()),
            annotations: annotations.iter().map(|s| s.to_string()).collect(),
            config: ExtractorConfig::default(),
        }
    }

    fn noop_path(components: Vec<PathComponent>, annotations: Vec<String>) -> SearchPath<()> {
        SearchPath::new(components, annotations, Box::new(|_, _| Ok(0)))
    }

    #[test]
    fn empty_path_matches_root_with_matching_top_level_filter() {
        let path = noop_path(vec![], vec!["A".to_string()]);
        assert!(path.partial_match_at(&ctx(0, &["A"])));
        assert!(!path.partial_match_at(&ctx(0, &[])));
    }

    #[test]
    fn empty_path_with_no_filter_matches_any_root_annotations() {
        let path = noop_path(vec![], vec![]);
        assert!(path.partial_match_at(&ctx(0, &["whatever"])));
    }

    #[test]
    fn component_index_dispatches_to_the_right_component() {
        let path = noop_path(
            vec![PathComponent::field("foo"), PathComponent::field("bar")],
            vec![],
        );
        let mut c = ctx(1, &[]);
        c.field_name = Some("foo".to_string());
        assert!(path.partial_match_at(&c));

        let mut c = ctx(2, &[]);
        c.field_name = Some("bar".to_string());
        assert!(path.partial_match_at(&c));
    }

    #[test]
    fn index_past_length_never_matches() {
        let path = noop_path(vec![PathComponent::field("foo")], vec![]);
        assert!(!path.partial_match_at(&ctx(2, &[])));
    }

    #[test]
    fn is_terminal_at_checks_exhaustion() {
        let path = noop_path(vec![PathComponent::field("foo")], vec![]);
        assert!(!path.is_terminal_at(0));
        assert!(path.is_terminal_at(1));
    }
}
