//! `PathComponent` — one step of a registered search path.
//!
//! A closed, four-shaped sum type: field name, positional index, wildcard,
//! and annotated wildcard. Every component may additionally carry an
//! annotation filter; for `Field`/`Index`/plain `Wildcard` this filter comes
//! from the tree-walk-only `annotatedWith` form, and for the annotated
//! wildcard it *is* the component's defining payload (`A::*`). Both are
//! represented by the same `annotations` field below, which keeps the
//! matching logic — "structural predicate AND annotation filter" — in one
//! place instead of duplicated per variant.

use crate::context::MatchContext;

/// One component of a [`SearchPath`](crate::SearchPath).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// Matches a struct field with this name, under the configured
    /// case-sensitivity policy.
    Field {
        /// The field name to match.
        name: String,
        /// Required annotation list (empty = no filter). Tree-walk only.
        annotations: Vec<String>,
    },
    /// Matches the n-th child (0-based, insertion order) of the immediate
    /// parent container, regardless of container kind.
    Index {
        /// The 0-based child position to match.
        position: i64,
        /// Required annotation list (empty = no filter). Tree-walk only.
        annotations: Vec<String>,
    },
    /// Matches any child of any container kind. A non-empty `annotations`
    /// list makes this the "annotated wildcard" form (`A::*`), which is the
    /// only annotated shape the FSM matcher can compile.
    Wildcard {
        /// Required annotation list (empty = plain wildcard).
        annotations: Vec<String>,
    },
}

impl PathComponent {
    /// A field-name component with no annotation filter.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    /// A positional-index component with no annotation filter.
    #[must_use]
    pub fn index(position: i64) -> Self {
        Self::Index {
            position,
            annotations: Vec::new(),
        }
    }

    /// A plain wildcard component, matching any child.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::Wildcard {
            annotations: Vec::new(),
        }
    }

    /// An annotated wildcard: matches any child whose annotation list
    /// equals `annotations` exactly, in order.
    #[must_use]
    pub fn annotated_wildcard(annotations: Vec<String>) -> Self {
        Self::Wildcard { annotations }
    }

    /// Attach an annotation filter to this component, replacing any
    /// existing one. Used by the parser's tree-walk-only `annotatedWith`
    /// form, which can wrap a `Field` or `Index` component as well as a
    /// wildcard.
    #[must_use]
    pub fn with_annotations(mut self, new_annotations: Vec<String>) -> Self {
        match &mut self {
            Self::Field { annotations, .. }
            | Self::Index { annotations, .. }
            | Self::Wildcard { annotations } => *annotations = new_annotations,
        }
        self
    }

    /// This component's annotation filter. Empty means "no filter".
    #[must_use]
    pub fn annotations(&self) -> &[String] {
        match self {
            Self::Field { annotations, .. }
            | Self::Index { annotations, .. }
            | Self::Wildcard { annotations } => annotations,
        }
    }

    /// Is this a plain or annotated wildcard?
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard { .. })
    }

    /// Is this a wildcard carrying a non-empty annotation filter — the only
    /// annotated shape the FSM matcher can represent?
    #[must_use]
    pub fn is_annotated_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard { annotations } if !annotations.is_empty())
    }

    /// Is this a field-name component?
    #[must_use]
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }

    /// Is this a positional-index component?
    #[must_use]
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index { .. })
    }

    /// Does this component match at the given context?
    ///
    /// Per the `partialMatchAt` contract: the structural predicate holds
    /// AND the annotation filter (if any) matches the value's annotations.
    #[must_use]
    pub fn matches(&self, ctx: &MatchContext) -> bool {
        self.annotations_match(ctx) && self.structural_match(ctx)
    }

    fn structural_match(&self, ctx: &MatchContext) -> bool {
        match self {
            Self::Field { name, .. } => ctx.field_name.as_deref().is_some_and(|field| {
                if ctx.config.case_insensitive_fields() {
                    field.eq_ignore_ascii_case(name)
                } else {
                    field == name
                }
            }),
            Self::Index { position, .. } => i64::try_from(ctx.reader_container_index)
                .is_ok_and(|index| index == *position),
            Self::Wildcard { .. } => true,
        }
    }

    fn annotations_match(&self, ctx: &MatchContext) -> bool {
        annotation_list_matches(
            self.annotations(),
            &ctx.annotations,
            ctx.config.case_insensitive_annotations(),
        )
    }
}

/// Does `actual` equal `filter` as an ordered list, under the given
/// case-sensitivity policy? An empty `filter` is treated as "no filter" —
/// always matches. Shared between [`PathComponent`] and
/// [`SearchPath`](crate::SearchPath)'s top-level filter, which apply the
/// identical rule.
#[must_use]
pub(crate) fn annotation_list_matches(filter: &[String], actual: &[String], case_insensitive: bool) -> bool {
    if filter.is_empty() {
        return true;
    }
    if case_insensitive {
        filter.len() == actual.len()
            && filter
                .iter()
                .zip(actual)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    } else {
        filter == actual
    }
}
