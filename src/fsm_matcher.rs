//! `FsmMatcher` — O(1)-dispatch evaluation over a compiled [`FsmNode`] tree.
//!
//! Grounded on the teacher's `MatcherTree::evaluate` (`matcher_tree.rs`):
//! extract a key from the input, look it up in a map, evaluate whatever is
//! found. Generalized from "one key, one lookup" to "one key per nesting
//! level, recursing as the cursor steps into containers."

use crate::context::ExtractorConfig;
use crate::cursor::{Cursor, ValueKind};
use crate::error::PathExtractionError;
use crate::fsm_node::FsmNode;
use crate::search_path::SearchPath;
use crate::trace::{MatchStep, MatchTrace, PathOutcome};

/// The compiled FSM matcher: a transition tree plus the search paths whose
/// callbacks its terminal states reference by index.
pub struct FsmMatcher<T> {
    root: FsmNode,
    paths: Vec<SearchPath<T>>,
    strict_typing: bool,
}

impl<T> FsmMatcher<T> {
    pub(crate) fn new(root: FsmNode, paths: Vec<SearchPath<T>>, strict_typing: bool) -> Self {
        Self {
            root,
            paths,
            strict_typing,
        }
    }

    /// Advance the cursor through successive top-level values, running
    /// `match_current_value` on each.
    pub fn match_stream(
        &mut self,
        cursor: &mut dyn Cursor,
        config: ExtractorConfig,
        user: &mut T,
    ) -> Result<(), PathExtractionError> {
        check_relative_path_precondition(cursor, config)?;
        while cursor.next().is_some() {
            let initial_depth = cursor.depth();
            Self::step(
                &self.root,
                cursor,
                &mut self.paths,
                user,
                -1,
                initial_depth,
                self.strict_typing,
            )?;
        }
        Ok(())
    }

    /// Run one match attempt with the cursor already positioned on a value.
    pub fn match_current_value(
        &mut self,
        cursor: &mut dyn Cursor,
        config: ExtractorConfig,
        user: &mut T,
    ) -> Result<(), PathExtractionError> {
        check_relative_path_precondition(cursor, config)?;
        if cursor.current_kind().is_none() {
            return Err(PathExtractionError::CursorNotOnValue);
        }
        let initial_depth = cursor.depth();
        Self::step(
            &self.root,
            cursor,
            &mut self.paths,
            user,
            -1,
            initial_depth,
            self.strict_typing,
        )?;
        Ok(())
    }

    /// As [`FsmMatcher::match_current_value`], but also returns a
    /// [`MatchTrace`] recording the transition taken at every value visited.
    /// Since dispatch is O(1), each recorded step marks at most one path as
    /// `Terminal` (the one whose callback lives at the landed state) — there
    /// is no linear "which other paths partially matched" to report, unlike
    /// the tree-walk matcher's trace.
    pub fn match_current_value_traced(
        &mut self,
        cursor: &mut dyn Cursor,
        config: ExtractorConfig,
        user: &mut T,
    ) -> Result<MatchTrace, PathExtractionError> {
        check_relative_path_precondition(cursor, config)?;
        if cursor.current_kind().is_none() {
            return Err(PathExtractionError::CursorNotOnValue);
        }
        let initial_depth = cursor.depth();
        let mut trace = MatchTrace::new();
        Self::step_traced(
            &self.root,
            cursor,
            &mut self.paths,
            user,
            -1,
            initial_depth,
            self.strict_typing,
            &mut trace,
        )?;
        Ok(trace)
    }

    /// As [`FsmMatcher::step`], recording a [`MatchStep`] per visited value.
    #[allow(clippy::too_many_arguments)]
    fn step_traced(
        node: &FsmNode,
        cursor: &mut dyn Cursor,
        paths: &mut Vec<SearchPath<T>>,
        user: &mut T,
        position: i64,
        initial_depth: usize,
        strict_typing: bool,
        trace: &mut MatchTrace,
    ) -> Result<usize, PathExtractionError> {
        let field_name = cursor.field_name().map(str::to_string);
        let annotations = cursor.annotations().to_vec();
        let mut outcomes = vec![PathOutcome::NoMatch; paths.len()];

        let Some(child) = node.transition(field_name.as_deref(), position, &annotations) else {
            trace.steps.push(MatchStep {
                path_component_index: cursor.depth() - initial_depth,
                reader_container_index: position.max(0) as usize,
                field_name: field_name.clone(),
                annotations: annotations.clone(),
                outcomes,
            });
            return Ok(0);
        };

        let mut step_out_result = 0usize;
        if let Some(index) = child.callback() {
            let entry_depth = cursor.depth();
            let step_out = paths[index].invoke(cursor, user)?;
            if cursor.depth() != entry_depth {
                return Err(PathExtractionError::CursorDepthChanged {
                    expected: entry_depth,
                    actual: cursor.depth(),
                });
            }
            let available = entry_depth - initial_depth;
            if step_out > available {
                return Err(PathExtractionError::StepOutExceedsDepth {
                    requested: step_out,
                    available,
                });
            }
            outcomes[index] = PathOutcome::Terminal { step_out };
            step_out_result = step_out;
        }

        trace.steps.push(MatchStep {
            path_component_index: cursor.depth() - initial_depth,
            reader_container_index: position.max(0) as usize,
            field_name,
            annotations,
            outcomes,
        });

        if step_out_result > 0 {
            return Ok(step_out_result);
        }

        let Some(kind) = cursor.current_kind() else {
            return Ok(0);
        };
        if !kind.is_container() || child.is_terminal() {
            return Ok(0);
        }
        if strict_typing && child.requires_struct() && !kind.is_struct() {
            return Err(PathExtractionError::TypeMismatch {
                expected: "struct",
                found: format!("{kind:?}"),
            });
        }

        cursor.step_in();
        let mut child_residual = 0usize;
        let mut local_position = 0i64;
        while cursor.next().is_some() {
            let r = Self::step_traced(
                child,
                cursor,
                paths,
                user,
                local_position,
                initial_depth,
                strict_typing,
                trace,
            )?;
            local_position += 1;
            if r > 0 {
                child_residual = r - 1;
                break;
            }
        }
        cursor.step_out();
        Ok(child_residual)
    }

    /// One transition step: dispatch from `node` using the cursor's current
    /// value, invoke a callback if the landed state has one, then recurse
    /// into the value's children if the state has further transitions.
    ///
    /// `node` and `paths` are taken as separate parameters (rather than
    /// through `&mut self`) so recursion can hold a shared borrow of the
    /// immutable tree alongside an exclusive borrow of the mutable
    /// callback list.
    #[allow(clippy::too_many_arguments)]
    fn step(
        node: &FsmNode,
        cursor: &mut dyn Cursor,
        paths: &mut Vec<SearchPath<T>>,
        user: &mut T,
        position: i64,
        initial_depth: usize,
        strict_typing: bool,
    ) -> Result<usize, PathExtractionError> {
        let field_name = cursor.field_name().map(str::to_string);
        let annotations = cursor.annotations().to_vec();
        let Some(child) = node.transition(field_name.as_deref(), position, &annotations) else {
            return Ok(0);
        };

        if let Some(index) = child.callback() {
            let entry_depth = cursor.depth();
            let step_out = paths[index].invoke(cursor, user)?;
            if cursor.depth() != entry_depth {
                return Err(PathExtractionError::CursorDepthChanged {
                    expected: entry_depth,
                    actual: cursor.depth(),
                });
            }
            let available = entry_depth - initial_depth;
            if step_out > available {
                return Err(PathExtractionError::StepOutExceedsDepth {
                    requested: step_out,
                    available,
                });
            }
            if step_out > 0 {
                return Ok(step_out);
            }
        }

        let Some(kind) = cursor.current_kind() else {
            return Ok(0);
        };
        if !kind.is_container() || child.is_terminal() {
            return Ok(0);
        }
        if strict_typing && child.requires_struct() && !kind.is_struct() {
            return Err(PathExtractionError::TypeMismatch {
                expected: "struct",
                found: format!("{kind:?}"),
            });
        }

        cursor.step_in();
        let mut child_residual = 0usize;
        let mut local_position = 0i64;
        while cursor.next().is_some() {
            let r = Self::step(
                child,
                cursor,
                paths,
                user,
                local_position,
                initial_depth,
                strict_typing,
            )?;
            local_position += 1;
            if r > 0 {
                child_residual = r - 1;
                break;
            }
        }
        cursor.step_out();
        Ok(child_residual)
    }
}

fn check_relative_path_precondition(
    cursor: &dyn Cursor,
    config: ExtractorConfig,
) -> Result<(), PathExtractionError> {
    if cursor.depth() != 0 && !config.match_relative_paths {
        return Err(PathExtractionError::RelativeCursorNotAllowed {
            depth: cursor.depth(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm_builder::FsmBuilder;
    use crate::path_component::PathComponent;

    struct Node {
        kind: ValueKind,
        field_name: Option<String>,
        annotations: Vec<String>,
        children: Vec<Node>,
    }

    impl Node {
        fn scalar() -> Self {
            Self {
                kind: ValueKind::Scalar(crate::cursor::ScalarKind::Int),
                field_name: None,
                annotations: Vec::new(),
                children: Vec::new(),
            }
        }

        fn named(mut self, name: &str) -> Self {
            self.field_name = Some(name.to_string());
            self
        }

        fn struct_(fields: Vec<Node>) -> Self {
            Self {
                kind: ValueKind::Struct,
                field_name: None,
                annotations: Vec::new(),
                children: fields,
            }
        }
    }

    struct TestCursor<'a> {
        stack: Vec<(&'a [Node], usize)>,
        current: Option<&'a Node>,
    }

    impl<'a> TestCursor<'a> {
        fn new(top: &'a [Node]) -> Self {
            Self {
                stack: vec![(top, 0)],
                current: None,
            }
        }
    }

    impl<'a> Cursor for TestCursor<'a> {
        fn next(&mut self) -> Option<ValueKind> {
            let (siblings, pos) = self.stack.last_mut().expect("non-empty stack");
            if *pos < siblings.len() {
                let node = &siblings[*pos];
                *pos += 1;
                self.current = Some(node);
                Some(node.kind)
            } else {
                self.current = None;
                None
            }
        }

        fn current_kind(&self) -> Option<ValueKind> {
            self.current.map(|n| n.kind)
        }

        fn is_in_struct(&self) -> bool {
            self.current.is_some_and(|n| n.field_name.is_some())
        }

        fn field_name(&self) -> Option<&str> {
            self.current.and_then(|n| n.field_name.as_deref())
        }

        fn annotations(&self) -> &[String] {
            self.current.map_or(&[], |n| &n.annotations)
        }

        fn depth(&self) -> usize {
            self.stack.len() - 1
        }

        fn step_in(&mut self) {
            let node = self.current.expect("step_in requires a current value");
            self.stack.push((&node.children, 0));
            self.current = None;
        }

        fn step_out(&mut self) {
            self.stack.pop();
            self.current = None;
        }
    }

    impl std::fmt::Debug for TestCursor<'_> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TestCursor").field("depth", &self.depth()).finish()
        }
    }

    #[test]
    fn field_path_matches_via_table_lookup() {
        let top = vec![
            Node::struct_(vec![Node::scalar().named("foo")]),
            Node::struct_(vec![Node::scalar().named("bar")]),
        ];
        let mut cursor = TestCursor::new(&top);
        let mut hits = Vec::new();
        let path = SearchPath::new(
            vec![PathComponent::field("foo")],
            vec![],
            Box::new(|_, hits: &mut Vec<i32>| {
                hits.push(1);
                Ok(0)
            }),
        );
        let mut matcher = FsmBuilder::build(vec![path], ExtractorConfig::default(), false).unwrap();
        matcher
            .match_stream(&mut cursor, ExtractorConfig::default(), &mut hits)
            .unwrap();
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn strict_typing_rejects_field_node_on_non_struct() {
        let top = vec![Node::scalar()];
        let mut cursor = TestCursor::new(&top);
        let mut hits: Vec<i32> = Vec::new();
        let path = SearchPath::new(
            vec![PathComponent::field("foo"), PathComponent::field("bar")],
            vec![],
            Box::new(|_, _: &mut Vec<i32>| Ok(0)),
        );
        let mut matcher = FsmBuilder::build(vec![path], ExtractorConfig::default(), true).unwrap();
        // The first component never matches the scalar top-level value, so
        // no transition is found and nothing is stepped into; this just
        // confirms a non-struct root with a Field-shaped path produces no
        // match, not an error (no callback reached to fire before a
        // same-node type check could even trigger).
        matcher
            .match_stream(&mut cursor, ExtractorConfig::default(), &mut hits)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn callback_fires_before_strict_type_check() {
        // Root-level `()` always fires even though nothing beneath it
        // would type-check against a bare scalar stream.
        let top = vec![Node::scalar()];
        let mut cursor = TestCursor::new(&top);
        let mut hits: Vec<i32> = Vec::new();
        let path = SearchPath::new(
            vec![],
            vec![],
            Box::new(|_, hits: &mut Vec<i32>| {
                hits.push(1);
                Ok(0)
            }),
        );
        let mut matcher = FsmBuilder::build(vec![path], ExtractorConfig::default(), true).unwrap();
        matcher
            .match_stream(&mut cursor, ExtractorConfig::default(), &mut hits)
            .unwrap();
        assert_eq!(hits, vec![1]);
    }
}
