//! `FsmBuilder` — folds a set of [`SearchPath`]s into an [`FsmNode`] tree,
//! or reports why it can't.
//!
//! Grounded on the teacher's `registry.rs` build-time-rejection idiom:
//! validate once at construction, never at match time. The "synthesize an
//! implicit wildcard step per path" normalization is this module's own —
//! no teacher file needed that trick, since `MatcherTree` dispatches on a
//! single key rather than a whole path.

use crate::error::PathExtractionError;
use crate::fsm_matcher::FsmMatcher;
use crate::fsm_node::FsmNode;
use crate::path_component::PathComponent;
use crate::{context::ExtractorConfig, search_path::SearchPath};

/// Compiles registered search paths into an [`FsmMatcher`].
pub struct FsmBuilder;

impl FsmBuilder {
    /// Attempt to compile `paths` into an FSM under `config`. On failure,
    /// `paths` is returned alongside the error so the caller (the
    /// non-strict `Builder::build`) can fall back to the tree-walk matcher
    /// without re-registering anything.
    pub fn build<T>(
        paths: Vec<SearchPath<T>>,
        config: ExtractorConfig,
        strict_typing: bool,
    ) -> Result<FsmMatcher<T>, (Vec<SearchPath<T>>, PathExtractionError)> {
        if config.match_case_insensitive_all && paths.iter().any(has_any_annotation_filter) {
            let reason = "case-insensitive-all matching with an annotation filter is not \
                supported by the FSM matcher"
                .to_string();
            return Err((paths, PathExtractionError::UnsupportedPathExpression { reason }));
        }

        let mut root = FsmNode::new();
        for (index, path) in paths.iter().enumerate() {
            if let Err(err) = Self::fold_path(&mut root, path, config, index) {
                return Err((paths, err));
            }
        }
        Ok(FsmMatcher::new(root, paths, strict_typing))
    }

    fn fold_path<T>(
        root: &mut FsmNode,
        path: &SearchPath<T>,
        config: ExtractorConfig,
        index: usize,
    ) -> Result<(), PathExtractionError> {
        let mut node = if path.top_level_annotations().is_empty() {
            root.wildcard_child()?
        } else {
            root.annotations_child(path.top_level_annotations().to_vec())?
        };
        for component in path.components() {
            node = Self::fold_component(node, component, config)?;
        }
        node.set_callback(index)
    }

    fn fold_component<'a>(
        node: &'a mut FsmNode,
        component: &PathComponent,
        config: ExtractorConfig,
    ) -> Result<&'a mut FsmNode, PathExtractionError> {
        match component {
            PathComponent::Field { name, annotations } => {
                reject_annotation_on_non_wildcard(annotations)?;
                node.field_child(name, config.case_insensitive_fields())
            }
            PathComponent::Index { position, annotations } => {
                reject_annotation_on_non_wildcard(annotations)?;
                node.index_child(*position)
            }
            PathComponent::Wildcard { annotations } => {
                if annotations.is_empty() {
                    node.wildcard_child()
                } else {
                    node.annotations_child(annotations.clone())
                }
            }
        }
    }
}

fn reject_annotation_on_non_wildcard(annotations: &[String]) -> Result<(), PathExtractionError> {
    if annotations.is_empty() {
        Ok(())
    } else {
        Err(PathExtractionError::UnsupportedPathExpression {
            reason: "an annotation filter may only appear on a wildcard component in the FSM \
                matcher"
                .to_string(),
        })
    }
}

fn has_any_annotation_filter<T>(path: &SearchPath<T>) -> bool {
    !path.top_level_annotations().is_empty()
        || path.components().iter().any(|c| !c.annotations().is_empty())
}
