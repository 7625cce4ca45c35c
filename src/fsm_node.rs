//! `FsmNode` — one state of the compiled transition table.
//!
//! Grounded on the teacher's `on_match.rs` (an enum enforcing an exclusivity
//! invariant — Action XOR nested Matcher — at the type level) and
//! `matcher_tree.rs` (`HashMap`-keyed dispatch with a single chosen lookup
//! strategy per node). Here the exclusivity invariant is "at most one kind
//! of child transition", enforced by making the child map itself a sum
//! type rather than four optional fields that could be populated together.

use std::collections::HashMap;

use crate::error::PathExtractionError;

/// One node of the FSM's transition tree.
///
/// `terminal` from the design notes ("no further transitions registered
/// beneath it") is not stored — it is exactly `matches!(transitions, None)`,
/// so [`FsmNode::is_terminal`] derives it instead of keeping a redundant
/// flag in sync.
#[derive(Debug, Default)]
pub struct FsmNode {
    transitions: Transitions,
    callback: Option<usize>,
}

#[derive(Debug, Default)]
enum Transitions {
    #[default]
    None,
    Field(HashMap<String, FsmNode>),
    CaseInsensitiveField(HashMap<String, FsmNode>),
    Index(HashMap<i64, FsmNode>),
    Wildcard(Box<FsmNode>),
    Annotations(Vec<(Vec<String>, FsmNode)>),
}

fn conflicting_kind() -> PathExtractionError {
    PathExtractionError::UnsupportedPathExpression {
        reason: "node would have more than one kind of child transition".to_string(),
    }
}

impl FsmNode {
    /// A fresh node with no transitions and no callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The index into the owning matcher's path list whose callback fires
    /// at this node, if one was registered here.
    #[must_use]
    pub fn callback(&self) -> Option<usize> {
        self.callback
    }

    /// Has no child transitions been registered beneath this node?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.transitions, Transitions::None)
    }

    /// Does descending into this node's children require the current value
    /// to specifically be a struct (as opposed to any container)?
    #[must_use]
    pub fn requires_struct(&self) -> bool {
        matches!(
            self.transitions,
            Transitions::Field(_) | Transitions::CaseInsensitiveField(_)
        )
    }

    /// Attach a callback to this node. Rejected if one is already set —
    /// two paths may not collide on the same state.
    pub fn set_callback(&mut self, index: usize) -> Result<(), PathExtractionError> {
        if self.callback.is_some() {
            return Err(PathExtractionError::UnsupportedPathExpression {
                reason: "two paths collide on the same callback slot".to_string(),
            });
        }
        self.callback = Some(index);
        Ok(())
    }

    /// Get-or-insert the field-keyed child for `name`, under the given
    /// field case-sensitivity policy. Errors if this node already holds a
    /// different kind of child transition.
    pub fn field_child(
        &mut self,
        name: &str,
        case_insensitive: bool,
    ) -> Result<&mut FsmNode, PathExtractionError> {
        match &self.transitions {
            Transitions::None => {
                self.transitions = if case_insensitive {
                    Transitions::CaseInsensitiveField(HashMap::new())
                } else {
                    Transitions::Field(HashMap::new())
                };
            }
            Transitions::Field(_) if !case_insensitive => {}
            Transitions::CaseInsensitiveField(_) if case_insensitive => {}
            _ => return Err(conflicting_kind()),
        }
        let key = if case_insensitive {
            name.to_lowercase()
        } else {
            name.to_string()
        };
        let map = match &mut self.transitions {
            Transitions::Field(map) | Transitions::CaseInsensitiveField(map) => map,
            _ => unreachable!("kind fixed above"),
        };
        Ok(map.entry(key).or_insert_with(FsmNode::new))
    }

    /// Get-or-insert the index-keyed child for `position`.
    pub fn index_child(&mut self, position: i64) -> Result<&mut FsmNode, PathExtractionError> {
        match &self.transitions {
            Transitions::None => self.transitions = Transitions::Index(HashMap::new()),
            Transitions::Index(_) => {}
            _ => return Err(conflicting_kind()),
        }
        let Transitions::Index(map) = &mut self.transitions else {
            unreachable!("kind fixed above");
        };
        Ok(map.entry(position).or_insert_with(FsmNode::new))
    }

    /// Get-or-insert the unique wildcard child.
    pub fn wildcard_child(&mut self) -> Result<&mut FsmNode, PathExtractionError> {
        match &self.transitions {
            Transitions::None => self.transitions = Transitions::Wildcard(Box::new(FsmNode::new())),
            Transitions::Wildcard(_) => {}
            _ => return Err(conflicting_kind()),
        }
        let Transitions::Wildcard(node) = &mut self.transitions else {
            unreachable!("kind fixed above");
        };
        Ok(node)
    }

    /// Get-or-insert the child keyed by the exact ordered annotation tuple.
    pub fn annotations_child(
        &mut self,
        tuple: Vec<String>,
    ) -> Result<&mut FsmNode, PathExtractionError> {
        match &self.transitions {
            Transitions::None => self.transitions = Transitions::Annotations(Vec::new()),
            Transitions::Annotations(_) => {}
            _ => return Err(conflicting_kind()),
        }
        let Transitions::Annotations(list) = &mut self.transitions else {
            unreachable!("kind fixed above");
        };
        if let Some(pos) = list.iter().position(|(t, _)| *t == tuple) {
            Ok(&mut list[pos].1)
        } else {
            list.push((tuple, FsmNode::new()));
            let last = list.len() - 1;
            Ok(&mut list[last].1)
        }
    }

    /// Dispatch a transition for a value positioned with the given
    /// properties. `position = -1` and `field_name = None` is the root-level
    /// call: only a `Wildcard`/`Annotations`-kind root can answer it, which
    /// the builder guarantees by construction.
    #[must_use]
    pub fn transition(
        &self,
        field_name: Option<&str>,
        position: i64,
        annotations: &[String],
    ) -> Option<&FsmNode> {
        match &self.transitions {
            Transitions::None => None,
            Transitions::Field(map) => field_name.and_then(|name| map.get(name)),
            Transitions::CaseInsensitiveField(map) => {
                field_name.and_then(|name| map.get(&name.to_lowercase()))
            }
            Transitions::Index(map) => map.get(&position),
            Transitions::Wildcard(node) => Some(node),
            Transitions::Annotations(list) => list
                .iter()
                .find(|(tuple, _)| tuple.as_slice() == annotations)
                .map(|(_, node)| node),
        }
    }
}
