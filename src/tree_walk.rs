//! `TreeWalkMatcher` — the general matcher: a per-value linear check of
//! every still-partially-matched path, with a depth-stack of partial
//! matches (the `Tracker` of the design notes).
//!
//! Grounded on the teacher's `Matcher::evaluate` (`matcher.rs`): first-loop
//! evaluation over a list of candidates, propagating a nested-failure
//! signal upward. Generalized from "evaluate a flat predicate list once" to
//! "recurse one level per container, shrinking the candidate list to those
//! still partially matched."

use crate::context::{ExtractorConfig, MatchContext};
use crate::cursor::Cursor;
use crate::error::PathExtractionError;
use crate::search_path::SearchPath;
use crate::trace::{MatchStep, MatchTrace, PathOutcome};

/// The general tree-walk matcher: holds every registered [`SearchPath`] and
/// walks the cursor against all of them at once, one value at a time.
pub struct TreeWalkMatcher<T> {
    paths: Vec<SearchPath<T>>,
}

impl<T> TreeWalkMatcher<T> {
    /// Build a matcher from its registered search paths.
    #[must_use]
    pub fn new(paths: Vec<SearchPath<T>>) -> Self {
        Self { paths }
    }

    /// Advance the cursor through successive top-level values, running
    /// `match_value` on each.
    pub fn match_stream(
        &mut self,
        cursor: &mut dyn Cursor,
        config: ExtractorConfig,
        user: &mut T,
    ) -> Result<(), PathExtractionError> {
        check_relative_path_precondition(cursor, config)?;
        let frame: Vec<usize> = (0..self.paths.len()).collect();
        let mut position = 0usize;
        while cursor.next().is_some() {
            self.match_value(cursor, config, user, &frame, 0, position)?;
            position += 1;
        }
        Ok(())
    }

    /// Run one match attempt with the cursor already positioned on a value.
    /// On return the cursor is on the same value at the same depth.
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
        let frame: Vec<usize> = (0..self.paths.len()).collect();
        self.match_value(cursor, config, user, &frame, 0, 0)?;
        Ok(())
    }

    /// As [`TreeWalkMatcher::match_current_value`], but also returns a
    /// [`MatchTrace`] recording every path's outcome at every value visited.
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
        let frame: Vec<usize> = (0..self.paths.len()).collect();
        let mut trace = MatchTrace::new();
        self.match_value_traced(cursor, config, user, &frame, 0, 0, &mut trace)?;
        Ok(trace)
    }

    /// Process the value the cursor currently sits on, recursing into it if
    /// it is a container with still-partially-matched paths.
    ///
    /// Returns the residual step-out count still owed to the caller: `0`
    /// once fully absorbed, `N - 1` when this level consumed one unit of a
    /// deeper callback's step-out request.
    fn match_value(
        &mut self,
        cursor: &mut dyn Cursor,
        config: ExtractorConfig,
        user: &mut T,
        frame: &[usize],
        path_component_index: usize,
        reader_container_index: usize,
    ) -> Result<usize, PathExtractionError> {
        let kind = cursor.current_kind();
        let ctx = MatchContext {
            path_component_index,
            reader_container_index,
            field_name: cursor.field_name().map(str::to_string),
            annotations: cursor.annotations().to_vec(),
            config,
        };

        let mut next_frame = Vec::with_capacity(frame.len());
        let mut residual = 0usize;

        for &idx in frame {
            if !self.paths[idx].partial_match_at(&ctx) {
                continue;
            }
            if self.paths[idx].is_terminal_at(path_component_index) {
                let entry_depth = cursor.depth();
                let step_out = self.paths[idx].invoke(cursor, user)?;
                if cursor.depth() != entry_depth {
                    return Err(PathExtractionError::CursorDepthChanged {
                        expected: entry_depth,
                        actual: cursor.depth(),
                    });
                }
                if step_out > path_component_index {
                    return Err(PathExtractionError::StepOutExceedsDepth {
                        requested: step_out,
                        available: path_component_index,
                    });
                }
                residual = residual.max(step_out);
            } else {
                next_frame.push(idx);
            }
        }

        if residual > 0 {
            return Ok(residual);
        }

        let Some(kind) = kind else {
            return Ok(0);
        };
        if !kind.is_container() || next_frame.is_empty() {
            return Ok(0);
        }

        cursor.step_in();
        let mut child_residual = 0usize;
        let mut position = 0usize;
        while cursor.next().is_some() {
            let r = self.match_value(
                cursor,
                config,
                user,
                &next_frame,
                path_component_index + 1,
                position,
            )?;
            position += 1;
            if r > 0 {
                child_residual = r - 1;
                break;
            }
        }
        cursor.step_out();
        Ok(child_residual)
    }

    /// As [`TreeWalkMatcher::match_value`], recording a [`MatchStep`] per
    /// visited value into `trace`.
    #[allow(clippy::too_many_arguments)]
    fn match_value_traced(
        &mut self,
        cursor: &mut dyn Cursor,
        config: ExtractorConfig,
        user: &mut T,
        frame: &[usize],
        path_component_index: usize,
        reader_container_index: usize,
        trace: &mut MatchTrace,
    ) -> Result<usize, PathExtractionError> {
        let kind = cursor.current_kind();
        let ctx = MatchContext {
            path_component_index,
            reader_container_index,
            field_name: cursor.field_name().map(str::to_string),
            annotations: cursor.annotations().to_vec(),
            config,
        };

        let mut next_frame = Vec::with_capacity(frame.len());
        let mut residual = 0usize;
        let mut outcomes = vec![PathOutcome::NoMatch; self.paths.len()];

        for &idx in frame {
            if !self.paths[idx].partial_match_at(&ctx) {
                continue;
            }
            if self.paths[idx].is_terminal_at(path_component_index) {
                let entry_depth = cursor.depth();
                let step_out = self.paths[idx].invoke(cursor, user)?;
                if cursor.depth() != entry_depth {
                    return Err(PathExtractionError::CursorDepthChanged {
                        expected: entry_depth,
                        actual: cursor.depth(),
                    });
                }
                if step_out > path_component_index {
                    return Err(PathExtractionError::StepOutExceedsDepth {
                        requested: step_out,
                        available: path_component_index,
                    });
                }
                outcomes[idx] = PathOutcome::Terminal { step_out };
                residual = residual.max(step_out);
            } else {
                outcomes[idx] = PathOutcome::Partial;
                next_frame.push(idx);
            }
        }

        trace.steps.push(MatchStep {
            path_component_index,
            reader_container_index,
            field_name: ctx.field_name.clone(),
            annotations: ctx.annotations.clone(),
            outcomes,
        });

        if residual > 0 {
            return Ok(residual);
        }

        let Some(kind) = kind else {
            return Ok(0);
        };
        if !kind.is_container() || next_frame.is_empty() {
            return Ok(0);
        }

        cursor.step_in();
        let mut child_residual = 0usize;
        let mut position = 0usize;
        while cursor.next().is_some() {
            let r = self.match_value_traced(
                cursor,
                config,
                user,
                &next_frame,
                path_component_index + 1,
                position,
                trace,
            )?;
            position += 1;
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
