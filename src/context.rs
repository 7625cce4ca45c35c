//! `MatchContext` and `ExtractorConfig` — the per-value context a
//! [`PathComponent`](crate::PathComponent) or [`SearchPath`](crate::SearchPath)
//! is matched against.
//!
//! Mirrors the teacher's convention of a small `Config` struct shaped 1:1
//! after the runtime types it configures, kept deliberately dumb (no
//! validation logic lives here — construction is infallible).

/// Case-sensitivity and relative-path policy shared by both matchers.
///
/// Three independent flags, with one implication: `match_case_insensitive_all`
/// implies `match_case_insensitive_fields`. Query the policy through
/// [`case_insensitive_fields`](Self::case_insensitive_fields) and
/// [`case_insensitive_annotations`](Self::case_insensitive_annotations) rather
/// than the raw fields, so callers never have to re-derive the implication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractorConfig {
    /// Allow matching against a cursor that does not start at depth 0.
    pub match_relative_paths: bool,
    /// Case-insensitive matching for both field names and annotations.
    pub match_case_insensitive_all: bool,
    /// Case-insensitive matching for field names only.
    pub match_case_insensitive_fields: bool,
}

impl ExtractorConfig {
    /// Should field-name comparisons ignore ASCII case?
    #[must_use]
    pub fn case_insensitive_fields(&self) -> bool {
        self.match_case_insensitive_all || self.match_case_insensitive_fields
    }

    /// Should annotation-list comparisons ignore ASCII case?
    #[must_use]
    pub fn case_insensitive_annotations(&self) -> bool {
        self.match_case_insensitive_all
    }
}

/// The transient, per-value context a path component is matched against.
///
/// Built fresh for each value the matcher visits; never retained past the
/// call that built it. Unlike the teacher's `Config`-mirrors-runtime-type
/// convention, this does not hold the cursor itself (`reader` in the design
/// notes) — only the handful of facts actually read off it (`field_name`,
/// `annotations`, `reader_container_index`), which sidesteps holding a
/// second borrow of the cursor while the matcher still needs one to drive
/// traversal.
#[derive(Debug, Clone)]
pub struct MatchContext {
    /// How many components of the path have been consumed in reaching this
    /// value. `0` means "at the root level of the match attempt".
    pub path_component_index: usize,
    /// The 0-based position of this value within its immediate parent
    /// container.
    pub reader_container_index: usize,
    /// The field name of the current value, if it is a struct field.
    pub field_name: Option<String>,
    /// Snapshot of the current value's annotation list, captured before any
    /// read.
    pub annotations: Vec<String>,
    /// Case-sensitivity and relative-path policy in effect.
    pub config: ExtractorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_all_implies_fields() {
        let cfg = ExtractorConfig {
            match_case_insensitive_all: true,
            ..Default::default()
        };
        assert!(cfg.case_insensitive_fields());
        assert!(cfg.case_insensitive_annotations());
    }

    #[test]
    fn fields_only_does_not_imply_annotations() {
        let cfg = ExtractorConfig {
            match_case_insensitive_fields: true,
            ..Default::default()
        };
        assert!(cfg.case_insensitive_fields());
        assert!(!cfg.case_insensitive_annotations());
    }

    #[test]
    fn default_is_fully_case_sensitive_and_absolute() {
        let cfg = ExtractorConfig::default();
        assert!(!cfg.case_insensitive_fields());
        assert!(!cfg.case_insensitive_annotations());
        assert!(!cfg.match_relative_paths);
    }
}
