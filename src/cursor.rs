//! `Cursor` — the external streaming reader this crate consumes.
//!
//! The matching engine never parses bytes or text itself; it drives an
//! abstract cursor positioned over a stream of values and asks it questions
//! (`kind`, `field_name`, `annotations`, `depth`) as it walks. The concrete
//! binary/text reader behind a `Cursor` implementation — and any
//! materialization of matched values into a document-object model — is the
//! caller's business, not this crate's.
//!
//! A `Cursor` is the caller's resource: `match_stream`/`match_current_value`
//! borrow it exclusively for the duration of one call and never retain a
//! reference beyond it.

use std::fmt::Debug;

/// The kind of a value the cursor is positioned on.
///
/// Mirrors the value model of the data format: the three container kinds
/// (each of which may additionally hold fields if it is a struct), the
/// scalar kinds, and null (which carries no children regardless of its
/// declared type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A struct: an unordered container whose children each have a field name.
    Struct,
    /// A list: an ordered, unnamed container.
    List,
    /// An s-expression: an ordered, unnamed container (Lisp-like).
    Sexp,
    /// A scalar value of the given kind.
    Scalar(ScalarKind),
    /// A null value. Null values have no children, whatever their declared
    /// type — navigating into one is never a type error, it is simply a
    /// transition that finds nothing.
    Null,
}

impl ValueKind {
    /// Does this kind hold ordered or named children?
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Struct | Self::List | Self::Sexp)
    }

    /// Is this specifically a struct (the only container with field names)?
    #[must_use]
    pub fn is_struct(self) -> bool {
        matches!(self, Self::Struct)
    }

    /// Is this a null value?
    #[must_use]
    pub fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }
}

/// The scalar value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Decimal,
    Timestamp,
    String,
    Symbol,
    Blob,
    Clob,
}

/// Abstract interface over a streaming, depth-first cursor positioned over a
/// sequence of values.
///
/// Implementations back this with the real binary or text reader for the
/// data format. This crate only ever consumes the trait, never a concrete
/// reader — see the crate-level Non-goals.
///
/// # Thread Safety
///
/// A `Cursor` is **not** required to be `Send + Sync`: per the concurrency
/// model, a cursor is the caller's resource, borrowed exclusively for one
/// `match_stream`/`match_current_value` call and never shared or retained.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Cursor`",
    label = "this type cannot be driven by the path-extraction engine",
    note = "Cursor is the abstract streaming-reader interface (see §6.2 of the design) — implement next/current_kind/is_in_struct/field_name/annotations/depth/step_in/step_out over your reader"
)]
pub trait Cursor: Debug {
    /// Advance to the next value in the current container (or at the top
    /// level). Returns the new value's kind, or `None` if the container (or
    /// stream) is exhausted.
    fn next(&mut self) -> Option<ValueKind>;

    /// The kind of the value currently positioned on, if any.
    fn current_kind(&self) -> Option<ValueKind>;

    /// Is the current value a field of a struct?
    fn is_in_struct(&self) -> bool;

    /// The field name of the current value, if it is a struct field.
    fn field_name(&self) -> Option<&str>;

    /// The ordered annotation list of the current value. Empty if none.
    fn annotations(&self) -> &[String];

    /// The cursor's current depth (0 at the top level).
    fn depth(&self) -> usize;

    /// Step into the current container value. The cursor is positioned
    /// before the first child; call `next` to reach it.
    fn step_in(&mut self);

    /// Step out of the current container, returning to the parent's
    /// position immediately after the value that was stepped into.
    fn step_out(&mut self);
}
