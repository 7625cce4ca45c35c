// Shared test fixture: an in-memory value tree plus a `Cursor` over it.
//
// Grounded on `carllerche-assert-struct/assert-struct/tests/util/mod.rs`'s
// convention of a small, reused helper module under `tests/common`.

use std::sync::{Arc, Mutex};

use ion_path_extractor::{Cursor, ScalarKind, ValueKind};

/// One node of an in-memory value tree: enough of the data format's value
/// model to drive every scenario in the integration tests.
pub struct Value {
    kind: ValueKind,
    field_name: Option<String>,
    annotations: Vec<String>,
    children: Vec<Value>,
    scalar: Option<i64>,
}

impl Value {
    pub fn int(n: i64) -> Self {
        Self {
            kind: ValueKind::Scalar(ScalarKind::Int),
            field_name: None,
            annotations: Vec::new(),
            children: Vec::new(),
            scalar: Some(n),
        }
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.field_name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotations: &[&str]) -> Self {
        self.annotations = annotations.iter().map(|s| (*s).to_string()).collect();
        self
    }

    pub fn struct_(fields: Vec<Value>) -> Self {
        Self {
            kind: ValueKind::Struct,
            field_name: None,
            annotations: Vec::new(),
            children: fields,
            scalar: None,
        }
    }

    pub fn list(children: Vec<Value>) -> Self {
        Self {
            kind: ValueKind::List,
            field_name: None,
            annotations: Vec::new(),
            children,
            scalar: None,
        }
    }
}

/// A depth-first `Cursor` over a borrowed slice of top-level [`Value`]s.
///
/// The `Cursor` trait this crate consumes has no accessor for a scalar's
/// actual value (see `cursor.rs`'s doc comment: a concrete reader's value
/// accessors live beyond the trait). Tests that need to assert on which
/// values matched read `last_scalar()` instead of going through the trait
/// object — a real caller would do the analogous thing against its own
/// concrete reader type.
pub struct VecCursor<'a> {
    stack: Vec<(&'a [Value], usize)>,
    current: Option<&'a Value>,
    last_scalar: Arc<Mutex<Option<i64>>>,
}

impl<'a> VecCursor<'a> {
    pub fn new(top: &'a [Value]) -> Self {
        Self {
            stack: vec![(top, 0)],
            current: None,
            last_scalar: Arc::new(Mutex::new(None)),
        }
    }

    /// A handle a callback can capture to read the most recently visited
    /// scalar value, independent of the `Cursor` trait object it receives.
    /// The callback's `Send + Sync` bound rules out an `Rc`-based handle.
    #[must_use]
    pub fn last_scalar_handle(&self) -> Arc<Mutex<Option<i64>>> {
        Arc::clone(&self.last_scalar)
    }
}

impl<'a> Cursor for VecCursor<'a> {
    fn next(&mut self) -> Option<ValueKind> {
        let (siblings, pos) = self.stack.last_mut().expect("non-empty stack");
        if *pos < siblings.len() {
            let node = &siblings[*pos];
            *pos += 1;
            self.current = Some(node);
            *self.last_scalar.lock().unwrap() = node.scalar;
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

impl std::fmt::Debug for VecCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VecCursor").field("depth", &self.depth()).finish()
    }
}

/// A callback that appends every matched scalar's value to the threaded
/// `Vec<i64>` context, reading the value off `handle` rather than the
/// `Cursor` trait object it is handed.
pub fn record_scalar(handle: Arc<Mutex<Option<i64>>>) -> ion_path_extractor::Callback<Vec<i64>> {
    Box::new(move |_cursor, hits: &mut Vec<i64>| {
        if let Some(v) = *handle.lock().unwrap() {
            hits.push(v);
        }
        Ok(0)
    })
}
