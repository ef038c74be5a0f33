//! The tree model `TreeReader` assembles: `Value`, `Object`, `Array`, and
//! the tagged `Tree` root, plus the post-processing operations of spec
//! §4.4 (`obj_sort`, `obj_merge_keys`, `obj_merge`, `val_concat`,
//! `val_overwrite`).

use hocon_lex::TokenArray;

use crate::reader::Assignment;

/// A parsed-but-unresolved value: either a token concatenation awaiting a
/// later substitution/scalar-coercion pass, or a nested container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The raw token sequence of a value concatenation, whitespace
    /// included (needed to reconstruct the exact source text later).
    Unresolved(TokenArray),
    Object(Object),
    Array(Array),
}

/// One entry of an object, before or after duplicate-key merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
    pub key: String,
    /// Insertion order before sorting; irrelevant once merged.
    pub original_index: usize,
    pub assignment: Assignment,
    pub value: Value,
}

/// An object's entries, stored as an ordered sequence rather than a hash
/// map so that source order survives until `obj_sort`/`obj_merge_keys`
/// run (duplicate keys must see their sibling in original order to merge
/// correctly).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub entries: Vec<ObjectEntry>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable sort by `(key, original_index)`, byte-wise key comparison
    /// with length as the tiebreaker on equal prefixes (`Ord` on `String`
    /// already does exactly this).
    pub fn obj_sort(&mut self) {
        self.entries.sort_by(|a, b| a.key.cmp(&b.key).then(a.original_index.cmp(&b.original_index)));
    }

    /// Single left-to-right scan over an already-sorted entry sequence,
    /// collapsing adjacent entries with equal keys. Must run after
    /// `obj_sort`.
    pub fn obj_merge_keys(&mut self) {
        let sorted = std::mem::take(&mut self.entries);
        let mut merged: Vec<ObjectEntry> = Vec::with_capacity(sorted.len());
        for current in sorted {
            match merged.last_mut() {
                Some(prev) if prev.key == current.key => match current.assignment {
                    Assignment::Append => val_concat(&mut prev.value, current.value),
                    Assignment::Assign => {
                        prev.assignment = Assignment::Assign;
                        val_overwrite(&mut prev.value, current.value);
                    }
                },
                _ => merged.push(current),
            }
        }
        self.entries = merged;
    }

    /// Recursively sort and merge every nested object.
    pub fn obj_sort_and_merge_recursive(&mut self) {
        self.obj_sort();
        self.obj_merge_keys();
        for entry in &mut self.entries {
            entry.value.sort_and_merge_recursive();
        }
    }

    /// Merge two entry lists by key, leaving `from` empty. Each side is
    /// sorted first -- callers only ever hand this raw per-block
    /// parse-order entries (e.g. two independently parsed object values
    /// being deep-merged), never a single already-sorted sequence, so
    /// sorting here is the only way the zip-merge below sees equal keys
    /// adjacent across both sides. `original_index` only orders entries
    /// *within* one side (it's a per-object counter, not comparable across
    /// `into` and `from`); when both sides have the same key, `into`'s
    /// entry always precedes `from`'s, since `into` is by construction the
    /// earlier-declared value and `from` the later one merging into it --
    /// the immediately following `obj_merge_keys` needs that order to make
    /// the later entry win. Does not collapse duplicates itself; the
    /// caller runs `obj_merge_keys` afterwards.
    pub fn obj_merge(into: &mut Object, from: &mut Object) {
        into.obj_sort();
        from.obj_sort();
        let mut merged = Vec::with_capacity(into.entries.len() + from.entries.len());
        let mut a = into.entries.drain(..).peekable();
        let mut b = from.entries.drain(..).peekable();
        loop {
            match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => {
                    if x.key <= y.key {
                        merged.push(a.next().unwrap());
                    } else {
                        merged.push(b.next().unwrap());
                    }
                }
                (Some(_), None) => merged.push(a.next().unwrap()),
                (None, Some(_)) => merged.push(b.next().unwrap()),
                (None, None) => break,
            }
        }
        into.entries = merged;
    }
}

impl Value {
    /// Recursively sort and merge every nested object reachable from this
    /// value (used once on the completed root).
    pub fn sort_and_merge_recursive(&mut self) {
        match self {
            Value::Object(obj) => obj.obj_sort_and_merge_recursive(),
            Value::Array(arr) => {
                for element in &mut arr.elements {
                    element.sort_and_merge_recursive();
                }
            }
            Value::Unresolved(_) => {}
        }
    }
}

/// `+=` concatenation: arrays concatenate elementwise, objects merge
/// (sorted afterward by the caller's `obj_merge_keys`), scalars form a
/// longer unresolved token sequence in left-to-right order.
pub fn val_concat(into: &mut Value, from: Value) {
    match from {
        Value::Array(mut b) if matches!(into, Value::Array(_)) => {
            if let Value::Array(a) = into {
                a.elements.append(&mut b.elements);
            }
        }
        Value::Object(mut b) if matches!(into, Value::Object(_)) => {
            if let Value::Object(a) = into {
                Object::obj_merge(a, &mut b);
                a.obj_merge_keys();
            }
        }
        Value::Unresolved(more) if matches!(into, Value::Unresolved(_)) => {
            if let Value::Unresolved(toks) = into {
                toks.extend(more);
            }
        }
        other => *into = other,
    }
}

/// `=`/`:` overwrite: if both sides are objects, deep-merge (later
/// overrides earlier at the leaf, a HOCON invariant); otherwise the later
/// value replaces the earlier one outright.
pub fn val_overwrite(into: &mut Value, from: Value) {
    match from {
        Value::Object(mut b) if matches!(into, Value::Object(_)) => {
            if let Value::Object(a) = into {
                Object::obj_merge(a, &mut b);
                a.obj_merge_keys();
            }
        }
        other => *into = other,
    }
}

/// Ordered sequence of array elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    pub elements: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The root of a parsed document: either an object or an array.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Object(Object),
    Array(Array),
}

impl Tree {
    /// Run spec §4.4's post-processing (`obj_sort` + `obj_merge_keys`,
    /// recursively) on the whole tree. `TreeReader` calls this once, when
    /// the root container closes.
    pub fn sort_and_merge_recursive(&mut self) {
        match self {
            Tree::Object(obj) => obj.obj_sort_and_merge_recursive(),
            Tree::Array(arr) => {
                for element in &mut arr.elements {
                    element.sort_and_merge_recursive();
                }
            }
        }
    }
}
