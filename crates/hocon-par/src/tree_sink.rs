//! `TreeReader` -- the concrete `Reader` that assembles the in-memory
//! `Tree` and runs spec §4.4's post-processing (sort + duplicate-key
//! merge) once the root container closes.

use hocon_lex::{Token, TokenArray, TokenTag};
use hocon_util::Position;

use crate::reader::{Assignment, Reader};
use crate::value::{Array, Object, ObjectEntry, Tree, Value};

/// One entry of the sink's stack of currently-open containers. The top
/// frame receives events; `obj_end`/`arr_end` pop it and hand the
/// completed container to the new top frame (or to `root`, once empty).
enum Frame {
    Object {
        obj: Object,
        next_index: usize,
        pending_key: Option<Vec<String>>,
        pending_assignment: Assignment,
        pending_value: Option<Value>,
    },
    Array {
        arr: Array,
        pending_value: Option<Value>,
    },
}

/// Builds a `Tree` from parser events. Keys containing `.` are split and
/// synthesized into nested objects (`flatten_key`); duplicate keys are
/// merged on the way out (`Object::obj_sort_and_merge_recursive`).
pub struct TreeReader {
    stack: Vec<Frame>,
    root: Option<Tree>,
}

impl TreeReader {
    pub fn new() -> Self {
        Self { stack: Vec::new(), root: None }
    }

    /// Take the completed, post-processed tree. Panics if called before a
    /// successful parse (the top-level container never closed).
    pub fn finish(self) -> Tree {
        self.root.expect("TreeReader::finish called before a root container closed")
    }

    fn pending_value_mut(&mut self) -> &mut Option<Value> {
        match self.stack.last_mut().expect("reader event received with no open container") {
            Frame::Object { pending_value, .. } => pending_value,
            Frame::Array { pending_value, .. } => pending_value,
        }
    }

    /// Append a token to the value currently being concatenated. A
    /// container value completed by a *prior* element in the same
    /// concatenation is replaced rather than extended -- mixing an object
    /// or array with trailing scalar tokens is not exercised by any
    /// tested scenario, and last-element-wins is the simplest faithful
    /// behavior short of a richer `Value` representation.
    fn push_token(&mut self, tok: Token) {
        let pending = self.pending_value_mut();
        match pending {
            Some(Value::Unresolved(toks)) => toks.push(tok),
            _ => *pending = Some(Value::Unresolved(vec![tok])),
        }
    }

    fn set_container(&mut self, value: Value) {
        *self.pending_value_mut() = Some(value);
    }

    fn attach_completed_container(&mut self, value: Value) {
        if self.stack.is_empty() {
            let mut tree = match value {
                Value::Object(obj) => Tree::Object(obj),
                Value::Array(arr) => Tree::Array(arr),
                Value::Unresolved(_) => unreachable!("obj_end/arr_end only ever produce a container"),
            };
            tree.sort_and_merge_recursive();
            self.root = Some(tree);
        } else {
            self.set_container(value);
        }
    }
}

impl Default for TreeReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for TreeReader {
    fn obj_start(&mut self) -> bool {
        self.stack.push(Frame::Object {
            obj: Object::new(),
            next_index: 0,
            pending_key: None,
            pending_assignment: Assignment::Assign,
            pending_value: None,
        });
        true
    }

    fn obj_end(&mut self) -> bool {
        let Some(Frame::Object { obj, .. }) = self.stack.pop() else { return false };
        self.attach_completed_container(Value::Object(obj));
        true
    }

    fn arr_start(&mut self) -> bool {
        self.stack.push(Frame::Array { arr: Array::new(), pending_value: None });
        true
    }

    fn arr_end(&mut self) -> bool {
        let Some(Frame::Array { arr, .. }) = self.stack.pop() else { return false };
        self.attach_completed_container(Value::Array(arr));
        true
    }

    fn key_val_start(&mut self, key_toks: TokenArray, sep: Assignment) -> bool {
        match self.stack.last_mut() {
            Some(Frame::Object { pending_key, pending_assignment, pending_value, .. }) => {
                *pending_key = Some(flatten_key(key_toks));
                *pending_assignment = sep;
                *pending_value = None;
                true
            }
            _ => false,
        }
    }

    fn key_val_end(&mut self) -> bool {
        match self.stack.last_mut() {
            Some(Frame::Object { obj, next_index, pending_key, pending_assignment, pending_value }) => {
                let segments = pending_key.take().unwrap_or_default();
                let assignment = *pending_assignment;
                let value = pending_value.take().unwrap_or_else(|| Value::Unresolved(TokenArray::new()));
                if !segments.is_empty() {
                    obj.entries.push(wrap_key_path(segments, assignment, value, next_index));
                }
                true
            }
            _ => false,
        }
    }

    fn val_start(&mut self) -> bool {
        match self.stack.last_mut() {
            Some(Frame::Array { pending_value, .. }) => {
                *pending_value = None;
                true
            }
            _ => false,
        }
    }

    fn val_end(&mut self) -> bool {
        match self.stack.last_mut() {
            Some(Frame::Array { arr, pending_value }) => {
                arr.elements.push(pending_value.take().unwrap_or_else(|| Value::Unresolved(TokenArray::new())));
                true
            }
            _ => false,
        }
    }

    fn token(&mut self, tok: Token) -> bool {
        self.push_token(tok);
        true
    }

    fn var_sub(&mut self, path_toks: TokenArray, optional: bool) -> bool {
        let position = path_toks.first().map(|t| t.position).unwrap_or(Position::START);
        let opener = if optional { TokenTag::OpenOptSub } else { TokenTag::OpenSub };
        self.push_token(Token::empty(opener, position));
        for tok in path_toks {
            self.push_token(tok);
        }
        self.push_token(Token::empty(TokenTag::CloseBrace, position));
        true
    }
}

/// Builds the `(key -> ... -> ObjectEntry)` nesting a dotted key expands
/// to: `a.b.c = 1` becomes the single entry `a = { b = { c = 1 } }`.
/// Every wrapping level above the leaf uses `Assignment::Assign` (they are
/// synthesized containers, not the source's own `+=`/`=` token); only the
/// leaf keeps the caller's real assignment mode. `next_index` is only
/// meaningful for the outermost (sibling-bearing) level.
fn wrap_key_path(segments: Vec<String>, assignment: Assignment, value: Value, next_index: &mut usize) -> ObjectEntry {
    let mut rev = segments.into_iter().rev();
    let mut current_key = rev.next().expect("flatten_key never returns an empty segment list");
    let mut current_value = value;
    let mut current_assignment = assignment;
    for outer_key in rev {
        let entry = ObjectEntry { key: current_key, original_index: 0, assignment: current_assignment, value: current_value };
        current_value = Value::Object(Object { entries: vec![entry] });
        current_key = outer_key;
        current_assignment = Assignment::Assign;
    }
    let original_index = *next_index;
    *next_index += 1;
    ObjectEntry { key: current_key, original_index, assignment: current_assignment, value: current_value }
}

/// Reassembles a key's token array into its dotted path segments. Each
/// `Unquoted` token is split at every `.` it contains (a dotted key is
/// lexed as one run since `.` is not a forbidden unquoted character); a
/// `String` token is always one whole segment (dots inside a quoted key
/// are literal); whitespace between key tokens is preserved as literal
/// text within whichever segment it falls in (HOCON's `foo bar = 1`
/// unquoted-key-with-a-space case).
fn flatten_key(key_toks: TokenArray) -> Vec<String> {
    let mut segments = vec![String::new()];
    for tok in key_toks {
        match tok.tag {
            TokenTag::Unquoted => {
                let mut parts = tok.text.split('.');
                if let Some(first) = parts.next() {
                    segments.last_mut().unwrap().push_str(first);
                }
                for part in parts {
                    segments.push(part.to_string());
                }
            }
            _ => segments.last_mut().unwrap().push_str(&tok.text),
        }
    }
    segments
}
