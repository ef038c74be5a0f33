//! Diagnostic reporting infrastructure.
//!
//! `Handler` is the "collaborator error sink" that spec.md §7 describes:
//! every error returned from the core is also handed to a `Handler`, which
//! appends it to an in-memory log *and* writes a formatted line to the
//! configured sink -- the process-wide writer set via
//! `set_global_writer`, or stderr if none was ever installed. The global
//! writer and the debug-enabled flag are the only process state the core
//! touches, and each is settable exactly once.

use crate::{Error, Position};
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::panic::Location;
use std::sync::{Mutex, OnceLock};

/// Diagnostic severity. The core only ever emits `Error`, but the type
/// allows a future caller-supplied lint pass to reuse the same sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A single reported diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub position: Option<Position>,
    /// The Rust source location that raised this diagnostic. Only shown in
    /// `Display` output when [`debug_enabled`] is set -- this is the "source
    /// file/line when debug is enabled" of spec.md §7, not the HOCON
    /// `position`.
    origin: &'static Location<'static>,
}

impl Diagnostic {
    #[track_caller]
    pub fn new(level: Level, message: impl Into<String>, position: Option<Position>) -> Self {
        Self { level, message: message.into(), position, origin: Location::caller() }
    }

    /// Build a diagnostic from a core [`Error`], reusing its message and
    /// position so the handler never has to re-derive them.
    #[track_caller]
    pub fn from_error(err: &Error) -> Self {
        Self::new(Level::Error, err.to_string(), err.position())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{}: {}: {}", pos, self.level, self.message)?,
            None => write!(f, "{}: {}", self.level, self.message)?,
        }
        if debug_enabled() {
            write!(f, " ({}:{})", self.origin.file(), self.origin.line())?;
        }
        Ok(())
    }
}

static GLOBAL_WRITER: OnceLock<Mutex<Box<dyn Write + Send>>> = OnceLock::new();
static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Install the process-wide diagnostic writer. Settable once; later calls
/// are ignored, matching spec.md §9's "settable once at startup".
///
/// The default (never calling this) writes to stderr.
pub fn set_global_writer(writer: impl Write + Send + 'static) {
    let _ = GLOBAL_WRITER.set(Mutex::new(Box::new(writer)));
}

/// Enable or disable the process-wide debug flag once at startup. A
/// second call is a no-op.
pub fn set_debug_enabled(enabled: bool) {
    let _ = DEBUG_ENABLED.set(enabled);
}

/// Whether debug-level detail (source file/line of the Rust code that
/// raised the error) should be appended to diagnostic output.
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get().unwrap_or(&false)
}

/// Collects diagnostics produced while running a single parse and, as each
/// one is emitted, writes it to the configured sink (stderr by default).
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self { diagnostics: RefCell::new(Vec::new()) }
    }

    /// Record a diagnostic and write it to the error sink: the
    /// process-wide writer installed via [`set_global_writer`], or stderr
    /// if none was installed.
    pub fn emit(&self, diagnostic: Diagnostic) {
        let line = diagnostic.to_string();
        self.diagnostics.borrow_mut().push(diagnostic);
        match GLOBAL_WRITER.get() {
            Some(writer) => {
                let mut writer = writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                let _ = writeln!(writer, "{line}");
            }
            None => {
                let _ = writeln!(std::io::stderr(), "{line}");
            }
        }
    }

    /// Convenience wrapper: build and emit a diagnostic straight from a
    /// core [`Error`].
    #[track_caller]
    pub fn report(&self, err: &Error) {
        self.emit(Diagnostic::from_error(err));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Take all diagnostics recorded so far, leaving the handler empty.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    #[test]
    fn handler_counts_errors() {
        let handler = Handler::new();
        handler.emit(Diagnostic::new(Level::Error, "bad", None));
        handler.emit(Diagnostic::new(Level::Warning, "hmm", None));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn from_error_reuses_message_and_position() {
        let err = Error::syntax(Position::new(1, 1), "unexpected token");
        let diag = Diagnostic::from_error(&err);
        assert_eq!(diag.position, Some(Position::new(1, 1)));
        assert!(diag.message.contains("unexpected token"));
    }

    #[test]
    fn take_drains_and_resets() {
        let handler = Handler::new();
        handler.emit(Diagnostic::new(Level::Note, "fyi", None));
        assert_eq!(handler.take().len(), 1);
        assert_eq!(handler.take().len(), 0);
    }

    #[test]
    fn debug_disabled_display_has_no_rust_location() {
        let diag = Diagnostic::new(Level::Error, "bad", None);
        assert!(!diag.to_string().contains(file!()));
    }

    /// A `Write` sink that just appends to a shared buffer, to prove
    /// `emit` actually routes through an installed writer. Lives in its own
    /// test (rather than alongside the others) because `set_global_writer`
    /// is process-global and settable only once per process.
    #[derive(Clone)]
    struct RecordingWriter(Arc<StdMutex<Vec<u8>>>);

    impl Write for RecordingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn emit_routes_through_an_installed_global_writer() {
        let buf = Arc::new(StdMutex::new(Vec::new()));
        set_global_writer(RecordingWriter(buf.clone()));
        let handler = Handler::new();
        handler.emit(Diagnostic::new(Level::Error, "routed", None));
        let written = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(written.contains("routed"));
    }
}
