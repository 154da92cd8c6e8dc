//! Parse-degradation warnings with colored terminal output.
//!
//! Parsing in this workspace is permissive: malformed input never fails, it
//! degrades to the best partial reading. Components report each degradation
//! here instead of returning errors. Deduplication keeps a pathological
//! document from spamming the same message thousands of times.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a degraded parse or an unsupported construct (prints once per
/// unique message).
///
/// # Example
/// ```ignore
/// warn_once("Tokenizer", "unterminated comment at offset 42");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[alder {component}] {message}").yellow());
    }
}

/// Clear all recorded warnings (call before parsing a new document when
/// repeated diagnostics are wanted)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
