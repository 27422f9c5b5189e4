//! Carrying a logger through a call stack without threading it through every
//! signature.
//!
//! Entering a logger pushes it onto a per-thread stack; the returned guard
//! pops it again. Code further down the stack asks for [`current`] and gets
//! the innermost entered logger, or an empty [`Logger`] when none is entered.
//!
//! # Examples
//!
//! ```
//! use fieldlog::{Logger, fields, scope};
//!
//! fn handle() {
//!     let logger = scope::current();
//!     assert_eq!(logger.context().get("request_id"), Some("\"a1\""));
//! }
//!
//! let request = Logger::new().with(&fields!["request_id", "a1"]);
//! scope::with_logger(&request, handle);
//! assert!(scope::current().context().is_empty());
//! ```

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

use crate::logger::Logger;

thread_local! {
    static STACK: RefCell<Vec<(u64, Logger)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Keeps a logger current on this thread until dropped.
#[must_use = "the logger stops being current when the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard {
    id: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        // Torn-down thread locals have nothing left to pop.
        STACK
            .try_with(|stack| {
                let mut entries = stack.borrow_mut();
                // A guard whose entry an outer guard already removed pops nothing.
                if let Some(position) = entries.iter().position(|(id, _)| *id == self.id) {
                    entries.truncate(position);
                }
            })
            .ok();
    }
}

impl Logger {
    /// Makes this logger the one [`current`] returns on this thread until the
    /// guard is dropped.
    ///
    /// Guards nest. Dropping an outer guard also ends any scopes entered
    /// after it.
    pub fn enter(&self) -> ScopeGuard {
        let id = NEXT_ID.with(|next| {
            let issued = next.get();
            next.set(issued.wrapping_add(1));
            issued
        });
        STACK.with_borrow_mut(|stack| stack.push((id, self.clone())));
        ScopeGuard {
            id,
            _not_send: PhantomData,
        }
    }
}

/// The innermost logger entered on this thread, or an empty logger.
#[must_use]
pub fn current() -> Logger {
    STACK
        .with_borrow(|stack| stack.last().map(|(_, logger)| logger.clone()))
        .unwrap_or_default()
}

/// Runs `f` with `logger` current.
pub fn with_logger<R>(logger: &Logger, f: impl FnOnce() -> R) -> R {
    let _guard = logger.enter();
    f()
}
