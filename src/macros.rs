//! Small crate-wide convenience macros.
//!
//! The logging macros go straight to the browser console.  On non-wasm
//! targets (native `cargo test` of the pure modules) wasm-bindgen imports
//! cannot be called, so the macros only evaluate their format arguments there.

/// Debug-build console logging.  Compiled out of release builds.
///
/// ```rust,ignore
/// debug_log!("poll attempt {} for {}", attempts, target);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(all(debug_assertions, target_arch = "wasm32")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Console warning, kept in release builds.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Console error, kept in release builds.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::error_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Acquire a **mutable** borrow from a `RefCell` (or `Rc<RefCell>`).
/// Panics with the standard `RefCell` message when another borrow is active.
///
/// ```rust,ignore
/// use std::cell::RefCell;
/// let cell = RefCell::new(1);
/// {
///     let mut n = mut_borrow!(cell);
///     *n += 1;
/// }
/// assert_eq!(*cell.borrow(), 2);
/// ```
#[macro_export]
macro_rules! mut_borrow {
    ($cell:expr) => {
        $cell.borrow_mut()
    };
}
