//! User-facing log macros.
//!
//! These are thin wrappers over `tracing` events. The CLI formatter picks a
//! glyph and colour per level, and uses the [`SUCCESS_TARGET`] target to tell
//! a success line apart from a plain info line.

pub const SUCCESS_TARGET: &str = "roomfinder::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "roomfinder::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}
