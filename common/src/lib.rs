//! # Roomfinder Common
//!
//! Shared building blocks for the discovery engine and its front-ends.
//!
//! * **[`device`]**: the record produced for every endpoint that answered a probe.
//! * **[`settings`]**: scan parameters and the JSON store that persists them.
//! * **[`network`]**: address helpers, most importantly the subnet enumerator.
//! * **[`error`]**: the error taxonomy shared by every crate in the workspace.

pub mod device;
pub mod error;
pub mod log;
pub mod network;
pub mod registry;
pub mod settings;

#[doc(hidden)]
pub use tracing as __tracing;
