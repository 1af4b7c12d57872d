//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the scope macros expand to nothing,
//! so hot paths can be instrumented unconditionally.

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

use crate::config::ProfilingMode;

#[cfg(feature = "profiling")]
pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_function {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::{profile_function, profile_scope};

/// Address the puffin HTTP server listens on.
pub const PUFFIN_SERVER_ADDR: &str = "0.0.0.0:8585";

#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Initialize profiling for the given mode.
///
/// # Example
/// ```no_run
/// use trip_atlas_core::config::ProfilingMode;
/// use trip_atlas_core::profiling::init_profiling;
///
/// init_profiling(ProfilingMode::WithWebserver);
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(mode: ProfilingMode) {
    match mode {
        ProfilingMode::Off => puffin::set_scopes_on(false),
        ProfilingMode::On => puffin::set_scopes_on(true),
        ProfilingMode::WithWebserver => {
            puffin::set_scopes_on(true);

            match puffin_http::Server::new(PUFFIN_SERVER_ADDR) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://{}", PUFFIN_SERVER_ADDR);
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }
}

#[cfg(not(feature = "profiling"))]
pub fn init_profiling(mode: ProfilingMode) {
    if mode != ProfilingMode::Off {
        tracing::warn!("profiling requested ({:?}) but the `profiling` feature is disabled", mode);
    }
}

/// Mark the start of a new frame for profiling.
///
/// Call once per rendered frame so scopes are grouped by frame.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
