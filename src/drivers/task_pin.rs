//! Named worker thread spawning.
//!
//! The host scheduler runs the control worker as an ordinary
//! normal-priority thread with a small, fixed stack.  The name shows up in
//! the host's thread listing.

use log::{info, warn};

use crate::error::{Error, Result};

/// Smallest stack handed to the OS, whatever the configuration asks for.
/// Host threads need room for the std runtime and the logger.
pub const MIN_STACK_KB: usize = 64;

/// Stack actually requested from the OS for a configured `stack_kb`.
///
/// The configured value is a lower bound: requests below
/// [`MIN_STACK_KB`] are raised to it.
pub fn effective_stack_kb(stack_kb: usize) -> usize {
    stack_kb.max(MIN_STACK_KB)
}

/// Spawn `f` on a new thread called `name` with at least `stack_kb` KiB
/// of stack.  The thread's return value comes back through `join()`.
pub fn spawn_worker<T: Send + 'static>(
    name: &str,
    stack_kb: usize,
    f: impl FnOnce() -> T + Send + 'static,
) -> Result<std::thread::JoinHandle<T>> {
    let stack_kb = effective_stack_kb(stack_kb);
    info!("Spawning '{}' (stack={}KB)", name, stack_kb);

    std::thread::Builder::new()
        .name(name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
        .map_err(|e| {
            warn!("spawn_worker('{}') failed: {}", name, e);
            Error::Spawn
        })
}
