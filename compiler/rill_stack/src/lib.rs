//! Stack growth for deep recursion.
//!
//! Checking a call can instantiate a template, which checks the cloned
//! body, which checks further calls. Nesting depth follows the program, not
//! the compiler, so every recursive entry point in `rill_sema` runs through
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: grows the stack on demand with `stacker`.
//! - **WASM targets**: plain call.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB). Instantiating a template body
/// keeps several frames of checker state alive, so segments are larger
/// than a plain expression walker would need.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
