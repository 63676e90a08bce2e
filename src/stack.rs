//! Stack safety for recursive parsing and tree walking.
//!
//! Nesting depth is controlled by the input, so every recursive path over
//! source or tree structure goes through [`ensure_sufficient_stack`].

/// If less than this remains, the stack is grown before recursing.
const RED_ZONE: usize = 100 * 1024;

/// Size of each freshly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first moving to a new stack segment when the current one is
/// close to exhausted.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
