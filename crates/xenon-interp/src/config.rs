//! Evaluator configuration.

/// Default limit on nested method calls and object constructions.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Largest call depth a run will honor; higher limits are clamped to it.
pub const MAX_CALL_DEPTH: usize = 4096;

/// Host stack reserved for lexing, parsing, checking and top-level code.
const BASE_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Host stack reserved for each level of Xenon call nesting.
///
/// Covers the evaluator frames of one call plus a deeply nested expression
/// at its call site.
const STACK_PER_CALL: usize = 256 * 1024;

/// Runtime limits for one run.
///
/// ```
/// use xenon_interp::Config;
///
/// let config = Config::default().with_max_call_depth(64);
/// assert_eq!(config.max_call_depth, 64);
/// assert_eq!(config.call_limit(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Deepest allowed nesting of method calls and object constructions
    pub max_call_depth: usize,
}

impl Config {
    /// Host stack a run needs when nothing is evaluated.
    pub const STATIC_STACK_SIZE: usize = BASE_STACK_SIZE;

    /// Configuration with default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Sets the call depth limit.
    #[must_use]
    pub const fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// The call depth limit the evaluator enforces.
    ///
    /// ```
    /// use xenon_interp::{Config, MAX_CALL_DEPTH};
    ///
    /// let config = Config::default().with_max_call_depth(usize::MAX);
    /// assert_eq!(config.call_limit(), MAX_CALL_DEPTH);
    /// ```
    #[must_use]
    pub const fn call_limit(&self) -> usize {
        if self.max_call_depth > MAX_CALL_DEPTH {
            MAX_CALL_DEPTH
        } else {
            self.max_call_depth
        }
    }

    /// Size of the host stack a run needs to reach [`Config::call_limit`]
    /// without overflowing.
    #[must_use]
    pub const fn stack_size(&self) -> usize {
        BASE_STACK_SIZE + self.call_limit() * STACK_PER_CALL
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_grows_with_call_limit() {
        let shallow = Config::default().with_max_call_depth(8);
        let deep = Config::default().with_max_call_depth(1024);

        assert!(shallow.stack_size() >= BASE_STACK_SIZE);
        assert!(deep.stack_size() > shallow.stack_size());
    }

    #[test]
    fn test_limit_is_clamped() {
        let config = Config::default().with_max_call_depth(MAX_CALL_DEPTH + 1);
        assert_eq!(config.call_limit(), MAX_CALL_DEPTH);
        assert_eq!(
            config.stack_size(),
            Config::default().with_max_call_depth(MAX_CALL_DEPTH).stack_size()
        );
    }
}
