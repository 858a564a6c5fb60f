//! Session configuration.

/// Knobs for a semantic-analysis session.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SessionOptions {
    /// Maximum nesting of template instantiations triggered while checking
    /// instantiated bodies. A template that instantiates itself stops here
    /// with `InstantiationDepthExceeded`.
    pub max_instantiation_depth: u32,
}

impl SessionOptions {
    pub const DEFAULT_MAX_INSTANTIATION_DEPTH: u32 = 64;

    #[must_use]
    pub fn with_max_instantiation_depth(mut self, depth: u32) -> Self {
        self.max_instantiation_depth = depth;
        self
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            max_instantiation_depth: Self::DEFAULT_MAX_INSTANTIATION_DEPTH,
        }
    }
}
