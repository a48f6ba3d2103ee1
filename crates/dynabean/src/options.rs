//! Engine options

/// Options shared by a definition and every instance created from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanOptions {
    /// Map default methods to pass-through behaviors
    ///
    /// When disabled, default bodies are treated as not capturable: they are
    /// logged and left unmapped.
    pub capture_default_methods: bool,

    /// Maximum nesting depth followed by deep copy (`None` = unbounded)
    pub max_copy_depth: Option<usize>,
}

impl Default for BeanOptions {
    fn default() -> Self {
        Self {
            capture_default_methods: true,
            max_copy_depth: None,
        }
    }
}

impl BeanOptions {
    /// Bound deep copy recursion at `depth` levels
    pub fn with_max_copy_depth(mut self, depth: usize) -> Self {
        self.max_copy_depth = Some(depth);
        self
    }

    /// Leave default methods unmapped
    pub fn without_default_methods(mut self) -> Self {
        self.capture_default_methods = false;
        self
    }
}
