//! Value filters applied on every commit.

use std::fmt;
use std::rc::Rc;

/// A filter refused a candidate value.
///
/// The commit that ran the filter is abandoned and the stored value is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    pub message: String,
}

impl FilterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "filter rejected value: {}", self.message)
    }
}

impl std::error::Error for FilterError {}

/// One step of a [`FilterPipeline`].
pub type Filter<T> = Rc<dyn Fn(T) -> Result<T, FilterError>>;

/// Reduces `value` through `filters` in order.
///
/// An empty slice is the identity. The first error stops the reduction.
pub fn apply_filters<T>(filters: &[Filter<T>], value: T) -> Result<T, FilterError> {
    filters.iter().try_fold(value, |v, f| f(v))
}

// ── FilterPipeline ────────────────────────────────────────────────────────

/// Ordered list of filters, composed left to right.
///
/// Widgets hold pipelines behind an `Rc`, so one pipeline can serve many
/// widgets. Filters should be idempotent; nothing checks that they are.
///
/// # Example
/// ```rust
/// use forma_inputs::filter::{FilterError, FilterPipeline};
///
/// let pipeline = FilterPipeline::new()
///     .with(|s: String| s.trim().to_string())
///     .with_fallible(|s: String| {
///         if s.len() > 8 { Err(FilterError::new("too long")) } else { Ok(s) }
///     });
///
/// assert_eq!(pipeline.apply("  abc ".to_string()), Ok("abc".to_string()));
/// assert!(pipeline.apply("123456789".to_string()).is_err());
/// ```
pub struct FilterPipeline<T> {
    filters: Vec<Filter<T>>,
}

impl<T: 'static> FilterPipeline<T> {
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Append an infallible filter.
    pub fn push(&mut self, f: impl Fn(T) -> T + 'static) {
        self.filters.push(Rc::new(move |v| Ok(f(v))));
    }

    /// Append a filter that may reject the candidate.
    pub fn push_fallible(&mut self, f: impl Fn(T) -> Result<T, FilterError> + 'static) {
        self.filters.push(Rc::new(f));
    }

    pub fn with(mut self, f: impl Fn(T) -> T + 'static) -> Self {
        self.push(f);
        self
    }

    pub fn with_fallible(mut self, f: impl Fn(T) -> Result<T, FilterError> + 'static) -> Self {
        self.push_fallible(f);
        self
    }

    #[inline]
    pub fn apply(&self, value: T) -> Result<T, FilterError> {
        apply_filters(&self.filters, value)
    }

    #[inline]
    pub fn filters(&self) -> &[Filter<T>] {
        &self.filters
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<T: 'static> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FilterPipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterPipeline").field("len", &self.filters.len()).finish()
    }
}
