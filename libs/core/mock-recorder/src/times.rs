use std::fmt;

/// Call-count constraint attached to an expectation.
///
/// Expectations default to [`Times::once`]: a registered call that never
/// happens fails verification, and a second matching call fails immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Times {
    min: usize,
    max: Option<usize>,
}

impl Times {
    /// Exactly one call (the default)
    pub const fn once() -> Self {
        Self::exactly(1)
    }

    pub const fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub const fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    pub const fn at_most(n: usize) -> Self {
        Self {
            min: 0,
            max: Some(n),
        }
    }

    /// Between `min` and `max` calls, inclusive. The bounds are swapped if given
    /// in the wrong order.
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: min.min(max),
            max: Some(min.max(max)),
        }
    }

    /// Any number of calls, including none
    pub const fn any() -> Self {
        Self::at_least(0)
    }

    pub const fn never() -> Self {
        Self::exactly(0)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Whether `calls` meets the minimum
    pub fn is_satisfied(&self, calls: usize) -> bool {
        calls >= self.min
    }

    /// Whether another call would exceed the maximum
    pub fn is_saturated(&self, calls: usize) -> bool {
        self.max.is_some_and(|max| calls >= max)
    }
}

impl Default for Times {
    fn default() -> Self {
        Self::once()
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (min, Some(max)) if min == max => write!(f, "exactly {min}"),
            (0, Some(max)) => write!(f, "at most {max}"),
            (0, None) => write!(f, "any number of"),
            (min, None) => write!(f, "at least {min}"),
            (min, Some(max)) => write!(f, "between {min} and {max}"),
        }
    }
}
