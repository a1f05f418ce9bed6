//! Complexity classes and their closed-form growth functions.

use std::str::FromStr;

/// Error returned when a host-supplied key does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of the time complexity labels
    UnknownComplexity(String),
    /// Not one of the space complexity labels
    UnknownSpaceClass(String),
    /// Not one of `stack`, `data`, `tree`
    UnknownMode(String),
    /// Not one of the supported display languages
    UnknownLanguage(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownComplexity(key) => write!(f, "Unknown complexity class: {:?}", key),
            ParseError::UnknownSpaceClass(key) => {
                write!(f, "Unknown space complexity class: {:?}", key)
            }
            ParseError::UnknownMode(key) => write!(f, "Unknown display mode: {:?}", key),
            ParseError::UnknownLanguage(key) => write!(f, "Unknown language: {:?}", key),
        }
    }
}

impl std::error::Error for ParseError {}

/// Largest input size any generator will expand.
///
/// n² records at this size stay within one frame's budget.
pub const MAX_INPUT: u32 = 50;

/// Largest Fibonacci argument the exponential generator will expand.
///
/// fib(12) already produces 465 calls; anything larger would stall a frame.
pub const EXPONENTIAL_INPUT_CAP: u32 = 12;

/// Time complexity class driving the step generator and the reference curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Complexity {
    /// Direct index access
    #[default]
    Constant,
    /// Binary search
    Logarithmic,
    /// Full traversal
    Linear,
    /// Merge-sort passes
    Linearithmic,
    /// Nested pair iteration
    Quadratic,
    /// Naive Fibonacci recursion
    Exponential,
}

impl Complexity {
    /// All classes in selector order.
    pub const ALL: [Complexity; 6] = [
        Complexity::Constant,
        Complexity::Logarithmic,
        Complexity::Linear,
        Complexity::Linearithmic,
        Complexity::Quadratic,
        Complexity::Exponential,
    ];

    /// Big-O label, e.g. `"O(n²)"`.
    pub fn label(self) -> &'static str {
        match self {
            Complexity::Constant => "O(1)",
            Complexity::Logarithmic => "O(log n)",
            Complexity::Linear => "O(n)",
            Complexity::Linearithmic => "O(n log n)",
            Complexity::Quadratic => "O(n²)",
            Complexity::Exponential => "O(2ⁿ)",
        }
    }

    /// Input size the generator actually expands for a requested `n`.
    ///
    /// `n` is clamped to `1..=`[`MAX_INPUT`], and the exponential case is
    /// capped at [`EXPONENTIAL_INPUT_CAP`].
    #[inline]
    pub fn effective_input(self, n: u32) -> u32 {
        let n = n.clamp(1, MAX_INPUT);
        match self {
            Complexity::Exponential => n.min(EXPONENTIAL_INPUT_CAP),
            _ => n,
        }
    }

    /// Upper end of the plotted domain for a slider with the given maximum.
    #[inline]
    pub fn curve_domain_max(self, max_input: u32) -> u32 {
        let max_input = max_input.min(MAX_INPUT);
        match self {
            Complexity::Exponential => max_input.min(EXPONENTIAL_INPUT_CAP),
            _ => max_input,
        }
    }

    /// Reference growth function `f(n)` plotted on the time graph.
    pub fn growth(self, n: f64) -> f64 {
        match self {
            Complexity::Constant => 1.0,
            Complexity::Logarithmic => n.max(1.0).log2() + 1.0,
            Complexity::Linear => n,
            Complexity::Linearithmic => n * n.max(1.0).log2(),
            Complexity::Quadratic => n * n,
            Complexity::Exponential => 2f64.powf(n.max(0.0)),
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Complexity {
    type Err = ParseError;

    /// Accepts the Big-O labels plus ASCII spellings (`O(n^2)`, `O(2^n)`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.trim().chars().filter(|c| !c.is_whitespace()).collect();
        match key.to_lowercase().as_str() {
            "o(1)" | "constant" => Ok(Complexity::Constant),
            "o(logn)" | "logarithmic" => Ok(Complexity::Logarithmic),
            "o(n)" | "linear" => Ok(Complexity::Linear),
            "o(nlogn)" | "linearithmic" => Ok(Complexity::Linearithmic),
            "o(n²)" | "o(n^2)" | "quadratic" => Ok(Complexity::Quadratic),
            "o(2ⁿ)" | "o(2^n)" | "exponential" => Ok(Complexity::Exponential),
            _ => Err(ParseError::UnknownComplexity(s.to_string())),
        }
    }
}
