//! Step records produced by the generator.

use crate::Complexity;

/// Decision point in a binary search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// Search begins over the full array
    Start,
    /// Middle element inspected
    Check,
    /// Middle element is the target
    Found,
    /// Target is larger, discard the left half
    MoveRight,
    /// Target is smaller, discard the right half
    MoveLeft,
}

/// Invocation or return of a recursive call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallEvent {
    Call,
    Return,
}

/// The operation a step performs, one variant per algorithm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// O(1): a single index touched
    Access { index: usize, n: usize },
    /// O(log n): binary search decision point.
    ///
    /// `low`/`high` are the interval after the event is applied; `mid` is
    /// `None` only for [`SearchEvent::Start`].
    Search {
        event: SearchEvent,
        low: usize,
        high: usize,
        mid: Option<usize>,
        target: usize,
        n: usize,
    },
    /// O(n): one linear scan position
    Visit { index: usize, n: usize },
    /// O(n log n): element placed during merge pass `pass`
    Merge { pass: usize, index: usize, n: usize },
    /// O(n²): one nested-loop iteration
    PairVisit { i: usize, j: usize, n: usize },
    /// O(2ⁿ): node of the naive Fibonacci call tree.
    ///
    /// `parent` is the sequence index of the invoking `Call` record.
    Call {
        event: CallEvent,
        k: u32,
        depth: usize,
        x: i32,
        parent: Option<usize>,
        n: usize,
    },
}

impl StepKind {
    /// Input size the step was generated for.
    pub fn n(&self) -> usize {
        match *self {
            StepKind::Access { n, .. }
            | StepKind::Search { n, .. }
            | StepKind::Visit { n, .. }
            | StepKind::Merge { n, .. }
            | StepKind::PairVisit { n, .. }
            | StepKind::Call { n, .. } => n,
        }
    }
}

/// One loggable operation of an animated algorithm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub kind: StepKind,
    /// 1-based line in the reference code listing
    pub line: usize,
    /// Human-readable log line
    pub log: String,
}

impl Step {
    pub fn new(kind: StepKind, line: usize, log: String) -> Self {
        Self { kind, line, log }
    }

    /// Returns true for `Call` records of the exponential generator.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(
            self.kind,
            StepKind::Call {
                event: CallEvent::Call,
                ..
            }
        )
    }
}

/// Immutable, ordered trace of one `(complexity, n)` run.
#[derive(Clone, Debug, PartialEq)]
pub struct StepSequence {
    complexity: Complexity,
    n: u32,
    steps: Vec<Step>,
}

impl StepSequence {
    pub(crate) fn new(complexity: Complexity, n: u32, steps: Vec<Step>) -> Self {
        Self {
            complexity,
            n,
            steps,
        }
    }

    /// An empty trace, used before the first generation.
    pub fn empty(complexity: Complexity) -> Self {
        Self::new(complexity, 0, Vec::new())
    }

    #[inline]
    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Effective input size (after clamping and capping).
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Total step count reported to the user and the curve plotter.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Parent `Call` record of a call-tree node, if any.
    pub fn parent_of(&self, index: usize) -> Option<&Step> {
        match self.steps.get(index)?.kind {
            StepKind::Call {
                parent: Some(parent),
                ..
            } => self.steps.get(parent),
            _ => None,
        }
    }

    /// Number of `Call` records (invocations) in the trace.
    pub fn call_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_call()).count()
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
