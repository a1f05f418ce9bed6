//! Algorithm profiles, teaching text and the completion explanation.

use crate::step::{StepKind, StepSequence};
use crate::Complexity;

/// Name and call example of the algorithm behind a complexity class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmProfile {
    pub name: &'static str,
    pub example: &'static str,
}

pub fn profile(complexity: Complexity) -> AlgorithmProfile {
    let (name, example) = match complexity {
        Complexity::Constant => ("Direct access lookup", "array[index]"),
        Complexity::Logarithmic => ("Binary search", "binarySearch(sortedList, target)"),
        Complexity::Linear => ("Full list traversal", "printAll(items)"),
        Complexity::Linearithmic => ("Bottom-up merge sort", "mergeSort(arr)"),
        Complexity::Quadratic => ("Nested pair iteration", "printPairs(arr)"),
        Complexity::Exponential => ("Naive Fibonacci recursion", "fib(n)"),
    };
    AlgorithmProfile { name, example }
}

/// Beginner-oriented description of a class, as plain text paragraphs.
pub fn teaching_text(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Constant => "\
What is O(1) - Constant Time?
Picture a bookshelf with numbered shelves. Asked for the book on shelf 5, you walk straight to shelf 5 without checking any other.

Key idea: however many shelves there are, fetching from a known shelf always takes the same time.

Why \"constant\"?
The time does not change with the size of the data. In code, array[index] is O(1) because the computer knows exactly where to look in memory.",
        Complexity::Logarithmic => "\
What is O(log n) - Logarithmic Time?
Guessing a number between 1 and 100, you ask \"is it bigger than 50?\" and each answer cuts the possibilities in half.

Key idea: every step throws away half of what is left, so even huge inputs are searched quickly.

Why \"logarithmic\"?
Doubling the data adds only one more step. 10 items need about 4 steps, 1,000 need about 10, and 1,000,000 about 20.

This only works on sorted data, which is what binary search relies on.",
        Complexity::Linear => "\
What is O(n) - Linear Time?
Counting the apples in a basket means looking at each apple once. Ten apples, ten looks; a hundred apples, a hundred looks.

Key idea: time grows in proportion to the data. Double the data and you double the time.

Why \"linear\"?
Plotted, the cost is a straight line. Printing every item, finding the maximum of an unsorted list and checking whether an item exists are all O(n).",
        Complexity::Linearithmic => "\
What is O(n log n) - Linearithmic Time?
Merge sort first pairs up neighbors, then merges pairs into fours, fours into eights, and so on. Each round touches every element once, and there are only log n rounds.

Key idea: n work per level times log n levels.

Why it matters
This is the cost of the fastest general comparison sorts. It grows a little faster than a straight line and far slower than n².",
        Complexity::Quadratic => "\
What is O(n²) - Quadratic Time?
If every student in a class shakes hands with every other student, 10 students make about 100 handshakes and 100 students make 10,000.

Key idea: for every item the whole input is processed again. Nested loops grow very quickly.

Why \"quadratic\"?
Doubling the input makes the work four times larger. Avoid O(n²) algorithms on large datasets where a better approach exists.",
        Complexity::Exponential => "\
What is O(2ⁿ) - Exponential Time?
Think of a tree where every branch splits in two, and each of those splits in two again.

Key idea: each extra unit of input doubles the work. n = 10 already means about 1,024 steps and n = 20 over a million.

Common cause
Recursive functions that call themselves several times without remembering results, like computing Fibonacci numbers naively. Exponential algorithms are only practical for very small inputs.",
    }
}

const CONSTANT_STEPS: [&str; 2] = ["→ step 1: access index {index}", "→ step 2: return value"];

fn examples(complexity: Complexity) -> &'static [&'static str] {
    match complexity {
        Complexity::Constant => &[
            "If lst = [10] → 2 steps",
            "If lst = [10, 20, 30] → 2 steps",
            "If lst has 1,000,000 items → still 2 steps",
        ],
        Complexity::Logarithmic => &[
            "If lst = [1..10] → ~3-4 steps (log₂10)",
            "If lst = [1..100] → ~6-7 steps (log₂100)",
            "If lst has 1,000,000 items → ~20 steps (log₂1,000,000)",
        ],
        Complexity::Linear => &[
            "If lst = [1..10] → 10 steps",
            "If lst = [1..100] → 100 steps",
            "If lst has 1,000,000 items → 1,000,000 steps",
        ],
        Complexity::Linearithmic => &[
            "If lst = [1..8] → 8×3 = 24 steps",
            "If lst = [1..1024] → 1,024×10 = 10,240 steps",
            "If lst has 1,000,000 items → ~20,000,000 steps",
        ],
        Complexity::Quadratic => &[
            "If lst = [1..10] → 10×10 = 100 steps",
            "If lst = [1..100] → 100×100 = 10,000 steps",
            "If lst has 1,000 items → 1,000×1,000 = 1,000,000 steps",
        ],
        Complexity::Exponential => &[
            "If n = 5 → 2⁵ = 32 steps",
            "If n = 10 → 2¹⁰ = 1,024 steps",
            "If n = 20 → 2²⁰ = 1,048,576 steps",
        ],
    }
}

fn conclusion(complexity: Complexity) -> &'static str {
    match complexity {
        Complexity::Constant => "✅ O(1) → Constant time",
        Complexity::Logarithmic => "✅ O(log n) → Logarithmic time",
        Complexity::Linear => "✅ O(n) → Linear time",
        Complexity::Linearithmic => "✅ O(n log n) → Linearithmic time",
        Complexity::Quadratic => "✅ O(n²) → Quadratic time",
        Complexity::Exponential => "✅ O(2ⁿ) → Exponential time",
    }
}

/// "Behind the scenes" summary shown once a trace completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explanation {
    pub title: &'static str,
    pub steps: Vec<String>,
    pub examples: &'static [&'static str],
    pub conclusion: &'static str,
}

impl Explanation {
    /// Build the summary for `sequence`, listing at most `limit` step logs.
    ///
    /// ```rust
    /// use complexity_view::{generate, Complexity, Explanation};
    /// # use rand::SeedableRng;
    /// # let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    ///
    /// let seq = generate(Complexity::Linear, 15, &mut rng);
    /// let explanation = Explanation::for_sequence(&seq, 10);
    /// assert_eq!(explanation.steps.len(), 11);
    /// assert_eq!(explanation.steps[10], "... and 5 more steps");
    /// ```
    pub fn for_sequence(sequence: &StepSequence, limit: usize) -> Self {
        let complexity = sequence.complexity();
        let steps = match complexity {
            Complexity::Constant => {
                let index = sequence.get(0).and_then(|s| match s.kind {
                    StepKind::Access { index, .. } => Some(index),
                    _ => None,
                });
                CONSTANT_STEPS
                    .iter()
                    .map(|line| match index {
                        Some(i) => line.replace("{index}", &i.to_string()),
                        None => line.to_string(),
                    })
                    .collect()
            }
            _ => {
                let mut lines: Vec<String> = sequence.iter().take(limit).map(|s| s.log.clone()).collect();
                if sequence.len() > limit {
                    lines.push(format!("... and {} more steps", sequence.len() - limit));
                }
                lines
            }
        };
        Self {
            title: "Behind the scenes:",
            steps,
            examples: examples(complexity),
            conclusion: conclusion(complexity),
        }
    }

    /// Plain-text rendering, one entry per line.
    pub fn to_text(&self) -> String {
        let mut out = String::from(self.title);
        for line in self.steps.iter().map(String::as_str).chain(self.examples.iter().copied()) {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(self.conclusion);
        out
    }
}
