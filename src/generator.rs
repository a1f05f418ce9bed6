//! Step generation: unrolls each textbook algorithm into its exact trace.

use rand::Rng;

use crate::step::{CallEvent, SearchEvent, Step, StepKind, StepSequence};
use crate::Complexity;

/// Generate the full step trace for `complexity` at input size `n`.
///
/// `n` is clamped to `1..=`[`MAX_INPUT`](crate::MAX_INPUT) and the
/// exponential case is capped at
/// [`EXPONENTIAL_INPUT_CAP`](crate::EXPONENTIAL_INPUT_CAP). The random source
/// picks the accessed index (O(1)) and the search target (O(log n)); every
/// other class is fully deterministic.
///
/// ## Example
///
/// ```rust
/// use complexity_view::{generate, Complexity};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let seq = generate(Complexity::Quadratic, 3, &mut rng);
/// assert_eq!(seq.len(), 9);
/// assert_eq!(seq.get(8).unwrap().log, "→ step 9: print(2, 2)");
/// ```
pub fn generate<R: Rng + ?Sized>(complexity: Complexity, n: u32, rng: &mut R) -> StepSequence {
    let n = complexity.effective_input(n);
    let size = n as usize;
    let steps = match complexity {
        Complexity::Constant => constant_steps(size, rng),
        Complexity::Logarithmic => binary_search_steps(size, rng.gen_range(0..size)),
        Complexity::Linear => linear_steps(size),
        Complexity::Linearithmic => merge_pass_steps(size),
        Complexity::Quadratic => pair_steps(size),
        Complexity::Exponential => fibonacci_steps(n),
    };
    tracing::debug!(
        complexity = complexity.label(),
        n,
        steps = steps.len(),
        "generated step sequence"
    );
    StepSequence::new(complexity, n, steps)
}

fn constant_steps<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Step> {
    let index = rng.gen_range(0..n);
    vec![Step::new(
        StepKind::Access { index, n },
        2,
        format!("→ step 1: access arr[{}] - O(1) constant time", index),
    )]
}

/// Binary search for `target` over `[0, n)`.
///
/// Stops at `Found` or when the interval empties; with `target < n` the
/// search always ends on `Found`.
pub fn binary_search_steps(n: usize, target: usize) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut count = 1;
    let mut low = 0usize;
    let mut high = n.saturating_sub(1);

    let mut push = |steps: &mut Vec<Step>, event, low, high, mid, line, log: String| {
        steps.push(Step::new(
            StepKind::Search {
                event,
                low,
                high,
                mid,
                target,
                n,
            },
            line,
            format!("→ step {}: {}", count, log),
        ));
        count += 1;
    };

    push(
        &mut steps,
        SearchEvent::Start,
        low,
        high,
        None,
        2,
        format!("searching for {}", target),
    );

    while n > 0 && low <= high {
        let mid = low + (high - low) / 2;
        push(
            &mut steps,
            SearchEvent::Check,
            low,
            high,
            Some(mid),
            4,
            format!("check mid[{}] = {}", mid, mid),
        );

        if mid == target {
            push(
                &mut steps,
                SearchEvent::Found,
                low,
                high,
                Some(mid),
                5,
                format!("found {}!", target),
            );
            break;
        } else if mid < target {
            low = mid + 1;
            push(
                &mut steps,
                SearchEvent::MoveRight,
                low,
                high,
                Some(mid),
                6,
                format!("{} < {}, search right", mid, target),
            );
        } else {
            let Some(next_high) = mid.checked_sub(1) else {
                break;
            };
            high = next_high;
            push(
                &mut steps,
                SearchEvent::MoveLeft,
                low,
                high,
                Some(mid),
                7,
                format!("{} > {}, search left", mid, target),
            );
        }
    }

    steps
}

fn linear_steps(n: usize) -> Vec<Step> {
    (0..n)
        .map(|index| {
            Step::new(
                StepKind::Visit { index, n },
                3,
                format!("→ step {}: print({})", index + 1, index),
            )
        })
        .collect()
}

/// Number of merge passes for an array of `n` elements: `max(1, ⌈log₂ n⌉)`.
#[inline]
pub fn merge_pass_count(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let ceil_log2 = (usize::BITS - (n - 1).leading_zeros()) as usize;
    ceil_log2.max(1)
}

fn merge_pass_steps(n: usize) -> Vec<Step> {
    let passes = merge_pass_count(n);
    let mut steps = Vec::with_capacity(passes * n);
    for pass in 0..passes {
        let width = 1usize << pass;
        for index in 0..n {
            steps.push(Step::new(
                StepKind::Merge { pass, index, n },
                4,
                format!(
                    "→ step {}: merge pass {} (width {}), place {}",
                    steps.len() + 1,
                    pass + 1,
                    width,
                    index
                ),
            ));
        }
    }
    steps
}

fn pair_steps(n: usize) -> Vec<Step> {
    let mut steps = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            steps.push(Step::new(
                StepKind::PairVisit { i, j, n },
                4,
                format!("→ step {}: print({}, {})", steps.len() + 1, i, j),
            ));
        }
    }
    steps
}

/// Number of invocations naive `fib(k)` performs:
/// `T(k) = T(k-1) + T(k-2) + 1`, `T(0) = T(1) = 1`.
pub fn fib_call_count(k: u32) -> u64 {
    let (mut prev, mut curr) = (1u64, 1u64);
    for _ in 1..k {
        let next = prev + curr + 1;
        prev = curr;
        curr = next;
    }
    curr
}

fn fibonacci_steps(k: u32) -> Vec<Step> {
    let mut steps = Vec::new();
    fib_trace(&mut steps, k, k as usize, 0, 0, None);
    steps
}

/// Depth-first expansion of the call tree into the flat arena `steps`.
///
/// Left child sits at `x - 1`, right child at `x + 1`, one level deeper.
fn fib_trace(steps: &mut Vec<Step>, k: u32, n: usize, depth: usize, x: i32, parent: Option<usize>) {
    let current = steps.len();
    let line = if k <= 1 { 2 } else { 3 };
    steps.push(Step::new(
        StepKind::Call {
            event: CallEvent::Call,
            k,
            depth,
            x,
            parent,
            n,
        },
        line,
        format!("→ step {}: fib({})", current + 1, k),
    ));

    if k <= 1 {
        steps.push(Step::new(
            StepKind::Call {
                event: CallEvent::Return,
                k,
                depth,
                x,
                parent,
                n,
            },
            2,
            format!("→ step {}: return {}", steps.len() + 1, k),
        ));
        return;
    }

    fib_trace(steps, k - 1, n, depth + 1, x - 1, Some(current));
    fib_trace(steps, k - 2, n, depth + 1, x + 1, Some(current));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_INPUT;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn ceil_log2(n: usize) -> usize {
        (n as f64).log2().ceil() as usize
    }

    /// Direct recursive count of fib(k) invocations.
    fn simulate_fib_calls(k: u32) -> u64 {
        if k <= 1 {
            1
        } else {
            1 + simulate_fib_calls(k - 1) + simulate_fib_calls(k - 2)
        }
    }

    #[test]
    fn test_linear_scenario() {
        let seq = generate(Complexity::Linear, 5, &mut rng());
        assert_eq!(seq.len(), 5);
        let indices: Vec<usize> = seq
            .iter()
            .map(|s| match s.kind {
                StepKind::Visit { index, .. } => index,
                ref other => panic!("unexpected step {:?}", other),
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(seq.get(4).unwrap().log, "→ step 5: print(4)");
    }

    #[test]
    fn test_quadratic_scenario() {
        let seq = generate(Complexity::Quadratic, 3, &mut rng());
        let pairs: Vec<(usize, usize)> = seq
            .iter()
            .map(|s| match s.kind {
                StepKind::PairVisit { i, j, .. } => (i, j),
                ref other => panic!("unexpected step {:?}", other),
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_fibonacci_five() {
        let seq = generate(Complexity::Exponential, 5, &mut rng());
        assert_eq!(seq.call_count() as u64, 15);
        assert_eq!(fib_call_count(5), 15);
        assert_eq!(simulate_fib_calls(5), 15);
        // 15 calls, 8 of which are base cases with a return record
        assert_eq!(seq.len(), 23);
    }

    #[test]
    fn test_fib_call_count_matches_simulation() {
        for k in 0..=12 {
            assert_eq!(fib_call_count(k), simulate_fib_calls(k), "k = {}", k);
        }
    }

    #[test]
    fn test_exponential_input_capped() {
        let seq = generate(Complexity::Exponential, 40, &mut rng());
        assert_eq!(seq.n(), 12);
        assert_eq!(seq.call_count() as u64, fib_call_count(12));
        assert_eq!(seq.call_count(), 465);
    }

    #[test]
    fn test_call_tree_layout() {
        let seq = generate(Complexity::Exponential, 3, &mut rng());
        let root = seq.get(0).unwrap();
        assert!(matches!(
            root.kind,
            StepKind::Call { k: 3, depth: 0, x: 0, parent: None, .. }
        ));
        // fib(2) is the left child of the root
        assert!(matches!(
            seq.get(1).unwrap().kind,
            StepKind::Call { k: 2, depth: 1, x: -1, parent: Some(0), .. }
        ));
        assert_eq!(seq.parent_of(1), Some(root));

        for (idx, step) in seq.iter().enumerate() {
            if let StepKind::Call { depth, x, parent: Some(p), event: CallEvent::Call, .. } = step.kind {
                let StepKind::Call { depth: pd, x: px, .. } = seq.get(p).unwrap().kind else {
                    panic!("parent of {} is not a call", idx);
                };
                assert!(p < idx);
                assert_eq!(depth, pd + 1);
                assert_eq!((x - px).abs(), 1);
            }
        }
    }

    #[test]
    fn test_base_case_call_then_return() {
        let seq = generate(Complexity::Exponential, 1, &mut rng());
        assert_eq!(seq.len(), 2);
        assert!(seq.get(0).unwrap().is_call());
        assert_eq!(seq.get(1).unwrap().log, "→ step 2: return 1");
    }

    #[test]
    fn test_binary_search_every_target() {
        for n in 1..=50 {
            for target in 0..n {
                let steps = binary_search_steps(n, target);
                assert!(matches!(
                    steps[0].kind,
                    StepKind::Search { event: SearchEvent::Start, mid: None, .. }
                ));
                let last = steps.last().unwrap();
                assert!(
                    matches!(last.kind, StepKind::Search { event: SearchEvent::Found, mid: Some(m), .. } if m == target),
                    "n = {}, target = {}",
                    n,
                    target
                );
                let checks = steps
                    .iter()
                    .filter(|s| matches!(s.kind, StepKind::Search { event: SearchEvent::Check, .. }))
                    .count();
                assert!(checks <= ceil_log2(n) + 2);
                assert_eq!(steps.len(), 1 + 2 * checks);
            }
        }
    }

    #[test]
    fn test_binary_search_log_lines() {
        let steps = binary_search_steps(10, 7);
        let logs: Vec<&str> = steps.iter().map(|s| s.log.as_str()).collect();
        assert_eq!(
            logs,
            vec![
                "→ step 1: searching for 7",
                "→ step 2: check mid[4] = 4",
                "→ step 3: 4 < 7, search right",
                "→ step 4: check mid[7] = 7",
                "→ step 5: found 7!",
            ]
        );
    }

    #[test]
    fn test_merge_passes() {
        assert_eq!(merge_pass_count(1), 1);
        assert_eq!(merge_pass_count(2), 1);
        assert_eq!(merge_pass_count(5), 3);
        assert_eq!(merge_pass_count(8), 3);
        assert_eq!(merge_pass_count(9), 4);

        let seq = generate(Complexity::Linearithmic, 5, &mut rng());
        assert_eq!(seq.len(), 15);
        assert!(matches!(
            seq.get(14).unwrap().kind,
            StepKind::Merge { pass: 2, index: 4, n: 5 }
        ));
    }

    #[test]
    fn test_oversized_input_is_clamped() {
        let seq = generate(Complexity::Linear, 3_000_000, &mut rng());
        assert_eq!(seq.n(), MAX_INPUT);
        assert_eq!(seq.len(), MAX_INPUT as usize);

        let seq = generate(Complexity::Quadratic, 2000, &mut rng());
        assert_eq!(seq.len(), (MAX_INPUT * MAX_INPUT) as usize);
    }

    #[test]
    fn test_zero_input_is_clamped() {
        let seq = generate(Complexity::Linear, 0, &mut rng());
        assert_eq!(seq.n(), 1);
        assert_eq!(seq.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_constant_single_access(n in 1u32..=200, seed in any::<u64>()) {
            let seq = generate(Complexity::Constant, n, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(seq.len(), 1);
            let in_range = matches!(seq.get(0).unwrap().kind, StepKind::Access { index, .. } if index < n as usize);
            prop_assert!(in_range);
        }

        #[test]
        fn prop_linear_strictly_increasing(n in 1u32..=MAX_INPUT) {
            let seq = generate(Complexity::Linear, n, &mut rng());
            prop_assert_eq!(seq.len(), n as usize);
            for (expected, step) in seq.iter().enumerate() {
                prop_assert_eq!(&step.kind, &StepKind::Visit { index: expected, n: n as usize });
            }
        }

        #[test]
        fn prop_quadratic_row_major(n in 1u32..=40) {
            let seq = generate(Complexity::Quadratic, n, &mut rng());
            let n = n as usize;
            prop_assert_eq!(seq.len(), n * n);
            for (idx, step) in seq.iter().enumerate() {
                prop_assert_eq!(&step.kind, &StepKind::PairVisit { i: idx / n, j: idx % n, n });
            }
            prop_assert_eq!(&seq.get(n * n - 1).unwrap().kind, &StepKind::PairVisit { i: n - 1, j: n - 1, n });
        }

        #[test]
        fn prop_search_always_found(n in 1u32..=MAX_INPUT, seed in any::<u64>()) {
            let seq = generate(Complexity::Logarithmic, n, &mut StdRng::seed_from_u64(seed));
            let found = seq.iter().any(|s| matches!(s.kind, StepKind::Search { event: SearchEvent::Found, .. }));
            prop_assert!(found);
            let checks = seq.iter().filter(|s| matches!(s.kind, StepKind::Search { event: SearchEvent::Check, .. })).count();
            prop_assert!(checks <= ceil_log2(n as usize) + 2);
        }

        #[test]
        fn prop_record_count_bounded(c in 0usize..6, n in any::<u32>()) {
            let seq = generate(Complexity::ALL[c], n, &mut rng());
            prop_assert!(seq.len() <= (MAX_INPUT * MAX_INPUT) as usize);
        }

        #[test]
        fn prop_fibonacci_call_count(n in 0u32..=30) {
            let seq = generate(Complexity::Exponential, n, &mut rng());
            let k = n.clamp(1, 12);
            prop_assert_eq!(seq.call_count() as u64, fib_call_count(k));
        }
    }
}
