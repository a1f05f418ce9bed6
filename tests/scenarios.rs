use std::time::Duration;

use complexity_view::{
    fib_call_count, generate, CallEvent, Complexity, PlaybackController, PlaybackState, SpaceClass, SpaceControl,
    SpaceMode, SpaceVisualizer, StepKind, TimeControl, TimeVisualizer, VisualizerConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: Duration = Duration::from_millis(16);

fn run_to_completion(ctrl: &mut PlaybackController) {
    for _ in 0..100_000 {
        if ctrl.state() != PlaybackState::Playing {
            return;
        }
        ctrl.tick(FRAME);
    }
    panic!("playback never completed");
}

#[test]
fn test_linear_five_scenario() {
    let mut ctrl = PlaybackController::new(Complexity::Linear, 5).with_seed(1);
    let indices: Vec<usize> = ctrl
        .sequence()
        .iter()
        .map(|s| match s.kind {
            StepKind::Visit { index, .. } => index,
            ref other => panic!("unexpected step {:?}", other),
        })
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);

    ctrl.set_speed(100.0);
    ctrl.play();
    run_to_completion(&mut ctrl);
    assert_eq!(ctrl.state(), PlaybackState::Completed);
    assert_eq!(ctrl.transcript().len(), 5);
}

fn simulate_fib_calls(k: u32) -> u64 {
    if k <= 1 {
        1
    } else {
        1 + simulate_fib_calls(k - 1) + simulate_fib_calls(k - 2)
    }
}

#[test]
fn test_fibonacci_five_scenario() {
    let mut rng = StdRng::seed_from_u64(0);
    let seq = generate(Complexity::Exponential, 5, &mut rng);
    assert_eq!(seq.call_count(), 15);
    assert_eq!(fib_call_count(5), simulate_fib_calls(5));

    let returns = seq
        .iter()
        .filter(|s| matches!(s.kind, StepKind::Call { event: CallEvent::Return, .. }))
        .count();
    // fib(5) bottoms out in 8 base cases
    assert_eq!(returns, 8);
    assert_eq!(seq.len(), 23);
}

#[test]
fn test_fibonacci_input_is_capped() {
    let mut rng = StdRng::seed_from_u64(0);
    let seq = generate(Complexity::Exponential, 40, &mut rng);
    assert_eq!(seq.n(), 12);
    assert_eq!(seq.call_count() as u64, simulate_fib_calls(12));
}

#[test]
fn test_quadratic_three_scenario() {
    let mut rng = StdRng::seed_from_u64(0);
    let seq = generate(Complexity::Quadratic, 3, &mut rng);
    let pairs: Vec<(usize, usize)> = seq
        .iter()
        .filter_map(|s| match s.kind {
            StepKind::PairVisit { i, j, .. } => Some((i, j)),
            _ => None,
        })
        .collect();
    assert_eq!(
        pairs,
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
    );
}

#[test]
fn test_pause_twice_matches_pause_once() {
    let mut once = PlaybackController::new(Complexity::Quadratic, 4).with_seed(2);
    once.play();
    once.tick(Duration::from_millis(600));
    let mut twice = once.clone();

    once.pause();
    twice.pause();
    twice.pause();
    assert_eq!(once.state(), twice.state());
    assert_eq!(once.current_index(), twice.current_index());
    assert_eq!(once.transcript(), twice.transcript());
}

#[test]
fn test_stepping_matches_playing() {
    for complexity in Complexity::ALL {
        let mut stepped = PlaybackController::new(complexity, 9).with_seed(77);
        let mut played = PlaybackController::new(complexity, 9).with_seed(77);

        stepped.reset();
        played.reset();
        let len = stepped.total_steps();
        for _ in 0..len {
            stepped.step();
        }

        played.set_speed(100.0);
        played.play();
        run_to_completion(&mut played);

        assert_eq!(stepped.state(), PlaybackState::Completed, "{}", complexity);
        assert_eq!(played.state(), PlaybackState::Completed, "{}", complexity);
        assert_eq!(stepped.current_index(), played.current_index());
        assert_eq!(stepped.transcript(), played.transcript());
    }
}

#[test]
fn test_input_transition_settles_on_target() {
    let mut ctrl = PlaybackController::new(Complexity::Linear, 10).with_seed(5);
    ctrl.set_input(20);
    assert!(ctrl.is_transitioning());
    assert_eq!(ctrl.n(), 10);

    ctrl.tick(Duration::from_millis(200));
    let midway = ctrl.display_n();
    assert!(midway > 10.0 && midway < 20.0);
    // Still the old trace until the transition is over
    assert_eq!(ctrl.total_steps(), 10);

    ctrl.tick(Duration::from_millis(200));
    assert_eq!(ctrl.display_n(), 20.0);
    assert_eq!(ctrl.n(), 20);

    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(ctrl.sequence(), &generate(Complexity::Linear, 20, &mut rng));
}

#[test]
fn test_input_change_resumes_playback() {
    let mut ctrl = PlaybackController::new(Complexity::Linear, 10).with_seed(5);
    ctrl.play();
    ctrl.set_input(3);
    assert_eq!(ctrl.state(), PlaybackState::Paused);
    ctrl.tick(Duration::from_millis(400));
    assert_eq!(ctrl.state(), PlaybackState::Playing);
    assert_eq!(ctrl.total_steps(), 3);
    assert_eq!(ctrl.current_index(), 0);
}

#[test]
fn test_time_visualizer_flow() {
    let mut vis = TimeVisualizer::new(&VisualizerConfig::default()).with_seed(8);
    vis.apply(TimeControl::SelectComplexity(Complexity::Logarithmic));
    vis.apply(TimeControl::SetSpeed(100.0));
    vis.apply(TimeControl::Play);

    let mut now = 0.0;
    while vis.state() == PlaybackState::Playing {
        vis.frame(now);
        now += 16.0;
        assert!(now < 60_000.0, "search never completed");
    }

    let (taken, total) = vis.counters();
    assert_eq!(taken, total);
    let explanation = vis.explanation().expect("explanation after completion");
    assert_eq!(explanation.conclusion, "✅ O(log n) → Logarithmic time");
    assert!(vis.transcript().last().is_some_and(|l| l.contains("found")));
    assert!(vis.highlighted_line().is_some());

    vis.apply(TimeControl::Play);
    assert_eq!(vis.state(), PlaybackState::Playing);
    assert_eq!(vis.counters().0, 0);
    assert!(vis.explanation().is_none());
}

#[test]
fn test_space_visualizer_flow() {
    let mut vis = SpaceVisualizer::new(&VisualizerConfig::default());
    vis.apply(SpaceControl::SelectComplexity(SpaceClass::Quadratic));
    vis.apply(SpaceControl::SelectMode(SpaceMode::Tree));
    vis.apply(SpaceControl::SetInput(8.0));

    assert_eq!(vis.units(), 16.0);
    assert!(vis.scene().texts().any(|t| t == "RECURSION TREE (6 levels, 63 nodes)"));

    vis.apply(SpaceControl::Pause);
    vis.frame(0.0);
    vis.frame(100.0);
    assert_eq!(vis.phase(), 0.0);
}
