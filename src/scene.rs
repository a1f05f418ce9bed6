//! Scene layout for the time visualizer canvas.
//!
//! Every layout is a pure function of the controller state and the canvas
//! size. Resizing only changes the numbers fed in here.

use crate::color::Color;
use crate::config::Theme;
use crate::generator::merge_pass_count;
use crate::render::{Scene, Stroke, TextStyle};
use crate::sizing::{grid_cell, BoxSizing, RowLayout};
use crate::step::{SearchEvent, Step, StepKind, StepSequence};
use crate::{Complexity, PlaybackController};

/// Above this size the binary search shows only the live interval.
pub const FOCUS_THRESHOLD: usize = 25;

/// Boxes kept visible on each side of the live interval.
const FOCUS_CONTEXT: usize = 3;

const IDLE_STROKE: Color = Color::gray(0xdd);
const FOCUSED_IDLE_STROKE: Color = Color::gray(0xcc);
const VISITED_FILL: Color = Color::gray(0xe0);
const GRID_STROKE: Color = Color::gray(0xf0);
const GRID_VISITED: Color = Color::gray(0xcc);
const MUTED_TEXT: Color = Color::gray(0x66);
const ELLIPSIS_TEXT: Color = Color::gray(0x99);

const OUT_OF_RANGE_ALPHA: f64 = 0.3;
const LABEL_SIZE: f64 = 14.0;
const CAPTION_SIZE: f64 = 12.0;

/// How one array box is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Cell {
    Idle,
    Visited,
    /// Highlighted with the given eased progress
    Active(f64),
}

#[derive(Clone, Copy, Debug)]
struct Palette {
    active: Color,
    idle_stroke: Color,
    /// Alpha multiplier for the whole box
    alpha: f64,
}

fn faded(color: Color, alpha: f64) -> Color {
    color.with_alpha(color.a * alpha)
}

fn array_box(scene: &mut Scene, x: f64, y: f64, size: f64, cell: Cell, label: Option<usize>, palette: Palette) {
    let (fill, stroke, text) = match cell {
        Cell::Idle => (None, Stroke::solid(palette.idle_stroke, 1.0), Color::BLACK),
        Cell::Visited => (Some(VISITED_FILL), Stroke::solid(palette.idle_stroke, 1.0), MUTED_TEXT),
        Cell::Active(progress) => (
            Some(palette.active.with_alpha(progress)),
            Stroke::solid(palette.active, 2.0),
            if progress > 0.5 { Color::WHITE } else { Color::BLACK },
        ),
    };
    let stroke = Stroke {
        color: faded(stroke.color, palette.alpha),
        ..stroke
    };
    scene.rect(x, y, size, size, fill.map(|c| faded(c, palette.alpha)), Some(stroke));
    if let Some(label) = label {
        scene.text(
            label.to_string(),
            x + size / 2.0,
            y + size / 2.0,
            TextStyle::new(faded(text, palette.alpha), LABEL_SIZE),
        );
    }
}

fn caption(scene: &mut Scene, text: String) {
    let (x, y) = (scene.width / 2.0, scene.height - 20.0);
    scene.text(text, x, y, TextStyle::new(MUTED_TEXT, CAPTION_SIZE));
}

/// Lay out the time visualizer canvas for the controller's current state.
///
/// ```rust
/// use complexity_view::{scene::time_scene, Complexity, PlaybackController, Theme};
///
/// let mut ctrl = PlaybackController::new(Complexity::Linear, 4).with_seed(1);
/// ctrl.step();
/// let scene = time_scene(&ctrl, 600.0, 300.0, &Theme::default());
/// assert!(scene.texts().any(|t| t.contains("Processing 4 elements")));
/// ```
pub fn time_scene(ctrl: &PlaybackController, width: f64, height: f64, theme: &Theme) -> Scene {
    let mut scene = Scene::new(width, height);
    let step = ctrl.current_step();
    let progress = if step.is_some() { ctrl.step_progress() } else { 0.0 };
    let n = step
        .map(|s| s.kind.n())
        .unwrap_or_else(|| ctrl.display_n().round().max(1.0) as usize);
    let active = theme.active_color();
    let sizing = BoxSizing::default();

    match ctrl.complexity() {
        Complexity::Constant => {
            let index = match step.map(|s| &s.kind) {
                Some(StepKind::Access { index, .. }) => Some(*index),
                _ => None,
            };
            box_row(&mut scene, &sizing, n, 40.0, active, |i| match index {
                Some(target) if target == i => Cell::Active(progress),
                _ => Cell::Idle,
            });
            caption(
                &mut scene,
                match index {
                    Some(i) => format!("Array of {} elements - accessing index {} takes O(1) time", n, i),
                    None => format!("Array of {} elements - O(1) constant time access", n),
                },
            );
        }
        Complexity::Logarithmic => {
            let progress = if ctrl.current_index() > 0 { ctrl.step_progress() } else { 0.0 };
            search_scene(&mut scene, &sizing, ctrl, progress, active);
        }
        Complexity::Linear => {
            let current = match step.map(|s| &s.kind) {
                Some(StepKind::Visit { index, .. }) => Some(*index),
                _ => None,
            };
            box_row(&mut scene, &sizing, n, 40.0, active, |i| match current {
                Some(c) if c == i => Cell::Active(progress),
                Some(c) if i < c => Cell::Visited,
                _ => Cell::Idle,
            });
            caption(
                &mut scene,
                format!("Processing {} elements sequentially - O(n) linear time", n),
            );
        }
        Complexity::Linearithmic => merge_scene(&mut scene, step, n, progress, active),
        Complexity::Quadratic => pair_scene(&mut scene, step, n, progress, active),
        Complexity::Exponential => tree_scene(&mut scene, ctrl, progress, active),
    }

    scene
}

fn box_row(scene: &mut Scene, sizing: &BoxSizing, n: usize, margin: f64, active: Color, cell: impl Fn(usize) -> Cell) -> RowLayout {
    let row = sizing.row(n, scene.width, scene.height, margin);
    let palette = Palette {
        active,
        idle_stroke: IDLE_STROKE,
        alpha: 1.0,
    };
    let labelled = sizing.shows_label(row.box_size);
    for i in 0..n {
        array_box(scene, row.x(i), row.y, row.box_size, cell(i), labelled.then_some(i), palette);
    }
    row
}

/// Visible index range `[start, end]` of the focused search view, or `None`
/// when the whole array fits.
pub fn focus_window(n: usize, low: usize, high: usize) -> Option<(usize, usize)> {
    if n <= FOCUS_THRESHOLD {
        return None;
    }
    let start = low.saturating_sub(FOCUS_CONTEXT);
    let end = (high + FOCUS_CONTEXT).min(n - 1).max(start);
    Some((start, end))
}

/// Search interval shown for `step`, defaulting to the full array.
fn search_frame(step: Option<&Step>, n: usize) -> (usize, usize, usize, Option<usize>, usize, bool) {
    match step.map(|s| &s.kind) {
        Some(&StepKind::Search {
            event,
            low,
            high,
            mid,
            target,
            n,
        }) => (n, low, high, mid, target, event == SearchEvent::Found),
        _ => (n, 0, n.saturating_sub(1), None, 0, false),
    }
}

fn search_scene(scene: &mut Scene, sizing: &BoxSizing, ctrl: &PlaybackController, progress: f64, active: Color) {
    let shown = ctrl.current_step().or_else(|| ctrl.sequence().get(0));
    let fallback_n = ctrl.display_n().round().max(1.0) as usize;
    let (n, low, high, mid, target, found) = search_frame(shown, fallback_n);
    let started = ctrl.current_index() > 0;

    let cell = |i: usize| {
        if Some(i) == mid || (found && i == target) {
            Cell::Active(progress)
        } else {
            Cell::Idle
        }
    };
    let alpha = |i: usize| if i >= low && i <= high { 1.0 } else { OUT_OF_RANGE_ALPHA };

    match focus_window(n, low, high) {
        None => {
            let row = sizing.row(n, scene.width, scene.height, 60.0);
            let labelled = sizing.shows_label(row.box_size);
            for i in 0..n {
                let palette = Palette {
                    active,
                    idle_stroke: IDLE_STROKE,
                    alpha: alpha(i),
                };
                array_box(scene, row.x(i), row.y, row.box_size, cell(i), labelled.then_some(i), palette);
            }
            caption(
                scene,
                if started {
                    format!("Searching for {} | Range: [{}...{}]", target, low, high)
                } else {
                    "Binary Search - O(log n) logarithmic time".to_string()
                },
            );
        }
        Some((start, end)) => {
            let count = end - start + 1;
            let row = sizing.row(count, scene.width, scene.height, 100.0);
            let mid_y = row.y + row.box_size / 2.0;
            let ellipsis = TextStyle::new(ELLIPSIS_TEXT, 20.0);
            if start > 0 {
                scene.text("...", row.start_x - 25.0, mid_y, ellipsis.clone());
            }
            if end < n - 1 {
                scene.text("...", row.start_x + row.total_width + 15.0, mid_y, ellipsis);
            }
            for (slot, i) in (start..=end).enumerate() {
                let palette = Palette {
                    active,
                    idle_stroke: FOCUSED_IDLE_STROKE,
                    alpha: alpha(i),
                };
                array_box(scene, row.x(slot), row.y, row.box_size, cell(i), Some(i), palette);
            }
            caption(
                scene,
                if started {
                    format!(
                        "Binary Search: target={} | [{}...{}] | Array size: {}",
                        target, low, high, n
                    )
                } else {
                    format!("Binary Search - O(log n) | Array size: {}", n)
                },
            );
        }
    }
}

fn grid_fill(visited: bool, current: bool, progress: f64, active: Color) -> Option<Color> {
    if current {
        Some(active.with_alpha(progress))
    } else if visited {
        Some(GRID_VISITED)
    } else {
        None
    }
}

fn pair_scene(scene: &mut Scene, step: Option<&Step>, n: usize, progress: f64, active: Color) {
    let cursor = match step.map(|s| &s.kind) {
        Some(&StepKind::PairVisit { i, j, .. }) => Some((i, j)),
        _ => None,
    };
    let cell = (scene.width.min(scene.height) - 60.0) / n.max(1) as f64;
    let cell = if cell.is_finite() { cell.max(8.0) } else { 8.0 };
    let total = cell * n as f64;
    let start_x = (scene.width - total) / 2.0;
    let start_y = (scene.height - total) / 2.0;

    for i in 0..n {
        for j in 0..n {
            let (visited, current) = match cursor {
                Some((ci, cj)) => (i < ci || (i == ci && j <= cj), i == ci && j == cj),
                None => (false, false),
            };
            scene.rect(
                start_x + j as f64 * cell,
                start_y + i as f64 * cell,
                cell,
                cell,
                grid_fill(visited, current, progress, active),
                Some(Stroke::solid(GRID_STROKE, 0.5)),
            );
        }
    }
    caption(scene, format!("{}×{} grid - O(n²) quadratic time", n, n));
}

fn merge_scene(scene: &mut Scene, step: Option<&Step>, n: usize, progress: f64, active: Color) {
    let passes = merge_pass_count(n);
    let cursor = match step.map(|s| &s.kind) {
        Some(&StepKind::Merge { pass, index, .. }) => Some((pass, index)),
        _ => None,
    };
    let cell = grid_cell(n, passes, scene.width, scene.height, 60.0, 8.0);
    let start_x = (scene.width - cell * n as f64) / 2.0;
    let start_y = (scene.height - cell * passes as f64) / 2.0;

    for pass in 0..passes {
        for index in 0..n {
            let (visited, current) = match cursor {
                Some((cp, ci)) => (
                    pass < cp || (pass == cp && index <= ci),
                    pass == cp && index == ci,
                ),
                None => (false, false),
            };
            scene.rect(
                start_x + index as f64 * cell,
                start_y + pass as f64 * cell,
                cell,
                cell,
                grid_fill(visited, current, progress, active),
                Some(Stroke::solid(GRID_STROKE, 0.5)),
            );
        }
    }
    caption(
        scene,
        format!(
            "{} merge passes over {} elements - O(n log n) linearithmic time",
            passes, n
        ),
    );
}

/// Canvas position of one call-tree node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeNode {
    /// Index of the `Call` record in the sequence
    pub index: usize,
    pub k: u32,
    pub cx: f64,
    pub cy: f64,
}

/// Place every `Call` record of `sequence` on a `width`×`height` canvas.
///
/// `x` offsets are normalized across the canvas and depth runs top to
/// bottom. Return records share their call's position and are skipped.
pub fn tree_layout(sequence: &StepSequence, width: f64, height: f64) -> Vec<TreeNode> {
    const PADDING: f64 = 40.0;

    let calls: Vec<(usize, u32, usize, i32)> = sequence
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_call())
        .filter_map(|(i, s)| match s.kind {
            StepKind::Call { k, depth, x, .. } => Some((i, k, depth, x)),
            _ => None,
        })
        .collect();
    if calls.is_empty() {
        return Vec::new();
    }

    let max_depth = calls.iter().map(|c| c.2).max().unwrap_or(0);
    let min_x = calls.iter().map(|c| c.3).min().unwrap_or(0);
    let max_x = calls.iter().map(|c| c.3).max().unwrap_or(0);
    let tree_width = f64::from((max_x - min_x).max(1));
    let width_span = (width - PADDING * 2.0).max(120.0);
    let height_span = (height - PADDING * 2.0 - 30.0).max(120.0);

    calls
        .into_iter()
        .map(|(index, k, depth, x)| {
            let nx = if max_x == min_x {
                0.5
            } else {
                f64::from(x - min_x) / tree_width
            };
            let ny = if max_depth > 0 {
                depth as f64 / max_depth as f64
            } else {
                0.0
            };
            TreeNode {
                index,
                k,
                cx: PADDING + nx * width_span,
                cy: PADDING + ny * height_span,
            }
        })
        .collect()
}

/// Node radius for a canvas of `width` pixels.
pub fn tree_node_radius(width: f64) -> f64 {
    ((width - 80.0).max(120.0) / 30.0).clamp(12.0, 18.0)
}

fn tree_scene(scene: &mut Scene, ctrl: &PlaybackController, progress: f64, active: Color) {
    let sequence = ctrl.sequence();
    let nodes = tree_layout(sequence, scene.width, scene.height);
    if nodes.is_empty() {
        let (x, y) = (scene.width / 2.0, scene.height / 2.0);
        scene.text(
            format!("Fibonacci tree for n={} - O(2ⁿ) exponential time", sequence.n()),
            x,
            y,
            TextStyle::new(MUTED_TEXT, LABEL_SIZE),
        );
        return;
    }

    let radius = tree_node_radius(scene.width);
    let cursor = ctrl.current_index();
    let cutoff = cursor.max(1);
    let position = |index: usize| nodes.iter().find(|n| n.index == index).map(|n| (n.cx, n.cy));

    let edges = |scene: &mut Scene, limit: usize, stroke: Stroke| {
        for node in nodes.iter().filter(|n| n.index < limit) {
            let Some(StepKind::Call { parent: Some(parent), .. }) = sequence.get(node.index).map(|s| &s.kind) else {
                continue;
            };
            let Some((px, py)) = position(*parent) else {
                continue;
            };
            let angle = (node.cy - py).atan2(node.cx - px);
            let (dx, dy) = (angle.cos() * radius, angle.sin() * radius);
            scene.line((px + dx, py + dy), (node.cx - dx, node.cy - dy), stroke.clone());
        }
    };
    edges(scene, usize::MAX, Stroke::dashed(Color::gray(0xf0), 1.0, &[4.0, 4.0]));
    edges(scene, cutoff, Stroke::solid(Color::gray(0xd0), 2.0));

    for node in &nodes {
        scene.circle(
            node.cx,
            node.cy,
            radius,
            Some(Color::WHITE),
            Some(Stroke::solid(Color::gray(0xee), 1.0)),
        );
    }

    for node in nodes.iter().filter(|n| n.index < cutoff && n.index + 1 != cursor) {
        scene.circle(
            node.cx,
            node.cy,
            radius,
            Some(Color::gray(0xf7)),
            Some(Stroke::solid(Color::gray(0x88), 1.5)),
        );
        scene.text(
            node.k.to_string(),
            node.cx,
            node.cy,
            TextStyle::new(Color::gray(0x44), 12.0),
        );
    }

    let head = cursor.saturating_sub(1);
    let current = nodes
        .iter()
        .rev()
        .find(|n| n.index <= head)
        .or_else(|| nodes.first());
    if let Some(node) = current {
        let fill = if progress < 1.0 { active.with_alpha(progress) } else { active };
        scene.circle(node.cx, node.cy, radius, Some(fill), Some(Stroke::solid(active, 2.5)));
        let text = if progress > 0.5 { Color::WHITE } else { Color::BLACK };
        scene.text(node.k.to_string(), node.cx, node.cy, TextStyle::new(text, 12.0).bold());
    }

    let (x, y) = (scene.width / 2.0, scene.height - 15.0);
    scene.text(
        format!("Recursive tree for fib({}) - O(2ⁿ) exponential", sequence.n()),
        x,
        y,
        TextStyle::new(MUTED_TEXT, CAPTION_SIZE),
    );
}
