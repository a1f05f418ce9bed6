//! Space-complexity metrics, playback and canvas layout.

use std::f64::consts::PI;
use std::str::FromStr;
use std::time::Duration;

use crate::color::Color;
use crate::config::SpaceConfig;
use crate::render::{Scene, Stroke, TextStyle};
use crate::{Complexity, ParseError};

/// Memory growth classes shown by the space visualizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpaceClass {
    #[default]
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
}

impl SpaceClass {
    pub const ALL: [SpaceClass; 5] = [
        SpaceClass::Constant,
        SpaceClass::Logarithmic,
        SpaceClass::Linear,
        SpaceClass::Linearithmic,
        SpaceClass::Quadratic,
    ];

    pub fn label(self) -> &'static str {
        Complexity::from(self).label()
    }

    /// Legend text on the memory graph.
    pub fn graph_label(self) -> &'static str {
        match self {
            SpaceClass::Constant => "O(1) Constant",
            SpaceClass::Logarithmic => "O(log n) Logarithmic",
            SpaceClass::Linear => "O(n) Linear",
            SpaceClass::Linearithmic => "O(n log n) Linearithmic",
            SpaceClass::Quadratic => "O(n²) Quadratic",
        }
    }

    /// Raw memory function, before flooring.
    pub fn growth(self, n: f64) -> f64 {
        match self {
            SpaceClass::Constant => 1.0,
            SpaceClass::Logarithmic => (n + 1.0).log2(),
            SpaceClass::Linear => n,
            SpaceClass::Linearithmic => n * (n + 1.0).log2(),
            SpaceClass::Quadratic => n * n / 4.0,
        }
    }

    pub fn profile(self) -> SpaceProfile {
        let (name, example) = match self {
            SpaceClass::Constant => ("Constant Space - O(1)", "Simple variable, fixed buffer"),
            SpaceClass::Logarithmic => (
                "Logarithmic Space - O(log n)",
                "Binary search recursion, balanced tree",
            ),
            SpaceClass::Linear => ("Linear Space - O(n)", "Array copy, DFS stack"),
            SpaceClass::Linearithmic => (
                "Linearithmic Space - O(n log n)",
                "Merge sort auxiliary arrays",
            ),
            SpaceClass::Quadratic => ("Quadratic Space - O(n²)", "Adjacency matrix, 2D DP table"),
        };
        SpaceProfile { name, example }
    }

    pub fn explanation(self) -> SpaceExplanation {
        match self {
            SpaceClass::Constant => SpaceExplanation {
                headline: "Constant Space O(1) - The Memory Minimalist",
                intro: "One sticky note is enough whether you handle 10 items or 10 million. \
                        The memory you need never grows with the input.",
                takeaway: "O(1) is the best possible space complexity: the same tiny footprint \
                           for a handful or a billion items.",
            },
            SpaceClass::Logarithmic => SpaceExplanation {
                headline: "Logarithmic Space O(log n) - The Smart Halver",
                intro: "Looking up a word in a dictionary, you keep halving the pages and \
                        need one bookmark per halving. Memory grows, but very slowly.",
                takeaway: "O(log n) is almost as good as O(1). Going from a thousand to a \
                           million items costs only about ten more units.",
            },
            SpaceClass::Linear => SpaceExplanation {
                headline: "Linear Space O(n) - The One-to-One Relationship",
                intro: "Photocopying a document needs one sheet per page. Memory grows in \
                        lockstep with the input.",
                takeaway: "O(n) is acceptable for most programs, just remember that a million \
                           items means a million units of memory.",
            },
            SpaceClass::Linearithmic => SpaceExplanation {
                headline: "Linearithmic Space O(n log n) - The Multiply Effect",
                intro: "A tournament keeps paperwork for all n players in each of its log n \
                        rounds. Linear space at every level of a logarithmic depth.",
                takeaway: "O(n log n) space is the price some fast sorts pay. Manageable for \
                           reasonable inputs, hefty for massive ones.",
            },
            SpaceClass::Quadratic => SpaceExplanation {
                headline: "Quadratic Space O(n²) - The Explosion Danger",
                intro: "A friendship matrix for 10 people has 100 cells; for 100 people it has \
                        10,000. Memory explodes with the square of the input.",
                takeaway: "O(n²) space only works for small inputs. Look for O(n) or \
                           O(n log n) alternatives before the data grows.",
            },
        }
    }
}

impl From<SpaceClass> for Complexity {
    fn from(class: SpaceClass) -> Self {
        match class {
            SpaceClass::Constant => Complexity::Constant,
            SpaceClass::Logarithmic => Complexity::Logarithmic,
            SpaceClass::Linear => Complexity::Linear,
            SpaceClass::Linearithmic => Complexity::Linearithmic,
            SpaceClass::Quadratic => Complexity::Quadratic,
        }
    }
}

impl TryFrom<Complexity> for SpaceClass {
    type Error = ParseError;

    fn try_from(complexity: Complexity) -> Result<Self, Self::Error> {
        match complexity {
            Complexity::Constant => Ok(SpaceClass::Constant),
            Complexity::Logarithmic => Ok(SpaceClass::Logarithmic),
            Complexity::Linear => Ok(SpaceClass::Linear),
            Complexity::Linearithmic => Ok(SpaceClass::Linearithmic),
            Complexity::Quadratic => Ok(SpaceClass::Quadratic),
            Complexity::Exponential => Err(ParseError::UnknownSpaceClass(complexity.label().to_string())),
        }
    }
}

impl std::fmt::Display for SpaceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpaceClass {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Complexity>()
            .ok()
            .and_then(|c| SpaceClass::try_from(c).ok())
            .ok_or_else(|| ParseError::UnknownSpaceClass(s.to_string()))
    }
}

/// Name and typical example of a memory class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpaceProfile {
    pub name: &'static str,
    pub example: &'static str,
}

/// Plain-language description shown next to the space canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpaceExplanation {
    pub headline: &'static str,
    pub intro: &'static str,
    pub takeaway: &'static str,
}

/// How memory units are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpaceMode {
    /// Call-stack frames
    #[default]
    Stack,
    /// Heap blocks in a grid
    Data,
    /// Full binary recursion tree
    Tree,
}

impl SpaceMode {
    pub const ALL: [SpaceMode; 3] = [SpaceMode::Stack, SpaceMode::Data, SpaceMode::Tree];

    pub fn key(self) -> &'static str {
        match self {
            SpaceMode::Stack => "stack",
            SpaceMode::Data => "data",
            SpaceMode::Tree => "tree",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SpaceMode::Stack => "Call Stack: Function call frames",
            SpaceMode::Data => "Heap/Data: Memory blocks",
            SpaceMode::Tree => "Recursion Tree: Call structure",
        }
    }
}

impl std::fmt::Display for SpaceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SpaceMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stack" => Ok(SpaceMode::Stack),
            "data" | "heap" => Ok(SpaceMode::Data),
            "tree" => Ok(SpaceMode::Tree),
            _ => Err(ParseError::UnknownMode(s.to_string())),
        }
    }
}

/// Memory units used by `class` at input size `n`, floored at 1.
///
/// ```rust
/// use complexity_view::space::{memory_units, SpaceClass};
///
/// assert_eq!(memory_units(SpaceClass::Constant, 1000), 1.0);
/// assert_eq!(memory_units(SpaceClass::Logarithmic, 7), 3.0);
/// assert_eq!(memory_units(SpaceClass::Quadratic, 8), 16.0);
/// assert_eq!(memory_units(SpaceClass::Quadratic, 1), 1.0);
/// ```
pub fn memory_units(class: SpaceClass, n: u32) -> f64 {
    class.growth(f64::from(n)).max(1.0)
}

const MAX_STACK_FRAMES: usize = 30;

/// Largest depth slider value.
pub const MAX_STACK_DEPTH: u32 = MAX_STACK_FRAMES as u32;

/// Blocks drawn in data mode at most.
const MAX_DATA_BLOCKS: usize = 1024;

/// Frames drawn in stack mode; `depth` is the user's minimum.
pub fn stack_frames(class: SpaceClass, n: u32, depth: u32) -> usize {
    let depth = depth.clamp(1, MAX_STACK_DEPTH) as usize;
    let n = f64::from(n);
    match class {
        SpaceClass::Constant => depth,
        SpaceClass::Logarithmic => depth.max((n + 1.0).log2().ceil() as usize),
        SpaceClass::Linear => depth.max((n / 2.0).ceil() as usize).min(MAX_STACK_FRAMES),
        SpaceClass::Linearithmic | SpaceClass::Quadratic => depth
            .max(class.growth(n).max(1.0).ceil() as usize)
            .min(MAX_STACK_FRAMES),
    }
}

/// Block count and grid shape `(blocks, cols, rows)` for data mode.
///
/// At most 1024 blocks are drawn.
pub fn data_grid(units: f64) -> (usize, usize, usize) {
    let blocks = (units.round() as usize).clamp(1, MAX_DATA_BLOCKS);
    let cols = ((blocks as f64).sqrt().ceil() as usize).clamp(3, 12);
    let rows = blocks.div_ceil(cols);
    (blocks, cols, rows)
}

/// Levels drawn in tree mode.
pub fn tree_levels(class: SpaceClass, n: u32) -> usize {
    let base = ((f64::from(n) + 1.0).log2().ceil() as usize).max(2);
    let bonus = match class {
        SpaceClass::Quadratic => 2,
        SpaceClass::Linearithmic => 1,
        _ => 0,
    };
    (base + bonus).min(7)
}

/// Nodes in a full binary tree of `levels` levels.
#[inline]
pub fn tree_node_count(levels: usize) -> usize {
    (1usize << levels) - 1
}

/// Index of the highlighted unit for an animation phase in [0, 1).
#[inline]
pub fn active_index(phase: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let phase = if phase.is_finite() { phase.max(0.0) } else { 0.0 };
    (phase * count as f64).floor() as usize % count
}

/// Bytes attributed to one memory unit.
pub const UNIT_BYTES: f64 = 64.0;

/// Bytes attributed to one level of call depth.
pub const DEPTH_BYTES: f64 = 32.0;

/// Approximate footprint in bytes for the memory stats panel.
#[inline]
pub fn footprint_bytes(units: f64, depth: u32) -> f64 {
    units * UNIT_BYTES + f64::from(depth) * DEPTH_BYTES
}

/// Human-readable byte count (`B`, `KB`, `MB`).
///
/// ```rust
/// use complexity_view::space::format_bytes;
///
/// assert_eq!(format_bytes(64.0), "64 B");
/// assert_eq!(format_bytes(2048.0), "2.0 KB");
/// assert_eq!(format_bytes(3.5 * 1024.0 * 1024.0), "3.5 MB");
/// ```
pub fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    if bytes < KB {
        format!("{:.0} B", bytes)
    } else if bytes < KB * KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes / (KB * KB))
    }
}

/// One-line usage summary for the log panel.
pub fn usage_line(class: SpaceClass, n: u32) -> String {
    let units = memory_units(class, n);
    format!(
        "{} with n={} uses ~{:.1} memory units ({})",
        class.label(),
        n,
        units,
        format_bytes(units * UNIT_BYTES)
    )
}

/// Multi-line breakdown of the current space settings.
pub fn breakdown(class: SpaceClass, mode: SpaceMode, n: u32, depth: u32) -> String {
    let units = memory_units(class, n);
    format!(
        "complexity: {}\nmode: {}\nn: {}\ndepth: {}\nunits: {:.2}\nmemory: {}",
        class.label(),
        mode.key(),
        n,
        depth,
        units,
        format_bytes(units * UNIT_BYTES)
    )
}

/// Continuous highlight cycle for the space canvas.
///
/// Starts playing; the phase wraps in [0, 1).
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceAnimator {
    phase: f64,
    playing: bool,
    cycles_per_second: f64,
    step_size: f64,
}

impl Default for SpaceAnimator {
    fn default() -> Self {
        Self::new(&SpaceConfig::default())
    }
}

impl SpaceAnimator {
    pub fn new(config: &SpaceConfig) -> Self {
        Self {
            phase: 0.0,
            playing: true,
            cycles_per_second: config.cycles_per_second.max(0.0),
            step_size: config.step_size,
        }
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Pause and nudge the phase forward by one step.
    pub fn step(&mut self) {
        self.playing = false;
        self.phase = wrap_phase(self.phase + self.step_size);
    }

    /// Restart the cycle so an input change is visible immediately.
    pub fn restart_cycle(&mut self) {
        self.phase = 0.0;
    }

    /// Advance the phase while playing.
    pub fn tick(&mut self, dt: Duration) {
        if self.playing {
            self.phase = wrap_phase(self.phase + dt.as_secs_f64() * self.cycles_per_second);
        }
    }
}

fn wrap_phase(phase: f64) -> f64 {
    if phase.is_finite() {
        phase.rem_euclid(1.0)
    } else {
        0.0
    }
}

const TITLE_SIZE: f64 = 14.0;
const SUBTITLE_SIZE: f64 = 11.0;

fn titles(scene: &mut Scene, title: String, subtitle: String, subtitle_y: f64) {
    let x = scene.width / 2.0;
    scene.text(title, x, 20.0, TextStyle::new(Color::BLACK, TITLE_SIZE).bold());
    scene.text(subtitle, x, subtitle_y, TextStyle::new(Color::BLACK, SUBTITLE_SIZE));
}

/// Lay out the space canvas for the given settings and animation phase.
pub fn space_scene(class: SpaceClass, mode: SpaceMode, n: u32, depth: u32, phase: f64, width: f64, height: f64) -> Scene {
    let mut scene = Scene::new(width, height).with_background(Color::WHITE);
    match mode {
        SpaceMode::Stack => stack_scene(&mut scene, stack_frames(class, n, depth), n, phase),
        SpaceMode::Data => data_scene(&mut scene, memory_units(class, n), n, phase),
        SpaceMode::Tree => tree_scene(&mut scene, tree_levels(class, n), n, phase),
    }
    scene
}

fn stack_scene(scene: &mut Scene, frames: usize, n: u32, phase: f64) {
    let (w, h) = (scene.width, scene.height);
    let frame_h = ((h - 140.0) / frames as f64).min(50.0);
    let frame_w = (w * 0.5).min(220.0);
    let start_x = (w - frame_w) / 2.0;
    let bottom_y = h - 60.0;
    let gap = 4.0;
    let active = active_index(phase, frames);

    for i in 0..frames {
        let y = bottom_y - i as f64 * (frame_h + gap);
        let (cx, cy) = (start_x + frame_w / 2.0, y + frame_h / 2.0);
        scene.rect(start_x + 3.0, y + 3.0, frame_w, frame_h, Some(Color::BLACK.with_alpha(0.08)), None);
        if i == active {
            let pulse = 0.9 + 0.1 * (phase * PI * 8.0).sin();
            scene.rect(
                start_x,
                y,
                frame_w,
                frame_h,
                Some(Color::BLACK.with_alpha(pulse)),
                Some(Stroke::solid(Color::BLACK, 3.0)),
            );
            scene.text(
                format!("FRAME {} [ACTIVE]", i + 1),
                cx,
                cy,
                TextStyle::new(Color::WHITE, 12.0).bold(),
            );
        } else {
            scene.rect(start_x, y, frame_w, frame_h, None, Some(Stroke::solid(Color::BLACK, 1.5)));
            scene.rect(start_x + 1.0, y + 1.0, frame_w - 2.0, frame_h - 2.0, Some(Color::gray(0xf5)), None);
            scene.text(format!("Frame {}", i + 1), cx, cy, TextStyle::new(Color::gray(0x66), 11.0));
        }
    }

    titles(scene, format!("CALL STACK ({} frames)", frames), format!("n = {}", n), 38.0);
}

fn data_scene(scene: &mut Scene, units: f64, n: u32, phase: f64) {
    let (w, h) = (scene.width, scene.height);
    let (blocks, cols, rows) = data_grid(units);
    let (padding, gap) = (60.0, 8.0);
    let safe_w = w - padding * 2.0;
    let safe_h = h - padding * 2.0 - 40.0;
    let size = ((safe_w / cols as f64).min(safe_h / rows as f64) - gap).clamp(2.0, 45.0);
    let total_w = cols as f64 * (size + gap) - gap;
    let total_h = rows as f64 * (size + gap) - gap;
    let offset_x = (w - total_w) / 2.0;
    let offset_y = (h - total_h) / 2.0 + 20.0;
    let active = active_index(phase, blocks);

    for i in 0..blocks {
        let x = offset_x + (i % cols) as f64 * (size + gap);
        let y = offset_y + (i / cols) as f64 * (size + gap);
        let (cx, cy) = (x + size / 2.0, y + size / 2.0);
        let label = (i + 1).to_string();
        scene.rect(x + 2.0, y + 2.0, size, size, Some(Color::BLACK.with_alpha(0.05)), None);
        if i == active {
            scene.rect(x, y, size, size, Some(Color::BLACK), None);
            scene.text(label, cx, cy, TextStyle::new(Color::WHITE, 10.0).bold());
        } else if i < active {
            scene.rect(x, y, size, size, Some(Color::gray(0xcc)), Some(Stroke::solid(Color::BLACK, 1.0)));
            scene.text(label, cx, cy, TextStyle::new(Color::BLACK, 9.0));
        } else {
            scene.rect(x, y, size, size, Some(Color::WHITE), Some(Stroke::solid(Color::gray(0xcc), 1.0)));
            scene.text(label, cx, cy, TextStyle::new(Color::gray(0x99), 9.0));
        }
    }

    titles(
        scene,
        format!("HEAP MEMORY ({} blocks)", blocks),
        format!("n = {} | Allocating {}/{}", n, active + 1, blocks),
        38.0,
    );
}

/// Pre-order node positions of a full binary tree, with parent links.
fn tree_positions(levels: usize, width: f64, height: f64) -> Vec<((f64, f64), Option<usize>)> {
    const PADDING_X: f64 = 60.0;
    const PADDING_TOP: f64 = 80.0;
    const PADDING_BOTTOM: f64 = 70.0;

    let safe_w = width - PADDING_X * 2.0;
    let safe_h = height - PADDING_TOP - PADDING_BOTTOM;
    let level_h = safe_h / levels.saturating_sub(1).max(1) as f64;
    let lo = PADDING_X + 15.0;
    let hi = (width - PADDING_X - 15.0).max(lo);

    let mut out = Vec::with_capacity(tree_node_count(levels));
    // (x, y, level, spread, parent)
    let mut stack = vec![(width / 2.0, PADDING_TOP, 0usize, safe_w * 0.6, None)];
    while let Some((x, y, level, spread, parent)) = stack.pop() {
        let x = x.clamp(lo, hi);
        let index = out.len();
        out.push(((x, y), parent));
        if level + 1 < levels {
            let child_y = y + level_h;
            // Right pushed first so the left subtree is numbered first
            stack.push((x + spread / 2.0, child_y, level + 1, spread / 2.0, Some(index)));
            stack.push((x - spread / 2.0, child_y, level + 1, spread / 2.0, Some(index)));
        }
    }
    out
}

fn tree_scene(scene: &mut Scene, levels: usize, n: u32, phase: f64) {
    const RADIUS: f64 = 12.0;

    let nodes = tree_positions(levels, scene.width, scene.height);
    let total = nodes.len();
    let active = active_index(phase, total);

    for &((x, y), parent) in &nodes {
        if let Some((px, py)) = parent.map(|p| nodes[p].0) {
            scene.line((px, py + 14.0), (x, y - 14.0), Stroke::solid(Color::gray(0xd0), 1.5));
        }
    }
    for (i, &((x, y), _)) in nodes.iter().enumerate() {
        let label = (i + 1).to_string();
        if i == active {
            scene.circle(x, y, RADIUS, Some(Color::BLACK), Some(Stroke::solid(Color::BLACK, 2.5)));
            scene.text(label, x, y, TextStyle::new(Color::WHITE, 11.0).bold());
        } else {
            scene.circle(x, y, RADIUS, Some(Color::WHITE), Some(Stroke::solid(Color::BLACK, 2.0)));
            scene.text(label, x, y, TextStyle::new(Color::gray(0x99), 10.0));
        }
    }

    titles(
        scene,
        format!("RECURSION TREE ({} levels, {} nodes)", levels, total),
        format!("n = {} | Node {}/{} active", n, active + 1, total),
        40.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Shape;
    use crate::MAX_INPUT;
    use proptest::prelude::*;

    fn visual_units(class: SpaceClass, mode: SpaceMode, n: u32, depth: u32) -> usize {
        match mode {
            SpaceMode::Stack => stack_frames(class, n, depth),
            SpaceMode::Data => data_grid(memory_units(class, n)).0,
            SpaceMode::Tree => tree_levels(class, n),
        }
    }

    #[test]
    fn test_memory_units() {
        assert_eq!(memory_units(SpaceClass::Linear, 16), 16.0);
        assert_eq!(memory_units(SpaceClass::Linearithmic, 1), 1.0);
        assert_eq!(memory_units(SpaceClass::Linearithmic, 3), 6.0);
        for class in SpaceClass::ALL {
            for n in 1..=32 {
                assert!(memory_units(class, n) >= 1.0);
            }
        }
    }

    #[test]
    fn test_stack_frames() {
        assert_eq!(stack_frames(SpaceClass::Constant, 32, 5), 5);
        assert_eq!(stack_frames(SpaceClass::Constant, 32, 0), 1);
        assert_eq!(stack_frames(SpaceClass::Logarithmic, 31, 1), 5);
        assert_eq!(stack_frames(SpaceClass::Logarithmic, 31, 9), 9);
        assert_eq!(stack_frames(SpaceClass::Linear, 16, 5), 8);
        assert_eq!(stack_frames(SpaceClass::Linear, 32, 1), 16);
        assert_eq!(stack_frames(SpaceClass::Quadratic, 32, 1), 30);
        assert_eq!(stack_frames(SpaceClass::Quadratic, 4, 2), 4);
    }

    #[test]
    fn test_data_grid() {
        assert_eq!(data_grid(1.0), (1, 3, 1));
        assert_eq!(data_grid(16.0), (16, 4, 4));
        assert_eq!(data_grid(17.0), (17, 5, 4));
        assert_eq!(data_grid(256.0), (256, 12, 22));
        assert_eq!(data_grid(0.2), (1, 3, 1));
    }

    #[test]
    fn test_tree_levels() {
        assert_eq!(tree_levels(SpaceClass::Constant, 1), 2);
        assert_eq!(tree_levels(SpaceClass::Linear, 16), 5);
        assert_eq!(tree_levels(SpaceClass::Linearithmic, 16), 6);
        assert_eq!(tree_levels(SpaceClass::Quadratic, 16), 7);
        assert_eq!(tree_levels(SpaceClass::Quadratic, 32), 7);
        assert_eq!(tree_node_count(7), 127);
    }

    #[test]
    fn test_active_index() {
        assert_eq!(active_index(0.0, 5), 0);
        assert_eq!(active_index(0.5, 5), 2);
        assert_eq!(active_index(0.999, 5), 4);
        assert_eq!(active_index(1.0, 5), 0);
        assert_eq!(active_index(f64::NAN, 5), 0);
        assert_eq!(active_index(0.3, 0), 0);
    }

    #[test]
    fn test_format_and_footprint() {
        assert_eq!(format_bytes(1023.0), "1023 B");
        assert_eq!(format_bytes(1024.0), "1.0 KB");
        assert_eq!(footprint_bytes(16.0, 5), 1184.0);
        assert_eq!(
            usage_line(SpaceClass::Linear, 16),
            "O(n) with n=16 uses ~16.0 memory units (1.0 KB)"
        );
        assert_eq!(
            breakdown(SpaceClass::Quadratic, SpaceMode::Data, 8, 3),
            "complexity: O(n²)\nmode: data\nn: 8\ndepth: 3\nunits: 16.00\nmemory: 1.0 KB"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("O(n log n)".parse::<SpaceClass>(), Ok(SpaceClass::Linearithmic));
        assert_eq!("o(n^2)".parse::<SpaceClass>(), Ok(SpaceClass::Quadratic));
        assert!(matches!(
            "O(2ⁿ)".parse::<SpaceClass>(),
            Err(ParseError::UnknownSpaceClass(_))
        ));
        assert_eq!("Tree".parse::<SpaceMode>(), Ok(SpaceMode::Tree));
        assert!(matches!("grid".parse::<SpaceMode>(), Err(ParseError::UnknownMode(_))));
    }

    #[test]
    fn test_animator_cycle() {
        let mut anim = SpaceAnimator::default();
        assert!(anim.is_playing());
        anim.tick(Duration::from_millis(1250));
        assert!((anim.phase() - 0.5).abs() < 1e-9);
        anim.tick(Duration::from_millis(1500));
        assert!((anim.phase() - 0.1).abs() < 1e-9);

        anim.step();
        assert!(!anim.is_playing());
        assert!((anim.phase() - 0.2).abs() < 1e-9);
        anim.tick(Duration::from_secs(1));
        assert!((anim.phase() - 0.2).abs() < 1e-9);

        anim.restart_cycle();
        assert_eq!(anim.phase(), 0.0);
    }

    #[test]
    fn test_step_wraps() {
        let mut anim = SpaceAnimator::default();
        for _ in 0..10 {
            anim.step();
        }
        assert!(anim.phase() < 1e-9 || (1.0 - anim.phase()) < 1e-9);
    }

    #[test]
    fn test_stack_scene_marks_one_active_frame() {
        let scene = space_scene(SpaceClass::Linear, SpaceMode::Stack, 16, 5, 0.5, 600.0, 500.0);
        let active: Vec<_> = scene.texts().filter(|t| t.ends_with("[ACTIVE]")).collect();
        assert_eq!(active, vec!["FRAME 5 [ACTIVE]"]);
        assert!(scene.texts().any(|t| t == "CALL STACK (8 frames)"));
    }

    #[test]
    fn test_data_scene_counts_blocks() {
        let scene = space_scene(SpaceClass::Quadratic, SpaceMode::Data, 8, 5, 0.0, 600.0, 500.0);
        assert!(scene.texts().any(|t| t == "HEAP MEMORY (16 blocks)"));
        assert!(scene.texts().any(|t| t == "n = 8 | Allocating 1/16"));
    }

    #[test]
    fn test_tree_scene_shape() {
        let scene = space_scene(SpaceClass::Linear, SpaceMode::Tree, 7, 5, 0.0, 800.0, 500.0);
        let circles = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count();
        let edges = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Path { .. }))
            .count();
        assert_eq!(circles, 7);
        assert_eq!(edges, 6);
        assert!(scene.texts().any(|t| t == "RECURSION TREE (3 levels, 7 nodes)"));
    }

    #[test]
    fn test_tree_positions_preorder() {
        let nodes = tree_positions(3, 800.0, 500.0);
        assert_eq!(nodes.len(), 7);
        assert_eq!(nodes[0].1, None);
        // Left child of the root comes right after it
        assert_eq!(nodes[1].1, Some(0));
        assert!(nodes[1].0 .0 < nodes[0].0 .0);
        assert_eq!(nodes[2].1, Some(1));
        assert_eq!(nodes[4].1, Some(0));
        assert!(nodes[4].0 .0 > nodes[0].0 .0);
    }

    #[test]
    fn test_oversized_input_is_bounded() {
        assert_eq!(data_grid(1e12).0, 1024);
        assert_eq!(data_grid(f64::INFINITY).0, 1024);
        assert_eq!(stack_frames(SpaceClass::Constant, 1, u32::MAX), 30);

        let scene = space_scene(SpaceClass::Quadratic, SpaceMode::Data, u32::MAX, 5, 0.0, 600.0, 500.0);
        assert!(scene.texts().any(|t| t == "HEAP MEMORY (1024 blocks)"));
        assert!(scene.len() < 5000);
    }

    proptest! {
        #[test]
        fn prop_units_never_shrink_as_n_grows(
            c in 0usize..5,
            m in 0usize..3,
            depth in 1u32..=12,
            n in 1u32..MAX_INPUT,
        ) {
            let (class, mode) = (SpaceClass::ALL[c], SpaceMode::ALL[m]);
            prop_assert!(memory_units(class, n + 1) >= memory_units(class, n));
            prop_assert!(stack_frames(class, n + 1, depth) >= stack_frames(class, n, depth));
            prop_assert!(data_grid(memory_units(class, n + 1)).0 >= data_grid(memory_units(class, n)).0);
            prop_assert!(tree_levels(class, n + 1) >= tree_levels(class, n));
            prop_assert!(visual_units(class, mode, n + 1, depth) >= visual_units(class, mode, n, depth));
        }
    }
}
