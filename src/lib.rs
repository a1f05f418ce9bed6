//! # complexity-view
//!
//! Core step generation, playback and layout library for algorithm
//! complexity visualizers.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Unrolling textbook algorithms into exact step traces, one per complexity class
//! - Controlling playback (speed, stepping, eased input-size changes)
//! - Laying out the visualizer canvases and growth-curve graphs as draw commands
//! - Space-complexity metrics and their stack, heap and tree renderings
//! - Rendering scenes to canvas (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load a [`VisualizerConfig`] from a `visualizer.toml` string
//! - `web` - Enable web/WASM canvas rendering support
//!
//! ## Example
//!
//! ```rust
//! use complexity_view::{Complexity, PlaybackController, PlaybackState, Theme};
//! use complexity_view::scene::time_scene;
//! use std::time::Duration;
//!
//! let mut controller = PlaybackController::new(Complexity::Logarithmic, 20).with_seed(3);
//! controller.set_speed(100.0);
//! controller.play();
//! while controller.state() == PlaybackState::Playing {
//!     controller.tick(Duration::from_millis(16));
//! }
//!
//! let scene = time_scene(&controller, 800.0, 300.0, &Theme::default());
//! assert!(!scene.is_empty());
//! ```

mod clock;
pub mod code;
mod color;
mod complexity;
mod config;
pub mod curve;
pub mod easing;
pub mod explain;
mod generator;
pub mod playback;
pub mod render;
pub mod scene;
mod sizing;
pub mod space;
mod step;
pub mod visualizer;

pub use clock::FrameClock;
pub use code::Language;
pub use color::{parse_color, Color};
pub use complexity::{Complexity, ParseError, EXPONENTIAL_INPUT_CAP, MAX_INPUT};
pub use config::{clamp_speed, clamp_to_range, SpaceConfig, Theme, TimeConfig, VisualizerConfig};
pub use explain::{AlgorithmProfile, Explanation};
pub use generator::{binary_search_steps, fib_call_count, generate, merge_pass_count};
pub use playback::{PlaybackController, PlaybackEvent, PlaybackState};
pub use render::{Scene, Shape, Stroke, TextAlign, TextStyle};
pub use sizing::{grid_cell, BoxSizing, RowLayout};
pub use space::{SpaceAnimator, SpaceClass, SpaceMode};
pub use step::{CallEvent, SearchEvent, Step, StepKind, StepSequence};
pub use visualizer::{Size, SpaceControl, SpaceVisualizer, TimeControl, TimeVisualizer};

#[cfg(feature = "web")]
pub use render::web::{draw_scene, request_animation_loop};
