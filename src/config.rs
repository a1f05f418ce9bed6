//! Visualizer configuration, loadable from a `visualizer.toml` file.

use std::time::Duration;

use crate::color::{parse_color, Color};
use crate::space::MAX_STACK_DEPTH;
use crate::MAX_INPUT;

/// Top-level configuration for both visualizers.
///
/// Every field has a default, so a config file only needs the values it
/// wants to override.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisualizerConfig {
    pub time: TimeConfig,
    pub space: SpaceConfig,
    pub theme: Theme,
}

impl VisualizerConfig {
    /// Parse a `visualizer.toml` string.
    ///
    /// ```rust
    /// # #[cfg(feature = "toml")]
    /// # fn main() -> Result<(), toml::de::Error> {
    /// use complexity_view::VisualizerConfig;
    ///
    /// let config = VisualizerConfig::from_toml_str("[time]\nmax_input = 30\n")?;
    /// assert_eq!(config.time.max_input, 30);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "toml"))]
    /// # fn main() {}
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(s)?;
        Ok(config.normalized())
    }

    /// Repair inconsistent bounds (min above max, defaults outside range).
    ///
    /// Input ranges are capped at [`MAX_INPUT`](crate::MAX_INPUT).
    pub fn normalized(mut self) -> Self {
        if self.time.max_input > MAX_INPUT || self.space.max_input > MAX_INPUT {
            tracing::warn!(
                time = self.time.max_input,
                space = self.space.max_input,
                ceiling = MAX_INPUT,
                "max_input above ceiling, clamping"
            );
        }
        self.time.min_input = self.time.min_input.clamp(1, MAX_INPUT);
        self.time.max_input = self.time.max_input.clamp(self.time.min_input, MAX_INPUT);
        self.time.default_input = self
            .time
            .default_input
            .clamp(self.time.min_input, self.time.max_input);
        self.time.default_speed = clamp_speed(self.time.default_speed);

        self.space.min_input = self.space.min_input.clamp(1, MAX_INPUT);
        self.space.max_input = self.space.max_input.clamp(self.space.min_input, MAX_INPUT);
        self.space.default_input = self
            .space
            .default_input
            .clamp(self.space.min_input, self.space.max_input);
        self.space.min_depth = self.space.min_depth.clamp(1, MAX_STACK_DEPTH);
        self.space.max_depth = self.space.max_depth.clamp(self.space.min_depth, MAX_STACK_DEPTH);
        self.space.default_depth = self
            .space
            .default_depth
            .clamp(self.space.min_depth, self.space.max_depth);
        self
    }
}

/// Time visualizer settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeConfig {
    /// Input slider minimum
    pub min_input: u32,
    /// Input slider maximum
    pub max_input: u32,
    pub default_input: u32,
    /// Speed slider position, 0-100
    pub default_speed: f64,
    /// Length of the eased input-size change in milliseconds
    pub input_transition_ms: u64,
    /// Length of the per-step highlight animation in milliseconds
    pub step_transition_ms: u64,
    /// Number of transcript lines shown in the completion explanation
    pub transcript_limit: usize,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            min_input: 1,
            max_input: 50,
            default_input: 10,
            default_speed: 50.0,
            input_transition_ms: 400,
            step_transition_ms: 300,
            transcript_limit: 10,
        }
    }
}

impl TimeConfig {
    /// Clamp raw slider input to the configured range.
    #[inline]
    pub fn clamp_input(&self, raw: f64) -> u32 {
        clamp_to_range(raw, self.min_input, self.max_input)
    }

    #[inline]
    pub fn input_transition(&self) -> Duration {
        Duration::from_millis(self.input_transition_ms)
    }

    #[inline]
    pub fn step_transition(&self) -> Duration {
        Duration::from_millis(self.step_transition_ms)
    }
}

/// Space visualizer settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpaceConfig {
    pub min_input: u32,
    pub max_input: u32,
    pub default_input: u32,
    /// Depth slider minimum
    pub min_depth: u32,
    /// Depth slider maximum
    pub max_depth: u32,
    pub default_depth: u32,
    /// Full highlight cycles per second while playing
    pub cycles_per_second: f64,
    /// Phase advance for a manual step
    pub step_size: f64,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            min_input: 1,
            max_input: 32,
            default_input: 16,
            min_depth: 1,
            max_depth: 12,
            default_depth: 5,
            cycles_per_second: 0.4,
            step_size: 0.1,
        }
    }
}

impl SpaceConfig {
    #[inline]
    pub fn clamp_input(&self, raw: f64) -> u32 {
        clamp_to_range(raw, self.min_input, self.max_input)
    }

    #[inline]
    pub fn clamp_depth(&self, raw: f64) -> u32 {
        clamp_to_range(raw, self.min_depth, self.max_depth)
    }
}

/// Accent colors as CSS-style strings (`"#e53935"`, `"black"`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    /// Reference curve and progress markers on the time graph
    pub curve: String,
    /// Fill of the active element on the scene canvas
    pub active: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            curve: "#e53935".into(),
            active: "black".into(),
        }
    }
}

impl Theme {
    /// Parsed curve color, falling back to the default red.
    pub fn curve_color(&self) -> Color {
        parse_color(&self.curve).unwrap_or(Color::rgb(229, 57, 53))
    }

    /// Parsed active-element color, falling back to black.
    pub fn active_color(&self) -> Color {
        parse_color(&self.active).unwrap_or(Color::BLACK)
    }
}

/// Clamp a speed slider value to [0, 100]; non-finite values become 0.
#[inline]
pub fn clamp_speed(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Round and clamp a raw slider reading. Non-finite values map to `min`.
pub fn clamp_to_range(raw: f64, min: u32, max: u32) -> u32 {
    if !raw.is_finite() {
        tracing::warn!(raw, min, "non-finite slider input, using minimum");
        return min;
    }
    let clamped = raw.round().clamp(min as f64, max as f64) as u32;
    if clamped as f64 != raw {
        tracing::debug!(raw, clamped, "slider input clamped");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.time.max_input, 50);
        assert_eq!(config.time.input_transition(), Duration::from_millis(400));
        assert_eq!(config.time.step_transition(), Duration::from_millis(300));
        assert_eq!(config.space.max_input, 32);
        assert_eq!(config.space.default_depth, 5);
    }

    #[test]
    fn test_clamp_to_range() {
        assert_eq!(clamp_to_range(7.4, 1, 50), 7);
        assert_eq!(clamp_to_range(-3.0, 1, 50), 1);
        assert_eq!(clamp_to_range(0.0, 1, 50), 1);
        assert_eq!(clamp_to_range(900.0, 1, 50), 50);
        assert_eq!(clamp_to_range(f64::NAN, 1, 50), 1);
        assert_eq!(clamp_to_range(f64::INFINITY, 1, 50), 1);
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(150.0), 100.0);
        assert_eq!(clamp_speed(-1.0), 0.0);
        assert_eq!(clamp_speed(f64::NAN), 0.0);
    }

    #[test]
    fn test_normalized_repairs_bounds() {
        let mut config = VisualizerConfig::default();
        config.time.min_input = 0;
        config.time.max_input = 0;
        config.time.default_input = 99;
        config.space.min_depth = 6;
        config.space.max_depth = 2;
        let config = config.normalized();
        assert_eq!(config.time.min_input, 1);
        assert_eq!(config.time.max_input, 1);
        assert_eq!(config.time.default_input, 1);
        assert_eq!(config.space.max_depth, 6);
        assert_eq!(config.space.default_depth, 6);
    }

    #[test]
    fn test_normalized_caps_input_ceiling() {
        let mut config = VisualizerConfig::default();
        config.time.min_input = 400;
        config.time.max_input = 3000;
        config.time.default_input = 3000;
        config.space.max_input = 1000;
        config.space.default_input = 1000;
        config.space.max_depth = 500;
        let config = config.normalized();
        assert_eq!(config.time.min_input, MAX_INPUT);
        assert_eq!(config.time.max_input, MAX_INPUT);
        assert_eq!(config.time.default_input, MAX_INPUT);
        assert_eq!(config.space.max_input, MAX_INPUT);
        assert_eq!(config.space.default_input, MAX_INPUT);
        assert_eq!(config.space.max_depth, MAX_STACK_DEPTH);
    }

    #[test]
    fn test_theme_colors() {
        let theme = Theme::default();
        assert_eq!(theme.curve_color(), Color::rgb(229, 57, 53));
        assert_eq!(theme.active_color(), Color::BLACK);

        let theme = Theme {
            curve: "nonsense".into(),
            active: "#00f".into(),
        };
        assert_eq!(theme.curve_color(), Color::rgb(229, 57, 53));
        assert_eq!(theme.active_color(), Color::rgb(0, 0, 255));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_partial() {
        let config = VisualizerConfig::from_toml_str(
            "[time]\nmax_input = 30\ndefault_speed = 80.0\n\n[theme]\ncurve = \"blue\"\n",
        )
        .unwrap();
        assert_eq!(config.time.max_input, 30);
        assert_eq!(config.time.default_speed, 80.0);
        assert_eq!(config.time.min_input, 1);
        assert_eq!(config.space, SpaceConfig::default());
        assert_eq!(config.theme.curve_color(), Color::rgb(0, 0, 255));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_oversized_input() {
        let config = VisualizerConfig::from_toml_str("[time]\nmax_input = 3000\ndefault_input = 3000\n").unwrap();
        assert_eq!(config.time.max_input, MAX_INPUT);
        assert_eq!(config.time.default_input, MAX_INPUT);
    }
}
