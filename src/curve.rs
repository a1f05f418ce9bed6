//! Growth-curve graphs for the time and space visualizers.

use std::f64::consts::FRAC_PI_2;

use crate::color::Color;
use crate::config::Theme;
use crate::render::{Scene, Shape, Stroke, TextAlign, TextStyle};
use crate::space::SpaceClass;
use crate::{PlaybackController, MAX_INPUT};

const TIME_PADDING: f64 = 45.0;
const TIME_MIN_SIZE: f64 = 120.0;
const SPACE_PADDING: f64 = 50.0;
const SPACE_MIN_SIZE: f64 = 150.0;

const TICK_TEXT: Color = Color::gray(0x66);
const AXIS_TEXT: Color = Color::gray(0x11);

/// Sample `f` at every integer in `from..=to`, skipping non-finite values.
pub fn sample(from: u32, to: u32, f: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    (from..=to)
        .filter_map(|n| {
            let x = f64::from(n);
            let y = f(x);
            y.is_finite().then_some((x, y))
        })
        .collect()
}

/// Round `value` up to 1, 2 or 5 times a power of ten.
///
/// ```rust
/// use complexity_view::curve::nice_axis_max;
///
/// assert_eq!(nice_axis_max(0.0), 1.0);
/// assert_eq!(nice_axis_max(13.0), 20.0);
/// assert_eq!(nice_axis_max(2500.0), 5000.0);
/// assert_eq!(nice_axis_max(700.0), 1000.0);
/// ```
pub fn nice_axis_max(value: f64) -> f64 {
    let target = if value.is_finite() { value.max(1.0) } else { 1.0 };
    let magnitude = 10f64.powf(target.log10().floor());
    let fraction = target / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Compact counter text: `950`, `1.5k`, `12k`.
pub fn format_metric(value: f64) -> String {
    if value >= 10_000.0 {
        format!("{}k", (value / 1000.0).round())
    } else if value >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else {
        format!("{}", value.round())
    }
}

/// Mapping from data coordinates to canvas pixels inside a padded frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PlotFrame {
    #[inline]
    pub fn graph_width(&self) -> f64 {
        self.width - self.padding * 2.0
    }

    #[inline]
    pub fn graph_height(&self) -> f64 {
        self.height - self.padding * 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.height - self.padding
    }

    pub fn x(&self, value: f64) -> f64 {
        let range = (self.x_max - self.x_min).max(1.0);
        self.padding + (value - self.x_min) / range * self.graph_width()
    }

    pub fn y(&self, value: f64) -> f64 {
        self.bottom() - value / self.y_max * self.graph_height()
    }

    #[inline]
    pub fn point(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (self.x(x), self.y(y))
    }

    fn axes(&self, scene: &mut Scene) {
        let p = self.padding;
        scene.path(
            vec![(p, p), (p, self.bottom()), (self.width - p, self.bottom())],
            Stroke::solid(Color::BLACK, 2.0),
        );
    }

    fn axis_labels(&self, scene: &mut Scene, y_label: &str, style: TextStyle) {
        scene.text("Input Size (n)", self.width / 2.0, self.height - 10.0, style.clone());
        scene.rotated_text(y_label, 15.0, self.height / 2.0, style, -FRAC_PI_2);
    }
}

/// Time graph: the reference curve with markers for steps taken and total.
pub fn time_curve(ctrl: &PlaybackController, max_input: u32, width: f64, height: f64, theme: &Theme) -> Scene {
    let mut scene = Scene::new(width, height).with_background(Color::WHITE);
    if width < TIME_MIN_SIZE || height < TIME_MIN_SIZE {
        return scene;
    }

    let complexity = ctrl.complexity();
    let x_min = 1.0;
    let x_max = f64::from(complexity.curve_domain_max(max_input).max(2));
    let points = sample(1, x_max as u32, |n| complexity.growth(n));
    if points.is_empty() {
        return scene;
    }
    let peak = points.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let total_steps = ctrl.total_steps().max(1) as f64;
    let frame = PlotFrame {
        width,
        height,
        padding: TIME_PADDING,
        x_min,
        x_max,
        y_max: nice_axis_max(peak.max(total_steps)),
    };
    let p = frame.padding;
    let curve = theme.curve_color();

    let grid = Stroke::dashed(Color::gray(0xe6), 1.0, &[4.0, 4.0]);
    let y_ticks = 5;
    for i in 0..=y_ticks {
        let value = frame.y_max / y_ticks as f64 * i as f64;
        let y = frame.y(value);
        scene.line((p, y), (width - p, y), grid.clone());
        scene.text(
            format_metric(value),
            p - 8.0,
            y + 3.0,
            TextStyle::new(TICK_TEXT, 10.0).align(TextAlign::Right),
        );
    }
    let x_ticks = ((x_max - x_min) as usize).min(5).max(1);
    for i in 0..=x_ticks {
        let value = x_min + (x_max - x_min) / x_ticks as f64 * i as f64;
        let x = frame.x(value);
        scene.line((x, p), (x, frame.bottom()), grid.clone());
        scene.text(
            format!("{}", value.round()),
            x,
            frame.bottom() + 14.0,
            TextStyle::new(TICK_TEXT, 10.0),
        );
    }

    frame.axes(&mut scene);
    frame.axis_labels(&mut scene, "Time (steps)", TextStyle::new(AXIS_TEXT, 11.0));

    scene.path(points.iter().map(|&pt| frame.point(pt)).collect(), Stroke::solid(curve, 2.0));
    scene.text(
        complexity.label(),
        p + 10.0,
        p + 18.0,
        TextStyle::new(curve, 12.0).bold().align(TextAlign::Left),
    );

    let input = if ctrl.sequence().is_empty() {
        ctrl.display_n()
    } else {
        f64::from(ctrl.sequence().n())
    };
    let input = input.clamp(x_min, x_max);
    let px = frame.x(input);
    let taken = ctrl.current_index() as f64;
    let total_y = frame.y(total_steps.min(frame.y_max));
    let taken_y = frame.y(taken.min(frame.y_max));

    scene.line(
        (px, p),
        (px, frame.bottom()),
        Stroke::dashed(Color::BLACK.with_alpha(0.25), 1.0, &[6.0, 4.0]),
    );
    scene.circle(px, total_y, 7.0, Some(Color::WHITE), Some(Stroke::solid(curve, 2.0)));
    scene.circle(px, taken_y, 5.0, Some(curve), None);
    scene.text(
        format!(
            "n={} | {}/{}",
            input.round(),
            format_metric(taken),
            format_metric(total_steps)
        ),
        px + 10.0,
        taken_y.min(total_y) - 8.0,
        TextStyle::new(AXIS_TEXT, 10.0).align(TextAlign::Left),
    );

    scene
}

/// Space graph: the raw memory function with a crosshair at the current `n`.
pub fn space_curve(class: SpaceClass, n: u32, max_input: u32, width: f64, height: f64) -> Scene {
    let mut scene = Scene::new(width, height).with_background(Color::WHITE);
    if width < SPACE_MIN_SIZE || height < SPACE_MIN_SIZE {
        return scene;
    }

    let max_input = max_input.clamp(1, MAX_INPUT);
    let points = sample(1, max_input, |x| class.growth(x));
    let peak = points.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let current = class.growth(f64::from(n));
    let frame = PlotFrame {
        width,
        height,
        padding: SPACE_PADDING,
        x_min: 0.0,
        x_max: f64::from(max_input),
        y_max: (peak.max(current) * 1.1).ceil().max(1.0),
    };
    let p = frame.padding;

    let grid = Stroke::solid(Color::gray(0xe0), 1.0);
    let y_ticks = 6;
    for i in 0..=y_ticks {
        let value = frame.y_max / y_ticks as f64 * i as f64;
        let y = frame.y(value);
        scene.line((p, y), (width - p, y), grid.clone());
        scene.text(
            format_metric(value),
            p - 8.0,
            y,
            TextStyle::new(TICK_TEXT, 10.0).align(TextAlign::Right),
        );
    }
    let x_ticks = max_input.min(8);
    for i in 0..=x_ticks {
        let value = frame.x_max / f64::from(x_ticks) * f64::from(i);
        let x = frame.x(value);
        scene.line((x, p), (x, frame.bottom()), grid.clone());
        scene.text(
            format!("{}", value.round()),
            x,
            frame.bottom() + 14.0,
            TextStyle::new(TICK_TEXT, 10.0),
        );
    }

    frame.axes(&mut scene);
    frame.axis_labels(&mut scene, "Memory Units", TextStyle::new(Color::BLACK, 12.0).bold());

    let mut area = Vec::with_capacity(points.len() + 2);
    area.push((p, frame.bottom()));
    area.extend(points.iter().map(|&pt| frame.point(pt)));
    area.push((width - p, frame.bottom()));
    scene.push(Shape::Area {
        points: area,
        fill: Color::BLACK.with_alpha(0.05),
    });
    scene.path(points.iter().map(|&pt| frame.point(pt)).collect(), Stroke::solid(Color::BLACK, 2.5));

    let cx = frame.x(f64::from(n));
    let cy = frame.y(current.min(frame.y_max));
    scene.path(
        vec![(cx, frame.bottom()), (cx, cy), (p, cy)],
        Stroke::dashed(Color::gray(0x66), 1.0, &[5.0, 3.0]),
    );
    scene.circle(cx, cy, 5.0, Some(Color::BLACK), Some(Stroke::solid(Color::WHITE, 2.0)));
    scene.text(
        format!("n={}, mem={}", n, format_metric(current)),
        cx + 10.0,
        cy - 10.0,
        TextStyle::new(Color::BLACK, 11.0).bold().align(TextAlign::Left),
    );
    scene.text(
        class.graph_label(),
        p + 10.0,
        p + 20.0,
        TextStyle::new(Color::BLACK, 12.0).bold().align(TextAlign::Left),
    );
    scene
}
