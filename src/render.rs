//! Backend-neutral draw commands for the visualizer canvases.

use crate::color::Color;

/// Outline style for a shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
    /// Dash pattern (`[on, off, ...]`); empty for a solid line
    pub dash: Vec<f64>,
}

impl Stroke {
    /// Solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    /// Dashed stroke.
    pub fn dashed(color: Color, width: f64, dash: &[f64]) -> Self {
        Self {
            color,
            width,
            dash: dash.to_vec(),
        }
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font and placement of a text label. Text is vertically centered on `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Font size in pixels
    pub size: f64,
    pub bold: bool,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size,
            bold: false,
            align: TextAlign::Center,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// CSS font shorthand, e.g. `bold 12px Menlo, monospace`.
    pub fn font(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px Menlo, monospace", weight, self.size)
    }
}

/// A single draw command.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// Open polyline through `points`
    Path { points: Vec<(f64, f64)>, stroke: Stroke },
    /// Closed polygon filled with `fill`
    Area { points: Vec<(f64, f64)>, fill: Color },
    /// Text label; `rotation` is in radians around `(x, y)`
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
        rotation: f64,
    },
}

impl Shape {
    /// Text content for `Text` shapes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Everything to draw on one canvas for one frame, in paint order.
///
/// This is a platform-agnostic representation; each host interprets the
/// commands for its backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Fill applied to the whole canvas before any shape
    pub background: Option<Color>,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[inline]
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Option<Color>, stroke: Option<Stroke>) {
        self.push(Shape::Rect {
            x,
            y,
            w,
            h,
            fill,
            stroke,
        });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: Option<Color>, stroke: Option<Stroke>) {
        self.push(Shape::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
        });
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) {
        self.push(Shape::Path {
            points: vec![from, to],
            stroke,
        });
    }

    pub fn path(&mut self, points: Vec<(f64, f64)>, stroke: Stroke) {
        if points.len() >= 2 {
            self.push(Shape::Path { points, stroke });
        }
    }

    pub fn text(&mut self, text: impl Into<String>, x: f64, y: f64, style: TextStyle) {
        self.push(Shape::Text {
            text: text.into(),
            x,
            y,
            style,
            rotation: 0.0,
        });
    }

    pub fn rotated_text(&mut self, text: impl Into<String>, x: f64, y: f64, style: TextStyle, rotation: f64) {
        self.push(Shape::Text {
            text: text.into(),
            x,
            y,
            style,
            rotation,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All text labels in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(Shape::text)
    }
}

/// Web-specific rendering implementation.
#[cfg(feature = "web")]
pub mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;
        Ok(ctx)
    }

    fn set_dash(ctx: &CanvasRenderingContext2d, dash: &[f64]) -> Result<(), String> {
        let pattern = js_sys::Array::new();
        for segment in dash {
            pattern.push(&JsValue::from_f64(*segment));
        }
        ctx.set_line_dash(&pattern)
            .map_err(|_| "Failed to set line dash".to_string())
    }

    fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), String> {
        ctx.set_stroke_style_str(&stroke.color.css());
        ctx.set_line_width(stroke.width);
        set_dash(ctx, &stroke.dash)?;
        ctx.stroke();
        Ok(())
    }

    fn trace_points(ctx: &CanvasRenderingContext2d, points: &[(f64, f64)]) {
        ctx.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
    }

    /// Draw a [`Scene`] onto an HTML canvas.
    ///
    /// The canvas keeps its current dimensions; the scene is expected to
    /// have been laid out for them.
    ///
    /// ## Returns
    ///
    /// `Ok(())` on success, or an error message on failure.
    pub fn draw_scene(canvas: &HtmlCanvasElement, scene: &Scene) -> Result<(), String> {
        let ctx = context_2d(canvas)?;
        let (w, h) = (canvas.width() as f64, canvas.height() as f64);

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(|_| "Failed to reset transform")?;
        ctx.clear_rect(0.0, 0.0, w, h);
        if let Some(bg) = scene.background {
            ctx.set_fill_style_str(&bg.css());
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        ctx.set_text_baseline("middle");

        for shape in &scene.shapes {
            match shape {
                Shape::Rect { x, y, w, h, fill, stroke } => {
                    if let Some(fill) = fill {
                        ctx.set_fill_style_str(&fill.css());
                        ctx.fill_rect(*x, *y, *w, *h);
                    }
                    if let Some(stroke) = stroke {
                        ctx.begin_path();
                        ctx.rect(*x, *y, *w, *h);
                        apply_stroke(&ctx, stroke)?;
                    }
                }
                Shape::Circle { cx, cy, r, fill, stroke } => {
                    ctx.begin_path();
                    ctx.arc(*cx, *cy, *r, 0.0, std::f64::consts::TAU)
                        .map_err(|_| "Failed to draw arc")?;
                    if let Some(fill) = fill {
                        ctx.set_fill_style_str(&fill.css());
                        ctx.fill();
                    }
                    if let Some(stroke) = stroke {
                        apply_stroke(&ctx, stroke)?;
                    }
                }
                Shape::Path { points, stroke } => {
                    trace_points(&ctx, points);
                    apply_stroke(&ctx, stroke)?;
                }
                Shape::Area { points, fill } => {
                    trace_points(&ctx, points);
                    ctx.close_path();
                    ctx.set_fill_style_str(&fill.css());
                    ctx.fill();
                }
                Shape::Text { text, x, y, style, rotation } => {
                    ctx.save();
                    ctx.translate(*x, *y).map_err(|_| "Failed to translate")?;
                    if *rotation != 0.0 {
                        ctx.rotate(*rotation).map_err(|_| "Failed to rotate")?;
                    }
                    ctx.set_font(&style.font());
                    ctx.set_text_align(style.align.as_css());
                    ctx.set_fill_style_str(&style.color.css());
                    let drawn = ctx.fill_text(text, 0.0, 0.0);
                    ctx.restore();
                    drawn.map_err(|_| "Failed to fill text")?;
                }
            }
        }

        set_dash(&ctx, &[])
    }

    /// Run `on_frame` on every animation frame with the
    /// `requestAnimationFrame` timestamp in milliseconds.
    ///
    /// The loop stops once `on_frame` returns `false`, and the frame
    /// callback is released.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// use complexity_view::{render::web, TimeVisualizer, VisualizerConfig};
    ///
    /// let mut viz = TimeVisualizer::new(&VisualizerConfig::default());
    /// web::request_animation_loop(move |now| {
    ///     viz.frame(now);
    ///     if let Err(e) = web::draw_scene(&canvas, &viz.scene()) {
    ///         tracing::warn!(error = %e, "scene draw failed");
    ///     }
    ///     true
    /// })?;
    /// ```
    pub fn request_animation_loop<F>(mut on_frame: F) -> Result<(), String>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let window = web_sys::window().ok_or("No window available")?;
        let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let reschedule = slot.clone();

        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if !on_frame(now) {
                release(&reschedule);
                return;
            }
            let scheduled = web_sys::window().is_some_and(|window| {
                reschedule.borrow().as_ref().is_some_and(|callback| {
                    window
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .is_ok()
                })
            });
            if !scheduled {
                tracing::warn!("failed to request animation frame");
                release(&reschedule);
            }
        }) as Box<dyn FnMut(f64)>));

        let requested = slot
            .borrow()
            .as_ref()
            .is_some_and(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()).is_ok());
        if !requested {
            release(&slot);
            return Err("Failed to request animation frame".into());
        }
        Ok(())
    }

    /// Drop the callback held in `slot`, breaking its self-reference.
    fn release<T>(slot: &RefCell<Option<T>>) {
        let callback = slot.borrow_mut().take();
        drop(callback);
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_collects_shapes_in_order() {
        let mut scene = Scene::new(100.0, 50.0).with_background(Color::WHITE);
        scene.rect(0.0, 0.0, 10.0, 10.0, Some(Color::BLACK), None);
        scene.text("hi", 5.0, 5.0, TextStyle::new(Color::BLACK, 12.0));
        scene.circle(1.0, 1.0, 2.0, None, Some(Stroke::solid(Color::BLACK, 1.0)));

        assert_eq!(scene.len(), 3);
        assert!(matches!(scene.shapes[0], Shape::Rect { .. }));
        assert!(matches!(scene.shapes[2], Shape::Circle { .. }));
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["hi"]);
        assert_eq!(scene.background, Some(Color::WHITE));
    }

    #[test]
    fn test_degenerate_path_skipped() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.path(vec![(1.0, 1.0)], Stroke::solid(Color::BLACK, 1.0));
        assert!(scene.is_empty());
        scene.path(vec![(1.0, 1.0), (2.0, 2.0)], Stroke::solid(Color::BLACK, 1.0));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_font_string() {
        let style = TextStyle::new(Color::BLACK, 12.0).bold().align(TextAlign::Left);
        assert_eq!(style.font(), "bold 12px Menlo, monospace");
        assert_eq!(style.align.as_css(), "left");
        assert_eq!(TextStyle::new(Color::BLACK, 9.5).font(), "9.5px Menlo, monospace");
    }

    #[test]
    fn test_dashed_stroke() {
        let stroke = Stroke::dashed(Color::gray(240), 1.0, &[4.0, 4.0]);
        assert_eq!(stroke.dash, vec![4.0, 4.0]);
        assert!(Stroke::solid(Color::BLACK, 2.0).dash.is_empty());
    }
}
