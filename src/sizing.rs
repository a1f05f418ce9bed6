//! Box sizing calculations for fitting array rows and grids to a canvas.

/// Sizing parameters for a horizontal row of array boxes.
///
/// Boxes shrink to fit the available width but never below
/// [`min_box`](Self::min_box) nor above [`max_box`](Self::max_box).
#[derive(Clone, Debug, PartialEq)]
pub struct BoxSizing {
    /// Smallest box edge in pixels
    pub min_box: f64,
    /// Largest box edge in pixels
    pub max_box: f64,
    /// Gap between neighboring boxes
    pub spacing: f64,
    /// Boxes narrower than this get no index label
    pub label_threshold: f64,
}

impl Default for BoxSizing {
    fn default() -> Self {
        Self {
            min_box: 25.0,
            max_box: 50.0,
            spacing: 4.0,
            label_threshold: 20.0,
        }
    }
}

/// Horizontal placement of a centered row of boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    /// Edge length of each box
    pub box_size: f64,
    /// Left edge of the first box
    pub start_x: f64,
    /// Top edge of every box
    pub y: f64,
    /// Distance between the left edges of neighboring boxes
    pub stride: f64,
    /// Total row width including gaps
    pub total_width: f64,
}

impl RowLayout {
    /// Left edge of box `slot` (0-based position within the row).
    #[inline]
    pub fn x(&self, slot: usize) -> f64 {
        self.start_x + slot as f64 * self.stride
    }

    /// Center of box `slot`.
    #[inline]
    pub fn center(&self, slot: usize) -> (f64, f64) {
        (self.x(slot) + self.box_size / 2.0, self.y + self.box_size / 2.0)
    }
}

impl BoxSizing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Box edge for `count` boxes in `available` pixels.
    ///
    /// ```rust
    /// use complexity_view::BoxSizing;
    ///
    /// let sizing = BoxSizing::default();
    /// // Plenty of room: capped at the maximum
    /// assert_eq!(sizing.box_size(5, 1000.0), 50.0);
    /// // Crowded: floored at the minimum
    /// assert_eq!(sizing.box_size(50, 400.0), 25.0);
    /// ```
    pub fn box_size(&self, count: usize, available: f64) -> f64 {
        if count == 0 {
            return self.max_box;
        }
        let gaps = (count - 1) as f64 * self.spacing;
        let fitted = (available - gaps) / count as f64;
        if fitted.is_finite() {
            fitted.clamp(self.min_box, self.max_box)
        } else {
            self.min_box
        }
    }

    /// Lay out `count` boxes centered in a `width`×`height` canvas, leaving
    /// `margin` pixels of horizontal room in total.
    pub fn row(&self, count: usize, width: f64, height: f64, margin: f64) -> RowLayout {
        let box_size = self.box_size(count, width - margin);
        let total_width = if count == 0 {
            0.0
        } else {
            box_size * count as f64 + self.spacing * (count - 1) as f64
        };
        RowLayout {
            box_size,
            start_x: (width - total_width) / 2.0,
            y: height / 2.0 - box_size / 2.0,
            stride: box_size + self.spacing,
            total_width,
        }
    }

    /// Whether a box of `box_size` is wide enough for its index label.
    #[inline]
    pub fn shows_label(&self, box_size: f64) -> bool {
        box_size > self.label_threshold
    }
}

/// Cell edge for an `cols`×`rows` grid in a `width`×`height` canvas with
/// `margin` pixels of room, never smaller than `min_cell`.
pub fn grid_cell(cols: usize, rows: usize, width: f64, height: f64, margin: f64, min_cell: f64) -> f64 {
    let cols = cols.max(1) as f64;
    let rows = rows.max(1) as f64;
    let cell = ((width - margin) / cols).min((height - margin) / rows);
    if cell.is_finite() {
        cell.max(min_cell)
    } else {
        min_cell
    }
}
