/// An RGB color with an alpha channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque gray, `#vvvvvv`.
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Same color with a new alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 },
            ..self
        }
    }

    /// CSS string: `rgb(r,g,b)` when opaque, `rgba(r,g,b,a)` otherwise.
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Parse a theme color string into an opaque [`Color`].
///
/// Accepts the basic CSS color names (`black`, `red`, `gray`/`grey`, ...)
/// and `#rgb` / `#rrggbb` hex. Matching ignores case and surrounding
/// whitespace.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') {
        parse_hex(s)
    } else {
        parse_named(s)
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        _ => None,
    }
}

fn parse_named(s: &str) -> Option<Color> {
    let (r, g, b) = match s.to_lowercase().as_str() {
        "black"         => (0, 0, 0),
        "white"         => (255, 255, 255),
        "red"           => (255, 0, 0),
        "green"         => (0, 128, 0),
        "blue"          => (0, 0, 255),
        "yellow"        => (255, 255, 0),
        "cyan"          => (0, 255, 255),
        "magenta"       => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "orange"        => (255, 165, 0),
        "purple"        => (128, 0, 128),
        "pink"          => (255, 192, 203),
        "brown"         => (139, 69, 19),
        _               => return None,
    };
    Some(Color::rgb(r, g, b))
}
