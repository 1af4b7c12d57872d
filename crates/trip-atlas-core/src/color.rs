/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// ```
/// use trip_atlas_core::Color;
///
/// assert_eq!(Color::rgb(1.0, 0.0, 0.0), Color::RED);
/// let cyan = Color::from_hsl(0.5, 1.0, 0.5);
/// assert_eq!(cyan.to_rgba8(), [0, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from hue (in full turns), saturation and lightness.
    ///
    /// The hue wraps, so `1.0` turn is the same red as `0.0`.
    pub fn from_hsl(hue_turns: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue_turns.rem_euclid(1.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgb(l as f32, l as f32, l as f32);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgb(
            hue_to_channel(p, q, h + 1.0 / 3.0) as f32,
            hue_to_channel(p, q, h) as f32,
            hue_to_channel(p, q, h - 1.0 / 3.0) as f32,
        )
    }

    /// Convert to 8-bit RGBA, rounding to nearest.
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::from_hsl(0.0, 1.0, 0.5).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::from_hsl(1.0 / 3.0, 1.0, 0.5).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::from_hsl(2.0 / 3.0, 1.0, 0.5).to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_full_turn_wraps_to_red() {
        assert_eq!(Color::from_hsl(1.0, 1.0, 0.5), Color::from_hsl(0.0, 1.0, 0.5));
    }

    #[test]
    fn test_grey_when_unsaturated() {
        assert_eq!(Color::from_hsl(0.3, 0.0, 0.5).to_rgba8(), [128, 128, 128, 255]);
    }
}
