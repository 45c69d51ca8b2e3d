use gpui::Rgba;

/// Creates an RGBA color from a hex value and an alpha component.
pub fn rgb_a(hex: u32, a: f32) -> Rgba {
    let [_, r, g, b] = hex.to_be_bytes().map(|b| (b as f32) / 255.0);
    Rgba { r, g, b, a }
}

/// Extension trait for deriving RGBA colors.
pub trait RgbaExt {
    /// Returns a new color with the specified alpha value.
    fn alpha(self, alpha: f32) -> Self;

    /// Perceived luminance on a 0..=255 scale.
    fn luminance(&self) -> f32;

    /// Whether content on this color should use dark text.
    fn is_light(&self) -> bool;
}

impl RgbaExt for Rgba {
    fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    fn luminance(&self) -> f32 {
        (self.r * 255. * 299. + self.g * 255. * 587. + self.b * 255. * 114.) / 1000.
    }

    fn is_light(&self) -> bool {
        self.luminance() > 150.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_a_splits_channels() {
        let color = rgb_a(0x007AFF, 1.);
        assert_eq!(color.r, 0., "red channel of #007AFF should be 0");
        assert!((color.b - 1.).abs() < 1e-6, "blue channel should be full");
        assert_eq!(color.a, 1., "alpha should pass through");
    }

    #[test]
    fn white_is_light_and_black_is_not() {
        assert!(rgb_a(0xffffff, 1.).is_light(), "white should read as light");
        assert!(!rgb_a(0x000000, 1.).is_light(), "black should read as dark");
        assert!(
            !rgb_a(0x1d1d1f, 1.).is_light(),
            "dark window background should read as dark"
        );
    }
}
