/// Linear RGBA color, written to the framebuffer as-is.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Load-op clear value for a render pass.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_has_full_alpha() {
        let c = Color::opaque(0.39, 0.58, 0.92);
        assert_eq!((c.r, c.g, c.b, c.a), (0.39, 0.58, 0.92, 1.0));
    }

    #[test]
    fn to_wgpu_widens_channels() {
        let w = Color::opaque(0.25, 0.5, 0.75).to_wgpu();
        assert_eq!((w.r, w.g, w.b, w.a), (0.25, 0.5, 0.75, 1.0));
    }
}
