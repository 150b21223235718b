use winit::dpi::PhysicalSize;

/// Aspect ratio used while the framebuffer has no area.
pub const FALLBACK_ASPECT: f32 = 1.0;

/// Mutable per-window state read by the transform producer.
///
/// Owned by the render loop; mutated only through [`FrameState::resize`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameState {
    fb_width: u32,
    fb_height: u32,
}

impl FrameState {
    pub const fn new(fb_width: u32, fb_height: u32) -> Self {
        Self { fb_width, fb_height }
    }

    /// Records a new framebuffer size. Any size is accepted, including zero.
    pub fn resize(&mut self, fb_width: u32, fb_height: u32) {
        if (fb_width, fb_height) != (self.fb_width, self.fb_height) {
            log::debug!("framebuffer resized to {fb_width}x{fb_height}");
        }
        self.fb_width = fb_width;
        self.fb_height = fb_height;
    }

    #[inline]
    pub fn fb_width(&self) -> u32 {
        self.fb_width
    }

    #[inline]
    pub fn fb_height(&self) -> u32 {
        self.fb_height
    }

    /// `true` when there is something to rasterize into.
    #[inline]
    pub fn has_area(&self) -> bool {
        self.fb_width > 0 && self.fb_height > 0
    }

    /// `fb_width / fb_height`, or [`FALLBACK_ASPECT`] for a degenerate framebuffer.
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.fb_width, self.fb_height)
    }
}

impl From<PhysicalSize<u32>> for FrameState {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

pub(crate) fn aspect_ratio(fb_width: u32, fb_height: u32) -> f32 {
    if fb_width == 0 || fb_height == 0 {
        return FALLBACK_ASPECT;
    }
    fb_width as f32 / fb_height as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height() {
        assert_eq!(FrameState::new(640, 480).aspect_ratio(), 640.0 / 480.0);
    }

    #[test]
    fn zero_height_uses_fallback() {
        let s = FrameState::new(640, 0);
        assert!(!s.has_area());
        assert_eq!(s.aspect_ratio(), FALLBACK_ASPECT);
    }

    #[test]
    fn zero_width_uses_fallback() {
        assert_eq!(FrameState::new(0, 480).aspect_ratio(), FALLBACK_ASPECT);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut a = FrameState::new(640, 480);
        a.resize(1024, 768);
        let once = a;
        a.resize(1024, 768);
        a.resize(1024, 768);
        assert_eq!(a, once);
        assert_eq!((a.fb_width(), a.fb_height()), (1024, 768));
    }

    #[test]
    fn from_physical_size() {
        let s: FrameState = PhysicalSize::new(800u32, 600u32).into();
        assert_eq!(s, FrameState::new(800, 600));
    }
}
