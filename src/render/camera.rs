use crate::math::Vec2;

/// Orthographic view whose viewport is measured in simulation meters.
///
/// The viewport is the screen divided by the meter size and starts centered
/// on half of itself, so world (0, 0) lands in the bottom-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub screen_width: f32,
    pub screen_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub center: Vec2,
    meter_size: f32,
}

impl Camera {
    pub fn new(screen_width: f32, screen_height: f32, meter_size: f32) -> Self {
        let viewport_width = screen_width / meter_size;
        let viewport_height = screen_height / meter_size;
        Self {
            screen_width,
            screen_height,
            viewport_width,
            viewport_height,
            center: Vec2::new(viewport_width / 2.0, viewport_height / 2.0),
            meter_size,
        }
    }

    #[inline]
    pub fn meter_size(&self) -> f32 {
        self.meter_size
    }

    /// Screen pixels covered by one simulation meter.
    #[inline]
    pub fn pixels_per_meter(&self) -> f32 {
        self.screen_width / self.viewport_width.max(f32::EPSILON)
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        let half_w = self.viewport_width / 2.0;
        let half_h = self.viewport_height.max(f32::EPSILON) / 2.0;

        let ndc_x = (p.x - self.center.x) / half_w;
        let ndc_y = (p.y - self.center.y) / half_h;

        // ndc [-1,1] to pixels; flip Y because screen Y goes down.
        Vec2::new(
            (ndc_x * 0.5 + 0.5) * self.screen_width,
            (1.0 - (ndc_y * 0.5 + 0.5)) * self.screen_height,
        )
    }

    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        let w = self.screen_width;
        let h = self.screen_height.max(1.0);

        let half_w = self.viewport_width / 2.0;
        let half_h = self.viewport_height / 2.0;

        let ndc_x = (p.x / w) * 2.0 - 1.0;
        let ndc_y = -((p.y / h) * 2.0 - 1.0);

        Vec2::new(self.center.x + ndc_x * half_w, self.center.y + ndc_y * half_h)
    }

    /// Pixel-space point (y up) to screen coordinates (y down).
    #[inline]
    pub fn pixels_to_screen(&self, p: Vec2) -> Vec2 {
        self.world_to_screen(p * (1.0 / self.meter_size))
    }

    /// Screen coordinates to pixel space.
    #[inline]
    pub fn screen_to_pixels(&self, p: Vec2) -> Vec2 {
        self.screen_to_world(p) * self.meter_size
    }
}
