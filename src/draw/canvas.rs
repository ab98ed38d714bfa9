use crate::draw::input::{PickOutcome, PointerEvent, ToolState};
use crate::draw::model::{Color, DirtyRect, Pen, ToolMode};
use crate::draw::sample::{ColorSampler, GlobalPressHook};
use crate::draw::surface::PixelSurface;
use anyhow::Result;
use image::RgbaImage;

/// The annotation layer driven by the overlay window.
///
/// Owns the only mutable [`PixelSurface`]; every write goes through the tool
/// state. All calls are expected on the UI thread.
#[derive(Debug, Default)]
pub struct AnnotationCanvas {
    surface: PixelSurface,
    tools: ToolState,
    revision: u64,
}

impl AnnotationCanvas {
    pub fn new(width: u32, height: u32, pen: Pen) -> Self {
        Self {
            surface: PixelSurface::new(width, height),
            tools: ToolState::new(pen),
            revision: 0,
        }
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn pen(&self) -> Pen {
        self.tools.pen()
    }

    pub fn mode(&self) -> ToolMode {
        self.tools.mode()
    }

    /// Bumped on every call that changed pixels.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touched(&mut self, dirty: Option<DirtyRect>) -> Option<DirtyRect> {
        if dirty.is_some() {
            self.revision = self.revision.wrapping_add(1);
        }
        dirty
    }

    /// Negative sizes mean "no drawable area". A stroke in progress is aborted
    /// when the size actually changes.
    pub fn resize(&mut self, width: i32, height: i32) -> Option<DirtyRect> {
        let width = width.max(0) as u32;
        let height = height.max(0) as u32;
        let previous = self.surface.size();
        if !self.surface.resize(width, height) {
            return None;
        }
        self.tools.abort_stroke();
        tracing::debug!(
            from_width = previous.0,
            from_height = previous.1,
            width,
            height,
            "annotation surface resized"
        );
        self.revision = self.revision.wrapping_add(1);
        DirtyRect::full(width, height)
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Option<DirtyRect> {
        let dirty = self.tools.handle_pointer(&mut self.surface, event);
        self.touched(dirty)
    }

    /// Returns `None` when the surface was already blank.
    pub fn clear(&mut self) -> Option<DirtyRect> {
        if self.surface.is_blank() {
            return None;
        }
        self.surface.clear();
        tracing::info!("annotation surface cleared");
        let dirty = DirtyRect::full(self.surface.width(), self.surface.height());
        self.touched(dirty)
    }

    pub fn select_draw(&mut self) {
        self.tools.select_draw();
    }

    pub fn select_erase(&mut self) {
        self.tools.select_erase();
    }

    pub fn select_bucket_fill(&mut self) {
        self.tools.select_bucket_fill();
    }

    pub fn select_color_pick(&mut self, hook: Box<dyn GlobalPressHook>) -> Result<()> {
        self.tools.select_color_pick(hook)
    }

    pub fn set_color(&mut self, color: Color) {
        self.tools.set_color(color);
    }

    pub fn set_width(&mut self, width: u32) {
        self.tools.set_width(width);
    }

    pub fn global_press(&mut self, global: (i32, i32), sampler: &dyn ColorSampler) -> PickOutcome {
        self.tools.handle_global_press(global, sampler)
    }

    /// Flat RGBA copy for export, `None` when there is nothing to write.
    pub fn export_image(&self) -> Option<RgbaImage> {
        if self.surface.is_empty() {
            return None;
        }
        Some(self.surface.to_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::opaque(255, 0, 0);

    #[test]
    fn resize_mid_stroke_aborts_the_session() {
        let mut canvas = AnnotationCanvas::new(10, 10, Pen::new(RED, 1));
        canvas.pointer(PointerEvent::down((1, 1)));
        canvas.resize(20, 20);
        assert!(canvas.tools().session().is_none());
        assert_eq!(canvas.pointer(PointerEvent::drag((8, 8))), None);
        assert!(canvas.surface().rgba_pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn same_size_resize_keeps_the_session() {
        let mut canvas = AnnotationCanvas::new(10, 10, Pen::new(RED, 1));
        canvas.pointer(PointerEvent::down((1, 1)));
        assert_eq!(canvas.resize(10, 10), None);
        assert!(canvas.pointer(PointerEvent::drag((4, 1))).is_some());
    }

    #[test]
    fn negative_resize_yields_empty_surface() {
        let mut canvas = AnnotationCanvas::new(4, 4, Pen::default());
        assert_eq!(canvas.resize(-3, 10), None);
        assert!(canvas.surface().is_empty());
        assert!(canvas.export_image().is_none());
        assert_eq!(canvas.pointer(PointerEvent::down((0, 0))), None);
        assert_eq!(canvas.clear(), None);
    }

    #[test]
    fn revision_tracks_pixel_changes_only() {
        let mut canvas = AnnotationCanvas::new(6, 6, Pen::new(RED, 1));
        let start = canvas.revision();
        canvas.pointer(PointerEvent::hover((2, 2)));
        canvas.set_color(Color::opaque(0, 255, 0));
        assert_eq!(canvas.revision(), start);

        canvas.pointer(PointerEvent::down((2, 2)));
        canvas.pointer(PointerEvent::up((2, 2)));
        assert_eq!(canvas.revision(), start + 1);

        canvas.clear();
        assert_eq!(canvas.revision(), start + 2);
    }

    #[test]
    fn clearing_a_blank_surface_changes_nothing() {
        let mut canvas = AnnotationCanvas::new(6, 6, Pen::new(RED, 1));
        assert_eq!(canvas.clear(), None);
        assert_eq!(canvas.revision(), 0);

        canvas.pointer(PointerEvent::down((3, 3)));
        canvas.pointer(PointerEvent::up((3, 3)));
        assert_eq!(canvas.clear(), DirtyRect::full(6, 6));
        assert_eq!(canvas.revision(), 2);
        assert_eq!(canvas.clear(), None);
        assert_eq!(canvas.revision(), 2);
    }

    #[test]
    fn drag_across_the_whole_i32_range_clips_to_the_surface() {
        let mut canvas = AnnotationCanvas::new(10, 10, Pen::new(RED, 3));
        canvas.pointer(PointerEvent::down((i32::MIN, 5)));
        let dirty = canvas.pointer(PointerEvent::drag((i32::MAX, 5)));
        assert_eq!(
            dirty,
            Some(DirtyRect {
                x: 0,
                y: 3,
                width: 10,
                height: 5
            })
        );
        assert_eq!(canvas.surface().get(0, 5), RED);
        assert_eq!(canvas.surface().get(9, 5), RED);
    }
}
