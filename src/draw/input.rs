use crate::draw::fill::flood_fill;
use crate::draw::model::{clamp_pen_width, Color, DirtyRect, PaintSource, Pen, ToolMode};
use crate::draw::render::{clipped_segment_bounds, render_segment};
use crate::draw::sample::{ColorSampler, GlobalPressHook, PickSubscription};
use crate::draw::surface::PixelSurface;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: (i32, i32),
    pub primary_held: bool,
}

impl PointerEvent {
    pub fn down(pos: (i32, i32)) -> Self {
        Self {
            kind: PointerKind::Down,
            pos,
            primary_held: true,
        }
    }

    pub fn drag(pos: (i32, i32)) -> Self {
        Self {
            kind: PointerKind::Move,
            pos,
            primary_held: true,
        }
    }

    pub fn hover(pos: (i32, i32)) -> Self {
        Self {
            kind: PointerKind::Move,
            pos,
            primary_held: false,
        }
    }

    pub fn up(pos: (i32, i32)) -> Self {
        Self {
            kind: PointerKind::Up,
            pos,
            primary_held: false,
        }
    }
}

/// Last point of an in-progress stroke, alive between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeSession {
    pub last_point: (i32, i32),
    pub moved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// No pick was armed; the press belongs to whatever is under the cursor.
    NotPicking,
    Picked(Color),
    Unresolved,
}

#[derive(Debug, Default)]
pub struct ToolState {
    mode: ToolMode,
    paint: PaintSource,
    pen: Pen,
    session: Option<StrokeSession>,
    pick: Option<PickSubscription>,
}

impl ToolState {
    pub fn new(pen: Pen) -> Self {
        Self {
            pen: Pen::new(pen.color, pen.width),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn pen(&self) -> Pen {
        self.pen
    }

    pub fn paint_source(&self) -> PaintSource {
        self.paint
    }

    pub fn session(&self) -> Option<StrokeSession> {
        self.session
    }

    pub fn is_picking(&self) -> bool {
        self.pick.is_some()
    }

    /// Pen color to highlight in the palette. The bucket keeps the swatch lit
    /// while it pours the pen color; erasing and picking clear it.
    pub fn palette_selection(&self) -> Option<Color> {
        match self.mode {
            ToolMode::Draw => Some(self.pen.color),
            ToolMode::BucketFill if self.paint == PaintSource::Pen => Some(self.pen.color),
            ToolMode::BucketFill | ToolMode::Erase | ToolMode::ColorPick => None,
        }
    }

    pub fn select_draw(&mut self) {
        self.paint = PaintSource::Pen;
        self.enter(ToolMode::Draw);
    }

    pub fn select_erase(&mut self) {
        self.paint = PaintSource::Eraser;
        self.enter(ToolMode::Erase);
    }

    pub fn select_bucket_fill(&mut self) {
        self.enter(ToolMode::BucketFill);
    }

    /// Arms a single-shot pick. On error the previous mode is kept.
    pub fn select_color_pick(&mut self, hook: Box<dyn GlobalPressHook>) -> Result<()> {
        if self.pick.is_some() {
            return Ok(());
        }
        let subscription = PickSubscription::acquire(hook)?;
        self.enter(ToolMode::ColorPick);
        self.pick = Some(subscription);
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.pen.color = color;
        self.paint = PaintSource::Pen;
        if matches!(self.mode, ToolMode::Erase | ToolMode::ColorPick) {
            self.enter(ToolMode::Draw);
        }
    }

    pub fn set_width(&mut self, width: u32) {
        self.pen.width = clamp_pen_width(width);
    }

    /// Drops any stroke in progress; the next move draws nothing until a new press.
    pub fn abort_stroke(&mut self) {
        self.session = None;
    }

    fn enter(&mut self, mode: ToolMode) {
        if !mode.is_stroke() {
            self.session = None;
        }
        if mode != ToolMode::ColorPick {
            // Dropping the subscription unhooks global input.
            self.pick = None;
        }
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "tool mode changed");
        }
        self.mode = mode;
    }

    fn fill_color(&self) -> Color {
        match self.paint {
            PaintSource::Pen => self.pen.color,
            PaintSource::Eraser => Color::TRANSPARENT,
        }
    }

    /// Routes a canvas pointer event. Returns the region that changed.
    pub fn handle_pointer(
        &mut self,
        surface: &mut PixelSurface,
        event: PointerEvent,
    ) -> Option<DirtyRect> {
        match self.mode {
            ToolMode::Draw | ToolMode::Erase => self.handle_stroke_pointer(surface, event),
            ToolMode::BucketFill => match event.kind {
                PointerKind::Down => {
                    let outcome = flood_fill(surface, event.pos, self.fill_color());
                    tracing::debug!(
                        seed_x = event.pos.0,
                        seed_y = event.pos.1,
                        filled = outcome.filled,
                        "bucket fill"
                    );
                    outcome.bounds
                }
                PointerKind::Move | PointerKind::Up => None,
            },
            ToolMode::ColorPick => None,
        }
    }

    fn handle_stroke_pointer(
        &mut self,
        surface: &mut PixelSurface,
        event: PointerEvent,
    ) -> Option<DirtyRect> {
        match event.kind {
            PointerKind::Down => {
                self.session = Some(StrokeSession {
                    last_point: event.pos,
                    moved: false,
                });
                None
            }
            PointerKind::Move => {
                if !event.primary_held {
                    return None;
                }
                let session = self.session.as_mut()?;
                let start = session.last_point;
                session.last_point = event.pos;
                session.moved = true;
                let erase = self.mode == ToolMode::Erase;
                render_segment(surface, start, event.pos, self.pen, erase);
                clipped_segment_bounds(
                    start,
                    event.pos,
                    self.pen.width,
                    surface.width(),
                    surface.height(),
                )
            }
            PointerKind::Up => {
                let session = self.session.take()?;
                if session.moved {
                    return None;
                }
                // A press released without moving still leaves a dot.
                let point = session.last_point;
                let erase = self.mode == ToolMode::Erase;
                render_segment(surface, point, point, self.pen, erase);
                clipped_segment_bounds(point, point, self.pen.width, surface.width(), surface.height())
            }
        }
    }

    /// Resolves an armed pick with the first global primary press.
    ///
    /// The hook is released and the mode returns to `Draw` whether or not a
    /// color could be read.
    pub fn handle_global_press(
        &mut self,
        global: (i32, i32),
        sampler: &dyn ColorSampler,
    ) -> PickOutcome {
        let Some(subscription) = self.pick.take() else {
            return PickOutcome::NotPicking;
        };
        drop(subscription);

        let outcome = match sampler.sample_at(global) {
            Some(color) => {
                self.pen.color = color;
                tracing::debug!(x = global.0, y = global.1, ?color, "color picked");
                PickOutcome::Picked(color)
            }
            None => {
                tracing::debug!(x = global.0, y = global.1, "color pick unresolved");
                PickOutcome::Unresolved
            }
        };
        self.paint = PaintSource::Pen;
        self.enter(ToolMode::Draw);
        outcome
    }
}
