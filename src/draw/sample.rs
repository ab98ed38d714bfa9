use crate::draw::model::Color;
use anyhow::Result;
use screenshots::Screen;

/// Reads one on-screen pixel at a global (virtual desktop) coordinate.
pub trait ColorSampler {
    fn sample_at(&self, global: (i32, i32)) -> Option<Color>;
}

impl<F> ColorSampler for F
where
    F: Fn((i32, i32)) -> Option<Color>,
{
    fn sample_at(&self, global: (i32, i32)) -> Option<Color> {
        self(global)
    }
}

/// Samples the live desktop through the `screenshots` capture backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenSampler;

impl ColorSampler for ScreenSampler {
    fn sample_at(&self, global: (i32, i32)) -> Option<Color> {
        match capture_pixel(global) {
            Ok(color) => Some(color),
            Err(err) => {
                tracing::debug!(x = global.0, y = global.1, error = %err, "screen sample failed");
                None
            }
        }
    }
}

fn capture_pixel(global: (i32, i32)) -> Result<Color> {
    let screen = Screen::from_point(global.0, global.1)?;
    let info = &screen.display_info;
    let local = (global.0 - info.x, global.1 - info.y);
    if local.0 < 0 || local.1 < 0 || local.0 as u32 >= info.width || local.1 as u32 >= info.height
    {
        anyhow::bail!("point lies outside display {}", info.id);
    }
    let image = screen.capture_area(local.0, local.1, 1, 1)?;
    let pixel = image
        .pixels()
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty capture at display {}", info.id))?;
    let [r, g, b, _] = pixel.0;
    Ok(Color::opaque(r, g, b))
}

/// Single-shot global mouse hook installed for the duration of a color pick.
///
/// While subscribed, the host must swallow the next primary press anywhere on
/// the desktop and forward its global position to the canvas.
pub trait GlobalPressHook {
    fn subscribe(&mut self) -> Result<()>;
    fn unsubscribe(&mut self);
}

/// Owns a subscribed hook and releases it when dropped.
pub struct PickSubscription {
    hook: Box<dyn GlobalPressHook>,
}

impl PickSubscription {
    pub fn acquire(mut hook: Box<dyn GlobalPressHook>) -> Result<Self> {
        hook.subscribe()?;
        Ok(Self { hook })
    }
}

impl Drop for PickSubscription {
    fn drop(&mut self) {
        self.hook.unsubscribe();
        tracing::debug!("color pick hook released");
    }
}

impl std::fmt::Debug for PickSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickSubscription").finish_non_exhaustive()
    }
}
