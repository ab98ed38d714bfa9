use crate::draw::model::{Color, DirtyRect};
use crate::draw::surface::PixelSurface;

/// A bucket fill that would actually change pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillRequest {
    pub seed: (i32, i32),
    pub target: Color,
    pub replacement: Color,
}

impl FillRequest {
    /// Returns `None` when the seed is outside the surface or the seed
    /// already holds `replacement`.
    pub fn new(surface: &PixelSurface, seed: (i32, i32), replacement: Color) -> Option<Self> {
        if !surface.in_bounds(seed.0, seed.1) {
            return None;
        }
        let target = surface.get(seed.0, seed.1);
        if target == replacement {
            return None;
        }
        Some(Self {
            seed,
            target,
            replacement,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillOutcome {
    pub filled: usize,
    pub bounds: Option<DirtyRect>,
}

/// 4-connected exact-match fill from `seed`.
pub fn flood_fill(surface: &mut PixelSurface, seed: (i32, i32), replacement: Color) -> FillOutcome {
    match FillRequest::new(surface, seed, replacement) {
        Some(request) => apply_fill(surface, request),
        None => FillOutcome::default(),
    }
}

pub fn apply_fill(surface: &mut PixelSurface, request: FillRequest) -> FillOutcome {
    let FillRequest {
        seed,
        target,
        replacement,
    } = request;
    if target == replacement {
        return FillOutcome::default();
    }

    let mut filled = 0usize;
    let mut bounds: Option<DirtyRect> = None;
    let mut stack = vec![seed];

    // A written pixel no longer matches `target`, so it doubles as the visited mark.
    while let Some((x, y)) = stack.pop() {
        if !surface.in_bounds(x, y) || surface.get(x, y) != target {
            continue;
        }

        surface.set(x, y, replacement);
        filled += 1;
        let cell = DirtyRect::from_points((x, y), (x, y), 0);
        bounds = Some(bounds.map_or(cell, |rect| rect.union(cell)));

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    FillOutcome { filled, bounds }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::opaque(255, 0, 0);
    const BLUE: Color = Color::opaque(0, 0, 255);

    fn outline_box(surface: &mut PixelSurface, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        for x in x0..=x1 {
            surface.set(x, y0, color);
            surface.set(x, y1, color);
        }
        for y in y0..=y1 {
            surface.set(x0, y, color);
            surface.set(x1, y, color);
        }
    }

    #[test]
    fn fills_whole_uniform_surface() {
        let mut surface = PixelSurface::new(6, 4);
        let outcome = flood_fill(&mut surface, (2, 2), BLUE);
        assert_eq!(outcome.filled, 24);
        assert_eq!(
            outcome.bounds,
            Some(DirtyRect {
                x: 0,
                y: 0,
                width: 6,
                height: 4
            })
        );
        assert!(surface.rgba_pixels().chunks_exact(4).all(|px| px == [0u8, 0, 255, 255]));
    }

    #[test]
    fn matching_replacement_is_a_no_op() {
        let mut surface = PixelSurface::new(4, 4);
        surface.set(1, 1, RED);
        let before = surface.clone();

        assert_eq!(flood_fill(&mut surface, (1, 1), RED), FillOutcome::default());
        assert_eq!(flood_fill(&mut surface, (0, 0), Color::TRANSPARENT).filled, 0);
        assert_eq!(surface, before);
    }

    #[test]
    fn seed_outside_surface_is_a_no_op() {
        let mut surface = PixelSurface::new(4, 4);
        assert_eq!(flood_fill(&mut surface, (-1, 0), RED).filled, 0);
        assert_eq!(flood_fill(&mut surface, (4, 0), RED).filled, 0);
        assert!(FillRequest::new(&surface, (0, 9), RED).is_none());
        assert!(surface.rgba_pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn fill_stays_inside_closed_outline() {
        let mut surface = PixelSurface::new(12, 12);
        outline_box(&mut surface, 2, 2, 8, 8, RED);

        let outcome = flood_fill(&mut surface, (5, 5), BLUE);
        assert_eq!(outcome.filled, 25);
        for y in 0..12 {
            for x in 0..12 {
                let inside = (3..=7).contains(&x) && (3..=7).contains(&y);
                let on_edge = (2..=8).contains(&x)
                    && (2..=8).contains(&y)
                    && (x == 2 || x == 8 || y == 2 || y == 8);
                let expected = if inside {
                    BLUE
                } else if on_edge {
                    RED
                } else {
                    Color::TRANSPARENT
                };
                assert_eq!(surface.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn fill_does_not_leak_through_diagonal_boundary() {
        let mut surface = PixelSurface::new(5, 5);
        for i in 0..5 {
            surface.set(i, i, RED);
        }
        flood_fill(&mut surface, (4, 0), BLUE);
        assert_eq!(surface.get(0, 4), Color::TRANSPARENT);
        assert_eq!(surface.get(4, 0), BLUE);
        assert_eq!(surface.get(1, 0), BLUE);
    }

    #[test]
    fn erase_fill_writes_true_transparency() {
        let mut surface = PixelSurface::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                surface.set(x, y, Color::rgba(255, 255, 255, 255));
            }
        }
        flood_fill(&mut surface, (1, 1), Color::TRANSPARENT);
        assert!(surface.rgba_pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn second_identical_fill_changes_nothing() {
        let mut surface = PixelSurface::new(8, 8);
        outline_box(&mut surface, 1, 1, 5, 5, RED);
        flood_fill(&mut surface, (3, 3), BLUE);
        let once = surface.clone();

        let outcome = flood_fill(&mut surface, (3, 3), BLUE);
        assert_eq!(outcome.filled, 0);
        assert_eq!(surface, once);
    }

    #[test]
    fn partial_alpha_must_match_exactly() {
        let mut surface = PixelSurface::new(3, 1);
        surface.set(1, 0, Color::rgba(0, 0, 0, 1));
        flood_fill(&mut surface, (0, 0), RED);
        assert_eq!(surface.get(0, 0), RED);
        assert_eq!(surface.get(1, 0), Color::rgba(0, 0, 0, 1));
        assert_eq!(surface.get(2, 0), Color::TRANSPARENT);
    }
}
