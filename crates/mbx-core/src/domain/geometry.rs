//! Classic-viewport geometry and two-stage coordinate mapping.
//!
//! Game windows running in "classic" render mode draw a fixed 4:3 image
//! centred inside whatever client area the window currently has, with black
//! bars on the two remaining sides.  Copying a cursor position verbatim from
//! one such window to another places the cursor off the rendered surface as
//! soon as the two windows differ in size or mode.
//!
//! Mapping therefore goes through a normalized `[0, 1]²` space:
//!
//! ```text
//! source client point ──client_to_normalized──▶ (nx, ny) ──normalized_to_client──▶ target client point
//!        (viewport of source if classic)                     (viewport of target if classic)
//! ```
//!
//! Source and target classic-mode status are independent; each side only
//! knows about its own viewport.  All clamping saturates.
//!
//! Rounding is round-half-to-even throughout so a given client size always
//! produces the same viewport the game itself computes.

use thiserror::Error;

/// Width / height of the classic render surface.
pub const CLASSIC_ASPECT: f64 = 4.0 / 3.0;

/// Errors from coordinate mapping.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// The window has a zero or negative client dimension.
    #[error("window has no client area ({width}x{height})")]
    NoClientArea { width: i32, height: i32 },
}

/// An integer point in screen or client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point in `[0, 1]²`, relative to a client area or viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

/// The letterboxed 4:3 sub-rectangle of a client area.  Derived per event,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// The whole client rectangle as a viewport.
    pub fn full(width: i32, height: i32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
        }
    }

    /// Returns `true` if `p` lies inside the viewport (right/bottom exclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x < self.left + self.width
            && p.y >= self.top
            && p.y < self.top + self.height
    }
}

/// Computes the centred 4:3 viewport inside a `client_width` × `client_height`
/// client area.
///
/// Wider than 4:3 letterboxes left/right (full height); anything else
/// letterboxes top/bottom (full width).  Returns `None` when either dimension
/// is zero or negative; callers then treat the full client rect as the
/// drawing surface.
pub fn compute_classic_viewport(client_width: i32, client_height: i32) -> Option<Viewport> {
    if client_width <= 0 || client_height <= 0 {
        return None;
    }

    let window_aspect = f64::from(client_width) / f64::from(client_height);
    let (width, height) = if window_aspect > CLASSIC_ASPECT {
        let height = client_height;
        let width = (f64::from(height) * CLASSIC_ASPECT).round_ties_even() as i32;
        (width, height)
    } else {
        let width = client_width;
        let height = (f64::from(width) / CLASSIC_ASPECT).round_ties_even() as i32;
        (width, height)
    };

    Some(Viewport {
        left: (client_width - width) / 2,
        top: (client_height - height) / 2,
        width,
        height,
    })
}

/// Returns the surface input lands on: the classic viewport when `classic`,
/// otherwise the full client rect.
fn surface(width: i32, height: i32, classic: bool) -> Result<Viewport, GeometryError> {
    if width <= 0 || height <= 0 {
        return Err(GeometryError::NoClientArea { width, height });
    }
    let full = Viewport::full(width, height);
    Ok(if classic {
        compute_classic_viewport(width, height).unwrap_or(full)
    } else {
        full
    })
}

/// Maps a client-space point of a `width` × `height` window into `[0, 1]²`.
///
/// Points outside the surface (in a letterbox bar, or outside the window)
/// saturate to the nearest edge.
///
/// # Errors
///
/// Returns [`GeometryError::NoClientArea`] for a zero-sized client area.
pub fn client_to_normalized(
    client: Point,
    width: i32,
    height: i32,
    classic: bool,
) -> Result<NormalizedPoint, GeometryError> {
    let s = surface(width, height, classic)?;
    let nx = f64::from(client.x - s.left) / f64::from(s.width);
    let ny = f64::from(client.y - s.top) / f64::from(s.height);
    Ok(NormalizedPoint {
        x: nx.clamp(0.0, 1.0),
        y: ny.clamp(0.0, 1.0),
    })
}

/// Maps a normalized point onto the client area of a `width` × `height`
/// target, clamped to the last pixel of the target's surface.
///
/// # Errors
///
/// Returns [`GeometryError::NoClientArea`] for a zero-sized client area.
pub fn normalized_to_client(
    n: NormalizedPoint,
    width: i32,
    height: i32,
    classic: bool,
) -> Result<Point, GeometryError> {
    let s = surface(width, height, classic)?;
    let x = (f64::from(s.left) + n.x * f64::from(s.width)).round_ties_even() as i32;
    let y = (f64::from(s.top) + n.y * f64::from(s.height)).round_ties_even() as i32;
    Ok(Point {
        x: x.clamp(s.left, s.left + s.width - 1),
        y: y.clamp(s.top, s.top + s.height - 1),
    })
}
