/// Signed point in desktop coordinates. Windows may sit partially offscreen,
/// so origins are signed even though the viewport itself is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Window geometry: signed origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl WinRect {
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width as i32
            && point.y >= self.y
            && point.y < self.y + self.height as i32
    }
}

/// Current desktop bounds as reported by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Supplies current desktop bounds on demand. The core queries this at every
/// placement and clamp decision rather than caching a stale size.
pub trait ViewportProvider {
    fn bounds(&self) -> Viewport;
}

/// Fixed-size provider for tests and headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub Viewport);

impl ViewportProvider for FixedViewport {
    fn bounds(&self) -> Viewport {
        self.0
    }
}

/// Centers `size` inside `viewport`, clamped so the window keeps a margin
/// from the top-left edges. `bias` nudges the vertical center upward to
/// account for the top bar.
pub fn centered_origin(size: Size, viewport: Viewport, margin: i32, bias: i32) -> Point {
    let x = ((viewport.width as i32 - size.width as i32) / 2).max(margin);
    let y = ((viewport.height as i32 - size.height as i32) / 2 - bias).max(margin);
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_origin_centers_inside_viewport() {
        let origin = centered_origin(
            Size::new(400, 300),
            Viewport::new(1000, 800),
            20,
            40,
        );
        assert_eq!(origin, Point::new(300, 210));
    }

    #[test]
    fn centered_origin_clamps_to_margin_when_oversized() {
        let origin = centered_origin(
            Size::new(900, 700),
            Viewport::new(640, 480),
            20,
            40,
        );
        assert_eq!(origin, Point::new(20, 20));
    }

    #[test]
    fn winrect_contains_is_origin_inclusive() {
        let rect = WinRect {
            x: -5,
            y: 10,
            width: 20,
            height: 10,
        };
        assert!(rect.contains(Point::new(-5, 10)));
        assert!(rect.contains(Point::new(14, 19)));
        assert!(!rect.contains(Point::new(15, 10)));
        assert!(!rect.contains(Point::new(-6, 10)));
    }
}
