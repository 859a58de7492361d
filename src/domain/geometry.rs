/// Cell-space geometry for the desktop minigame.
///
/// Coordinates are terminal cells relative to the desktop's top-left corner.
/// Points may be negative: a pointer released left of or above the desktop
/// is still a valid (missed) drop.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle. `x..x+w` by `y..y+h`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h - 1
    }

    /// Inclusive hit test: points on every edge count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let r = Rect::new(10, 5, 4, 3);
        assert!(r.contains(Point::new(10, 5)));
        assert!(r.contains(Point::new(13, 7)));
        assert!(r.contains(Point::new(13, 5)));
        assert!(r.contains(Point::new(10, 7)));
        assert!(!r.contains(Point::new(14, 7)));
        assert!(!r.contains(Point::new(10, 8)));
        assert!(!r.contains(Point::new(9, 6)));
    }

    #[test]
    fn negative_points_are_outside() {
        let r = Rect::new(0, 0, 5, 5);
        assert!(!r.contains(Point::new(-1, 2)));
        assert!(!r.contains(Point::new(2, -1)));
    }

    #[test]
    fn center_of_rect() {
        assert_eq!(Rect::new(60, 14, 12, 5).center(), Point::new(66, 16));
    }
}
