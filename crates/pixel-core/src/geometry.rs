//! Placement of the follow-the-cursor window.

use crate::{Point, Size};

/// Gap between the cursor and the window, in pixels.
pub const CURSOR_BUFFER: i32 = 10;

/// Top-left corner for a window of `window` size tracking `cursor`.
///
/// The window sits below-right of the cursor. On each axis independently, if
/// that would push the far edge past the screen, it flips to the other side.
pub fn place_near_cursor(cursor: Point, window: Size, screen: Size) -> Point {
    Point::new(
        place_axis(cursor.x, window.width, screen.width),
        place_axis(cursor.y, window.height, screen.height),
    )
}

fn place_axis(cursor: i32, extent: i32, screen: i32) -> i32 {
    let forward = cursor + CURSOR_BUFFER;
    if forward + extent > screen {
        cursor - extent - CURSOR_BUFFER
    } else {
        forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size {
        width: 1920,
        height: 1080,
    };
    const WINDOW: Size = Size {
        width: 240,
        height: 130,
    };

    fn inside(pos: Point) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x + WINDOW.width <= SCREEN.width
            && pos.y + WINDOW.height <= SCREEN.height
    }

    #[test]
    fn test_top_left_no_flip() {
        let pos = place_near_cursor(Point::new(5, 5), WINDOW, SCREEN);
        assert_eq!(pos, Point::new(15, 15));
    }

    #[test]
    fn test_bottom_right_flips_both_axes() {
        let cursor = Point::new(SCREEN.width - 5, SCREEN.height - 5);
        let pos = place_near_cursor(cursor, WINDOW, SCREEN);
        assert_eq!(pos, Point::new(cursor.x - 250, cursor.y - 140));
        assert!(inside(pos));
    }

    #[test]
    fn test_axes_flip_independently() {
        let right_edge = place_near_cursor(Point::new(1900, 100), WINDOW, SCREEN);
        assert_eq!(right_edge, Point::new(1900 - 250, 110));

        let bottom_edge = place_near_cursor(Point::new(100, 1000), WINDOW, SCREEN);
        assert_eq!(bottom_edge, Point::new(110, 1000 - 140));
    }

    #[test]
    fn test_exact_fit_does_not_flip() {
        let cursor = Point::new(SCREEN.width - WINDOW.width - CURSOR_BUFFER, 0);
        let pos = place_near_cursor(cursor, WINDOW, SCREEN);
        assert_eq!(pos.x, SCREEN.width - WINDOW.width);
        assert!(inside(pos));
    }

    #[test]
    fn test_every_corner_stays_on_screen() {
        let corners = [
            Point::new(0, 0),
            Point::new(SCREEN.width - 1, 0),
            Point::new(0, SCREEN.height - 1),
            Point::new(SCREEN.width - 1, SCREEN.height - 1),
        ];
        for cursor in corners {
            assert!(inside(place_near_cursor(cursor, WINDOW, SCREEN)), "{cursor:?}");
        }
    }
}
