//! Tooltip positioning

/// Minimum distance from the viewport edge
pub const PADDING: f64 = 12.0;
/// Space between tooltip and target
pub const GAP: f64 = 8.0;

/// A box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Requested side, from `data-tooltip-placement`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Top,
    Left,
}

impl Placement {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("left") => Placement::Left,
            _ => Placement::Top,
        }
    }
}

/// Side the tooltip ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
    pub side: Side,
}

/// Position a tooltip of size `(width, height)` next to `target`.
///
/// Top placement is centred over the target and kept inside the viewport
/// horizontally; it moves below the target when there is no room above.
/// Left placement moves to the right of the target when there is no room
/// on the left.
pub fn place(target: Rect, width: f64, height: f64, viewport_width: f64, placement: Placement) -> Position {
    match placement {
        Placement::Left => {
            let top = target.top + target.height / 2.0 - height / 2.0;
            let left = target.left - width - GAP;
            if left < PADDING {
                Position {
                    left: target.right() + GAP,
                    top,
                    side: Side::Right,
                }
            } else {
                Position {
                    left,
                    top,
                    side: Side::Left,
                }
            }
        }
        Placement::Top => {
            let mut left = target.left + target.width / 2.0 - width / 2.0;
            if left < PADDING {
                left = PADDING;
            }
            if left + width > viewport_width - PADDING {
                left = viewport_width - width - PADDING;
            }

            let top = target.top - height - GAP;
            if top < PADDING {
                Position {
                    left,
                    top: target.bottom() + GAP,
                    side: Side::Bottom,
                }
            } else {
                Position {
                    left,
                    top,
                    side: Side::Top,
                }
            }
        }
    }
}
