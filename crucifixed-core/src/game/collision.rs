//! Collision Resolution
//!
//! Axis-separated box resolution. A mover is first shifted horizontally and
//! pushed out of anything it ran into, then the same happens vertically.
//! Only the solids passed in are considered; callers filter out open doors
//! and other passable objects beforehand.

use crate::core::rect::Rect;

/// Axis being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Left / right
    Horizontal,
    /// Up / down
    Vertical,
}

/// Result of resolving one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Committed box
    pub rect: Rect,
    /// Landed on top of a solid
    pub grounded: bool,
    /// Movement was cut short by a solid
    pub blocked: bool,
}

impl Resolution {
    fn unchanged(rect: Rect) -> Self {
        Self {
            rect,
            grounded: false,
            blocked: false,
        }
    }
}

/// Push `current` out of every solid it overlaps along one axis.
///
/// `previous` is the box before this axis' movement was applied. Touching
/// an edge exactly counts as a collision.
pub fn resolve<'a, I>(axis: Axis, previous: Rect, current: Rect, solids: I) -> Resolution
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut out = Resolution::unchanged(current);

    for solid in solids {
        if !out.rect.intersects(solid) {
            continue;
        }

        match axis {
            Axis::Horizontal => {
                if out.rect.left() <= solid.right() && previous.left() >= solid.right() {
                    out.rect.set_left(solid.right());
                    out.blocked = true;
                } else if out.rect.right() >= solid.left() && previous.right() <= solid.left() {
                    out.rect.set_right(solid.left());
                    out.blocked = true;
                }
            }
            Axis::Vertical => {
                if out.rect.bottom() >= solid.top() && previous.bottom() <= solid.top() {
                    out.rect.set_bottom(solid.top());
                    out.grounded = true;
                    out.blocked = true;
                } else if out.rect.top() <= solid.bottom() && previous.top() >= solid.bottom() {
                    out.rect.set_top(solid.bottom());
                    out.blocked = true;
                }
            }
        }
    }

    out
}

/// Move a box by `(dx, dy)`, horizontal first, resolving each axis.
pub fn move_and_collide(rect: Rect, dx: i32, dy: i32, solids: &[Rect]) -> MoveOutcome {
    let horizontal = resolve(Axis::Horizontal, rect, rect.translate(dx, 0), solids);
    let vertical = resolve(
        Axis::Vertical,
        horizontal.rect,
        horizontal.rect.translate(0, dy),
        solids,
    );

    MoveOutcome {
        rect: vertical.rect,
        grounded: vertical.grounded,
        blocked_horizontal: horizontal.blocked,
        blocked_vertical: vertical.blocked,
    }
}

/// Result of a two-axis move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Committed box
    pub rect: Rect,
    /// Landed on top of a solid
    pub grounded: bool,
    /// Horizontal movement was stopped
    pub blocked_horizontal: bool,
    /// Vertical movement was stopped
    pub blocked_vertical: bool,
}

/// Check if a box overlaps any solid.
#[inline]
pub fn overlaps_any(rect: &Rect, solids: &[Rect]) -> bool {
    solids.iter().any(|solid| rect.intersects(solid))
}

// =============================================================================
// TESTS
// =============================================================================
