//! Pure geometry and index arithmetic behind a reorder gesture.
//!
//! Nothing in here needs a [`egui::Ui`]: the functions take plain rects, points and indices,
//! so they can be driven from tests or from any other rendering layer.

use egui::{Pos2, Rect};

use crate::session::DragSession;

/// Axis along which the list is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Items stacked top to bottom, split on the y axis.
    #[default]
    Vertical,
    /// Items placed left to right, split on the x axis.
    Horizontal,
}

/// Which side of the hovered item the dragged item would land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertSide {
    Before,
    After,
}

/// Splits `item_rect` at its midpoint along `direction` and reports which half `pointer` is in.
///
/// A pointer exactly on the midpoint counts as [`InsertSide::After`].
pub fn insert_side(item_rect: Rect, pointer: Pos2, direction: Direction) -> InsertSide {
    let before = match direction {
        Direction::Vertical => pointer.y < item_rect.top() + item_rect.height() / 2.0,
        Direction::Horizontal => pointer.x < item_rect.left() + item_rect.width() / 2.0,
    };

    if before {
        InsertSide::Before
    } else {
        InsertSide::After
    }
}

/// Index the dragged item would occupy after being removed from `source` and reinserted next to
/// the item at `index`.
///
/// Dragging forward closes the gap left at `source` first, so the same side maps to a smaller
/// index than when dragging backward.
pub fn target_index(side: InsertSide, source: usize, index: usize) -> usize {
    if source == index {
        return index;
    }

    if source < index {
        return match side {
            InsertSide::Before => index.saturating_sub(1),
            InsertSide::After => index,
        };
    }

    match side {
        InsertSide::Before => index,
        InsertSide::After => index + 1,
    }
}

/// Whether the insertion seam sits on the leading edge of the item at `index`.
pub fn insert_before(source: Option<usize>, target: Option<usize>, index: usize) -> bool {
    let (Some(source), Some(target)) = (source, target) else {
        return false;
    };

    if target >= source {
        index.checked_sub(1) == Some(target)
    } else {
        target == index
    }
}

/// Whether the insertion seam sits on the trailing edge of the item at `index`.
pub fn insert_after(source: Option<usize>, target: Option<usize>, index: usize) -> bool {
    let (Some(source), Some(target)) = (source, target) else {
        return false;
    };

    if target > source {
        target == index
    } else {
        index.checked_add(1) == Some(target)
    }
}

/// Render flags for a single item, recomputed from the session on every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemFlags {
    /// This is the item being dragged.
    pub is_dragged: bool,
    /// Paint the insertion seam on this item's leading edge.
    pub insert_before: bool,
    /// Paint the insertion seam on this item's trailing edge.
    pub insert_after: bool,
    /// The pointer most recently entered this item.
    pub is_hovered: bool,
}

impl ItemFlags {
    /// Derives the flags of the item at `index` in a list of `len` items.
    ///
    /// Session indices past the end of the list (the list shrank mid-drag) never match anything.
    pub fn resolve(session: &DragSession, index: usize, len: usize) -> Self {
        let DragSession::Dragging(drag) = session else {
            return Self::default();
        };

        let live = |i: usize| (i < len).then_some(i);
        let source = live(drag.source);
        let target = drag.target.and_then(live);

        Self {
            is_dragged: source == Some(index),
            insert_before: insert_before(source, target, index),
            insert_after: insert_after(source, target, index),
            is_hovered: drag.hovered.and_then(live) == Some(index),
        }
    }
}
