use crate::resolver::{target_index, InsertSide};
use crate::utils::{move_item, MoveError};

/// Indices tracked while an item is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveDrag {
    /// Index of the dragged item in the list as it was when the drag began.
    pub source: usize,
    /// Item the pointer entered most recently.
    pub hovered: Option<usize>,
    /// Index the dragged item would end up at if dropped now.
    pub target: Option<usize>,
}

/// State of a single drag gesture on one list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Input that moves a [`DragSession`] along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEvent {
    /// The item at `index` started being dragged.
    DragStart { index: usize },
    /// The pointer entered the item at `index`.
    DragEnter { index: usize },
    /// The pointer moved over the item at `index`, on its `side`.
    DragOver { index: usize, side: InsertSide },
    /// The gesture finished, whether by a drop or an abort.
    DragEnd,
}

/// Request to move the item at `source` so that it ends up at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reorder {
    pub source: usize,
    pub target: usize,
}

impl Reorder {
    /// A drop back onto the dragged item's own slot.
    pub fn is_noop(&self) -> bool {
        self.source == self.target
    }

    /// Applies the move to `items`. See [`move_item`].
    pub fn apply<T>(&self, items: &mut Vec<T>) -> Result<(), MoveError> {
        move_item(items, self.source, self.target)
    }
}

impl DragSession {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// The in-progress drag, if any.
    pub fn active(&self) -> Option<&ActiveDrag> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(drag),
        }
    }

    /// Computes the next session state for `event`.
    ///
    /// A [`Reorder`] is returned only by [`DragEvent::DragEnd`], and only when a target was
    /// resolved during the drag. `DragEnd` always lands in [`DragSession::Idle`].
    pub fn handle(self, event: DragEvent) -> (Self, Option<Reorder>) {
        match (self, event) {
            (_, DragEvent::DragStart { index }) => {
                log::trace!("drag started at {index}");
                let drag = ActiveDrag {
                    source: index,
                    hovered: None,
                    target: None,
                };
                (Self::Dragging(drag), None)
            }
            (Self::Dragging(mut drag), DragEvent::DragEnter { index }) => {
                drag.hovered = Some(index);
                (Self::Dragging(drag), None)
            }
            (Self::Dragging(mut drag), DragEvent::DragOver { index, side }) => {
                let target = target_index(side, drag.source, index);
                if drag.target != Some(target) {
                    log::trace!("drag target {} -> {target}", drag.source);
                }
                drag.target = Some(target);
                (Self::Dragging(drag), None)
            }
            (Self::Dragging(drag), DragEvent::DragEnd) => {
                let reorder = drag.target.map(|target| Reorder {
                    source: drag.source,
                    target,
                });
                match reorder {
                    Some(reorder) => log::debug!("reorder {} -> {}", reorder.source, reorder.target),
                    None => log::trace!("drag at {} ended without a target", drag.source),
                }
                (Self::Idle, reorder)
            }
            (Self::Idle, _) => (Self::Idle, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[DragEvent]) -> (DragSession, Vec<Reorder>) {
        let mut session = DragSession::default();
        let mut emitted = Vec::new();
        for event in events {
            let (next, reorder) = session.handle(*event);
            session = next;
            emitted.extend(reorder);
        }
        (session, emitted)
    }

    #[test]
    fn starts_idle() {
        let session = DragSession::default();
        assert!(!session.is_dragging());
        assert!(session.active().is_none());
    }

    #[test]
    fn drag_start_records_source() {
        let (session, _) = DragSession::Idle.handle(DragEvent::DragStart { index: 2 });
        assert_eq!(
            session.active(),
            Some(&ActiveDrag {
                source: 2,
                hovered: None,
                target: None
            })
        );
    }

    #[test]
    fn drag_start_replaces_previous_drag() {
        let (session, emitted) = run(&[
            DragEvent::DragStart { index: 0 },
            DragEvent::DragOver {
                index: 2,
                side: InsertSide::After,
            },
            DragEvent::DragStart { index: 3 },
        ]);
        assert!(emitted.is_empty());
        assert_eq!(session.active().map(|d| (d.source, d.target)), Some((3, None)));
    }

    #[test]
    fn hover_and_target_update_while_dragging() {
        let (session, _) = run(&[
            DragEvent::DragStart { index: 1 },
            DragEvent::DragEnter { index: 3 },
            DragEvent::DragOver {
                index: 3,
                side: InsertSide::Before,
            },
        ]);
        let drag = session.active().copied().unwrap();
        assert_eq!(drag.hovered, Some(3));
        assert_eq!(drag.target, Some(2));
    }

    #[test]
    fn latest_drag_over_wins() {
        let (session, _) = run(&[
            DragEvent::DragStart { index: 4 },
            DragEvent::DragOver {
                index: 0,
                side: InsertSide::Before,
            },
            DragEvent::DragOver {
                index: 2,
                side: InsertSide::After,
            },
        ]);
        assert_eq!(session.active().and_then(|d| d.target), Some(3));
    }

    #[test]
    fn hover_events_are_ignored_when_idle() {
        let (session, emitted) = run(&[
            DragEvent::DragEnter { index: 1 },
            DragEvent::DragOver {
                index: 1,
                side: InsertSide::After,
            },
        ]);
        assert_eq!(session, DragSession::Idle);
        assert!(emitted.is_empty());
    }

    #[test]
    fn drag_end_emits_resolved_target() {
        let (session, emitted) = run(&[
            DragEvent::DragStart { index: 0 },
            DragEvent::DragOver {
                index: 3,
                side: InsertSide::After,
            },
            DragEvent::DragEnd,
        ]);
        assert_eq!(session, DragSession::Idle);
        assert_eq!(emitted, vec![Reorder { source: 0, target: 3 }]);
    }

    #[test]
    fn drag_end_without_target_emits_nothing() {
        let (session, emitted) = run(&[
            DragEvent::DragStart { index: 2 },
            DragEvent::DragEnter { index: 2 },
            DragEvent::DragEnd,
        ]);
        assert_eq!(session, DragSession::Idle);
        assert!(emitted.is_empty());
    }

    #[test]
    fn self_drop_emits_noop_reorder() {
        let (_, emitted) = run(&[
            DragEvent::DragStart { index: 1 },
            DragEvent::DragOver {
                index: 1,
                side: InsertSide::Before,
            },
            DragEvent::DragEnd,
        ]);
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].is_noop());
    }

    #[test]
    fn repeated_drag_end_is_idempotent() {
        let (session, emitted) = run(&[
            DragEvent::DragStart { index: 0 },
            DragEvent::DragEnd,
            DragEvent::DragEnd,
        ]);
        assert_eq!(session, DragSession::Idle);
        assert!(emitted.is_empty());
    }

    #[test]
    fn reorder_apply_moves_item() {
        let mut items = vec!['a', 'b', 'c'];
        Reorder { source: 2, target: 0 }.apply(&mut items).unwrap();
        assert_eq!(items, vec!['c', 'a', 'b']);
    }
}
