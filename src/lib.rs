//! Drag to reorder lists for egui.
//!
//! The crate is split in two layers:
//! - a headless core: [`resolver`] turns pointer geometry into an insertion side and a target
//!   index, [`session`] is the drag state machine driven by [`DragEvent`]s and [`suppress`]
//!   scopes the "drop anywhere" switch to the lifetime of a drag.
//! - [`SortableList`], which drives the core from egui input and draws the items.
//!
//! Applying the reorder to your data is left to the caller, [`utils::move_item`] does it for a
//! `Vec`.

pub use resolver::{Direction, InsertSide, ItemFlags};
pub use session::{ActiveDrag, DragEvent, DragSession, Reorder};
pub use state::{ItemProps, SortResponse, SortableItem, SortableList};
pub use suppress::{DragOverGuard, DragOverListeners};

pub mod resolver;
pub mod session;
mod state;
pub mod suppress;
pub mod utils;
