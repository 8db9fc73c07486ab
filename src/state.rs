use egui::{Align, Context, CursorIcon, Id, Layout, Pos2, Rect, Sense, Ui, Vec2};
use epaint::Shape;
use std::hash::Hash;

use crate::resolver::{insert_side, Direction, ItemFlags};
use crate::session::{ActiveDrag, DragEvent, DragSession, Reorder};
use crate::suppress::{DragOverGuard, DragOverListeners};

/// Gives every item a stable egui [`Id`]. Only used for render identity, never for the
/// reordering math.
pub trait SortableItem {
    fn id(&self) -> Id;
}

impl<T: Hash> SortableItem for T {
    fn id(&self) -> Id {
        Id::new(self)
    }
}

/// What the `item_ui` callback of [`SortableList::ui`] gets to know about the item it draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemProps {
    pub index: usize,
    pub flags: ItemFlags,
}

/// State of the list after a call to [`SortableList::ui`].
/// `Dragging` can be used to update some state while the drag is in progress.
/// `Completed` is returned on the frame the drag ended with a resolved target, the same
/// [`Reorder`] that was handed to `on_sort`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortResponse {
    Idle,
    Dragging(ActiveDrag),
    Completed(Reorder),
}

impl SortResponse {
    pub fn completed(&self) -> Option<Reorder> {
        match self {
            Self::Completed(reorder) => Some(*reorder),
            _ => None,
        }
    }
}

/// Key of the [`DragOverListeners`] shared by every list of an egui [`Context`].
const LISTENERS_ID: &str = "egui_sortable::drag_over_listeners";

fn shared_listeners(ctx: &Context) -> DragOverListeners {
    ctx.data_mut(|data| {
        data.get_temp_mut_or_default::<DragOverListeners>(Id::new(LISTENERS_ID))
            .clone()
    })
}

/// [SortableList] stores the drag state of one reorderable list.
///
/// The four `*_drag`/`hover`/`update_target` methods are the whole interaction contract and can
/// be driven by any event source. [`SortableList::ui`] drives them from egui pointer input.
///
/// A `SortableList` must not be shared between lists that are shown at the same time, and lists
/// shown in the same [`Ui`] need distinct id sources.
#[derive(Debug)]
pub struct SortableList {
    id_source: Id,
    session: DragSession,
    direction: Direction,
    paint_seam: bool,
    listeners: Option<DragOverListeners>,
    /// Held exactly while `session` is dragging and `listeners` is set.
    guard: Option<DragOverGuard>,
}

impl SortableList {
    /// `id_source` must be unique among the lists shown in the same [`Ui`].
    pub fn new(id_source: impl Hash) -> Self {
        Self {
            id_source: Id::new(id_source),
            session: DragSession::Idle,
            direction: Direction::default(),
            paint_seam: true,
            listeners: None,
            guard: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Registers drags with `listeners` instead of the set shared through the egui context.
    pub fn with_listeners(mut self, listeners: DragOverListeners) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Leave drawing the insertion seam to the `item_ui` callback.
    pub fn without_seam(mut self) -> Self {
        self.paint_seam = false;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// The item at `index` started being dragged.
    pub fn begin_drag(&mut self, index: usize) {
        self.dispatch(DragEvent::DragStart { index });
    }

    /// The pointer entered the item at `index`.
    pub fn hover(&mut self, index: usize) {
        self.dispatch(DragEvent::DragEnter { index });
    }

    /// The pointer is at `pointer` over the item at `index`, whose bounds are `item_rect`.
    pub fn update_target(&mut self, index: usize, item_rect: Rect, pointer: Pos2) {
        if !self.is_dragging() {
            return;
        }
        let side = insert_side(item_rect, pointer, self.direction);
        self.dispatch(DragEvent::DragOver { index, side });
    }

    /// Ends the drag. Returns the reorder to apply, if a target was resolved.
    pub fn end_drag(&mut self) -> Option<Reorder> {
        self.dispatch(DragEvent::DragEnd)
    }

    /// Render flags of the item at `index` in a list of `len` items.
    pub fn flags(&self, index: usize, len: usize) -> ItemFlags {
        ItemFlags::resolve(&self.session, index, len)
    }

    fn dispatch(&mut self, event: DragEvent) -> Option<Reorder> {
        let (session, reorder) = self.session.handle(event);
        self.session = session;

        match (self.session.is_dragging(), self.guard.is_some()) {
            (true, false) => {
                self.guard = self.listeners.as_ref().map(DragOverListeners::acquire);
            }
            (false, true) => self.guard = None,
            _ => {}
        }
        reorder
    }

    /// Draws `items` and updates the drag state from this frame's pointer input.
    ///
    /// `item_ui` draws one item. Its arguments are:
    /// - a mutable reference to the ui
    /// - the item
    /// - the item's index and render flags
    ///
    /// The whole area drawn by `item_ui` can be dragged. `on_sort(source, target)` is called once
    /// per completed drag; `source == target` means the item was dropped back in place.
    ///
    /// # Example
    /// ```rust,no_run
    /// use eframe::egui::{CentralPanel, Context};
    /// use eframe::{App, Frame};
    /// use egui_sortable::SortableList;
    ///
    /// struct SortApp {
    ///     items: Vec<String>,
    ///     list: SortableList,
    /// }
    ///
    /// impl App for SortApp {
    ///     fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
    ///         CentralPanel::default().show(ctx, |ui| {
    ///             let response = self.list.ui(
    ///                 ui,
    ///                 &self.items,
    ///                 |ui, item, _props| {
    ///                     ui.label(item.as_str());
    ///                 },
    ///                 |_, _| {},
    ///             );
    ///             if let Some(reorder) = response.completed() {
    ///                 if let Err(err) = reorder.apply(&mut self.items) {
    ///                     log::warn!("dropped a stale reorder: {err}");
    ///                 }
    ///             }
    ///         });
    ///     }
    /// }
    ///
    /// fn main() -> Result<(), eframe::Error> {
    ///     eframe::run_native(
    ///         "Sortable",
    ///         eframe::NativeOptions::default(),
    ///         Box::new(|_| {
    ///             Box::new(SortApp {
    ///                 items: ["a", "b", "c"].into_iter().map(String::from).collect(),
    ///                 list: SortableList::new("items"),
    ///             })
    ///         }),
    ///     )
    /// }
    /// ```
    pub fn ui<T: SortableItem>(
        &mut self,
        ui: &mut Ui,
        items: &[T],
        mut item_ui: impl FnMut(&mut Ui, &T, ItemProps),
        mut on_sort: impl FnMut(usize, usize),
    ) -> SortResponse {
        if self.listeners.is_none() {
            self.listeners = Some(shared_listeners(ui.ctx()));
        }

        let list_id = ui.make_persistent_id(self.id_source);
        let len = items.len();
        let direction = self.direction;
        let paint_seam = self.paint_seam;
        let pointer = ui.ctx().pointer_hover_pos();
        let layout = match direction {
            Direction::Vertical => Layout::top_down(Align::Min),
            Direction::Horizontal => Layout::left_to_right(Align::Min),
        };

        let is_drop_target = self.is_dragging();
        Self::draw_list(ui, is_drop_target, layout, |ui| {
            for (index, item) in items.iter().enumerate() {
                let flags = self.flags(index, len);
                let props = ItemProps { index, flags };

                // the dragged item stays in place, drawn disabled
                let rect = if flags.is_dragged {
                    ui.add_enabled_ui(false, |ui| item_ui(ui, item, props))
                        .response
                        .rect
                } else {
                    ui.scope(|ui| item_ui(ui, item, props)).response.rect
                };

                let response = ui.interact(rect, list_id.with(item.id()), Sense::drag());
                if response.hovered() && !self.is_dragging() {
                    ui.output_mut(|o| o.cursor_icon = CursorIcon::Grab);
                }
                if response.drag_started() {
                    self.begin_drag(index);
                }

                if let Some(pointer) = pointer.filter(|pos| rect.contains(*pos)) {
                    let hovered = self.session.active().and_then(|drag| drag.hovered);
                    if self.is_dragging() && hovered != Some(index) {
                        self.hover(index);
                    }
                    self.update_target(index, rect, pointer);
                }

                if paint_seam {
                    Self::draw_seam(ui, rect, direction, flags);
                }
            }
        });

        let suppressed = self
            .listeners
            .as_ref()
            .is_some_and(DragOverListeners::is_suppressed);
        if suppressed {
            // a drag is running somewhere, the whole window accepts the drop
            ui.output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);
        }

        if self.is_dragging() {
            let released = ui.input(|i| i.pointer.any_released());
            let still_dragging = ui.memory(|mem| mem.is_anything_being_dragged());
            if released || !still_dragging {
                return match self.end_drag() {
                    Some(reorder) => {
                        on_sort(reorder.source, reorder.target);
                        SortResponse::Completed(reorder)
                    }
                    None => SortResponse::Idle,
                };
            }
        }

        match self.session {
            DragSession::Idle => SortResponse::Idle,
            DragSession::Dragging(drag) => SortResponse::Dragging(drag),
        }
    }

    /// Draw a line in the gap on the leading or trailing edge of `rect`.
    fn draw_seam(ui: &Ui, rect: Rect, direction: Direction, flags: ItemFlags) {
        let stroke = ui.visuals().selection.stroke;
        let gap = ui.spacing().item_spacing * 0.5;
        let painter = ui.painter();

        let edge = |a: Pos2, b: Pos2| painter.line_segment([a, b], stroke);
        match direction {
            Direction::Vertical => {
                if flags.insert_before {
                    let y = rect.top() - gap.y;
                    edge(Pos2::new(rect.left(), y), Pos2::new(rect.right(), y));
                }
                if flags.insert_after {
                    let y = rect.bottom() + gap.y;
                    edge(Pos2::new(rect.left(), y), Pos2::new(rect.right(), y));
                }
            }
            Direction::Horizontal => {
                if flags.insert_before {
                    let x = rect.left() - gap.x;
                    edge(Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom()));
                }
                if flags.insert_after {
                    let x = rect.right() + gap.x;
                    edge(Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom()));
                }
            }
        }
    }

    /// Draw the list body on a background that lights up while this list has a drag running.
    fn draw_list(
        ui: &mut Ui,
        is_drop_target: bool,
        layout: Layout,
        list_body: impl FnOnce(&mut Ui),
    ) {
        let margin = Vec2::splat(4.0);

        let outer_rect_bounds = ui.available_rect_before_wrap();
        let inner_rect = outer_rect_bounds.shrink2(margin);
        let where_to_put_background = ui.painter().add(Shape::Noop);

        let mut content_ui = ui.child_ui(inner_rect, layout);

        list_body(&mut content_ui);
        let outer_rect =
            Rect::from_min_max(outer_rect_bounds.min, content_ui.min_rect().max + margin);
        let (rect, _response) = ui.allocate_at_least(outer_rect.size(), Sense::hover());

        let style = if is_drop_target && ui.rect_contains_pointer(rect) {
            ui.visuals().widgets.active
        } else {
            ui.visuals().widgets.inactive
        };

        ui.painter().set(
            where_to_put_background,
            Shape::Vec(vec![
                Shape::rect_filled(rect, style.rounding, style.bg_fill),
                Shape::rect_stroke(rect, style.rounding, style.bg_stroke),
            ]),
        );
    }
}
