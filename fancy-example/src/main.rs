use color_hex::color_from_hex;
use egui::{CentralPanel, Color32, Context, Frame, Margin, RichText, Stroke, Ui};
use egui_sortable::{Direction, ItemProps, SortableList};

const SEAM_COLOR: [u8; 3] = color_from_hex!("#ffff00");

#[derive(Hash)]
struct Item {
    title: String,
}

fn preset() -> Vec<Item> {
    (1..=5)
        .map(|i| Item {
            title: format!("item #{i}"),
        })
        .collect()
}

struct StoryApp {
    vertical_items: Vec<Item>,
    vertical: SortableList,
    horizontal_items: Vec<Item>,
    horizontal: SortableList,
}

impl Default for StoryApp {
    fn default() -> Self {
        Self {
            vertical_items: preset(),
            vertical: SortableList::new("vertical").without_seam(),
            horizontal_items: preset(),
            horizontal: SortableList::new("horizontal")
                .with_direction(Direction::Horizontal)
                .without_seam(),
        }
    }
}

impl eframe::App for StoryApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Vertical");
            show_list(ui, &mut self.vertical, &mut self.vertical_items);

            ui.add_space(16.0);

            ui.heading("Horizontal");
            show_list(ui, &mut self.horizontal, &mut self.horizontal_items);
        });
    }
}

fn show_list(ui: &mut Ui, list: &mut SortableList, items: &mut Vec<Item>) {
    let direction = list.direction();
    let response = list.ui(
        ui,
        items,
        |ui, item, props| item_ui(ui, item, props, direction),
        |_, _| {},
    );

    if let Some(reorder) = response.completed() {
        if let Err(err) = reorder.apply(items) {
            log::warn!("dropped a stale reorder: {err}");
        }
    }
}

/// Bordered box that turns the edge facing the insertion point yellow.
fn item_ui(ui: &mut Ui, item: &Item, props: ItemProps, direction: Direction) {
    let flags = props.flags;
    let fill = if flags.is_dragged {
        Color32::from_gray(200)
    } else {
        Color32::WHITE
    };

    let rect = Frame::none()
        .inner_margin(Margin::symmetric(10.0, 20.0))
        .fill(fill)
        .stroke(Stroke::new(2.0, Color32::BLACK))
        .show(ui, |ui| {
            ui.label(RichText::new(&item.title).color(Color32::BLACK));
        })
        .response
        .rect;

    let [r, g, b] = SEAM_COLOR;
    let seam = Stroke::new(2.0, Color32::from_rgb(r, g, b));
    let painter = ui.painter();
    let (leading, trailing) = match direction {
        Direction::Vertical => (
            [rect.left_top(), rect.right_top()],
            [rect.left_bottom(), rect.right_bottom()],
        ),
        Direction::Horizontal => (
            [rect.left_top(), rect.left_bottom()],
            [rect.right_top(), rect.right_bottom()],
        ),
    };
    if flags.insert_before {
        painter.line_segment(leading, seam);
    }
    if flags.insert_after {
        painter.line_segment(trailing, seam);
    }
}

fn main() -> Result<(), eframe::Error> {
    eframe::run_native(
        "egui_sortable stories",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Box::<StoryApp>::default()),
    )
}
