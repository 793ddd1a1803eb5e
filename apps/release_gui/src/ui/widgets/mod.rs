//! Custom widgets: coloured buttons, path choosers and rounded outlines.

pub mod colored_button;
pub mod file_chooser;
pub mod rounded_background;

pub use colored_button::{ButtonColors, ButtonPalette, ColoredButton};
pub use file_chooser::{FileChooserEntry, FileSpec};
pub use rounded_background::{light_blue_label, step_arrow, RoundedBackground};

use eframe::egui;

/// Runs `add` in a child ui confined and clipped to `rect`.
pub(crate) fn ui_in_rect(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    layout: egui::Layout,
    add: impl FnOnce(&mut egui::Ui),
) {
    let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect).layout(layout));
    child.set_clip_rect(rect);
    add(&mut child);
}
