use std::path::Path;

use eframe::egui;

use crate::ui::theme::{ColorToken, Theme};

use super::ui_in_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSpec {
    /// A single `.json` file.
    Json,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChooserAction {
    Open,
    Cancel,
}

/// Path field that opens a chooser modal with manual entry and a native
/// picker.
pub struct FileChooserEntry {
    id: egui::Id,
    path: String,
    placeholder: String,
    spec: FileSpec,
    hovered: bool,
    // Text of the open modal's field; `None` while closed.
    draft: Option<String>,
    on_path_changed: Option<Box<dyn FnMut(&str)>>,
}

impl FileChooserEntry {
    pub fn new(id_salt: impl std::hash::Hash, placeholder: impl Into<String>, spec: FileSpec) -> Self {
        Self {
            id: egui::Id::new(id_salt),
            path: String::new(),
            placeholder: placeholder.into(),
            spec,
            hovered: false,
            draft: None,
            on_path_changed: None,
        }
    }

    /// `callback` receives the path that was replaced.
    pub fn on_path_changed(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_path_changed = Some(Box::new(callback));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Updates the shown path without notifying.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn open_chooser(&mut self) {
        self.draft = Some(self.path.clone());
    }

    /// Writes a picked path into the open modal's field.
    pub fn set_draft(&mut self, path: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            *draft = path.into();
        }
    }

    /// Commits the field and closes. Does nothing while the field is empty.
    pub fn confirm(&mut self) -> bool {
        let Some(draft) = self.draft.as_deref() else {
            return false;
        };
        let draft = draft.trim();
        if draft.is_empty() {
            return false;
        }
        let previous = std::mem::replace(&mut self.path, draft.to_string());
        self.draft = None;
        if let Some(callback) = self.on_path_changed.as_mut() {
            callback(&previous);
        }
        true
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    fn display_text(&self) -> &str {
        if self.path.is_empty() {
            &self.placeholder
        } else {
            &self.path
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) -> egui::Response {
        let height = ui.spacing().interact_size.y + 8.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width().max(100.0), height),
            egui::Sense::click(),
        );
        self.hovered = response.hovered();

        if ui.is_rect_visible(rect) {
            let fill = if self.hovered {
                theme.fg(ColorToken::Hover)
            } else {
                theme.fg(ColorToken::InputBackground)
            };
            let radius = egui::CornerRadius::same(6);
            ui.painter().rect_filled(rect, radius, fill);
            ui.painter().rect_stroke(
                rect,
                radius,
                egui::Stroke::new(1.0, theme.fg(ColorToken::InputBorder)),
                egui::StrokeKind::Inside,
            );

            let icon_width = 28.0;
            ui.painter().text(
                egui::pos2(rect.right() - icon_width / 2.0, rect.center().y),
                egui::Align2::CENTER_CENTER,
                "🔍",
                egui::TextStyle::Button.resolve(ui.style()),
                theme.fg(ColorToken::Foreground),
            );

            let text_rect = egui::Rect::from_min_max(
                rect.min + egui::vec2(10.0, 0.0),
                egui::pos2(rect.right() - icon_width, rect.bottom()),
            );
            let text = self.display_text().to_string();
            ui_in_rect(ui, text_rect, egui::Layout::left_to_right(egui::Align::Center), |ui| {
                ui.add(egui::Label::new(text).truncate().selectable(false));
            });
        }

        if response.clicked() {
            self.open_chooser();
        }
        if self.is_open() {
            self.show_modal(ui.ctx());
        }

        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    }

    fn show_modal(&mut self, ctx: &egui::Context) {
        let spec = self.spec;
        let Some(draft) = self.draft.as_mut() else {
            return;
        };

        let mut action = None;
        let mut browse_clicked = false;
        let modal = egui::Modal::new(self.id.with("chooser_modal")).show(ctx, |ui| {
            ui.set_width(400.0);
            ui.heading("Choose Path");
            ui.add(
                egui::TextEdit::singleline(draft)
                    .hint_text("Enter path manually (optional)")
                    .desired_width(f32::INFINITY),
            );
            browse_clicked = ui.button("Browse...").clicked();
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("✖ Cancel").clicked() {
                    action = Some(ChooserAction::Cancel);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✔ Open").clicked() {
                        action = Some(ChooserAction::Open);
                    }
                });
            });
        });
        if modal.should_close() && action.is_none() {
            action = Some(ChooserAction::Cancel);
        }
        if browse_clicked {
            if let Some(picked) = browse(spec, self.draft().unwrap_or_default()) {
                self.set_draft(picked);
            }
        }

        match action {
            Some(ChooserAction::Open) => {
                self.confirm();
            }
            Some(ChooserAction::Cancel) => self.cancel(),
            None => {}
        }
    }
}

/// Native picker starting next to `current` when it names something on disk.
fn browse(spec: FileSpec, current: &str) -> Option<String> {
    let mut dialog = rfd::FileDialog::new();
    let current = Path::new(current.trim());
    let start = if current.is_dir() {
        Some(current)
    } else {
        current.parent().filter(|parent| parent.is_dir())
    };
    if let Some(dir) = start {
        dialog = dialog.set_directory(dir);
    }

    let picked = match spec {
        FileSpec::Json => dialog.add_filter("JSON", &["json"]).pick_file(),
        FileSpec::Directory => dialog.pick_folder(),
    };
    picked.map(|path| path.to_string_lossy().into_owned())
}
