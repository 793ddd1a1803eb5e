//! Left-hand panel: manifest selection, release metadata and API target.

use crossbeam_channel::Sender;
use eframe::egui;
use release_core::{
    form::{APPLICATION_SUGGESTIONS, PLATFORM_SUGGESTIONS},
    ApiTarget, ManifestForm, Workflow,
};

use crate::{
    controller::{events::UiEvent, orchestration::dispatch_ui_event},
    ui::{
        theme::{Theme, BLACK, BRIGHT_BLUE, LIGHT_BLUE, NAVY_BLUE, SLATE_BLUE, TRANSPARENT, WHITE},
        widgets::{
            light_blue_label, ButtonColors, ButtonPalette, ColoredButton, FileChooserEntry,
            FileSpec, RoundedBackground,
        },
    },
};

const NEW_BUTTON_PALETTE: ButtonPalette = ButtonPalette {
    default: ButtonColors::new(BRIGHT_BLUE, BLACK, TRANSPARENT),
    hover: ButtonColors::new(SLATE_BLUE, BLACK, TRANSPARENT),
    selected: ButtonColors::new(BRIGHT_BLUE, BLACK, TRANSPARENT),
    disabled: ButtonColors::new(BRIGHT_BLUE, BLACK, TRANSPARENT),
};

const API_BUTTON_PALETTE: ButtonPalette = ButtonPalette {
    default: ButtonColors::new(NAVY_BLUE, LIGHT_BLUE, TRANSPARENT),
    hover: ButtonColors::new(SLATE_BLUE, LIGHT_BLUE, TRANSPARENT),
    selected: ButtonColors::new(SLATE_BLUE, WHITE, BRIGHT_BLUE),
    disabled: ButtonColors::new(NAVY_BLUE, LIGHT_BLUE, TRANSPARENT),
};

const SECTION_RADIUS: u8 = 16;
const API_BLOCK_RADIUS: u8 = 4;
const API_CAPTION: &str = "API Server";

/// Placeholder text for one From/To section.
struct VersionHints {
    version: &'static str,
    build: &'static str,
}

const PLATFORM_HINT: &str = "e.g. egps";
const APPLICATION_HINT: &str = "e.g. gmed";
const FROM_HINTS: VersionHints = VersionHints {
    version: "e.g. 1.0.0",
    build: "e.g. 123",
};
const TO_HINTS: VersionHints = VersionHints {
    version: "e.g. 1.1.0",
    build: "e.g. 124",
};

pub struct InputsPanel {
    new_button: ColoredButton,
    manifest_chooser: FileChooserEntry,
    api_buttons: Vec<(ApiTarget, ColoredButton)>,
    ui_tx: Sender<UiEvent>,
}

impl InputsPanel {
    pub fn new(ui_tx: &Sender<UiEvent>, theme: &Theme) -> Self {
        let tx = ui_tx.clone();
        let mut new_button = ColoredButton::new("New", NEW_BUTTON_PALETTE, theme)
            .on_tapped(move || dispatch_ui_event(&tx, UiEvent::NewManifest));
        new_button.set_bold(true);
        new_button.set_text_size(14.0);

        let tx = ui_tx.clone();
        let manifest_chooser = FileChooserEntry::new("manifest_path", "/..", FileSpec::Json)
            .on_path_changed(move |previous| {
                dispatch_ui_event(
                    &tx,
                    UiEvent::ManifestPathChanged {
                        previous: previous.to_string(),
                    },
                )
            });

        let api_buttons = ApiTarget::ALL
            .into_iter()
            .map(|target| {
                let tx = ui_tx.clone();
                let mut button = ColoredButton::new(target.as_str(), API_BUTTON_PALETTE, theme)
                    .on_tapped(move || dispatch_ui_event(&tx, UiEvent::ApiSelected(target)));
                button.set_min_size(egui::vec2(80.0, 0.0));
                (target, button)
            })
            .collect();

        Self {
            new_button,
            manifest_chooser,
            api_buttons,
            ui_tx: ui_tx.clone(),
        }
    }

    pub fn manifest_path(&self) -> &str {
        self.manifest_chooser.path()
    }

    /// Selects `target` on the workflow and highlights only its button.
    pub fn set_selected_api(&mut self, workflow: &mut Workflow, target: ApiTarget) {
        workflow.select_api(target);
        self.sync_api_buttons(workflow.form());
    }

    fn sync_api_buttons(&mut self, form: &ManifestForm) {
        for (target, button) in &mut self.api_buttons {
            let selected = form.is_selected(*target);
            if button.is_selected() != selected {
                button.set_selected(selected);
            }
        }
    }

    /// Pulls state the workflow may have changed outside this panel.
    pub fn sync_from(&mut self, workflow: &Workflow) {
        if !self.manifest_chooser.is_open()
            && self.manifest_chooser.path() != workflow.form().manifest_path()
        {
            self.manifest_chooser
                .set_path(workflow.form().manifest_path());
        }
        self.sync_api_buttons(workflow.form());
    }

    pub fn show(&mut self, ui: &mut egui::Ui, workflow: &mut Workflow, theme: &Theme) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Package").strong().size(18.0).color(WHITE));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.new_button.show(ui);
                if ui.button("Autofill").clicked() {
                    dispatch_ui_event(&self.ui_tx, UiEvent::Autofill);
                }
            });
        });

        ui.label(light_blue_label("Manifest Path"));
        self.manifest_chooser.show(ui, theme);
        ui.add_space(4.0);

        let form = workflow.form_mut();
        ui.add_enabled_ui(form.fields_enabled(), |ui| {
            RoundedBackground::new(LIGHT_BLUE, SECTION_RADIUS).show(ui, theme, |ui| {
                ui.set_width(ui.available_width());
                ui.columns(2, |columns| {
                    select_entry(
                        &mut columns[0],
                        "Platform",
                        PLATFORM_HINT,
                        &mut form.platform,
                        &PLATFORM_SUGGESTIONS,
                    );
                    select_entry(
                        &mut columns[1],
                        "Application",
                        APPLICATION_HINT,
                        &mut form.application,
                        &APPLICATION_SUGGESTIONS,
                    );
                });
                ui.add_space(4.0);
                ui.columns(2, |columns| {
                    version_section(
                        &mut columns[0],
                        theme,
                        "From",
                        &FROM_HINTS,
                        &mut form.version_from,
                        &mut form.build_from,
                    );
                    version_section(
                        &mut columns[1],
                        theme,
                        "To",
                        &TO_HINTS,
                        &mut form.version_to,
                        &mut form.build_to,
                    );
                });
            });
        });

        ui.add_space(8.0);
        ui.label(light_blue_label(API_CAPTION));
        RoundedBackground::with_hug(LIGHT_BLUE, API_BLOCK_RADIUS).show(ui, theme, |ui| {
            ui.set_width(ui.available_width());
            ui.columns(self.api_buttons.len(), |columns| {
                for (column, (_, button)) in columns.iter_mut().zip(&mut self.api_buttons) {
                    column.vertical_centered(|ui| {
                        button.show(ui);
                    });
                }
            });
        });
    }
}

/// Free-text entry with a drop-down of suggested values.
fn select_entry(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    value: &mut String,
    suggestions: &[&str],
) {
    ui.label(light_blue_label(label));
    ui.horizontal(|ui| {
        let combo_width = 24.0;
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .desired_width((ui.available_width() - combo_width - 8.0).max(40.0)),
        );
        egui::ComboBox::from_id_salt(("select_entry", label))
            .selected_text("")
            .width(combo_width)
            .show_ui(ui, |ui| {
                for suggestion in suggestions {
                    ui.selectable_value(value, suggestion.to_string(), *suggestion);
                }
            });
    });
}

fn version_section(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    hints: &VersionHints,
    version: &mut String,
    build: &mut String,
) {
    RoundedBackground::new(LIGHT_BLUE, SECTION_RADIUS).show(ui, theme, |ui| {
        ui.set_width(ui.available_width());
        ui.label(light_blue_label(title));
        ui.columns(2, |columns| {
            columns[0].label(light_blue_label("Version"));
            columns[0].add(egui::TextEdit::singleline(version).hint_text(hints.version));
            columns[1].label(light_blue_label("Build"));
            columns[1].add(egui::TextEdit::singleline(build).hint_text(hints.build));
        });
    });
}
