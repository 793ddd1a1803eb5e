use std::{collections::VecDeque, path::PathBuf};

use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;
use release_core::{Workflow, WorkflowStep};

use crate::{
    controller::{
        events::UiEvent,
        orchestration::{dialogs_for, dispatch_ui_event, Dialog},
    },
    ui::{
        panels::{ArtifactsPanel, InputsPanel},
        theme::{ColorToken, Theme, LIGHT_BLUE, MUTED_BLUE, NAVY_BLUE, SLATE_BLUE, TRANSPARENT, WHITE},
        widgets::{step_arrow, ButtonColors, ButtonPalette, ColoredButton, RoundedBackground},
    },
};

const UI_EVENT_QUEUE_CAPACITY: usize = 64;
const STEP_BUTTON_RADIUS: u8 = 4;
const STEP_BUTTON_PALETTE: ButtonPalette = ButtonPalette {
    default: ButtonColors::new(NAVY_BLUE, WHITE, TRANSPARENT),
    hover: ButtonColors::new(SLATE_BLUE, WHITE, TRANSPARENT),
    selected: ButtonColors::new(NAVY_BLUE, WHITE, TRANSPARENT),
    disabled: ButtonColors::new(NAVY_BLUE, MUTED_BLUE, TRANSPARENT),
};
// Half of the default window width.
const ARTIFACTS_PANEL_WIDTH: f32 = 500.0;
const RELOCATE_TITLE: &str = "Select Manifest Directory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelocateChoice {
    ChooseNew,
    KeepCurrent,
}

pub struct ReleaseManagerApp {
    workflow: Workflow,
    working_dir: PathBuf,
    theme: Theme,
    theme_applied: bool,
    ui_tx: Sender<UiEvent>,
    ui_rx: Receiver<UiEvent>,
    inputs: InputsPanel,
    artifacts: ArtifactsPanel,
    // Footer order: Sign, Stage, Publish.
    step_buttons: Vec<(WorkflowStep, ColoredButton)>,
    dialogs: VecDeque<Dialog>,
}

impl ReleaseManagerApp {
    /// `working_dir` is where newly created manifests are named.
    pub fn new(workflow: Workflow, working_dir: PathBuf) -> Self {
        let theme = Theme::default();
        let (ui_tx, ui_rx) = bounded(UI_EVENT_QUEUE_CAPACITY);
        let inputs = InputsPanel::new(&ui_tx, &theme);
        let artifacts = ArtifactsPanel::new(&ui_tx);
        let step_buttons = [
            (WorkflowStep::Sign, UiEvent::Sign),
            (WorkflowStep::Stage, UiEvent::Stage),
            (WorkflowStep::Publish, UiEvent::Publish),
        ]
        .into_iter()
        .map(|(step, event)| {
            let tx = ui_tx.clone();
            let label = match step {
                WorkflowStep::Sign => "Sign",
                WorkflowStep::Stage => "Stage",
                WorkflowStep::Publish => "Publish",
                WorkflowStep::Create => "Create",
            };
            let button = ColoredButton::new(label, STEP_BUTTON_PALETTE, &theme)
                .on_tapped(move || dispatch_ui_event(&tx, event.clone()));
            (step, button)
        })
        .collect();
        let mut app = Self {
            workflow,
            working_dir,
            theme,
            theme_applied: false,
            ui_tx,
            ui_rx,
            inputs,
            artifacts,
            step_buttons,
            dialogs: VecDeque::new(),
        };
        app.sync_step_buttons();
        app
    }

    /// Stage and Publish stay disabled until the current manifest is signed.
    fn sync_step_buttons(&mut self) {
        let stage_publish_enabled = self.workflow.stage_publish_enabled();
        for (step, button) in &mut self.step_buttons {
            let enabled = *step == WorkflowStep::Sign || stage_publish_enabled;
            button.set_disabled(!enabled);
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let theme = Theme::for_egui_theme(ctx.theme());
        if self.theme_applied && theme == self.theme {
            return;
        }
        theme.apply(ctx);
        self.theme = theme;
        self.theme_applied = true;
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            tracing::debug!(event = event.name(), "handling ui event");
            match event {
                UiEvent::NewManifest => self.workflow.new_manifest(),
                UiEvent::Autofill => self.workflow.autofill(),
                UiEvent::ApiSelected(target) => {
                    self.inputs.set_selected_api(&mut self.workflow, target);
                }
                UiEvent::ManifestPathChanged { previous } => {
                    let path = self.inputs.manifest_path().to_string();
                    if let Err(err) = self.workflow.load_manifest(&path) {
                        tracing::warn!(path = %path, previous = %previous, "manifest rejected");
                        self.dialogs.extend(dialogs_for(Err(err)));
                    }
                }
                UiEvent::ArtifactPathChanged { previous } => {
                    let path = self.artifacts.artifact_path().to_string();
                    tracing::info!(path = %path, previous = %previous, "artifact directory changed");
                    self.workflow.set_artifact_path(path);
                }
                UiEvent::Sign => {
                    let result = self.workflow.sign(&self.working_dir);
                    self.dialogs.extend(dialogs_for(result));
                }
                UiEvent::Stage => {
                    let result = self.workflow.stage();
                    self.dialogs.extend(dialogs_for(result));
                }
                UiEvent::Publish => {
                    let result = self.workflow.publish();
                    self.dialogs.extend(dialogs_for(result));
                }
                UiEvent::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
        self.inputs.sync_from(&self.workflow);
        self.artifacts.sync_from(&self.workflow);
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(self.theme.fg(ColorToken::HeaderBackground))
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Release Package Manager")
                            .strong()
                            .size(24.0)
                            .color(WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(egui::Button::new("✖").frame(false))
                            .on_hover_text("Quit")
                            .clicked()
                        {
                            dispatch_ui_event(&self.ui_tx, UiEvent::Quit);
                        }
                    });
                });
                let (rule, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 1.0),
                    egui::Sense::hover(),
                );
                ui.painter()
                    .hline(rule.x_range(), rule.center().y, egui::Stroke::new(1.0, LIGHT_BLUE));
            });
    }

    fn show_footer(&mut self, ui: &mut egui::Ui) {
        let mut force = self.workflow.force();
        let hug = RoundedBackground::with_hug(LIGHT_BLUE, STEP_BUTTON_RADIUS);
        self.sync_step_buttons();

        ui.horizontal(|ui| {
            if ui.checkbox(&mut force, "Force").changed() {
                tracing::debug!(force, "force toggled");
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Right-to-left: Publish is laid out first.
                for (index, (_, button)) in self.step_buttons.iter_mut().rev().enumerate() {
                    if index > 0 {
                        step_arrow(ui, LIGHT_BLUE);
                    }
                    hug.show(ui, &self.theme, |ui| button.show(ui));
                }
            });
        });
        self.workflow.set_force(force);
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        let padding = egui::Margin::same(8);
        egui::SidePanel::right("artifacts_panel")
            .resizable(true)
            .default_width(ARTIFACTS_PANEL_WIDTH)
            .frame(
                egui::Frame::new()
                    .fill(self.theme.fg(ColorToken::Background))
                    .inner_margin(padding),
            )
            .show(ctx, |ui| {
                self.artifacts.show(ui, &self.theme);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(self.theme.fg(ColorToken::Background))
                    .inner_margin(padding),
            )
            .show(ctx, |ui| {
                egui::TopBottomPanel::bottom("workflow_steps")
                    .frame(egui::Frame::NONE.inner_margin(egui::Margin::symmetric(0, 6)))
                    .show_separator_line(false)
                    .show_inside(ui, |ui| self.show_footer(ui));
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.inputs.show(ui, &mut self.workflow, &self.theme);
                });
            });
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialogs.front().cloned() else {
            return;
        };
        let dismissed = match &dialog {
            Dialog::Error(err) => message_modal(
                ctx,
                "error_dialog",
                dialog_title(&dialog),
                err.message(),
                Some(self.theme.fg(ColorToken::Error)),
            ),
            Dialog::Info(message) => {
                message_modal(ctx, "info_dialog", dialog_title(&dialog), message, None)
            }
            Dialog::RelocatePrompt => match relocate_modal(ctx, self.workflow.form().manifest_path()) {
                Some(choice) => {
                    self.handle_relocate_choice(choice);
                    true
                }
                None => false,
            },
        };
        if dismissed {
            self.dialogs.pop_front();
        }
    }

    fn handle_relocate_choice(&mut self, choice: RelocateChoice) {
        match choice {
            RelocateChoice::KeepCurrent => self.workflow.keep_manifest_location(),
            RelocateChoice::ChooseNew => {
                let Some(dir) = rfd::FileDialog::new().pick_folder() else {
                    tracing::debug!("manifest relocation cancelled");
                    return;
                };
                if let Err(err) = self.workflow.relocate_manifest(&dir) {
                    self.dialogs.extend(dialogs_for(Err(err)));
                }
            }
        }
    }
}

/// Returns `true` once the user dismisses the dialog.
fn dialog_title(dialog: &Dialog) -> &'static str {
    match dialog {
        Dialog::Error(err) => err.title(),
        Dialog::Info(_) => "Success",
        Dialog::RelocatePrompt => RELOCATE_TITLE,
    }
}

fn message_modal(
    ctx: &egui::Context,
    id: &str,
    title: &str,
    message: &str,
    title_color: Option<egui::Color32>,
) -> bool {
    let mut ok = false;
    let modal = egui::Modal::new(egui::Id::new(id)).show(ctx, |ui| {
        ui.set_max_width(420.0);
        let mut heading = egui::RichText::new(title).strong().size(18.0);
        if let Some(color) = title_color {
            heading = heading.color(color);
        }
        ui.label(heading);
        ui.add_space(6.0);
        ui.label(message);
        ui.add_space(12.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ok = ui.button("OK").clicked();
        });
    });
    ok || modal.should_close()
}

fn relocate_modal(ctx: &egui::Context, current_path: &str) -> Option<RelocateChoice> {
    let mut choice = None;
    let modal = egui::Modal::new(egui::Id::new("relocate_manifest")).show(ctx, |ui| {
        ui.set_max_width(460.0);
        ui.label(egui::RichText::new(RELOCATE_TITLE).strong().size(18.0));
        ui.add_space(6.0);
        ui.label("Current Manifest Path:");
        ui.label(egui::RichText::new(current_path).italics());
        ui.add_space(6.0);
        ui.label("Do you want to choose a new path or keep the current one?");
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Keep Current").clicked() {
                choice = Some(RelocateChoice::KeepCurrent);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Choose New Path").clicked() {
                    choice = Some(RelocateChoice::ChooseNew);
                }
            });
        });
    });
    if choice.is_none() && modal.should_close() {
        choice = Some(RelocateChoice::KeepCurrent);
    }
    choice
}

impl eframe::App for ReleaseManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);
        self.apply_theme_if_needed(ctx);

        self.show_header(ctx);
        self.show_main(ctx);
        self.show_dialogs(ctx);
    }
}
