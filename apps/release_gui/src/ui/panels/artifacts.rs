use crossbeam_channel::Sender;
use eframe::egui;
use release_core::Workflow;

use crate::{
    controller::{events::UiEvent, orchestration::dispatch_ui_event},
    ui::{
        theme::{Theme, WHITE},
        widgets::{FileChooserEntry, FileSpec},
    },
};

/// Right-hand panel holding the artifact directory.
pub struct ArtifactsPanel {
    artifact_chooser: FileChooserEntry,
}

impl ArtifactsPanel {
    pub fn new(ui_tx: &Sender<UiEvent>) -> Self {
        let tx = ui_tx.clone();
        let artifact_chooser = FileChooserEntry::new("artifact_path", "/..", FileSpec::Directory)
            .on_path_changed(move |previous| {
                dispatch_ui_event(
                    &tx,
                    UiEvent::ArtifactPathChanged {
                        previous: previous.to_string(),
                    },
                )
            });
        Self { artifact_chooser }
    }

    pub fn artifact_path(&self) -> &str {
        self.artifact_chooser.path()
    }

    pub fn sync_from(&mut self, workflow: &Workflow) {
        let current = workflow.artifacts().path();
        if !self.artifact_chooser.is_open() && self.artifact_chooser.path() != current {
            self.artifact_chooser.set_path(current);
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        ui.label(egui::RichText::new("Artifacts").strong().size(18.0).color(WHITE));
        self.artifact_chooser.show(ui, theme);
    }
}
