pub mod artifacts;
pub mod inputs;

pub use artifacts::ArtifactsPanel;
pub use inputs::InputsPanel;
