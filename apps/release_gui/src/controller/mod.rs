//! Controller layer: UI events, error classification and dialog orchestration.

pub mod events;
pub mod orchestration;
