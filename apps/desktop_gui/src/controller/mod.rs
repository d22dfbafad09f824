//! Controller layer: UI events, audit state transitions, and command orchestration.

pub mod events;
pub mod orchestration;
