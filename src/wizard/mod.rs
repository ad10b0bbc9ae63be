//! Wizard tracks, step routes, and the step-indicator bar.

pub mod steps;

pub use steps::{
    current_step, is_clickable, step_bar, step_state, Step, StepState, StepView, Track,
};
