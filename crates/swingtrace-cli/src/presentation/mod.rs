pub mod formatters;
pub mod presenters;
pub mod renderer;
pub mod view_models;
pub mod views;

pub use renderer::ConsoleRenderer;
pub use view_models::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
