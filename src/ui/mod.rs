//! egui/eframe user interface for Charla

mod app;
pub mod components;
mod state;
mod theme;

pub use app::ChatApp;
pub use state::AppState;
pub use theme::Theme;
