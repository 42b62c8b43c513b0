//! Theme and styling for the Charla UI
//!
//! Dark is the default; the header switch toggles the light variant.

use egui::{Color32, Rounding, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Error/status color
    pub error: Color32,
    /// Recording indicator color
    pub recording: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_muted: Color32,

    /// Bubble fills by direction
    pub sent_bubble: Color32,
    pub received_bubble: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for message bubbles
    pub bubble_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Small spacing
    pub spacing_sm: f32,

    dark: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(37, 99, 235),   // Blue
            error: Color32::from_rgb(239, 68, 68),     // Red
            recording: Color32::from_rgb(239, 68, 68), // Red

            bg_primary: Color32::from_rgb(24, 24, 27),   // Zinc 900
            bg_secondary: Color32::from_rgb(39, 39, 42), // Zinc 800
            bg_tertiary: Color32::from_rgb(63, 63, 70),  // Zinc 700

            text_primary: Color32::from_rgb(250, 250, 250),
            text_muted: Color32::from_rgb(161, 161, 170),

            sent_bubble: Color32::from_rgb(37, 99, 235),     // Blue
            received_bubble: Color32::from_rgb(63, 63, 70),  // Zinc 700

            button_rounding: Rounding::same(8.0),
            bubble_rounding: Rounding::same(10.0),

            spacing: 16.0,
            spacing_sm: 8.0,

            dark: true,
        }
    }

    /// Create the light theme
    pub fn light() -> Self {
        Self {
            primary: Color32::from_rgb(37, 99, 235),
            error: Color32::from_rgb(220, 38, 38),
            recording: Color32::from_rgb(220, 38, 38),

            bg_primary: Color32::WHITE,
            bg_secondary: Color32::from_rgb(243, 244, 246), // Gray 100
            bg_tertiary: Color32::from_rgb(229, 231, 235),  // Gray 200

            text_primary: Color32::from_rgb(17, 24, 39),
            text_muted: Color32::from_rgb(107, 114, 128),

            sent_bubble: Color32::from_rgb(191, 219, 254),    // Blue 200
            received_bubble: Color32::from_rgb(243, 244, 246),

            button_rounding: Rounding::same(8.0),
            bubble_rounding: Rounding::same(10.0),

            spacing: 16.0,
            spacing_sm: 8.0,

            dark: false,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Text color readable on a bubble of the given direction
    pub fn bubble_text(&self, sent: bool) -> Color32 {
        if sent && self.dark {
            Color32::WHITE
        } else {
            self.text_primary
        }
    }

    /// Apply the base visuals to the egui context
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        });
    }
}
