//! Input bar component
//!
//! Text input, send button, and the record toggle (🎙 starts, ⏹ stops).
//! The bar mutates only the input buffer; everything else is reported as
//! an action for the app to run.

use crate::audio::CaptureState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Send,
    StartRecording,
    StopRecording,
}

pub struct InputBar<'a> {
    input_text: &'a mut String,
    capture_state: CaptureState,
    /// Whether a conversation is selected
    has_selection: bool,
    /// Record toggle is hidden entirely in text-only mode
    audio_enabled: bool,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(
        input_text: &'a mut String,
        capture_state: CaptureState,
        has_selection: bool,
        audio_enabled: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            input_text,
            capture_state,
            has_selection,
            audio_enabled,
            theme,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> InputAction {
        let mut action = InputAction::None;

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.button_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    // Text input takes the remaining width
                    let available_width = ui.available_width() - 110.0;
                    let text_edit = egui::TextEdit::singleline(self.input_text)
                        .hint_text("Type a message...")
                        .desired_width(available_width)
                        .margin(egui::Margin::symmetric(10.0, 6.0));

                    let recording = self.capture_state.is_recording();
                    let response = ui.add_enabled(self.has_selection && !recording, text_edit);

                    if response.has_focus()
                        && ui.input(|i| i.key_pressed(Key::Enter))
                        && !self.input_text.trim().is_empty()
                    {
                        action = InputAction::Send;
                    }

                    ui.add_space(self.theme.spacing_sm);

                    // Send button
                    let can_send =
                        self.has_selection && !recording && !self.input_text.trim().is_empty();
                    let send_button = egui::Button::new(
                        RichText::new("➤").size(16.0).color(egui::Color32::WHITE),
                    )
                    .min_size(Vec2::splat(36.0))
                    .rounding(self.theme.button_rounding)
                    .fill(if can_send {
                        self.theme.primary
                    } else {
                        self.theme.text_muted
                    });

                    if ui.add_enabled(can_send, send_button).clicked() {
                        action = InputAction::Send;
                    }

                    // Record toggle
                    if self.audio_enabled {
                        if let Some(record_action) = self.show_record_button(ui) {
                            action = record_action;
                        }
                    }
                });
            });

        action
    }

    fn show_record_button(&self, ui: &mut egui::Ui) -> Option<InputAction> {
        let (icon, tooltip, fill) = match self.capture_state {
            CaptureState::Idle => ("🎙", "Record a voice message", self.theme.bg_tertiary),
            CaptureState::Recording => ("⏹", "Stop and send", self.theme.recording),
            CaptureState::Finalizing => ("⏳", "Uploading...", self.theme.text_muted),
        };

        let button = egui::Button::new(RichText::new(icon).size(16.0))
            .min_size(Vec2::splat(36.0))
            .rounding(self.theme.button_rounding)
            .fill(fill);

        let enabled = self.has_selection && self.capture_state != CaptureState::Finalizing;
        let response = ui.add_enabled(enabled, button).on_hover_text(tooltip);

        if !response.clicked() {
            return None;
        }
        match self.capture_state {
            CaptureState::Idle => Some(InputAction::StartRecording),
            CaptureState::Recording => Some(InputAction::StopRecording),
            CaptureState::Finalizing => None,
        }
    }
}
