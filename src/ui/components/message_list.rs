//! Message list component
//!
//! Renders the conversation in store order as direction-aligned bubbles,
//! resolving each record through the message renderer.

use crate::gateway::models::{Direction, StoredMessage};
use crate::render::{self, DisplayForm};
use crate::ui::theme::Theme;
use egui::{self, Align, RichText};

pub struct MessageList<'a> {
    messages: &'a [StoredMessage],
    audio_base: &'a str,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [StoredMessage], audio_base: &'a str, theme: &'a Theme) -> Self {
        Self {
            messages,
            audio_base,
            theme,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing_sm);

                if self.messages.is_empty() {
                    self.show_empty_state(ui);
                } else {
                    for message in self.messages {
                        self.show_message(ui, message);
                        ui.add_space(self.theme.spacing_sm);
                    }
                }

                ui.add_space(self.theme.spacing_sm);
            });
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new("Select a contact to start chatting")
                    .size(14.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &StoredMessage) {
        let sent = message.direction == Direction::Sent;
        let bubble_color = if sent {
            self.theme.sent_bubble
        } else {
            self.theme.received_bubble
        };
        let text_color = self.theme.bubble_text(sent);
        let align = if sent { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            let max_width = ui.available_width() * 0.7;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);

                    match render::render(self.audio_base, message) {
                        DisplayForm::Text(text) => {
                            ui.label(RichText::new(text).color(text_color));
                        }
                        DisplayForm::Audio { source, filename } => {
                            self.show_audio_reference(ui, &source, &filename, text_color);
                        }
                    }
                });
        });
    }

    fn show_audio_reference(
        &self,
        ui: &mut egui::Ui,
        source: &str,
        filename: &str,
        text_color: egui::Color32,
    ) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("▶").size(16.0).color(text_color));
            ui.vertical(|ui| {
                ui.label(RichText::new("Voice message").color(text_color).strong());
                // Opens the stream in the system player/browser
                ui.hyperlink_to(
                    RichText::new(filename).size(11.0).color(text_color),
                    source,
                );
            });
        });
    }
}
