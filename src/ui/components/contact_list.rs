//! Contact sidebar component
//!
//! Lists the contact snapshot; clicking a row selects that conversation.

use crate::gateway::models::Contact;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct ContactList<'a> {
    contacts: &'a [Contact],
    active_phone: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ContactList<'a> {
    pub fn new(contacts: &'a [Contact], active_phone: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            contacts,
            active_phone,
            theme,
        }
    }

    /// Show the list; returns the phone of a newly clicked contact
    pub fn show(self, ui: &mut egui::Ui) -> Option<String> {
        let mut clicked = None;

        ui.label(
            RichText::new("Contacts")
                .size(16.0)
                .strong()
                .color(self.theme.text_primary),
        );
        ui.add_space(self.theme.spacing_sm);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.contacts.is_empty() {
                    ui.label(RichText::new("No contacts").color(self.theme.text_muted));
                    return;
                }

                for contact in self.contacts {
                    let selected = self.active_phone == Some(contact.phone.as_str());
                    let response = ui.selectable_label(
                        selected,
                        RichText::new(contact.display_name()).color(self.theme.text_primary),
                    );
                    if response.clicked() {
                        clicked = Some(contact.phone.clone());
                    }
                }
            });

        clicked
    }
}
