//! Main application struct and eframe integration

use crate::audio::VoiceRecorder;
use crate::config::AppConfig;
use crate::conversation::{ComposerOutcome, ConversationLoader, ConversationStore, MessageComposer};
use crate::gateway::pipeline::{GatewayCommand, GatewayEvent};
use crate::ui::components::{ContactList, InputAction, InputBar, MessageList};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crossbeam_channel::{Receiver, Sender};
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::time::Duration;
use tracing::debug;

pub struct ChatApp {
    state: AppState,
    theme: Theme,
    loader: ConversationLoader,
    composer: MessageComposer,
    recorder: VoiceRecorder,
    commands: Sender<GatewayCommand>,
    events: Receiver<GatewayEvent>,
    /// Base path under which the backend serves audio files
    audio_base: String,
    audio_enabled: bool,
    initialized: bool,
}

impl ChatApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        commands: Sender<GatewayCommand>,
        events: Receiver<GatewayEvent>,
    ) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let store = ConversationStore::new();
        let loader = ConversationLoader::new(store.clone(), commands.clone());
        let composer = MessageComposer::new(store.clone(), commands.clone());
        let recorder = VoiceRecorder::new(
            store.clone(),
            commands.clone(),
            config.sample_channel_capacity,
        );

        Self {
            state: AppState::new(store),
            theme,
            loader,
            composer,
            recorder,
            commands,
            events,
            audio_base: format!("{}/audios", config.base_url()),
            audio_enabled: config.enable_audio_input,
            initialized: false,
        }
    }

    /// One-time startup work on the first frame
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.loader.load_contacts();
        self.initialized = true;
    }

    /// Drain gateway completions and dispatch them to their owners
    fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if let Some(message) = self.loader.apply(&event) {
                self.state.last_error = Some(message);
            }

            match self.composer.apply(&event) {
                ComposerOutcome::Sent => {
                    self.state.input_text.clear();
                    self.state.last_error = None;
                }
                ComposerOutcome::Failed(message) => {
                    self.state.last_error = Some(message);
                }
                ComposerOutcome::Ignored => {}
            }

            if let Some(message) = self.recorder.apply(&event) {
                self.state.last_error = Some(message);
            }
        }
    }

    fn run_action(&mut self, action: InputAction) {
        match action {
            InputAction::None => {}
            InputAction::Send => {
                if self.composer.submit(&self.state.input_text) {
                    debug!("Send issued");
                }
            }
            InputAction::StartRecording => {
                if let Err(e) = self.recorder.start() {
                    self.state.last_error = Some(e.user_message());
                }
            }
            InputAction::StopRecording => {
                let Some(phone) = self.state.store.active_phone() else {
                    return;
                };
                if let Err(e) = self.recorder.stop(&phone) {
                    self.state.last_error = Some(e.user_message());
                }
            }
        }
    }

    fn set_dark_mode(&mut self, ctx: &egui::Context, dark: bool) {
        self.state.dark_mode = dark;
        self.theme = if dark { Theme::dark() } else { Theme::light() };
        self.theme.apply(ctx);
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Charla")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(RichText::new("Messaging").size(13.0).color(self.theme.text_muted));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut dark = self.state.dark_mode;
                        if ui
                            .selectable_label(dark, "🌙")
                            .on_hover_text("Toggle dark mode")
                            .clicked()
                        {
                            dark = !dark;
                            self.set_dark_mode(ctx, dark);
                        }

                        if let Some(error) = &self.state.last_error {
                            ui.label(RichText::new(error).size(12.0).color(self.theme.error));
                        }
                    });
                });
            });
    }

    fn show_contacts(&mut self, ctx: &egui::Context) {
        SidePanel::left("contacts")
            .resizable(true)
            .default_width(220.0)
            .min_width(160.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                let contacts = self.state.store.contacts();
                let active = self.state.store.active_phone();
                let clicked =
                    ContactList::new(&contacts, active.as_deref(), &self.theme).show(ui);
                if let Some(phone) = clicked {
                    self.state.store.select_contact(&phone);
                }
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                let has_selection = self.state.store.active_phone().is_some();
                let action = InputBar::new(
                    &mut self.state.input_text,
                    self.recorder.state(),
                    has_selection,
                    self.audio_enabled,
                    &self.theme,
                )
                .show(ui);
                self.run_action(action);
            });
    }

    fn show_messages(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                let messages = self.state.store.messages();
                MessageList::new(&messages, &self.audio_base, &self.theme).show(ui);
            });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.initialize();

        // Pull microphone chunks while a session is open
        self.recorder.drain_samples();

        // Apply network completions
        self.poll_events();

        self.show_header(ctx);
        self.show_contacts(ctx);
        self.show_input_area(ctx);
        self.show_messages(ctx);

        // Completions arrive without user interaction; keep polling
        if self.recorder.is_recording() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let _ = self.commands.send(GatewayCommand::Shutdown);
    }
}
