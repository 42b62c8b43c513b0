//! Voice recorder controller
//!
//! Drives one capture session end to end: acquires the microphone, feeds
//! encoded fragments into the capture machine, finalizes the WAV payload
//! and hands it to the gateway, then appends the optimistic echo once the
//! backend accepts the upload.

use crate::audio::capture::{CaptureMachine, CaptureState};
use crate::audio::encoder::{self, AUDIO_MIME};
#[cfg(feature = "audio-io")]
use crate::audio::input::AudioInput;
use crate::conversation::store::ConversationStore;
use crate::gateway::models::{AudioPayload, StoredMessage};
use crate::gateway::pipeline::{GatewayCommand, GatewayEvent, GatewayOp};
use crate::render;
use crate::{CharlaError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::warn;

const FALLBACK_SAMPLE_RATE: u32 = 16000;

pub struct VoiceRecorder {
    machine: CaptureMachine,
    store: ConversationStore,
    commands: Sender<GatewayCommand>,
    sample_tx: Sender<Vec<f32>>,
    sample_rx: Receiver<Vec<f32>>,
    sample_rate: u32,
    #[cfg(feature = "audio-io")]
    input: Option<AudioInput>,
}

impl VoiceRecorder {
    pub fn new(
        store: ConversationStore,
        commands: Sender<GatewayCommand>,
        sample_capacity: usize,
    ) -> Self {
        let (sample_tx, sample_rx) = bounded(sample_capacity);
        Self {
            machine: CaptureMachine::new(),
            store,
            commands,
            sample_tx,
            sample_rx,
            sample_rate: FALLBACK_SAMPLE_RATE,
            #[cfg(feature = "audio-io")]
            input: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.machine.state()
    }

    pub fn is_recording(&self) -> bool {
        self.machine.state().is_recording()
    }

    /// Begin a session. Re-entrant starts are rejected by the machine; a
    /// microphone acquisition failure rolls the session back to Idle and
    /// is surfaced to the caller.
    pub fn start(&mut self) -> Result<()> {
        self.machine.start()?;
        if let Err(e) = self.acquire_microphone() {
            self.machine.cancel();
            return Err(e);
        }
        Ok(())
    }

    /// Stop the session for the active contact and hand the payload to
    /// the gateway. The machine stays in Finalizing until the upload
    /// resolves through `apply`.
    pub fn stop(&mut self, phone: &str) -> Result<()> {
        self.release_microphone();
        self.drain_samples();
        self.finalize_and_send(phone)
    }

    /// Pull buffered sample chunks from the capture thread; called every
    /// frame while recording.
    pub fn drain_samples(&mut self) {
        while let Ok(samples) = self.sample_rx.try_recv() {
            self.machine.push_chunk(encoder::pcm_chunk(&samples));
        }
    }

    /// Apply a gateway completion for an upload. Success appends the
    /// legacy placeholder echo; failure appends nothing. Either way the
    /// machine settles back to Idle.
    pub fn apply(&mut self, event: &GatewayEvent) -> Option<String> {
        match event {
            GatewayEvent::AudioSent { filename, .. } => {
                self.machine.settle();
                self.store
                    .append_message(StoredMessage::sent_audio(render::audio_placeholder(
                        filename,
                    )));
                None
            }
            GatewayEvent::Failed {
                op: GatewayOp::SendAudio,
                error,
            } => {
                warn!("Audio upload failed: {}", error);
                self.machine.settle();
                Some("Voice message was not sent.".to_string())
            }
            _ => None,
        }
    }

    fn finalize_and_send(&mut self, phone: &str) -> Result<()> {
        let pcm = self.machine.finish()?;
        let bytes = match encoder::wav_payload(&pcm, self.sample_rate, 1) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.machine.settle();
                return Err(e);
            }
        };

        let payload = AudioPayload {
            filename: encoder::upload_filename(phone),
            mime_type: AUDIO_MIME.to_string(),
            bytes,
        };
        let command = GatewayCommand::SendAudio {
            phone: phone.to_string(),
            payload,
        };
        if let Err(e) = self.commands.send(command) {
            self.machine.settle();
            return Err(CharlaError::Channel(e.to_string()));
        }
        Ok(())
    }

    #[cfg(feature = "audio-io")]
    fn acquire_microphone(&mut self) -> Result<()> {
        let mut input = AudioInput::new()?;
        input.start(self.sample_tx.clone())?;
        self.sample_rate = input.sample_rate();
        self.input = Some(input);
        Ok(())
    }

    #[cfg(not(feature = "audio-io"))]
    fn acquire_microphone(&mut self) -> Result<()> {
        Err(CharlaError::DeviceUnavailable(
            "built without the audio-io feature".to_string(),
        ))
    }

    #[cfg(feature = "audio-io")]
    fn release_microphone(&mut self) {
        if let Some(mut input) = self.input.take() {
            input.stop();
        }
    }

    #[cfg(not(feature = "audio-io"))]
    fn release_microphone(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::models::Direction;
    use std::io::Cursor;

    fn setup() -> (
        ConversationStore,
        VoiceRecorder,
        crossbeam_channel::Receiver<GatewayCommand>,
    ) {
        let store = ConversationStore::new();
        let (tx, rx) = bounded(16);
        let recorder = VoiceRecorder::new(store.clone(), tx, 64);
        (store, recorder, rx)
    }

    /// Start a session without touching the device layer
    fn start_headless(recorder: &mut VoiceRecorder) {
        recorder.machine.start().expect("machine start");
    }

    #[test]
    fn test_two_chunk_session_uploads_one_payload() {
        let (_store, mut recorder, commands) = setup();

        start_headless(&mut recorder);
        recorder.sample_tx.send(vec![0.1_f32; 160]).expect("send");
        recorder.sample_tx.send(vec![-0.1_f32; 160]).expect("send");
        recorder.drain_samples();
        assert_eq!(recorder.machine.chunk_count(), 2);

        recorder.finalize_and_send("555").expect("finalize");
        assert_eq!(recorder.state(), CaptureState::Finalizing);

        let command = commands.try_recv().expect("one upload command");
        let GatewayCommand::SendAudio { phone, payload } = command else {
            panic!("Expected SendAudio");
        };
        assert_eq!(phone, "555");
        assert!(payload.filename.starts_with("555_"));
        assert!(payload.filename.ends_with(".wav"));
        assert_eq!(payload.mime_type, AUDIO_MIME);

        let reader = hound::WavReader::new(Cursor::new(payload.bytes)).expect("valid WAV");
        assert_eq!(reader.len(), 320);

        // Both chunks were consumed; nothing left for a second upload
        assert!(commands.try_recv().is_err());
        assert_eq!(recorder.machine.chunk_count(), 0);
    }

    #[test]
    fn test_accepted_upload_appends_audio_echo() {
        let (store, mut recorder, _commands) = setup();
        start_headless(&mut recorder);
        recorder.machine.push_chunk(vec![0, 1]);
        recorder.finalize_and_send("555").expect("finalize");

        let surfaced = recorder.apply(&GatewayEvent::AudioSent {
            phone: "555".to_string(),
            filename: "555_1.wav".to_string(),
        });
        assert!(surfaced.is_none());
        assert_eq!(recorder.state(), CaptureState::Idle);

        let messages = store.messages();
        assert_eq!(messages.len(), 1);
        let echo = &messages[0];
        assert_eq!(echo.direction, Direction::Sent);
        assert_eq!(echo.content, "[Audio saved: 555_1.wav]");
        assert_eq!(echo.is_audio, Some(true));
    }

    #[test]
    fn test_failed_upload_appends_nothing_and_settles() {
        let (store, mut recorder, _commands) = setup();
        start_headless(&mut recorder);
        recorder.finalize_and_send("555").expect("finalize");

        let surfaced = recorder.apply(&GatewayEvent::Failed {
            op: GatewayOp::SendAudio,
            error: "boom".to_string(),
        });
        assert!(surfaced.is_some());
        assert_eq!(store.message_count(), 0);
        assert_eq!(recorder.state(), CaptureState::Idle);
    }

    #[test]
    fn test_unrelated_events_ignored() {
        let (store, mut recorder, _commands) = setup();

        let surfaced = recorder.apply(&GatewayEvent::TextSent {
            phone: "555".to_string(),
            text: "hi".to_string(),
        });
        assert!(surfaced.is_none());
        assert_eq!(store.message_count(), 0);
        assert_eq!(recorder.state(), CaptureState::Idle);
    }
}
