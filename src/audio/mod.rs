pub mod capture;
pub mod encoder;
#[cfg(feature = "audio-io")]
pub mod input;
pub mod recorder;

pub use capture::{CaptureMachine, CaptureState};
#[cfg(feature = "audio-io")]
pub use input::AudioInput;
pub use recorder::VoiceRecorder;
