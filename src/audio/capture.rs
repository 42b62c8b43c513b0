//! Audio capture state machine
//!
//! Owns the lifecycle of one recording session: Idle → Recording (chunks
//! accumulate) → Finalizing (chunks concatenated and handed off exactly
//! once) → Idle. Only one session can be active; re-entrant `start` is a
//! caller error and is rejected rather than silently restarting.

use crate::{CharlaError, Result};
use tracing::debug;

/// Capture session state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureState {
    /// No session active
    #[default]
    Idle,
    /// Microphone held, chunks accumulating
    Recording,
    /// Chunks consumed, upload in flight
    Finalizing,
}

impl CaptureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, CaptureState::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, CaptureState::Recording)
    }
}

/// State machine buffering encoded audio fragments for one session
#[derive(Debug, Default)]
pub struct CaptureMachine {
    state: CaptureState,
    /// Ordered fragments, append-only while Recording. No size cap is
    /// enforced; long recordings grow without bound (accepted limitation).
    chunks: Vec<Vec<u8>>,
}

impl CaptureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Begin a session. Rejected unless Idle; the previous session's
    /// buffer is destroyed here.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            CaptureState::Idle => {
                self.chunks.clear();
                self.state = CaptureState::Recording;
                Ok(())
            }
            CaptureState::Recording => Err(CharlaError::Capture(
                "start while already recording".to_string(),
            )),
            CaptureState::Finalizing => Err(CharlaError::Capture(
                "start while a previous session is uploading".to_string(),
            )),
        }
    }

    /// Append one encoded fragment. Fragments arriving outside Recording
    /// belong to no session and are dropped.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        if self.state.is_recording() {
            self.chunks.push(chunk);
        } else {
            debug!("Dropping {}-byte chunk outside a session", chunk.len());
        }
    }

    /// Stop recording and consume the buffer: the fragments are
    /// concatenated in order into a single payload, exactly once.
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        if !self.state.is_recording() {
            return Err(CharlaError::Capture("stop without recording".to_string()));
        }
        self.state = CaptureState::Finalizing;
        let payload: Vec<u8> = self.chunks.drain(..).flatten().collect();
        debug!("Finalized capture: {} bytes", payload.len());
        Ok(payload)
    }

    /// Return to Idle once the upload has resolved, successfully or not
    pub fn settle(&mut self) {
        self.state = CaptureState::Idle;
    }

    /// Roll back to Idle when microphone acquisition fails after `start`
    pub fn cancel(&mut self) {
        self.chunks.clear();
        self.state = CaptureState::Idle;
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_rejected_while_recording() {
        let mut machine = CaptureMachine::new();
        machine.start().expect("first start");

        let err = machine.start().unwrap_err();
        assert!(matches!(err, CharlaError::Capture(_)));
        // The running session is untouched
        assert!(machine.state().is_recording());
    }

    #[test]
    fn test_start_is_rejected_while_finalizing() {
        let mut machine = CaptureMachine::new();
        machine.start().expect("start");
        machine.push_chunk(vec![1]);
        machine.finish().expect("finish");

        assert!(machine.start().is_err());
        machine.settle();
        assert!(machine.start().is_ok());
    }

    #[test]
    fn test_chunks_concatenate_in_order() {
        let mut machine = CaptureMachine::new();
        machine.start().expect("start");
        machine.push_chunk(vec![1, 2]);
        machine.push_chunk(vec![3]);
        machine.push_chunk(vec![4, 5]);

        let payload = machine.finish().expect("finish");
        assert_eq!(payload, vec![1, 2, 3, 4, 5]);
        assert_eq!(machine.state(), CaptureState::Finalizing);
    }

    #[test]
    fn test_chunks_consumed_exactly_once() {
        let mut machine = CaptureMachine::new();
        machine.start().expect("start");
        machine.push_chunk(vec![9]);
        machine.finish().expect("finish");
        machine.settle();

        machine.start().expect("second session");
        let payload = machine.finish().expect("finish");
        assert!(payload.is_empty());
    }

    #[test]
    fn test_chunks_outside_session_are_dropped() {
        let mut machine = CaptureMachine::new();
        machine.push_chunk(vec![1]);
        assert_eq!(machine.chunk_count(), 0);

        machine.start().expect("start");
        machine.finish().expect("finish");
        machine.push_chunk(vec![2]);
        assert_eq!(machine.chunk_count(), 0);
    }

    #[test]
    fn test_finish_requires_recording() {
        let mut machine = CaptureMachine::new();
        assert!(machine.finish().is_err());
    }

    #[test]
    fn test_cancel_rolls_back_to_idle() {
        let mut machine = CaptureMachine::new();
        machine.start().expect("start");
        machine.push_chunk(vec![1]);
        machine.cancel();

        assert!(machine.state().is_idle());
        machine.start().expect("restart after cancel");
        assert_eq!(machine.chunk_count(), 0);
    }
}
