//! Simulated screen capture session

use std::time::{Duration, Instant};

/// Errors reported by the capture backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("capture is already running")]
    AlreadyRunning,

    #[error("no capture is running")]
    NotRunning,
}

/// A single capture session that can be started and stopped repeatedly
#[derive(Debug, Default)]
pub struct CaptureSession {
    started_at: Option<Instant>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Begin capturing
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.started_at.is_some() {
            return Err(CaptureError::AlreadyRunning);
        }
        self.started_at = Some(Instant::now());
        Ok(())
    }

    /// Finish capturing, returning how long the capture ran
    pub fn stop(&mut self) -> Result<Duration, CaptureError> {
        self.started_at
            .take()
            .map(|t| t.elapsed())
            .ok_or(CaptureError::NotRunning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop() {
        let mut capture = CaptureSession::new();
        assert!(!capture.is_running());

        capture.start().unwrap();
        assert!(capture.is_running());
        assert!(capture.stop().is_ok());
        assert!(!capture.is_running());
    }

    #[test]
    fn test_double_start_rejected() {
        let mut capture = CaptureSession::new();
        capture.start().unwrap();
        assert_eq!(capture.start(), Err(CaptureError::AlreadyRunning));
        assert!(capture.is_running());
    }

    #[test]
    fn test_stop_without_start() {
        let mut capture = CaptureSession::new();
        assert_eq!(capture.stop(), Err(CaptureError::NotRunning));
    }
}
