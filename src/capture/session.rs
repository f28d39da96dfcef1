//! Capture session: acquire a camera, decode frames, release cleanly.
//!
//! The session is a small state machine with exactly one owner:
//!
//! ```text
//! Idle -> AcquiringDevice -> Streaming -> Decoded | Cancelled | Failed
//! ```
//!
//! `start()` drives the machine to a terminal state; `stop()` (via a
//! [`SessionStopper`] handle) cancels cooperatively from another task. The
//! granted stream is owned by the session and released on every terminal
//! transition and on drop, never left to a process-wide handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Notify;

use crate::capture::device::{
    AcquireError, CameraProvider, CameraStream, FacingPreference, ReportedFacing,
};
use crate::qr::{self, QrError};

/// Errors that can occur during a capture session.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// `start()` was called while a prior run had not been reset.
    #[error("a capture session is already active")]
    SessionAlreadyActive,

    /// The final acquisition attempt was denied by the user or platform.
    #[error("camera permission denied")]
    PermissionDenied,

    /// The acquisition ladder was exhausted without a usable device.
    #[error("no camera available: {0}")]
    NoCameraAvailable(AcquireError),

    /// The stream ended before any code was decoded.
    #[error("video stream ended before a code was decoded")]
    StreamEnded,

    /// Internal decoder fault.
    #[error("decoder fault: {0}")]
    Decoder(#[from] QrError),
}

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AcquiringDevice,
    Streaming,
    /// Terminal: a payload was emitted.
    Decoded,
    /// Terminal: `stop()` was called before a match.
    Cancelled,
    /// Terminal: acquisition or decoding failed.
    Failed,
}

impl SessionState {
    /// True while the session holds or is negotiating for a device.
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::AcquiringDevice | SessionState::Streaming)
    }

    /// True once the session has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Decoded | SessionState::Cancelled | SessionState::Failed
        )
    }
}

/// How a session run ended (the non-error outcomes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The first decoded payload. At most one is ever emitted per session.
    Decoded(String),
    /// `stop()` was called before any code was decoded.
    Cancelled,
}

/// Cloneable handle that cancels a running session.
///
/// Cancellation is cooperative and sticky: once stopped, the session run
/// it belongs to can only end in `Cancelled` (or an earlier terminal
/// state it had already reached).
#[derive(Clone)]
pub struct SessionStopper {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl SessionStopper {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn stop(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The stateful controller that acquires a camera and decodes incoming
/// frames until first match or cancellation.
pub struct CaptureSession {
    provider: Arc<dyn CameraProvider>,
    preference: FacingPreference,
    state: SessionState,
    stopper: SessionStopper,
    stream: Option<Box<dyn CameraStream>>,
    reported_facing: Option<ReportedFacing>,
}

impl CaptureSession {
    /// Create an idle session over the given provider.
    pub fn new(provider: Arc<dyn CameraProvider>, preference: FacingPreference) -> Self {
        Self {
            provider,
            preference,
            state: SessionState::Idle,
            stopper: SessionStopper::new(),
            stream: None,
            reported_facing: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Facing direction reported by the granted stream, if any was
    /// acquired this run. Diagnostics only.
    pub fn reported_facing(&self) -> Option<ReportedFacing> {
        self.reported_facing
    }

    /// Cancellation handle for the current run.
    ///
    /// Obtain it before calling [`start`](Self::start); [`reset`](Self::reset)
    /// invalidates previously handed-out stoppers.
    pub fn stopper(&self) -> SessionStopper {
        self.stopper.clone()
    }

    /// Request cancellation of the current run. Equivalent to
    /// `self.stopper().stop()`.
    pub fn stop(&self) {
        self.stopper.stop();
    }

    /// Change the camera preference. Not a live parameter: switching while
    /// a run is active requires `stop()` + `reset()` + a fresh `start()`.
    pub fn set_preference(&mut self, preference: FacingPreference) -> Result<(), CaptureError> {
        if self.state.is_active() {
            return Err(CaptureError::SessionAlreadyActive);
        }
        self.preference = preference;
        Ok(())
    }

    /// Return a finished session to `Idle` so it can be started again.
    ///
    /// No-op from `Idle`. Installs a fresh cancellation token; resources
    /// from the previous run were already released on its terminal
    /// transition.
    pub fn reset(&mut self) {
        if self.state.is_active() {
            return;
        }
        self.release_stream();
        self.state = SessionState::Idle;
        self.stopper = SessionStopper::new();
        self.reported_facing = None;
    }

    /// Run the session to a terminal state.
    ///
    /// Walks the acquisition ladder for the configured preference, then
    /// feeds frames to the decoder until the first payload, cancellation,
    /// or a failure. Calling `start()` when the session is not `Idle` is a
    /// contract violation and fails fast with
    /// [`CaptureError::SessionAlreadyActive`].
    pub async fn start(&mut self) -> Result<CaptureOutcome, CaptureError> {
        if self.state != SessionState::Idle {
            return Err(CaptureError::SessionAlreadyActive);
        }
        self.state = SessionState::AcquiringDevice;

        let stream = match self.acquire_with_fallback().await {
            Ok(Some(stream)) => stream,
            // Cancellation landed before a device was granted
            Ok(None) => return self.finish_cancelled(),
            Err(err) => {
                // A stop() that raced the failing rung still wins: the run
                // was cancelled before the failure could classify it.
                if self.stopper.is_cancelled() {
                    return self.finish_cancelled();
                }
                self.state = SessionState::Failed;
                return Err(err);
            }
        };

        // The in-flight acquisition resolved; if stop() raced it, release
        // immediately without ever entering Streaming.
        if self.stopper.is_cancelled() {
            let mut stream = stream;
            stream.release();
            return self.finish_cancelled();
        }

        self.reported_facing = Some(stream.facing());
        log::debug!("camera acquired, reported facing {:?}", stream.facing());
        self.stream = Some(stream);
        self.state = SessionState::Streaming;

        self.decode_loop().await
    }

    /// Walk the acquisition ladder.
    ///
    /// Failures of every rung but the last are swallowed (logged only) and
    /// the ladder advances; the last rung's failure classifies the whole
    /// run. `Ok(None)` means cancellation was observed between rungs.
    async fn acquire_with_fallback(
        &mut self,
    ) -> Result<Option<Box<dyn CameraStream>>, CaptureError> {
        let ladder = self.preference.ladder();
        let mut last_err = AcquireError::NoDevice;

        for (rung, descriptor) in ladder.iter().enumerate() {
            if self.stopper.is_cancelled() {
                return Ok(None);
            }

            match self.provider.acquire(*descriptor).await {
                Ok(stream) => return Ok(Some(stream)),
                Err(err) => {
                    if rung + 1 < ladder.len() {
                        log::debug!(
                            "camera acquisition with {:?} failed, falling back: {}",
                            descriptor,
                            err
                        );
                    } else {
                        log::warn!("camera acquisition ladder exhausted: {}", err);
                    }
                    last_err = err;
                }
            }
        }

        Err(match last_err {
            AcquireError::PermissionDenied => CaptureError::PermissionDenied,
            other => CaptureError::NoCameraAvailable(other),
        })
    }

    /// Feed frames to the decoder until first match or cancellation.
    async fn decode_loop(&mut self) -> Result<CaptureOutcome, CaptureError> {
        loop {
            // None = cancellation observed, Some = a frame pull result.
            // The notify waiter is registered before the flag is re-checked
            // so a stop() landing between the check and the select is never
            // missed; it drops with this block before any state transition.
            let step = {
                let notified = self.stopper.notify.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();

                if self.stopper.is_cancelled() {
                    None
                } else {
                    match self.stream.as_mut() {
                        Some(stream) => {
                            tokio::select! {
                                _ = &mut notified => None,
                                frame = stream.next_frame() => Some(frame),
                            }
                        }
                        None => None,
                    }
                }
            };

            let Some(frame) = step else {
                return self.finish_cancelled();
            };

            let Some(frame) = frame else {
                self.release_stream();
                self.state = SessionState::Failed;
                return Err(CaptureError::StreamEnded);
            };

            match qr::decode_frame(&frame) {
                // First match wins: tear down synchronously so no later
                // frame is ever processed.
                Ok(Some(payload)) => {
                    self.release_stream();
                    self.state = SessionState::Decoded;
                    return Ok(CaptureOutcome::Decoded(payload));
                }
                Ok(None) => {} // keep scanning
                Err(err) => {
                    self.release_stream();
                    self.state = SessionState::Failed;
                    return Err(CaptureError::Decoder(err));
                }
            }
        }
    }

    fn finish_cancelled(&mut self) -> Result<CaptureOutcome, CaptureError> {
        self.release_stream();
        self.state = SessionState::Cancelled;
        Ok(CaptureOutcome::Cancelled)
    }

    /// Release the granted stream if any. Idempotent.
    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.release_stream();
    }
}
