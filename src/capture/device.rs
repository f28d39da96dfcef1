//! Camera/device provider seam.
//!
//! The crate ships no hardware backend: any provider that can satisfy a
//! facing-preference descriptor with a releasable frame stream plugs in
//! here, the same way any transport satisfying the message contract plugs
//! into a chat session.

use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

/// A single video frame handed to the decoder.
pub type Frame = DynamicImage;

/// User-level camera preference.
///
/// On handheld form factors callers force [`FacingPreference::Rear`];
/// that policy lives outside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingPreference {
    /// Prefer a rear-facing camera, with fallback.
    Rear,
    /// Prefer a front-facing camera.
    Front,
    /// No preference.
    Any,
}

/// One rung of the acquisition ladder, passed to the provider.
///
/// Each rung is a fully independent permission/resource request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacingDescriptor {
    /// Exact match on a rear-facing camera.
    ExactRear,
    /// Best-effort rear-facing camera.
    AnyRear,
    /// Any available camera.
    Any,
}

impl FacingPreference {
    /// The ordered acquisition ladder for this preference.
    ///
    /// Only the rear preference ladders: exact rear, then best-effort rear,
    /// then anything. Front and don't-care make a single plain request and
    /// let the provider pick.
    pub(crate) fn ladder(self) -> &'static [FacingDescriptor] {
        match self {
            FacingPreference::Rear => &[
                FacingDescriptor::ExactRear,
                FacingDescriptor::AnyRear,
                FacingDescriptor::Any,
            ],
            FacingPreference::Front | FacingPreference::Any => &[FacingDescriptor::Any],
        }
    }
}

/// Facing direction reported by a granted stream, best effort.
///
/// Recorded for display/diagnostics only; it never affects control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedFacing {
    Rear,
    Front,
    Unknown,
}

/// Errors a provider can return from an acquisition attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    /// The user or platform denied camera access.
    #[error("camera permission denied")]
    PermissionDenied,

    /// No device matched the descriptor.
    #[error("no camera device found")]
    NoDevice,

    /// Any other hardware fault.
    #[error("camera hardware error: {0}")]
    Hardware(String),
}

/// Source of camera streams.
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Request a video stream matching the descriptor.
    ///
    /// Each call is an independent permission/resource negotiation and may
    /// suspend for as long as that takes; the session imposes no timeout.
    async fn acquire(
        &self,
        descriptor: FacingDescriptor,
    ) -> Result<Box<dyn CameraStream>, AcquireError>;
}

/// A granted camera stream.
#[async_trait]
pub trait CameraStream: Send {
    /// Next frame, or `None` once the stream ends.
    async fn next_frame(&mut self) -> Option<Frame>;

    /// Best-effort facing direction of the granted device.
    fn facing(&self) -> ReportedFacing;

    /// Release the underlying device. Must be idempotent.
    fn release(&mut self);
}
