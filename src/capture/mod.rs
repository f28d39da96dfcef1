//! Live camera capture: device negotiation, frame decoding, teardown.

mod device;
mod session;

pub use device::{
    AcquireError, CameraProvider, CameraStream, FacingDescriptor, FacingPreference, Frame,
    ReportedFacing,
};
pub use session::{CaptureError, CaptureOutcome, CaptureSession, SessionState, SessionStopper};
