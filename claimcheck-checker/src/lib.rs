//! The claim checker: one input, one submit action, one display region.
//!
//! [`ClaimChecker::submit`] validates the input, flips the display to
//! "checking", fires one request through a [`Detector`] and writes the
//! outcome back. Front-ends watch the region through
//! [`ClaimChecker::subscribe`] and draw it with [`render::View`].
//!
//! Overlapping submissions are not cancelled. Under the default
//! [`StalePolicy::LastCompleted`] whichever response lands last wins; under
//! [`StalePolicy::LatestSubmitted`] answers to superseded submissions are
//! dropped.
//!
//! [`Detector`]: claimcheck_detect::Detector
mod checker;
mod display;
pub mod render;
pub mod sanitize;

pub use checker::ClaimChecker;
pub use display::{DisplayRegion, DisplayState, StalePolicy, Ticket};
