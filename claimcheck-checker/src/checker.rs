use crate::display::{DisplayRegion, DisplayState, StalePolicy, Ticket};
use claimcheck_detect::{Claim, Detector};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owns the display region and turns submissions into requests.
///
/// Cheap to clone; clones share the region and the detector.
#[derive(Clone)]
pub struct ClaimChecker {
    detector: Arc<dyn Detector>,
    policy: StalePolicy,
    region: Arc<watch::Sender<DisplayRegion>>,
}

impl ClaimChecker {
    pub fn new(detector: Arc<dyn Detector>) -> Self {
        let (tx, _rx) = watch::channel(DisplayRegion::default());
        Self {
            detector,
            policy: StalePolicy::default(),
            region: Arc::new(tx),
        }
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn endpoint(&self) -> String {
        self.detector.endpoint()
    }

    /// Receiver that observes every write to the display region.
    pub fn subscribe(&self) -> watch::Receiver<DisplayRegion> {
        self.region.subscribe()
    }

    /// Copy of the region as it is right now.
    pub fn snapshot(&self) -> DisplayRegion {
        self.region.borrow().clone()
    }

    /// Submit whatever is in the input field.
    ///
    /// Empty or whitespace-only input shows the prompt and returns `None`
    /// without touching the network. Anything else shows "checking" and
    /// returns the handle of the spawned request; the handle never needs to
    /// be awaited for the display to update.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, input: &str) -> Option<JoinHandle<()>> {
        let mut ticket: Ticket = 0;

        let claim = match Claim::parse(input) {
            Ok(claim) => claim,
            Err(_) => {
                self.region.send_modify(|region| {
                    region.latest += 1;
                    region.state = DisplayState::Prompt;
                    ticket = region.latest;
                });
                tracing::debug!(ticket, "checker.empty_claim");
                return None;
            }
        };

        self.region.send_modify(|region| {
            region.latest += 1;
            region.in_flight += 1;
            ticket = region.latest;
            region.state = DisplayState::Checking {
                ticket,
                claim: claim.as_str().to_string(),
            };
        });
        tracing::info!(ticket, claim = %claim, endpoint = %self.detector.endpoint(), "checker.submit");

        let detector = self.detector.clone();
        let region = self.region.clone();
        let policy = self.policy;

        Some(tokio::spawn(async move {
            let outcome = detector.detect(&claim).await;
            let text = claim.into_inner();

            region.send_modify(|region| {
                region.in_flight = region.in_flight.saturating_sub(1);

                if !policy.accepts(ticket, region.latest) {
                    tracing::info!(ticket, latest = region.latest, "checker.stale_response_dropped");
                    return;
                }

                region.state = match outcome {
                    Ok(verdict) => DisplayState::Verdict {
                        ticket,
                        claim: text,
                        verdict,
                    },
                    Err(error) => DisplayState::Failed {
                        ticket,
                        claim: text,
                        error,
                    },
                };
            });
            tracing::debug!(ticket, "checker.settled");
        }))
    }
}
