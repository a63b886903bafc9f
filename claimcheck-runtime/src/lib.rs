//! Mailbox actors for Claimcheck front-ends.
//!
//! [`actor::spawn_actor`] runs one actor on the current Tokio runtime until
//! it stops itself, its addresses are dropped, or the supplied
//! `CancellationToken` fires.
pub mod actor;
