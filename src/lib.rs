//! Submission Status Updater Library
//!
//! Normalizes the coarse status reported by a challenge's validation or
//! scoring step (`VALIDATED`, `SCORED`, anything else) into `ACCEPTED` or
//! `INVALID` and writes it to the submission's status record in Synapse.
//!
//! - [`status`]: the mapping itself, a pure function of the label
//! - [`updater::update_status`]: authenticate, fetch, set status, store, log out
//! - [`provider::SubmissionStatusStore`]: the record store seam, with the
//!   Synapse REST implementation in [`provider::synapse`]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod provider;
pub mod record;
pub mod status;
pub mod updater;

pub use error::StoreError;
pub use record::SubmissionStatus;
pub use status::SubmissionOutcome;
pub use updater::update_status;
