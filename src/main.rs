//! # update-submission-status
//!
//! Sets a submission's status record to `ACCEPTED` or `INVALID` based on the
//! label produced by the preceding validation or scoring step.
//!
//! 1. **Resolve inputs** - submission ID, credential file, raw status (or results file)
//! 2. **Authenticate** - personal access token from the credential file or `SYNAPSE_AUTH_TOKEN`
//! 3. **Read-modify-write** - fetch the status record, set `status`, store it back
//! 4. **Signal completion** - `{"finished": true}` on stdout or in `--output`
//!
//! Any failure exits non-zero without a completion signal.

use anyhow::{Context, Result};
use clap::Parser;
use submission_status_updater::cli::{Cli, LONG_VERSION};
use submission_status_updater::config::{Credentials, StoreSettings};
use submission_status_updater::output::Completion;
use submission_status_updater::provider::synapse::{install_crypto_provider, SynapseRest};
use submission_status_updater::{logging, update_status};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    // Configure rustls crypto provider before any TLS client is built
    install_crypto_provider();

    let cli = Cli::parse();
    debug!("update-submission-status {}", LONG_VERSION);

    let raw_status = cli
        .status_source()?
        .resolve()
        .context("Failed to determine the submission status")?;

    let credentials = Credentials::load(&cli.synapse_config)
        .context("Failed to load Synapse credentials")?;
    let settings = StoreSettings::resolve(cli.endpoint.as_deref(), cli.timeout_secs, &credentials)
        .context("Invalid store settings")?;
    info!("Using Synapse repository endpoint {}", settings.repo_endpoint);

    let store = SynapseRest::new(&settings).context("Failed to create Synapse client")?;

    let finished = update_status(&store, &credentials, cli.submission_id, &raw_status).await?;

    Completion { finished }.emit(cli.output.as_deref())
}
