//! Definitions of CLI arguments for the deploy script.
//!
//! Every argument can also be supplied through the environment, which is how the
//! network and deployer credentials are usually provided.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    constants::{
        DEFAULT_ARTIFACTS_PATH, DEFAULT_PKEY, DEFAULT_RPC_URL, NUM_DEPLOY_CONFIRMATIONS,
    },
    evm::DeployConfig,
};

/// Deploy the StabiCoreNetwork contract to an EVM chain
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer
    #[arg(short, long = "pkey", env = "PKEY", default_value = DEFAULT_PKEY, hide_default_value = true)]
    pub priv_key: String,

    /// Directory containing the Hardhat compilation artifacts
    #[arg(short, long = "artifacts", env = "ARTIFACTS_PATH", default_value = DEFAULT_ARTIFACTS_PATH)]
    pub artifacts_path: PathBuf,

    /// Number of confirmations to wait for the deployment transaction
    #[arg(short, long, env = "CONFIRMATIONS", default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Seconds to wait for the confirmations before giving up, waits indefinitely if unset
    #[arg(short, long, env = "CONFIRMATION_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// The backend configuration described by the arguments
    pub fn deploy_config(&self) -> DeployConfig {
        DeployConfig {
            rpc_url: self.rpc_url.clone(),
            priv_key: self.priv_key.clone(),
            artifacts_path: self.artifacts_path.clone(),
            confirmations: self.confirmations,
            confirmation_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
