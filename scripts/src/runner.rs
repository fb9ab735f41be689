//! The deploy-and-report sequence

use std::io::Write;

use tracing::info;

use crate::{
    backend::{ContractFactory, DeployedContract, DeploymentBackend, PendingDeployment},
    constants::DEPLOYED_MESSAGE,
    errors::ScriptError,
};

/// Deploy the named contract through the backend, wait for the deployment to be
/// confirmed, and write the deployed address to `out`.
///
/// Any failure short-circuits the remaining steps; nothing is written to `out` unless
/// the deployment is confirmed.
pub async fn deploy_and_report<B: DeploymentBackend>(
    backend: &B,
    contract_name: &str,
    out: &mut impl Write,
) -> Result<DeployedContract, ScriptError> {
    let factory = backend.get_contract_factory(contract_name).await?;

    let pending = factory.deploy().await?;
    info!(
        "Waiting for {} deployment {} to be confirmed",
        contract_name,
        pending.transaction_hash()
    );

    let contract = pending.deployed().await?;

    writeln!(out, "{} {}", DEPLOYED_MESSAGE, contract.address())
        .map_err(|e| ScriptError::Report(e.to_string()))?;

    Ok(contract)
}
