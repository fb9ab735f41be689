//! A deployment backend targeting an EVM chain over JSON-RPC, reading contracts
//! from Hardhat compilation artifacts

use std::{path::PathBuf, str::FromStr, time::Duration};

use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::{debug, info};

use crate::{
    artifacts::{load_artifact, ContractArtifact},
    backend::{ContractFactory, DeployedContract, DeploymentBackend, PendingDeployment},
    constants::NUM_DEPLOY_CONFIRMATIONS,
    errors::ScriptError,
};

/// The runtime configuration of the EVM backend
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// The JSON-RPC endpoint of the target chain
    pub rpc_url: String,
    /// The private key of the deployer, in hex
    pub priv_key: String,
    /// The directory containing the Hardhat artifacts
    pub artifacts_path: PathBuf,
    /// The number of confirmations to wait for
    pub confirmations: u64,
    /// How long to wait for the confirmations before giving up, if at all
    pub confirmation_timeout: Option<Duration>,
}

impl DeployConfig {
    /// A configuration targeting the given node with default artifacts & confirmation policy
    pub fn new(rpc_url: &str, priv_key: &str, artifacts_path: impl Into<PathBuf>) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            priv_key: priv_key.to_string(),
            artifacts_path: artifacts_path.into(),
            confirmations: NUM_DEPLOY_CONFIRMATIONS,
            confirmation_timeout: None,
        }
    }
}

/// A deployment backend signing with a local private key
pub struct EvmBackend {
    /// The signing provider
    provider: DynProvider<Ethereum>,
    /// The address of the deployer
    deployer: Address,
    /// The directory containing the Hardhat artifacts
    artifacts_path: PathBuf,
    /// The number of confirmations to wait for
    confirmations: u64,
    /// The confirmation timeout, if any
    confirmation_timeout: Option<Duration>,
}

impl EvmBackend {
    /// Set up the signing provider described by the config.
    ///
    /// This does not contact the node; connectivity errors surface on deployment.
    pub fn new(config: &DeployConfig) -> Result<Self, ScriptError> {
        let url = Url::parse(&config.rpc_url)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let signer = PrivateKeySigner::from_str(&config.priv_key)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let deployer = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .on_http(url);

        debug!("deployer address: {deployer}");
        Ok(Self {
            provider: DynProvider::new(provider),
            deployer,
            artifacts_path: config.artifacts_path.clone(),
            confirmations: config.confirmations,
            confirmation_timeout: config.confirmation_timeout,
        })
    }

    /// The address of the deployer
    pub fn deployer(&self) -> Address {
        self.deployer
    }
}

impl DeploymentBackend for EvmBackend {
    type Factory = EvmContractFactory;

    async fn get_contract_factory(&self, name: &str) -> Result<EvmContractFactory, ScriptError> {
        let artifact = load_artifact(&self.artifacts_path, name)?;
        debug!(
            "resolved {} ({} bytes of creation code)",
            artifact.fully_qualified_name,
            artifact.bytecode.len()
        );

        Ok(EvmContractFactory {
            artifact,
            provider: self.provider.clone(),
            deployer: self.deployer,
            confirmations: self.confirmations,
            confirmation_timeout: self.confirmation_timeout,
        })
    }
}

/// A factory deploying a contract from its artifact
pub struct EvmContractFactory {
    /// The artifact of the contract to deploy
    artifact: ContractArtifact,
    /// The signing provider
    provider: DynProvider<Ethereum>,
    /// The address of the deployer
    deployer: Address,
    /// The number of confirmations to wait for
    confirmations: u64,
    /// The confirmation timeout, if any
    confirmation_timeout: Option<Duration>,
}

impl EvmContractFactory {
    /// The artifact this factory deploys
    pub fn artifact(&self) -> &ContractArtifact {
        &self.artifact
    }
}

impl ContractFactory for EvmContractFactory {
    type Pending = EvmPendingDeployment;

    async fn deploy(self) -> Result<EvmPendingDeployment, ScriptError> {
        if self.artifact.constructor_has_inputs() {
            return Err(ScriptError::Deployment(format!(
                "constructor of {} expects arguments, none were given",
                self.artifact.fully_qualified_name
            )));
        }

        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::Deployment(e.to_string()))?;
        info!(
            "Deploying {} to chain {} from {}",
            self.artifact.name, chain_id, self.deployer
        );

        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(self.artifact.bytecode.clone());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::Deployment(e.to_string()))?
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.confirmation_timeout);

        info!("Deployment transaction sent: {}", pending.tx_hash());
        Ok(EvmPendingDeployment { pending })
    }
}

/// A submitted deployment transaction
pub struct EvmPendingDeployment {
    /// The pending transaction, configured with the confirmation policy
    pending: PendingTransactionBuilder<Ethereum>,
}

impl PendingDeployment for EvmPendingDeployment {
    fn transaction_hash(&self) -> TxHash {
        *self.pending.tx_hash()
    }

    async fn deployed(self) -> Result<DeployedContract, ScriptError> {
        let tx_hash = self.transaction_hash();
        let receipt = self
            .pending
            .get_receipt()
            .await
            .map_err(|e| ScriptError::Confirmation(format!("{tx_hash}: {e}")))?;

        if !receipt.status() {
            return Err(ScriptError::Confirmation(format!(
                "deployment transaction {tx_hash} reverted"
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::Confirmation(format!(
                "receipt of deployment transaction {tx_hash} has no contract address"
            ))
        })?;

        debug!(
            "deployment confirmed in block {:?}, gas used {:?}",
            receipt.block_number, receipt.gas_used
        );
        Ok(DeployedContract::new(address, tx_hash))
    }
}
