//! The interface the deploy runner consumes from a deployment backend.
//!
//! A backend resolves contract factories by name. A factory deploys exactly one
//! instance of its contract, yielding a [`PendingDeployment`], and only a confirmed
//! pending deployment yields a [`DeployedContract`] from which the address can be read.

use alloy::primitives::{Address, TxHash};

use crate::errors::ScriptError;

/// A provider of contract factories, e.g. compilation artifacts plus a signing RPC client
#[allow(async_fn_in_trait)]
pub trait DeploymentBackend {
    /// The factory type produced by this backend
    type Factory: ContractFactory;

    /// Resolve the factory for the contract with the given name.
    ///
    /// Fails with [`ScriptError::FactoryResolution`] if no deployable artifact exists
    /// for the name.
    async fn get_contract_factory(&self, name: &str) -> Result<Self::Factory, ScriptError>;
}

/// A handle capable of deploying one instance of a specific contract
#[allow(async_fn_in_trait)]
pub trait ContractFactory {
    /// The pending deployment type produced by this factory
    type Pending: PendingDeployment;

    /// Submit the deployment, returning a handle to await its confirmation.
    ///
    /// Fails with [`ScriptError::Deployment`] if the backend rejects the transaction.
    async fn deploy(self) -> Result<Self::Pending, ScriptError>;
}

/// A submitted deployment which has not yet been confirmed
#[allow(async_fn_in_trait)]
pub trait PendingDeployment {
    /// The hash of the deployment transaction
    fn transaction_hash(&self) -> TxHash;

    /// Wait until the deployment is confirmed.
    ///
    /// Fails with [`ScriptError::Confirmation`] on timeout or if the transaction reverted.
    async fn deployed(self) -> Result<DeployedContract, ScriptError>;
}

/// A contract whose deployment has been confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    /// The address of the contract
    address: Address,
    /// The hash of the transaction which deployed the contract
    transaction_hash: TxHash,
}

impl DeployedContract {
    /// Record a confirmed deployment
    pub fn new(address: Address, transaction_hash: TxHash) -> Self {
        Self {
            address,
            transaction_hash,
        }
    }

    /// The address of the contract
    pub fn address(&self) -> Address {
        self.address
    }

    /// The hash of the transaction which deployed the contract
    pub fn transaction_hash(&self) -> TxHash {
        self.transaction_hash
    }
}
