//! Definitions of errors that can occur while deploying the StabiCoreNetwork contract

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error turning the runtime configuration into an RPC client
    ClientInitialization(String),
    /// Error resolving a contract factory from the compilation artifacts
    FactoryResolution(String),
    /// Error submitting the deployment transaction
    Deployment(String),
    /// Error waiting for the deployment transaction to be confirmed
    Confirmation(String),
    /// Error writing the deployed address to the output
    Report(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::FactoryResolution(s) => {
                write!(f, "error resolving contract factory: {}", s)
            }
            ScriptError::Deployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::Confirmation(s) => write!(f, "error confirming deployment: {}", s),
            ScriptError::Report(s) => write!(f, "error reporting deployment: {}", s),
        }
    }
}

impl Error for ScriptError {}
