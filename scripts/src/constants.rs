//! Constants used in the deploy script

/// The name of the contract artifact deployed by the script
pub const CONTRACT_NAME: &str = "StabiCoreNetwork";

/// The message printed, followed by the contract address, once the deployment is confirmed
pub const DEPLOYED_MESSAGE: &str = "StabiCoreNetwork contract deployed to:";

/// The RPC URL of a local development node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The private key of the first account of a local development node
pub const DEFAULT_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The directory in which Hardhat writes compilation artifacts
pub const DEFAULT_ARTIFACTS_PATH: &str = "artifacts";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The extension of an artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The suffix of the debug files Hardhat writes next to each artifact
pub const DBG_ARTIFACT_SUFFIX: &str = ".dbg.json";

/// The directory holding full compiler inputs & outputs, which are not artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The marker of an unlinked library placeholder in creation bytecode
pub const LIBRARY_PLACEHOLDER_MARKER: &str = "__$";

/// The separator between the source name and the contract name in a fully qualified name
pub const FQN_SEPARATOR: char = ':';

/// The default log filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";
