//! Lookup of Hardhat compilation artifacts by contract name

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    json_abi::JsonAbi,
    primitives::{hex, Bytes},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    constants::{
        ARTIFACT_EXTENSION, BUILD_INFO_DIR, DBG_ARTIFACT_SUFFIX, FQN_SEPARATOR,
        LIBRARY_PLACEHOLDER_MARKER,
    },
    errors::ScriptError,
};

/// The subset of a Hardhat artifact file needed to deploy a contract
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    /// The name of the contract
    contract_name: String,
    /// The path of the source file, relative to the project root
    source_name: String,
    /// The contract ABI
    abi: JsonAbi,
    /// The creation bytecode, in hex
    bytecode: String,
    /// Libraries that must be linked into the bytecode before deployment
    #[serde(default)]
    link_references: Map<String, Value>,
}

/// A deployable contract artifact
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// The name of the contract
    pub name: String,
    /// The name of the contract qualified by its source, e.g. `contracts/Foo.sol:Foo`
    pub fully_qualified_name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Whether the contract's constructor expects arguments
    pub fn constructor_has_inputs(&self) -> bool {
        self.abi
            .constructor
            .as_ref()
            .is_some_and(|constructor| !constructor.inputs.is_empty())
    }
}

/// Resolve the deployable artifact for `name` under `artifacts_dir`.
///
/// `name` is either a bare contract name or a fully qualified name of the form
/// `<source name>:<contract name>`.
pub fn load_artifact(artifacts_dir: &Path, name: &str) -> Result<ContractArtifact, ScriptError> {
    let (source_name, contract_name) = split_fully_qualified_name(name);

    let mut candidates = Vec::new();
    for path in artifact_files(artifacts_dir, contract_name)? {
        let artifact = parse_artifact(&path)?;
        if artifact.contract_name != contract_name {
            continue;
        }
        if source_name.is_some_and(|source| source != artifact.source_name) {
            continue;
        }

        debug!("found artifact for {} at {}", name, path.display());
        candidates.push(artifact);
    }

    let artifact = match candidates.len() {
        0 => {
            return Err(ScriptError::FactoryResolution(format!(
                "artifact for contract \"{}\" not found in {}",
                name,
                artifacts_dir.display()
            )))
        }
        1 => candidates.remove(0),
        _ => {
            let fqns = candidates
                .iter()
                .map(|a| fully_qualified_name(&a.source_name, &a.contract_name))
                .collect::<Vec<_>>();
            return Err(ScriptError::FactoryResolution(format!(
                "multiple artifacts for contract \"{}\", use one of the fully qualified names: {}",
                name,
                fqns.join(", ")
            )));
        }
    };

    into_deployable(artifact)
}

// -----------
// | HELPERS |
// -----------

/// Split a possibly fully qualified name into its source name and contract name
fn split_fully_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once(FQN_SEPARATOR) {
        Some((source_name, contract_name)) => (Some(source_name), contract_name),
        None => (None, name),
    }
}

/// Format the fully qualified name of a contract
fn fully_qualified_name(source_name: &str, contract_name: &str) -> String {
    format!("{source_name}{FQN_SEPARATOR}{contract_name}")
}

/// Recursively collect the artifact files named after `contract_name`,
/// skipping debug files and the build info directory
fn artifact_files(dir: &Path, contract_name: &str) -> Result<Vec<PathBuf>, ScriptError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ScriptError::FactoryResolution(format!(
            "could not read artifacts directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::FactoryResolution(e.to_string()))?
            .path();

        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == BUILD_INFO_DIR) {
                continue;
            }
            files.extend(artifact_files(&path, contract_name)?);
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.ends_with(DBG_ARTIFACT_SUFFIX) {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == ARTIFACT_EXTENSION)
            && path.file_stem().is_some_and(|stem| stem == contract_name)
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Read and parse a single artifact file
fn parse_artifact(path: &Path) -> Result<HardhatArtifact, ScriptError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ScriptError::FactoryResolution(format!("could not read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        ScriptError::FactoryResolution(format!("could not parse {}: {}", path.display(), e))
    })
}

/// Check that the artifact can be deployed as-is and decode its bytecode
fn into_deployable(artifact: HardhatArtifact) -> Result<ContractArtifact, ScriptError> {
    let fqn = fully_qualified_name(&artifact.source_name, &artifact.contract_name);

    if !artifact.link_references.is_empty()
        || artifact.bytecode.contains(LIBRARY_PLACEHOLDER_MARKER)
    {
        return Err(ScriptError::FactoryResolution(format!(
            "contract {} is missing links for the libraries: {}",
            fqn,
            artifact
                .link_references
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let bytecode = hex::decode(&artifact.bytecode).map_err(|e| {
        ScriptError::FactoryResolution(format!("invalid bytecode for {}: {}", fqn, e))
    })?;
    if bytecode.is_empty() {
        return Err(ScriptError::FactoryResolution(format!(
            "contract {} is abstract and can't be deployed",
            fqn
        )));
    }

    Ok(ContractArtifact {
        name: artifact.contract_name,
        fully_qualified_name: fqn,
        abi: artifact.abi,
        bytecode: bytecode.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    /// Write an artifact the way Hardhat lays it out, under `<dir>/<source>/<name>.json`
    fn write_artifact(dir: &Path, source_name: &str, contract_name: &str, artifact: Value) {
        let source_dir = dir.join(source_name);
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(
            source_dir.join(format!("{contract_name}.json")),
            artifact.to_string(),
        )
        .unwrap();
    }

    /// A minimal artifact with an empty ABI
    fn artifact_json(source_name: &str, contract_name: &str, bytecode: &str) -> Value {
        json!({
            "_format": "hh-sol-artifact-1",
            "contractName": contract_name,
            "sourceName": source_name,
            "abi": [],
            "bytecode": bytecode,
            "deployedBytecode": "0x",
            "linkReferences": {},
            "deployedLinkReferences": {}
        })
    }

    /// Assert that resolution failed with a message containing `needle`
    fn expect_resolution_err(res: Result<ContractArtifact, ScriptError>, needle: &str) {
        match res {
            Err(ScriptError::FactoryResolution(msg)) => {
                assert!(msg.contains(needle), "unexpected message: {msg}")
            }
            other => panic!("expected factory resolution error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_by_name() {
        let dir = TempDir::new().unwrap();
        write_artifact(
            dir.path(),
            "contracts/StabiCoreNetwork.sol",
            "StabiCoreNetwork",
            artifact_json("contracts/StabiCoreNetwork.sol", "StabiCoreNetwork", "0x6080"),
        );

        let artifact = load_artifact(dir.path(), "StabiCoreNetwork").unwrap();
        assert_eq!(artifact.name, "StabiCoreNetwork");
        assert_eq!(
            artifact.fully_qualified_name,
            "contracts/StabiCoreNetwork.sol:StabiCoreNetwork"
        );
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80]);
        assert!(!artifact.constructor_has_inputs());
    }

    #[test]
    fn test_debug_files_and_build_info_ignored() {
        let dir = TempDir::new().unwrap();
        let source_dir = dir.path().join("contracts/StabiCoreNetwork.sol");
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(
            source_dir.join("StabiCoreNetwork.dbg.json"),
            r#"{"_format":"hh-sol-dbg-1","buildInfo":"../../build-info/abc.json"}"#,
        )
        .unwrap();
        let build_info = dir.path().join(BUILD_INFO_DIR);
        fs::create_dir_all(&build_info).unwrap();
        fs::write(build_info.join("StabiCoreNetwork.json"), "{}").unwrap();

        expect_resolution_err(load_artifact(dir.path(), "StabiCoreNetwork"), "not found");
    }

    #[test]
    fn test_missing_artifact() {
        let dir = TempDir::new().unwrap();
        write_artifact(
            dir.path(),
            "contracts/Other.sol",
            "Other",
            artifact_json("contracts/Other.sol", "Other", "0x6080"),
        );

        expect_resolution_err(load_artifact(dir.path(), "StabiCoreNetwork"), "not found");
    }

    #[test]
    fn test_missing_artifacts_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        expect_resolution_err(
            load_artifact(&missing, "StabiCoreNetwork"),
            "could not read artifacts directory",
        );
    }

    #[test]
    fn test_ambiguous_name() {
        let dir = TempDir::new().unwrap();
        for source in ["contracts/A.sol", "contracts/B.sol"] {
            write_artifact(
                dir.path(),
                source,
                "StabiCoreNetwork",
                artifact_json(source, "StabiCoreNetwork", "0x6080"),
            );
        }

        expect_resolution_err(
            load_artifact(dir.path(), "StabiCoreNetwork"),
            "contracts/A.sol:StabiCoreNetwork, contracts/B.sol:StabiCoreNetwork",
        );

        let artifact = load_artifact(dir.path(), "contracts/B.sol:StabiCoreNetwork").unwrap();
        assert_eq!(
            artifact.fully_qualified_name,
            "contracts/B.sol:StabiCoreNetwork"
        );
    }

    #[test]
    fn test_abstract_contract() {
        let dir = TempDir::new().unwrap();
        write_artifact(
            dir.path(),
            "contracts/IStabiCoreNetwork.sol",
            "StabiCoreNetwork",
            artifact_json("contracts/IStabiCoreNetwork.sol", "StabiCoreNetwork", "0x"),
        );

        expect_resolution_err(load_artifact(dir.path(), "StabiCoreNetwork"), "abstract");
    }

    #[test]
    fn test_unlinked_library() {
        let dir = TempDir::new().unwrap();
        let mut artifact = artifact_json(
            "contracts/StabiCoreNetwork.sol",
            "StabiCoreNetwork",
            "0x6080__$3f1a2b$__6040",
        );
        artifact["linkReferences"] = json!({
            "contracts/Math.sol": { "Math": [{ "length": 20, "start": 2 }] }
        });
        write_artifact(
            dir.path(),
            "contracts/StabiCoreNetwork.sol",
            "StabiCoreNetwork",
            artifact,
        );

        expect_resolution_err(
            load_artifact(dir.path(), "StabiCoreNetwork"),
            "missing links for the libraries: contracts/Math.sol",
        );
    }

    #[test]
    fn test_malformed_artifact() {
        let dir = TempDir::new().unwrap();
        let source_dir = dir.path().join("contracts/StabiCoreNetwork.sol");
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(source_dir.join("StabiCoreNetwork.json"), "{ not json").unwrap();

        expect_resolution_err(
            load_artifact(dir.path(), "StabiCoreNetwork"),
            "could not parse",
        );
    }

    #[test]
    fn test_constructor_inputs_detected() {
        let dir = TempDir::new().unwrap();
        let mut artifact = artifact_json(
            "contracts/StabiCoreNetwork.sol",
            "StabiCoreNetwork",
            "0x6080",
        );
        artifact["abi"] = json!([{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [{ "name": "owner", "type": "address", "internalType": "address" }]
        }]);
        write_artifact(
            dir.path(),
            "contracts/StabiCoreNetwork.sol",
            "StabiCoreNetwork",
            artifact,
        );

        let artifact = load_artifact(dir.path(), "StabiCoreNetwork").unwrap();
        assert!(artifact.constructor_has_inputs());
    }
}
