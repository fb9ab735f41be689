//! Script for deploying the StabiCoreNetwork contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod backend;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod evm;
pub mod runner;
