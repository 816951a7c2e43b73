//! Integration test suite for frontplate
//!
//! End-to-end tests for the template engine and the `frontplate` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **clone**: creating notes from templates through the library
//! - **insert**: splicing templates into open documents through the library
//! - **cli**: the `frontplate` binary and its subcommands

use assert_cmd::Command;
use frontplate::test_utils::TestVault;

mod cli;
mod clone;
mod insert;

/// A `frontplate` command bound to `vault`'s config and root, with stdin closed.
pub fn frontplate(vault: &TestVault) -> Command {
    let mut cmd = Command::cargo_bin("frontplate").unwrap();
    cmd.arg("--config")
        .arg(&vault.config_path)
        .arg("--vault")
        .arg(vault.vault_path())
        .env_remove("RUST_LOG")
        .env_remove("FRONTPLATE_CONFIG")
        .write_stdin("");
    cmd
}
