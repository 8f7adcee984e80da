// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability registration.
//!
//! For each contract the host wants, the registrar walks the activated
//! modules in discovery order and collects their capabilities in declaration
//! order. `(contract, name)` pairs are unique: later duplicates are dropped.

use std::collections::HashSet;

use shelf_core::{ContractKind, ShelfError};
use tracing::{debug, info, warn};

use crate::module::{Capability, HostContext};
use crate::scanner::LoadedModule;

/// A capability accepted for registration, tagged with its module.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Entry-point name of the declaring module.
    pub module: String,
    pub capability: Capability,
}

impl Registration {
    pub fn contract(&self) -> ContractKind {
        self.capability.contract()
    }
}

/// Collects capabilities from activated modules.
pub struct CapabilityRegistrar<'a> {
    host: &'a HostContext,
}

impl<'a> CapabilityRegistrar<'a> {
    pub fn new(host: &'a HostContext) -> Self {
        Self { host }
    }

    /// Register capabilities, grouped by contract in the host's contract order.
    pub fn register(&self, modules: &[LoadedModule]) -> Vec<Registration> {
        if self.host.contracts.is_empty() {
            warn!("no contracts requested, nothing to register");
            return Vec::new();
        }

        let mut registrations = Vec::new();
        let mut seen: HashSet<(ContractKind, String)> = HashSet::new();

        for &contract in &self.host.contracts {
            let before = registrations.len();
            for module in modules {
                let capabilities = match module.module.capabilities(self.host) {
                    Ok(capabilities) => capabilities,
                    Err(e) => {
                        let err = ShelfError::CapabilityEnumeration {
                            module: module.name().to_string(),
                            contract: contract.to_string(),
                            message: e.to_string(),
                        };
                        warn!(error = %err, "skipping module for this contract");
                        continue;
                    }
                };

                for capability in capabilities.into_iter().filter(|c| c.contract() == contract) {
                    if capability.name().trim().is_empty() {
                        warn!(
                            module = %module.name(),
                            %contract,
                            "capability with a blank name rejected"
                        );
                        continue;
                    }
                    if !seen.insert((contract, capability.name().to_string())) {
                        warn!(
                            module = %module.name(),
                            %contract,
                            capability = %capability.name(),
                            "duplicate capability name, keeping the first registration"
                        );
                        continue;
                    }
                    debug!(
                        module = %module.name(),
                        %contract,
                        capability = %capability.name(),
                        "capability registered"
                    );
                    registrations.push(Registration {
                        module: module.name().to_string(),
                        capability,
                    });
                }
            }
            info!(
                %contract,
                count = registrations.len() - before,
                "plugin loading completed"
            );
        }

        registrations
    }
}
