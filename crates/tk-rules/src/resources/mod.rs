//! Per-character registry of limited-use class resources.
//!
//! The registry is owned by exactly one [`CharacterRecord`]. A turn works
//! on a [`ResourceRegistry::snapshot`] and the character takes it back at
//! the end of the turn.
//!
//! [`CharacterRecord`]: crate::sheet::CharacterRecord

pub mod pool;

pub use pool::{Recovery, ResourcePool, ResourceSpec, RestKind, UsesFormula};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ability::AbilityScores;
use crate::error::{RulesError, RulesResult};

/// All resource pools belonging to one character, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRegistry {
    pools: BTreeMap<String, ResourcePool>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build fresh pools for a set of class resource specs.
    pub fn from_specs(specs: &[ResourceSpec], level: u32, scores: &AbilityScores) -> Self {
        let pools = specs
            .iter()
            .map(|spec| {
                (
                    spec.name.clone(),
                    ResourcePool::from_spec(spec, level, scores),
                )
            })
            .collect();
        Self { pools }
    }

    /// Add (or replace) a pool.
    pub fn insert(&mut self, pool: ResourcePool) {
        self.pools.insert(pool.name.clone(), pool);
    }

    /// Look up a pool by name.
    pub fn get(&self, name: &str) -> RulesResult<&ResourcePool> {
        self.pools
            .get(name)
            .ok_or_else(|| RulesError::UnknownResource(name.to_string()))
    }

    /// Iterate over all pools in name order.
    pub fn pools(&self) -> impl Iterator<Item = &ResourcePool> {
        self.pools.values()
    }

    /// Number of pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns true if the registry has no pools.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Spend one use of a pool and return its new state.
    pub fn consume(&mut self, name: &str) -> RulesResult<ResourcePool> {
        let pool = self
            .pools
            .get_mut(name)
            .ok_or_else(|| RulesError::UnknownResource(name.to_string()))?;
        if !pool.spend() {
            return Err(RulesError::ResourceExhausted(name.to_string()));
        }
        tracing::trace!(
            resource = name,
            used = pool.current_uses,
            max = pool.max_uses,
            "resource consumed"
        );
        Ok(pool.clone())
    }

    /// Reset every pool the rest restores. Returns the names reset.
    pub fn recover(&mut self, rest: RestKind) -> Vec<String> {
        let mut recovered = Vec::new();
        for pool in self.pools.values_mut() {
            if pool.recovery.recovers_on(rest) {
                pool.reset();
                recovered.push(pool.name.clone());
            }
        }
        tracing::debug!(%rest, pools = ?recovered, "resources recovered");
        recovered
    }

    /// Give back spent uses outside of a rest.
    ///
    /// This is the only way pools tagged [`Recovery::None`] ever refill.
    pub fn restore(&mut self, name: &str, amount: u32) -> RulesResult<&ResourcePool> {
        let pool = self
            .pools
            .get_mut(name)
            .ok_or_else(|| RulesError::UnknownResource(name.to_string()))?;
        pool.give_back(amount);
        Ok(pool)
    }

    /// Recompute every maximum after a level or score change.
    pub fn rescale(&mut self, level: u32, scores: &AbilityScores) {
        for pool in self.pools.values_mut() {
            pool.rescale(level, scores);
        }
    }

    /// An independent copy for a turn to consume from.
    pub fn snapshot(&self) -> ResourceRegistry {
        self.clone()
    }
}

/// Create a registry for a class's resource mechanics.
pub fn create_resource_registry(
    mechanics: &[ResourceSpec],
    level: u32,
    scores: &AbilityScores,
) -> ResourceRegistry {
    ResourceRegistry::from_specs(mechanics, level, scores)
}

/// Return a copy of `registry` with the rest's pools recovered.
pub fn recover_resources(registry: &ResourceRegistry, rest: RestKind) -> ResourceRegistry {
    let mut recovered = registry.clone();
    recovered.recover(rest);
    recovered
}
