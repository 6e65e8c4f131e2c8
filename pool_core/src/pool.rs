use crate::config::{load_specs, PooledObjectSpec};
use crate::object::{DeactivateReason, PoolEvent, PooledObject, PooledObjectId};
use crate::{ConfigError, PoolError};
use sim_core::{EntityId, Scheduler, Transform};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
struct PoolSlots {
    /// Flat entry indices, in pool index order
    slots: Vec<usize>,
    lifespan: f64,
}

/// All pools owned by one character, keyed by object name
#[derive(Debug, Default)]
pub struct ObjectPool {
    entries: Vec<PooledObject>,
    pools: HashMap<String, PoolSlots>,
    lifespans: Scheduler<PooledObjectId>,
    events: Vec<PoolEvent>,
}

impl ObjectPool {
    /// Create an allocator with no pools
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate `spec.pool_size` inactive entries under `spec.object_name`
    pub fn register_spec(&mut self, spec: &PooledObjectSpec) -> Result<(), PoolError> {
        spec.validate()?;
        if self.is_registered(&spec.object_name) {
            return Err(PoolError::DuplicateSpec(spec.object_name.clone()));
        }

        let mut slots = Vec::with_capacity(spec.pool_size);
        for pool_index in 0..spec.pool_size {
            slots.push(self.entries.len());
            self.entries
                .push(PooledObject::new(&spec.object_name, &spec.template, pool_index));
        }
        self.pools.insert(
            spec.object_name.clone(),
            PoolSlots {
                slots,
                lifespan: spec.lifespan,
            },
        );

        tracing::debug!(
            "Registered pool '{}' with {} entries",
            spec.object_name,
            spec.pool_size
        );
        Ok(())
    }

    /// Register every spec found in a `.toml` or `.json` data table
    pub fn register_from_file(&mut self, path: &Path) -> Result<usize, ConfigError> {
        let specs = load_specs(path)?;
        for spec in &specs {
            self.register_spec(spec).map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                path: path.to_path_buf(),
            })?;
        }
        Ok(specs.len())
    }

    /// Check if a pool exists under `name`
    pub fn is_registered(&self, name: &str) -> bool {
        self.pools.contains_key(name)
    }

    /// Number of entries allocated for `name`
    pub fn capacity(&self, name: &str) -> usize {
        self.pools.get(name).map_or(0, |pool| pool.slots.len())
    }

    /// Number of entries of `name` currently handed out
    pub fn active_count(&self, name: &str) -> usize {
        self.pools.get(name).map_or(0, |pool| {
            pool.slots
                .iter()
                .filter(|&&slot| self.entries[slot].active)
                .count()
        })
    }

    /// Look up an entry
    pub fn get(&self, id: PooledObjectId) -> Option<&PooledObject> {
        self.entries.get(id.0)
    }

    /// Hand out the first inactive entry of `name`
    ///
    /// The entry becomes active at `transform`, owned by `owner`, and its
    /// lifespan timer is armed when the spec carries a lifespan.
    pub fn acquire(
        &mut self,
        name: &str,
        owner: Option<EntityId>,
        transform: Transform,
    ) -> Result<PooledObjectId, PoolError> {
        let pool = self
            .pools
            .get(name)
            .ok_or_else(|| PoolError::UnknownPool(name.to_string()))?;
        let lifespan = pool.lifespan;

        let slot = pool
            .slots
            .iter()
            .copied()
            .find(|&slot| !self.entries[slot].active)
            .ok_or_else(|| PoolError::PoolExhausted(name.to_string()))?;

        let id = PooledObjectId(slot);
        let object = &mut self.entries[slot];
        object.active = true;
        object.owner = owner;
        object.transform = transform;
        object.lifespan = lifespan;
        if object.lifespan > 0.0 {
            object.lifespan_timer = Some(self.lifespans.schedule(object.lifespan, id));
        }

        tracing::trace!("Acquired '{}'[{}]", name, object.pool_index);
        Ok(id)
    }

    /// Re-arm the lifespan of an active entry
    ///
    /// A lifespan of 0 keeps the entry alive until it is released.
    pub fn set_lifespan(&mut self, id: PooledObjectId, lifespan: f64) -> bool {
        let Some(object) = self.entries.get_mut(id.0) else {
            return false;
        };
        if !object.active {
            return false;
        }

        if let Some(handle) = object.lifespan_timer.take() {
            self.lifespans.cancel(handle);
        }
        object.lifespan = lifespan.max(0.0);
        if object.lifespan > 0.0 {
            object.lifespan_timer = Some(self.lifespans.schedule(object.lifespan, id));
        }
        true
    }

    /// Return an entry to its pool before its lifespan runs out
    ///
    /// Returns false if the entry was already inactive.
    pub fn release(&mut self, id: PooledObjectId) -> bool {
        self.deactivate(id, DeactivateReason::Released)
    }

    /// Release every active entry owned by `owner`
    pub fn release_owned_by(&mut self, owner: EntityId) -> usize {
        let owned: Vec<PooledObjectId> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, o)| o.active && o.owner == Some(owner))
            .map(|(slot, _)| PooledObjectId(slot))
            .collect();

        owned
            .into_iter()
            .filter(|&id| self.deactivate(id, DeactivateReason::Released))
            .count()
    }

    /// Advance lifespan timers, deactivating entries whose time ran out
    pub fn tick(&mut self, delta: f64) -> usize {
        let expired = self.lifespans.advance(delta);
        expired
            .into_iter()
            .filter(|&id| {
                if let Some(object) = self.entries.get_mut(id.0) {
                    // The handle already fired; forget it so deactivate does not cancel
                    object.lifespan_timer = None;
                }
                self.deactivate(id, DeactivateReason::Expired)
            })
            .count()
    }

    /// Take all notifications raised since the last drain
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    fn deactivate(&mut self, id: PooledObjectId, reason: DeactivateReason) -> bool {
        let Some(object) = self.entries.get_mut(id.0) else {
            return false;
        };
        if !object.active {
            return false;
        }

        if let Some(handle) = object.lifespan_timer.take() {
            self.lifespans.cancel(handle);
        }
        let owner = object.owner.take();
        object.active = false;
        object.lifespan = 0.0;

        tracing::trace!(
            "Deactivated '{}'[{}] ({:?})",
            object.object_name,
            object.pool_index,
            reason
        );
        self.events.push(PoolEvent::Deactivated {
            id,
            object_name: object.object_name.clone(),
            owner,
            reason,
        });
        true
    }
}
