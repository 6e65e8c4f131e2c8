use sim_core::{EntityId, TimerHandle, Transform};
use serde::{Deserialize, Serialize};

/// Stable handle to one pooled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PooledObjectId(pub(crate) usize);

impl PooledObjectId {
    /// Flat slot index across all pools
    pub fn slot(&self) -> usize {
        self.0
    }
}

/// A pre-allocated, reusable world entity
#[derive(Debug, Clone)]
pub struct PooledObject {
    pub(crate) active: bool,
    pub(crate) owner: Option<EntityId>,
    pub(crate) object_name: String,
    pub(crate) template: String,
    pub(crate) lifespan: f64,
    pub(crate) pool_index: usize,
    pub(crate) transform: Transform,
    pub(crate) lifespan_timer: Option<TimerHandle>,
}

impl PooledObject {
    pub(crate) fn new(object_name: &str, template: &str, pool_index: usize) -> Self {
        PooledObject {
            active: false,
            owner: None,
            object_name: object_name.to_string(),
            template: template.to_string(),
            lifespan: 0.0,
            pool_index,
            transform: Transform::default(),
            lifespan_timer: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Seconds of life granted at the last activation (0 = unbounded)
    pub fn lifespan(&self) -> f64 {
        self.lifespan
    }

    /// Index within the entry's own pool
    pub fn pool_index(&self) -> usize {
        self.pool_index
    }

    /// Spawn transform handed over on acquire
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

/// Why an entry went back to its pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivateReason {
    Released,
    Expired,
}

/// Notifications raised by the pool
#[derive(Debug, Clone, PartialEq)]
pub enum PoolEvent {
    Deactivated {
        id: PooledObjectId,
        object_name: String,
        /// Owner at the moment of deactivation
        owner: Option<EntityId>,
        reason: DeactivateReason,
    },
}
