//! Shared test doubles for pool and registry tests

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use glam::{Quat, Vec3};

use crate::loader::EntityTemplate;
use crate::pool::PoolContainer;

use super::contract::{EntityOwner, PooledEntity};
use super::transform::Transform;

/// One recorded lifecycle call, tagged with the entity's id
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Spawned(u64),
    Returned(u64),
    Destroyed(u64),
    Activated(u64, bool),
    Moved(u64),
}

pub(crate) type EventLog = Arc<Mutex<Vec<Event>>>;

pub(crate) fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

static NEXT_PROBE_ID: AtomicU64 = AtomicU64::new(1);

/// Entity spy: records every lifecycle call into a shared log
pub(crate) struct ProbeEntity {
    pub id: u64,
    pub active: bool,
    pub transform: Transform,
    pub owner: Option<EntityOwner>,
    pub log: EventLog,
}

impl ProbeEntity {
    fn record(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

impl PooledEntity for ProbeEntity {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.record(Event::Activated(self.id, active));
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_transform(&mut self, position: Vec3, rotation: Quat) {
        self.transform.position = position;
        self.transform.rotation = rotation;
        self.record(Event::Moved(self.id));
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn on_spawn(&mut self) {
        self.record(Event::Spawned(self.id));
    }

    fn on_return(&mut self) {
        self.record(Event::Returned(self.id));
    }

    fn on_destroy(&mut self) {
        self.record(Event::Destroyed(self.id));
    }

    fn bind(&mut self, owner: EntityOwner) {
        assert!(self.owner.is_none(), "entity bound twice");
        self.owner = Some(owner);
    }

    fn owner(&self) -> Option<&EntityOwner> {
        self.owner.as_ref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Template double producing [`ProbeEntity`] instances.
///
/// With `poolable` unset, `instantiate` yields `None`, standing in for a
/// template whose instances lack the pooled-entity capability set.
pub(crate) struct ProbeTemplate {
    pub log: EventLog,
    pub poolable: bool,
}

impl ProbeTemplate {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            poolable: true,
        }
    }
}

impl EntityTemplate for ProbeTemplate {
    fn instantiate(&self, _container: &PoolContainer) -> Option<Box<dyn PooledEntity>> {
        if !self.poolable {
            return None;
        }
        Some(Box::new(ProbeEntity {
            id: NEXT_PROBE_ID.fetch_add(1, Ordering::Relaxed),
            active: false,
            transform: Transform::default(),
            owner: None,
            log: Arc::clone(&self.log),
        }))
    }
}

/// The id of a probe entity behind a trait object
pub(crate) fn probe_id(entity: &dyn PooledEntity) -> u64 {
    entity
        .as_any()
        .downcast_ref::<ProbeEntity>()
        .expect("not a ProbeEntity")
        .id
}
