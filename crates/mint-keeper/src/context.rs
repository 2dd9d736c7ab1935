use mint_store::KvStore;

use crate::events::Event;

/// Execution context for one block: the state store and the events
/// emitted so far. Lives only as long as the block being processed.
pub struct Context<'a> {
    block_height: u64,
    store: &'a mut KvStore,
    events: Vec<Event>,
}

impl<'a> Context<'a> {
    pub fn new(block_height: u64, store: &'a mut KvStore) -> Self {
        Self {
            block_height,
            store,
            events: Vec::new(),
        }
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn store(&self) -> &KvStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut KvStore {
        &mut *self.store
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}
