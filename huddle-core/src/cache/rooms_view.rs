//! Rooms view port
//!
//! The UI's reactive store is reached only through [`RoomsViewStore`], so the
//! coordinator can be driven against any state container.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::models::RoomsView;

pub trait RoomsViewStore: Send + Sync {
    /// Snapshot of the current view
    fn rooms_view(&self) -> RoomsView;

    /// Replace the view wholesale
    fn set_rooms_view(&self, view: RoomsView);

    /// Apply an edit to the view. Implementations must not hold locks while
    /// calling back into the store.
    fn update(&self, edit: &mut dyn FnMut(&mut RoomsView)) {
        let mut view = self.rooms_view();
        edit(&mut view);
        self.set_rooms_view(view);
    }
}

/// Process-local view backed by a lock
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomsView {
    inner: Arc<RwLock<RoomsView>>,
}

impl InMemoryRoomsView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomsViewStore for InMemoryRoomsView {
    fn rooms_view(&self) -> RoomsView {
        self.inner.read().clone()
    }

    fn set_rooms_view(&self, view: RoomsView) {
        *self.inner.write() = view;
    }

    fn update(&self, edit: &mut dyn FnMut(&mut RoomsView)) {
        let mut view = self.inner.write();
        edit(&mut *view);
    }
}
