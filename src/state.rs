//! Shared lights state for external observation
//!
//! Renderers usually live on another task than the engine. The engine
//! publishes a copy of the bulb sequence here after every step and the
//! renderer takes a [`LightsSnapshot`] once per frame.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::Vec;

use crate::bulb::BulbState;
use crate::models::LightsSnapshot;
use crate::mode::LightMode;

/// Last published lights state, guarded by a critical section
pub struct SharedBulbs<const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<LightsSnapshot<N>>>,
}

impl<const N: usize> SharedBulbs<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(LightsSnapshot {
                bulbs: Vec::new(),
                mode: LightMode::Classic,
                is_active: false,
            })),
        }
    }

    /// Replace the published state
    pub fn publish(&self, bulbs: &[BulbState], mode: LightMode, is_active: bool) {
        self.inner.lock(|cell| {
            let mut snapshot = cell.borrow_mut();
            snapshot.bulbs.clear();
            for bulb in bulbs.iter().take(N) {
                let _ = snapshot.bulbs.push(*bulb);
            }
            snapshot.mode = mode;
            snapshot.is_active = is_active;
        });
    }

    /// Copy of the last published state
    pub fn snapshot(&self) -> LightsSnapshot<N> {
        self.inner.lock(|cell| cell.borrow().clone())
    }

    /// Number of bulbs in the last published state
    pub fn len(&self) -> usize {
        self.inner.lock(|cell| cell.borrow().bulbs.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for SharedBulbs<N> {
    fn default() -> Self {
        Self::new()
    }
}
