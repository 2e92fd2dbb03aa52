// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for device update subscriptions.
//!
//! This module provides the core types for managing update listeners:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`DeviceUpdate`] - Snapshot payload handed to listeners
//! - [`CallbackRegistry`] - Registry that stores and dispatches listeners

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::RwLock;

use crate::state::DeviceState;

/// Unique identifier for a subscription.
///
/// This ID is returned when registering a listener and can be used to
/// unsubscribe later. IDs are unique within a device's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Snapshot handed to update listeners.
///
/// Contains the device identity and a clone of the full typed state after
/// the triggering update was applied, so listeners never reach back into
/// the live device under its lock.
#[derive(Debug, Clone)]
pub struct DeviceUpdate {
    /// Serial number of the updated device.
    pub serial_number: String,
    /// Channel id of the updated device.
    pub channel_id: String,
    /// Typed state after the update was applied.
    pub state: DeviceState,
    /// When the update was decoded.
    pub at: DateTime<Utc>,
}

/// Type alias for stored update listeners.
type UpdateCallback = Arc<dyn Fn(DeviceUpdate) -> BoxFuture<'static, ()> + Send + Sync>;

/// Registry for managing device update listeners.
///
/// Thread-safe via `parking_lot::RwLock`; the lock is never held across
/// an await point. Listeners are wrapped in `Arc` so dispatch can clone
/// them out of the registry cheaply.
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Registered update listeners.
    callbacks: RwLock<HashMap<SubscriptionId, UpdateCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Generates a new unique subscription ID.
    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers an asynchronous update listener.
    ///
    /// Multiple registrations are allowed; each receives every update.
    pub fn register<F, Fut>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceUpdate) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id();
        let callback: UpdateCallback = Arc::new(move |update| callback(update).boxed());
        self.callbacks.write().insert(id, callback);
        id
    }

    /// Unregisters a listener by its subscription ID.
    ///
    /// Returns `true` if a listener was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    /// Clears all listeners.
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// Returns `true` if there are no registered listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.read().is_empty()
    }

    /// Dispatches an update to all registered listeners.
    ///
    /// Each listener runs as its own spawned task and the group is awaited
    /// before this method returns. Listener order is unspecified; a
    /// panicking listener is logged and does not prevent the others from
    /// running.
    pub async fn notify(&self, update: DeviceUpdate) {
        let callbacks: Vec<UpdateCallback> = self.callbacks.read().values().cloned().collect();
        if callbacks.is_empty() {
            return;
        }

        let mut tasks = Vec::with_capacity(callbacks.len());
        for callback in callbacks {
            tasks.push(tokio::spawn(callback(update.clone())));
        }
        for task in tasks {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "device update listener failed");
            }
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
