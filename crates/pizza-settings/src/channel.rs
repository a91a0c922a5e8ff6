//! # Settings Change Channel
//!
//! Broadcasts a new [`EffectiveSettings`] pair to every open comparison view.
//!
//! ## Delivery Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SettingsStore::save_override                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  publish(&settings) ──► snapshot listeners ──► release lock             │
//! │                               │                                         │
//! │              ┌────────────────┼────────────────┐                        │
//! │              ▼                ▼                ▼                        │
//! │          listener #1      listener #2      listener #3                  │
//! │          (card 1)         (card 2)         (summary)                    │
//! │                                                                         │
//! │  Synchronous, in subscription order, same argument for everyone.        │
//! │  A listener may subscribe or unsubscribe while being called; the        │
//! │  change applies from the next publish.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The channel is a cheap handle. Clone it into every constructor that needs
//! it; all clones share one listener list.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use pizza_core::EffectiveSettings;

/// A settings-change callback.
pub type SettingsListener = Arc<dyn Fn(&EffectiveSettings) + Send + Sync>;

/// Handle returned by [`SettingsChangeChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct ChannelState {
    next_id: u64,
    listeners: Vec<(SubscriptionId, SettingsListener)>,
    published: usize,
}

/// Owned fan-out for settings changes.
#[derive(Clone, Default)]
pub struct SettingsChangeChannel {
    state: Arc<Mutex<ChannelState>>,
}

impl SettingsChangeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` and returns the id needed to remove it.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&EffectiveSettings) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Arc::new(listener)));
        debug!(?id, subscribers = state.listeners.len(), "Settings listener subscribed");
        id
    }

    /// Removes a listener. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock();
        let before = state.listeners.len();
        state.listeners.retain(|(existing, _)| *existing != id);
        let removed = state.listeners.len() != before;
        if removed {
            debug!(?id, subscribers = state.listeners.len(), "Settings listener unsubscribed");
        }
        removed
    }

    /// Calls every listener subscribed right now with `settings`.
    ///
    /// Returns how many listeners were called.
    pub fn publish(&self, settings: &EffectiveSettings) -> usize {
        let listeners: Vec<SettingsListener> = {
            let mut state = self.lock();
            state.published += 1;
            state
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };

        debug!(%settings, listeners = listeners.len(), "Publishing settings change");
        for listener in &listeners {
            listener(settings);
        }
        listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Number of `publish` calls on this channel or any of its clones.
    pub fn publish_count(&self) -> usize {
        self.lock().published
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SettingsChangeChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("SettingsChangeChannel")
            .field("subscribers", &state.listeners.len())
            .field("published", &state.published)
            .finish()
    }
}
