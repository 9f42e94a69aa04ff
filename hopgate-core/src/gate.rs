//! The multi-hop gate.
//!
//! Holds the cached enabled flag and the listener list. Everything else is
//! derived from the collaborators on each call.

use crate::collaborators::GateCollaborators;
use crate::listener::{EnabledListener, ListenerId, Registration};
use hopgate_types::PermissionState;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info};

struct GateState {
    /// Mirror of `intent && protocol supports multi-hop` as of the last read
    /// or write.
    enabled: bool,
    /// Bumped on every published change.
    generation: u64,
    listeners: Vec<Arc<Registration>>,
    next_listener_id: u64,
}

/// Decides whether multi-hop routing may be configured, tracks the user's
/// multi-hop setting and notifies listeners when it changes.
///
/// Build one per process and share it by `Arc`. The flag, the change
/// generation and the listener list are guarded together; listeners are
/// invoked after the lock is released, so a listener may call back into
/// the gate.
pub struct MultiHopGate {
    collaborators: GateCollaborators,
    state: Mutex<GateState>,
    publisher: watch::Sender<bool>,
}

impl MultiHopGate {
    /// Creates a gate, reading the initial enabled value from the settings
    /// store and the current protocol.
    pub fn new(collaborators: GateCollaborators) -> Self {
        let enabled = collaborators.settings.multihop_intent()
            && collaborators.protocols.current_protocol_supports_multihop();
        let (publisher, _) = watch::channel(enabled);
        debug!(enabled, "multi-hop gate created");

        Self {
            collaborators,
            state: Mutex::new(GateState {
                enabled,
                generation: 0,
                listeners: Vec::new(),
                next_listener_id: 0,
            }),
            publisher,
        }
    }

    /// Returns the collaborators this gate was built from.
    pub fn collaborators(&self) -> &GateCollaborators {
        &self.collaborators
    }

    /// Sets the user's multi-hop intent.
    ///
    /// Setting the current value does nothing. Otherwise the value is
    /// persisted and every listener is notified, in registration order.
    pub fn set_enabled(&self, value: bool) {
        let (generation, targets) = {
            let mut state = self.lock_state();
            if state.enabled == value {
                debug!(enabled = value, "multi-hop already in requested state");
                return;
            }

            state.enabled = value;
            self.collaborators.settings.set_multihop_intent(value);
            state.generation += 1;
            self.publisher.send_replace(value);
            (state.generation, state.listeners.clone())
        };

        info!(enabled = value, listeners = targets.len(), "multi-hop setting changed");
        for registration in &targets {
            registration.deliver(generation, value);
        }
    }

    /// Returns true if the account's plan, session and the current protocol
    /// all allow multi-hop.
    pub fn is_permitted_by_plan(&self) -> bool {
        let c = &self.collaborators;
        c.subscription.has_multihop_entitlement()
            && c.session.has_valid_session()
            && c.protocols.current_protocol_supports_multihop()
    }

    /// Recomputes the enabled flag from the persisted intent and the current
    /// protocol, caches it and returns it.
    ///
    /// When the protocol no longer supports multi-hop the flag drops to
    /// `false` but the persisted intent is left alone, so selecting a capable
    /// protocol again restores it. Listeners are not notified.
    pub fn refresh_enabled(&self) -> bool {
        let mut state = self.lock_state();
        let intent = self.collaborators.settings.multihop_intent();
        let allowed = self.collaborators.protocols.current_protocol_supports_multihop();
        let enabled = intent && allowed;

        if state.enabled != enabled {
            if enabled {
                debug!("multi-hop restored by protocol selection");
            } else if intent {
                debug!("multi-hop suspended: protocol does not support it");
            } else {
                debug!("multi-hop cleared from persisted settings");
            }
        }
        state.enabled = enabled;
        enabled
    }

    /// Current enabled value, revalidated against the protocol.
    pub fn enabled(&self) -> bool {
        self.refresh_enabled()
    }

    /// Classifies whether multi-hop can be configured right now.
    ///
    /// Blocking reasons are checked in priority order and the first match is
    /// returned.
    pub fn permission_state(&self) -> PermissionState {
        let c = &self.collaborators;
        if !c.session.has_valid_session() {
            PermissionState::NotAuthenticated
        } else if !c.subscription.is_subscription_active() {
            PermissionState::SubscriptionNotActive
        } else if c.connection.is_tunnel_active() {
            PermissionState::VpnActive
        } else if !c.protocols.current_protocol_supports_multihop() {
            PermissionState::DisabledByProtocol
        } else {
            PermissionState::Enabled
        }
    }

    /// Registers a listener and immediately calls it with the current value.
    pub fn add_listener<L>(&self, listener: L) -> ListenerId
    where
        L: EnabledListener + 'static,
    {
        let (registration, generation, enabled) = {
            let mut state = self.lock_state();
            let id = ListenerId::new(state.next_listener_id);
            state.next_listener_id += 1;
            let registration = Registration::new(id, Box::new(listener));
            state.listeners.push(registration.clone());
            (registration, state.generation, state.enabled)
        };

        debug!(listener = %registration.id, "listener registered");
        registration.deliver(generation, enabled);
        registration.id
    }

    /// Removes a registration. Returns false if it was not registered.
    ///
    /// A listener removed during a notification, including by itself,
    /// receives nothing further.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.lock_state();
        match state.listeners.iter().position(|r| r.id == id) {
            Some(index) => {
                let registration = state.listeners.remove(index);
                registration.deactivate();
                debug!(listener = %id, "listener removed");
                true
            }
            None => false,
        }
    }

    /// Number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.lock_state().listeners.len()
    }

    /// Returns a receiver that observes every value published by
    /// [`MultiHopGate::set_enabled`].
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.publisher.subscribe()
    }

    fn lock_state(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MultiHopGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("MultiHopGate")
            .field("enabled", &state.enabled)
            .field("generation", &state.generation)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}
