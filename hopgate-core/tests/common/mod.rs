//! Shared test helpers for gate tests.

#![allow(dead_code)]

use hopgate_core::{
    ConnectionStatusProvider, GateCollaborators, MultiHopGate, ProtocolRegistry, SessionProvider,
    SubscriptionProvider,
};
use hopgate_settings::MemorySettingsStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Independently switchable collaborator signals.
#[derive(Debug, Default)]
pub struct Signals {
    pub session: AtomicBool,
    pub subscription_active: AtomicBool,
    pub entitlement: AtomicBool,
    pub tunnel_active: AtomicBool,
    pub protocol_multihop: AtomicBool,
}

impl Signals {
    /// Signed in, active Pro subscription, tunnel down, capable protocol.
    pub fn all_clear() -> Self {
        let signals = Self::default();
        signals.session.store(true, Ordering::SeqCst);
        signals.subscription_active.store(true, Ordering::SeqCst);
        signals.entitlement.store(true, Ordering::SeqCst);
        signals.protocol_multihop.store(true, Ordering::SeqCst);
        signals
    }

    pub fn set_session(&self, v: bool) {
        self.session.store(v, Ordering::SeqCst);
    }

    pub fn set_subscription_active(&self, v: bool) {
        self.subscription_active.store(v, Ordering::SeqCst);
    }

    pub fn set_entitlement(&self, v: bool) {
        self.entitlement.store(v, Ordering::SeqCst);
    }

    pub fn set_tunnel_active(&self, v: bool) {
        self.tunnel_active.store(v, Ordering::SeqCst);
    }

    pub fn set_protocol_multihop(&self, v: bool) {
        self.protocol_multihop.store(v, Ordering::SeqCst);
    }
}

impl SessionProvider for Signals {
    fn has_valid_session(&self) -> bool {
        self.session.load(Ordering::SeqCst)
    }
}

impl SubscriptionProvider for Signals {
    fn is_subscription_active(&self) -> bool {
        self.subscription_active.load(Ordering::SeqCst)
    }

    fn has_multihop_entitlement(&self) -> bool {
        self.entitlement.load(Ordering::SeqCst)
    }
}

impl ConnectionStatusProvider for Signals {
    fn is_tunnel_active(&self) -> bool {
        self.tunnel_active.load(Ordering::SeqCst)
    }
}

impl ProtocolRegistry for Signals {
    fn current_protocol_supports_multihop(&self) -> bool {
        self.protocol_multihop.load(Ordering::SeqCst)
    }
}

pub struct Fixture {
    pub signals: Arc<Signals>,
    pub store: Arc<MemorySettingsStore>,
    pub gate: Arc<MultiHopGate>,
}

/// Builds a gate over the given signals and persisted intent.
pub fn fixture(signals: Signals, intent: bool) -> Fixture {
    let signals = Arc::new(signals);
    let store = Arc::new(MemorySettingsStore::with_intent(intent));
    let gate = Arc::new(MultiHopGate::new(GateCollaborators {
        session: signals.clone(),
        subscription: signals.clone(),
        connection: signals.clone(),
        protocols: signals.clone(),
        settings: store.clone(),
    }));
    Fixture {
        signals,
        store,
        gate,
    }
}

/// A listener that records every value it receives.
pub fn recorder() -> (Arc<Mutex<Vec<bool>>>, impl Fn(bool) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |v: bool| sink.lock().unwrap().push(v))
}
