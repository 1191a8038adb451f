//! Kind-keyed registry of ability factories.

use arena_core::config::Tuning;
use arena_core::enums::AbilityKind;

use super::blaster::BlasterState;
use super::magnet::MagnetState;
use super::seekers::SeekersState;
use super::shockwave::ShockwaveState;
use super::trail::TrailState;
use super::AbilityState;

/// Builds fresh per-instance state from the run's tuning.
pub type AbilityFactory = fn(&Tuning) -> AbilityState;

/// Registered kinds, in registration order. That order is the update dispatch order.
#[derive(Clone, Default)]
pub struct AbilityRegistry {
    entries: Vec<(AbilityKind, AbilityFactory)>,
}

impl std::fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AbilityKind::Blaster, |t| AbilityState::Blaster(BlasterState::new(t)));
        registry.register(AbilityKind::Trail, |t| AbilityState::Trail(TrailState::new(t)));
        registry.register(AbilityKind::Seekers, |t| AbilityState::Seekers(SeekersState::new(t)));
        registry.register(AbilityKind::Shockwave, |t| {
            AbilityState::Shockwave(ShockwaveState::new(t))
        });
        registry.register(AbilityKind::Magnet, |t| AbilityState::Magnet(MagnetState::new(t)));
        registry
    }

    /// Register or replace a factory. A replaced kind keeps its original position.
    pub fn register(&mut self, kind: AbilityKind, factory: AbilityFactory) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((kind, factory)),
        }
    }

    pub fn factory(&self, kind: AbilityKind) -> Option<AbilityFactory> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, factory)| *factory)
    }

    /// Registration position of a kind.
    pub fn position(&self, kind: AbilityKind) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = AbilityKind> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}
