//! Ability runtime.
//!
//! Each ability kind is a small state machine with `initialize`, `update` and
//! `cleanup`, stored as one variant of [`AbilityState`]. The
//! [`AbilityRegistry`] maps kinds to factories, and an [`AbilityManager`]
//! composes the active instances for one owner.
//!
//! Abilities reach the world only through the `SimulationContext` and their
//! own [`OwnedEntities`] ledger, so cleanup can release everything an
//! instance created.

pub mod blaster;
pub mod magnet;
pub mod manager;
pub mod owned;
pub mod registry;
pub mod seekers;
pub mod shockwave;
pub mod trail;

pub use manager::AbilityManager;
pub use owned::OwnedEntities;
pub use registry::{AbilityFactory, AbilityRegistry};

use thiserror::Error;

use arena_core::enums::AbilityKind;

use crate::context::SimulationContext;

use self::blaster::BlasterState;
use self::magnet::MagnetState;
use self::seekers::SeekersState;
use self::shockwave::ShockwaveState;
use self::trail::TrailState;

/// Why an ability could not be added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbilityError {
    #[error("unknown ability id {0}")]
    UnknownKind(u8),
    #[error("no factory registered for {0:?}")]
    Unregistered(AbilityKind),
}

/// Where an instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Uninitialized,
    Active,
    CleanedUp,
}

/// Per-kind behavior hooks.
pub trait AbilityBehavior {
    /// Called once on activation.
    fn initialize(&mut self, owned: &mut OwnedEntities, ctx: &mut SimulationContext);

    /// Called once per fixed step while active.
    fn update(&mut self, dt: f32, owned: &mut OwnedEntities, ctx: &mut SimulationContext);

    /// Called once on deactivation, before the owned ledger is released.
    fn cleanup(&mut self, owned: &mut OwnedEntities, ctx: &mut SimulationContext);
}

/// Private state of one ability instance, tagged by kind.
#[derive(Debug)]
pub enum AbilityState {
    Blaster(BlasterState),
    Trail(TrailState),
    Seekers(SeekersState),
    Shockwave(ShockwaveState),
    Magnet(MagnetState),
}

impl AbilityState {
    pub fn kind(&self) -> AbilityKind {
        match self {
            AbilityState::Blaster(_) => AbilityKind::Blaster,
            AbilityState::Trail(_) => AbilityKind::Trail,
            AbilityState::Seekers(_) => AbilityKind::Seekers,
            AbilityState::Shockwave(_) => AbilityKind::Shockwave,
            AbilityState::Magnet(_) => AbilityKind::Magnet,
        }
    }

    fn behavior(&mut self) -> &mut dyn AbilityBehavior {
        match self {
            AbilityState::Blaster(s) => s,
            AbilityState::Trail(s) => s,
            AbilityState::Seekers(s) => s,
            AbilityState::Shockwave(s) => s,
            AbilityState::Magnet(s) => s,
        }
    }
}

/// One active ability on one owner.
#[derive(Debug)]
pub struct AbilityInstance {
    kind: AbilityKind,
    stage: LifecycleStage,
    state: AbilityState,
    owned: OwnedEntities,
}

impl AbilityInstance {
    pub fn new(state: AbilityState) -> Self {
        Self {
            kind: state.kind(),
            stage: LifecycleStage::Uninitialized,
            state,
            owned: OwnedEntities::default(),
        }
    }

    pub fn kind(&self) -> AbilityKind {
        self.kind
    }

    pub fn stage(&self) -> LifecycleStage {
        self.stage
    }

    pub fn owned(&self) -> &OwnedEntities {
        &self.owned
    }

    pub fn initialize(&mut self, ctx: &mut SimulationContext) {
        debug_assert_eq!(self.stage, LifecycleStage::Uninitialized, "{:?} initialized twice", self.kind);
        if self.stage != LifecycleStage::Uninitialized {
            return;
        }
        self.state.behavior().initialize(&mut self.owned, ctx);
        self.stage = LifecycleStage::Active;
    }

    pub fn update(&mut self, dt: f32, ctx: &mut SimulationContext) {
        if self.stage != LifecycleStage::Active {
            return;
        }
        self.owned.prune(ctx);
        self.state.behavior().update(dt, &mut self.owned, ctx);
    }

    pub fn cleanup(&mut self, ctx: &mut SimulationContext) {
        debug_assert_ne!(self.stage, LifecycleStage::CleanedUp, "{:?} cleaned up twice", self.kind);
        if self.stage == LifecycleStage::CleanedUp {
            return;
        }
        self.state.behavior().cleanup(&mut self.owned, ctx);
        self.owned.release_all(ctx);
        self.stage = LifecycleStage::CleanedUp;
    }
}
