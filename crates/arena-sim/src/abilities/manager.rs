//! Per-owner composition of active ability instances.

use tracing::{debug, warn};

use arena_core::enums::AbilityKind;
use arena_core::events::GameEvent;
use arena_core::types::OwnerId;

use crate::context::SimulationContext;

use super::{AbilityError, AbilityInstance, AbilityRegistry, LifecycleStage};

/// Zero or more active abilities for one owner, at most one per kind.
#[derive(Debug)]
pub struct AbilityManager {
    owner: OwnerId,
    registry: AbilityRegistry,
    /// Kept sorted by registration position.
    active: Vec<AbilityInstance>,
}

impl AbilityManager {
    pub fn new(owner: OwnerId, registry: AbilityRegistry) -> Self {
        Self {
            owner,
            registry,
            active: Vec::new(),
        }
    }

    /// Manager with every built-in kind registered.
    pub fn with_defaults(owner: OwnerId) -> Self {
        Self::new(owner, AbilityRegistry::with_defaults())
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Activate `kind`. Returns `Ok(false)` if it is already active.
    pub fn add_ability(
        &mut self,
        kind: AbilityKind,
        ctx: &mut SimulationContext,
    ) -> Result<bool, AbilityError> {
        if self.has_ability(kind) {
            debug!(kind = ?kind, owner = self.owner.0, "ability already active");
            return Ok(false);
        }

        let (Some(factory), Some(position)) =
            (self.registry.factory(kind), self.registry.position(kind))
        else {
            warn!(kind = ?kind, "no factory registered, add refused");
            return Err(AbilityError::Unregistered(kind));
        };

        let mut instance = AbilityInstance::new(factory(&ctx.tuning));
        instance.initialize(ctx);

        let at = self
            .active
            .iter()
            .position(|other| {
                self.registry
                    .position(other.kind())
                    .is_some_and(|p| p > position)
            })
            .unwrap_or(self.active.len());
        self.active.insert(at, instance);

        debug!(kind = ?kind, owner = self.owner.0, "ability acquired");
        ctx.push_event(GameEvent::AbilityAcquired {
            kind,
            tick: ctx.time.tick,
        });
        Ok(true)
    }

    /// Activate the kind behind a persisted ability id.
    pub fn add_ability_by_id(
        &mut self,
        id: u8,
        ctx: &mut SimulationContext,
    ) -> Result<bool, AbilityError> {
        let Some(kind) = AbilityKind::from_id(id) else {
            warn!(id, "unknown ability id, add refused");
            return Err(AbilityError::UnknownKind(id));
        };
        self.add_ability(kind, ctx)
    }

    /// Clean up and remove `kind`. Returns false if it was not active.
    pub fn remove_ability(&mut self, kind: AbilityKind, ctx: &mut SimulationContext) -> bool {
        let Some(i) = self.active.iter().position(|a| a.kind() == kind) else {
            return false;
        };
        let mut instance = self.active.remove(i);
        debug!(
            kind = ?kind,
            owner = self.owner.0,
            actors = instance.owned().actor_count(),
            projectiles = instance.owned().projectile_count(),
            "ability lost, releasing owned entities"
        );
        instance.cleanup(ctx);
        debug_assert_eq!(instance.stage(), LifecycleStage::CleanedUp);

        ctx.push_event(GameEvent::AbilityLost {
            kind,
            tick: ctx.time.tick,
        });
        true
    }

    /// Step every active instance in registration order.
    pub fn update(&mut self, dt: f32, ctx: &mut SimulationContext) {
        for instance in &mut self.active {
            instance.update(dt, ctx);
        }
    }

    pub fn has_ability(&self, kind: AbilityKind) -> bool {
        self.active.iter().any(|a| a.kind() == kind)
    }

    /// Active kinds in dispatch order.
    pub fn list_active(&self) -> Vec<AbilityKind> {
        self.active.iter().map(AbilityInstance::kind).collect()
    }

    /// Remove every active ability.
    pub fn clear(&mut self, ctx: &mut SimulationContext) {
        for kind in self.list_active() {
            self.remove_ability(kind, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimConfig;
    use crate::world_setup;

    fn context() -> SimulationContext {
        let mut config = SimConfig::default();
        config.tuning.spawner_enabled = false;
        world_setup::build_context(&config)
    }

    #[test]
    fn add_twice_keeps_one_instance() {
        let mut ctx = context();
        let mut manager = AbilityManager::with_defaults(OwnerId::PLAYER);
        assert_eq!(manager.add_ability(AbilityKind::Trail, &mut ctx), Ok(true));
        assert_eq!(manager.add_ability(AbilityKind::Trail, &mut ctx), Ok(false));
        assert_eq!(manager.list_active(), vec![AbilityKind::Trail]);
        let acquired = ctx
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::AbilityAcquired { .. }))
            .count();
        assert_eq!(acquired, 1);
    }

    #[test]
    fn dispatch_follows_registration_order() {
        let mut ctx = context();
        let mut manager = AbilityManager::with_defaults(OwnerId::PLAYER);
        for kind in [AbilityKind::Magnet, AbilityKind::Blaster, AbilityKind::Shockwave] {
            manager.add_ability(kind, &mut ctx).unwrap();
        }
        assert_eq!(
            manager.list_active(),
            vec![AbilityKind::Blaster, AbilityKind::Shockwave, AbilityKind::Magnet]
        );
    }

    #[test]
    fn unknown_and_unregistered_kinds_are_refused() {
        let mut ctx = context();
        let mut manager = AbilityManager::with_defaults(OwnerId::PLAYER);
        assert_eq!(
            manager.add_ability_by_id(200, &mut ctx),
            Err(AbilityError::UnknownKind(200))
        );

        let mut bare = AbilityManager::new(OwnerId::PLAYER, AbilityRegistry::new());
        assert_eq!(
            bare.add_ability(AbilityKind::Seekers, &mut ctx),
            Err(AbilityError::Unregistered(AbilityKind::Seekers))
        );
        assert!(bare.list_active().is_empty());
    }

    #[test]
    fn remove_runs_cleanup_and_reports() {
        let mut ctx = context();
        let mut manager = AbilityManager::with_defaults(OwnerId::PLAYER);
        manager.add_ability(AbilityKind::Trail, &mut ctx).unwrap();
        assert!(ctx.live_actor_count() > 0);

        assert!(manager.remove_ability(AbilityKind::Trail, &mut ctx));
        assert!(!manager.remove_ability(AbilityKind::Trail, &mut ctx));
        assert_eq!(ctx.live_actor_count(), 0);
        assert!(ctx
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::AbilityLost { kind: AbilityKind::Trail, .. })));
    }

    #[test]
    fn clear_empties_manager() {
        let mut ctx = context();
        let mut manager = AbilityManager::with_defaults(OwnerId::PLAYER);
        for kind in AbilityKind::ALL {
            manager.add_ability(kind, &mut ctx).unwrap();
        }
        manager.clear(&mut ctx);
        assert!(manager.list_active().is_empty());
        assert_eq!(ctx.live_actor_count(), 0);
    }
}
