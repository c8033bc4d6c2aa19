//! Physiology system - passive vitals drain and forced survival
//! transitions that override state-specific logic.

use hecs::World;

use crate::components::{Behavior, Mind, Vitals};

/// Hunger above this forces foraging (unless already feeding)
pub const HUNGER_FORCE_THRESHOLD: f32 = 80.0;
/// Energy below this forces returning to rest
pub const ENERGY_FORCE_THRESHOLD: f32 = 20.0;

/// Drain vitals for elapsed time, then apply survival pressure: a starving
/// ant drops what it is doing to forage, an exhausted one to rest. The
/// energy check runs last, so exhaustion wins when both fire.
pub fn physiology_system(world: &mut World, delta_seconds: f32) {
    for (_, (vitals, mind)) in world.query_mut::<(&mut Vitals, &mut Mind)>() {
        vitals.drain(delta_seconds);

        if vitals.hunger > HUNGER_FORCE_THRESHOLD
            && mind.behavior != Behavior::Feeding
            && mind.behavior != Behavior::Foraging
        {
            mind.switch(Behavior::Foraging);
        }

        if vitals.energy < ENERGY_FORCE_THRESHOLD && mind.behavior != Behavior::Returning {
            mind.switch(Behavior::Returning);
        }
    }
}
