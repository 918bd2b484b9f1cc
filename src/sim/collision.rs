//! Circle proximity tests and combat resolution
//!
//! Collections are walked back to front and elements are removed in place,
//! so removing the current element never disturbs the ones still to visit.

use super::state::{Circle, GameEvent, GameState};
use crate::consts::*;
use crate::distance;

/// Two circles collide when the gap between them is below the tolerance
#[inline]
pub fn collide<A, B>(a: &A, b: &B) -> bool
where
    A: Circle + ?Sized,
    B: Circle + ?Sized,
{
    distance(a.pos(), b.pos()) - a.radius() - b.radius() < COLLISION_TOLERANCE
}

impl GameState {
    /// Move projectiles, drop the ones that left the field and resolve hits
    /// against adversaries. Each projectile destroys at most one adversary.
    pub fn update_projectiles(&mut self) {
        let mut i = self.projectiles.len();
        while i > 0 {
            i -= 1;
            self.projectiles[i].update();

            if !self.field.contains(self.projectiles[i].pos) {
                self.projectiles.remove(i);
                continue;
            }

            let shot = &self.projectiles[i];
            let Some(j) = self.adversaries.iter().rposition(|a| collide(shot, a)) else {
                continue;
            };

            let adversary = self.adversaries.remove(j);
            self.projectiles.remove(i);
            self.emit_particles(adversary.pos, adversary.kind.color(), KILL_PARTICLES);
            self.add_score(KILL_SCORE);
            self.events.push(GameEvent::AdversaryDestroyed {
                kind: adversary.kind,
            });
            log::debug!("{:?} destroyed, score {}", adversary.kind, self.score);
        }
    }

    /// Pick up every collectible the player overlaps
    pub fn update_collectibles(&mut self) {
        let mut i = self.collectibles.len();
        while i > 0 {
            i -= 1;
            if !collide(&self.player, &self.collectibles[i]) {
                continue;
            }

            self.player.upgrade_fire_rate();
            self.collectibles.remove(i);
            self.emit_particles(self.player.pos, PICKUP_PARTICLE_COLOR, PICKUP_PARTICLES);
            self.events.push(GameEvent::CollectiblePicked {
                fire_rate: self.player.fire_rate,
            });
            log::debug!("Collectible picked, fire rate {}", self.player.fire_rate);
        }
    }

    /// Move adversaries, check them against the player and cull the ones far
    /// outside the field. Returns true if the player was caught; processing
    /// stops at the first catch.
    pub fn update_adversaries(&mut self) -> bool {
        let mut i = self.adversaries.len();
        while i > 0 {
            i -= 1;
            self.adversaries[i].update();

            if collide(&self.player, &self.adversaries[i]) {
                let (pos, color) = (self.adversaries[i].pos, self.adversaries[i].kind.color());
                self.emit_particles(pos, color, CRASH_PARTICLES_EACH);
                self.emit_particles(self.player.pos, PLAYER_COLOR, CRASH_PARTICLES_EACH);
                return true;
            }

            if !self
                .field
                .contains_with_margin(self.adversaries[i].pos, ADVERSARY_CULL_MARGIN)
            {
                self.adversaries.remove(i);
            }
        }
        false
    }
}
