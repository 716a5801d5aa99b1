//! Rest recovery and level advancement.

use rand::Rng;

use crate::ability::{Ability, proficiency_bonus};
use crate::config::{HpGain, RulesConfig};
use crate::error::{RulesError, RulesResult};
use crate::resources::RestKind;
use crate::sheet::{CharacterRecord, DeathState};

impl CharacterRecord {
    /// Take a short rest, spending up to `hit_dice` hit dice to heal.
    ///
    /// Each die heals its roll plus the constitution modifier (at least 0).
    /// Pools tagged short rest are recovered. Returns hit points healed.
    pub fn short_rest<R: Rng>(&mut self, hit_dice: u32, rng: &mut R) -> i32 {
        let spend = hit_dice.min(self.combat.hit_dice.remaining);
        let con = self.abilities.modifier(Ability::Constitution);
        let before = self.combat.current_hp;

        if self.death_state() == DeathState::Alive {
            let die = self.combat.hit_dice.die;
            let healed: i32 = (0..spend)
                .map(|_| (die.roll(rng) as i32 + con).max(0))
                .sum();
            self.combat.hit_dice.remaining -= spend;
            self.combat.current_hp = (self.combat.current_hp + healed).min(self.combat.max_hp);
        }

        self.resources.recover(RestKind::ShortRest);
        let gained = self.combat.current_hp - before;
        tracing::debug!(name = %self.identity.name, gained, "short rest");
        gained
    }

    /// Take a long rest: full hit points, temporary hit points cleared,
    /// half the total hit dice regained (at least one), short- and
    /// long-rest pools recovered, death saves reset.
    pub fn long_rest(&mut self) {
        if self.death_state() == DeathState::Dead {
            return;
        }
        let dice = &mut self.combat.hit_dice;
        dice.remaining = (dice.remaining + (dice.total / 2).max(1)).min(dice.total);

        self.combat.current_hp = self.combat.max_hp;
        self.combat.temp_hp = 0;
        self.death_saves = Default::default();
        self.resources.recover(RestKind::LongRest);
        tracing::debug!(name = %self.identity.name, "long rest");
    }

    /// Advance one level and return the new level.
    ///
    /// Maximum hit points grow by the hit die (average or rolled, per
    /// config) plus the constitution modifier, at least 1. Proficiency
    /// entries and resource maxima are recomputed. Current hit points only
    /// grow while the character is conscious.
    pub fn level_up<R: Rng>(&mut self, config: &RulesConfig, rng: &mut R) -> RulesResult<u32> {
        let next = self.identity.level + 1;
        if next > config.max_level {
            return Err(RulesError::InvalidLevel(next));
        }
        let bonus = proficiency_bonus(next)?;

        let die = self.combat.hit_dice.die;
        let roll = match config.level_up_hp {
            HpGain::Average => die.average(),
            HpGain::Roll => die.roll(rng),
        };
        let gain = (roll as i32 + self.abilities.modifier(Ability::Constitution)).max(1);

        self.identity.level = next;
        self.proficiency_bonus = bonus;
        self.combat.max_hp = self.combat.max_hp.saturating_add(gain);
        if self.death_state() == DeathState::Alive {
            self.combat.current_hp += gain;
        }
        self.combat.hit_dice.total += 1;
        self.combat.hit_dice.remaining += 1;
        self.refresh_derived(config);

        tracing::debug!(name = %self.identity.name, level = next, gain, "level up");
        Ok(next)
    }
}
