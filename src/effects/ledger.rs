//! Temporary effect ledger.
//!
//! Tracks the duration-bound modifiers each player carries. Entries count
//! down once per completed turn of their owner and are dropped at zero; the
//! dropped entries are handed back so the caller can raise `EffectExpired`.
//!
//! Reapplying a modifier kind a player already carries follows the
//! configured [`StackingPolicy`].
//!
//! ```
//! use rulebound::core::{PlayerId, StackingPolicy};
//! use rulebound::effects::{EffectLedger, EffectSource, Modifier, ModifierKind};
//!
//! let p0 = PlayerId::new(0);
//! let mut ledger = EffectLedger::new(2, StackingPolicy::Refresh);
//! ledger.apply(p0, Modifier::Shield, 2, EffectSource::System, 1);
//!
//! assert!(ledger.tick(p0).is_empty());
//! assert!(ledger.has_effect(p0, ModifierKind::Shield));
//! assert_eq!(ledger.tick(p0).len(), 1);
//! assert!(!ledger.has_effect(p0, ModifierKind::Shield));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap, RuleId, StackingPolicy};

use super::effect::{Modifier, ModifierKind};

/// Where a temporary effect came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectSource {
    Rule(RuleId),
    System,
}

/// One ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryEffect {
    pub modifier: Modifier,
    /// Owner turns left, always positive while the entry is in the ledger.
    pub remaining: u32,
    pub source: EffectSource,
    /// Turn number on which the entry was applied.
    pub applied_turn: u32,
}

/// What an application did to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerOutcome {
    /// New entry.
    Added,
    /// Existing entry's duration raised to the larger of the two.
    Refreshed,
    /// Separate entry next to an existing one of the same kind.
    Stacked,
    /// Nothing changed.
    Ignored,
}

impl LedgerOutcome {
    #[must_use]
    pub fn changed(self) -> bool {
        self != LedgerOutcome::Ignored
    }
}

/// Per-player temporary effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLedger {
    entries: PlayerMap<Vec<TemporaryEffect>>,
    policy: StackingPolicy,
}

impl EffectLedger {
    /// An empty ledger for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize, policy: StackingPolicy) -> Self {
        Self {
            entries: PlayerMap::with_default(player_count),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> StackingPolicy {
        self.policy
    }

    /// Add `modifier` to `player` for `duration` of their turns.
    ///
    /// Zero durations are ignored.
    pub fn apply(
        &mut self,
        player: PlayerId,
        modifier: Modifier,
        duration: u32,
        source: EffectSource,
        turn: u32,
    ) -> LedgerOutcome {
        if duration == 0 || !self.entries.contains(player) {
            return LedgerOutcome::Ignored;
        }

        let entry = TemporaryEffect {
            modifier,
            remaining: duration,
            source,
            applied_turn: turn,
        };
        let effects = &mut self.entries[player];
        let existing = effects
            .iter()
            .position(|e| e.modifier.kind() == modifier.kind());

        match (existing, self.policy) {
            (None, _) => {
                effects.push(entry);
                LedgerOutcome::Added
            }
            (Some(_), StackingPolicy::Stack) => {
                effects.push(entry);
                LedgerOutcome::Stacked
            }
            (Some(_), StackingPolicy::Ignore) => LedgerOutcome::Ignored,
            (Some(index), StackingPolicy::Refresh) => {
                let current = &mut effects[index];
                current.remaining = current.remaining.max(duration);
                current.modifier = modifier;
                current.source = source;
                current.applied_turn = turn;
                LedgerOutcome::Refreshed
            }
        }
    }

    /// Count down every entry of `player` by one turn, returning the entries
    /// that reached zero in insertion order.
    pub fn tick(&mut self, player: PlayerId) -> Vec<TemporaryEffect> {
        if !self.entries.contains(player) {
            return Vec::new();
        }

        let effects = &mut self.entries[player];
        let mut expired = Vec::new();
        effects.retain_mut(|effect| {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(*effect);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Entries of `player`, oldest first.
    #[must_use]
    pub fn active_effects(&self, player: PlayerId) -> &[TemporaryEffect] {
        if self.entries.contains(player) {
            &self.entries[player]
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn has_effect(&self, player: PlayerId, kind: ModifierKind) -> bool {
        self.active_effects(player)
            .iter()
            .any(|e| e.modifier.kind() == kind)
    }

    /// Drop every entry of `kind` from `player`, returning how many went.
    pub fn remove(&mut self, player: PlayerId, kind: ModifierKind) -> usize {
        if !self.entries.contains(player) {
            return 0;
        }
        let effects = &mut self.entries[player];
        let before = effects.len();
        effects.retain(|e| e.modifier.kind() != kind);
        before - effects.len()
    }

    /// The die range `(lo, hi)` for `player` after `DiceMin`/`DiceMax`.
    ///
    /// The strongest clamp of each kind wins. A minimum above the maximum
    /// collapses the range onto the maximum.
    #[must_use]
    pub fn dice_bounds(&self, player: PlayerId, sides: u32) -> (u32, u32) {
        let mut lo = 1;
        let mut hi = sides.max(1);
        for effect in self.active_effects(player) {
            match effect.modifier {
                Modifier::DiceMin { value } => lo = lo.max(value),
                Modifier::DiceMax { value } => hi = hi.min(value.max(1)),
                _ => {}
            }
        }
        if lo > hi {
            lo = hi;
        }
        (lo, hi)
    }

    /// Every entry, by player, for snapshots.
    #[must_use]
    pub fn entries(&self) -> &PlayerMap<Vec<TemporaryEffect>> {
        &self.entries
    }

    /// Rebuild from snapshot entries.
    #[must_use]
    pub fn from_entries(entries: PlayerMap<Vec<TemporaryEffect>>, policy: StackingPolicy) -> Self {
        Self { entries, policy }
    }
}
