//! The single gate every inbound action passes through.
//!
//! Humans and bots are checked by the same function. A failed check returns
//! the reason and leaves state untouched.

use crate::core::{Action, GameState, IllegalAction, PlayerId};

use super::phase::Phase;

/// Check whether `actor` may perform `action` right now.
pub fn check(state: &GameState, actor: PlayerId, action: &Action) -> Result<(), IllegalAction> {
    if !state.players.contains(actor) {
        return Err(IllegalAction::UnknownPlayer(actor));
    }
    let cursor = &state.cursor;
    if cursor.phase.is_finished() {
        return Err(IllegalAction::GameFinished);
    }
    if actor != cursor.current {
        return Err(IllegalAction::NotYourTurn {
            actor,
            current: cursor.current,
        });
    }

    match action {
        Action::Roll => expect_phase(&cursor.phase, matches!(cursor.phase, Phase::Roll), action),
        Action::ChooseDestination { option } => match cursor.pending_choice() {
            None => Err(IllegalAction::NoPendingChoice),
            Some(options) if *option >= options.len() => Err(IllegalAction::InvalidChoice {
                option: *option,
                available: options.len(),
            }),
            Some(_) => Ok(()),
        },
        Action::EndTurn => {
            expect_phase(&cursor.phase, matches!(cursor.phase, Phase::Modify), action)
        }
        _ => {
            expect_phase(&cursor.phase, matches!(cursor.phase, Phase::Modify), action)?;
            if cursor.modifications >= 1 {
                return Err(IllegalAction::AlreadyModified(actor));
            }
            if let Some(permission) = action.permission() {
                if actor != state.config.host && !state.permissions.allows(permission) {
                    return Err(IllegalAction::PermissionDisabled(permission));
                }
            }
            Ok(())
        }
    }
}

/// Whether `actor` could make a modification at this moment.
#[must_use]
pub fn can_modify(state: &GameState, actor: PlayerId) -> bool {
    actor == state.cursor.current
        && state.cursor.phase == Phase::Modify
        && state.cursor.modifications == 0
}

fn expect_phase(phase: &Phase, ok: bool, action: &Action) -> Result<(), IllegalAction> {
    if ok {
        Ok(())
    } else {
        Err(IllegalAction::WrongPhase {
            action: action.verb(),
            phase: phase.name(),
        })
    }
}
