//! The playable game: session, outbound events and snapshots.
//!
//! ## Key Components
//!
//! - [`GameBuilder`]: validates a configuration and roster into a [`Game`]
//! - [`Game`]: the turn state machine; every inbound action goes through
//!   [`Game::apply`]
//! - [`GameEvent`]: what an accepted action caused
//! - [`GameSnapshot`]: serde/bincode image for persistence and mirrors
//!
//! ## Example Usage
//!
//! ```
//! use rulebound::core::{PlayerId, PlayerSetup};
//! use rulebound::effects::Effect;
//! use rulebound::game::{GameBuilder, GameEvent};
//! use rulebound::rules::Rule;
//! use rulebound::triggers::Trigger;
//!
//! let mut game = GameBuilder::new()
//!     .with_player(PlayerSetup::human("Ada"))
//!     .with_player(PlayerSetup::human("Bo"))
//!     .with_seed(1)
//!     .build()
//!     .unwrap();
//!
//! let ada = PlayerId::new(0);
//! game.roll(ada).unwrap();
//!
//! // Spend the turn's modification on a new rule.
//! let rule = Rule::new("Stipend", Trigger::TurnStart).with_effect(Effect::score(1));
//! let events = game.create_rule(ada, rule).unwrap();
//! assert!(events.iter().any(|e| matches!(e, GameEvent::RuleAdded { .. })));
//! assert_eq!(game.current_player(), PlayerId::new(1));
//! ```

mod events;
mod session;
mod snapshot;

pub use events::GameEvent;
pub use session::{BotTurn, Game, GameBuilder};
pub use snapshot::GameSnapshot;
