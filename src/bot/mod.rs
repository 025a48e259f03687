//! Bot seats.
//!
//! ## Key Components
//!
//! - [`Difficulty`] and [`BotProfile`]: how careful and how meddlesome a bot is
//! - [`analyze`]: standing, threats and the dangerous or beneficial tiles
//!   within one roll
//! - [`BotPlayer`]: turns an analysis into a [`Decision`]
//!
//! Bots act through [`Game::play_bot_step`](crate::game::Game::play_bot_step),
//! which submits the decision through the same guard as a human action.

mod analysis;
mod decision;
mod profile;

pub use analysis::{analyze, landing_value, Analysis, Standing, TileOutlook, THREAT_DISTANCE};
pub use decision::{BotPlayer, Decision};
pub use profile::{BotProfile, Difficulty};
