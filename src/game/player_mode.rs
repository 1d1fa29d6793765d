use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Whether a game is played alone or with others.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerMode {
    /// A single-player game.
    Single,
    /// A multiplayer game.
    Multi,
}
