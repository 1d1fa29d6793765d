use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A genre a game can be classified into. The wire names double as the
/// classifier's keyword vocabulary.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Genre {
    Word,
    Roguelike,
    Action,
    Adventure,
    Puzzle,
    Rpg,
    Fitness,
    Coding,
    Strategy,
    Typing,
    Arcade,
    Survival,
    Platformer,
    Sport,
    Horror,
    Card,
    Simulation,
    Educational,
    Quiz,
    Mmo,
    Idle,
    Incremental,
    Shooter,
    Memory,
    Kids,
    Math,
    Text,
    Stealth,
    Music,
    Board,
    TowerDefense,
    Cooperative,
    Sandbox,
    Driving,
    Daily,
    Geography,
}
