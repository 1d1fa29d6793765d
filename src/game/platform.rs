use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// A platform a game runs on.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    /// Playable in a browser.
    Web,
    /// A downloadable desktop build.
    Desktop,
    /// A console release.
    Console,
    /// Available for Android.
    Android,
    /// Available for iOS.
    Ios,
}
