use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Whether playing a game costs money.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Pricing {
    /// Free to play.
    Free,
    /// Sold or otherwise paid for.
    Paid,
    /// Free to play with paid extras. Only ever set by hand during curation,
    /// the classifier can't tell it apart from paid.
    Freemium,
}
