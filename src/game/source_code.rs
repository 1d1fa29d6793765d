use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// What is known about a game's source code. Serialized as a string (a
/// repository URL), the boolean `true` (open source without a direct link) or
/// `null` (nothing known), matching the dataset format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCode {
    /// A direct link to the repository.
    Url(String),
    /// Open-source indicators were found but no repository link.
    Indicated,
    /// No indicator either way.
    Unknown,
}

impl Default for SourceCode {
    fn default() -> Self {
        SourceCode::Unknown
    }
}

impl Serialize for SourceCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SourceCode::Url(url) => serializer.serialize_str(url),
            SourceCode::Indicated => serializer.serialize_bool(true),
            SourceCode::Unknown => serializer.serialize_none(),
        }
    }
}

struct SourceCodeVisitor;

impl<'de> Visitor<'de> for SourceCodeVisitor {
    type Value = SourceCode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a repository URL string, a boolean or null")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SourceCode::Url(value.to_string()))
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(if value {
            SourceCode::Indicated
        } else {
            SourceCode::Unknown
        })
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SourceCode::Unknown)
    }
}

impl<'de> Deserialize<'de> for SourceCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SourceCodeVisitor)
    }
}
