//! Lenient string decoding for payload fields.
//!
//! Clients are not always careful about types: a numeric `userId` is
//! accepted and taken as its JSON text, as written (`1.0` stays `1.0`).
//! Objects, arrays, and `null` are still rejected.

use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::PlayerId;

/// Any JSON scalar, tried in order.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

pub(crate) fn player_id<'de, D>(deserializer: D) -> Result<PlayerId, D::Error>
where
    D: Deserializer<'de>,
{
    string(deserializer).map(PlayerId)
}
