//! Holder decisions for a compliance round

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A holder's standing in the active round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Has not responded (or no round is open)
    #[default]
    None,
    /// Signed off on the pending compliance version
    Accepted,
    /// Rejected the pending compliance version; may only return tokens to the issuer
    Declined,
}

/// What a holder submits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgment {
    Accept,
    Decline,
}

impl From<Acknowledgment> for Decision {
    fn from(ack: Acknowledgment) -> Self {
        match ack {
            Acknowledgment::Accept => Decision::Accepted,
            Acknowledgment::Decline => Decision::Declined,
        }
    }
}
