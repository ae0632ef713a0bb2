//! Status enums shared across the canonical model.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ModerationStatus`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown moderation status: {0}")]
pub struct ParseModerationStatusError(String);

/// Admin moderation status of a shop.
///
/// Owned by the admin actor but carried through the same document as
/// seller-owned fields (see the auxiliary-flags namespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    #[default]
    Active,
    Suspended,
    Banned,
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
            Self::Banned => write!(f, "banned"),
        }
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = ParseModerationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "banned" => Ok(Self::Banned),
            _ => Err(ParseModerationStatusError(s.to_string())),
        }
    }
}

/// Kind of media referenced by the banner slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    #[default]
    Image,
    Video,
}

/// Status of a buyer lead (inquiry or appointment).
///
/// Leads are append-only from the buyer side; only the status is mutable
/// from the seller side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Resolved,
}
