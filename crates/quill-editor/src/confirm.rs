//! Interactive confirmation for destructive edits.

use serde::Deserialize;

/// Operator's answer to "are you sure?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Proof that a destructive edit was confirmed.
///
/// Only obtainable through [`Confirmation::token`].
#[derive(Debug)]
pub struct Confirmed(());

impl Confirmation {
    /// Map a yes/no flag (e.g. a `confirm=true` query parameter).
    #[must_use]
    pub fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }

    /// The confirmation token, if the operator agreed.
    #[must_use]
    pub fn token(self) -> Option<Confirmed> {
        match self {
            Self::Confirmed => Some(Confirmed(())),
            Self::Declined => None,
        }
    }
}
