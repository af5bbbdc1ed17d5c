//! The tri-valued P/N/`?` classification.

use std::fmt;
use std::str::FromStr;

/// Previous-player win (`P`), next-player win (`N`), or unresolved (`?`).
///
/// `Unknown` is a first-class value, not an error: a resource-bounded
/// search finding no witness is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    P,
    N,
    #[default]
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Status::P => "P",
            Status::N => "N",
            Status::Unknown => "?",
        };
        write!(f, "{token}")
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(Status::P),
            "N" => Ok(Status::N),
            "?" => Ok(Status::Unknown),
            other => Err(format!("not a valid status token: {other:?}")),
        }
    }
}
