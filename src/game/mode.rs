//! Rule variants and route parsing
//!
//! Each mode carries a fixed pair of rule flags. The mode is chosen through a
//! navigable identifier (`#atomic`, `chess960`, ...); unknown identifiers fall
//! back to standard chess.

use std::fmt;
use std::str::FromStr;

/// Rule flags attached to a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleFlags {
    /// Captures explode the 3x3 neighborhood of the destination
    pub atomic: bool,
    /// Back rank is shuffled at game start
    pub chess960: bool,
}

/// Supported rule variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Standard,
    Atomic,
    Chess960,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Standard, Mode::Atomic, Mode::Chess960];

    pub fn rules(self) -> RuleFlags {
        match self {
            Mode::Standard => RuleFlags::default(),
            Mode::Atomic => RuleFlags {
                atomic: true,
                chess960: false,
            },
            Mode::Chess960 => RuleFlags {
                atomic: false,
                chess960: true,
            },
        }
    }

    /// Human label used in the status line
    pub fn label(self) -> &'static str {
        match self {
            Mode::Standard => "Standard",
            Mode::Atomic => "Atomic",
            Mode::Chess960 => "Chess960",
        }
    }

    /// Route identifier (`standard`, `atomic`, `chess960`)
    pub fn id(self) -> &'static str {
        match self {
            Mode::Standard => "standard",
            Mode::Atomic => "atomic",
            Mode::Chess960 => "chess960",
        }
    }

    /// Resolve a route such as `#atomic`; empty or unknown routes give `Standard`
    pub fn from_route(route: &str) -> Mode {
        let id = route.strip_prefix('#').unwrap_or(route);
        id.parse().unwrap_or_default()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for identifiers that name no mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.id() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_resolution() {
        assert_eq!(Mode::from_route("#atomic"), Mode::Atomic);
        assert_eq!(Mode::from_route("chess960"), Mode::Chess960);
        assert_eq!(Mode::from_route("#standard"), Mode::Standard);
    }

    #[test]
    fn test_invalid_route_falls_back_to_standard() {
        assert_eq!(Mode::from_route(""), Mode::Standard);
        assert_eq!(Mode::from_route("#"), Mode::Standard);
        assert_eq!(Mode::from_route("#crazyhouse"), Mode::Standard);
        assert_eq!(Mode::from_route("#Atomic"), Mode::Standard);
    }

    #[test]
    fn test_rule_flags() {
        assert_eq!(Mode::Standard.rules(), RuleFlags::default());
        assert!(Mode::Atomic.rules().atomic);
        assert!(!Mode::Atomic.rules().chess960);
        assert!(Mode::Chess960.rules().chess960);
        assert!(!Mode::Chess960.rules().atomic);
    }
}
