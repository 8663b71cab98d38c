//! Session configuration types.
//!
//! The surrounding application supplies these at session start:
//! - `MatchContext`: How the pair was matched (drives the refund amount)
//! - `RefundTable`: Points charged, and therefore refunded, per mode
//! - `MonitorConfig`: Sampling cadence and refund policy
//!
//! All of them are immutable for the lifetime of one session.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::UnknownMatchingMode;

/// Default cadence of the presence sampling timer.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

/// Upper bound on one ledger credit call.
pub const DEFAULT_LEDGER_TIMEOUT: Duration = Duration::from_secs(10);

/// Amount refunded when the matching mode is not in the table.
pub const DEFAULT_REFUND: u64 = 100;

/// How the two users were matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingMode {
    /// Matched with any waiting user.
    Random,
    /// Matched with a user who picked the "love" position.
    Love,
    /// Premium match against the top-ranked pool.
    Top30,
}

impl MatchingMode {
    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Love => "love",
            Self::Top30 => "top30",
        }
    }

    /// All known modes.
    pub fn all() -> impl Iterator<Item = MatchingMode> {
        [Self::Random, Self::Love, Self::Top30].into_iter()
    }
}

impl FromStr for MatchingMode {
    type Err = UnknownMatchingMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "love" => Ok(Self::Love),
            "top30" => Ok(Self::Top30),
            other => Err(UnknownMatchingMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match information handed over by matchmaking.
///
/// The mode is kept as the raw string received, because an unrecognized
/// mode must not prevent the session from running. It is parsed when the
/// refund is computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    /// Matching mode as received (`"random"`, `"love"`, `"top30"`, ...).
    pub matching_mode: String,
}

impl MatchContext {
    /// Create a context from a raw mode string.
    pub fn new(matching_mode: impl Into<String>) -> Self {
        Self {
            matching_mode: matching_mode.into(),
        }
    }

    /// Create a context for a known mode.
    #[must_use]
    pub fn for_mode(mode: MatchingMode) -> Self {
        Self::new(mode.as_str())
    }

    /// Parse the matching mode.
    pub fn mode(&self) -> Result<MatchingMode, UnknownMatchingMode> {
        self.matching_mode.parse()
    }
}

/// Points charged per matching mode. The refund returns the same amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundTable {
    pub random: u64,
    pub love: u64,
    pub top30: u64,
}

impl Default for RefundTable {
    fn default() -> Self {
        Self {
            random: 100,
            love: 500,
            top30: 1000,
        }
    }
}

impl RefundTable {
    /// Refund amount for a known mode.
    #[must_use]
    pub const fn amount_for(&self, mode: MatchingMode) -> u64 {
        match mode {
            MatchingMode::Random => self.random,
            MatchingMode::Love => self.love,
            MatchingMode::Top30 => self.top30,
        }
    }
}

/// Liveness monitor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Period of the presence sampling timer.
    pub sample_interval: Duration,

    /// Refund amount per matching mode.
    pub refund_table: RefundTable,

    /// Refund amount used when the matching mode is unrecognized.
    pub default_refund: u64,

    /// Time allowed for the ledger credit before it is abandoned.
    pub ledger_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            refund_table: RefundTable::default(),
            default_refund: DEFAULT_REFUND,
            ledger_timeout: DEFAULT_LEDGER_TIMEOUT,
        }
    }
}

impl MonitorConfig {
    /// Set the sampling period.
    #[must_use]
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Sample interval must be non-zero");
        self.sample_interval = interval;
        self
    }

    /// Set the refund table.
    #[must_use]
    pub fn with_refund_table(mut self, table: RefundTable) -> Self {
        self.refund_table = table;
        self
    }

    /// Set the ledger call timeout.
    #[must_use]
    pub fn with_ledger_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "Ledger timeout must be non-zero");
        self.ledger_timeout = timeout;
        self
    }

    /// Set the fallback refund amount.
    #[must_use]
    pub fn with_default_refund(mut self, amount: u64) -> Self {
        self.default_refund = amount;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("random".parse::<MatchingMode>(), Ok(MatchingMode::Random));
        assert_eq!("love".parse::<MatchingMode>(), Ok(MatchingMode::Love));
        assert_eq!("top30".parse::<MatchingMode>(), Ok(MatchingMode::Top30));
        assert_eq!(
            "premium".parse::<MatchingMode>(),
            Err(UnknownMatchingMode("premium".into()))
        );
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in MatchingMode::all() {
            assert_eq!(mode.as_str().parse::<MatchingMode>(), Ok(mode));
            assert_eq!(format!("{}", mode), mode.as_str());
        }
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&MatchingMode::Top30).unwrap();
        assert_eq!(json, "\"top30\"");
    }

    #[test]
    fn test_match_context() {
        let ctx = MatchContext::for_mode(MatchingMode::Love);
        assert_eq!(ctx.matching_mode, "love");
        assert_eq!(ctx.mode(), Ok(MatchingMode::Love));

        let odd = MatchContext::new("일반");
        assert!(odd.mode().is_err());
    }

    #[test]
    fn test_default_refund_table() {
        let table = RefundTable::default();
        assert_eq!(table.amount_for(MatchingMode::Random), 100);
        assert_eq!(table.amount_for(MatchingMode::Love), 500);
        assert_eq!(table.amount_for(MatchingMode::Top30), 1000);
    }

    #[test]
    fn test_monitor_config_builder() {
        let config = MonitorConfig::default()
            .with_sample_interval(Duration::from_secs(1))
            .with_default_refund(50)
            .with_ledger_timeout(Duration::from_secs(3))
            .with_refund_table(RefundTable {
                random: 10,
                love: 20,
                top30: 30,
            });

        assert_eq!(config.sample_interval, Duration::from_secs(1));
        assert_eq!(config.default_refund, 50);
        assert_eq!(config.ledger_timeout, Duration::from_secs(3));
        assert_eq!(config.refund_table.amount_for(MatchingMode::Love), 20);
    }

    #[test]
    fn test_monitor_config_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.sample_interval, Duration::from_secs(5));
        assert_eq!(config.default_refund, 100);
        assert_eq!(config.ledger_timeout, Duration::from_secs(10));
    }

    #[test]
    #[should_panic(expected = "Sample interval must be non-zero")]
    fn test_zero_interval_panics() {
        let _ = MonitorConfig::default().with_sample_interval(Duration::ZERO);
    }

    #[test]
    fn test_serialization() {
        let config = MonitorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
