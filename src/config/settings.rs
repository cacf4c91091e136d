//! Setting value types used by the configuration file.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Time window for the "top" listing of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    /// Top posts of the past week (default).
    #[default]
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    /// Value of the `t` query parameter for this window.
    pub fn as_query(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            _ => Err(format!("Unknown time window: {}", s)),
        }
    }
}

/// A per-run quota as written in the config file.
///
/// Kept unparsed until validation so a non-numeric value can be reported
/// with the offending field name instead of a generic TOML type error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LimitSetting {
    Number(i64),
    Text(String),
}

impl fmt::Display for LimitSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitSetting::Number(n) => write!(f, "{}", n),
            LimitSetting::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for LimitSetting {
    fn from(value: String) -> Self {
        LimitSetting::Text(value)
    }
}

/// A yes/no switch. Accepts TOML booleans as well as `"yes"`/`"no"` style strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle(pub bool);

impl Toggle {
    pub fn is_on(&self) -> bool {
        self.0
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Toggle(true)
    }
}

impl FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "true" | "on" | "1" => Ok(Toggle(true)),
            "no" | "false" | "off" | "0" => Ok(Toggle(false)),
            _ => Err(format!("expected yes or no, got '{}'", s)),
        }
    }
}

impl<'de> Deserialize<'de> for Toggle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(Toggle(b)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        toggle: Toggle,
        limit: LimitSetting,
    }

    #[test]
    fn test_toggle_accepts_yes_no_and_bool() {
        let probe: Probe = toml::from_str("toggle = \"No\"\nlimit = 3").unwrap();
        assert_eq!(probe.toggle, Toggle(false));

        let probe: Probe = toml::from_str("toggle = true\nlimit = 3").unwrap();
        assert!(probe.toggle.is_on());

        assert!(toml::from_str::<Probe>("toggle = \"maybe\"\nlimit = 3").is_err());
    }

    #[test]
    fn test_limit_keeps_raw_text() {
        let probe: Probe = toml::from_str("toggle = \"yes\"\nlimit = \"ten\"").unwrap();
        assert_eq!(probe.limit, LimitSetting::Text("ten".into()));
    }

    #[test]
    fn test_time_window_from_str() {
        assert_eq!("WEEK".parse::<TimeWindow>().unwrap(), TimeWindow::Week);
        assert_eq!(TimeWindow::All.to_string(), "all");
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }
}
