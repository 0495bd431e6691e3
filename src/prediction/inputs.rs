use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Binary selectors
// ---------------------------------------------------------------------------

/// Holiday selector, encoded as 1 for "Yes" and 0 for "No".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Holiday {
    Yes,
    No,
}

/// Daylight selector, encoded as 1 for "Day" and 0 for "Night".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Daylight {
    Day,
    Night,
}

impl Holiday {
    /// Labels in the order the selector offers them.
    pub const LABELS: [&'static str; 2] = ["No", "Yes"];

    pub fn flag(self) -> f64 {
        match self {
            Holiday::Yes => 1.0,
            Holiday::No => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Holiday::Yes => "Yes",
            Holiday::No => "No",
        }
    }
}

impl Daylight {
    pub const LABELS: [&'static str; 2] = ["Day", "Night"];

    pub fn flag(self) -> f64 {
        match self {
            Daylight::Day => 1.0,
            Daylight::Night => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Daylight::Day => "Day",
            Daylight::Night => "Night",
        }
    }
}

impl FromStr for Holiday {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Yes" => Ok(Holiday::Yes),
            "No" => Ok(Holiday::No),
            other => Err(DashboardError::InvalidChoice {
                field: "holiday",
                value: other.to_string(),
                expected: ["Yes", "No"],
            }),
        }
    }
}

impl FromStr for Daylight {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Day" => Ok(Daylight::Day),
            "Night" => Ok(Daylight::Night),
            other => Err(DashboardError::InvalidChoice {
                field: "daylight",
                value: other.to_string(),
                expected: ["Day", "Night"],
            }),
        }
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Daylight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Defaults for fields the form does not expose
// ---------------------------------------------------------------------------

/// Values used for fields a dashboard variant keeps hidden from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiddenDefaults {
    pub global_reactive_power: f64,
    pub holiday: Holiday,
    pub daylight: Daylight,
}

impl Default for HiddenDefaults {
    fn default() -> Self {
        Self {
            global_reactive_power: 0.0,
            holiday: Holiday::No,
            daylight: Daylight::Day,
        }
    }
}

// ---------------------------------------------------------------------------
// RawInputs – one request's worth of user input
// ---------------------------------------------------------------------------

/// User-supplied values for a single prediction request.
///
/// `holiday` and `daylight` are `None` when the variant does not expose the
/// selector; the assembler then falls back to [`HiddenDefaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputs {
    pub voltage: f64,
    pub global_intensity: f64,
    pub sub_metering: [f64; 3],
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub holiday: Option<Holiday>,
    pub daylight: Option<Daylight>,
}

impl RawInputs {
    /// Combine date, hour and minute, rejecting out-of-range clock values.
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        if self.hour > 23 {
            return Err(DashboardError::InvalidInput {
                field: "hour",
                reason: format!("{} is outside 0..=23", self.hour),
            });
        }
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0).ok_or_else(|| {
            DashboardError::InvalidInput {
                field: "minute",
                reason: format!("{} is outside 0..=59", self.minute),
            }
        })?;
        Ok(self.date.and_time(time))
    }
}
