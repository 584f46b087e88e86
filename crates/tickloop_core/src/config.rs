//! Scheduler construction options

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Result, SchedulerError};

/// Size of one fixed simulation step
///
/// Accepted either as a string with a unit, `"40ms"` or `"25hz"`, or as a
/// table with exactly one key: `{ ticks_per_second = 25.0 }` or
/// `{ millis_per_tick = 40.0 }`. A table holding both keys is rejected, which
/// matters when config layers merge tables key by key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "TickRateRepr")]
pub enum TickRate {
    /// Fixed steps per simulated second
    TicksPerSecond(f64),
    /// Milliseconds of simulated time per fixed step
    MillisPerTick(f64),
}

impl Default for TickRate {
    /// 40 ms per tick (25 ticks per second)
    fn default() -> Self {
        TickRate::MillisPerTick(40.0)
    }
}

impl TickRate {
    /// Resolve to a tick duration, rounded to the nearest nanosecond
    ///
    /// Zero, negative, NaN and infinite rates are rejected, as is any rate
    /// whose tick rounds to zero nanoseconds.
    pub fn tick_duration(&self) -> Result<Duration> {
        let nanos = match *self {
            TickRate::TicksPerSecond(hz) => {
                if !(hz.is_finite() && hz > 0.0) {
                    return Err(SchedulerError::InvalidTickDuration(format!(
                        "{} ticks per second",
                        hz
                    )));
                }
                1e9 / hz
            }
            TickRate::MillisPerTick(ms) => {
                if !(ms.is_finite() && ms > 0.0) {
                    return Err(SchedulerError::InvalidTickDuration(format!(
                        "{} ms per tick",
                        ms
                    )));
                }
                ms * 1e6
            }
        };

        let nanos = nanos.round();
        if nanos < 1.0 || nanos > u64::MAX as f64 {
            return Err(SchedulerError::InvalidTickDuration(format!(
                "{:?} resolves to {} ns",
                self, nanos
            )));
        }
        Ok(Duration::from_nanos(nanos as u64))
    }
}

impl FromStr for TickRate {
    type Err = SchedulerError;

    /// Parse `"<number>ms"` (milliseconds per tick) or `"<number>hz"` (ticks
    /// per second), case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_ascii_lowercase();
        let (number, ctor): (&str, fn(f64) -> TickRate) =
            if let Some(n) = text.strip_suffix("ms") {
                (n, TickRate::MillisPerTick)
            } else if let Some(n) = text.strip_suffix("hz") {
                (n, TickRate::TicksPerSecond)
            } else {
                return Err(SchedulerError::InvalidTickDuration(format!(
                    "'{}' needs a unit: ms or hz",
                    s
                )));
            };
        number
            .trim()
            .parse::<f64>()
            .map(ctor)
            .map_err(|_| SchedulerError::InvalidTickDuration(format!("'{}' is not a number", s)))
    }
}

/// Every form a tick rate may take in configuration
#[derive(Deserialize)]
#[serde(untagged)]
enum TickRateRepr {
    Text(String),
    Table(TickRateTable),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TickRateTable {
    ticks_per_second: Option<f64>,
    millis_per_tick: Option<f64>,
}

impl TryFrom<TickRateRepr> for TickRate {
    type Error = SchedulerError;

    fn try_from(repr: TickRateRepr) -> Result<Self> {
        match repr {
            TickRateRepr::Text(text) => text.parse(),
            TickRateRepr::Table(table) => match (table.ticks_per_second, table.millis_per_tick) {
                (Some(hz), None) => Ok(TickRate::TicksPerSecond(hz)),
                (None, Some(ms)) => Ok(TickRate::MillisPerTick(ms)),
                (Some(_), Some(_)) => Err(SchedulerError::InvalidTickDuration(
                    "both ticks_per_second and millis_per_tick are set".to_string(),
                )),
                (None, None) => Err(SchedulerError::InvalidTickDuration(
                    "expected ticks_per_second or millis_per_tick".to_string(),
                )),
            },
        }
    }
}

/// Options recognized by [`Scheduler`](crate::Scheduler) construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Fixed step size
    pub tick_rate: TickRate,
    /// Push the tick duration / frame time into [`SystemHost::set_delta`]
    /// before each pass
    ///
    /// [`SystemHost::set_delta`]: crate::SystemHost::set_delta
    pub report_delta: bool,
    /// Compute the interpolation factor into [`FrameStats`] and push it into
    /// [`SystemHost::set_alpha`]
    ///
    /// [`FrameStats`]: crate::FrameStats
    /// [`SystemHost::set_alpha`]: crate::SystemHost::set_alpha
    pub expose_alpha: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_rate: TickRate::default(),
            report_delta: false,
            expose_alpha: false,
        }
    }
}

impl SchedulerConfig {
    /// Default options with the given tick rate
    pub fn new(tick_rate: TickRate) -> Self {
        Self {
            tick_rate,
            ..Self::default()
        }
    }

    /// Set whether deltas are pushed into the host
    pub fn with_delta_reporting(mut self, enabled: bool) -> Self {
        self.report_delta = enabled;
        self
    }

    /// Set whether the interpolation factor is exposed
    pub fn with_alpha(mut self, enabled: bool) -> Self {
        self.expose_alpha = enabled;
        self
    }
}
