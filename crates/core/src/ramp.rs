//! Time-stepped numeric interpolation from zero to a declared value.
//!
//! A [`Ramp`] knows nothing about timers; callers tick it at the interval
//! carried by its [`RampSpec`] and render whatever it reports.

use std::time::Duration;

/// How a ramp's value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RampKind {
    /// Plain integer text, e.g. a statistics counter.
    Count,
    /// Percentage text plus a fill width, e.g. a skill bar.
    Percent,
    /// No text; completion only reveals the element.
    Reveal,
}

/// Engine-wide pacing for ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampSpec {
    kind: RampKind,
    steps: u32,
    interval: Duration,
}

impl RampSpec {
    /// A zero step count is treated as a single step.
    #[must_use]
    pub fn new(kind: RampKind, steps: u32, interval: Duration) -> Self {
        Self {
            kind,
            steps: steps.max(1),
            interval,
        }
    }

    #[must_use]
    pub fn kind(&self) -> RampKind {
        self.kind
    }

    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Snapshot produced by a tick that changed the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampStep {
    pub value: i64,
    pub finished: bool,
}

/// Running interpolation towards `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    target: f64,
    increment: f64,
    current: f64,
    steps: u32,
    ticks: u32,
    finished: bool,
}

impl Ramp {
    /// `target` must be finite and non-negative; use [`parse_declared_value`] to
    /// sanitise raw attribute text.
    #[must_use]
    pub fn new(target: f64, steps: u32) -> Self {
        let target = if target.is_finite() { target.max(0.0) } else { 0.0 };
        let steps = steps.max(1);
        Self {
            target,
            increment: target / f64::from(steps),
            current: 0.0,
            steps,
            ticks: 0,
            finished: false,
        }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Rounded value currently on screen.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn display_value(&self) -> i64 {
        self.current.round() as i64
    }

    /// Advance one step. Returns `None` once the ramp has landed.
    ///
    /// The last step clamps to exactly `target`, so float drift in the running
    /// sum never shows up on screen and never needs an extra tick.
    pub fn tick(&mut self) -> Option<RampStep> {
        if self.finished {
            return None;
        }

        self.ticks += 1;
        self.current += self.increment;
        if self.current >= self.target || self.ticks >= self.steps {
            self.current = self.target;
            self.finished = true;
        }

        Some(RampStep {
            value: self.display_value(),
            finished: self.finished,
        })
    }
}

/// Parse a declared target attribute such as `"80"`, `"80%"` or `"1200"`.
///
/// Unparsable, non-finite or negative input yields `0.0` and a warning instead
/// of an error; an animation should never take the page down.
#[must_use]
pub fn parse_declared_value(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        Ok(value) => {
            tracing::warn!(raw, value, "declared animation value out of range, using 0");
            0.0
        }
        Err(err) => {
            tracing::warn!(raw, error = %err, "declared animation value is not numeric, using 0");
            0.0
        }
    }
}

/// Parse a declared counter attribute by its leading integer.
///
/// `"1200+"` counts to 1200 and `"12.7"` to 12. Input without leading digits,
/// or with a leading minus sign, yields `0.0` and a warning.
#[must_use]
pub fn parse_declared_count(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        if trimmed.starts_with('-') {
            tracing::warn!(raw, "declared counter value is negative, using 0");
        } else {
            tracing::warn!(raw, "declared counter value has no leading integer, using 0");
        }
        return 0.0;
    }
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::warn!(raw, "declared counter value out of range, using 0");
            0.0
        }
    }
}

/// Render a ramp value as the element's text content.
#[must_use]
pub fn format_display(kind: RampKind, value: i64) -> Option<String> {
    match kind {
        RampKind::Count => Some(value.to_string()),
        RampKind::Percent => Some(format!("{value}%")),
        RampKind::Reveal => None,
    }
}
