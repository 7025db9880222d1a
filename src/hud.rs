//! HUD text and power-bar helpers. Pure functions; the web layer writes the
//! results into the DOM.

/// `MM:SS` from milliseconds. Minutes are not wrapped into hours.
pub fn format_time(ms: f64) -> String {
    let total_seconds = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLevel {
    High,
    Medium,
    Low,
}

impl PowerLevel {
    pub fn from_charge(charge: f64) -> Self {
        if charge > 50.0 {
            PowerLevel::High
        } else if charge > 20.0 {
            PowerLevel::Medium
        } else {
            PowerLevel::Low
        }
    }

    /// CSS colour for the power bar fill.
    pub fn color(&self) -> &'static str {
        match self {
            PowerLevel::High => "#00ff00",
            PowerLevel::Medium => "orange",
            PowerLevel::Low => "red",
        }
    }
}

pub fn power_text(charge: f64) -> String {
    format!("{}", charge.round() as i64)
}

/// CSS width for the power bar fill.
pub fn bar_width(charge: f64) -> String {
    format!("{}%", charge.max(0.0))
}
