//! Game tuning constants.
//!
//! Defaults reproduce the classic feel. A page can override any subset by
//! passing a JSON object to `start_game_with_config`; missing fields fall back
//! to the defaults below.

use serde::{Deserialize, Serialize};

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(String),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("safe gap {safe_gap} plus minimum wall {min_wall} leaves no room in a {height}px canvas")]
    WallBandTooSmall { safe_gap: f64, min_wall: f64, height: f64 },
    #[error("player height {player} does not fit in a {height}px canvas")]
    PlayerTooTall { player: f64, height: f64 },
    #[error("initial charge {initial} outside (0, {max}]")]
    InitialCharge { initial: f64, max: f64 },
    #[error("particle decay {0} outside (0, 1]")]
    ParticleDecay(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,

    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
    /// Vertical movement per frame while a key is held.
    pub player_speed: f64,
    pub player_color: String,

    /// Horizontal scroll per frame for walls and batteries.
    pub scroll_speed: f64,
    /// The spawn accumulator grows by `scroll_speed` per frame; a wall and a
    /// battery appear when it reaches this value.
    pub spawn_threshold: f64,

    pub wall_width: f64,
    /// Vertical room always left open next to a wall.
    pub safe_gap: f64,
    pub min_wall_height: f64,

    /// Horizontal distance from a new wall to its battery.
    pub battery_lead: f64,
    pub battery_width: f64,
    pub battery_height: f64,
    pub battery_lift: f64,

    pub initial_charge: f64,
    pub max_charge: f64,
    pub drain_interval_ms: f64,
    pub drain_amount: f64,
    pub pickup_charge: f64,

    pub particle_count: usize,
    pub particle_spread: f64,
    pub particle_decay: f64,

    /// How long the explosion plays before the loss screen appears.
    pub crash_linger_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,

            player_x: 50.0,
            player_width: 40.0,
            player_height: 30.0,
            player_speed: 5.0,
            player_color: "#00d2ff".to_string(),

            scroll_speed: 3.0,
            spawn_threshold: 300.0,

            wall_width: 50.0,
            safe_gap: 250.0,
            min_wall_height: 50.0,

            battery_lead: 150.0,
            battery_width: 20.0,
            battery_height: 30.0,
            battery_lift: 15.0,

            initial_charge: 50.0,
            max_charge: 100.0,
            drain_interval_ms: 1000.0,
            drain_amount: 1.0,
            pickup_charge: 5.0,

            particle_count: 20,
            particle_spread: 10.0,
            particle_decay: 0.05,

            crash_linger_ms: 100.0,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON object and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Copy of this config sized to the live canvas.
    pub fn with_canvas(&self, width: f64, height: f64) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 15] = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("scroll_speed", self.scroll_speed),
            ("spawn_threshold", self.spawn_threshold),
            ("wall_width", self.wall_width),
            ("min_wall_height", self.min_wall_height),
            ("battery_width", self.battery_width),
            ("battery_height", self.battery_height),
            ("max_charge", self.max_charge),
            ("drain_interval_ms", self.drain_interval_ms),
            ("drain_amount", self.drain_amount),
            ("pickup_charge", self.pickup_charge),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.safe_gap >= 0.0) {
            return Err(ConfigError::Negative {
                field: "safe_gap",
                value: self.safe_gap,
            });
        }
        if self.safe_gap + self.min_wall_height >= self.canvas_height {
            return Err(ConfigError::WallBandTooSmall {
                safe_gap: self.safe_gap,
                min_wall: self.min_wall_height,
                height: self.canvas_height,
            });
        }
        if self.player_height > self.canvas_height {
            return Err(ConfigError::PlayerTooTall {
                player: self.player_height,
                height: self.canvas_height,
            });
        }
        if !(self.initial_charge > 0.0 && self.initial_charge <= self.max_charge) {
            return Err(ConfigError::InitialCharge {
                initial: self.initial_charge,
                max: self.max_charge,
            });
        }
        if !(self.particle_decay > 0.0 && self.particle_decay <= 1.0) {
            return Err(ConfigError::ParticleDecay(self.particle_decay));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = GameConfig::from_json(r#"{ "scroll_speed": 4.5, "pickup_charge": 10 }"#).unwrap();
        assert_eq!(cfg.scroll_speed, 4.5);
        assert_eq!(cfg.pickup_charge, 10.0);
        assert_eq!(cfg.wall_width, 50.0);
        assert_eq!(cfg.player_color, "#00d2ff");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json("{ scroll_speed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_wall_band_that_cannot_fit() {
        let err = GameConfig::from_json(r#"{ "canvas_height": 290 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::WallBandTooSmall { .. }));
    }

    #[test]
    fn rejects_non_positive_speed() {
        let err = GameConfig::from_json(r#"{ "scroll_speed": 0 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotPositive {
                field: "scroll_speed",
                value: 0.0
            }
        );
    }

    #[test]
    fn rejects_drain_that_would_charge() {
        let err =
            GameConfig::from_json(r#"{ "drain_amount": -1, "initial_charge": 100 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotPositive {
                field: "drain_amount",
                value: -1.0
            }
        );
        assert!(GameConfig::from_json(r#"{ "drain_amount": 0 }"#).is_err());
    }

    #[test]
    fn rejects_pickup_that_would_drain() {
        let err = GameConfig::from_json(r#"{ "pickup_charge": -80 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotPositive {
                field: "pickup_charge",
                value: -80.0
            }
        );
    }

    #[test]
    fn rejects_negative_safe_gap() {
        let err = GameConfig::from_json(r#"{ "safe_gap": -100 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Negative {
                field: "safe_gap",
                value: -100.0
            }
        );
        let mut nan = GameConfig::default();
        nan.safe_gap = f64::NAN;
        assert!(matches!(nan.validate(), Err(ConfigError::Negative { .. })));
        // a zero gap is still playable
        assert_eq!(GameConfig::from_json(r#"{ "safe_gap": 0 }"#).map(|_| ()), Ok(()));
    }

    #[test]
    fn rejects_initial_charge_above_max() {
        let err = GameConfig::from_json(r#"{ "initial_charge": 120 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InitialCharge { .. }));
    }

    #[test]
    fn with_canvas_only_touches_dimensions() {
        let base = GameConfig::default();
        let sized = base.with_canvas(1024.0, 768.0);
        assert_eq!(sized.canvas_width, 1024.0);
        assert_eq!(sized.canvas_height, 768.0);
        assert_eq!(sized.scroll_speed, base.scroll_speed);
    }
}
