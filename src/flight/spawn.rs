//! Obstacle / pickup generation.
//!
//! Every spawn produces one wall flush against the top or bottom edge and one
//! battery floating in the middle of the open band beside it, a little further
//! to the right so the player has time to line up after clearing the wall.

use rand::Rng;

use super::{Battery, Rect, Wall};
use crate::config::GameConfig;

/// Height for a wall given a uniform sample `r` in [0, 1).
/// Always in `[min_wall_height, canvas_height - safe_gap)`.
pub fn wall_height(cfg: &GameConfig, r: f64) -> f64 {
    let range = cfg.canvas_height - cfg.safe_gap - cfg.min_wall_height;
    (r * range).floor() + cfg.min_wall_height
}

/// Top edge of the battery paired with a wall of height `h`.
pub fn battery_y(cfg: &GameConfig, h: f64, wall_on_top: bool) -> f64 {
    let open = cfg.canvas_height - h;
    let centre = if wall_on_top { h + open / 2.0 } else { open / 2.0 };
    centre - cfg.battery_lift
}

pub fn spawn_pair<R: Rng>(cfg: &GameConfig, rng: &mut R) -> (Wall, Battery) {
    let h = wall_height(cfg, rng.random::<f64>());
    let on_top = rng.random_bool(0.5);

    let wall = Wall {
        rect: Rect {
            x: cfg.canvas_width,
            y: if on_top { 0.0 } else { cfg.canvas_height - h },
            w: cfg.wall_width,
            h,
        },
    };
    let battery = Battery {
        rect: Rect {
            x: cfg.canvas_width + cfg.battery_lead,
            y: battery_y(cfg, h, on_top),
            w: cfg.battery_width,
            h: cfg.battery_height,
        },
        taken: false,
    };
    log::debug!(
        "spawned {} wall h={} with battery at y={}",
        if on_top { "top" } else { "bottom" },
        h,
        battery.rect.y
    );
    (wall, battery)
}
