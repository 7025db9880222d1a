//! Flight simulation: the craft, the scrolling walls and batteries, the power
//! meter and the screen state machine.
//!
//! Nothing in here touches the browser. The web layer feeds held-key state and
//! a millisecond clock into [`Flight::step`] once per animation frame and draws
//! whatever the simulation exposes afterwards. All speeds are per frame, all
//! timers are in milliseconds of the clock passed in.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;

pub mod particles;
pub mod spawn;

pub use particles::Particle;

pub const CRASH_COLOR: &str = "orange";
pub const PICKUP_COLOR: &str = "#00ff00";

// --- Geometry / Entities ----------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that merely share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    pub rect: Rect,
    pub taken: bool,
}

/// Which keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightInput {
    pub up: bool,
    pub down: bool,
}

// --- Screens ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    /// Name entry, nothing simulated yet.
    Welcome,
    Playing,
    Paused { since_ms: f64 },
    /// Collision happened; explosion plays out before `Loss`.
    Crashing { since_ms: f64 },
    /// Battery ran dry.
    Result,
    /// Hit a wall.
    Loss,
}

impl Screen {
    /// Whether the animation loop needs to keep running.
    pub fn is_animating(&self) -> bool {
        matches!(self, Screen::Playing | Screen::Crashing { .. })
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Screen::Result | Screen::Loss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Depleted,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not playing; nothing changed.
    Idle,
    Running,
    /// A wall was hit this frame.
    Crashed,
    /// The run ended this frame.
    Finished(Ending),
}

// --- Simulation -------------------------------------------------------------

pub struct Flight {
    config: GameConfig,
    rng: Pcg32,
    screen: Screen,
    player: Player,
    walls: Vec<Wall>,
    batteries: Vec<Battery>,
    particles: Vec<Particle>,
    charge: f64,
    start_ms: f64,
    last_drain_ms: f64,
    flight_time_ms: f64,
    spawn_acc: f64,
}

impl Flight {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player = Player {
            rect: Rect {
                x: config.player_x,
                y: config.canvas_height / 2.0,
                w: config.player_width,
                h: config.player_height,
            },
            speed: config.player_speed,
        };
        let mut flight = Self {
            charge: config.initial_charge,
            config,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Welcome,
            player,
            walls: Vec::new(),
            batteries: Vec::new(),
            particles: Vec::new(),
            start_ms: 0.0,
            last_drain_ms: 0.0,
            flight_time_ms: 0.0,
            spawn_acc: 0.0,
        };
        flight.clamp_player();
        flight
    }

    /// Begin a fresh run (also used for restarts).
    pub fn start(&mut self, now_ms: f64) {
        self.screen = Screen::Playing;
        self.charge = self.config.initial_charge;
        self.flight_time_ms = 0.0;
        self.start_ms = now_ms;
        self.last_drain_ms = now_ms;
        self.walls.clear();
        self.batteries.clear();
        self.particles.clear();
        self.player.rect.y = self.config.canvas_height / 2.0;
        self.clamp_player();
        self.spawn_acc = 0.0;
        log::info!("flight started (charge {})", self.charge);
    }

    /// Flip between `Playing` and `Paused`. Returns false when the current
    /// screen cannot be paused or resumed.
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        match self.screen {
            Screen::Playing => {
                self.screen = Screen::Paused { since_ms: now_ms };
                log::info!("paused at {}", crate::hud::format_time(self.flight_time_ms));
                true
            }
            Screen::Paused { since_ms } => {
                // paused time counts toward neither flight time nor drain
                let paused = (now_ms - since_ms).max(0.0);
                self.start_ms += paused;
                self.last_drain_ms += paused;
                self.screen = Screen::Playing;
                log::info!("resumed after {paused:.0}ms");
                true
            }
            _ => false,
        }
    }

    pub fn step(&mut self, input: &FlightInput, now_ms: f64) -> StepOutcome {
        match self.screen {
            Screen::Playing => {}
            Screen::Crashing { since_ms } => {
                particles::advance(&mut self.particles, self.config.particle_decay);
                if now_ms - since_ms >= self.config.crash_linger_ms {
                    self.finish(Ending::Destroyed);
                    return StepOutcome::Finished(Ending::Destroyed);
                }
                return StepOutcome::Running;
            }
            _ => return StepOutcome::Idle,
        }

        self.flight_time_ms = (now_ms - self.start_ms).max(0.0);

        if now_ms - self.last_drain_ms >= self.config.drain_interval_ms {
            self.charge -= self.config.drain_amount;
            self.last_drain_ms = now_ms;
            if self.charge <= 0.0 {
                self.charge = 0.0;
                self.finish(Ending::Depleted);
                return StepOutcome::Finished(Ending::Depleted);
            }
        }

        self.move_player(input);
        self.tick_spawner();

        if self.advance_walls() {
            let (cx, cy) = self.player.rect.center();
            particles::burst(
                &mut self.particles,
                cx,
                cy,
                CRASH_COLOR,
                self.config.particle_count,
                self.config.particle_spread,
                &mut self.rng,
            );
            particles::advance(&mut self.particles, self.config.particle_decay);
            self.screen = Screen::Crashing { since_ms: now_ms };
            log::info!(
                "crashed after {} with {} charge left",
                crate::hud::format_time(self.flight_time_ms),
                self.charge.round()
            );
            return StepOutcome::Crashed;
        }

        self.advance_batteries();
        particles::advance(&mut self.particles, self.config.particle_decay);
        StepOutcome::Running
    }

    fn move_player(&mut self, input: &FlightInput) {
        if input.up {
            self.player.rect.y -= self.player.speed;
        }
        if input.down {
            self.player.rect.y += self.player.speed;
        }
        self.clamp_player();
    }

    fn clamp_player(&mut self) {
        let max_y = self.config.canvas_height - self.player.rect.h;
        self.player.rect.y = self.player.rect.y.clamp(0.0, max_y.max(0.0));
    }

    fn tick_spawner(&mut self) {
        self.spawn_acc += self.config.scroll_speed;
        if self.spawn_acc >= self.config.spawn_threshold {
            self.spawn_acc = 0.0;
            let (wall, battery) = spawn::spawn_pair(&self.config, &mut self.rng);
            self.walls.push(wall);
            self.batteries.push(battery);
        }
    }

    /// Scroll walls, prune the ones past the left edge and report a hit.
    fn advance_walls(&mut self) -> bool {
        let speed = self.config.scroll_speed;
        for wall in &mut self.walls {
            wall.rect.x -= speed;
        }
        self.walls.retain(|w| w.rect.right() >= 0.0);
        let player = self.player.rect;
        self.walls.iter().any(|w| w.rect.overlaps(&player))
    }

    fn advance_batteries(&mut self) {
        let speed = self.config.scroll_speed;
        let player = self.player.rect;
        for battery in &mut self.batteries {
            battery.rect.x -= speed;
            if !battery.taken && battery.rect.overlaps(&player) {
                battery.taken = true;
                self.charge = (self.charge + self.config.pickup_charge).min(self.config.max_charge);
                particles::burst(
                    &mut self.particles,
                    battery.rect.x,
                    battery.rect.y,
                    PICKUP_COLOR,
                    self.config.particle_count,
                    self.config.particle_spread,
                    &mut self.rng,
                );
                log::debug!("battery collected, charge now {}", self.charge);
            }
        }
        self.batteries.retain(|b| !b.taken && b.rect.right() >= 0.0);
    }

    fn finish(&mut self, ending: Ending) {
        self.screen = match ending {
            Ending::Depleted => Screen::Result,
            Ending::Destroyed => Screen::Loss,
        };
        log::info!(
            "flight over ({:?}) after {}",
            ending,
            crate::hud::format_time(self.flight_time_ms)
        );
    }

    // --- Accessors ----------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn flight_time_ms(&self) -> f64 {
        self.flight_time_ms
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn batteries(&self) -> &[Battery] {
        &self.batteries
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    fn push_wall(&mut self, rect: Rect) {
        self.walls.push(Wall { rect });
    }

    #[cfg(test)]
    fn push_battery(&mut self, rect: Rect) {
        self.batteries.push(Battery { rect, taken: false });
    }
}
