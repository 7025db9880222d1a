// Property tests for the simulation invariants: whatever the pilot does, the
// charge stays in range, the craft stays on screen and nothing off-screen or
// burnt out survives a frame.

use battery_flight::hud::format_time;
use battery_flight::{Flight, FlightInput, GameConfig};
use proptest::prelude::*;

fn inputs() -> impl Strategy<Value = Vec<FlightInput>> {
    prop::collection::vec(
        (any::<bool>(), any::<bool>()).prop_map(|(up, down)| FlightInput { up, down }),
        1..1_500,
    )
}

// Arbitrary tuning, kept only when `validate` would let a page mount it.
fn configs() -> impl Strategy<Value = GameConfig> {
    let world = (
        300.0f64..1_200.0,
        200.0f64..900.0,
        0.0f64..500.0,
        1.0f64..200.0,
        5.0f64..120.0,
        1.0f64..20.0,
    );
    let pace = (0.5f64..12.0, 30.0f64..600.0, 100.0f64..2_000.0);
    let power = (1.0f64..100.0, 0.0f64..150.0, 0.1f64..10.0, 0.1f64..60.0, 0.01f64..1.0);
    (world, pace, power)
        .prop_map(
            |(
                (width, height, gap, min_wall, player_h, player_speed),
                (scroll, threshold, interval),
                (initial, headroom, drain, pickup, decay),
            )| GameConfig {
                canvas_width: width,
                canvas_height: height,
                safe_gap: gap,
                min_wall_height: min_wall,
                player_height: player_h,
                player_speed,
                scroll_speed: scroll,
                spawn_threshold: threshold,
                drain_interval_ms: interval,
                initial_charge: initial,
                max_charge: initial + headroom,
                drain_amount: drain,
                pickup_charge: pickup,
                particle_decay: decay,
                ..GameConfig::default()
            },
        )
        .prop_filter("config must validate", |cfg| cfg.validate().is_ok())
}

fn check_every_frame(
    cfg: &GameConfig,
    seed: u64,
    frames: &[FlightInput],
    frame_ms: f64,
) -> Result<(), TestCaseError> {
    let mut flight = Flight::new(cfg.clone(), seed);
    flight.start(0.0);
    for (i, input) in frames.iter().enumerate() {
        flight.step(input, (i + 1) as f64 * frame_ms);

        prop_assert!(flight.charge() >= 0.0 && flight.charge() <= cfg.max_charge);
        let p = flight.player().rect;
        prop_assert!(p.y >= 0.0 && p.bottom() <= cfg.canvas_height);
        prop_assert!(flight.walls().iter().all(|w| w.rect.right() >= 0.0));
        prop_assert!(flight.walls().iter().all(|w| cfg.canvas_height - w.rect.h > cfg.safe_gap));
        prop_assert!(flight.batteries().iter().all(|b| b.rect.right() >= 0.0 && !b.taken));
        prop_assert!(flight.particles().iter().all(|pt| pt.life > 0.0));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn invariants_hold_every_frame(seed in any::<u64>(), frames in inputs(), frame_ms in 8.0f64..40.0) {
        check_every_frame(&GameConfig::default(), seed, &frames, frame_ms)?;
    }

    #[test]
    fn invariants_hold_for_any_valid_tuning(
        cfg in configs(),
        seed in any::<u64>(),
        frames in inputs(),
        frame_ms in 8.0f64..40.0,
    ) {
        check_every_frame(&cfg, seed, &frames, frame_ms)?;
    }

    #[test]
    fn walls_always_leave_the_safe_gap(seed in any::<u64>()) {
        let cfg = GameConfig::default();
        let mut flight = Flight::new(cfg.clone(), seed);
        flight.start(0.0);
        for i in 1..=1_000 {
            flight.step(&FlightInput::default(), i as f64);
            for w in flight.walls() {
                prop_assert!(w.rect.h >= cfg.min_wall_height);
                prop_assert!(cfg.canvas_height - w.rect.h > cfg.safe_gap);
            }
        }
    }

    #[test]
    fn formatted_time_is_minutes_and_seconds(ms in 0.0f64..1.0e8) {
        let text = format_time(ms);
        let (m, s) = text.split_once(':').unwrap();
        prop_assert!(m.len() >= 2);
        prop_assert_eq!(s.len(), 2);
        let secs: u64 = s.parse().unwrap();
        let mins: u64 = m.parse().unwrap();
        prop_assert!(secs < 60);
        prop_assert_eq!(mins * 60 + secs, (ms / 1000.0).floor() as u64);
    }
}
