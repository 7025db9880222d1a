use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::flight::{Battery, Flight, Particle, Player, Wall};

const GRID_SPACING: f64 = 50.0;
const PARTICLE_RADIUS: f64 = 3.0;

pub(super) fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    flight: &Flight,
    now_ms: f64,
) -> Result<(), JsValue> {
    let cfg = flight.config();
    draw_background(ctx, cfg.canvas_width, cfg.canvas_height, flight.flight_time_ms())?;
    draw_player(ctx, flight.player(), &cfg.player_color, now_ms);
    draw_walls(ctx, flight.walls());
    draw_batteries(ctx, flight.batteries())?;
    draw_particles(ctx, flight.particles())?;
    Ok(())
}

fn draw_background(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    flight_time_ms: f64,
) -> Result<(), JsValue> {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    gradient.add_color_stop(0.0, "#1a1a1a")?;
    gradient.add_color_stop(1.0, "#2a2a2a")?;
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, width, height);

    // Scrolling grid gives a sense of speed; offset is in (-50, 0]
    ctx.set_stroke_style_str("#333");
    ctx.set_line_width(2.0);
    let offset = -(flight_time_ms / 5.0) % GRID_SPACING;
    ctx.begin_path();
    let mut x = offset;
    while x < width {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        x += GRID_SPACING;
    }
    ctx.stroke();
    Ok(())
}

fn draw_player(ctx: &CanvasRenderingContext2d, player: &Player, color: &str, now_ms: f64) {
    let r = &player.rect;
    ctx.set_fill_style_str(color);
    ctx.fill_rect(r.x, r.y, r.w, r.h);

    // Rotor bars flicker every 100ms
    ctx.set_fill_style_str("#eee");
    let lift = if (now_ms / 100.0).floor() as i64 % 2 == 0 { 5.0 } else { 0.0 };
    ctx.fill_rect(r.x - 5.0, r.y - lift, 20.0, 5.0);
    ctx.fill_rect(r.x + 25.0, r.y - lift, 20.0, 5.0);
}

fn draw_walls(ctx: &CanvasRenderingContext2d, walls: &[Wall]) {
    ctx.set_fill_style_str("#8b4513");
    ctx.set_stroke_style_str("#5a2d0c");
    ctx.set_line_width(2.0);
    for wall in walls {
        let r = &wall.rect;
        ctx.fill_rect(r.x, r.y, r.w, r.h);
        ctx.stroke_rect(r.x, r.y, r.w, r.h);

        ctx.begin_path();
        ctx.move_to(r.x, r.y + r.h / 2.0);
        ctx.line_to(r.right(), r.y + r.h / 2.0);
        ctx.stroke();
    }
}

fn draw_batteries(ctx: &CanvasRenderingContext2d, batteries: &[Battery]) -> Result<(), JsValue> {
    ctx.set_font("20px Arial");
    for battery in batteries {
        let r = &battery.rect;
        ctx.set_fill_style_str("#00ff00");
        ctx.fill_rect(r.x, r.y, r.w, r.h);
        // terminal cap
        ctx.set_fill_style_str("#fff");
        ctx.fill_rect(r.x + 5.0, r.y - 4.0, 10.0, 4.0);
        ctx.set_fill_style_str("#000");
        ctx.fill_text("⚡", r.x + 2.0, r.y + 22.0)?;
    }
    Ok(())
}

fn draw_particles(ctx: &CanvasRenderingContext2d, particles: &[Particle]) -> Result<(), JsValue> {
    for p in particles {
        ctx.set_fill_style_str(p.color);
        ctx.set_global_alpha(p.life.clamp(0.0, 1.0));
        ctx.begin_path();
        ctx.arc(p.x, p.y, PARTICLE_RADIUS, 0.0, std::f64::consts::TAU)?;
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
    Ok(())
}
