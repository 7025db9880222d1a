//! Browser glue: finds the page elements, wires keyboard and button
//! listeners, and drives [`Flight`] from a `requestAnimationFrame` chain.
//!
//! All mutable state sits in one thread-local `App`. Listener closures are
//! created once at mount and leaked with `Closure::forget`. The frame closure
//! lives in its own thread-local so it can re-arm itself without borrowing the
//! app; it stops re-arming as soon as the simulation leaves `Playing` /
//! `Crashing`, and pause-resume or restart arms it again.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, window};

use crate::config::GameConfig;
use crate::controls::{Control, control_for};
use crate::flight::{Flight, FlightInput, Screen, StepOutcome};
use crate::performance_now;

mod dom;
mod render;

use dom::Ui;

const CANVAS_ID: &str = "gameCanvas";

struct App {
    ctx: CanvasRenderingContext2d,
    flight: Flight,
    input: FlightInput,
    pilot: String,
    ui: Ui,
    loop_armed: bool,
}

impl App {
    /// Run one animation frame. Returns whether the loop should continue.
    fn frame(&mut self, now_ms: f64) -> bool {
        let outcome = self.flight.step(&self.input, now_ms);
        if outcome == StepOutcome::Idle {
            return false;
        }
        if let Err(e) = render::draw_frame(&self.ctx, &self.flight, now_ms) {
            log::warn!("draw failed: {e:?}");
        }
        let shown = match outcome {
            StepOutcome::Finished(ending) => {
                self.ui
                    .show_finish(ending, &self.pilot, self.flight.flight_time_ms())
            }
            _ if self.flight.screen() == Screen::Playing => self.ui.update_hud(&self.flight),
            _ => Ok(()),
        };
        if let Err(e) = shown {
            log::warn!("HUD update failed: {e:?}");
        }
        self.flight.screen().is_animating()
    }

    fn start_run(&mut self) -> Result<(), JsValue> {
        self.input = FlightInput::default();
        self.flight.start(performance_now());
        self.ui.set_pilot(&self.pilot);
        self.ui.update_hud(&self.flight)?;
        self.ui.show_screen(None)?;
        self.ui.set_hud_visible(true)
    }

    fn toggle_pause(&mut self) -> Result<(), JsValue> {
        if !self.flight.toggle_pause(performance_now()) {
            return Ok(());
        }
        let paused = matches!(self.flight.screen(), Screen::Paused { .. });
        if paused {
            // keys released while paused never fire keyup here
            self.input = FlightInput::default();
        }
        self.ui.set_pause_visible(paused)
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static FRAME: RefCell<Option<FrameCallback>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted app, if any.
fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn request_frame() {
    FRAME.with(|cell| {
        let (Some(win), Some(cb)) = (window(), cell.borrow().as_ref().map(|c| c.as_ref().clone()))
        else {
            return;
        };
        if win.request_animation_frame(cb.unchecked_ref()).is_err() {
            log::warn!("requestAnimationFrame failed; loop stalled");
        }
    });
}

/// Arm the frame loop unless a chain is already pending.
fn arm_loop() {
    let arm = with_app(|app| {
        let idle = !app.loop_armed;
        app.loop_armed = true;
        idle
    })
    .unwrap_or(false);
    if arm {
        request_frame();
    }
}

fn install_frame_loop() {
    let closure = Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = with_app(|app| {
            let keep = app.frame(ts);
            app.loop_armed = keep;
            keep
        })
        .unwrap_or(false);
        if keep_going {
            request_frame();
        }
    }) as Box<dyn FnMut(f64)>);
    FRAME.with(|cell| cell.replace(Some(closure)));
}

/// Start (or restart) a run and kick the loop.
fn begin_run() {
    match with_app(App::start_run) {
        Some(Ok(())) => arm_loop(),
        Some(Err(e)) => log::error!("could not start run: {e:?}"),
        None => {}
    }
}

pub(crate) fn pause_or_resume() {
    match with_app(|app| app.toggle_pause().map(|_| app.flight.screen())) {
        Some(Ok(Screen::Playing)) => arm_loop(),
        Some(Err(e)) => log::warn!("pause toggle failed: {e:?}"),
        _ => {}
    }
}

fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("no entropy source ({e}); seeding from the clock");
            performance_now().to_bits()
        }
    }
}

pub fn mount(config: GameConfig) -> Result<(), JsValue> {
    if APP.with(|cell| cell.borrow().is_some()) {
        log::warn!("game already mounted; ignoring");
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the play field canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(config.canvas_width as u32);
        c.set_height(config.canvas_height as u32);
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;

    let config = config.with_canvas(canvas.width() as f64, canvas.height() as f64);
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let ui = Ui::from_document(&doc)?;
    ui.show_screen(Some(&ui.screen_welcome))?;
    ui.set_hud_visible(false)?;
    ui.refresh_start_button();

    let restart_buttons = ui.restart_buttons()?;
    let input_name = ui.input_name.clone();
    let btn_start = ui.btn_start.clone();

    // Start button only enabled once a name is typed
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            with_app(|app| app.ui.refresh_start_button());
        }) as Box<dyn FnMut(_)>);
        input_name.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_app(|app| app.pilot = app.ui.input_name.value().trim().to_string());
            begin_run();
        }) as Box<dyn FnMut(_)>);
        btn_start.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    for btn in restart_buttons {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            begin_run();
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyboard: held keys steer, Escape toggles pause
    {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            match control_for(&evt.code(), &evt.key()) {
                Some(Control::Pause) => {
                    if !evt.repeat() {
                        pause_or_resume();
                    }
                }
                Some(control) => {
                    with_app(|app| app.input.apply(control, true));
                }
                None => {}
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            if let Some(control) = control_for(&evt.code(), &evt.key()) {
                with_app(|app| app.input.apply(control, false));
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    install_frame_loop();

    // Stored last: any failure above leaves nothing mounted.
    log::info!(
        "mounted on {}x{} canvas",
        config.canvas_width,
        config.canvas_height
    );
    let app = App {
        ctx,
        flight: Flight::new(config, seed()),
        input: FlightInput::default(),
        pilot: String::new(),
        ui,
        loop_armed: false,
    };
    APP.with(|cell| cell.replace(Some(app)));
    Ok(())
}
