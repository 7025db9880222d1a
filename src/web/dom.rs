//! Handles to the page's screens and HUD readouts.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::flight::{Ending, Flight};
use crate::hud::{self, PowerLevel};

fn by_id<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}

pub(super) struct Ui {
    doc: Document,
    pub screen_welcome: Element,
    pub screen_result: Element,
    pub screen_loss: Element,
    pub screen_pause: Element,
    pub hud: Element,
    pub input_name: HtmlInputElement,
    pub btn_start: HtmlButtonElement,
    hud_name: Element,
    hud_time: Element,
    hud_power: Element,
    power_fill: HtmlElement,
    res_name: Element,
    res_time: Element,
    loss_time: Element,
}

impl Ui {
    pub fn from_document(doc: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            doc: doc.clone(),
            screen_welcome: by_id(doc, "screen-welcome")?,
            screen_result: by_id(doc, "screen-result")?,
            screen_loss: by_id(doc, "screen-loss")?,
            screen_pause: by_id(doc, "screen-pause")?,
            hud: by_id(doc, "ui-hud")?,
            input_name: by_id(doc, "input-name")?,
            btn_start: by_id(doc, "btn-start")?,
            hud_name: by_id(doc, "hud-name")?,
            hud_time: by_id(doc, "hud-time")?,
            hud_power: by_id(doc, "hud-power")?,
            power_fill: by_id(doc, "power-fill")?,
            res_name: by_id(doc, "res-name")?,
            res_time: by_id(doc, "res-time")?,
            loss_time: by_id(doc, "loss-time")?,
        })
    }

    /// Every element with class `btn-restart`.
    pub fn restart_buttons(&self) -> Result<Vec<Element>, JsValue> {
        let list = self.doc.query_selector_all(".btn-restart")?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    /// Hide every `.screen`, then reveal `screen` if given.
    pub fn show_screen(&self, screen: Option<&Element>) -> Result<(), JsValue> {
        let list = self.doc.query_selector_all(".screen")?;
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                set_visible(&el, false)?;
            }
        }
        if let Some(el) = screen {
            set_visible(el, true)?;
        }
        Ok(())
    }

    pub fn set_hud_visible(&self, visible: bool) -> Result<(), JsValue> {
        set_visible(&self.hud, visible)
    }

    pub fn set_pause_visible(&self, visible: bool) -> Result<(), JsValue> {
        set_visible(&self.screen_pause, visible)
    }

    pub fn refresh_start_button(&self) {
        let empty = self.input_name.value().trim().is_empty();
        self.btn_start.set_disabled(empty);
    }

    pub fn set_pilot(&self, name: &str) {
        self.hud_name.set_text_content(Some(name));
    }

    pub fn update_hud(&self, flight: &Flight) -> Result<(), JsValue> {
        let charge = flight.charge();
        self.hud_time
            .set_text_content(Some(&hud::format_time(flight.flight_time_ms())));
        self.hud_power.set_text_content(Some(&hud::power_text(charge)));
        let style = self.power_fill.style();
        style.set_property("width", &hud::bar_width(charge))?;
        style.set_property("background", PowerLevel::from_charge(charge).color())?;
        Ok(())
    }

    pub fn show_finish(&self, ending: Ending, name: &str, flight_time_ms: f64) -> Result<(), JsValue> {
        self.set_hud_visible(false)?;
        let time = hud::format_time(flight_time_ms);
        match ending {
            Ending::Depleted => {
                self.res_name.set_text_content(Some(name));
                self.res_time.set_text_content(Some(&time));
                self.show_screen(Some(&self.screen_result))
            }
            Ending::Destroyed => {
                self.loss_time.set_text_content(Some(&time));
                self.show_screen(Some(&self.screen_loss))
            }
        }
    }
}

fn set_visible(el: &Element, visible: bool) -> Result<(), JsValue> {
    let classes = el.class_list();
    if visible {
        classes.remove_1("hidden")?;
        classes.add_1("active")
    } else {
        classes.remove_1("active")?;
        classes.add_1("hidden")
    }
}
