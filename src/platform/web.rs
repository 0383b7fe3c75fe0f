//! DOM implementations of the platform ports
//!
//! Drops are absolutely positioned `<div class="drop water|mud">` children of
//! `#gameContainer`; the CSS `fall` animation moves them. Each drop carries a
//! `data-drop-id` attribute so clicks can be routed back to the game.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use super::{Celebration, ConfettiBurst, Control, Flash, MessageTone, Renderer, TextSlot};
use crate::sim::{DropId, FallingDrop};

/// Attribute linking a drop element to its [`DropId`]
pub const DROP_ID_ATTR: &str = "data-drop-id";

// Confetti is an optional page script; only call it if it loaded
#[wasm_bindgen(inline_js = "
    export function fire_confetti(count, spread, originY) {
        if (typeof window.confetti !== 'function') {
            return false;
        }
        try {
            window.confetti({ particleCount: count, spread: spread, origin: { y: originY } });
            return true;
        } catch (e) {
            return false;
        }
    }
")]
extern "C" {
    fn fire_confetti(count: u32, spread: f64, origin_y: f64) -> bool;
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
}

/// Renderer writing straight to the page
pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    score: Element,
    time: Element,
    message: HtmlElement,
    progress_bar: HtmlElement,
    start_btn: Element,
    reset_btn: Element,
    difficulty: Element,
}

impl DomRenderer {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let container: HtmlElement = element_by_id(document, "gameContainer")?;
        let progress_bar = match document.get_element_by_id("progressBar") {
            Some(el) => el.dyn_into::<HtmlElement>()?,
            None => Self::insert_progress_bar(document, &container)?,
        };

        Ok(Self {
            document: document.clone(),
            score: element_by_id(document, "score")?,
            time: element_by_id(document, "time")?,
            message: element_by_id(document, "message")?,
            start_btn: element_by_id(document, "startBtn")?,
            reset_btn: element_by_id(document, "resetBtn")?,
            difficulty: element_by_id(document, "difficulty")?,
            progress_bar,
            container,
        })
    }

    /// Play field element, for event wiring
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Build the progress bar above the play field when the page has none
    fn insert_progress_bar(
        document: &Document,
        container: &HtmlElement,
    ) -> Result<HtmlElement, JsValue> {
        let wrap = document.create_element("div")?;
        wrap.set_class_name("progress-bar-wrap");
        let bar: HtmlElement = document.create_element("div")?.dyn_into()?;
        bar.set_id("progressBar");
        wrap.append_child(&bar)?;
        if let Some(parent) = container.parent_node() {
            let anchor: &web_sys::Node = container;
            parent.insert_before(&wrap, Some(anchor))?;
        }
        Ok(bar)
    }

    fn build_drop(&self, drop: &FallingDrop) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        el.set_class_name(&format!("drop {}", drop.kind.css_class()));
        el.set_attribute(DROP_ID_ATTR, &drop.id.to_string())?;

        let style = el.style();
        let size = format!("{}px", drop.size);
        style.set_property("width", &size)?;
        style.set_property("height", &size)?;
        style.set_property("left", &format!("{}px", drop.left))?;
        style.set_property("animation-duration", &format!("{}s", drop.fall_duration))?;
        Ok(el)
    }

    fn control(&self, control: Control) -> &Element {
        match control {
            Control::Start => &self.start_btn,
            Control::Reset => &self.reset_btn,
            Control::Difficulty => &self.difficulty,
        }
    }
}

impl Renderer for DomRenderer {
    fn container_width(&self) -> f64 {
        self.container.client_width() as f64
    }

    fn create_drop(&mut self, drop: &FallingDrop) {
        match self.build_drop(drop) {
            Ok(el) => {
                let _ = self.container.append_child(&el);
            }
            Err(e) => log::warn!("Failed to create drop {}: {:?}", drop.id, e),
        }
    }

    fn remove_drop(&mut self, id: DropId) {
        let selector = format!("[{DROP_ID_ATTR}=\"{id}\"]");
        if let Ok(Some(el)) = self.container.query_selector(&selector) {
            el.remove();
        }
    }

    fn clear_drops(&mut self) {
        while let Ok(Some(el)) = self.container.query_selector(".drop") {
            el.remove();
        }
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) {
        let el = match slot {
            TextSlot::Score => &self.score,
            TextSlot::Time => &self.time,
        };
        el.set_text_content(Some(text));
    }

    fn set_progress(&mut self, percent: f64) {
        let _ = self
            .progress_bar
            .style()
            .set_property("width", &format!("{percent}%"));
    }

    fn set_message(&mut self, text: &str, tone: MessageTone) {
        self.message.set_text_content(Some(text));
        let color = match tone {
            MessageTone::Highlight => "var(--cw-blue)",
            MessageTone::Neutral => "var(--cw-brown)",
        };
        let _ = self.message.style().set_property("color", color);
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        let _ = self
            .control(control)
            .toggle_attribute_with_force("disabled", !enabled);
    }

    fn flash(&mut self, flash: Option<Flash>) {
        let style = self.container.style();
        match flash {
            Some(Flash::Good) => {
                let _ = style.set_property("box-shadow", "0 0 16px 6px #00e6ff88");
            }
            Some(Flash::Bad) => {
                let _ = style.set_property("box-shadow", "0 0 16px 6px #8b5e3c88");
            }
            None => {
                let _ = style.remove_property("box-shadow");
            }
        }
    }
}

/// `canvas-confetti` page hook
#[derive(Debug, Default, Clone, Copy)]
pub struct Confetti;

impl Celebration for Confetti {
    fn celebrate(&mut self, burst: &ConfettiBurst) -> bool {
        fire_confetti(burst.particle_count, burst.spread, burst.origin_y)
    }
}

/// Read the drop id from a click target inside the play field
pub fn drop_id_from_target(target: &Element) -> Option<DropId> {
    let drop = target.closest(".drop").ok()??;
    drop.get_attribute(DROP_ID_ATTR)?.parse().ok()
}
