use crate::constants::*;
use crate::dom;
use mole_core::constants::{MOLE_END_DELAY_MS, TIME_WINDOW_SIZE};
use mole_core::{mole_pose, EndOfRoundAnimation, Feedback, GameView, MoleFrame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `GameView` over the page's DOM. Missing elements are skipped silently so
/// a trimmed-down page still runs.
pub struct DomView {
    document: web::Document,
    mole_level: Cell<f64>,
    // bumped to cancel a pending or running end-of-round animation
    mole_animation: Rc<Cell<u32>>,
}

impl DomView {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            mole_level: Cell::new(0.0),
            mole_animation: Rc::new(Cell::new(0)),
        }
    }

    pub fn cancel_mole_animation(&self) {
        self.mole_animation
            .set(self.mole_animation.get().wrapping_add(1));
    }

    /// Wobble and sink the mole from wherever it stands now, after a pause.
    fn start_mole_animation(&self) {
        self.cancel_mole_animation();
        let generation = self.mole_animation.clone();
        let ticket = generation.get();
        let animation = EndOfRoundAnimation::new(mole_pose(self.mole_level.get()));
        let document = self.document.clone();
        dom::set_timeout(MOLE_END_DELAY_MS as i32, move || {
            if generation.get() == ticket {
                play_mole_animation(&document, animation, generation, ticket);
            }
        });
    }

    /// Menu visible, play field controls hidden.
    pub fn show_menu(&self) {
        self.cancel_mole_animation();
        dom::set_display(&self.document, MODE_BUTTONS_ID, true, "flex");
        dom::set_display(&self.document, BACK_BUTTON_ID, false, "block");
        self.hide_action_button();
        self.exit_fever();
        self.set_energy_bar_visible(false);
        self.set_circle_visible(true);
        self.render_circle_size(mole_core::constants::CIRCLE_START_SIZE);
        self.render_score("Score: 0");
        self.reset_mole();
    }

    pub fn show_game(&self) {
        self.cancel_mole_animation();
        dom::set_display(&self.document, MODE_BUTTONS_ID, false, "flex");
        dom::set_display(&self.document, BACK_BUTTON_ID, true, "block");
        self.hide_action_button();
    }

    pub fn hide_action_button(&self) {
        if let Some(el) = dom::html_element(&self.document, ACTION_BUTTON_ID) {
            let style = el.style();
            _ = style.set_property("opacity", "0");
            _ = style.set_property("visibility", "hidden");
            _ = style.set_property("pointer-events", "none");
        }
    }

    fn show_action_button(&self, label: &str) {
        if let Some(el) = dom::html_element(&self.document, ACTION_BUTTON_ID) {
            el.set_text_content(Some(label));
            let style = el.style();
            _ = style.set_property("opacity", "1");
            _ = style.set_property("visibility", "visible");
            _ = style.set_property("pointer-events", "auto");
        }
    }

    fn reset_mole(&self) {
        self.mole_level.set(0.0);
        if let Some(el) = dom::html_element(&self.document, MOLE_ID) {
            let style = el.style();
            _ = style.set_property("transition", "none");
            _ = style.set_property("transform", &mole_transform(0.0));
        }
    }

    fn ensure_energy_bar(&self) {
        if self.document.get_element_by_id(ENERGY_BAR_ID).is_some() {
            return;
        }
        let Some(area) = self.document.get_element_by_id(GAME_AREA_ID) else {
            log::warn!("[view] #{} missing; energy bar not created", GAME_AREA_ID);
            return;
        };
        let (Ok(bar), Ok(fill)) = (
            self.document.create_element("div"),
            self.document.create_element("div"),
        ) else {
            return;
        };
        bar.set_id(ENERGY_BAR_ID);
        _ = bar.set_attribute(
            "style",
            &format!(
                "width:100%;height:20px;background-color:{};position:absolute;bottom:10px;left:0",
                ENERGY_TRACK_COLOR
            ),
        );
        fill.set_id(ENERGY_FILL_ID);
        _ = fill.set_attribute(
            "style",
            &format!(
                "width:100%;height:100%;background-color:{};transition:width 0.3s",
                ENERGY_FILL_COLOR
            ),
        );
        _ = bar.append_child(&fill);
        _ = area.append_child(&bar);
    }
}

fn mole_transform(level: f64) -> String {
    MoleFrame::upright(mole_pose(level)).css_transform()
}

fn request_frame(tick: &FrameCallback) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drive `animation` on the mole sprite until it finishes or `generation`
/// moves past `ticket`.
fn play_mole_animation(
    document: &web::Document,
    animation: EndOfRoundAnimation,
    generation: Rc<Cell<u32>>,
    ticket: u32,
) {
    let Some(mole) = dom::html_element(document, MOLE_ID) else {
        return;
    };
    let style = mole.style();
    _ = style.set_property("transition", "none");
    _ = style.set_property("transform-origin", "bottom center");

    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let mut started_at: Option<f64> = None;
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        if generation.get() != ticket {
            log::debug!("[view] mole animation cancelled");
            _ = tick_clone.borrow_mut().take();
            return;
        }
        let elapsed = now - *started_at.get_or_insert(now);
        _ = style.set_property("transform", &animation.frame_at(elapsed).css_transform());
        if animation.is_finished(elapsed) {
            _ = tick_clone.borrow_mut().take();
        } else {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick);
}

impl GameView for DomView {
    fn render_circle_size(&self, size: f64) {
        let px = format!("{}px", size.max(0.0));
        if let Some(el) = dom::html_element(&self.document, CIRCLE_ID) {
            let style = el.style();
            _ = style.set_property("width", &px);
            _ = style.set_property("height", &px);
        }
        let ring = format!("{}px", TIME_WINDOW_SIZE);
        if let Some(el) = dom::html_element(&self.document, TIME_WINDOW_ID) {
            let style = el.style();
            _ = style.set_property("width", &ring);
            _ = style.set_property("height", &ring);
            let color = if size <= TIME_WINDOW_SIZE {
                WINDOW_ACTIVE_COLOR
            } else {
                WINDOW_IDLE_COLOR
            };
            _ = style.set_property("background-color", color);
        }
    }

    fn render_mole_level(&self, level: f64) {
        self.mole_level.set(level);
        if let Some(el) = dom::html_element(&self.document, MOLE_ID) {
            let style = el.style();
            _ = style.set_property("transition", "transform 0.3s ease-out");
            _ = style.set_property("transform", &mole_transform(level));
        }
    }

    fn show_feedback(&self, kind: Feedback) {
        let color = match kind {
            Feedback::Positive => POSITIVE_COLOR,
            Feedback::Negative => NEGATIVE_COLOR,
        };
        dom::set_style(&self.document, FEEDBACK_ID, "background-color", color);
        dom::set_style(&self.document, FEEDBACK_ID, "opacity", FEEDBACK_OPACITY);
        let document = self.document.clone();
        dom::set_timeout(FEEDBACK_FLASH_MS, move || {
            dom::set_style(&document, FEEDBACK_ID, "opacity", "0");
        });
    }

    fn render_score(&self, text: &str) {
        dom::set_text(&self.document, SCORE_ID, text);
    }

    fn enter_fever(&self) {
        dom::set_style(&self.document, FEVER_ID, "opacity", "1");
        dom::set_display(&self.document, FEVER_COUNTDOWN_ID, true, "block");
    }

    fn exit_fever(&self) {
        dom::set_style(&self.document, FEVER_ID, "opacity", "0");
        dom::set_display(&self.document, FEVER_COUNTDOWN_ID, false, "block");
    }

    fn render_fever_countdown(&self, seconds_left: u32) {
        dom::set_text(&self.document, FEVER_COUNTDOWN_ID, &seconds_left.to_string());
    }

    fn render_energy(&self, energy: u32, max_energy: u32) {
        self.ensure_energy_bar();
        let pct = if max_energy == 0 {
            0.0
        } else {
            f64::from(energy) / f64::from(max_energy) * 100.0
        };
        dom::set_style(&self.document, ENERGY_FILL_ID, "width", &format!("{}%", pct));
    }

    fn set_circle_visible(&self, visible: bool) {
        dom::set_display(&self.document, CIRCLE_ID, visible, "block");
        dom::set_display(&self.document, TIME_WINDOW_ID, visible, "block");
    }

    fn set_energy_bar_visible(&self, visible: bool) {
        if visible {
            self.ensure_energy_bar();
        }
        dom::set_display(&self.document, ENERGY_BAR_ID, visible, "block");
    }

    fn show_end_of_round(&self, final_score: u32) {
        self.render_score(&format!("{} {}", final_score, END_OF_ROUND_CURRENCY));
        self.show_action_button(PLAY_AGAIN_LABEL);
        self.start_mole_animation();
        log::info!("[view] round over with {}", final_score);
    }
}
