#![cfg(target_arch = "wasm32")]
use mole_core::{
    AccelHistory, GameConfig, GameController, Haptics, ModeKind, Ports, SystemClock,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod chart;
mod constants;
mod dom;
mod events;
mod frame;
mod haptics;
mod input;
mod view;

use crate::app::App;
use crate::constants::*;

fn load_config(window: &web::Window) -> anyhow::Result<GameConfig> {
    let mut config = GameConfig::default();
    let search = window.location().search().unwrap_or_default();
    if let Some(threshold) = input::threshold_from_query(&search) {
        log::info!("[config] shake threshold {} from query string", threshold);
        config.shake_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn wire_menu(document: &web::Document, app: &Rc<App>) {
    for (id, kind) in [
        (CLASSIC_BUTTON_ID, ModeKind::Classic),
        (REGULAR_BUTTON_ID, ModeKind::Regular),
    ] {
        let app = app.clone();
        dom::add_click_listener(document, id, move || {
            events::enable_device_motion(app.clone());
            app.select_mode(kind);
        });
    }

    let app_back = app.clone();
    dom::add_click_listener(document, BACK_BUTTON_ID, move || app_back.back_to_menu());

    let app_again = app.clone();
    dom::add_click_listener(document, ACTION_BUTTON_ID, move || app_again.play_again());
}

/// Desktop browsers get a button that stands in for a real shake.
fn wire_shake_test_button(window: &web::Window, document: &web::Document, app: &Rc<App>) {
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let mobile = input::is_mobile_user_agent(&user_agent);
    dom::set_display(document, SHAKE_TEST_BUTTON_ID, !mobile, "block");
    if !mobile {
        let app = app.clone();
        dom::add_click_listener(document, SHAKE_TEST_BUTTON_ID, move || app.test_shake());
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mole-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    document
        .get_element_by_id(GAME_AREA_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", GAME_AREA_ID))?;

    let config = load_config(&window)?;
    let threshold = config.shake_threshold;

    let view = Rc::new(view::DomView::new(document.clone()));
    let haptics: Rc<dyn Haptics> = Rc::new(haptics::WebHaptics);
    let clock = Rc::new(SystemClock::new());
    let ports = Ports::new(view.clone(), haptics, clock.clone());

    let chart = match chart::AccelChart::new(&document, CHART_CANVAS_ID, CHART_LABEL_ID) {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("[init] dev monitor unavailable: {:?}", e);
            None
        }
    };
    if let Some(canvas) = document
        .get_element_by_id(CHART_CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
    {
        dom::sync_canvas_backing_size(&canvas);
    }
    dom::set_display(&document, MONITOR_ID, false, "block");

    let app = Rc::new(App {
        controller: RefCell::new(GameController::new(config, ports)),
        view: view.clone(),
        history: RefCell::new(AccelHistory::new(threshold)),
        chart,
        document: document.clone(),
    });
    view.show_menu();

    wire_menu(&document, &app);
    wire_shake_test_button(&window, &document, &app);
    events::wire_global_keydown(app.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext { app, clock }));
    frame::start_loop(frame_ctx);
    log::info!("[init] ready, threshold {}", threshold);
    Ok(())
}
