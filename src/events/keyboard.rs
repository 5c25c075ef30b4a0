use crate::app::App;
use crate::input::{action_for_key, KeyAction};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &App) {
    if ev.repeat() {
        return;
    }
    let key = ev.key();
    let Some(action) = action_for_key(&key) else {
        return;
    };
    log::debug!("[keys] {:?} -> {:?}", key, action);
    if action == KeyAction::TestShake {
        // keep the page from scrolling
        ev.prevent_default();
    }
    app.apply_key(action);
}

pub fn wire_global_keydown(app: Rc<App>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
