use crate::constants::{TELEGRAM_IMPACT_STYLE, VIBRATE_MS};
use js_sys::Reflect;
use mole_core::Haptics;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Telegram WebApp haptics when the page runs inside Telegram, otherwise the
/// Vibration API. Devices with neither are silently skipped.
pub struct WebHaptics;

fn lookup(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// `window.Telegram.WebApp.HapticFeedback`, if present.
fn telegram_haptic_feedback(window: &web::Window) -> Option<JsValue> {
    let telegram = lookup(window.as_ref(), "Telegram")?;
    let web_app = lookup(&telegram, "WebApp")?;
    lookup(&web_app, "HapticFeedback")
}

impl Haptics for WebHaptics {
    fn pulse(&self) {
        let Some(window) = web::window() else {
            return;
        };
        if let Some(feedback) = telegram_haptic_feedback(&window) {
            if let Some(impact) =
                lookup(&feedback, "impactOccurred").and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            {
                _ = impact.call1(&feedback, &JsValue::from_str(TELEGRAM_IMPACT_STYLE));
                return;
            }
        }
        let navigator = window.navigator();
        if lookup(navigator.as_ref(), "vibrate").is_some() {
            _ = navigator.vibrate_with_duration(VIBRATE_MS);
        }
    }
}
