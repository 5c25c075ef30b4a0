use crate::app::App;
use js_sys::{Function, Promise, Reflect};
use mole_core::acceleration_magnitude;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

static LISTENING: AtomicBool = AtomicBool::new(false);

fn wire_devicemotion(app: Rc<App>) {
    if LISTENING.swap(true, Ordering::SeqCst) {
        return;
    }
    let Some(window) = web::window() else {
        LISTENING.store(false, Ordering::SeqCst);
        return;
    };
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::DeviceMotionEvent| {
        let Some(acc) = ev.acceleration_including_gravity() else {
            return;
        };
        let magnitude = acceleration_magnitude(
            acc.x().unwrap_or(0.0),
            acc.y().unwrap_or(0.0),
            acc.z().unwrap_or(0.0),
        );
        app.on_magnitude(magnitude);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref());
    closure.forget();
    log::info!("[motion] devicemotion listener attached");
}

/// `DeviceMotionEvent.requestPermission`, present on iOS 13+ only.
fn permission_request() -> Option<Function> {
    let window = web::window()?;
    let class = Reflect::get(window.as_ref(), &JsValue::from_str("DeviceMotionEvent")).ok()?;
    Reflect::get(&class, &JsValue::from_str("requestPermission"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
        .map(|f| f.bind0(&class))
}

/// Invoked synchronously so the call stays inside the click's user
/// activation; only the answer is awaited.
fn request_permission(request: &Function) -> anyhow::Result<Promise> {
    request
        .call0(&JsValue::UNDEFINED)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<Promise>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

async fn permission_granted(promise: Promise) -> anyhow::Result<bool> {
    let state = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(state.as_string().as_deref() == Some("granted"))
}

/// Start listening for motion. Must run inside a user gesture (the mode
/// buttons) so iOS will show its permission prompt.
pub fn enable_device_motion(app: Rc<App>) {
    if LISTENING.load(Ordering::SeqCst) {
        return;
    }
    match permission_request() {
        Some(request) => {
            let promise = match request_permission(&request) {
                Ok(p) => p,
                Err(e) => {
                    log::error!("[motion] permission request failed: {:?}", e);
                    return;
                }
            };
            spawn_local(async move {
                match permission_granted(promise).await {
                    Ok(true) => wire_devicemotion(app),
                    Ok(false) => log::warn!("[motion] permission denied; use the test shake"),
                    Err(e) => log::error!("[motion] permission request failed: {:?}", e),
                }
            });
        }
        None => wire_devicemotion(app),
    }
}
