use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move || handler()) as Box<dyn FnMut()>
        );
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] #{} not found; click handler not wired", element_id);
    }
}

/// Look up an element that carries inline styles.
#[inline]
pub fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = html_element(document, id) {
        _ = el.style().set_property(property, value);
    }
}

#[inline]
pub fn set_display(document: &web::Document, id: &str, visible: bool, shown_as: &str) {
    set_style(document, id, "display", if visible { shown_as } else { "none" });
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn is_displayed(document: &web::Document, id: &str) -> bool {
    html_element(document, id)
        .and_then(|el| el.style().get_property_value("display").ok())
        .map(|d| d != "none")
        .unwrap_or(false)
}

/// Run `f` once after `delay_ms`.
pub fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) {
    if let Some(window) = web::window() {
        let callback = wasm_bindgen::closure::Closure::once_into_js(f);
        _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms);
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            // not laid out yet (hidden); keep the markup's size
            return;
        }
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
