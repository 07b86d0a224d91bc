//! Browser-side helpers for the personality block.
//!
//! - **Regions**: reading and writing the text of the contenteditable regions.
//! - **File input**: opening the hidden picker and pulling the chosen file out of
//!   its `change` event.
//! - **Feedback**: the toast notifier the upload controller reports failures to.
//! - **Styling**: building the inline background for a loaded photo.

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlInputElement};
use yew::NodeRef;

use super::photo::{Notifier, Severity};

/// Text currently typed into a region, or `None` if it is not mounted.
pub fn region_text(region: &NodeRef) -> Option<String> {
    region
        .cast::<HtmlElement>()
        .and_then(|element| element.text_content())
}

pub fn set_region_text(region: &NodeRef, text: &str) {
    if let Some(element) = region.cast::<HtmlElement>() {
        element.set_text_content(Some(text));
    }
}

/// Opens the file picker behind `input`.
///
/// The value is cleared first so choosing the same file twice still fires
/// `change`.
pub fn open_file_picker(input: &NodeRef) -> bool {
    match input.cast::<HtmlInputElement>() {
        Some(input) => {
            input.set_value("");
            input.click();
            true
        }
        None => false,
    }
}

/// First file of a file input's `change` event.
pub fn selected_file(event: &Event) -> Option<web_sys::File> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Keys that activate the photo area like a button does.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

/// Inline style showing `url` as a cover background.
pub fn photo_background(url: &str) -> String {
    format!(
        "background: url('{}') center center / cover no-repeat;",
        escape_css_url(url)
    )
}

/// Escapes a URL for use inside a single-quoted CSS `url()`.
pub fn escape_css_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\\' | '\'' | '"' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' | '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Notifier that shows a toast at the bottom of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        show_toast(message, severity);
    }
}

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast removes itself after three seconds. `message` is inserted as text,
/// never as markup, since upload errors can echo server responses.
pub fn show_toast(message: &str, severity: Severity) {
    let background = match severity {
        Severity::Info => "rgba(0, 0, 0, 0.8)",
        Severity::Success => "rgba(46, 125, 50, 0.9)",
        Severity::Error => "rgba(198, 40, 40, 0.9)",
    };

    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                toast.set_attribute("role", "alert").ok();
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", background).ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
