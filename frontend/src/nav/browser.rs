use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions};
use yew::Callback;

use super::router::{HistoryPort, ViewRouter, ViewSurface};
use super::view::View;
use crate::reveal::ScrollReveal;

/// Delay that lets a freshly displayed section get its layout.
const LAYOUT_SETTLE_MS: u32 = 50;

pub struct BrowserHistory;

impl HistoryPort for BrowserHistory {
    fn fragment(&self) -> String {
        window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    fn push(&self, view: View) {
        let Some(window) = window() else { return };
        let url = match view.fragment() {
            fragment if fragment.is_empty() => {
                let location = window.location();
                format!(
                    "{}{}",
                    location.pathname().unwrap_or_else(|_| "/".to_string()),
                    location.search().unwrap_or_default()
                )
            }
            fragment => fragment,
        };
        let pushed = window.history().and_then(|history| {
            history.push_state_with_url(&JsValue::from_str(view.token()), "", Some(&url))
        });
        if let Err(e) = pushed {
            log::warn!("failed to push history entry for {}: {:?}", view.token(), e);
        }
    }
}

/// Projects router state onto the Yew tree and the window.
pub struct DomSurface {
    pub highlighted: Callback<View>,
    pub visible: Callback<View>,
    pub reveal: Rc<ScrollReveal>,
}

impl ViewSurface for DomSurface {
    fn highlight(&self, view: View) {
        self.highlighted.emit(view);
    }

    fn display(&self, view: View) {
        self.visible.emit(view);
    }

    fn scroll_to_top(&self) {
        if let Some(window) = window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Instant);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }

    fn after_layout(&self, then: Box<dyn FnOnce()>) {
        Timeout::new(LAYOUT_SETTLE_MS, then).forget();
    }

    fn reveal(&self, view: View) {
        self.reveal.trigger(view);
    }
}

pub fn smooth_scroll_to(id: &str) {
    let target = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id));
    if let Some(target) = target {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Document-level listeners feeding the router. Removed on drop.
pub struct NavListeners {
    click: Closure<dyn Fn(Event)>,
    popstate: Closure<dyn Fn(Event)>,
}

impl NavListeners {
    pub fn install(router: Rc<ViewRouter>) -> Option<Self> {
        let window = window()?;
        let document = window.document()?;

        let click = {
            let router = Rc::clone(&router);
            Closure::<dyn Fn(Event)>::new(move |event: Event| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                if let Ok(Some(link)) = target.closest("[data-page]") {
                    let token = link.get_attribute("data-page").unwrap_or_default();
                    if router.handle_link(&token) {
                        event.prevent_default();
                    }
                    return;
                }
                if let Ok(Some(_)) = target.closest("a[href=\"#contacto\"]") {
                    event.prevent_default();
                    smooth_scroll_to("contacto");
                }
            })
        };
        let popstate = {
            let router = Rc::clone(&router);
            Closure::<dyn Fn(Event)>::new(move |_: Event| router.handle_history_navigation())
        };

        document
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .ok()?;
        window
            .add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { click, popstate })
    }
}

impl Drop for NavListeners {
    fn drop(&mut self) {
        if let Some(window) = window() {
            if let Some(document) = window.document() {
                let _ = document
                    .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
            }
            let _ = window
                .remove_event_listener_with_callback("popstate", self.popstate.as_ref().unchecked_ref());
        }
    }
}
