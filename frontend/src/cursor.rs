use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::nav::bus::SubscriptionId;
use crate::nav::PageChangeBus;

/// Elements that put the cursor in its hovering state.
pub const HOVER_TARGETS: &str = "a, button, [role=\"button\"], .service-card, .faq-item summary, \
     input[type=\"range\"], .tech-item, .testimonial, .pricing-card";
const RESCAN_DELAY_MS: u32 = 50;

#[derive(Properties)]
pub struct CustomCursorProps {
    pub bus: Rc<PageChangeBus>,
}

impl PartialEq for CustomCursorProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.bus, &other.bus)
    }
}

#[function_component(CustomCursor)]
pub fn custom_cursor(props: &CustomCursorProps) -> Html {
    let cursor_ref = use_node_ref();
    {
        let cursor_ref = cursor_ref.clone();
        let bus = Rc::clone(&props.bus);
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = match CursorTracker::install(&cursor_ref, &bus) {
                    Some(tracker) => Box::new(move || drop(tracker)),
                    None => Box::new(|| ()),
                };
                move || destructor()
            },
            (),
        );
    }

    html! {
        <div class="cursor" ref={cursor_ref} aria-hidden="true"></div>
    }
}

struct HoverHandlers {
    enter: Closure<dyn Fn(Event)>,
    leave: Closure<dyn Fn(Event)>,
}

impl HoverHandlers {
    /// Attaches to every hover target. Re-attaching the same closures is a no-op
    /// for elements already wired.
    fn attach_all(&self, document: &Document) {
        let Ok(targets) = document.query_selector_all(HOVER_TARGETS) else {
            return;
        };
        for i in 0..targets.length() {
            let Some(node) = targets.item(i) else { continue };
            let _ = node.add_event_listener_with_callback("mouseenter", self.enter.as_ref().unchecked_ref());
            let _ = node.add_event_listener_with_callback("mouseleave", self.leave.as_ref().unchecked_ref());
        }
    }

    fn detach_all(&self, document: &Document) {
        let Ok(targets) = document.query_selector_all(HOVER_TARGETS) else {
            return;
        };
        for i in 0..targets.length() {
            let Some(node) = targets.item(i) else { continue };
            let _ = node.remove_event_listener_with_callback("mouseenter", self.enter.as_ref().unchecked_ref());
            let _ = node.remove_event_listener_with_callback("mouseleave", self.leave.as_ref().unchecked_ref());
        }
    }
}

struct CursorTracker {
    bus: Rc<PageChangeBus>,
    subscription: SubscriptionId,
    hover: Rc<HoverHandlers>,
    document_listeners: Vec<(&'static str, Closure<dyn Fn(Event)>)>,
}

impl CursorTracker {
    fn install(cursor_ref: &NodeRef, bus: &Rc<PageChangeBus>) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let cursor = cursor_ref.cast::<HtmlElement>()?;

        let no_hover = window
            .match_media("(hover: none)")
            .ok()
            .flatten()
            .map(|q| q.matches())
            .unwrap_or(false);
        if no_hover {
            let _ = cursor.style().set_property("display", "none");
            return None;
        }
        if let Some(body) = document.body() {
            let _ = body.class_list().add_1("has-custom-cursor");
        }

        let hover = Rc::new(HoverHandlers {
            enter: {
                let cursor = cursor.clone();
                Closure::<dyn Fn(Event)>::new(move |_: Event| {
                    let _ = cursor.class_list().add_1("hovering");
                })
            },
            leave: {
                let cursor = cursor.clone();
                Closure::<dyn Fn(Event)>::new(move |_: Event| {
                    let _ = cursor.class_list().remove_1("hovering");
                })
            },
        });
        hover.attach_all(&document);

        let subscription = {
            let hover = Rc::clone(&hover);
            bus.subscribe(move |_| {
                let hover = Rc::clone(&hover);
                Timeout::new(RESCAN_DELAY_MS, move || {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        hover.attach_all(&document);
                    }
                })
                .forget();
            })
        };

        let mut document_listeners = Vec::new();
        let follow = {
            let cursor = cursor.clone();
            Closure::<dyn Fn(Event)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                let style = cursor.style();
                let _ = style.set_property(
                    "transform",
                    &format!("translate3d({}px, {}px, 0)", event.client_x(), event.client_y()),
                );
                let _ = style.set_property("opacity", "1");
            })
        };
        document_listeners.push(("mousemove", follow));
        let hide = {
            let cursor = cursor.clone();
            Closure::<dyn Fn(Event)>::new(move |_: Event| {
                let _ = cursor.style().set_property("opacity", "0");
            })
        };
        document_listeners.push(("mouseleave", hide));

        for (name, listener) in &document_listeners {
            let _ = document.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }

        Some(Self {
            bus: Rc::clone(bus),
            subscription,
            hover,
            document_listeners,
        })
    }
}

impl Drop for CursorTracker {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            self.hover.detach_all(&document);
            for (name, listener) in &self.document_listeners {
                let _ = document.remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            }
        }
    }
}
