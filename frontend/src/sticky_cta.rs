use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::Event;
use yew::prelude::*;

use crate::utils::frame_loop::FrameLoop;

/// Scroll offset below which the call to action never shows.
pub const SHOW_AFTER_PX: f64 = 500.0;

/// Visible while the reader scrolls down past [`SHOW_AFTER_PX`].
#[derive(Debug, Default)]
pub struct ScrollDirection {
    last_y: Cell<f64>,
}

impl ScrollDirection {
    pub fn update(&self, y: f64) -> bool {
        let visible = y > self.last_y.get() && y > SHOW_AFTER_PX;
        self.last_y.set(y);
        visible
    }
}

#[function_component(StickyCta)]
pub fn sticky_cta() -> Html {
    let visible = use_state_eq(|| false);
    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |_| {
                let direction = ScrollDirection::default();
                // One evaluation per animation frame, however many scroll events arrive.
                let frame = FrameLoop::new(move |_| {
                    if let Some(window) = web_sys::window() {
                        let y = window.scroll_y().unwrap_or(0.0);
                        visible.set(direction.update(y));
                    }
                    false
                });
                let on_scroll = {
                    let frame = Rc::clone(&frame);
                    Closure::<dyn Fn(Event)>::new(move |_: Event| frame.start())
                };
                if let Some(window) = web_sys::window() {
                    let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                }
                move || {
                    if let Some(window) = web_sys::window() {
                        let _ = window
                            .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                    }
                    frame.stop();
                }
            },
            (),
        );
    }

    html! {
        <a
            id="sticky-cta"
            class={classes!("sticky-cta", visible.then_some("visible"))}
            href="#contacto"
        >
            {"Hablemos de tu proyecto"}
        </a>
    }
}
