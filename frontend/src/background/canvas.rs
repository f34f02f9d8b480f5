use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};
use yew::prelude::*;

use super::nebula::{FrameInput, Nebula, TENDRIL_COLOR, TENDRIL_OPACITY};
use crate::utils::frame_loop::FrameLoop;
use crate::warp::WarpContext;

const MOBILE_MAX_WIDTH: f64 = 768.0;
const SCROLL_DEPTH_FACTOR: f64 = 0.02;
const ORBIT_COLOR: &str = "#55ddff";

#[derive(Properties)]
pub struct NebulaCanvasProps {
    pub warp: Rc<WarpContext>,
}

impl PartialEq for NebulaCanvasProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.warp, &other.warp)
    }
}

#[derive(Default)]
struct PageInput {
    mouse: Cell<(f64, f64)>,
    scroll_depth: Cell<f64>,
    size: Cell<(f64, f64)>,
}

/// Decorative particle nebula drawn behind the site.
#[function_component(NebulaCanvas)]
pub fn nebula_canvas(props: &NebulaCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    {
        let canvas_ref = canvas_ref.clone();
        let warp = Rc::clone(&props.warp);
        use_effect_with_deps(
            move |_| {
                let destructor: Box<dyn FnOnce()> = match Background::mount(&canvas_ref, warp) {
                    Some(background) => Box::new(move || drop(background)),
                    None => {
                        log::warn!("canvas 2d context unavailable, background disabled");
                        Box::new(|| ())
                    }
                };
                move || destructor()
            },
            (),
        );
    }

    html! {
        <canvas ref={canvas_ref} id="nebula" aria-hidden="true"></canvas>
    }
}

/// A running background: its frame loop plus the window listeners feeding it.
struct Background {
    frames: Rc<FrameLoop>,
    listeners: Vec<(&'static str, Closure<dyn Fn(Event)>)>,
}

impl Background {
    fn mount(canvas_ref: &NodeRef, warp: Rc<WarpContext>) -> Option<Self> {
        let window = web_sys::window()?;
        let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let input = Rc::new(PageInput::default());
        fit(&window, &canvas, &input);

        let mobile = input.size.get().0 < MOBILE_MAX_WIDTH;
        let nebula = RefCell::new(Nebula::new(
            &mut StdRng::from_entropy(),
            mobile,
            warp.camera_target(),
        ));
        log::debug!("nebula background started (mobile: {})", mobile);

        let mut started: Option<f64> = None;
        let frames = {
            let input = Rc::clone(&input);
            FrameLoop::new(move |now| {
                let start = *started.get_or_insert(now);
                let mut nebula = nebula.borrow_mut();
                nebula.step(&FrameInput {
                    mouse: input.mouse.get(),
                    scroll_depth: input.scroll_depth.get(),
                    camera_target: warp.camera_target(),
                    time: (now - start) / 1000.0,
                });
                draw(&context, &nebula, input.size.get());
                true
            })
        };

        let mut listeners = Vec::new();
        let mousemove = {
            let input = Rc::clone(&input);
            Closure::<dyn Fn(Event)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                let (w, h) = input.size.get();
                if w > 0.0 && h > 0.0 {
                    input.mouse.set((
                        event.client_x() as f64 / w * 2.0 - 1.0,
                        event.client_y() as f64 / h * 2.0 - 1.0,
                    ));
                }
            })
        };
        listeners.push(("mousemove", mousemove));

        let scroll = {
            let input = Rc::clone(&input);
            Closure::<dyn Fn(Event)>::new(move |_: Event| {
                if let Some(window) = web_sys::window() {
                    let y = window.scroll_y().unwrap_or(0.0);
                    input.scroll_depth.set(y * SCROLL_DEPTH_FACTOR);
                }
            })
        };
        listeners.push(("scroll", scroll));

        let resize = {
            let input = Rc::clone(&input);
            let canvas = canvas.clone();
            Closure::<dyn Fn(Event)>::new(move |_: Event| {
                if let Some(window) = web_sys::window() {
                    fit(&window, &canvas, &input);
                }
            })
        };
        listeners.push(("resize", resize));

        for (name, listener) in &listeners {
            if let Err(e) = window.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref()) {
                log::warn!("failed to listen for {}: {:?}", name, e);
            }
        }

        frames.start();
        Some(Self { frames, listeners })
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.frames.stop();
        if let Some(window) = web_sys::window() {
            for (name, listener) in &self.listeners {
                let _ = window.remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            }
        }
    }
}

fn fit(window: &Window, canvas: &HtmlCanvasElement, input: &PageInput) {
    let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let width = dimension(window.inner_width());
    let height = dimension(window.inner_height());
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    input.size.set((width, height));
}

#[allow(deprecated)]
fn draw(context: &CanvasRenderingContext2d, nebula: &Nebula, (width, height): (f64, f64)) {
    context.set_global_alpha(1.0);
    context.clear_rect(0.0, 0.0, width, height);

    context.set_global_alpha(TENDRIL_OPACITY);
    context.set_stroke_style(&JsValue::from_str(TENDRIL_COLOR));
    context.set_line_width(0.5);
    context.begin_path();
    for (a, b) in nebula.tendril_segments() {
        if let (Some(a), Some(b)) = (
            nebula.project(a, width, height),
            nebula.project(b, width, height),
        ) {
            context.move_to(a.x, a.y);
            context.line_to(b.x, b.y);
        }
    }
    context.stroke();

    for layer in nebula.layers() {
        context.set_global_alpha(layer.opacity);
        context.set_fill_style(&JsValue::from_str(layer.color));
        for point in &layer.positions {
            if let Some(p) = nebula.project(*point, width, height) {
                let size = (layer.size * p.scale).clamp(0.5, 4.0);
                context.fill_rect(p.x - size / 2.0, p.y - size / 2.0, size, size);
            }
        }
    }

    context.set_global_alpha(0.8);
    context.set_fill_style(&JsValue::from_str(ORBIT_COLOR));
    for point in nebula.orbit_points() {
        if let Some(p) = nebula.project(point, width, height) {
            let size = (0.9 * p.scale).clamp(1.0, 6.0);
            context.fill_rect(p.x - size / 2.0, p.y - size / 2.0, size, size);
        }
    }
    context.set_global_alpha(1.0);
}
