use std::rc::Rc;

use yew::prelude::*;

mod background;
mod chat;
mod components;
mod config;
mod cursor;
mod nav;
mod pages;
mod prefs;
mod reveal;
mod roi;
mod sticky_cta;
mod utils;
mod warp;

use background::NebulaCanvas;
use chat::ChatWidget;
use components::banner::AvailabilityBanner;
use components::footer::Footer;
use components::nav_bar::NavBar;
use cursor::CustomCursor;
use nav::browser::{BrowserHistory, DomSurface, NavListeners};
use nav::{PageChangeBus, View, ViewRouter};
use pages::automatizacion::AutomatizacionPage;
use pages::home::HomePage;
use pages::ia_media::IaMediaPage;
use pages::web3d::Web3dPage;
use reveal::ScrollReveal;
use sticky_cta::StickyCta;
use warp::{driver, Motion, TransitionSequencer, WarpContext};

/// Long-lived objects shared by the whole page.
struct Site {
    router: Rc<ViewRouter>,
    sequencer: Rc<TransitionSequencer>,
    warp: Rc<WarpContext>,
    bus: Rc<PageChangeBus>,
}

impl Site {
    fn new(visible: Callback<View>, highlighted: Callback<View>) -> Self {
        let motion = Motion::detect();
        let warp = Rc::new(WarpContext::new());
        let sequencer = Rc::new(TransitionSequencer::new(motion, Rc::clone(&warp)));
        let bus = Rc::new(PageChangeBus::new());
        let surface = Rc::new(DomSurface {
            highlighted,
            visible,
            reveal: Rc::new(ScrollReveal::new(motion)),
        });
        let router = ViewRouter::new(
            Rc::new(BrowserHistory),
            surface,
            sequencer.clone(),
            Rc::clone(&bus),
        );
        Self {
            router,
            sequencer,
            warp,
            bus,
        }
    }
}

fn page_content(view: View, active: View) -> Html {
    match view {
        View::Home => html! { <HomePage active={active} /> },
        View::Automatizacion => html! { <AutomatizacionPage /> },
        View::Web3d => html! { <Web3dPage /> },
        View::IaMedia => html! { <IaMediaPage active={active} /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    let visible = use_state_eq(View::default);
    let highlighted = use_state_eq(View::default);
    let overlay_ref = use_node_ref();
    let content_ref = use_node_ref();

    let site = {
        let visible = visible.clone();
        let highlighted = highlighted.clone();
        use_memo(
            move |_| {
                Site::new(
                    Callback::from(move |view: View| visible.set(view)),
                    Callback::from(move |view: View| highlighted.set(view)),
                )
            },
            (),
        )
    };

    {
        let site = Rc::clone(&site);
        let overlay_ref = overlay_ref.clone();
        let content_ref = content_ref.clone();
        use_effect_with_deps(
            move |_| {
                driver::attach(&site.sequencer, overlay_ref, content_ref);
                let listeners = NavListeners::install(Rc::clone(&site.router));
                if listeners.is_none() {
                    log::warn!("navigation listeners could not be installed");
                }
                site.router.start();
                move || drop(listeners)
            },
            (),
        );
    }

    html! {
        <>
            <NebulaCanvas warp={Rc::clone(&site.warp)} />
            <div class="warp-overlay" ref={overlay_ref} aria-hidden="true"></div>
            <CustomCursor bus={Rc::clone(&site.bus)} />
            <AvailabilityBanner />
            <NavBar active={*highlighted} />
            <main id="main-content" ref={content_ref}>
                { for View::ALL.iter().map(|view| html! {
                    <section
                        key={view.token()}
                        id={view.element_id()}
                        class={classes!("page", view.active_class(*visible))}
                    >
                        { page_content(*view, *highlighted) }
                    </section>
                }) }
            </main>
            <Footer active={*highlighted} />
            <StickyCta />
            <ChatWidget />
        </>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("NAZBOT site starting");
    yew::Renderer::<App>::new().render();
}
