use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::prefs::{self, LocalStore};

/// Time the slide-up animation gets before the banner leaves the layout.
const CLOSE_ANIMATION_MS: u32 = 300;

#[derive(Clone, Copy, PartialEq)]
enum BannerState {
    Shown,
    Closing,
    Hidden,
}

#[function_component(AvailabilityBanner)]
pub fn availability_banner() -> Html {
    let state = use_state(|| {
        if prefs::banner_dismissed(&LocalStore::open()) {
            BannerState::Hidden
        } else {
            BannerState::Shown
        }
    });

    {
        let shown = *state == BannerState::Shown;
        use_effect_with_deps(
            move |_| {
                if shown {
                    prefs::set_banner_visible(true);
                }
                || ()
            },
            (),
        );
    }

    let close = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            state.set(BannerState::Closing);
            prefs::set_banner_visible(false);
            prefs::dismiss_banner(&LocalStore::open());
            let state = state.clone();
            Timeout::new(CLOSE_ANIMATION_MS, move || state.set(BannerState::Hidden)).forget();
        })
    };

    if *state == BannerState::Hidden {
        return html! {};
    }

    html! {
        <div
            id="availability-banner"
            class={classes!("availability-banner", (*state == BannerState::Closing).then_some("closing"))}
        >
            <span class="pulse-dot"></span>
            <span>{"Plazas abiertas este mes para nuevos proyectos de automatización."}</span>
            <a href="#contacto" class="banner-link">{"Reserva tu llamada"}</a>
            <button id="banner-close" class="banner-close" aria-label="Cerrar aviso" onclick={close}>
                {"×"}
            </button>
        </div>
    }
}
