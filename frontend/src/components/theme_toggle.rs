use yew::prelude::*;

use crate::prefs::{self, LocalStore};

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_state(|| prefs::load_theme(&LocalStore::open()));

    {
        let current = *theme;
        use_effect_with_deps(
            move |theme| {
                prefs::apply_theme(*theme);
                || ()
            },
            current,
        );
    }

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme.toggled();
            prefs::save_theme(&LocalStore::open(), next);
            theme.set(next);
        })
    };

    html! {
        <button id="theme-toggle" class="theme-toggle" aria-label="Cambiar tema" onclick={toggle}>
            {theme.icon()}
        </button>
    }
}
