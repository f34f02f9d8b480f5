use yew::prelude::*;

use super::theme_toggle::ThemeToggle;
use crate::nav::View;

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub active: View,
}

/// Top navigation. Clicks are picked up through `data-page` by the router's
/// document listener, so links here carry no handlers of their own.
#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    html! {
        <nav class="top-nav">
            <a
                href="#home"
                data-page={View::Home.token()}
                class={classes!("brand", View::Home.active_class(props.active))}
            >
                <span class="brand-mark">{"◆"}</span>{"NAZBOT"}
            </a>
            <div class="nav-links">
                { for View::ALL.iter().map(|view| html! {
                    <a
                        href={format!("#{}", view.token())}
                        data-page={view.token()}
                        class={classes!("nav-link", view.active_class(props.active))}
                    >
                        {view.label()}
                    </a>
                }) }
                <a href="#contacto" class="nav-cta">{"Contacto"}</a>
            </div>
            <ThemeToggle />
        </nav>
    }
}
