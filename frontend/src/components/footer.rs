use chrono::{Datelike, Local};
use yew::prelude::*;

use crate::nav::View;

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    pub active: View,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let year = Local::now().year();

    html! {
        <footer id="contacto" class="site-footer">
            <div class="footer-grid">
                <div class="footer-brand">
                    <h3>{"NAZBOT"}</h3>
                    <p>{"Automatización, webs 3D y contenido con IA para negocios que quieren ir más rápido."}</p>
                </div>
                <div class="footer-links">
                    <h4>{"Servicios"}</h4>
                    { for View::ALL.iter().filter(|v| **v != View::Home).map(|view| html! {
                        <a
                            href={format!("#{}", view.token())}
                            data-page={view.token()}
                            class={classes!(view.active_class(props.active))}
                        >
                            {view.label()}
                        </a>
                    }) }
                </div>
                <div class="footer-contact">
                    <h4>{"Contacto"}</h4>
                    <a href="mailto:hola@nazbot.es">{"hola@nazbot.es"}</a>
                    <p>{"O pregúntale directamente a NAZBOT en el chat."}</p>
                </div>
            </div>
            <p class="footer-copy">
                {"© "}<span id="footer-year">{year.to_string()}</span>{" NAZBOT. Todos los derechos reservados."}
            </p>
        </footer>
    }
}
