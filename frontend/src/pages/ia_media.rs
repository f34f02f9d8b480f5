use yew::prelude::*;

use crate::nav::View;

const FORMATS: [(&str, &str); 4] = [
    ("Vídeo", "Anuncios y piezas para redes generadas y editadas con IA."),
    ("Imagen", "Sesiones de producto sin estudio ni fotógrafo."),
    ("Voz", "Locuciones y doblaje en varios idiomas con tu voz de marca."),
    ("Avatares", "Presentadores digitales para formación y atención al cliente."),
];

#[derive(Properties, PartialEq)]
pub struct IaMediaPageProps {
    pub active: View,
}

#[function_component(IaMediaPage)]
pub fn ia_media_page(props: &IaMediaPageProps) -> Html {
    html! {
        <>
            <header class="page-hero">
                <h1 class="reveal">{"Contenido con IA"}</h1>
                <p class="reveal">{"Produce en días lo que antes costaba meses, sin perder el tono de tu marca."}</p>
            </header>

            <section class="section">
                <div class="feature-grid">
                    { for FORMATS.iter().map(|(title, text)| html! {
                        <div class="service-card reveal">
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="section cta-section reveal">
                <h2>{"¿Y si además lo automatizamos?"}</h2>
                <a
                    href={format!("#{}", View::Automatizacion.token())}
                    data-page={View::Automatizacion.token()}
                    class={classes!("btn", "btn-ghost", View::Automatizacion.active_class(props.active))}
                >
                    {"Ver automatización"}
                </a>
            </section>
        </>
    }
}
