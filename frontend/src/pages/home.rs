use yew::prelude::*;

use crate::nav::browser::smooth_scroll_to;
use crate::nav::View;

struct Service {
    view: View,
    icon: &'static str,
    title: &'static str,
    pitch: &'static str,
}

const SERVICES: [Service; 3] = [
    Service {
        view: View::Automatizacion,
        icon: "⚙",
        title: "Automatización",
        pitch: "Conectamos tus herramientas y eliminamos el trabajo repetitivo con flujos que funcionan solos.",
    },
    Service {
        view: View::Web3d,
        icon: "◈",
        title: "Webs 3D",
        pitch: "Experiencias web inmersivas que convierten visitas en clientes y se quedan en la memoria.",
    },
    Service {
        view: View::IaMedia,
        icon: "✧",
        title: "IA Media",
        pitch: "Vídeo, imagen y voz generados con IA para producir contenido de marca a otra velocidad.",
    },
];

const TESTIMONIALS: [(&str, &str); 2] = [
    ("“Recuperamos doce horas a la semana en el equipo de ventas.”", "Laura, directora comercial"),
    ("“La web nueva dobló el tiempo medio en página el primer mes.”", "Marc, fundador de estudio"),
];

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub active: View,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let scroll_to_services = Callback::from(|_: MouseEvent| smooth_scroll_to("servicios"));

    html! {
        <>
            <header class="hero">
                <p class="hero-kicker reveal">{"Estudio de automatización e inteligencia artificial"}</p>
                <h1 class="hero-title reveal">{"Tu negocio, a velocidad warp"}</h1>
                <p class="hero-subtitle reveal">
                    {"Automatizamos procesos, creamos webs 3D y producimos contenido con IA para que tu equipo se dedique a lo importante."}
                </p>
                <div class="hero-actions reveal">
                    <button id="scroll-to-services" class="btn btn-primary" onclick={scroll_to_services}>
                        {"Ver servicios"}
                    </button>
                    <a href="#contacto" class="btn btn-ghost">{"Hablemos"}</a>
                </div>
            </header>

            <section id="servicios" class="section">
                <h2 class="section-title reveal">{"Qué hacemos"}</h2>
                <div class="service-grid">
                    { for SERVICES.iter().map(|service| html! {
                        <a
                            href={format!("#{}", service.view.token())}
                            data-page={service.view.token()}
                            class={classes!("service-card", "reveal", service.view.active_class(props.active))}
                        >
                            <span class="service-icon">{service.icon}</span>
                            <h3>{service.title}</h3>
                            <p>{service.pitch}</p>
                            <span class="service-more">{"Descubrir →"}</span>
                        </a>
                    }) }
                </div>
            </section>

            <section class="section">
                <h2 class="section-title reveal">{"Lo que dicen"}</h2>
                <div class="testimonial-grid">
                    { for TESTIMONIALS.iter().map(|(quote, author)| html! {
                        <blockquote class="testimonial reveal">
                            <p>{*quote}</p>
                            <cite>{*author}</cite>
                        </blockquote>
                    }) }
                </div>
            </section>
        </>
    }
}
