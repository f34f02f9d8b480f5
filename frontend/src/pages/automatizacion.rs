use yew::prelude::*;

use crate::roi::RoiCalculator;

const STEPS: [(&str, &str); 3] = [
    ("Auditoría", "Mapeamos tus procesos y detectamos dónde se pierde el tiempo."),
    ("Diseño", "Proponemos flujos con las herramientas que ya usas: CRM, email, hojas de cálculo."),
    ("Despliegue", "Ponemos en marcha, medimos y ajustamos hasta que funciona sin ti."),
];

const FAQ: [(&str, &str); 3] = [
    (
        "¿Necesito cambiar mis herramientas?",
        "No. Trabajamos sobre lo que ya tienes y solo proponemos cambios cuando el ahorro lo justifica.",
    ),
    (
        "¿Cuánto tarda un proyecto?",
        "Los primeros flujos suelen estar funcionando en dos o tres semanas.",
    ),
    (
        "¿Qué pasa si algo falla?",
        "Cada automatización incluye monitorización y avisos, y un mes de soporte incluido.",
    ),
];

#[function_component(AutomatizacionPage)]
pub fn automatizacion_page() -> Html {
    html! {
        <>
            <header class="page-hero">
                <h1 class="reveal">{"Automatización de procesos"}</h1>
                <p class="reveal">{"Menos copiar y pegar, más tiempo para vender y crear."}</p>
            </header>

            <section class="section">
                <div class="steps">
                    { for STEPS.iter().enumerate().map(|(i, (title, text))| html! {
                        <div class="step service-card reveal">
                            <span class="step-number">{format!("0{}", i + 1)}</span>
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="section">
                <RoiCalculator />
            </section>

            <section class="section">
                <h2 class="section-title reveal">{"Planes"}</h2>
                <div class="pricing-grid">
                    <div class="pricing-card reveal">
                        <h3>{"Piloto"}</h3>
                        <p class="price">{"497€"}<span>{"/mes"}</span></p>
                        <p>{"Hasta tres flujos automatizados con soporte continuo."}</p>
                    </div>
                    <div class="pricing-card featured reveal">
                        <h3>{"A medida"}</h3>
                        <p class="price">{"Consultar"}</p>
                        <p>{"Integraciones complejas, agentes de IA y equipo dedicado."}</p>
                    </div>
                </div>
            </section>

            <section class="section">
                <h2 class="section-title reveal">{"Preguntas frecuentes"}</h2>
                { for FAQ.iter().map(|(question, answer)| html! {
                    <details class="faq-item reveal">
                        <summary>{*question}</summary>
                        <p>{*answer}</p>
                    </details>
                }) }
            </section>
        </>
    }
}
