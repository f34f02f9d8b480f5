use yew::prelude::*;

const TECH: [&str; 6] = ["Three.js", "WebGL", "Blender", "GLSL", "WebAssembly", "Rust"];

#[function_component(Web3dPage)]
pub fn web3d_page() -> Html {
    html! {
        <>
            <header class="page-hero">
                <h1 class="reveal">{"Webs 3D inmersivas"}</h1>
                <p class="reveal">{"Una web que se recuerda. Escenas interactivas que cargan rápido en cualquier dispositivo."}</p>
            </header>

            <section class="section">
                <div class="feature-grid">
                    <div class="service-card reveal">
                        <h3>{"Producto en 3D"}</h3>
                        <p>{"Tus clientes giran, configuran y exploran el producto antes de comprarlo."}</p>
                    </div>
                    <div class="service-card reveal">
                        <h3>{"Landing con scroll narrativo"}</h3>
                        <p>{"La historia de tu marca contada a medida que el visitante avanza."}</p>
                    </div>
                    <div class="service-card reveal">
                        <h3>{"Rendimiento primero"}</h3>
                        <p>{"Modelos optimizados y carga progresiva para no perder a nadie por el camino."}</p>
                    </div>
                </div>
            </section>

            <section class="section">
                <h2 class="section-title reveal">{"Tecnología"}</h2>
                <div class="tech-list">
                    { for TECH.iter().map(|tech| html! {
                        <span class="tech-item reveal">{*tech}</span>
                    }) }
                </div>
            </section>

            <section class="section cta-section reveal">
                <h2>{"¿Tienes una idea en mente?"}</h2>
                <a href="#contacto" class="btn btn-primary">{"Cuéntanosla"}</a>
            </section>
        </>
    }
}
