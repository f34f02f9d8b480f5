use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement};
use yew::prelude::*;

use super::client::send_history;
use super::session::{Bubble, ChatSession, Composer};

const GREETING: &str = "¡Hola! Soy NAZBOT, tu copiloto en esta galaxia de automatización. ¿En qué puedo ayudarte?";
const SUGGESTIONS: [&str; 3] = [
    "¿Qué podéis automatizar?",
    "Quiero una web 3D",
    "¿Cuánto cuesta?",
];

impl Composer for NodeRef {
    fn clear(&self) {
        if let Some(input) = self.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }
}

#[function_component(ChatWidget)]
pub fn chat_widget() -> Html {
    let session = use_mut_ref(ChatSession::new);
    let redraw = use_force_update();
    let open = use_state(|| false);
    let input_ref = use_node_ref();
    let messages_ref = use_node_ref();

    // Keep the newest message in view.
    {
        let messages_ref = messages_ref.clone();
        use_effect(move || {
            if let Some(area) = messages_ref.cast::<HtmlElement>() {
                area.set_scroll_top(area.scroll_height());
            }
            || ()
        });
    }

    let send = {
        let session = session.clone();
        let redraw = redraw.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |text: String| {
            let pending = session.borrow_mut().send_from(&text, &input_ref);
            let Some(pending) = pending else { return };
            redraw.force_update();

            let session = session.clone();
            let redraw = redraw.clone();
            spawn_local(async move {
                let outcome = send_history(&pending.history).await;
                session.borrow_mut().complete(pending, outcome);
                redraw.force_update();
            });
        })
    };

    let submit_input = {
        let input_ref = input_ref.clone();
        let send = send.clone();
        Callback::from(move |_: ()| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                send.emit(input.value());
            }
        })
    };

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };
    let on_send_click = {
        let submit_input = submit_input.clone();
        Callback::from(move |_: MouseEvent| submit_input.emit(()))
    };
    let on_keypress = Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            submit_input.emit(());
        }
    });

    let window_class = if *open { "chatbot-window active" } else { "chatbot-window" };
    let bubbles = session.borrow().bubbles().to_vec();

    html! {
        <div id="chatbot-container">
            <style>{CHAT_CSS}</style>
            <div class={window_class} id="chatbot-window">
                <div class="chat-header">
                    <span class="chat-title">{"NAZBOT"}</span>
                    <button class="chat-close" aria-label="Cerrar chat" onclick={close}>{"×"}</button>
                </div>
                <div class="chat-messages" ref={messages_ref}>
                    <div class="message bot">{GREETING}</div>
                    { for bubbles.iter().map(render_bubble) }
                </div>
                <div class="chat-suggestions">
                    { for SUGGESTIONS.iter().map(|suggestion| {
                        let send = send.clone();
                        let text = suggestion.to_string();
                        html! {
                            <button class="suggestion" onclick={Callback::from(move |_: MouseEvent| send.emit(text.clone()))}>
                                {*suggestion}
                            </button>
                        }
                    }) }
                </div>
                <div class="chat-input-row">
                    <input
                        ref={input_ref}
                        type="text"
                        class="chat-input"
                        placeholder="Escribe tu mensaje..."
                        onkeypress={on_keypress}
                    />
                    <button class="chat-send" onclick={on_send_click}>{"Enviar"}</button>
                </div>
            </div>
            <button class="chatbot-toggle" id="chatbot-toggle" aria-label="Abrir chat" onclick={toggle}>
                {"✦"}
            </button>
        </div>
    }
}

fn render_bubble(bubble: &Bubble) -> Html {
    html! {
        <div key={bubble.id} class={bubble.kind.class()}>
            { for bubble.lines().enumerate().map(|(i, line)| html! {
                <>
                    if i > 0 { <br /> }
                    { line.to_string() }
                </>
            }) }
        </div>
    }
}

const CHAT_CSS: &str = r#"
    #chatbot-container {
        position: fixed;
        right: 1.5rem;
        bottom: 1.5rem;
        z-index: 900;
    }
    .chatbot-toggle {
        width: 56px;
        height: 56px;
        border-radius: 50%;
        border: none;
        font-size: 1.5rem;
        color: #fff;
        background: linear-gradient(135deg, var(--nebula-violet), var(--nebula-hot));
        box-shadow: 0 0 24px rgba(255, 85, 238, 0.4);
        cursor: pointer;
    }
    .chatbot-window {
        display: none;
        flex-direction: column;
        position: absolute;
        right: 0;
        bottom: 72px;
        width: 340px;
        max-height: 480px;
        border-radius: 16px;
        background: var(--surface);
        border: 1px solid var(--border);
        backdrop-filter: blur(12px);
        overflow: hidden;
    }
    .chatbot-window.active {
        display: flex;
    }
    .chat-header {
        display: flex;
        justify-content: space-between;
        align-items: center;
        padding: 0.75rem 1rem;
        border-bottom: 1px solid var(--border);
    }
    .chat-close {
        background: none;
        border: none;
        color: inherit;
        font-size: 1.4rem;
        cursor: pointer;
    }
    .chat-messages {
        flex: 1;
        overflow-y: auto;
        padding: 1rem;
        display: flex;
        flex-direction: column;
        gap: 0.5rem;
    }
    .message {
        max-width: 85%;
        padding: 0.6rem 0.85rem;
        border-radius: 12px;
        line-height: 1.4;
        font-size: 0.92rem;
    }
    .message.user {
        align-self: flex-end;
        background: var(--nebula-violet);
        color: #fff;
    }
    .message.bot {
        align-self: flex-start;
        background: var(--surface-strong);
    }
    .message.error {
        border: 1px solid var(--nebula-hot);
    }
    .typing {
        font-size: 0.8rem;
        opacity: 0.7;
        font-style: italic;
    }
    .typing.tip {
        color: var(--nebula-hot);
        opacity: 1;
    }
    .chat-suggestions {
        display: flex;
        flex-wrap: wrap;
        gap: 0.4rem;
        padding: 0 1rem 0.5rem;
    }
    .suggestion {
        font-size: 0.78rem;
        padding: 0.3rem 0.6rem;
        border-radius: 999px;
        border: 1px solid var(--border);
        background: transparent;
        color: inherit;
        cursor: pointer;
    }
    .chat-input-row {
        display: flex;
        gap: 0.5rem;
        padding: 0.75rem;
        border-top: 1px solid var(--border);
    }
    .chat-input {
        flex: 1;
        padding: 0.5rem 0.75rem;
        border-radius: 8px;
        border: 1px solid var(--border);
        background: transparent;
        color: inherit;
    }
    .chat-send {
        padding: 0.5rem 0.9rem;
        border-radius: 8px;
        border: none;
        background: var(--nebula-hot);
        color: #fff;
        cursor: pointer;
    }
    @media (max-width: 480px) {
        .chatbot-window {
            width: calc(100vw - 2rem);
        }
    }
"#;
