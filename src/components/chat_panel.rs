use web_sys::{HtmlElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::model::ChatLine;
use crate::util::format_stamp;

#[derive(Properties, PartialEq, Clone)]
pub struct ChatPanelProps {
    pub lines: Vec<ChatLine>,
    pub on_submit: Callback<String>,
}

#[function_component(ChatPanel)]
pub fn chat_panel(props: &ChatPanelProps) -> Html {
    let display_ref = use_node_ref();

    // Keep the newest line in view
    {
        let display_ref = display_ref.clone();
        use_effect_with(props.lines.len(), move |_| {
            if let Some(el) = display_ref.cast::<HtmlElement>() {
                el.set_scroll_top(el.scroll_height());
            }
            || ()
        });
    }

    // Enter sends, Shift+Enter keeps typing on a new line
    let onkeypress = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Enter" || e.shift_key() {
                return;
            }
            e.prevent_default();
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let text = area.value();
            area.set_value("");
            on_submit.emit(text);
        })
    };

    html! {
        <div class="chat" style="width:320px; display:flex; flex-direction:column; gap:6px; padding:8px; background:rgba(22,27,34,0.9); border-left:1px solid #30363d;">
            <div ref={display_ref} id="chat-display" style="flex:1; overflow-y:auto; font-size:13px; line-height:1.4;">
                { for props.lines.iter().map(|line| html! {
                    <p class="message" style="margin:2px 0; white-space:pre-wrap;">
                        { line.at_ms.map(|ms| html! { <span class="stamp" style="opacity:0.6; margin-right:6px;">{ format_stamp(ms) }</span> }).unwrap_or_default() }
                        <span class="username" style="font-weight:600;">{ line.user.clone() }</span>
                        { format!(": {}", line.text) }
                    </p>
                }) }
            </div>
            <textarea id="chat-entry" rows="3" placeholder="Say something, or /help" {onkeypress}
                style="resize:none; background:#0e1116; color:inherit; border:1px solid #30363d; border-radius:6px; padding:6px;"></textarea>
        </div>
    }
}
