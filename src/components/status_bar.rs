use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    pub connected: bool,
    pub room: Option<String>,
    pub slot: Option<String>,
}

#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    let (dot, label) = if props.connected { ("#2ea043", "Online") } else { ("#f85149", "Offline") };
    let room = props.room.as_deref().map(|r| format!("Room {r}")).unwrap_or_else(|| "No room".to_string());
    let seat = match &props.slot {
        Some(s) => format!("Slot {s}"),
        None => "Watching".to_string(),
    };
    html! {
        <div id="top-bar" style="display:flex; align-items:center; gap:14px; padding:6px 12px; font-size:13px; background:#161b22; border-bottom:1px solid #30363d;">
            <span style="display:flex; align-items:center; gap:6px;">
                <span style={format!("display:inline-block; width:10px; height:10px; border-radius:50%; background:{dot};")}></span>
                { label }
            </span>
            <span>{ room }</span>
            <span style="opacity:0.7;">{ seat }</span>
        </div>
    }
}
