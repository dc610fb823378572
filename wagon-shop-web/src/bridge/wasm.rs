use crate::app::store::{ShopAction, ShopState};
use crate::dom;
use crate::error::WebError;
use wagon_shop_core::{HostMessage, UserIntent};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MessageEvent, Window};
use yew::prelude::*;

pub(super) fn post(url: String, body: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = dom::post_json(&url, &body).await {
            let message = format!("NUI Error: {url}: {}", dom::js_error_message(&err));
            log::warn!("{message}");
            dom::console_error(&message);
        }
    });
}

fn decode_message(data: JsValue) -> Result<HostMessage, WebError> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(data)?;
    HostMessage::from_value(value).map_err(|err| WebError::Message(err.to_string()))
}

struct BridgeBindings {
    window: Window,
    message: Closure<dyn FnMut(MessageEvent)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl BridgeBindings {
    fn install(dispatcher: UseReducerDispatcher<ShopState>) -> Result<Self, WebError> {
        let window = dom::window().ok_or_else(|| WebError::Js("window unavailable".into()))?;

        let message = {
            let dispatcher = dispatcher.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                match decode_message(event.data()) {
                    Ok(message) => dispatcher.dispatch(ShopAction::Inbound {
                        message,
                        at_ms: dom::now_ms(),
                    }),
                    Err(err) => log::warn!("dropped host message: {err}"),
                }
            })
        };
        window
            .add_event_listener_with_callback("message", message.as_ref().unchecked_ref())
            .map_err(|err| WebError::js(&err))?;

        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                dispatcher.dispatch(ShopAction::Intent {
                    intent: UserIntent::Cancel,
                    at_ms: dom::now_ms(),
                });
            }
        });
        window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(|err| WebError::js(&err))?;

        Ok(Self {
            window,
            message,
            keydown,
        })
    }

    fn remove(self) {
        let _ = self.window.remove_event_listener_with_callback(
            "message",
            self.message.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "keydown",
            self.keydown.as_ref().unchecked_ref(),
        );
    }
}

#[hook]
pub fn use_host_bridge(store: &UseReducerHandle<ShopState>) {
    let dispatcher = store.dispatcher();
    use_effect_with((), move |()| {
        let bindings = match BridgeBindings::install(dispatcher) {
            Ok(bindings) => Some(bindings),
            Err(err) => {
                let message = format!("host bridge unavailable: {err}");
                log::error!("{message}");
                dom::console_error(&message);
                None
            }
        };
        move || {
            if let Some(bindings) = bindings {
                bindings.remove();
            }
        }
    });
    use_closing_tick(store);
}

/// Dispatch a tick once a pending close is due, so the guard lifts without further traffic.
#[hook]
fn use_closing_tick(store: &UseReducerHandle<ShopState>) {
    let settles_at = store.controller().lifecycle().settles_at();
    let dispatcher = store.dispatcher();
    use_effect_with(settles_at, move |settles_at| {
        if let Some(at) = *settles_at {
            wasm_bindgen_futures::spawn_local(async move {
                let wait = at.saturating_sub(dom::now_ms());
                let wait = i32::try_from(wait).unwrap_or(i32::MAX);
                if let Err(err) = dom::sleep_ms(wait).await {
                    log::warn!("closing timer failed: {}", dom::js_error_message(&err));
                }
                dispatcher.dispatch(ShopAction::Tick {
                    at_ms: dom::now_ms(),
                });
            });
        }
        || {}
    });
}
