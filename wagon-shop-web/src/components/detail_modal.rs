use crate::components::modal::Modal;
use wagon_shop_core::render::DetailModal;
use wagon_shop_core::{ButtonState, UserIntent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub detail: Option<DetailModal>,
    pub on_intent: Callback<UserIntent>,
}

fn action_button(
    state: ButtonState,
    id: &'static str,
    class: &'static str,
    label: String,
    intent: UserIntent,
    on_intent: &Callback<UserIntent>,
) -> Html {
    if !state.is_visible() {
        return Html::default();
    }
    let onclick = {
        let on_intent = on_intent.clone();
        Callback::from(move |_| on_intent.emit(intent.clone()))
    };
    html! {
        <button
            {id}
            type="button"
            class={classes!("btn", class)}
            disabled={!state.is_enabled()}
            {onclick}
        >
            { label }
        </button>
    }
}

fn row(caption: &'static str, value: &str) -> Html {
    html! {
        <div class="detail-row">
            <span class="detail-caption">{ caption }</span>
            <span class="detail-value">{ value.to_string() }</span>
        </div>
    }
}

#[function_component(WagonDetailModal)]
pub fn wagon_detail_modal(p: &Props) -> Html {
    let on_close = {
        let on_intent = p.on_intent.clone();
        Callback::from(move |()| on_intent.emit(UserIntent::CloseDetail))
    };
    let Some(detail) = p.detail.as_ref() else {
        return html! { <Modal open={false} title="" {on_close} /> };
    };
    let buttons = detail.buttons;
    let on_intent = &p.on_intent;

    html! {
        <Modal open={true} title={detail.title.clone()} {on_close} class={AttrValue::from("wagon-modal")}>
            <div class="modal-details">
                { row("Model", &detail.model) }
                { row("Price", &detail.price_label) }
                { row("Storage", &detail.storage_label) }
                { row("Slots", &detail.slots_label) }
                { row("Stored At", &detail.location) }
                <p id="modalDesc" class="modal-desc">{ detail.description.clone() }</p>
                if detail.active_indicator {
                    <div id="modalActiveIndicator" class="active-indicator">{ "Active Wagon" }</div>
                }
                if let Some(sell) = detail.sell_price_label.as_ref() {
                    <div id="modalSellPriceRow" class="sell-price-row">
                        { row("Sell Price", sell) }
                    </div>
                }
            </div>
            <div class="modal-actions">
                { action_button(buttons.purchase, "purchaseBtn", "btn-primary", detail.purchase_label.clone(), UserIntent::Purchase, on_intent) }
                { action_button(buttons.set_active, "setActiveBtn", "btn-primary", "Set Active".into(), UserIntent::SetActive, on_intent) }
                { action_button(buttons.spawn, "spawnBtn", "btn-primary", "Spawn Wagon".into(), UserIntent::Spawn, on_intent) }
                { action_button(buttons.unstore, "unstoreBtn", "btn-primary", "Take Out".into(), UserIntent::Unstore, on_intent) }
                { action_button(buttons.transfer, "transferBtn", "btn-secondary", "Transfer".into(), UserIntent::RequestTransfer, on_intent) }
                { action_button(buttons.sell, "sellBtn", "btn-danger", "Sell Wagon".into(), UserIntent::Sell, on_intent) }
            </div>
        </Modal>
    }
}
