use crate::components::modal::Modal;
use wagon_shop_core::UserIntent;
use wagon_shop_core::render::TransferModal;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub transfer: Option<TransferModal>,
    pub on_intent: Callback<UserIntent>,
}

#[function_component(TransferDestinations)]
pub fn transfer_destinations(p: &Props) -> Html {
    let on_close = {
        let on_intent = p.on_intent.clone();
        Callback::from(move |()| on_intent.emit(UserIntent::CloseTransfer))
    };
    let Some(transfer) = p.transfer.as_ref() else {
        return html! { <Modal open={false} title="" {on_close} /> };
    };

    let body = if let Some(message) = transfer.empty_message.as_ref() {
        html! { <div class="empty-message">{ message.clone() }</div> }
    } else {
        transfer
            .options
            .iter()
            .map(|option| {
                let onclick = {
                    let on_intent = p.on_intent.clone();
                    let shop_index = option.shop_index;
                    Callback::from(move |_| {
                        on_intent.emit(UserIntent::ConfirmTransfer { shop_index });
                    })
                };
                html! {
                    <div class="transfer-shop-option" key={option.shop_index.to_string()}>
                        <div class="shop-info">
                            <h3>{ option.name.clone() }</h3>
                            <p>{ option.distance_label.clone() }</p>
                            <p class="transfer-cost">{ option.cost_label.clone() }</p>
                        </div>
                        <button type="button" class="btn btn-primary" {onclick}>{ "Transfer Here" }</button>
                    </div>
                }
            })
            .collect::<Html>()
    };

    html! {
        <Modal open={true} title="Transfer Wagon" {on_close} class={AttrValue::from("transfer-modal")}>
            <div id="transferShopsList">{ body }</div>
        </Modal>
    }
}
