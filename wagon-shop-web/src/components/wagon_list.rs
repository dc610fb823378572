use crate::components::wagon_card::{AvailableWagonCard, OwnedWagonCard};
use wagon_shop_core::render::ListFragment;
use wagon_shop_core::{ItemRef, UserIntent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub list: ListFragment,
    pub on_intent: Callback<UserIntent>,
}

#[function_component(WagonList)]
pub fn wagon_list(p: &Props) -> Html {
    let on_select = {
        let on_intent = p.on_intent.clone();
        Callback::from(move |item: ItemRef| on_intent.emit(UserIntent::Select { item }))
    };

    let body = match &p.list {
        ListFragment::Placeholder { message } => html! {
            <div class="empty-message">{ message.clone() }</div>
        },
        ListFragment::Available { cards } => cards
            .iter()
            .map(|card| {
                html! {
                    <AvailableWagonCard key={card.id.clone()} card={card.clone()} on_select={on_select.clone()} />
                }
            })
            .collect::<Html>(),
        ListFragment::Owned { cards } => cards
            .iter()
            .map(|card| {
                html! {
                    <OwnedWagonCard key={card.plate.clone()} card={card.clone()} on_select={on_select.clone()} />
                }
            })
            .collect::<Html>(),
    };

    html! {
        <div class="wagons-grid" role="list">{ body }</div>
    }
}
