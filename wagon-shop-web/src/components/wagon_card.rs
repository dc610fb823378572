use wagon_shop_core::ItemRef;
use wagon_shop_core::render::{AvailableCard, MANAGE, OwnedCard, STATUS_AVAILABLE, VIEW_DETAILS};
use yew::prelude::*;

fn image_style(url: &str) -> String {
    format!("background-image: url('{url}');")
}

fn specs(storage: &str, slots: &str) -> Html {
    html! {
        <div class="wagon-specs">
            <span class="spec-item">{ storage.to_string() }</span>
            <span class="spec-item">{ slots.to_string() }</span>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AvailableProps {
    pub card: AvailableCard,
    pub on_select: Callback<ItemRef>,
}

#[function_component(AvailableWagonCard)]
pub fn available_wagon_card(p: &AvailableProps) -> Html {
    let card = &p.card;
    let onclick = {
        let on_select = p.on_select.clone();
        let id = card.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_select.emit(ItemRef::Available(id.clone()));
        })
    };

    html! {
        <div class="wagon-card" data-wagon-id={card.id.clone()} data-is-owned="false">
            <div class="wagon-image" style={image_style(&card.image_url)}></div>
            <div class="wagon-category">{ card.category.clone() }</div>
            <div class="wagon-name">{ card.label.clone() }</div>
            <div class="wagon-price">{ card.price_label.clone() }</div>
            { specs(&card.storage_label, &card.slots_label) }
            <div class="wagon-desc">{ card.description.clone() }</div>
            <div class="wagon-status">{ STATUS_AVAILABLE }</div>
            <button type="button" class="btn btn-primary" {onclick}>{ VIEW_DETAILS }</button>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct OwnedProps {
    pub card: OwnedCard,
    pub on_select: Callback<ItemRef>,
}

#[function_component(OwnedWagonCard)]
pub fn owned_wagon_card(p: &OwnedProps) -> Html {
    let card = &p.card;
    let onclick = {
        let on_select = p.on_select.clone();
        let plate = card.plate.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_select.emit(ItemRef::Owned(plate.clone()));
        })
    };
    let status_class = if card.stored { "stored" } else { "owned" };

    html! {
        <div
            class={classes!("wagon-card", card.active.then_some("active-wagon"))}
            data-wagon-id={card.plate.clone()}
            data-is-owned="true"
            data-stored={card.stored.to_string()}
        >
            <div class="wagon-image" style={image_style(&card.image_url)}></div>
            if card.active {
                <div class="active-badge">{ "ACTIVE" }</div>
            }
            <div class="wagon-name">{ card.label.clone() }</div>
            <div class="wagon-plate">{ card.plate_label.clone() }</div>
            <div class="wagon-location">{ card.location.clone() }</div>
            { specs(&card.storage_label, &card.slots_label) }
            <div class="wagon-desc">{ card.description.clone() }</div>
            <div class={classes!("wagon-status", status_class)}>{ card.status_label.clone() }</div>
            <button type="button" class="btn btn-secondary" {onclick}>{ MANAGE }</button>
        </div>
    }
}
