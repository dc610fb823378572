use wagon_shop_core::{ShopTab, UserIntent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub tab: ShopTab,
    pub cash_label: AttrValue,
    pub on_intent: Callback<UserIntent>,
}

#[function_component(ShopHeader)]
pub fn shop_header(p: &Props) -> Html {
    let tab_button = |tab: ShopTab, id: &'static str, label: &'static str| {
        let on_intent = p.on_intent.clone();
        let onclick = Callback::from(move |_| on_intent.emit(UserIntent::SwitchView { tab }));
        let active = (p.tab == tab).then_some("active");
        html! {
            <button
                type="button"
                role="tab"
                class={classes!("tab-btn", active)}
                data-tab={id}
                aria-selected={(p.tab == tab).to_string()}
                {onclick}
            >
                { label }
            </button>
        }
    };
    let on_close = {
        let on_intent = p.on_intent.clone();
        Callback::from(move |_| on_intent.emit(UserIntent::Close))
    };

    html! {
        <header class="shop-header">
            <h1 class="shop-title">{ "Wagon Shop" }</h1>
            <div class="player-cash">
                <span class="cash-caption">{ "Cash: " }</span>
                <span id="playerCash">{ p.cash_label.clone() }</span>
            </div>
            <nav class="tabs" role="tablist">
                { tab_button(ShopTab::Available, "buy", "Buy Wagons") }
                { tab_button(ShopTab::Owned, "owned", "My Wagons") }
            </nav>
            <button type="button" class="close-shop" aria-label="Close shop" onclick={on_close}>
                { "×" }
            </button>
        </header>
    }
}
