use crate::bridge::use_host_bridge;
use crate::components::detail_modal::WagonDetailModal;
use crate::components::filter_bar::FilterBar;
use crate::components::shop_header::ShopHeader;
use crate::components::transfer_modal::TransferDestinations;
use crate::components::wagon_list::WagonList;
use crate::dom;
use wagon_shop_core::{ShopFrame, ShopTab, UserIntent};
use yew::prelude::*;

pub mod store;

use store::{ShopAction, use_shop_store};

#[function_component(App)]
pub fn app() -> Html {
    let store = use_shop_store();
    use_host_bridge(&store);

    let on_intent = {
        let dispatcher = store.dispatcher();
        Callback::from(move |intent: UserIntent| {
            dispatcher.dispatch(ShopAction::Intent {
                intent,
                at_ms: dom::now_ms(),
            });
        })
    };

    html! { <ShopView frame={store.frame()} {on_intent} /> }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ShopViewProps {
    pub frame: ShopFrame,
    pub on_intent: Callback<UserIntent>,
}

/// Paints one projected frame.
#[function_component(ShopView)]
pub fn shop_view(p: &ShopViewProps) -> Html {
    let frame = &p.frame;
    let on_intent = p.on_intent.clone();
    let (tab_id, list_id) = match frame.tab {
        ShopTab::Available => ("buy", "wagonsList"),
        ShopTab::Owned => ("owned", "ownedList"),
    };

    html! {
        <div class={classes!("wagon-shop-container", frame.visible.then_some("active"))}
             hidden={!frame.visible}>
            <ShopHeader
                tab={frame.tab}
                cash_label={AttrValue::from(frame.cash_label.clone())}
                on_intent={on_intent.clone()}
            />
            <section id={tab_id} class="tab-content active" role="tabpanel">
                if frame.tab == ShopTab::Available {
                    <FilterBar
                        key={frame.filters.epoch.to_string()}
                        controls={frame.filters.clone()}
                        result_count={frame.result_count.clone().map(AttrValue::from)}
                        on_intent={on_intent.clone()}
                    />
                }
                <div id={list_id}>
                    <WagonList list={frame.list.clone()} on_intent={on_intent.clone()} />
                </div>
            </section>
            <WagonDetailModal detail={frame.detail.clone()} on_intent={on_intent.clone()} />
            <TransferDestinations transfer={frame.transfer.clone()} {on_intent} />
        </div>
    }
}
