use wagon_shop_core::render::FilterControls;
use wagon_shop_core::{SortKey, UserIntent};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub controls: FilterControls,
    #[prop_or_default]
    pub result_count: Option<AttrValue>,
    pub on_intent: Callback<UserIntent>,
}

/// Category, sort and price controls for the buy tab.
///
/// The price inputs are uncontrolled; the parent keys this component by the filter epoch so a
/// filter reset remounts them empty.
#[function_component(FilterBar)]
pub fn filter_bar(p: &Props) -> Html {
    let min_ref = use_node_ref();
    let max_ref = use_node_ref();

    let on_category = {
        let on_intent = p.on_intent.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                on_intent.emit(UserIntent::SetCategory {
                    category: select.value(),
                });
            }
        })
    };
    let on_sort = {
        let on_intent = p.on_intent.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            match select.value().parse::<SortKey>() {
                Ok(sort) => on_intent.emit(UserIntent::SetSort { sort }),
                Err(err) => log::warn!("{err}"),
            }
        })
    };
    let on_apply = {
        let on_intent = p.on_intent.clone();
        let min_ref = min_ref.clone();
        let max_ref = max_ref.clone();
        Callback::from(move |_| {
            let read = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            on_intent.emit(UserIntent::ApplyPriceInputs {
                min: read(&min_ref),
                max: read(&max_ref),
            });
        })
    };

    let controls = &p.controls;
    html! {
        <div class="filters">
            <select id="categoryFilter" class="filter-select" aria-label="Category" onchange={on_category}>
                { for controls.categories.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == controls.category}>
                        { label.clone() }
                    </option>
                }) }
            </select>
            <select id="sortBy" class="filter-select" aria-label="Sort by" onchange={on_sort}>
                { for SortKey::ALL.into_iter().map(|sort| html! {
                    <option value={sort.key()} selected={sort == controls.sort}>
                        { sort.label() }
                    </option>
                }) }
            </select>
            <div class="price-range">
                <input
                    id="minPrice"
                    type="number"
                    min="0"
                    placeholder="Min $"
                    value={controls.min_input.clone()}
                    ref={min_ref}
                />
                <input
                    id="maxPrice"
                    type="number"
                    min="0"
                    placeholder="Max $"
                    value={controls.max_input.clone()}
                    ref={max_ref}
                />
                <button id="applyPrice" type="button" class="btn btn-secondary" onclick={on_apply}>
                    { "Apply" }
                </button>
            </div>
            { p.result_count.as_ref().map(|count| html! {
                <div id="resultCount" class="result-count">{ count.clone() }</div>
            }).unwrap_or_default() }
        </div>
    }
}
