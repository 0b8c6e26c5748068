use payloads::{CountryId, DistrictId, Record, StateId};
use resources::AxisState;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::hooks::use_geography;

#[derive(Properties, PartialEq)]
pub struct GeographySelectProps {
    /// Called with the chosen district, and with `None` whenever a change
    /// higher up the chain invalidates it.
    pub on_change: Callback<Option<DistrictId>>,
    #[prop_or_default]
    pub disabled: bool,
}

fn parse_id(e: &Event) -> Option<i64> {
    e.target_unchecked_into::<HtmlSelectElement>()
        .value()
        .parse()
        .ok()
}

fn options<T: Record>(
    items: &[T],
    selected: Option<&T::Id>,
    axis: AxisState,
    placeholder: &str,
) -> Html {
    let first = match axis {
        AxisState::Loading => "Loading...",
        _ => placeholder,
    };
    html! {
        <>
            <option value="" selected={selected.is_none()}>{first}</option>
            {items.iter().map(|item| html! {
                <option
                    key={item.id().to_string()}
                    value={item.id().to_string()}
                    selected={selected == Some(item.id())}
                >
                    {item.display_name()}
                </option>
            }).collect::<Html>()}
        </>
    }
}

/// Country, state and district dropdowns, each scoped by the one before.
#[function_component]
pub fn GeographySelect(props: &GeographySelectProps) -> Html {
    let geography = use_geography();
    let district = use_state(|| None::<DistrictId>);
    let cascade = &geography.cascade;

    let on_country_change = {
        let select_country = geography.select_country.clone();
        let district = district.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            select_country.emit(parse_id(&e).map(CountryId));
            district.set(None);
            on_change.emit(None);
        })
    };

    let on_state_change = {
        let select_state = geography.select_state.clone();
        let district = district.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            select_state.emit(parse_id(&e).map(StateId));
            district.set(None);
            on_change.emit(None);
        })
    };

    let on_district_change = {
        let district = district.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let selected = parse_id(&e).map(DistrictId);
            district.set(selected);
            on_change.emit(selected);
        })
    };

    let select_class = "w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 \
                        rounded-md bg-white dark:bg-neutral-700 \
                        text-neutral-900 dark:text-neutral-100 \
                        disabled:opacity-50 disabled:cursor-not-allowed";

    let selected_country = cascade.selected_country();
    let selected_state = cascade.selected_state();

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                {"Country"}
                <select
                    class={select_class}
                    onchange={on_country_change}
                    disabled={props.disabled || cascade.country_axis() == AxisState::Loading}
                >
                    {options(
                        &cascade.countries.items(),
                        selected_country.as_ref(),
                        cascade.country_axis(),
                        "Select country",
                    )}
                </select>
            </label>
            <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                {"State"}
                <select
                    class={select_class}
                    onchange={on_state_change}
                    disabled={props.disabled || cascade.state_axis() != AxisState::Loaded}
                >
                    {options(
                        &cascade.selectable_states(),
                        selected_state.as_ref(),
                        cascade.state_axis(),
                        "Select state",
                    )}
                </select>
            </label>
            <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                {"District"}
                <select
                    class={select_class}
                    onchange={on_district_change}
                    disabled={props.disabled || cascade.district_axis() != AxisState::Loaded}
                >
                    {options(
                        &cascade.selectable_districts(),
                        (*district).as_ref(),
                        cascade.district_axis(),
                        "Select district",
                    )}
                </select>
            </label>
            if let Some(error) = cascade
                .countries
                .error()
                .or_else(|| cascade.states.error())
                .or_else(|| cascade.districts.error())
            {
                <p class="md:col-span-3 text-sm text-red-700 dark:text-red-400">{error}</p>
            }
        </div>
    }
}
