use payloads::{CountryId, StateId};
use resources::GeographyCascade;
use yew::prelude::*;

/// Hook return type for the country, state and district dropdowns
pub struct GeographyHandle {
    pub cascade: GeographyCascade,
    pub select_country: Callback<Option<CountryId>>,
    pub select_state: Callback<Option<StateId>>,
}

/// Mount a [`GeographyCascade`], load the countries on mount and re-render
/// whenever any of its three collections changes.
#[hook]
pub fn use_geography() -> GeographyHandle {
    let client = super::use_api_client();
    let cascade = use_memo((), move |_| GeographyCascade::new(&client));
    let trigger = use_force_update();

    {
        let cascade = cascade.clone();
        use_effect_with((), move |_| {
            let subscriptions = [
                cascade.countries.subscribe({
                    let trigger = trigger.clone();
                    move || trigger.force_update()
                }),
                cascade.states.subscribe({
                    let trigger = trigger.clone();
                    move || trigger.force_update()
                }),
                cascade.districts.subscribe(move || trigger.force_update()),
            ];
            let initial = (*cascade).clone();
            yew::platform::spawn_local(async move {
                initial.load_countries().await
            });
            move || drop(subscriptions)
        });
    }

    let select_country = {
        let cascade = cascade.clone();
        Callback::from(move |country: Option<CountryId>| {
            yew::platform::spawn_local(cascade.select_country(country));
        })
    };

    let select_state = {
        let cascade = cascade.clone();
        Callback::from(move |state: Option<StateId>| {
            yew::platform::spawn_local(cascade.select_state(state));
        })
    };

    GeographyHandle {
        cascade: (*cascade).clone(),
        select_country,
        select_state,
    }
}
