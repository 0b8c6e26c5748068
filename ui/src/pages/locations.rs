use payloads::DistrictId;
use yew::prelude::*;

use crate::components::GeographySelect;

/// Pick a district through the country and state dropdowns.
#[function_component]
pub fn LocationsPage() -> Html {
    let district = use_state(|| None::<DistrictId>);

    let on_change = {
        let district = district.clone();
        Callback::from(move |selected: Option<DistrictId>| district.set(selected))
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Locations"}
            </h1>
            <GeographySelect {on_change} />
            <p class="text-neutral-600 dark:text-neutral-400">
                {match *district {
                    Some(id) => format!("Selected district #{id}"),
                    None => "No district selected".to_string(),
                }}
            </p>
        </div>
    }
}
