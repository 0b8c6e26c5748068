use payloads::requests::NewCountry;
use payloads::{Country, CountryId};
use resources::{FormController, FormMode, SaveGuard, catalog};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::hooks::use_resource;

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

#[function_component]
pub fn CountriesPage() -> Html {
    let countries = use_resource(catalog::countries);
    let form = {
        let hook = countries.hook.clone();
        use_memo((), move |_| FormController::new(hook, SaveGuard::Enabled))
    };
    let trigger = use_force_update();
    let dispatch = use_dispatch::<State>();

    let name = use_state(String::new);
    let code = use_state(String::new);
    let form_error = use_state(|| None::<String>);

    let on_new = {
        let form = form.clone();
        let name = name.clone();
        let code = code.clone();
        let form_error = form_error.clone();
        let trigger = trigger.clone();
        Callback::from(move |_: MouseEvent| {
            form.open_create();
            name.set(String::new());
            code.set(String::new());
            form_error.set(None);
            trigger.force_update();
        })
    };

    let on_edit = {
        let form = form.clone();
        let name = name.clone();
        let code = code.clone();
        let form_error = form_error.clone();
        let trigger = trigger.clone();
        Callback::from(move |country: Country| {
            form.open_edit(country.id);
            name.set(country.name);
            code.set(country.code);
            form_error.set(None);
            trigger.force_update();
        })
    };

    let on_cancel = {
        let form = form.clone();
        let trigger = trigger.clone();
        Callback::from(move |_: MouseEvent| {
            form.close();
            trigger.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let name = name.clone();
        let code = code.clone();
        let form_error = form_error.clone();
        let trigger = trigger.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = NewCountry {
                country: (*name).clone(),
                country_code: (*code).clone(),
            };
            let form = form.clone();
            let form_error = form_error.clone();
            let trigger = trigger.clone();
            yew::platform::spawn_local(async move {
                match form.submit(&draft).await {
                    Ok(_) => form_error.set(None),
                    Err(e) => form_error.set(Some(e.to_string())),
                }
                trigger.force_update();
            });
        })
    };

    let on_delete = {
        let hook = countries.hook.clone();
        Callback::from(move |id: CountryId| {
            let hook = hook.clone();
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                if let Err(e) = hook.remove(&id).await {
                    dispatch.reduce_mut(|state| state.report(e.to_string()));
                }
            });
        })
    };

    let input_class = "w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600 \
                       rounded-md bg-white dark:bg-neutral-700 \
                       text-neutral-900 dark:text-neutral-100";
    let button_class = "px-4 py-2 rounded-md text-sm font-medium transition-colors \
                        bg-neutral-900 hover:bg-neutral-800 text-white \
                        dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200 \
                        disabled:opacity-50 disabled:cursor-not-allowed";

    let title = match form.mode() {
        FormMode::Editing(_) => "Edit country",
        _ => "New country",
    };

    html! {
        <div class="space-y-8">
            <div class="flex justify-between items-center">
                <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Countries"}
                </h1>
                <div class="space-x-3">
                    <button onclick={countries.refetch.reform(|_| ())} class={button_class}>
                        {"Refresh"}
                    </button>
                    <button onclick={on_new} class={button_class}>{"Add country"}</button>
                </div>
            </div>

            if form.is_open() {
                <form onsubmit={on_submit} class="space-y-4 max-w-md">
                    <h2 class="text-xl font-semibold">{title}</h2>
                    if let Some(error) = &*form_error {
                        <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                        </div>
                    }
                    <input
                        class={input_class}
                        placeholder="Country name"
                        value={(*name).clone()}
                        oninput={let name = name.clone(); move |e| name.set(input_value(e))}
                    />
                    <input
                        class={input_class}
                        placeholder="Country code, e.g. +91"
                        value={(*code).clone()}
                        oninput={let code = code.clone(); move |e| code.set(input_value(e))}
                    />
                    <div class="flex space-x-3">
                        <button type="button" onclick={on_cancel} class={button_class}>
                            {"Cancel"}
                        </button>
                        <button type="submit" disabled={form.is_saving()} class={button_class}>
                            if form.is_saving() { {"Saving..."} } else { {"Save"} }
                        </button>
                    </div>
                </form>
            }

            if countries.is_initial_loading() {
                <p class="text-neutral-600 dark:text-neutral-400">{"Loading countries..."}</p>
            } else if let Some(error) = &countries.snapshot.error {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            } else {
                <table class="min-w-full divide-y divide-neutral-200 dark:divide-neutral-700">
                    <thead>
                        <tr>
                            <th class="text-left py-2">{"Name"}</th>
                            <th class="text-left py-2">{"Code"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {countries.snapshot.items.iter().map(|country| {
                            let id = country.id;
                            let edit = {
                                let on_edit = on_edit.clone();
                                let country = country.clone();
                                Callback::from(move |_: MouseEvent| on_edit.emit(country.clone()))
                            };
                            let delete = on_delete.reform(move |_: MouseEvent| id);
                            html! {
                                <tr key={id.to_string()}>
                                    <td class="py-2">{&country.name}</td>
                                    <td class="py-2">{&country.code}</td>
                                    <td class="py-2 space-x-2 text-right">
                                        <button onclick={edit} class="underline">{"Edit"}</button>
                                        <button onclick={delete} class="underline text-red-700">{"Delete"}</button>
                                    </td>
                                </tr>
                            }
                        }).collect::<Html>()}
                    </tbody>
                </table>
            }
        </div>
    }
}
