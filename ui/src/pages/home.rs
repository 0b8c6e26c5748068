use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component]
pub fn HomePage() -> Html {
    let link_class = "block p-6 rounded-lg shadow-md border border-neutral-200 dark:border-neutral-700 \
                      bg-white dark:bg-neutral-800 hover:bg-neutral-50 dark:hover:bg-neutral-700";
    html! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Back office"}
            </h1>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <Link<Route> to={Route::Countries} classes={link_class}>
                    {"Countries"}
                </Link<Route>>
                <Link<Route> to={Route::Locations} classes={link_class}>
                    {"Locations"}
                </Link<Route>>
            </div>
        </div>
    }
}
