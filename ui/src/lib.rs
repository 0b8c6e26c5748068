use payloads::{APIClient, Session};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

mod components;
mod hooks;
mod logs;
mod pages;
mod session;
mod state;

pub use state::State;

use hooks::ApiClientContext;

/// Build the client for the backend. The address comes from `BACKEND_URL`
/// at build time, falling back to the page's own origin.
pub fn get_api_client(session: Session) -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| web_sys::window()?.location().origin().ok())
        .unwrap_or_default();

    APIClient::new(address, session)
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    let client = use_memo((), |_| get_api_client(session::load_session()));

    html! {
        <ContextProvider<ApiClientContext> context={ApiClientContext(client.clone())}>
            <BrowserRouter>
                <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                    <ErrorBanner />
                    <Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<ApiClientContext>>
    }
}

#[function_component]
fn ErrorBanner() -> Html {
    let (state, dispatch) = use_store::<State>();

    let Some(message) = state.error_message.clone() else {
        return html! {};
    };
    let on_dismiss = dispatch.reduce_mut_callback(|state| {
        state.error_message = None;
    });

    html! {
        <div class="p-4 bg-red-50 dark:bg-red-900/20 border-b border-red-200 dark:border-red-800 flex justify-between items-center">
            <p class="text-sm text-red-700 dark:text-red-400">{message}</p>
            <button onclick={on_dismiss} class="text-sm text-red-700 dark:text-red-400 underline">
                {"Dismiss"}
            </button>
        </div>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/countries")]
    Countries,
    #[at("/locations")]
    Locations,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    let page = match routes {
        Route::Home => html! { <pages::HomePage /> },
        Route::Countries => html! { <pages::CountriesPage /> },
        Route::Locations => html! { <pages::LocationsPage /> },
        Route::NotFound => html! {
            <div class="text-center">
                <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                <p class="text-gray-600 dark:text-gray-300">{"Page not found"}</p>
            </div>
        },
    };
    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            {page}
        </main>
    }
}
