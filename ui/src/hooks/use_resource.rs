use std::rc::Rc;

use payloads::{APIClient, Record};
use resources::{ResourceHook, ResourceSnapshot};
use yew::prelude::*;

/// Hook return type for a mounted resource
pub struct ResourceHandle<T: Record> {
    /// For mutations and lookups. Clones share state with the mounted hook.
    pub hook: ResourceHook<T>,
    pub snapshot: ResourceSnapshot<T>,
    pub refetch: Callback<()>,
}

impl<T: Record> ResourceHandle<T> {
    /// True before the first response has arrived.
    pub fn is_initial_loading(&self) -> bool {
        self.snapshot.loading && !self.hook.is_fetched()
    }
}

/// Mount a [`ResourceHook`] built by `make`, fetch it once on mount and
/// re-render on every change to its state.
///
/// ```rust,ignore
/// let countries = use_resource(catalog::countries);
/// ```
#[hook]
pub fn use_resource<T, F>(make: F) -> ResourceHandle<T>
where
    T: Record,
    F: FnOnce(&Rc<APIClient>) -> ResourceHook<T> + 'static,
{
    let client = super::use_api_client();
    let hook = use_memo((), move |_| make(&client));
    let trigger = use_force_update();

    {
        let hook = hook.clone();
        use_effect_with((), move |_| {
            let subscription = hook.subscribe(move || trigger.force_update());
            let initial = (*hook).clone();
            yew::platform::spawn_local(async move { initial.fetch_all().await });
            move || drop(subscription)
        });
    }

    let refetch = {
        let hook = hook.clone();
        Callback::from(move |_| {
            let hook = (*hook).clone();
            yew::platform::spawn_local(async move { hook.fetch_all().await });
        })
    };

    ResourceHandle {
        hook: (*hook).clone(),
        snapshot: hook.snapshot(),
        refetch,
    }
}
