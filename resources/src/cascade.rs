//! Country -> State -> District cascading selection.
//!
//! Choosing a country re-scopes the state list and empties the district
//! list; choosing a state re-scopes the district list. Both happen before the
//! returned future is first polled, so a view re-rendering right after the
//! call already sees the emptied dropdowns. The controller only owns the
//! collections; form fields holding the chosen district are the view's to
//! reset.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use payloads::{APIClient, Country, CountryId, District, Record, State, StateId};

use crate::catalog;
use crate::resource::{ResourceHook, StalePolicy};

/// Where one dropdown of the cascade stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisState {
    Unselected,
    Loading,
    Loaded,
}

impl AxisState {
    fn of<T: Record>(hook: &ResourceHook<T>) -> Self {
        if hook.is_loading() {
            Self::Loading
        } else if hook.is_fetched() {
            Self::Loaded
        } else {
            Self::Unselected
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub country: Option<CountryId>,
    pub state: Option<StateId>,
}

#[derive(Clone)]
pub struct GeographyCascade {
    pub countries: ResourceHook<Country>,
    pub states: ResourceHook<State>,
    pub districts: ResourceHook<District>,
    selection: Rc<Cell<Selection>>,
}

impl GeographyCascade {
    pub fn new(client: &Rc<APIClient>) -> Self {
        Self::from_hooks(
            catalog::countries(client),
            catalog::states(client),
            catalog::districts(client),
        )
    }

    /// Compose existing hooks. `states` and `districts` must be scoped
    /// lists.
    pub fn from_hooks(
        countries: ResourceHook<Country>,
        states: ResourceHook<State>,
        districts: ResourceHook<District>,
    ) -> Self {
        Self {
            countries,
            states,
            districts,
            selection: Rc::default(),
        }
    }

    /// Apply one stale-response policy to all three axes.
    pub fn with_stale_policy(self, policy: StalePolicy) -> Self {
        Self {
            countries: self.countries.with_stale_policy(policy),
            states: self.states.with_stale_policy(policy),
            districts: self.districts.with_stale_policy(policy),
            selection: self.selection,
        }
    }

    pub async fn load_countries(&self) {
        self.countries.fetch_all().await
    }

    pub fn selection(&self) -> Selection {
        self.selection.get()
    }

    pub fn selected_country(&self) -> Option<CountryId> {
        self.selection.get().country
    }

    pub fn selected_state(&self) -> Option<StateId> {
        self.selection.get().state
    }

    /// Select a country, or clear the selection with `None`.
    ///
    /// The state and district collections and the selected state are cleared
    /// now. The returned future fetches the new country's states; with
    /// `None` it resolves without a request.
    pub fn select_country(
        &self,
        country: Option<CountryId>,
    ) -> impl Future<Output = ()> + 'static {
        self.selection.set(Selection {
            country,
            state: None,
        });
        self.districts.rescope(None);
        self.states.rescope(country.map(|id| id.to_string()));
        self.states.refresh()
    }

    /// Select a state, or clear it with `None`. Only the district axis is
    /// cleared.
    pub fn select_state(
        &self,
        state: Option<StateId>,
    ) -> impl Future<Output = ()> + 'static {
        let mut selection = self.selection.get();
        selection.state = state;
        self.selection.set(selection);
        self.districts.rescope(state.map(|id| id.to_string()));
        self.districts.refresh()
    }

    pub fn country_axis(&self) -> AxisState {
        AxisState::of(&self.countries)
    }

    pub fn state_axis(&self) -> AxisState {
        AxisState::of(&self.states)
    }

    pub fn district_axis(&self) -> AxisState {
        AxisState::of(&self.districts)
    }

    /// States that may be offered: those of the selected country, provided
    /// that country is among the loaded ones.
    pub fn selectable_states(&self) -> Vec<State> {
        let Some(country) = self.selected_country() else {
            return Vec::new();
        };
        if self.countries.find(&country).is_none() {
            return Vec::new();
        }
        self.states.with_items(|states| {
            states
                .iter()
                .filter(|state| state.country_id == country)
                .cloned()
                .collect()
        })
    }

    /// Districts of the selected state, provided that state is among the
    /// loaded ones.
    pub fn selectable_districts(&self) -> Vec<District> {
        let Some(state) = self.selected_state() else {
            return Vec::new();
        };
        if self.states.find(&state).is_none() {
            return Vec::new();
        }
        self.districts.with_items(|districts| {
            districts
                .iter()
                .filter(|district| district.state_id == state)
                .cloned()
                .collect()
        })
    }
}
