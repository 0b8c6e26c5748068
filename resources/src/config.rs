use payloads::Record;
use serde_json::Value;

/// How a resource's collection is listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRoute {
    /// The whole collection at a fixed path.
    All(String),
    /// Only the records under a parent, at `{prefix}/{parent_id}`. Nothing is
    /// fetched while no parent is selected.
    Scoped(String),
}

/// Endpoint paths of one resource, relative to the client's address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    pub list: ListRoute,
    /// Prefix of the single-record GET; the id is appended. Not every
    /// backend collection offers one.
    pub get_by_id: Option<String>,
    pub create: String,
    /// Prefix of the PUT; the id is appended.
    pub update: String,
    /// Prefix of the DELETE; the id is appended.
    pub delete: String,
}

impl Routes {
    /// The naming the backend uses for most resources, e.g. for
    /// `("country", "Country", "Countries")`: `country/getAllCountries`,
    /// `country/getCountryById/{id}`, `country/saveCountry`,
    /// `country/updateCountry/{id}` and `country/deleteCountry/{id}`.
    pub fn conventional(segment: &str, singular: &str, plural: &str) -> Self {
        Self {
            list: ListRoute::All(format!("{segment}/getAll{plural}")),
            get_by_id: Some(format!("{segment}/get{singular}ById")),
            create: format!("{segment}/save{singular}"),
            update: format!("{segment}/update{singular}"),
            delete: format!("{segment}/delete{singular}"),
        }
    }

    /// List by parent instead, e.g. `state/country/{country_id}`.
    pub fn scoped(mut self, prefix: impl Into<String>) -> Self {
        self.list = ListRoute::Scoped(prefix.into());
        self
    }

    pub fn without_get_by_id(mut self) -> Self {
        self.get_by_id = None;
        self
    }
}

/// Maps one raw element of a list (or a single-record response) to an item.
pub type ItemMapper<T> = fn(Value) -> Result<T, serde_json::Error>;

/// Everything a [`crate::ResourceHook`] needs to know about one entity.
pub struct ResourceConfig<T> {
    /// Used in logs and error messages.
    pub name: &'static str,
    pub routes: Routes,
    pub map_item: ItemMapper<T>,
}

impl<T: Record> ResourceConfig<T> {
    /// A config that deserializes items straight from their wire form.
    pub fn new(name: &'static str, routes: Routes) -> Self {
        Self {
            name,
            routes,
            map_item: serde_json::from_value::<T>,
        }
    }

    pub fn with_mapper(mut self, map_item: ItemMapper<T>) -> Self {
        self.map_item = map_item;
        self
    }
}
