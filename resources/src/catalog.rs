//! The concrete resources of the console, each a thin configuration of
//! [`ResourceHook`].

use std::rc::Rc;

use payloads::{
    APIClient, Branch, Builder, Country, District, MediaId, Project,
    ReferenceItem, ReferenceKind, State,
};
use serde_json::Value;

use crate::config::{ResourceConfig, Routes};
use crate::resource::ResourceHook;

pub fn countries(client: &Rc<APIClient>) -> ResourceHook<Country> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "country",
            Routes::conventional("country", "Country", "Countries"),
        ),
    )
}

/// States of the selected country, listed via `state/country/{id}`.
pub fn states(client: &Rc<APIClient>) -> ResourceHook<State> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "state",
            Routes::conventional("state", "State", "States")
                .scoped("state/country"),
        ),
    )
}

/// Every state regardless of country, for the state admin table.
pub fn all_states(client: &Rc<APIClient>) -> ResourceHook<State> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "state",
            Routes::conventional("state", "State", "States"),
        ),
    )
}

/// Districts of the selected state, listed via `district/state/{id}`.
pub fn districts(client: &Rc<APIClient>) -> ResourceHook<District> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "district",
            Routes::conventional("district", "District", "Districts")
                .scoped("district/state"),
        ),
    )
}

pub fn all_districts(client: &Rc<APIClient>) -> ResourceHook<District> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "district",
            Routes::conventional("district", "District", "Districts"),
        ),
    )
}

/// Some reference endpoints send numeric codes as strings.
fn map_reference_item(mut raw: Value) -> Result<ReferenceItem, serde_json::Error> {
    let parsed = raw.get("code").and_then(Value::as_str).map(|code| {
        code.trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or(Value::Null)
    });
    if let Some(code) = parsed {
        raw["code"] = code;
    }
    serde_json::from_value(raw)
}

/// One of the flat lookup lists. These have no single-record endpoint.
pub fn reference_list(
    client: &Rc<APIClient>,
    kind: ReferenceKind,
) -> ResourceHook<ReferenceItem> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            kind.segment(),
            Routes::conventional(kind.segment(), kind.singular(), kind.plural())
                .without_get_by_id(),
        )
        .with_mapper(map_reference_item),
    )
}

pub fn branches(client: &Rc<APIClient>) -> ResourceHook<Branch> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "branch",
            Routes::conventional("branch", "Branch", "Branches"),
        ),
    )
}

pub fn builders(client: &Rc<APIClient>) -> ResourceHook<Builder> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "builder",
            Routes::conventional("builder", "Builder", "Builders"),
        ),
    )
}

pub fn projects(client: &Rc<APIClient>) -> ResourceHook<Project> {
    ResourceHook::new(
        client.clone(),
        ResourceConfig::new(
            "project",
            Routes::conventional("project", "Project", "Projects"),
        ),
    )
}

/// Path of the raw bytes of a project media attachment, for
/// [`APIClient::media_data_url`].
pub fn project_media_path(media_id: MediaId) -> String {
    format!("project/media/{media_id}")
}
