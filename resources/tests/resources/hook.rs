use std::rc::Rc;
use std::time::Duration;

use payloads::requests::{NewBranch, NewBuilder, NewCountry, NewProject};
use payloads::{
    Address, BuilderId, ClientError, CountryId, Logo, MediaId, ReferenceId,
    ReferenceKind,
};
use reqwest::StatusCode;
use resources::{ResourceError, StalePolicy, catalog};
use serde_json::json;
use test_helpers::mock::GeographyDataset;
use test_helpers::{REFERENCED_MESSAGE, assert_status_code, spawn_app};

use crate::{client_result, shared_client};

#[tokio::test]
async fn fetch_all_replaces_collection() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));

    assert!(!countries.is_fetched());
    countries.fetch_all().await;

    let names: Vec<String> =
        countries.items().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["India", "USA"]);
    assert!(!countries.is_loading());
    assert!(countries.is_fetched());
    assert_eq!(countries.error(), None);
    assert_eq!(app.request_lines(), ["GET country/getAllCountries"]);

    Ok(())
}

#[tokio::test]
async fn non_array_payload_is_empty_collection() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));

    app.backend.respond_next(
        "GET",
        "country/getAllCountries",
        200,
        json!({ "message": "nothing to see" }),
    );
    countries.fetch_all().await;
    assert!(countries.items().is_empty());
    assert_eq!(countries.error(), None);

    app.backend
        .respond_next("GET", "country/getAllCountries", 200, json!({ "data": null }));
    countries.fetch_all().await;
    assert!(countries.items().is_empty());
    assert_eq!(countries.error(), None);

    // the next request reaches the real handler again
    countries.fetch_all().await;
    assert_eq!(countries.items().len(), 2);

    Ok(())
}

#[tokio::test]
async fn enveloped_lists_are_unwrapped() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    app.backend.use_envelope("businessNature");
    let client = shared_client(&app);
    let natures = catalog::reference_list(&client, ReferenceKind::BusinessNature);

    natures.fetch_all().await;

    let items = natures.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Freehold");
    assert_eq!(items[0].code, Some(1));

    Ok(())
}

#[tokio::test]
async fn malformed_records_are_skipped() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let countries = catalog::countries(&shared_client(&app));

    app.backend.respond_next(
        "GET",
        "country/getAllCountries",
        200,
        json!([
            { "id": 1, "country": "India", "countryCode": "+91" },
            { "country": "Missing id" },
        ]),
    );
    countries.fetch_all().await;

    assert_eq!(countries.items().len(), 1);
    assert_eq!(countries.error(), None);

    Ok(())
}

#[tokio::test]
async fn create_posts_then_refetches_once() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));
    countries.fetch_all().await;
    app.clear_requests();

    let body = NewCountry {
        country: "Japan".into(),
        country_code: "+81".into(),
    };
    let response = countries.create(&body).await?;

    assert_eq!(response["country"], "Japan");
    assert_eq!(
        app.request_lines(),
        ["POST country/saveCountry", "GET country/getAllCountries"]
    );
    assert_eq!(
        app.requests()[0].body,
        Some(json!({ "country": "Japan", "countryCode": "+81" }))
    );
    assert!(countries.items().iter().any(|c| c.name == "Japan"));
    assert!(!countries.is_loading());

    Ok(())
}

#[tokio::test]
async fn failed_create_does_not_refetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));
    countries.fetch_all().await;
    app.clear_requests();

    app.backend
        .fail_next("POST", "country/saveCountry", 500, "Database unavailable");
    let body = NewCountry {
        country: "Japan".into(),
        country_code: "+81".into(),
    };
    let result = client_result(countries.create(&body).await);

    let text = assert_status_code(result, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "Database unavailable");
    assert_eq!(app.request_lines(), ["POST country/saveCountry"]);
    assert_eq!(countries.items().len(), 2);
    // fetch errors are the only ones kept on the hook
    assert_eq!(countries.error(), None);

    Ok(())
}

#[tokio::test]
async fn server_duplicate_is_reported() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));

    let body = NewCountry {
        country: "india".into(),
        country_code: "+91".into(),
    };
    let result = client_result(countries.create(&body).await);

    let text = assert_status_code(result, StatusCode::CONFLICT);
    assert_eq!(text, "India already exists");

    Ok(())
}

#[tokio::test]
async fn update_replaces_record_then_refetches() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));

    let body = NewCountry {
        country: "Bharat".into(),
        country_code: "+91".into(),
    };
    countries.update(&data.india, &body).await?;

    assert_eq!(
        app.request_lines(),
        ["PUT country/updateCountry/1", "GET country/getAllCountries"]
    );
    let india = countries.find(&data.india).expect("India is still listed");
    assert_eq!(india.name, "Bharat");

    Ok(())
}

#[tokio::test]
async fn remove_deletes_then_refetches() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let countries = catalog::countries(&shared_client(&app));
    let id = app.backend.insert(
        "country",
        json!({ "id": 7, "country": "Nepal", "countryCode": "+977" }),
    );

    countries.remove(&CountryId(id)).await?;

    assert_eq!(
        app.request_lines(),
        ["DELETE country/deleteCountry/7", "GET country/getAllCountries"]
    );
    assert!(countries.items().is_empty());
    assert!(app.backend.records("country").is_empty());

    Ok(())
}

#[tokio::test]
async fn referenced_delete_is_refused_without_refetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));
    countries.fetch_all().await;
    app.clear_requests();

    let result = client_result(countries.remove(&data.india).await);

    let text = assert_status_code(result, StatusCode::CONFLICT);
    assert_eq!(text, REFERENCED_MESSAGE);
    assert_eq!(app.request_lines(), ["DELETE country/deleteCountry/1"]);
    assert_eq!(countries.items().len(), 2);

    Ok(())
}

#[tokio::test]
async fn missing_credential_sends_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&Rc::new(app.anonymous_client()));

    countries.fetch_all().await;

    assert!(app.requests().is_empty());
    assert!(countries.items().is_empty());
    assert!(!countries.is_loading());
    assert_eq!(
        countries.error().as_deref(),
        Some("Not signed in: missing secret key")
    );

    let body = NewCountry {
        country: "Japan".into(),
        country_code: "+81".into(),
    };
    let result = client_result(countries.create(&body).await);
    assert!(matches!(result, Err(ClientError::MissingCredential)));
    assert!(app.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn wrong_secret_key_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let client = Rc::new(app.client_with_key("not-the-key"));
    let countries = catalog::countries(&client);

    countries.fetch_all().await;

    assert!(countries.items().is_empty());
    assert_eq!(
        countries.error().as_deref(),
        Some("Invalid or missing secret key")
    );
    assert_eq!(app.request_lines(), ["GET country/getAllCountries"]);

    Ok(())
}

#[tokio::test]
async fn get_by_id_leaves_collection_alone() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let client = shared_client(&app);
    let countries = catalog::countries(&client);

    let usa = countries.get_by_id(&data.usa).await?;
    assert_eq!(usa.name, "USA");
    assert_eq!(usa.code, "+1");
    assert!(countries.items().is_empty());
    assert_eq!(app.request_lines(), ["GET country/getCountryById/2"]);

    let missing = client_result(countries.get_by_id(&CountryId(99)).await);
    assert_status_code(missing, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn reference_lists_have_no_single_fetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let client = shared_client(&app);
    let natures = catalog::reference_list(&client, ReferenceKind::BusinessNature);

    let result = natures.get_by_id(&ReferenceId(500)).await;

    assert!(matches!(result, Err(ResourceError::Unsupported { .. })));
    assert!(app.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn slow_response_wins_by_default() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    app.backend
        .set_delay("state/country/1", Duration::from_millis(300));
    let states = catalog::states(&shared_client(&app));

    states.rescope(Some(data.india.to_string()));
    let slow = states.refresh();
    states.rescope(Some(data.usa.to_string()));
    let fast = states.refresh();
    tokio::join!(slow, fast);

    // the India response landed last and overwrote the USA one
    let names: Vec<String> = states.items().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Maharashtra", "Karnataka"]);
    assert_eq!(states.scope().as_deref(), Some("2"));

    Ok(())
}

#[tokio::test]
async fn superseded_response_can_be_discarded() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    app.backend
        .set_delay("state/country/1", Duration::from_millis(300));
    let states = catalog::states(&shared_client(&app))
        .with_stale_policy(StalePolicy::DiscardSuperseded);

    states.rescope(Some(data.india.to_string()));
    let slow = states.refresh();
    states.rescope(Some(data.usa.to_string()));
    let fast = states.refresh();
    tokio::join!(slow, fast);

    let names: Vec<String> = states.items().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["California"]);
    assert!(!states.is_loading());

    Ok(())
}

#[tokio::test]
async fn listeners_see_loading_then_loaded() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));

    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let _subscription = {
        let seen = seen.clone();
        let reader = countries.clone();
        countries.subscribe(move || {
            let snapshot = reader.snapshot();
            seen.borrow_mut()
                .push((snapshot.loading, snapshot.items.len()));
        })
    };
    countries.fetch_all().await;

    assert_eq!(*seen.borrow(), [(true, 0), (false, 2)]);

    Ok(())
}

#[tokio::test]
async fn media_is_fetched_as_data_url() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.put_media(3, b"GIF89a".to_vec(), "image/gif");

    let url = app
        .client
        .media_data_url(&catalog::project_media_path(MediaId(3)))
        .await?;

    assert_eq!(url, "data:image/gif;base64,R0lGODlh");
    assert_eq!(app.request_lines(), ["GET project/media/3"]);

    Ok(())
}

#[tokio::test]
async fn list_beside_status_fields_is_unwrapped() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let countries = catalog::countries(&shared_client(&app));

    app.backend.respond_next(
        "GET",
        "country/getAllCountries",
        200,
        json!({
            "status": 200,
            "message": "OK",
            "data": [{ "id": 1, "country": "India", "countryCode": "+91" }],
        }),
    );
    countries.fetch_all().await;

    let items = countries.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "India");
    assert_eq!(countries.error(), None);

    Ok(())
}

#[tokio::test]
async fn load_returns_items_without_touching_the_hook() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));

    let loaded = client_result(countries.load().await)?;
    assert_eq!(loaded.len(), 2);
    assert!(countries.items().is_empty());
    assert!(!countries.is_fetched());

    countries.fetch_all().await;
    app.backend
        .fail_next("GET", "country/getAllCountries", 500, "Database is down");
    let result = countries.load().await;

    match result {
        Err(ResourceError::Client(e)) => {
            let text =
                assert_status_code::<()>(Err(e), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(text, "Database is down");
        }
        other => panic!("Expected a client error, got {other:?}"),
    }
    assert_eq!(countries.items().len(), 2);
    assert_eq!(countries.error(), None);
    assert!(!countries.is_loading());

    Ok(())
}

#[tokio::test]
async fn load_without_parent_sends_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let districts = catalog::districts(&shared_client(&app));

    let loaded = client_result(districts.load().await)?;

    assert!(loaded.is_empty());
    assert!(app.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn failed_update_does_not_refetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));
    countries.fetch_all().await;
    app.clear_requests();

    app.backend.fail_next(
        "PUT",
        "country/updateCountry/1",
        400,
        "Country code is invalid",
    );
    let body = NewCountry {
        country: "Bharat".into(),
        country_code: "91".into(),
    };
    let result = client_result(countries.update(&data.india, &body).await);

    let text = assert_status_code(result, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Country code is invalid");
    assert_eq!(app.request_lines(), ["PUT country/updateCountry/1"]);
    let india = countries.find(&data.india).expect("India is still listed");
    assert_eq!(india.name, "India");
    assert_eq!(countries.error(), None);

    Ok(())
}

#[tokio::test]
async fn every_district_is_listed_unscoped() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let districts = catalog::all_districts(&shared_client(&app));

    districts.fetch_all().await;

    let names: Vec<String> =
        districts.items().into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["Pune", "Mumbai", "Bengaluru", "Los Angeles"]);
    assert_eq!(app.request_lines(), ["GET district/getAllDistricts"]);
    assert_eq!(
        districts.find(&data.los_angeles).map(|d| d.state_id),
        Some(data.california)
    );

    Ok(())
}

#[tokio::test]
async fn builder_logo_survives_a_save() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let builders = catalog::builders(&shared_client(&app));
    let logo = Logo::from_bytes(b"\x89PNG\r\n", "image/png");

    let draft = NewBuilder {
        name: "Skyline".into(),
        head_office: "Pune".into(),
        website_url: "https://skyline.example".into(),
        business_nature_ids: vec![data.freehold],
        ..Default::default()
    }
    .with_logo(logo.clone());
    client_result(builders.create(&draft).await)?;

    let body = app.requests()[0].body.clone().expect("save carries a body");
    assert_eq!(body["websiteURL"], "https://skyline.example");
    assert_eq!(body["businessNatureIds"], json!([500]));
    assert_eq!(body["logoContentType"], "image/png");
    assert_eq!(
        app.request_lines(),
        ["POST builder/saveBuilder", "GET builder/getAllBuilders"]
    );

    let listed = builders.items();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Skyline");
    assert_eq!(listed[0].business_nature_ids, [data.freehold]);
    let stored = listed[0].logo().expect("logo is listed");
    assert_eq!(stored, logo);
    assert_eq!(stored.decode()?, b"\x89PNG\r\n");

    Ok(())
}

#[tokio::test]
async fn branch_logo_survives_a_save() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let branches = catalog::branches(&shared_client(&app));
    let logo = Logo::from_bytes(b"GIF89a", "image/gif");

    let draft = NewBranch {
        branch_name: "Pune West".into(),
        branch_code: Some("PW".into()),
        address: Address {
            city: Some("Pune".into()),
            district_id: Some(data.pune),
            state_id: Some(data.maharashtra),
            country_id: Some(data.india),
            ..Default::default()
        },
        ..Default::default()
    }
    .with_logo(logo.clone());
    client_result(branches.create(&draft).await)?;

    let body = app.requests()[0].body.clone().expect("save carries a body");
    assert_eq!(body["branchName"], "Pune West");
    assert_eq!(body["address"]["districtId"], json!(100));

    let listed = branches.items();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Pune West");
    assert_eq!(listed[0].address.state_id, Some(data.maharashtra));
    assert_eq!(listed[0].logo(), Some(logo));

    Ok(())
}

#[tokio::test]
async fn projects_are_listed_under_their_builder() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let builder = BuilderId(app.backend.insert(
        "builder",
        json!({ "id": 7, "name": "Skyline", "headOffice": "Pune" }),
    ));
    let projects = catalog::projects(&shared_client(&app));

    client_result(
        projects
            .create(&NewProject {
                builder_id: builder,
                project_name: "Lakeview".into(),
                plc_ids: vec![ReferenceId(900)],
                rera_authority_id: None,
                rera_number: Some("P5210001".into()),
                address: Address::default(),
                area: None,
                measurement_unit_id: None,
                media: Vec::new(),
            })
            .await,
    )?;

    let listed = projects.items();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Lakeview");
    assert_eq!(listed[0].builder_id, builder);
    assert_eq!(listed[0].plc_ids, [ReferenceId(900)]);
    assert_eq!(listed[0].rera_number.as_deref(), Some("P5210001"));
    assert_eq!(
        app.request_lines(),
        ["POST project/saveProject", "GET project/getAllProjects"]
    );

    Ok(())
}
