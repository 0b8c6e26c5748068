use std::time::Duration;

use payloads::ReferenceKind;
use payloads::requests::{NewCountry, NewReferenceItem, NewState};
use reqwest::StatusCode;
use resources::{
    FormController, FormMode, ResourceError, SaveGuard, SubmitError,
    ValidationError, catalog,
};
use serde_json::json;
use test_helpers::mock::GeographyDataset;
use test_helpers::{assert_status_code, spawn_app};

use crate::shared_client;

fn country(name: &str, code: &str) -> NewCountry {
    NewCountry {
        country: name.into(),
        country_code: code.into(),
    }
}

#[tokio::test]
async fn create_sends_exact_body() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let form = FormController::new(
        catalog::countries(&shared_client(&app)),
        SaveGuard::Enabled,
    );

    form.open_create();
    let created = form.submit(&country("India", "+91")).await?;

    assert_eq!(
        app.requests()[0].body,
        Some(json!({ "country": "India", "countryCode": "+91" }))
    );
    let id = created["id"].as_i64().expect("server assigned an id");
    let listed = form.hook().items();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id.0, id);
    assert_eq!(listed[0].name, "India");
    assert_eq!(form.mode(), FormMode::Closed);
    assert!(!form.is_saving());

    Ok(())
}

#[tokio::test]
async fn duplicate_name_is_rejected_locally() -> anyhow::Result<()> {
    let app = spawn_app().await;
    GeographyDataset::seed(&app.backend);
    let client = shared_client(&app);
    let natures = catalog::reference_list(&client, ReferenceKind::BusinessNature);
    natures.fetch_all().await;
    app.clear_requests();

    let form = FormController::new(natures, SaveGuard::Enabled);
    form.open_create();
    let result = form
        .submit(&NewReferenceItem {
            name: " freehold ".into(),
            code: Some(3),
        })
        .await;

    match result {
        Err(SubmitError::Invalid(ValidationError::Duplicate(name))) => {
            assert_eq!(name, "Freehold");
        }
        other => panic!("Expected a duplicate error, got {other:?}"),
    }
    assert!(app.requests().is_empty());
    assert!(form.is_open());

    Ok(())
}

#[tokio::test]
async fn blank_required_field_is_rejected_locally() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let form = FormController::new(
        catalog::countries(&shared_client(&app)),
        SaveGuard::Disabled,
    );
    form.open_create();

    let result = form.submit(&country("Japan", "  ")).await;

    assert!(matches!(
        result,
        Err(SubmitError::Invalid(ValidationError::Required("Country code")))
    ));
    assert!(app.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn editing_does_not_clash_with_itself() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let countries = catalog::countries(&shared_client(&app));
    countries.fetch_all().await;
    app.clear_requests();

    let form = FormController::new(countries, SaveGuard::Enabled);
    form.open_edit(data.india);
    assert_eq!(form.mode(), FormMode::Editing(data.india));
    form.submit(&country("INDIA", "+91")).await?;

    assert_eq!(
        app.request_lines(),
        ["PUT country/updateCountry/1", "GET country/getAllCountries"]
    );

    // renaming onto another country is still caught
    form.open_edit(data.india);
    let result = form.submit(&country("usa", "+91")).await;
    assert!(matches!(
        result,
        Err(SubmitError::Invalid(ValidationError::Duplicate(_)))
    ));

    Ok(())
}

#[tokio::test]
async fn failed_save_keeps_form_open() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let client = shared_client(&app);
    let form = FormController::new(catalog::all_states(&client), SaveGuard::Enabled);

    app.backend
        .fail_next("POST", "state/saveState", 400, "State code is too long");
    form.open_create();
    let result = form
        .submit(&NewState {
            state: "Goa".into(),
            state_code: "GOAGOAGOA".into(),
            country_id: data.india,
        })
        .await;

    let client_result = match result {
        Err(SubmitError::Resource(ResourceError::Client(e))) => Err(e),
        other => panic!("Expected a client error, got {other:?}"),
    };
    let text = assert_status_code::<()>(client_result, StatusCode::BAD_REQUEST);
    assert_eq!(text, "State code is too long");
    assert_eq!(form.mode(), FormMode::Creating);
    assert!(!form.is_saving());
    assert_eq!(app.request_lines(), ["POST state/saveState"]);

    Ok(())
}

#[tokio::test]
async fn closed_form_refuses_submission() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let form = FormController::new(
        catalog::countries(&shared_client(&app)),
        SaveGuard::Enabled,
    );

    let result = form.submit(&country("Japan", "+81")).await;

    assert!(matches!(result, Err(SubmitError::Closed)));
    assert!(app.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn guarded_form_refuses_overlapping_save() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .set_delay("country/saveCountry", Duration::from_millis(200));
    let form = FormController::new(
        catalog::countries(&shared_client(&app)),
        SaveGuard::Enabled,
    );
    form.open_create();

    let japan = country("Japan", "+81");
    let nepal = country("Nepal", "+977");
    let (first, second) = tokio::join!(form.submit(&japan), form.submit(&nepal));

    assert!(first.is_ok());
    assert!(matches!(second, Err(SubmitError::Busy)));
    assert_eq!(app.backend.records("country").len(), 1);
    assert!(!form.is_saving());

    Ok(())
}

#[tokio::test]
async fn unguarded_form_allows_overlapping_save() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .set_delay("country/saveCountry", Duration::from_millis(200));
    let form = FormController::new(
        catalog::countries(&shared_client(&app)),
        SaveGuard::Disabled,
    );
    form.open_create();

    let japan = country("Japan", "+81");
    let nepal = country("Nepal", "+977");
    let (first, second) = tokio::join!(form.submit(&japan), form.submit(&nepal));

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(app.backend.records("country").len(), 2);

    Ok(())
}

#[tokio::test]
async fn unguarded_form_stays_saving_until_last_save_ends() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    app.backend
        .set_delay("country/saveCountry", Duration::from_millis(100));
    app.backend
        .set_delay("country/updateCountry/1", Duration::from_millis(500));
    let form = FormController::new(
        catalog::countries(&shared_client(&app)),
        SaveGuard::Disabled,
    );
    form.open_create();

    let japan = country("Japan", "+81");
    let bharat = country("Bharat", "+91");
    let (created, updated, saving_between) = tokio::join!(
        form.submit(&japan),
        async {
            form.open_edit(data.india);
            form.submit(&bharat).await
        },
        async {
            // the create has finished by now, the update has not
            tokio::time::sleep(Duration::from_millis(250)).await;
            form.is_saving()
        },
    );

    assert!(created.is_ok());
    assert!(updated.is_ok());
    assert!(saving_between);
    assert!(!form.is_saving());
    let names: Vec<String> =
        form.hook().items().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["Bharat", "USA", "Japan"]);

    Ok(())
}
