use resources::{AxisState, GeographyCascade};
use test_helpers::mock::GeographyDataset;
use test_helpers::spawn_app;

use crate::shared_client;

fn names<T>(items: Vec<T>, name: impl Fn(T) -> String) -> Vec<String> {
    items.into_iter().map(name).collect()
}

#[tokio::test]
async fn selecting_down_the_chain() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let cascade = GeographyCascade::new(&shared_client(&app));

    cascade.load_countries().await;
    assert_eq!(cascade.country_axis(), AxisState::Loaded);
    assert_eq!(cascade.state_axis(), AxisState::Unselected);
    assert_eq!(cascade.district_axis(), AxisState::Unselected);

    cascade.select_country(Some(data.india)).await;
    assert_eq!(cascade.state_axis(), AxisState::Loaded);
    assert_eq!(
        names(cascade.selectable_states(), |s| s.name),
        ["Maharashtra", "Karnataka"]
    );

    cascade.select_state(Some(data.maharashtra)).await;
    assert_eq!(cascade.district_axis(), AxisState::Loaded);
    assert_eq!(
        names(cascade.selectable_districts(), |d| d.name),
        ["Pune", "Mumbai"]
    );

    assert_eq!(
        app.request_lines(),
        [
            "GET country/getAllCountries",
            "GET state/country/1",
            "GET district/state/10",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn changing_country_clears_before_fetching() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let cascade = GeographyCascade::new(&shared_client(&app));
    cascade.load_countries().await;
    cascade.select_country(Some(data.india)).await;
    cascade.select_state(Some(data.maharashtra)).await;
    app.clear_requests();

    let pending = cascade.select_country(Some(data.usa));

    // nothing has been sent yet, but both lower axes are already empty
    assert!(cascade.states.items().is_empty());
    assert!(cascade.districts.items().is_empty());
    assert_eq!(cascade.selected_state(), None);
    assert_eq!(cascade.selected_country(), Some(data.usa));
    assert!(cascade.selectable_districts().is_empty());
    assert!(app.requests().is_empty());

    pending.await;

    assert_eq!(app.request_lines(), ["GET state/country/2"]);
    assert_eq!(names(cascade.selectable_states(), |s| s.name), ["California"]);
    assert_eq!(cascade.district_axis(), AxisState::Unselected);

    Ok(())
}

#[tokio::test]
async fn clearing_selection_sends_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let cascade = GeographyCascade::new(&shared_client(&app));
    cascade.load_countries().await;
    cascade.select_country(Some(data.india)).await;
    cascade.select_state(Some(data.karnataka)).await;
    assert_eq!(
        names(cascade.selectable_districts(), |d| d.name),
        ["Bengaluru"]
    );
    app.clear_requests();

    cascade.select_state(None).await;
    assert!(cascade.districts.items().is_empty());
    assert_eq!(cascade.district_axis(), AxisState::Unselected);
    // the state axis is untouched
    assert_eq!(cascade.states.items().len(), 2);

    cascade.select_country(None).await;
    assert!(cascade.states.items().is_empty());
    assert_eq!(cascade.state_axis(), AxisState::Unselected);
    assert_eq!(cascade.selected_country(), None);

    assert!(app.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn unknown_country_offers_no_states() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let cascade = GeographyCascade::new(&shared_client(&app));

    // countries were never loaded, so the selection can't be trusted
    cascade.select_country(Some(data.india)).await;
    assert_eq!(cascade.states.items().len(), 2);
    assert!(cascade.selectable_states().is_empty());

    cascade.load_countries().await;
    assert_eq!(cascade.selectable_states().len(), 2);

    Ok(())
}

#[tokio::test]
async fn failed_state_fetch_is_kept_on_the_axis() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let data = GeographyDataset::seed(&app.backend);
    let cascade = GeographyCascade::new(&shared_client(&app));
    cascade.load_countries().await;

    app.backend
        .fail_next("GET", "state/country/1", 500, "States unavailable");
    cascade.select_country(Some(data.india)).await;

    assert_eq!(cascade.state_axis(), AxisState::Loaded);
    assert!(cascade.selectable_states().is_empty());
    assert_eq!(cascade.states.error().as_deref(), Some("States unavailable"));

    Ok(())
}
