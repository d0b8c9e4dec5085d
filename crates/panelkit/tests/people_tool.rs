//! End-to-end flow over a realistic config: load, validate, resolve a
//! page, build its components, and drive the table through a full CRUD
//! cycle.

use panelkit::prelude::*;
use serde_json::json;

const CONFIG: &str = include_str!("fixtures/people_tool.json");

fn runtime() -> Runtime {
    let config = panelkit::schema::load_from_str(CONFIG).unwrap();
    Runtime::new(config).unwrap()
}

#[test]
fn config_loads_clean() {
    let config = panelkit::schema::load_from_str(CONFIG).unwrap();

    assert_eq!(panelkit::schema::validate(&config), vec![]);
    assert_eq!(config.app.name, "People Tool");
    assert_eq!(config.resources.len(), 2);
}

#[test]
fn dashboard_builds_with_live_data() {
    let runtime = runtime();
    let config = runtime.config().clone();

    let PageOutcome::Allowed(page) = resolve_page(&config, "/dashboard", Some("Admin")) else {
        panic!("dashboard should resolve for Admin");
    };
    let view = panelkit::runtime::page::build_page(&runtime, Some("Admin"), page);

    assert_eq!(view.zones.len(), 3);

    let ComponentView::MetricCard(metric) = &view.zones[0].components[0] else {
        panic!("first metrics component should be a MetricCard");
    };
    assert_eq!(metric.value, Some(5.0));

    let ComponentView::Chart(chart) = &view.zones[1].components[0] else {
        panic!("charts zone should hold a Chart");
    };
    assert_eq!(chart.rows.len(), 3);

    let ComponentView::DataTable(table) = &view.zones[2].components[0] else {
        panic!("tables zone should hold a DataTable");
    };
    let table_view = table.view(&runtime, Some("Admin"));
    assert_eq!(table_view.total, 5);
    assert_eq!(table_view.rows[0].cells[2], "Engineering");
}

#[test]
fn crud_cycle_round_trips_through_the_backend_trait() {
    let mut runtime = runtime();

    // The component runtime only ever sees this surface; exercise it the
    // way a server-backed substitute would be exercised.
    fn create_via(backend: &mut dyn ResourceBackend, data: Record) -> Record {
        backend.create("employees", data).unwrap()
    }

    let created = create_via(
        runtime.store_mut(),
        json!({"name": "Dana Scully", "email": "dana@example.com", "department_id": "3", "salary": 70000})
            .as_object()
            .unwrap()
            .clone(),
    );
    let id = created["id"].as_str().unwrap().to_string();

    let fetched = runtime.store().get_one("employees", &id).unwrap();
    assert_eq!(fetched, created);

    runtime
        .store_mut()
        .update("employees", &id, json!({"salary": 72000}).as_object().unwrap())
        .unwrap();
    assert_eq!(
        runtime.store().get_one("employees", &id).unwrap()["salary"],
        json!(72000)
    );

    runtime.store_mut().delete("employees", &id).unwrap();
    assert!(
        runtime
            .store()
            .get_one("employees", &id)
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn malformed_config_degrades_to_an_empty_shell() {
    let (config, err) = panelkit::schema::load_or_default("/nonexistent/app.config.json");
    assert!(err.is_some());

    let runtime = Runtime::new(config).unwrap();

    assert!(matches!(
        resolve_page(runtime.config(), "/dashboard", None),
        PageOutcome::NotFound
    ));
    assert!(sidebar_entries(runtime.config(), None).is_empty());
}
