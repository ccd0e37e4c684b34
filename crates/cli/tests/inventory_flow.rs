use std::sync::Arc;

use chrono::NaiveDate;
use shelflife_cli::commands;
use shelflife_cli::{AppState, Command, run};
use shelflife_infra::{InventoryStore, Notification, RecordingNotifier, SqliteInventoryStore};
use shelflife_inventory::{ItemName, UpcomingWindow};

struct Harness {
    _dir: tempfile::TempDir,
    url: String,
    store: Arc<SqliteInventoryStore>,
    recorder: Arc<RecordingNotifier>,
    state: AppState,
}

impl Harness {
    async fn open(window: UpcomingWindow) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("inventory.db").display());
        let store = Arc::new(SqliteInventoryStore::connect(&url).await.unwrap());
        let recorder = Arc::new(RecordingNotifier::new());
        let state = AppState::new(store.clone(), recorder.clone(), window, "kitchen");

        Self {
            _dir: dir,
            url,
            store,
            recorder,
            state,
        }
    }

    async fn names(&self) -> Vec<String> {
        self.store
            .list_items()
            .await
            .unwrap()
            .iter()
            .map(|item| item.name().to_string())
            .collect()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 7).unwrap()
}

fn name(s: &str) -> ItemName {
    ItemName::new(s).unwrap()
}

#[tokio::test]
async fn add_list_edit_delete_round_trip() {
    let h = Harness::open(UpcomingWindow::default()).await;

    for (item, date) in [("Milk", "1402/5/16"), ("Eggs", "1402/5/30"), ("Rice", "1403/1/1")] {
        commands::add_item(&h.state, item, date).await.unwrap();
    }
    assert_eq!(h.names().await, vec!["Milk", "Eggs", "Rice"]);

    commands::rename_item(&h.state, "Eggs", "Free-range eggs").await.unwrap();
    commands::update_expiry(&h.state, "Rice", "1403/2/1", today())
        .await
        .unwrap();
    commands::delete_item(&h.state, "Milk").await.unwrap();

    assert!(h.store.get_item(&name("Milk")).await.unwrap().is_none());
    assert_eq!(h.names().await, vec!["Free-range eggs", "Rice"]);

    let rice = h.store.get_item(&name("Rice")).await.unwrap().unwrap();
    assert_eq!(rice.expiry_date().to_string(), "1403/2/1");
}

#[tokio::test]
async fn no_op_edits_leave_the_inventory_identical() {
    let h = Harness::open(UpcomingWindow::default()).await;
    commands::add_item(&h.state, "Milk", "1402/5/16").await.unwrap();
    let before = h.store.list_items().await.unwrap();

    assert!(commands::add_item(&h.state, "Milk", "1402/9/9").await.is_ok());
    assert!(commands::rename_item(&h.state, "Bread", "Toast").await.is_err());
    assert!(
        commands::update_expiry(&h.state, "Bread", "1402/9/9", today())
            .await
            .is_err()
    );
    assert!(commands::delete_item(&h.state, "Bread").await.is_err());

    assert_eq!(before, h.store.list_items().await.unwrap());
}

#[tokio::test]
async fn check_uses_the_configured_window() {
    let h = Harness::open(UpcomingWindow::new(7, 15).unwrap()).await;
    commands::add_item(&h.state, "Milk", "1402/5/16").await.unwrap(); // today
    commands::add_item(&h.state, "Cheese", "1402/5/26").await.unwrap(); // 10 days
    commands::add_item(&h.state, "Rice", "1402/6/5").await.unwrap(); // 20 days

    let check = Command::Check {
        json: false,
        preset: None,
    };
    let output = run(check, &h.state, today())
        .await
        .unwrap();
    assert_eq!(output, "1 expired, 1 expiring within 7..=15 days.");

    assert_eq!(
        h.recorder.sent(),
        vec![
            Notification::new("Expired food", "Milk expired on 1402/5/16.", "kitchen"),
            Notification::new(
                "Food expiring soon",
                "Cheese expires in 11 days (1402/5/26).",
                "kitchen"
            ),
        ]
    );
}

#[tokio::test]
async fn check_json_reports_both_classes() {
    let h = Harness::open(UpcomingWindow::new(7, 15).unwrap()).await;
    commands::add_item(&h.state, "Milk", "1402/5/15").await.unwrap();
    commands::add_item(&h.state, "Cheese", "1402/5/26").await.unwrap();

    let check = Command::Check {
        json: true,
        preset: None,
    };
    let output = run(check, &h.state, today())
        .await
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["today"], "2023-08-07");
    assert_eq!(report["expired"][0]["name"], "Milk");
    assert_eq!(report["upcoming"][0]["item"]["name"], "Cheese");
    assert_eq!(report["upcoming"][0]["days_until_expiry"], 10);
    assert_eq!(report["upcoming"][0]["days_remaining"], 11);
}

#[tokio::test]
async fn expiry_edits_persist_and_notify() {
    let h = Harness::open(UpcomingWindow::default()).await;
    commands::add_item(&h.state, "Rice", "1402/6/1").await.unwrap();

    commands::update_expiry(&h.state, "Rice", "1402/7/1", today())
        .await
        .unwrap();
    let warning = commands::update_expiry(&h.state, "Rice", "1402/6/15", today())
        .await
        .unwrap();
    assert!(warning.ends_with("must be after the current date (1402/7/1)."));

    let rice = h.store.get_item(&name("Rice")).await.unwrap().unwrap();
    assert_eq!(rice.expiry_date().to_string(), "1402/6/15");
    assert_eq!(
        h.recorder.sent(),
        vec![Notification::new(
            "Expiry date updated",
            "Rice now expires on 1402/7/1.",
            "kitchen"
        )]
    );
}

#[tokio::test]
async fn inventory_survives_a_restart() {
    let h = Harness::open(UpcomingWindow::default()).await;
    commands::add_item(&h.state, "Milk", "1402/5/16").await.unwrap();
    h.store.close().await;

    let reopened = SqliteInventoryStore::connect(&h.url).await.unwrap();
    let items = reopened.list_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name().as_str(), "Milk");
}
