//! Page-level behavior of the three panels against a fake record service.

mod common;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};

use common::{press, record, render, settle, type_text, Call, FakeService};
use mediblock::application::Action;
use mediblock::tui::{App, FormPanel};
use mediblock::{Identity, Registration, Role, UploadRequest};

const RETRIEVED_STATUS: &str = "Record retrieved and decrypted successfully";

fn app_with(service: FakeService) -> (App<FakeService>, Arc<FakeService>) {
    let service = Arc::new(service);
    (App::with_service(service.clone()), service)
}

#[test]
fn renders_every_field_and_button() {
    let (app, _) = app_with(FakeService::default());
    let page = render(&app);

    assert!(page.contains("MediBlock Healthcare Blockchain"));
    for label in [
        "Register User",
        "Name:",
        "Role:",
        "[ Register ]",
        "Upload Record",
        "Patient ID:",
        "File:",
        "[ Upload ]",
        "Retrieve Record",
        "Record ID:",
        "[ Retrieve ]",
    ] {
        assert!(page.contains(label), "missing {label:?} in:\n{page}");
    }
    // Nothing is shown before the first response.
    assert!(!page.contains("User ID:"));
    assert!(!page.contains("uploaded successfully"));
}

#[test]
fn registration_sends_name_and_role_and_shows_identity() {
    let (mut app, service) = app_with(
        FakeService::default().with_identity(Identity::new("test_user_123", "test_private_key")),
    );

    type_text(&mut app, "Test User");
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    assert_eq!(
        service.calls(),
        vec![Call::Register(Registration::new("Test User", Role::Provider))]
    );

    let page = render(&app);
    assert!(page.contains("User ID: test_user_123"), "{page}");
    assert!(page.contains("Private Key: test_private_key"), "{page}");
    assert!(app.alert().is_none());
}

#[test]
fn failed_registration_leaves_identity_unset_and_alerts() {
    let (mut app, service) = app_with(FakeService::default());

    type_text(&mut app, "Test User");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    assert_eq!(service.calls().len(), 1);
    assert!(app.registration().identity.is_none());
    assert_eq!(
        app.alert().map(|a| a.message),
        Some("Failed to register user")
    );
    assert!(render(&app).contains("Failed to register user"));
}

#[test]
fn alert_blocks_input_until_dismissed() {
    let (mut app, _) = app_with(FakeService::default());

    press(&mut app, KeyCode::Enter); // empty name
    assert_eq!(app.alert().map(|a| a.message), Some("Please enter a name"));

    type_text(&mut app, "ignored");
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.registration().name, "");
    assert_eq!(app.focus(), Action::Register);

    press(&mut app, KeyCode::Esc);
    assert!(app.alert().is_none());
    type_text(&mut app, "Ada");
    assert_eq!(app.registration().name, "Ada");
}

#[test]
fn upload_without_file_makes_no_call() {
    let (mut app, service) = app_with(FakeService::default().with_receipt("rec_1"));

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), Action::Upload);
    type_text(&mut app, "patient_456");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.pending_requests(), 0);
    assert!(service.calls().is_empty());
    assert_eq!(app.alert().map(|a| a.message), Some("Please select a file"));
    assert!(!app.upload().succeeded());
}

#[test]
fn upload_with_file_shows_confirmation() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"lab results").expect("write");
    let path = file.path().to_str().expect("utf-8 path").to_string();

    let (mut app, service) = app_with(FakeService::default().with_receipt("record_789"));
    app.set_focus(Action::Upload);
    type_text(&mut app, "patient_456");
    press(&mut app, KeyCode::Down);
    type_text(&mut app, &path);
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    assert_eq!(
        service.calls(),
        vec![Call::Upload(UploadRequest::new("patient_456", path.as_str()))]
    );
    let page = render(&app);
    assert!(page.contains("Record ID: record_789"), "{page}");
    assert!(page.contains("✔ Record uploaded successfully"), "{page}");
}

#[test]
fn upload_failure_alerts_and_keeps_receipt() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"lab results").expect("write");
    let path = file.path().to_str().expect("utf-8 path").to_string();

    let (mut app, service) = app_with(FakeService::default().with_receipt("record_789"));
    app.set_focus(Action::Upload);
    type_text(&mut app, "patient_456");
    press(&mut app, KeyCode::Down);
    type_text(&mut app, &path);
    press(&mut app, KeyCode::Enter);
    settle(&mut app);
    assert!(app.upload().succeeded());

    service.reject_uploads();
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    assert_eq!(service.calls().len(), 2);
    assert_eq!(
        app.alert().map(|a| a.message),
        Some("Failed to upload file")
    );
    assert_eq!(
        app.upload().receipt.as_ref().map(|r| r.record_id.as_str()),
        Some("record_789")
    );

    press(&mut app, KeyCode::Enter);
    assert!(app.alert().is_none());
    let page = render(&app);
    assert!(page.contains("Record ID: record_789"), "{page}");
    assert!(page.contains("✔ Record uploaded successfully"), "{page}");
}

#[test]
fn retrieval_shows_all_four_values() {
    let (mut app, service) = app_with(
        FakeService::default().with_record(record("record_test_123", "patient_456", 1024, RETRIEVED_STATUS)),
    );

    app.set_focus(Action::Retrieve);
    type_text(&mut app, "record_test_123");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    assert_eq!(service.calls(), vec![Call::Retrieve("record_test_123".into())]);

    let page = render(&app);
    assert!(page.contains("record_test_123"));
    assert!(page.contains("patient_456"));
    assert!(page.contains("1024 bytes"));
    assert!(
        page.contains("✔ Record retrieved and decrypted successfully"),
        "{page}"
    );
}

#[test]
fn second_retrieval_replaces_every_field() {
    let (mut app, _) = app_with(
        FakeService::default()
            .with_record(record("record_a", "patient_a", 1024, "first status"))
            .with_record(record("record_b", "patient_b", 2048, "second status")),
    );

    app.set_focus(Action::Retrieve);
    type_text(&mut app, "record_a");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    press(&mut app, KeyCode::Delete);
    type_text(&mut app, "record_b");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    let page = render(&app);
    assert!(page.contains("Record ID: record_b"));
    assert!(page.contains("Patient ID: patient_b"));
    assert!(page.contains("2048 bytes"));
    assert!(page.contains("✔ second status"));
    for stale in ["Record ID: record_a", "patient_a", "1024 bytes", "first status"] {
        assert!(!page.contains(stale), "stale {stale:?} survived");
    }
}

#[test]
fn failed_retrieval_keeps_previous_record() {
    let (mut app, _) = app_with(
        FakeService::default().with_record(record("record_a", "patient_a", 1, "ok")),
    );

    app.set_focus(Action::Retrieve);
    type_text(&mut app, "record_a");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    press(&mut app, KeyCode::Delete);
    type_text(&mut app, "missing");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    assert_eq!(app.alert().map(|a| a.message), Some("Failed to retrieve record"));
    assert_eq!(
        app.retrieval().record.as_ref().map(|r| r.record_id.as_str()),
        Some("record_a")
    );
}

#[test]
fn double_submit_last_settled_wins() {
    let (mut app, service) = app_with(
        FakeService::default()
            .with_record(record("slow", "patient_slow", 1, "slow status"))
            .with_record(record("fast", "patient_fast", 2, "fast status"))
            .with_delay("slow", Duration::from_millis(300)),
    );

    app.set_focus(Action::Retrieve);
    type_text(&mut app, "slow");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Delete);
    type_text(&mut app, "fast");
    press(&mut app, KeyCode::Enter);

    // No in-flight guard: both calls go out.
    assert_eq!(app.pending_requests(), 2);
    assert_eq!(app.retrieval().in_flight(), 2);
    assert!(render(&app).contains("Submitting…"));

    settle(&mut app);
    assert_eq!(service.calls().len(), 2);
    assert_eq!(
        app.retrieval().record.as_ref().map(|r| r.record_id.as_str()),
        Some("slow")
    );
    assert!(!render(&app).contains("Submitting…"));
}

#[test]
fn panels_run_independently() {
    let (mut app, service) = app_with(
        FakeService::default()
            .with_identity(Identity::new("user_1", "key_1"))
            .with_record(record("record_1", "patient_1", 5, "ok")),
    );

    type_text(&mut app, "Grace");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus(), Action::Retrieve);
    type_text(&mut app, "record_1");
    press(&mut app, KeyCode::Enter);
    settle(&mut app);

    assert_eq!(service.calls().len(), 2);
    assert_eq!(
        app.registration().identity,
        Some(Identity::new("user_1", "key_1"))
    );
    assert!(app.retrieval().record.is_some());
    assert!(!app.upload().succeeded());
    // Submitting does not clear the forms.
    assert_eq!(app.registration().name, "Grace");
    assert_eq!(app.retrieval().record_id, "record_1");
}

#[test]
fn ctrl_q_quits() {
    let (mut app, _) = app_with(FakeService::default());
    type_text(&mut app, "q");
    assert!(!app.should_quit());
    app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(app.should_quit());
}
