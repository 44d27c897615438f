//! Shared fixtures: an in-memory record service and a frame renderer.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use mediblock::ports::RecordService;
use mediblock::tui::App;
use mediblock::{Identity, Registration, RetrievedRecord, UploadReceipt, UploadRequest};

/// One call observed by the fake service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Register(Registration),
    Upload(UploadRequest),
    Retrieve(String),
}

#[derive(Debug, thiserror::Error)]
#[error("fake service rejected the request")]
pub struct Rejected;

/// Records every call and answers from canned responses.
/// A missing canned response is a failed call.
#[derive(Default)]
pub struct FakeService {
    calls: Mutex<Vec<Call>>,
    identity: Mutex<Option<Identity>>,
    receipt: Mutex<Option<UploadReceipt>>,
    records: Mutex<HashMap<String, RetrievedRecord>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl FakeService {
    pub fn with_identity(self, identity: Identity) -> Self {
        *self.identity.lock().unwrap() = Some(identity);
        self
    }

    pub fn with_receipt(self, record_id: &str) -> Self {
        *self.receipt.lock().unwrap() = Some(UploadReceipt {
            record_id: record_id.to_string(),
        });
        self
    }

    pub fn with_record(self, record: RetrievedRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(record.record_id.clone(), record);
        self
    }

    /// Delay the answer for one record id.
    pub fn with_delay(self, record_id: &str, delay: Duration) -> Self {
        self.delays
            .lock()
            .unwrap()
            .insert(record_id.to_string(), delay);
        self
    }

    /// Fail every upload from now on.
    pub fn reject_uploads(&self) {
        *self.receipt.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl RecordService for FakeService {
    type Error = Rejected;

    fn register(&self, registration: &Registration) -> Result<Identity, Rejected> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Register(registration.clone()));
        self.identity.lock().unwrap().clone().ok_or(Rejected)
    }

    fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, Rejected> {
        self.calls.lock().unwrap().push(Call::Upload(request.clone()));
        self.receipt.lock().unwrap().clone().ok_or(Rejected)
    }

    fn retrieve(&self, record_id: &str) -> Result<RetrievedRecord, Rejected> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Retrieve(record_id.to_string()));
        let delay = self.delays.lock().unwrap().get(record_id).copied();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        self.records
            .lock()
            .unwrap()
            .get(record_id)
            .cloned()
            .ok_or(Rejected)
    }
}

pub fn record(record_id: &str, patient_id: &str, file_size: u64, status: &str) -> RetrievedRecord {
    RetrievedRecord {
        record_id: record_id.to_string(),
        patient_id: patient_id.to_string(),
        file_size,
        status: status.to_string(),
    }
}

pub fn press<S: RecordService + 'static>(app: &mut App<S>, key: KeyCode) {
    app.handle_key(key, KeyModifiers::NONE);
}

pub fn type_text<S: RecordService + 'static>(app: &mut App<S>, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

pub fn settle<S: RecordService + 'static>(app: &mut App<S>) {
    assert!(
        app.wait_for_pending(Duration::from_secs(5)),
        "requests did not settle"
    );
}

/// Draw the page into a 180x40 test terminal and return its text, one
/// line per row.
pub fn render<S: RecordService + 'static>(app: &App<S>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(180, 40)).expect("test terminal");
    terminal.draw(|f| app.draw(f)).expect("draw");

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
