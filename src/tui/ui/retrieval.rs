//! Retrieval panel: record id, displays the retrieved metadata.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::{
    labeled, panel_block, render_result, render_submit, render_text_field, success_line,
    FormPanel,
};
use crate::application::{Action, Outcome, Submission};
use crate::domain::RetrievedRecord;

/// Focusable elements of the retrieval form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetrievalField {
    #[default]
    RecordId,
    Submit,
}

/// Retrieval panel state.
#[derive(Debug, Default)]
pub struct RetrievalPanel {
    pub record_id: String,
    pub focus: RetrievalField,
    /// Last retrieved record, replaced whole on each success
    pub record: Option<RetrievedRecord>,
    in_flight: usize,
}

impl FormPanel for RetrievalPanel {
    fn next_field(&mut self) {
        self.focus = match self.focus {
            RetrievalField::RecordId => RetrievalField::Submit,
            RetrievalField::Submit => RetrievalField::RecordId,
        };
    }

    fn prev_field(&mut self) {
        self.next_field();
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            RetrievalField::RecordId => Some(&mut self.record_id),
            RetrievalField::Submit => None,
        }
    }

    fn submit(&mut self) -> Result<Submission, &'static str> {
        if self.record_id.is_empty() {
            return Err("Please enter a record ID");
        }
        self.in_flight += 1;
        Ok(Submission::Retrieve {
            record_id: self.record_id.clone(),
        })
    }

    fn settle(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Outcome::Retrieved(record) = outcome {
            self.record = Some(record);
        }
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Render the retrieval panel.
pub fn render(f: &mut Frame, area: Rect, state: &RetrievalPanel, focused: bool) {
    let block = panel_block("Retrieve Record", Action::Retrieve, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Record ID
            Constraint::Length(2), // Button + status
            Constraint::Min(0),    // Result
        ])
        .margin(1)
        .split(inner);

    let active = |field: RetrievalField| focused && state.focus == field;

    render_text_field(
        f,
        chunks[0],
        Action::Retrieve,
        "Record ID:",
        &state.record_id,
        "record identifier",
        active(RetrievalField::RecordId),
    );
    render_submit(
        f,
        chunks[1],
        Action::Retrieve,
        "Retrieve",
        active(RetrievalField::Submit),
        state.in_flight,
    );

    if let Some(record) = &state.record {
        render_result(
            f,
            chunks[2],
            vec![
                labeled("Record ID:", record.record_id.as_str()),
                labeled("Patient ID:", record.patient_id.as_str()),
                labeled("File Size:", format!("{} bytes", record.file_size)),
                success_line(record.status.clone()),
            ],
        );
    }
}
