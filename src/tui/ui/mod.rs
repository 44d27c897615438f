//! UI module: Panels and the page shell.
//!
//! The page shows three independent panels side by side. Each panel owns
//! its form fields and its last result; panels never read each other.

pub mod registration;
pub mod retrieval;
pub mod upload;

use std::borrow::Cow;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::{Action, Outcome, Submission};
use crate::tui::styles::Theme;

pub use registration::RegistrationPanel;
pub use retrieval::RetrievalPanel;
pub use upload::UploadPanel;

/// Window title and page heading.
pub const PAGE_TITLE: &str = "MediBlock - Healthcare Blockchain";
pub const PAGE_HEADING: &str = "MediBlock Healthcare Blockchain";
pub const PAGE_FOOTER: &str = "MediBlock - A Healthcare Blockchain Solution";

/// Behavior shared by the three form panels.
///
/// Editing goes to whichever text field has focus. `submit` checks the
/// required fields and, on success, enters `Submitting`.
pub trait FormPanel {
    fn next_field(&mut self);

    fn prev_field(&mut self);

    /// Mutable buffer of the focused text field, if a text field has focus.
    fn focused_text(&mut self) -> Option<&mut String>;

    /// Change the focused option selector. Returns `false` when the focused
    /// field is not a selector.
    fn cycle_option(&mut self) -> bool {
        false
    }

    /// Validate required fields and build the request.
    ///
    /// # Errors
    /// Returns the static alert text when a required field is empty.
    fn submit(&mut self) -> Result<Submission, &'static str>;

    /// Apply a settled call. Failures leave stored results untouched.
    fn settle(&mut self, outcome: Outcome);

    /// Number of calls from this panel still in flight.
    fn in_flight(&self) -> usize;

    fn input_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    fn delete_char(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    fn clear_field(&mut self) {
        if let Some(text) = self.focused_text() {
            text.clear();
        }
    }
}

/// Blocking alert: one static message per failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: &'static str,
}

impl Alert {
    #[must_use]
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Everything the page shell needs to draw one frame.
pub struct PageView<'a> {
    pub registration: &'a RegistrationPanel,
    pub upload: &'a UploadPanel,
    pub retrieval: &'a RetrievalPanel,
    pub focus: Action,
    pub alert: Option<&'a Alert>,
}

/// Render the whole page: heading, three panels, footer and any alert.
pub fn render_page(f: &mut Frame, view: &PageView<'_>) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(0),    // Panels
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_heading(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);

    registration::render(f, columns[0], view.registration, view.focus == Action::Register);
    upload::render(f, columns[1], view.upload, view.focus == Action::Upload);
    retrieval::render(f, columns[2], view.retrieval, view.focus == Action::Retrieve);

    render_footer(f, chunks[2], view.alert.is_some());

    if let Some(alert) = view.alert {
        render_alert(f, area, alert);
    }
}

fn render_heading(f: &mut Frame, area: Rect) {
    let heading = Paragraph::new(Line::from(Span::styled(PAGE_HEADING, Theme::title())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Theme::border()),
        );
    f.render_widget(heading, area);
}

fn render_footer(f: &mut Frame, area: Rect, alert_open: bool) {
    let hints = if alert_open {
        Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Dismiss alert", Theme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Tab] ", Theme::key_hint()),
            Span::styled("Next panel ", Theme::key_desc()),
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Field ", Theme::key_desc()),
            Span::styled("[←→] ", Theme::key_hint()),
            Span::styled("Role ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Submit ", Theme::key_desc()),
            Span::styled("[Ctrl+Q] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(vec![
        hints,
        Line::from(Span::styled(PAGE_FOOTER, Theme::text_muted())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(footer, area);
}

fn render_alert(f: &mut Frame, area: Rect, alert: &Alert) {
    let [row] = Layout::vertical([Constraint::Length(6)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(48)])
        .flex(Flex::Center)
        .areas(row);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(alert.message, Theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("OK", Theme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Theme::alert())
    .block(
        Block::default()
            .title(Span::styled(" Alert ", Theme::danger()))
            .borders(Borders::ALL)
            .border_style(Theme::danger()),
    );

    f.render_widget(Clear, popup);
    f.render_widget(content, popup);
}

// === Shared form widgets ===

/// Outer frame of a panel, highlighted when it has focus.
pub(crate) fn panel_block(title: &'static str, action: Action, focused: bool) -> Block<'static> {
    let border = if focused {
        Theme::border_focused(action)
    } else {
        Theme::border()
    };
    Block::default()
        .title(Span::styled(format!(" {title} "), Theme::panel_title(action)))
        .borders(Borders::ALL)
        .border_style(border)
}

/// A labeled single-line text input.
pub(crate) fn render_text_field(
    f: &mut Frame,
    area: Rect,
    action: Action,
    label: &'static str,
    value: &str,
    hint: &'static str,
    focused: bool,
) {
    let block = field_block(action, label, focused);

    let value_span = if value.is_empty() {
        Span::styled(hint, Theme::text_muted())
    } else {
        Span::styled(value.to_string(), Theme::text())
    };

    let mut spans = vec![Span::raw(" "), value_span];
    if focused {
        spans.push(Span::styled("▌", Theme::cursor(action)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// A labeled two-or-more option selector; the chosen option is filled.
pub(crate) fn render_selector(
    f: &mut Frame,
    area: Rect,
    action: Action,
    label: &'static str,
    options: &[(&'static str, bool)],
    focused: bool,
) {
    let block = field_block(action, label, focused);

    let mut spans = vec![Span::raw(" ")];
    for (name, chosen) in options {
        let (mark, style) = if *chosen {
            ("●", Theme::text())
        } else {
            ("○", Theme::text_muted())
        };
        spans.push(Span::styled(format!("{mark} {name}  "), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn field_block(action: Action, label: &'static str, focused: bool) -> Block<'static> {
    let (border, title) = if focused {
        (Theme::border_focused(action), Theme::panel_title(action))
    } else {
        (Theme::border(), Theme::text_secondary())
    };
    Block::default()
        .title(Span::styled(label, title))
        .borders(Borders::ALL)
        .border_style(border)
}

/// The submit button plus the `Submitting…` indicator underneath it.
pub(crate) fn render_submit(
    f: &mut Frame,
    area: Rect,
    action: Action,
    caption: &'static str,
    focused: bool,
    in_flight: usize,
) {
    let status = if in_flight > 0 {
        Line::from(Span::styled("Submitting…", Theme::pending()))
    } else {
        Line::from("")
    };

    let content = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("[ {caption} ]"),
            Theme::button(action, focused),
        )),
        status,
    ])
    .alignment(Alignment::Center);
    f.render_widget(content, area);
}

/// Result box rendered under a panel's form once a call has succeeded.
pub(crate) fn render_result(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let content = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    f.render_widget(content, area);
}

/// `Label: value` line used in result boxes. The value is borrowed when the
/// caller passes a `&str`.
pub(crate) fn labeled<'a>(label: &'static str, value: impl Into<Cow<'a, str>>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label} "), Theme::label()),
        Span::styled(value, Theme::text()),
    ])
}

/// Success message prefixed with the success glyph.
pub(crate) fn success_line(message: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("{} {message}", crate::tui::styles::SUCCESS_GLYPH),
        Theme::success(),
    ))
}
