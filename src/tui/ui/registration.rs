//! Registration panel: name + role, displays the issued identity.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    Frame,
};

use super::{
    labeled, panel_block, render_result, render_selector, render_submit, render_text_field,
    FormPanel,
};
use crate::application::{Action, Outcome, Submission};
use crate::domain::{Identity, Registration, Role};

/// Focusable elements of the registration form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationField {
    #[default]
    Name,
    Role,
    Submit,
}

/// Registration panel state.
#[derive(Debug, Default)]
pub struct RegistrationPanel {
    pub name: String,
    pub role: Role,
    pub focus: RegistrationField,
    /// Last issued identity; unset until a registration succeeds
    pub identity: Option<Identity>,
    in_flight: usize,
}

impl FormPanel for RegistrationPanel {
    fn next_field(&mut self) {
        self.focus = match self.focus {
            RegistrationField::Name => RegistrationField::Role,
            RegistrationField::Role => RegistrationField::Submit,
            RegistrationField::Submit => RegistrationField::Name,
        };
    }

    fn prev_field(&mut self) {
        self.focus = match self.focus {
            RegistrationField::Name => RegistrationField::Submit,
            RegistrationField::Role => RegistrationField::Name,
            RegistrationField::Submit => RegistrationField::Role,
        };
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            RegistrationField::Name => Some(&mut self.name),
            _ => None,
        }
    }

    fn cycle_option(&mut self) -> bool {
        if self.focus == RegistrationField::Role {
            self.role = self.role.toggled();
            true
        } else {
            false
        }
    }

    fn submit(&mut self) -> Result<Submission, &'static str> {
        if self.name.is_empty() {
            return Err("Please enter a name");
        }
        self.in_flight += 1;
        Ok(Submission::Register(Registration::new(self.name.clone(), self.role)))
    }

    fn settle(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Outcome::Registered(identity) = outcome {
            self.identity = Some(identity);
        }
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Render the registration panel.
pub fn render(f: &mut Frame, area: Rect, state: &RegistrationPanel, focused: bool) {
    let block = panel_block("Register User", Action::Register, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Role
            Constraint::Length(2), // Button + status
            Constraint::Min(0),    // Result
        ])
        .margin(1)
        .split(inner);

    let active = |field: RegistrationField| focused && state.focus == field;

    render_text_field(
        f,
        chunks[0],
        Action::Register,
        "Name:",
        &state.name,
        "full name",
        active(RegistrationField::Name),
    );

    let options: Vec<(&'static str, bool)> = Role::ALL
        .iter()
        .map(|role| (role.label(), *role == state.role))
        .collect();
    render_selector(
        f,
        chunks[1],
        Action::Register,
        "Role:",
        &options,
        active(RegistrationField::Role),
    );

    render_submit(
        f,
        chunks[2],
        Action::Register,
        "Register",
        active(RegistrationField::Submit),
        state.in_flight,
    );

    if let Some(identity) = &state.identity {
        render_result(f, chunks[3], identity_lines(identity));
    }
}

/// Result lines for an issued identity. The private key is borrowed so no
/// unzeroized copy outlives the frame.
fn identity_lines(identity: &Identity) -> Vec<Line<'_>> {
    vec![
        labeled("User ID:", identity.user_id.as_str()),
        labeled("Private Key:", identity.private_key.as_str()),
    ]
}
