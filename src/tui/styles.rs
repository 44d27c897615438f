//! Color palette and styles for the MediBlock client.
//!
//! Each panel carries its own accent so the three workflows stay visually
//! distinct: green for registration, blue for upload, purple for retrieval.

use ratatui::style::{Color, Modifier, Style};

use crate::application::Action;

/// MediBlock theme color palette.
pub struct Theme;

impl Theme {
    // === Panel accents ===

    /// Green - Registration
    pub const REGISTER: Color = Color::Rgb(76, 175, 80); // #4CAF50

    /// Blue - Upload
    pub const UPLOAD: Color = Color::Rgb(33, 150, 243); // #2196F3

    /// Purple - Retrieval
    pub const RETRIEVE: Color = Color::Rgb(156, 39, 176); // #9C27B0

    // === Semantic colors ===

    /// Emerald - Success
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - Pending
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - Error
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    // === Neutrals ===

    pub const BG_CARD: Color = Color::Rgb(51, 65, 85); // #334155
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Preset styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Bold label in front of a result value ("User ID:")
    #[must_use]
    pub fn label() -> Style {
        Style::default()
            .fg(Self::TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn pending() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Accent color for a panel's action.
    #[must_use]
    pub fn accent(action: Action) -> Color {
        match action {
            Action::Register => Self::REGISTER,
            Action::Upload => Self::UPLOAD,
            Action::Retrieve => Self::RETRIEVE,
        }
    }

    /// Border of the focused panel or field.
    #[must_use]
    pub fn border_focused(action: Action) -> Style {
        Style::default().fg(Self::accent(action))
    }

    /// Panel heading.
    #[must_use]
    pub fn panel_title(action: Action) -> Style {
        Style::default()
            .fg(Self::accent(action))
            .add_modifier(Modifier::BOLD)
    }

    /// Submit button; filled with the accent when focused.
    #[must_use]
    pub fn button(action: Action, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Self::TEXT_PRIMARY)
                .bg(Self::accent(action))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Self::accent(action))
                .add_modifier(Modifier::BOLD)
        }
    }

    #[must_use]
    pub fn cursor(action: Action) -> Style {
        Style::default().fg(Self::accent(action))
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Modal alert body.
    #[must_use]
    pub fn alert() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_CARD)
    }
}

/// Glyph shown in front of success messages.
pub const SUCCESS_GLYPH: &str = "✔";
