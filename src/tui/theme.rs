//! Color themes for the TUI
//!
//! The dark-mode preference picks between the two palettes.

use ratatui::style::{Color, Modifier, Style};

use crate::models::Category;
use crate::reports::BudgetHealth;

/// A terminal color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight: Color,
    pub healthy: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        background: Color::Rgb(0xF5, 0xF5, 0xF5),
        text: Color::Rgb(0x33, 0x33, 0x33),
        muted: Color::Rgb(0x88, 0x88, 0x88),
        border: Color::Rgb(0xBB, 0xBB, 0xBB),
        accent: Color::Rgb(0x4A, 0x6C, 0xF7),
        highlight: Color::Rgb(0xDD, 0xE4, 0xFD),
        healthy: Color::Rgb(0x2E, 0x9D, 0x5B),
        warning: Color::Rgb(0xD9, 0x8C, 0x00),
        danger: Color::Rgb(0xD6, 0x33, 0x33),
    };

    pub const DARK: Theme = Theme {
        background: Color::Rgb(0x1A, 0x1A, 0x2E),
        text: Color::Rgb(0xE0, 0xE0, 0xE0),
        muted: Color::Rgb(0x80, 0x80, 0x90),
        border: Color::Rgb(0x44, 0x44, 0x5A),
        accent: Color::Rgb(0x7B, 0x93, 0xFF),
        highlight: Color::Rgb(0x2A, 0x2A, 0x4A),
        healthy: Color::Rgb(0x4E, 0xCD, 0xC4),
        warning: Color::Rgb(0xFE, 0xCA, 0x57),
        danger: Color::Rgb(0xFF, 0x6B, 0x6B),
    };

    pub fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    /// Base style for a screen area
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Color for a budget health level
    pub fn health_color(&self, health: BudgetHealth) -> Color {
        match health {
            BudgetHealth::Healthy => self.healthy,
            BudgetHealth::Warning => self.warning,
            BudgetHealth::Danger => self.danger,
        }
    }
}

/// Terminal color for a category's chart color
pub fn category_color(category: &Category) -> Color {
    let (r, g, b) = category.rgb();
    Color::Rgb(r, g, b)
}
