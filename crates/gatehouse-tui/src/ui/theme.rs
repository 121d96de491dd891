//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// Gatehouse color palette
pub struct Theme {
    // Primary branding colors
    pub brand: Color,
    pub brand_tint: Color,
    pub ring: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // UI element colors
    pub line: Color,
    pub line_focused: Color,
    pub ink: Color,
    pub ink_muted: Color,
    pub ink_faint: Color,
    pub rail: Color,
    pub surface: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Primary branding - Gatehouse teal
            brand: Color::Rgb(20, 184, 166),      // #14B8A6
            brand_tint: Color::Rgb(19, 78, 74),   // #134E4A
            ring: Color::Rgb(45, 212, 191),       // #2DD4BF

            // Status colors
            success: Color::Rgb(74, 222, 128),    // #4ADE80
            warning: Color::Rgb(251, 191, 36),    // #FBBF24
            danger: Color::Rgb(220, 38, 38),      // #DC2626

            // UI elements
            line: Color::Rgb(63, 63, 70),         // #3F3F46
            line_focused: Color::Rgb(45, 212, 191), // #2DD4BF
            ink: Color::Rgb(244, 244, 245),       // #F4F4F5
            ink_muted: Color::Rgb(161, 161, 170), // #A1A1AA
            ink_faint: Color::Rgb(113, 113, 122), // #71717A
            rail: Color::Rgb(24, 24, 27),         // #18181B
            surface: Color::Rgb(39, 39, 42),      // #27272A
        }
    }
}

impl Theme {
    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.ink)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.ink_muted)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.ink_faint)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default().fg(self.ink).add_modifier(Modifier::BOLD)
    }

    /// Get the brand-colored step label style
    pub fn step_label(&self) -> Style {
        Style::default().fg(self.brand).add_modifier(Modifier::BOLD)
    }

    /// Get field label style
    pub fn label(&self) -> Style {
        Style::default().fg(self.ink_muted)
    }

    /// Get border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.line)
    }

    /// Get focused border style
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.line_focused)
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
    }

    /// Get success style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Get warning style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get link style (actionable inline text)
    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.brand)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Get input field style
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.ink).bg(self.surface)
        } else {
            Style::default().fg(self.ink_muted).bg(self.surface)
        }
    }

    /// Get placeholder style; brand-colored while a submission settles
    pub fn placeholder(&self, in_flight: bool) -> Style {
        if in_flight {
            Style::default().fg(self.brand).bg(self.surface)
        } else {
            Style::default().fg(self.ink_faint).bg(self.surface)
        }
    }

    /// Get code cell border style
    pub fn cell_border(&self, focused: bool, error: bool) -> Style {
        if error {
            Style::default().fg(self.danger)
        } else if focused {
            Style::default().fg(self.ring)
        } else {
            Style::default().fg(self.line)
        }
    }

    /// Get code cell digit style
    pub fn cell_digit(&self) -> Style {
        Style::default().fg(self.ink).add_modifier(Modifier::BOLD)
    }

    /// Get the confirmed email header style
    pub fn header_bar(&self) -> Style {
        Style::default().bg(self.brand_tint)
    }

    /// Get the sheen highlight style for swept characters
    pub fn sheen_highlight(&self) -> Style {
        Style::default()
            .fg(self.ring)
            .add_modifier(Modifier::BOLD)
    }

    /// Get the veil beam style
    pub fn veil_beam(&self) -> Style {
        Style::default().bg(self.brand_tint)
    }

    /// Create a high-contrast theme variant
    pub fn high_contrast() -> Self {
        Self {
            ink: Color::White,
            ink_muted: Color::White,
            ink_faint: Color::Gray,
            line: Color::White,
            line_focused: Color::Yellow,
            ring: Color::Yellow,
            ..Self::default()
        }
    }
}
