//! Parrot/neon theme tokens for ReturnLab charts
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Series**: cyan, green, orange, purple, pink, steel blue (cycled per column)
//! - **Muted**: steel blue for axes and hints
//! - **Text**: white titles, light gray axis captions

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    /// Line colors, assigned to columns in order and cycled.
    pub series: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
            series: vec![
                Color::Rgb(0, 255, 255),   // electric cyan
                Color::Rgb(0, 255, 128),   // neon green
                Color::Rgb(255, 140, 0),   // neon orange
                Color::Rgb(147, 112, 219), // cool purple
                Color::Rgb(255, 20, 147),  // hot pink
                Color::Rgb(100, 149, 237), // steel blue
            ],
        }
    }

    /// Color for the column at `index`.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return self.accent;
        }
        self.series[index % self.series.len()]
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn axis_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn caption_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }
}
