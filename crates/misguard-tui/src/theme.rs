use ratatui::style::{Color, Modifier, Style};

use misguard_core::{CredibilityBand, Severity, ThemeKind};

/// Color theme for the TUI.
pub struct Theme {
    pub kind: ThemeKind,

    pub high: Color,
    pub medium: Color,
    pub low: Color,

    pub info: Color,
    pub success: Color,
    pub error: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub background: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub accent: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
        }
    }

    /// Indigo-on-charcoal default.
    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            high: Color::Rgb(16, 185, 129),
            medium: Color::Rgb(245, 158, 11),
            low: Color::Rgb(239, 68, 68),

            info: Color::Rgb(99, 102, 241),
            success: Color::Rgb(16, 185, 129),
            error: Color::Rgb(239, 68, 68),

            header_fg: Color::White,
            header_bg: Color::Rgb(79, 70, 229),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(140, 140, 160),
            background: Color::Reset,
            highlight_bg: Color::Rgb(40, 40, 70),
            active: Color::Rgb(129, 140, 248),
            accent: Color::Rgb(139, 92, 246),
            footer_fg: Color::Rgb(140, 140, 160),
            footer_bg: Color::Reset,
        }
    }

    /// Light background with slate text.
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            high: Color::Rgb(5, 150, 105),
            medium: Color::Rgb(217, 119, 6),
            low: Color::Rgb(220, 38, 38),

            info: Color::Rgb(79, 70, 229),
            success: Color::Rgb(5, 150, 105),
            error: Color::Rgb(220, 38, 38),

            header_fg: Color::White,
            header_bg: Color::Rgb(79, 70, 229),
            border: Color::Rgb(180, 180, 200),
            text: Color::Rgb(30, 41, 59),
            dim: Color::Rgb(100, 116, 139),
            background: Color::Rgb(248, 250, 252),
            highlight_bg: Color::Rgb(224, 231, 255),
            active: Color::Rgb(79, 70, 229),
            accent: Color::Rgb(124, 58, 237),
            footer_fg: Color::Rgb(100, 116, 139),
            footer_bg: Color::Rgb(241, 245, 249),
        }
    }

    pub fn band_color(&self, band: CredibilityBand) -> Color {
        match band {
            CredibilityBand::High => self.high,
            CredibilityBand::Medium => self.medium,
            CredibilityBand::Low => self.low,
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Error => self.error,
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.active).add_modifier(Modifier::BOLD)
    }
}
