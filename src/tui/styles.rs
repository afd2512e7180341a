//! Clinical color palette and styles.
//!
//! Slate backgrounds with an indigo accent; each result card gets its own
//! semantic color so medications, precautions, diet and recovery plan are
//! distinguishable at a glance.

use ratatui::style::{Color, Modifier, Style};

/// Clinical theme color palette.
pub struct ClinicalTheme;

impl ClinicalTheme {
    // === Primary Colors ===

    /// Indigo - Primary accent
    pub const PRIMARY: Color = Color::Rgb(79, 70, 229); // #4F46E5

    /// Lighter indigo for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(129, 140, 248); // #818CF8

    /// Violet for the header bar
    pub const PRIMARY_DARK: Color = Color::Rgb(67, 56, 202); // #4338CA

    // === Secondary Colors ===

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Card Colors ===

    /// Rose - Medications
    pub const ROSE: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Emerald - Precautions
    pub const EMERALD: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - Diet
    pub const AMBER: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Blue - Recovery plan
    pub const BLUE: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Background Colors ===

    /// Near-black with blue tint
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    /// Popup background
    pub const BG_SURFACE: Color = Color::Rgb(30, 41, 59); // #1E293B

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
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

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::EMERALD)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::AMBER)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::ROSE)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::BLUE)
    }

    /// Symptom row under the cursor
    #[must_use]
    pub fn cursor() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected symptom (checked) row
    #[must_use]
    pub fn checked() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Active category tab
    #[must_use]
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Accent style for a result card
    #[must_use]
    pub fn card(accent: Color) -> Style {
        Style::default().fg(accent)
    }

    /// Popup body
    #[must_use]
    pub fn popup() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_SURFACE)
    }
}
