use std::str::FromStr;

use gpui::{Global, Rgba};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::{Theme, ThemeColors};

/// Appearance mode. Every semantic color role carries a value for each.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    /// The opposite mode.
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

/// How unknown color role names resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPolicy {
    /// Unknown roles resolve to opaque black and never fail.
    #[default]
    Fallback,
    /// Unknown roles are reported as errors.
    Strict,
}

impl Global for LookupPolicy {}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown color role \"{0}\"")]
    UnknownRole(String),

    #[error("failed to parse theme: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The color returned for unknown roles under [`LookupPolicy::Fallback`].
pub const FALLBACK_COLOR: Rgba = Rgba {
    r: 0.,
    g: 0.,
    b: 0.,
    a: 1.,
};

/// Semantic color roles addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Label,
    SecondaryLabel,
    TertiaryLabel,
    QuaternaryLabel,
    Link,
    PlaceholderText,
    WindowBackground,
    ContentBackground,
    UnderWindowBackground,
    AlternatingContentBackground,
    SidebarBackground,
    MenuBackground,
    AccentBlue,
    AccentPurple,
    AccentPink,
    AccentRed,
    AccentOrange,
    AccentYellow,
    AccentGreen,
    AccentGraphite,
    FillPrimary,
    FillSecondary,
    FillTertiary,
    FillQuaternary,
    Separator,
    OpaqueSeparator,
    ControlDisabledBackground,
    ControlDisabledText,
    ControlBorder,
}

impl ColorRole {
    /// Every role, in declaration order.
    pub const ALL: [ColorRole; 29] = [
        ColorRole::Label,
        ColorRole::SecondaryLabel,
        ColorRole::TertiaryLabel,
        ColorRole::QuaternaryLabel,
        ColorRole::Link,
        ColorRole::PlaceholderText,
        ColorRole::WindowBackground,
        ColorRole::ContentBackground,
        ColorRole::UnderWindowBackground,
        ColorRole::AlternatingContentBackground,
        ColorRole::SidebarBackground,
        ColorRole::MenuBackground,
        ColorRole::AccentBlue,
        ColorRole::AccentPurple,
        ColorRole::AccentPink,
        ColorRole::AccentRed,
        ColorRole::AccentOrange,
        ColorRole::AccentYellow,
        ColorRole::AccentGreen,
        ColorRole::AccentGraphite,
        ColorRole::FillPrimary,
        ColorRole::FillSecondary,
        ColorRole::FillTertiary,
        ColorRole::FillQuaternary,
        ColorRole::Separator,
        ColorRole::OpaqueSeparator,
        ColorRole::ControlDisabledBackground,
        ColorRole::ControlDisabledText,
        ColorRole::ControlBorder,
    ];

    fn pick(self, colors: &ThemeColors) -> Rgba {
        match self {
            ColorRole::Label => colors.label,
            ColorRole::SecondaryLabel => colors.secondary_label,
            ColorRole::TertiaryLabel => colors.tertiary_label,
            ColorRole::QuaternaryLabel => colors.quaternary_label,
            ColorRole::Link => colors.link,
            ColorRole::PlaceholderText => colors.placeholder_text,
            ColorRole::WindowBackground => colors.window_background,
            ColorRole::ContentBackground => colors.content_background,
            ColorRole::UnderWindowBackground => colors.under_window_background,
            ColorRole::AlternatingContentBackground => colors.alternating_content_background,
            ColorRole::SidebarBackground => colors.sidebar_background,
            ColorRole::MenuBackground => colors.menu_background,
            ColorRole::AccentBlue => colors.accents.blue,
            ColorRole::AccentPurple => colors.accents.purple,
            ColorRole::AccentPink => colors.accents.pink,
            ColorRole::AccentRed => colors.accents.red,
            ColorRole::AccentOrange => colors.accents.orange,
            ColorRole::AccentYellow => colors.accents.yellow,
            ColorRole::AccentGreen => colors.accents.green,
            ColorRole::AccentGraphite => colors.accents.graphite,
            ColorRole::FillPrimary => colors.fills.primary,
            ColorRole::FillSecondary => colors.fills.secondary,
            ColorRole::FillTertiary => colors.fills.tertiary,
            ColorRole::FillQuaternary => colors.fills.quaternary,
            ColorRole::Separator => colors.separator,
            ColorRole::OpaqueSeparator => colors.opaque_separator,
            ColorRole::ControlDisabledBackground => colors.controls.disabled_background,
            ColorRole::ControlDisabledText => colors.controls.disabled_text,
            ColorRole::ControlBorder => colors.controls.border,
        }
    }
}

impl FromStr for ColorRole {
    type Err = ThemeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let role = match name {
            "label" => ColorRole::Label,
            "secondary_label" => ColorRole::SecondaryLabel,
            "tertiary_label" => ColorRole::TertiaryLabel,
            "quaternary_label" => ColorRole::QuaternaryLabel,
            "link" => ColorRole::Link,
            "placeholder_text" => ColorRole::PlaceholderText,
            "window_background" => ColorRole::WindowBackground,
            "content_background" => ColorRole::ContentBackground,
            "under_window_background" => ColorRole::UnderWindowBackground,
            "alternating_content_background" => ColorRole::AlternatingContentBackground,
            "sidebar_background" => ColorRole::SidebarBackground,
            "menu_background" => ColorRole::MenuBackground,
            "accent_blue" => ColorRole::AccentBlue,
            "accent_purple" => ColorRole::AccentPurple,
            "accent_pink" => ColorRole::AccentPink,
            "accent_red" => ColorRole::AccentRed,
            "accent_orange" => ColorRole::AccentOrange,
            "accent_yellow" => ColorRole::AccentYellow,
            "accent_green" => ColorRole::AccentGreen,
            "accent_graphite" => ColorRole::AccentGraphite,
            "fill_primary" => ColorRole::FillPrimary,
            "fill_secondary" => ColorRole::FillSecondary,
            "fill_tertiary" => ColorRole::FillTertiary,
            "fill_quaternary" => ColorRole::FillQuaternary,
            "separator" => ColorRole::Separator,
            "opaque_separator" => ColorRole::OpaqueSeparator,
            "control_disabled_background" => ColorRole::ControlDisabledBackground,
            "control_disabled_text" => ColorRole::ControlDisabledText,
            "control_border" => ColorRole::ControlBorder,
            _ => return Err(ThemeError::UnknownRole(name.into())),
        };

        Ok(role)
    }
}

impl Theme {
    /// Resolves a known role for a mode. Total; never fails.
    pub fn color(&self, role: ColorRole, mode: Mode) -> Rgba {
        role.pick(&self.variants.for_mode(mode).colors)
    }

    /// Resolves a role by name. Unknown names follow the lookup policy:
    /// fallback yields [`FALLBACK_COLOR`], strict yields an error.
    pub fn resolve_color(
        &self,
        role: &str,
        mode: Mode,
        policy: LookupPolicy,
    ) -> Result<Rgba, ThemeError> {
        match role.parse::<ColorRole>() {
            Ok(role) => Ok(self.color(role, mode)),
            Err(err) => match policy {
                LookupPolicy::Fallback => Ok(FALLBACK_COLOR),
                LookupPolicy::Strict => Err(err),
            },
        }
    }
}
