use std::{
    ops::{Deref, DerefMut},
    sync::LazyLock,
};

use gpui::{AbsoluteLength, App, Global, Pixels, Rgba, SharedString};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deserializers::{
    de_abs_length, de_pixels, de_spacing, de_string_or_non_empty_list, de_variants,
};
use super::resolver::Mode;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Theme {
    pub name: SharedString,
    pub layout: ThemeLayout,
    pub typography: ThemeTypography,
    pub variants: ThemeVariants,
}

macro_rules! generate_builtin_themes {
    ( $( [$path:literal, $name:ident] ),+ ) => {
        $(
            pub const $name: LazyLockTheme = LazyLockTheme::new(|| Theme::from_string(include_str!($path)).unwrap());
        )+
    };
}

pub struct LazyLockTheme(LazyLock<Theme>);

impl LazyLockTheme {
    #[inline(always)]
    const fn new(f: fn() -> Theme) -> Self {
        Self(LazyLock::new(f))
    }
}

impl Deref for LazyLockTheme {
    type Target = Theme;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LazyLockTheme {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<Theme> for LazyLockTheme {
    fn as_ref(&self) -> &Theme {
        &self.0
    }
}

impl Theme {
    generate_builtin_themes!(["../../themes/macos.json", DEFAULT]);

    pub fn from_string<S: AsRef<str>>(str: S) -> Result<Theme, serde_json::Error> {
        serde_json::from_str(str.as_ref())
    }

    /// Looks up a step on the spacing scale.
    pub fn spacing(&self, step: u8) -> Option<Pixels> {
        self.layout.spacing.steps.get(&step).copied()
    }
}

impl Global for Theme {}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeLayout {
    pub text: ThemeText,
    pub spacing: ThemeSpacing,
    pub corner_radii: ThemeCornerRadii,
    pub chrome: ThemeChrome,
    pub z_index: ThemeZIndex,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeText {
    #[serde(deserialize_with = "de_pixels")]
    pub base_size: Pixels,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct ThemeSpacing {
    #[serde(deserialize_with = "de_spacing")]
    pub steps: IndexMap<u8, Pixels>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeCornerRadii {
    #[serde(deserialize_with = "de_pixels")]
    pub none: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub xxl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub xxxl: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub full: Pixels,
}

/// Fixed metrics for window chrome surfaces.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeChrome {
    #[serde(deserialize_with = "de_pixels")]
    pub titlebar_height: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub toolbar_height: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sidebar_expanded_width: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub sidebar_collapsed_width: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub min_window_width: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub min_window_height: Pixels,
}

/// Stacking contract. Overlays defer with these priorities so the relative
/// order holds regardless of mount order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeZIndex {
    pub modal: usize,
    pub sticky: usize,
    pub fixed: usize,
    pub overlay: usize,
    pub drawer: usize,
    pub modal_overlay: usize,
    pub popover: usize,
    pub skip_link: usize,
    pub toast: usize,
    pub tooltip: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTypography {
    pub families: ThemeFontFamilies,
    pub styles: ThemeTextStyles,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeFontFamilies {
    #[serde(deserialize_with = "de_string_or_non_empty_list")]
    pub text: SmallVec<[SharedString; 1]>,
    #[serde(deserialize_with = "de_string_or_non_empty_list")]
    pub display: SmallVec<[SharedString; 1]>,
    #[serde(deserialize_with = "de_string_or_non_empty_list")]
    pub mono: SmallVec<[SharedString; 1]>,
    #[serde(deserialize_with = "de_string_or_non_empty_list")]
    pub serif: SmallVec<[SharedString; 1]>,
}

impl ThemeFontFamilies {
    /// The preferred family name for the given kind.
    pub fn primary(&self, kind: FontFamilyKind) -> SharedString {
        let list = match kind {
            FontFamilyKind::Text => &self.text,
            FontFamilyKind::Display => &self.display,
            FontFamilyKind::Mono => &self.mono,
            FontFamilyKind::Serif => &self.serif,
        };

        list[0].clone()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontFamilyKind {
    Text,
    Display,
    Mono,
    Serif,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTextStyles {
    pub title1: ThemeTextStyle,
    pub title2: ThemeTextStyle,
    pub title3: ThemeTextStyle,
    pub headline: ThemeTextStyle,
    pub body: ThemeTextStyle,
    pub callout: ThemeTextStyle,
    pub subhead: ThemeTextStyle,
    pub footnote: ThemeTextStyle,
    pub caption1: ThemeTextStyle,
    pub caption2: ThemeTextStyle,
    pub code: ThemeTextStyle,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeTextStyle {
    #[serde(deserialize_with = "de_abs_length")]
    pub size: AbsoluteLength,
    pub weight: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Letter spacing in ems.
    pub tracking: f32,
    pub family: FontFamilyKind,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(transparent)]
pub struct ThemeVariants {
    #[serde(deserialize_with = "de_variants")]
    pub variants: SmallVec<[ThemeVariant; 2]>,
}

impl ThemeVariants {
    /// The variant for the given appearance mode, falling back to the first
    /// variant when the theme does not provide one.
    pub fn for_mode(&self, mode: Mode) -> &ThemeVariant {
        self.variants
            .iter()
            .find(|variant| variant.kind == mode)
            .unwrap_or(&self.variants[0])
    }

    /// The variant matching the globally active appearance mode.
    pub fn active(&self, cx: &App) -> &ThemeVariant {
        self.for_mode(cx.global::<ActiveMode>().0)
    }
}

/// The appearance mode currently applied to the app.
pub struct ActiveMode(pub Mode);

impl Global for ActiveMode {}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeVariant {
    pub kind: Mode,
    pub colors: ThemeColors,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeColors {
    pub label: Rgba,
    pub secondary_label: Rgba,
    pub tertiary_label: Rgba,
    pub quaternary_label: Rgba,
    pub link: Rgba,
    pub placeholder_text: Rgba,

    pub window_background: Rgba,
    pub content_background: Rgba,
    pub under_window_background: Rgba,
    pub alternating_content_background: Rgba,
    pub sidebar_background: Rgba,
    pub menu_background: Rgba,

    pub accents: ThemeAccentColors,
    pub fills: ThemeFillColors,

    pub separator: Rgba,
    pub opaque_separator: Rgba,

    pub controls: ThemeControlColors,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeAccentColors {
    pub blue: Rgba,
    pub purple: Rgba,
    pub pink: Rgba,
    pub red: Rgba,
    pub orange: Rgba,
    pub yellow: Rgba,
    pub green: Rgba,
    pub graphite: Rgba,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeFillColors {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub tertiary: Rgba,
    pub quaternary: Rgba,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ThemeControlColors {
    pub disabled_background: Rgba,
    pub disabled_text: Rgba,
    pub border: Rgba,
}
