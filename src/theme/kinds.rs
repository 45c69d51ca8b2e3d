#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::App;

use crate::theme::{ThemeExt, ThemeTextStyle};

/// Text styles from the type ramp.
///
/// Use `resolve()` to get the full style record from the current theme.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> ThemeTextStyle)]
pub enum TextStyleKind {
    /// Prominent first-level heading.
    #[assoc(resolve = cx.get_theme().typography.styles.title1.clone())]
    Title1,
    /// Second-level heading.
    #[assoc(resolve = cx.get_theme().typography.styles.title2.clone())]
    Title2,
    /// Third-level heading.
    #[assoc(resolve = cx.get_theme().typography.styles.title3.clone())]
    Title3,
    /// Emphasized copy at body size.
    #[assoc(resolve = cx.get_theme().typography.styles.headline.clone())]
    Headline,
    /// Standard body text.
    #[assoc(resolve = cx.get_theme().typography.styles.body.clone())]
    Body,
    /// Slightly smaller than body, for supporting copy.
    #[assoc(resolve = cx.get_theme().typography.styles.callout.clone())]
    Callout,
    /// Compact control and list text.
    #[assoc(resolve = cx.get_theme().typography.styles.subhead.clone())]
    Subhead,
    /// Small annotations.
    #[assoc(resolve = cx.get_theme().typography.styles.footnote.clone())]
    Footnote,
    /// Caption text.
    #[assoc(resolve = cx.get_theme().typography.styles.caption1.clone())]
    Caption1,
    /// The smallest caption size.
    #[assoc(resolve = cx.get_theme().typography.styles.caption2.clone())]
    Caption2,
    /// Monospaced code text.
    #[assoc(resolve = cx.get_theme().typography.styles.code.clone())]
    Code,
}

/// Corner radius steps that resolve to theme-defined values.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum CornerRadiusKind {
    #[assoc(resolve = cx.get_theme().layout.corner_radii.none)]
    None,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.sm)]
    Sm,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.xxl)]
    Xxl,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.xxxl)]
    Xxxl,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.full)]
    Full,
}

/// Stacking layers. `priority()` feeds deferred overlay rendering so layers
/// composite in the documented order.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn priority(&self, cx: &App) -> usize)]
pub enum ZLayerKind {
    #[assoc(priority = cx.get_theme().layout.z_index.modal)]
    Modal,
    #[assoc(priority = cx.get_theme().layout.z_index.sticky)]
    Sticky,
    #[assoc(priority = cx.get_theme().layout.z_index.fixed)]
    Fixed,
    #[assoc(priority = cx.get_theme().layout.z_index.overlay)]
    Overlay,
    #[assoc(priority = cx.get_theme().layout.z_index.drawer)]
    Drawer,
    #[assoc(priority = cx.get_theme().layout.z_index.modal_overlay)]
    ModalOverlay,
    #[assoc(priority = cx.get_theme().layout.z_index.popover)]
    Popover,
    #[assoc(priority = cx.get_theme().layout.z_index.skip_link)]
    SkipLink,
    #[assoc(priority = cx.get_theme().layout.z_index.toast)]
    Toast,
    #[assoc(priority = cx.get_theme().layout.z_index.tooltip)]
    Tooltip,
}

/// Translucent fill colors from the active variant.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum FillKind {
    /// The most prominent fill, for thin and small shapes.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.fills.primary)]
    Primary,
    /// Fill for medium-size shapes.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.fills.secondary)]
    Secondary,
    /// Fill for large shapes.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.fills.tertiary)]
    Tertiary,
    /// The subtlest fill, for large areas.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.fills.quaternary)]
    Quaternary,
}

/// Named accent colors, identical in both modes.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum AccentKind {
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.blue)]
    Blue,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.purple)]
    Purple,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.pink)]
    Pink,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.red)]
    Red,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.orange)]
    Orange,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.yellow)]
    Yellow,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.green)]
    Green,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accents.graphite)]
    Graphite,
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveMode, Mode, Theme, ThemeExt};
    use gpui::TestAppContext;

    fn install_defaults(cx: &mut gpui::App) {
        cx.set_theme(Theme::DEFAULT);
        cx.set_global(ActiveMode(Mode::Light));
    }

    #[gpui::test]
    fn test_text_style_kind_variants(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            for kind in [
                TextStyleKind::Title1,
                TextStyleKind::Title2,
                TextStyleKind::Title3,
                TextStyleKind::Headline,
                TextStyleKind::Body,
                TextStyleKind::Callout,
                TextStyleKind::Subhead,
                TextStyleKind::Footnote,
                TextStyleKind::Caption1,
                TextStyleKind::Caption2,
                TextStyleKind::Code,
            ] {
                let style = kind.resolve(cx);
                assert!(style.weight >= 400., "{kind:?} should carry a real weight");
                assert!(style.line_height >= 1., "{kind:?} line height should be >= 1");
            }
        });
    }

    #[gpui::test]
    fn test_type_ramp_ordering(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let title1 = TextStyleKind::Title1.resolve(cx).size;
            let body = TextStyleKind::Body.resolve(cx).size;
            let caption2 = TextStyleKind::Caption2.resolve(cx).size;
            let rem = cx.get_theme().layout.text.base_size;

            assert!(
                title1.to_pixels(rem) > body.to_pixels(rem),
                "Title1 should be larger than body"
            );
            assert!(
                body.to_pixels(rem) > caption2.to_pixels(rem),
                "Body should be larger than caption2"
            );
        });
    }

    #[gpui::test]
    fn test_corner_radius_ordering(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let sm = CornerRadiusKind::Sm.resolve(cx);
            let md = CornerRadiusKind::Md.resolve(cx);
            let lg = CornerRadiusKind::Lg.resolve(cx);
            let xl = CornerRadiusKind::Xl.resolve(cx);

            assert!(sm <= md, "Sm should be <= Md");
            assert!(md <= lg, "Md should be <= Lg");
            assert!(lg <= xl, "Lg should be <= Xl");
        });
    }

    #[gpui::test]
    fn test_z_layer_contract_is_ascending(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let layers = [
                ZLayerKind::Modal,
                ZLayerKind::Sticky,
                ZLayerKind::Fixed,
                ZLayerKind::Overlay,
                ZLayerKind::Drawer,
                ZLayerKind::ModalOverlay,
                ZLayerKind::Popover,
                ZLayerKind::SkipLink,
                ZLayerKind::Toast,
                ZLayerKind::Tooltip,
            ];

            for pair in layers.windows(2) {
                assert!(
                    pair[0].priority(cx) < pair[1].priority(cx),
                    "{:?} should stack below {:?}",
                    pair[0],
                    pair[1]
                );
            }
        });
    }

    #[gpui::test]
    fn test_fill_kinds_are_translucent(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            for kind in [
                FillKind::Primary,
                FillKind::Secondary,
                FillKind::Tertiary,
                FillKind::Quaternary,
            ] {
                let fill = kind.resolve(cx);
                assert!(fill.a > 0., "{kind:?} should be visible");
                assert!(fill.a < 1., "{kind:?} should be translucent");
            }
        });
    }

    #[gpui::test]
    fn test_accent_kinds_resolve(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            for kind in [
                AccentKind::Blue,
                AccentKind::Purple,
                AccentKind::Pink,
                AccentKind::Red,
                AccentKind::Orange,
                AccentKind::Yellow,
                AccentKind::Green,
                AccentKind::Graphite,
            ] {
                let accent = kind.resolve(cx);
                assert_eq!(accent.a, 1., "{kind:?} should be opaque");
            }
        });
    }
}
