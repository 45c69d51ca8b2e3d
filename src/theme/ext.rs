use gpui::{App, Rgba};

use super::resolver::{LookupPolicy, Mode};
use super::schema::{ActiveMode, Theme};

/// Extension trait for the global theme state. The only mutation path for
/// the theme, the appearance mode, and the color lookup policy.
pub trait ThemeExt {
    /// Changes the theme.
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T);

    /// Gets an immutable reference to the theme.
    fn get_theme(&self) -> &Theme;

    /// The active appearance mode.
    fn theme_mode(&self) -> Mode;

    /// Switches the appearance mode.
    fn set_theme_mode(&mut self, mode: Mode);

    /// Flips between light and dark. Applying it twice restores the mode.
    fn toggle_theme_mode(&mut self);

    /// How unknown color role names resolve.
    fn lookup_policy(&self) -> LookupPolicy;

    /// Changes the lookup policy for unknown color role names.
    fn set_lookup_policy(&mut self, policy: LookupPolicy);

    /// Resolves a role name against the active theme and mode. This
    /// convenience is total even under the strict policy; callers wanting
    /// the error go through [`Theme::resolve_color`] directly.
    fn resolve_color(&self, role: &str) -> Rgba;
}

impl ThemeExt for App {
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T) {
        self.set_global::<Theme>(theme.as_ref().clone())
    }

    fn get_theme(&self) -> &Theme {
        self.global()
    }

    fn theme_mode(&self) -> Mode {
        self.global::<ActiveMode>().0
    }

    fn set_theme_mode(&mut self, mode: Mode) {
        self.set_global(ActiveMode(mode));
    }

    fn toggle_theme_mode(&mut self) {
        let mode = self.theme_mode().toggled();
        self.set_theme_mode(mode);
    }

    fn lookup_policy(&self) -> LookupPolicy {
        *self.global::<LookupPolicy>()
    }

    fn set_lookup_policy(&mut self, policy: LookupPolicy) {
        self.set_global(policy);
    }

    fn resolve_color(&self, role: &str) -> Rgba {
        self.get_theme()
            .resolve_color(role, self.theme_mode(), self.lookup_policy())
            .unwrap_or(super::resolver::FALLBACK_COLOR)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::FALLBACK_COLOR;
    use gpui::TestAppContext;

    fn install_defaults(cx: &mut gpui::App) {
        cx.set_theme(Theme::DEFAULT);
        cx.set_global(ActiveMode(Mode::Light));
        cx.set_global(LookupPolicy::Fallback);
    }

    #[gpui::test]
    fn test_set_and_get_theme(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let theme = cx.get_theme();
            assert!(!theme.name.is_empty(), "Theme should have a name");
        });
    }

    #[gpui::test]
    fn test_default_mode_is_light(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);
            assert_eq!(cx.theme_mode(), Mode::Light, "Default mode should be light");
        });
    }

    #[gpui::test]
    fn test_toggle_mode_is_involutive(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            cx.toggle_theme_mode();
            assert_eq!(cx.theme_mode(), Mode::Dark, "First toggle should switch to dark");

            cx.toggle_theme_mode();
            assert_eq!(
                cx.theme_mode(),
                Mode::Light,
                "Second toggle should restore light"
            );
        });
    }

    #[gpui::test]
    fn test_active_variant_follows_mode(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let light_label = cx.get_theme().variants.active(cx).colors.label;
            cx.set_theme_mode(Mode::Dark);
            let dark_label = cx.get_theme().variants.active(cx).colors.label;

            assert!(
                light_label.r != dark_label.r,
                "Label color should track the active mode"
            );
        });
    }

    #[gpui::test]
    fn test_resolve_color_honors_fallback_policy(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let resolved = cx.resolve_color("doesNotExist");
            assert_eq!(resolved.r, FALLBACK_COLOR.r, "Unknown roles should fall back");
            assert_eq!(resolved.a, FALLBACK_COLOR.a, "Fallback should be opaque");
        });
    }

    #[gpui::test]
    fn test_strict_policy_is_installable(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            cx.set_lookup_policy(LookupPolicy::Strict);
            assert_eq!(
                cx.lookup_policy(),
                LookupPolicy::Strict,
                "Policy change should stick"
            );

            let err = cx
                .get_theme()
                .resolve_color("doesNotExist", cx.theme_mode(), cx.lookup_policy())
                .expect_err("strict policy should surface unknown roles");
            assert!(
                err.to_string().contains("doesNotExist"),
                "Error should name the role"
            );
        });
    }

    #[gpui::test]
    fn test_theme_as_ref(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let theme = Theme::DEFAULT;
            let theme_ref: &Theme = theme.as_ref();
            assert!(!theme_ref.name.is_empty(), "Theme ref should have a name");

            cx.set_theme(Theme::DEFAULT);
            let retrieved = cx.get_theme();
            assert_eq!(retrieved.name, theme.name, "Theme names should match");
        });
    }
}
