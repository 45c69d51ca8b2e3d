use gpui::{App, Window};

use crate::{
    components::popup_button,
    primitives::input,
    theme::{ActiveMode, LookupPolicy, Mode, Theme, ThemeExt},
};

/// Installs the built-in theme, light mode, the fallback color lookup policy
/// and the key bindings the controls rely on. Call once at application start.
pub fn init(cx: &mut App) {
    cx.set_theme(Theme::DEFAULT);
    cx.set_global(ActiveMode(Mode::Light));
    cx.set_global(LookupPolicy::Fallback);

    input::init(cx);
    popup_button::init(cx);
}

/// Per-window setup: aligns the rem size with the theme's base text size.
pub fn init_for_window(window: &mut Window, cx: &mut App) {
    window.set_rem_size(cx.get_theme().layout.text.base_size);
}
