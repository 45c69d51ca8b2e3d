#![allow(missing_docs)] // Derive macros generate undocumented methods.

use gpui::SharedString;

cfg_if::cfg_if!(
    if #[cfg(feature = "assets")] {
        use std::borrow::Cow;

        use gpui::Result;
        use rust_embed::RustEmbed;

        use crate::assets::assets::AssetProvider;

        /// Icon glyphs bundled with the crate.
        #[derive(RustEmbed)]
        #[folder = "assets/"]
        #[include = "icons/**/*.svg"]
        #[exclude = "*.DS_Store"]
        pub struct CupertinoAssets;

        impl AssetProvider for CupertinoAssets {
            fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
                <Self as RustEmbed>::get(path).map(|f| f.data)
            }

            fn list(&self, path: &str) -> Result<Vec<SharedString>> {
                Ok(CupertinoAssets::iter()
                    .filter_map(|p| p.starts_with(path).then(|| p.into()))
                    .collect())
            }
        }
    }
);

use enum_assoc::Assoc;

/// Built-in icon identifiers that map to bundled SVG assets.
#[derive(Assoc, Clone, Copy, PartialEq, Eq, Debug)]
#[func(pub fn path(&self) -> SharedString)]
pub enum CupertinoIconKind {
    /// Checkmark for checkboxes and selected menu rows.
    #[assoc(path = "icons/checkmark.svg".into())]
    Checkmark,

    /// Paired chevrons shown on popup buttons.
    #[assoc(path = "icons/chevron_up_down.svg".into())]
    ChevronUpDown,

    /// Single downward chevron for disclosure indicators.
    #[assoc(path = "icons/chevron_down.svg".into())]
    ChevronDown,

    /// Magnifying glass for search fields.
    #[assoc(path = "icons/search.svg".into())]
    Search,

    /// Filled circle with an x, used to clear a search field.
    #[assoc(path = "icons/x_circle.svg".into())]
    XCircle,

    /// Calendar glyph for date pickers.
    #[assoc(path = "icons/calendar.svg".into())]
    Calendar,

    #[assoc(path = "icons/plus.svg".into())]
    Plus,

    #[assoc(path = "icons/minus.svg".into())]
    Minus,

    /// Sidebar toggle shown in toolbars.
    #[assoc(path = "icons/sidebar.svg".into())]
    Sidebar,

    #[assoc(path = "icons/gear.svg".into())]
    Gear,
}

impl Into<SharedString> for CupertinoIconKind {
    fn into(self) -> SharedString {
        self.path()
    }
}
