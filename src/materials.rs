//! Translucent chrome surfaces. Each material pairs a per-mode backdrop
//! color with a blur radius. GPUI has no backdrop-filter compositing, so the
//! blur radius is carried as resolved data and the translucent backdrop does
//! the visual work.

use gpui::{
    AnyElement, App, ElementId, IntoElement, ParentElement, Pixels, RenderOnce, Rgba, Window, div,
    prelude::*, px,
};

use crate::{
    theme::{Mode, ThemeExt},
    utils::{RgbaExt, rgb_a},
};

/// The chrome surfaces the system knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Titlebar,
    Sidebar,
    Popover,
    Menu,
    /// Heads-up overlay, dark in both modes.
    Hud,
    HeaderView,
    Sheet,
    /// Tooltip backdrop, dark in both modes.
    Tooltip,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 8] = [
        MaterialKind::Titlebar,
        MaterialKind::Sidebar,
        MaterialKind::Popover,
        MaterialKind::Menu,
        MaterialKind::Hud,
        MaterialKind::HeaderView,
        MaterialKind::Sheet,
        MaterialKind::Tooltip,
    ];

    /// Resolves the backdrop and blur for an appearance mode.
    pub fn appearance(self, mode: Mode) -> MaterialAppearance {
        let (light, dark, blur) = match self {
            MaterialKind::Titlebar => (rgb_a(0xf5f5f5, 0.7), rgb_a(0x282828, 0.6), 20.),
            MaterialKind::Sidebar => (rgb_a(0xf5f5f5, 0.6), rgb_a(0x282828, 0.5), 20.),
            MaterialKind::Popover => (rgb_a(0xffffff, 0.8), rgb_a(0x373737, 0.8), 24.),
            MaterialKind::Menu => (rgb_a(0xffffff, 0.8), rgb_a(0x373737, 0.8), 18.),
            MaterialKind::Hud => (rgb_a(0x464648, 0.8), rgb_a(0x464648, 0.8), 16.),
            MaterialKind::HeaderView => (rgb_a(0xf5f5f5, 0.6), rgb_a(0x282828, 0.5), 10.),
            MaterialKind::Sheet => (rgb_a(0xffffff, 0.9), rgb_a(0x373737, 0.9), 22.),
            MaterialKind::Tooltip => (rgb_a(0x464648, 0.9), rgb_a(0x464648, 0.9), 12.),
        };

        MaterialAppearance {
            backdrop: match mode {
                Mode::Light => light,
                Mode::Dark => dark,
            },
            blur_radius: px(blur),
        }
    }
}

/// A resolved material: what to paint and how much backdrop blur it wants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialAppearance {
    pub backdrop: Rgba,
    pub blur_radius: Pixels,
}

impl MaterialAppearance {
    /// The color content on this surface should use for primary text.
    pub fn label_color(&self, cx: &App) -> Rgba {
        let variants = &cx.get_theme().variants;

        if self.backdrop.is_light() {
            variants.for_mode(Mode::Light).colors.label
        } else {
            variants.for_mode(Mode::Dark).colors.label
        }
    }
}

/// Thickness of a vibrant material. Scales the backdrop alpha and blur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MaterialIntensity {
    /// More translucent, less blur.
    Thin,
    /// The material's own values, unchanged.
    #[default]
    Regular,
    /// More opaque, more blur.
    Thick,
}

impl MaterialIntensity {
    /// Applies the intensity to a resolved appearance.
    pub fn apply(self, appearance: MaterialAppearance) -> MaterialAppearance {
        match self {
            MaterialIntensity::Thin => MaterialAppearance {
                backdrop: appearance.backdrop.alpha(0.5),
                blur_radius: px(10.),
            },
            MaterialIntensity::Regular => appearance,
            MaterialIntensity::Thick => MaterialAppearance {
                backdrop: appearance.backdrop.alpha(0.9),
                blur_radius: px(30.),
            },
        }
    }
}

/// A container painted on a material backdrop. Content inherits the
/// surface's label color.
#[derive(IntoElement)]
pub struct Material {
    kind: MaterialKind,
    children: Vec<AnyElement>,
}

impl Material {
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }
}

impl ParentElement for Material {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Material {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let appearance = self.kind.appearance(cx.theme_mode());

        div()
            .bg(appearance.backdrop)
            .text_color(appearance.label_color(cx))
            .children(self.children)
    }
}

/// A material with adjustable intensity.
#[derive(IntoElement)]
pub struct VibrantMaterial {
    kind: MaterialKind,
    intensity: MaterialIntensity,
    children: Vec<AnyElement>,
}

impl VibrantMaterial {
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            kind,
            intensity: MaterialIntensity::default(),
            children: Vec::new(),
        }
    }

    pub fn intensity(mut self, intensity: MaterialIntensity) -> Self {
        self.intensity = intensity;
        self
    }
}

impl ParentElement for VibrantMaterial {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for VibrantMaterial {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let appearance = self
            .intensity
            .apply(self.kind.appearance(cx.theme_mode()));

        div()
            .bg(appearance.backdrop)
            .text_color(appearance.label_color(cx))
            .children(self.children)
    }
}

/// Full-window scrim behind modal surfaces. Clicking it dismisses the
/// overlay above it.
#[derive(IntoElement)]
pub struct BackdropVeil {
    id: ElementId,
    on_click: Option<Box<dyn Fn(&mut Window, &mut App) + 'static>>,
}

impl BackdropVeil {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            on_click: None,
        }
    }

    pub fn on_click(mut self, on_click: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl RenderOnce for BackdropVeil {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        div()
            .id(self.id)
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .bg(rgb_a(0x000000, 0.3))
            .when_some(self.on_click, |this, on_click| {
                this.on_click(move |_event, window, cx| on_click(window, cx))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_material_wants_positive_blur() {
        for kind in MaterialKind::ALL {
            for mode in [Mode::Light, Mode::Dark] {
                let appearance = kind.appearance(mode);
                assert!(
                    appearance.blur_radius > px(0.),
                    "{kind:?} should request blur in {mode:?} mode"
                );
            }
        }
    }

    #[test]
    fn backdrops_differ_between_modes_except_hud_surfaces() {
        for kind in MaterialKind::ALL {
            let light = kind.appearance(Mode::Light).backdrop;
            let dark = kind.appearance(Mode::Dark).backdrop;
            let same = light == dark;

            match kind {
                MaterialKind::Hud | MaterialKind::Tooltip => {
                    assert!(same, "{kind:?} should be dark in both modes");
                }
                _ => assert!(!same, "{kind:?} should adapt to the mode"),
            }
        }
    }

    #[test]
    fn thin_intensity_halves_alpha_and_blur() {
        let regular = MaterialKind::Popover.appearance(Mode::Light);
        let thin = MaterialIntensity::Thin.apply(regular);

        assert_eq!(thin.backdrop.a, 0.5, "thin should set alpha to 0.5");
        assert_eq!(thin.blur_radius, px(10.), "thin should set blur to 10px");
    }

    #[test]
    fn thick_intensity_raises_alpha_and_blur() {
        let regular = MaterialKind::Sidebar.appearance(Mode::Dark);
        let thick = MaterialIntensity::Thick.apply(regular);

        assert_eq!(thick.backdrop.a, 0.9, "thick should set alpha to 0.9");
        assert_eq!(thick.blur_radius, px(30.), "thick should set blur to 30px");
    }

    #[test]
    fn regular_intensity_is_identity() {
        let regular = MaterialKind::Menu.appearance(Mode::Light);
        assert_eq!(
            MaterialIntensity::Regular.apply(regular),
            regular,
            "regular intensity should leave the appearance untouched"
        );
    }

    #[test]
    fn hud_surfaces_take_light_labels() {
        let hud = MaterialKind::Hud.appearance(Mode::Light);
        assert!(
            !hud.backdrop.is_light(),
            "hud backdrop should be dark even in light mode"
        );
    }
}
