use gpui::{
    Edges, Hsla, IntoElement, Length, Radians, RenderOnce, SharedString, SizeRefinement, Styled,
    Transformation, prelude::FluentBuilder, px, relative, svg,
};

use crate::theme::ThemeExt;

/// An SVG glyph with configurable size, color and rotation. Defaults to the
/// active variant's label color.
#[derive(IntoElement)]
pub struct Icon {
    path: SharedString,
    pub(crate) size: SizeRefinement<Length>,
    rotate: Radians,
    color: Option<Hsla>,
    flex_grow: Option<f32>,
    flex_shrink: Option<f32>,
    flex_basis: Option<Length>,
    margin: Edges<Option<Length>>,
}

impl Icon {
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            size: SizeRefinement::default(),
            rotate: Radians(0.),
            color: None,
            flex_grow: None,
            flex_shrink: None,
            flex_basis: None,
            margin: Edges::default(),
        }
    }

    /// Sets uniform width and height.
    pub fn size(mut self, size: impl Into<Length>) -> Self {
        let size = size.into();
        self.size = SizeRefinement {
            width: Some(size),
            height: Some(size),
        };
        self
    }

    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn rotate(mut self, rotate: impl Into<Radians>) -> Self {
        self.rotate = rotate.into();
        self
    }

    pub fn ml(mut self, margin: impl Into<Length>) -> Self {
        self.margin.left = Some(margin.into());
        self
    }

    pub fn mr(mut self, margin: impl Into<Length>) -> Self {
        self.margin.right = Some(margin.into());
        self
    }

    /// Grow and shrink as needed, ignoring the initial size.
    pub fn flex_1(mut self) -> Self {
        self.flex_grow = Some(1.);
        self.flex_shrink = Some(1.);
        self.flex_basis = Some(relative(0.).into());
        self
    }

    /// Keep the glyph at its configured size inside a flex row.
    pub fn flex_none(mut self) -> Self {
        self.flex_grow = Some(0.);
        self.flex_shrink = Some(0.);
        self
    }
}

impl RenderOnce for Icon {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let label_color = cx.get_theme().variants.active(cx).colors.label;
        let size = self.size;
        let width = size.width.unwrap_or(px(14.).into());
        let height = size.height.unwrap_or(px(14.).into());

        svg()
            .path(self.path)
            .text_color(label_color)
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .when_some(self.margin.left, |this, v| this.ml(v))
            .when_some(self.margin.right, |this, v| this.mr(v))
            .with_transformation(Transformation::rotate(self.rotate))
            .when_some(self.color, |this, color| this.text_color(color))
            .when_some(self.flex_grow, |mut this, value| {
                this.style().flex_grow = Some(value);
                this
            })
            .when_some(self.flex_shrink, |mut this, value| {
                this.style().flex_shrink = Some(value);
                this
            })
            .when_some(self.flex_basis, |this, value| this.flex_basis(value))
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveMode, Mode, Theme, ThemeExt};
    use gpui::{AppContext, ParentElement, TestAppContext, VisualTestContext, hsla};

    #[gpui::test]
    fn test_icon_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let icon = Icon::new("icons/gear.svg");
            assert_eq!(icon.path, SharedString::from("icons/gear.svg"));
            assert!(icon.color.is_none(), "icon should start with no color");
            assert_eq!(icon.rotate.0, 0.0, "icon should start unrotated");
        });
    }

    #[gpui::test]
    fn test_icon_builder_chain(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let color = hsla(0.5, 0.5, 0.5, 1.0);
            let icon = Icon::new("icons/gear.svg")
                .size(px(32.))
                .color(color)
                .rotate(Radians(1.5));

            assert!(icon.size.width.is_some());
            assert!(icon.color.is_some());
            assert_eq!(icon.rotate.0, 1.5);
        });
    }

    #[gpui::test]
    fn test_icon_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| IconTestView))
                .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct IconTestView;

    impl gpui::Render for IconTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            gpui::div()
                .size_full()
                .child(Icon::new("icons/gear.svg").size(px(24.)))
        }
    }
}
