use gpui::{
    App, CursorStyle, ElementId, Entity, InteractiveElement, IntoElement, ParentElement,
    Refineable, RenderOnce, SharedString, StatefulInteractiveElement, StyleRefinement, Styled,
    Window, div, prelude::FluentBuilder, px,
};

use crate::{
    assets::CupertinoIconKind,
    components::Icon,
    primitives::{
        FocusRing,
        input::{TextField, TextFieldState},
    },
    theme::{CornerRadiusKind, TextStyleKind, ThemeExt},
    utils::{ElementIdExt, disabled_transition},
};

/// Bordered single-line text field. The caller owns the [`TextFieldState`]
/// entity and reads the value from it.
#[derive(IntoElement)]
pub struct TextInput {
    id: ElementId,
    state: Entity<TextFieldState>,
    placeholder: SharedString,
    disabled: bool,
    style: StyleRefinement,
}

impl Styled for TextInput {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl TextInput {
    pub fn new(id: impl Into<ElementId>, state: Entity<TextFieldState>) -> Self {
        Self {
            id: id.into(),
            state,
            placeholder: "".into(),
            disabled: false,
            style: StyleRefinement::default(),
        }
    }

    pub fn placeholder(mut self, text: impl Into<SharedString>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl RenderOnce for TextInput {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let corner_radius = CornerRadiusKind::Md.resolve(cx);
        let text_style = TextStyleKind::Body.resolve(cx);
        let focus_handle = self.state.read(cx).focus_handle.clone();

        let opacity = disabled_transition(self.id.clone(), window, cx, self.disabled)
            .evaluate(window, cx);

        div()
            .id(self.id.clone())
            .relative()
            .flex()
            .items_center()
            .w_full()
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .px(px(8.))
            .py(px(4.))
            .rounded(corner_radius)
            .bg(colors.content_background)
            .border_1()
            .border_color(colors.controls.border)
            .text_size(text_style.size)
            .opacity(opacity)
            .cursor(if self.disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::IBeam
            })
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle)
                    .rounded(corner_radius),
            )
            .child(
                TextField::new(self.id.with_suffix("field"), self.state)
                    .placeholder(self.placeholder)
                    .disabled(self.disabled),
            )
    }
}

/// Search variant of [`TextInput`]: pill shaped, with a leading magnifying
/// glass and a trailing clear affordance once there is text to clear.
#[derive(IntoElement)]
pub struct SearchInput {
    id: ElementId,
    state: Entity<TextFieldState>,
    placeholder: SharedString,
    disabled: bool,
    style: StyleRefinement,
}

impl Styled for SearchInput {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl SearchInput {
    pub fn new(id: impl Into<ElementId>, state: Entity<TextFieldState>) -> Self {
        Self {
            id: id.into(),
            state,
            placeholder: "Search".into(),
            disabled: false,
            style: StyleRefinement::default(),
        }
    }

    pub fn placeholder(mut self, text: impl Into<SharedString>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl RenderOnce for SearchInput {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let corner_radius = CornerRadiusKind::Full.resolve(cx);
        let text_style = TextStyleKind::Body.resolve(cx);
        let focus_handle = self.state.read(cx).focus_handle.clone();
        let has_text = !self.state.read(cx).value().is_empty();

        let opacity = disabled_transition(self.id.clone(), window, cx, self.disabled)
            .evaluate(window, cx);

        let clear_state = self.state.clone();

        div()
            .id(self.id.clone())
            .relative()
            .flex()
            .items_center()
            .gap(px(6.))
            .w_full()
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .px(px(8.))
            .py(px(4.))
            .rounded(corner_radius)
            .bg(colors.content_background)
            .border_1()
            .border_color(colors.controls.border)
            .text_size(text_style.size)
            .opacity(opacity)
            .cursor(if self.disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::IBeam
            })
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle)
                    .rounded(corner_radius),
            )
            .child(
                Icon::new(CupertinoIconKind::Search)
                    .size(px(12.))
                    .color(colors.secondary_label)
                    .flex_none(),
            )
            .child(
                TextField::new(self.id.with_suffix("field"), self.state)
                    .placeholder(self.placeholder)
                    .disabled(self.disabled),
            )
            .when(has_text && !self.disabled, |this| {
                this.child(
                    div()
                        .id(self.id.with_suffix("clear"))
                        .flex_none()
                        .cursor(CursorStyle::PointingHand)
                        .child(
                            Icon::new(CupertinoIconKind::XCircle)
                                .size(px(12.))
                                .color(colors.tertiary_label),
                        )
                        .on_click(move |_event, _window, cx| {
                            clear_state.update(cx, |state, cx| {
                                state.clear();
                                cx.notify();
                            });
                        }),
                )
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveMode, Mode, Theme, ThemeExt};
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn test_search_input_clear_empties_the_state(cx: &mut TestAppContext) {
        let state = cx.update(|cx| cx.new(|cx| TextFieldState::new(cx).initial_value("teapots")));

        cx.update(|cx| {
            assert_eq!(state.read(cx).value(), SharedString::from("teapots"));

            state.update(cx, |state, _cx| {
                state.clear();
            });

            assert!(
                state.read(cx).value().is_empty(),
                "clearing should leave an empty value"
            );
        });
    }

    #[gpui::test]
    fn test_inputs_render_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |_window, cx| {
                let name = cx.new(|cx| TextFieldState::new(cx));
                let query = cx.new(|cx| TextFieldState::new(cx).initial_value("mica"));

                cx.new(|_cx| InputTestView { name, query })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct InputTestView {
        name: Entity<TextFieldState>,
        query: Entity<TextFieldState>,
    }

    impl gpui::Render for InputTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .size_full()
                .flex()
                .flex_col()
                .gap(px(8.))
                .child(TextInput::new("name", self.name.clone()).placeholder("Name"))
                .child(SearchInput::new("search", self.query.clone()))
        }
    }
}
