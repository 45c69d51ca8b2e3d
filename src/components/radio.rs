use std::time::Duration;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    StatefulInteractiveElement, Styled, Window, div, ease_out_quint, prelude::FluentBuilder, px,
    relative,
};
use gpui_motion::Interpolate;

use crate::{
    conditional_transition,
    primitives::FocusRing,
    theme::{CornerRadiusKind, ThemeExt},
    utils::{ElementIdExt, RgbaExt, checked_transition, disabled_transition},
};

const RADIO_SIZE: f32 = 16.;

/// Circular sibling of [`Checkbox`](crate::components::Checkbox). Groups are
/// owned at the call site; clicking the selected member is a no-op.
#[derive(IntoElement)]
pub struct RadioButton {
    id: ElementId,
    checked: bool,
    disabled: bool,
    on_select: Option<Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>>,
}

impl RadioButton {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            checked: false,
            disabled: false,
            on_select: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Fires with `true` when an unselected member is clicked. Never fires
    /// for the already selected member.
    pub fn on_select(
        mut self,
        on_select: impl Fn(&bool, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }
}

impl RenderOnce for RadioButton {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl gpui::IntoElement {
        let size = px(RADIO_SIZE);
        let corner_radius = CornerRadiusKind::Full.resolve(cx);
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let accent_color = colors.accents.blue;
        let background_color = colors.content_background;
        let border_color = colors.controls.border;
        let border_hover_color = border_color.lerp_to(&colors.label, 0.07);
        let border_press_color = border_color.lerp_to(&colors.label, 0.16);

        let checked_transition = checked_transition(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(285),
            self.checked,
        );

        let is_disabled = self.disabled;
        let is_checked = self.checked;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let is_press_state =
            window.use_keyed_state(self.id.with_suffix("state:press"), cx, |_window, _cx| false);
        let is_press = *is_press_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();
        let is_focus = focus_handle.is_focused(window);

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let border_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_focus => accent_color,
                is_press => border_press_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        )
        .with_easing(ease_out_quint());

        div()
            .id(self.id.clone())
            .relative()
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .size(size)
            .min_w(size)
            .min_h(size)
            .flex()
            .items_center()
            .justify_center()
            .opacity(disabled_transition.evaluate(window, cx))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .size_full()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border_1()
                    .border_color(border_color_transition.evaluate(window, cx)),
            )
            .map(|this| {
                let checked_delta = checked_transition.evaluate(window, cx);

                this.child(
                    div()
                        .absolute()
                        .top_0()
                        .left_0()
                        .size_full()
                        .rounded(corner_radius)
                        .bg(accent_color.alpha(checked_delta)),
                )
                .child(
                    div()
                        .size(relative(0.4))
                        .rounded(corner_radius)
                        .bg(gpui::rgb(0xffffff).alpha(checked_delta)),
                )
            })
            .when(!is_disabled, |this| {
                let is_hover_state_on_hover = is_hover_state.clone();
                let is_press_state_on_mouse_down = is_press_state.clone();
                let is_press_state_on_click = is_press_state.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state_on_hover.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state_on_hover.entity_id());
                })
                .on_mouse_down(gpui::MouseButton::Left, move |_, window, cx| {
                    // Keeps the focus ring from appearing on pointer clicks.
                    window.prevent_default();

                    is_press_state_on_mouse_down.update(cx, |this, _cx| *this = true);
                    cx.notify(is_press_state_on_mouse_down.entity_id());
                })
                .on_click({
                    move |_, window, cx| {
                        window.prevent_default();

                        if !is_focus {
                            window.blur();
                        }

                        is_press_state_on_click.update(cx, |this, _cx| *this = false);
                        cx.notify(is_press_state_on_click.entity_id());

                        if is_checked {
                            return;
                        }

                        if let Some(on_select) = self.on_select.as_ref() {
                            (on_select)(&true, window, cx)
                        }
                    }
                })
                .on_mouse_up_out(gpui::MouseButton::Left, move |_event, _window, cx| {
                    // A press that leaves the bounds and releases must not
                    // leave hover or press state stuck on.
                    is_hover_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_hover_state.entity_id());

                    is_press_state.update(cx, |this, _cx| *this = false);
                    cx.notify(is_press_state.entity_id());
                })
                .track_focus(&focus_handle)
            })
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveMode, Mode, Theme, ThemeExt};
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn test_radio_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let radio = RadioButton::new("choice-a");
            assert!(!radio.checked, "radio should start unselected");
            assert!(!radio.disabled, "radio should start enabled");
        });
    }

    #[gpui::test]
    fn test_radio_builder_chain(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let radio = RadioButton::new("choice-a")
                .checked(true)
                .disabled(true)
                .on_select(|_selected, _window, _cx| {});

            assert!(radio.checked);
            assert!(radio.disabled);
            assert!(radio.on_select.is_some());
        });
    }

    #[gpui::test]
    fn test_radio_group_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| RadioTestView { selected: 0 })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct RadioTestView {
        selected: usize,
    }

    impl gpui::Render for RadioTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .size_full()
                .flex()
                .gap(px(8.))
                .children((0..3).map(|index| {
                    RadioButton::new(("choice", index))
                        .checked(self.selected == index)
                        .on_select(cx.listener(move |view, _selected, _window, cx| {
                            view.selected = index;
                            cx.notify();
                        }))
                }))
        }
    }
}
