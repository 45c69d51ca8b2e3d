use std::time::Duration;

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, ease_out_quint,
    prelude::FluentBuilder, px, relative, svg,
};
use gpui_motion::Interpolate;

use crate::{
    assets::CupertinoIconKind,
    conditional_transition,
    primitives::FocusRing,
    theme::{CornerRadiusKind, ThemeExt},
    utils::{ElementIdExt, RgbaExt, checked_transition, disabled_transition},
};

const CHECKBOX_SIZE: f32 = 16.;

#[derive(IntoElement)]
pub struct Checkbox {
    id: ElementId,
    icon: SharedString,
    checked: bool,
    disabled: bool,
    on_click: Option<Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>>,
}

impl Checkbox {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            icon: CupertinoIconKind::Checkmark.into(),
            checked: false,
            disabled: false,
            on_click: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(mut self, on_click: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    fn handle_on_click(
        window: &mut Window,
        cx: &mut App,
        checked: bool,
        on_click: Option<&Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>>,
    ) {
        if let Some(on_click) = on_click {
            (on_click)(&checked, window, cx)
        }
    }
}

impl RenderOnce for Checkbox {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl gpui::IntoElement {
        let size = px(CHECKBOX_SIZE);
        let corner_radius = CornerRadiusKind::Sm.resolve(cx);
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
                    svg()
                        .map(|mut this| {
                            this.style().aspect_ratio = Some(1.);
                            this
                        })
                        .size(relative(0.6))
                        .text_color(gpui::rgb(0xffffff).alpha(checked_delta))
                        .path(self.icon.clone()),
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

                        Self::handle_on_click(window, cx, !self.checked, self.on_click.as_ref());
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
    fn test_checkbox_creation(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let checkbox = Checkbox::new("agree");
            assert!(!checkbox.checked, "checkbox should start unchecked");
            assert!(!checkbox.disabled, "checkbox should start enabled");
        });
    }

    #[gpui::test]
    fn test_checkbox_builder_chain(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let checkbox = Checkbox::new("agree").checked(true).disabled(true);

            assert!(checkbox.checked, "checkbox should be checked");
            assert!(checkbox.disabled, "checkbox should be disabled");
        });
    }

    #[gpui::test]
    fn test_checkbox_on_click_callback(cx: &mut TestAppContext) {
        use std::cell::Cell;
        use std::rc::Rc;

        let clicked = Rc::new(Cell::new(false));

        cx.update(|_cx| {
            let clicked_clone = clicked.clone();

            let checkbox = Checkbox::new("agree").on_click(move |value, _window, _cx| {
                clicked_clone.set(*value);
            });

            assert!(
                checkbox.on_click.is_some(),
                "checkbox should carry its on_click callback"
            );
        });
    }

    #[gpui::test]
    fn test_checkbox_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| CheckboxTestView { checked: false })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct CheckboxTestView {
        checked: bool,
    }

    impl gpui::Render for CheckboxTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                Checkbox::new("agree")
                    .checked(self.checked)
                    .on_click(cx.listener(|view, checked, _window, cx| {
                        view.checked = *checked;
                        cx.notify();
                    })),
            )
        }
    }
}
