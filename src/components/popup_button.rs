use std::{rc::Rc, time::Duration};

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, KeyBinding, MouseButton,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, actions,
    div, ease_out_quint, prelude::FluentBuilder, px, radians,
};
use gpui_motion::Interpolate;
use indexmap::IndexMap;

use crate::{
    assets::CupertinoIconKind,
    components::Icon,
    conditional_transition,
    extensions::{Deferrable, DeferredConfig},
    materials::{Material, MaterialKind},
    primitives::FocusRing,
    theme::{CornerRadiusKind, TextStyleKind, ThemeExt, ZLayerKind},
    utils::{ElementIdExt, disabled_transition},
};

actions!(popup_menu, [MoveUp, MoveDown, Confirm, Cancel]);

/// Installs the popup menu key bindings. Called from [`crate::init`].
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("up", MoveUp, Some("PopupButton")),
        KeyBinding::new("down", MoveDown, Some("PopupButton")),
        KeyBinding::new("enter", Confirm, Some("PopupButton")),
        KeyBinding::new("escape", Cancel, Some("PopupButton")),
    ]);
}

/// One row of a [`PopupButton`] menu.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupOption {
    pub label: SharedString,
    pub value: SharedString,
}

impl PopupOption {
    pub fn new(label: impl Into<SharedString>, value: impl Into<SharedString>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Controlled dropdown. The menu opens while the control holds focus, so a
/// click anywhere else dismisses it. Later options with a duplicate value
/// are dropped.
#[derive(IntoElement)]
pub struct PopupButton {
    id: ElementId,
    options: Vec<PopupOption>,
    value: Option<SharedString>,
    disabled: bool,
    on_change: Option<Rc<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>>,
    deferred_config: DeferredConfig,
}

impl PopupButton {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            options: Vec::new(),
            value: None,
            disabled: false,
            on_change: None,
            deferred_config: DeferredConfig::default(),
        }
    }

    pub fn options(mut self, options: impl IntoIterator<Item = PopupOption>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn option(mut self, option: PopupOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    /// First-wins keyed view of the options, in declaration order.
    fn options_by_value(&self) -> IndexMap<SharedString, PopupOption> {
        let mut map = IndexMap::with_capacity(self.options.len());

        for option in &self.options {
            map.entry(option.value.clone()).or_insert_with(|| option.clone());
        }

        map
    }
}

impl Deferrable for PopupButton {
    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for PopupButton {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let corner_radius = CornerRadiusKind::Md.resolve(cx);
        let text_style = TextStyleKind::Subhead.resolve(cx);
        let accent_color = colors.accents.blue;
        let border_color = colors.controls.border;
        let border_hover_color = border_color.lerp_to(&colors.label, 0.07);

        self.deferred_config
            .priority
            .get_or_insert(ZLayerKind::Popover.priority(cx));

        let options = Rc::new(self.options_by_value());
        let selected_label = self
            .value
            .as_ref()
            .and_then(|value| options.get(value))
            .map(|option| option.label.clone());
        let selected_index = self
            .value
            .as_ref()
            .and_then(|value| options.get_index_of(value));

        let is_disabled = self.disabled;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle = window
            .use_keyed_state(
                self.id.with_suffix("state:focus_handle"),
                cx,
                |_window, cx| cx.focus_handle().tab_stop(true),
            )
            .read(cx)
            .clone();

        // contains_focused keeps the menu up while a row inside it is focused.
        let is_open = focus_handle.contains_focused(window, cx);

        if is_disabled && is_open {
            window.blur();
        }

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        let border_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_open => accent_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        )
        .with_easing(ease_out_quint());

        let open_transition = conditional_transition!(
            self.id.with_suffix("state:transition:open"),
            window,
            cx,
            Duration::from_millis(200),
            {
                is_open => 1.,
                _ => 0.
            }
        )
        .with_easing(ease_out_quint());
        let open_delta = open_transition.evaluate(window, cx);

        let highlighted_state = window.use_keyed_state(
            self.id.with_suffix("state:highlighted"),
            cx,
            |_window, _cx| None::<usize>,
        );

        let was_open_state =
            window.use_keyed_state(self.id.with_suffix("state:was_open"), cx, |_window, _cx| {
                false
            });

        if is_open != *was_open_state.read(cx) {
            was_open_state.update(cx, |this, _cx| *this = is_open);

            if is_open {
                // Fresh presentation starts highlighting from the selection.
                highlighted_state.update(cx, |this, _cx| *this = selected_index);
            }
        }

        let option_count = options.len();

        div()
            .id(self.id.clone())
            .relative()
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .key_context("PopupButton")
            .flex()
            .flex_col()
            .opacity(disabled_transition.evaluate(window, cx))
            .text_size(text_style.size)
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .child(
                div()
                    .w_full()
                    .flex()
                    .items_center()
                    .justify_between()
                    .gap(px(8.))
                    .px(px(8.))
                    .py(px(4.))
                    .rounded(corner_radius)
                    .bg(colors.content_background)
                    .border_1()
                    .border_color(border_color_transition.evaluate(window, cx))
                    .text_color(colors.label)
                    .map(|this| match selected_label {
                        Some(label) => this.child(label),
                        None => this
                            .text_color(colors.placeholder_text)
                            .child("No selection"),
                    })
                    .child(
                        Icon::new(CupertinoIconKind::ChevronDown)
                            .size(px(11.))
                            .color(colors.secondary_label)
                            .rotate(radians(open_delta * std::f32::consts::PI)),
                    ),
            )
            .when(open_delta > 0., |this| {
                let menu = div()
                    .id(self.id.with_suffix("menu"))
                    .absolute()
                    .top_full()
                    .left_0()
                    .w_full()
                    .mt(px(4.))
                    .opacity(open_delta)
                    .rounded(corner_radius)
                    .overflow_hidden()
                    .border_1()
                    .border_color(colors.separator)
                    .child(
                        Material::new(MaterialKind::Popover).child(
                            div().flex().flex_col().p(px(4.)).children(
                                options.values().enumerate().map(|(index, option)| {
                                let is_selected = Some(index) == selected_index;
                                let is_highlighted =
                                    Some(index) == *highlighted_state.read(cx);

                                let on_change = self.on_change.clone();
                                let value = option.value.clone();
                                let highlighted_state = highlighted_state.clone();

                                div()
                                    .id(self.id.with_suffix("option").with_suffix(index.to_string()))
                                    .flex()
                                    .items_center()
                                    .gap(px(6.))
                                    .px(px(6.))
                                    .py(px(3.))
                                    .rounded(corner_radius - px(4.))
                                    .text_color(colors.label)
                                    .when(is_highlighted, |this| {
                                        this.bg(accent_color).text_color(gpui::white())
                                    })
                                    .child(
                                        // Unselected rows keep a transparent checkmark so
                                        // labels stay aligned.
                                        Icon::new(CupertinoIconKind::Checkmark)
                                            .size(px(10.))
                                            .color(if !is_selected {
                                                gpui::transparent_black()
                                            } else if is_highlighted {
                                                gpui::white()
                                            } else {
                                                colors.label.into()
                                            }),
                                    )
                                    .child(option.label.clone())
                                    .on_hover(move |hovered, _window, cx| {
                                        if *hovered {
                                            highlighted_state.update(cx, |this, cx| {
                                                *this = Some(index);
                                                cx.notify();
                                            });
                                        }
                                    })
                                    .on_mouse_down(MouseButton::Left, |_event, window, _cx| {
                                        window.prevent_default();
                                    })
                                    .on_click(move |_event, window, cx| {
                                        window.blur();

                                        if let Some(on_change) = on_change.as_ref() {
                                            (on_change)(&value, window, cx)
                                        }
                                    })
                                }),
                            ),
                        ),
                    );

                this.child(self.apply_deferred(menu))
            })
            .when(!is_disabled, |this| {
                let focus_handle_on_mouse_down = focus_handle.clone();
                let highlighted_for_up = highlighted_state.clone();
                let highlighted_for_down = highlighted_state.clone();
                let highlighted_for_confirm = highlighted_state.clone();
                let options_for_confirm = options.clone();
                let on_change = self.on_change.clone();

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, cx| {
                        *this = *hover;
                        cx.notify();
                    });
                })
                .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                    window.prevent_default();

                    if focus_handle_on_mouse_down.contains_focused(window, cx) {
                        window.blur();
                    } else {
                        focus_handle_on_mouse_down.focus(window);
                    }
                })
                .on_action(move |_: &MoveUp, _window, cx| {
                    highlighted_for_up.update(cx, |this, cx| {
                        *this = Some(match *this {
                            Some(index) if index > 0 => index - 1,
                            Some(index) => index,
                            None => option_count.saturating_sub(1),
                        });
                        cx.notify();
                    });
                })
                .on_action(move |_: &MoveDown, _window, cx| {
                    highlighted_for_down.update(cx, |this, cx| {
                        *this = Some(match *this {
                            Some(index) => (index + 1).min(option_count.saturating_sub(1)),
                            None => 0,
                        });
                        cx.notify();
                    });
                })
                .on_action(move |_: &Confirm, window, cx| {
                    let highlighted = *highlighted_for_confirm.read(cx);

                    window.blur();

                    if let Some((_, option)) =
                        highlighted.and_then(|index| options_for_confirm.get_index(index))
                    {
                        if let Some(on_change) = on_change.as_ref() {
                            (on_change)(&option.value.clone(), window, cx)
                        }
                    }
                })
                .on_action(move |_: &Cancel, window, _cx| {
                    window.blur();
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

    fn fruit_options() -> Vec<PopupOption> {
        vec![
            PopupOption::new("Apple", "apple"),
            PopupOption::new("Banana", "banana"),
            PopupOption::new("Cherry", "cherry"),
        ]
    }

    #[gpui::test]
    fn test_popup_button_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let popup = PopupButton::new("fruit");
            assert!(popup.options.is_empty());
            assert!(popup.value.is_none(), "popup should start with no selection");
            assert!(!popup.disabled);
        });
    }

    #[gpui::test]
    fn test_popup_button_keeps_option_order(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let popup = PopupButton::new("fruit").options(fruit_options());
            let by_value = popup.options_by_value();

            let labels: Vec<_> = by_value.values().map(|o| o.label.clone()).collect();
            assert_eq!(
                labels,
                vec![
                    SharedString::from("Apple"),
                    SharedString::from("Banana"),
                    SharedString::from("Cherry")
                ],
                "menu order should follow declaration order"
            );
        });
    }

    #[gpui::test]
    fn test_popup_button_drops_duplicate_values(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let popup = PopupButton::new("fruit")
                .options(fruit_options())
                .option(PopupOption::new("Apple again", "apple"));

            let by_value = popup.options_by_value();
            assert_eq!(by_value.len(), 3, "duplicate value should be dropped");
            assert_eq!(
                by_value.get("apple").map(|o| o.label.clone()),
                Some(SharedString::from("Apple")),
                "the first occurrence should win"
            );
        });
    }

    #[gpui::test]
    fn test_popup_button_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));
            init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| PopupTestView {
                    value: "banana".into(),
                })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct PopupTestView {
        value: SharedString,
    }

    impl gpui::Render for PopupTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                PopupButton::new("fruit")
                    .options(fruit_options())
                    .value(self.value.clone())
                    .on_change(cx.listener(|view, value: &SharedString, _window, cx| {
                        view.value = value.clone();
                        cx.notify();
                    })),
            )
        }
    }
}
