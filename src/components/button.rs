use std::time::Duration;

use gpui::{
    App, ClickEvent, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement,
    Pixels, RenderOnce, Rgba, SharedString, StatefulInteractiveElement, Styled, Window, div,
    ease_out_quint, prelude::FluentBuilder, px,
};
use gpui_motion::{Interpolate, TransitionExt};

use crate::{
    components::Icon,
    conditional_transition,
    primitives::FocusRing,
    theme::{CornerRadiusKind, TextStyleKind, ThemeExt},
    utils::{ElementIdExt, RgbaExt, disabled_transition},
};

const HOVER_STRENGTH: f32 = 0.15;
const PRESS_STRENGTH: f32 = 0.35;

/// The three control sizes shared by buttons and the other compact controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ControlSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ControlSize {
    pub fn padding(self) -> Pixels {
        match self {
            ControlSize::Small => px(6.),
            ControlSize::Medium => px(8.),
            ControlSize::Large => px(10.),
        }
    }

    pub fn text_style(self) -> TextStyleKind {
        match self {
            ControlSize::Small => TextStyleKind::Footnote,
            ControlSize::Medium => TextStyleKind::Subhead,
            ControlSize::Large => TextStyleKind::Body,
        }
    }

    pub fn corner_radius(self) -> CornerRadiusKind {
        match self {
            ControlSize::Small => CornerRadiusKind::Sm,
            ControlSize::Medium | ControlSize::Large => CornerRadiusKind::Md,
        }
    }

    /// Side length of an icon-only button.
    pub fn icon_square(self) -> Pixels {
        match self {
            ControlSize::Small => px(24.),
            ControlSize::Medium => px(32.),
            ControlSize::Large => px(36.),
        }
    }
}

/// The visual treatments a button can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Accent-filled, the primary action treatment.
    #[default]
    Push,
    /// Transparent face with a control border.
    Bezel,
    /// Label only, tinted like a link.
    Text,
    /// Square glyph-only button.
    Icon,
    /// Pill-shaped with a subtle fill.
    Rounded,
}

/// Resolved face colors for one render of a button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonFace {
    pub background: Rgba,
    pub background_hover: Rgba,
    pub background_press: Rgba,
    pub text: Rgba,
    pub border: Option<Rgba>,
}

impl ButtonVariant {
    pub fn face(self, disabled: bool, cx: &App) -> ButtonFace {
        let colors = &cx.get_theme().variants.active(cx).colors;
        let window_background = colors.window_background;

        if disabled && self == ButtonVariant::Push {
            let background = colors.controls.disabled_background;
            return ButtonFace {
                background,
                background_hover: background,
                background_press: background,
                text: colors.controls.disabled_text,
                border: None,
            };
        }

        let face = match self {
            ButtonVariant::Push => {
                let accent = colors.accents.blue;
                ButtonFace {
                    background: accent,
                    background_hover: accent.lerp_to(&window_background, HOVER_STRENGTH),
                    background_press: accent.lerp_to(&window_background, PRESS_STRENGTH),
                    text: gpui::rgb(0xffffff).into(),
                    border: None,
                }
            }
            ButtonVariant::Bezel => ButtonFace {
                background: colors.label.alpha(0.),
                background_hover: colors.fills.quaternary,
                background_press: colors.fills.tertiary,
                text: colors.label,
                border: Some(colors.controls.border),
            },
            ButtonVariant::Text => ButtonFace {
                background: colors.link.alpha(0.),
                background_hover: colors.fills.quaternary,
                background_press: colors.fills.tertiary,
                text: colors.link,
                border: None,
            },
            ButtonVariant::Icon => ButtonFace {
                background: colors.label.alpha(0.),
                background_hover: colors.fills.quaternary,
                background_press: colors.fills.tertiary,
                text: colors.label,
                border: None,
            },
            ButtonVariant::Rounded => ButtonFace {
                background: colors.fills.secondary,
                background_hover: colors.fills.primary,
                background_press: colors.fills.primary,
                text: colors.label,
                border: None,
            },
        };

        if disabled {
            ButtonFace {
                text: colors.controls.disabled_text,
                ..face
            }
        } else {
            face
        }
    }
}

#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    label: Option<SharedString>,
    icon: Option<SharedString>,
    variant: ButtonVariant,
    size: ControlSize,
    disabled: bool,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl Button {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            icon: None,
            variant: ButtonVariant::default(),
            size: ControlSize::default(),
            disabled: false,
            on_click: None,
        }
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ControlSize) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl RenderOnce for Button {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let is_disabled = self.disabled;
        let face = self.variant.face(is_disabled, cx);

        let is_icon_only = self.variant == ButtonVariant::Icon;
        let padding = self.size.padding();
        let text_style = self.size.text_style().resolve(cx);
        let corner_radius = if self.variant == ButtonVariant::Rounded {
            CornerRadiusKind::Full.resolve(cx)
        } else {
            self.size.corner_radius().resolve(cx)
        };

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

        if is_focus && is_disabled {
            window.blur();
        }

        let opacity_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        let bg_transition = conditional_transition!(
            self.id.with_suffix("state:transition:bg"),
            window,
            cx,
            Duration::from_millis(250),
            {
                is_press || is_focus => face.background_press,
                is_hover => face.background_hover,
                _ => face.background
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
            .flex()
            .items_center()
            .justify_center()
            .gap(px(6.))
            .map(|this| {
                if is_icon_only {
                    this.size(self.size.icon_square())
                } else {
                    this.py(padding).px(padding * 2.)
                }
            })
            .rounded(corner_radius)
            .when_some(face.border, |this, border| {
                this.border_1().border_color(border)
            })
            .text_size(text_style.size)
            .text_color(face.text)
            .with_transitions(
                (opacity_transition, bg_transition),
                |_cx, this, (opacity, background)| this.opacity(opacity).bg(background),
            )
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius),
            )
            .when_some(self.icon.clone(), |this, icon| {
                let glyph = if is_icon_only {
                    self.size.icon_square() * 0.5
                } else {
                    px(14.)
                };
                this.child(Icon::new(icon).size(glyph).color(face.text).flex_none())
            })
            .when_some(self.label.clone(), |this, label| {
                this.child(div().overflow_hidden().text_ellipsis().child(label))
            })
            .when(!is_disabled, |this| {
                let is_hover_state_on_hover = is_hover_state.clone();
                let is_press_state_on_mouse_down = is_press_state.clone();
                let is_press_state_on_click = is_press_state.clone();
                let on_click = self.on_click;

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
                .on_click(move |event, window, cx| {
                    window.prevent_default();

                    if !is_focus {
                        window.blur();
                    }

                    is_press_state_on_click.update(cx, |this, _cx| *this = false);
                    cx.notify(is_press_state_on_click.entity_id());

                    if let Some(on_click) = on_click.as_ref() {
                        (on_click)(event, window, cx)
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

    fn install_defaults(cx: &mut App) {
        cx.set_theme(Theme::DEFAULT);
        cx.set_global(ActiveMode(Mode::Light));
    }

    #[gpui::test]
    fn test_control_size_steps(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert_eq!(ControlSize::Small.padding(), px(6.));
            assert_eq!(ControlSize::Medium.padding(), px(8.));
            assert_eq!(ControlSize::Large.padding(), px(10.));

            assert_eq!(ControlSize::Small.icon_square(), px(24.));
            assert_eq!(ControlSize::Medium.icon_square(), px(32.));
            assert_eq!(ControlSize::Large.icon_square(), px(36.));

            assert_eq!(ControlSize::Small.text_style(), TextStyleKind::Footnote);
            assert_eq!(ControlSize::Medium.text_style(), TextStyleKind::Subhead);
            assert_eq!(ControlSize::Large.text_style(), TextStyleKind::Body);

            assert_eq!(ControlSize::Small.corner_radius(), CornerRadiusKind::Sm);
            assert_eq!(ControlSize::Medium.corner_radius(), CornerRadiusKind::Md);
            assert_eq!(ControlSize::Large.corner_radius(), CornerRadiusKind::Md);
        });
    }

    #[gpui::test]
    fn test_push_face_uses_the_accent(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let face = ButtonVariant::Push.face(false, cx);
            let accent = cx.get_theme().variants.active(cx).colors.accents.blue;

            assert_eq!(face.background, accent, "push face should fill with accent");
            assert_eq!(face.text.r, 1., "push label should be white");
            assert!(face.border.is_none(), "push face has no border");
        });
    }

    #[gpui::test]
    fn test_disabled_push_face_uses_disabled_controls(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let face = ButtonVariant::Push.face(true, cx);
            let controls = cx
                .get_theme()
                .variants
                .active(cx)
                .colors
                .controls
                .clone();

            assert_eq!(face.background, controls.disabled_background);
            assert_eq!(face.text, controls.disabled_text);
            assert_eq!(
                face.background_hover, face.background,
                "a disabled face should not react to hover"
            );
        });
    }

    #[gpui::test]
    fn test_bezel_face_carries_a_border(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let face = ButtonVariant::Bezel.face(false, cx);
            assert!(face.border.is_some(), "bezel face should have a border");
            assert_eq!(face.background.a, 0., "bezel face starts transparent");
        });
    }

    #[gpui::test]
    fn test_text_face_tints_like_a_link(cx: &mut TestAppContext) {
        cx.update(|cx| {
            install_defaults(cx);

            let face = ButtonVariant::Text.face(false, cx);
            let link = cx.get_theme().variants.active(cx).colors.link;

            assert_eq!(face.text, link, "text variant label should use link color");
            assert!(face.border.is_none());
        });
    }

    #[gpui::test]
    fn test_button_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            install_defaults(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| ButtonTestView)
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct ButtonTestView;

    impl gpui::Render for ButtonTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            gpui::div()
                .size_full()
                .child(Button::new("ok").label("OK"))
                .child(
                    Button::new("cancel")
                        .label("Cancel")
                        .variant(ButtonVariant::Bezel)
                        .size(ControlSize::Small),
                )
                .child(
                    Button::new("gear")
                        .icon("icons/gear.svg")
                        .variant(ButtonVariant::Icon)
                        .disabled(true),
                )
        }
    }
}
