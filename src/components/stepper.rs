use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};

use crate::{
    assets::CupertinoIconKind,
    components::Icon,
    theme::{CornerRadiusKind, ThemeExt},
    utils::{DISABLED_OPACITY, ElementIdExt, disabled_transition},
};

/// Paired increment/decrement control for a numeric value. A press that
/// would leave the `min..=max` range is a complete no-op: no callback, and
/// the segment renders disabled.
#[derive(IntoElement)]
pub struct Stepper {
    id: ElementId,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    disabled: bool,
    on_change: Option<Box<dyn Fn(&f64, &mut Window, &mut App) + 'static>>,
}

impl Stepper {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            value: 0.,
            min: f64::MIN,
            max: f64::MAX,
            step: 1.,
            disabled: false,
            on_change: None,
        }
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&f64, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Whether one more increment stays within `max`.
    pub fn can_increment(&self) -> bool {
        self.value + self.step <= self.max
    }

    /// Whether one more decrement stays within `min`.
    pub fn can_decrement(&self) -> bool {
        self.value - self.step >= self.min
    }
}

struct Segment {
    id: ElementId,
    icon: CupertinoIconKind,
    enabled: bool,
}

impl RenderOnce for Stepper {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let corner_radius = CornerRadiusKind::Sm.resolve(cx);
        let opacity = disabled_transition(self.id.clone(), window, cx, self.disabled)
            .evaluate(window, cx);

        let increment = Segment {
            id: self.id.with_suffix("increment"),
            icon: CupertinoIconKind::Plus,
            enabled: !self.disabled && self.can_increment(),
        };
        let decrement = Segment {
            id: self.id.with_suffix("decrement"),
            icon: CupertinoIconKind::Minus,
            enabled: !self.disabled && self.can_decrement(),
        };

        let on_change = self.on_change.map(std::rc::Rc::new);
        let value = self.value;
        let step = self.step;

        div()
            .id(self.id.clone())
            .flex()
            .flex_col()
            .rounded(corner_radius)
            .overflow_hidden()
            .border_1()
            .border_color(colors.controls.border)
            .bg(colors.content_background)
            .opacity(opacity)
            .children([(increment, step), (decrement, -step)].map(|(segment, delta)| {
                let on_change = on_change.clone();

                div()
                    .id(segment.id)
                    .flex()
                    .items_center()
                    .justify_center()
                    .w(px(18.))
                    .h(px(11.))
                    .cursor(if segment.enabled {
                        CursorStyle::PointingHand
                    } else {
                        CursorStyle::OperationNotAllowed
                    })
                    .map(|this| {
                        if segment.enabled {
                            this
                        } else {
                            this.opacity(DISABLED_OPACITY)
                        }
                    })
                    .child(
                        Icon::new(segment.icon)
                            .size(px(8.))
                            .color(colors.secondary_label),
                    )
                    .when(segment.enabled, |this| {
                        this.on_click(move |_event, window, cx| {
                            window.prevent_default();

                            if let Some(on_change) = on_change.as_ref() {
                                (on_change)(&(value + delta), window, cx)
                            }
                        })
                    })
            }))
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveMode, Mode, Theme, ThemeExt};
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn test_stepper_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let stepper = Stepper::new("quantity");
            assert_eq!(stepper.value, 0.);
            assert_eq!(stepper.step, 1., "step should default to one");
            assert!(stepper.can_increment());
            assert!(stepper.can_decrement());
        });
    }

    #[gpui::test]
    fn test_stepper_is_inert_at_the_upper_bound(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let stepper = Stepper::new("quantity").value(10.).min(0.).max(10.);
            assert!(
                !stepper.can_increment(),
                "a stepper at max should refuse to increment"
            );
            assert!(stepper.can_decrement());
        });
    }

    #[gpui::test]
    fn test_stepper_is_inert_at_the_lower_bound(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let stepper = Stepper::new("quantity").value(0.).min(0.).max(10.);
            assert!(
                !stepper.can_decrement(),
                "a stepper at min should refuse to decrement"
            );
            assert!(stepper.can_increment());
        });
    }

    #[gpui::test]
    fn test_stepper_respects_a_step_that_would_overshoot(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let stepper = Stepper::new("quantity").value(9.).min(0.).max(10.).step(2.);
            assert!(
                !stepper.can_increment(),
                "9 + 2 lands past max, so the segment should be inert"
            );

            let stepper = Stepper::new("quantity").value(1.).min(0.).max(10.).step(2.);
            assert!(
                !stepper.can_decrement(),
                "1 - 2 lands below min, so the segment should be inert"
            );
        });
    }

    #[gpui::test]
    fn test_stepper_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| StepperTestView { value: 5. })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct StepperTestView {
        value: f64,
    }

    impl gpui::Render for StepperTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                Stepper::new("quantity")
                    .value(self.value)
                    .min(0.)
                    .max(10.)
                    .on_change(cx.listener(|view, value, _window, cx| {
                        view.value = *value;
                        cx.notify();
                    })),
            )
        }
    }
}
