use std::time::Duration;

use gpui::{
    ElementId, FocusHandle, IntoElement, Pixels, RenderOnce, ease_out_quint, prelude::*, px,
};
use gpui_motion::{Transition, TransitionExt};

use crate::{theme::ThemeExt, utils::RgbaExt};

/// How far the ring sits outside the control while unfocused.
const SIZE_SCALE_FACTOR: f32 = 8.;

/// Accent-colored ring that contracts onto a control when it gains keyboard
/// focus. Rendered as an absolutely positioned sibling inside the control.
#[derive(IntoElement)]
pub struct FocusRing {
    id: ElementId,
    focus_handle: FocusHandle,
    radius: Pixels,
}

impl FocusRing {
    pub fn new(id: impl Into<ElementId>, focus_handle: FocusHandle) -> Self {
        Self {
            id: id.into(),
            focus_handle,
            radius: px(8.),
        }
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = focus_handle;
        self
    }

    /// Matches the ring's corners to the control it wraps.
    pub fn rounded(mut self, radius: Pixels) -> Self {
        self.radius = radius;
        self
    }
}

impl RenderOnce for FocusRing {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let ring_color = cx.get_theme().variants.active(cx).colors.accents.blue;
        let radius = self.radius;

        let is_focused = self.focus_handle.is_focused(window) as u8 as f32;

        let ring_progress = Transition::new(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(365),
            |_window, _cx| is_focused,
        )
        .with_easing(ease_out_quint());

        if ring_progress.set(cx, is_focused) {
            cx.notify(ring_progress.entity_id());
        }

        gpui::div()
            .absolute()
            .with_transitions(ring_progress, move |_cx, this, delta| {
                let spread = (1. - delta) * SIZE_SCALE_FACTOR + 2.;

                this.top(px(-spread))
                    .bottom(px(-spread))
                    .left(px(-spread))
                    .right(px(-spread))
                    .rounded(radius + px(spread))
                    .border_2()
                    .border_color(ring_color.alpha(delta * 0.3))
            })
    }
}
