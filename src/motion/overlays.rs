//! Overlay surfaces: modal dialogs, edge-attached sheets, anchored popovers
//! and tooltips. Each wrapper owns nothing; callers hold the phase state in
//! an entity and drive it through the controller traits.

use std::time::Duration;

use gpui::{
    AnyElement, App, Bounds, ElementId, Entity, IntoElement, MouseButton, ParentElement, Pixels,
    RenderOnce, SharedString, Window, div, ease_out_quint, prelude::*, px,
};
use gpui_motion::Transition;

use crate::{
    extensions::{Deferrable, DeferredConfig},
    materials::{BackdropVeil, Material, MaterialKind},
    motion::{Keyframe, MotionPreset, OverlayPhase, OverlayState},
    theme::{CornerRadiusKind, TextStyleKind, ThemeExt, ZLayerKind},
    utils::ElementIdExt,
};

/// Drives an [`OverlayState`] entity from event handlers.
pub trait OverlayController {
    fn show(&self, cx: &mut App);
    fn dismiss(&self, cx: &mut App);
}

impl OverlayController for Entity<OverlayState> {
    fn show(&self, cx: &mut App) {
        self.update(cx, |state, cx| {
            if state.open() {
                cx.notify();
            }
        });
    }

    fn dismiss(&self, cx: &mut App) {
        self.update(cx, |state, cx| {
            if state.close() {
                cx.notify();
            }
        });
    }
}

/// Phase machine plus the anchor a popover was opened at. The anchor is
/// captured by `open_at` and stays fixed for the whole presentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PopoverState {
    overlay: OverlayState,
    anchor: Bounds<Pixels>,
}

impl PopoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> OverlayPhase {
        self.overlay.phase()
    }

    pub fn anchor(&self) -> Bounds<Pixels> {
        self.anchor
    }

    /// Closed -> Entering, recording the anchor. A popover that is already
    /// presenting keeps its original anchor.
    pub fn open_at(&mut self, anchor: Bounds<Pixels>) -> bool {
        if self.overlay.open() {
            self.anchor = anchor;
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) -> bool {
        self.overlay.close()
    }

    fn settle(&mut self) -> bool {
        self.overlay.settle()
    }

    fn finish(&mut self) -> bool {
        self.overlay.finish()
    }
}

/// Drives a [`PopoverState`] entity from event handlers.
pub trait PopoverController {
    fn show_at(&self, anchor: Bounds<Pixels>, cx: &mut App);
    fn dismiss(&self, cx: &mut App);
}

impl PopoverController for Entity<PopoverState> {
    fn show_at(&self, anchor: Bounds<Pixels>, cx: &mut App) {
        self.update(cx, |state, cx| {
            if state.open_at(anchor) {
                cx.notify();
            }
        });
    }

    fn dismiss(&self, cx: &mut App) {
        self.update(cx, |state, cx| {
            if state.close() {
                cx.notify();
            }
        });
    }
}

/// Which phase boundary this frame crossed, if any.
enum PhaseEdge {
    None,
    Settled,
    Finished,
}

/// Evaluates the entry/exit animation for one overlay and reports when the
/// phase machine should advance. The caller applies the edge to its own
/// state entity.
fn overlay_keyframe(
    id: &ElementId,
    phase: OverlayPhase,
    preset: MotionPreset,
    duration: Duration,
    window: &mut Window,
    cx: &mut App,
) -> (Keyframe, PhaseEdge) {
    let goal = matches!(phase, OverlayPhase::Entering | OverlayPhase::Open) as u8 as f32;

    let progress = Transition::new(
        id.with_suffix("progress"),
        window,
        cx,
        duration,
        |_window, _cx| 0.,
    )
    .with_easing(ease_out_quint());

    if progress.set(cx, goal) {
        cx.notify(progress.entity_id());
    }

    let value = progress.evaluate(window, cx);

    let edge = match phase {
        OverlayPhase::Entering if value >= 1. => PhaseEdge::Settled,
        OverlayPhase::Exiting if value <= 0. => PhaseEdge::Finished,
        _ => PhaseEdge::None,
    };

    (preset.at(value), edge)
}

fn advance(state: &Entity<OverlayState>, edge: PhaseEdge, cx: &mut App) {
    match edge {
        PhaseEdge::None => {}
        PhaseEdge::Settled => {
            state.update(cx, |state, cx| {
                state.settle();
                cx.notify();
            });
        }
        PhaseEdge::Finished => {
            state.update(cx, |state, cx| {
                state.finish();
                cx.notify();
            });
        }
    }
}

/// Applies a keyframe to an element. Divs have no scale transform, so scale
/// presets paint with opacity and translation only.
fn staged<E: Styled>(element: E, keyframe: Keyframe) -> E {
    element
        .opacity(keyframe.opacity)
        .ml(px(keyframe.translate_x))
        .mt(px(keyframe.translate_y))
}

/// A centered dialog over a dimming veil. Clicking the veil dismisses it.
#[derive(IntoElement)]
pub struct Modal {
    id: ElementId,
    state: Entity<OverlayState>,
    preset: MotionPreset,
    deferred_config: DeferredConfig,
    children: Vec<AnyElement>,
}

impl Modal {
    pub fn new(id: impl Into<ElementId>, state: Entity<OverlayState>) -> Self {
        Self {
            id: id.into(),
            state,
            preset: MotionPreset::SlideFromTop,
            deferred_config: DeferredConfig::default(),
            children: Vec::new(),
        }
    }

    pub fn preset(mut self, preset: MotionPreset) -> Self {
        self.preset = preset;
        self
    }
}

impl ParentElement for Modal {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Deferrable for Modal {
    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for Modal {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let phase = self.state.read(cx).phase();

        if phase == OverlayPhase::Closed {
            return gpui::Empty.into_any_element();
        }

        let (keyframe, edge) = overlay_keyframe(
            &self.id,
            phase,
            self.preset,
            self.preset.timing().duration,
            window,
            cx,
        );
        advance(&self.state, edge, cx);

        let state = self.state.clone();
        let veil = div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .opacity(keyframe.opacity)
            .child(
                BackdropVeil::new(self.id.with_suffix("veil"))
                    .on_click(move |_window, cx| state.dismiss(cx)),
            );

        let panel = staged(div(), keyframe)
            .rounded(CornerRadiusKind::Xl.resolve(cx))
            .overflow_hidden()
            .border_1()
            .border_color(cx.get_theme().variants.active(cx).colors.separator)
            .child(Material::new(MaterialKind::Sheet).children(std::mem::take(&mut self.children)));

        let surface = div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .child(veil)
            .child(panel);

        self.deferred_config
            .priority
            .get_or_insert(ZLayerKind::Modal.priority(cx));

        self.apply_deferred(surface)
    }
}

/// The window edge a sheet slides in from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SheetPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl SheetPosition {
    /// The slide preset matching this edge.
    pub fn preset(self) -> MotionPreset {
        match self {
            SheetPosition::Top => MotionPreset::SlideFromTop,
            SheetPosition::Bottom => MotionPreset::SlideFromBottom,
            SheetPosition::Left => MotionPreset::SlideFromLeft,
            SheetPosition::Right => MotionPreset::SlideFromRight,
        }
    }
}

/// A panel attached to a window edge, sliding in over a veil.
#[derive(IntoElement)]
pub struct Sheet {
    id: ElementId,
    state: Entity<OverlayState>,
    position: SheetPosition,
    deferred_config: DeferredConfig,
    children: Vec<AnyElement>,
}

impl Sheet {
    pub fn new(id: impl Into<ElementId>, state: Entity<OverlayState>) -> Self {
        Self {
            id: id.into(),
            state,
            position: SheetPosition::default(),
            deferred_config: DeferredConfig::default(),
            children: Vec::new(),
        }
    }

    pub fn position(mut self, position: SheetPosition) -> Self {
        self.position = position;
        self
    }
}

impl ParentElement for Sheet {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Deferrable for Sheet {
    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for Sheet {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let phase = self.state.read(cx).phase();

        if phase == OverlayPhase::Closed {
            return gpui::Empty.into_any_element();
        }

        let preset = self.position.preset();
        let (keyframe, edge) =
            overlay_keyframe(&self.id, phase, preset, preset.timing().duration, window, cx);
        advance(&self.state, edge, cx);

        let state = self.state.clone();
        let veil = div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .opacity(keyframe.opacity)
            .child(
                BackdropVeil::new(self.id.with_suffix("veil"))
                    .on_click(move |_window, cx| state.dismiss(cx)),
            );

        let panel = staged(div(), keyframe)
            .map(|this| match self.position {
                SheetPosition::Top | SheetPosition::Bottom => this.w_full(),
                SheetPosition::Left | SheetPosition::Right => this.h_full(),
            })
            .rounded(CornerRadiusKind::Lg.resolve(cx))
            .overflow_hidden()
            .border_1()
            .border_color(cx.get_theme().variants.active(cx).colors.separator)
            .child(Material::new(MaterialKind::Sheet).children(std::mem::take(&mut self.children)));

        let surface = div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .map(|this| match self.position {
                SheetPosition::Top => this.flex_col().justify_start(),
                SheetPosition::Bottom => this.flex_col().justify_end(),
                SheetPosition::Left => this.justify_start(),
                SheetPosition::Right => this.justify_end(),
            })
            .child(veil)
            .child(panel);

        self.deferred_config
            .priority
            .get_or_insert(ZLayerKind::ModalOverlay.priority(cx));

        self.apply_deferred(surface)
    }
}

/// A floating panel anchored to the bounds recorded when it opened.
/// Releasing the mouse outside the panel dismisses it.
#[derive(IntoElement)]
pub struct Popover {
    id: ElementId,
    state: Entity<PopoverState>,
    preset: MotionPreset,
    deferred_config: DeferredConfig,
    children: Vec<AnyElement>,
}

impl Popover {
    pub fn new(id: impl Into<ElementId>, state: Entity<PopoverState>) -> Self {
        Self {
            id: id.into(),
            state,
            preset: MotionPreset::SlideFromRight,
            deferred_config: DeferredConfig::default(),
            children: Vec::new(),
        }
    }

    pub fn preset(mut self, preset: MotionPreset) -> Self {
        self.preset = preset;
        self
    }
}

impl ParentElement for Popover {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Deferrable for Popover {
    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for Popover {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let phase = self.state.read(cx).phase();

        if phase == OverlayPhase::Closed {
            return gpui::Empty.into_any_element();
        }

        let (keyframe, edge) = overlay_keyframe(
            &self.id,
            phase,
            self.preset,
            self.preset.timing().duration,
            window,
            cx,
        );

        match edge {
            PhaseEdge::None => {}
            PhaseEdge::Settled => {
                self.state.update(cx, |state, cx| {
                    state.settle();
                    cx.notify();
                });
            }
            PhaseEdge::Finished => {
                self.state.update(cx, |state, cx| {
                    state.finish();
                    cx.notify();
                });
            }
        }

        let anchor = self.state.read(cx).anchor();
        let state = self.state.clone();

        let panel = staged(div(), keyframe)
            .id(self.id.with_suffix("panel"))
            .absolute()
            .top(anchor.origin.y + anchor.size.height + px(4.))
            .left(anchor.origin.x)
            .rounded(CornerRadiusKind::Lg.resolve(cx))
            .overflow_hidden()
            .border_1()
            .border_color(cx.get_theme().variants.active(cx).colors.separator)
            .on_mouse_up_out(MouseButton::Left, move |_event, _window, cx| {
                state.dismiss(cx);
            })
            .child(Material::new(MaterialKind::Popover).children(std::mem::take(&mut self.children)));

        self.deferred_config
            .priority
            .get_or_insert(ZLayerKind::Popover.priority(cx));

        self.apply_deferred(panel)
    }
}

/// Tooltip entry and exit run faster than the shared fade preset.
const TOOLTIP_FADE: Duration = Duration::from_millis(100);

/// A short label on a dark backdrop, fading in below its anchor.
#[derive(IntoElement)]
pub struct Tooltip {
    id: ElementId,
    state: Entity<OverlayState>,
    anchor: Bounds<Pixels>,
    label: SharedString,
    deferred_config: DeferredConfig,
}

impl Tooltip {
    pub fn new(
        id: impl Into<ElementId>,
        state: Entity<OverlayState>,
        anchor: Bounds<Pixels>,
        label: impl Into<SharedString>,
    ) -> Self {
        Self {
            id: id.into(),
            state,
            anchor,
            label: label.into(),
            deferred_config: DeferredConfig::default(),
        }
    }
}

impl Deferrable for Tooltip {
    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for Tooltip {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let phase = self.state.read(cx).phase();

        if phase == OverlayPhase::Closed {
            return gpui::Empty.into_any_element();
        }

        let (keyframe, edge) = overlay_keyframe(
            &self.id,
            phase,
            MotionPreset::Fade,
            TOOLTIP_FADE,
            window,
            cx,
        );
        advance(&self.state, edge, cx);

        let caption = TextStyleKind::Caption1.resolve(cx);

        let panel = staged(div(), keyframe)
            .absolute()
            .top(self.anchor.origin.y + self.anchor.size.height + px(6.))
            .left(self.anchor.origin.x)
            .rounded(CornerRadiusKind::Md.resolve(cx))
            .overflow_hidden()
            .text_size(caption.size)
            .child(
                Material::new(MaterialKind::Tooltip)
                    .child(div().px(px(8.)).py(px(4.)).child(std::mem::take(&mut self.label))),
            );

        self.deferred_config
            .priority
            .get_or_insert(ZLayerKind::Tooltip.priority(cx));

        self.apply_deferred(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::{point, size};

    #[test]
    fn sheet_positions_map_to_matching_slides() {
        assert_eq!(SheetPosition::Top.preset(), MotionPreset::SlideFromTop);
        assert_eq!(SheetPosition::Bottom.preset(), MotionPreset::SlideFromBottom);
        assert_eq!(SheetPosition::Left.preset(), MotionPreset::SlideFromLeft);
        assert_eq!(SheetPosition::Right.preset(), MotionPreset::SlideFromRight);
    }

    #[test]
    fn left_sheet_enters_from_the_left_edge() {
        let entry = SheetPosition::Left.preset().initial();

        assert_eq!(entry.translate_x, -20., "panel should start off the left edge");
        assert_eq!(entry.opacity, 0., "panel should start transparent");

        let settled = SheetPosition::Left.preset().at(1.);
        assert_eq!(settled.translate_x, 0., "panel should settle in place");
        assert_eq!(settled.opacity, 1., "panel should settle opaque");
    }

    #[test]
    fn popover_anchor_is_fixed_for_the_presentation() {
        let first = Bounds {
            origin: point(px(10.), px(20.)),
            size: size(px(100.), px(30.)),
        };
        let second = Bounds {
            origin: point(px(200.), px(200.)),
            size: size(px(50.), px(50.)),
        };

        let mut state = PopoverState::new();

        assert!(state.open_at(first), "open from closed should step");
        assert_eq!(state.anchor(), first);

        assert!(
            !state.open_at(second),
            "opening an already presenting popover should be a no-op"
        );
        assert_eq!(state.anchor(), first, "the original anchor should survive");

        state.settle();
        state.close();
        state.finish();

        assert!(state.open_at(second), "a fresh presentation should step");
        assert_eq!(state.anchor(), second, "the new anchor should be recorded");
    }
}
