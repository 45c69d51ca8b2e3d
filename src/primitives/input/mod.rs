//! Single-line editable text field. `TextFieldState` owns the text and
//! selection; `TextField` renders it and wires up actions, mouse selection
//! and the platform input handler for IME support.

use gpui::{
    App, Bounds, CursorStyle, DispatchPhase, Element, ElementId, ElementInputHandler, Entity,
    FocusHandle, Focusable, GlobalElementId, Hsla, InspectorElementId, InteractiveElement,
    IntoElement, KeyBinding, LayoutId, MouseButton, MouseMoveEvent, PaintQuad, ParentElement,
    Pixels, Refineable, RenderOnce, ShapedLine, SharedString, Style, StyleRefinement, Styled,
    TextRun, UnderlineStyle, Window, div, fill, point, prelude::FluentBuilder, px, relative, size,
};

mod caret_blink;
mod state;

pub use caret_blink::CaretBlink;
pub use state::*;

use crate::{theme::ThemeExt, utils::RgbaExt};

#[derive(IntoElement)]
pub struct TextField {
    id: ElementId,
    state: Entity<TextFieldState>,
    disabled: bool,
    pub(crate) placeholder: SharedString,
    placeholder_text_color: Option<Hsla>,
    selection_color: Option<Hsla>,
    style: StyleRefinement,
}

impl Styled for TextField {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl TextField {
    pub fn new(id: impl Into<ElementId>, state: Entity<TextFieldState>) -> Self {
        Self {
            id: id.into(),
            state,
            disabled: false,
            placeholder: "".into(),
            placeholder_text_color: None,
            selection_color: None,
            style: StyleRefinement::default(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn placeholder(mut self, text: impl Into<SharedString>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn placeholder_text_color(mut self, color: impl Into<Hsla>) -> Self {
        self.placeholder_text_color = Some(color.into());
        self
    }

    pub fn selection_color(mut self, color: impl Into<Hsla>) -> Self {
        self.selection_color = Some(color.into());
        self
    }

    pub fn read_text(&self, cx: &mut App) -> SharedString {
        self.state.read(cx).value()
    }
}

struct FieldElement {
    field: Entity<TextFieldState>,
    placeholder: SharedString,
    text_color: Hsla,
    placeholder_text_color: Hsla,
    selection_color: Hsla,
    line_height: Pixels,
    caret_visible: bool,
}

struct PrepaintState {
    line: Option<ShapedLine>,
    caret: Option<PaintQuad>,
    selection: Option<PaintQuad>,
}

impl IntoElement for FieldElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for FieldElement {
    type RequestLayoutState = ();
    type PrepaintState = PrepaintState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = self.line_height.into();

        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let field = self.field.read(cx);
        let content = field.value();
        let selected_range = field.selected_range.clone();
        let caret = field.caret_offset();
        let style = window.text_style();

        let (display_text, text_color) = if content.is_empty() {
            (self.placeholder.clone(), self.placeholder_text_color)
        } else {
            (content, self.text_color)
        };

        let run = TextRun {
            len: display_text.len(),
            font: style.font(),
            color: text_color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };

        let runs = if let Some(marked_range) = field.marked_range.as_ref() {
            vec![
                TextRun {
                    len: marked_range.start,
                    ..run.clone()
                },
                TextRun {
                    len: marked_range.end - marked_range.start,
                    underline: Some(UnderlineStyle {
                        color: Some(run.color),
                        thickness: px(1.0),
                        wavy: false,
                    }),
                    ..run.clone()
                },
                TextRun {
                    len: display_text.len() - marked_range.end,
                    ..run
                },
            ]
            .into_iter()
            .filter(|run| run.len > 0)
            .collect()
        } else {
            vec![run]
        };

        let font_size = style.font_size.to_pixels(window.rem_size());
        let line = window
            .text_system()
            .shape_line(display_text, font_size, &runs, None);

        let caret_pos = line.x_for_index(caret);
        let (selection, caret) = if selected_range.is_empty() {
            let height = bounds.bottom() - bounds.top();
            let adjusted_height = height * 0.8;
            let height_diff = height - adjusted_height;

            (
                None,
                Some(fill(
                    Bounds::new(
                        point(bounds.left() + caret_pos, bounds.top() + height_diff / 2.),
                        size(px(1.), adjusted_height),
                    ),
                    self.text_color,
                )),
            )
        } else {
            (
                Some(fill(
                    Bounds::from_corners(
                        point(
                            bounds.left() + line.x_for_index(selected_range.start),
                            bounds.top(),
                        ),
                        point(
                            bounds.left() + line.x_for_index(selected_range.end),
                            bounds.bottom(),
                        ),
                    ),
                    self.selection_color,
                )),
                None,
            )
        };

        PrepaintState {
            line: Some(line),
            caret,
            selection,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.field.read(cx).focus_handle.clone();

        // Window-level listener so a drag selection keeps tracking after the
        // pointer leaves the field bounds.
        let field = self.field.clone();
        window.on_mouse_event(move |event: &MouseMoveEvent, phase, _window, cx| {
            if phase == DispatchPhase::Capture {
                return;
            }

            field.update(cx, |field, cx| {
                if field.is_selecting {
                    field.select_to(field.index_for_mouse_position(event.position), cx);
                }
            });
        });

        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.field.clone()),
            cx,
        );

        if let Some(selection) = prepaint.selection.take() {
            window.paint_quad(selection)
        }

        let line = prepaint.line.take().unwrap();
        line.paint(bounds.origin, self.line_height, window, cx)
            .unwrap();

        if focus_handle.is_focused(window)
            && self.caret_visible
            && let Some(caret) = prepaint.caret.take()
        {
            window.paint_quad(caret);
        }

        self.field.update(cx, |field, _cx| {
            field.last_layout = Some(line);
            field.last_bounds = Some(bounds);
        });
    }
}

impl RenderOnce for TextField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let line_height = {
            let text_style = self.style.text.as_ref();
            text_style
                .and_then(|this| this.line_height)
                .map(|this| {
                    this.to_pixels(
                        text_style
                            .and_then(|this| this.font_size)
                            .unwrap_or_else(|| window.text_style().font_size),
                        window.rem_size(),
                    )
                })
                .unwrap_or_else(|| window.line_height())
        };

        self.state.update(cx, |state, cx| {
            state.update_focus_state(window, cx);
        });

        let state = self.state.read(cx);
        let colors = &cx.get_theme().variants.active(cx).colors;

        let text_color = self
            .style
            .text
            .as_ref()
            .and_then(|text| text.color)
            .unwrap_or_else(|| colors.label.into());
        let placeholder_text_color = self
            .placeholder_text_color
            .unwrap_or_else(|| colors.placeholder_text.into());
        let selection_color = self
            .selection_color
            .unwrap_or_else(|| colors.accents.blue.alpha(0.3).into());
        let caret_visible = state.caret_visible(cx);

        div()
            .id(self.id.clone())
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .tab_index(0)
            .key_context("TextField")
            .when(!self.disabled, |this| this.track_focus(&state.focus_handle))
            .cursor(if self.disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::IBeam
            })
            .on_action(window.listener_for(&self.state, TextFieldState::backspace))
            .on_action(window.listener_for(&self.state, TextFieldState::delete))
            .on_action(window.listener_for(&self.state, TextFieldState::left))
            .on_action(window.listener_for(&self.state, TextFieldState::right))
            .on_action(window.listener_for(&self.state, TextFieldState::select_left))
            .on_action(window.listener_for(&self.state, TextFieldState::select_right))
            .on_action(window.listener_for(&self.state, TextFieldState::select_all))
            .on_action(window.listener_for(&self.state, TextFieldState::home))
            .on_action(window.listener_for(&self.state, TextFieldState::end))
            .on_action(window.listener_for(&self.state, TextFieldState::show_character_palette))
            .on_action(window.listener_for(&self.state, TextFieldState::paste))
            .on_action(window.listener_for(&self.state, TextFieldState::cut))
            .on_action(window.listener_for(&self.state, TextFieldState::copy))
            .on_mouse_down(
                MouseButton::Left,
                window.listener_for(&self.state, TextFieldState::on_mouse_down),
            )
            .on_mouse_up(
                MouseButton::Left,
                window.listener_for(&self.state, TextFieldState::on_mouse_up),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                window.listener_for(&self.state, TextFieldState::on_mouse_up),
            )
            .on_mouse_move(window.listener_for(&self.state, TextFieldState::on_mouse_move))
            .child(FieldElement {
                field: self.state.clone(),
                placeholder: self.placeholder,
                text_color,
                placeholder_text_color,
                selection_color,
                line_height,
                caret_visible,
            })
    }
}

pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("backspace", Backspace, None),
        KeyBinding::new("delete", Delete, None),
        KeyBinding::new("left", Left, None),
        KeyBinding::new("right", Right, None),
        KeyBinding::new("shift-left", SelectLeft, None),
        KeyBinding::new("shift-right", SelectRight, None),
        KeyBinding::new("cmd-a", SelectAll, None),
        KeyBinding::new("cmd-v", Paste, None),
        KeyBinding::new("cmd-c", Copy, None),
        KeyBinding::new("cmd-x", Cut, None),
        KeyBinding::new("home", Home, None),
        KeyBinding::new("end", End, None),
        KeyBinding::new("ctrl-cmd-space", ShowCharacterPalette, None),
    ]);

    cx.on_keyboard_layout_change(move |cx| {
        for window in cx.windows() {
            window
                .update(cx, |this, _, cx| cx.notify(this.entity_id()))
                .ok();
        }
    })
    .detach();
}

impl Focusable for TextField {
    fn focus_handle(&self, cx: &App) -> FocusHandle {
        self.state.read(cx).focus_handle.clone()
    }
}
