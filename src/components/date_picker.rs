use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, Styled, Window, div, px,
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

/// Strict `yyyy-mm-dd` parse. Requires exactly four, two and two digits,
/// a month in `1..=12` and a day valid for that month, February 29 only in
/// leap years.
pub fn validate_iso_date(text: &str) -> Option<(i32, u32, u32)> {
    let bytes = text.as_bytes();

    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let digits = |range: std::ops::Range<usize>| -> Option<u32> {
        let slice = &text[range];
        slice
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| slice.parse().ok())
            .flatten()
    };

    let year = digits(0..4)? as i32;
    let month = digits(5..7)?;
    let day = digits(8..10)?;

    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return None;
    }

    Some((year, month, day))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Controlled date field holding an ISO `yyyy-mm-dd` string. Edits commit
/// when the field loses focus: a valid date fires `on_change`, anything else
/// snaps the text back to the last valid value.
#[derive(IntoElement)]
pub struct DatePicker {
    id: ElementId,
    value: SharedString,
    disabled: bool,
    on_change: Option<Box<dyn Fn(&SharedString, &mut Window, &mut App) + 'static>>,
}

impl DatePicker {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            value: "".into(),
            disabled: false,
            on_change: None,
        }
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = value.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Fires only with a valid ISO date.
    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }
}

impl RenderOnce for DatePicker {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let corner_radius = CornerRadiusKind::Md.resolve(cx);
        let text_style = TextStyleKind::Body.resolve(cx);

        let field_state = window.use_keyed_state(self.id.with_suffix("state:field"), cx, {
            let value = self.value.clone();
            move |_window, cx| TextFieldState::new(cx).initial_value(value)
        });

        let focus_handle = field_state.read(cx).focus_handle.clone();
        let is_focused = focus_handle.is_focused(window);

        let was_focused_state =
            window.use_keyed_state(self.id.with_suffix("state:was_focused"), cx, |_window, _cx| {
                false
            });
        let was_focused = *was_focused_state.read(cx);

        if was_focused != is_focused {
            was_focused_state.update(cx, |this, _cx| *this = is_focused);
        }

        if !is_focused {
            let text = field_state.read(cx).value();

            if was_focused && text != self.value {
                // Commit point. Only a well-formed date leaves the field;
                // everything else reverts to the controlled value.
                if validate_iso_date(&text).is_some() {
                    if let Some(on_change) = self.on_change.as_ref() {
                        (on_change)(&text, window, cx)
                    }
                } else {
                    let value = self.value.clone();
                    field_state.update(cx, |state, cx| state.set_value(value, cx));
                }
            } else if !was_focused && text != self.value {
                // Controlled value changed from outside while unfocused.
                let value = self.value.clone();
                field_state.update(cx, |state, cx| state.set_value(value, cx));
            }
        }

        let opacity = disabled_transition(self.id.clone(), window, cx, self.disabled)
            .evaluate(window, cx);

        div()
            .id(self.id.clone())
            .relative()
            .flex()
            .items_center()
            .gap(px(6.))
            .w(px(132.))
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
                Icon::new(CupertinoIconKind::Calendar)
                    .size(px(12.))
                    .color(colors.secondary_label)
                    .flex_none(),
            )
            .child(
                TextField::new(self.id.with_suffix("field"), field_state)
                    .placeholder("yyyy-mm-dd")
                    .disabled(self.disabled),
            )
    }
}

#[cfg(test)]
mod validation_tests {
    use super::validate_iso_date;

    #[test]
    fn accepts_well_formed_dates() {
        assert_eq!(validate_iso_date("2024-02-29"), Some((2024, 2, 29)));
        assert_eq!(validate_iso_date("1999-12-31"), Some((1999, 12, 31)));
        assert_eq!(validate_iso_date("2025-01-01"), Some((2025, 1, 1)));
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(validate_iso_date("2024-13-01"), None, "month 13");
        assert_eq!(validate_iso_date("2024-00-10"), None, "month 0");
        assert_eq!(validate_iso_date("2024-04-31"), None, "April has 30 days");
        assert_eq!(validate_iso_date("2024-06-00"), None, "day 0");
    }

    #[test]
    fn rejects_february_29_outside_leap_years() {
        assert_eq!(validate_iso_date("2023-02-29"), None);
        assert_eq!(validate_iso_date("1900-02-29"), None, "centuries skip leap");
        assert_eq!(validate_iso_date("2000-02-29"), Some((2000, 2, 29)));
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(validate_iso_date(""), None);
        assert_eq!(validate_iso_date("2024-1-05"), None, "month must be padded");
        assert_eq!(validate_iso_date("24-01-05"), None, "year must be 4 digits");
        assert_eq!(validate_iso_date("2024/01/05"), None);
        assert_eq!(validate_iso_date("2024-01-05x"), None);
        assert_eq!(validate_iso_date("yyyy-mm-dd"), None);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveMode, Mode, Theme, ThemeExt};
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn test_date_picker_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| DatePickerTestView {
                    date: "2025-08-25".into(),
                })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct DatePickerTestView {
        date: SharedString,
    }

    impl gpui::Render for DatePickerTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div().size_full().child(
                DatePicker::new("due-date")
                    .value(self.date.clone())
                    .on_change(cx.listener(|view, date: &SharedString, _window, cx| {
                        view.date = date.clone();
                        cx.notify();
                    })),
            )
        }
    }
}
