//! Window chrome surfaces: titlebar with traffic lights, toolbar, animated
//! sidebar and the top-level [`WindowChrome`] container.

use std::time::Duration;

use gpui::{
    AnyElement, App, CursorStyle, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, Rgba, SharedString, StatefulInteractiveElement, Styled, Window, div, ease_out_quint,
    prelude::FluentBuilder, px,
};
use gpui_motion::WindowTransitionExt;

use crate::{
    components::Icon,
    materials::{Material, MaterialKind},
    theme::{CornerRadiusKind, TextStyleKind, ThemeExt},
    utils::ElementIdExt,
};

const TRAFFIC_LIGHT_SIZE: f32 = 12.;
const TRAFFIC_LIGHT_CLOSE: u32 = 0xFF5F57;
const TRAFFIC_LIGHT_MINIMIZE: u32 = 0xFEBC2E;
const TRAFFIC_LIGHT_ZOOM: u32 = 0x28C840;

/// Width of the traffic light cluster, mirrored on the trailing edge so the
/// title stays centered.
const TRAFFIC_LIGHT_SPACER: f32 = 44.;

type WindowCallback = Box<dyn Fn(&mut Window, &mut App) + 'static>;

fn traffic_light(
    id: ElementId,
    color: Rgba,
    on_click: Option<WindowCallback>,
) -> impl IntoElement {
    div()
        .id(id)
        .size(px(TRAFFIC_LIGHT_SIZE))
        .rounded_full()
        .bg(color)
        .when_some(on_click, |this, on_click| {
            this.cursor(CursorStyle::PointingHand)
                .on_click(move |_event, window, cx| on_click(window, cx))
        })
}

/// Titlebar material strip with optional traffic lights and a centered title.
#[derive(IntoElement)]
pub struct Titlebar {
    id: ElementId,
    title: Option<SharedString>,
    traffic_lights: bool,
    on_close: Option<WindowCallback>,
    on_minimize: Option<WindowCallback>,
    on_zoom: Option<WindowCallback>,
}

impl Titlebar {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            traffic_lights: true,
            on_close: None,
            on_minimize: None,
            on_zoom: None,
        }
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn traffic_lights(mut self, traffic_lights: bool) -> Self {
        self.traffic_lights = traffic_lights;
        self
    }

    pub fn on_close(mut self, on_close: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn on_minimize(mut self, on_minimize: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_minimize = Some(Box::new(on_minimize));
        self
    }

    pub fn on_zoom(mut self, on_zoom: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_zoom = Some(Box::new(on_zoom));
        self
    }
}

impl RenderOnce for Titlebar {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let chrome = cx.get_theme().layout.chrome.clone();
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let text_style = TextStyleKind::Headline.resolve(cx);

        Material::new(MaterialKind::Titlebar).child(
            div()
                .id(self.id.clone())
                .w_full()
                .min_h(chrome.titlebar_height)
                .flex()
                .items_center()
                .border_b_1()
                .border_color(colors.separator)
                .when(self.traffic_lights, |this| {
                    this.child(
                        div()
                            .flex_none()
                            .w(px(TRAFFIC_LIGHT_SPACER))
                            .flex()
                            .items_center()
                            .justify_center()
                            .gap(px(8.))
                            .child(traffic_light(
                                self.id.with_suffix("close"),
                                gpui::rgb(TRAFFIC_LIGHT_CLOSE),
                                self.on_close,
                            ))
                            .child(traffic_light(
                                self.id.with_suffix("minimize"),
                                gpui::rgb(TRAFFIC_LIGHT_MINIMIZE),
                                self.on_minimize,
                            ))
                            .child(traffic_light(
                                self.id.with_suffix("zoom"),
                                gpui::rgb(TRAFFIC_LIGHT_ZOOM),
                                self.on_zoom,
                            )),
                    )
                })
                .child(
                    div()
                        .flex_1()
                        .flex()
                        .justify_center()
                        .text_size(text_style.size)
                        .font_weight(gpui::FontWeight(text_style.weight))
                        .when_some(self.title, |this, title| this.child(title)),
                )
                .when(self.traffic_lights, |this| {
                    this.child(div().flex_none().w(px(TRAFFIC_LIGHT_SPACER)))
                }),
        )
    }
}

/// Toolbar row under the titlebar.
#[derive(IntoElement)]
pub struct Toolbar {
    id: ElementId,
    children: Vec<AnyElement>,
}

impl Toolbar {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }
}

impl ParentElement for Toolbar {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Toolbar {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let chrome = cx.get_theme().layout.chrome.clone();
        let separator = cx.get_theme().variants.active(cx).colors.separator;

        Material::new(MaterialKind::HeaderView).child(
            div()
                .id(self.id)
                .w_full()
                .min_h(chrome.toolbar_height)
                .flex()
                .items_center()
                .gap(px(8.))
                .px(px(12.))
                .border_b_1()
                .border_color(separator)
                .children(self.children),
        )
    }
}

/// Sidebar pane whose width animates between the theme's expanded and
/// collapsed metrics.
#[derive(IntoElement)]
pub struct Sidebar {
    id: ElementId,
    collapsed: bool,
    children: Vec<AnyElement>,
}

impl Sidebar {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            collapsed: false,
            children: Vec::new(),
        }
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

impl ParentElement for Sidebar {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Sidebar {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let chrome = cx.get_theme().layout.chrome.clone();
        let separator = cx.get_theme().variants.active(cx).colors.separator;

        let target_width = if self.collapsed {
            chrome.sidebar_collapsed_width
        } else {
            chrome.sidebar_expanded_width
        };

        let width_transition = window
            .use_keyed_transition(
                self.id.with_suffix("state:transition:width"),
                cx,
                Duration::from_millis(200),
                move |_window, _cx| target_width,
            )
            .with_easing(ease_out_quint());

        if width_transition.set(cx, target_width) {
            cx.notify(width_transition.entity_id());
        }

        let width = width_transition.evaluate(window, cx);

        Material::new(MaterialKind::Sidebar).child(
            div()
                .id(self.id)
                .h_full()
                .w(width)
                .flex_none()
                .flex()
                .flex_col()
                .gap(px(2.))
                .p(px(8.))
                .overflow_hidden()
                .border_r_1()
                .border_color(separator)
                .children(self.children),
        )
    }
}

/// One navigation row inside a [`Sidebar`].
#[derive(IntoElement)]
pub struct SidebarItem {
    id: ElementId,
    icon: Option<SharedString>,
    label: SharedString,
    active: bool,
    collapsed: bool,
    on_click: Option<WindowCallback>,
}

impl SidebarItem {
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            icon: None,
            label: label.into(),
            active: false,
            collapsed: false,
            on_click: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Hides the label, leaving the icon, for collapsed sidebars.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn on_click(mut self, on_click: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl RenderOnce for SidebarItem {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let corner_radius = CornerRadiusKind::Md.resolve(cx);
        let text_style = TextStyleKind::Subhead.resolve(cx);

        let text_color = if self.active {
            colors.label
        } else {
            colors.secondary_label
        };

        div()
            .id(self.id)
            .w_full()
            .flex()
            .items_center()
            .gap(px(8.))
            .px(px(8.))
            .py(px(4.))
            .rounded(corner_radius)
            .cursor(CursorStyle::PointingHand)
            .text_size(text_style.size)
            .text_color(text_color)
            .when(self.active, |this| this.bg(colors.content_background))
            .when_some(self.icon, |this, icon| {
                this.child(Icon::new(icon).size(px(14.)).color(text_color).flex_none())
            })
            .when(!self.collapsed, |this| {
                this.child(
                    div()
                        .flex_1()
                        .overflow_hidden()
                        .text_ellipsis()
                        .child(self.label),
                )
            })
            .when_some(self.on_click, |this, on_click| {
                this.on_click(move |_event, window, cx| on_click(window, cx))
            })
    }
}

/// Top-level window container: titlebar over an optional sidebar beside the
/// toolbar and content column.
#[derive(IntoElement)]
pub struct WindowChrome {
    id: ElementId,
    title: Option<SharedString>,
    titlebar: bool,
    sidebar: Option<AnyElement>,
    toolbar: Option<AnyElement>,
    children: Vec<AnyElement>,
}

impl WindowChrome {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            titlebar: true,
            sidebar: None,
            toolbar: None,
            children: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether the default titlebar renders at all.
    pub fn titlebar(mut self, titlebar: bool) -> Self {
        self.titlebar = titlebar;
        self
    }

    pub fn sidebar(mut self, sidebar: impl IntoElement) -> Self {
        self.sidebar = Some(sidebar.into_any_element());
        self
    }

    pub fn toolbar(mut self, toolbar: impl IntoElement) -> Self {
        self.toolbar = Some(toolbar.into_any_element());
        self
    }
}

impl ParentElement for WindowChrome {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for WindowChrome {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let chrome = cx.get_theme().layout.chrome.clone();
        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let corner_radius = CornerRadiusKind::Lg.resolve(cx);

        div()
            .id(self.id.clone())
            .size_full()
            .min_w(chrome.min_window_width)
            .min_h(chrome.min_window_height)
            .flex()
            .flex_col()
            .rounded(corner_radius)
            .overflow_hidden()
            .border_1()
            .border_color(colors.separator)
            .bg(colors.window_background)
            .text_color(colors.label)
            .when(self.titlebar, |this| {
                this.child(
                    Titlebar::new(self.id.with_suffix("titlebar"))
                        .map(|titlebar| match self.title {
                            Some(title) => titlebar.title(title),
                            None => titlebar,
                        }),
                )
            })
            .child(
                div()
                    .flex_1()
                    .flex()
                    .overflow_hidden()
                    .when_some(self.sidebar, |this, sidebar| this.child(sidebar))
                    .child(
                        div()
                            .flex_1()
                            .flex()
                            .flex_col()
                            .overflow_hidden()
                            .when_some(self.toolbar, |this, toolbar| this.child(toolbar))
                            .child(
                                div()
                                    .flex_1()
                                    .bg(colors.content_background)
                                    .children(self.children),
                            ),
                    ),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::{
        assets::CupertinoIconKind,
        theme::{ActiveMode, Mode, Theme, ThemeExt},
    };
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn test_titlebar_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let titlebar = Titlebar::new("titlebar");
            assert!(titlebar.traffic_lights, "traffic lights should default on");
            assert!(titlebar.title.is_none());
        });
    }

    #[gpui::test]
    fn test_window_chrome_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let chrome = WindowChrome::new("window");
            assert!(chrome.titlebar, "titlebar should default on");
            assert!(chrome.sidebar.is_none());
            assert!(chrome.toolbar.is_none());
        });
    }

    #[gpui::test]
    fn test_sidebar_metrics_come_from_the_theme(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let chrome = cx.get_theme().layout.chrome.clone();
            assert_eq!(chrome.sidebar_expanded_width, px(240.));
            assert_eq!(chrome.sidebar_collapsed_width, px(48.));
            assert_eq!(chrome.titlebar_height, px(28.));
            assert_eq!(chrome.toolbar_height, px(44.));
        });
    }

    #[gpui::test]
    fn test_window_chrome_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| ChromeTestView { collapsed: false })
            })
            .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct ChromeTestView {
        collapsed: bool,
    }

    impl gpui::Render for ChromeTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            let collapsed = self.collapsed;

            WindowChrome::new("window")
                .title("Library")
                .sidebar(
                    Sidebar::new("sidebar")
                        .collapsed(collapsed)
                        .child(
                            SidebarItem::new("all", "All Items")
                                .icon(CupertinoIconKind::Gear)
                                .active(true)
                                .collapsed(collapsed),
                        )
                        .child(
                            SidebarItem::new("recent", "Recents").collapsed(collapsed),
                        ),
                )
                .toolbar(
                    Toolbar::new("toolbar").child(
                        crate::components::Button::new("toggle-sidebar")
                            .variant(crate::components::ButtonVariant::Icon)
                            .icon(CupertinoIconKind::Sidebar)
                            .on_click(cx.listener(|view, _event, _window, cx| {
                                view.collapsed = !view.collapsed;
                                cx.notify();
                            })),
                    ),
                )
                .child(div().p(px(16.)).child("Content"))
        }
    }
}
