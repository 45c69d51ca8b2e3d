use std::any::TypeId;

use gpui::{
    AnyElement, AnyView, App, Context, ElementId, InteractiveElement, IntoElement, ParentElement,
    Render, Styled, Window, WindowHandle, deferred, div,
};
use indexmap::IndexMap;

use crate::theme::ZLayerKind;

/// A registered overlay: which z layer it paints on and how to build it.
pub struct OverlayEntry {
    pub layer: ZLayerKind,
    element: Box<dyn Fn(&mut Window, &mut App) -> AnyElement + 'static>,
}

/// Top-level view that renders the application view plus a registry of
/// overlay surfaces. Overlays persist until removed and paint deferred,
/// ordered by their [`ZLayerKind`] priority; entries on the same layer keep
/// registration order.
///
/// ```ignore
/// cx.open_window(options, |window, cx| {
///     cx.new(|cx| Root::new(main_view, window, cx))
/// });
///
/// let root = window.root::<Root>().flatten().unwrap();
/// root.update(cx, |root, cx| {
///     root.add("settings-modal", ZLayerKind::Modal, |window, cx| {
///         Modal::new("settings-modal", state.clone()).child("…")
///     });
///     cx.notify();
/// });
/// ```
pub struct Root {
    view: AnyView,
    overlays: IndexMap<ElementId, OverlayEntry>,
}

impl Root {
    pub fn new(view: impl Into<AnyView>, _window: &mut Window, _cx: &mut Context<Self>) -> Self {
        Self {
            view: view.into(),
            overlays: IndexMap::new(),
        }
    }

    /// Registers an overlay on the given layer. Re-adding an id replaces the
    /// previous entry in place.
    pub fn add<E: IntoElement>(
        &mut self,
        id: impl Into<ElementId>,
        layer: ZLayerKind,
        element: impl Fn(&mut Window, &mut App) -> E + 'static,
    ) {
        self.overlays.insert(
            id.into(),
            OverlayEntry {
                layer,
                element: Box::new(move |window, cx| element(window, cx).into_any_element()),
            },
        );
    }

    /// Removes an overlay by id. Returns true if an entry was removed.
    pub fn remove(&mut self, id: impl Into<ElementId>) -> bool {
        self.overlays.shift_remove(&id.into()).is_some()
    }

    /// Drops every registered overlay.
    pub fn clear(&mut self) {
        self.overlays.clear();
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Finds a Root window whose application view has type `V`.
    pub fn find_window<V: Render>(cx: &App) -> Option<WindowHandle<Root>> {
        cx.windows().iter().find_map(|window| {
            let window = window.downcast::<Root>();

            let is_of_view = window
                .map(|root| root.read(cx).ok().map(|this| this.is_of_view::<V>()))
                .flatten()
                .unwrap_or(false);

            if is_of_view { window } else { None }
        })
    }

    pub fn is_of_view<V: Render>(&self) -> bool {
        TypeId::of::<V>() == self.view.entity_type()
    }
}

impl Render for Root {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let mut entries: Vec<_> = self.overlays.values().collect();
        entries.sort_by_key(|entry| entry.layer.priority(cx));

        let overlays: Vec<_> = entries
            .into_iter()
            .map(|entry| {
                let priority = entry.layer.priority(cx);
                let element = (entry.element)(window, cx);

                deferred(element).priority(priority).into_any_element()
            })
            .collect();

        div()
            .id("root")
            .size_full()
            .relative()
            .child(self.view.clone())
            .children(overlays)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{ActiveMode, Mode, Theme, ThemeExt};
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    struct TestView;

    impl Render for TestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            div().id("test-view").size_full().child("Test Content")
        }
    }

    fn open_root(cx: &mut TestAppContext) -> WindowHandle<Root> {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveMode(Mode::Light));

            cx.open_window(Default::default(), |window, cx| {
                let test_view = cx.new(|_cx| TestView);
                cx.new(|cx| Root::new(test_view, window, cx))
            })
            .unwrap()
        })
    }

    #[gpui::test]
    fn test_root_starts_empty(cx: &mut TestAppContext) {
        let window = open_root(cx);

        let root = window.root(cx).unwrap();
        root.read_with(cx, |root, _| {
            assert_eq!(root.overlay_count(), 0, "root should start with no overlays");
            assert!(root.is_of_view::<TestView>());
        });
    }

    #[gpui::test]
    fn test_root_add_and_replace_overlay(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        root.update(cx, |root, _cx| {
            root.add("toast", ZLayerKind::Toast, |_window, _cx| {
                div().child("Saved")
            });
            root.add("toast", ZLayerKind::Toast, |_window, _cx| {
                div().child("Saved again")
            });
        });

        root.read_with(cx, |root, _| {
            assert_eq!(
                root.overlay_count(),
                1,
                "re-adding the same id should replace, not duplicate"
            );
        });
    }

    #[gpui::test]
    fn test_root_remove_overlay(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        root.update(cx, |root, _cx| {
            root.add("modal", ZLayerKind::Modal, |_window, _cx| div());
        });

        let removed = root.update(cx, |root, _cx| root.remove("modal"));
        assert!(removed, "remove should report an existing entry");

        let removed_again = root.update(cx, |root, _cx| root.remove("modal"));
        assert!(!removed_again, "remove should report a missing entry");
    }

    #[gpui::test]
    fn test_root_clear_overlays(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        root.update(cx, |root, _cx| {
            root.add("modal", ZLayerKind::Modal, |_window, _cx| div());
            root.add("tooltip", ZLayerKind::Tooltip, |_window, _cx| div());
            root.add("popover", ZLayerKind::Popover, |_window, _cx| div());
        });

        root.update(cx, |root, _cx| root.clear());

        root.read_with(cx, |root, _| {
            assert_eq!(root.overlay_count(), 0, "clear should drop every entry");
        });
    }

    #[gpui::test]
    fn test_root_renders_with_overlays(cx: &mut TestAppContext) {
        let window = open_root(cx);
        let root = window.root(cx).unwrap();

        root.update(cx, |root, cx| {
            root.add("tooltip", ZLayerKind::Tooltip, |_window, _cx| {
                div().child("hint")
            });
            root.add("modal", ZLayerKind::Modal, |_window, _cx| {
                div().child("dialog")
            });
            cx.notify();
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }
}
