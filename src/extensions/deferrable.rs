use gpui::{AnyElement, IntoElement, deferred};

/// Configuration for deferred rendering.
#[derive(Clone, Copy, Debug)]
pub struct DeferredConfig {
    /// Whether deferred rendering is enabled.
    pub enabled: bool,
    /// Paint priority. Higher priority elements are painted later.
    pub priority: Option<usize>,
}

impl Default for DeferredConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: None,
        }
    }
}

impl DeferredConfig {
    /// Deferring enabled with no custom priority.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            priority: None,
        }
    }

    /// Deferring disabled.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            priority: None,
        }
    }

    /// Deferring enabled at the given paint priority.
    pub fn priority(priority: usize) -> Self {
        Self {
            enabled: true,
            priority: Some(priority),
        }
    }
}

/// Implemented by components whose floating parts paint after their siblings,
/// so menus and overlays appear above surrounding content.
pub trait Deferrable: Sized {
    /// The priority used when deferring is enabled but no custom priority is set.
    const DEFAULT_PRIORITY: usize = 0;

    /// Returns a reference to the deferred configuration.
    fn deferred_config(&self) -> &DeferredConfig;

    /// Returns a mutable reference to the deferred configuration.
    fn deferred_config_mut(&mut self) -> &mut DeferredConfig;

    /// Enables or disables deferred rendering.
    fn deferred(mut self, enabled: bool) -> Self {
        self.deferred_config_mut().enabled = enabled;
        self
    }

    /// Wraps an element with deferred rendering per the current configuration.
    fn apply_deferred(&self, element: impl IntoElement) -> AnyElement
    where
        Self: Sized,
    {
        let config = self.deferred_config();
        if config.enabled {
            let priority = config.priority.unwrap_or(Self::DEFAULT_PRIORITY);
            deferred(element).priority(priority).into_any_element()
        } else {
            element.into_any_element()
        }
    }
}
