//! Motion presets and the overlay lifecycle.
//!
//! Presets are pure data: an initial keyframe, a resting keyframe, and a
//! timing. Overlay surfaces walk an explicit phase machine; animation
//! progress is derived from the phase, never the other way around.

use std::time::Duration;

use gpui_motion::Interpolate;

mod overlays;
pub use overlays::*;

/// A snapshot of the animatable properties of an overlay surface.
/// Translations are in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Keyframe {
    /// Fully settled: visible and unmoved.
    pub const RESTING: Keyframe = Keyframe {
        opacity: 1.,
        translate_x: 0.,
        translate_y: 0.,
        scale: 1.,
    };
}

impl Interpolate for Keyframe {
    fn lerp_to(&self, to: &Self, delta: f32) -> Self {
        Keyframe {
            opacity: self.opacity.lerp_to(&to.opacity, delta),
            translate_x: self.translate_x.lerp_to(&to.translate_x, delta),
            translate_y: self.translate_y.lerp_to(&to.translate_y, delta),
            scale: self.scale.lerp_to(&to.scale, delta),
        }
    }
}

/// How long a preset runs. All presets ease out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionTiming {
    pub duration: Duration,
}

impl MotionTiming {
    /// Snappy feedback for small surfaces.
    pub const QUICK: MotionTiming = MotionTiming {
        duration: Duration::from_millis(150),
    };

    /// Relaxed motion for larger surfaces.
    pub const GENTLE: MotionTiming = MotionTiming {
        duration: Duration::from_millis(250),
    };

    /// Deliberate motion for full-window surfaces.
    pub const SLOW: MotionTiming = MotionTiming {
        duration: Duration::from_millis(300),
    };

    /// Overshooting pop for attention-grabbing surfaces.
    pub const SNAPPY: MotionTiming = MotionTiming {
        duration: Duration::from_millis(180),
    };
}

/// The entrance/exit animations overlay surfaces can use. Exit mirrors
/// entry: surfaces animate back to the initial keyframe before unmounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPreset {
    Fade,
    SlideFromTop,
    SlideFromBottom,
    SlideFromLeft,
    SlideFromRight,
    Scale,
    Pop,
}

impl MotionPreset {
    /// The off-stage keyframe a surface enters from and exits to.
    pub fn initial(self) -> Keyframe {
        match self {
            MotionPreset::Fade => Keyframe {
                opacity: 0.,
                ..Keyframe::RESTING
            },
            MotionPreset::SlideFromTop => Keyframe {
                opacity: 0.,
                translate_y: -20.,
                ..Keyframe::RESTING
            },
            MotionPreset::SlideFromBottom => Keyframe {
                opacity: 0.,
                translate_y: 20.,
                ..Keyframe::RESTING
            },
            MotionPreset::SlideFromLeft => Keyframe {
                opacity: 0.,
                translate_x: -20.,
                ..Keyframe::RESTING
            },
            MotionPreset::SlideFromRight => Keyframe {
                opacity: 0.,
                translate_x: 20.,
                ..Keyframe::RESTING
            },
            MotionPreset::Scale => Keyframe {
                opacity: 0.,
                scale: 0.95,
                ..Keyframe::RESTING
            },
            MotionPreset::Pop => Keyframe {
                opacity: 0.,
                scale: 0.8,
                ..Keyframe::RESTING
            },
        }
    }

    /// The on-stage keyframe.
    pub fn resting(self) -> Keyframe {
        Keyframe::RESTING
    }

    pub fn timing(self) -> MotionTiming {
        match self {
            MotionPreset::Fade | MotionPreset::Scale => MotionTiming::QUICK,
            MotionPreset::SlideFromTop
            | MotionPreset::SlideFromBottom
            | MotionPreset::SlideFromLeft
            | MotionPreset::SlideFromRight => MotionTiming::GENTLE,
            MotionPreset::Pop => MotionTiming::SNAPPY,
        }
    }

    /// The keyframe at `progress` of the way on stage.
    pub fn at(self, progress: f32) -> Keyframe {
        self.initial().lerp_to(&self.resting(), progress)
    }
}

/// Lifecycle of an overlay surface.
///
/// ```text
/// Closed --open--> Entering --settle--> Open --close--> Exiting --finish--> Closed
/// ```
///
/// `close` is also legal from `Entering`, for surfaces dismissed mid-entry.
/// Every other step is a no-op. A surface is unmounted only in `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Entering,
    Open,
    Exiting,
}

/// Phase machine state for one overlay surface. Owned by an entity so the
/// wrappers can drive it across frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayState {
    phase: OverlayPhase,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Whether the surface should be in the tree at all.
    pub fn is_mounted(&self) -> bool {
        self.phase != OverlayPhase::Closed
    }

    /// Whether the surface is heading on stage.
    pub fn is_presenting(&self) -> bool {
        matches!(self.phase, OverlayPhase::Entering | OverlayPhase::Open)
    }

    /// Closed -> Entering. Returns whether the step was taken.
    pub fn open(&mut self) -> bool {
        self.step(OverlayPhase::Closed, OverlayPhase::Entering)
    }

    /// Entering -> Open.
    pub fn settle(&mut self) -> bool {
        self.step(OverlayPhase::Entering, OverlayPhase::Open)
    }

    /// Open or Entering -> Exiting.
    pub fn close(&mut self) -> bool {
        if matches!(self.phase, OverlayPhase::Open | OverlayPhase::Entering) {
            self.phase = OverlayPhase::Exiting;
            true
        } else {
            false
        }
    }

    /// Exiting -> Closed.
    pub fn finish(&mut self) -> bool {
        self.step(OverlayPhase::Exiting, OverlayPhase::Closed)
    }

    fn step(&mut self, from: OverlayPhase, to: OverlayPhase) -> bool {
        if self.phase == from {
            self.phase = to;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_presets_start_twenty_pixels_off_stage() {
        let left = MotionPreset::SlideFromLeft.initial();
        assert_eq!(left.translate_x, -20., "slide-from-left should start left");
        assert_eq!(left.opacity, 0., "slide presets should start transparent");

        let right = MotionPreset::SlideFromRight.initial();
        assert_eq!(right.translate_x, 20., "slide-from-right should start right");

        let top = MotionPreset::SlideFromTop.initial();
        assert_eq!(top.translate_y, -20., "slide-from-top should start above");

        let bottom = MotionPreset::SlideFromBottom.initial();
        assert_eq!(bottom.translate_y, 20., "slide-from-bottom should start below");
    }

    #[test]
    fn scale_presets_start_shrunk() {
        assert_eq!(MotionPreset::Scale.initial().scale, 0.95);
        assert_eq!(MotionPreset::Pop.initial().scale, 0.8);
    }

    #[test]
    fn every_preset_rests_at_identity() {
        for preset in [
            MotionPreset::Fade,
            MotionPreset::SlideFromTop,
            MotionPreset::SlideFromBottom,
            MotionPreset::SlideFromLeft,
            MotionPreset::SlideFromRight,
            MotionPreset::Scale,
            MotionPreset::Pop,
        ] {
            assert_eq!(
                preset.resting(),
                Keyframe::RESTING,
                "{preset:?} should rest fully visible and unmoved"
            );
            assert_eq!(preset.at(1.), Keyframe::RESTING);
            assert_eq!(preset.at(0.), preset.initial());
        }
    }

    #[test]
    fn midway_keyframe_interpolates() {
        let mid = MotionPreset::SlideFromLeft.at(0.5);
        assert_eq!(mid.translate_x, -10., "translation should be halfway home");
        assert_eq!(mid.opacity, 0.5, "opacity should be halfway up");
    }

    #[test]
    fn phase_machine_walks_the_happy_path() {
        let mut state = OverlayState::new();
        assert_eq!(state.phase(), OverlayPhase::Closed);
        assert!(!state.is_mounted(), "closed surfaces are unmounted");

        assert!(state.open(), "open from closed should step");
        assert_eq!(state.phase(), OverlayPhase::Entering);
        assert!(state.is_mounted());

        assert!(state.settle(), "settle from entering should step");
        assert_eq!(state.phase(), OverlayPhase::Open);

        assert!(state.close(), "close from open should step");
        assert_eq!(state.phase(), OverlayPhase::Exiting);
        assert!(state.is_mounted(), "exiting surfaces stay mounted");

        assert!(state.finish(), "finish from exiting should step");
        assert_eq!(state.phase(), OverlayPhase::Closed);
    }

    #[test]
    fn illegal_steps_are_no_ops() {
        let mut state = OverlayState::new();

        assert!(!state.close(), "close while closed should not step");
        assert!(!state.settle(), "settle while closed should not step");
        assert!(!state.finish(), "finish while closed should not step");
        assert_eq!(state.phase(), OverlayPhase::Closed);

        state.open();
        state.settle();
        assert!(!state.open(), "open while open should not step");
        assert_eq!(state.phase(), OverlayPhase::Open);
    }

    #[test]
    fn close_is_legal_mid_entry() {
        let mut state = OverlayState::new();
        state.open();

        assert!(state.close(), "a surface dismissed mid-entry should exit");
        assert_eq!(state.phase(), OverlayPhase::Exiting);
    }
}
