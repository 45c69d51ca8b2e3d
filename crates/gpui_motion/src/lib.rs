//! Goal-tracking value transitions for GPUI elements.
//!
//! A [`Transition`] follows a goal value over a fixed duration. Retargeting
//! the goal mid-flight restarts the clock from the currently interpolated
//! value, so animations never jump. Evaluation schedules animation frames
//! until the value settles.

use std::{
    borrow::BorrowMut,
    fmt::Debug,
    ops::{Add, Mul, Sub},
    rc::Rc,
    time::{Duration, Instant},
};

use gpui::{
    AnyElement, App, Bounds, Context, Corners, DevicePixels, Edges, Element, ElementId, Entity,
    EntityId, GlobalElementId, InspectorElementId, InteractiveElement, Interactivity, IntoElement,
    LayoutId, ParentElement, Percentage, Pixels, Point, Radians, Rems, Rgba, Size,
    StatefulInteractiveElement, StyleRefinement, Styled, Window, linear, px,
};

/// An animated value that eases towards its goal.
#[derive(Clone)]
pub struct Transition<T: Interpolate + 'static> {
    /// Time the transition takes to reach a newly set goal.
    duration_secs: f32,

    /// Maps a linear time delta in `0..=1` to an eased delta in `0..=1`.
    easing: Rc<dyn Fn(f32) -> f32>,

    state: Entity<TransitionState<T>>,
}

impl<T: Interpolate + 'static> Transition<T> {
    /// Creates a transition backed by keyed window state, so repeated renders
    /// of the same element id share one animation.
    pub fn new(
        id: impl Into<ElementId>,
        window: &mut Window,
        cx: &mut App,
        duration: Duration,
        initial_goal: impl Fn(&mut Window, &mut Context<TransitionState<T>>) -> T,
    ) -> Self {
        Self {
            duration_secs: duration.as_secs_f32(),
            easing: Rc::new(linear),
            state: window.use_keyed_state(id, cx, |window, cx| {
                TransitionState::new(initial_goal(window, cx))
            }),
        }
    }

    /// Creates a transition over an externally owned state entity.
    pub fn from_state(state: Entity<TransitionState<T>>, duration: Duration) -> Self {
        Self {
            duration_secs: duration.as_secs_f32(),
            easing: Rc::new(linear),
            state,
        }
    }

    /// Sets the easing function. It receives a time delta in `0..=1` and must
    /// return a delta in `0..=1`.
    pub fn with_easing(mut self, easing: impl Fn(f32) -> f32 + 'static) -> Self {
        self.easing = Rc::new(easing);
        self
    }

    /// Reads the goal the transition is heading towards.
    pub fn read_goal<'a>(&self, cx: &'a App) -> &'a T {
        &self.state.read(cx).goal
    }

    /// Mutates the goal in place. Returns whether the goal changed. Does not
    /// notify gpui; callers decide whether a repaint is needed.
    pub fn update<R>(
        &self,
        cx: &mut App,
        update: impl FnOnce(&mut T, &mut Context<TransitionState<T>>) -> R,
    ) -> bool {
        let mut was_updated = false;

        self.state.update(cx, |state, cx| {
            let last_goal = state.goal.clone();

            update(&mut state.goal, cx);

            if state.goal == last_goal {
                return;
            };

            state.goal_changed_at = Instant::now();
            state.from = state.from.lerp_to(&last_goal, state.last_delta);

            was_updated = true;
        });

        was_updated
    }

    /// Retargets the goal, restarting from the currently interpolated value.
    /// Returns whether the goal changed.
    pub fn set(&self, cx: &mut App, new_goal: T) -> bool {
        let mut was_updated = false;

        self.state.update(cx, |state, _cx| {
            if new_goal == state.goal {
                return;
            }

            let last_goal = std::mem::replace(&mut state.goal, new_goal);

            state.goal_changed_at = Instant::now();
            state.from = state.from.lerp_to(&last_goal, state.last_delta);

            was_updated = true;
        });

        was_updated
    }

    /// The entity id of the backing state, for targeted notifies.
    pub fn entity_id(&self) -> EntityId {
        self.state.entity_id()
    }

    /// Returns the current eased value and keeps animation frames coming
    /// while the transition is still in flight.
    pub fn evaluate(&self, window: &mut Window, cx: &mut App) -> T {
        let (in_flight, value) = self.tick(cx);

        if in_flight {
            window.request_animation_frame();
        }

        value
    }

    fn tick(&self, cx: &mut App) -> (bool, T) {
        let mut state_entity = self.state.as_mut(cx);
        let state: &mut TransitionState<T> = state_entity.borrow_mut();

        let elapsed_secs = state.goal_changed_at.elapsed().as_secs_f32();
        let delta = (self.easing)((elapsed_secs / self.duration_secs).min(1.));

        debug_assert!(
            (0.0..=1.0).contains(&delta),
            "delta should always be between 0 and 1"
        );

        state.last_delta = delta;

        let value = state.from.lerp_to(&state.goal, delta);

        (delta != 1., value)
    }
}

/// Backing state for a [`Transition`].
#[derive(Clone)]
pub struct TransitionState<T: Interpolate + 'static> {
    goal_changed_at: Instant,
    from: T,
    goal: T,
    last_delta: f32,
}

impl<T: Interpolate + 'static> TransitionState<T> {
    /// Creates state already settled at the given goal.
    pub fn new(goal: T) -> Self {
        Self {
            goal_changed_at: Instant::now(),
            from: goal.clone(),
            goal,
            last_delta: 1.,
        }
    }
}

/// Keyed-state transition constructors on [`Window`].
pub trait WindowTransitionExt {
    /// Returns the transition stored under `id`, creating it with
    /// `initial_goal` on first use.
    fn use_keyed_transition<T: Interpolate + 'static>(
        &mut self,
        id: impl Into<ElementId>,
        cx: &mut App,
        duration: Duration,
        initial_goal: impl Fn(&mut Window, &mut Context<TransitionState<T>>) -> T,
    ) -> Transition<T>;
}

impl WindowTransitionExt for Window {
    fn use_keyed_transition<T: Interpolate + 'static>(
        &mut self,
        id: impl Into<ElementId>,
        cx: &mut App,
        duration: Duration,
        initial_goal: impl Fn(&mut Window, &mut Context<TransitionState<T>>) -> T,
    ) -> Transition<T> {
        Transition::new(id, self, cx, duration, initial_goal)
    }
}

/// Wraps elements and components so styling can follow transition values.
pub trait TransitionExt {
    /// Re-applies `animator` with freshly evaluated transition values on
    /// every frame until all transitions settle.
    fn with_transitions<'a, T>(
        self,
        transitions: T,
        animator: impl Fn(&mut App, Self, T::Values) -> Self + 'static,
    ) -> TransitionElement<'a, Self, T>
    where
        T: TransitionValues<'a>,
        Self: Sized,
    {
        TransitionElement {
            element: Some(self),
            animator: Box::new(animator),
            transitions,
        }
    }
}

impl<E: IntoElement + 'static> TransitionExt for E {}

/// A GPUI element that applies transitions to another element.
pub struct TransitionElement<'a, E, T: TransitionValues<'a>> {
    element: Option<E>,
    transitions: T,
    animator: Box<dyn Fn(&mut App, E, T::Values) -> E + 'a>,
}

impl<E: Element + 'static, T: TransitionValues<'static> + 'static> Element
    for TransitionElement<'static, E, T>
{
    type RequestLayoutState = AnyElement;
    type PrepaintState = ();

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _global_id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let (request_frame, evaluated_values) = self.transitions.evaluate(cx);

        let element = self.element.take().expect("should only be called once");
        let mut element = (self.animator)(cx, element, evaluated_values).into_any_element();

        if request_frame {
            window.request_animation_frame();
        }

        (element.request_layout(window, cx), element)
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        element: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        element.prepaint(window, cx);
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        _bounds: Bounds<Pixels>,
        element: &mut Self::RequestLayoutState,
        _prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        element.paint(window, cx)
    }
}

impl<E: Element + 'static, T: TransitionValues<'static> + 'static> IntoElement
    for TransitionElement<'static, E, T>
{
    type Element = TransitionElement<'static, E, T>;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl<E: Element + Styled + 'static, T: TransitionValues<'static> + 'static> Styled
    for TransitionElement<'static, E, T>
{
    fn style(&mut self) -> &mut StyleRefinement {
        self.element.as_mut().unwrap().style()
    }
}

impl<E: Element + InteractiveElement + 'static, T: TransitionValues<'static> + 'static>
    InteractiveElement for TransitionElement<'static, E, T>
{
    fn interactivity(&mut self) -> &mut Interactivity {
        self.element.as_mut().unwrap().interactivity()
    }
}

impl<E: Element + ParentElement + 'static, T: TransitionValues<'static> + 'static> ParentElement
    for TransitionElement<'static, E, T>
{
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.element.as_mut().unwrap().extend(elements);
    }
}

impl<E: Element + StatefulInteractiveElement + 'static, T: TransitionValues<'static> + 'static>
    StatefulInteractiveElement for TransitionElement<'static, E, T>
{
}

/// A value that can be interpolated towards a goal.
pub trait Interpolate: Clone + PartialEq {
    /// Returns the value `delta` of the way from `self` to `to`.
    fn lerp_to(&self, to: &Self, delta: f32) -> Self;
}

macro_rules! float_interpolate {
    ( $( $ty:ty ),+ ) => {
        $(
            impl Interpolate for $ty {
                fn lerp_to(&self, to: &Self, delta: f32) -> Self {
                    lerp(*self, *to, delta as $ty)
                }
            }
        )+
    };
}

float_interpolate!(f32, f64);

macro_rules! int_interpolate {
    ( $( $ty:ident as $ty_into:ident ),+ ) => {
        $(
            impl Interpolate for $ty {
                fn lerp_to(&self, to: &Self, delta: f32) -> Self {
                    lerp(*self as $ty_into, *to as $ty_into, delta as $ty_into) as $ty
                }
            }
        )+
    };
}

int_interpolate!(
    usize as f32,
    u8 as f32,
    u16 as f32,
    u32 as f32,
    u64 as f64,
    u128 as f64,
    isize as f32,
    i8 as f32,
    i16 as f32,
    i32 as f32,
    i64 as f64,
    i128 as f64
);

macro_rules! struct_interpolate {
    ( $( $ty:ident $( < $gen:ident > )? { $( $n:ident ),+ } ),+ $(,)? ) => {
        $(
            impl$(<$gen: Interpolate + Clone + Debug + Default + PartialEq>)? Interpolate for $ty$(<$gen>)? {
                fn lerp_to(&self, to: &Self, delta: f32) -> Self {
                    $ty$(::<$gen>)? {
                        $(
                            $n: self.$n.lerp_to(&to.$n, delta)
                        ),+
                    }
                }
            }
        )+
    };
}

struct_interpolate!(
    Point<T> { x, y },
    Size<T> { width, height },
    Edges<T> { top, right, bottom, left },
    Corners<T> { top_left, top_right, bottom_right, bottom_left },
    Bounds<T> { origin, size },
    Rgba { r, g, b, a },
);

macro_rules! tuple_struct_interpolate {
    ( $( $ty:ident ( $n:ty ) ),+ ) => {
        $(
            impl Interpolate for $ty {
                fn lerp_to(&self, to: &Self, delta: f32) -> Self {
                    $ty(self.0.lerp_to(&to.0, delta))
                }
            }
        )+
    };
}

tuple_struct_interpolate!(Radians(f32), Percentage(f32), DevicePixels(i32), Rems(f32));

impl Interpolate for Pixels {
    fn lerp_to(&self, to: &Self, delta: f32) -> Self {
        px((self.to_f64() as f32).lerp_to(&(to.to_f64() as f32), delta))
    }
}

fn lerp<T>(a: T, b: T, t: T) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    a + (b - a) * t
}

/// Symmetric cubic easing, slow at both ends.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4. * t * t * t
    } else {
        let f = 2. * t - 2.;
        1. + f * f * f / 2.
    }
}

/// A group of values that can be transitioned together.
pub trait TransitionValues<'a> {
    /// The underlying value types.
    type Values;

    /// Evaluates every transition, reporting whether any is still in flight.
    fn evaluate(&self, cx: &mut App) -> (bool, Self::Values);
}

// Workaround for variadic generics as Rust doesn't support them.
// The main downside to this is that each tuple length needs its own implementation.
macro_rules! impl_transition_values {
    ($first:ident $(, $rest:ident)*) => {
        impl_transition_values!(@recurse () $first $(, $rest)*);
    };

    // Nothing left.
    (@recurse ($($prefix:ident),*) ) => {};

    // Generates an impl for the current prefix + head,
    // then recurses to include the next identifier in the prefix.
    (@recurse ($($prefix:ident),*) $head:ident $(,$tail:ident)*) => {
        impl_transition_values!(@gen ($($prefix,)* $head));
        impl_transition_values!(@recurse ($($prefix,)* $head) $($tail),*);
    };

    (@gen ($($names:ident),+)) => {
        #[allow(non_snake_case, unused_parens)]
        impl<'a, $($names),+> TransitionValues<'a> for ( $( Transition<$names> ),+, )
        where
            $( $names: Interpolate + 'static ),+
        {
            type Values = ( $( $names ),+);

            fn evaluate(&self, cx: &mut App) -> (bool, Self::Values)
            {
                let ( $( $names ),+ ,) = self;
                let mut request_frame = false;

                let evaluated_values = ($({
                    let (this_request_frame, value) = $names.tick(cx);
                    request_frame = this_request_frame || request_frame;
                    value
                }),+);

                (request_frame, evaluated_values)
            }
        }
    };
}

impl_transition_values!(A, B, C, D, E, F);

impl<'a, A> TransitionValues<'a> for Transition<A>
where
    A: Interpolate + 'static,
{
    type Values = A;

    fn evaluate(&self, cx: &mut App) -> (bool, Self::Values) {
        self.tick(cx)
    }
}

#[cfg(test)]
mod interpolate_tests {
    use super::*;
    use gpui::{point, size};

    #[test]
    fn floats_lerp_linearly() {
        assert_eq!(0f32.lerp_to(&10., 0.), 0., "delta 0 should return the start");
        assert_eq!(0f32.lerp_to(&10., 0.5), 5., "delta 0.5 should return the midpoint");
        assert_eq!(0f32.lerp_to(&10., 1.), 10., "delta 1 should return the goal");
    }

    #[test]
    fn pixels_lerp_through_float_space() {
        let half = px(0.).lerp_to(&px(48.), 0.5);
        assert_eq!(half, px(24.), "pixels should interpolate componentwise");
    }

    #[test]
    fn composite_types_lerp_componentwise() {
        let from = Bounds::new(point(px(0.), px(0.)), size(px(0.), px(100.)));
        let to = Bounds::new(point(px(10.), px(20.)), size(px(100.), px(200.)));
        let mid = from.lerp_to(&to, 0.5);

        assert_eq!(mid.origin, point(px(5.), px(10.)), "origin should lerp");
        assert_eq!(mid.size, size(px(50.), px(150.)), "size should lerp");
    }

    #[test]
    fn rgba_lerps_per_channel() {
        let black = Rgba { r: 0., g: 0., b: 0., a: 1. };
        let white = Rgba { r: 1., g: 1., b: 1., a: 0. };
        let mid = black.lerp_to(&white, 0.5);

        assert_eq!(mid.r, 0.5, "red channel should lerp");
        assert_eq!(mid.a, 0.5, "alpha channel should lerp");
    }

    #[test]
    fn ease_in_out_cubic_hits_endpoints() {
        assert_eq!(ease_in_out_cubic(0.), 0., "easing should start at 0");
        assert_eq!(ease_in_out_cubic(1.), 1., "easing should end at 1");
        assert!(
            (ease_in_out_cubic(0.5) - 0.5).abs() < f32::EPSILON,
            "cubic ease in/out should cross the midpoint"
        );
    }
}

#[cfg(all(test, feature = "test-support"))]
mod transition_tests {
    use super::*;
    use gpui::{AppContext, TestAppContext};

    #[gpui::test]
    fn set_is_a_no_op_for_an_unchanged_goal(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|_cx| TransitionState::new(1f32));
            let transition = Transition::from_state(state, Duration::from_millis(200));

            assert!(
                !transition.set(cx, 1.),
                "setting the current goal should report no change"
            );
            assert!(
                transition.set(cx, 0.),
                "setting a new goal should report a change"
            );
            assert_eq!(
                transition.read_goal(cx),
                &0.,
                "goal should reflect the latest set"
            );
        });
    }

    #[gpui::test]
    fn update_reports_goal_changes(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let state = cx.new(|_cx| TransitionState::new(0f32));
            let transition = Transition::from_state(state, Duration::from_millis(200));

            let changed = transition.update(cx, |goal, _cx| *goal = 2.);
            assert!(changed, "mutating the goal should report a change");

            let changed = transition.update(cx, |goal, _cx| *goal = 2.);
            assert!(!changed, "writing the same goal should report no change");
        });
    }
}
