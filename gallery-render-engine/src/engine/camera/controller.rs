//! First-person viewpoint for walking the corridor.
//!
//! Depth travel and look direction are independent. Depth integrates a velocity
//! hint plus discrete impulses into a clamped target; look direction follows the
//! live pointing source plus an integrated keyboard turn. Rendered values ease
//! toward their targets with rates scaled by elapsed time.

use bevy::prelude::*;
use constants::viewpoint::{
    ANGULAR_SMOOTHING_RATE, BACK_WALL_SAFETY_MARGIN, DEPTH_SMOOTHING_RATE, DRAG_PITCH_GAIN,
    DRAG_WALK_GAIN, DRAG_YAW_GAIN, EYE_HEIGHT, LATERAL_SMOOTHING_RATE, LOOK_RADIUS, MAX_DEPTH,
    MAX_PITCH, MAX_YAW, PINCH_WALK_GAIN, PIXEL_SCROLL_SCALE, SCROLL_STEP, TURN_RATE,
    VERTICAL_SMOOTHING_RATE, WALK_SPEED,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use thiserror::Error;

use super::gesture::{GestureOutput, TouchGesture};
use super::input::InputFrame;
use crate::engine::layout::CorridorLayout;
use crate::engine::smoothing::{clamp_symmetric, smooth_toward};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewpointConfig {
    pub eye_height: f32,
    pub max_depth: f32,
    pub back_wall_safety_margin: f32,
    pub walk_speed: f32,
    pub turn_rate: f32,
    pub drag_walk_gain: f32,
    pub pinch_walk_gain: f32,
    pub scroll_step: f32,
    /// Wheel lines per reported pixel.
    pub pixel_scroll_scale: f32,
    pub max_yaw: f32,
    pub max_pitch: f32,
    pub look_radius: f32,
    pub drag_yaw_gain: f32,
    pub drag_pitch_gain: f32,
    pub depth_smoothing_rate: f32,
    pub lateral_smoothing_rate: f32,
    pub vertical_smoothing_rate: f32,
    pub angular_smoothing_rate: f32,
}

impl Default for ViewpointConfig {
    fn default() -> Self {
        Self {
            eye_height: EYE_HEIGHT,
            max_depth: MAX_DEPTH,
            back_wall_safety_margin: BACK_WALL_SAFETY_MARGIN,
            walk_speed: WALK_SPEED,
            turn_rate: TURN_RATE,
            drag_walk_gain: DRAG_WALK_GAIN,
            pinch_walk_gain: PINCH_WALK_GAIN,
            scroll_step: SCROLL_STEP,
            pixel_scroll_scale: PIXEL_SCROLL_SCALE,
            max_yaw: MAX_YAW,
            max_pitch: MAX_PITCH,
            look_radius: LOOK_RADIUS,
            drag_yaw_gain: DRAG_YAW_GAIN,
            drag_pitch_gain: DRAG_PITCH_GAIN,
            depth_smoothing_rate: DEPTH_SMOOTHING_RATE,
            lateral_smoothing_rate: LATERAL_SMOOTHING_RATE,
            vertical_smoothing_rate: VERTICAL_SMOOTHING_RATE,
            angular_smoothing_rate: ANGULAR_SMOOTHING_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewpointConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("max_depth must be finite, got {0}")]
    NonFiniteMaxDepth(f32),

    #[error("max_pitch must stay below a quarter turn, got {0}")]
    PitchTooSteep(f32),
}

impl ViewpointConfig {
    pub fn validate(&self) -> Result<(), ViewpointConfigError> {
        let positive = [
            ("eye_height", self.eye_height),
            ("back_wall_safety_margin", self.back_wall_safety_margin),
            ("walk_speed", self.walk_speed),
            ("turn_rate", self.turn_rate),
            ("drag_walk_gain", self.drag_walk_gain),
            ("pinch_walk_gain", self.pinch_walk_gain),
            ("scroll_step", self.scroll_step),
            ("pixel_scroll_scale", self.pixel_scroll_scale),
            ("max_yaw", self.max_yaw),
            ("max_pitch", self.max_pitch),
            ("look_radius", self.look_radius),
            ("drag_yaw_gain", self.drag_yaw_gain),
            ("drag_pitch_gain", self.drag_pitch_gain),
            ("depth_smoothing_rate", self.depth_smoothing_rate),
            ("lateral_smoothing_rate", self.lateral_smoothing_rate),
            ("vertical_smoothing_rate", self.vertical_smoothing_rate),
            ("angular_smoothing_rate", self.angular_smoothing_rate),
        ];
        if let Some((field, value)) = positive
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(ViewpointConfigError::NotPositive { field, value });
        }

        if !self.max_depth.is_finite() {
            return Err(ViewpointConfigError::NonFiniteMaxDepth(self.max_depth));
        }
        if self.max_pitch >= FRAC_PI_2 {
            return Err(ViewpointConfigError::PitchTooSteep(self.max_pitch));
        }
        Ok(())
    }
}

/// Depth range the viewpoint may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelBounds {
    pub min_depth: f32,
    pub max_depth: f32,
}

impl TravelBounds {
    /// `min_depth` is capped at `max_depth`, so a corridor shorter than the safety
    /// margin pins the viewpoint at the entrance instead of inverting the range.
    pub fn new(min_depth: f32, max_depth: f32) -> Self {
        Self {
            min_depth: min_depth.min(max_depth),
            max_depth,
        }
    }

    pub fn from_layout(layout: &CorridorLayout, config: &ViewpointConfig) -> Self {
        Self::new(
            layout.back_wall_depth + config.back_wall_safety_margin,
            config.max_depth,
        )
    }

    pub fn clamp(&self, depth: f32) -> f32 {
        depth.max(self.min_depth).min(self.max_depth)
    }

    pub fn contains(&self, depth: f32) -> bool {
        (self.min_depth..=self.max_depth).contains(&depth)
    }
}

/// Targets and eased values the controller keeps between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewpointState {
    pub target_depth: f32,
    /// Walking speed applied this tick; positive walks toward the back wall.
    pub velocity_hint: f32,
    pub yaw_target: f32,
    pub pitch_target: f32,
    pub smoothed_yaw: f32,
    pub smoothed_pitch: f32,
}

/// Where the camera is and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewpointPose {
    pub position: Vec3,
    pub look_target: Vec3,
}

impl ViewpointPose {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.look_target, Vec3::Y)
    }
}

/// Sole owner of the viewpoint. Only [`advance`](Self::advance) and
/// [`set_bounds`](Self::set_bounds) change it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewpointController {
    config: ViewpointConfig,
    bounds: TravelBounds,
    state: ViewpointState,
    position: Vec3,
    gesture: TouchGesture,
    /// Last pointing input as (yaw, pitch) fractions of the look limits. Held while
    /// no pointing source is live.
    pointing: Vec2,
    /// Accumulated keyboard turn in radians.
    keyboard_yaw: f32,
}

impl ViewpointController {
    /// Start at the entrance end of `bounds`, at eye height, looking straight ahead.
    pub fn new(config: ViewpointConfig, bounds: TravelBounds) -> Self {
        let start_depth = bounds.max_depth;
        Self {
            config,
            bounds,
            state: ViewpointState {
                target_depth: start_depth,
                velocity_hint: 0.0,
                yaw_target: 0.0,
                pitch_target: 0.0,
                smoothed_yaw: 0.0,
                smoothed_pitch: 0.0,
            },
            position: Vec3::new(0.0, config.eye_height, start_depth),
            gesture: TouchGesture::Idle,
            pointing: Vec2::ZERO,
            keyboard_yaw: 0.0,
        }
    }

    pub fn config(&self) -> &ViewpointConfig {
        &self.config
    }

    pub fn bounds(&self) -> TravelBounds {
        self.bounds
    }

    pub fn state(&self) -> &ViewpointState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn gesture(&self) -> TouchGesture {
        self.gesture
    }

    /// Replace the travel range, pulling both the target and the rendered depth
    /// back inside it.
    pub fn set_bounds(&mut self, bounds: TravelBounds) {
        self.bounds = bounds;
        self.state.target_depth = bounds.clamp(self.state.target_depth);
        self.position.z = bounds.clamp(self.position.z);
    }

    /// Run one tick. A zero, negative or non-finite `dt` changes nothing.
    pub fn advance(&mut self, dt: f32, input: &InputFrame) -> ViewpointPose {
        if !dt.is_finite() || dt <= 0.0 {
            return self.pose();
        }

        let was_touching = self.gesture.is_touching();
        let gesture = self.gesture.update(&input.touch.points);

        self.advance_depth(dt, input, gesture);
        self.advance_look(dt, input, gesture, was_touching);
        self.pose()
    }

    pub fn pose(&self) -> ViewpointPose {
        let radius = self.config.look_radius;
        let yaw = self.state.smoothed_yaw;
        let pitch = self.state.smoothed_pitch;

        ViewpointPose {
            position: self.position,
            look_target: self.position
                + Vec3::new(yaw.sin() * radius, radius * pitch.tan(), -yaw.cos() * radius),
        }
    }

    fn advance_depth(&mut self, dt: f32, input: &InputFrame, gesture: GestureOutput) {
        let config = self.config;

        // A live touch gesture replaces the keyboard for this tick.
        let (velocity_hint, touch_impulse) = match gesture {
            GestureOutput::Drag { offset } => (-offset.y * config.drag_walk_gain, 0.0),
            GestureOutput::Pinch { spread_delta } => (0.0, spread_delta * config.pinch_walk_gain),
            GestureOutput::None => (unit_axis(input.keyboard.walk) * config.walk_speed, 0.0),
        };
        let scroll_lines = finite_or_zero(input.scroll.lines)
            + finite_or_zero(input.scroll.pixels) * config.pixel_scroll_scale;
        let scroll_impulse = scroll_lines * config.scroll_step;

        self.state.velocity_hint = velocity_hint;
        self.state.target_depth = self.bounds.clamp(
            self.state.target_depth - velocity_hint * dt - touch_impulse - scroll_impulse,
        );

        let depth = smooth_toward(
            self.position.z,
            self.state.target_depth,
            config.depth_smoothing_rate,
            dt,
        );
        self.position = Vec3::new(
            smooth_toward(self.position.x, 0.0, config.lateral_smoothing_rate, dt),
            smooth_toward(
                self.position.y,
                config.eye_height,
                config.vertical_smoothing_rate,
                dt,
            ),
            self.bounds.clamp(depth),
        );
    }

    fn advance_look(
        &mut self,
        dt: f32,
        input: &InputFrame,
        gesture: GestureOutput,
        was_touching: bool,
    ) {
        let config = self.config;
        let viewport = input.touch.viewport;

        match gesture {
            GestureOutput::Drag { offset } if viewport.x > 0.0 && viewport.y > 0.0 => {
                self.pointing = Vec2::new(
                    offset.x / viewport.x * config.drag_yaw_gain,
                    -offset.y / viewport.y * config.drag_pitch_gain,
                )
                .clamp(Vec2::NEG_ONE, Vec2::ONE);
            }
            // Pinching, suppressed, or a drag without a usable viewport.
            _ if self.gesture.is_touching() => {}
            _ => {
                if was_touching {
                    self.pointing = Vec2::ZERO;
                }
                if let Some(pointer) = input.pointer.filter(|p| p.normalized.is_finite()) {
                    self.pointing = pointer.normalized.clamp(Vec2::NEG_ONE, Vec2::ONE);
                }
            }
        }

        let max_yaw = config.max_yaw;
        let max_pitch = config.max_pitch;
        let turn = unit_axis(input.keyboard.turn);

        self.keyboard_yaw = clamp_symmetric(self.keyboard_yaw + turn * config.turn_rate * dt, max_yaw);
        self.state.yaw_target = clamp_symmetric(self.pointing.x * max_yaw + self.keyboard_yaw, max_yaw);
        self.state.pitch_target = clamp_symmetric(self.pointing.y * max_pitch, max_pitch);

        let rate = config.angular_smoothing_rate;
        self.state.smoothed_yaw = clamp_symmetric(
            smooth_toward(self.state.smoothed_yaw, self.state.yaw_target, rate, dt),
            max_yaw,
        );
        self.state.smoothed_pitch = clamp_symmetric(
            smooth_toward(self.state.smoothed_pitch, self.state.pitch_target, rate, dt),
            max_pitch,
        );
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

fn unit_axis(value: f32) -> f32 {
    finite_or_zero(value).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::input::{KeyboardSample, PointerSample, ScrollSample, TouchSample};
    use crate::engine::layout::{CorridorConfig, LayoutGenerator};
    use proptest::prelude::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn controller() -> ViewpointController {
        ViewpointController::new(ViewpointConfig::default(), TravelBounds::new(-18.5, 6.0))
    }

    fn walking(walk: f32) -> InputFrame {
        InputFrame {
            keyboard: KeyboardSample { walk, turn: 0.0 },
            ..default()
        }
    }

    fn pointing(x: f32, y: f32) -> InputFrame {
        InputFrame {
            pointer: Some(PointerSample {
                normalized: Vec2::new(x, y),
            }),
            ..default()
        }
    }

    fn touching(points: &[Vec2]) -> InputFrame {
        InputFrame {
            touch: TouchSample {
                points: points.to_vec(),
                viewport: VIEWPORT,
            },
            ..default()
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_starts_at_entrance_looking_ahead() {
        let pose = controller().pose();

        assert_eq!(pose.position, Vec3::new(0.0, EYE_HEIGHT, 6.0));
        assert_eq!(pose.look_target, Vec3::new(0.0, EYE_HEIGHT, 1.0));
    }

    #[test]
    fn test_keyboard_walk_moves_target() {
        let mut controller = controller();
        controller.advance(0.1, &walking(1.0));

        assert_close(controller.state().target_depth, 5.0);
        assert_close(controller.state().velocity_hint, WALK_SPEED);
        assert!(controller.position().z < 6.0);
        assert!(controller.position().z > 5.0);
    }

    #[test]
    fn test_pixel_scroll_uses_configured_scale() {
        let frame = InputFrame {
            scroll: ScrollSample {
                lines: 0.0,
                pixels: 20.0,
            },
            ..default()
        };

        let mut default_scale = controller();
        default_scale.advance(0.1, &frame);
        assert_close(default_scale.state().target_depth, 5.0);

        let config = ViewpointConfig {
            pixel_scroll_scale: 0.1,
            ..default()
        };
        let mut tuned = ViewpointController::new(config, TravelBounds::new(-18.5, 6.0));
        tuned.advance(0.1, &frame);
        assert_close(tuned.state().target_depth, 4.0);
    }

    #[test]
    fn test_walking_stops_at_back_wall_margin() {
        let mut controller = controller();
        for _ in 0..200 {
            controller.advance(0.1, &walking(1.0));
        }

        assert_eq!(controller.state().target_depth, -18.5);
        assert_close(controller.position().z, -18.5);
        assert!(controller.position().z >= -18.5);
    }

    #[test]
    fn test_touch_drag_overrides_keyboard() {
        let mut controller = controller();
        let mut frame = touching(&[Vec2::new(100.0, 100.0)]);
        frame.keyboard.walk = 1.0;
        controller.advance(0.1, &frame);
        assert_close(controller.state().velocity_hint, 0.0);

        // Dragging down walks back toward the entrance.
        frame.touch.points = vec![Vec2::new(100.0, 140.0)];
        controller.advance(0.1, &frame);
        assert_close(controller.state().velocity_hint, -2.0);
        assert_eq!(controller.state().target_depth, 6.0);
    }

    #[test]
    fn test_pinch_walks_without_turning() {
        let mut controller = controller();
        controller.advance(0.1, &pointing(0.5, 0.0));
        let yaw_before = controller.state().yaw_target;

        controller.advance(0.1, &touching(&[Vec2::new(300.0, 300.0), Vec2::new(400.0, 300.0)]));
        controller.advance(0.1, &touching(&[Vec2::new(275.0, 300.0), Vec2::new(425.0, 300.0)]));

        assert_close(controller.state().target_depth, 5.0);
        assert_eq!(controller.state().yaw_target, yaw_before);
    }

    #[test]
    fn test_finger_left_after_pinch_does_not_look() {
        let mut controller = controller();
        controller.advance(0.1, &touching(&[Vec2::new(300.0, 300.0), Vec2::new(400.0, 300.0)]));
        controller.advance(0.1, &touching(&[Vec2::new(300.0, 300.0)]));
        controller.advance(0.1, &touching(&[Vec2::new(700.0, 100.0)]));

        assert_eq!(controller.gesture(), TouchGesture::Suppressed);
        assert_eq!(controller.state().yaw_target, 0.0);
        assert_eq!(controller.state().pitch_target, 0.0);
    }

    #[test]
    fn test_release_returns_look_to_neutral() {
        let mut controller = controller();
        controller.advance(0.1, &touching(&[Vec2::new(200.0, 300.0)]));
        controller.advance(0.1, &touching(&[Vec2::new(600.0, 300.0)]));
        assert_close(controller.state().yaw_target, MAX_YAW);

        controller.advance(0.1, &touching(&[]));
        assert_eq!(controller.state().yaw_target, 0.0);

        // A fresh touch starts from its own origin.
        controller.advance(0.1, &touching(&[Vec2::new(600.0, 300.0)]));
        assert_eq!(controller.state().yaw_target, 0.0);
    }

    #[test]
    fn test_pointer_is_held_when_absent() {
        let mut controller = controller();
        controller.advance(0.1, &pointing(1.0, -1.0));
        controller.advance(0.1, &InputFrame::default());

        assert_close(controller.state().yaw_target, MAX_YAW);
        assert_close(controller.state().pitch_target, -MAX_PITCH);
    }

    #[test]
    fn test_touch_drag_beats_pointer() {
        let mut controller = controller();
        let mut frame = touching(&[Vec2::new(200.0, 300.0)]);
        frame.pointer = Some(PointerSample {
            normalized: Vec2::new(-1.0, 0.0),
        });
        controller.advance(0.1, &frame);
        frame.touch.points = vec![Vec2::new(400.0, 300.0)];
        controller.advance(0.1, &frame);

        assert_close(controller.state().yaw_target, 0.5 * MAX_YAW);
    }

    #[test]
    fn test_keyboard_turn_adds_to_pointer() {
        let mut controller = controller();
        let mut frame = pointing(0.25, 0.0);
        frame.keyboard.turn = 1.0;
        controller.advance(0.1, &frame);

        assert_close(
            controller.state().yaw_target,
            0.25 * MAX_YAW + TURN_RATE * 0.1,
        );
    }

    #[test]
    fn test_degenerate_dt_is_a_no_op() {
        let mut controller = controller();
        let before = controller.clone();

        for dt in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let pose = controller.advance(dt, &walking(1.0));
            assert_eq!(pose, before.pose());
        }
        assert_eq!(controller, before);
    }

    #[test]
    fn test_malformed_samples_contribute_nothing() {
        let mut controller = controller();
        let frame = InputFrame {
            keyboard: KeyboardSample {
                walk: f32::NAN,
                turn: f32::INFINITY,
            },
            pointer: Some(PointerSample {
                normalized: Vec2::new(f32::NAN, 0.0),
            }),
            scroll: ScrollSample {
                lines: f32::NEG_INFINITY,
                pixels: f32::NAN,
            },
            ..default()
        };
        controller.advance(0.1, &frame);

        assert_eq!(controller.state().target_depth, 6.0);
        assert_eq!(controller.state().yaw_target, 0.0);
        assert_eq!(controller.position().z, 6.0);
    }

    #[test]
    fn test_smoothing_is_frame_rate_independent() {
        let scroll = InputFrame {
            scroll: ScrollSample {
                lines: 5.0,
                ..default()
            },
            ..default()
        };

        let mut coarse = controller();
        coarse.advance(0.1, &scroll);

        let mut fine = controller();
        fine.advance(0.01, &scroll);
        for _ in 0..9 {
            fine.advance(0.01, &InputFrame::default());
        }

        assert_close(coarse.state().target_depth, 1.0);
        assert_close(fine.state().target_depth, 1.0);
        assert_close(coarse.position().z, fine.position().z);
    }

    #[test]
    fn test_look_target_follows_yaw() {
        let mut controller = controller();
        for _ in 0..100 {
            controller.advance(0.1, &pointing(1.0, 0.0));
        }

        let pose = controller.pose();
        let offset = pose.look_target - pose.position;
        assert_close(offset.x, MAX_YAW.sin() * LOOK_RADIUS);
        assert_close(offset.y, 0.0);
        assert_close(offset.z, -MAX_YAW.cos() * LOOK_RADIUS);
    }

    #[test]
    fn test_shrinking_bounds_pull_viewpoint_forward() {
        let mut controller = ViewpointController::new(
            ViewpointConfig::default(),
            TravelBounds::new(-30.0, 6.0),
        );
        for _ in 0..200 {
            controller.advance(0.1, &walking(1.0));
        }
        assert!(controller.position().z < -20.0);

        controller.set_bounds(TravelBounds::new(-18.5, 6.0));

        assert_eq!(controller.state().target_depth, -18.5);
        assert_eq!(controller.position().z, -18.5);
    }

    #[test]
    fn test_bounds_from_layout() {
        let layout = LayoutGenerator::new(CorridorConfig::default())
            .unwrap()
            .generate(0);
        let bounds = TravelBounds::from_layout(&layout, &ViewpointConfig::default());

        assert_eq!(bounds, TravelBounds::new(-18.5, 6.0));
        assert_eq!(TravelBounds::new(10.0, 6.0).min_depth, 6.0);
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(ViewpointConfig::default().validate(), Ok(()));

        let config = ViewpointConfig {
            walk_speed: 0.0,
            ..default()
        };
        assert_eq!(
            config.validate(),
            Err(ViewpointConfigError::NotPositive {
                field: "walk_speed",
                value: 0.0,
            })
        );

        let config = ViewpointConfig {
            pixel_scroll_scale: -0.05,
            ..default()
        };
        assert_eq!(
            config.validate(),
            Err(ViewpointConfigError::NotPositive {
                field: "pixel_scroll_scale",
                value: -0.05,
            })
        );

        let config = ViewpointConfig {
            max_pitch: 2.0,
            ..default()
        };
        assert_eq!(
            config.validate(),
            Err(ViewpointConfigError::PitchTooSteep(2.0))
        );
    }

    fn frame_strategy() -> impl Strategy<Value = (f32, InputFrame)> {
        (
            -0.1f32..0.5,
            -1.5f32..1.5,
            -1.5f32..1.5,
            proptest::option::of((-1.0f32..1.0, -1.0f32..1.0)),
            proptest::collection::vec((0.0f32..800.0, 0.0f32..600.0), 0..3),
            -1.0e3f32..1.0e3,
        )
            .prop_map(|(dt, walk, turn, pointer, touches, lines)| {
                let frame = InputFrame {
                    keyboard: KeyboardSample { walk, turn },
                    pointer: pointer.map(|(x, y)| PointerSample {
                        normalized: Vec2::new(x, y),
                    }),
                    touch: TouchSample {
                        points: touches.into_iter().map(|(x, y)| Vec2::new(x, y)).collect(),
                        viewport: VIEWPORT,
                    },
                    scroll: ScrollSample { lines, pixels: lines * 20.0 },
                };
                (dt, frame)
            })
    }

    proptest! {
        #[test]
        fn prop_viewpoint_stays_in_bounds(
            ticks in proptest::collection::vec(frame_strategy(), 1..200)
        ) {
            let mut controller = controller();
            let bounds = controller.bounds();

            for (dt, frame) in &ticks {
                controller.advance(*dt, frame);

                prop_assert!(bounds.contains(controller.position().z));
                prop_assert!(bounds.contains(controller.state().target_depth));
                prop_assert!(controller.state().smoothed_yaw.abs() <= MAX_YAW);
                prop_assert!(controller.state().smoothed_pitch.abs() <= MAX_PITCH);
            }
        }
    }
}
