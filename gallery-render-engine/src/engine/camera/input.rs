//! Per-frame input samples.
//!
//! Each input device has its own channel resource with exactly one writer: the
//! sampling system for that device, which overwrites the channel with an immutable
//! sample every frame. The viewpoint tick reads every channel once and never writes
//! back.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Walk and turn axes from held keys, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardSample {
    /// Positive walks toward the back wall.
    pub walk: f32,
    /// Positive turns right.
    pub turn: f32,
}

/// Cursor position normalised to `[-1, 1]` on both axes, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub normalized: Vec2,
}

/// Active touch points in window pixels, ordered by touch id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchSample {
    pub points: Vec<Vec2>,
    pub viewport: Vec2,
}

/// Wheel travel this frame, split by the unit the device reported. Positive is
/// scrolling up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollSample {
    pub lines: f32,
    pub pixels: f32,
}

/// Everything the controller reads in one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub keyboard: KeyboardSample,
    /// `None` while the cursor is outside the window.
    pub pointer: Option<PointerSample>,
    pub touch: TouchSample,
    pub scroll: ScrollSample,
}

/// Latest sample from one input device.
#[derive(Resource, Debug, Default)]
pub struct InputChannel<T: Send + Sync + 'static> {
    latest: T,
}

impl<T: Send + Sync + 'static> InputChannel<T> {
    pub fn publish(&mut self, sample: T) {
        self.latest = sample;
    }

    pub fn latest(&self) -> &T {
        &self.latest
    }
}

pub type KeyboardChannel = InputChannel<KeyboardSample>;
pub type PointerChannel = InputChannel<Option<PointerSample>>;
pub type TouchChannel = InputChannel<TouchSample>;
pub type ScrollChannel = InputChannel<ScrollSample>;

pub fn sample_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut channel: ResMut<KeyboardChannel>) {
    let axis = |positive: [KeyCode; 2], negative: [KeyCode; 2]| {
        let mut value: f32 = 0.0;
        if keyboard.any_pressed(positive) {
            value += 1.0;
        }
        if keyboard.any_pressed(negative) {
            value -= 1.0;
        }
        value
    };

    channel.publish(KeyboardSample {
        walk: axis(
            [KeyCode::KeyW, KeyCode::ArrowUp],
            [KeyCode::KeyS, KeyCode::ArrowDown],
        ),
        turn: axis(
            [KeyCode::KeyD, KeyCode::ArrowRight],
            [KeyCode::KeyA, KeyCode::ArrowLeft],
        ),
    });
}

pub fn sample_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut channel: ResMut<PointerChannel>,
) {
    let sample = windows.single().ok().and_then(|window| {
        let cursor = window.cursor_position()?;
        normalize_pointer(cursor, Vec2::new(window.width(), window.height()))
    });
    channel.publish(sample);
}

pub fn sample_touch(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut channel: ResMut<TouchChannel>,
) {
    let mut active: Vec<(u64, Vec2)> = touches
        .iter()
        .map(|touch| (touch.id(), touch.position()))
        .collect();
    active.sort_by_key(|(id, _)| *id);

    let viewport = windows
        .single()
        .map(|window| Vec2::new(window.width(), window.height()))
        .unwrap_or(Vec2::ZERO);

    channel.publish(TouchSample {
        points: active.into_iter().map(|(_, position)| position).collect(),
        viewport,
    });
}

pub fn sample_scroll(mut wheel: EventReader<MouseWheel>, mut channel: ResMut<ScrollChannel>) {
    let mut sample = ScrollSample::default();
    for event in wheel.read() {
        match event.unit {
            MouseScrollUnit::Line => sample.lines += event.y,
            MouseScrollUnit::Pixel => sample.pixels += event.y,
        }
    }

    channel.publish(sample);
}

/// Map a window-space cursor (origin top left, y down) into `[-1, 1]`, y up.
pub fn normalize_pointer(cursor: Vec2, viewport: Vec2) -> Option<PointerSample> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 || !cursor.is_finite() {
        return None;
    }

    let normalized = Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        1.0 - cursor.y / viewport.y * 2.0,
    );
    Some(PointerSample {
        normalized: normalized.clamp(Vec2::NEG_ONE, Vec2::ONE),
    })
}
