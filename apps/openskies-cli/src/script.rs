//! Scripted input: a JSON list of events replayed through the fly controller
//! at a fixed timestep, standing in for a live window.

use openskies_camera::Camera;
use openskies_input::{Action, FlyController, MoveDirection};
use serde::Deserialize;
use std::path::Path;

/// Fly-through used when no script is given.
pub const DEMO_SCRIPT: &str = r#"[
    {"event": "hold", "direction": "forward", "seconds": 0.5},
    {"event": "look", "dx": 150.0, "dy": -40.0},
    {"event": "hold", "direction": "right", "seconds": 1.0},
    {"event": "scroll", "delta": 25.0},
    {"event": "hold", "direction": "up", "seconds": 0.25},
    {"event": "resize", "width": 1280, "height": 720},
    {"event": "look", "dx": -300.0, "dy": 80.0},
    {"event": "wait", "seconds": 0.1},
    {"event": "quit"}
]"#;

/// Longest hold or wait a script may request.
pub const MAX_EVENT_SECONDS: f32 = 3600.0;
/// Most frames a single hold or wait may simulate.
pub const MAX_EVENT_FRAMES: u64 = 1_000_000;

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Hold a movement key for a duration.
    Hold {
        direction: MoveDirection,
        seconds: f32,
    },
    /// Let frames pass with no keys held.
    Wait { seconds: f32 },
    /// Relative mouse motion in pixels.
    Look { dx: f32, dy: f32 },
    /// Scroll wheel delta.
    Scroll { delta: f32 },
    /// Viewport resize in pixels.
    Resize { width: u32, height: u32 },
    /// Tap the cursor-grab key.
    ToggleCursor,
    /// Tap the quit key; replay stops here.
    Quit,
}

/// Errors from loading a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {index}: duration must be finite and non-negative, got {seconds}")]
    InvalidDuration { index: usize, seconds: f32 },
    #[error("event {index}: duration of {seconds}s exceeds the {max}s limit")]
    DurationTooLong { index: usize, seconds: f32, max: f32 },
    #[error("event {index}: {seconds}s at {dt}s per frame exceeds {max} frames")]
    TooManyFrames {
        index: usize,
        seconds: f32,
        dt: f32,
        max: u64,
    },
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: u64,
    pub events: usize,
    pub quit: bool,
}

pub fn parse(json: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let events: Vec<ScriptEvent> = serde_json::from_str(json)?;
    validate(&events)?;
    Ok(events)
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<ScriptEvent>, ScriptError> {
    let data = std::fs::read_to_string(path)?;
    parse(&data)
}

fn validate(events: &[ScriptEvent]) -> Result<(), ScriptError> {
    for (index, event) in events.iter().enumerate() {
        if let ScriptEvent::Hold { seconds, .. } | ScriptEvent::Wait { seconds } = *event {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(ScriptError::InvalidDuration { index, seconds });
            }
            if seconds > MAX_EVENT_SECONDS {
                return Err(ScriptError::DurationTooLong {
                    index,
                    seconds,
                    max: MAX_EVENT_SECONDS,
                });
            }
        }
    }
    Ok(())
}

/// Frames needed to cover `seconds` at `dt` per frame, bounded by [`MAX_EVENT_FRAMES`].
fn frame_count(index: usize, seconds: f32, dt: f32) -> Result<u64, ScriptError> {
    let frames = (f64::from(seconds) / f64::from(dt)).round();
    // NaN and negative counts fail `contains` as well.
    if !(0.0..=MAX_EVENT_FRAMES as f64).contains(&frames) {
        return Err(ScriptError::TooManyFrames {
            index,
            seconds,
            dt,
            max: MAX_EVENT_FRAMES,
        });
    }
    Ok(frames as u64)
}

/// Frame count of every timed event, checked before anything runs.
fn plan_frames(events: &[ScriptEvent], dt: f32) -> Result<Vec<u64>, ScriptError> {
    validate(events)?;
    events
        .iter()
        .enumerate()
        .map(|(index, event)| match *event {
            ScriptEvent::Hold { seconds, .. } | ScriptEvent::Wait { seconds } => {
                frame_count(index, seconds, dt)
            }
            _ => Ok(0),
        })
        .collect()
}

/// Run `events` against `camera`, one `dt`-second frame at a time.
///
/// The whole script is checked first; on error the camera is left untouched.
pub fn replay(
    events: &[ScriptEvent],
    controller: &mut FlyController,
    camera: &mut Camera,
    dt: f32,
) -> Result<ReplaySummary, ScriptError> {
    let _span = tracing::info_span!("replay", events = events.len()).entered();
    let plan = plan_frames(events, dt)?;
    let mut summary = ReplaySummary {
        frames: 0,
        events: 0,
        quit: false,
    };

    for (event, &frames) in events.iter().zip(&plan) {
        summary.events += 1;
        tracing::debug!(?event, "script event");
        match *event {
            ScriptEvent::Hold { direction, .. } => {
                let key = direction.default_key();
                controller.handle_key(key, true);
                run_frames(controller, camera, frames, dt);
                summary.frames += frames;
                controller.handle_key(key, false);
            }
            ScriptEvent::Wait { .. } => {
                run_frames(controller, camera, frames, dt);
                summary.frames += frames;
            }
            ScriptEvent::Look { dx, dy } => controller.look(camera, dx, dy),
            ScriptEvent::Scroll { delta } => controller.scroll(camera, delta),
            ScriptEvent::Resize { width, height } => controller.resize(camera, width, height),
            ScriptEvent::ToggleCursor => tap(controller, Action::ToggleCursor),
            ScriptEvent::Quit => tap(controller, Action::Quit),
        }
        if controller.quit_requested() {
            summary.quit = true;
            break;
        }
    }

    tracing::info!(
        frames = summary.frames,
        events = summary.events,
        quit = summary.quit,
        "replay finished"
    );
    Ok(summary)
}

fn run_frames(controller: &FlyController, camera: &mut Camera, frames: u64, dt: f32) {
    for _ in 0..frames {
        controller.update(camera, dt);
    }
}

fn tap(controller: &mut FlyController, action: Action) {
    if let Some(key) = action.default_key() {
        controller.handle_key(key, true);
        controller.handle_key(key, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::io::Write;

    const DT: f32 = 1.0 / 60.0;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), 800.0 / 600.0)
    }

    #[test]
    fn demo_script_parses_and_quits() {
        let events = parse(DEMO_SCRIPT).unwrap();
        assert_eq!(events.last(), Some(&ScriptEvent::Quit));

        let mut controller = FlyController::default();
        let mut cam = camera();
        let summary = replay(&events, &mut controller, &mut cam, DT).unwrap();
        assert!(summary.quit);
        assert_eq!(summary.events, events.len());
        assert!((cam.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
        assert!((cam.field_of_view() - 65.0).abs() < 1e-3);
    }

    #[test]
    fn hold_forward_for_one_second() {
        let events = parse(r#"[{"event": "hold", "direction": "forward", "seconds": 1.0}]"#)
            .unwrap();
        let mut controller = FlyController::default();
        let mut cam = camera();
        let summary = replay(&events, &mut controller, &mut cam, DT).unwrap();
        assert_eq!(summary.frames, 60);
        assert!(!summary.quit);
        assert!(cam.position.abs_diff_eq(Vec3::ZERO, 1e-3));
        // Key is released afterwards.
        assert!(!controller.is_held(MoveDirection::Forward.default_key()));
    }

    #[test]
    fn quit_stops_replay_early() {
        let events = vec![
            ScriptEvent::Quit,
            ScriptEvent::Hold {
                direction: MoveDirection::Forward,
                seconds: 1.0,
            },
        ];
        let mut controller = FlyController::default();
        let mut cam = camera();
        let summary = replay(&events, &mut controller, &mut cam, DT).unwrap();
        assert!(summary.quit);
        assert_eq!(summary.events, 1);
        assert_eq!(summary.frames, 0);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn toggle_cursor_flips_grab() {
        let events = parse(r#"[{"event": "toggle_cursor"}]"#).unwrap();
        let mut controller = FlyController::default();
        let mut cam = camera();
        replay(&events, &mut controller, &mut cam, DT).unwrap();
        assert!(!controller.cursor_grabbed());
    }

    #[test]
    fn look_then_hold_follows_new_heading() {
        // 900 px at 0.1°/px turns yaw from -90° to 0°, facing +X.
        let events = parse(
            r#"[
                {"event": "look", "dx": 900.0, "dy": 0.0},
                {"event": "hold", "direction": "forward", "seconds": 1.0}
            ]"#,
        )
        .unwrap();
        let mut controller = FlyController::default();
        let mut cam = camera();
        replay(&events, &mut controller, &mut cam, DT).unwrap();
        assert!(cam.position.abs_diff_eq(Vec3::new(3.0, 0.0, 3.0), 1e-3));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = parse(r#"[{"event": "wait", "seconds": 0.1}, {"event": "wait", "seconds": -1.0}]"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidDuration { index: 1, .. }));
    }

    #[test]
    fn huge_duration_is_rejected() {
        let err = parse(r#"[{"event": "wait", "seconds": 1e30}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::DurationTooLong { index: 0, .. }));

        let events = parse(r#"[{"event": "hold", "direction": "up", "seconds": 3600.0}]"#)
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn frame_budget_is_checked_before_running() {
        // An hour at 60 fps fits; the same hour at 1000 fps does not.
        let events = vec![
            ScriptEvent::Scroll { delta: 10.0 },
            ScriptEvent::Hold {
                direction: MoveDirection::Forward,
                seconds: MAX_EVENT_SECONDS,
            },
        ];
        assert_eq!(frame_count(1, MAX_EVENT_SECONDS, DT).unwrap(), 216_000);

        let mut controller = FlyController::default();
        let mut cam = camera();
        let err = replay(&events, &mut controller, &mut cam, 1.0 / 1000.0).unwrap_err();
        assert!(matches!(err, ScriptError::TooManyFrames { index: 1, .. }));
        // Nothing ran, not even the scroll before the offending event.
        assert!((cam.field_of_view() - 90.0).abs() < 1e-4);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn replay_rejects_unvalidated_events() {
        let events = vec![ScriptEvent::Wait { seconds: f32::NAN }];
        let mut controller = FlyController::default();
        let mut cam = camera();
        let err = replay(&events, &mut controller, &mut cam, DT).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidDuration { index: 0, .. }));

        let events = vec![ScriptEvent::Wait { seconds: 1.0 }];
        let err = replay(&events, &mut controller, &mut cam, 0.0).unwrap_err();
        assert!(matches!(err, ScriptError::TooManyFrames { .. }));
    }

    #[test]
    fn unknown_event_is_json_error() {
        let err = parse(r#"[{"event": "teleport"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"[{{"event": "scroll", "delta": 10.0}}]"#).unwrap();
        let events = load(tmp.path()).unwrap();
        assert_eq!(events, vec![ScriptEvent::Scroll { delta: 10.0 }]);
    }
}
