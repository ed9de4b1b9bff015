use std::time::{Duration, Instant};

use crate::cameras::CameraMode;
use crate::error::ViewerError;

pub const DEFAULT_CAPTURE_DURATION: Duration = Duration::from_millis(10_000);

/// External frame-grabbing recorder (e.g. a GIF encoder). Every call may
/// fail; failures terminate the session but never the render loop.
pub trait FrameRecorder {
    fn start(&mut self) -> Result<(), ViewerError>;
    fn capture_frame(&mut self) -> Result<(), ViewerError>;
    fn stop(&mut self) -> Result<(), ViewerError>;
    fn save(&mut self) -> Result<(), ViewerError>;
}

struct ActiveSession {
    recorder: Box<dyn FrameRecorder>,
    name: String,
    started_at: Instant,
    duration: Duration,
    saved_camera: CameraMode,
}

/// Orchestrates one timed recording at a time. The camera pose is snapshotted
/// at start and handed back when the session ends, normally or not, so the
/// caller can restore it.
pub struct CaptureController {
    session: Option<ActiveSession>,
    status: String,
}

impl CaptureController {
    pub fn new() -> Self {
        Self {
            session: None,
            status: String::new(),
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.session.is_some()
    }

    /// Human-readable state of the last/current session, for a status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn start(
        &mut self,
        mut recorder: Box<dyn FrameRecorder>,
        name: impl Into<String>,
        duration: Duration,
        now: Instant,
        camera: &CameraMode,
    ) -> Result<(), ViewerError> {
        if self.session.is_some() {
            return Err(ViewerError::capture(
                "start",
                "an export is already in progress",
            ));
        }

        let name = name.into();
        recorder.start()?;

        self.status = format!(
            "Recording {} ({:.1}s)...",
            name,
            duration.as_secs_f32()
        );
        log::info!("{}", self.status);

        self.session = Some(ActiveSession {
            recorder,
            name,
            started_at: now,
            duration,
            saved_camera: camera.clone(),
        });
        Ok(())
    }

    /// Called once per rendered frame while a session may be active. Returns
    /// the camera snapshot to restore when the session ended on this frame.
    pub fn frame_rendered(&mut self, now: Instant) -> Option<CameraMode> {
        let session = self.session.as_mut()?;

        let elapsed = now.duration_since(session.started_at);
        if elapsed >= session.duration {
            let session = self.session.take()?;
            return Some(self.finish(session));
        }

        if let Err(err) = session.recorder.capture_frame() {
            log::error!("frame capture failed: {}", err);
            self.status = format!("Error capturing: {}", err);
            let mut session = self.session.take()?;
            let _ = session.recorder.stop();
            return Some(session.saved_camera);
        }

        self.status = format!(
            "Recording {}... {:.1}s / {:.1}s",
            session.name,
            elapsed.as_secs_f32(),
            session.duration.as_secs_f32()
        );
        None
    }

    fn finish(&mut self, mut session: ActiveSession) -> CameraMode {
        let result = session
            .recorder
            .stop()
            .and_then(|_| session.recorder.save());

        match result {
            Ok(()) => {
                self.status = format!("{} exported successfully", session.name);
                log::info!("{}", self.status);
            }
            Err(err) => {
                self.status = format!("Error saving {}: {}", session.name, err);
                log::error!("{}", self.status);
            }
        }

        session.saved_camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cameras::RotationState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        start: usize,
        capture: usize,
        stop: usize,
        save: usize,
        fail_capture: bool,
    }

    struct MockRecorder(Rc<RefCell<Calls>>);

    impl FrameRecorder for MockRecorder {
        fn start(&mut self) -> Result<(), ViewerError> {
            self.0.borrow_mut().start += 1;
            Ok(())
        }
        fn capture_frame(&mut self) -> Result<(), ViewerError> {
            let mut calls = self.0.borrow_mut();
            calls.capture += 1;
            if calls.fail_capture {
                return Err(ViewerError::capture("capture", "worker died"));
            }
            Ok(())
        }
        fn stop(&mut self) -> Result<(), ViewerError> {
            self.0.borrow_mut().stop += 1;
            Ok(())
        }
        fn save(&mut self) -> Result<(), ViewerError> {
            self.0.borrow_mut().save += 1;
            Ok(())
        }
    }

    fn flat_camera() -> CameraMode {
        let mut rotation = RotationState::new(2.0);
        rotation.angles = [10.0, 20.0, 30.0];
        CameraMode::Flat(rotation)
    }

    #[test]
    fn expiry_triggers_one_stop_save_and_restores_camera() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut controller = CaptureController::new();
        let t0 = Instant::now();

        controller
            .start(
                Box::new(MockRecorder(calls.clone())),
                "rotating_cube",
                Duration::from_millis(1000),
                t0,
                &flat_camera(),
            )
            .unwrap();
        assert!(controller.is_capturing());

        assert!(controller
            .frame_rendered(t0 + Duration::from_millis(500))
            .is_none());

        let restored = controller
            .frame_rendered(t0 + Duration::from_millis(1000))
            .expect("session should end at the deadline");
        assert!(!controller.is_capturing());

        match restored {
            CameraMode::Flat(rotation) => assert_eq!(rotation.angles, [10.0, 20.0, 30.0]),
            CameraMode::Orbiting(_) => panic!("wrong camera variant restored"),
        }

        let calls = calls.borrow();
        assert_eq!(calls.start, 1);
        assert_eq!(calls.capture, 1);
        assert_eq!(calls.stop, 1);
        assert_eq!(calls.save, 1);

        // A later frame is a no-op.
        drop(calls);
        assert!(controller
            .frame_rendered(t0 + Duration::from_millis(2000))
            .is_none());
    }

    #[test]
    fn second_start_is_refused_while_capturing() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut controller = CaptureController::new();
        let t0 = Instant::now();
        let duration = Duration::from_millis(1000);

        controller
            .start(
                Box::new(MockRecorder(calls.clone())),
                "first",
                duration,
                t0,
                &flat_camera(),
            )
            .unwrap();

        let refused = controller.start(
            Box::new(MockRecorder(calls.clone())),
            "second",
            duration,
            t0,
            &flat_camera(),
        );
        assert!(refused.is_err());
        assert_eq!(calls.borrow().start, 1);
    }

    #[test]
    fn capture_failure_aborts_session_and_restores_camera() {
        let calls = Rc::new(RefCell::new(Calls {
            fail_capture: true,
            ..Default::default()
        }));
        let mut controller = CaptureController::new();
        let t0 = Instant::now();

        controller
            .start(
                Box::new(MockRecorder(calls.clone())),
                "doomed",
                Duration::from_millis(1000),
                t0,
                &flat_camera(),
            )
            .unwrap();

        let restored = controller.frame_rendered(t0 + Duration::from_millis(100));
        assert!(restored.is_some());
        assert!(!controller.is_capturing());
        assert!(controller.status().contains("Error capturing"));

        let calls = calls.borrow();
        assert_eq!(calls.stop, 1);
        assert_eq!(calls.save, 0);
    }
}
