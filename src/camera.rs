use crate::core::constants::{FIT_BOUNDS_PADDING, FLY_TO_DURATION, FLY_TO_ZOOM, RESIZE_SETTLE};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::surface::RenderSurface;
use crossbeam_channel::{unbounded, Receiver, Sender};
use instant::Instant;
use serde::{Deserialize, Serialize};

/// One-shot camera command targeting a parcel's coordinate.
///
/// Edge-triggered via a monotonically increasing sequence number: the
/// controller consumes a command only when its `seq` exceeds the last one
/// consumed, so re-rendering with the same command in view state does not
/// re-fly. Re-triggering mid-flight simply issues a new command; the
/// surface serializes camera animations (last-write-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyToCommand {
    pub target: LatLng,
    pub seq: u64,
    /// Optional display label carried for host-side bookkeeping
    pub label: Option<String>,
}

impl FlyToCommand {
    pub fn new(target: LatLng, seq: u64) -> Self {
        Self {
            target,
            seq,
            label: None,
        }
    }
}

/// Imperative commands a host may issue after the engine is ready
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    /// Center the camera on a coordinate (list-click fly-to)
    FlyTo {
        target: LatLng,
        zoom: Option<f64>,
    },
    InvalidateSize,
}

/// Cloneable handle given to the host exactly once at readiness.
///
/// The engine owns the rendering surface for its lifetime; the remote lets
/// the host drive imperative camera actions without aliasing it.
#[derive(Debug, Clone)]
pub struct MapRemote {
    tx: Sender<RemoteCommand>,
}

impl MapRemote {
    /// Creates a remote and the receiving end the engine drains
    pub(crate) fn channel() -> (Self, Receiver<RemoteCommand>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    /// Asks the engine to fly the camera to a coordinate
    pub fn fly_to(&self, target: LatLng) {
        self.send(RemoteCommand::FlyTo { target, zoom: None });
    }

    /// Asks the engine to fly to a coordinate at a specific zoom
    pub fn fly_to_at(&self, target: LatLng, zoom: f64) {
        self.send(RemoteCommand::FlyTo {
            target,
            zoom: Some(zoom),
        });
    }

    /// Asks the engine to schedule a size invalidation
    pub fn invalidate_size(&self) {
        self.send(RemoteCommand::InvalidateSize);
    }

    fn send(&self, command: RemoteCommand) {
        if self.tx.send(command).is_err() {
            log::debug!("remote command dropped, engine unmounted");
        }
    }
}

/// Camera behaviors: one-shot fly-to, fit-to-bounds-once, and settle-delayed
/// size invalidation.
///
/// Timers are deadlines checked on `tick`, not background threads, so
/// dropping the engine before a deadline fires cancels it.
pub struct CameraController {
    last_fly_seq: u64,
    did_fit_bounds: bool,
    resize_deadline: Option<Instant>,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            last_fly_seq: 0,
            did_fit_bounds: false,
            resize_deadline: None,
        }
    }

    /// Consumes a fly-to command if it has not been consumed yet
    pub fn consume_fly_to<S: RenderSurface>(&mut self, surface: &mut S, command: &FlyToCommand) {
        if command.seq <= self.last_fly_seq {
            return;
        }
        self.last_fly_seq = command.seq;
        log::debug!(
            "fly-to ({:.5}, {:.5}) seq {}",
            command.target.lat,
            command.target.lng,
            command.seq
        );
        surface.fly_to(command.target, FLY_TO_ZOOM, FLY_TO_DURATION);
    }

    /// Frames every renderable coordinate once per mount; later calls are
    /// no-ops regardless of how the point set changes
    pub fn fit_bounds_once<S: RenderSurface>(&mut self, surface: &mut S, points: &[LatLng]) {
        if self.did_fit_bounds {
            return;
        }
        let Some(bounds) = LatLngBounds::from_points(points.iter().copied()) else {
            return;
        };
        self.did_fit_bounds = true;
        log::debug!("fit-to-bounds over {} points", points.len());
        surface.fit_bounds(bounds, FIT_BOUNDS_PADDING);
    }

    /// Arms (or re-arms) the settle deadline after a layout-affecting change
    pub fn schedule_invalidate_size(&mut self, now: Instant) {
        self.resize_deadline = Some(now + RESIZE_SETTLE);
    }

    /// Fires any elapsed deadline
    pub fn tick<S: RenderSurface>(&mut self, surface: &mut S, now: Instant) {
        if let Some(deadline) = self.resize_deadline {
            if now >= deadline {
                self.resize_deadline = None;
                log::debug!("resize settled, invalidating surface size");
                surface.invalidate_size();
            }
        }
    }

    pub fn has_fit_bounds(&self) -> bool {
        self.did_fit_bounds
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::RESIZE_SETTLE;
    use crate::surface::testing::{CameraCall, RecordingSurface};
    use std::time::Duration;

    #[test]
    fn test_fly_to_is_one_shot() {
        let mut surface = RecordingSurface::new(10.0);
        let mut camera = CameraController::new();
        let command = FlyToCommand::new(LatLng::new(6.5, 3.4), 1);

        camera.consume_fly_to(&mut surface, &command);
        camera.consume_fly_to(&mut surface, &command);
        assert_eq!(surface.camera_log.len(), 1);

        match &surface.camera_log[0] {
            CameraCall::FlyTo { target, zoom, .. } => {
                assert_eq!(*target, LatLng::new(6.5, 3.4));
                assert_eq!(*zoom, 16.0);
            }
            other => panic!("unexpected camera call {other:?}"),
        }
    }

    #[test]
    fn test_fly_to_last_write_wins() {
        let mut surface = RecordingSurface::new(10.0);
        let mut camera = CameraController::new();

        camera.consume_fly_to(&mut surface, &FlyToCommand::new(LatLng::new(6.5, 3.4), 1));
        camera.consume_fly_to(&mut surface, &FlyToCommand::new(LatLng::new(9.0, 7.4), 2));
        // stale command never re-fires
        camera.consume_fly_to(&mut surface, &FlyToCommand::new(LatLng::new(6.5, 3.4), 1));

        assert_eq!(surface.camera_log.len(), 2);
    }

    #[test]
    fn test_fit_bounds_fires_exactly_once() {
        let mut surface = RecordingSurface::new(10.0);
        let mut camera = CameraController::new();
        let points = vec![LatLng::new(6.4, 3.2), LatLng::new(6.6, 3.5)];

        camera.fit_bounds_once(&mut surface, &points);
        // different data afterwards must not re-fire
        let more = vec![LatLng::new(9.0, 7.0)];
        camera.fit_bounds_once(&mut surface, &more);

        let fits = surface
            .camera_log
            .iter()
            .filter(|call| matches!(call, CameraCall::FitBounds { .. }))
            .count();
        assert_eq!(fits, 1);
        assert!(camera.has_fit_bounds());
    }

    #[test]
    fn test_fit_bounds_waits_for_nonempty_points() {
        let mut surface = RecordingSurface::new(10.0);
        let mut camera = CameraController::new();

        camera.fit_bounds_once(&mut surface, &[]);
        assert!(!camera.has_fit_bounds());

        camera.fit_bounds_once(&mut surface, &[LatLng::new(6.4, 3.2)]);
        assert!(camera.has_fit_bounds());
    }

    #[test]
    fn test_resize_invalidation_waits_for_settle() {
        let mut surface = RecordingSurface::new(10.0);
        let mut camera = CameraController::new();
        let t0 = Instant::now();

        camera.schedule_invalidate_size(t0);
        camera.tick(&mut surface, t0 + Duration::from_millis(100));
        assert_eq!(surface.invalidate_calls, 0);

        camera.tick(&mut surface, t0 + RESIZE_SETTLE);
        assert_eq!(surface.invalidate_calls, 1);

        // deadline is consumed
        camera.tick(&mut surface, t0 + RESIZE_SETTLE * 2);
        assert_eq!(surface.invalidate_calls, 1);
    }

    #[test]
    fn test_rearming_replaces_pending_deadline() {
        let mut surface = RecordingSurface::new(10.0);
        let mut camera = CameraController::new();
        let t0 = Instant::now();

        camera.schedule_invalidate_size(t0);
        let t1 = t0 + Duration::from_millis(200);
        camera.schedule_invalidate_size(t1);

        camera.tick(&mut surface, t0 + RESIZE_SETTLE);
        assert_eq!(surface.invalidate_calls, 0);

        camera.tick(&mut surface, t1 + RESIZE_SETTLE);
        assert_eq!(surface.invalidate_calls, 1);
    }

    #[test]
    fn test_remote_channel_delivers_commands() {
        let (remote, rx) = MapRemote::channel();
        remote.fly_to(LatLng::new(6.5, 3.4));
        remote.invalidate_size();

        assert_eq!(
            rx.try_recv().unwrap(),
            RemoteCommand::FlyTo {
                target: LatLng::new(6.5, 3.4),
                zoom: None
            }
        );
        assert_eq!(rx.try_recv().unwrap(), RemoteCommand::InvalidateSize);
    }

    #[test]
    fn test_remote_survives_engine_drop() {
        let (remote, rx) = MapRemote::channel();
        drop(rx);
        // must not panic
        remote.fly_to(LatLng::new(6.5, 3.4));
    }
}
