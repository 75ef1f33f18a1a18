use crate::camera::{CameraController, FlyToCommand, MapRemote, RemoteCommand};
use crate::core::constants::{FLY_TO_DURATION, FLY_TO_ZOOM};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::core::viewport::ViewportState;
use crate::data::parcel::{Parcel, ParcelId};
use crate::layers::heat::HeatLayer;
use crate::layers::markers::MarkerClusterLayer;
use crate::layers::polygons::PolygonLayer;
use crate::layers::Highlight;
use crate::mode::RenderMode;
use crate::surface::{RenderSurface, SurfaceEvent};
use crate::Result;
use crossbeam_channel::Receiver;
use instant::Instant;
use serde::{Deserialize, Serialize};

const EMPTY_PARCELS: &[Parcel] = &[];

/// The parcel collection, pre-split by the host along geometry lines.
///
/// Splitting (and dropping parcels with no geometry at all) is a collaborator
/// responsibility; the engine renders what it is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapInputs {
    /// Initial camera center before any fit or fly
    pub default_center: LatLng,
    /// Every renderable coordinate, used only for the one-shot fit
    pub all_map_points: Vec<LatLng>,
    /// Parcels carrying a point position
    pub lands_with_points: Vec<Parcel>,
    /// Parcels carrying a polygon boundary
    pub lands_with_polygons: Vec<Parcel>,
    /// Union of coordinate-bearing parcels, consumed by the heat layer
    pub all_lands_with_coords: Vec<Parcel>,
}

impl MapInputs {
    /// Convenience splitter for hosts that keep one flat catalog
    pub fn split(default_center: LatLng, parcels: Vec<Parcel>) -> Self {
        let mut inputs = Self {
            default_center,
            ..Self::default()
        };
        for parcel in parcels {
            if !parcel.has_coordinates() {
                continue;
            }
            if let Some(point) = parcel.representative_point() {
                inputs.all_map_points.push(point);
            }
            if parcel.position.is_some() {
                inputs.lands_with_points.push(parcel.clone());
            }
            if parcel.boundary.as_ref().is_some_and(|ring| ring.len() >= 3) {
                inputs.lands_with_polygons.push(parcel.clone());
            }
            inputs.all_lands_with_coords.push(parcel);
        }
        inputs
    }
}

/// Per-render view state supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewInput {
    /// Currently selected parcel, highlighted distinctly
    pub active_parcel: Option<ParcelId>,
    /// Parcel highlighted while the pointer hovers its list row
    pub hovered_parcel: Option<ParcelId>,
    /// One-shot camera command (see [`FlyToCommand`])
    pub fly_to: Option<FlyToCommand>,
    /// Density-overlay toggle; suppresses markers and polygons when set
    pub show_heatmap: bool,
}

/// Host-facing callbacks, fired from the engine's event drain
#[derive(Default)]
pub struct EngineCallbacks {
    pub on_zoom_change: Option<Box<dyn Fn(f64) + Send + Sync>>,
    pub on_move_end: Option<Box<dyn Fn(&LatLngBounds) + Send + Sync>>,
    /// Fired exactly once at mount with the imperative remote
    pub on_ready: Option<Box<dyn FnOnce(MapRemote) + Send + Sync>>,
}

impl EngineCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_zoom_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_zoom_change = Some(Box::new(callback));
        self
    }

    pub fn on_move_end<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LatLngBounds) + Send + Sync + 'static,
    {
        self.on_move_end = Some(Box::new(callback));
        self
    }

    pub fn on_ready<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(MapRemote) + Send + Sync + 'static,
    {
        self.on_ready = Some(Box::new(callback));
        self
    }
}

/// The map rendering and view-state engine.
///
/// Owns the rendering surface exclusively for its lifetime. Data flows one
/// way in (parcel sets and view state from the host); viewport changes and
/// the readiness signal flow back out through [`EngineCallbacks`]. Each
/// render pass re-derives the [`RenderMode`] and brings the three layer
/// managers in step with it.
pub struct ParcelMap<S: RenderSurface> {
    surface: S,
    inputs: MapInputs,
    view: ViewInput,
    viewport: ViewportState,
    markers: MarkerClusterLayer,
    polygons: PolygonLayer,
    heat: HeatLayer,
    camera: CameraController,
    callbacks: EngineCallbacks,
    surface_events: Receiver<SurfaceEvent>,
    remote_rx: Receiver<RemoteCommand>,
    remote: MapRemote,
}

impl<S: RenderSurface> ParcelMap<S> {
    /// Mounts the engine on a surface: subscribes to viewport signals,
    /// hands the host its remote, reports the initial view, performs the
    /// one-shot fit, and renders the initial layers.
    pub fn mount(surface: S, inputs: MapInputs, callbacks: EngineCallbacks) -> Result<Self> {
        let surface_events = surface.events();
        let (remote, remote_rx) = MapRemote::channel();
        let viewport = ViewportState::new(inputs.default_center, surface.zoom());

        let mut engine = Self {
            surface,
            inputs,
            view: ViewInput::default(),
            viewport,
            markers: MarkerClusterLayer::new(),
            polygons: PolygonLayer::new(),
            heat: HeatLayer::new(),
            camera: CameraController::new(),
            callbacks,
            surface_events,
            remote_rx,
            remote,
        };

        log::info!(
            "parcel map mounted at zoom {:.1} ({} point / {} polygon parcels)",
            engine.viewport.zoom,
            engine.inputs.lands_with_points.len(),
            engine.inputs.lands_with_polygons.len()
        );

        if let Some(on_ready) = engine.callbacks.on_ready.take() {
            on_ready(engine.remote.clone());
        }

        // initial report so the host never waits for user interaction
        let bounds = engine.surface.visible_bounds();
        engine.viewport.bounds = Some(bounds.clone());
        if let Some(callback) = &engine.callbacks.on_zoom_change {
            callback(engine.viewport.zoom);
        }
        if let Some(callback) = &engine.callbacks.on_move_end {
            callback(&bounds);
        }

        engine
            .camera
            .fit_bounds_once(&mut engine.surface, &engine.inputs.all_map_points);
        engine.render()?;
        Ok(engine)
    }

    /// Applies new view state and re-renders. One-shot commands embedded in
    /// the view (fly-to) are consumed here.
    pub fn set_view(&mut self, view: ViewInput) -> Result<()> {
        if let Some(command) = &view.fly_to {
            self.camera.consume_fly_to(&mut self.surface, command);
        }
        self.view = view;
        self.render()
    }

    /// Replaces the parcel collection and re-renders. The one-shot fit may
    /// fire here if mount saw no coordinates yet.
    pub fn set_parcels(&mut self, inputs: MapInputs) -> Result<()> {
        self.inputs = inputs;
        self.camera
            .fit_bounds_once(&mut self.surface, &self.inputs.all_map_points);
        self.render()
    }

    /// One render pass: derive the mode, then bring each layer manager in
    /// step with it. Managers fingerprint their input, so an unchanged pass
    /// touches nothing on the surface.
    pub fn render(&mut self) -> Result<()> {
        let mode = RenderMode::select(self.view.show_heatmap, self.viewport.zoom);
        let highlight = Highlight::new(
            self.view.active_parcel.clone(),
            self.view.hovered_parcel.clone(),
        );

        let (point_parcels, centroid_parcels) = if mode.draws_markers() {
            let centroids = if mode.clusters_polygon_centroids() {
                self.inputs.lands_with_polygons.as_slice()
            } else {
                EMPTY_PARCELS
            };
            (self.inputs.lands_with_points.as_slice(), centroids)
        } else {
            (EMPTY_PARCELS, EMPTY_PARCELS)
        };
        self.markers
            .sync(&mut self.surface, point_parcels, centroid_parcels, &highlight)?;

        let polygon_parcels = if mode.draws_polygons() {
            self.inputs.lands_with_polygons.as_slice()
        } else {
            EMPTY_PARCELS
        };
        self.polygons
            .sync(&mut self.surface, polygon_parcels, &highlight)?;

        let heat_parcels = if mode.draws_heatmap() {
            self.inputs.all_lands_with_coords.as_slice()
        } else {
            EMPTY_PARCELS
        };
        self.heat.sync(&mut self.surface, heat_parcels)?;

        Ok(())
    }

    /// Advances timers and drains pending surface signals and remote
    /// commands. Call from the host's event loop.
    pub fn update(&mut self, now: Instant) -> Result<()> {
        while let Ok(command) = self.remote_rx.try_recv() {
            match command {
                RemoteCommand::FlyTo { target, zoom } => {
                    self.surface
                        .fly_to(target, zoom.unwrap_or(FLY_TO_ZOOM), FLY_TO_DURATION);
                }
                RemoteCommand::InvalidateSize => {
                    self.camera.schedule_invalidate_size(now);
                }
            }
        }

        let mut zoom_changed = false;
        while let Ok(event) = self.surface_events.try_recv() {
            match event {
                SurfaceEvent::ZoomEnd { zoom } => {
                    self.viewport.apply_zoom(zoom);
                    if let Some(callback) = &self.callbacks.on_zoom_change {
                        callback(zoom);
                    }
                    zoom_changed = true;
                }
                SurfaceEvent::MoveEnd { center, bounds } => {
                    self.viewport.apply_move(center, bounds.clone());
                    if let Some(callback) = &self.callbacks.on_move_end {
                        callback(&bounds);
                    }
                }
            }
        }

        self.camera.tick(&mut self.surface, now);

        // a zoom change can flip the render mode
        if zoom_changed {
            self.render()?;
        }
        Ok(())
    }

    /// Arms the settle-delayed size invalidation after a layout-affecting
    /// change (entering or leaving full-screen presentation)
    pub fn schedule_invalidate_size(&mut self) {
        self.camera.schedule_invalidate_size(Instant::now());
    }

    /// The engine's record of the current view
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Another remote, identical to the one handed to `on_ready`
    pub fn remote(&self) -> MapRemote {
        self.remote.clone()
    }

    /// Read-only view of the owned surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tears the engine down, disposing every live layer, and returns the
    /// surface to the caller
    pub fn unmount(mut self) -> Result<S> {
        log::info!("parcel map unmounting");
        self.markers.detach(&mut self.surface)?;
        self.polygons.detach(&mut self.surface)?;
        self.heat.detach(&mut self.surface)?;
        Ok(self.surface)
    }
}
