//! Per-session context owning every piece of mutable interaction state.
//!
//! Frontends hold one `GlobeSession` on their UI thread and route pointer
//! events, resizes and frame ticks through it. Load completions arrive via the
//! session's queue and are applied at the start of each tick.

use crate::camera::{Camera, Viewport};
use crate::config::{ConfigError, SceneConfig};
use crate::distribution::fibonacci_sphere;
use crate::picking::{pick_nearest, PickRequest};
use crate::presenter::SelectionPresenter;
use crate::registry::{AssetLoader, LoadQueue, LoadedMarker, MarkerId, MarkerRegistry};
use crate::rotation::{RotationController, RotationState};
use glam::Mat4;

pub struct GlobeSession<A> {
    config: SceneConfig,
    registry: MarkerRegistry<A>,
    rotation: RotationController,
    camera: Camera,
    viewport: Viewport,
    loads: LoadQueue<A>,
}

impl<A> GlobeSession<A> {
    /// Validate `config`, lay out the markers and start loading them.
    pub fn new<L>(config: SceneConfig, viewport: Viewport, loader: &L) -> Result<Self, ConfigError>
    where
        L: AssetLoader<A> + ?Sized,
    {
        config.validate()?;
        let positions = fibonacci_sphere(config.marker_count(), config.marker_radius);
        let loads = LoadQueue::new();
        let registry =
            MarkerRegistry::initialize(&config.marker_uris, &positions, loader, &loads.sender());
        let mut camera = Camera::default();
        camera.set_viewport(viewport);
        Ok(Self {
            rotation: RotationController::new(config.rotation),
            config,
            registry,
            camera,
            viewport,
            loads,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn registry(&self) -> &MarkerRegistry<A> {
        &self.registry
    }

    pub fn rotation(&self) -> &RotationState {
        self.rotation.state()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.rotation.model_matrix()
    }

    /// Markers that are part of the scene, which are exactly the pickable ones.
    pub fn visible_markers(&self) -> impl Iterator<Item = LoadedMarker<'_, A>> + '_ {
        self.registry.pick_eligible_markers()
    }

    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        self.rotation.begin_drag(x, y);
        log::debug!("[drag] start at ({x:.1},{y:.1})");
    }

    pub fn on_drag_move(&mut self, x: f32, y: f32) {
        self.rotation.drag_to(x, y);
    }

    /// Pointer released or left the tracking area.
    pub fn on_drag_end(&mut self) {
        if self.rotation.is_dragging() {
            let s = self.rotation.state();
            log::debug!(
                "[drag] end with velocity ({:.4},{:.4})",
                s.velocity_x,
                s.velocity_y
            );
        }
        self.rotation.end_drag();
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_viewport(self.viewport);
    }

    /// Resolve a click at pixel `(px, py)` and open the hit marker, if any.
    pub fn on_click<P>(&self, px: f32, py: f32, presenter: &mut P) -> Option<MarkerId>
    where
        P: SelectionPresenter + ?Sized,
    {
        let hit = self.pick(px, py);
        match hit {
            Some(id) => {
                log::info!("[click] selected {}", id);
                presenter.open(id);
            }
            None => log::debug!("[click] no marker at ({px:.1},{py:.1})"),
        }
        hit
    }

    /// Marker under pixel `(px, py)` without notifying anyone.
    pub fn pick(&self, px: f32, py: f32) -> Option<MarkerId> {
        let req = PickRequest::from_pixels(px, py, self.viewport)?;
        let ray = self.camera.ray_through(req.normalized_x, req.normalized_y);
        pick_nearest(
            &ray,
            &self.camera,
            self.model_matrix(),
            self.config.marker_scale,
            self.registry.pick_eligible_markers(),
        )
        .map(|hit| hit.id)
    }

    /// One frame: apply finished loads, then advance the rotation.
    pub fn tick(&mut self) {
        for outcome in self.loads.drain() {
            self.registry.apply(outcome);
        }
        self.rotation.tick();
    }
}
