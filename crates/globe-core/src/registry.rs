//! Marker lifecycle and asynchronous load orchestration.
//!
//! Every marker starts `Pending` and settles exactly once, either `Loaded`
//! (it joins the scene and becomes pickable in the same step) or `Failed`
//! (it is never drawn or picked). Loads report back through a [`LoadQueue`]
//! which the owner drains between frames, so the registry is only ever
//! mutated from one place.

use glam::Vec3;
use instant::Instant;
use std::fmt;
use std::sync::mpsc;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerState {
    Pending,
    Loaded,
    Failed,
}

/// Why a marker asset could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("decode failed: {0}")]
    Decode(String),
}

#[derive(Clone, Debug)]
pub struct MarkerSpec<A> {
    pub id: MarkerId,
    pub source_uri: String,
    pub position: Vec3,
    pub state: MarkerState,
    asset: Option<A>,
    requested_at: Instant,
}

impl<A> MarkerSpec<A> {
    pub fn asset(&self) -> Option<&A> {
        self.asset.as_ref()
    }
}

/// One load to perform, handed to an [`AssetLoader`].
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub id: MarkerId,
    pub uri: String,
}

#[derive(Debug)]
pub enum LoadOutcome<A> {
    Loaded(MarkerId, A),
    Failed(MarkerId, LoadError),
}

/// Cloneable handle loader tasks use to report a finished load.
pub struct LoadSender<A> {
    tx: mpsc::Sender<LoadOutcome<A>>,
}

impl<A> Clone for LoadSender<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A> LoadSender<A> {
    pub fn loaded(&self, id: MarkerId, asset: A) {
        self.send(LoadOutcome::Loaded(id, asset));
    }

    pub fn failed(&self, id: MarkerId, error: LoadError) {
        self.send(LoadOutcome::Failed(id, error));
    }

    pub fn send(&self, outcome: LoadOutcome<A>) {
        // the session may already be gone; nothing is waiting for this result
        if self.tx.send(outcome).is_err() {
            log::debug!("[load] completion dropped, queue closed");
        }
    }
}

/// Completion queue drained once per tick by the session owner.
pub struct LoadQueue<A> {
    tx: mpsc::Sender<LoadOutcome<A>>,
    rx: mpsc::Receiver<LoadOutcome<A>>,
}

impl<A> LoadQueue<A> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> LoadSender<A> {
        LoadSender {
            tx: self.tx.clone(),
        }
    }

    /// Take every outcome posted so far without blocking.
    pub fn drain(&self) -> Vec<LoadOutcome<A>> {
        self.rx.try_iter().collect()
    }
}

impl<A> Default for LoadQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts a load without blocking and reports through `done` when it settles.
pub trait AssetLoader<A> {
    fn load(&self, request: LoadRequest, done: LoadSender<A>);
}

/// A settled marker as seen by the renderer and the picking pipeline.
#[derive(Clone, Copy, Debug)]
pub struct LoadedMarker<'a, A> {
    pub id: MarkerId,
    pub position: Vec3,
    pub asset: &'a A,
}

pub struct MarkerRegistry<A> {
    markers: Vec<MarkerSpec<A>>,
}

impl<A> MarkerRegistry<A> {
    /// Create one pending marker per `(uri, position)` pair and start all loads.
    ///
    /// Extra URIs or positions beyond the shorter list are ignored.
    pub fn initialize<L>(
        uris: &[String],
        positions: &[Vec3],
        loader: &L,
        done: &LoadSender<A>,
    ) -> Self
    where
        L: AssetLoader<A> + ?Sized,
    {
        if uris.len() != positions.len() {
            log::warn!(
                "[load] {} uris for {} positions; using the first {}",
                uris.len(),
                positions.len(),
                uris.len().min(positions.len())
            );
        }
        let now = Instant::now();
        let markers: Vec<MarkerSpec<A>> = uris
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(i, (uri, &position))| MarkerSpec {
                id: MarkerId(i),
                source_uri: uri.clone(),
                position,
                state: MarkerState::Pending,
                asset: None,
                requested_at: now,
            })
            .collect();
        for m in &markers {
            loader.load(
                LoadRequest {
                    id: m.id,
                    uri: m.source_uri.clone(),
                },
                done.clone(),
            );
        }
        log::info!("[load] issued {} marker loads", markers.len());
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&MarkerSpec<A>> {
        self.markers.get(id.0)
    }

    pub fn markers(&self) -> &[MarkerSpec<A>] {
        &self.markers
    }

    pub fn state(&self, id: MarkerId) -> Option<MarkerState> {
        self.get(id).map(|m| m.state)
    }

    /// Pending → Loaded. Returns false if the marker is unknown or already settled.
    pub fn on_load_complete(&mut self, id: MarkerId, asset: A) -> bool {
        let Some(m) = self.pending_mut(id) else {
            return false;
        };
        m.asset = Some(asset);
        m.state = MarkerState::Loaded;
        log::info!(
            "[load] {} loaded in {:?} from {}",
            id,
            m.requested_at.elapsed(),
            m.source_uri
        );
        self.log_if_settled();
        true
    }

    /// Pending → Failed. Returns false if the marker is unknown or already settled.
    pub fn on_load_failed(&mut self, id: MarkerId, error: &LoadError) -> bool {
        let Some(m) = self.pending_mut(id) else {
            return false;
        };
        m.state = MarkerState::Failed;
        log::warn!("[load] {} failed ({}): {}", id, m.source_uri, error);
        self.log_if_settled();
        true
    }

    /// Apply one queued completion.
    pub fn apply(&mut self, outcome: LoadOutcome<A>) -> bool {
        match outcome {
            LoadOutcome::Loaded(id, asset) => self.on_load_complete(id, asset),
            LoadOutcome::Failed(id, err) => self.on_load_failed(id, &err),
        }
    }

    /// Currently loaded markers. Grows as loads complete; read it fresh each time.
    pub fn pick_eligible_markers(&self) -> impl Iterator<Item = LoadedMarker<'_, A>> + '_ {
        self.markers.iter().filter_map(|m| match (&m.state, &m.asset) {
            (MarkerState::Loaded, Some(asset)) => Some(LoadedMarker {
                id: m.id,
                position: m.position,
                asset,
            }),
            _ => None,
        })
    }

    pub fn pending_count(&self) -> usize {
        self.count(MarkerState::Pending)
    }

    pub fn loaded_count(&self) -> usize {
        self.count(MarkerState::Loaded)
    }

    pub fn failed_count(&self) -> usize {
        self.count(MarkerState::Failed)
    }

    fn count(&self, state: MarkerState) -> usize {
        self.markers.iter().filter(|m| m.state == state).count()
    }

    fn pending_mut(&mut self, id: MarkerId) -> Option<&mut MarkerSpec<A>> {
        match self.markers.get_mut(id.0) {
            Some(m) if m.state == MarkerState::Pending => Some(m),
            Some(m) => {
                log::warn!("[load] ignoring completion for {} already {:?}", id, m.state);
                None
            }
            None => {
                log::warn!("[load] ignoring completion for unknown {}", id);
                None
            }
        }
    }

    fn log_if_settled(&self) {
        if self.pending_count() == 0 {
            log::info!(
                "[load] all markers settled: {} loaded, {} failed",
                self.loaded_count(),
                self.failed_count()
            );
        }
    }
}
