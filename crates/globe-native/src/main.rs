use std::sync::Arc;

use anyhow::Context;
use glam::Vec2;
use globe_core::{GlobeSession, MarkerId, SceneConfig, SelectionPresenter, SelectionSlot, Viewport};
use globe_render::{GpuState, MarkerImage};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

mod loader;

const WINDOW_TITLE: &str = "Marker Globe (native)";

/// Shows the selection in the window title; the desktop stand-in for the modal.
struct TitlePresenter {
    window: Arc<Window>,
    slot: SelectionSlot,
}

impl TitlePresenter {
    fn is_open(&self) -> bool {
        self.slot.is_open()
    }
}

impl SelectionPresenter for TitlePresenter {
    fn open(&mut self, id: MarkerId) {
        self.slot.open(id);
        self.window
            .set_title(&format!("{WINDOW_TITLE}: you clicked on marker {id}"));
        log::info!("[overlay] open {id}");
    }

    fn close(&mut self) {
        if let Some(id) = self.slot.current() {
            log::info!("[overlay] closed {id}");
        }
        self.slot.close();
        self.window.set_title(WINDOW_TITLE);
    }
}

fn logical_viewport(window: &Window) -> Viewport {
    let size = window.inner_size().to_logical::<f32>(window.scale_factor());
    Viewport::new(size.width, size.height)
}

fn scene_config() -> SceneConfig {
    let uris: Vec<String> = std::env::args().skip(1).collect();
    if uris.is_empty() {
        SceneConfig::default()
    } else {
        log::info!("[config] {} marker uris from the command line", uris.len());
        SceneConfig::default().with_marker_uris(uris)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1024.0, 768.0))
            .build(&event_loop)?,
    );

    let mut session: GlobeSession<MarkerImage> = GlobeSession::new(
        scene_config(),
        logical_viewport(&window),
        &loader::ThreadLoader,
    )
    .context("invalid scene configuration")?;
    let mut presenter = TitlePresenter {
        window: window.clone(),
        slot: SelectionSlot::default(),
    };
    let size = window.inner_size();
    let mut gpu = pollster::block_on(GpuState::new(window.clone(), size.width, size.height))
        .context("gpu init")?;
    let mut cursor: Option<Vec2> = None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
                let vp = logical_viewport(&window);
                session.on_resize(vp.width, vp.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let p = position.to_logical::<f32>(window.scale_factor());
                let p = Vec2::new(p.x, p.y);
                cursor = Some(p);
                session.on_drag_move(p.x, p.y);
            }
            WindowEvent::CursorLeft { .. } => {
                cursor = None;
                session.on_drag_end();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let Some(p) = cursor else {
                    return;
                };
                match state {
                    ElementState::Pressed => session.on_drag_start(p.x, p.y),
                    ElementState::Released => {
                        session.on_drag_end();
                        // an open selection swallows the click, like the web backdrop
                        if presenter.is_open() {
                            presenter.close();
                        } else {
                            session.on_click(p.x, p.y, &mut presenter);
                        }
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if presenter.is_open() {
                    presenter.close();
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            session.tick();
            gpu.sync_markers(session.visible_markers(), session.config().marker_scale);
            match gpu.render(session.camera(), session.model_matrix()) {
                Ok(_) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit()
                }
                Err(e) => log::warn!("[gpu] render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
