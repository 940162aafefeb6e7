#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use globe_core::{GlobeSession, SceneConfig, SelectionPresenter, Viewport};
use globe_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, "app-canvas")?;
    dom::sync_canvas_backing_size(&canvas);

    let css = input::canvas_css_size(&canvas);
    let session = GlobeSession::new(
        SceneConfig::default(),
        Viewport::new(css.x, css.y),
        &loader::FetchLoader,
    )
    .context("invalid scene configuration")?;
    let session = Rc::new(RefCell::new(session));

    let presenter = Rc::new(RefCell::new(overlay::DomOverlayPresenter::new(
        document.clone(),
    )));
    presenter.borrow_mut().close();
    overlay::wire_dismiss(&document, presenter.clone());

    events::wire_input_handlers(events::InputWiring {
        window,
        canvas: canvas.clone(),
        session: session.clone(),
        presenter,
    });

    let gpu = GpuState::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        canvas.width(),
        canvas.height(),
    )
    .await
    .context("WebGPU init")?;

    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext {
        session,
        canvas,
        gpu,
    })));
    Ok(())
}
