use crate::events::SharedSession;
use globe_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: SharedSession,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: GpuState<'a>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        self.session.borrow_mut().tick();

        self.gpu.resize(self.canvas.width(), self.canvas.height());
        let session = self.session.borrow();
        self.gpu
            .sync_markers(session.visible_markers(), session.config().marker_scale);
        match self.gpu.render(session.camera(), session.model_matrix()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }
}

fn request_frame(w: &web::Window, tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let Some(w) = web::window() {
            request_frame(&w, &tick_clone);
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        request_frame(&w, &tick);
    }
}
