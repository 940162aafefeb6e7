use crate::dom;
use crate::input;
use crate::overlay::DomOverlayPresenter;
use globe_core::{GlobeSession, SelectionPresenter};
use globe_render::MarkerImage;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedSession = Rc<RefCell<GlobeSession<MarkerImage>>>;

pub struct InputWiring {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub session: SharedSession,
    pub presenter: Rc<RefCell<DomOverlayPresenter>>,
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("[input] could not listen for {event}");
    }
    closure.forget();
}

pub fn wire_input_handlers(w: InputWiring) {
    let canvas_target: &web::EventTarget = w.canvas.as_ref();

    // drag start
    {
        let session = w.session.clone();
        listen(canvas_target, "pointerdown", move |ev: web::PointerEvent| {
            let p = input::client_pos(&ev);
            session.borrow_mut().on_drag_start(p.x, p.y);
        });
    }
    // drag move
    {
        let session = w.session.clone();
        listen(canvas_target, "pointermove", move |ev: web::PointerEvent| {
            let p = input::client_pos(&ev);
            session.borrow_mut().on_drag_move(p.x, p.y);
        });
    }
    // release and leave both end the drag
    for event in ["pointerup", "pointerleave"] {
        let session = w.session.clone();
        listen(canvas_target, event, move |_ev: web::PointerEvent| {
            session.borrow_mut().on_drag_end();
        });
    }
    // click → pick
    {
        let session = w.session.clone();
        let presenter = w.presenter.clone();
        let canvas = w.canvas.clone();
        listen(canvas_target, "click", move |ev: web::MouseEvent| {
            let Some(p) = input::pointer_canvas_css(&ev, &canvas) else {
                return;
            };
            let session = session.borrow();
            session.on_click(p.x, p.y, &mut *presenter.borrow_mut());
        });
    }

    let window_target: &web::EventTarget = w.window.as_ref();
    // viewport follows the canvas; the renderer picks up the backing size next frame
    {
        let session = w.session.clone();
        let canvas = w.canvas.clone();
        listen(window_target, "resize", move |_ev: web::Event| {
            dom::sync_canvas_backing_size(&canvas);
            let css = input::canvas_css_size(&canvas);
            session.borrow_mut().on_resize(css.x, css.y);
        });
    }
    {
        let presenter = w.presenter.clone();
        listen(window_target, "keydown", move |ev: web::KeyboardEvent| {
            if ev.key() == "Escape" && presenter.borrow().is_open() {
                presenter.borrow_mut().close();
            }
        });
    }
}
