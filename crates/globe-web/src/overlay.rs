use crate::dom;
use globe_core::{MarkerId, SelectionPresenter};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const OVERLAY_ID: &str = "overlay";
const MODAL_ID: &str = "modal";
const CONTENT_ID: &str = "modal-content";

#[inline]
fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "display:block");
    }
}

#[inline]
fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Modal dialog over the canvas naming the selected marker.
pub struct DomOverlayPresenter {
    document: web::Document,
    open: Option<MarkerId>,
}

impl DomOverlayPresenter {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            open: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

impl SelectionPresenter for DomOverlayPresenter {
    fn open(&mut self, id: MarkerId) {
        if let Some(el) = self.document.get_element_by_id(CONTENT_ID) {
            el.set_text_content(Some(&format!("You clicked on marker: {id}")));
        }
        show(&self.document, OVERLAY_ID);
        show(&self.document, MODAL_ID);
        self.open = Some(id);
        log::info!("[overlay] open {id}");
    }

    fn close(&mut self) {
        hide(&self.document, OVERLAY_ID);
        hide(&self.document, MODAL_ID);
        if let Some(id) = self.open.take() {
            log::info!("[overlay] closed {id}");
        }
    }
}

/// Close the dialog from the backdrop or its close control.
pub fn wire_dismiss(document: &web::Document, presenter: Rc<RefCell<DomOverlayPresenter>>) {
    {
        let presenter = presenter.clone();
        dom::add_click_listener(document, OVERLAY_ID, move || presenter.borrow_mut().close());
    }
    if let Ok(Some(close)) = document.query_selector(&format!("#{MODAL_ID} .close")) {
        dom::add_element_click_listener(&close, move || presenter.borrow_mut().close());
    } else {
        log::warn!("[overlay] no close control in #{MODAL_ID}");
    }
}
