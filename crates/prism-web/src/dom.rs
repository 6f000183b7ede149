//! Applies site events to the live document.
//!
//! Only the wasm exports construct a `Dom`; native tests never touch it.

use prism_engine::{Class, LayoutProbe, Rect, SiteEvent, View};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Element measured for the hex field's focus anchor.
pub const ANCHOR_ID: &str = "hologram-container";

/// Container the revealed glyph spans are appended to.
const LOADER_TEXT: &str = "#loaderText";

const FORM_THANKS: &str = "Thank you for your message! We will get back to you soon.";

/// CSS selector of the element backing `view`.
pub fn selector(view: View) -> String {
    match view {
        View::Loader => "#loader".to_string(),
        View::Home => "#home".to_string(),
        View::Page(page) => format!("#{}", page.as_str()),
        View::Pyramid => ".pyramid".to_string(),
        View::Hologram => "#hologram".to_string(),
        View::GlassCanvas => "#glassCanvas".to_string(),
        View::MiniLoader => "#miniLoader".to_string(),
        View::AuxMenu => "#caseMenu".to_string(),
        View::Case(case) => format!("#{}", case.as_str()),
        View::CaseFace(case) => format!("[data-case=\"{}\"]", case.as_str()),
    }
}

#[derive(Clone)]
pub struct Dom {
    document: Document,
}

impl Dom {
    /// The current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn probe(&self) -> DomProbe {
        DomProbe {
            document: self.document.clone(),
            id: ANCHOR_ID,
        }
    }

    fn find(&self, view: View) -> Option<Element> {
        self.query(&selector(view))
    }

    fn query(&self, sel: &str) -> Option<Element> {
        match self.document.query_selector(sel) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("dom: bad selector {}: {:?}", sel, err);
                None
            }
        }
    }

    pub fn apply_events(&self, events: &[SiteEvent]) {
        for event in events {
            match event {
                SiteEvent::ClassChanged { view, class, on } => self.set_class(*view, *class, *on),
                SiteEvent::GlyphRevealed { glyph, .. } => self.append_glyph(*glyph),
                SiteEvent::GlyphColored { index, color } => self.color_glyph(*index, color),
                SiteEvent::FormAcknowledged => {
                    if let Some(window) = web_sys::window() {
                        warn_on_err("form alert", window.alert_with_message(FORM_THANKS));
                    }
                }
            }
        }
    }

    fn set_class(&self, view: View, class: Class, on: bool) {
        let Some(element) = self.find(view) else {
            log::debug!("dom: no element for {:?}", view);
            return;
        };
        if let Err(err) = element.class_list().toggle_with_force(class.as_str(), on) {
            log::warn!("dom: class {} on {:?} failed: {:?}", class.as_str(), view, err);
        }
    }

    fn append_glyph(&self, glyph: char) {
        let Some(label) = self.query(LOADER_TEXT) else {
            return;
        };
        let Ok(span) = self.document.create_element("span") else {
            return;
        };
        span.set_class_name("hex-letter active");
        span.set_text_content(Some(&glyph.to_string()));
        if let Err(err) = label.append_child(&span) {
            log::warn!("dom: glyph append failed: {:?}", err);
        }
    }

    fn color_glyph(&self, index: usize, color: &str) {
        let span = self
            .query(LOADER_TEXT)
            .and_then(|label| label.children().item(index as u32))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(span) = span {
            warn_on_err("glyph color", span.style().set_property("color", color));
        }
    }

    /// Apply the hologram's rotation.
    pub fn set_transform(&self, css: &str) {
        let hologram = self
            .find(View::Hologram)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(hologram) = hologram {
            warn_on_err("hologram transform", hologram.style().set_property("transform", css));
        }
    }
}

/// Log a failed DOM call. Returns whether it failed.
fn warn_on_err<E: std::fmt::Debug>(what: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => false,
        Err(err) => {
            log::warn!("dom: {} failed: {:?}", what, err);
            true
        }
    }
}

/// Measures the anchor element's bounding client rect.
pub struct DomProbe {
    document: Document,
    id: &'static str,
}

impl LayoutProbe for DomProbe {
    fn anchor_rect(&self) -> Option<Rect> {
        let rect = self.document.get_element_by_id(self.id)?.get_bounding_client_rect();
        Some(Rect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }
}
