use prism_engine::{FieldKind, InputEvent, Site, SiteConfig, SiteEvent, SiteResult, VectorSurface};

use crate::dom::Dom;

/// Owns the site session plus one vertex buffer per field.
///
/// The page creates a `thread_local!` SiteRunner through `export_site!`
/// and reads the buffers back through pointer/count exports, because
/// wasm-bindgen cannot export the engine's types directly.
pub struct SiteRunner {
    site: Site,
    surfaces: [VectorSurface; 3],
    /// Events from the last tick, kept until the DOM has applied them.
    events: Vec<SiteEvent>,
    dom: Option<Dom>,
    initialized: bool,
}

impl SiteRunner {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            site: Site::new(config),
            surfaces: [VectorSurface::new(), VectorSurface::new(), VectorSurface::new()],
            events: Vec::new(),
            dom: None,
            initialized: false,
        }
    }

    /// Build from the page's JSON config. An empty string selects the defaults.
    pub fn from_json(json: &str) -> SiteResult<Self> {
        Ok(Self::new(SiteConfig::from_json(json)?))
    }

    /// Mirror view flags into the live document from now on.
    pub fn attach_dom(&mut self, dom: Dom) {
        self.site.set_probe(Box::new(dom.probe()));
        self.dom = Some(dom);
    }

    /// Start the intro. Call once after construction.
    pub fn init(&mut self) {
        self.site.start();
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.site.push_input(event);
    }

    /// Run one frame: advance the site, re-tessellate every field, then
    /// push class changes and the hologram transform to the document.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.initialized {
            return;
        }
        self.site.tick(dt_ms);
        for (surface, kind) in self.surfaces.iter_mut().zip(FieldKind::ALL) {
            self.site.render(kind, surface);
        }
        self.events.extend(self.site.drain_events());

        if let Some(dom) = &self.dom {
            dom.apply_events(&self.events);
            dom.set_transform(&self.site.rotation().css_transform());
            self.events.clear();
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut Site {
        &mut self.site
    }

    /// Events not yet applied to a document (only accumulates without one).
    pub fn take_events(&mut self) -> Vec<SiteEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn vertices_ptr(&self, kind: FieldKind) -> *const f32 {
        self.surface(kind).buffer_ptr()
    }

    pub fn vertex_count(&self, kind: FieldKind) -> u32 {
        self.surface(kind).vertex_count() as u32
    }

    fn surface(&self, kind: FieldKind) -> &VectorSurface {
        match kind {
            FieldKind::Hex => &self.surfaces[0],
            FieldKind::Shards => &self.surfaces[1],
            FieldKind::Rain => &self.surfaces[2],
        }
    }

    pub fn viewport_width(&self) -> f32 {
        self.site.viewport().x
    }

    pub fn viewport_height(&self) -> f32 {
        self.site.viewport().y
    }
}

/// Field index used by the JS side: 0 hex, 1 shards, 2 rain.
pub fn field_kind(index: u32) -> Option<FieldKind> {
    FieldKind::ALL.get(index as usize).copied()
}
