use glam::Vec2;

use super::config::SiteConfig;
use super::error::SiteResult;
use super::types::{CaseId, Class, FaceId, PageId, SiteEvent, View, ViewFlags};
use crate::core::time::FixedTimestep;
use crate::input::pointer::{LayoutProbe, PointerTracker, Rect};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::surface::Surface;
use crate::storyboard::{timelines, Action, Guard, RunId, StoryboardRunner};
use crate::systems::fields::{FieldConfig, FieldKind, ParticleField, Rng, TickContext};
use crate::systems::rotation::RotationController;

/// One glyph of the loading label.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub revealed: bool,
    pub color: Option<String>,
}

/// Session state for one page: every effect, the storyboard clock and the
/// view flags the DOM layer mirrors.
///
/// The host pushes input, calls `tick` once per animation frame, renders
/// each field into its surface and drains `SiteEvent`s.
pub struct Site {
    config: SiteConfig,
    viewport: Vec2,
    pointer: PointerTracker,
    rotation: RotationController,
    runner: StoryboardRunner,
    hex: ParticleField,
    shards: ParticleField,
    rain: Option<ParticleField>,
    flags: ViewFlags,
    current_view: View,
    aux_menu_open: bool,
    glyphs: Vec<Glyph>,
    frame: FixedTimestep,
    clock_ms: f64,
    input: InputQueue,
    events: Vec<SiteEvent>,
    probe: Option<Box<dyn LayoutProbe>>,
    started: bool,
    intro_run: Option<RunId>,
    rain_deferred: bool,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        let viewport = Vec2::from(config.viewport);
        let hex = ParticleField::initialize(FieldConfig::Hex(config.hex.clone()), viewport, Rng::new(config.seed));
        let shards = ParticleField::new(
            FieldConfig::Shards(config.shards.clone()),
            viewport,
            Rng::new(config.seed.wrapping_add(1)),
        );
        // Rain drops exist from the start but stay frozen and dark until started.
        let rain = config.rain.clone().map(|rain| {
            let mut field = ParticleField::new(FieldConfig::Rain(rain), viewport, Rng::new(config.seed.wrapping_add(2)));
            field.populate();
            field
        });

        let mut flags = ViewFlags::new();
        for page in PageId::DETAIL {
            flags.set(View::Page(page), Class::Hidden, true);
        }
        for case in CaseId::ALL {
            flags.set(View::Case(case), Class::Hidden, true);
        }
        flags.set(View::MiniLoader, Class::Hidden, true);
        flags.set(View::AuxMenu, Class::Hidden, true);

        let glyphs = config
            .intro
            .label
            .chars()
            .map(|ch| Glyph { ch, revealed: false, color: None })
            .collect();

        let mut pointer = PointerTracker::new(config.anchor_poll_ms);
        pointer.recompute_focus_anchor(Rect::new(0.0, 0.0, viewport.x, viewport.y));

        log::info!(
            "site: {:?} variant, {}x{} viewport, {} hex cells",
            config.variant,
            viewport.x,
            viewport.y,
            hex.len()
        );

        Self {
            viewport,
            pointer,
            rotation: RotationController::new(config.rotation.clone()),
            runner: StoryboardRunner::new(),
            hex,
            shards,
            rain,
            flags,
            current_view: View::Loader,
            aux_menu_open: false,
            glyphs,
            frame: FixedTimestep::new(config.frame_ms),
            clock_ms: 0.0,
            input: InputQueue::new(),
            events: Vec::new(),
            probe: None,
            started: false,
            intro_run: None,
            rain_deferred: false,
            config,
        }
    }

    /// Attach the probe that measures the focus-anchor element.
    pub fn with_probe(mut self, probe: Box<dyn LayoutProbe>) -> Self {
        self.set_probe(probe);
        self
    }

    pub fn set_probe(&mut self, probe: Box<dyn LayoutProbe>) {
        self.probe = Some(probe);
        self.remeasure_anchor();
    }

    /// Run the intro. Only the first call has an effect.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        let rain_delay = self.config.rain.as_ref().map(|r| r.start_delay_ms);
        let board = timelines::intro(&self.config.intro, rain_delay);
        self.intro_run = self.runner.run(&board, None);
        true
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance everything by one host frame of `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        let dt_ms = dt_ms.max(0.0);

        for event in self.input.drain() {
            self.handle_input(event);
        }

        if self.pointer.poll(dt_ms) {
            self.remeasure_anchor();
        }

        let held = self.runner.is_guarded(Guard::Page);
        self.rotation.advance(dt_ms, held);

        for fired in self.runner.advance(dt_ms) {
            self.apply(fired.run, fired.action);
        }
        if self.rain_deferred && !self.transitioning() {
            self.rain_deferred = false;
            self.apply_start(FieldKind::Rain);
        }

        self.clock_ms += dt_ms;
        let steps = self.frame.accumulate(dt_ms);
        for _ in 0..steps {
            self.step_fields();
        }
    }

    fn step_fields(&mut self) {
        let ctx = TickContext {
            pointer: &self.pointer,
            time_ms: self.clock_ms,
        };
        self.hex.tick(&ctx);

        let was_bursting = self.shards.is_active();
        self.shards.tick(&ctx);
        if was_bursting && !self.shards.is_active() {
            set_class(&mut self.flags, &mut self.events, View::GlassCanvas, Class::Active, false);
        }

        if let Some(rain) = &mut self.rain {
            rain.tick(&ctx);
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.pointer.on_pointer_move(x, y);
                self.rotation.on_drag_move(x, y);
            }
            InputEvent::PointerDown { x, y, on_face } => {
                // Face presses navigate; transitions lock the hologram in place.
                if on_face || self.runner.is_guarded(Guard::Page) {
                    return;
                }
                self.rotation.on_drag_start(x, y);
                self.set_class(View::Hologram, Class::Dragging, true);
            }
            InputEvent::PointerUp { .. } => {
                if self.rotation.on_drag_end() {
                    self.set_class(View::Hologram, Class::Dragging, false);
                }
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::Scroll => self.remeasure_anchor(),
        }
    }

    /// Viewport changed: rebuild the hex grid, keep bursts and rain in place.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.hex.resize(self.viewport);
        self.shards.resize(self.viewport);
        if let Some(rain) = &mut self.rain {
            rain.resize(self.viewport);
        }
        self.remeasure_anchor();
        log::debug!("site: resized to {}x{}", width, height);
    }

    fn remeasure_anchor(&mut self) {
        let rect = match &self.probe {
            Some(probe) => probe.anchor_rect(),
            None => Some(Rect::new(0.0, 0.0, self.viewport.x, self.viewport.y)),
        };
        if let Some(rect) = rect {
            self.pointer.recompute_focus_anchor(rect);
        }
    }

    fn apply(&mut self, run: RunId, action: Action) {
        match action {
            Action::SetClass { view, class, on } => {
                self.set_class(view, class, on);
                if let (View::CaseFace(case), Class::Glowing, false) = (view, class, on) {
                    if self.rotation.is_glowing(case) {
                        self.rotation.clear_glow();
                    }
                }
            }
            // Rain waits until no transition is running.
            Action::StartField(FieldKind::Rain) if Some(run) == self.intro_run && self.transitioning() => {
                log::debug!("site: intro rain start deferred until the transition ends");
                self.rain_deferred = true;
            }
            Action::StartField(kind) => self.apply_start(kind),
            Action::StopField(kind) => {
                if let Some(field) = self.field_mut(kind) {
                    field.stop();
                }
            }
            Action::BurstShards => self.shards.burst(),
            Action::RevealGlyph { index } => {
                if let Some(glyph) = self.glyphs.get_mut(index) {
                    glyph.revealed = true;
                    self.events.push(SiteEvent::GlyphRevealed { index, glyph: glyph.ch });
                }
            }
            Action::GlyphColor { index, color } => {
                if let Some(glyph) = self.glyphs.get_mut(index) {
                    glyph.color = Some(color.clone());
                    self.events.push(SiteEvent::GlyphColored { index, color });
                }
            }
            Action::SetCurrentView(view) => self.current_view = view,
            Action::StartAutoRotate => self.rotation.start_auto(),
            Action::StopAutoRotate => self.rotation.stop_auto(),
            Action::Wait => {}
            // Nested boards are expanded by the runner before they reach here.
            Action::Run(board) => log::warn!("site: unexpanded storyboard '{}' dropped", board.name()),
        }
    }

    fn apply_start(&mut self, kind: FieldKind) {
        if let Some(field) = self.field_mut(kind) {
            field.start();
        }
    }

    fn set_class(&mut self, view: View, class: Class, on: bool) {
        set_class(&mut self.flags, &mut self.events, view, class, on);
    }

    fn field_mut(&mut self, kind: FieldKind) -> Option<&mut ParticleField> {
        match kind {
            FieldKind::Hex => Some(&mut self.hex),
            FieldKind::Shards => Some(&mut self.shards),
            FieldKind::Rain => self.rain.as_mut(),
        }
    }

    /// Draw one field. A field the variant does not run just clears.
    pub fn render<S: Surface + ?Sized>(&self, kind: FieldKind, surface: &mut S) {
        match self.field(kind) {
            Some(field) => field.render(surface),
            None => surface.clear(),
        }
    }

    // -- Page entry points --

    fn revealed(&self) -> bool {
        self.current_view != View::Loader
    }

    /// A page or case transition still has steps pending. Either one blocks
    /// new transitions of both families.
    pub fn transitioning(&self) -> bool {
        self.runner.is_guarded(Guard::Page) || self.runner.is_guarded(Guard::Case)
    }

    /// Go to `page`: home returns home, anything else opens its detail page.
    /// Returns false when the transition was not started.
    pub fn navigate_to(&mut self, page: PageId) -> bool {
        match page {
            PageId::Home => self.return_home(),
            page => self.open_detail(page),
        }
    }

    pub fn navigate_to_id(&mut self, id: &str) -> SiteResult<bool> {
        Ok(self.navigate_to(PageId::parse(id)?))
    }

    pub fn open_detail_face(&mut self, face: FaceId) -> bool {
        self.open_detail(face.page())
    }

    pub fn open_detail_face_id(&mut self, id: &str) -> SiteResult<bool> {
        Ok(self.open_detail_face(FaceId::parse(id)?))
    }

    fn open_detail(&mut self, page: PageId) -> bool {
        if !self.revealed() || self.transitioning() || self.current_view == page.view() {
            return false;
        }
        let board = timelines::open_detail(self.current_view, page, &self.config.nav, self.rain.is_some());
        self.runner.run(&board, Some(Guard::Page)).is_some()
    }

    pub fn return_home(&mut self) -> bool {
        if !self.revealed() || self.transitioning() || self.current_view == View::Home {
            return false;
        }
        let board = timelines::return_home(self.current_view, self.rain.is_some());
        self.runner.run(&board, Some(Guard::Page)).is_some()
    }

    /// Open or close the case menu.
    pub fn toggle_aux_menu(&mut self) -> bool {
        if self.transitioning() {
            return false;
        }
        let board = if self.aux_menu_open {
            timelines::close_aux_menu()
        } else {
            timelines::open_aux_menu()
        };
        if self.runner.run(&board, Some(Guard::Case)).is_none() {
            return false;
        }
        self.aux_menu_open = !self.aux_menu_open;
        true
    }

    /// Snap the hologram to a case's face and light only that face.
    pub fn select_case(&mut self, case: CaseId) {
        self.rotation.select_face(case);
        for other in CaseId::ALL {
            self.set_class(View::CaseFace(other), Class::Glowing, other == case);
        }
    }

    pub fn select_case_id(&mut self, id: &str) -> SiteResult<()> {
        self.select_case(CaseId::parse(id)?);
        Ok(())
    }

    pub fn load_case(&mut self, case: CaseId) -> bool {
        let target = View::Case(case);
        if !self.revealed() || self.transitioning() || self.current_view == target {
            return false;
        }
        let board = timelines::load_case(self.current_view, case, self.rain.is_some());
        if self.runner.run(&board, Some(Guard::Case)).is_none() {
            return false;
        }
        self.aux_menu_open = false;
        true
    }

    pub fn load_case_id(&mut self, id: &str) -> SiteResult<bool> {
        Ok(self.load_case(CaseId::parse(id)?))
    }

    /// Acknowledge a contact-form submission. Nothing is sent anywhere.
    pub fn submit_form(&mut self) {
        log::info!("site: form submission acknowledged");
        self.events.push(SiteEvent::FormAcknowledged);
    }

    // -- Accessors --

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn field(&self, kind: FieldKind) -> Option<&ParticleField> {
        match kind {
            FieldKind::Hex => Some(&self.hex),
            FieldKind::Shards => Some(&self.shards),
            FieldKind::Rain => self.rain.as_ref(),
        }
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn rotation(&self) -> &RotationController {
        &self.rotation
    }

    pub fn flags(&self) -> &ViewFlags {
        &self.flags
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn is_guarded(&self, guard: Guard) -> bool {
        self.runner.is_guarded(guard)
    }

    pub fn aux_menu_open(&self) -> bool {
        self.aux_menu_open
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Milliseconds of site time elapsed.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SiteEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Flip a flag and record the change. Free-standing so it can run while a
/// field is borrowed.
fn set_class(flags: &mut ViewFlags, events: &mut Vec<SiteEvent>, view: View, class: Class, on: bool) {
    if flags.set(view, class, on) {
        events.push(SiteEvent::ClassChanged { view, class, on });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::Variant;

    const FRAME: f64 = 1000.0 / 60.0;

    fn run_for(site: &mut Site, ms: f64) {
        let frames = (ms / FRAME).ceil() as usize;
        for _ in 0..frames {
            site.tick(FRAME);
        }
    }

    fn revealed_site(variant: Variant) -> Site {
        let mut site = Site::new(SiteConfig::variant(variant));
        site.start();
        run_for(&mut site, 8000.0);
        site
    }

    #[test]
    fn starts_on_loader_with_pages_hidden() {
        let site = Site::new(SiteConfig::default());
        assert_eq!(site.current_view(), View::Loader);
        assert!(!site.flags().is_shown(View::Page(PageId::About)));
        assert!(site.field(FieldKind::Hex).is_some_and(|f| f.is_active()));
        assert!(site.field(FieldKind::Rain).is_none());
    }

    #[test]
    fn start_is_one_shot() {
        let mut site = Site::new(SiteConfig::default());
        assert!(site.start());
        assert!(!site.start());
    }

    #[test]
    fn navigation_waits_for_reveal() {
        let mut site = Site::new(SiteConfig::default());
        site.start();
        assert!(!site.navigate_to(PageId::About));
        run_for(&mut site, 6100.0);
        assert_eq!(site.current_view(), View::Home);
        assert!(site.navigate_to(PageId::About));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut site = revealed_site(Variant::Pyramid);
        assert!(site.load_case_id("case9").is_err());
        assert!(site.select_case_id("").is_err());
        assert!(site.navigate_to_id("blog").is_err());
        assert!(site.open_detail_face_id("top").is_err());
        assert!(!site.is_guarded(Guard::Case));
    }

    #[test]
    fn select_case_lights_one_face() {
        let mut site = revealed_site(Variant::Showcase);
        site.select_case(CaseId::Case2);
        for case in CaseId::ALL {
            assert_eq!(site.flags().has(View::CaseFace(case), Class::Glowing), case == CaseId::Case2);
        }
        assert_eq!(site.rotation().yaw(), 90.0);
        assert_eq!(site.rotation().pitch(), 10.0);
    }

    #[test]
    fn face_press_does_not_drag() {
        let mut site = revealed_site(Variant::Pyramid);
        site.push_input(InputEvent::PointerDown { x: 10.0, y: 10.0, on_face: true });
        site.tick(FRAME);
        assert!(!site.rotation().is_dragging());

        site.push_input(InputEvent::PointerDown { x: 10.0, y: 10.0, on_face: false });
        site.tick(FRAME);
        assert!(site.rotation().is_dragging());
        assert!(site.flags().has(View::Hologram, Class::Dragging));

        site.push_input(InputEvent::PointerUp { x: 10.0, y: 10.0 });
        site.tick(FRAME);
        assert!(!site.flags().has(View::Hologram, Class::Dragging));
    }

    #[test]
    fn form_submission_is_acknowledged() {
        let mut site = Site::new(SiteConfig::default());
        site.submit_form();
        assert_eq!(site.drain_events(), vec![SiteEvent::FormAcknowledged]);
        assert!(site.drain_events().is_empty());
    }
}
