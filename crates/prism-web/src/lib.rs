pub mod dom;
pub mod runner;

pub use dom::{Dom, DomProbe};
pub use runner::{field_kind, SiteRunner};

/// Generate all `#[wasm_bindgen]` exports for a site.
///
/// Generates:
/// - `thread_local!` storage for the SiteRunner
/// - `with_runner()` helper function
/// - wasm-bindgen exports: `site_init`, `site_tick`, input handlers, the page
///   entry points and the per-field vertex buffer accessors
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use prism_engine::*;
///
/// prism_web::export_site!("my-site");
/// ```
///
/// Bad ids coming from the page are logged, never panicked on.
#[macro_export]
macro_rules! export_site {
    ($site_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SiteRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SiteRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Site not initialized. Call site_init() first.");
                f(runner)
            })
        }

        /// `config_json` may be empty for the default (pyramid) variant.
        #[wasm_bindgen]
        pub fn site_init(config_json: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = match $crate::SiteRunner::from_json(config_json) {
                Ok(runner) => runner,
                Err(err) => {
                    log::error!("{}: {}; using defaults", $site_name, err);
                    $crate::SiteRunner::new(SiteConfig::default())
                }
            };
            if let Some(dom) = $crate::Dom::from_window() {
                runner.attach_dom(dom);
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $site_name);
        }

        #[wasm_bindgen]
        pub fn site_tick(dt_ms: f64) {
            with_runner(|r| r.tick(dt_ms));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn site_pointer_down(x: f32, y: f32, on_face: bool) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, on_face }));
        }

        #[wasm_bindgen]
        pub fn site_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn site_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn site_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        #[wasm_bindgen]
        pub fn site_scroll() {
            with_runner(|r| r.push_input(InputEvent::Scroll));
        }

        // ---- Page entry points ----

        #[wasm_bindgen]
        pub fn site_navigate(page: &str) -> bool {
            with_runner(|r| match r.site_mut().navigate_to_id(page) {
                Ok(started) => {
                    if !started {
                        log::warn!("{}: navigation to {} ignored", $site_name, page);
                    }
                    started
                }
                Err(err) => {
                    log::error!("{}: {}", $site_name, err);
                    false
                }
            })
        }

        #[wasm_bindgen]
        pub fn site_open_face(face: &str) -> bool {
            with_runner(|r| match r.site_mut().open_detail_face_id(face) {
                Ok(started) => started,
                Err(err) => {
                    log::error!("{}: {}", $site_name, err);
                    false
                }
            })
        }

        #[wasm_bindgen]
        pub fn site_return_home() -> bool {
            with_runner(|r| r.site_mut().return_home())
        }

        #[wasm_bindgen]
        pub fn site_toggle_aux_menu() -> bool {
            with_runner(|r| r.site_mut().toggle_aux_menu())
        }

        #[wasm_bindgen]
        pub fn site_select_case(case_id: &str) {
            with_runner(|r| {
                if let Err(err) = r.site_mut().select_case_id(case_id) {
                    log::error!("{}: {}", $site_name, err);
                }
            });
        }

        #[wasm_bindgen]
        pub fn site_load_case(case_id: &str) -> bool {
            with_runner(|r| match r.site_mut().load_case_id(case_id) {
                Ok(started) => started,
                Err(err) => {
                    log::error!("{}: {}", $site_name, err);
                    false
                }
            })
        }

        #[wasm_bindgen]
        pub fn site_submit_form() {
            with_runner(|r| r.site_mut().submit_form());
        }

        // ---- Data accessors ----

        /// `field`: 0 hex, 1 shards, 2 rain.
        #[wasm_bindgen]
        pub fn get_field_vertices_ptr(field: u32) -> *const f32 {
            with_runner(|r| match $crate::field_kind(field) {
                Some(kind) => r.vertices_ptr(kind),
                None => std::ptr::null(),
            })
        }

        #[wasm_bindgen]
        pub fn get_field_vertex_count(field: u32) -> u32 {
            with_runner(|r| $crate::field_kind(field).map_or(0, |kind| r.vertex_count(kind)))
        }

        #[wasm_bindgen]
        pub fn get_vertex_floats() -> u32 {
            VectorVertex::FLOATS as u32
        }

        #[wasm_bindgen]
        pub fn get_hologram_transform() -> String {
            with_runner(|r| r.site().rotation().css_transform())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width())
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height())
        }
    };
}
