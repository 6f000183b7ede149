use wasm_bindgen::prelude::*;
use prism_engine::*;

prism_web::export_site!("prism-site");
