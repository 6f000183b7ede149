//! The site's storyboards: the one-shot intro and the navigation transitions.
//!
//! Offsets are tuned against CSS transition durations owned by the page's
//! stylesheet, so they are fixed here rather than configurable.

use super::step::{Action, Storyboard};
use crate::api::config::{IntroConfig, NavConfig};
use crate::api::types::{CaseId, Class, PageId, View};
use crate::systems::fields::FieldKind;

/// Loading label glyphs, then the full-content reveal.
/// `rain_delay_ms` starts the rain that long after the reveal.
pub fn intro(config: &IntroConfig, rain_delay_ms: Option<u32>) -> Storyboard {
    let mut board = Storyboard::new("intro");
    let settle = config.palette.len();

    for (index, _) in config.label.chars().enumerate() {
        let shown = config.label_start_ms + config.glyph_stagger_ms * index as u32;
        board.push(shown, Action::RevealGlyph { index });
        // Every palette entry but the last is a cycle step; the last one sticks.
        for (step, color) in config.palette.iter().enumerate() {
            let at = if step + 1 == settle {
                shown + config.color_step_ms * settle as u32
            } else {
                shown + config.color_step_ms * (step as u32 + 1)
            };
            board.push(at, Action::GlyphColor { index, color: color.clone() });
        }
    }

    board.push(config.reveal_ms, Action::add(View::Loader, Class::Hidden));
    board.push(config.reveal_ms, Action::show(View::Home));
    board.push(config.reveal_ms, Action::SetCurrentView(View::Home));
    if let Some(delay) = rain_delay_ms {
        board.push(config.reveal_ms + delay, Action::StartField(FieldKind::Rain));
    }
    board
}

/// Hide a departing view and drop its transition classes.
fn retire(board: &mut Storyboard, at: u32, view: View) {
    board.push(at, Action::remove(view, Class::Visible));
    board.push(at, Action::remove(view, Class::FadeOut));
    board.push(at, Action::add(view, Class::Hidden));
}

fn glass_burst(board: &mut Storyboard, at: u32) {
    board.push(at, Action::add(View::GlassCanvas, Class::Active));
    board.push(at, Action::BurstShards);
}

/// Shatter from `from` into a detail page.
pub fn open_detail(from: View, target: PageId, nav: &NavConfig, rain: bool) -> Storyboard {
    let to = target.view();
    let mut board = Storyboard::new("open-detail")
        .at(0, Action::add(from, Class::FadeOut))
        .at(0, Action::StopAutoRotate)
        .at(500, Action::add(View::Pyramid, Class::FadeOut));
    if rain {
        board.push(0, Action::StopField(FieldKind::Rain));
    }
    glass_burst(&mut board, 1000);
    if nav.mini_loader {
        board.push(1200, Action::remove(View::MiniLoader, Class::Hidden));
        board.push(1200, Action::show(View::MiniLoader));
        retire(&mut board, 2400, View::MiniLoader);
    }
    retire(&mut board, 2500, from);
    board.push(2500, Action::remove(to, Class::Hidden));
    board.push(2500, Action::SetCurrentView(to));
    board.push(2600, Action::show(to));
    board.push(3000, Action::remove(View::Pyramid, Class::FadeOut));
    if rain {
        board.push(3000, Action::StartField(FieldKind::Rain));
    }
    board
}

/// Shatter from `from` back to the home view.
pub fn return_home(from: View, rain: bool) -> Storyboard {
    let mut board = Storyboard::new("return-home").at(0, Action::add(from, Class::FadeOut));
    if rain {
        board.push(0, Action::StopField(FieldKind::Rain));
    }
    glass_burst(&mut board, 500);
    retire(&mut board, 1500, from);
    board.push(1500, Action::remove(View::Home, Class::Hidden));
    board.push(1500, Action::remove(View::Home, Class::FadeOut));
    board.push(2000, Action::show(View::Home));
    board.push(2000, Action::SetCurrentView(View::Home));
    board.push(2000, Action::StartAutoRotate);
    if rain {
        board.push(2000, Action::StartField(FieldKind::Rain));
    }
    board
}

/// Swap `from` for a case page through the mini-loader.
pub fn load_case(from: View, case: CaseId, rain: bool) -> Storyboard {
    let to = View::Case(case);
    let mut board = Storyboard::new("load-case").at(0, Action::add(from, Class::FadeOut));
    board.push(0, Action::remove(View::AuxMenu, Class::Active));
    board.push(0, Action::add(View::AuxMenu, Class::Hidden));
    if rain {
        board.push(0, Action::StopField(FieldKind::Rain));
    }
    retire(&mut board, 800, from);
    board.push(800, Action::remove(View::MiniLoader, Class::Hidden));
    board.push(800, Action::show(View::MiniLoader));
    retire(&mut board, 2000, View::MiniLoader);
    board.push(2000, Action::remove(to, Class::Hidden));
    board.push(2500, Action::show(to));
    board.push(2500, Action::SetCurrentView(to));
    for face in CaseId::ALL {
        board.push(3000, Action::remove(View::CaseFace(face), Class::Glowing));
    }
    board.push(3000, Action::StartAutoRotate);
    if rain {
        board.push(3000, Action::StartField(FieldKind::Rain));
    }
    board
}

pub fn open_aux_menu() -> Storyboard {
    Storyboard::new("aux-menu-open")
        .at(0, Action::remove(View::AuxMenu, Class::Hidden))
        .at(100, Action::add(View::AuxMenu, Class::Active))
        .at(800, Action::Wait)
}

pub fn close_aux_menu() -> Storyboard {
    Storyboard::new("aux-menu-close")
        .at(0, Action::remove(View::AuxMenu, Class::Active))
        .at(500, Action::add(View::AuxMenu, Class::Hidden))
}
