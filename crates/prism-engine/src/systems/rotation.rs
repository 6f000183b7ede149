//! Polyhedron orientation: idle auto-spin, drag rotation and per-case face presets.

use glam::Vec2;

use crate::api::config::RotationConfig;
use crate::api::types::CaseId;
use crate::core::time::FixedTimestep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    AutoRotating,
    Dragging,
    PausedAtFace(CaseId),
    /// Held still: during navigation, or while a post-drag resume is pending.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct RotationController {
    config: RotationConfig,
    pitch: f32,
    yaw: f32,
    mode: RotationMode,
    last_drag: Vec2,
    /// Milliseconds until auto-rotation resumes after a drag.
    resume_in: Option<f64>,
    glowing: Option<CaseId>,
    ticker: FixedTimestep,
}

impl RotationController {
    pub fn new(config: RotationConfig) -> Self {
        let ticker = FixedTimestep::new(config.auto_period_ms);
        Self {
            pitch: config.initial_pitch,
            yaw: 0.0,
            mode: RotationMode::AutoRotating,
            last_drag: Vec2::ZERO,
            resume_in: None,
            glowing: None,
            ticker,
            config,
        }
    }

    /// One auto-rotation step.
    pub fn tick(&mut self) {
        if self.mode == RotationMode::AutoRotating {
            self.yaw = wrap_degrees(self.yaw + self.config.auto_step_deg);
        }
    }

    /// Advance the controller's clock. Auto-rotation steps are skipped while
    /// `held` (a page transition is running).
    pub fn advance(&mut self, dt_ms: f64, held: bool) {
        if let Some(remaining) = self.resume_in {
            let remaining = remaining - dt_ms;
            if remaining <= 0.0 {
                self.resume_in = None;
                self.mode = RotationMode::AutoRotating;
            } else {
                self.resume_in = Some(remaining);
            }
        }
        let steps = self.ticker.accumulate(dt_ms);
        if held {
            return;
        }
        for _ in 0..steps {
            self.tick();
        }
    }

    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        self.mode = RotationMode::Dragging;
        self.last_drag = Vec2::new(x, y);
        self.resume_in = None;
    }

    /// Apply pointer movement. Returns false when no drag is in progress.
    pub fn on_drag_move(&mut self, x: f32, y: f32) -> bool {
        if self.mode != RotationMode::Dragging {
            return false;
        }
        let pos = Vec2::new(x, y);
        let delta = pos - self.last_drag;
        let sensitivity = self.config.drag_sensitivity;
        self.yaw = wrap_degrees(self.yaw + delta.x * sensitivity);
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(self.config.pitch_min, self.config.pitch_max);
        self.last_drag = pos;
        true
    }

    /// Release the drag; auto-rotation resumes after the configured delay.
    pub fn on_drag_end(&mut self) -> bool {
        if self.mode != RotationMode::Dragging {
            return false;
        }
        self.mode = RotationMode::Stopped;
        self.resume_in = Some(self.config.resume_delay_ms);
        true
    }

    /// Snap to the case's face and make it the only glowing one.
    pub fn select_face(&mut self, case: CaseId) {
        self.mode = RotationMode::PausedAtFace(case);
        self.yaw = case.yaw_deg();
        self.pitch = self.config.face_pitch;
        self.glowing = Some(case);
        self.resume_in = None;
    }

    pub fn clear_glow(&mut self) {
        self.glowing = None;
    }

    pub fn start_auto(&mut self) {
        self.mode = RotationMode::AutoRotating;
        self.resume_in = None;
    }

    /// Stop spinning. An active drag is left alone.
    pub fn stop_auto(&mut self) {
        if self.mode != RotationMode::Dragging {
            self.mode = RotationMode::Stopped;
        }
        self.resume_in = None;
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.mode == RotationMode::Dragging
    }

    pub fn glowing(&self) -> Option<CaseId> {
        self.glowing
    }

    pub fn is_glowing(&self, case: CaseId) -> bool {
        self.glowing == Some(case)
    }

    /// Transform applied to the polyhedron element.
    pub fn css_transform(&self) -> String {
        format!("rotateX({}deg) rotateY({}deg)", self.pitch, self.yaw)
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(RotationConfig::default())
    }
}

fn wrap_degrees(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_tilted_and_spinning() {
        let rot = RotationController::default();
        assert_eq!(rot.pitch(), -20.0);
        assert_eq!(rot.yaw(), 0.0);
        assert_eq!(rot.mode(), RotationMode::AutoRotating);
        assert_eq!(rot.css_transform(), "rotateX(-20deg) rotateY(0deg)");
    }

    #[test]
    fn auto_rotation_steps_every_period() {
        let mut rot = RotationController::default();
        rot.advance(29.0, false);
        assert_eq!(rot.yaw(), 0.0);
        rot.advance(1.0, false);
        assert!((rot.yaw() - 0.3).abs() < 1e-5);
        rot.advance(90.0, false);
        assert!((rot.yaw() - 1.2).abs() < 1e-4);
    }

    #[test]
    fn held_guard_freezes_yaw() {
        let mut rot = RotationController::default();
        rot.advance(300.0, true);
        assert_eq!(rot.yaw(), 0.0);
    }

    #[test]
    fn drag_rotates_and_clamps_pitch() {
        let mut rot = RotationController::default();
        rot.on_drag_start(100.0, 100.0);
        assert!(rot.is_dragging());

        assert!(rot.on_drag_move(120.0, 100.0));
        assert_eq!(rot.yaw(), 10.0);

        // Dragging down tilts toward the floor until the clamp.
        rot.on_drag_move(120.0, 300.0);
        assert_eq!(rot.pitch(), -90.0);
        rot.on_drag_move(120.0, -500.0);
        assert_eq!(rot.pitch(), 0.0);

        // No auto steps while dragging.
        let yaw = rot.yaw();
        rot.advance(300.0, false);
        assert_eq!(rot.yaw(), yaw);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut rot = RotationController::default();
        assert!(!rot.on_drag_move(50.0, 50.0));
        assert!(!rot.on_drag_end());
        assert_eq!(rot.pitch(), -20.0);
    }

    #[test]
    fn auto_rotation_resumes_after_cooldown() {
        let mut rot = RotationController::default();
        rot.on_drag_start(0.0, 0.0);
        assert!(rot.on_drag_end());
        assert_eq!(rot.mode(), RotationMode::Stopped);

        rot.advance(1999.0, false);
        assert_eq!(rot.mode(), RotationMode::Stopped);
        rot.advance(1.0, false);
        assert_eq!(rot.mode(), RotationMode::AutoRotating);
    }

    #[test]
    fn new_drag_cancels_pending_resume() {
        let mut rot = RotationController::default();
        rot.on_drag_start(0.0, 0.0);
        rot.on_drag_end();
        rot.advance(1500.0, false);
        rot.on_drag_start(0.0, 0.0);
        rot.advance(1000.0, false);
        assert_eq!(rot.mode(), RotationMode::Dragging);
    }

    #[test]
    fn select_face_presets() {
        let mut rot = RotationController::default();
        rot.select_face(CaseId::Case2);
        assert_eq!(rot.yaw(), 90.0);
        assert_eq!(rot.pitch(), 10.0);
        assert_eq!(rot.mode(), RotationMode::PausedAtFace(CaseId::Case2));
        for case in CaseId::ALL {
            assert_eq!(rot.is_glowing(case), case == CaseId::Case2);
        }

        rot.select_face(CaseId::Case3);
        assert_eq!(rot.yaw(), 270.0);
        assert!(!rot.is_glowing(CaseId::Case2));

        // Paused: the ticker does not move it.
        rot.advance(600.0, false);
        assert_eq!(rot.yaw(), 270.0);
    }

    #[test]
    fn stop_auto_leaves_drag_alone() {
        let mut rot = RotationController::default();
        rot.on_drag_start(0.0, 0.0);
        rot.stop_auto();
        assert!(rot.is_dragging());

        let mut idle = RotationController::default();
        idle.stop_auto();
        assert_eq!(idle.mode(), RotationMode::Stopped);
        idle.start_auto();
        assert_eq!(idle.mode(), RotationMode::AutoRotating);
    }

    #[test]
    fn yaw_wraps_at_full_turn() {
        let mut rot = RotationController::default();
        rot.on_drag_start(0.0, 0.0);
        rot.on_drag_move(740.0, 0.0);
        assert!((rot.yaw() - 10.0).abs() < 1e-4);
    }
}
