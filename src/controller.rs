use crate::camera::{Action, Steps, Viewer};
use crate::renderer::{RenderPlan, Surface, render_frame};
use crate::world::Scene;

/// Frame dimensions the controller is currently drawing for. Replaced wholesale
/// on resize, never edited in place.
#[derive(Debug, PartialEq, Eq)]
struct Subscription {
    width: u32,
    height: u32,
}

impl Subscription {
    fn acquire(width: u32, height: u32) -> Self {
        log::debug!("render subscription bound to {width}x{height}");
        Self { width, height }
    }

    fn release(self) {
        log::debug!(
            "render subscription for {}x{} released",
            self.width,
            self.height
        );
    }
}

/// Owns the viewer, the scene and the drawing surface.
///
/// Input only flips a dirty flag; [`RenderController::frame`] pulls that flag
/// and redraws every column when it is set.
pub struct RenderController<S: Surface> {
    scene: Scene,
    viewer: Viewer,
    steps: Steps,
    fov: f64,
    surface: S,
    subscription: Option<Subscription>,
    dirty: bool,
}

impl<S: Surface> RenderController<S> {
    pub fn new(scene: Scene, viewer: Viewer, steps: Steps, fov: f64, surface: S) -> Self {
        Self {
            scene,
            viewer,
            steps,
            fov,
            surface,
            subscription: None,
            dirty: true,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mutate the viewer for one input event and mark the frame stale.
    pub fn apply(&mut self, action: Action) {
        self.steps.apply(&mut self.viewer, action);
        self.dirty = true;
        log::trace!("{action:?} -> {:?}", self.viewer);
    }

    /// Drop the old subscription, reallocate the surface, then bind a new one.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(old) = self.subscription.take() {
            old.release();
        }
        self.surface.resize(width, height);
        self.subscription = Some(Subscription::acquire(width, height));
        self.dirty = true;
    }

    /// Redraw the whole frame if anything changed since the last one.
    ///
    /// Returns whether the surface was drawn. Nothing is drawn before the first
    /// [`resize`](Self::resize).
    pub fn frame(&mut self) -> bool {
        let Some(sub) = &self.subscription else {
            return false;
        };
        if !self.dirty {
            return false;
        }
        let plan = RenderPlan::derive(&self.viewer, self.fov, sub.width);
        let shapes = self.scene.relative_to(self.viewer.position);
        log::debug!(
            "frame {}x{} at {:?} facing {:.3}",
            sub.width,
            sub.height,
            self.viewer.position,
            self.viewer.facing
        );
        render_frame(&mut self.surface, &shapes, &plan, sub.width, sub.height);
        self.dirty = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::tests::{Call, Recorder};
    use crate::vectors::V2;
    use std::f64::consts::PI;

    fn controller() -> RenderController<Recorder> {
        RenderController::new(
            Scene::demo().unwrap(),
            Viewer::default(),
            Steps::default(),
            1.5 * PI,
            Recorder::default(),
        )
    }

    fn strokes(rec: &Recorder) -> usize {
        rec.calls.iter().filter(|c| **c == Call::Stroke).count()
    }

    #[test]
    fn nothing_drawn_before_first_resize() {
        let mut c = controller();
        assert!(!c.frame());
        assert!(c.surface().calls.is_empty());
    }

    #[test]
    fn clean_frames_are_skipped() {
        let mut c = controller();
        c.resize(8, 4);
        assert!(c.frame());
        assert_eq!(strokes(c.surface()), 8);
        assert!(!c.is_dirty());

        assert!(!c.frame());
        assert_eq!(strokes(c.surface()), 8);
    }

    #[test]
    fn any_action_redraws_every_column() {
        let mut c = controller();
        c.resize(8, 4);
        c.frame();
        for action in [
            Action::RotateLeft,
            Action::RotateRight,
            Action::MoveForward,
            Action::MoveBackward,
        ] {
            let before = strokes(c.surface());
            c.apply(action);
            assert!(c.is_dirty());
            assert!(c.frame());
            assert_eq!(strokes(c.surface()) - before, 8);
        }
    }

    #[test]
    fn rendering_never_moves_the_viewer() {
        let mut c = controller();
        c.resize(16, 4);
        c.apply(Action::MoveForward);
        let before = *c.viewer();
        c.frame();
        assert_eq!(*c.viewer(), before);
        assert!(!c.frame());
    }

    #[test]
    fn resize_rebinds_dimensions() {
        let mut c = controller();
        c.resize(4, 2);
        c.frame();
        c.resize(6, 3);
        assert!(c.is_dirty());
        c.frame();

        let calls = &c.surface().calls;
        let second = calls
            .iter()
            .position(|call| *call == Call::Resize(6, 3))
            .unwrap();
        // Old frame fully drawn before the surface is reallocated.
        assert_eq!(strokes(&Recorder { calls: calls[..second].to_vec() }), 4);
        assert_eq!(calls[second + 1], Call::Clear(0.0, 0.0, 6.0, 3.0));
        assert_eq!(strokes(c.surface()), 4 + 6);
    }

    #[test]
    fn frame_casts_from_viewer_position() {
        // From (0, 0.5) the straight-up column hits the wall 2 units away,
        // the same as casting against a scene built around the viewer.
        let mut c = RenderController::new(
            Scene::demo().unwrap(),
            Viewer::new(V2::new(0.0, 0.5), PI / 2.0),
            Steps::default(),
            PI,
            Recorder::default(),
        );
        c.resize(2, 1);
        c.frame();
        let colors = c.surface().colors();
        // Column 1 looks along the heading.
        match colors[1] {
            crate::renderer::Color::Gray(v) => {
                assert!((v - crate::renderer::intensity(2.0)).abs() < 1e-6)
            }
            other => panic!("expected a hit, got {other:?}"),
        }
    }
}
