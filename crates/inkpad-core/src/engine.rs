//! The drawing state engine.
//!
//! `Engine` owns the committed `App` value, the undo/redo history, and the
//! subscriber registry. Every mutation runs to completion on the calling
//! thread, replaces the whole state, and then fans the new value out to
//! subscribers; consumers never mutate shapes directly.

use crate::camera::Camera;
use crate::history::History;
use crate::hit::{self, HitTester, StrokeGeometry};
use crate::shapes::{Freeform, PressuredPoint, Shape};
use crate::state::{Action, App, MetaPatch, Status, ThemePatch};
use kurbo::Point;

/// Handle returned by [`Engine::subscribe`]; pass it back to
/// [`Engine::unsubscribe`] to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener = Box<dyn Fn(&App)>;

/// State manager for one drawing surface.
pub struct Engine {
    state: App,
    history: History,
    hit_tester: Box<dyn HitTester>,
    subscribers: Vec<(SubscriberId, Listener)>,
    next_subscriber: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine seeded with the built-in defaults and the offline
    /// geometry hit tester.
    pub fn new() -> Self {
        Self::with_hit_tester(Box::new(StrokeGeometry))
    }

    /// Create an engine with an injected hit-test capability.
    pub fn with_hit_tester(hit_tester: Box<dyn HitTester>) -> Self {
        Self {
            state: App::default(),
            history: History::new(),
            hit_tester,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// The current committed state.
    pub fn state(&self) -> &App {
        &self.state
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Register a listener for committed states. Listeners see every
    /// mutation, each as a fully-formed `App` value.
    pub fn subscribe(&mut self, listener: impl Fn(&App) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Detach a previously registered listener.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    fn notify(&self) {
        for (_, listener) in &self.subscribers {
            listener(&self.state);
        }
    }

    /// Switch tools. Shapes still mid-edit are dropped along with invalid
    /// ones, so no stroke is left dangling across a tool change.
    pub fn set_status(&mut self, status: Status) {
        self.state.status = status;
        self.state
            .content
            .shapes
            .retain(|shape| shape.is_valid() && !shape.editing());
        self.notify();
    }

    /// Apply a partial theme update.
    pub fn set_theme(&mut self, patch: ThemePatch) {
        self.state.theme = self.state.theme.merged(patch);
        self.notify();
    }

    /// Apply a partial metadata update.
    pub fn set_meta(&mut self, patch: MetaPatch) {
        self.state.meta = self.state.meta.merged(patch);
        self.notify();
    }

    /// Pan the camera by a device delta in screen units.
    pub fn on_pan(&mut self, dx: f64, dy: f64) {
        self.state.camera = self.state.camera.pan(dx, dy);
        self.notify();
    }

    /// Zoom by factor `dz` toward the screen coordinate `center`.
    pub fn on_pinch(&mut self, center: Point, dz: f64) {
        self.state.camera = self.state.camera.zoom_to(center, dz);
        self.notify();
    }

    /// Restore 100% zoom, holding the canvas point under `center` fixed.
    pub fn on_reset_zoom(&mut self, center: Point) {
        self.state.camera = self.state.camera.reset_zoom(center);
        self.notify();
    }

    /// Restore the built-in initial camera.
    pub fn on_reset_camera(&mut self) {
        self.state.camera = Camera::reset();
        self.notify();
    }

    /// Pointer down with the freehand tool: open the gesture's undo
    /// transaction and start a one-point stroke at the canvas position.
    pub fn on_freehand_start(&mut self, point: PressuredPoint) {
        self.history.begin(self.state.clone());

        let on_canvas = self.state.camera.screen_to_canvas_pressured(point);
        let shape = Freeform::start(
            on_canvas,
            self.state.theme.pen_color,
            self.state.theme.pen_size,
        );

        self.state.action = Action::DrawingFreehand;
        self.state.content.selected_ids = vec![shape.id];
        self.state.content.shapes.push(Shape::Freeform(shape));
        self.notify();
    }

    /// Pointer move while drawing: append the sample to the stroke being
    /// edited. Every sample is kept; resampling belongs to the renderer.
    /// Silent no-op when no stroke is editing.
    pub fn on_freehand_move(&mut self, point: PressuredPoint) {
        let on_canvas = self.state.camera.screen_to_canvas_pressured(point);

        let Some(editing) = self
            .state
            .content
            .shapes
            .iter_mut()
            .find(|shape| shape.editing())
        else {
            return;
        };
        if let Some(freeform) = editing.as_freeform_mut() {
            freeform.add_point(on_canvas);
        }

        self.state.action = Action::DrawingFreehand;
        self.notify();
    }

    /// Pointer up with the freehand tool: finalize the stroke and seal the
    /// gesture's transaction.
    pub fn on_freehand_end(&mut self) {
        self.finish_gesture(Status::Freehand);
    }

    /// Pointer down with the eraser: open the gesture's undo transaction,
    /// then treat the first sample like any other move.
    pub fn on_erase_start(&mut self, point: PressuredPoint) {
        self.history.begin(self.state.clone());
        self.on_erase_move(point);
    }

    /// Pointer move while erasing: recompute every shape's `deleting` flag
    /// from this move's hit test alone. A shape the pointer has moved off
    /// leaves the delete set again; nothing is sticky until the gesture
    /// ends.
    pub fn on_erase_move(&mut self, point: PressuredPoint) {
        let on_canvas = self
            .state
            .camera
            .screen_to_canvas_pressured(point)
            .position();

        for shape in &mut self.state.content.shapes {
            let hit = shape
                .as_freeform()
                .map(|freeform| hit::hits(self.hit_tester.as_ref(), freeform, on_canvas))
                .unwrap_or(false);
            if let Some(freeform) = shape.as_freeform_mut() {
                freeform.deleting = hit;
            }
        }

        self.state.action = Action::Erasing;
        self.notify();
    }

    /// Pointer up with the eraser: drop everything still flagged and seal
    /// the gesture's transaction.
    pub fn on_erase_end(&mut self) {
        self.finish_gesture(Status::Erase);
    }

    /// Shared gesture epilogue: keep valid shapes, clear `editing`
    /// everywhere, clear the selection, return to idle, and commit.
    fn finish_gesture(&mut self, status: Status) {
        let shapes = std::mem::take(&mut self.state.content.shapes);
        self.state.content.shapes = shapes
            .into_iter()
            .filter(Shape::is_valid)
            .map(Shape::end_editing)
            .collect();
        self.state.content.selected_ids.clear();
        self.state.action = Action::Idle;
        self.state.status = status;

        self.history.commit(self.state.clone());
        self.notify();
    }

    /// Clear the canvas. Deliberately not recorded in the history.
    pub fn on_delete_all_shapes(&mut self) {
        self.state.content.shapes.clear();
        self.state.content.selected_ids.clear();
        self.notify();
    }

    /// Replace the whole state, recording the transition so it can be
    /// undone like any gesture. Used by hydration, which trusts remote
    /// content as already valid.
    pub fn set_full_state(&mut self, new_state: App, op_id: Option<&str>) {
        let before = std::mem::replace(&mut self.state, new_state);
        self.history
            .record(before, self.state.clone(), op_id.map(String::from));
        self.notify();
    }

    /// Revert the most recent recorded transaction.
    pub fn undo(&mut self) {
        if let Some(state) = self.history.undo() {
            self.state = state;
            self.notify();
        }
    }

    /// Re-apply the most recently undone transaction.
    pub fn redo(&mut self) {
        if let Some(state) = self.history.redo() {
            self.state = state;
            self.notify();
        }
    }

    /// Back to the built-in defaults, dropping all history.
    pub fn reset(&mut self) {
        self.state = App::default();
        self.history.clear();
        self.notify();
    }
}
