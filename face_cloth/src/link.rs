//! Touch-to-handle linking.
//!
//! A touch (mouse pointer or tracked palm) that comes within the selection
//! box of a free-to-grab handle takes hold of it.  From then on the handle
//! follows the touch every frame with its velocity cleared, so springs
//! never fight the hand.  Letting go flings the handle with the touch's last
//! per-frame motion.

use glam::Vec2;
use log::debug;

use image_cloth::{Handle, ImageCloth};

#[derive(Clone, Debug, PartialEq)]
pub struct Touch {
    pub id:       u32,
    pub position: Vec2,
    /// Position at the previous frame.
    pub previous: Vec2,
    pub handle:   Option<Handle>,
}

impl Touch {
    pub fn delta(&self) -> Vec2 { self.position - self.previous }
}

/// Tracks live touches and which handle each one holds.
#[derive(Clone, Debug)]
pub struct TouchLinker {
    range:   f32,
    touches: Vec<Touch>,
}

impl TouchLinker {
    pub fn new(selection_range: f32) -> Self {
        TouchLinker { range: selection_range, touches: Vec::new() }
    }

    pub fn touches(&self) -> &[Touch] { &self.touches }

    fn find_mut(&mut self, id: u32) -> Option<&mut Touch> {
        self.touches.iter_mut().find(|t| t.id == id)
    }

    pub fn touch_down(&mut self, id: u32, x: f32, y: f32) {
        let at = Vec2::new(x, y);
        match self.find_mut(id) {
            Some(t) => { t.position = at; t.previous = at; }
            None    => self.touches.push(Touch { id, position: at, previous: at, handle: None }),
        }
    }

    pub fn touch_move(&mut self, id: u32, x: f32, y: f32) {
        match self.find_mut(id) {
            Some(t) => t.position = Vec2::new(x, y),
            None    => debug!("move for unknown touch {}", id),
        }
    }

    /// Remove a touch.  A handle it held is released with the touch's last
    /// per-frame motion as velocity.
    pub fn touch_up(&mut self, id: u32, x: f32, y: f32, cloth: &mut ImageCloth) {
        let Some(idx) = self.touches.iter().position(|t| t.id == id) else {
            debug!("release for unknown touch {}", id);
            return;
        };
        let mut touch = self.touches.remove(idx);
        touch.position = Vec2::new(x, y);

        if let Some(h) = touch.handle {
            let fling = touch.delta();
            cloth.set_handle_velocity(h, fling.x, fling.y, 0.0);
            debug!("touch {} released {} at ({:.1}, {:.1})", id, h.name(), fling.x, fling.y);
        }
    }

    pub fn linked_handle(&self, id: u32) -> Option<Handle> {
        self.touches.iter().find(|t| t.id == id).and_then(|t| t.handle)
    }

    pub fn is_linked(&self, h: Handle) -> bool {
        self.touches.iter().any(|t| t.handle == Some(h))
    }

    pub fn linked_handles(&self) -> Vec<Handle> {
        self.touches.iter().filter_map(|t| t.handle).collect()
    }

    /// Nearest handle whose selection box contains `at` and that no touch
    /// holds yet.
    fn pick(&self, at: Vec2, cloth: &ImageCloth) -> Option<Handle> {
        Handle::ALL.iter().copied()
            .filter(|&h| !self.is_linked(h))
            .map(|h| (h, cloth.handle_position(h).truncate() - at))
            .filter(|(_, d)| d.x.abs() < self.range && d.y.abs() < self.range)
            .min_by(|a, b| a.1.length_squared().total_cmp(&b.1.length_squared()))
            .map(|(h, _)| h)
    }

    /// Once per frame, after the physics step: held handles snap to their
    /// touches, free touches try to grab a handle.
    pub fn apply(&mut self, cloth: &mut ImageCloth) {
        for i in 0..self.touches.len() {
            let at = self.touches[i].position;
            match self.touches[i].handle {
                Some(h) => {
                    cloth.set_handle_position(h, at.x, at.y, 0.0);
                    cloth.clear_handle_velocity(h);
                }
                None => {
                    if let Some(h) = self.pick(at, cloth) {
                        self.touches[i].handle = Some(h);
                        debug!("touch {} took {}", self.touches[i].id, h.name());
                    }
                }
            }
        }
        for t in self.touches.iter_mut() {
            t.previous = t.position;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
