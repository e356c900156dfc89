//! The four corner handles.

use glam::Vec3;

/// A named corner of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Which mesh extremes each handle sits on: (far column, far row).
const CORNERS: [(bool, bool); 4] = [
    (false, false), // TopLeft
    (true,  false), // TopRight
    (false, true),  // BottomLeft
    (true,  true),  // BottomRight
];

impl Handle {
    pub const ALL: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Slot of this handle in [`Handle::ALL`] and in colour tables.
    pub fn index(self) -> usize { self as usize }

    /// Map a numeric handle id (0–3) from an external adapter.
    pub fn from_index(i: usize) -> Option<Handle> {
        Handle::ALL.get(i).copied()
    }

    /// `(column, row)` of this corner in an `n`×`n` mesh.
    pub fn mesh_index(self, n: usize) -> (usize, usize) {
        let (far_i, far_j) = CORNERS[self.index()];
        let last = n.saturating_sub(1);
        (if far_i { last } else { 0 }, if far_j { last } else { 0 })
    }

    /// Where this handle rests on a `width`×`height` canvas.
    pub fn layout_position(self, width: f32, height: f32, margin: f32) -> Vec3 {
        let (far_x, far_y) = CORNERS[self.index()];
        Vec3::new(
            if far_x { width  - margin } else { margin },
            if far_y { height - margin } else { margin },
            0.0,
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Handle::TopLeft     => "top-left",
            Handle::TopRight    => "top-right",
            Handle::BottomLeft  => "bottom-left",
            Handle::BottomRight => "bottom-right",
        }
    }
}
