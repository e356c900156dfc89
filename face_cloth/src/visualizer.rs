//! The `minifb` window: keyboard and mouse in, framebuffer out.
//!
//! | Key | Input |
//! |---|---|
//! | `1`–`4` | toggle lock of top-left, top-right, bottom-left, bottom-right |
//! | `Up` / `Down` | gravity ± increment |
//! | `Z` / `F` | clear-frame / fade-frame |
//! | `X` / `C` / `V` | handles / outlines / mesh |
//! | `L` | toggle locks of handles held by a touch |
//! | `Space` | reset |
//! | `Q` / `Escape` | quit |
//! | left mouse | drag handles |

use std::sync::mpsc::Sender;
use std::time::Duration;

use log::info;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::input::{SimInput, SimKey};
use crate::raster::Raster;

const ONE_SHOT: [(Key, SimKey); 14] = [
    (Key::Key1,   SimKey::Lock(0)),
    (Key::Key2,   SimKey::Lock(1)),
    (Key::Key3,   SimKey::Lock(2)),
    (Key::Key4,   SimKey::Lock(3)),
    (Key::Up,     SimKey::GravityUp),
    (Key::Down,   SimKey::GravityDown),
    (Key::Z,      SimKey::ClearFrame),
    (Key::F,      SimKey::FadeFrame),
    (Key::X,      SimKey::Handles),
    (Key::C,      SimKey::Outlines),
    (Key::V,      SimKey::Mesh),
    (Key::L,      SimKey::LinkedLocks),
    (Key::Space,  SimKey::Reset),
    (Key::Escape, SimKey::Quit),
];

/// Tracks the left button between polls so presses and releases become
/// edges.
#[derive(Default)]
struct MouseState {
    down: bool,
    last: (f32, f32),
}

pub struct Visualizer {
    window: Window,
    width:  usize,
    height: usize,
    sim_tx: Sender<SimInput>,
    mouse:  MouseState,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>, width: usize, height: usize, frame_rate: u32) -> Result<Self, String> {
        let mut window = Window::new(
            "Face Cloth",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| e.to_string())?;

        let frame = 1000 / frame_rate.max(1) as u64;
        window.limit_update_rate(Some(Duration::from_millis(frame)));
        info!("window open: {}x{} at {} fps", width, height, frame_rate);

        Ok(Visualizer { window, width, height, sim_tx, mouse: MouseState::default() })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse and forward them as [`SimInput`].
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::Key(SimKey::Quit));
            return false;
        }
        for (key, sim) in ONE_SHOT {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                let _ = self.sim_tx.send(SimInput::Key(sim));
            }
        }

        // ── mouse ─────────────────────────────────────────────────────────
        let down = self.window.get_mouse_down(MouseButton::Left);
        let (x, y) = self.window.get_mouse_pos(MouseMode::Clamp).unwrap_or(self.mouse.last);
        let event = match (self.mouse.down, down) {
            (false, true)                            => Some(SimInput::MouseDown(x, y)),
            (true, false)                            => Some(SimInput::MouseUp(x, y)),
            (true, true) if (x, y) != self.mouse.last => Some(SimInput::MouseMove(x, y)),
            _                                        => None,
        };
        if let Some(e) = event {
            let _ = self.sim_tx.send(e);
        }
        self.mouse = MouseState { down, last: (x, y) };

        true
    }

    pub fn present(&mut self, raster: &Raster) {
        debug_assert_eq!((raster.width(), raster.height()), (self.width, self.height));
        self.window.update_with_buffer(raster.buffer(), self.width, self.height).ok();
    }
}
