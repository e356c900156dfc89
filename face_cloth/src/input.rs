//! Input sources: keyboard/mouse simulation and LeapMotion hardware.
//!
//! The public interface is [`InputEvent`] delivered over a `mpsc` channel.
//! The app never needs to know whether a handle was moved by a mouse, a
//! tracked palm or some other adapter.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::debug;

use image_cloth::Handle;

// ════════════════════════════════════════════════════════════════════════════
// InputEvent
// ════════════════════════════════════════════════════════════════════════════

/// Display switches reachable from input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayOption {
    Handles,
    Outlines,
    Mesh,
    /// Clear the frame before drawing.
    ClearFrame,
    /// Darken the previous frame slightly before drawing.
    FadeFrame,
}

/// Touch id used for the mouse pointer.
pub const MOUSE_TOUCH: u32 = 0;

/// A command for the cloth, produced by any input source.
///
/// Handle-addressed events carry `Option<Handle>`: adapters that work with
/// numeric ids pass the result of [`Handle::from_index`] straight through
/// and the app ignores `None`.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    HandleLockChanged     { handle: Option<Handle>, locked: bool },
    ToggleHandleLock(Option<Handle>),
    /// Toggle the lock of every handle currently held by a touch.
    ToggleLinkedLocks,

    HandleTargetMoved     { handle: Option<Handle>, dx: f32, dy: f32 },
    HandleTargetSet       { handle: Option<Handle>, x: f32, y: f32 },
    HandleVelocityCleared(Option<Handle>),

    GravityChanged(f32),
    GravityNudged(f32),
    /// Gravity to zero, handles back to their layout positions and fixed.
    ResetRequested,

    SetDisplay(DisplayOption, bool),
    ToggleDisplay(DisplayOption),

    TouchDown { id: u32, x: f32, y: f32 },
    TouchMove { id: u32, x: f32, y: f32 },
    TouchUp   { id: u32, x: f32, y: f32 },

    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// InputSource trait: unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`InputEvent`]s over a channel.
pub trait InputSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<InputEvent>);
}

/// Run an input source on its own thread, feeding `tx`.
pub fn spawn_input_source<S: InputSource>(source: S, tx: Sender<InputEvent>) -> JoinHandle<()> {
    thread::spawn(move || Box::new(source).run(tx))
}

// ════════════════════════════════════════════════════════════════════════════
// SimInputSource: keyboard/mouse from the window (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    Key(SimKey),
    MouseDown(f32, f32),
    MouseMove(f32, f32),
    MouseUp(f32, f32),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Lock(usize),    // 1–4, as handle index 0–3
    GravityUp,      // Up
    GravityDown,    // Down
    ClearFrame,     // Z
    FadeFrame,      // F
    Handles,        // X
    Outlines,       // C
    Mesh,           // V
    LinkedLocks,    // L
    Reset,          // Space
    Quit,           // Q / Escape
}

/// Translates [`SimInput`] from the visualizer into [`InputEvent`]s.
pub struct SimInputSource {
    pub rx:                Receiver<SimInput>,
    pub gravity_increment: f32,
}

impl SimInputSource {
    pub fn new(rx: Receiver<SimInput>, gravity_increment: f32) -> Self {
        SimInputSource { rx, gravity_increment }
    }

    pub fn translate(&self, input: SimInput) -> InputEvent {
        let inc = self.gravity_increment;
        match input {
            SimInput::Key(key) => match key {
                SimKey::Lock(i)     => InputEvent::ToggleHandleLock(Handle::from_index(i)),
                SimKey::GravityUp   => InputEvent::GravityNudged(inc),
                SimKey::GravityDown => InputEvent::GravityNudged(-inc),
                SimKey::ClearFrame  => InputEvent::ToggleDisplay(DisplayOption::ClearFrame),
                SimKey::FadeFrame   => InputEvent::ToggleDisplay(DisplayOption::FadeFrame),
                SimKey::Handles     => InputEvent::ToggleDisplay(DisplayOption::Handles),
                SimKey::Outlines    => InputEvent::ToggleDisplay(DisplayOption::Outlines),
                SimKey::Mesh        => InputEvent::ToggleDisplay(DisplayOption::Mesh),
                SimKey::LinkedLocks => InputEvent::ToggleLinkedLocks,
                SimKey::Reset       => InputEvent::ResetRequested,
                SimKey::Quit        => InputEvent::Quit,
            },
            SimInput::MouseDown(x, y) => InputEvent::TouchDown { id: MOUSE_TOUCH, x, y },
            SimInput::MouseMove(x, y) => InputEvent::TouchMove { id: MOUSE_TOUCH, x, y },
            SimInput::MouseUp(x, y)   => InputEvent::TouchUp   { id: MOUSE_TOUCH, x, y },
        }
    }
}

impl InputSource for SimInputSource {
    fn run(self: Box<Self>, tx: Sender<InputEvent>) {
        for input in self.rx.iter() {
            let event = self.translate(input);
            let quit = event == InputEvent::Quit;
            if tx.send(event).is_err() || quit {
                debug!("sim input source stopped");
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapInputSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Input source backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Each tracked palm is a touch: it appears as `TouchDown`, follows as
/// `TouchMove` and vanishes as `TouchUp`.  Palm positions are mapped from
/// the controller's interaction box onto the canvas.  Bringing both palms
/// together toggles the locks of whatever handles they hold.
#[cfg(feature = "leap")]
pub struct LeapInputSource {
    pub canvas_width:  f32,
    pub canvas_height: f32,
}

#[cfg(feature = "leap")]
impl LeapInputSource {
    // Interaction box, millimetres above the device.
    const X_RANGE: (f32, f32) = (-200.0, 200.0);
    const Y_RANGE: (f32, f32) = (100.0, 500.0);

    /// Palm position (mm) to canvas pixels.  Up on the device is up on screen.
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        let u = (x - Self::X_RANGE.0) / (Self::X_RANGE.1 - Self::X_RANGE.0);
        let v = (y - Self::Y_RANGE.0) / (Self::Y_RANGE.1 - Self::Y_RANGE.0);
        (
            u.clamp(0.0, 1.0) * self.canvas_width,
            (1.0 - v.clamp(0.0, 1.0)) * self.canvas_height,
        )
    }
}

#[cfg(feature = "leap")]
impl InputSource for LeapInputSource {
    fn run(self: Box<Self>, tx: Sender<InputEvent>) {
        use leaprs::*;
        use log::{error, info};

        const CLAP_DIST:   f32 = 80.0;   // mm, palms this close = clap
        const UNCLAP_DIST: f32 = 150.0;  // mm, must separate again before the next
        const LEFT_TOUCH:  u32 = 1;
        const RIGHT_TOUCH: u32 = 2;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => { error!("LeapC connection failed: {:?}", e); return; }
        };
        if let Err(e) = connection.open() {
            error!("LeapMotion device failed to open: {:?}", e);
            return;
        }
        info!("LeapMotion connected");

        let mut clapped = false;
        let mut present = [false; 2];
        let mut last    = [(0.0f32, 0.0f32); 2];

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                let left  = hands.iter().find(|h| h.hand_type() == HandType::Left);
                let right = hands.iter().find(|h| h.hand_type() == HandType::Right);

                // ── palms as touches ─────────────────────────────────────
                for (slot, (id, hand)) in [(LEFT_TOUCH, left), (RIGHT_TOUCH, right)]
                    .into_iter().enumerate()
                {
                    let event = match (hand, present[slot]) {
                        (Some(h), was) => {
                            let p = h.palm().position();
                            let (x, y) = self.to_canvas(p.x, p.y);
                            present[slot] = true;
                            last[slot]    = (x, y);
                            if was { InputEvent::TouchMove { id, x, y } }
                            else   { InputEvent::TouchDown { id, x, y } }
                        }
                        (None, true) => {
                            present[slot] = false;
                            let (x, y) = last[slot];
                            InputEvent::TouchUp { id, x, y }
                        }
                        (None, false) => continue,
                    };
                    if tx.send(event).is_err() { return; }
                }

                // ── clap ─────────────────────────────────────────────────
                match (left, right) {
                    (Some(lh), Some(rh)) => {
                        let lp = lh.palm().position();
                        let rp = rh.palm().position();
                        let (dx, dy, dz) = (lp.x - rp.x, lp.y - rp.y, lp.z - rp.z);
                        let dist = (dx*dx + dy*dy + dz*dz).sqrt();

                        if !clapped && dist < CLAP_DIST {
                            clapped = true;
                            if tx.send(InputEvent::ToggleLinkedLocks).is_err() { return; }
                        } else if clapped && dist > UNCLAP_DIST {
                            clapped = false;
                        }
                    }
                    _ => clapped = false,
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
