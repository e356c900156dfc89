//! Top-level application state machine.
//!
//! `AppState` owns the cloth, the touch linker and the frame options.  It
//! applies [`InputEvent`]s, steps the cloth once per frame and draws it
//! into a [`Raster`].

use std::sync::mpsc::{self, TryRecvError};

use log::{debug, info, warn};

use image_cloth::{Handle, ImageCloth};

use crate::input::{
    spawn_input_source, DisplayOption, InputEvent, SimInput, SimInputSource,
};
use crate::link::TouchLinker;
use crate::raster::Raster;
use crate::settings::{AppConfig, AppSettings};
use crate::texture::{TestPattern, Texture, TextureSource};
use crate::visualizer::Visualizer;

const STATUS_COLOUR: u32 = 0xFF888888;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    cloth:    ImageCloth,
    linker:   TouchLinker,
    settings: AppSettings,

    // ── frame options ────────────────────────────────────────────────────
    clear_frame: bool,
    fade_frame:  bool,

    frames: u64,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Result<Self, String> {
        let mut cloth = ImageCloth::new(cfg.cloth).map_err(|e| e.to_string())?;
        cloth.set_display(cfg.app.overlays);
        let (fade, clear) = (cfg.app.fade_frame, cfg.app.clear_frame);
        let mut app = AppState {
            cloth,
            linker:      TouchLinker::new(cfg.app.selection_range),
            clear_frame: false,
            fade_frame:  false,
            settings:    cfg.app,
            frames:      0,
        };
        // Through the setter so a config asking for both keeps only one.
        app.set_display(DisplayOption::FadeFrame,  fade);
        app.set_display(DisplayOption::ClearFrame, clear);
        Ok(app)
    }

    // ── process one InputEvent ───────────────────────────────────────────

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::HandleLockChanged { handle, locked } => {
                self.with_handle(handle, "lock", |c, h| {
                    if locked { c.fix_handle(h) } else { c.free_handle(h) }
                });
            }
            InputEvent::ToggleHandleLock(handle) => {
                self.with_handle(handle, "toggle", toggle_lock);
            }
            InputEvent::ToggleLinkedLocks => {
                let linked = self.linker.linked_handles();
                if linked.is_empty() {
                    debug!("lock toggle with no linked handles");
                }
                for h in linked {
                    toggle_lock(&mut self.cloth, h);
                }
            }

            InputEvent::HandleTargetMoved { handle, dx, dy } => {
                self.with_handle(handle, "move", |c, h| c.offset_handle_position(h, dx, dy, 0.0));
            }
            InputEvent::HandleTargetSet { handle, x, y } => {
                self.with_handle(handle, "set", |c, h| c.set_handle_position(h, x, y, 0.0));
            }
            InputEvent::HandleVelocityCleared(handle) => {
                self.with_handle(handle, "clear velocity", ImageCloth::clear_handle_velocity);
            }

            InputEvent::GravityChanged(g) => self.cloth.set_gravity(g),
            InputEvent::GravityNudged(d)  => {
                let g = self.cloth.gravity() + d;
                self.cloth.set_gravity(g);
            }
            InputEvent::ResetRequested => self.reset(),

            InputEvent::SetDisplay(opt, on) => self.set_display(opt, on),
            InputEvent::ToggleDisplay(opt)  => {
                let on = !self.display(opt);
                self.set_display(opt, on);
            }

            InputEvent::TouchDown { id, x, y } => self.linker.touch_down(id, x, y),
            InputEvent::TouchMove { id, x, y } => self.linker.touch_move(id, x, y),
            InputEvent::TouchUp   { id, x, y } => self.linker.touch_up(id, x, y, &mut self.cloth),

            InputEvent::Quit => { /* handled in run loop */ }
        }
    }

    /// Run `f` on `handle`, or log and do nothing when there is none.
    fn with_handle(&mut self, handle: Option<Handle>, what: &str, f: impl FnOnce(&mut ImageCloth, Handle)) {
        match handle {
            Some(h) => f(&mut self.cloth, h),
            None    => debug!("{} ignored: no handle selected", what),
        }
    }

    pub fn reset(&mut self) {
        self.cloth.set_gravity(0.0);
        self.cloth.reset_handles();
        self.cloth.fix_handles();
        info!("reset: gravity 0, handles fixed at layout positions");
    }

    // ── display options ──────────────────────────────────────────────────

    pub fn display(&self, opt: DisplayOption) -> bool {
        match opt {
            DisplayOption::Handles    => self.cloth.draws_handles(),
            DisplayOption::Outlines   => self.cloth.draws_outlines(),
            DisplayOption::Mesh       => self.cloth.draws_mesh(),
            DisplayOption::ClearFrame => self.clear_frame,
            DisplayOption::FadeFrame  => self.fade_frame,
        }
    }

    /// Clear-frame and fade-frame exclude each other: switching one on
    /// switches the other off.
    pub fn set_display(&mut self, opt: DisplayOption, on: bool) {
        match opt {
            DisplayOption::Handles    => self.cloth.set_draw_handles(on),
            DisplayOption::Outlines   => self.cloth.set_draw_outlines(on),
            DisplayOption::Mesh       => self.cloth.set_draw_mesh(on),
            DisplayOption::ClearFrame => {
                self.clear_frame = on;
                if on { self.fade_frame = false; }
            }
            DisplayOption::FadeFrame  => {
                self.fade_frame = on;
                if on { self.clear_frame = false; }
            }
        }
        debug!("{:?} {}", opt, if on { "on" } else { "off" });
    }

    // ── per-frame tick ────────────────────────────────────────────────────

    /// One physics step, then touches pull their handles into place.
    pub fn tick(&mut self) {
        self.cloth.step();
        self.linker.apply(&mut self.cloth);
        self.frames += 1;
    }

    pub fn render(&self, raster: &mut Raster, texture: &Texture) {
        if self.clear_frame {
            raster.clear(self.settings.background);
        } else if self.fade_frame {
            raster.fade(self.settings.background, self.settings.fade_alpha);
        }
        self.cloth.draw(&mut raster.painter(texture));
        let y = raster.height().saturating_sub(8);
        raster.draw_label(&self.status(), 6, y, STATUS_COLOUR);
    }

    pub fn status(&self) -> String {
        let locks: String = Handle::ALL.iter()
            .map(|&h| if self.cloth.handle_is_fixed(h) { 'X' } else { '-' })
            .collect();
        format!("gravity {:.1}  locks {}  frame {}", self.cloth.gravity(), locks, self.frames)
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn cloth(&self) -> &ImageCloth { &self.cloth }
    pub fn linker(&self) -> &TouchLinker { &self.linker }
    pub fn frames(&self) -> u64 { self.frames }
}

fn toggle_lock(cloth: &mut ImageCloth, h: Handle) {
    if cloth.handle_is_fixed(h) { cloth.free_handle(h) } else { cloth.fix_handle(h) }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the window, the input sources (simulation always, LeapMotion with
/// `--features leap`) and drives the event/step/draw loop.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    info!("starting: {}", cfg.summary());

    let width  = cfg.cloth.canvas_width  as usize;
    let height = cfg.cloth.canvas_height as usize;

    // ── input channels ────────────────────────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel::<InputEvent>();
    let (sim_tx, sim_rx)     = mpsc::channel::<SimInput>();
    spawn_input_source(SimInputSource::new(sim_rx, cfg.app.gravity_increment), event_tx.clone());

    #[cfg(feature = "leap")]
    spawn_input_source(
        crate::input::LeapInputSource { canvas_width: width as f32, canvas_height: height as f32 },
        event_tx.clone(),
    );
    drop(event_tx);

    let (tex_w, tex_h) = (cfg.cloth.cloth_width as usize, cfg.cloth.cloth_height as usize);
    let mut raster  = Raster::new(width, height, cfg.app.background);
    let mut pattern = TestPattern::new(tex_w, tex_h);
    let mut texture = Texture::new(tex_w, tex_h, 0xFF000000);
    let mut missing_frame_warned = false;
    let frame_rate = cfg.app.frame_rate;

    let mut app = AppState::new(cfg)?;
    let mut vis = Visualizer::new(sim_tx, width, height, frame_rate)?;

    // ── main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        if !vis.poll_input() { break; }

        loop {
            match event_rx.try_recv() {
                Ok(InputEvent::Quit)            => return Ok(()),
                Ok(evt)                         => app.handle_event(evt),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        app.tick();

        match pattern.next_frame() {
            Some(frame) => {
                texture.clone_from(frame);
                missing_frame_warned = false;
            }
            None if !missing_frame_warned => {
                warn!("texture source has no frame; reusing the last one");
                missing_frame_warned = true;
            }
            None => {}
        }

        app.render(&mut raster, &texture);
        vis.present(&raster);
    }

    info!("window closed after {} frames", app.frames());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
