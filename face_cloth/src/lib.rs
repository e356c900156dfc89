//! # face_cloth
//!
//! The cloth installation: a live image mapped onto a mass-spring cloth
//! whose four corners are grabbed, dragged, pinned and flung by the mouse
//! or by tracked hands.
//!
//! ## Frame loop
//!
//! ```text
//!  input thread(s) ──InputEvent──▶ AppState ──step──▶ ImageCloth ──draw──▶ Raster ──▶ window
//!                                   │
//!                                   └── TouchLinker: held handles follow their touch
//! ```
//!
//! Events are drained at the start of each frame, then the cloth takes
//! exactly one physics step and is drawn once.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**, keyboard and mouse drive everything.
//! * `leap`: **Hardware mode**, tracked palms become touches via LeapC, and
//!   bringing both palms together toggles the locks of the held handles.
//!
//! ### Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `1`–`4` | Toggle lock of top-left / top-right / bottom-left / bottom-right |
//! | `Up` / `Down` | Gravity ± 0.1 |
//! | `Z` | Clear frame each tick |
//! | `F` | Fade frame each tick (trails) |
//! | `X` | Handle markers |
//! | `C` | Outlines |
//! | `V` | Mesh wireframe |
//! | `L` | Toggle locks of handles held by a touch |
//! | `Space` | Reset: gravity 0, handles back and fixed |
//! | `Q` / `Escape` | Quit |
//! | Left mouse | Grab a handle within 20px and drag it; release flings it |

pub mod settings;
pub mod input;
pub mod link;
pub mod texture;
pub mod raster;
pub mod visualizer;
pub mod app;
