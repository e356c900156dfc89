//! Window-free run of the input pipeline: raw sim input goes through the
//! spawned translator thread and is applied to the app frame by frame.

use std::sync::mpsc;

use face_cloth::app::AppState;
use face_cloth::input::{spawn_input_source, InputEvent, SimInput, SimInputSource, SimKey};
use face_cloth::settings::AppConfig;
use image_cloth::{Handle, Vec3};

/// Feed `inputs` through a sim source and return the events it produced.
fn translate(inputs: Vec<SimInput>) -> Vec<InputEvent> {
    let (sim_tx, sim_rx) = mpsc::channel();
    let (tx, rx) = mpsc::channel();
    let worker = spawn_input_source(SimInputSource::new(sim_rx, 0.1), tx);
    for i in inputs {
        sim_tx.send(i).unwrap();
    }
    drop(sim_tx);
    worker.join().unwrap();
    rx.iter().collect()
}

#[test]
fn mouse_drag_moves_and_flings_a_corner() {
    let mut app = AppState::new(AppConfig::default()).unwrap();

    // Frame 1: press on the top-left handle.
    for e in translate(vec![SimInput::Key(SimKey::Lock(0)), SimInput::MouseDown(22.0, 18.0)]) {
        app.handle_event(e);
    }
    app.tick();
    assert!(!app.cloth().handle_is_fixed(Handle::TopLeft));

    // Frames 2–3: drag.
    for (x, y) in [(60.0, 40.0), (100.0, 60.0)] {
        for e in translate(vec![SimInput::MouseMove(x, y)]) {
            app.handle_event(e);
        }
        app.tick();
    }
    assert_eq!(app.cloth().handle_position(Handle::TopLeft), Vec3::new(100.0, 60.0, 0.0));

    // Release with one more frame of motion.
    for e in translate(vec![SimInput::MouseUp(103.0, 64.0)]) {
        app.handle_event(e);
    }
    assert_eq!(app.cloth().handle_velocity(Handle::TopLeft), Vec3::new(3.0, 4.0, 0.0));

    // The released corner is now carried by the springs.
    for _ in 0..20 { app.tick(); }
    assert_ne!(app.cloth().handle_position(Handle::TopLeft), Vec3::new(100.0, 60.0, 0.0));
}

#[test]
fn keyboard_session_then_reset() {
    let mut app = AppState::new(AppConfig::default()).unwrap();
    let events = translate(vec![
        SimInput::Key(SimKey::GravityUp),
        SimInput::Key(SimKey::GravityUp),
        SimInput::Key(SimKey::Lock(3)),
        SimInput::Key(SimKey::Mesh),
    ]);
    assert_eq!(events.len(), 4);
    for e in events { app.handle_event(e); }
    for _ in 0..50 { app.tick(); }

    assert!((app.cloth().gravity() - 0.2).abs() < 1e-6);
    assert!(app.cloth().draws_mesh());
    assert_ne!(app.cloth().handle_position(Handle::BottomRight), Vec3::new(1004.0, 748.0, 0.0));

    for e in translate(vec![SimInput::Key(SimKey::Reset)]) { app.handle_event(e); }
    assert_eq!(app.cloth().gravity(), 0.0);
    assert_eq!(app.cloth().handle_position(Handle::BottomRight), Vec3::new(1004.0, 748.0, 0.0));
    assert!(Handle::ALL.iter().all(|&h| app.cloth().handle_is_fixed(h)));
}
