//! End-to-end scenario: a 20×20 cloth pinned by its four handles settles,
//! then sags and settles again once gravity is switched on.

use image_cloth::{ClothConfig, Handle, ImageCloth, Vec3};

const SETTLE_STEPS: usize = 2000;
const WINDOW: usize = 250;

fn positions(cloth: &ImageCloth) -> Vec<Vec3> {
    cloth.particle_system().particles().iter().map(|p| p.position()).collect()
}

/// Largest per-step displacement of any particle in each window of steps.
fn settle(cloth: &mut ImageCloth, steps: usize) -> Vec<f32> {
    let mut windows = Vec::new();
    let mut worst = 0.0f32;
    let mut prev = positions(cloth);
    for step in 1..=steps {
        cloth.step();
        let now = positions(cloth);
        let moved = prev.iter().zip(&now).map(|(a, b)| (*a - *b).length()).fold(0.0, f32::max);
        worst = worst.max(moved);
        prev = now;
        if step % WINDOW == 0 {
            windows.push(worst);
            worst = 0.0;
        }
    }
    windows
}

fn centre_y(cloth: &ImageCloth) -> f32 {
    let pts = [(9, 9), (9, 10), (10, 9), (10, 10)];
    let sum: f32 = pts.iter()
        .map(|&(i, j)| cloth.mesh_point_position(i, j).unwrap().y)
        .sum();
    sum / pts.len() as f32
}

#[test]
fn pinned_cloth_sags_under_gravity_and_converges() {
    let cfg = ClothConfig { mesh_size: 20, gravity: 0.0, drag: 0.05, ..ClothConfig::default() };
    let mut cloth = ImageCloth::new(cfg).unwrap();
    let corners: Vec<Vec3> = Handle::ALL.iter().map(|&h| cloth.handle_position(h)).collect();
    let midline = (corners[0].y + corners[2].y) / 2.0;

    // Weightless: stretches out to fill the pinned rectangle.
    settle(&mut cloth, SETTLE_STEPS);
    let flat = centre_y(&cloth);
    assert!((flat - midline).abs() < 0.5, "flat centre {} vs midline {}", flat, midline);

    // Weighted: centre drops below the corner midline.
    cloth.set_gravity(5.0);
    let windows = settle(&mut cloth, SETTLE_STEPS);
    let sagged = centre_y(&cloth);
    assert!(sagged > midline + 1.0, "sagged centre {} vs midline {}", sagged, midline);

    // Motion dies out.
    let first = windows[0];
    let last  = windows[windows.len() - 1];
    assert!(last < first * 0.1, "late motion {} not much smaller than early {}", last, first);
    assert!(last < 1e-2);

    // Corners never moved and nothing blew up.
    let after: Vec<Vec3> = Handle::ALL.iter().map(|&h| cloth.handle_position(h)).collect();
    assert_eq!(corners, after);
    assert!(positions(&cloth).iter().all(|p| p.is_finite()));
}

#[test]
fn released_corner_swings_free() {
    let mut cloth = ImageCloth::new(ClothConfig { gravity: 1.0, ..ClothConfig::default() }).unwrap();
    for _ in 0..200 { cloth.step(); }
    let pinned = cloth.handle_position(Handle::BottomRight);

    cloth.free_handle(Handle::BottomRight);
    for _ in 0..200 { cloth.step(); }

    let moved = cloth.handle_position(Handle::BottomRight) - pinned;
    assert!(moved.length() > 5.0, "free corner only moved {:?}", moved);
    assert!(cloth.handle_is_fixed(Handle::TopLeft));
}
