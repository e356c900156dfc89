//! Property-based tests for mesh construction and handle addressing.
//!
//! - Particle and spring counts for any mesh size
//! - Spring degree of every mesh point
//! - Handle teleports are exact and offsets on fixed handles are additive

use image_cloth::{ClothConfig, Handle, ImageCloth, Vec3};
use proptest::prelude::*;

fn config(n: usize) -> ClothConfig {
    ClothConfig { mesh_size: n, ..ClothConfig::default() }
}

fn handle() -> impl Strategy<Value = Handle> {
    (0usize..4).prop_map(|i| Handle::from_index(i).unwrap())
}

/// Small offsets on a 1/4 grid, so sums are exact in f32.
fn quarter_step() -> impl Strategy<Value = f32> {
    (-400i32..400).prop_map(|q| q as f32 * 0.25)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: an N×N mesh has N² particles and 2·N·(N-1) springs
    #[test]
    fn test_counts_for_any_mesh_size(n in 2usize..=24) {
        let cloth = ImageCloth::new(config(n)).unwrap();
        let ps = cloth.particle_system();
        prop_assert_eq!(ps.number_of_particles(), n * n);
        prop_assert_eq!(ps.number_of_springs(), 2 * n * (n - 1));
    }

    /// Property: every mesh point sits on 2–4 springs, interior points on exactly 4
    #[test]
    fn test_spring_degree(n in 2usize..=12) {
        let cloth = ImageCloth::new(config(n)).unwrap();
        let mesh = cloth.mesh();
        let ps = cloth.particle_system();
        for i in 0..n {
            for j in 0..n {
                let degree = ps.spring_count_for(mesh.id(i, j));
                prop_assert!((2..=4).contains(&degree), "({}, {}) has {} springs", i, j, degree);
                if !mesh.is_edge(i, j) {
                    prop_assert_eq!(degree, 4);
                }
            }
        }
    }

    /// Property: set_handle_position then handle_position is the identity
    #[test]
    fn test_set_position_is_exact(h in handle(), x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
        let mut cloth = ImageCloth::new(config(6)).unwrap();
        cloth.set_handle_position(h, x, y, 0.0);
        prop_assert_eq!(cloth.handle_position(h), Vec3::new(x, y, 0.0));
    }

    /// Property: two offsets of a fixed handle equal one doubled offset
    #[test]
    fn test_offsets_are_additive(h in handle(), dx in quarter_step(), dy in quarter_step()) {
        let mut twice = ImageCloth::new(config(6)).unwrap();
        let mut once  = twice.clone();
        twice.offset_handle_position(h, dx, dy, 0.0);
        twice.offset_handle_position(h, dx, dy, 0.0);
        once.offset_handle_position(h, 2.0 * dx, 2.0 * dy, 0.0);
        prop_assert_eq!(twice.handle_position(h), once.handle_position(h));
    }
}
