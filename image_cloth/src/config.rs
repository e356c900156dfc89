//! Cloth configuration.
//!
//! Every field has a default, so a config file only needs the values
//! it wants to change.

use serde::{Deserialize, Serialize};

use cloth_physics::Integrator;

use crate::error::ClothError;
use crate::render::Colour;

/// Everything needed to build an [`ImageCloth`](crate::ImageCloth).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Rows and columns of mass points.  Should evenly divide both cloth
    /// dimensions, otherwise the texture sampling is distorted.
    pub mesh_size:       usize,
    /// Size of the mapped image, in pixels.
    pub cloth_width:     u32,
    pub cloth_height:    u32,
    /// Size of the surface the cloth lives on; handles reset relative to it.
    pub canvas_width:    u32,
    pub canvas_height:   u32,

    pub gravity:         f32,
    pub drag:            f32,
    /// Simulation time advanced per `step()`.
    pub time_step:       f32,
    pub integrator:      Integrator,

    pub particle_mass:   f32,
    pub spring_strength: f32,
    pub spring_damping:  f32,

    /// Distance of the reset handle positions from the canvas edges.
    pub margin:          f32,

    /// Line colour for outlines, wireframe and default handle markers (ARGB).
    pub foreground_colour: Colour,
    /// Per-handle marker colours in `Handle::ALL` order.  Defaults to the
    /// foreground colour for all four.
    pub handle_colours:  Option<[Colour; 4]>,
}

impl Default for ClothConfig {
    fn default() -> Self {
        ClothConfig {
            mesh_size:         20,
            cloth_width:       320,
            cloth_height:      240,
            canvas_width:      1024,
            canvas_height:     768,
            gravity:           0.0,
            drag:              0.05,
            time_step:         0.1,
            integrator:        Integrator::RungeKutta,
            particle_mass:     0.2,
            spring_strength:   8.0,
            spring_damping:    0.5,
            margin:            20.0,
            foreground_colour: 0xFFFFFF00,
            handle_colours:    None,
        }
    }
}

impl ClothConfig {
    /// Check the hard preconditions.  Divisibility of the cloth size by the
    /// mesh size is only a soft one; see [`ClothConfig::divides_evenly`].
    pub fn validate(&self) -> Result<(), ClothError> {
        if self.mesh_size < 2 {
            return Err(ClothError::MeshTooSmall(self.mesh_size));
        }
        if self.cloth_width == 0 || self.cloth_height == 0 {
            return Err(ClothError::EmptyCloth {
                width:  self.cloth_width,
                height: self.cloth_height,
            });
        }
        let max = self.cloth_width.min(self.cloth_height) as usize;
        if self.mesh_size > max {
            return Err(ClothError::MeshTooLarge { size: self.mesh_size, max });
        }
        for (name, value) in [
            ("time_step",     self.time_step),
            ("particle_mass", self.particle_mass),
        ] {
            if !(value > 0.0) {
                return Err(ClothError::NonPositive { name, value });
            }
        }
        Ok(())
    }

    /// True if `mesh_size` divides both cloth dimensions.
    pub fn divides_evenly(&self) -> bool {
        let (w, h) = self.cloth_dims();
        self.mesh_size > 0 && w % self.mesh_size == 0 && h % self.mesh_size == 0
    }

    fn cloth_dims(&self) -> (usize, usize) {
        (self.cloth_width as usize, self.cloth_height as usize)
    }

    fn cells(&self) -> usize { self.mesh_size.max(1) }

    // ── derived geometry ──────────────────────────────────────────────────
    //
    // Integer arithmetic, matching the installation's rest layout.

    /// Horizontal extent of the mesh at rest.
    pub fn mesh_width(&self) -> f32 {
        let (w, _) = self.cloth_dims();
        (w + w / self.cells()) as f32
    }

    /// Vertical extent of the mesh at rest.
    pub fn mesh_height(&self) -> f32 {
        let (_, h) = self.cloth_dims();
        (h / 2).saturating_sub(h / self.cells()) as f32
    }

    /// Texture pixels covered by one mesh column.
    pub fn sample_width(&self) -> f32 {
        (self.cloth_dims().0 / self.cells()) as f32
    }

    /// Texture pixels covered by one mesh row.
    pub fn sample_height(&self) -> f32 {
        (self.cloth_dims().1 / self.cells()) as f32
    }

    pub fn resolved_handle_colours(&self) -> [Colour; 4] {
        self.handle_colours.unwrap_or([self.foreground_colour; 4])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(ClothConfig::default().validate(), Ok(()));
        assert!(ClothConfig::default().divides_evenly());
    }

    #[test]
    fn rejects_single_row_mesh() {
        let cfg = ClothConfig { mesh_size: 1, ..ClothConfig::default() };
        assert_eq!(cfg.validate(), Err(ClothError::MeshTooSmall(1)));
    }

    #[test]
    fn rejects_empty_cloth() {
        let cfg = ClothConfig { cloth_height: 0, ..ClothConfig::default() };
        assert!(matches!(cfg.validate(), Err(ClothError::EmptyCloth { .. })));
    }

    #[test]
    fn rejects_more_cells_than_pixels() {
        let cfg = ClothConfig { mesh_size: 1usize << 32, ..ClothConfig::default() };
        assert_eq!(cfg.validate(), Err(ClothError::MeshTooLarge { size: 1usize << 32, max: 240 }));
        assert!(!cfg.divides_evenly());
        assert_eq!(cfg.sample_width(), 0.0);
        assert_eq!(cfg.mesh_height(), 120.0);

        let cfg = ClothConfig { mesh_size: 240, ..ClothConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_time_step() {
        let cfg = ClothConfig { time_step: 0.0, ..ClothConfig::default() };
        assert!(matches!(cfg.validate(),
            Err(ClothError::NonPositive { name: "time_step", .. })));
    }

    #[test]
    fn rejects_nan_mass() {
        let cfg = ClothConfig { particle_mass: f32::NAN, ..ClothConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn derived_geometry_for_default_layout() {
        let cfg = ClothConfig::default();
        // 320 + 320/20 and 240/2 - 240/20
        assert_eq!(cfg.mesh_width(),  336.0);
        assert_eq!(cfg.mesh_height(), 108.0);
        assert_eq!(cfg.sample_width(),  16.0);
        assert_eq!(cfg.sample_height(), 12.0);
    }

    #[test]
    fn uneven_mesh_is_flagged_but_valid() {
        let cfg = ClothConfig { mesh_size: 7, ..ClothConfig::default() };
        assert!(!cfg.divides_evenly());
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: ClothConfig = toml::from_str(r#"
            mesh_size  = 10
            gravity    = 0.5
            integrator = "euler"
        "#).unwrap();
        assert_eq!(cfg.mesh_size, 10);
        assert_eq!(cfg.gravity, 0.5);
        assert_eq!(cfg.integrator, Integrator::Euler);
        assert_eq!(cfg.cloth_width, 320);
        assert_eq!(cfg.drag, 0.05);
    }

    #[test]
    fn handle_colours_default_to_foreground() {
        let cfg = ClothConfig::default();
        assert_eq!(cfg.resolved_handle_colours(), [0xFFFFFF00; 4]);
    }
}
