//! Overlay settings model
//!
//! The single in-memory settings instance shared by the overlay and its
//! options dialog. All mutation goes through the clamping setters so the
//! documented domains hold at every point in the program.

use tracing::warn;

use crate::constants::{domain, opacity};

/// RGBA guide-line color with one byte per component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl LineColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_rgba_array(color: [u8; 4]) -> Self {
        Self::rgba(color[0], color[1], color[2], color[3])
    }
}

impl Default for LineColor {
    fn default() -> Self {
        Self::rgba(0, 255, 0, 255)
    }
}

/// The persisted settings plus their in-memory mutation surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySettings {
    pub opacity_percent: u8,
    pub grid_enabled: bool,
    pub grid_size: u16,
    pub line_color: LineColor,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            opacity_percent: 50,
            grid_enabled: false,
            grid_size: 40,
            line_color: LineColor::default(),
        }
    }
}

impl OverlaySettings {
    /// Set the opacity percentage, clamping to [0,100]. Returns true if the
    /// stored value changed.
    pub fn set_opacity(&mut self, percent: u8) -> bool {
        let clamped = percent.min(domain::OPACITY_MAX);
        let changed = self.opacity_percent != clamped;
        self.opacity_percent = clamped;
        changed
    }

    /// Toggle the grid. Returns true if the stored value changed.
    pub fn set_grid_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.grid_enabled != enabled;
        self.grid_enabled = enabled;
        changed
    }

    /// Set the grid cell size, clamping to [10,200]. Returns true if the
    /// stored value changed.
    pub fn set_grid_size(&mut self, px: u16) -> bool {
        let clamped = px.clamp(domain::GRID_SIZE_MIN, domain::GRID_SIZE_MAX);
        let changed = self.grid_size != clamped;
        self.grid_size = clamped;
        changed
    }

    /// Set the guide-line color. Returns true if the stored value changed.
    pub fn set_line_color(&mut self, color: LineColor) -> bool {
        let changed = self.line_color != color;
        self.line_color = color;
        changed
    }

    /// Replace every field at once (load/reset results). Returns true if
    /// anything changed.
    pub fn replace(&mut self, other: OverlaySettings) -> bool {
        let changed = *self != other;
        *self = other;
        changed
    }

    /// Window opacity the overlay actually renders with. 0% maps to a faint
    /// floor rather than full invisibility.
    pub fn effective_opacity(&self) -> f32 {
        opacity::FLOOR + f32::from(self.opacity_percent) / 100.0 * opacity::SPAN
    }

    /// Clamp loaded values into their documented domains, warning once per
    /// adjusted field. Color components are bounded by their type already.
    pub fn validate_and_clamp(&mut self) {
        if self.opacity_percent > domain::OPACITY_MAX {
            warn!(
                opacity = self.opacity_percent,
                max = domain::OPACITY_MAX,
                "opacity exceeds maximum, clamping"
            );
            self.opacity_percent = domain::OPACITY_MAX;
        }

        if self.grid_size < domain::GRID_SIZE_MIN {
            warn!(
                grid_size = self.grid_size,
                min = domain::GRID_SIZE_MIN,
                "grid_size below minimum, clamping"
            );
            self.grid_size = domain::GRID_SIZE_MIN;
        } else if self.grid_size > domain::GRID_SIZE_MAX {
            warn!(
                grid_size = self.grid_size,
                max = domain::GRID_SIZE_MAX,
                "grid_size exceeds maximum, clamping"
            );
            self.grid_size = domain::GRID_SIZE_MAX;
        }
    }
}
