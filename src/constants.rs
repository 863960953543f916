//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Settings value domains
pub mod domain {
    /// Maximum opacity percentage
    pub const OPACITY_MAX: u8 = 100;

    /// Minimum grid cell size in pixels
    pub const GRID_SIZE_MIN: u16 = 10;

    /// Maximum grid cell size in pixels
    pub const GRID_SIZE_MAX: u16 = 200;
}

/// Window opacity mapping
pub mod opacity {
    /// Effective opacity at 0% (the overlay never becomes fully invisible)
    pub const FLOOR: f32 = 0.10;

    /// Effective opacity range above the floor
    pub const SPAN: f32 = 0.90;
}

/// Ruler and guide rendering metrics
pub mod ruler {
    /// Distance between adjacent tick marks in pixels
    pub const TICK_SPACING: u32 = 10;

    /// Every tick at a multiple of this offset is drawn long
    pub const MAJOR_TICK_INTERVAL: u32 = 50;

    /// Length of a minor tick mark in pixels
    pub const MINOR_TICK_LEN: f32 = 10.0;

    /// Length of a major tick mark in pixels
    pub const MAJOR_TICK_LEN: f32 = 20.0;

    /// Stroke width for tick marks
    pub const TICK_STROKE_WIDTH: f32 = 2.0;

    /// Stroke width for the crosshair guide lines
    pub const GUIDE_STROKE_WIDTH: f32 = 2.0;

    /// Stroke width for grid lines
    pub const GRID_STROKE_WIDTH: f32 = 1.0;

    /// Pointer distance within which a guide line can be grabbed
    pub const GUIDE_GRAB_DISTANCE: f32 = 6.0;
}

/// Filesystem layout relative to the executable
pub mod paths {
    /// Directory holding the config file
    pub const CONFIG_DIR: &str = "config";

    /// Config file name
    pub const CONFIG_FILE: &str = "config.ini";

    /// Directory holding bundled assets
    pub const ASSETS_DIR: &str = "assets";

    /// Splash animation file name
    pub const SPLASH_GIF: &str = "griddy.gif";
}

/// Window titles and sizes
pub mod window {
    /// Overlay window title
    pub const OVERLAY_TITLE: &str = "Griddy";

    /// Splash window title
    pub const SPLASH_TITLE: &str = "Griddy Splash";

    /// Overlay size used until the monitor size is known
    pub const OVERLAY_FALLBACK_SIZE: [f32; 2] = [1280.0, 800.0];

    /// Splash window size
    pub const SPLASH_SIZE: [f32; 2] = [320.0, 240.0];
}

/// Shared UI styling constants
pub mod ui {
    use egui::Color32;

    /// Vertical spacing between dialog sections
    pub const SECTION_SPACING: f32 = 15.0;

    /// Vertical spacing between items within a section
    pub const ITEM_SPACING: f32 = 8.0;

    /// Margin between the control strip and the screen corner
    pub const STRIP_MARGIN: f32 = 16.0;

    /// Ruler tick color
    pub const TICK_COLOR: Color32 = Color32::BLACK;

    /// Status message color for successful store operations
    pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(100, 255, 100);

    /// Status message color for failed store operations
    pub const STATUS_ERROR: Color32 = Color32::from_rgb(255, 100, 100);
}
