//! Tick and grid geometry for the overlay painter
//!
//! Pure math, no drawing: the overlay asks for tick and grid positions and
//! turns them into strokes itself.

use crate::constants::ruler::{
    MAJOR_TICK_INTERVAL, MAJOR_TICK_LEN, MINOR_TICK_LEN, TICK_SPACING,
};

/// A single ruler tick: offset along the edge and how far it reaches inward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub offset: f32,
    pub length: f32,
}

/// Ticks along one edge of the given extent, minor every
/// `TICK_SPACING` pixels and major every `MAJOR_TICK_INTERVAL`
pub fn edge_ticks(extent: f32) -> Vec<Tick> {
    let mut ticks = Vec::new();
    let mut offset = 0u32;
    while (offset as f32) < extent {
        let length = if offset % MAJOR_TICK_INTERVAL == 0 {
            MAJOR_TICK_LEN
        } else {
            MINOR_TICK_LEN
        };
        ticks.push(Tick {
            offset: offset as f32,
            length,
        });
        offset += TICK_SPACING;
    }
    ticks
}

/// Grid line offsets across the given extent, every `step` pixels from zero
pub fn grid_offsets(extent: f32, step: u16) -> Vec<f32> {
    if step == 0 {
        return Vec::new();
    }
    let mut offsets = Vec::new();
    let mut offset = 0u32;
    while (offset as f32) < extent {
        offsets.push(offset as f32);
        offset += u32::from(step);
    }
    offsets
}
