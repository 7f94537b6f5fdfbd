use std::fmt;

use log::warn;

use crate::config::Variant;

/* Canvas geometry, in microns. Row zero starts to the right of the SoC
 * core, which occupies the left edge of the die; wrapped rows start from
 * the die edge proper. */
pub const MAX_WIDTH: u32 = 2800;
pub const MARGIN: u32 = 20;
pub const START_X: u32 = 300;
pub const START_Y: u32 = 72;

/**
 * Macro orientation marker. Every placement is currently unrotated; the
 * type exists so a rotated row scheme stays a local change.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    North,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::North => write!(f, "N"),
        }
    }
}

/**
 * One placement: the lower-left corner of a variant's macro, in microns,
 * plus its orientation.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub x: u32,
    pub y: u32,
    pub orientation: Orientation,
}

/**
 * Packing state folded across the table. Each slot depends on the full
 * ordered prefix of placements before it, so the state is an explicit
 * accumulator threaded through 'place()' rather than loop-local variables
 * that three separate passes would have to keep in step.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: u32,
    y: u32,
    row_height: u32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            x: START_X,
            y: START_Y,
            row_height: 0,
        }
    }

    /**
     * Places one footprint and returns the slot plus the advanced cursor.
     *
     * Row-wise first-fit: a footprint that still fits the current row is
     * placed at the cursor and the cursor advances; otherwise the row
     * wraps, the cursor drops below the tallest macro of the finished row,
     * and the footprint opens the new row at the die edge.
     */
    pub fn place(self, footprint: u32) -> (Slot, Cursor) {
        if self.x + footprint + 2 * MARGIN <= MAX_WIDTH {
            let slot = Slot {
                x: self.x + MARGIN,
                y: self.y + MARGIN,
                orientation: Orientation::North,
            };
            let next = Cursor {
                x: self.x + footprint + 2 * MARGIN,
                y: self.y,
                row_height: self.row_height.max(footprint),
            };
            (slot, next)
        } else {
            let y = self.y + self.row_height + 2 * MARGIN;
            let slot = Slot {
                x: MARGIN,
                y: y + MARGIN,
                orientation: Orientation::North,
            };
            let next = Cursor {
                x: footprint + 2 * MARGIN,
                y,
                row_height: footprint,
            };
            (slot, next)
        }
    }
}

/**
 * Packs every variant in table order and returns one slot per variant.
 *
 * There is no hard width ceiling: a footprint too wide for any row is
 * still placed and overflows the canvas, which the flow catches when the
 * oversized floorplan comes up for review. The packer only warns.
 */
pub fn place_all(variants: &[Variant]) -> Vec<Slot> {
    let mut slots: Vec<Slot> = Vec::with_capacity(variants.len());
    let mut cursor = Cursor::new();

    for variant in variants {
        if variant.get_footprint() + 2 * MARGIN > MAX_WIDTH {
            warn!(
                "{}: footprint {} um cannot fit the {} um canvas",
                variant.name(),
                variant.get_footprint(),
                MAX_WIDTH
            );
        }

        let (slot, next) = cursor.place(variant.get_footprint());
        slots.push(slot);
        cursor = next;
    }

    slots
}
