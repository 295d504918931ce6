// Grid domain model - 8x8 cell addressing and hardware button events

pub const GRID_WIDTH: usize = 8;
pub const GRID_HEIGHT: usize = 8;
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub x: u8,
    pub y: u8,
}

impl GridPosition {
    /// Returns `None` when either coordinate is outside the grid.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < GRID_WIDTH && (y as usize) < GRID_HEIGHT {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Cell for the record at sequence position `index`, row-major.
    /// Positions past the last cell have nowhere to go and yield `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_CELLS {
            return None;
        }

        Some(Self {
            x: (index % GRID_WIDTH) as u8,
            y: ((index / GRID_WIDTH) % GRID_HEIGHT) as u8,
        })
    }

    pub fn index(self) -> usize {
        self.y as usize * GRID_WIDTH + self.x as usize
    }
}

/// A button press reported by the device. Releases are not events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    GridPress(GridPosition),
    /// Scene buttons are numbered from 1, top to bottom.
    SceneSelect(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_index_mapping_is_bijection() {
        let mut seen = HashSet::new();

        for index in 0..GRID_CELLS {
            let pos = GridPosition::from_index(index).unwrap();
            assert_eq!(pos.x as usize, index % 8);
            assert_eq!(pos.y as usize, (index / 8) % 8);
            assert_eq!(pos.index(), index);
            assert!(seen.insert(pos));
        }

        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn test_index_past_grid_has_no_cell() {
        assert_eq!(GridPosition::from_index(64), None);
        assert_eq!(GridPosition::from_index(100), None);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(GridPosition::new(7, 7).is_some());
        assert!(GridPosition::new(8, 0).is_none());
        assert!(GridPosition::new(0, 8).is_none());
    }
}
