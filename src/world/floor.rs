use super::{Error, Result, HEIGHT, WIDTH};
use std::sync::Arc;

pub const WALL_NORTH: u8 = 1;
pub const WALL_EAST: u8 = 2;
pub const WALL_SOUTH: u8 = 4;
pub const WALL_WEST: u8 = 8;
pub const WALL_ALL: u8 = WALL_NORTH | WALL_EAST | WALL_SOUTH | WALL_WEST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    East,
    North,
    West,
    South,
}

impl Heading {
    pub fn turn_left(self) -> Heading {
        use Heading::*;
        match self {
            East => North,
            North => West,
            West => South,
            South => East,
        }
    }

    pub fn turn_around(self) -> Heading {
        self.turn_left().turn_left()
    }

    pub fn turn_right(self) -> Heading {
        self.turn_left().turn_left().turn_left()
    }

    /// Wall bit on the side of a cell this heading faces.
    pub fn wall(self) -> u8 {
        use Heading::*;
        match self {
            East => WALL_EAST,
            North => WALL_NORTH,
            West => WALL_WEST,
            South => WALL_SOUTH,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        use Heading::*;
        match self {
            East => (1, 0),
            North => (0, -1),
            West => (-1, 0),
            South => (0, 1),
        }
    }

    pub fn from_name(name: &str) -> Option<Heading> {
        use Heading::*;
        match name.to_ascii_lowercase().as_str() {
            "east" => Some(East),
            "north" => Some(North),
            "west" => Some(West),
            "south" => Some(South),
            _ => None,
        }
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Heading::*;
        match self {
            East => write!(f, "east"),
            North => write!(f, "north"),
            West => write!(f, "west"),
            South => write!(f, "south"),
        }
    }
}

/// ## Wall topology
///
/// Four wall bits per cell. The outer border is always walled and every
/// interior wall is stored on both of the cells it separates. Walls sit
/// behind an `Arc`, so copies of a floor plan share them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorPlan {
    walls: Arc<[u8; WIDTH * HEIGHT]>,
}

impl Default for FloorPlan {
    fn default() -> FloorPlan {
        let mut walls = [0u8; WIDTH * HEIGHT];
        for x in 0..WIDTH {
            walls[x] |= WALL_NORTH;
            walls[(HEIGHT - 1) * WIDTH + x] |= WALL_SOUTH;
        }
        for y in 0..HEIGHT {
            walls[y * WIDTH] |= WALL_WEST;
            walls[y * WIDTH + WIDTH - 1] |= WALL_EAST;
        }
        FloorPlan {
            walls: Arc::new(walls),
        }
    }
}

impl FloorPlan {
    pub fn empty() -> FloorPlan {
        FloorPlan::default()
    }

    /// Off the floor every side is a wall.
    pub fn walls_at(&self, x: usize, y: usize) -> u8 {
        if x < WIDTH && y < HEIGHT {
            self.walls[y * WIDTH + x]
        } else {
            WALL_ALL
        }
    }

    pub fn wall_at(&self, x: usize, y: usize, heading: Heading) -> bool {
        self.walls_at(x, y) & heading.wall() != 0
    }

    /// Adds the wall on `heading` side of the cell and the matching wall
    /// of the neighbour behind it.
    pub fn with_wall(&self, x: usize, y: usize, heading: Heading) -> Result<FloorPlan> {
        if x >= WIDTH || y >= HEIGHT {
            return Err(Error::OffTheFloor { x, y });
        }
        let mut walls = *self.walls;
        walls[y * WIDTH + x] |= heading.wall();
        if let Some((nx, ny)) = neighbour(x, y, heading) {
            walls[ny * WIDTH + nx] |= heading.turn_around().wall();
        }
        Ok(FloorPlan {
            walls: Arc::new(walls),
        })
    }

    /// Adds every wall bit in `bits` to the cell, symmetrically.
    pub fn with_walls(&self, x: usize, y: usize, bits: u8) -> Result<FloorPlan> {
        let mut plan = self.clone();
        for heading in [Heading::East, Heading::North, Heading::West, Heading::South].iter() {
            if bits & heading.wall() != 0 {
                plan = plan.with_wall(x, y, *heading)?;
            }
        }
        Ok(plan)
    }

    /// Cells whose walls include any bit of `bits`.
    pub fn touches(&self, x: usize, y: usize, bits: u8) -> bool {
        self.walls_at(x, y) & bits != 0
    }
}

pub(crate) fn neighbour(x: usize, y: usize, heading: Heading) -> Option<(usize, usize)> {
    let (dx, dy) = heading.delta();
    let nx = x as i32 + dx;
    let ny = y as i32 + dy;
    if nx < 0 || ny < 0 || nx >= WIDTH as i32 || ny >= HEIGHT as i32 {
        None
    } else {
        Some((nx as usize, ny as usize))
    }
}
