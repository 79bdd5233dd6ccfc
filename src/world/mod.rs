/*!
## Rust World Module

The grid Karel lives in: walls, beepers and the robot's pose.
Every operation returns a new [`World`]; a world value never changes once
made, so a stepping front end can keep snapshots around for free.

*/

mod floor;
pub mod level;

pub use floor::{
    FloorPlan, Heading, WALL_ALL, WALL_EAST, WALL_NORTH, WALL_SOUTH, WALL_WEST,
};

use floor::neighbour;
use std::ops::Range;

pub const WIDTH: usize = 10;
pub const HEIGHT: usize = 10;

type Result<T> = std::result::Result<T, Error>;

/// Why a world operation was refused. The world it was applied to is
/// left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    CellIsEmpty { x: usize, y: usize },
    CellIsFull { x: usize, y: usize },
    BlockedByWall { x: usize, y: usize, heading: Heading },
    OffTheFloor { x: usize, y: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Error::*;
        match self {
            CellIsEmpty { x, y } => write!(f, "cell is empty ({}, {})", x, y),
            CellIsFull { x, y } => write!(f, "cell is full ({}, {})", x, y),
            BlockedByWall { x, y, heading } => {
                write!(f, "blocked by wall ({}, {}) facing {}", x, y, heading)
            }
            OffTheFloor { x, y } => write!(f, "off the floor ({}, {})", x, y),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    floor: FloorPlan,
    beepers: u128,
    x: usize,
    y: usize,
    heading: Heading,
}

impl Default for World {
    fn default() -> World {
        World {
            floor: FloorPlan::empty(),
            beepers: 0,
            x: 0,
            y: 0,
            heading: Heading::East,
        }
    }
}

fn on_floor(x: usize, y: usize) -> Result<()> {
    if x < WIDTH && y < HEIGHT {
        Ok(())
    } else {
        Err(Error::OffTheFloor { x, y })
    }
}

fn bit(x: usize, y: usize) -> u128 {
    1u128 << (y * WIDTH + x)
}

impl World {
    /// A world without beepers. Fails when the robot is off the floor.
    pub fn new(floor: FloorPlan, x: usize, y: usize, heading: Heading) -> Result<World> {
        on_floor(x, y)?;
        Ok(World {
            floor,
            x,
            y,
            heading,
            ..World::default()
        })
    }

    /// Empty floor, no beepers, robot in the north west corner facing east.
    pub fn empty() -> World {
        World::default()
    }

    pub fn floor(&self) -> &FloorPlan {
        &self.floor
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn with_robot(&self, x: usize, y: usize, heading: Heading) -> Result<World> {
        on_floor(x, y)?;
        Ok(World {
            x,
            y,
            heading,
            ..self.clone()
        })
    }

    pub fn with_floor(&self, floor: FloorPlan) -> World {
        World {
            floor,
            ..self.clone()
        }
    }

    // *** Robot commands

    pub fn move_forward(&self) -> Result<World> {
        if self.floor.wall_at(self.x, self.y, self.heading) {
            return Err(Error::BlockedByWall {
                x: self.x,
                y: self.y,
                heading: self.heading,
            });
        }
        match neighbour(self.x, self.y, self.heading) {
            Some((x, y)) => Ok(World {
                x,
                y,
                ..self.clone()
            }),
            None => Err(Error::BlockedByWall {
                x: self.x,
                y: self.y,
                heading: self.heading,
            }),
        }
    }

    pub fn turn_left(&self) -> World {
        World {
            heading: self.heading.turn_left(),
            ..self.clone()
        }
    }

    pub fn turn_around(&self) -> World {
        World {
            heading: self.heading.turn_around(),
            ..self.clone()
        }
    }

    pub fn turn_right(&self) -> World {
        World {
            heading: self.heading.turn_right(),
            ..self.clone()
        }
    }

    pub fn pick_beeper(&self) -> Result<World> {
        self.pick_beeper_at(self.x, self.y)
    }

    pub fn drop_beeper(&self) -> Result<World> {
        self.drop_beeper_at(self.x, self.y)
    }

    pub fn pick_beeper_at(&self, x: usize, y: usize) -> Result<World> {
        on_floor(x, y)?;
        if !self.beeper_at(x, y) {
            return Err(Error::CellIsEmpty { x, y });
        }
        Ok(World {
            beepers: self.beepers & !bit(x, y),
            ..self.clone()
        })
    }

    pub fn drop_beeper_at(&self, x: usize, y: usize) -> Result<World> {
        on_floor(x, y)?;
        if self.beeper_at(x, y) {
            return Err(Error::CellIsFull { x, y });
        }
        Ok(World {
            beepers: self.beepers | bit(x, y),
            ..self.clone()
        })
    }

    // *** Sensing

    pub fn beeper_at(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.beepers & bit(x, y) != 0
    }

    pub fn on_beeper(&self) -> bool {
        self.beeper_at(self.x, self.y)
    }

    /// Beeper in the next cell ahead; a wall hides it.
    pub fn beeper_ahead(&self) -> bool {
        if self.floor.wall_at(self.x, self.y, self.heading) {
            return false;
        }
        match neighbour(self.x, self.y, self.heading) {
            Some((x, y)) => self.beeper_at(x, y),
            None => false,
        }
    }

    pub fn left_is_clear(&self) -> bool {
        !self.floor.wall_at(self.x, self.y, self.heading.turn_left())
    }

    pub fn front_is_clear(&self) -> bool {
        !self.floor.wall_at(self.x, self.y, self.heading)
    }

    pub fn right_is_clear(&self) -> bool {
        !self.floor.wall_at(self.x, self.y, self.heading.turn_right())
    }

    // *** Aggregates

    pub fn count_beepers(&self) -> usize {
        self.beepers.count_ones() as usize
    }

    pub fn count_beepers_in_column(&self, x: usize) -> usize {
        self.count_beepers_in(x..x + 1, 0..HEIGHT)
    }

    pub fn count_beepers_in_row(&self, y: usize) -> usize {
        self.count_beepers_in(0..WIDTH, y..y + 1)
    }

    pub fn count_beepers_in(&self, xs: Range<usize>, ys: Range<usize>) -> usize {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| self.beeper_at(x, y))
            .count()
    }

    /// Beeper cells in row-major order.
    pub fn beepers(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.beeper_at(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_until_wall() {
        let mut world = World::empty();
        for _ in 0..WIDTH - 1 {
            world = world.move_forward().unwrap();
        }
        assert_eq!((world.x(), world.y()), (WIDTH - 1, 0));
        assert!(!world.front_is_clear());
        let error = world.move_forward().unwrap_err();
        assert_eq!(
            error,
            Error::BlockedByWall {
                x: WIDTH - 1,
                y: 0,
                heading: Heading::East
            }
        );
    }

    #[test]
    fn test_interior_wall_blocks_both_ways() {
        let floor = FloorPlan::empty().with_wall(0, 0, Heading::East).unwrap();
        let world = World::new(floor, 0, 0, Heading::East).unwrap();
        assert!(world.move_forward().is_err());
        let world = world.with_robot(1, 0, Heading::West).unwrap();
        assert!(!world.front_is_clear());
        assert!(world.move_forward().is_err());
    }

    #[test]
    fn test_sensing_relative_to_heading() {
        let world = World::empty().with_robot(0, 0, Heading::South).unwrap();
        assert!(world.front_is_clear());
        assert!(world.left_is_clear());
        assert!(!world.right_is_clear());
    }

    #[test]
    fn test_beeper_ahead() {
        let world = World::empty().drop_beeper_at(1, 0).unwrap();
        assert!(world.beeper_ahead());
        assert!(!world.turn_right().beeper_ahead());
        let walled = world.with_floor(FloorPlan::empty().with_wall(0, 0, Heading::East).unwrap());
        assert!(!walled.beeper_ahead());
    }

    #[test]
    fn test_failed_operation_leaves_world() {
        let world = World::empty();
        assert!(world.pick_beeper().is_err());
        assert_eq!(world, World::empty());
    }

    #[test]
    fn test_off_the_floor() {
        let world = World::empty();
        assert_eq!(
            world.drop_beeper_at(WIDTH, 0),
            Err(Error::OffTheFloor { x: WIDTH, y: 0 })
        );
        assert_eq!(
            world.pick_beeper_at(0, HEIGHT),
            Err(Error::OffTheFloor { x: 0, y: HEIGHT })
        );
        assert_eq!(world.count_beepers(), 0);
        assert!(!world.beeper_at(0, 1));
        assert_eq!(
            world.with_robot(50, 50, Heading::North),
            Err(Error::OffTheFloor { x: 50, y: 50 })
        );
        assert!(World::new(FloorPlan::empty(), WIDTH, 0, Heading::East).is_err());
        assert_eq!(
            Error::OffTheFloor { x: 10, y: 0 }.to_string(),
            "off the floor (10, 0)"
        );
    }

    #[test]
    fn test_counts() {
        let world = World::empty()
            .drop_beeper_at(2, 0)
            .and_then(|w| w.drop_beeper_at(2, 5))
            .and_then(|w| w.drop_beeper_at(3, 5))
            .unwrap();
        assert_eq!(world.count_beepers(), 3);
        assert_eq!(world.count_beepers_in_column(2), 2);
        assert_eq!(world.count_beepers_in_row(5), 2);
        assert_eq!(world.count_beepers_in(2..4, 4..6), 2);
        assert_eq!(world.beepers().collect::<Vec<_>>(), vec![(2, 0), (2, 5), (3, 5)]);
    }
}
