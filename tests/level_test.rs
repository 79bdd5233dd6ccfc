mod common;
use common::*;
use karel::world::{level, Heading, WALL_NORTH};

const CAVE: &str = "\
# beepers hang from the ceiling of a cave
1* 1  1* 1* 1  1  1* 1  1  1*
0  0  0* 0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
4  4  4  4  4  4  4  4  4  4
robot 0 9 east
";

const DROP_TO_FLOOR: &str = "\
void main() {
  column();
  while (frontIsClear()) {
    moveForward();
    column();
  }
}

// let every beeper of this column fall to the floor
void column() {
  turnLeft();
  repeat (10) {
    climb();
    while (frontIsClear()) {
      if (onBeeper() && !beeperAhead()) {
        pickBeeper();
        moveForward();
        dropBeeper();
      } else {
        moveForward();
      }
    }
    turnAround();
  }
  turnRight();
}

void climb() {
  while (frontIsClear()) {
    moveForward();
  }
  turnAround();
}
";

#[test]
fn test_cave_level() {
    let world = level::parse(CAVE).unwrap();
    assert_eq!(world.count_beepers(), 6);
    assert_eq!(world.count_beepers_in_column(2), 2);
    assert_eq!((world.x(), world.y(), world.heading()), (0, 9, Heading::East));
    assert!(world.beepers().all(|(x, y)| y > 0 || world.floor().touches(x, y, WALL_NORTH)));
}

#[test]
fn test_secure_the_cave() {
    let start = level::parse(CAVE).unwrap();
    let mut r = runtime(DROP_TO_FLOOR, start.clone());
    exec(&mut r).unwrap();
    let end = r.world();
    assert_eq!(end.count_beepers(), start.count_beepers());
    for x in 0..10 {
        let n = start.count_beepers_in_column(x);
        assert_eq!(end.count_beepers_in(x..x + 1, 10 - n..10), n, "column {}", x);
    }
    assert_eq!((end.x(), end.y()), (9, 9));
}

#[test]
fn test_random_level_runs() {
    let world = level::random(2024, 0.5);
    let mut r = runtime(
        "void main() { while (frontIsClear()) { if (onBeeper()) { pickBeeper(); } moveForward(); } }",
        world.clone(),
    );
    exec(&mut r).unwrap();
    assert_eq!(r.world().count_beepers_in_row(0), usize::from(world.beeper_at(9, 0)));
}
