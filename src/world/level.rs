/*!
## World descriptions

Ten rows of ten cells. A cell is one hex digit of wall bits (north 1,
east 2, south 4, west 8) with an optional `*` for a beeper. An optional
`robot X Y HEADING` line places the robot; it starts in the north west
corner facing east otherwise. Lines starting with `#` are comments.

```text
# a wall east of (2, 0) and a beeper at (4, 1)
0 0 2 0 0 0 0 0 0 0
0 0 0 0 0* 0 0 0 0 0
...
robot 0 9 north
```
*/

use super::{FloorPlan, Heading, World, HEIGHT, WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    line: usize,
    message: String,
}

impl Error {
    fn new(line: usize, message: String) -> Error {
        Error { line, message }
    }

    /// 1-based line of the description; 0 for the description as a whole.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn text(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "LEVEL ERROR; {}", self.message)
        } else {
            write!(f, "LEVEL ERROR IN {}; {}", self.line, self.message)
        }
    }
}

impl std::error::Error for Error {}

pub fn parse(text: &str) -> Result<World> {
    let mut floor = FloorPlan::empty();
    let mut beepers = vec![];
    let mut robot = None;
    let mut y = 0;
    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("robot") {
            robot = Some(parse_robot(line, number)?);
            continue;
        }
        if y == HEIGHT {
            return Err(Error::new(number, format!("more than {} rows", HEIGHT)));
        }
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.len() != WIDTH {
            return Err(Error::new(number, format!("expected {} cells", WIDTH)));
        }
        for (x, cell) in cells.iter().enumerate() {
            let (walls, beeper) = match cell.strip_suffix('*') {
                Some(digit) => (digit, true),
                None => (*cell, false),
            };
            let bits = match u8::from_str_radix(walls, 16) {
                Ok(bits) if walls.len() == 1 => bits,
                _ => return Err(Error::new(number, format!("bad cell {}", cell))),
            };
            floor = floor
                .with_walls(x, y, bits)
                .map_err(|error| Error::new(number, error.to_string()))?;
            if beeper {
                beepers.push((x, y));
            }
        }
        y += 1;
    }
    if y != HEIGHT {
        return Err(Error::new(0, format!("expected {} rows", HEIGHT)));
    }
    let (x, y, heading) = robot.unwrap_or((0, 0, Heading::East));
    let mut world =
        World::new(floor, x, y, heading).map_err(|error| Error::new(0, error.to_string()))?;
    for (x, y) in beepers {
        world = world
            .drop_beeper_at(x, y)
            .map_err(|error| Error::new(0, error.to_string()))?;
    }
    Ok(world)
}

fn parse_robot(line: &str, number: usize) -> Result<(usize, usize, Heading)> {
    let bad = || Error::new(number, "expected robot X Y HEADING".to_string());
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() != 4 {
        return Err(bad());
    }
    let x: usize = words[1].parse().map_err(|_| bad())?;
    let y: usize = words[2].parse().map_err(|_| bad())?;
    let heading = Heading::from_name(words[3]).ok_or_else(bad)?;
    if x >= WIDTH || y >= HEIGHT {
        return Err(Error::new(number, format!("robot at ({}, {}) is off the floor", x, y)));
    }
    Ok((x, y, heading))
}

/// Writes a world in the form [`parse`] reads.
pub fn write(world: &World) -> String {
    let mut s = String::new();
    for y in 0..HEIGHT {
        let cells: Vec<String> = (0..WIDTH)
            .map(|x| {
                let star = if world.beeper_at(x, y) { "*" } else { "" };
                format!("{:x}{}", world.floor().walls_at(x, y), star)
            })
            .collect();
        s.push_str(&cells.join(" "));
        s.push('\n');
    }
    s.push_str(&format!(
        "robot {} {} {}\n",
        world.x(),
        world.y(),
        world.heading()
    ));
    s
}

/// An empty floor with beepers scattered over it. The same seed gives the
/// same layout.
pub fn random(seed: u64, density: f64) -> World {
    let density = density.max(0.0).min(1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::empty();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if rng.gen_bool(density) {
                if let Ok(next) = world.drop_beeper_at(x, y) {
                    world = next;
                }
            }
        }
    }
    world
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(special: &str) -> String {
        let mut s = String::from("# test level\n");
        s.push_str(special);
        for _ in 1..HEIGHT {
            s.push_str("0 0 0 0 0 0 0 0 0 0\n");
        }
        s
    }

    #[test]
    fn test_parse() {
        let world = parse(&rows("0 0 2 0 0* 0 0 0 0 0\nrobot 3 4 north\n")).unwrap();
        assert!(world.floor().wall_at(2, 0, Heading::East));
        assert!(world.floor().wall_at(3, 0, Heading::West));
        assert!(world.floor().wall_at(0, 0, Heading::North));
        assert!(world.beeper_at(4, 0));
        assert_eq!(world.count_beepers(), 1);
        assert_eq!((world.x(), world.y(), world.heading()), (3, 4, Heading::North));
    }

    #[test]
    fn test_parse_errors() {
        let e = parse(&rows("0 0 0\n")).unwrap_err();
        assert_eq!(e.text(), "expected 10 cells");
        assert_eq!(e.line(), 2);
        let e = parse(&rows("0 0 g 0 0 0 0 0 0 0\n")).unwrap_err();
        assert_eq!(e.text(), "bad cell g");
        let e = parse(&rows("0 0 0 0 0 0 0 0 0 0\nrobot 1 2 up\n")).unwrap_err();
        assert_eq!(e.text(), "expected robot X Y HEADING");
        let e = parse("0 0 0 0 0 0 0 0 0 0\n").unwrap_err();
        assert_eq!(e.text(), "expected 10 rows");
    }

    #[test]
    fn test_write_reads_back() {
        let world = parse(&rows("0 0 2 0 0* 0 0 0 0 0\nrobot 3 4 south\n")).unwrap();
        assert_eq!(parse(&write(&world)).unwrap(), world);
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = random(42, 0.3);
        let b = random(42, 0.3);
        assert_eq!(a, b);
        assert_eq!(random(7, 0.0).count_beepers(), 0);
        assert_eq!(random(7, 1.0).count_beepers(), WIDTH * HEIGHT);
    }
}
