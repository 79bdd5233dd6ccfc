/*!
# Introductory Tutorial for Karel

Karel is a robot on a 10 by 10 floor. The north west corner is x 0, y 0;
x grows to the east and y grows to the south. Walls surround the floor
and may stand between any two cells. A cell holds at most one beeper.

Write your first program into a file called `first.karel`.

```text
void main() {
    moveForward();
    dropBeeper();
}
```

Then start the stepper with it.

<pre><code>&nbsp;  $ karel first.karel
</code></pre>

The floor is drawn with Karel as an arrow pointing the way it faces.
Under the floor is the instruction about to run and the source line it
came from. Press ENTER to step to the next pause. A pause happens after
every robot command and after every statement you wrote yourself, never in
the middle of evaluating a condition.

| Command | Meaning |
|---------|---------|
| `s`, `step`, ENTER | run to the next pause |
| `i` | run exactly one instruction |
| `r`, `run` | run to the end; CTRL-C stops a runaway program |
| `reset` | put Karel and the beepers back where they started |
| `reload` | read the program and world files again after editing them |
| `list` | show the instructions around the program counter |
| `q`, `quit` | leave |

## Commands

Karel knows six commands: `moveForward`, `turnLeft`, `turnAround`,
`turnRight`, `pickBeeper` and `dropBeeper`. Moving into a wall, picking
from an empty cell or dropping onto a full one stops the program with an
error.

You can teach Karel new commands. The program starts in `main`.

```text
void main() {
    turnRight();
    moveForward();
}

void turnRight() {
    turnLeft();
    turnLeft();
    turnLeft();
}
```

This one doesn't compile: `turnRight` is already built in. Rename it
`rightTurn` and it does.

## Loops and decisions

```text
void main() {
    while (frontIsClear()) {
        if (onBeeper()) {
            pickBeeper();
        }
        moveForward();
    }
    repeat (4) {
        turnLeft();
    }
}
```

See [Chapter 1](../__Chapter_1/index.html) for the whole language and
[Chapter 2](../__Chapter_2/index.html) for the bytecode underneath it.

## Logging

The stepper logs through `RUST_LOG`. `RUST_LOG=karel=debug` shows command
addresses as they compile; `RUST_LOG=karel=trace` shows every instruction
as it runs.

*/
