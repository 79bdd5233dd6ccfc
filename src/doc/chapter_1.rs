/*!
# The Karel Language

A program is a list of command declarations. Nothing else may appear at
the top level and commands do not nest.

```text
void name() {
    statements
}
```

Execution enters `main`. Without a `main` it enters the first command
declared. Commands may be called before they are declared and may call
themselves.

## Statements

```text
name();                         call a command
if (condition) { ... }
if (condition) { ... } else { ... }
if (condition) { ... } else if (condition) { ... }
while (condition) { ... }
repeat (n) { ... }
```

The count of a `repeat` is a literal from 2 to 4095. Zero and one are
rejected; leave the loop out or write the body once.

## Conditions

| Sensor | True when |
|--------|-----------|
| `onBeeper()` | Karel stands on a beeper |
| `beeperAhead()` | the next cell has a beeper and no wall is in between |
| `leftIsClear()` | no wall on Karel's left |
| `frontIsClear()` | no wall in front |
| `rightIsClear()` | no wall on Karel's right |

Combine them with `!`, `&&` and `||`. `!` binds tightest and `||` loosest,
so `a() || b() && !c()` means `a() || (b() && (!c()))`. Parentheses
group. Both sides of `&&` and `||` are always evaluated; sensing never
changes the world, so this is only visible in the step count.

## Comments

`//` runs to the end of the line, `/* ... */` may span lines but may not
nest.

## Errors

Compilation stops at the first error and reports its position.

| Message | Cause |
|---------|-------|
| `Too many closing braces` | a `}` outside any command |
| `illegal start of command` | something other than `void` at the top level |
| `nested commands are not allowed` | `void` inside a command |
| `unclosed block` | the file ends inside braces |
| `illegal start of statement` | a token that can't begin a statement, such as a sensor |
| `illegal start of condition` | a command used as a condition |
| `expected { or if` | `else` followed by anything else |
| `N out of range` | a `repeat` count outside 2..4095 |
| `undefined command X` | a call to a command never declared |
| `duplicate command X` | a second declaration with the same name |
| `X is a builtin command` | a declaration reusing a built-in name |
| `nesting too deep` | blocks, `!` or parentheses nested more than 256 deep |
| `condition too complex` | a condition needing more than 64 pending results |
| `program too long` | more than 4096 instructions |

*/
