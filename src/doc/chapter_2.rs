/*!
# Bytecode and Assembly

Programs compile into 16-bit words. The top four bits are the category,
the low twelve the target.

| Word | Mnemonic | Effect |
|------|----------|--------|
| `0000` | `RET` | return; halt when no call is active |
| `0001` | `MOVE` | move forward |
| `0002` | `TRNL` | turn left |
| `0003` | `TRNA` | turn around |
| `0004` | `TRNR` | turn right |
| `0005` | `PICK` | pick a beeper |
| `0006` | `DROP` | drop a beeper |
| `0007` | `BEEP` | push onBeeper |
| `0008` | `HEAD` | push beeperAhead |
| `0009` | `LCLR` | push leftIsClear |
| `000a` | `FCLR` | push frontIsClear |
| `000b` | `RCLR` | push rightIsClear |
| `000c` | `NOT` | negate the top condition |
| `000d` | `AND` | combine the top two conditions |
| `000e` | `OR` | |
| `000f` | `XOR` | |
| `8nnn` | `PUSH nnn` | push a repeat count |
| `9nnn` | `LOOP nnn` | count down; while nonzero continue at nnn + 1 |
| `annn` | `CALL nnn` | call the command at nnn |
| `bnnn` | `JUMP nnn` | continue at nnn |
| `cnnn` | `J0MP nnn` | pop a condition, continue at nnn when false |
| `dnnn` | `J1MP nnn` | pop a condition, continue at nnn when true |

Address 0 holds a call to the entry command and address 1 a `RET`, so
the program halts when the entry command returns. `XOR` is only
reachable from assembly.

## Pauses

Every word remembers the source line it came from, or 0 when the compiler
made it up to hold a loop or an `else` together. Robot commands always
pause the stepper, sensors and logic never do, and the rest pause only
when they carry a source line.

```text
void main() {               000 a002 CALL 002
    repeat (3) {            001 0000 RET
        moveForward();      002 8003 PUSH 003     line 2, pauses
    }                       003 0001 MOVE         line 3, pauses
}                           004 9002 LOOP 002     line 4, pauses
                            005 0000 RET          line 5, pauses
```

## Assembly

Start the stepper with `--asm` to read mnemonics instead of source. One
instruction goes on each line, addressed mnemonics take exactly three hex
digits. Blank lines and lines starting with `@` are skipped. A line that
starts with the address and code columns of a listing row is read from its
mnemonic, so the output of `karel --list` assembles back into the same
program. Each word's source line is its line in the file.

```text
@   CODE MNEMONIC
000 8003 PUSH 003
001 0001 MOVE
002 9000 LOOP 000
003 0009 LCLR
004 000b RCLR
005 000f XOR
006 c008 J0MP 008
007 0006 DROP
008 0000 RET
```

## Faults

A fault stops the run and names the address that caused it. The runtime
reports the same fault until it is reset.

- `stack overflow` after 1024 nested calls
- `too many nested repeats` after 1024 active repeats
- `condition too complex` with more than 64 pending conditions
- `illegal bytecode` for a word that decodes to nothing
- `blocked by wall`, `cell is empty` and `cell is full` from the world

*/
