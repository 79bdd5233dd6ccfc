/*!
# World Descriptions

`karel --level FILE` starts Karel in a described world. The file has ten
rows of ten cells. Each cell is one hex digit adding up its walls, with a
`*` behind it when it holds a beeper.

| Bit | Wall |
|-----|------|
| 1 | north |
| 2 | east |
| 4 | south |
| 8 | west |

The border is always walled, whatever the file says. A wall written on
one cell also appears on its neighbour.

```text
# a corridor with three beepers
0  0  0  0  0  0  0  0  0  0
4  4  4  4  4  4  4  4  4  0
0* 0  0  0* 0  0  0  0  0* 0
1  1  1  1  1  1  1  1  1  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
0  0  0  0  0  0  0  0  0  0
robot 0 2 east
```

The `robot X Y HEADING` line is optional; without it Karel starts at
0 0 facing east. Lines starting with `#` are ignored.

`karel --random SEED` instead scatters beepers over an empty floor. The
same seed always gives the same floor; `--density` sets the share of cells
that get one.

*/
