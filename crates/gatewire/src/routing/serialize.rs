use super::grid::OccupancyGrid;
use super::types::{Cell, Direction};

/// Serialize a cell path to its text form.
///
/// Format: `(0,0)-(1,0)-(1,1)`
pub fn path_to_string(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse a cell path from its text form.
///
/// Returns `None` if the string is malformed or empty.
pub fn string_to_path(s: &str) -> Option<Vec<Cell>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    tokenize(s)?.iter().map(|t| parse_cell(t)).collect()
}

/// Split into `(x,y)` tokens. Separators between tokens are single dashes;
/// dashes inside parentheses are minus signs.
fn tokenize(s: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();

    loop {
        if chars.peek() != Some(&'(') {
            return None;
        }
        let mut token = String::new();
        for ch in chars.by_ref() {
            token.push(ch);
            if ch == ')' {
                break;
            }
        }
        if !token.ends_with(')') {
            return None;
        }
        tokens.push(token);

        match chars.next() {
            None => break,
            Some('-') => {}
            Some(_) => return None,
        }
    }

    Some(tokens)
}

/// Parse `(x,y)`.
fn parse_cell(s: &str) -> Option<Cell> {
    let inner = s.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    Some(Cell::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Glyph for a path cell given its neighbours along the path.
fn path_glyph(prev: Option<Cell>, cell: Cell, next: Option<Cell>) -> char {
    let dirs: Vec<Direction> = [prev, next]
        .into_iter()
        .flatten()
        .filter_map(|other| Direction::between(cell, other))
        .collect();
    match dirs.as_slice() {
        [] => 'o',
        [d] if d.is_horizontal() => '-',
        [_] => '|',
        [a, b] if a.is_horizontal() && b.is_horizontal() => '-',
        [a, b] if !a.is_horizontal() && !b.is_horizontal() => '|',
        _ => '+',
    }
}

/// Render the grid as ASCII, one text row per grid row.
///
/// `#` blocked, `.` free, `:` free with a weight, and paths drawn with
/// `-`, `|`, `+` (endpoints as `o`). Later paths draw over earlier ones.
pub fn render_grid(grid: &OccupancyGrid, paths: &[&[Cell]]) -> String {
    let mut canvas: Vec<Vec<char>> = grid
        .rows()
        .map(|row| {
            row.iter()
                .map(|&v| {
                    if v >= super::grid::BLOCKED {
                        '#'
                    } else if v > 0.0 {
                        ':'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();

    for path in paths {
        for (i, &cell) in path.iter().enumerate() {
            if !grid.in_bounds(cell) {
                continue;
            }
            let glyph = if i == 0 || i + 1 == path.len() {
                'o'
            } else {
                path_glyph(Some(path[i - 1]), cell, path.get(i + 1).copied())
            };
            canvas[cell.y as usize][cell.x as usize] = glyph;
        }
    }

    let mut out = String::with_capacity(grid.width() * grid.height() + grid.height());
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}
