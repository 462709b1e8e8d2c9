//! Day 3: Gear Ratios

use lib::input::ErrorKind;
use lib::prelude::*;

/// A number found in the schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Number {
    row: usize,
    start: usize,
    end: usize,
    value: u32,
}

/// Test if the byte is a symbol, which is anything except for digits and `.`.
#[inline]
fn is_symbol(b: u8) -> bool {
    b != b'.' && !b.is_ascii_digit()
}

/// Find every run of digits in the given row.
fn numbers(row: usize, data: &[u8], out: &mut Vec<Number>) {
    let mut x = 0;

    while x < data.len() {
        if !data[x].is_ascii_digit() {
            x += 1;
            continue;
        }

        let start = x;
        let mut value = 0u32;

        while let Some(d) = data.get(x).filter(|d| d.is_ascii_digit()) {
            value = value * 10 + u32::from(*d - b'0');
            x += 1;
        }

        out.push(Number {
            row,
            start,
            end: x,
            value,
        });
    }
}

/// Iterate over every cell surrounding the number.
fn around<'a, G>(grid: &'a G, n: &Number) -> impl Iterator<Item = (usize, usize, u8)> + 'a
where
    G: Grid<u8>,
{
    let rows = n.row.saturating_sub(1)..(n.row + 2).min(grid.rows_len());
    let columns = n.start.saturating_sub(1)..(n.end + 1).min(grid.columns_len());
    let n = *n;

    rows.flat_map(move |r| columns.clone().map(move |c| (r, c)))
        .filter(move |&(r, c)| r != n.row || c < n.start || c >= n.end)
        .map(move |(r, c)| (r, c, *grid.get(r, c)))
}

pub fn solve(input: IStr) -> Result<(u32, u32)> {
    // Width of the first row, which every other row has to match.
    let mut first = input;
    let columns = first.line::<&[u8]>()?.len();

    let mut lines = input;
    let mut nums = Vec::new();
    let mut rows = 0;

    while let Some(line) = lines.try_line::<IStr>()? {
        if line.is_empty() {
            break;
        }

        if line.len() != columns {
            return Err(line.error(ErrorKind::RowWidth(columns, line.len())).into());
        }

        numbers(rows, line.as_data(), &mut nums);
        rows += 1;
    }

    let data = input.as_data();
    let data = &data[..(rows * (columns + 1)).min(data.len())];
    let grid = data.as_grid_with_stride(columns, 1);

    let mut o1 = 0;
    // Numbers adjacent to the gear at the given position.
    let mut gears = Vec::<((usize, usize), u32)>::new();

    for n in &nums {
        let mut part = false;

        for (r, c, b) in around(&grid, n) {
            part |= is_symbol(b);

            if b == b'*' {
                gears.push(((r, c), n.value));
            }
        }

        if part {
            o1 += n.value;
        }
    }

    gears.sort_by_key(|&(pos, _)| pos);

    let mut o2 = 0;

    for group in gears.chunk_by(|a, b| a.0 == b.0) {
        if let [(_, a), (_, b)] = group {
            o2 += a * b;
        }
    }

    Ok((o1, o2))
}
