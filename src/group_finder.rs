use crate::field::{Color, Coord, Field};

/// Neighbor order for extraction. Up is explored first.
const STEPS: [Coord; 4] = [Coord::UP, Coord::DOWN, Coord::LEFT, Coord::RIGHT];

/// Returns the largest 4-connected group of same-colored cells.
///
/// Ties go to the group found first in row-major order. The input field is
/// not modified; the search erases colors on a private clone instead.
pub fn find_max_group(field: &Field) -> Vec<Coord> {
    let mut max_group = Vec::new();
    scan_groups(field, |group| {
        if group.len() > max_group.len() {
            max_group = group;
        }
    });
    max_group
}

/// Every group in discovery order. Sizes add up to the number of colored cells.
pub fn find_groups(field: &Field) -> Vec<Vec<Coord>> {
    let mut groups = Vec::new();
    scan_groups(field, |group| groups.push(group));
    groups
}

fn scan_groups<F: FnMut(Vec<Coord>)>(field: &Field, mut on_group: F) {
    let mut search = field.clone();
    let row_lengths: Vec<usize> = search.rows().map(|cells| cells.len()).collect();

    for (row, &len) in row_lengths.iter().enumerate() {
        for col in 0..len {
            let coord = Coord::new(row as isize, col as isize);
            let color = search.color(coord);
            if color == Color::Unspecified {
                continue;
            }

            on_group(extract_group(&mut search, coord, color));
        }
    }
}

/// Removes the group of `target` cells connected to `start` from `field` and
/// returns its coordinates in depth-first pre-order.
///
/// Cells are checked when popped, not when pushed, so the visit order is the
/// same as a recursive up/down/left/right walk.
pub fn extract_group(field: &mut Field, start: Coord, target: Color) -> Vec<Coord> {
    let mut group = Vec::new();
    let mut stack = vec![start];

    while let Some(coord) = stack.pop() {
        if !field.in_range(coord) {
            continue;
        }

        let color = field.color(coord);
        if color == Color::Unspecified || color != target {
            continue;
        }

        field.set_color(coord, Color::Unspecified);
        group.push(coord);

        for &step in STEPS.iter().rev() {
            stack.push(coord + step);
        }
    }

    group
}
