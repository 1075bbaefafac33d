//! Deterministic reading order for freely positioned elements.

use std::cmp::Ordering;

use crate::model::Element;

/// Order element indices into rows, top to bottom, then left to right.
///
/// Elements are sorted by top edge; an element joins the current row when its
/// top edge is within `tolerance` of the row's first element. Rows are then
/// ordered by left edge. Equal coordinates keep input order.
pub fn reading_order(elements: &[Element], tolerance: f32) -> Vec<usize> {
    let mut by_top: Vec<(usize, f32, f32)> = elements
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let r = e.rect();
            (i, r.y, r.x)
        })
        .collect();
    by_top.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut order = Vec::with_capacity(elements.len());
    let mut row: Vec<(usize, f32, f32)> = Vec::new();
    let mut row_top = 0.0;

    for entry in by_top {
        if !row.is_empty() && entry.1 - row_top > tolerance {
            flush_row(&mut row, &mut order);
        }
        if row.is_empty() {
            row_top = entry.1;
        }
        row.push(entry);
    }
    flush_row(&mut row, &mut order);

    order
}

fn flush_row(row: &mut Vec<(usize, f32, f32)>, order: &mut Vec<usize>) {
    row.sort_by(|a, b| {
        a.2.partial_cmp(&b.2)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    order.extend(row.drain(..).map(|(i, _, _)| i));
}
