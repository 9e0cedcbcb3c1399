//! Composite geometry: a room and its parts drawn as one shape.
//!
//! The rectangles are never clipped or unioned. Instead every pair of
//! rectangles is tested for a touching edge, and the overlapping span of
//! each touching edge becomes a shared segment. Renderers suppress the
//! border along those segments so that the seams between a room and its
//! parts disappear.

use serde::Serialize;

use super::types::{approx_eq, Rect, ResolvedPart, ResolvedRoom, Segment, EPSILON};

/// All rectangles of one composite room and the seams between them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeShape {
    /// The room's rectangle followed by its parts' rectangles
    pub rectangles: Vec<Rect>,
    pub shared_edges: Vec<Segment>,
}

impl CompositeShape {
    /// Smallest rectangle covering every member
    pub fn bounds(&self) -> Option<Rect> {
        self.rectangles
            .iter()
            .copied()
            .reduce(|acc, r| acc.union(&r))
    }

    /// Border segments of every rectangle with the shared spans removed
    pub fn outline(&self) -> Vec<Segment> {
        let mut outline = Vec::new();

        for rect in &self.rectangles {
            for (vertical, at, lo, hi) in [
                (false, rect.y, rect.x, rect.right()),
                (false, rect.bottom(), rect.x, rect.right()),
                (true, rect.x, rect.y, rect.bottom()),
                (true, rect.right(), rect.y, rect.bottom()),
            ] {
                let mut cuts: Vec<(f64, f64)> = self
                    .shared_edges
                    .iter()
                    .filter_map(|s| {
                        let seg_vertical = approx_eq(s.start.x, s.end.x);
                        match (vertical, seg_vertical) {
                            (true, true) if approx_eq(s.start.x, at) => Some((s.start.y, s.end.y)),
                            (false, false) if approx_eq(s.start.y, at) => {
                                Some((s.start.x, s.end.x))
                            }
                            _ => None,
                        }
                    })
                    .collect();

                for (from, to) in subtract_intervals(lo, hi, &mut cuts) {
                    outline.push(if vertical {
                        Segment::vertical(at, from, to)
                    } else {
                        Segment::horizontal(at, from, to)
                    });
                }
            }
        }

        outline
    }
}

/// Collect a room and its parts into one composite shape
pub fn merge_parts<'a>(
    room: &ResolvedRoom,
    parts: impl IntoIterator<Item = &'a ResolvedPart>,
) -> CompositeShape {
    let rectangles: Vec<Rect> = std::iter::once(room.rect)
        .chain(parts.into_iter().map(|p| p.rect))
        .collect();
    let shared_edges = shared_edges(&rectangles);
    CompositeShape {
        rectangles,
        shared_edges,
    }
}

/// Every touching edge span between pairs of rectangles
pub fn shared_edges(rects: &[Rect]) -> Vec<Segment> {
    let mut edges = Vec::new();

    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if let Some(x) = touching(a.x, a.right(), b.x, b.right()) {
                if let Some((y1, y2)) = overlap(a.y, a.bottom(), b.y, b.bottom()) {
                    edges.push(Segment::vertical(x, y1, y2));
                }
            }
            if let Some(y) = touching(a.y, a.bottom(), b.y, b.bottom()) {
                if let Some((x1, x2)) = overlap(a.x, a.right(), b.x, b.right()) {
                    edges.push(Segment::horizontal(y, x1, x2));
                }
            }
        }
    }

    edges
}

/// Coordinate where one extent ends exactly where the other begins
fn touching(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> Option<f64> {
    if approx_eq(a_hi, b_lo) {
        Some(a_hi)
    } else if approx_eq(b_hi, a_lo) {
        Some(a_lo)
    } else {
        None
    }
}

/// Non-empty intersection of two intervals
fn overlap(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> Option<(f64, f64)> {
    let lo = a_lo.max(b_lo);
    let hi = a_hi.min(b_hi);
    (hi - lo > EPSILON).then_some((lo, hi))
}

/// Remove `cuts` from `[lo, hi]`, returning what is left in order
fn subtract_intervals(lo: f64, hi: f64, cuts: &mut [(f64, f64)]) -> Vec<(f64, f64)> {
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut remaining = Vec::new();
    let mut cursor = lo;
    for &(cut_lo, cut_hi) in cuts.iter() {
        if cut_hi <= cursor + EPSILON {
            continue;
        }
        if cut_lo >= hi - EPSILON {
            break;
        }
        if cut_lo > cursor + EPSILON {
            remaining.push((cursor, cut_lo));
        }
        cursor = cursor.max(cut_hi);
    }
    if hi - cursor > EPSILON {
        remaining.push((cursor, hi));
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{PartKey, Point};
    use pretty_assertions::assert_eq;

    fn room(rect: Rect) -> ResolvedRoom {
        ResolvedRoom {
            id: "A".into(),
            name: None,
            rect,
        }
    }

    fn part(id: &str, rect: Rect) -> ResolvedPart {
        ResolvedPart {
            key: PartKey::new("A", id),
            name: None,
            rect,
        }
    }

    #[test]
    fn test_full_shared_edge() {
        let shape = merge_parts(
            &room(Rect::new(0.0, 0.0, 100.0, 50.0)),
            &[part("p", Rect::new(100.0, 0.0, 40.0, 50.0))],
        );
        assert_eq!(shape.rectangles.len(), 2);
        assert_eq!(shape.shared_edges, vec![Segment::vertical(100.0, 0.0, 50.0)]);
    }

    #[test]
    fn test_partial_shared_edge() {
        let shape = merge_parts(
            &room(Rect::new(0.0, 0.0, 100.0, 50.0)),
            &[part("p", Rect::new(20.0, 50.0, 200.0, 30.0))],
        );
        assert_eq!(shape.shared_edges, vec![Segment::horizontal(50.0, 20.0, 100.0)]);
    }

    #[test]
    fn test_part_on_left_and_top() {
        let edges = shared_edges(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(-5.0, 2.0, 5.0, 4.0),
            Rect::new(3.0, -3.0, 4.0, 3.0),
        ]);
        assert_eq!(
            edges,
            vec![
                Segment::vertical(0.0, 2.0, 6.0),
                Segment::horizontal(0.0, 3.0, 7.0),
            ]
        );
    }

    #[test]
    fn test_disjoint_and_corner_touching_share_nothing() {
        assert!(shared_edges(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 0.0, 10.0, 10.0),
        ])
        .is_empty());
        // touching only at a corner point
        assert!(shared_edges(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 10.0, 10.0, 10.0),
        ])
        .is_empty());
    }

    #[test]
    fn test_outline_suppresses_seams() {
        let shape = merge_parts(
            &room(Rect::new(0.0, 0.0, 100.0, 50.0)),
            &[part("p", Rect::new(100.0, 10.0, 20.0, 20.0))],
        );
        let outline = shape.outline();
        // room right edge is split around the seam
        assert!(outline.contains(&Segment::vertical(100.0, 0.0, 10.0)));
        assert!(outline.contains(&Segment::vertical(100.0, 30.0, 50.0)));
        assert!(!outline.contains(&Segment::vertical(100.0, 0.0, 50.0)));
        // part keeps its outer edges, loses its left edge
        assert!(outline.contains(&Segment::vertical(120.0, 10.0, 30.0)));
        assert!(!outline
            .iter()
            .any(|s| s.start == Point::new(100.0, 10.0) && s.end == Point::new(100.0, 30.0)));
        assert_eq!(outline.len(), 4 + 1 + 3);
    }

    #[test]
    fn test_subtract_intervals() {
        let mut cuts = vec![(6.0, 8.0), (2.0, 4.0)];
        assert_eq!(
            subtract_intervals(0.0, 10.0, &mut cuts),
            vec![(0.0, 2.0), (4.0, 6.0), (8.0, 10.0)]
        );
        let mut cover = vec![(0.0, 10.0)];
        assert!(subtract_intervals(0.0, 10.0, &mut cover).is_empty());
    }

    #[test]
    fn test_bounds() {
        let shape = merge_parts(
            &room(Rect::new(0.0, 0.0, 100.0, 50.0)),
            &[part("p", Rect::new(100.0, 10.0, 20.0, 60.0))],
        );
        assert_eq!(shape.bounds(), Some(Rect::new(0.0, 0.0, 120.0, 70.0)));
    }
}
