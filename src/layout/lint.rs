//! Lint checks for placement defects the engine deliberately tolerates.
//!
//! Runs after layout to flag openings that run past the end of their wall,
//! openings that overlap on the same wall, and composite rectangles that
//! overlap instead of merely touching. Nothing here changes the layout.

use std::fmt;

use super::types::{LayoutResult, PlacedOpening, EPSILON};

/// A lint warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overflow,
    Overlap,
    PartOverlap,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overflow => write!(f, "overflow"),
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::PartOverlap => write!(f, "part-overlap"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a completed layout.
pub fn check(result: &LayoutResult) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_overflow(result, &mut warnings);
    check_opening_overlap(result, &mut warnings);
    check_part_overlap(result, &mut warnings);
    warnings
}

fn display_name(opening: &PlacedOpening) -> String {
    format!("{} #{} on {}:{}", opening.kind, opening.index + 1, opening.host, opening.wall)
}

// ── Openings running past their wall ─────────────────────────────

fn check_overflow(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    for opening in &result.openings {
        if opening.offset < -EPSILON {
            warnings.push(LintWarning {
                category: LintCategory::Overflow,
                message: format!(
                    "{} starts {:.0} before the wall",
                    display_name(opening),
                    -opening.offset
                ),
            });
        }
        let end = opening.offset + opening.width;
        if end > opening.wall_length + EPSILON {
            warnings.push(LintWarning {
                category: LintCategory::Overflow,
                message: format!(
                    "{} extends {:.0} past the end of the {:.0} wall",
                    display_name(opening),
                    end - opening.wall_length,
                    opening.wall_length
                ),
            });
        }
    }
}

// ── Openings sharing wall space ──────────────────────────────────

fn check_opening_overlap(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    let openings = &result.openings;
    for (i, a) in openings.iter().enumerate() {
        for b in &openings[i + 1..] {
            if a.host != b.host || a.wall != b.wall {
                continue;
            }
            let overlap = (a.offset + a.width).min(b.offset + b.width) - a.offset.max(b.offset);
            if overlap > EPSILON {
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!(
                        "{} and {} overlap by {:.0}",
                        display_name(a),
                        display_name(b),
                        overlap
                    ),
                });
            }
        }
    }
}

// ── Composite members overlapping instead of touching ────────────

fn check_part_overlap(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    for (room_id, composite) in &result.composites {
        let names: Vec<String> = std::iter::once(room_id.clone())
            .chain(result.parts_of(room_id).map(|p| p.key.to_string()))
            .collect();
        let rects = &composite.rectangles;

        for (i, a) in rects.iter().enumerate() {
            for (j, b) in rects.iter().enumerate().skip(i + 1) {
                if a.intersects(b) {
                    let overlap_w = a.right().min(b.right()) - a.x.max(b.x);
                    let overlap_h = a.bottom().min(b.bottom()) - a.y.max(b.y);
                    warnings.push(LintWarning {
                        category: LintCategory::PartOverlap,
                        message: format!(
                            "\"{}\" and \"{}\" overlap by {:.0}x{:.0}",
                            names.get(i).map(String::as_str).unwrap_or("?"),
                            names.get(j).map(String::as_str).unwrap_or("?"),
                            overlap_w,
                            overlap_h
                        ),
                    });
                }
            }
        }
    }
}
