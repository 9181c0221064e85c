//! Plain-text presentation of sessions, catalogs and verdicts.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use workyard::core::models::ids::InstanceId;
use workyard::core::models::instance::PlacedInstance;
use workyard::core::models::piece::PieceType;
use workyard::engine::ghost::GhostPlacement;
use workyard::engine::session::{LoadReport, Session};

const OVERFLOW_GLYPH: char = '*';

/// Glyph for the instance at 1-based `index`: `A`-`Z`, then `a`-`z`, then `*`.
pub fn glyph_for(index: usize) -> char {
    match index {
        1..=26 => (b'A' + (index - 1) as u8) as char,
        27..=52 => (b'a' + (index - 27) as u8) as char,
        _ => OVERFLOW_GLYPH,
    }
}

pub fn describe_instance(index: usize, instance: &PlacedInstance) -> String {
    let fp = instance.footprint();
    format!(
        "#{:<3} {} at ({}, {}), {}, {}x{}",
        index,
        instance.piece.name,
        instance.x,
        instance.y,
        instance.rotation,
        fp.width,
        fp.height
    )
}

pub fn render_session(session: &Session) -> String {
    let glyphs: HashMap<InstanceId, char> = session
        .instances()
        .enumerate()
        .map(|(i, inst)| (inst.id, glyph_for(i + 1)))
        .collect();

    let grid = session.grid();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Grid {}x{} ({} buildable cells, {} occupied)",
        grid.width(),
        grid.height(),
        grid.buildable_count(),
        session.occupied_cells().len()
    );
    let areas = grid.area_ids();
    if !areas.is_empty() {
        let _ = writeln!(out, "Areas: {}", areas.join(", "));
    }
    out.push('\n');
    out.push_str(&grid.render_ascii(|id| glyphs.get(&id).copied().unwrap_or(OVERFLOW_GLYPH)));

    if session.is_empty() {
        out.push_str("\nNo pieces placed.\n");
    } else {
        out.push('\n');
        for (i, instance) in session.instances().enumerate() {
            let _ = writeln!(
                out,
                "  {}  {}",
                glyph_for(i + 1),
                describe_instance(i + 1, instance)
            );
        }
    }
    out
}

pub fn render_catalog<'a>(pieces: impl Iterator<Item = &'a Arc<PieceType>>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<20} {:>5}  {:<6}  {}",
        "ID", "NAME", "SIZE", "ROTATE", "LOCATIONS"
    );
    for piece in pieces {
        let _ = writeln!(
            out,
            "{:<20} {:<20} {:>5}  {:<6}  {}",
            piece.id,
            piece.name,
            format!("{}x{}", piece.base_width, piece.base_height),
            if piece.can_rotate { "yes" } else { "no" },
            piece.locations.join(", ")
        );
    }
    out
}

pub fn render_ghost(ghost: &GhostPlacement) -> String {
    let (x, y) = ghost.position();
    let what = match ghost.moving() {
        Some(moving) => format!(
            "Moving {} from ({}, {}) to ({}, {}), {}",
            ghost.piece().name,
            moving.original.x,
            moving.original.y,
            x,
            y,
            ghost.rotation()
        ),
        None => format!(
            "Placing {} at ({}, {}), {}",
            ghost.piece().name,
            x,
            y,
            ghost.rotation()
        ),
    };
    match ghost.reason() {
        None => format!("✓ {}: allowed", what),
        Some(reason) => format!("✗ {}: {} [{}]", what, reason, reason.kind()),
    }
}

/// A summary of dropped records, or `None` when every record was replayed.
pub fn render_load_report(report: &LoadReport) -> Option<String> {
    if report.is_clean() {
        return None;
    }
    let mut out = format!(
        "Warning: {} saved placement(s) no longer fit and were dropped:\n",
        report.dropped.len()
    );
    for dropped in &report.dropped {
        let _ = writeln!(
            out,
            "  record {}: {} at ({}, {}), {}: {}",
            dropped.index + 1,
            dropped.record.piece,
            dropped.record.x,
            dropped.record.y,
            dropped.record.rotation,
            dropped.reason
        );
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use workyard::core::catalog::PieceCatalog;
    use workyard::core::layout::{AreaLayout, AreaRect};
    use workyard::core::models::grid::Grid;
    use workyard::core::models::instance::PlacementRecord;
    use workyard::core::models::piece::Rotation;
    use workyard::engine::config::LoadPolicy;

    #[test]
    fn glyphs_run_through_both_alphabets() {
        assert_eq!(glyph_for(1), 'A');
        assert_eq!(glyph_for(26), 'Z');
        assert_eq!(glyph_for(27), 'a');
        assert_eq!(glyph_for(52), 'z');
        assert_eq!(glyph_for(53), '*');
    }

    #[test]
    fn session_rendering_shows_grid_and_legend() {
        let catalog = PieceCatalog::builtin();
        let mut session = Session::new(Grid::new(3, 2));
        session
            .place(catalog.lookup("stone_cutter").unwrap(), 0, 0, Rotation::Deg0)
            .unwrap();
        session
            .place(catalog.lookup("garden_bed").unwrap(), 2, 1, Rotation::Deg0)
            .unwrap();

        let text = render_session(&session);

        assert!(text.starts_with("Grid 3x2 (6 buildable cells, 3 occupied)\n"));
        assert!(text.contains("AA.\n..B\n"));
        assert!(text.contains("A  #1   Stone Cutter at (0, 0), 0°, 2x1"));
        assert!(text.contains("B  #2   Garden Bed at (2, 1), 0°, 1x1"));
    }

    #[test]
    fn area_grids_list_their_areas_and_holes() {
        let layout = AreaLayout::new()
            .with_area("a", AreaRect::new(0, 0, 1, 1))
            .with_area("b", AreaRect::new(2, 0, 1, 1));
        let session = Session::new(Grid::from_areas(&layout).unwrap());

        let text = render_session(&session);

        assert!(text.contains("Areas: a, b"));
        assert!(text.contains(".#.\n"));
        assert!(text.contains("No pieces placed."));
    }

    #[test]
    fn catalog_rendering_lists_each_piece() {
        let catalog = PieceCatalog::builtin();
        let text = render_catalog(catalog.for_location("garden"));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("garden_bed"));
        assert!(text.contains("compost_heap"));
        assert!(!text.contains("stone_cutter"));
    }

    #[test]
    fn ghost_rendering_reports_the_verdict() {
        let catalog = PieceCatalog::builtin();
        let cutter = catalog.lookup("stone_cutter").unwrap();
        let mut session = Session::new(Grid::new(3, 3));

        let ok = render_ghost(session.begin_placement(cutter, 0, 0, Rotation::Deg0));
        assert!(ok.starts_with("✓ Placing Stone Cutter at (0, 0), 0°"));

        let bad = render_ghost(session.update_ghost(2, 0).unwrap());
        assert!(bad.starts_with("✗ "));
        assert!(bad.contains("[out-of-bounds]"));
    }

    #[test]
    fn load_report_rendering_lists_dropped_records() {
        let catalog = PieceCatalog::builtin();
        let mut session = Session::new(Grid::new(2, 2));
        let report = session
            .load_records(
                &[
                    PlacementRecord::new("garden_bed", 0, 0, Rotation::Deg0),
                    PlacementRecord::new("garden_bed", 0, 0, Rotation::Deg0),
                ],
                &catalog,
                LoadPolicy::DropInvalid,
            )
            .unwrap();

        let text = render_load_report(&report).unwrap();
        assert!(text.contains("1 saved placement(s)"));
        assert!(text.contains("record 2: garden_bed at (0, 0)"));
        assert!(render_load_report(&LoadReport::default()).is_none());
    }
}
