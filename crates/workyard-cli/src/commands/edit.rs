use super::{PlanContext, open_plan};
use crate::cli::{MoveArgs, PlacementArgs, PlanArgs, TargetArgs};
use crate::error::Result;
use crate::ui;
use std::sync::Arc;
use tracing::info;
use workyard::core::models::piece::PieceType;
use workyard::engine::error::EngineError;
use workyard::workflows::plan::edit_and_save;

pub fn run_check(plan: &PlanArgs, args: PlacementArgs) -> Result<()> {
    let mut ctx = open_plan(plan)?;
    println!("{}", check(&mut ctx, &args)?);
    Ok(())
}

pub fn run_place(plan: &PlanArgs, args: PlacementArgs) -> Result<()> {
    let mut ctx = open_plan(plan)?;
    println!("{}", place(&mut ctx, &args)?);
    Ok(())
}

pub fn run_move(plan: &PlanArgs, args: MoveArgs) -> Result<()> {
    let mut ctx = open_plan(plan)?;
    println!("{}", move_instance(&mut ctx, &args)?);
    Ok(())
}

pub fn run_rotate(plan: &PlanArgs, args: TargetArgs) -> Result<()> {
    let mut ctx = open_plan(plan)?;
    println!("{}", rotate(&mut ctx, args)?);
    Ok(())
}

pub fn run_remove(plan: &PlanArgs, args: TargetArgs) -> Result<()> {
    let mut ctx = open_plan(plan)?;
    println!("{}", remove(&mut ctx, args)?);
    Ok(())
}

fn lookup_piece(ctx: &PlanContext, id: &str) -> Result<Arc<PieceType>> {
    ctx.catalog
        .get(id)
        .cloned()
        .ok_or_else(|| EngineError::UnknownPiece(id.to_string()).into())
}

fn saved_suffix(ctx: &PlanContext) -> String {
    format!("Saved to {}.", ctx.store.path().display())
}

/// Previews a placement through a ghost and discards it.
fn check(ctx: &mut PlanContext, args: &PlacementArgs) -> Result<String> {
    let piece = lookup_piece(ctx, &args.piece)?;
    let verdict = ui::render_ghost(ctx.session.begin_placement(&piece, args.x, args.y, args.rotation));
    ctx.session.cancel_ghost();
    Ok(verdict)
}

fn place(ctx: &mut PlanContext, args: &PlacementArgs) -> Result<String> {
    let piece = lookup_piece(ctx, &args.piece)?;
    let placed = edit_and_save(&mut ctx.session, &mut ctx.store, |s| {
        s.place(&piece, args.x, args.y, args.rotation)
    })?;
    info!("Placed {} as instance #{}", piece.id, ctx.session.len());
    Ok(format!(
        "✓ Placed {}. {}",
        ui::describe_instance(ctx.session.len(), &placed),
        saved_suffix(ctx)
    ))
}

fn move_instance(ctx: &mut PlanContext, args: &MoveArgs) -> Result<String> {
    let id = ctx.instance_id(args.index)?;
    let current = ctx
        .session
        .instance(id)
        .map(|inst| inst.rotation)
        .ok_or(EngineError::InstanceNotFound(id))?;
    let rotation = args.rotation.unwrap_or(current);

    if args.dry_run {
        ctx.session.begin_move(id)?;
        if rotation != current {
            ctx.session.rotate_ghost()?;
        }
        let verdict = ui::render_ghost(ctx.session.update_ghost(args.x, args.y)?);
        ctx.session.cancel_ghost();
        return Ok(verdict);
    }

    let moved = edit_and_save(&mut ctx.session, &mut ctx.store, |s| {
        s.move_instance(id, args.x, args.y, rotation)
    })?;
    Ok(format!(
        "✓ Moved {}. {}",
        ui::describe_instance(args.index, &moved),
        saved_suffix(ctx)
    ))
}

fn rotate(ctx: &mut PlanContext, args: TargetArgs) -> Result<String> {
    let id = ctx.instance_id(args.index)?;
    let rotated = edit_and_save(&mut ctx.session, &mut ctx.store, |s| s.rotate(id))?;
    Ok(format!(
        "✓ Rotated {}. {}",
        ui::describe_instance(args.index, &rotated),
        saved_suffix(ctx)
    ))
}

fn remove(ctx: &mut PlanContext, args: TargetArgs) -> Result<String> {
    let id = ctx.instance_id(args.index)?;
    let removed = edit_and_save(&mut ctx.session, &mut ctx.store, |s| s.remove(id))?;
    Ok(format!(
        "✓ Removed {}. {}",
        ui::describe_instance(args.index, &removed),
        saved_suffix(ctx)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open_with_config;
    use crate::commands::tests::config_for;
    use crate::error::CliError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use workyard::core::models::piece::Rotation;
    use workyard::engine::error::PlacementError;

    fn open(path: &Path) -> PlanContext {
        open_with_config(config_for(path.to_path_buf(), 4, 4)).unwrap()
    }

    fn placement(piece: &str, x: i32, y: i32, rotation: Rotation) -> PlacementArgs {
        PlacementArgs {
            piece: piece.to_string(),
            x,
            y,
            rotation,
        }
    }

    fn rejection(result: Result<String>) -> PlacementError {
        match result {
            Err(CliError::Engine(EngineError::Rejected(reason))) => reason,
            other => panic!("expected a rejected placement, got {other:?}"),
        }
    }

    #[test]
    fn place_saves_and_reopens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");

        let mut ctx = open(&path);
        let message = place(&mut ctx, &placement("stone_cutter", 0, 0, Rotation::Deg90)).unwrap();
        assert!(message.starts_with("✓ Placed #1   Stone Cutter at (0, 0), 90°, 1x2."));

        let reopened = open(&path);
        assert_eq!(reopened.session.records(), ctx.session.records());
    }

    #[test]
    fn rejected_place_leaves_the_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let mut ctx = open(&path);
        place(&mut ctx, &placement("stone_cutter", 0, 0, Rotation::Deg0)).unwrap();
        let saved = fs::read_to_string(&path).unwrap();

        let reason = rejection(place(&mut ctx, &placement("garden_bed", 1, 0, Rotation::Deg0)));
        assert!(matches!(reason, PlacementError::Occupied { x: 1, y: 0, .. }));
        let reason = rejection(place(&mut ctx, &placement("garden_bed", 0, 0, Rotation::Deg90)));
        assert!(matches!(reason, PlacementError::RotationNotSupported { .. }));

        assert_eq!(fs::read_to_string(&path).unwrap(), saved);
    }

    #[test]
    fn unknown_piece_is_reported() {
        let dir = tempdir().unwrap();
        let mut ctx = open(&dir.path().join("plan.toml"));
        assert!(matches!(
            place(&mut ctx, &placement("catapult", 0, 0, Rotation::Deg0)),
            Err(CliError::Engine(EngineError::UnknownPiece(id))) if id == "catapult"
        ));
    }

    #[test]
    fn check_reports_without_saving() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let mut ctx = open(&path);

        let ok = check(&mut ctx, &placement("garden_bed", 3, 3, Rotation::Deg0)).unwrap();
        let bad = check(&mut ctx, &placement("stone_cutter", 3, 3, Rotation::Deg0)).unwrap();

        assert!(ok.starts_with("✓ "));
        assert!(bad.contains("[out-of-bounds]"));
        assert!(ctx.session.is_empty());
        assert!(ctx.session.ghost().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn move_dry_run_previews_without_changes() {
        let dir = tempdir().unwrap();
        let mut ctx = open(&dir.path().join("plan.toml"));
        place(&mut ctx, &placement("stone_cutter", 0, 0, Rotation::Deg0)).unwrap();
        let before = ctx.session.records();

        let args = MoveArgs {
            index: 1,
            x: 3,
            y: 0,
            rotation: Some(Rotation::Deg90),
            dry_run: true,
        };
        let verdict = move_instance(&mut ctx, &args).unwrap();

        assert!(verdict.starts_with("✓ Moving Stone Cutter from (0, 0) to (3, 0), 90°"));
        assert_eq!(ctx.session.records(), before);
        assert!(ctx.session.ghost().is_none());
    }

    #[test]
    fn move_rotate_and_remove_update_the_saved_plan() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let mut ctx = open(&path);
        place(&mut ctx, &placement("stone_cutter", 0, 0, Rotation::Deg0)).unwrap();
        place(&mut ctx, &placement("garden_bed", 3, 3, Rotation::Deg0)).unwrap();

        let args = MoveArgs {
            index: 1,
            x: 1,
            y: 1,
            rotation: None,
            dry_run: false,
        };
        move_instance(&mut ctx, &args).unwrap();
        rotate(&mut ctx, TargetArgs { index: 1 }).unwrap();
        remove(&mut ctx, TargetArgs { index: 2 }).unwrap();

        let reopened = open(&path);
        let records = reopened.session.records();
        assert_eq!(records.len(), 1);
        assert_eq!((records[0].x, records[0].y), (1, 1));
        assert_eq!(records[0].rotation, Rotation::Deg90);
    }

    #[test]
    fn rotating_a_fixed_piece_is_rejected() {
        let dir = tempdir().unwrap();
        let mut ctx = open(&dir.path().join("plan.toml"));
        place(&mut ctx, &placement("garden_bed", 0, 0, Rotation::Deg0)).unwrap();

        let reason = rejection(rotate(&mut ctx, TargetArgs { index: 1 }));
        assert!(matches!(reason, PlacementError::RotationNotSupported { .. }));
    }
}
