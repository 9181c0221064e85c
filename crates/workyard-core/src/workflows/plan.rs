use crate::core::catalog::PieceCatalog;
use crate::core::io::traits::PlanStore;
use crate::engine::config::PlannerConfig;
use crate::engine::error::EngineError;
use crate::engine::session::{LoadReport, Session};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct OpenedPlan {
    pub session: Session,
    pub report: LoadReport,
}

/// Builds the configured grid and replays the stored plan into a fresh session.
///
/// A missing plan yields an empty session. Records that no longer fit are handled per
/// the configured [`LoadPolicy`](crate::engine::config::LoadPolicy).
#[instrument(skip_all, name = "open_plan_workflow")]
pub fn open(
    config: &PlannerConfig,
    catalog: &PieceCatalog,
    store: &dyn PlanStore,
) -> Result<OpenedPlan, EngineError> {
    let mut session = Session::from_config(config)?;
    info!(
        width = session.grid().width(),
        height = session.grid().height(),
        buildable = session.grid().buildable_count(),
        "Grid ready."
    );

    let records = store.load()?;
    let report = session.load_records(&records, catalog, config.load_policy)?;
    log_report(&report);
    info!("Opened plan with {} placed instance(s).", session.len());

    Ok(OpenedPlan { session, report })
}

/// Replaces the session's placements with the stored plan.
///
/// If the store cannot be read, or the load policy rejects the plan, the session is
/// left exactly as it was.
#[instrument(skip_all, name = "reload_plan_workflow")]
pub fn reload(
    session: &mut Session,
    config: &PlannerConfig,
    catalog: &PieceCatalog,
    store: &dyn PlanStore,
) -> Result<LoadReport, EngineError> {
    let records = store.load()?;
    let report = session.load_records(&records, catalog, config.load_policy)?;
    log_report(&report);
    Ok(report)
}

/// Writes the session's placements to the store.
///
/// A failed save leaves the session untouched; it remains the source of truth until the
/// next successful save.
#[instrument(skip_all, name = "save_plan_workflow")]
pub fn save(session: &Session, store: &mut dyn PlanStore) -> Result<(), EngineError> {
    let records = session.records();
    store.save(&records)?;
    info!("Saved {} placement(s).", records.len());
    Ok(())
}

/// Applies `edit` to the session and saves the result.
///
/// Nothing is saved if `edit` fails, and a failed edit is rolled back. If the save
/// itself fails the in-memory edit is kept and the error is returned.
pub fn edit_and_save<F, R>(
    session: &mut Session,
    store: &mut dyn PlanStore,
    edit: F,
) -> Result<R, EngineError>
where
    F: FnOnce(&mut Session) -> Result<R, EngineError>,
{
    let result = session.transaction(edit)?;
    save(session, store)?;
    Ok(result)
}

fn log_report(report: &LoadReport) {
    if !report.is_clean() {
        warn!(
            "{} saved placement(s) no longer fit and were dropped; {} kept.",
            report.dropped.len(),
            report.accepted
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::file::TomlFileStore;
    use crate::core::io::memory::MemoryStore;
    use crate::core::models::instance::PlacementRecord;
    use crate::core::models::piece::Rotation;
    use crate::engine::config::{GridSource, LoadPolicy, PlannerConfigBuilder};
    use tempfile::tempdir;

    fn config(policy: LoadPolicy) -> PlannerConfig {
        PlannerConfigBuilder::new()
            .grid(GridSource::Rectangle {
                width: 4,
                height: 4,
            })
            .load_policy(policy)
            .build()
            .unwrap()
    }

    fn cutter_at(x: usize, y: usize) -> PlacementRecord {
        PlacementRecord::new("stone_cutter", x, y, Rotation::Deg0)
    }

    #[test]
    fn open_with_empty_store_gives_empty_session() {
        let opened = open(
            &config(LoadPolicy::DropInvalid),
            &PieceCatalog::builtin(),
            &MemoryStore::new(),
        )
        .unwrap();
        assert!(opened.session.is_empty());
        assert!(opened.report.is_clean());
        assert_eq!(opened.session.grid().width(), 4);
    }

    #[test]
    fn open_replays_and_reports_stale_records() {
        let store = MemoryStore::with_records(vec![cutter_at(0, 0), cutter_at(1, 0), cutter_at(0, 3)]);
        let opened = open(&config(LoadPolicy::DropInvalid), &PieceCatalog::builtin(), &store).unwrap();

        assert_eq!(opened.session.len(), 2);
        assert_eq!(opened.report.accepted, 2);
        assert_eq!(opened.report.dropped.len(), 1);
        assert_eq!(opened.report.dropped[0].index, 1);
    }

    #[test]
    fn open_surfaces_store_failures() {
        let result = open(
            &config(LoadPolicy::DropInvalid),
            &PieceCatalog::builtin(),
            &MemoryStore::new().failing_loads(),
        );
        assert!(matches!(result, Err(EngineError::Persistence(_))));
    }

    #[test]
    fn failed_reload_leaves_session_unchanged() {
        let catalog = PieceCatalog::builtin();
        let cfg = config(LoadPolicy::Reject);
        let mut opened = open(&cfg, &catalog, &MemoryStore::with_records(vec![cutter_at(0, 0)])).unwrap();
        let before = opened.session.records();

        let broken = MemoryStore::new().failing_loads();
        assert!(reload(&mut opened.session, &cfg, &catalog, &broken).is_err());
        assert_eq!(opened.session.records(), before);

        let stale = MemoryStore::with_records(vec![cutter_at(0, 1), cutter_at(1, 1)]);
        assert!(matches!(
            reload(&mut opened.session, &cfg, &catalog, &stale),
            Err(EngineError::InvalidSavedPlacement { index: 1, .. })
        ));
        assert_eq!(opened.session.records(), before);
    }

    #[test]
    fn edit_and_save_persists_only_successful_edits() {
        let catalog = PieceCatalog::builtin();
        let cutter = catalog.lookup("stone_cutter").unwrap();
        let mut store = MemoryStore::new();
        let mut session = Session::from_config(&config(LoadPolicy::DropInvalid)).unwrap();

        edit_and_save(&mut session, &mut store, |s| s.place(cutter, 0, 0, Rotation::Deg0)).unwrap();
        assert_eq!(store.records(), Some(&[cutter_at(0, 0)][..]));

        let result = edit_and_save(&mut session, &mut store, |s| {
            s.place(cutter, 2, 2, Rotation::Deg0)?;
            s.place(cutter, 1, 0, Rotation::Deg0)
        });
        assert!(matches!(result, Err(EngineError::Rejected(_))));
        assert_eq!(session.len(), 1);
        assert_eq!(store.records(), Some(&[cutter_at(0, 0)][..]));
    }

    #[test]
    fn failed_save_keeps_the_in_memory_edit() {
        let catalog = PieceCatalog::builtin();
        let cutter = catalog.lookup("stone_cutter").unwrap();
        let mut store = MemoryStore::new().failing_saves();
        let mut session = Session::from_config(&config(LoadPolicy::DropInvalid)).unwrap();

        let result = edit_and_save(&mut session, &mut store, |s| s.place(cutter, 0, 0, Rotation::Deg0));

        assert!(matches!(result, Err(EngineError::Persistence(_))));
        assert_eq!(session.len(), 1);
        assert!(store.records().is_none());
    }

    #[test]
    fn save_then_open_through_a_file_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.toml");
        let catalog = PieceCatalog::builtin();
        let cfg = config(LoadPolicy::DropInvalid);

        let mut session = Session::from_config(&cfg).unwrap();
        let bed = catalog.lookup("garden_bed").unwrap();
        let cutter = catalog.lookup("stone_cutter").unwrap();
        session.place(cutter, 3, 0, Rotation::Deg90).unwrap();
        session.place(bed, 0, 0, Rotation::Deg0).unwrap();
        save(&session, &mut TomlFileStore::new(&path)).unwrap();

        let reopened = open(&cfg, &catalog, &TomlFileStore::new(&path)).unwrap();
        assert_eq!(reopened.session.records(), session.records());
        assert_eq!(reopened.session.occupied_cells().len(), session.occupied_cells().len());
    }
}
