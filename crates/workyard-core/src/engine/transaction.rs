use super::error::EngineError;
use super::ghost::GhostPlacement;
use super::session::Session;
use crate::core::models::grid::Grid;
use crate::core::models::ids::InstanceId;
use crate::core::models::instance::PlacedInstance;
use slotmap::SlotMap;
use tracing::debug;

struct Snapshot {
    grid: Grid,
    instances: SlotMap<InstanceId, PlacedInstance>,
    order: Vec<InstanceId>,
    ghost: Option<GhostPlacement>,
}

impl Snapshot {
    fn capture(session: &Session) -> Self {
        Self {
            grid: session.grid.clone(),
            instances: session.instances.clone(),
            order: session.order.clone(),
            ghost: session.ghost.clone(),
        }
    }

    fn restore(self, session: &mut Session) {
        session.grid = self.grid;
        session.instances = self.instances;
        session.order = self.order;
        session.ghost = self.ghost;
    }
}

impl Session {
    /// Runs `action` against the session and rolls every change back if it fails.
    ///
    /// Multi-step edits built from the single-step operations become all-or-nothing.
    pub fn transaction<F, R>(&mut self, action: F) -> Result<R, EngineError>
    where
        F: FnOnce(&mut Self) -> Result<R, EngineError>,
    {
        // 1. Record the state before the action.
        let snapshot = Snapshot::capture(self);

        // 2. Execute the action.
        match action(self) {
            Ok(result) => Ok(result),
            // 3. On failure, put the recorded state back.
            Err(e) => {
                debug!("Rolling back session after failed transaction: {}", e);
                snapshot.restore(self);
                Err(e)
            }
        }
    }
}
