use super::error::EngineError;
use super::session::Session;
use crate::core::models::ids::InstanceId;
use crate::core::models::instance::{PlacedInstance, PlacementRecord};
use crate::core::models::piece::{PieceType, Rotation};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A session shared across threads with a single-writer discipline.
///
/// Validation and queries take the read lock and may run concurrently against a
/// consistent state. Every mutation takes the write lock, so mutations are serialized
/// and each one sees the result of the previous.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Session>, EngineError> {
        self.inner
            .read()
            .map_err(|_| EngineError::Internal("session lock poisoned".to_string()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Session>, EngineError> {
        self.inner
            .write()
            .map_err(|_| EngineError::Internal("session lock poisoned".to_string()))
    }

    /// Runs a read-only closure against the session.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Result<R, EngineError> {
        Ok(f(&*self.read_guard()?))
    }

    /// Runs a mutating closure under the write lock.
    pub fn write<R>(
        &self,
        f: impl FnOnce(&mut Session) -> Result<R, EngineError>,
    ) -> Result<R, EngineError> {
        f(&mut *self.write_guard()?)
    }

    pub fn validate_placement(
        &self,
        piece: &PieceType,
        x: i32,
        y: i32,
        rotation: Rotation,
        exclude: Option<InstanceId>,
    ) -> Result<(), EngineError> {
        self.read(|s| s.validate_placement(piece, x, y, rotation, exclude))?
            .map_err(EngineError::from)
    }

    pub fn place(
        &self,
        piece: &Arc<PieceType>,
        x: i32,
        y: i32,
        rotation: Rotation,
    ) -> Result<PlacedInstance, EngineError> {
        self.write(|s| s.place(piece, x, y, rotation))
    }

    pub fn move_instance(
        &self,
        id: InstanceId,
        x: i32,
        y: i32,
        rotation: Rotation,
    ) -> Result<PlacedInstance, EngineError> {
        self.write(|s| s.move_instance(id, x, y, rotation))
    }

    pub fn rotate(&self, id: InstanceId) -> Result<PlacedInstance, EngineError> {
        self.write(|s| s.rotate(id))
    }

    pub fn remove(&self, id: InstanceId) -> Result<PlacedInstance, EngineError> {
        self.write(|s| s.remove(id))
    }

    pub fn records(&self) -> Result<Vec<PlacementRecord>, EngineError> {
        self.read(Session::records)
    }
}
