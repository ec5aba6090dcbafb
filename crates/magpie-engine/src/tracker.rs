use std::fmt;
use std::future::Future;

/// A test-created domain entity pending cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntity {
    pub kind: EntityKind,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Employee,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Employee => write!(f, "employee"),
        }
    }
}

/// What the cleanup hook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Nothing was armed; no delete call was issued.
    Skipped,
    Deleted,
    /// The delete call failed; the entity may remain in the application.
    Failed(String),
}

/// Tracks the one entity a scenario created, and guarantees a best-effort,
/// idempotent cleanup call is issued at most once.
///
/// One tracker lives inside each scenario's context; it is never shared, so
/// a later scenario can never observe a stale id.
#[derive(Debug, Default)]
pub struct CleanupTracker {
    armed: Option<TrackedEntity>,
}

impl CleanupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entity this scenario must clean up.
    ///
    /// Panics if something is already armed: a second creation without an
    /// intervening disarm is a caller contract bug, not a runtime condition
    /// to recover from.
    pub fn arm(&mut self, kind: EntityKind, id: impl Into<String>) {
        let id = id.into();
        if let Some(prev) = &self.armed {
            panic!(
                "cleanup already armed for {} '{}'; disarm before arming '{}'",
                prev.kind, prev.id, id
            );
        }
        tracing::info!(%kind, id, "armed cleanup");
        self.armed = Some(TrackedEntity { kind, id });
    }

    pub fn armed_id(&self) -> Option<&str> {
        self.armed.as_ref().map(|e| e.id.as_str())
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Clear the tracked entity. Idempotent.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Invoke `delete` for the armed entity, if any.
    ///
    /// The tracker disarms *before* the delete future runs, so the entity
    /// is handed out at most once even if the future fails, panics, or is
    /// cancelled mid-flight. A failed delete is logged and reported as
    /// `Failed`, never propagated: a test must not fail because cleanup
    /// failed, but stray data has to be findable in the log.
    pub async fn run_cleanup<F, Fut, E>(&mut self, delete: F) -> CleanupOutcome
    where
        F: FnOnce(TrackedEntity) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        let Some(entity) = self.armed.take() else {
            return CleanupOutcome::Skipped;
        };
        let id = entity.id.clone();
        match delete(entity).await {
            Ok(()) => {
                tracing::info!(id, "cleanup deleted entity");
                CleanupOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "cleanup failed; entity may remain");
                CleanupOutcome::Failed(e.to_string())
            }
        }
    }
}
