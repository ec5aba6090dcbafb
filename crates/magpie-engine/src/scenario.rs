//! Scenario-scoped state and the unconditional completion hook.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use magpie_common::error::SurfaceError;

use crate::config::SuiteConfig;
use crate::flow::employee;
use crate::report::ReportSink;
use crate::resolution::ActionResolver;
use crate::surface::Surface;
use crate::tracker::{CleanupOutcome, CleanupTracker};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Everything one scenario owns: its surface, its tracker, its resolver,
/// and its report sink.
///
/// One instance per scenario, never shared, so the tracked entity cannot
/// leak into a later scenario under parallel execution.
pub struct ScenarioContext<S: Surface> {
    pub surface: S,
    pub tracker: CleanupTracker,
    pub resolver: ActionResolver,
    pub report: Box<dyn ReportSink>,
    pub config: Arc<SuiteConfig>,
}

impl<S: Surface> ScenarioContext<S> {
    pub fn new(surface: S, config: Arc<SuiteConfig>, report: Box<dyn ReportSink>) -> Self {
        Self {
            resolver: ActionResolver::new(config.timeouts.clone()),
            surface,
            tracker: CleanupTracker::new(),
            report,
            config,
        }
    }
}

/// Boxed body future, borrowing the scenario's context.
pub type ScenarioBody<'a> =
    Pin<Box<dyn Future<Output = Result<(), ScenarioError>> + Send + 'a>>;

/// Run a scenario body, then unconditionally run the completion hook.
///
/// The context stays owned here and the body only borrows it, so the hook
/// always gets to run: after the body returns, fails, or panics mid-flight,
/// it performs the armed entity's delete sequence and disarms the tracker.
/// A caught panic is re-raised once the hook has finished; the hook's own
/// failure is reported but never changes the scenario result.
pub async fn run_scenario<S, F>(
    name: &str,
    mut ctx: ScenarioContext<S>,
    body: F,
) -> Result<(), ScenarioError>
where
    S: Surface,
    F: for<'a> FnOnce(&'a mut ScenarioContext<S>) -> ScenarioBody<'a>,
{
    tracing::info!(scenario = name, "starting scenario");
    let body_result = AssertUnwindSafe(body(&mut ctx)).catch_unwind().await;
    match &body_result {
        Ok(Err(e)) => tracing::warn!(scenario = name, error = %e, "scenario body failed"),
        Err(_) => tracing::error!(scenario = name, "scenario body panicked"),
        Ok(Ok(())) => {}
    }

    let ScenarioContext {
        surface,
        tracker,
        resolver,
        report,
        config,
    } = &mut ctx;
    let resolver: &ActionResolver = &*resolver;
    let config: &SuiteConfig = &**config;
    let outcome = tracker
        .run_cleanup(|entity| async move {
            employee::delete_employee(resolver, surface, config, &entity.id).await
        })
        .await;

    match outcome {
        CleanupOutcome::Deleted => report.message("cleanup deleted tracked employee"),
        CleanupOutcome::Failed(reason) => report.message(&format!("cleanup failed: {reason}")),
        CleanupOutcome::Skipped => {}
    }

    match body_result {
        Ok(result) => {
            tracing::info!(scenario = name, ok = result.is_ok(), "scenario finished");
            result
        }
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// "Run once before all scenarios in a group" hook point.
///
/// The first caller loads; everyone after shares the loaded value. Used to
/// bulk-load external test-data sources such as a row file.
pub struct GroupSetup<T> {
    cell: tokio::sync::OnceCell<T>,
}

impl<T> GroupSetup<T> {
    pub const fn new() -> Self {
        Self {
            cell: tokio::sync::OnceCell::const_new(),
        }
    }

    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell.get_or_try_init(load).await
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<T> Default for GroupSetup<T> {
    fn default() -> Self {
        Self::new()
    }
}
