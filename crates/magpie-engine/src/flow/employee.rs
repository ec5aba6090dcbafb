//! Employee creation and deletion sequences.
//!
//! The creation sequence drives the employee form from a field-named
//! record through the resolver; a selection that exhausts its chain is
//! reported but does not abort the sequence. After submission the outcome
//! is classified before any cleanup is armed: a duplicate was not newly
//! created, so it must not be deleted by this scenario.

use std::time::Duration;
use thiserror::Error;

use magpie_common::descriptor::Descriptor;
use magpie_common::error::SurfaceError;
use magpie_common::protocol::WaitState;
use magpie_common::record::Record;

use crate::action::ActionDescriptor;
use crate::config::SuiteConfig;
use crate::report::ReportSink;
use crate::resolution::{ActionResolver, ResolutionOutcome, row};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Input,
    Select,
}

/// The employee form, keyed by record field name. Selects go through the
/// full fallback chain; inputs are plain fills.
const FORM_FIELDS: &[(&str, &str, Control)] = &[
    ("firstName", "input[name='firstName']", Control::Input),
    ("lastName", "input[name='lastName']", Control::Input),
    ("empId", "#employeeID", Control::Input),
    ("email", "input[name='email']", Control::Input),
    ("role", "#role", Control::Select),
    ("password", "input[name='password']", Control::Input),
    ("dob", "input[name='dob']", Control::Input),
    ("joinDate", "input[name='joiningDate']", Control::Input),
    ("degree", "#qualifications", Control::Select),
    ("dept", "input[name='department']", Control::Input),
    ("gender", "#gender", Control::Select),
    ("mobile", "input[name='mobileNumber']", Control::Input),
    ("bloodGroup", "#bloodGroup", Control::Select),
    ("designation", "input[name='designation']", Control::Input),
    ("salary", "#salary", Control::Input),
    ("location", "input[name='location']", Control::Input),
    ("reporting", "#reportingTo", Control::Select),
];

fn submit_candidates() -> Vec<Descriptor> {
    vec![
        Descriptor::role("button", "Add"),
        Descriptor::css("button[type='submit']"),
    ]
}

/// Classification of a creation submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationOutcome {
    Created,
    /// The application reported the entity already exists. Not an error;
    /// it suppresses arming.
    Duplicate,
}

/// Bounded existence probe that classifies a submission as duplicate.
///
/// The marker heuristic depends on the app's markup, so the descriptor and
/// probe window stay pluggable per environment and per test.
#[derive(Debug, Clone)]
pub struct DuplicateClassifier {
    descriptor: Descriptor,
    probe: Duration,
}

impl DuplicateClassifier {
    pub fn new(descriptor: Descriptor, probe: Duration) -> Self {
        Self { descriptor, probe }
    }

    pub fn from_config(config: &SuiteConfig) -> Self {
        let markers = &config.duplicate_markers;
        let candidates = markers
            .selectors
            .iter()
            .map(Descriptor::css)
            .chain(markers.text.iter().map(Descriptor::text_contains));
        Self::new(
            Descriptor::any_of(candidates),
            config.timeouts.duplicate_probe(),
        )
    }

    pub async fn classify<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> Result<CreationOutcome, SurfaceError> {
        match surface
            .wait_for(&self.descriptor, WaitState::Visible, self.probe)
            .await
        {
            Ok(()) => Ok(CreationOutcome::Duplicate),
            Err(e) if e.is_definitive() => Ok(CreationOutcome::Created),
            Err(e) => Err(e),
        }
    }
}

/// Drive the employee form from a record, submit, and classify the outcome.
///
/// Exhausted sub-steps are attached to the report and the sequence
/// continues; only a hard surface failure aborts.
pub async fn create_employee<S: Surface + ?Sized>(
    resolver: &ActionResolver,
    surface: &mut S,
    record: &Record,
    classifier: &DuplicateClassifier,
    report: &mut dyn ReportSink,
    budget: Duration,
) -> Result<CreationOutcome, SurfaceError> {
    for (field, selector, control) in FORM_FIELDS {
        let Some(value) = record.get(field) else {
            continue;
        };
        let target = Descriptor::css(*selector);
        let action = match control {
            Control::Input => ActionDescriptor::Fill {
                target,
                value: value.to_string(),
            },
            Control::Select => ActionDescriptor::SelectOption {
                target,
                choice: value.to_string(),
            },
        };
        let outcome = resolver.resolve(&action, surface, budget).await?;
        if let ResolutionOutcome::Exhausted { .. } = outcome {
            report.message(&format!("{field}: {outcome}"));
        }
    }

    let submit = resolver
        .resolve(
            &ActionDescriptor::ClickFirstMatch {
                candidates: submit_candidates(),
            },
            surface,
            budget,
        )
        .await?;
    if !submit.is_resolved() {
        report.message(&format!("submit: {submit}"));
    }

    let outcome = classifier.classify(surface).await?;
    if outcome == CreationOutcome::Duplicate {
        // Dismiss the toast so the surface is usable for the next step.
        if let Err(e) = surface.press_key("Escape").await {
            tracing::debug!(error = %e, "could not dismiss duplicate toast");
        }
        let id = record.get("empId").unwrap_or("?");
        tracing::info!(id, "employee already exists; creation not armed");
        report.message(&format!("employee already exists: {id}"));
    }
    Ok(outcome)
}

#[derive(Debug, Error)]
pub enum CleanupError {
    /// Every delete strategy failed. Callers must not assume the entity is
    /// gone.
    #[error("delete strategies exhausted; employee '{0}' presumed undeleted")]
    PresumedUndeleted(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Find the employee's row by id and run the cascading delete chain.
///
/// A missing row is a skip, not a failure: the entity is already gone or
/// was never created.
pub async fn delete_employee<S: Surface + ?Sized>(
    resolver: &ActionResolver,
    surface: &mut S,
    config: &SuiteConfig,
    id: &str,
) -> Result<(), CleanupError> {
    tracing::info!(id, "deleting employee");
    surface.navigate(&config.employees_path).await?;

    let budget = config.timeouts.budget();
    let search = ActionDescriptor::LocateRowByText {
        table: Descriptor::css("table"),
        key: id.to_string(),
    };
    match resolver.resolve(&search, surface, budget).await? {
        ResolutionOutcome::Resolved {
            element: Some(found),
            ..
        } => match row::delete_row(resolver, surface, found, budget).await? {
            ResolutionOutcome::Resolved { strategy, .. } => {
                tracing::info!(id, strategy, "deleted employee");
                Ok(())
            }
            _ => Err(CleanupError::PresumedUndeleted(id.to_string())),
        },
        ResolutionOutcome::NotFound => {
            tracing::info!(id, "employee not in list; delete skipped");
            Ok(())
        }
        _ => Err(CleanupError::PresumedUndeleted(id.to_string())),
    }
}
