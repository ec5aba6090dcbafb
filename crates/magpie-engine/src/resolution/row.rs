//! Cascading delete of a located table row.
//!
//! The app renders its delete affordance inconsistently across tables: some
//! rows carry an action menu, some a bare delete button, some only a link
//! into a detail view. The chain tries each shape in turn; every presence
//! probe tolerates zero matches, and only an unexpected surface failure is
//! a hard error.

use std::time::{Duration, Instant};

use magpie_common::descriptor::Descriptor;
use magpie_common::error::SurfaceError;
use magpie_common::protocol::{ElementId, WaitState};

use crate::resolution::engine::{ActionResolver, first_match};
use crate::resolution::outcome::{Attempt, ResolutionOutcome};
use crate::surface::Surface;

fn action_menu_trigger(row: ElementId) -> Descriptor {
    Descriptor::within(
        row,
        Descriptor::any_of([
            Descriptor::css("button[class*=\"action\"], [class*=\"menu\"]"),
            Descriptor::role("button", "Actions"),
        ]),
    )
}

fn delete_control(row: ElementId) -> Descriptor {
    Descriptor::within(
        row,
        Descriptor::any_of([
            Descriptor::css("button[title*=\"Delete\"], [class*=\"delete\"]"),
            Descriptor::role("button", "Delete"),
        ]),
    )
}

/// A Delete/Remove entry in whatever surface the previous click exposed
/// (menu, modal, detail view), so this one is not row-scoped.
fn delete_entry() -> Descriptor {
    Descriptor::any_of([Descriptor::text("Delete"), Descriptor::text("Remove")])
}

fn first_row_control(row: ElementId) -> Descriptor {
    Descriptor::within(row, Descriptor::css("button"))
}

fn confirm_control() -> Descriptor {
    Descriptor::any_of([
        Descriptor::role("button", "Delete"),
        Descriptor::role("button", "Confirm"),
        Descriptor::role("button", "Yes"),
    ])
}

/// Run the cascading delete chain for an already-located row.
///
/// Exhaustion means the entity is presumed undeleted; the caller must not
/// treat it as a silent success.
pub async fn delete_row<S: Surface + ?Sized>(
    resolver: &ActionResolver,
    surface: &mut S,
    row: ElementId,
    budget: Duration,
) -> Result<ResolutionOutcome, SurfaceError> {
    let deadline = Instant::now() + budget;
    let mut attempts = Vec::new();

    // 1. Per-row action menu, then a delete entry in whatever it opened.
    match probe_click(resolver, surface, &action_menu_trigger(row), deadline).await? {
        Probe::Clicked => {
            tracing::info!(row, "opened row action menu");
            if let Probe::Clicked = probe_click(resolver, surface, &delete_entry(), deadline).await?
            {
                confirm_if_prompted(resolver, surface, deadline).await?;
                return Ok(ResolutionOutcome::resolved("action-menu", None));
            }
            attempts.push(Attempt::new(
                "action-menu",
                "menu opened but exposed no delete entry",
            ));
        }
        Probe::Absent(reason) => attempts.push(Attempt::new("action-menu", reason)),
    }

    // 2. Direct delete control in the row.
    match probe_click(resolver, surface, &delete_control(row), deadline).await? {
        Probe::Clicked => {
            confirm_if_prompted(resolver, surface, deadline).await?;
            return Ok(ResolutionOutcome::resolved("delete-control", None));
        }
        Probe::Absent(reason) => attempts.push(Attempt::new("delete-control", reason)),
    }

    // 3. The row's first clickable control, presumed to open a detail
    //    surface that carries a delete action.
    match probe_click(resolver, surface, &first_row_control(row), deadline).await? {
        Probe::Clicked => match probe_click(resolver, surface, &delete_entry(), deadline).await? {
            Probe::Clicked => {
                confirm_if_prompted(resolver, surface, deadline).await?;
                return Ok(ResolutionOutcome::resolved("first-control", None));
            }
            Probe::Absent(reason) => attempts.push(Attempt::new(
                "first-control",
                format!("opened a detail surface but {reason}"),
            )),
        },
        Probe::Absent(reason) => attempts.push(Attempt::new("first-control", reason)),
    }

    tracing::warn!(row, "delete strategies exhausted; entity presumed undeleted");
    Ok(ResolutionOutcome::Exhausted {
        target: format!("row #{row}"),
        attempts,
    })
}

enum Probe {
    Clicked,
    Absent(String),
}

/// Click the first match of a descriptor if anything matches at all.
///
/// Zero matches is "this strategy does not apply", not an error.
async fn probe_click<S: Surface + ?Sized>(
    resolver: &ActionResolver,
    surface: &mut S,
    descriptor: &Descriptor,
    deadline: Instant,
) -> Result<Probe, SurfaceError> {
    let attempt = resolver
        .bounded(deadline, async {
            if surface.count(descriptor).await? == 0 {
                return Err(SurfaceError::NoMatch(descriptor.to_string()));
            }
            let id = first_match(surface, descriptor).await?;
            surface.click(id).await
        })
        .await?;

    match attempt {
        Ok(()) => Ok(Probe::Clicked),
        Err(failure) => Ok(Probe::Absent(failure.to_string())),
    }
}

/// Bounded probe for a confirmation control after a delete click; its
/// absence is ordinary.
async fn confirm_if_prompted<S: Surface + ?Sized>(
    resolver: &ActionResolver,
    surface: &mut S,
    deadline: Instant,
) -> Result<(), SurfaceError> {
    let descriptor = confirm_control();
    let window = resolver.timeouts().confirm();
    let attempt = resolver
        .bounded(deadline, async {
            surface
                .wait_for(&descriptor, WaitState::Visible, window)
                .await?;
            let id = first_match(surface, &descriptor).await?;
            surface.click(id).await
        })
        .await?;

    match attempt {
        Ok(()) => tracing::info!("confirmed delete"),
        Err(_) => tracing::debug!("no delete confirmation prompted"),
    }
    Ok(())
}
