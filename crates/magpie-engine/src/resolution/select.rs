use std::time::Instant;

use magpie_common::descriptor::Descriptor;
use magpie_common::error::SurfaceError;
use magpie_common::protocol::{SelectBy, WaitState};

use crate::resolution::engine::{ActionResolver, first_match};
use crate::resolution::outcome::{Attempt, ResolutionOutcome};
use crate::surface::Surface;

/// Selection strategy chain, in mandatory order:
/// 1. positional index, only when the choice round-trips as an integer
/// 2. exact option value
/// 3. exact visible label
/// 4. open the control and click an option whose text contains the choice
///    (covers custom, non-native dropdown widgets)
pub(super) async fn chain<S: Surface + ?Sized>(
    resolver: &ActionResolver,
    surface: &mut S,
    target: &Descriptor,
    choice: &str,
    deadline: Instant,
) -> Result<ResolutionOutcome, SurfaceError> {
    let mut attempts = Vec::new();

    let visibility = resolver.timeouts().visibility();
    let located = resolver
        .bounded(deadline, async {
            surface.wait_for(target, WaitState::Visible, visibility).await?;
            first_match(surface, target).await
        })
        .await?;
    let control = match located {
        Ok(id) => id,
        Err(failure) => {
            return Ok(ResolutionOutcome::Exhausted {
                target: target.to_string(),
                attempts: vec![Attempt::new("locate-control", failure.to_string())],
            });
        }
    };

    // Option inventory. A custom widget without native options yields an
    // empty list, which sends strategies 1-3 straight to their failure arm.
    let options = match resolver.bounded(deadline, surface.options(control)).await? {
        Ok(options) => options,
        Err(_) => Vec::new(),
    };

    if let Some(index) = parse_index(choice) {
        if index < options.len() {
            match resolver
                .bounded(deadline, surface.select(control, &SelectBy::Index(index)))
                .await?
            {
                Ok(()) => {
                    tracing::info!(%target, index, "selected by index");
                    return Ok(ResolutionOutcome::resolved("index", Some(control)));
                }
                Err(failure) => attempts.push(Attempt::new("index", failure.to_string())),
            }
        } else {
            attempts.push(Attempt::new(
                "index",
                format!("index {index} out of range ({} options)", options.len()),
            ));
        }
    } else {
        attempts.push(Attempt::new("index", "choice is not a positional index"));
    }

    if options.iter().any(|o| o.value == choice) {
        match resolver
            .bounded(
                deadline,
                surface.select(control, &SelectBy::Value(choice.to_string())),
            )
            .await?
        {
            Ok(()) => {
                tracing::info!(%target, choice, "selected by value");
                return Ok(ResolutionOutcome::resolved("value", Some(control)));
            }
            Err(failure) => attempts.push(Attempt::new("value", failure.to_string())),
        }
    } else {
        attempts.push(Attempt::new(
            "value",
            format!("no option with value '{choice}'"),
        ));
    }

    if options.iter().any(|o| o.label == choice) {
        match resolver
            .bounded(
                deadline,
                surface.select(control, &SelectBy::Label(choice.to_string())),
            )
            .await?
        {
            Ok(()) => {
                tracing::info!(%target, choice, "selected by label");
                return Ok(ResolutionOutcome::resolved("label", Some(control)));
            }
            Err(failure) => attempts.push(Attempt::new("label", failure.to_string())),
        }
    } else {
        attempts.push(Attempt::new(
            "label",
            format!("no option with label '{choice}'"),
        ));
    }

    let clicked = resolver
        .bounded(deadline, async {
            surface.click(control).await?;
            let option = Descriptor::within(control, Descriptor::text_contains(choice));
            let id = first_match(surface, &option).await?;
            surface.click(id).await
        })
        .await?;
    match clicked {
        Ok(()) => {
            tracing::info!(%target, choice, "selected by clicking option text");
            return Ok(ResolutionOutcome::resolved("click-option-text", Some(control)));
        }
        Err(failure) => attempts.push(Attempt::new("click-option-text", failure.to_string())),
    }

    tracing::warn!(%target, choice, "selection strategies exhausted");
    Ok(ResolutionOutcome::Exhausted {
        target: target.to_string(),
        attempts,
    })
}

/// A positional index, only when the integer's string form round-trips
/// exactly. Guards values like `"007"` from being treated as index 7.
fn parse_index(choice: &str) -> Option<usize> {
    let index: usize = choice.parse().ok()?;
    (index.to_string() == choice).then_some(index)
}
