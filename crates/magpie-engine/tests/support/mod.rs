//! Mock surface shared by the integration tests.
//!
//! The mock resolves descriptors against a registered fake page, records
//! every primitive call, and lets tests force select failures or reveal new
//! elements when something is clicked.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use magpie_common::descriptor::Descriptor;
use magpie_common::error::SurfaceError;
use magpie_common::protocol::{ElementId, SelectBy, SelectOptionInfo, WaitState};
use magpie_engine::report::{RecordingSink, ReportSink};
use magpie_engine::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Locate(String),
    Click(ElementId),
    Fill(ElementId, String),
    Select(ElementId, SelectBy),
    WaitFor(String, WaitState),
    Count(String),
    PressKey(String),
    Navigate(String),
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<ElementId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Click(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn selects(&self) -> Vec<SelectBy> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Select(_, by) => Some(by),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Navigate(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn pressed_keys(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::PressKey(key) => Some(key),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MockSurface {
    log: CallLog,
    /// Rendered descriptor -> page-level matches.
    page: HashMap<String, Vec<ElementId>>,
    /// (scope, rendered descriptor) -> scoped matches.
    children: HashMap<(ElementId, String), Vec<ElementId>>,
    options: HashMap<ElementId, Vec<SelectOptionInfo>>,
    /// Select requests forced to fail with NoMatch.
    rejected_selects: Vec<SelectBy>,
    /// Page entries that appear once the element is clicked.
    reveal_on_click: HashMap<ElementId, Vec<(String, Vec<ElementId>)>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn add(&mut self, descriptor: &Descriptor, ids: Vec<ElementId>) {
        self.page.insert(descriptor.to_string(), ids);
    }

    pub fn child(&mut self, scope: ElementId, descriptor: &Descriptor, ids: Vec<ElementId>) {
        self.children.insert((scope, descriptor.to_string()), ids);
    }

    pub fn with_options(&mut self, id: ElementId, options: Vec<SelectOptionInfo>) {
        self.options.insert(id, options);
    }

    pub fn reject_select(&mut self, by: SelectBy) {
        self.rejected_selects.push(by);
    }

    pub fn reveal_on_click(&mut self, id: ElementId, descriptor: &Descriptor, ids: Vec<ElementId>) {
        self.reveal_on_click
            .entry(id)
            .or_default()
            .push((descriptor.to_string(), ids));
    }

    fn lookup(&self, descriptor: &Descriptor) -> Vec<ElementId> {
        match descriptor {
            Descriptor::AnyOf(candidates) => candidates
                .iter()
                .map(|c| self.lookup(c))
                .find(|ids| !ids.is_empty())
                .unwrap_or_default(),
            Descriptor::Within { scope, target } => self.lookup_within(*scope, target),
            other => self.page.get(&other.to_string()).cloned().unwrap_or_default(),
        }
    }

    fn lookup_within(&self, scope: ElementId, target: &Descriptor) -> Vec<ElementId> {
        match target {
            Descriptor::AnyOf(candidates) => candidates
                .iter()
                .map(|c| self.lookup_within(scope, c))
                .find(|ids| !ids.is_empty())
                .unwrap_or_default(),
            other => self
                .children
                .get(&(scope, other.to_string()))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Surface for MockSurface {
    async fn locate(&mut self, descriptor: &Descriptor) -> Result<Vec<ElementId>, SurfaceError> {
        self.log.push(Call::Locate(descriptor.to_string()));
        Ok(self.lookup(descriptor))
    }

    async fn click(&mut self, id: ElementId) -> Result<(), SurfaceError> {
        self.log.push(Call::Click(id));
        if let Some(revealed) = self.reveal_on_click.remove(&id) {
            for (key, ids) in revealed {
                self.page.insert(key, ids);
            }
        }
        Ok(())
    }

    async fn fill(&mut self, id: ElementId, text: &str) -> Result<(), SurfaceError> {
        self.log.push(Call::Fill(id, text.to_string()));
        Ok(())
    }

    async fn options(&mut self, id: ElementId) -> Result<Vec<SelectOptionInfo>, SurfaceError> {
        self.options
            .get(&id)
            .cloned()
            .ok_or_else(|| SurfaceError::NoMatch(format!("element #{id} has no option list")))
    }

    async fn select(&mut self, id: ElementId, by: &SelectBy) -> Result<(), SurfaceError> {
        self.log.push(Call::Select(id, by.clone()));
        if self.rejected_selects.contains(by) {
            return Err(SurfaceError::NoMatch(format!("rejected select by {by}")));
        }
        let options = self.options.get(&id).cloned().unwrap_or_default();
        let matched = match by {
            SelectBy::Index(i) => *i < options.len(),
            SelectBy::Value(v) => options.iter().any(|o| &o.value == v),
            SelectBy::Label(l) => options.iter().any(|o| &o.label == l),
        };
        if matched {
            Ok(())
        } else {
            Err(SurfaceError::NoMatch(format!("no option by {by}")))
        }
    }

    async fn wait_for(
        &mut self,
        descriptor: &Descriptor,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), SurfaceError> {
        self.log.push(Call::WaitFor(descriptor.to_string(), state));
        let present = !self.lookup(descriptor).is_empty();
        let satisfied = match state {
            WaitState::Visible => present,
            WaitState::Hidden => !present,
        };
        if satisfied {
            Ok(())
        } else {
            Err(SurfaceError::Timeout {
                waited_ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn count(&mut self, descriptor: &Descriptor) -> Result<usize, SurfaceError> {
        self.log.push(Call::Count(descriptor.to_string()));
        Ok(self.lookup(descriptor).len())
    }

    async fn press_key(&mut self, key: &str) -> Result<(), SurfaceError> {
        self.log.push(Call::PressKey(key.to_string()));
        Ok(())
    }

    async fn navigate(&mut self, path: &str) -> Result<(), SurfaceError> {
        self.log.push(Call::Navigate(path.to_string()));
        Ok(())
    }
}

/// Recording sink the test can keep a handle on after the context is
/// consumed.
#[derive(Debug, Clone, Default)]
pub struct SharedSink(Arc<Mutex<RecordingSink>>);

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().messages.clone()
    }

    pub fn parameters(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().parameters.clone()
    }
}

impl ReportSink for SharedSink {
    fn parameter(&mut self, name: &str, value: &str) {
        self.0.lock().unwrap().parameter(name, value);
    }

    fn message(&mut self, text: &str) {
        self.0.lock().unwrap().message(text);
    }
}
