//! Application composition.

use docsource_domain::{EntryKind, SourceDescriptor};

use crate::collections::EntryCollection;
use crate::infrastructure::ports::HostServices;

/// Main application state.
///
/// Holds the injected host services and hands out entry collections.
#[derive(Clone)]
pub struct App {
    services: HostServices,
}

impl App {
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Entry collection for `kind` at `source`. Resolution starts immediately.
    pub fn collection(&self, kind: EntryKind, source: SourceDescriptor) -> EntryCollection {
        EntryCollection::new(self.services.clone(), kind, source)
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }
}
