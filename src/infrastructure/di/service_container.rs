//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::FilterService;
use crate::config::Settings;
use crate::infrastructure::traits::{DirectoryTreeSource, ErrorReporter, TracingReporter};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Directory-backed tree source (kept concrete for listing)
    pub source: Arc<DirectoryTreeSource>,

    /// Failure sink for the application boundary
    pub reporter: Arc<dyn ErrorReporter>,

    /// Pruning query service
    pub filter: FilterService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_reporter(settings, Arc::new(TracingReporter))
    }

    /// Create a service container with a custom reporter (for testing).
    pub fn with_reporter(settings: Settings, reporter: Arc<dyn ErrorReporter>) -> Self {
        let settings = Arc::new(settings);
        let source = Arc::new(DirectoryTreeSource::new(&settings.source_dir));
        let filter = FilterService::new(source.clone());

        Self {
            settings,
            source,
            reporter,
            filter,
        }
    }
}
