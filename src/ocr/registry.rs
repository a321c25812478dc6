//! Registry of vision models actually installed on the backend.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::backend::{InferenceBackend, OcrError};
use super::catalog::ModelCatalog;

/// A usable backend model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    /// Backend model identifier.
    pub name: String,
    /// Position in the candidate list (0 = most preferred).
    pub rank: usize,
    /// Upper bound for one extraction request.
    pub timeout: Duration,
}

/// Installed candidate models, in candidate-list order.
///
/// Computed once per session and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelHandle>,
}

impl ModelRegistry {
    /// Intersect the catalog's candidates with what the backend reports.
    ///
    /// Order follows the candidate list, not the backend's listing. An
    /// unreachable backend or an empty intersection is fatal.
    pub async fn discover(
        backend: &dyn InferenceBackend,
        catalog: &ModelCatalog,
    ) -> Result<Self, OcrError> {
        let installed = backend.list_models().await.map_err(|e| {
            warn!("Failed to list backend models: {}", e);
            OcrError::NoModelsAvailable(format!("backend unreachable ({})", e))
        })?;
        debug!("Backend reports {} installed models", installed.len());

        let registry = Self::from_installed(catalog, &installed);
        if registry.models.is_empty() {
            return Err(OcrError::NoModelsAvailable(format!(
                "none of [{}] are installed",
                catalog.candidates.join(", ")
            )));
        }

        info!("Available models: {}", registry.names().join(", "));
        Ok(registry)
    }

    /// Build a registry from an already known installed list.
    pub fn from_installed(catalog: &ModelCatalog, installed: &[String]) -> Self {
        let models = catalog
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, name)| installed.contains(name))
            .map(|(rank, name)| ModelHandle {
                name: name.clone(),
                rank,
                timeout: catalog.timeout_for(name),
            })
            .collect();
        Self { models }
    }

    pub fn available_models(&self) -> &[ModelHandle] {
        &self.models
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&ModelHandle> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// First installed model from `preferred`, else `fallback` applied to the list.
    fn first_of<'a>(
        &'a self,
        preferred: &[String],
        fallback: impl FnOnce(&'a [ModelHandle]) -> Option<&'a ModelHandle>,
    ) -> Option<&'a ModelHandle> {
        preferred
            .iter()
            .find_map(|name| self.get(name))
            .or_else(|| fallback(self.models.as_slice()))
    }

    /// Model for the primary extraction attempt.
    ///
    /// First installed entry of `ocr_priority`, defaulting to the
    /// highest-priority installed model.
    pub fn primary_ocr_model(&self, catalog: &ModelCatalog) -> Option<&ModelHandle> {
        self.first_of(&catalog.ocr_priority, |models| models.first())
    }

    /// Cheapest model for the classification probe.
    ///
    /// First installed entry of `fast_models`, defaulting to the
    /// lowest-priority installed model.
    pub fn fastest_model(&self, catalog: &ModelCatalog) -> Option<&ModelHandle> {
        self.first_of(&catalog.fast_models, |models| models.last())
    }
}
