//! Keyword-based service detection.

use std::collections::BTreeSet;

use tracing::trace;

use crate::{DetectorConfig, ServiceTag, config::ServiceKeywords};

/// Set of detected services, iterated in [`ServiceTag`] declaration order.
pub type ServiceSet = BTreeSet<ServiceTag>;

/// Finds the services an idea mentions.
///
/// Matching is a case-insensitive substring test; a service is either
/// implicated or not, there is no scoring.
#[derive(Debug, Clone)]
pub struct ServiceDetector {
    table: Vec<ServiceKeywords>,
}

impl ServiceDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            table: config.services.clone(),
        }
    }

    /// Returns `preselected` extended with every service whose keywords
    /// occur in `text`.
    pub fn detect(
        &self,
        text: &str,
        preselected: &ServiceSet,
    ) -> ServiceSet {
        let lowered = text.to_lowercase();
        let mut services = preselected.clone();

        for entry in &self.table {
            if let Some(keyword) = entry.keywords.iter().find(|k| lowered.contains(k.as_str())) {
                trace!(service = entry.tag.as_ref(), keyword = keyword.as_str(), "service keyword matched");
                services.insert(entry.tag);
            }
        }

        services
    }
}

impl Default for ServiceDetector {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}
