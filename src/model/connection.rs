use serde::{Deserialize, Serialize};

/// Sequential data flow between two modules of the main chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionModel {
    pub from: String,
    pub to: String,
}

impl ConnectionModel {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
