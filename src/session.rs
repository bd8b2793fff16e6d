//! The signed-in customer, persisted between runs.
//!
//! Screens receive the session through their context; nothing reads it from
//! a global.

use crate::api::models::Id;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "contato")]
    pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    customer: Option<Customer>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_customer(customer: Customer) -> Self {
        Self {
            customer: Some(customer),
        }
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.customer.is_some()
    }

    /// Load the session file. A missing file means nobody is signed in.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No session file at {:?}", path);
            return Ok(Self::anonymous());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {:?}", path))?;
        let customer: Customer = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {:?}", path))?;
        Ok(Self::with_customer(customer))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let Some(customer) = &self.customer else {
            return Self::clear(path);
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content =
            serde_json::to_string_pretty(customer).context("Failed to serialize session")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write session file: {:?}", path))?;
        info!("Signed in as {}", customer.name);
        Ok(())
    }

    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove session file: {:?}", path))?;
            info!("Signed out");
        }
        Ok(())
    }
}
