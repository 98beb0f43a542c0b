use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::fs;
use tracing::{info, warn};

use crate::types::Region;

/// Read-only set of regions and their fixes, in configuration order.
#[derive(Clone, Debug, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        let mut identifiers = HashSet::new();
        for region in &regions {
            if !identifiers.insert(region.identifier.as_str()) {
                bail!("Duplicate region identifier {}", region.identifier);
            }

            let mut fix_names = HashSet::new();
            for fix in &region.fixes {
                if !fix_names.insert(fix.name.as_str()) {
                    bail!(
                        "Duplicate fix {} in region {}",
                        fix.name,
                        region.identifier
                    );
                }
            }
        }

        if regions.is_empty() {
            warn!("Region catalog is empty; no snapshots will be generated");
        }

        Ok(Self { regions })
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("Invalid region catalog {}", path.display()))?;
        info!(
            "Loaded {} regions ({} fixes) from {}",
            catalog.regions.len(),
            catalog.fix_count(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let regions: Vec<Region> =
            serde_json::from_str(raw).context("Failed to parse region catalog JSON")?;
        Self::new(regions)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn fix_count(&self) -> usize {
        self.regions.iter().map(|region| region.fixes.len()).sum()
    }
}
