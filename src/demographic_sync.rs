use crate::storage::{self, CustomerDemographic};
use miette::{IntoDiagnostic, Result};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Demographic category definition from JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicDefinition {
    /// Category identifier (at most 10 characters)
    pub customer_type_id: String,
    /// Human-readable description
    #[serde(default)]
    pub customer_desc: Option<String>,
    /// Customers to link to this category
    #[serde(default)]
    pub customers: Vec<String>,
}

/// Root structure of the demographics JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicsFile {
    pub demographics: Vec<DemographicDefinition>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub linked: usize,
}

/// Sync demographic categories from a JSON file to the database (idempotent).
///
/// Links are only ever added; customers missing from the file keep their
/// existing links.
pub async fn sync_demographics_from_file(
    db: &DatabaseConnection,
    file_path: &Path,
) -> Result<SyncSummary> {
    tracing::info!("Loading demographics from {}", file_path.display());

    let content = fs::read_to_string(file_path)
        .into_diagnostic()
        .map_err(|e| {
            miette::miette!(
                "Failed to read demographics file at '{}': {}",
                file_path.display(),
                e
            )
        })?;

    let file: DemographicsFile = serde_json::from_str(&content)
        .into_diagnostic()
        .map_err(|e| {
            miette::miette!(
                "Failed to parse demographics JSON file: {}\n\nExpected format:\n{{\n  \"demographics\": [\n    {{\n      \"customer_type_id\": \"FAMILY\",\n      \"customer_desc\": \"Households with children\",\n      \"customers\": [\"ALFKI\"]\n    }}\n  ]\n}}",
                e
            )
        })?;

    tracing::info!("Found {} demographic(s) in file", file.demographics.len());

    let mut summary = SyncSummary::default();

    for def in &file.demographics {
        match sync_demographic(db, def).await? {
            SyncResult::Created => summary.created += 1,
            SyncResult::Updated => summary.updated += 1,
            SyncResult::Unchanged => summary.unchanged += 1,
        }
        summary.linked += sync_links(db, def).await?;
    }

    tracing::info!(
        "Demographic sync complete: {} created, {} updated, {} unchanged, {} customer link(s) added",
        summary.created,
        summary.updated,
        summary.unchanged,
        summary.linked
    );

    Ok(summary)
}

#[derive(Debug)]
enum SyncResult {
    Created,
    Updated,
    Unchanged,
}

async fn sync_demographic(
    db: &DatabaseConnection,
    def: &DemographicDefinition,
) -> Result<SyncResult> {
    let existing = storage::get_demographic(db, &def.customer_type_id)
        .await
        .into_diagnostic()?;

    match existing {
        None => {
            tracing::info!("Creating demographic: {}", def.customer_type_id);
            let mut record = CustomerDemographic::with_id(def.customer_type_id.as_str());
            record.set_customer_desc(def.customer_desc.clone());
            storage::create_demographic(db, &record)
                .await
                .into_diagnostic()?;
            Ok(SyncResult::Created)
        }
        Some(existing) if existing.customer_desc() != def.customer_desc.as_deref() => {
            tracing::info!("Updating demographic: {}", def.customer_type_id);
            storage::update_demographic_desc(db, &def.customer_type_id, def.customer_desc.clone())
                .await
                .into_diagnostic()?;
            Ok(SyncResult::Updated)
        }
        Some(_) => Ok(SyncResult::Unchanged),
    }
}

async fn sync_links(db: &DatabaseConnection, def: &DemographicDefinition) -> Result<usize> {
    if def.customers.is_empty() {
        return Ok(0);
    }

    let existing: HashSet<String> = storage::get_demos_by_type(db, &def.customer_type_id)
        .await
        .into_diagnostic()?
        .into_iter()
        .map(|d| d.customer_id)
        .collect();

    let mut linked = 0;
    let mut seen = HashSet::new();
    for customer_id in &def.customers {
        if existing.contains(customer_id) || !seen.insert(customer_id) {
            continue;
        }
        storage::link_customer(db, customer_id, &def.customer_type_id)
            .await
            .into_diagnostic()?;
        linked += 1;
    }

    if linked > 0 {
        tracing::debug!(
            "Linked {} customer(s) to demographic {}",
            linked,
            def.customer_type_id
        );
    }

    Ok(linked)
}
