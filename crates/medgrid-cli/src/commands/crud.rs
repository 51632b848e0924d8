use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use colored::Colorize;
use uuid::Uuid;

use medgrid_client::{ApiClient, PatientStore};
use medgrid_core::PatientRecord;

use crate::cli::OutputFormat;
use crate::output::{print_patient, print_success};

fn read_record(file: &Option<String>) -> Result<PatientRecord> {
    let content = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Invalid patient JSON")
}

/// The patient detail view, driven through the store.
pub async fn get(client: ApiClient, id: Uuid, format: OutputFormat) -> Result<()> {
    let mut store = PatientStore::new(client);
    store.fetch_patient(id).await;

    if let Some(error) = store.error {
        return Err(error.into());
    }
    let patient = store
        .patient
        .context("Server returned no patient record")?;
    print_patient(&patient, format);
    Ok(())
}

pub async fn create(client: &ApiClient, file: &Option<String>, format: OutputFormat) -> Result<()> {
    let record = read_record(file)?;
    let created = client.create(&record).await?;
    print_success(&format!(
        "Created patient {}",
        created.id.to_string().cyan()
    ));
    print_patient(&created, format);
    Ok(())
}

pub async fn update(
    client: &ApiClient,
    id: Uuid,
    file: &Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let record = read_record(file)?;
    let updated = client.update(id, &record).await?;
    print_success(&format!(
        "Updated patient {}",
        updated.id.to_string().cyan()
    ));
    print_patient(&updated, format);
    Ok(())
}

pub async fn delete(client: &ApiClient, id: Uuid) -> Result<()> {
    client.delete(id).await?;
    print_success(&format!("Deleted patient {}", id.to_string().cyan()));
    Ok(())
}
