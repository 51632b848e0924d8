use anyhow::Result;

use medgrid_client::{ApiClient, FetchParams, PatientStore};
use medgrid_core::{FilterState, MatchMode, Sort};

use crate::cli::{ListArgs, OutputFormat};
use crate::output;

/// The patient table view: build filter state from the flags, run one store
/// fetch, and render the resulting page.
pub async fn list(client: ApiClient, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let mut filters = FilterState::default();
    for raw in &args.filters {
        let (field, mode, value) = parse_filter(raw)?;
        filters.set_constraint(field, mode, value);
    }
    if let Some(query) = &args.query {
        filters.set_global(query);
    }

    let mut store = PatientStore::new(client);
    store
        .fetch_patients(FetchParams {
            page: args.page,
            size: args.size,
            sort: Some(Sort::new(args.sort.clone(), args.order.into())),
            filters,
        })
        .await;

    if let Some(error) = store.error {
        return Err(error.into());
    }

    output::print_patient_page(
        &store.patients,
        store.page_number,
        store.total_pages,
        store.total_records,
        format,
    );
    Ok(())
}

fn parse_filter(raw: &str) -> Result<(String, MatchMode, String)> {
    let parts: Vec<&str> = raw.splitn(3, ':').collect();
    if parts.len() != 3 || parts[0].is_empty() || parts[2].is_empty() {
        anyhow::bail!("Invalid filter \"{raw}\". Expected format: field:matchMode:value");
    }
    let mode: MatchMode = parts[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid filter \"{raw}\": unknown match mode \"{}\"", parts[1]))?;
    Ok((parts[0].to_string(), mode, parts[2].to_string()))
}
