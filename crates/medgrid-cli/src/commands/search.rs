use anyhow::Result;

use medgrid_client::ApiClient;
use medgrid_core::ListParams;

use crate::cli::{OutputFormat, SearchArgs};
use crate::output;

pub async fn search(client: &ApiClient, args: &SearchArgs, format: OutputFormat) -> Result<()> {
    let mut params = ListParams::first_page();
    params.page = args.page;
    params.size = Some(args.size);

    let page = client.search(&args.query, &params).await?;
    output::print_patient_page(
        &page.patients,
        page.page.number,
        page.page.total_pages,
        page.page.total_elements,
        format,
    );
    Ok(())
}
