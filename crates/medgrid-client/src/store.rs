//! State container for the patient table and detail views.
//!
//! The store owns a page of patients, one selected patient, and the
//! pagination, sort, and filter state that produced them. Actions issue a
//! request, reshape the envelope, and overwrite state wholesale; on any
//! failure the error is stored and the cleared data stays cleared. There is
//! no retry, no debounce, and no caching. Overlapping fetches cannot be
//! expressed: every action takes `&mut self`, so "last write wins" holds
//! trivially.

use tracing::warn;
use uuid::Uuid;

use medgrid_core::query::{DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD};
use medgrid_core::{FilterState, ListParams, Patient, Sort, SortOrder};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Parameters for one table fetch.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub page: u64,
    pub size: u64,
    pub sort: Option<Sort>,
    pub filters: FilterState,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Some(Sort::default()),
            filters: FilterState::default(),
        }
    }
}

/// A grid page-change event: target page, rows per page, and the sort and
/// filter state in effect when the user paged.
#[derive(Debug, Clone)]
pub struct PageEvent {
    pub page: u64,
    pub rows: u64,
    pub sort: Option<Sort>,
    pub filters: FilterState,
}

/// A grid sort-change event. Sorting returns to the first page.
#[derive(Debug, Clone)]
pub struct SortEvent {
    pub sort: Sort,
    pub filters: FilterState,
}

/// A grid filter-change event. Filtering returns to the first page.
#[derive(Debug, Clone)]
pub struct FilterEvent {
    pub sort: Option<Sort>,
    pub filters: FilterState,
}

/// The patient table/detail state and its fetch actions.
pub struct PatientStore {
    client: ApiClient,
    /// The current page of patients; replaced wholesale on every list fetch.
    pub patients: Vec<Patient>,
    /// The selected patient; replaced wholesale on every detail fetch.
    pub patient: Option<Patient>,
    pub loading: bool,
    /// The most recent failure. Never cleared by a later success; the UI
    /// decides when a stale error stops being interesting.
    pub error: Option<ClientError>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_records: u64,
    pub total_pages: u64,
    pub sort_field: String,
    pub sort_order: SortOrder,
    pub filters: FilterState,
}

impl PatientStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            patients: Vec::new(),
            patient: None,
            loading: false,
            error: None,
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_records: 0,
            total_pages: 0,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::Asc,
            filters: FilterState::default(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn current_sort(&self) -> Sort {
        Sort::new(self.sort_field.clone(), self.sort_order)
    }

    /// Fetch a page of patients and replace the table state with the result.
    pub async fn fetch_patients(&mut self, params: FetchParams) {
        self.patients.clear();
        self.loading = true;

        let list_params = ListParams {
            page: params.page,
            size: Some(params.size),
            sort: params.sort.clone(),
            filters: params.filters,
        };

        match self.client.list(&list_params).await {
            Ok(page) => {
                self.patients = page.patients;
                self.page_number = page.page.number;
                self.page_size = page.page.size;
                self.total_records = page.page.total_elements;
                self.total_pages = page.page.total_pages;
                if let Some(sort) = params.sort {
                    self.sort_field = sort.field;
                    self.sort_order = sort.order;
                }
            }
            Err(error) => {
                warn!(%error, "patient page fetch failed");
                self.error = Some(error);
            }
        }

        self.loading = false;
    }

    /// Fetch one patient and replace the selection with the result.
    pub async fn fetch_patient(&mut self, id: Uuid) {
        self.patient = None;
        self.loading = true;

        match self.client.get(id).await {
            Ok(patient) => self.patient = Some(patient),
            Err(error) => {
                warn!(%error, %id, "patient fetch failed");
                self.error = Some(error);
            }
        }

        self.loading = false;
    }

    /// Grid page-change adapter.
    pub async fn on_page(&mut self, event: PageEvent) {
        self.fetch_patients(FetchParams {
            page: event.page,
            size: event.rows,
            sort: event.sort,
            filters: event.filters,
        })
        .await;
    }

    /// Grid sort-change adapter; resets to the first page.
    pub async fn on_sort(&mut self, event: SortEvent) {
        self.fetch_patients(FetchParams {
            page: 0,
            size: self.page_size,
            sort: Some(event.sort),
            filters: event.filters,
        })
        .await;
    }

    /// Grid filter-change adapter; adopts the new filter state and resets to
    /// the first page.
    pub async fn on_filter(&mut self, event: FilterEvent) {
        self.filters = event.filters.clone();
        self.fetch_patients(FetchParams {
            page: 0,
            size: self.page_size,
            sort: event.sort,
            filters: event.filters,
        })
        .await;
    }

    /// Reset filters to the fixed default shape and re-fetch the first page
    /// with the current sort.
    pub async fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        let sort = self.current_sort();
        let filters = self.filters.clone();
        self.fetch_patients(FetchParams {
            page: 0,
            size: self.page_size,
            sort: Some(sort),
            filters,
        })
        .await;
    }
}
