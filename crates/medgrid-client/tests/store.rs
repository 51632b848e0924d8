use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medgrid_client::{ApiClient, FetchParams, FilterEvent, PageEvent, PatientStore, SortEvent};
use medgrid_core::{FilterState, MatchMode, Sort, SortOrder};

const PATIENT_ID: &str = "a6edc906-2f9f-5fb2-a373-efac406f0ef2";

fn patient_item(base: &str, id: &str, last: &str) -> serde_json::Value {
    json!({
        "firstName": "Ada",
        "lastName": last,
        "dateOfBirth": "1815-12-10",
        "medicalRecordNumber": "MRN-0001",
        "_links": { "self": { "href": format!("{base}/api/patient/{id}") } },
    })
}

fn envelope(
    base: &str,
    items: Vec<serde_json::Value>,
    number: u64,
    total_elements: u64,
    total_pages: u64,
) -> serde_json::Value {
    json!({
        "_embedded": { "patientModelList": items },
        "_links": { "self": { "href": format!("{base}/api/patient") } },
        "page": { "size": 20, "totalElements": total_elements, "totalPages": total_pages, "number": number },
    })
}

fn store_for(server: &MockServer) -> PatientStore {
    PatientStore::new(ApiClient::new(&server.uri()))
}

#[tokio::test]
async fn fetch_patients_mirrors_pagination_metadata() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/patient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            &base,
            vec![patient_item(&base, PATIENT_ID, "Lovelace")],
            0,
            134,
            7,
        )))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store.fetch_patients(FetchParams::default()).await;

    assert!(store.error.is_none());
    assert!(!store.loading);
    assert_eq!(store.patients.len(), 1);
    assert_eq!(store.total_records, 134);
    assert_eq!(store.total_pages, 7);
    assert_eq!(store.page_number, 0);
    assert_eq!(store.page_size, 20);
    assert_eq!(store.sort_field, "lastName");
    assert_eq!(store.sort_order, SortOrder::Asc);
}

#[tokio::test]
async fn fetch_failure_stores_error_and_leaves_page_cleared() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/patient"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    // Pretend a previous fetch had populated the page.
    store.total_records = 10;
    store.fetch_patients(FetchParams::default()).await;

    assert!(store.patients.is_empty());
    assert!(!store.loading);
    let error = store.error.as_ref().expect("error should be stored");
    assert!(error.to_string().contains("503"));
}

#[tokio::test]
async fn decode_failure_is_stored_like_any_other() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/patient"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store.fetch_patients(FetchParams::default()).await;

    assert!(store.patients.is_empty());
    assert!(store.error.is_some());
    assert!(!store.loading);
}

#[tokio::test]
async fn fetch_patient_replaces_selection() {
    let server = MockServer::start().await;
    let base = server.uri();
    let id = Uuid::parse_str(PATIENT_ID).unwrap();

    Mock::given(method("GET"))
        .and(path(format!("/api/patient/{PATIENT_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(patient_item(&base, PATIENT_ID, "Lovelace")),
        )
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store.fetch_patient(id).await;

    let patient = store.patient.as_ref().expect("selection should be set");
    assert_eq!(patient.id, id);
    assert!(!store.loading);
}

#[tokio::test]
async fn fetch_patient_failure_clears_selection() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/patient/{id}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store.fetch_patient(id).await;

    assert!(store.patient.is_none());
    assert!(store.error.is_some());
    assert!(!store.loading);
}

#[tokio::test]
async fn on_page_requests_the_target_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/patient"))
        .and(query_param("page", "3"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&base, vec![], 3, 134, 14)))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store
        .on_page(PageEvent {
            page: 3,
            rows: 10,
            sort: Some(Sort::default()),
            filters: FilterState::default(),
        })
        .await;

    assert!(store.error.is_none());
    assert_eq!(store.page_number, 3);
}

#[tokio::test]
async fn on_sort_resets_to_first_page_and_records_sort() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/api/patient"))
        .and(query_param("page", "0"))
        .and(query_param("sort", "dateOfBirth,desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&base, vec![], 0, 134, 7)))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store
        .on_sort(SortEvent {
            sort: Sort::new("dateOfBirth", SortOrder::Desc),
            filters: FilterState::default(),
        })
        .await;

    assert!(store.error.is_none());
    assert_eq!(store.sort_field, "dateOfBirth");
    assert_eq!(store.sort_order, SortOrder::Desc);
}

#[tokio::test]
async fn on_filter_adopts_filters_and_sends_them() {
    let server = MockServer::start().await;
    let base = server.uri();

    let mut filters = FilterState::default();
    filters.set_constraint("lastName", MatchMode::StartsWith, "Lo");
    let expected = filters.encode().unwrap().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/patient"))
        .and(query_param("page", "0"))
        .and(query_param("filters", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&base, vec![], 0, 1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store
        .on_filter(FilterEvent {
            sort: Some(Sort::default()),
            filters: filters.clone(),
        })
        .await;

    assert!(store.error.is_none());
    assert_eq!(store.filters, filters);
}

#[tokio::test]
async fn clear_filters_resets_state_and_refetches_unfiltered() {
    let server = MockServer::start().await;
    let base = server.uri();

    // The re-fetch after clearing must carry no filters parameter.
    Mock::given(method("GET"))
        .and(path("/api/patient"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&base, vec![], 0, 134, 7)))
        .mount(&server)
        .await;

    let mut store = store_for(&server);
    store
        .filters
        .set_constraint("lastName", MatchMode::Contains, "x");
    store.filters.set_global("y");

    store.clear_filters().await;

    assert_eq!(store.filters, FilterState::default());
    assert!(store.error.is_none());

    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    let raw_query = last.url.query().unwrap_or_default();
    assert!(!raw_query.contains("filters="));
    assert!(!raw_query.contains("query="));
}
