//! Hypermedia collection envelope and pagination metadata.
//!
//! List responses arrive as `{_embedded: {patientModelList: [..]}, _links,
//! page}`. The `_embedded` block is absent when the result set is empty;
//! that decodes as an empty page. Each embedded item carries its own
//! `_links.self.href`, and the trailing path segment of that href is the
//! only place the server transmits the record's identifier.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::patient::{Patient, PatientRecord};

/// Server-reported pagination metadata, mirrored verbatim into client state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// A single patient item as embedded in a collection or returned alone.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientResource {
    #[serde(flatten)]
    pub record: PatientRecord,
    #[serde(rename = "_links", default)]
    pub links: HashMap<String, Link>,
}

impl PatientResource {
    /// Derive the identifier from the trailing segment of the self link.
    pub fn derive_id(&self) -> Result<Uuid> {
        let href = &self
            .links
            .get("self")
            .ok_or(CoreError::MissingSelfLink)?
            .href;
        let segment = href.rsplit('/').next().unwrap_or_default();
        Uuid::parse_str(segment).map_err(|_| CoreError::invalid_id(segment))
    }

    pub fn into_patient(self) -> Result<Patient> {
        let id = self.derive_id()?;
        Ok(Patient {
            id,
            record: self.record,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct Embedded {
    #[serde(rename = "patientModelList", default)]
    patient_model_list: Vec<PatientResource>,
}

/// The raw collection envelope as deserialized off the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionModel {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
    #[serde(default)]
    pub page: PageMetadata,
}

impl CollectionModel {
    /// Flatten the envelope into patients with derived identifiers.
    pub fn into_page(self) -> Result<PatientPage> {
        let patients = self
            .embedded
            .unwrap_or_default()
            .patient_model_list
            .into_iter()
            .map(PatientResource::into_patient)
            .collect::<Result<Vec<_>>>()?;
        Ok(PatientPage {
            patients,
            page: self.page,
        })
    }
}

/// One fetched page of patients, reshaped from the hypermedia envelope.
#[derive(Debug, Clone, Default)]
pub struct PatientPage {
    pub patients: Vec<Patient>,
    pub page: PageMetadata,
}
