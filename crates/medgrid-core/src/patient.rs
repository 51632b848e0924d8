//! Patient record types as the API transmits them.
//!
//! The server never sends a patient's identifier as a plain field; it is
//! derived from the record's `_links.self.href` (see [`crate::page`]). The
//! wire shape here is therefore split in two: [`PatientRecord`] is the body
//! that travels in both directions (and is what create/update requests
//! send), while [`Patient`] pairs a record with its derived identifier.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::{IsoDate, LocalStamp};

/// The patient body as transmitted by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<IsoDate>,
    pub medical_record_number: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<Medication>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_ups: Vec<FollowUp>,
}

/// A patient record with its identifier derived from the self link.
///
/// Serializes flat, identifier first; never deserialized directly since the
/// wire carries no `id` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: PatientRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub start_date: Option<IsoDate>,
    pub end_date: Option<IsoDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub date: Option<LocalStamp>,
    #[serde(rename = "type")]
    pub kind: Option<FollowUpType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub natures: Vec<FollowUpNature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<Medication>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowUpType {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowUpNature {
    // The upstream service spells this value without the second "i";
    // the misspelling is part of the wire contract.
    #[serde(rename = "OFFICE_VIST")]
    OfficeVisit,
    #[serde(rename = "PHONE_CALL")]
    PhoneCall,
    #[serde(rename = "HOUSE_CALL")]
    HouseCall,
    #[serde(rename = "VIDEO_CALL")]
    VideoCall,
    #[serde(rename = "OTHER")]
    Other,
}
