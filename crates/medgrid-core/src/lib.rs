pub mod error;
pub mod filter;
pub mod page;
pub mod patient;
pub mod query;
pub mod time;

pub use error::{CoreError, Result};
pub use filter::{FilterConstraint, FilterOperator, FilterState, MatchMode};
pub use page::{PageMetadata, PatientPage};
pub use patient::{FollowUp, Medication, Patient, PatientRecord};
pub use query::{ListParams, Sort, SortOrder};
pub use self::time::{IsoDate, LocalStamp};
