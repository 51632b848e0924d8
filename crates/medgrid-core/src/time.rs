use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const STAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A calendar date as the patient API transmits it: `yyyy-MM-dd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(pub Date);

impl IsoDate {
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    pub fn inner(&self) -> &Date {
        &self.0
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for IsoDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let date = Date::parse(s, DATE_FORMAT)
            .map_err(|e| CoreError::invalid_date(format!("Failed to parse date '{s}': {e}")))?;
        Ok(IsoDate(date))
    }
}

impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self.0.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IsoDate::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A zone-less timestamp in the API's follow-up format: `yyyy-MM-dd HH:mm:ss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalStamp(pub PrimitiveDateTime);

impl LocalStamp {
    pub fn new(stamp: PrimitiveDateTime) -> Self {
        Self(stamp)
    }

    pub fn inner(&self) -> &PrimitiveDateTime {
        &self.0
    }
}

impl fmt::Display for LocalStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(STAMP_FORMAT).map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for LocalStamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let stamp = PrimitiveDateTime::parse(s, STAMP_FORMAT).map_err(|e| {
            CoreError::invalid_date(format!("Failed to parse timestamp '{s}': {e}"))
        })?;
        Ok(LocalStamp(stamp))
    }
}

impl Serialize for LocalStamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self
            .0
            .format(STAMP_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for LocalStamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LocalStamp::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_round_trip() {
        let date: IsoDate = "1987-03-14".parse().unwrap();
        assert_eq!(date.to_string(), "1987-03-14");
    }

    #[test]
    fn test_iso_date_rejects_garbage() {
        assert!("14/03/1987".parse::<IsoDate>().is_err());
        assert!("1987-13-40".parse::<IsoDate>().is_err());
    }

    #[test]
    fn test_local_stamp_round_trip() {
        let stamp: LocalStamp = "2023-05-01 09:30:00".parse().unwrap();
        assert_eq!(stamp.to_string(), "2023-05-01 09:30:00");
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let date: IsoDate = "2001-01-02".parse().unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2001-01-02\"");

        let back: IsoDate = serde_json::from_str("\"2001-01-02\"").unwrap();
        assert_eq!(back, date);
    }
}
