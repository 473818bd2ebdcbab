use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date: {0:?}; expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// What the visitor typed into the gallery filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub text: String,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub album_id: Option<String>,
}

impl SearchCriteria {
    /// Builds criteria from raw form fields, where an empty field means unset.
    pub fn from_form(
        text: &str,
        min_date: &str,
        max_date: &str,
        album_id: &str,
    ) -> crate::Result<Self> {
        Ok(Self {
            text: text.trim().to_owned(),
            min_date: parse_date(min_date)?,
            max_date: parse_date(max_date)?,
            album_id: non_empty(album_id),
        })
    }

    pub fn text(&self) -> Option<&str> {
        Some(self.text.as_str()).filter(|x| !x.is_empty())
    }

    pub fn album_id(&self) -> Option<&str> {
        self.album_id.as_deref().filter(|x| !x.is_empty())
    }

    pub fn has_date_range(&self) -> bool {
        self.min_date.is_some() || self.max_date.is_some()
    }

    /// Inclusive lower bound, start of the minimum day.
    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        self.min_date.and_then(|d| d.and_hms_milli_opt(0, 0, 0, 0))
    }

    /// Inclusive upper bound, the maximum day padded to 23:59:59.999.
    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        self.max_date.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
    }

    /// Lower bound as epoch seconds, the remote upload-date format.
    pub fn min_upload_date(&self) -> Option<i64> {
        self.lower_bound().map(|x| x.and_utc().timestamp())
    }

    /// Upper bound as epoch seconds; milliseconds are truncated.
    pub fn max_upload_date(&self) -> Option<i64> {
        self.upper_bound().map(|x| x.and_utc().timestamp())
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();

    (!s.is_empty()).then(|| s.to_owned())
}

fn parse_date(s: &str) -> Result<Option<NaiveDate>, Error> {
    match non_empty(s) {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| Error::InvalidDate(s)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_is_default() {
        let criteria = SearchCriteria::from_form("", "", "  ", "").unwrap();

        assert_eq!(criteria, SearchCriteria::default());
        assert!(criteria.text().is_none());
        assert!(criteria.album_id().is_none());
        assert!(!criteria.has_date_range());
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = SearchCriteria::from_form("", "2024-13-01", "", "").unwrap_err();

        assert!(matches!(
            err,
            crate::Error::Criteria(Error::InvalidDate(ref x)) if x == "2024-13-01"
        ));
    }

    #[test]
    fn upload_dates_as_epoch_seconds() {
        let criteria = SearchCriteria::from_form("fête", "2024-06-01", "2024-06-01", "").unwrap();

        // 2024-06-01T00:00:00Z
        assert_eq!(criteria.min_upload_date(), Some(1_717_200_000));
        // 2024-06-01T23:59:59.999Z, truncated
        assert_eq!(criteria.max_upload_date(), Some(1_717_286_399));
        assert_eq!(criteria.text(), Some("fête"));
    }

    #[test]
    fn upper_bound_keeps_milliseconds() {
        let criteria = SearchCriteria::from_form("", "", "2023-12-31", "").unwrap();
        let bound = criteria.upper_bound().unwrap();

        assert_eq!(bound.to_string(), "2023-12-31 23:59:59.999");
    }
}
