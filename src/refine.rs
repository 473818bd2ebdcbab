//! Second filtering pass over photos the server already filtered.
//!
//! The search endpoint only knows upload dates and matches text loosely, so
//! the accumulated list is narrowed again on taken date and title. Album
//! scoping is exact on the server and is not repeated here.

use crate::{criteria::SearchCriteria, model::Photo};

pub fn refine(photos: &[Photo], criteria: &SearchCriteria) -> Vec<Photo> {
    if photos.is_empty() {
        return Vec::new();
    }

    let needle = criteria.text().map(str::to_lowercase);

    photos
        .iter()
        .filter(|photo| taken_in_range(photo, criteria))
        .filter(|photo| match &needle {
            Some(needle) => photo.title.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .cloned()
        .collect()
}

/// Photos with no taken date cannot be placed in a range and are dropped
/// while either bound is set.
pub fn taken_in_range(photo: &Photo, criteria: &SearchCriteria) -> bool {
    if !criteria.has_date_range() {
        return true;
    }

    let Some(taken) = photo.date_taken else {
        return false;
    };

    let after_min = criteria.lower_bound().map_or(true, |min| taken >= min);
    let before_max = criteria.upper_bound().map_or(true, |max| taken <= max);

    after_min && before_max
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn photo(id: &str, title: &str, taken: Option<&str>) -> Photo {
        Photo {
            id: id.to_owned(),
            owner: "owner@N00".to_owned(),
            owner_name: None,
            secret: "abc".to_owned(),
            server: "65535".to_owned(),
            farm: 66,
            title: title.to_owned(),
            date_upload: None,
            date_taken: taken
                .map(|x| NaiveDateTime::parse_from_str(x, "%Y-%m-%d %H:%M:%S").unwrap()),
            is_public: true,
            is_friend: false,
            is_family: false,
        }
    }

    fn ids(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|x| x.id.as_str()).collect()
    }

    #[test]
    fn no_criteria_keeps_everything() {
        let photos = vec![photo("1", "a", None), photo("2", "b", Some("2020-01-01 00:00:00"))];

        assert_eq!(refine(&photos, &SearchCriteria::default()), photos);
    }

    #[test]
    fn empty_input_stays_empty() {
        let criteria = SearchCriteria::from_form("x", "", "", "").unwrap();

        assert!(refine(&[], &criteria).is_empty());
    }

    #[test]
    fn title_match_ignores_case() {
        let photos = vec![
            photo("1", "Soirée JAZZ au parc", None),
            photo("2", "Brocante", None),
            photo("3", "jazz band", None),
        ];
        let criteria = SearchCriteria::from_form("Jazz", "", "", "").unwrap();

        assert_eq!(ids(&refine(&photos, &criteria)), ["1", "3"]);
    }

    #[test]
    fn taken_date_bounds_are_inclusive() {
        let photos = vec![
            photo("before", "", Some("2024-05-31 23:59:59")),
            photo("start", "", Some("2024-06-01 00:00:00")),
            photo("end", "", Some("2024-06-30 23:59:59")),
            photo("after", "", Some("2024-07-01 00:00:00")),
            photo("unknown", "", None),
        ];
        let criteria = SearchCriteria::from_form("", "2024-06-01", "2024-06-30", "").unwrap();

        assert_eq!(ids(&refine(&photos, &criteria)), ["start", "end"]);
    }

    #[test]
    fn open_ended_range() {
        let photos = vec![
            photo("old", "", Some("2019-01-01 10:00:00")),
            photo("new", "", Some("2024-01-01 10:00:00")),
        ];
        let criteria = SearchCriteria::from_form("", "2020-01-01", "", "").unwrap();

        assert_eq!(ids(&refine(&photos, &criteria)), ["new"]);

        let criteria = SearchCriteria::from_form("", "", "2020-01-01", "").unwrap();

        assert_eq!(ids(&refine(&photos, &criteria)), ["old"]);
    }

    #[test]
    fn album_is_not_refiltered() {
        let photos = vec![photo("1", "a", None)];
        let criteria = SearchCriteria::from_form("", "", "", "72157").unwrap();

        assert_eq!(refine(&photos, &criteria), photos);
    }
}
