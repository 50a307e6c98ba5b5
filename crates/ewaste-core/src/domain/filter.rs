use super::{PickupRequest, StatusFilter};

/// Client-side search over the already-fetched request list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl RequestQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    pub fn matches(&self, request: &PickupRequest) -> bool {
        if !self.status.accepts(&request.status) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        // Unrecognised statuses carry no label to match against.
        let label = if request.status.is_recognised() {
            request.status.short_label()
        } else {
            ""
        };
        let haystack = [
            request.id.to_string().as_str(),
            request.brand.as_str(),
            request.model.as_str(),
            request.device_type.as_str(),
            request.condition.as_str(),
            label,
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

        haystack.contains(&needle)
    }

    pub fn apply<'a>(&self, requests: &'a [PickupRequest]) -> Vec<&'a PickupRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Condition, RequestStatus};

    fn request(id: i64, brand: &str, status: RequestStatus) -> PickupRequest {
        PickupRequest {
            id,
            device_type: "Laptop".into(),
            brand: brand.into(),
            model: format!("Model {id}"),
            condition: Condition::Working,
            quantity: 1,
            pickup_address: "Chennai".into(),
            additional_remarks: None,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<PickupRequest> {
        (1..=10)
            .map(|id| {
                let status = match id {
                    2 | 5 | 9 => RequestStatus::Recycled,
                    3 => RequestStatus::PickupScheduled,
                    7 => RequestStatus::Rejected,
                    _ => RequestStatus::Submitted,
                };
                request(id, if id % 2 == 0 { "HP" } else { "Lenovo" }, status)
            })
            .collect()
    }

    #[test]
    fn test_status_filter_recycled_keeps_exactly_three() {
        let requests = sample();
        let query = RequestQuery::new("", StatusFilter::Only(RequestStatus::Recycled));
        let rows = query.apply(&requests);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.status == RequestStatus::Recycled));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let requests = sample();
        let rows = RequestQuery::new("  lEnOvO ", StatusFilter::All).apply(&requests);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_search_matches_short_status_label_and_id() {
        let requests = sample();
        let scheduled = RequestQuery::new("scheduled", StatusFilter::All).apply(&requests);
        assert_eq!(scheduled.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);

        let by_id = RequestQuery::new("10", StatusFilter::All).apply(&requests);
        assert_eq!(by_id.iter().map(|r| r.id).collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn test_search_and_status_combine() {
        let requests = sample();
        let rows = RequestQuery::new("hp", StatusFilter::Only(RequestStatus::Recycled)).apply(&requests);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_unrecognised_status_has_no_searchable_label() {
        let requests = vec![
            request(1, "HP", RequestStatus::Other("ON_HOLD".into())),
            request(2, "HP", RequestStatus::Other("OTHER".into())),
        ];
        let rows = RequestQuery::new("other", StatusFilter::All).apply(&requests);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    }
}
