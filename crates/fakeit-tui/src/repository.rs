//! In-memory snapshot of the mock collection.

use std::time::Instant;

use fakeit_client::{ApiClient, HttpMethod, Mock};

/// Owns the session's view of the remote mock collection.
///
/// Every mutating action triggers a full `refresh` rather than patching
/// records locally, so the snapshot is always the server's latest answer.
/// On a failed fetch the records are cleared and the error kept; no stale
/// data is retained.
pub struct MocksRepository {
    pub records: Vec<Mock>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub last_refresh: Option<Instant>,
}

impl Default for MocksRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MocksRepository {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            is_loading: false,
            last_error: None,
            last_refresh: None,
        }
    }

    /// Replace the snapshot with the server's current collection.
    pub async fn refresh(&mut self, client: &ApiClient) {
        self.is_loading = true;
        match client.list().await {
            Ok(mocks) => {
                self.records = mocks;
                self.last_error = None;
                self.last_refresh = Some(Instant::now());
            }
            Err(e) => {
                self.records.clear();
                self.last_error = Some(format!("Failed to load mocks: {e}"));
            }
        }
        self.is_loading = false;
    }

    /// Whether the last fetch reached the server successfully.
    pub fn is_connected(&self) -> bool {
        self.last_refresh.is_some() && self.last_error.is_none()
    }

    /// Mocks that can be invoked: disabled ones are not servable and are
    /// excluded from every target picker.
    pub fn enabled(&self) -> Vec<&Mock> {
        self.records.iter().filter(|m| m.enabled).collect()
    }

    /// The first records in snapshot order, for the dashboard list.
    pub fn recent(&self, count: usize) -> &[Mock] {
        &self.records[..self.records.len().min(count)]
    }

    /// Derive dashboard statistics from the snapshot.
    pub fn stats(&self) -> MockStats {
        MockStats::collect(&self.records)
    }
}

/// Aggregate counts shown on the dashboard, recomputed per draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockStats {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    per_method: [usize; HttpMethod::ALL.len()],
}

impl MockStats {
    pub fn collect(records: &[Mock]) -> Self {
        let mut stats = MockStats {
            total: records.len(),
            ..Default::default()
        };
        for mock in records {
            if mock.enabled {
                stats.enabled += 1;
            } else {
                stats.disabled += 1;
            }
            if let Some(idx) = HttpMethod::ALL.iter().position(|m| *m == mock.method) {
                stats.per_method[idx] += 1;
            }
        }
        stats
    }

    pub fn count_for(&self, method: HttpMethod) -> usize {
        HttpMethod::ALL
            .iter()
            .position(|m| *m == method)
            .map(|idx| self.per_method[idx])
            .unwrap_or(0)
    }
}

/// Stable filter over the snapshot: case-insensitive substring match on
/// name or path, plus an optional exact method match. Original relative
/// order is preserved; nothing is re-sorted.
pub fn filter_mocks<'a>(
    records: &'a [Mock],
    search: &str,
    method: Option<HttpMethod>,
) -> Vec<&'a Mock> {
    let query = search.to_lowercase();
    records
        .iter()
        .filter(|m| mock_matches(m, &query, method))
        .collect()
}

/// Single-record predicate behind [`filter_mocks`]; `query` must already be
/// lower-cased.
pub fn mock_matches(mock: &Mock, query: &str, method: Option<HttpMethod>) -> bool {
    let matches_search = query.is_empty()
        || mock.name.to_lowercase().contains(query)
        || mock.path.to_lowercase().contains(query);
    let matches_method = method.map_or(true, |wanted| mock.method == wanted);
    matches_search && matches_method
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakeit_client::ApiClient;
    use serde_json::json;

    fn mock(id: &str, name: &str, path: &str, method: HttpMethod, enabled: bool) -> Mock {
        Mock {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            method,
            status_code: 200,
            response_body: json!({}),
            enabled,
        }
    }

    fn sample() -> Vec<Mock> {
        vec![
            mock("1", "List users", "/api/users", HttpMethod::Get, true),
            mock("2", "Create user", "/api/users", HttpMethod::Post, false),
            mock("3", "Health", "/health", HttpMethod::Get, true),
        ]
    }

    #[test]
    fn filter_matches_name_or_path() {
        let records = sample();
        let by_name = filter_mocks(&records, "health", None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "3");

        let by_path = filter_mocks(&records, "/api", None);
        assert_eq!(by_path.len(), 2);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let records = sample();
        assert_eq!(filter_mocks(&records, "USERS", None).len(), 2);
        assert_eq!(filter_mocks(&records, "HeAlTh", None).len(), 1);
    }

    #[test]
    fn method_filter_is_exact() {
        let records = sample();
        let gets = filter_mocks(&records, "", Some(HttpMethod::Get));
        assert_eq!(gets.len(), 2);
        let posts = filter_mocks(&records, "", Some(HttpMethod::Post));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "2");
    }

    #[test]
    fn predicates_commute() {
        let records = sample();
        // Search-then-method must equal method-then-search for the same inputs.
        let joint: Vec<&str> = filter_mocks(&records, "users", Some(HttpMethod::Post))
            .iter()
            .map(|m| m.id.as_str())
            .collect();

        let search_first: Vec<&str> = {
            let searched = filter_mocks(&records, "users", None);
            searched
                .into_iter()
                .filter(|m| m.method == HttpMethod::Post)
                .map(|m| m.id.as_str())
                .collect()
        };

        let method_first: Vec<&str> = {
            let by_method = filter_mocks(&records, "", Some(HttpMethod::Post));
            by_method
                .into_iter()
                .filter(|m| m.name.to_lowercase().contains("users") || m.path.contains("users"))
                .map(|m| m.id.as_str())
                .collect()
        };

        assert_eq!(joint, search_first);
        assert_eq!(joint, method_first);
    }

    #[test]
    fn filter_preserves_order() {
        let records = sample();
        let all: Vec<&str> = filter_mocks(&records, "", None)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(all, vec!["1", "2", "3"]);
    }

    #[test]
    fn enabled_view_excludes_disabled_records() {
        let mut repo = MocksRepository::new();
        repo.records = vec![
            mock("1", "a", "/a", HttpMethod::Get, true),
            mock("2", "b", "/b", HttpMethod::Get, false),
        ];
        let ids: Vec<&str> = repo.enabled().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn stats_count_methods_and_enablement() {
        let records = sample();
        let stats = MockStats::collect(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.enabled, 2);
        assert_eq!(stats.disabled, 1);
        assert_eq!(stats.count_for(HttpMethod::Get), 2);
        assert_eq!(stats.count_for(HttpMethod::Post), 1);
        assert_eq!(stats.count_for(HttpMethod::Delete), 0);
    }

    #[test]
    fn recent_caps_at_snapshot_length() {
        let repo = MocksRepository {
            records: sample(),
            ..MocksRepository::new()
        };
        assert_eq!(repo.recent(5).len(), 3);
        assert_eq!(repo.recent(2).len(), 2);
        assert_eq!(repo.recent(2)[0].id, "1");
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/mocks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([{
                    "id": "9",
                    "name": "Ping",
                    "path": "/ping",
                    "method": "GET",
                    "statusCode": 200,
                    "responseBody": "pong",
                    "enabled": true
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url());
        let mut repo = MocksRepository::new();
        repo.refresh(&client).await;

        assert!(repo.is_connected());
        assert!(repo.last_error.is_none());
        assert_eq!(repo.records.len(), 1);
        assert_eq!(repo.records[0].response_body, json!("pong"));
    }

    #[tokio::test]
    async fn failed_refresh_clears_records_and_sets_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/mocks")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url());
        let mut repo = MocksRepository::new();
        repo.records = sample();
        repo.refresh(&client).await;

        assert!(repo.records.is_empty(), "stale records must not survive");
        assert!(repo.last_error.as_deref().unwrap().contains("Failed to load mocks"));
        assert!(!repo.is_connected());
        assert!(!repo.is_loading);
    }
}
