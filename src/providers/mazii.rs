//! Mazii Japanese-Vietnamese dictionary (community meanings)
//!
//! Two requests per lookup: a word search to find the entry id, then a
//! fetch of user-contributed meanings for that id.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::core::errors::ProviderError;
use crate::core::models::DictionaryEntry;
use crate::providers::DictionaryBackend;

const DICTIONARY: &str = "javi";
const SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SearchResponse {
    found: bool,
    status: Option<i64>,
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SearchHit {
    /// Number or string depending on the entry; forwarded as-is
    mobile_id: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MeanResponse {
    status: Option<i64>,
    /// Kept loose so one malformed record cannot sink the rest
    result: Vec<Value>,
}

/// Pick the known fields of a get-mean record; null or mistyped fields become empty/0
fn entry_from_record(record: &Value) -> DictionaryEntry {
    let text = |field: &str| record[field].as_str().unwrap_or_default().to_string();
    let count = |field: &str| record[field].as_i64().unwrap_or_default();

    DictionaryEntry {
        mean: text("mean"),
        like: count("like"),
        dislike: count("dislike"),
        username: text("username"),
    }
}

/// Entry id from a search hit; null, 0, false and "" count as missing
fn usable_id(id: Option<Value>) -> Option<Value> {
    id.filter(|id| match id {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

/// Mazii adapter
#[derive(Debug, Clone)]
pub struct MaziiDictionary {
    client: reqwest::Client,
    search_url: String,
    mean_url: String,
}

impl MaziiDictionary {
    /// Adapter posting to the given search and get-mean endpoints
    pub fn new(
        client: reqwest::Client,
        search_url: impl Into<String>,
        mean_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            search_url: search_url.into(),
            mean_url: mean_url.into(),
        }
    }

    /// Entry id for the word, `None` when the dictionary has no match
    async fn search(&self, word: &str) -> Result<Option<Value>, ProviderError> {
        let response = self
            .client
            .post(&self.search_url)
            .json(&json!({
                "dict": DICTIONARY,
                "type": "word",
                "query": word,
                "limit": SEARCH_LIMIT,
                "page": 1,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::unknown(status, None));
        }
        let response: SearchResponse = response.json().await?;

        debug!(
            "Mazii search '{}': found={} status={:?} hits={}",
            word,
            response.found,
            response.status,
            response.data.len()
        );

        if !response.found || response.status != Some(200) || response.data.is_empty() {
            return Ok(None);
        }

        let id = usable_id(response.data.into_iter().next().and_then(|hit| hit.mobile_id))
            .unwrap_or_else(|| json!(rand::random::<f64>()));

        Ok(Some(id))
    }

    async fn fetch_meanings(
        &self,
        word: &str,
        word_id: Value,
    ) -> Result<Vec<DictionaryEntry>, ProviderError> {
        let response = self
            .client
            .post(&self.mean_url)
            .json(&json!({
                "dict": DICTIONARY,
                "type": "word",
                "wordId": word_id,
                "word": word,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::unknown(status, None));
        }
        let response: MeanResponse = response.json().await?;

        debug!(
            "Mazii meanings '{}': status={:?} count={}",
            word,
            response.status,
            response.result.len()
        );

        if response.status != Some(200) {
            return Ok(Vec::new());
        }

        Ok(response.result.iter().map(entry_from_record).collect())
    }

    async fn try_lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, ProviderError> {
        match self.search(word).await? {
            Some(word_id) => self.fetch_meanings(word, word_id).await,
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl DictionaryBackend for MaziiDictionary {
    async fn lookup(&self, word: &str) -> Vec<DictionaryEntry> {
        self.try_lookup(word).await.unwrap_or_else(|e| {
            warn!("Mazii lookup for '{}' failed, ignoring: {}", word, e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dictionary(server: &MockServer) -> MaziiDictionary {
        MaziiDictionary::new(
            reqwest::Client::new(),
            format!("{}/api/search", server.uri()),
            format!("{}/api/get-mean", server.uri()),
        )
    }

    async fn mount_search(server: &MockServer, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_meanings_keep_only_known_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .and(body_partial_json(json!({
                "dict": "javi",
                "type": "word",
                "query": "猫",
                "limit": 20,
                "page": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "found": true,
                "status": 200,
                "data": [{"mobileId": 12345, "word": "猫"}, {"mobileId": 999}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/get-mean"))
            .and(body_partial_json(json!({"wordId": 12345, "word": "猫", "dict": "javi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "result": [
                    {"mean": "x", "like": 1, "dislike": 0, "username": "u", "mobileId": 12345, "reportId": 7}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = dictionary(&server).lookup("猫").await;
        assert_eq!(
            entries,
            vec![DictionaryEntry {
                mean: "x".to_string(),
                like: 1,
                dislike: 0,
                username: "u".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_null_fields_do_not_drop_other_meanings() {
        let server = MockServer::start().await;
        mount_search(&server, json!({"found": true, "status": 200, "data": [{"mobileId": 7}]})).await;
        Mock::given(method("POST"))
            .and(path("/api/get-mean"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "result": [
                    {"mean": "good", "like": 3, "dislike": 0, "username": "a"},
                    {"mean": "other", "like": 1, "dislike": 0, "username": null},
                    {"mean": null, "like": null, "dislike": "n/a"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = dictionary(&server).lookup("猫").await;
        assert_eq!(
            entries,
            vec![
                DictionaryEntry {
                    mean: "good".to_string(),
                    like: 3,
                    dislike: 0,
                    username: "a".to_string(),
                },
                DictionaryEntry {
                    mean: "other".to_string(),
                    like: 1,
                    dislike: 0,
                    username: String::new(),
                },
                DictionaryEntry::default(),
            ]
        );
    }

    #[test]
    fn test_usable_id_rejects_falsy_values() {
        assert_eq!(usable_id(None), None);
        assert_eq!(usable_id(Some(Value::Null)), None);
        assert_eq!(usable_id(Some(json!(0))), None);
        assert_eq!(usable_id(Some(json!(0.0))), None);
        assert_eq!(usable_id(Some(json!(""))), None);
        assert_eq!(usable_id(Some(json!(false))), None);
        assert_eq!(usable_id(Some(json!(12345))), Some(json!(12345)));
        assert_eq!(usable_id(Some(json!("abc"))), Some(json!("abc")));
    }

    #[tokio::test]
    async fn test_zero_mobile_id_uses_fallback() {
        let server = MockServer::start().await;
        mount_search(&server, json!({"found": true, "status": 200, "data": [{"mobileId": 0}]})).await;
        Mock::given(method("POST"))
            .and(path("/api/get-mean"))
            .and(body_partial_json(json!({"wordId": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "result": [{"mean": "stale"}]
            })))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/get-mean"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "result": [{"mean": "fresh"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = dictionary(&server).lookup("猫").await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mean, "fresh");
    }

    #[tokio::test]
    async fn test_not_found_is_empty_without_second_call() {
        let server = MockServer::start().await;
        mount_search(&server, json!({"found": false, "status": 200, "data": []})).await;
        Mock::given(method("POST"))
            .and(path("/api/get-mean"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(dictionary(&server).lookup("ぬ").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_status_not_200_is_empty() {
        let server = MockServer::start().await;
        mount_search(
            &server,
            json!({"found": true, "status": 302, "data": [{"mobileId": 1}]}),
        )
        .await;

        assert!(dictionary(&server).lookup("猫").await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_mobile_id_still_fetches() {
        let server = MockServer::start().await;
        mount_search(&server, json!({"found": true, "status": 200, "data": [{"word": "猫"}]})).await;
        Mock::given(method("POST"))
            .and(path("/api/get-mean"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "result": [{"mean": "con mèo", "like": 3, "dislike": 1, "username": "a"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = dictionary(&server).lookup("猫").await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mean, "con mèo");
    }

    #[tokio::test]
    async fn test_meanings_status_not_200_is_empty() {
        let server = MockServer::start().await;
        mount_search(&server, json!({"found": true, "status": 200, "data": [{"mobileId": 1}]})).await;
        Mock::given(method("POST"))
            .and(path("/api/get-mean"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 404,
                "result": [{"mean": "stale"}]
            })))
            .mount(&server)
            .await;

        assert!(dictionary(&server).lookup("猫").await.is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(dictionary(&server).lookup("猫").await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_swallowed() {
        let dictionary = MaziiDictionary::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/api/search",
            "http://127.0.0.1:1/api/get-mean",
        );
        assert!(dictionary.lookup("猫").await.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_body_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(dictionary(&server).lookup("猫").await.is_empty());
    }
}
