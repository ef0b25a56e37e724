//! REST Data Store
//!
//! Thin query wrapper over the hosted relational data service. Point
//! queries map onto the service's REST filter syntax (`id=eq.…`,
//! `id=in.(…)`); related writes stay independent requests, so there are
//! no cross-table transactions here.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use super::traits::{DataStore, StoreError, StoreResult};
use crate::config::AppConfig;
use crate::domain::{Member, NewProject, Project, User};

/// Client for the hosted data service's REST endpoint
pub struct RestDataStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestDataStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.data_service_url.trim_end_matches('/').to_string(),
            api_key: config.data_service_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> StoreResult<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Response {
                status: status.as_u16(),
                body,
            });
        }
        resp.json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn expect_success(resp: reqwest::Response) -> StoreResult<()> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Response {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Encode a filter value for use inside a query string
fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

#[async_trait]
impl DataStore for RestDataStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let url = format!("{}?select=*", self.table_url("users"));
        let resp = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(resp).await
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<User>> {
        let url = format!("{}?select=*&id=eq.{}", self.table_url("users"), encode(id));
        let resp = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<User> = Self::decode(resp).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<User> {
        let resp = self
            .request(reqwest::Method::POST, self.table_url("users"))
            .header("Prefer", "return=representation")
            .json(&[user])
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<User> = Self::decode(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_string()))
    }

    async fn update_user(&self, user: &User) -> StoreResult<User> {
        let url = format!("{}?id=eq.{}", self.table_url("users"), encode(&user.id));
        let resp = self
            .request(reqwest::Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(user)
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<User> = Self::decode(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("update returned no row".to_string()))
    }

    async fn insert_project(&self, project: &NewProject) -> StoreResult<Project> {
        let resp = self
            .request(reqwest::Method::POST, self.table_url("projects"))
            .header("Prefer", "return=representation")
            .json(&[project])
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<Project> = Self::decode(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_string()))
    }

    async fn projects_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Project>> {
        let list = ids.iter().map(|id| encode(id)).collect::<Vec<_>>().join(",");
        let url = format!(
            "{}?select=*&id=in.({})&order=created_at.desc",
            self.table_url("projects"),
            list
        );
        let resp = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(resp).await
    }

    async fn members_by_project(&self, project_id: &str) -> StoreResult<Vec<Member>> {
        let url = format!(
            "{}?select=*&project_id=eq.{}",
            self.table_url("members"),
            encode(project_id)
        );
        let resp = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(resp).await
    }

    async fn upsert_member(&self, member: &Member) -> StoreResult<()> {
        let resp = self
            .request(reqwest::Method::POST, self.table_url("members"))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[member])
            .send()
            .await
            .map_err(transport)?;
        Self::expect_success(resp).await
    }

    async fn delete_member(&self, user_id: &str, project_id: &str) -> StoreResult<()> {
        let url = format!(
            "{}?user_id=eq.{}&project_id=eq.{}",
            self.table_url("members"),
            encode(user_id),
            encode(project_id)
        );
        let resp = self
            .request(reqwest::Method::DELETE, url)
            .send()
            .await
            .map_err(transport)?;
        Self::expect_success(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_values_are_encoded() {
        assert_eq!(encode("user 1"), "user%201");
        assert_eq!(encode("a,b"), "a%2Cb");
        assert_eq!(encode("plain"), "plain");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = RestDataStore::new(&AppConfig::new("https://db.example.com/", "key"));
        assert_eq!(
            store.table_url("users"),
            "https://db.example.com/rest/v1/users"
        );
    }
}
