//! Generic REST client shared by the three backend integrations.

use common::{BackendError, Page, PageRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::translate::translate_status;

/// One backend's CRUD surface over HTTP.
///
/// Issues exactly one request per invocation; no caching, no retry. Error
/// responses are translated into the domain taxonomy, except for list
/// calls, which degrade to an empty page.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    resource: &'static str,
}

impl RestClient {
    /// Creates a client for one resource rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, resource: &'static str) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resource,
        }
    }

    fn entity_url(&self, id: i32) -> String {
        format!("{}/{}/{}", self.base_url, self.resource, id)
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    /// Fetches one entity by ID.
    pub async fn get<T: DeserializeOwned>(&self, id: i32) -> Result<T, BackendError> {
        let response = self
            .http
            .get(self.entity_url(id))
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    /// Fetches one page of entities scoped by a parent query parameter.
    ///
    /// Any failure is absorbed into an empty page: the aggregate read
    /// favors availability over completeness of the child lists.
    pub async fn list<T: DeserializeOwned>(
        &self,
        parent_param: &str,
        parent_id: i32,
        page: PageRequest,
    ) -> Page<T> {
        match self.try_list(parent_param, parent_id, page).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(
                    resource = self.resource,
                    parent_id,
                    error = %err,
                    "list failed, returning empty page"
                );
                Page::empty(page)
            }
        }
    }

    async fn try_list<T: DeserializeOwned>(
        &self,
        parent_param: &str,
        parent_id: i32,
        page: PageRequest,
    ) -> Result<Page<T>, BackendError> {
        let response = self
            .http
            .get(self.collection_url())
            .query(&[
                (parent_param, parent_id.to_string()),
                ("pageNumber", page.number().to_string()),
                ("pageSize", page.size().to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    /// Creates an entity and returns the backend's authoritative record.
    pub async fn create<T>(&self, entity: &T) -> Result<T, BackendError>
    where
        T: Serialize + DeserializeOwned + Sync,
    {
        let response = self
            .http
            .post(self.collection_url())
            .json(entity)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    /// Replaces an entity and returns the updated record.
    pub async fn update<T>(&self, id: i32, entity: &T) -> Result<T, BackendError>
    where
        T: Serialize + DeserializeOwned + Sync,
    {
        let response = self
            .http
            .put(self.entity_url(id))
            .json(entity)
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    /// Deletes an entity.
    pub async fn delete(&self, id: i32) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.entity_url(id))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(translate_status(status, &body))
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| BackendError::Transport(err.to_string()))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(translate_status(status, &body))
        }
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Product, ProductId};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> RestClient {
        RestClient::new(reqwest::Client::new(), server.uri(), "product")
    }

    #[tokio::test]
    async fn get_decodes_entity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "productId": 1, "name": "widget", "weight": 120
            })))
            .mount(&server)
            .await;

        let product: Product = client(&server).get(1).await.unwrap();
        assert_eq!(product.product_id, ProductId::new(1));
        assert_eq!(product.name, "widget");
    }

    #[tokio::test]
    async fn get_translates_not_found_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/13"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "timestamp": "2024-01-01T00:00:00Z",
                "path": "/product/13",
                "status": 404,
                "message": "No product found for productId: 13"
            })))
            .mount(&server)
            .await;

        let err = client(&server).get::<Product>(13).await.unwrap_err();
        assert_eq!(
            err,
            BackendError::NotFound("No product found for productId: 13".to_string())
        );
    }

    #[tokio::test]
    async fn get_translates_unprocessable_entity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/0"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid productId: 0"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).get::<Product>(0).await.unwrap_err();
        assert_eq!(
            err,
            BackendError::InvalidInput("Invalid productId: 0".to_string())
        );
    }

    #[tokio::test]
    async fn get_passes_other_statuses_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).get::<Product>(1).await.unwrap_err();
        assert_eq!(
            err,
            BackendError::UnexpectedStatus {
                status: 500,
                message: "boom".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn get_falls_back_to_raw_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product/1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).get::<Product>(1).await.unwrap_err();
        assert_eq!(err.to_string(), "not json");
    }

    #[tokio::test]
    async fn list_sends_pagination_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product"))
            .and(query_param("productId", "7"))
            .and(query_param("pageNumber", "2"))
            .and(query_param("pageSize", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"productId": 7, "name": "widget", "weight": 1}],
                "page": {"size": 5, "totalElements": 11, "totalPages": 3, "number": 2}
            })))
            .mount(&server)
            .await;

        let page: Page<Product> = client(&server)
            .list("productId", 7, PageRequest::new(2, 5).unwrap())
            .await;

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.page.total_elements, 11);
        assert_eq!(page.page.number, 2);
    }

    #[tokio::test]
    async fn list_degrades_to_empty_page_on_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let page: Page<Product> = client(&server)
            .list("productId", 7, PageRequest::new(0, 10).unwrap())
            .await;

        assert!(page.is_empty());
        assert_eq!(page.page.total_pages, 1);
        assert_eq!(page.page.size, 10);
    }

    #[tokio::test]
    async fn list_degrades_to_empty_page_on_transport_error() {
        // No server listening at this address.
        let rest = RestClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1".to_string(),
            "product",
        );

        let page: Page<Product> = rest
            .list("productId", 7, PageRequest::new(0, 10).unwrap())
            .await;

        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn create_posts_and_decodes_assigned_entity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/product"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "productId": 42, "name": "widget", "weight": 120
            })))
            .mount(&server)
            .await;

        let created: Product = client(&server)
            .create(&Product::unassigned("widget", 120))
            .await
            .unwrap();
        assert_eq!(created.product_id, ProductId::new(42));
    }

    #[tokio::test]
    async fn delete_succeeds_on_ok() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/product/1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        client(&server).delete(1).await.unwrap();
    }

    #[tokio::test]
    async fn delete_translates_errors() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/product/9"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid productId: 9"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).delete(9).await.unwrap_err();
        assert_eq!(
            err,
            BackendError::InvalidInput("Invalid productId: 9".to_string())
        );
    }
}
