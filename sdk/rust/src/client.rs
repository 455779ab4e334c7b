//! Typed HTTP client for the API gateway's REST surface.

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paths of one entity's five operations. Id paths end in `/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub create: &'static str,
    pub list: &'static str,
    pub get_by_id: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl Endpoint {
    pub const CUSTOMER: Endpoint = Endpoint {
        create: "/createCustomer",
        list: "/getlistcustomer",
        get_by_id: "/getbyidcustomer/{id}",
        update: "/updateCustomer/{id}",
        delete: "/deleteCustomer/{id}",
    };

    pub const SYSTEM_USER: Endpoint = Endpoint {
        create: "/CreateUser",
        list: "/GetListUser",
        get_by_id: "/GetByIdUser/{id}",
        update: "/UpdateUser/{id}",
        delete: "/DeleteUser/{id}",
    };

    pub const SELLER: Endpoint = Endpoint {
        create: "/CreateSeller",
        list: "/GetListSeller",
        get_by_id: "/GetByIdSeller/{id}",
        update: "/UpdateSeller/{id}",
        delete: "/DeleteSeller/{id}",
    };

    pub const BRANCH: Endpoint = Endpoint {
        create: "/createBranch",
        list: "/GetListBranch",
        get_by_id: "/getbyidbranch/{id}",
        update: "/updateBranch/{id}",
        delete: "/deleteBranch/{id}",
    };

    pub const SHOP: Endpoint = Endpoint {
        create: "/CreateShop",
        list: "/GetListShop",
        get_by_id: "/GetByIdShop/{id}",
        update: "/UpdateShop/{id}",
        delete: "/DeleteShop/{id}",
    };
}

/// List query. Values are sent as given so servers can be probed with
/// malformed input too.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

/// Status and decoded JSON body of a gateway response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

pub struct GatewayClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Send `Authorization: Bearer <key>` on every request.
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub async fn create(&self, endpoint: &Endpoint, body: &Value) -> Result<ApiResponse, reqwest::Error> {
        self.send(self.client.post(self.url(endpoint.create, None)).json(body))
            .await
    }

    pub async fn list(&self, endpoint: &Endpoint, query: &ListQuery) -> Result<ApiResponse, reqwest::Error> {
        self.send(self.client.get(self.url(endpoint.list, None)).query(query))
            .await
    }

    pub async fn get_by_id(&self, endpoint: &Endpoint, id: &str) -> Result<ApiResponse, reqwest::Error> {
        self.send(self.client.get(self.url(endpoint.get_by_id, Some(id))))
            .await
    }

    pub async fn update(
        &self,
        endpoint: &Endpoint,
        id: &str,
        body: &Value,
    ) -> Result<ApiResponse, reqwest::Error> {
        self.send(self.client.put(self.url(endpoint.update, Some(id))).json(body))
            .await
    }

    pub async fn delete(&self, endpoint: &Endpoint, id: &str) -> Result<ApiResponse, reqwest::Error> {
        self.send(self.client.delete(self.url(endpoint.delete, Some(id))))
            .await
    }

    /// The id is pushed as one percent-encoded path segment, so `/`, `?`
    /// and `#` inside it cannot change the route.
    fn url(&self, path: &str, id: Option<&str>) -> String {
        let (Some(id), Some(prefix)) = (id, path.strip_suffix("/{id}")) else {
            return format!("{}{}", self.base_url, path);
        };
        let base = format!("{}{}", self.base_url, prefix);
        let Ok(mut url) = Url::parse(&base) else {
            // Unparsable base: reqwest reports it when the request is built.
            return base;
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url.to_string()
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, reqwest::Error> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        // Non-JSON bodies (plain-text rejections) are kept as a string.
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiResponse { status, body })
    }
}
