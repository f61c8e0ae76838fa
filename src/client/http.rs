//! StockNet API client implementation

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::interceptor::AuthInterceptor;
use super::models::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserIdentity};
use super::AuthApi;
use crate::config::Config;
use crate::error::{ApiError, Result};

/// HTTP client for the `Auth/*` endpoints
pub struct StocknetClient {
    http: HttpClient,
    base_url: String,
    interceptor: AuthInterceptor,
}

/// `Auth/profile` is documented as a bare payload but some deployments wrap it
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileBody {
    Envelope(ApiResponse<UserIdentity>),
    Raw(UserIdentity),
}

impl StocknetClient {
    /// Create a client for the configured API
    pub fn new(config: &Config, interceptor: AuthInterceptor) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent(concat!("stocknet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            interceptor,
        })
    }

    /// Create a client against an explicit base URL
    #[allow(dead_code)]
    pub fn with_base_url(base_url: &str, interceptor: AuthInterceptor) -> Result<Self> {
        let config = Config {
            api_url: base_url.to_string(),
            ..Config::default()
        };
        Self::new(&config, interceptor)
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send through the interceptor and return status plus body text
    async fn dispatch(&self, builder: RequestBuilder) -> Result<(StatusCode, String)> {
        let mut request = builder.build().map_err(ApiError::from)?;
        self.interceptor.authorize(&mut request);

        // Path only: validateToken carries the token in its query string
        let method = request.method().clone();
        let path = request.url().path().to_string();
        log::debug!("{} {}", method, path);

        let response = self.http.execute(request).await.map_err(ApiError::from)?;
        let status = response.status();
        log::debug!("{} {} -> {}", method, path, status);

        let body = response.text().await;
        self.interceptor
            .inspect(&path, status, body.as_deref().unwrap_or_default())?;

        let body =
            body.map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        Ok((status, body))
    }

    /// Request whose success body is `T`
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let (status, body) = self.dispatch(builder).await?;

        if status.is_success() {
            parse_body(&body)
        } else {
            Err(status_error(status, body).into())
        }
    }

    /// Request answering with an `ApiResponse` envelope.
    ///
    /// Client-error statuses that still carry an envelope are business
    /// failures, returned as `Ok` with `success: false`.
    async fn call<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<ApiResponse<T>> {
        let (status, body) = self.dispatch(builder).await?;

        if status.is_success() {
            return parse_body(&body);
        }

        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<T>>(&body) {
                return Ok(envelope);
            }
        }

        Err(status_error(status, body).into())
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse response: {}. Body was: {}", e, body))
            .into()
    })
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    let body_or = |fallback: String| if body.trim().is_empty() { fallback } else { body.clone() };

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(None),
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(body_or("Resource not found".to_string())),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(body_or("Bad request".to_string()))
        }
        status if status.is_server_error() => {
            ApiError::ServerError(body_or(format!("Server error: {}", status)))
        }
        _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}

#[async_trait]
impl AuthApi for StocknetClient {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<AuthResponse>> {
        self.call(self.http.post(self.url("Auth/register")).json(request))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<AuthResponse>> {
        self.call(self.http.post(self.url("Auth/login")).json(request))
            .await
    }

    async fn get_profile(&self) -> Result<UserIdentity> {
        let body: ProfileBody = self.fetch(self.http.get(self.url("Auth/profile"))).await?;

        match body {
            ProfileBody::Raw(user) => Ok(user),
            ProfileBody::Envelope(ApiResponse {
                data: Some(user), ..
            }) => Ok(user),
            ProfileBody::Envelope(envelope) => Err(ApiError::InvalidResponse(
                envelope.message_or("Profile response had no data").to_string(),
            )
            .into()),
        }
    }

    async fn update_profile(&self, user: &UserIdentity) -> Result<ApiResponse<UserIdentity>> {
        self.call(self.http.put(self.url("Auth/updateProfile")).json(user))
            .await
    }

    async fn validate_token(&self, token: &str) -> Result<ApiResponse<Value>> {
        self.call(
            self.http
                .get(self.url("Auth/validateToken"))
                .query(&[("token", token)]),
        )
        .await
    }
}
