//! WordPress REST API detection
//!
//! Finds the REST API base URL for the site requested. Works with both
//! self-hosted sites and sites on the WordPress.com hosted platform.

use crate::error::{Error, Result};
use crate::http::{HttpClient, ReqwestClient};
use crate::site::{SiteInfo, SiteInfoProvider};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Hosted-platform gateway serving REST data for WordPress.com sites
const HOSTED_API_BASE: &str = "https://public-api.wordpress.com/rest/v1.1/sites/";

/// Path under the REST index where the core wp/v2 routes live
const WP_V2_PATH: &str = "wp/v2/";

/// REST API discovery marker emitted by self-hosted WordPress homepages,
/// e.g. `<link rel='https://api.w.org/' href='http://example.com/wp-json/' />`.
/// Matched textually; anything that deviates from this exact single-quoted
/// form counts as "not self-hosted", not as an error.
static DISCOVERY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<link rel='https://api\.w\.org/' href='(.*)' />").expect("valid marker pattern")
});

/// Outcome of a successful detection
///
/// Immutable once constructed; repeated detections with identical network
/// responses produce equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    site_url: String,
    name: String,
    description: String,
    rest_api_url: String,
    is_local: bool,
}

impl Detection {
    fn local(info: SiteInfo) -> Self {
        Self {
            site_url: info.site_url,
            name: info.name,
            description: info.description,
            rest_api_url: info.rest_api_url,
            is_local: true,
        }
    }

    fn remote(site_url: String, index: RestIndex) -> Self {
        Self {
            site_url,
            name: index.name,
            description: index.description,
            rest_api_url: index.rest_api_url,
            is_local: false,
        }
    }

    /// Normalized URL of the detected site
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Site name from the REST index (may be empty)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Site tagline/description from the REST index (may be empty)
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base URL for the site's wp/v2 REST routes
    pub fn rest_api_url(&self) -> &str {
        &self.rest_api_url
    }

    /// Whether the detection answered for the running site without network I/O
    pub fn is_local(&self) -> bool {
        self.is_local
    }
}

/// Metadata extracted from a REST API root index document
#[derive(Debug, Clone)]
struct RestIndex {
    name: String,
    description: String,
    rest_api_url: String,
}

/// REST API endpoint detector
///
/// Collaborators are injected so detection logic runs without a live network
/// or hosting environment: an [`HttpClient`] for the two possible round-trips
/// and a [`SiteInfoProvider`] for the no-input local path.
#[derive(Debug)]
pub struct Detector<C, P> {
    http: C,
    local: P,
}

impl<P: SiteInfoProvider> Detector<ReqwestClient, P> {
    /// Create a detector backed by the bundled reqwest client
    pub fn new(local: P) -> Result<Self> {
        Ok(Self {
            http: ReqwestClient::new()?,
            local,
        })
    }
}

impl<C: HttpClient, P: SiteInfoProvider> Detector<C, P> {
    /// Create a detector with an explicit HTTP client
    pub fn with_http_client(http: C, local: P) -> Self {
        Self { http, local }
    }

    /// Detect the REST API for the queried site
    ///
    /// With no usable input the local site info provider answers directly and
    /// no network call is made. Otherwise the input is normalized and probed
    /// as a self-hosted site first; a site that responds but shows no
    /// discovery marker is retried through the hosted-platform gateway. A
    /// failed probe is terminal - the fallback only runs after a clean
    /// "not found".
    pub async fn detect(&self, query: Option<&str>) -> Result<Detection> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let Some(raw) = query else {
            return Ok(Detection::local(self.local.current_site_info()));
        };

        let site_url = normalize_site_url(raw);
        match self.probe_self_hosted(&site_url).await? {
            Some(index) => Ok(Detection::remote(site_url, index)),
            None => {
                let index = self.resolve_hosted(&site_url).await?;
                Ok(Detection::remote(site_url, index))
            }
        }
    }

    /// Fetch the site's homepage and look for the REST API discovery marker
    ///
    /// `Ok(None)` means the site responded but shows no self-hosting
    /// evidence; the caller falls through to the hosted platform.
    async fn probe_self_hosted(&self, site_url: &str) -> Result<Option<RestIndex>> {
        let response = self.http.get(site_url).await?;

        let Some(captures) = DISCOVERY_MARKER.captures(&response.body) else {
            return Ok(None);
        };
        let index_url = &captures[1];

        self.fetch_index(index_url).await.map(Some)
    }

    /// Fetch and validate a REST API root index document
    ///
    /// The error shape is checked before the success shape: a payload
    /// exposing both `code`/`message` and `name`/`description` is an error.
    /// HTTP status is never inspected; hosted-platform errors arrive as 404s
    /// whose JSON body carries the real code and message.
    async fn fetch_index(&self, index_url: &str) -> Result<RestIndex> {
        let response = self.http.get(index_url).await?;

        let data: Value =
            serde_json::from_str(&response.body).map_err(|_| Error::InvalidApiResponse)?;
        let Some(object) = data.as_object() else {
            return Err(Error::InvalidApiResponse);
        };

        if let (Some(code), Some(message)) = (object.get("code"), object.get("message")) {
            return Err(Error::RemoteApi {
                code: json_text(code),
                message: json_text(message),
            });
        }

        if let (Some(name), Some(description)) = (object.get("name"), object.get("description")) {
            return Ok(RestIndex {
                name: json_text(name),
                description: json_text(description),
                rest_api_url: format!("{index_url}{WP_V2_PATH}"),
            });
        }

        Err(Error::UnexpectedResponse)
    }

    /// Probe the hosted-platform gateway keyed by the site's bare domain
    async fn resolve_hosted(&self, site_url: &str) -> Result<RestIndex> {
        let domain = site_url
            .strip_prefix("https://")
            .or_else(|| site_url.strip_prefix("http://"))
            .unwrap_or(site_url);

        self.fetch_index(&format!("{HOSTED_API_BASE}{domain}")).await
    }
}

/// Normalize raw user input into the site URL used for all requests
///
/// Prepends `http://` when no scheme is given and guarantees exactly one
/// trailing slash, so index URLs can be built by plain concatenation.
fn normalize_site_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    format!("{}/", with_scheme.trim_end_matches('/'))
}

/// Render a JSON value verbatim for code/message/name/description fields
fn json_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::site::StaticSiteInfo;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned outcome for one URL
    enum Canned {
        Body(String),
        Fail(String),
    }

    /// HTTP client serving canned responses and recording every requested URL
    struct MockHttp {
        responses: HashMap<String, Canned>,
        calls: Mutex<Vec<String>>,
    }

    impl MockHttp {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn body(mut self, url: &str, body: &str) -> Self {
            self.responses
                .insert(url.to_string(), Canned::Body(body.to_string()));
            self
        }

        fn error(mut self, url: &str, message: &str) -> Self {
            self.responses
                .insert(url.to_string(), Canned::Fail(message.to_string()));
            self
        }
    }

    #[async_trait]
    impl<'a> HttpClient for &'a MockHttp {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            self.calls.lock().unwrap().push(url.to_string());
            match self.responses.get(url) {
                Some(Canned::Body(body)) => Ok(HttpResponse {
                    status: 200,
                    body: body.clone(),
                }),
                Some(Canned::Fail(message)) => Err(Error::Network(message.clone())),
                None => Err(Error::Network(format!("unexpected request to {url}"))),
            }
        }
    }

    fn local_info() -> SiteInfo {
        SiteInfo {
            name: "My Blog".to_string(),
            description: "Just another blog".to_string(),
            site_url: "http://myblog.test/".to_string(),
            rest_api_url: "http://myblog.test/wp-json/wp/v2/".to_string(),
        }
    }

    fn detector(http: &MockHttp) -> Detector<&MockHttp, StaticSiteInfo> {
        Detector::with_http_client(http, StaticSiteInfo::new(local_info()))
    }

    const MARKER: &str =
        "<link rel='https://api.w.org/' href='http://example.com/wp-json/' />";

    #[test]
    fn normalize_adds_scheme_and_slash() {
        assert_eq!(normalize_site_url("example.com"), "http://example.com/");
    }

    #[test]
    fn normalize_keeps_https() {
        assert_eq!(
            normalize_site_url("https://example.com"),
            "https://example.com/"
        );
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_site_url("  example.com  "), "http://example.com/");
    }

    #[test]
    fn normalize_collapses_trailing_slashes() {
        assert_eq!(
            normalize_site_url("http://example.com//"),
            "http://example.com/"
        );
    }

    #[test]
    fn normalize_keeps_path() {
        assert_eq!(
            normalize_site_url("example.com/blog"),
            "http://example.com/blog/"
        );
    }

    #[tokio::test]
    async fn empty_query_answers_locally_without_network() {
        let http = MockHttp::new();
        let detection = detector(&http).detect(None).await.unwrap();

        assert!(detection.is_local());
        assert_eq!(detection.site_url(), "http://myblog.test/");
        assert_eq!(detection.name(), "My Blog");
        assert_eq!(detection.description(), "Just another blog");
        assert_eq!(detection.rest_api_url(), "http://myblog.test/wp-json/wp/v2/");
        assert!(http.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn whitespace_query_answers_locally() {
        let http = MockHttp::new();
        let detection = detector(&http).detect(Some("   ")).await.unwrap();

        assert!(detection.is_local());
        assert!(http.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn self_hosted_site_is_detected() {
        let http = MockHttp::new()
            .body("http://example.com/", &format!("<html><head>{MARKER}</head></html>"))
            .body(
                "http://example.com/wp-json/",
                r#"{"name":"N","description":"D","namespaces":["wp/v2"]}"#,
            );
        let detection = detector(&http).detect(Some("example.com")).await.unwrap();

        assert_eq!(detection.site_url(), "http://example.com/");
        assert_eq!(detection.name(), "N");
        assert_eq!(detection.description(), "D");
        assert_eq!(detection.rest_api_url(), "http://example.com/wp-json/wp/v2/");
        assert!(!detection.is_local());
    }

    #[tokio::test]
    async fn missing_marker_falls_back_to_hosted_platform() {
        let http = MockHttp::new()
            .body("http://example.com/", "<html><head></head></html>")
            .body(
                "https://public-api.wordpress.com/rest/v1.1/sites/example.com/",
                r#"{"name":"N2","description":"D2"}"#,
            );
        let detection = detector(&http).detect(Some("example.com")).await.unwrap();

        assert_eq!(detection.name(), "N2");
        assert_eq!(detection.description(), "D2");
        assert_eq!(
            detection.rest_api_url(),
            "https://public-api.wordpress.com/rest/v1.1/sites/example.com/wp/v2/"
        );
        assert!(!detection.is_local());
        assert_eq!(
            *http.calls.lock().unwrap(),
            vec![
                "http://example.com/".to_string(),
                "https://public-api.wordpress.com/rest/v1.1/sites/example.com/".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn double_quoted_marker_counts_as_not_self_hosted() {
        let http = MockHttp::new()
            .body(
                "http://example.com/",
                r#"<link rel="https://api.w.org/" href="http://example.com/wp-json/" />"#,
            )
            .body(
                "https://public-api.wordpress.com/rest/v1.1/sites/example.com/",
                r#"{"name":"N","description":"D"}"#,
            );
        let detection = detector(&http).detect(Some("example.com")).await.unwrap();

        assert!(detection.rest_api_url().starts_with(HOSTED_API_BASE));
    }

    #[tokio::test]
    async fn homepage_network_error_skips_fallback() {
        let http = MockHttp::new().error("http://example.com/", "connection refused");
        let err = detector(&http).detect(Some("example.com")).await.unwrap_err();

        assert!(matches!(err, Error::Network(ref m) if m == "connection refused"));
        assert_eq!(http.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn index_error_skips_fallback() {
        let http = MockHttp::new()
            .body("http://example.com/", MARKER)
            .body(
                "http://example.com/wp-json/",
                r#"{"code":"rest_no_route","message":"No route was found"}"#,
            );
        let err = detector(&http).detect(Some("example.com")).await.unwrap_err();

        assert!(matches!(
            err,
            Error::RemoteApi { ref code, ref message }
                if code == "rest_no_route" && message == "No route was found"
        ));
        assert_eq!(http.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn non_json_index_is_invalid() {
        let http = MockHttp::new()
            .body("http://example.com/", MARKER)
            .body("http://example.com/wp-json/", "<html>502 Bad Gateway</html>");
        let err = detector(&http).detect(Some("example.com")).await.unwrap_err();

        assert!(matches!(err, Error::InvalidApiResponse));
    }

    #[tokio::test]
    async fn json_array_index_is_invalid() {
        let http = MockHttp::new()
            .body("http://example.com/", MARKER)
            .body("http://example.com/wp-json/", r#"["name","description"]"#);
        let err = detector(&http).detect(Some("example.com")).await.unwrap_err();

        assert!(matches!(err, Error::InvalidApiResponse));
    }

    #[tokio::test]
    async fn unrecognized_object_is_unexpected() {
        let http = MockHttp::new()
            .body("http://example.com/", MARKER)
            .body("http://example.com/wp-json/", r#"{"version":"6.5"}"#);
        let err = detector(&http).detect(Some("example.com")).await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedResponse));
    }

    #[tokio::test]
    async fn error_shape_wins_over_success_shape() {
        let http = MockHttp::new().body("http://example.com/", MARKER).body(
            "http://example.com/wp-json/",
            r#"{"code":"c","message":"m","name":"N","description":"D"}"#,
        );
        let err = detector(&http).detect(Some("example.com")).await.unwrap_err();

        assert_eq!(err.code(), Some("c"));
    }

    #[tokio::test]
    async fn repeated_detections_are_identical() {
        let http = MockHttp::new()
            .body("http://example.com/", MARKER)
            .body(
                "http://example.com/wp-json/",
                r#"{"name":"N","description":"D"}"#,
            );
        let detector = detector(&http);

        let first = detector.detect(Some("example.com")).await.unwrap();
        let second = detector.detect(Some("example.com")).await.unwrap();
        assert_eq!(first, second);
    }
}
