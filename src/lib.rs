//! REST API Detector - locate a WordPress site's REST API endpoint
//!
//! Determines whether a site exposes a WordPress REST API, where its base
//! endpoint lives, and what the site calls itself. Handles self-hosted
//! installations (via the REST API discovery marker on the homepage) and
//! sites on the WordPress.com hosted platform (via the public-api gateway).
//!
//! # Example
//!
//! ```no_run
//! use rest_api_detector::{Detector, SiteInfo, StaticSiteInfo};
//!
//! #[tokio::main]
//! async fn main() -> rest_api_detector::Result<()> {
//!     let local = StaticSiteInfo::new(SiteInfo {
//!         name: "My Blog".to_string(),
//!         description: "Just another blog".to_string(),
//!         site_url: "http://myblog.test/".to_string(),
//!         rest_api_url: "http://myblog.test/wp-json/wp/v2/".to_string(),
//!     });
//!     let detector = Detector::new(local)?;
//!     let detection = detector.detect(Some("example.com")).await?;
//!     println!("REST API: {}", detection.rest_api_url());
//!     Ok(())
//! }
//! ```

pub mod detector;
pub mod error;
pub mod http;
pub mod output;
pub mod site;

pub use detector::{Detection, Detector};
pub use error::{Error, Result};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use output::{OutputFormat, output_detection};
pub use site::{SiteInfo, SiteInfoProvider, StaticSiteInfo};
