//! Client for the ONYPHE internet scanning and threat intelligence API.
//!
//! Every endpoint method goes through one request pipeline: the path is
//! resolved against the base URL, the API key is attached as the `apikey`
//! query parameter, a single GET is sent and the JSON answer is returned
//! as an untyped [`serde_json::Value`]. Failures are reported as
//! [`OnypheError`] and never retried.
//!
//! Two API revisions are available, [`v1::Client`] and [`v2::Client`].
//!
//! ```no_run
//! # async fn run() -> onyphe_client::Result<()> {
//! let client = onyphe_client::v2::Client::from_env()?;
//! match client.summary_ip("8.8.8.8").await {
//!     Ok(Some(summary)) => println!("{}", summary),
//!     Ok(None) => println!("nothing known"),
//!     Err(onyphe_client::OnypheError::RateLimited) => eprintln!("slow down"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod path;
pub mod pipeline;
pub mod v1;
pub mod v2;
pub mod version;

pub use config::{ClientBuilder, DEFAULT_BASE_URL};
pub use error::{OnypheError, Result};
pub use pipeline::Pipeline;
pub use version::{ApiVersion, VersionProfile};
