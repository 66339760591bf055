//! Glowd: backend for an RGB LED jacket driven by social-media mentions.
//!
//! # Architecture
//!
//! ```text
//! HTTP layer (axum)
//!   │
//!   ├── /api/v1/color ──► platform.get_latest_mentions(limit)
//!   │                       │
//!   │                       ▼
//!   │                     scan (strip markup, first color wins)
//!   │                       │
//!   │                       ▼
//!   │                     color (hex > rgb() > palette name, effects)
//!   │
//!   ├── /api/v1/mentions   (cleaned mentions, no extraction)
//!   └── /api/v1/platforms  (registry listing)
//! ```
//!
//! The extraction engine (`color`) and the scanner (`scan`) are pure:
//! no I/O, no shared state, safe to call from any number of request
//! handlers. Everything that can fail — platform fetches, config,
//! auth — lives at the boundary and surfaces as HTTP status codes.
//!
//! # Usage
//!
//! ```ignore
//! use glowd::{extract_color, extract_effect};
//!
//! let color = extract_color("make the jacket spring green!").unwrap();
//! assert_eq!(color.name, "spring");
//!
//! let effect = extract_effect("fade to blue").unwrap();
//! assert_eq!(effect.keyword(), "fade");
//! ```

pub mod color;
pub mod config;
pub mod logging;
pub mod platform;
pub mod scan;
pub mod server;

pub use color::{default_color, extract_color, extract_effect, ColorDescriptor, Effect};
pub use config::{Config, ConfigError};
pub use platform::{connect_all, Bluesky, Mastodon, PlatformError, SocialPlatform};
pub use scan::{scan, strip_markup, Mention, ScanResult};
pub use server::{create_router, serve, AppState};
