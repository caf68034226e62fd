//! Static site builder for roldocs.
//!
//! Renders the landing page, the documentation pages and the 404 page for
//! every configured locale, checks links against the generated routes and
//! writes the site to disk.

pub mod assets;
pub mod builder;
pub mod docs;
pub mod landing;
pub mod links;
pub mod markdown;
pub mod navigation;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, CheckReport, StaticBuilder};
pub use landing::{FeatureItem, Hero, FEATURES, HERO};
pub use links::{BrokenLink, LinkKind};
