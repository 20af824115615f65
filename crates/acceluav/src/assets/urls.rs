//! Asset URL resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three kinds of static asset the site serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// glTF binary models under `3d-model/`.
    Models,
    /// Images under `images/`.
    Images,
    /// MP4 videos at the public root.
    Videos,
}

impl AssetKind {
    /// All kinds, in route order.
    pub const ALL: [Self; 3] = [Self::Models, Self::Images, Self::Videos];

    /// Path segment used by the API routes.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }

    /// Directory under the public root, or `None` for the root itself.
    #[must_use]
    pub fn subdir(self) -> Option<&'static str> {
        match self {
            Self::Models => Some("3d-model"),
            Self::Images => Some("images"),
            Self::Videos => None,
        }
    }

    /// The 404 message for a missing asset of this kind.
    #[must_use]
    pub fn not_found_message(self) -> &'static str {
        match self {
            Self::Models => "Model not found",
            Self::Images => "Image not found",
            Self::Videos => "Video not found",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.segment() == s)
            .ok_or_else(|| format!("unknown asset kind: {s}"))
    }
}

/// Builds public URLs for assets.
///
/// In local mode assets are addressed by their path under `public/`. With an
/// API base they go through the asset server's `/api/<kind>/` routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetUrls {
    api_base: Option<String>,
}

impl AssetUrls {
    /// Resolve to paths under the local `public/` directory.
    #[must_use]
    pub fn local() -> Self {
        Self { api_base: None }
    }

    /// Resolve through the asset server at `base`.
    #[must_use]
    pub fn api(base: impl AsRef<str>) -> Self {
        Self {
            api_base: Some(base.as_ref().trim_end_matches('/').to_string()),
        }
    }

    /// The API base, if in API mode.
    #[must_use]
    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    /// URL for asset `name` of the given kind.
    #[must_use]
    pub fn resolve(&self, kind: AssetKind, name: &str) -> String {
        match &self.api_base {
            Some(base) => format!("{base}/api/{}/{name}", kind.segment()),
            None => match kind.subdir() {
                Some(dir) => format!("/{dir}/{name}"),
                None => format!("/{name}"),
            },
        }
    }
}
