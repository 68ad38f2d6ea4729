//! LinkedIn link classification.

use super::ResolveError;
use url::Url;

/// Kind of LinkedIn entity a link points at.
///
/// The vocabulary is closed: anything other than `/company/` or `/in/`
/// (e.g. `/school/`, `/showcase/`) fails resolution rather than guessing
/// which fetch parameters would apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedInKind {
    Company,
    Profile,
}

impl LinkedInKind {
    /// Whether the profile data provider treats this entity as private.
    pub fn is_private(&self) -> bool {
        matches!(self, LinkedInKind::Profile)
    }
}

impl std::fmt::Display for LinkedInKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkedInKind::Company => write!(f, "company"),
            LinkedInKind::Profile => write!(f, "profile"),
        }
    }
}

/// Canonical id for a LinkedIn profile or company page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInTarget {
    pub kind: LinkedInKind,
    pub link_id: String,
}

impl LinkedInTarget {
    /// Parse a LinkedIn URL into an entity kind and link id.
    ///
    /// The first path segment selects the kind, the second is the id.
    pub fn parse(link: &str) -> Result<Self, ResolveError> {
        let url =
            Url::parse(link.trim()).map_err(|_| ResolveError::MalformedUrl(link.to_string()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(ResolveError::MalformedUrl(link.to_string()));
        }

        let kind = match segments[0] {
            "company" => LinkedInKind::Company,
            "in" => LinkedInKind::Profile,
            other => return Err(ResolveError::UnsupportedType(other.to_string())),
        };

        Ok(Self {
            kind,
            link_id: segments[1].to_string(),
        })
    }
}
