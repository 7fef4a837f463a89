//! # Resource Kinds
//!
//! The closed set of resources the portfolio API serves, and the one mapping from
//! each kind to its endpoint path and result shape.
//!
//! Two views of the same mapping exist:
//!
//! - [`Resource`] is the static view. Each kind has a zero-sized marker type
//!   ([`ProfileResource`], [`ProjectsResource`], ...) naming its [`ResourceKind`]
//!   and its decoded `Output`, so `ApiClient::fetch::<ProjectsResource>()` returns
//!   a `Vec<Project>` without any runtime check.
//! - [`ResourceKind`] + [`ResourcePayload`] is the dynamic view used where all
//!   five kinds flow through the same code (the load coordinator, the store, the
//!   HTTP routes). [`ResourceKind::decode`] dispatches by exhaustive `match`.

use crate::model::{Education, Experience, Profile, Project, Technology};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Display};

/// One of the five data categories the portfolio is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Profile,
    Projects,
    Experiences,
    Education,
    Technologies,
}

impl ResourceKind {
    /// Every kind, in the order sections are laid out.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Profile,
        ResourceKind::Projects,
        ResourceKind::Experiences,
        ResourceKind::Education,
        ResourceKind::Technologies,
    ];

    /// Selector name, as used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Profile => "profile",
            ResourceKind::Projects => "projects",
            ResourceKind::Experiences => "experiences",
            ResourceKind::Education => "education",
            ResourceKind::Technologies => "technologies",
        }
    }

    /// Endpoint path relative to the API base (`/api` on the server).
    pub const fn path(self) -> &'static str {
        match self {
            ResourceKind::Profile => "/profile",
            ResourceKind::Projects => "/projects",
            ResourceKind::Experiences => "/experiences",
            ResourceKind::Education => "/education",
            ResourceKind::Technologies => "/technologies",
        }
    }

    /// Whether the resource is a single record rather than a collection.
    pub const fn is_singleton(self) -> bool {
        matches!(self, ResourceKind::Profile)
    }

    /// Decodes a JSON body into the payload shape for this kind.
    pub fn decode(self, body: &[u8]) -> Result<ResourcePayload, serde_json::Error> {
        match self {
            ResourceKind::Profile => ProfileResource::decode(body).map(ProfileResource::into_payload),
            ResourceKind::Projects => ProjectsResource::decode(body).map(ProjectsResource::into_payload),
            ResourceKind::Experiences => {
                ExperiencesResource::decode(body).map(ExperiencesResource::into_payload)
            }
            ResourceKind::Education => {
                EducationResource::decode(body).map(EducationResource::into_payload)
            }
            ResourceKind::Technologies => {
                TechnologiesResource::decode(body).map(TechnologiesResource::into_payload)
            }
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded resource, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    Profile(Profile),
    Projects(Vec<Project>),
    Experiences(Vec<Experience>),
    Education(Vec<Education>),
    Technologies(Vec<Technology>),
}

impl ResourcePayload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourcePayload::Profile(_) => ResourceKind::Profile,
            ResourcePayload::Projects(_) => ResourceKind::Projects,
            ResourcePayload::Experiences(_) => ResourceKind::Experiences,
            ResourcePayload::Education(_) => ResourceKind::Education,
            ResourcePayload::Technologies(_) => ResourceKind::Technologies,
        }
    }

    /// Number of records carried (1 for the profile).
    pub fn len(&self) -> usize {
        match self {
            ResourcePayload::Profile(_) => 1,
            ResourcePayload::Projects(items) => items.len(),
            ResourcePayload::Experiences(items) => items.len(),
            ResourcePayload::Education(items) => items.len(),
            ResourcePayload::Technologies(items) => items.len(),
        }
    }

    /// Serializes the payload as the API body for its kind.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            ResourcePayload::Profile(profile) => serde_json::to_value(profile),
            ResourcePayload::Projects(items) => serde_json::to_value(items),
            ResourcePayload::Experiences(items) => serde_json::to_value(items),
            ResourcePayload::Education(items) => serde_json::to_value(items),
            ResourcePayload::Technologies(items) => serde_json::to_value(items),
        }
    }
}

/// Static description of one resource kind: which endpoint, which result type.
pub trait Resource: Send + Sync + 'static {
    /// The kind this marker stands for.
    const KIND: ResourceKind;

    /// The decoded response body.
    type Output: DeserializeOwned + Serialize + Send + 'static;

    /// Decodes a response body into [`Resource::Output`].
    fn decode(body: &[u8]) -> Result<Self::Output, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Wraps a decoded value into the tagged payload.
    fn into_payload(output: Self::Output) -> ResourcePayload;
}

/// `GET /profile`: a single [`Profile`].
pub struct ProfileResource;
/// `GET /projects`: projects, newest first.
pub struct ProjectsResource;
/// `GET /experiences`: experience entries by rank.
pub struct ExperiencesResource;
/// `GET /education`: education entries by rank.
pub struct EducationResource;
/// `GET /technologies`: technologies by rank.
pub struct TechnologiesResource;

impl Resource for ProfileResource {
    const KIND: ResourceKind = ResourceKind::Profile;
    type Output = Profile;

    fn into_payload(output: Profile) -> ResourcePayload {
        ResourcePayload::Profile(output)
    }
}

impl Resource for ProjectsResource {
    const KIND: ResourceKind = ResourceKind::Projects;
    type Output = Vec<Project>;

    fn into_payload(output: Vec<Project>) -> ResourcePayload {
        ResourcePayload::Projects(output)
    }
}

impl Resource for ExperiencesResource {
    const KIND: ResourceKind = ResourceKind::Experiences;
    type Output = Vec<Experience>;

    fn into_payload(output: Vec<Experience>) -> ResourcePayload {
        ResourcePayload::Experiences(output)
    }
}

impl Resource for EducationResource {
    const KIND: ResourceKind = ResourceKind::Education;
    type Output = Vec<Education>;

    fn into_payload(output: Vec<Education>) -> ResourcePayload {
        ResourcePayload::Education(output)
    }
}

impl Resource for TechnologiesResource {
    const KIND: ResourceKind = ResourceKind::Technologies;
    type Output = Vec<Technology>;

    fn into_payload(output: Vec<Technology>) -> ResourcePayload {
        ResourcePayload::Technologies(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_distinct_and_stable() {
        let paths: HashSet<&str> = ResourceKind::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(paths.len(), ResourceKind::ALL.len());

        for kind in ResourceKind::ALL {
            assert_eq!(kind.path(), kind.path());
            assert_eq!(kind.path(), format!("/{}", kind.name()));
        }
    }

    #[test]
    fn test_only_profile_is_singleton() {
        let singletons: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|k| k.is_singleton())
            .collect();
        assert_eq!(singletons, vec![ResourceKind::Profile]);
    }

    #[test]
    fn test_decode_preserves_server_order() {
        let body = br#"[
            {"id":3,"name":"Rust","order":1,"createdAt":"2025-01-01T00:00:00Z"},
            {"id":1,"name":"Go","order":2,"createdAt":"2025-01-01T00:00:00Z"}
        ]"#;
        let payload = ResourceKind::Technologies.decode(body).unwrap();
        match payload {
            ResourcePayload::Technologies(techs) => {
                let ids: Vec<i64> = techs.iter().map(|t| t.id).collect();
                assert_eq!(ids, vec![3, 1]);
            }
            other => panic!("Expected technologies, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_decode_rejects_array_for_profile() {
        assert!(ResourceKind::Profile.decode(b"[]").is_err());
    }

    #[test]
    fn test_payload_kind_matches_decoder() {
        for kind in ResourceKind::ALL {
            let body: &[u8] = if kind.is_singleton() {
                br#"{"id":1,"name":"A","title":"B","bio":"C","createdAt":"2025-01-01T00:00:00Z"}"#
            } else {
                b"[]"
            };
            assert_eq!(kind.decode(body).unwrap().kind(), kind);
        }
    }
}
