//! Observable coordinator state: per-slot status, aggregate progress, resolved data.

use crate::model::{Education, Experience, Profile, Project, Technology};
use crate::resource::{ResourceKind, ResourcePayload};
use std::collections::BTreeMap;

/// Where one resource kind stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    Pending,
    Resolved,
    /// Settled without data. `cause` is the logged reason.
    Failed { cause: String },
}

impl SlotStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SlotStatus::Pending)
    }
}

/// Aggregate progress: how many kinds have settled out of how many.
///
/// Only ever grows; `is_ready` flips to true once and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub settled: usize,
    pub total: usize,
}

impl LoadProgress {
    pub const fn new(total: usize) -> Self {
        Self { settled: 0, total }
    }

    /// Settled share in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.settled as f64 / self.total as f64
    }

    /// Settled share as a whole percentage, rounded down.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.settled.min(self.total) * 100 / self.total) as u8
    }

    pub fn is_ready(&self) -> bool {
        self.settled >= self.total
    }
}

/// Everything the presentation layer consumes. Failed or pending kinds are empty.
///
/// Collections keep the order the server delivered them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedData {
    pub profile: Option<Profile>,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub technologies: Vec<Technology>,
}

impl LoadedData {
    pub(crate) fn apply(&mut self, payload: ResourcePayload) {
        match payload {
            ResourcePayload::Profile(profile) => self.profile = Some(profile),
            ResourcePayload::Projects(items) => self.projects = items,
            ResourcePayload::Experiences(items) => self.experiences = items,
            ResourcePayload::Education(items) => self.education = items,
            ResourcePayload::Technologies(items) => self.technologies = items,
        }
    }

    /// Whether the section for `kind` has anything to show.
    pub fn has(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Profile => self.profile.is_some(),
            ResourceKind::Projects => !self.projects.is_empty(),
            ResourceKind::Experiences => !self.experiences.is_empty(),
            ResourceKind::Education => !self.education.is_empty(),
            ResourceKind::Technologies => !self.technologies.is_empty(),
        }
    }
}

/// A point-in-time copy of the coordinator's state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSnapshot {
    pub slots: BTreeMap<ResourceKind, SlotStatus>,
    pub progress: LoadProgress,
    pub data: LoadedData,
}

impl LoadSnapshot {
    pub fn status(&self, kind: ResourceKind) -> Option<&SlotStatus> {
        self.slots.get(&kind)
    }
}
