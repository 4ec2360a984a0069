use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CollectorError, FollowedProfile, SocialGraph, TimelineTweet};
use crate::workflows::frens::domain::AccountId;

/// Social graph dump produced by an external fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphExport {
    pub own_id: AccountId,
    pub friends: Vec<FollowedProfile>,
    /// Ids of followed accounts that follow the operator back.
    #[serde(default)]
    pub followers: Vec<AccountId>,
    /// Timelines keyed by account id, newest tweet first. Accounts without an
    /// entry are treated as silent.
    #[serde(default)]
    pub timelines: HashMap<AccountId, Vec<TimelineTweet>>,
}

/// [`SocialGraph`] backed by a [`GraphExport`] file.
#[derive(Debug, Clone)]
pub struct ExportFileGraph {
    export: GraphExport,
    followers: HashSet<AccountId>,
}

impl ExportFileGraph {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CollectorError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CollectorError> {
        let export: GraphExport = serde_json::from_reader(reader)?;
        Ok(Self::new(export))
    }

    pub fn new(export: GraphExport) -> Self {
        let followers = export.followers.iter().cloned().collect();
        Self { export, followers }
    }
}

impl SocialGraph for ExportFileGraph {
    fn own_id(&self) -> Result<AccountId, CollectorError> {
        Ok(self.export.own_id.clone())
    }

    fn friends(&self) -> Result<Vec<FollowedProfile>, CollectorError> {
        Ok(self.export.friends.clone())
    }

    fn follows_back(&self, _own: &AccountId, fren: &AccountId) -> Result<bool, CollectorError> {
        Ok(self.followers.contains(fren))
    }

    fn timeline(&self, user: &AccountId) -> Result<Vec<TimelineTweet>, CollectorError> {
        Ok(self.export.timelines.get(user).cloned().unwrap_or_default())
    }
}
