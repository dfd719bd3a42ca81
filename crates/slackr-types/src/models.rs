use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type ChannelId = u64;
pub type MessageId = u64;

/// Channel entry as returned by the channel list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub name: String,
    pub creator: UserId,
    pub private: bool,
    #[serde(default)]
    pub members: Vec<UserId>,
}

impl ChannelSummary {
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }
}

/// Full channel record. The detail endpoint does not echo the id back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDetail {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub creator: UserId,
    pub private: bool,
    #[serde(default)]
    pub members: Vec<UserId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactKind {
    Smile,
    Laugh,
    Sad,
    /// Reactions posted by other clients that this client has no control for.
    #[serde(other)]
    Unknown,
}

impl ReactKind {
    /// Kinds that have a control on every message card, in display order.
    pub const ALL: [ReactKind; 3] = [ReactKind::Smile, ReactKind::Laugh, ReactKind::Sad];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::Laugh => "laugh",
            Self::Sad => "sad",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ReactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub user: UserId,
    pub react: ReactKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    #[serde(rename = "message")]
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    pub sender: UserId,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub reacts: Vec<Reaction>,
}

impl Message {
    /// True when `user_id` has a reaction of `kind` on this message.
    pub fn reacted_by(&self, user_id: UserId, kind: ReactKind) -> bool {
        self.reacts
            .iter()
            .any(|r| r.user == user_id && r.react == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}
