pub mod api;
pub mod models;

pub use models::{
    ChannelDetail, ChannelId, ChannelSummary, Message, MessageId, ReactKind, Reaction, UserId,
    UserProfile,
};
