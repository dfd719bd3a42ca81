use serde::{Deserialize, Serialize};

use crate::models::{ChannelId, ChannelSummary, Message, ReactKind, UserId};

// -- Auth --

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
}

// -- Channels --

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    pub channels: Vec<ChannelSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateChannelRequest {
    pub name: String,
    pub private: bool,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelResponse {
    pub channel_id: ChannelId,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateChannelRequest {
    pub name: String,
    pub description: String,
}

// -- Messages --

#[derive(Debug, Clone, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<Message>,
}

/// Body for both sending and editing a message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactRequest {
    pub react: ReactKind,
}

// -- Errors --

/// Envelope carried by 400 and 403 responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
