use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use slackr_types::api::{
    AuthResponse, ChannelListResponse, CreateChannelRequest, CreateChannelResponse, LoginRequest,
    MessageBody, MessagePage, ReactRequest, RegisterRequest, UpdateChannelRequest,
};
use slackr_types::{
    ChannelDetail, ChannelId, ChannelSummary, Message, MessageId, ReactKind, UserId, UserProfile,
};

use crate::error::Result;
use crate::transport::{Method, Transport};

/// Typed calls for every backend route the client uses.
pub struct Backend<T> {
    transport: Arc<T>,
}

impl<T> Clone for Backend<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> Backend<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<R> {
        let value = self.transport.request(method, path, token, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn call_unit(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<()> {
        self.transport.request(method, path, token, body).await?;
        Ok(())
    }

    fn body(payload: &impl Serialize) -> Result<Option<Value>> {
        Ok(Some(serde_json::to_value(payload)?))
    }

    // -- Auth --

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        self.call(Method::Post, "auth/register", None, Self::body(req)?)
            .await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        self.call(Method::Post, "auth/login", None, Self::body(req)?)
            .await
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.call_unit(Method::Post, "auth/logout", Some(token), None)
            .await
    }

    // -- Users --

    pub async fn user(&self, token: &str, user_id: UserId) -> Result<UserProfile> {
        self.call(Method::Get, &format!("user/{user_id}"), Some(token), None)
            .await
    }

    // -- Channels --

    pub async fn channels(&self, token: &str) -> Result<Vec<ChannelSummary>> {
        let resp: ChannelListResponse = self.call(Method::Get, "channel", Some(token), None).await?;
        Ok(resp.channels)
    }

    pub async fn create_channel(
        &self,
        token: &str,
        req: &CreateChannelRequest,
    ) -> Result<CreateChannelResponse> {
        self.call(Method::Post, "channel", Some(token), Self::body(req)?)
            .await
    }

    pub async fn channel(&self, token: &str, channel_id: ChannelId) -> Result<ChannelDetail> {
        self.call(Method::Get, &format!("channel/{channel_id}"), Some(token), None)
            .await
    }

    pub async fn update_channel(
        &self,
        token: &str,
        channel_id: ChannelId,
        req: &UpdateChannelRequest,
    ) -> Result<()> {
        self.call_unit(
            Method::Put,
            &format!("channel/{channel_id}"),
            Some(token),
            Self::body(req)?,
        )
        .await
    }

    pub async fn join_channel(&self, token: &str, channel_id: ChannelId) -> Result<()> {
        self.call_unit(Method::Post, &format!("channel/{channel_id}/join"), Some(token), None)
            .await
    }

    pub async fn leave_channel(&self, token: &str, channel_id: ChannelId) -> Result<()> {
        self.call_unit(Method::Post, &format!("channel/{channel_id}/leave"), Some(token), None)
            .await
    }

    // -- Messages --

    pub async fn messages(
        &self,
        token: &str,
        channel_id: ChannelId,
        start: usize,
    ) -> Result<Vec<Message>> {
        let page: MessagePage = self
            .call(
                Method::Get,
                &format!("message/{channel_id}?start={start}"),
                Some(token),
                None,
            )
            .await?;
        Ok(page.messages)
    }

    pub async fn send_message(
        &self,
        token: &str,
        channel_id: ChannelId,
        body: &MessageBody,
    ) -> Result<()> {
        self.call_unit(
            Method::Post,
            &format!("message/{channel_id}"),
            Some(token),
            Self::body(body)?,
        )
        .await
    }

    pub async fn edit_message(
        &self,
        token: &str,
        channel_id: ChannelId,
        message_id: MessageId,
        body: &MessageBody,
    ) -> Result<()> {
        self.call_unit(
            Method::Put,
            &format!("message/{channel_id}/{message_id}"),
            Some(token),
            Self::body(body)?,
        )
        .await
    }

    pub async fn delete_message(
        &self,
        token: &str,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<()> {
        self.call_unit(
            Method::Delete,
            &format!("message/{channel_id}/{message_id}"),
            Some(token),
            None,
        )
        .await
    }

    /// Pins when `pinned` is true, unpins otherwise.
    pub async fn set_pinned(
        &self,
        token: &str,
        channel_id: ChannelId,
        message_id: MessageId,
        pinned: bool,
    ) -> Result<()> {
        let action = if pinned { "pin" } else { "unpin" };
        self.call_unit(
            Method::Post,
            &format!("message/{action}/{channel_id}/{message_id}"),
            Some(token),
            None,
        )
        .await
    }

    /// Reacts when `on` is true, unreacts otherwise.
    pub async fn set_reaction(
        &self,
        token: &str,
        channel_id: ChannelId,
        message_id: MessageId,
        kind: ReactKind,
        on: bool,
    ) -> Result<()> {
        let action = if on { "react" } else { "unreact" };
        self.call_unit(
            Method::Post,
            &format!("message/{action}/{channel_id}/{message_id}"),
            Some(token),
            Self::body(&ReactRequest { react: kind })?,
        )
        .await
    }
}
