use slackr_types::{ChannelId, ChannelSummary, UserId};

/// Identifies which opening of a channel a request belongs to. Bumped every
/// time the open channel changes, so completions issued for an earlier view
/// can be recognised and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Client-held session. Setters do no validation; the controller is
/// responsible for sequencing them coherently.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    user_id: Option<UserId>,
    name: Option<String>,
    channel_id: Option<ChannelId>,
    channels: Vec<ChannelSummary>,
    message_cursor: usize,
    generation: Generation,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn set_user_id(&mut self, user_id: Option<UserId>) {
        self.user_id = user_id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn channel_id(&self) -> Option<ChannelId> {
        self.channel_id
    }

    /// Also starts a new generation, even when the id is unchanged.
    pub fn set_channel_id(&mut self, channel_id: Option<ChannelId>) {
        self.channel_id = channel_id;
        self.generation = self.generation.next();
    }

    pub fn channels(&self) -> &[ChannelSummary] {
        &self.channels
    }

    pub fn set_channels(&mut self, channels: Vec<ChannelSummary>) {
        self.channels = channels;
    }

    pub fn rename_channel(&mut self, channel_id: ChannelId, name: &str) {
        if let Some(ch) = self.channels.iter_mut().find(|c| c.id == channel_id) {
            ch.name = name.to_string();
        }
    }

    pub fn message_cursor(&self) -> usize {
        self.message_cursor
    }

    pub fn set_message_cursor(&mut self, cursor: usize) {
        self.message_cursor = cursor;
    }

    pub fn advance_cursor(&mut self, loaded: usize) {
        self.message_cursor += loaded;
    }

    /// A loaded message was deleted; later pages start one earlier.
    pub fn retreat_cursor(&mut self) {
        self.message_cursor = self.message_cursor.saturating_sub(1);
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// Sign-out: channel first, then credentials.
    pub fn clear(&mut self) {
        self.set_channel_id(None);
        self.token = None;
        self.user_id = None;
        self.name = None;
        self.channels.clear();
        self.message_cursor = 0;
    }
}
