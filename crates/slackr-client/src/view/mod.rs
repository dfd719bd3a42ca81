//! Headless mirror of the page.
//!
//! Every entity the user can see has exactly one node here, keyed by its
//! backend id. Controls carry explicit state; anything visual is derived
//! from it.

pub mod channel;
pub mod format;
pub mod message;
pub mod sidebar;
pub mod toggle;

use slackr_types::{ChannelDetail, ChannelId, ChannelSummary, Message, MessageId, ReactKind, UserId};

pub use channel::{ChannelDraft, ChannelKind, ChannelPane};
pub use message::{MessageCard, MessageList, PinClone, PinTray, Placement, Reactions, pin_clone_id};
pub use sidebar::{ChannelButton, Sidebar};
pub use toggle::ToggleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Login,
    Register,
    Home,
    NewChannel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    Error(String),
    /// Offer to join a channel the user tried to open without being a member.
    JoinChannel(ChannelId),
}

/// Message input box and its pending attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compose {
    pub text: String,
    pub image: Option<String>,
}

/// Right-hand side of the home page.
#[derive(Debug, Clone, Default)]
pub struct MainPane {
    /// `None` shows the placeholder.
    pub channel: Option<ChannelPane>,
    pub messages: MessageList,
    pub pins: PinTray,
    pub load_more: bool,
}

impl MainPane {
    pub fn placeholder_visible(&self) -> bool {
        self.channel.is_none()
    }

    fn showing(&self, channel_id: ChannelId) -> Option<&ChannelPane> {
        self.channel.as_ref().filter(|p| p.channel_id == channel_id)
    }

    fn showing_mut(&mut self, channel_id: ChannelId) -> Option<&mut ChannelPane> {
        self.channel.as_mut().filter(|p| p.channel_id == channel_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct View {
    pub page: Page,
    /// Navbar display name.
    pub username: Option<String>,
    pub sidebar: Sidebar,
    pub main: MainPane,
    pub compose: Compose,
    pub popup: Option<Popup>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the login page with nothing of the previous account left.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.popup = Some(Popup::Error(message.into()));
    }

    pub fn show_join_prompt(&mut self, channel_id: ChannelId) {
        self.popup = Some(Popup::JoinChannel(channel_id));
    }

    pub fn dismiss_popup(&mut self) -> Option<Popup> {
        self.popup.take()
    }

    // -- Channels --

    pub fn render_channel_list(
        &mut self,
        channels: &[ChannelSummary],
        user_id: Option<UserId>,
    ) {
        let active = self
            .main
            .channel
            .as_ref()
            .filter(|p| p.loaded)
            .map(|p| p.channel_id);
        self.sidebar.render(channels, user_id, active);
    }

    /// Shows an empty pane for `channel_id`, replacing whatever was open.
    pub fn open_channel_pane(&mut self, channel_id: ChannelId) {
        self.close_channel_pane();
        self.main.channel = Some(ChannelPane::loading(channel_id));
    }

    /// Hides the pane, dims its button, and drops its cards and pins.
    pub fn close_channel_pane(&mut self) -> Option<ChannelId> {
        let closed = self.main.channel.take().map(|p| p.channel_id);
        if let Some(id) = closed {
            self.sidebar.deactivate(id);
        }
        self.main.messages.clear();
        self.main.pins.clear();
        self.main.load_more = false;
        closed
    }

    /// Fills the pane and makes `channel_id` the only active channel.
    /// Returns false if the pane no longer shows that channel.
    pub fn render_channel_detail(&mut self, channel_id: ChannelId, detail: &ChannelDetail) -> bool {
        let Some(pane) = self.main.showing_mut(channel_id) else {
            return false;
        };
        pane.fill(detail);
        self.sidebar.set_active(Some(channel_id));
        true
    }

    pub fn set_channel_owner(&mut self, channel_id: ChannelId, name: &str) -> bool {
        match self.main.showing_mut(channel_id) {
            Some(pane) => {
                pane.owner = Some(name.to_string());
                true
            }
            None => false,
        }
    }

    pub fn channel_pane(&self, channel_id: ChannelId) -> Option<&ChannelPane> {
        self.main.showing(channel_id)
    }

    pub fn channel_pane_mut(&mut self, channel_id: ChannelId) -> Option<&mut ChannelPane> {
        self.main.showing_mut(channel_id)
    }

    // -- Messages --

    /// Builds one card per message not already shown and returns how many
    /// were inserted. Pinned messages also get their pin-tray copy.
    pub fn render_message_page(
        &mut self,
        messages: &[Message],
        placement: Placement,
        user_id: Option<UserId>,
    ) -> usize {
        let ordered: Box<dyn Iterator<Item = &Message> + '_> = match placement {
            Placement::After => Box::new(messages.iter()),
            // Prepend last-to-first so the page keeps its order at the top.
            Placement::Before => Box::new(messages.iter().rev()),
        };

        let mut inserted = 0;
        for msg in ordered {
            let card = MessageCard::from_message(msg, user_id);
            if self.main.messages.insert(card, placement) {
                inserted += 1;
                if msg.pinned {
                    self.pin(msg.id);
                }
            }
        }
        inserted
    }

    /// Fills the sender name on every card (and pin copy) from `sender_id`.
    pub fn fill_sender_name(&mut self, sender_id: UserId, name: &str) -> usize {
        let mut filled = 0;
        for card in self.main.messages.iter_mut().filter(|c| c.sender_id == sender_id) {
            card.sender_name = Some(name.to_string());
            filled += 1;
        }
        for clone in self.main.pins.iter_mut().filter(|c| c.card.sender_id == sender_id) {
            clone.card.sender_name = Some(name.to_string());
        }
        filled
    }

    pub fn message(&self, id: MessageId) -> Option<&MessageCard> {
        self.main.messages.get(id)
    }

    pub fn message_mut(&mut self, id: MessageId) -> Option<&mut MessageCard> {
        self.main.messages.get_mut(id)
    }

    /// Removes the card and its pin copy.
    pub fn remove_message(&mut self, id: MessageId) -> bool {
        self.main.pins.remove(id);
        self.main.messages.remove(id).is_some()
    }

    /// Copies the card's current content to its pin clone, if it has one.
    pub fn refresh_pin_clone(&mut self, id: MessageId) {
        if let Some(card) = self.main.messages.get(id) {
            self.main.pins.refresh(card);
        }
    }

    // -- Pins --

    /// Settled pin: lights the control and adds the tray copy.
    pub fn pin(&mut self, id: MessageId) -> bool {
        let Some(card) = self.main.messages.get_mut(id) else {
            return false;
        };
        card.pin = ToggleState::Active;
        self.sync_pin_clone(id);
        true
    }

    /// Settled unpin: dims the control and removes the tray copy.
    pub fn unpin(&mut self, id: MessageId) -> bool {
        let Some(card) = self.main.messages.get_mut(id) else {
            return false;
        };
        card.pin = ToggleState::Inactive;
        self.sync_pin_clone(id);
        true
    }

    /// Optimistically flips the pin. Returns the requested state, or `None`
    /// if the card is gone or a flip is already pending.
    pub fn begin_pin_toggle(&mut self, id: MessageId) -> Option<bool> {
        let target = self.main.messages.get_mut(id)?.pin.begin()?;
        self.sync_pin_clone(id);
        Some(target)
    }

    pub fn finish_pin_toggle(&mut self, id: MessageId, accepted: bool) {
        let Some(card) = self.main.messages.get_mut(id) else {
            return;
        };
        if accepted {
            card.pin.confirm();
        } else {
            card.pin.rollback();
        }
        self.sync_pin_clone(id);
    }

    fn sync_pin_clone(&mut self, id: MessageId) {
        match self.main.messages.get(id) {
            Some(card) if card.pin.is_lit() => self.main.pins.add(card),
            _ => {
                self.main.pins.remove(id);
            }
        }
    }

    // -- Reactions --

    pub fn begin_react_toggle(&mut self, id: MessageId, kind: ReactKind) -> Option<bool> {
        let card = self.main.messages.get_mut(id)?;
        let target = card.reactions.get_mut(kind)?.begin()?;
        self.refresh_pin_clone(id);
        Some(target)
    }

    pub fn finish_react_toggle(&mut self, id: MessageId, kind: ReactKind, accepted: bool) {
        let Some(state) = self
            .main
            .messages
            .get_mut(id)
            .and_then(|c| c.reactions.get_mut(kind))
        else {
            return;
        };
        if accepted {
            state.confirm();
        } else {
            state.rollback();
        }
        self.refresh_pin_clone(id);
    }
}
