use slackr_types::{Message, MessageId, ReactKind, UserId};

use super::format;
use super::toggle::ToggleState;

/// Where a rendered page goes relative to the cards already shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Below the existing cards (initial load and pagination).
    After,
    /// Above them (a message the user just sent).
    Before,
}

/// The three reaction controls on a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reactions {
    pub smile: ToggleState,
    pub laugh: ToggleState,
    pub sad: ToggleState,
}

impl Reactions {
    pub fn get(&self, kind: ReactKind) -> Option<ToggleState> {
        match kind {
            ReactKind::Smile => Some(self.smile),
            ReactKind::Laugh => Some(self.laugh),
            ReactKind::Sad => Some(self.sad),
            ReactKind::Unknown => None,
        }
    }

    pub fn get_mut(&mut self, kind: ReactKind) -> Option<&mut ToggleState> {
        match kind {
            ReactKind::Smile => Some(&mut self.smile),
            ReactKind::Laugh => Some(&mut self.laugh),
            ReactKind::Sad => Some(&mut self.sad),
            ReactKind::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCard {
    pub id: MessageId,
    pub sender_id: UserId,
    /// Filled once the sender lookup resolves.
    pub sender_name: Option<String>,
    pub text: String,
    pub sent_at: String,
    pub edited_at: Option<String>,
    pub image: Option<String>,
    /// Edit/delete controls. Decided once, when the card is built.
    pub owned: bool,
    pub pin: ToggleState,
    pub reactions: Reactions,
    draft: Option<String>,
}

impl MessageCard {
    pub fn from_message(msg: &Message, user_id: Option<UserId>) -> Self {
        let mut reactions = Reactions::default();
        if let Some(uid) = user_id {
            for kind in ReactKind::ALL {
                if let Some(state) = reactions.get_mut(kind) {
                    *state = ToggleState::settled(msg.reacted_by(uid, kind));
                }
            }
        }

        Self {
            id: msg.id,
            sender_id: msg.sender,
            sender_name: None,
            text: msg.text.clone(),
            sent_at: format::local_time(msg.sent_at),
            edited_at: msg.edited_at.map(format::local_time),
            image: msg.image.clone().filter(|img| !img.is_empty()),
            owned: user_id == Some(msg.sender),
            pin: ToggleState::Inactive,
            reactions,
            draft: None,
        }
    }

    pub fn element_id(&self) -> String {
        self.id.to_string()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn edit_button_label(&self) -> &'static str {
        if self.is_editing() { "Save" } else { "Edit" }
    }

    pub fn begin_edit(&mut self) {
        self.draft = Some(self.text.clone());
    }

    pub fn set_draft(&mut self, text: String) {
        if let Some(draft) = self.draft.as_mut() {
            *draft = text;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub fn take_draft(&mut self) -> Option<String> {
        self.draft.take()
    }
}

/// Cards for the open channel, top to bottom. Ids are unique.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    cards: Vec<MessageCard>,
}

impl MessageList {
    /// Returns false, leaving the list untouched, if a card with the same id is already shown.
    pub fn insert(&mut self, card: MessageCard, placement: Placement) -> bool {
        if self.contains(card.id) {
            return false;
        }
        match placement {
            Placement::After => self.cards.push(card),
            Placement::Before => self.cards.insert(0, card),
        }
        true
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: MessageId) -> Option<&MessageCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: MessageId) -> Option<&mut MessageCard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn remove(&mut self, id: MessageId) -> Option<MessageCard> {
        let idx = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageCard> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MessageCard> {
        self.cards.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Element id of the pin-tray copy of message `id`.
pub fn pin_clone_id(id: MessageId) -> String {
    format!("clone-{id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinClone {
    pub element_id: String,
    pub card: MessageCard,
}

/// Copies of pinned cards, in pin order.
#[derive(Debug, Clone, Default)]
pub struct PinTray {
    clones: Vec<PinClone>,
}

impl PinTray {
    /// Adds or refreshes the copy of `card`.
    pub fn add(&mut self, card: &MessageCard) {
        let element_id = pin_clone_id(card.id);
        match self.clones.iter_mut().find(|c| c.element_id == element_id) {
            Some(existing) => existing.card = card.clone(),
            None => self.clones.push(PinClone {
                element_id,
                card: card.clone(),
            }),
        }
    }

    /// Replaces the copy only if one exists.
    pub fn refresh(&mut self, card: &MessageCard) {
        if self.contains(card.id) {
            self.add(card);
        }
    }

    pub fn remove(&mut self, id: MessageId) -> bool {
        let element_id = pin_clone_id(id);
        let before = self.clones.len();
        self.clones.retain(|c| c.element_id != element_id);
        self.clones.len() != before
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: MessageId) -> Option<&PinClone> {
        let element_id = pin_clone_id(id);
        self.clones.iter().find(|c| c.element_id == element_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinClone> {
        self.clones.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PinClone> {
        self.clones.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    pub fn clear(&mut self) {
        self.clones.clear();
    }
}
