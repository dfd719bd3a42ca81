use std::collections::BTreeSet;

use tracing::debug;

use slackr_types::api::MessageBody;
use slackr_types::{Message, MessageId, ReactKind, UserId, UserProfile};

use crate::error::{ClientError, Result};
use crate::transport::Transport;
use crate::view::{Placement, format};

use super::{App, Completion, PageKind, Ticket};

impl<T: Transport> App<T> {
    pub(super) fn load_page(&mut self, token: String, ticket: Ticket, kind: PageKind, start: usize) {
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::Page {
                ticket,
                kind,
                result: backend.messages(&token, ticket.channel_id, start).await,
            }
        });
    }

    pub(super) fn load_more(&mut self) {
        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let start = self.session.message_cursor();
        self.load_page(token, ticket, PageKind::More, start);
    }

    pub(super) fn page_loaded(&mut self, ticket: Ticket, kind: PageKind, result: Result<Vec<Message>>) {
        if !self.is_current(ticket, "message page") {
            return;
        }
        let messages = match result {
            Ok(messages) => messages,
            Err(e) => return self.fail(e),
        };

        let user_id = self.session.user_id();
        let shown: &[Message] = match kind {
            PageKind::First | PageKind::More => {
                self.view.main.load_more = messages.len() >= self.config.page_size;
                &messages
            }
            PageKind::Sent => match messages.first() {
                Some(newest) => std::slice::from_ref(newest),
                None => &[],
            },
        };
        let placement = if kind == PageKind::Sent {
            Placement::Before
        } else {
            Placement::After
        };

        let inserted = self.view.render_message_page(shown, placement, user_id);
        self.session.advance_cursor(inserted);
        debug!(
            channel_id = ticket.channel_id,
            fetched = messages.len(),
            inserted,
            cursor = self.session.message_cursor(),
            "message page rendered"
        );

        let senders: BTreeSet<UserId> = shown.iter().map(|m| m.sender).collect();
        self.fetch_sender_names(ticket, senders);
    }

    /// Cards go up with their sender pending; names arrive per sender.
    fn fetch_sender_names(&mut self, ticket: Ticket, senders: BTreeSet<UserId>) {
        if senders.is_empty() {
            return;
        }
        let Some(token) = self.require_token() else {
            return;
        };
        for sender_id in senders {
            let backend = self.backend.clone();
            let token = token.clone();
            self.spawn(async move {
                Completion::SenderName {
                    ticket,
                    sender_id,
                    result: backend.user(&token, sender_id).await,
                }
            });
        }
    }

    pub(super) fn sender_name(&mut self, ticket: Ticket, sender_id: UserId, result: Result<UserProfile>) {
        if !self.is_current(ticket, "sender name") {
            return;
        }
        match result {
            Ok(profile) => {
                self.view.fill_sender_name(sender_id, &profile.name);
            }
            Err(e) => self.fail(e),
        }
    }

    pub(super) fn send_message(&mut self) {
        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let text = self.view.compose.text.clone();
        if text.trim().is_empty() {
            return self.fail(ClientError::Validation("Message must contain text".into()));
        }

        let body = MessageBody {
            message: text,
            image: self.view.compose.image.clone(),
        };
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::MessageSent {
                ticket,
                result: backend.send_message(&token, ticket.channel_id, &body).await,
            }
        });
    }

    pub(super) fn message_sent(&mut self, ticket: Ticket, result: Result<()>) {
        if !self.is_current(ticket, "sent message") {
            return;
        }
        match result {
            Ok(()) => {
                self.view.compose.text.clear();
                self.view.compose.image = None;
                if let Some(token) = self.require_token() {
                    self.load_page(token, ticket, PageKind::Sent, 0);
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// A card's Edit/Save button.
    pub(super) fn edit_message(&mut self, id: MessageId) {
        let Some(card) = self.view.message_mut(id).filter(|c| c.owned) else {
            return;
        };
        if !card.is_editing() {
            card.begin_edit();
            return;
        }

        let draft = card.draft().unwrap_or_default();
        let rejection = if draft.trim().is_empty() {
            Some("Message must contain text")
        } else if draft == card.text {
            Some("Message must not be identical to existing message")
        } else {
            None
        };
        if let Some(message) = rejection {
            return self.fail(ClientError::Validation(message.into()));
        }

        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let Some(card) = self.view.message_mut(id) else {
            return;
        };
        let Some(text) = card.take_draft() else {
            return;
        };
        let previous = (
            std::mem::replace(&mut card.text, text.clone()),
            card.edited_at.replace(format::now()),
        );
        let body = MessageBody {
            message: text,
            image: card.image.clone(),
        };
        self.view.refresh_pin_clone(id);

        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::MessageEdited {
                ticket,
                id,
                previous,
                result: backend
                    .edit_message(&token, ticket.channel_id, id, &body)
                    .await,
            }
        });
    }

    pub(super) fn set_message_draft(&mut self, id: MessageId, text: String) {
        if let Some(card) = self.view.message_mut(id) {
            card.set_draft(text);
        }
    }

    pub(super) fn cancel_message_edit(&mut self, id: MessageId) {
        if let Some(card) = self.view.message_mut(id) {
            card.cancel_edit();
        }
    }

    pub(super) fn message_edited(
        &mut self,
        ticket: Ticket,
        id: MessageId,
        previous: (String, Option<String>),
        result: Result<()>,
    ) {
        if !self.is_current(ticket, "message edit") {
            return;
        }
        if let Err(e) = result {
            if let Some(card) = self.view.message_mut(id) {
                let (text, edited_at) = previous;
                card.text = text;
                card.edited_at = edited_at;
            }
            self.view.refresh_pin_clone(id);
            self.fail(e);
        }
    }

    pub(super) fn delete_message(&mut self, id: MessageId) {
        if !self.view.message(id).is_some_and(|c| c.owned) {
            return;
        }
        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::MessageDeleted {
                ticket,
                id,
                result: backend.delete_message(&token, ticket.channel_id, id).await,
            }
        });
    }

    pub(super) fn message_deleted(&mut self, ticket: Ticket, id: MessageId, result: Result<()>) {
        if !self.is_current(ticket, "message delete") {
            return;
        }
        match result {
            Ok(()) => {
                if self.view.remove_message(id) {
                    self.session.retreat_cursor();
                }
            }
            Err(e) => self.fail(e),
        }
    }

    pub(super) fn toggle_pin(&mut self, id: MessageId) {
        if !self.view.message(id).is_some_and(|c| !c.pin.is_pending()) {
            return;
        }
        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let Some(pinned) = self.view.begin_pin_toggle(id) else {
            return;
        };

        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::PinSet {
                ticket,
                id,
                result: backend
                    .set_pinned(&token, ticket.channel_id, id, pinned)
                    .await,
            }
        });
    }

    pub(super) fn pin_set(&mut self, ticket: Ticket, id: MessageId, result: Result<()>) {
        if !self.is_current(ticket, "pin") {
            return;
        }
        self.view.finish_pin_toggle(id, result.is_ok());
        if let Err(e) = result {
            self.fail(e);
        }
    }

    pub(super) fn toggle_react(&mut self, id: MessageId, kind: ReactKind) {
        let ready = self
            .view
            .message(id)
            .and_then(|c| c.reactions.get(kind))
            .is_some_and(|state| !state.is_pending());
        if !ready {
            return;
        }
        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let Some(on) = self.view.begin_react_toggle(id, kind) else {
            return;
        };

        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::ReactSet {
                ticket,
                id,
                kind,
                result: backend
                    .set_reaction(&token, ticket.channel_id, id, kind, on)
                    .await,
            }
        });
    }

    pub(super) fn react_set(
        &mut self,
        ticket: Ticket,
        id: MessageId,
        kind: ReactKind,
        result: Result<()>,
    ) {
        if !self.is_current(ticket, "reaction") {
            return;
        }
        self.view.finish_react_toggle(id, kind, result.is_ok());
        if let Err(e) = result {
            self.fail(e);
        }
    }
}
