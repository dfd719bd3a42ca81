//! Interaction controller.
//!
//! [`App::dispatch`] applies one UI event synchronously: it validates input,
//! updates the view optimistically where the interaction calls for it, and
//! starts any backend calls as in-flight tasks. Nothing touches the session
//! or view from those tasks; their results come back as completions that
//! [`App::next_completion`] applies on the caller's context. Completions
//! that belong to a channel carry the [`Ticket`] they were issued under and
//! are dropped if the user has since moved on.

mod auth;
mod channels;
mod messages;

use std::future::Future;

use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use slackr_types::api::{AuthResponse, CreateChannelResponse};
use slackr_types::{ChannelDetail, ChannelId, ChannelSummary, Message, MessageId, ReactKind, UserId, UserProfile};

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::{Generation, Session};
use crate::transport::Transport;
use crate::view::{ChannelDraft, View};

/// A user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ShowRegister,
    ShowLogin,
    LogIn {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        password_confirm: String,
        name: String,
    },
    SignOut,
    ToggleSidebar,

    /// Click on a sidebar button.
    SelectChannel(ChannelId),
    /// Accept the join prompt.
    JoinChannel,
    /// Decline the join prompt.
    RejectJoin,
    DismissPopup,
    LeaveChannel,
    OpenNewChannelForm,
    CancelNewChannel,
    CreateChannel {
        name: String,
        description: String,
        private: bool,
    },
    /// The channel Edit/Save button.
    EditChannel,
    SetChannelDraft {
        name: String,
        description: String,
    },
    CancelChannelEdit,

    SetComposeText(String),
    AttachImage(Option<String>),
    SendMessage,
    /// A card's Edit/Save button.
    EditMessage(MessageId),
    SetMessageDraft {
        id: MessageId,
        text: String,
    },
    CancelMessageEdit(MessageId),
    DeleteMessage(MessageId),
    TogglePin(MessageId),
    ToggleReact {
        id: MessageId,
        kind: ReactKind,
    },
    LoadMore,
}

/// The channel opening a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    channel_id: ChannelId,
    generation: Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageKind {
    /// First page after opening a channel.
    First,
    /// "Load more".
    More,
    /// Re-fetch after sending; only the newest message is used.
    Sent,
}

/// Result of an in-flight backend call, waiting to be applied.
#[derive(Debug)]
pub(crate) enum Completion {
    Authenticated(Result<AuthResponse>),
    LoggedOut(Result<()>),
    OwnName {
        user_id: UserId,
        result: Result<UserProfile>,
    },
    Channels {
        user_id: UserId,
        result: Result<Vec<ChannelSummary>>,
    },
    ChannelCreated(Result<CreateChannelResponse>),
    ChannelDetail {
        ticket: Ticket,
        result: Result<ChannelDetail>,
    },
    ChannelOwner {
        ticket: Ticket,
        result: Result<UserProfile>,
    },
    ChannelUpdated {
        ticket: Ticket,
        previous: ChannelDraft,
        result: Result<()>,
    },
    Joined {
        channel_id: ChannelId,
        result: Result<()>,
    },
    Left {
        ticket: Ticket,
        result: Result<()>,
    },
    Page {
        ticket: Ticket,
        kind: PageKind,
        result: Result<Vec<Message>>,
    },
    SenderName {
        ticket: Ticket,
        sender_id: UserId,
        result: Result<UserProfile>,
    },
    MessageSent {
        ticket: Ticket,
        result: Result<()>,
    },
    MessageEdited {
        ticket: Ticket,
        id: MessageId,
        previous: (String, Option<String>),
        result: Result<()>,
    },
    MessageDeleted {
        ticket: Ticket,
        id: MessageId,
        result: Result<()>,
    },
    PinSet {
        ticket: Ticket,
        id: MessageId,
        result: Result<()>,
    },
    ReactSet {
        ticket: Ticket,
        id: MessageId,
        kind: ReactKind,
        result: Result<()>,
    },
}

/// Owns the session and view for one client and sequences every change to them.
pub struct App<T: Transport> {
    backend: Backend<T>,
    config: ClientConfig,
    session: Session,
    view: View,
    inflight: JoinSet<Completion>,
}

impl<T: Transport> App<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            backend: Backend::new(transport),
            config,
            session: Session::new(),
            view: View::new(),
            inflight: JoinSet::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        self.backend.transport()
    }

    /// Number of backend calls whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// Applies one UI event. Must run inside a tokio runtime.
    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::ShowRegister => self.show_register(),
            UiEvent::ShowLogin => self.show_login(),
            UiEvent::LogIn { email, password } => self.log_in(email, password),
            UiEvent::Register {
                email,
                password,
                password_confirm,
                name,
            } => self.register(email, password, password_confirm, name),
            UiEvent::SignOut => self.sign_out(),
            UiEvent::ToggleSidebar => self.view.sidebar.toggle(),

            UiEvent::SelectChannel(id) => self.select_channel(id),
            UiEvent::JoinChannel => self.join_channel(),
            UiEvent::RejectJoin | UiEvent::DismissPopup => {
                self.view.dismiss_popup();
            }
            UiEvent::LeaveChannel => self.leave_channel(),
            UiEvent::OpenNewChannelForm => self.open_new_channel_form(),
            UiEvent::CancelNewChannel => self.cancel_new_channel(),
            UiEvent::CreateChannel {
                name,
                description,
                private,
            } => self.create_channel(name, description, private),
            UiEvent::EditChannel => self.edit_channel(),
            UiEvent::SetChannelDraft { name, description } => {
                self.set_channel_draft(name, description)
            }
            UiEvent::CancelChannelEdit => self.cancel_channel_edit(),

            UiEvent::SetComposeText(text) => self.view.compose.text = text,
            UiEvent::AttachImage(image) => self.view.compose.image = image,
            UiEvent::SendMessage => self.send_message(),
            UiEvent::EditMessage(id) => self.edit_message(id),
            UiEvent::SetMessageDraft { id, text } => self.set_message_draft(id, text),
            UiEvent::CancelMessageEdit(id) => self.cancel_message_edit(id),
            UiEvent::DeleteMessage(id) => self.delete_message(id),
            UiEvent::TogglePin(id) => self.toggle_pin(id),
            UiEvent::ToggleReact { id, kind } => self.toggle_react(id, kind),
            UiEvent::LoadMore => self.load_more(),
        }
    }

    /// Waits for the next backend call to finish and applies it. Returns
    /// false when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        match self.inflight.join_next().await {
            Some(Ok(completion)) => {
                self.apply(completion);
                true
            }
            Some(Err(e)) => {
                error!("backend task failed: {}", e);
                self.view.show_error(format!("transport failure: {e}"));
                true
            }
            None => false,
        }
    }

    /// Applies completions until nothing is in flight, including calls
    /// started by the completions themselves.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.inflight.spawn(task);
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Authenticated(result) => self.authenticated(result),
            Completion::LoggedOut(result) => self.logged_out(result),
            Completion::OwnName { user_id, result } => self.own_name(user_id, result),
            Completion::Channels { user_id, result } => self.channels_listed(user_id, result),
            Completion::ChannelCreated(result) => self.channel_created(result),
            Completion::ChannelDetail { ticket, result } => self.channel_detail(ticket, result),
            Completion::ChannelOwner { ticket, result } => self.channel_owner(ticket, result),
            Completion::ChannelUpdated {
                ticket,
                previous,
                result,
            } => self.channel_updated(ticket, previous, result),
            Completion::Joined { channel_id, result } => self.joined(channel_id, result),
            Completion::Left { ticket, result } => self.left(ticket, result),
            Completion::Page {
                ticket,
                kind,
                result,
            } => self.page_loaded(ticket, kind, result),
            Completion::SenderName {
                ticket,
                sender_id,
                result,
            } => self.sender_name(ticket, sender_id, result),
            Completion::MessageSent { ticket, result } => self.message_sent(ticket, result),
            Completion::MessageEdited {
                ticket,
                id,
                previous,
                result,
            } => self.message_edited(ticket, id, previous, result),
            Completion::MessageDeleted { ticket, id, result } => {
                self.message_deleted(ticket, id, result)
            }
            Completion::PinSet { ticket, id, result } => self.pin_set(ticket, id, result),
            Completion::ReactSet {
                ticket,
                id,
                kind,
                result,
            } => self.react_set(ticket, id, kind, result),
        }
    }

    // -- Shared helpers --

    /// Surfaces a failure to the user.
    fn fail(&mut self, err: ClientError) {
        warn!("{}", err);
        self.view.show_error(err.to_string());
    }

    fn require_token(&mut self) -> Option<String> {
        let token = self.session.token().map(str::to_owned);
        if token.is_none() {
            self.fail(ClientError::NotSignedIn);
        }
        token
    }

    fn require_user(&mut self) -> Option<(String, UserId)> {
        let token = self.require_token()?;
        match self.session.user_id() {
            Some(uid) => Some((token, uid)),
            None => {
                self.fail(ClientError::NotSignedIn);
                None
            }
        }
    }

    fn current_ticket(&self) -> Option<Ticket> {
        self.session.channel_id().map(|channel_id| Ticket {
            channel_id,
            generation: self.session.generation(),
        })
    }

    /// Token and ticket for a request scoped to the open channel.
    fn require_channel(&mut self) -> Option<(String, Ticket)> {
        let token = self.require_token()?;
        match self.current_ticket() {
            Some(ticket) => Some((token, ticket)),
            None => {
                self.fail(ClientError::NoChannel);
                None
            }
        }
    }

    /// False, with a debug log, when `ticket` belongs to a channel view that has since been replaced.
    fn is_current(&self, ticket: Ticket, what: &str) -> bool {
        let current = self.current_ticket() == Some(ticket);
        if !current {
            debug!(
                channel_id = ticket.channel_id,
                what, "discarding completion for a channel that is no longer open"
            );
        }
        current
    }
}
