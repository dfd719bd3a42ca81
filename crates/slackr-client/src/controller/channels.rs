use tracing::{debug, info};

use slackr_types::api::{CreateChannelRequest, CreateChannelResponse, UpdateChannelRequest};
use slackr_types::{ChannelDetail, ChannelId, ChannelSummary, UserId, UserProfile};

use crate::error::{ClientError, Result};
use crate::transport::Transport;
use crate::view::{ChannelDraft, Page, Popup};

use super::{App, Completion, PageKind, Ticket};

impl<T: Transport> App<T> {
    pub(super) fn channels_listed(&mut self, user_id: UserId, result: Result<Vec<ChannelSummary>>) {
        if self.session.user_id() != Some(user_id) {
            return;
        }
        match result {
            Ok(channels) => {
                debug!(count = channels.len(), "channel list loaded");
                self.view.render_channel_list(&channels, Some(user_id));
                self.session.set_channels(channels);
            }
            Err(e) => self.fail(e),
        }
    }

    /// Clicking the open channel closes it; clicking any other opens it.
    pub(super) fn select_channel(&mut self, channel_id: ChannelId) {
        if self.session.channel_id() == Some(channel_id) {
            self.close_channel();
        } else {
            self.open_channel(channel_id);
        }
    }

    pub(super) fn open_channel(&mut self, channel_id: ChannelId) {
        let Some(token) = self.require_token() else {
            return;
        };

        self.view.open_channel_pane(channel_id);
        self.session.set_channel_id(Some(channel_id));
        self.session.set_message_cursor(0);

        let ticket = Ticket {
            channel_id,
            generation: self.session.generation(),
        };
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::ChannelDetail {
                ticket,
                result: backend.channel(&token, channel_id).await,
            }
        });
    }

    /// Hides the pane and forgets the open channel together.
    pub(super) fn close_channel(&mut self) {
        self.view.close_channel_pane();
        self.session.set_channel_id(None);
    }

    pub(super) fn channel_detail(&mut self, ticket: Ticket, result: Result<ChannelDetail>) {
        if !self.is_current(ticket, "channel detail") {
            return;
        }
        match result {
            Ok(detail) => {
                self.view.render_channel_detail(ticket.channel_id, &detail);

                let Some(token) = self.require_token() else {
                    return;
                };
                let backend = self.backend.clone();
                let owner_token = token.clone();
                let creator = detail.creator;
                self.spawn(async move {
                    Completion::ChannelOwner {
                        ticket,
                        result: backend.user(&owner_token, creator).await,
                    }
                });

                self.load_page(token, ticket, PageKind::First, 0);
            }
            Err(e) if e.is_not_member() => {
                self.close_channel();
                self.view.show_join_prompt(ticket.channel_id);
            }
            Err(e) => {
                self.close_channel();
                self.fail(e);
            }
        }
    }

    pub(super) fn channel_owner(&mut self, ticket: Ticket, result: Result<UserProfile>) {
        if !self.is_current(ticket, "channel owner") {
            return;
        }
        match result {
            Ok(profile) => {
                self.view.set_channel_owner(ticket.channel_id, &profile.name);
            }
            Err(e) => self.fail(e),
        }
    }

    pub(super) fn join_channel(&mut self) {
        let Some(Popup::JoinChannel(channel_id)) = self.view.popup.clone() else {
            return;
        };
        self.view.dismiss_popup();

        let Some(token) = self.require_token() else {
            return;
        };
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::Joined {
                channel_id,
                result: backend.join_channel(&token, channel_id).await,
            }
        });
    }

    pub(super) fn joined(&mut self, channel_id: ChannelId, result: Result<()>) {
        match result {
            Ok(()) => {
                info!(channel_id, "joined channel");
                if let Some((token, user_id)) = self.require_user() {
                    self.refresh_channels(token, user_id);
                }
                self.open_channel(channel_id);
            }
            Err(e) => self.fail(e),
        }
    }

    pub(super) fn leave_channel(&mut self) {
        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::Left {
                ticket,
                result: backend.leave_channel(&token, ticket.channel_id).await,
            }
        });
    }

    pub(super) fn left(&mut self, ticket: Ticket, result: Result<()>) {
        match result {
            Ok(()) => {
                info!(channel_id = ticket.channel_id, "left channel");
                if self.session.channel_id() == Some(ticket.channel_id) {
                    self.close_channel();
                }
                self.show_home();
            }
            Err(e) => self.fail(e),
        }
    }

    pub(super) fn open_new_channel_form(&mut self) {
        if self.view.page == Page::Home {
            self.view.page = Page::NewChannel;
        }
    }

    pub(super) fn cancel_new_channel(&mut self) {
        if self.view.page == Page::NewChannel {
            self.show_home();
        }
    }

    pub(super) fn create_channel(&mut self, name: String, description: String, private: bool) {
        if name.is_empty() {
            return self.fail(ClientError::Validation("Please enter a channel name".into()));
        }
        let Some(token) = self.require_token() else {
            return;
        };

        let backend = self.backend.clone();
        let req = CreateChannelRequest {
            name,
            private,
            description,
        };
        self.spawn(async move {
            Completion::ChannelCreated(backend.create_channel(&token, &req).await)
        });
    }

    pub(super) fn channel_created(&mut self, result: Result<CreateChannelResponse>) {
        match result {
            Ok(created) => {
                info!(channel_id = created.channel_id, "channel created");
                self.show_home();
            }
            Err(e) => self.fail(e),
        }
    }

    /// The Edit/Save button: opens the form, or validates and persists it.
    pub(super) fn edit_channel(&mut self) {
        let Some(channel_id) = self.session.channel_id() else {
            return;
        };
        let Some(pane) = self.view.channel_pane_mut(channel_id) else {
            return;
        };
        if !pane.loaded {
            return;
        }
        if !pane.is_editing() {
            pane.begin_edit();
            return;
        }

        let draft_name_empty = pane.draft().is_none_or(|d| d.name.trim().is_empty());
        if draft_name_empty {
            return self.fail(ClientError::Validation(
                "Please enter a valid channel name".into(),
            ));
        }

        let Some((token, ticket)) = self.require_channel() else {
            return;
        };
        let Some(pane) = self.view.channel_pane_mut(channel_id) else {
            return;
        };
        let Some(previous) = pane.commit_draft() else {
            return;
        };
        let req = UpdateChannelRequest {
            name: pane.name.clone(),
            description: pane.description.clone(),
        };

        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::ChannelUpdated {
                ticket,
                previous,
                result: backend
                    .update_channel(&token, ticket.channel_id, &req)
                    .await,
            }
        });
    }

    pub(super) fn set_channel_draft(&mut self, name: String, description: String) {
        if let Some(pane) = self
            .session
            .channel_id()
            .and_then(|id| self.view.channel_pane_mut(id))
        {
            pane.set_draft(name, description);
        }
    }

    pub(super) fn cancel_channel_edit(&mut self) {
        if let Some(pane) = self
            .session
            .channel_id()
            .and_then(|id| self.view.channel_pane_mut(id))
        {
            pane.cancel_edit();
        }
    }

    pub(super) fn channel_updated(
        &mut self,
        ticket: Ticket,
        previous: ChannelDraft,
        result: Result<()>,
    ) {
        if !self.is_current(ticket, "channel update") {
            return;
        }
        match result {
            Ok(()) => {
                let Some(name) = self
                    .view
                    .channel_pane(ticket.channel_id)
                    .map(|p| p.name.clone())
                else {
                    return;
                };
                self.view.sidebar.rename(ticket.channel_id, &name);
                self.session.rename_channel(ticket.channel_id, &name);
            }
            Err(e) => {
                if let Some(pane) = self.view.channel_pane_mut(ticket.channel_id) {
                    pane.restore(previous);
                }
                self.fail(e);
            }
        }
    }
}
