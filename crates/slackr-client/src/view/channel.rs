use slackr_types::{ChannelDetail, ChannelId};

use super::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelKind {
    #[default]
    Public,
    Private,
}

impl ChannelKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }
}

/// In-progress values of the channel edit form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelDraft {
    pub name: String,
    pub description: String,
}

/// Main pane header for the open channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPane {
    pub channel_id: ChannelId,
    /// False until the detail fetch lands.
    pub loaded: bool,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub owner: Option<String>,
    pub kind: ChannelKind,
    draft: Option<ChannelDraft>,
}

impl ChannelPane {
    pub fn loading(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            loaded: false,
            name: String::new(),
            description: String::new(),
            created_at: String::new(),
            owner: None,
            kind: ChannelKind::default(),
            draft: None,
        }
    }

    pub fn fill(&mut self, detail: &ChannelDetail) {
        self.loaded = true;
        self.name = detail.name.clone();
        self.description = detail.description.clone();
        self.created_at = format::local_time(detail.created_at);
        self.kind = if detail.private {
            ChannelKind::Private
        } else {
            ChannelKind::Public
        };
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&ChannelDraft> {
        self.draft.as_ref()
    }

    pub fn edit_button_label(&self) -> &'static str {
        if self.is_editing() { "Save" } else { "Edit" }
    }

    /// The leave button is hidden while the edit form is open.
    pub fn leave_visible(&self) -> bool {
        !self.is_editing()
    }

    pub fn begin_edit(&mut self) {
        self.draft = Some(ChannelDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        });
    }

    pub fn set_draft(&mut self, name: String, description: String) {
        if let Some(draft) = self.draft.as_mut() {
            draft.name = name;
            draft.description = description;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Closes the form and shows the draft as the static text. Returns the
    /// text it replaced.
    pub fn commit_draft(&mut self) -> Option<ChannelDraft> {
        let draft = self.draft.take()?;
        let previous = ChannelDraft {
            name: std::mem::replace(&mut self.name, draft.name),
            description: std::mem::replace(&mut self.description, draft.description),
        };
        Some(previous)
    }

    pub fn restore(&mut self, previous: ChannelDraft) {
        self.name = previous.name;
        self.description = previous.description;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn detail() -> ChannelDetail {
        ChannelDetail {
            name: "general".into(),
            description: "chit chat".into(),
            created_at: Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap(),
            creator: 1,
            private: true,
            members: vec![1],
        }
    }

    #[test]
    fn edit_cycle_commits_draft() {
        let mut pane = ChannelPane::loading(5);
        pane.fill(&detail());
        assert_eq!(pane.kind.label(), "Private");
        assert_eq!(pane.edit_button_label(), "Edit");

        pane.begin_edit();
        assert_eq!(pane.edit_button_label(), "Save");
        assert!(!pane.leave_visible());

        pane.set_draft("random".into(), "".into());
        let previous = pane.commit_draft().unwrap();

        assert_eq!(pane.name, "random");
        assert_eq!(previous.name, "general");
        assert!(pane.leave_visible());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut pane = ChannelPane::loading(5);
        pane.fill(&detail());
        pane.begin_edit();
        pane.set_draft("other".into(), "x".into());
        pane.cancel_edit();

        assert_eq!(pane.name, "general");
        assert!(pane.commit_draft().is_none());
    }
}
