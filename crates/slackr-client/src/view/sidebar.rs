use slackr_types::{ChannelId, ChannelSummary, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelButton {
    pub id: ChannelId,
    pub name: String,
    pub private: bool,
    pub active: bool,
}

impl ChannelButton {
    pub fn element_id(&self) -> String {
        self.id.to_string()
    }
}

/// Channel buttons, split into public and private groups.
#[derive(Debug, Clone)]
pub struct Sidebar {
    pub visible: bool,
    public: Vec<ChannelButton>,
    private: Vec<ChannelButton>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            visible: true,
            public: Vec::new(),
            private: Vec::new(),
        }
    }
}

impl Sidebar {
    /// Rebuilds both groups from scratch. Private channels are listed only
    /// when `user_id` is a member; public ones always are. Repeated ids in
    /// `channels` are rendered once.
    pub fn render(
        &mut self,
        channels: &[ChannelSummary],
        user_id: Option<UserId>,
        active: Option<ChannelId>,
    ) {
        self.clear();

        for ch in channels {
            if self.button(ch.id).is_some() {
                continue;
            }
            let button = ChannelButton {
                id: ch.id,
                name: ch.name.clone(),
                private: ch.private,
                active: active == Some(ch.id),
            };
            if !ch.private {
                self.public.push(button);
            } else if user_id.is_some_and(|uid| ch.has_member(uid)) {
                self.private.push(button);
            }
        }
    }

    pub fn clear(&mut self) {
        self.public.clear();
        self.private.clear();
    }

    pub fn public(&self) -> &[ChannelButton] {
        &self.public
    }

    pub fn private(&self) -> &[ChannelButton] {
        &self.private
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ChannelButton> {
        self.public.iter().chain(self.private.iter())
    }

    pub fn button(&self, id: ChannelId) -> Option<&ChannelButton> {
        self.buttons().find(|b| b.id == id)
    }

    fn button_mut(&mut self, id: ChannelId) -> Option<&mut ChannelButton> {
        self.public
            .iter_mut()
            .chain(self.private.iter_mut())
            .find(|b| b.id == id)
    }

    /// Lights `id` and dims every other button.
    pub fn set_active(&mut self, id: Option<ChannelId>) {
        for b in self.public.iter_mut().chain(self.private.iter_mut()) {
            b.active = Some(b.id) == id;
        }
    }

    pub fn deactivate(&mut self, id: ChannelId) {
        if let Some(b) = self.button_mut(id) {
            b.active = false;
        }
    }

    pub fn active(&self) -> Option<ChannelId> {
        self.buttons().find(|b| b.active).map(|b| b.id)
    }

    pub fn rename(&mut self, id: ChannelId, name: &str) {
        if let Some(b) = self.button_mut(id) {
            b.name = name.to_string();
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}
