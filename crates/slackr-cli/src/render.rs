use std::fmt::Write;

use slackr_client::View;
use slackr_client::view::{ChannelButton, MessageCard, Page, Popup, ToggleState};

fn lamp(state: ToggleState) -> &'static str {
    match state {
        ToggleState::Active => "*",
        ToggleState::Activating | ToggleState::Deactivating => "~",
        ToggleState::Inactive => " ",
    }
}

fn button(out: &mut String, b: &ChannelButton) {
    let marker = if b.active { ">" } else { " " };
    let _ = writeln!(out, "  {marker} [{}] {}", b.element_id(), b.name);
}

fn card(out: &mut String, c: &MessageCard, indent: &str) {
    let sender = c.sender_name.as_deref().unwrap_or("...");
    let _ = writeln!(out, "{indent}#{} {sender} @ {}", c.id, c.sent_at);
    match c.draft() {
        Some(draft) => {
            let _ = writeln!(out, "{indent}  [editing] {draft}");
        }
        None => {
            let _ = writeln!(out, "{indent}  {}", c.text);
        }
    }
    if let Some(edited) = &c.edited_at {
        let _ = writeln!(out, "{indent}  (edited {edited})");
    }
    if c.image.is_some() {
        let _ = writeln!(out, "{indent}  [image]");
    }
    let r = &c.reactions;
    let _ = write!(
        out,
        "{indent}  pin[{}] smile[{}] laugh[{}] sad[{}]",
        lamp(c.pin),
        lamp(r.smile),
        lamp(r.laugh),
        lamp(r.sad)
    );
    if c.owned {
        let _ = write!(out, " {}/delete", c.edit_button_label().to_lowercase());
    }
    out.push('\n');
}

fn home(out: &mut String, view: &View) {
    let _ = writeln!(out, "signed in as {}", view.username.as_deref().unwrap_or("..."));

    if view.sidebar.visible {
        out.push_str("channels:\n");
        view.sidebar.public().iter().for_each(|b| button(out, b));
        out.push_str("private:\n");
        view.sidebar.private().iter().for_each(|b| button(out, b));
    }

    let Some(pane) = &view.main.channel else {
        out.push_str("\n(select a channel)\n");
        return;
    };

    out.push('\n');
    if !pane.loaded {
        let _ = writeln!(out, "loading channel {}...", pane.channel_id);
        return;
    }
    match pane.draft() {
        Some(draft) => {
            let _ = writeln!(out, "[editing] {} | {}", draft.name, draft.description);
        }
        None => {
            let _ = writeln!(out, "{} ({})", pane.name, pane.kind.label());
            if !pane.description.is_empty() {
                let _ = writeln!(out, "{}", pane.description);
            }
        }
    }
    let _ = writeln!(
        out,
        "created {} by {}",
        pane.created_at,
        pane.owner.as_deref().unwrap_or("...")
    );

    if !view.main.pins.is_empty() {
        out.push_str("pinned:\n");
        for clone in view.main.pins.iter() {
            card(out, &clone.card, "  ");
        }
    }

    out.push_str("messages:\n");
    for c in view.main.messages.iter() {
        card(out, c, "  ");
    }
    if view.main.load_more {
        out.push_str("  (more)\n");
    }
    if let Some(image) = &view.compose.image {
        let _ = writeln!(out, "attached: {} bytes of data url", image.len());
    }
}

/// The whole page as text.
pub fn render(view: &View) -> String {
    let mut out = String::new();
    match view.page {
        Page::Login => out.push_str("== login ==\n"),
        Page::Register => out.push_str("== register ==\n"),
        Page::NewChannel => out.push_str("== new channel ==\n"),
        Page::Home => {
            out.push_str("== slackr ==\n");
            home(&mut out, view);
        }
    }
    match &view.popup {
        Some(Popup::Error(message)) => {
            let _ = writeln!(out, "\n!! {message}  (ok)");
        }
        Some(Popup::JoinChannel(id)) => {
            let _ = writeln!(out, "\n?? not a member of channel {id}  (join/reject)");
        }
        None => {}
    }
    out
}
