use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use slackr_client::UiEvent;
use slackr_types::{MessageId, ReactKind};

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Sign in")]
    Login { email: String, password: String },

    #[command(about = "Create an account and sign in")]
    Register {
        email: String,
        password: String,
        confirm: String,
        #[arg(trailing_var_arg = true, required = true)]
        name: Vec<String>,
    },

    #[command(about = "Switch to the register page")]
    Signup,

    #[command(about = "Back to the login page")]
    Back,

    #[command(about = "Sign out")]
    Logout,

    #[command(about = "Show or hide the channel sidebar")]
    Sidebar,

    #[command(about = "Open a channel, or close it if it is already open")]
    Open { channel_id: u64 },

    #[command(about = "Accept the join prompt")]
    Join,

    #[command(about = "Decline the join prompt")]
    Reject,

    #[command(about = "Dismiss the popup")]
    Ok,

    #[command(about = "Leave the open channel")]
    Leave,

    #[command(about = "Open the new channel form")]
    New,

    #[command(name = "cancel-new", about = "Close the new channel form")]
    CancelNew,

    #[command(about = "Create a channel from the new channel form")]
    Create {
        #[arg(long)]
        private: bool,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },

    #[command(name = "edit-channel", about = "Edit or save the open channel")]
    EditChannel,

    #[command(name = "draft-channel", about = "Fill the channel edit form")]
    DraftChannel {
        name: String,
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,
    },

    #[command(name = "cancel-channel", about = "Discard the channel edit form")]
    CancelChannel,

    #[command(about = "Send a message to the open channel")]
    Say {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    #[command(about = "Attach a png or jpeg image to the next message")]
    Attach { path: PathBuf },

    #[command(about = "Drop the attached image")]
    Detach,

    #[command(about = "Edit or save a message")]
    Edit { id: MessageId },

    #[command(about = "Fill a message edit box")]
    Draft {
        id: MessageId,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    #[command(name = "cancel-edit", about = "Discard a message edit box")]
    CancelEdit { id: MessageId },

    #[command(about = "Delete one of your messages")]
    Delete { id: MessageId },

    #[command(about = "Pin or unpin a message")]
    Pin { id: MessageId },

    #[command(about = "Toggle a reaction on a message")]
    React { id: MessageId, kind: Reaction },

    #[command(about = "Load older messages")]
    More,

    #[command(about = "Print the page again")]
    Show,

    #[command(about = "Exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Reaction {
    Smile,
    Laugh,
    Sad,
}

impl From<Reaction> for ReactKind {
    fn from(r: Reaction) -> Self {
        match r {
            Reaction::Smile => ReactKind::Smile,
            Reaction::Laugh => ReactKind::Laugh,
            Reaction::Sad => ReactKind::Sad,
        }
    }
}

/// What the prompt loop does with a parsed line.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Dispatch(Vec<UiEvent>),
    /// Reading the file is async, so the loop handles it.
    Attach(PathBuf),
    Show,
    Quit,
}

impl Line {
    pub fn parse_line(input: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(input.split_whitespace())
    }
}

impl Command {
    pub fn into_action(self) -> Action {
        let event = match self {
            Command::Login { email, password } => UiEvent::LogIn { email, password },
            Command::Register {
                email,
                password,
                confirm,
                name,
            } => UiEvent::Register {
                email,
                password,
                password_confirm: confirm,
                name: name.join(" "),
            },
            Command::Signup => UiEvent::ShowRegister,
            Command::Back => UiEvent::ShowLogin,
            Command::Logout => UiEvent::SignOut,
            Command::Sidebar => UiEvent::ToggleSidebar,
            Command::Open { channel_id } => UiEvent::SelectChannel(channel_id),
            Command::Join => UiEvent::JoinChannel,
            Command::Reject => UiEvent::RejectJoin,
            Command::Ok => UiEvent::DismissPopup,
            Command::Leave => UiEvent::LeaveChannel,
            Command::New => UiEvent::OpenNewChannelForm,
            Command::CancelNew => UiEvent::CancelNewChannel,
            Command::Create {
                private,
                description,
                name,
            } => UiEvent::CreateChannel {
                name: name.join(" "),
                description,
                private,
            },
            Command::EditChannel => UiEvent::EditChannel,
            Command::DraftChannel { name, description } => UiEvent::SetChannelDraft {
                name,
                description: description.join(" "),
            },
            Command::CancelChannel => UiEvent::CancelChannelEdit,
            Command::Say { text } => {
                return Action::Dispatch(vec![
                    UiEvent::SetComposeText(text.join(" ")),
                    UiEvent::SendMessage,
                ]);
            }
            Command::Attach { path } => return Action::Attach(path),
            Command::Detach => UiEvent::AttachImage(None),
            Command::Edit { id } => UiEvent::EditMessage(id),
            Command::Draft { id, text } => UiEvent::SetMessageDraft {
                id,
                text: text.join(" "),
            },
            Command::CancelEdit { id } => UiEvent::CancelMessageEdit(id),
            Command::Delete { id } => UiEvent::DeleteMessage(id),
            Command::Pin { id } => UiEvent::TogglePin(id),
            Command::React { id, kind } => UiEvent::ToggleReact {
                id,
                kind: kind.into(),
            },
            Command::More => UiEvent::LoadMore,
            Command::Show => return Action::Show,
            Command::Quit => return Action::Quit,
        };
        Action::Dispatch(vec![event])
    }
}
