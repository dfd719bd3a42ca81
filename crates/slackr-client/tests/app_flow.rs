//! Drives `App` end to end against a scripted in-memory backend.

use serde_json::{Value, json};

use slackr_client::error::NOT_A_MEMBER;
use slackr_client::view::{Page, Popup, ToggleState};
use slackr_client::{App, ClientConfig, ClientError, MemoryTransport, Method, UiEvent};
use slackr_types::ReactKind;

const SENT_AT: &str = "2021-10-12T03:04:05.000Z";

fn msg(id: u64, sender: u64, text: &str) -> Value {
    json!({
        "id": id,
        "message": text,
        "sender": sender,
        "sentAt": SENT_AT,
        "edited": false,
        "editedAt": null,
        "pinned": false,
        "reacts": []
    })
}

fn page(messages: Vec<Value>) -> Value {
    json!({ "messages": messages })
}

fn detail(name: &str, private: bool) -> Value {
    json!({
        "name": name,
        "description": format!("about {name}"),
        "createdAt": SENT_AT,
        "creator": 8,
        "private": private,
        "members": [7, 8]
    })
}

fn scripted_backend() -> MemoryTransport {
    let t = MemoryTransport::new();
    t.respond(Method::Post, "auth/login", json!({ "token": "T1", "userId": 7 }))
        .respond(Method::Post, "auth/logout", json!({}))
        .respond(Method::Get, "user/7", json!({ "name": "Ann" }))
        .respond(Method::Get, "user/8", json!({ "name": "Bob" }))
        .respond(
            Method::Get,
            "channel",
            json!({ "channels": [
                { "id": 2, "name": "general", "creator": 8, "private": false, "members": [8] },
                { "id": 3, "name": "dev", "creator": 8, "private": false, "members": [7, 8] },
                { "id": 5, "name": "random", "creator": 8, "private": false, "members": [] },
                { "id": 9, "name": "inner", "creator": 8, "private": true, "members": [7, 8] },
                { "id": 11, "name": "secret", "creator": 8, "private": true, "members": [8] }
            ]}),
        )
        .respond(Method::Get, "channel/2", detail("general", false))
        .respond(Method::Get, "channel/3", detail("dev", false))
        .respond(Method::Get, "channel/5", detail("random", false))
        .respond(Method::Get, "message/2?start=0", page(vec![msg(20, 8, "hi")]))
        .respond(Method::Get, "message/5?start=0", page(vec![msg(50, 8, "yo")]));
    t
}

async fn signed_in(transport: MemoryTransport) -> App<MemoryTransport> {
    let mut app = App::new(transport, ClientConfig::default());
    app.dispatch(UiEvent::LogIn {
        email: "a@b.com".into(),
        password: "pw1".into(),
    });
    app.settle().await;
    app
}

async fn open(app: &mut App<MemoryTransport>, channel_id: u64) {
    app.dispatch(UiEvent::SelectChannel(channel_id));
    app.settle().await;
}

fn active_count(app: &App<MemoryTransport>) -> usize {
    app.view().sidebar.buttons().filter(|b| b.active).count()
}

// -- Auth --

#[tokio::test]
async fn login_stores_session_and_shows_home() {
    let app = signed_in(scripted_backend()).await;

    assert_eq!(app.session().token(), Some("T1"));
    assert_eq!(app.session().user_id(), Some(7));
    assert_eq!(app.session().name(), Some("Ann"));
    assert_eq!(app.view().page, Page::Home);
    assert_eq!(app.view().username.as_deref(), Some("Ann"));

    let login = &app.transport().requests_to(Method::Post, "auth/login")[0];
    assert_eq!(login.body, Some(json!({ "email": "a@b.com", "password": "pw1" })));
    assert_eq!(login.token, None);
}

#[tokio::test]
async fn rejected_login_shows_server_message() {
    let t = MemoryTransport::new();
    t.reject(
        Method::Post,
        "auth/login",
        ClientError::Input("Invalid email or password".into()),
    );
    let app = signed_in(t).await;

    assert_eq!(app.view().page, Page::Login);
    assert_eq!(
        app.view().popup,
        Some(Popup::Error("Invalid email or password".into()))
    );
    assert!(!app.session().is_signed_in());
}

#[tokio::test]
async fn register_validation_never_reaches_backend() {
    let mut app = App::new(MemoryTransport::new(), ClientConfig::default());
    app.dispatch(UiEvent::ShowRegister);
    app.dispatch(UiEvent::Register {
        email: "a@b.com".into(),
        password: "pw1".into(),
        password_confirm: "pw2".into(),
        name: "Ann".into(),
    });
    app.settle().await;

    assert_eq!(app.view().page, Page::Register);
    assert_eq!(
        app.view().popup,
        Some(Popup::Error("Password must match, please try again".into()))
    );
    assert!(app.transport().requests().is_empty());
}

#[tokio::test]
async fn sign_out_clears_session_and_view() {
    let mut app = signed_in(scripted_backend()).await;
    open(&mut app, 2).await;

    app.dispatch(UiEvent::SignOut);
    app.settle().await;

    assert!(!app.session().is_signed_in());
    assert_eq!(app.session().channel_id(), None);
    assert_eq!(app.view().page, Page::Login);
    assert_eq!(app.view().sidebar.buttons().count(), 0);
    assert!(app.view().main.placeholder_visible());

    let logout = &app.transport().requests_to(Method::Post, "auth/logout")[0];
    assert_eq!(logout.token.as_deref(), Some("T1"));
}

// -- Channels --

#[tokio::test]
async fn sidebar_hides_private_channels_without_membership() {
    let app = signed_in(scripted_backend()).await;
    let sidebar = &app.view().sidebar;

    let public: Vec<_> = sidebar.public().iter().map(|b| b.id).collect();
    let private: Vec<_> = sidebar.private().iter().map(|b| b.id).collect();
    assert_eq!(public, vec![2, 3, 5]);
    assert_eq!(private, vec![9]);
    assert!(sidebar.button(11).is_none());
}

#[tokio::test]
async fn switching_channels_never_leaves_two_active() {
    let mut app = signed_in(scripted_backend()).await;

    open(&mut app, 2).await;
    assert_eq!(app.view().sidebar.active(), Some(2));

    app.dispatch(UiEvent::SelectChannel(5));
    assert!(active_count(&app) <= 1);
    app.settle().await;

    assert_eq!(app.view().sidebar.active(), Some(5));
    assert!(!app.view().sidebar.button(2).unwrap().active);
    assert_eq!(active_count(&app), 1);

    let pane = app.view().main.channel.as_ref().unwrap();
    assert_eq!(pane.channel_id, 5);
    assert_eq!(pane.name, "random");
    assert_eq!(pane.owner.as_deref(), Some("Bob"));
    assert_eq!(pane.kind.label(), "Public");
}

#[tokio::test]
async fn clicking_open_channel_closes_it() {
    let mut app = signed_in(scripted_backend()).await;
    open(&mut app, 2).await;
    open(&mut app, 2).await;

    assert_eq!(app.session().channel_id(), None);
    assert!(app.view().main.placeholder_visible());
    assert_eq!(app.view().sidebar.active(), None);
}

#[tokio::test]
async fn non_member_gets_join_prompt_then_joins() {
    let t = scripted_backend();
    t.reject(Method::Get, "channel/9", ClientError::Access(NOT_A_MEMBER.into()))
        .respond(Method::Get, "channel/9", detail("inner", true))
        .respond(Method::Post, "channel/9/join", json!({}))
        .respond(Method::Get, "message/9?start=0", page(vec![]));
    let mut app = signed_in(t).await;

    open(&mut app, 9).await;
    assert_eq!(app.view().popup, Some(Popup::JoinChannel(9)));
    assert_eq!(app.session().channel_id(), None);
    assert_eq!(app.view().sidebar.active(), None);

    app.dispatch(UiEvent::JoinChannel);
    app.settle().await;

    assert_eq!(app.view().popup, None);
    assert_eq!(app.session().channel_id(), Some(9));
    assert_eq!(app.view().sidebar.active(), Some(9));
    assert_eq!(
        app.view().main.channel.as_ref().map(|p| p.kind.label()),
        Some("Private")
    );
}

#[tokio::test]
async fn stale_channel_completions_are_discarded() {
    let mut app = signed_in(scripted_backend()).await;

    app.dispatch(UiEvent::SelectChannel(2));
    app.dispatch(UiEvent::SelectChannel(5));
    app.settle().await;

    assert_eq!(app.session().channel_id(), Some(5));
    let ids: Vec<_> = app.view().main.messages.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![50]);
    assert!(
        app.transport()
            .requests_to(Method::Get, "message/2?start=0")
            .is_empty()
    );
}

#[tokio::test]
async fn channel_edit_saves_and_renames_sidebar() {
    let t = scripted_backend();
    t.respond(Method::Put, "channel/2", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 2).await;

    app.dispatch(UiEvent::EditChannel);
    app.dispatch(UiEvent::SetChannelDraft {
        name: "lobby".into(),
        description: "front door".into(),
    });
    app.dispatch(UiEvent::EditChannel);
    app.settle().await;

    let pane = app.view().main.channel.as_ref().unwrap();
    assert!(!pane.is_editing());
    assert_eq!(pane.name, "lobby");
    assert_eq!(app.view().sidebar.button(2).unwrap().name, "lobby");

    let put = &app.transport().requests_to(Method::Put, "channel/2")[0];
    assert_eq!(
        put.body,
        Some(json!({ "name": "lobby", "description": "front door" }))
    );
}

#[tokio::test]
async fn channel_edit_rejects_empty_name_and_reverts_on_failure() {
    let t = scripted_backend();
    t.reject(Method::Put, "channel/2", ClientError::Access("Not the owner".into()));
    let mut app = signed_in(t).await;
    open(&mut app, 2).await;

    app.dispatch(UiEvent::EditChannel);
    app.dispatch(UiEvent::SetChannelDraft {
        name: "  ".into(),
        description: String::new(),
    });
    app.dispatch(UiEvent::EditChannel);
    assert_eq!(
        app.view().popup,
        Some(Popup::Error("Please enter a valid channel name".into()))
    );
    assert!(app.view().main.channel.as_ref().unwrap().is_editing());

    app.dispatch(UiEvent::SetChannelDraft {
        name: "lobby".into(),
        description: String::new(),
    });
    app.dispatch(UiEvent::EditChannel);
    app.settle().await;

    let pane = app.view().main.channel.as_ref().unwrap();
    assert_eq!(pane.name, "general");
    assert_eq!(pane.description, "about general");
    assert_eq!(app.view().popup, Some(Popup::Error("Not the owner".into())));
}

#[tokio::test]
async fn create_channel_returns_home() {
    let t = scripted_backend();
    t.respond(Method::Post, "channel", json!({ "channelId": 12 }));
    let mut app = signed_in(t).await;

    app.dispatch(UiEvent::OpenNewChannelForm);
    assert_eq!(app.view().page, Page::NewChannel);

    app.dispatch(UiEvent::CreateChannel {
        name: String::new(),
        description: String::new(),
        private: false,
    });
    assert_eq!(app.view().page, Page::NewChannel);

    app.dispatch(UiEvent::CreateChannel {
        name: "ops".into(),
        description: "pager".into(),
        private: true,
    });
    app.settle().await;

    assert_eq!(app.view().page, Page::Home);
    let create = &app.transport().requests_to(Method::Post, "channel")[0];
    assert_eq!(
        create.body,
        Some(json!({ "name": "ops", "private": true, "description": "pager" }))
    );
}

#[tokio::test]
async fn leaving_closes_the_pane() {
    let t = scripted_backend();
    t.respond(Method::Post, "channel/2/leave", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 2).await;

    app.dispatch(UiEvent::LeaveChannel);
    app.settle().await;

    assert_eq!(app.session().channel_id(), None);
    assert!(app.view().main.placeholder_visible());
    assert_eq!(app.view().page, Page::Home);
}

// -- Messages --

#[tokio::test]
async fn sending_prepends_the_newest_message() {
    let t = scripted_backend();
    t.respond(Method::Get, "message/3?start=0", page(vec![msg(1, 8, "older")]))
        .respond(
            Method::Get,
            "message/3?start=0",
            page(vec![msg(2, 7, "hello"), msg(1, 8, "older")]),
        )
        .respond(Method::Post, "message/3", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;
    assert_eq!(app.session().message_cursor(), 1);

    app.dispatch(UiEvent::SetComposeText("hello".into()));
    app.dispatch(UiEvent::SendMessage);
    app.settle().await;

    let post = &app.transport().requests_to(Method::Post, "message/3")[0];
    assert_eq!(post.body, Some(json!({ "message": "hello" })));
    assert_eq!(
        app.transport()
            .requests_to(Method::Get, "message/3?start=0")
            .len(),
        2
    );

    let cards: Vec<_> = app.view().main.messages.iter().collect();
    assert_eq!(cards[0].id, 2);
    assert_eq!(cards[0].text, "hello");
    assert_eq!(cards[0].sender_name.as_deref(), Some("Ann"));
    assert_eq!(cards.len(), 2);
    assert_eq!(app.view().compose.text, "");
    assert_eq!(app.session().message_cursor(), 2);
}

#[tokio::test]
async fn blank_message_is_rejected_locally() {
    let mut app = signed_in(scripted_backend()).await;
    open(&mut app, 2).await;

    app.dispatch(UiEvent::SetComposeText("  \n ".into()));
    app.dispatch(UiEvent::SendMessage);
    app.settle().await;

    assert_eq!(
        app.view().popup,
        Some(Popup::Error("Message must contain text".into()))
    );
    assert!(app.transport().requests_to(Method::Post, "message/2").is_empty());
}

#[tokio::test]
async fn attached_image_travels_with_message() {
    let t = scripted_backend();
    t.respond(Method::Post, "message/2", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 2).await;

    app.dispatch(UiEvent::SetComposeText("look".into()));
    app.dispatch(UiEvent::AttachImage(Some("data:image/png;base64,AAAA".into())));
    app.dispatch(UiEvent::SendMessage);
    app.settle().await;

    let post = &app.transport().requests_to(Method::Post, "message/2")[0];
    assert_eq!(
        post.body,
        Some(json!({ "message": "look", "image": "data:image/png;base64,AAAA" }))
    );
    assert_eq!(app.view().compose.image, None);
}

#[tokio::test]
async fn full_page_shows_load_more_and_short_page_hides_it() {
    for (count, expected) in [(25u64, true), (24, false)] {
        let t = scripted_backend();
        let messages = (1..=count).map(|i| msg(i, 8, "m")).collect();
        t.respond(Method::Get, "message/3?start=0", page(messages));
        let mut app = signed_in(t).await;
        open(&mut app, 3).await;

        assert_eq!(app.view().main.load_more, expected, "page of {count}");
        assert_eq!(app.session().message_cursor(), count as usize);
    }
}

#[tokio::test]
async fn load_more_starts_at_cursor_and_appends() {
    let t = scripted_backend();
    let first = (1..=25).map(|i| msg(i, 8, "m")).collect();
    t.respond(Method::Get, "message/3?start=0", page(first))
        .respond(Method::Get, "message/3?start=25", page(vec![msg(26, 8, "last")]));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    app.dispatch(UiEvent::LoadMore);
    app.settle().await;

    assert_eq!(app.view().main.messages.len(), 26);
    assert_eq!(app.view().main.messages.iter().last().map(|c| c.id), Some(26));
    assert!(!app.view().main.load_more);
    assert_eq!(app.session().message_cursor(), 26);
}

#[tokio::test]
async fn edit_and_delete_controls_only_on_own_messages() {
    let t = scripted_backend();
    t.respond(
        Method::Get,
        "message/3?start=0",
        page(vec![msg(1, 7, "mine"), msg(2, 8, "theirs")]),
    );
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    for card in app.view().main.messages.iter() {
        assert_eq!(card.owned, card.sender_id == 7, "card {}", card.id);
    }

    app.dispatch(UiEvent::DeleteMessage(2));
    app.dispatch(UiEvent::EditMessage(2));
    app.settle().await;
    assert!(app.transport().requests_to(Method::Delete, "message/3/2").is_empty());
    assert!(!app.view().message(2).unwrap().is_editing());
}

#[tokio::test]
async fn message_edit_updates_locally() {
    let t = scripted_backend();
    t.respond(Method::Get, "message/3?start=0", page(vec![msg(1, 7, "helo")]))
        .respond(Method::Put, "message/3/1", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    app.dispatch(UiEvent::EditMessage(1));
    assert_eq!(app.view().message(1).unwrap().edit_button_label(), "Save");

    app.dispatch(UiEvent::EditMessage(1));
    assert_eq!(
        app.view().popup,
        Some(Popup::Error(
            "Message must not be identical to existing message".into()
        ))
    );

    app.dispatch(UiEvent::SetMessageDraft {
        id: 1,
        text: "hello".into(),
    });
    app.dispatch(UiEvent::EditMessage(1));
    app.settle().await;

    let card = app.view().message(1).unwrap();
    assert_eq!(card.text, "hello");
    assert!(card.edited_at.is_some());
    assert!(!card.is_editing());
    assert_eq!(
        app.transport().requests_to(Method::Get, "message/3?start=0").len(),
        1
    );
    let put = &app.transport().requests_to(Method::Put, "message/3/1")[0];
    assert_eq!(put.body, Some(json!({ "message": "hello" })));
}

#[tokio::test]
async fn failed_edit_restores_text() {
    let t = scripted_backend();
    t.respond(Method::Get, "message/3?start=0", page(vec![msg(1, 7, "helo")]))
        .reject(Method::Put, "message/3/1", ClientError::Transport("reset".into()));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    app.dispatch(UiEvent::EditMessage(1));
    app.dispatch(UiEvent::SetMessageDraft {
        id: 1,
        text: "hello".into(),
    });
    app.dispatch(UiEvent::EditMessage(1));
    app.settle().await;

    let card = app.view().message(1).unwrap();
    assert_eq!(card.text, "helo");
    assert!(card.edited_at.is_none());
    assert!(matches!(app.view().popup, Some(Popup::Error(_))));
}

#[tokio::test]
async fn deleting_a_pinned_message_removes_its_clone() {
    let t = scripted_backend();
    let mut pinned = msg(1, 7, "pinned");
    pinned["pinned"] = json!(true);
    t.respond(Method::Get, "message/3?start=0", page(vec![pinned, msg(2, 7, "x")]))
        .respond(Method::Delete, "message/3/1", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;
    assert!(app.view().main.pins.contains(1));

    app.dispatch(UiEvent::DeleteMessage(1));
    app.settle().await;

    assert!(app.view().message(1).is_none());
    assert!(app.view().main.pins.is_empty());
    assert_eq!(app.session().message_cursor(), 1);
}

// -- Pins and reactions --

#[tokio::test]
async fn pin_then_unpin_leaves_no_clone() {
    let t = scripted_backend();
    t.respond(Method::Get, "message/3?start=0", page(vec![msg(10, 8, "note")]))
        .respond(Method::Post, "message/pin/3/10", json!({}))
        .respond(Method::Post, "message/unpin/3/10", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    app.dispatch(UiEvent::TogglePin(10));
    app.settle().await;
    let clone = app.view().main.pins.get(10).unwrap();
    assert_eq!(clone.element_id, "clone-10");
    assert_eq!(clone.card.sender_name.as_deref(), Some("Bob"));

    app.dispatch(UiEvent::TogglePin(10));
    app.settle().await;
    assert!(app.view().main.pins.is_empty());
    assert_eq!(app.view().message(10).unwrap().pin, ToggleState::Inactive);
}

#[tokio::test]
async fn rejected_pin_rolls_back() {
    let t = scripted_backend();
    t.respond(Method::Get, "message/3?start=0", page(vec![msg(10, 8, "note")]))
        .reject(
            Method::Post,
            "message/pin/3/10",
            ClientError::Access("User is not an owner".into()),
        );
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    app.dispatch(UiEvent::TogglePin(10));
    assert!(app.view().main.pins.contains(10));
    app.dispatch(UiEvent::TogglePin(10));
    app.settle().await;

    assert!(app.view().main.pins.is_empty());
    assert_eq!(app.view().message(10).unwrap().pin, ToggleState::Inactive);
    assert_eq!(
        app.view().popup,
        Some(Popup::Error("User is not an owner".into()))
    );
    assert_eq!(
        app.transport().requests_to(Method::Post, "message/pin/3/10").len(),
        1
    );
}

#[tokio::test]
async fn reactions_toggle_independently() {
    let t = scripted_backend();
    t.respond(Method::Get, "message/3?start=0", page(vec![msg(10, 8, "joke")]))
        .respond(Method::Post, "message/react/3/10", json!({}))
        .respond(Method::Post, "message/unreact/3/10", json!({}));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    let react = |kind| UiEvent::ToggleReact { id: 10, kind };
    app.dispatch(react(ReactKind::Smile));
    app.settle().await;
    app.dispatch(react(ReactKind::Smile));
    app.settle().await;
    app.dispatch(react(ReactKind::Laugh));
    app.settle().await;

    let r = app.view().message(10).unwrap().reactions;
    assert_eq!(r.smile, ToggleState::Inactive);
    assert_eq!(r.laugh, ToggleState::Active);
    assert_eq!(r.sad, ToggleState::Inactive);

    let bodies: Vec<_> = app
        .transport()
        .requests()
        .into_iter()
        .filter(|r| r.path.contains("react/3/10"))
        .map(|r| (r.path, r.body))
        .collect();
    assert_eq!(
        bodies,
        vec![
            ("message/react/3/10".to_string(), Some(json!({ "react": "smile" }))),
            ("message/unreact/3/10".to_string(), Some(json!({ "react": "smile" }))),
            ("message/react/3/10".to_string(), Some(json!({ "react": "laugh" }))),
        ]
    );
}

#[tokio::test]
async fn existing_reactions_are_prelit() {
    let t = scripted_backend();
    let mut m = msg(10, 8, "joke");
    m["reacts"] = json!([{ "user": 7, "react": "sad" }, { "user": 8, "react": "smile" }]);
    t.respond(Method::Get, "message/3?start=0", page(vec![m]));
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    let r = app.view().message(10).unwrap().reactions;
    assert_eq!(r.sad, ToggleState::Active);
    assert_eq!(r.smile, ToggleState::Inactive);
}

#[tokio::test]
async fn rejected_reactions_roll_back() {
    let t = scripted_backend();
    let mut m = msg(10, 8, "joke");
    m["reacts"] = json!([{ "user": 7, "react": "laugh" }]);
    t.respond(Method::Get, "message/3?start=0", page(vec![m]))
        .reject(
            Method::Post,
            "message/react/3/10",
            ClientError::Input("Already reacted".into()),
        )
        .reject(
            Method::Post,
            "message/unreact/3/10",
            ClientError::Input("Not reacted".into()),
        );
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    app.dispatch(UiEvent::ToggleReact {
        id: 10,
        kind: ReactKind::Smile,
    });
    assert_eq!(
        app.view().message(10).unwrap().reactions.smile,
        ToggleState::Activating
    );
    app.settle().await;

    let r = app.view().message(10).unwrap().reactions;
    assert_eq!(r.smile, ToggleState::Inactive);
    assert_eq!(r.laugh, ToggleState::Active);
    assert_eq!(app.view().popup, Some(Popup::Error("Already reacted".into())));

    app.dispatch(UiEvent::DismissPopup);
    app.dispatch(UiEvent::ToggleReact {
        id: 10,
        kind: ReactKind::Laugh,
    });
    app.settle().await;

    let r = app.view().message(10).unwrap().reactions;
    assert_eq!(r.laugh, ToggleState::Active);
    assert_eq!(r.smile, ToggleState::Inactive);
    assert_eq!(r.sad, ToggleState::Inactive);
    assert_eq!(app.view().popup, Some(Popup::Error("Not reacted".into())));
}

#[tokio::test]
async fn unreachable_backend_surfaces_popup() {
    let t = scripted_backend();
    let mut app = signed_in(t).await;
    open(&mut app, 3).await;

    assert!(matches!(
        app.view().popup,
        Some(Popup::Error(ref m)) if m.starts_with("transport failure")
    ));
    assert_eq!(app.in_flight(), 0);
}
