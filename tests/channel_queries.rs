//! Integration tests for NAMES formatting, conversation permissions, and
//! topic queries.

mod common;

use common::{message_texts, TestNet};
use kestrel_proto::mode::parse_channel_modes;
use kestrel_proto::{Command, Name, Response};
use kestreld::handlers::channel as chan;

#[tokio::test]
async fn names_wraps_under_line_budget() {
    // Server name of 10 bytes and a 5-byte nick give a 465-byte budget.
    let net = TestNet::with_server_name("irc.test10");
    let mut watch = net.client("watch").await;
    let name = Name::from("#big");

    chan::join(&net.state, &watch.handle, &name, None).await;

    // 199 more members with 9-byte nicks: 200 members total.
    for i in 0..199 {
        let member = net.client(&format!("member{:03}", i)).await;
        chan::join(&net.state, &member.handle, &name, None).await;
    }
    watch.drain();

    chan::names(&net.state, &watch.handle, &name).await;
    let numerics = watch.drain_numerics();

    let budget = 480 - "irc.test10".len() - "watch".len();
    assert_eq!(budget, 465);

    let payloads: Vec<&String> = numerics
        .iter()
        .filter(|(code, _)| *code == Response::RPL_NAMREPLY)
        .map(|(_, args)| args.last().unwrap())
        .collect();

    assert!(payloads.len() >= 5, "got {} lines", payloads.len());
    for payload in &payloads {
        assert!(
            payload.len() <= budget,
            "line over budget: {} bytes",
            payload.len()
        );
    }

    // Concatenating the tokens yields exactly the membership.
    let tokens: Vec<&str> = payloads
        .iter()
        .flat_map(|p| p.split(' '))
        .filter(|t| !t.is_empty())
        .collect();
    assert_eq!(tokens.len(), 200);

    assert_eq!(
        numerics.last().map(|(code, _)| *code),
        Some(Response::RPL_ENDOFNAMES)
    );
}

#[tokio::test]
async fn names_prefixes_follow_multi_prefix_capability() {
    let net = TestNet::new();
    let mut plain = net.client("plain").await;
    let mut fancy = net.client("fancy").await;
    fancy.enable_multi_prefix().await;
    let name = Name::from("#pfx");

    // First joiner is ~@; give the others voice stacked under halfop.
    let mut oscar = net.client("oscar").await;
    chan::join(&net.state, &oscar.handle, &name, None).await;
    chan::join(&net.state, &plain.handle, &name, None).await;
    chan::join(&net.state, &fancy.handle, &name, None).await;
    chan::mode(
        &net.state,
        &oscar.handle,
        &name,
        parse_channel_modes("+h+v", &["plain", "plain"]),
    )
    .await;
    oscar.drain();
    plain.drain();
    fancy.drain();

    chan::names(&net.state, &plain.handle, &name).await;
    let args = plain.expect_numeric(Response::RPL_NAMREPLY);
    let mut tokens: Vec<&str> = args.last().unwrap().split(' ').collect();
    tokens.sort_unstable();
    assert_eq!(tokens, vec!["%plain", "fancy", "~oscar"]);

    chan::names(&net.state, &fancy.handle, &name).await;
    let args = fancy.expect_numeric(Response::RPL_NAMREPLY);
    let mut tokens: Vec<&str> = args.last().unwrap().split(' ').collect();
    tokens.sort_unstable();
    assert_eq!(tokens, vec!["%+plain", "fancy", "~@oscar"]);
}

#[tokio::test]
async fn names_on_empty_persistent_channel() {
    let net = TestNet::new();
    let mut oscar = net.client("oscar").await;
    let name = Name::from("#ghost");

    chan::join(&net.state, &oscar.handle, &name, None).await;
    chan::mode(&net.state, &oscar.handle, &name, parse_channel_modes("+P", &[])).await;
    chan::part(&net.state, &oscar.handle, &name, None).await;
    oscar.drain();

    chan::names(&net.state, &oscar.handle, &name).await;
    let numerics = oscar.drain_numerics();

    // One empty reply line, then the terminator.
    assert_eq!(numerics.len(), 2);
    assert_eq!(numerics[0].0, Response::RPL_NAMREPLY);
    assert_eq!(numerics[0].1.last().unwrap(), "");
    assert_eq!(numerics[1].0, Response::RPL_ENDOFNAMES);
}

#[tokio::test]
async fn names_for_unknown_channel_is_just_the_terminator() {
    let net = TestNet::new();
    let mut alice = net.client("alice").await;

    chan::names(&net.state, &alice.handle, &Name::from("#nowhere")).await;
    let numerics = alice.drain_numerics();
    assert_eq!(numerics.len(), 1);
    assert_eq!(numerics[0].0, Response::RPL_ENDOFNAMES);
}

#[tokio::test]
async fn privmsg_excludes_the_sender() {
    let net = TestNet::new();
    let mut alice = net.client("alice").await;
    let mut bob = net.client("bob").await;
    let name = Name::from("#chat");

    chan::join(&net.state, &alice.handle, &name, None).await;
    chan::join(&net.state, &bob.handle, &name, None).await;
    alice.drain();
    bob.drain();

    chan::privmsg(&net.state, &alice.handle, &name, "hello there").await;

    assert_eq!(message_texts(&bob.drain()), vec!["hello there"]);
    assert!(message_texts(&alice.drain()).is_empty());
}

#[tokio::test]
async fn no_outside_messages() {
    let net = TestNet::new();
    let mut oscar = net.client("oscar").await;
    let mut lurker = net.client("lurker").await;
    let name = Name::from("#chat");

    chan::join(&net.state, &oscar.handle, &name, None).await;
    chan::mode(&net.state, &oscar.handle, &name, parse_channel_modes("+n", &[])).await;
    oscar.drain();

    chan::privmsg(&net.state, &lurker.handle, &name, "psst").await;
    lurker.expect_numeric(Response::ERR_CANNOTSENDTOCHAN);
    assert!(message_texts(&oscar.drain()).is_empty());

    // A server operator bypasses +n.
    lurker.set_oper().await;
    chan::privmsg(&net.state, &lurker.handle, &name, "announcement").await;
    assert_eq!(message_texts(&oscar.drain()), vec!["announcement"]);
}

#[tokio::test]
async fn moderated_channel_requires_voice_or_op() {
    let net = TestNet::new();
    let mut oscar = net.client("oscar").await;
    let mut voiced = net.client("voiced").await;
    let mut hushed = net.client("hushed").await;
    let mut half = net.client("half").await;
    let name = Name::from("#quiet");

    chan::join(&net.state, &oscar.handle, &name, None).await;
    chan::join(&net.state, &voiced.handle, &name, None).await;
    chan::join(&net.state, &hushed.handle, &name, None).await;
    chan::join(&net.state, &half.handle, &name, None).await;
    chan::mode(
        &net.state,
        &oscar.handle,
        &name,
        parse_channel_modes("+m+v+h", &["voiced", "half"]),
    )
    .await;
    for c in [&mut oscar, &mut voiced, &mut hushed, &mut half] {
        c.drain();
    }

    chan::privmsg(&net.state, &voiced.handle, &name, "I have voice").await;
    assert_eq!(message_texts(&oscar.drain()), vec!["I have voice"]);

    chan::privmsg(&net.state, &oscar.handle, &name, "op speaking").await;
    assert_eq!(message_texts(&voiced.drain()), vec!["op speaking"]);

    chan::privmsg(&net.state, &hushed.handle, &name, "muted").await;
    hushed.expect_numeric(Response::ERR_CANNOTSENDTOCHAN);

    // Halfop alone does not satisfy +m.
    chan::privmsg(&net.state, &half.handle, &name, "halfop talking").await;
    half.expect_numeric(Response::ERR_CANNOTSENDTOCHAN);
    assert!(message_texts(&oscar.drain()).is_empty());
}

#[tokio::test]
async fn notice_semantics() {
    let net = TestNet::new();
    let mut oscar = net.client("oscar").await;
    let mut bob = net.client("bob").await;
    let name = Name::from("#chat");

    chan::join(&net.state, &oscar.handle, &name, None).await;
    chan::join(&net.state, &bob.handle, &name, None).await;
    oscar.drain();
    bob.drain();

    chan::notice(&net.state, &oscar.handle, &name, "heads up").await;
    let batch = bob.drain();
    assert!(batch
        .iter()
        .any(|m| matches!(&m.command, Command::NOTICE(_, text) if text == "heads up")));

    // NOTICE to a channel that does not exist stays silent...
    chan::notice(&net.state, &oscar.handle, &Name::from("#void"), "x").await;
    oscar.expect_silence();

    // ...but PRIVMSG reports it.
    chan::privmsg(&net.state, &oscar.handle, &Name::from("#void"), "x").await;
    oscar.expect_numeric(Response::ERR_NOSUCHCHANNEL);

    // The cannot-send check still answers NOTICE.
    chan::mode(&net.state, &oscar.handle, &name, parse_channel_modes("+m", &[])).await;
    oscar.drain();
    bob.drain();
    chan::notice(&net.state, &bob.handle, &name, "quiet now").await;
    bob.expect_numeric(Response::ERR_CANNOTSENDTOCHAN);
}

#[tokio::test]
async fn topic_query_and_update() {
    let net = TestNet::new();
    let mut oscar = net.client("oscar").await;
    let mut bob = net.client("bob").await;
    let mut nosy = net.client("nosy").await;
    let name = Name::from("#talk");

    chan::join(&net.state, &oscar.handle, &name, None).await;
    chan::join(&net.state, &bob.handle, &name, None).await;
    oscar.drain();
    bob.drain();

    // Unset topic reads back as silence.
    chan::get_topic(&net.state, &oscar.handle, &name).await;
    oscar.expect_silence();

    // Non-members cannot query the topic.
    chan::get_topic(&net.state, &nosy.handle, &name).await;
    nosy.expect_numeric(Response::ERR_NOTONCHANNEL);

    chan::set_topic(&net.state, &bob.handle, &name, "general chatter").await;
    // Everyone, setter included, sees the TOPIC line from the setter.
    for client in [&mut oscar, &mut bob] {
        let batch = client.drain();
        let topic = batch
            .iter()
            .find(|m| matches!(&m.command, Command::TOPIC(_, _)))
            .expect("TOPIC broadcast");
        assert!(matches!(
            &topic.command,
            Command::TOPIC(c, Some(text)) if c == "#talk" && text == "general chatter"
        ));
        assert_eq!(
            topic.prefix.as_ref().map(ToString::to_string).as_deref(),
            Some("bob!bob@host.example")
        );
    }

    chan::get_topic(&net.state, &oscar.handle, &name).await;
    let args = oscar.expect_numeric(Response::RPL_TOPIC);
    assert_eq!(args[2], "general chatter");

    // Under +t only channel operators may set it.
    chan::mode(&net.state, &oscar.handle, &name, parse_channel_modes("+t", &[])).await;
    oscar.drain();
    bob.drain();

    chan::set_topic(&net.state, &bob.handle, &name, "hijack").await;
    bob.expect_numeric(Response::ERR_CHANOPRIVSNEEDED);

    chan::get_topic(&net.state, &oscar.handle, &name).await;
    let args = oscar.expect_numeric(Response::RPL_TOPIC);
    assert_eq!(args[2], "general chatter");
}

#[tokio::test]
async fn topic_changes_persist_for_persistent_channels() {
    let net = TestNet::new();
    let mut oscar = net.client("oscar").await;
    let name = Name::from("#keep");

    chan::join(&net.state, &oscar.handle, &name, None).await;
    chan::mode(&net.state, &oscar.handle, &name, parse_channel_modes("+P", &[])).await;
    chan::set_topic(&net.state, &oscar.handle, &name, "remember this").await;
    oscar.drain();

    let row = net.store.get("#keep").expect("row");
    assert_eq!(row.topic, "remember this");
}
