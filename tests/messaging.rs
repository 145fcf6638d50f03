//! PRIVMSG routing, errors and ordering.

mod common;

use common::TestServer;

#[tokio::test]
async fn direct_message_reaches_only_the_recipient() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.connect_registered("alice").await?;
    let mut bob = server.connect_registered("bob").await?;

    bob.send_raw("PRIVMSG alice :hi").await?;
    assert_eq!(alice.recv().await?, ":bob PRIVMSG alice :hi");
    bob.assert_no_pending().await?;

    Ok(())
}

#[tokio::test]
async fn channel_broadcast_excludes_the_sender() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.connect_registered("alice").await?;
    let mut bob = server.connect_registered("bob").await?;

    alice.join("#chan").await?;
    bob.join("#chan").await?;
    alice.recv().await?; // bob's JOIN

    alice.send_raw("PRIVMSG #chan :hello").await?;
    assert_eq!(bob.recv().await?, ":alice PRIVMSG #chan :hello");
    alice.assert_no_pending().await?;

    Ok(())
}

#[tokio::test]
async fn privmsg_error_numerics() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.connect_registered("alice").await?;
    let mut bob = server.connect_registered("bob").await?;

    alice.send_raw("PRIVMSG").await?;
    assert_eq!(
        alice.recv().await?,
        ":server 411 alice :No recipient given (PRIVMSG)"
    );

    alice.send_raw("PRIVMSG bob").await?;
    assert_eq!(alice.recv().await?, ":server 412 alice :No text to send");

    alice.send_raw("PRIVMSG ghost :anyone?").await?;
    assert_eq!(
        alice.recv().await?,
        ":server 401 alice ghost :No such nick/channel"
    );

    alice.send_raw("PRIVMSG 9bad :syntax").await?;
    assert_eq!(
        alice.recv().await?,
        ":server 401 alice 9bad :No such nick/channel"
    );

    alice.send_raw("PRIVMSG #nochan :anyone?").await?;
    assert_eq!(
        alice.recv().await?,
        ":server 403 alice #nochan :No such channel"
    );

    // A real channel the sender is not in.
    bob.join("#theirs").await?;
    alice.send_raw("PRIVMSG #theirs :let me in").await?;
    assert_eq!(
        alice.recv().await?,
        ":server 404 alice #theirs :Cannot send to channel"
    );
    bob.assert_no_pending().await?;

    Ok(())
}

#[tokio::test]
async fn messages_arrive_in_send_order() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.connect_registered("alice").await?;
    let mut bob = server.connect_registered("bob").await?;

    alice.join("#chan").await?;
    bob.join("#chan").await?;
    alice.recv().await?; // bob's JOIN

    for i in 0..20 {
        alice.send_raw(&format!("PRIVMSG #chan :msg {}", i)).await?;
    }
    for i in 0..20 {
        assert_eq!(
            bob.recv().await?,
            format!(":alice PRIVMSG #chan :msg {}", i)
        );
    }

    Ok(())
}

#[tokio::test]
async fn empty_trailing_text_is_relayed() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.connect_registered("alice").await?;
    let mut bob = server.connect_registered("bob").await?;

    alice.send_raw("PRIVMSG bob :").await?;
    assert_eq!(bob.recv().await?, ":alice PRIVMSG bob :");

    Ok(())
}

#[tokio::test]
async fn overlong_relay_is_truncated_on_the_wire() -> anyhow::Result<()> {
    let server = TestServer::spawn().await?;
    let mut alice = server.connect_registered("alice").await?;
    let mut bob = server.connect_registered("bob").await?;

    let text = "x".repeat(600);
    alice.send_raw(&format!("PRIVMSG bob :{}", text)).await?;

    let line = bob.recv().await?;
    assert!(line.starts_with(":alice PRIVMSG bob :xxx"));
    // 512 octets including CRLF leaves 510 of payload.
    assert_eq!(line.len(), 510);

    Ok(())
}
