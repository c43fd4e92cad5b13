//! Tests for the streaming prompt relay.

use pcore::{
    GenerationConfig,
    testing::{Script, Scripted},
};
use pisces_relay::{Outcome, PromptRelay, TextTask};
use std::sync::Arc;
use tokio::sync::Notify;

fn relay(model: &Scripted) -> PromptRelay<Scripted> {
    PromptRelay::new(model.clone(), GenerationConfig::default())
}

#[tokio::test]
async fn joke_accumulates_chunks() {
    let model = Scripted::with([Script::chunks(["Why", " did...", " chicken?"])]);
    let relay = relay(&model);

    relay
        .submit(TextTask::Joke.prefix(), "chickens crossing roads")
        .await;

    assert_eq!(
        relay.outcome(),
        Outcome::Success("Why did... chicken?".into())
    );
    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].contents[0].text().as_deref(),
        Some(
            "Write a funny joke to tell my friends about the following subject: chickens crossing roads"
        )
    );
}

#[tokio::test]
async fn observers_see_every_prefix() {
    let model = Scripted::with([Script::chunks(["Why", " did...", " chicken?"])]);
    let relay = relay(&model);
    let mut rx = relay.subscribe();
    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            seen.push(rx.borrow_and_update().clone());
        }
        seen
    });

    relay.submit("", "tell me a joke").await;
    drop(relay);

    let seen = observer.await.unwrap();
    assert_eq!(
        seen,
        vec![
            Outcome::InProgress,
            Outcome::Success("Why".into()),
            Outcome::Success("Why did...".into()),
            Outcome::Success("Why did... chicken?".into()),
        ]
    );
}

#[tokio::test]
async fn failure_mid_stream_is_final() {
    let model = Scripted::with([Script::FailAfter(
        vec!["partial".into()],
        "quota exceeded".into(),
    )]);
    let relay = relay(&model);
    let mut rx = relay.subscribe();
    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            seen.push(rx.borrow_and_update().clone());
        }
        seen
    });

    relay.submit("", "hello").await;
    drop(relay);

    let seen = observer.await.unwrap();
    assert_eq!(
        seen.last(),
        Some(&Outcome::Failure("quota exceeded".into()))
    );
    assert!(seen.contains(&Outcome::Success("partial".into())));
}

#[tokio::test]
async fn failure_before_output() {
    let model = Scripted::with([Script::Fail("invalid api key".into())]);
    let relay = relay(&model);

    relay.submit(TextTask::Summary.prefix(), "text").await;
    assert_eq!(relay.outcome(), Outcome::Failure("invalid api key".into()));
}

#[tokio::test]
async fn blank_prefix_sends_body_untouched() {
    let model = Scripted::with([Script::reply("ok")]);
    let relay = relay(&model);

    relay.submit(TextTask::Free.prefix(), "just this").await;
    relay.submit("   ", "and this").await;

    let requests = model.requests();
    assert_eq!(requests[0].contents[0].text().as_deref(), Some("just this"));
    assert_eq!(requests[1].contents[0].text().as_deref(), Some("and this"));
}

#[tokio::test]
async fn unknown_task_uses_fallback() {
    let model = Scripted::with([Script::reply("ok")]);
    let relay = relay(&model);

    relay
        .submit(TextTask::from_name("poem").prefix(), "rain")
        .await;
    assert_eq!(
        model.requests()[0].contents[0].text().as_deref(),
        Some("What do you think about: rain")
    );
}

#[tokio::test]
async fn empty_stream_succeeds_with_empty_text() {
    let model = Scripted::with([Script::Chunks(vec![])]);
    let relay = relay(&model);

    relay.submit("", "anything").await;
    assert_eq!(relay.outcome(), Outcome::Success(String::new()));
}

#[tokio::test]
async fn reset_returns_to_idle() {
    let model = Scripted::with([Script::reply("done")]);
    let relay = relay(&model);

    relay.submit("", "go").await;
    assert_eq!(relay.outcome().text(), Some("done"));

    relay.reset();
    assert_eq!(relay.outcome(), Outcome::Idle);
}

#[tokio::test]
async fn reset_discards_stream_in_flight() {
    let gate = Arc::new(Notify::new());
    let model = Scripted::with([Script::Hold(
        vec!["first".into(), " second".into()],
        gate.clone(),
    )]);
    let relay = relay(&model);
    let mut rx = relay.subscribe();

    let handle = relay.spawn_submit("", "go");
    rx.wait_for(|outcome| outcome.text() == Some("first"))
        .await
        .unwrap();

    relay.reset();
    gate.notify_one();
    handle.await.unwrap();

    assert_eq!(relay.outcome(), Outcome::Idle);
}

#[tokio::test]
async fn reset_discards_queued_submits() {
    let gate = Arc::new(Notify::new());
    let model = Scripted::with([
        Script::Hold(vec!["first".into(), " second".into()], gate.clone()),
        Script::reply("queued"),
    ]);
    let relay = relay(&model);
    let mut rx = relay.subscribe();

    let running = relay.spawn_submit("", "one");
    rx.wait_for(|outcome| outcome.text() == Some("first"))
        .await
        .unwrap();
    let queued = relay.spawn_submit("", "two");

    relay.reset();
    gate.notify_one();
    running.await.unwrap();
    queued.await.unwrap();

    assert_eq!(relay.outcome(), Outcome::Idle);
    assert_eq!(model.requests().len(), 1);
}

#[tokio::test]
async fn submits_run_in_order() {
    let model = Scripted::with([Script::reply("one"), Script::reply("two")]);
    let relay = relay(&model);

    let first = relay.spawn_submit("", "a");
    let second = relay.spawn_submit("", "b");
    first.await.unwrap();
    second.await.unwrap();

    let requests = model.requests();
    assert_eq!(requests[0].contents[0].text().as_deref(), Some("a"));
    assert_eq!(requests[1].contents[0].text().as_deref(), Some("b"));
    assert_eq!(relay.outcome(), Outcome::Success("two".into()));
}
