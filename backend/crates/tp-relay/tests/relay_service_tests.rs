mod common;

use common::{
    FailingChannel, FailingStore, GatedChannel, RecordingChannel, create_harness, signed_assertion,
};

use std::sync::Arc;
use std::time::Duration;

use googletest::prelude::*;
use tp_core::{ChatId, SendKey};
use tp_relay::{
    ContactOutcome, DeliveryQueue, ParseMode, PlatformContact, RelayError, RelayMetrics,
    RelayService,
};

async fn link_user(harness: &common::Harness, user_id: i64, chat_id: i64) -> SendKey {
    harness
        .registration
        .on_login(&signed_assertion(user_id, "Bob"))
        .await
        .unwrap();
    let outcome = harness
        .registration
        .on_platform_contact(PlatformContact {
            user_id,
            chat_id: ChatId(chat_id),
        })
        .await
        .unwrap();

    match outcome {
        ContactOutcome::Linked { key } => key,
        other => panic!("expected Linked, got {:?}", other),
    }
}

#[tokio::test]
async fn given_linked_key_when_send_then_one_markdown_delivery() {
    // Given
    let channel = RecordingChannel::new();
    let harness = create_harness(channel.clone()).await;
    let key = link_user(&harness, 12346, 987).await;

    // When
    let result = harness.relay.send(key.as_str(), "hi *there*").await;

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(harness.drain().await, eq(1));
    let delivered = channel.delivered();
    assert_that!(delivered.len(), eq(1));
    assert_that!(delivered[0].chat_id, eq(ChatId(987)));
    assert_that!(delivered[0].text.as_str(), eq("hi *there*"));
    assert_that!(delivered[0].parse_mode, eq(ParseMode::Markdown));
}

#[tokio::test]
async fn given_unknown_key_when_send_then_unauthorized_and_no_delivery() {
    // Given
    let channel = RecordingChannel::new();
    let harness = create_harness(channel.clone()).await;
    link_user(&harness, 12346, 987).await;

    // When
    let result = harness.relay.send("bogus", "hi").await;

    // Then
    assert!(matches!(result, Err(RelayError::Unauthorized { .. })));
    assert_that!(harness.drain().await, eq(0));
    assert_that!(channel.delivered(), is_empty());
}

#[tokio::test]
async fn given_empty_text_when_send_then_bad_request_without_lookup() {
    // Given
    let store = Arc::new(FailingStore::default());
    let (queue, _worker) = DeliveryQueue::start(RecordingChannel::new(), RelayMetrics::new());
    let relay = RelayService::new(store.clone(), queue, RelayMetrics::new());

    // When
    let result = relay.send("some-key", "").await;

    // Then
    assert!(matches!(result, Err(RelayError::BadRequest { .. })));
    assert_that!(store.calls(), eq(0));
}

#[tokio::test]
async fn given_empty_key_when_send_then_bad_request_without_lookup() {
    // Given
    let store = Arc::new(FailingStore::default());
    let (queue, _worker) = DeliveryQueue::start(RecordingChannel::new(), RelayMetrics::new());
    let relay = RelayService::new(store.clone(), queue, RelayMetrics::new());

    // When
    let result = relay.send("", "hi").await;

    // Then
    assert!(matches!(result, Err(RelayError::BadRequest { .. })));
    assert_that!(store.calls(), eq(0));
}

#[tokio::test]
async fn given_failing_store_when_send_then_storage_error() {
    // Given
    let (queue, _worker) = DeliveryQueue::start(RecordingChannel::new(), RelayMetrics::new());
    let relay = RelayService::new(Arc::new(FailingStore::default()), queue, RelayMetrics::new());

    // When
    let result = relay.send("some-key", "hi").await;

    // Then
    assert!(matches!(result, Err(RelayError::Storage { .. })));
}

#[tokio::test]
async fn given_blocked_channel_when_send_then_returns_before_delivery() {
    // Given
    let channel = GatedChannel::new();
    let harness = create_harness(channel.clone()).await;
    let key = link_user(&harness, 12346, 987).await;

    // When
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        harness.relay.send(key.as_str(), "hi"),
    )
    .await
    .expect("send must not wait for delivery");

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(channel.delivered(), is_empty());

    channel.release(1);
    assert_that!(harness.drain().await, eq(1));
    assert_that!(channel.delivered().len(), eq(1));
}

#[tokio::test]
async fn given_failing_channel_when_send_then_caller_still_ok() {
    // Given
    let channel = FailingChannel::new();
    let harness = create_harness(channel.clone()).await;
    let key = link_user(&harness, 12346, 987).await;

    // When
    let result = harness.relay.send(key.as_str(), "hi").await;

    // Then
    assert_that!(result, ok(anything()));
    harness.drain().await;
    assert_that!(channel.attempts(), eq(1));
}
