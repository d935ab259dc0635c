//! End-to-end tests over the real file store and transport.
//!
//! These drive the router the way the editor panel does: a scripted
//! name prompt, a channel-backed view, and a tempdir-backed record.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tokio::sync::mpsc;

use nectar_application::ports::{NamePrompt, ViewSink};
use nectar_application::{Command, Router, SelectionDirective, ViewPush};
use nectar_domain::{Collection, HttpMethod};
use nectar_infrastructure::{FileCollectionStore, ReqwestHttpClient};

struct ScriptedPrompt {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedPrompt {
    fn with(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
        }
    }
}

impl NamePrompt for ScriptedPrompt {
    async fn request_name(&self, _prompt: &str, _initial: Option<&str>) -> Option<String> {
        self.replies.lock().unwrap().pop_front()
    }
}

struct ChannelView {
    tx: mpsc::UnboundedSender<ViewPush>,
}

impl ViewSink for ChannelView {
    async fn push(&self, push: ViewPush) {
        let _ = self.tx.send(push);
    }
}

type AppRouter = Router<FileCollectionStore, ReqwestHttpClient, ScriptedPrompt, ChannelView>;

async fn session(
    dir: &TempDir,
    replies: &[&str],
) -> (AppRouter, mpsc::UnboundedReceiver<ViewPush>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let router = Router::new(
        FileCollectionStore::open(dir.path()).await,
        ReqwestHttpClient::new().expect("failed to build transport"),
        ScriptedPrompt::with(replies),
        Arc::new(ChannelView { tx }),
    );
    (router, rx)
}

fn collections(push: ViewPush) -> Vec<Collection> {
    match push {
        ViewPush::Collections { data, .. } => data,
        ViewPush::Response { .. } => panic!("expected collections push"),
    }
}

#[tokio::test]
async fn test_collection_crud_round_trip() {
    let dir = TempDir::new().unwrap();
    let (mut router, mut rx) = session(&dir, &["Demo", "Req1"]).await;

    router.handle(Command::AddCollection).await.unwrap();
    let demo_id = collections(rx.recv().await.unwrap())[0].id.clone();

    router
        .handle(Command::AddRequest {
            collection_id: demo_id.clone(),
        })
        .await
        .unwrap();
    let mut request = collections(rx.recv().await.unwrap())[0].requests[0].clone();
    assert_eq!(request.name, "Req1");

    request.method = HttpMethod::Get;
    request.url = "http://x".to_string();
    router
        .handle(Command::UpdateRequest {
            collection_id: demo_id.clone(),
            request,
        })
        .await
        .unwrap();
    rx.recv().await.unwrap();

    // A fresh session over the same record sees the same data.
    let (mut next, mut next_rx) = session(&dir, &[]).await;
    next.handle(Command::GetCollections).await.unwrap();
    let list = collections(next_rx.recv().await.unwrap());
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Demo");
    assert_eq!(list[0].requests.len(), 1);
    assert_eq!(list[0].requests[0].name, "Req1");
    assert_eq!(list[0].requests[0].url, "http://x");
}

#[tokio::test]
async fn test_cancelled_prompt_leaves_record_untouched() {
    let dir = TempDir::new().unwrap();
    let (mut router, mut rx) = session(&dir, &[]).await;

    router.handle(Command::AddCollection).await.unwrap();

    assert!(rx.try_recv().is_err());
    assert!(!dir.path().join("collections.json").exists());
}

#[tokio::test]
async fn test_delete_collection_drops_requests_and_selection() {
    let dir = TempDir::new().unwrap();
    let (mut router, mut rx) = session(&dir, &["Demo", "Req1"]).await;

    router.handle(Command::AddCollection).await.unwrap();
    let demo_id = collections(rx.recv().await.unwrap())[0].id.clone();
    router
        .handle(Command::AddRequest {
            collection_id: demo_id.clone(),
        })
        .await
        .unwrap();
    rx.recv().await.unwrap();

    router
        .handle(Command::DeleteCollection { id: demo_id })
        .await
        .unwrap();
    let push = rx.recv().await.unwrap();
    let ViewPush::Collections {
        data,
        select_collection,
        select_request,
    } = push
    else {
        panic!("expected collections push");
    };
    assert!(data.is_empty());
    assert_eq!(select_collection, SelectionDirective::Clear);
    assert_eq!(select_request, SelectionDirective::Clear);
    assert_eq!(router.selection().collection_id, None);
    assert_eq!(router.selection().request_id, None);

    // The record reflects the deletion too.
    let (mut next, mut next_rx) = session(&dir, &[]).await;
    next.handle(Command::GetCollections).await.unwrap();
    assert!(collections(next_rx.recv().await.unwrap()).is_empty());
}

#[tokio::test]
async fn test_send_to_closed_port_pushes_status_zero() {
    let dir = TempDir::new().unwrap();
    let (mut router, mut rx) = session(&dir, &[]).await;

    router
        .handle(Command::SendRequest {
            url: "http://localhost:1".to_string(),
            method: HttpMethod::Get,
            headers: "{}".to_string(),
            body: "{}".to_string(),
        })
        .await
        .unwrap();

    let push = rx.recv().await.unwrap();
    let ViewPush::Response { status, body } = push else {
        panic!("expected response push");
    };
    assert_eq!(status, 0);
    assert!(!body.is_empty());
}

#[tokio::test]
async fn test_malformed_headers_push_status_zero_without_network() {
    let dir = TempDir::new().unwrap();
    let (mut router, mut rx) = session(&dir, &[]).await;

    router
        .handle(Command::SendRequest {
            // The URL is unreachable; a status-0 push with the headers
            // complaint proves the transport was never consulted.
            url: "http://nectar.invalid".to_string(),
            method: HttpMethod::Post,
            headers: "{not json".to_string(),
            body: "{}".to_string(),
        })
        .await
        .unwrap();

    let push = rx.recv().await.unwrap();
    let ViewPush::Response { status, body } = push else {
        panic!("expected response push");
    };
    assert_eq!(status, 0);
    assert!(body.contains("invalid headers"));
}

#[tokio::test]
async fn test_sends_do_not_block_management() {
    let dir = TempDir::new().unwrap();
    let (mut router, mut rx) = session(&dir, &["Demo"]).await;

    // Queue a send that will take a while to fail, then manage
    // collections immediately.
    router
        .handle(Command::SendRequest {
            url: "http://localhost:1".to_string(),
            method: HttpMethod::Get,
            headers: String::new(),
            body: String::new(),
        })
        .await
        .unwrap();
    router.handle(Command::AddCollection).await.unwrap();

    // Both pushes arrive, in whatever order the transport allows.
    let mut saw_collections = false;
    let mut saw_response = false;
    for _ in 0..2 {
        match rx.recv().await.unwrap() {
            ViewPush::Collections { data, .. } => {
                assert_eq!(data[0].name, "Demo");
                saw_collections = true;
            }
            ViewPush::Response { status, .. } => {
                assert_eq!(status, 0);
                saw_response = true;
            }
        }
    }
    assert!(saw_collections);
    assert!(saw_response);
}
