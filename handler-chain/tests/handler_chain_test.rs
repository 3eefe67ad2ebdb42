//! Integration tests for [`handler_chain::HandlerChain`] as the command dispatcher.
//!
//! Handlers here are stand-ins keyed on a command prefix, registered in the bot's order
//! (start, image, ask, video), each recording whether it was consulted.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use dbot_core::{Chat, DbotError, Handler, HandlerResponse, Message, User};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        created_at: Utc::now(),
    }
}

type Log = Arc<Mutex<Vec<&'static str>>>;

/// Claims messages whose first word is `/<command>`; logs every consultation.
struct CommandStub {
    command: &'static str,
    log: Log,
    fails: bool,
}

#[async_trait::async_trait]
impl Handler for CommandStub {
    async fn handle(&self, message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.log.lock().unwrap().push(self.command);
        let first = message.content.split_whitespace().next().unwrap_or("");
        if first.strip_prefix('/') != Some(self.command) {
            return Ok(HandlerResponse::Continue);
        }
        if self.fails {
            return Err(DbotError::Bot(format!("{} failed", self.command)));
        }
        Ok(HandlerResponse::Stop)
    }
}

fn dispatcher(log: &Log, failing: Option<&'static str>) -> HandlerChain {
    ["start", "image", "ask", "video"]
        .into_iter()
        .fold(HandlerChain::new(), |chain, command| {
            chain.add_handler(Arc::new(CommandStub {
                command,
                log: log.clone(),
                fails: failing == Some(command),
            }))
        })
}

/// **Test: `/video` is claimed by the last handler after the others pass it on.**
///
/// **Setup:** start, image, ask, video stand-ins.
/// **Action:** `chain.handle` with "/video sunset".
/// **Expected:** Stop; all four were consulted in registration order.
#[tokio::test]
async fn test_video_command_stops_chain() {
    let log = Log::default();
    let chain = dispatcher(&log, None);
    assert_eq!(chain.len(), 4);

    let result = chain.handle(&create_test_message("/video sunset")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(*log.lock().unwrap(), vec!["start", "image", "ask", "video"]);
}

/// **Test: A claim ends the chain; later handlers are not consulted.**
///
/// **Setup:** start, image, ask, video stand-ins.
/// **Action:** `chain.handle` with "/image a red fox".
/// **Expected:** Stop; ask and video never run.
#[tokio::test]
async fn test_image_command_skips_later_handlers() {
    let log = Log::default();
    let chain = dispatcher(&log, None);

    let result = chain.handle(&create_test_message("/image a red fox")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(*log.lock().unwrap(), vec!["start", "image"]);
}

/// **Test: Unknown commands and plain text fall through with Continue.**
///
/// **Setup:** start, image, ask, video stand-ins.
/// **Action:** `chain.handle` with "/weather tomorrow" and with "hello there".
/// **Expected:** Continue for both; every handler consulted once per message.
#[tokio::test]
async fn test_unclaimed_messages_continue() {
    for text in ["/weather tomorrow", "hello there"] {
        let log = Log::default();
        let chain = dispatcher(&log, None);

        let result = chain.handle(&create_test_message(text)).await.unwrap();

        assert_eq!(result, HandlerResponse::Continue, "{}", text);
        assert_eq!(log.lock().unwrap().len(), 4, "{}", text);
    }
}

/// **Test: A handler error ends the chain and is returned.**
///
/// **Setup:** The ask stand-in fails when it claims a message.
/// **Action:** `chain.handle` with "/ask why".
/// **Expected:** Err(Bot); the video handler is never consulted.
#[tokio::test]
async fn test_handler_error_propagates() {
    let log = Log::default();
    let chain = dispatcher(&log, Some("ask"));

    let err = chain.handle(&create_test_message("/ask why")).await.unwrap_err();

    assert!(matches!(err, DbotError::Bot(ref msg) if msg == "ask failed"));
    assert_eq!(*log.lock().unwrap(), vec!["start", "image", "ask"]);
}

/// **Test: An empty chain returns Continue.**
#[tokio::test]
async fn test_empty_chain_returns_continue() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let result = chain.handle(&create_test_message("hello")).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}
