//! Integration tests for [`media_handlers::ImageHandler`].

mod common;

use std::sync::Arc;

use common::{create_test_message, no_username, MockBot, MockProvider, Sent};
use dbot_core::{ChatAction, Handler, HandlerResponse};
use generation_provider::Resolution;
use media_handlers::ImageHandler;
use media_pipeline::{FailureKind, RequestState};

fn handler(bot: Arc<MockBot>, provider: Arc<MockProvider>) -> ImageHandler {
    ImageHandler::new(no_username(), provider, bot, Resolution::SQUARE_1024)
}

/// **Test: The provider receives the exact prompt text and the photo is delivered.**
///
/// **Setup:** MockProvider returning `image-1`; resolution 1024x1024.
///
/// **Action:** Handle `/image a red fox in snow`.
///
/// **Expected:** One provider call with prompt `a red fox in snow` at 1024x1024; an
/// upload_photo action then one photo with the generated bytes; response Stop; state Done.
#[tokio::test]
async fn test_image_prompt_passed_verbatim_and_photo_sent() {
    let bot = Arc::new(MockBot::default());
    let provider = Arc::new(MockProvider::default());
    let handler = handler(bot.clone(), provider.clone());

    let message = create_test_message("/image a red fox in snow");
    let response = handler.handle(&message).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert_eq!(
        *provider.image_prompts.lock().unwrap(),
        vec![("a red fox in snow".to_string(), Resolution::SQUARE_1024)]
    );
    assert_eq!(
        bot.sent(),
        vec![
            Sent::Action(ChatAction::UploadPhoto),
            Sent::Photo {
                bytes: b"image-1".to_vec(),
                caption: None,
            },
        ]
    );

    let machine = handler.process(&message, "a red fox in snow").await;
    assert_eq!(
        machine.history(),
        &[
            RequestState::Idle,
            RequestState::Validating,
            RequestState::Generating { frame: 1, total: 1 },
            RequestState::Delivering,
            RequestState::Done,
        ]
    );
}

/// **Test: Empty prompt gets the validation message and makes no provider call.**
///
/// **Action:** Handle `/image` and `/image    `.
///
/// **Expected:** Each replies "Please provide a prompt after /image"; provider never called;
/// final state Failed(Validation).
#[tokio::test]
async fn test_empty_prompt_rejected_without_provider_call() {
    let bot = Arc::new(MockBot::default());
    let provider = Arc::new(MockProvider::default());
    let handler = handler(bot.clone(), provider.clone());

    for text in ["/image", "/image    "] {
        let response = handler.handle(&create_test_message(text)).await.unwrap();
        assert_eq!(response, HandlerResponse::Stop);
    }

    assert_eq!(provider.total_calls(), 0);
    assert_eq!(
        bot.texts(),
        vec![
            "Please provide a prompt after /image".to_string(),
            "Please provide a prompt after /image".to_string(),
        ]
    );

    let machine = handler.process(&create_test_message("/image"), "").await;
    assert_eq!(machine.state(), RequestState::Failed(FailureKind::Validation));
}

/// **Test: Provider failure yields exactly one generic error message.**
#[tokio::test]
async fn test_generation_failure_sends_generic_message() {
    let bot = Arc::new(MockBot::default());
    let provider = Arc::new(MockProvider::failing_on_image(1));
    let handler = handler(bot.clone(), provider.clone());

    let machine = handler
        .process(&create_test_message("/image a cat"), "a cat")
        .await;

    assert_eq!(machine.state(), RequestState::Failed(FailureKind::Generation));
    assert_eq!(bot.replies(), vec![Sent::Text("Error generating image".into())]);
}

/// **Test: A failed photo upload is reported with the generic message.**
#[tokio::test]
async fn test_delivery_failure_reported() {
    let bot = Arc::new(MockBot::failing_uploads());
    let provider = Arc::new(MockProvider::default());
    let handler = handler(bot.clone(), provider);

    let machine = handler
        .process(&create_test_message("/image a cat"), "a cat")
        .await;

    assert_eq!(machine.state(), RequestState::Failed(FailureKind::Delivery));
    assert_eq!(bot.texts(), vec!["Error generating image".to_string()]);
}

/// **Test: Other commands and plain text pass through untouched.**
#[tokio::test]
async fn test_other_messages_continue() {
    let bot = Arc::new(MockBot::default());
    let provider = Arc::new(MockProvider::default());
    let handler = handler(bot.clone(), provider.clone());

    for text in ["hello", "/ask what?", "/video sunset", "/images a cat"] {
        let response = handler.handle(&create_test_message(text)).await.unwrap();
        assert_eq!(response, HandlerResponse::Continue);
    }
    assert!(bot.sent().is_empty());
    assert_eq!(provider.total_calls(), 0);
}
