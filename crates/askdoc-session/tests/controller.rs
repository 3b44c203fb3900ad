//! Integration tests for the session controller, driven end to end against
//! the mock gateways.

use std::time::Duration;

use askdoc_core::ErrorKind;
use askdoc_core::ingest::IngestService;
use askdoc_core::query::QueryService;
use askdoc_core::types::DocumentStatus;
use askdoc_session::{DEFAULT_PROCESSING_DELAY, SessionController};
use askdoc_test::{ManualCompletion, MockIngestProvider, MockQueryProvider};
use bytes::Bytes;

fn controller_with(
    ingest: MockIngestProvider,
    query: MockQueryProvider,
    completion: ManualCompletion,
) -> SessionController {
    SessionController::with_completion_source(
        IngestService::new(ingest),
        QueryService::new(query),
        completion,
    )
}

/// Drives a ready document into the controller.
async fn attach_ready_document(controller: &SessionController, completion: &ManualCompletion) {
    completion.complete();
    controller
        .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap();
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Ready
    );
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_upload_walks_through_processing_to_ready() {
    let ingest = MockIngestProvider::new();
    let completion = ManualCompletion::new();
    let controller = controller_with(ingest.clone(), MockQueryProvider::new(), completion.clone());

    let task = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
                .await
        }
    });

    settle().await;
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Processing
    );

    completion.complete();
    task.await.unwrap().unwrap();

    let document = controller.session().document;
    assert_eq!(document.status, DocumentStatus::Ready);
    assert_eq!(document.name.as_deref(), Some("report.pdf"));
    assert_eq!(ingest.request_count(), 1);

    let request = ingest.requests().remove(0);
    assert_eq!(request.filename, "report.pdf");
    assert_eq!(request.content_type.as_deref(), Some("application/pdf"));
}

#[tokio::test(start_paused = true)]
async fn test_default_delay_declares_ready_after_two_seconds() {
    let controller = SessionController::new(
        IngestService::new(MockIngestProvider::new()),
        QueryService::new(MockQueryProvider::new()),
    );

    let task = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
                .await
        }
    });

    settle().await;
    tokio::time::advance(DEFAULT_PROCESSING_DELAY - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Processing
    );

    tokio::time::advance(Duration::from_millis(1)).await;
    task.await.unwrap().unwrap();
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Ready
    );
}

#[tokio::test]
async fn test_rejected_upload_leaves_slot_failed() {
    let controller = controller_with(
        MockIngestProvider::new().with_status_code(500),
        MockQueryProvider::new(),
        ManualCompletion::new(),
    );

    let err = controller
        .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Failed
    );
}

#[tokio::test]
async fn test_transport_failure_leaves_slot_failed() {
    let controller = controller_with(
        MockIngestProvider::new().with_transport_failure(),
        MockQueryProvider::new(),
        ManualCompletion::new(),
    );

    let err = controller
        .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkError);
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Failed
    );
}

#[tokio::test]
async fn test_invalid_file_is_rejected_without_network_traffic() {
    let ingest = MockIngestProvider::new();
    let controller = controller_with(
        ingest.clone(),
        MockQueryProvider::new(),
        ManualCompletion::new(),
    );

    let err = controller
        .submit_document("malware.exe", Bytes::from_static(b"MZ"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(controller.session().document.status, DocumentStatus::Empty);
    assert_eq!(ingest.request_count(), 0);
}

#[tokio::test]
async fn test_second_upload_is_rejected_while_slot_occupied() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        MockQueryProvider::new(),
        completion.clone(),
    );
    attach_ready_document(&controller, &completion).await;

    let err = controller
        .submit_document("other.pdf", Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SlotOccupied);
    assert_eq!(
        controller.session().document.name.as_deref(),
        Some("report.pdf")
    );
}

#[tokio::test]
async fn test_removal_during_processing_discards_late_readiness() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        MockQueryProvider::new(),
        completion.clone(),
    );

    let task = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
                .await
        }
    });

    settle().await;
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Processing
    );

    controller.remove_document();
    completion.complete();
    task.await.unwrap().unwrap();

    // The late readiness signal must not resurrect the removed document.
    assert_eq!(controller.session().document.status, DocumentStatus::Empty);
    assert!(controller.session().document.name.is_none());
}

#[tokio::test]
async fn test_failed_document_can_be_removed_and_replaced() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new().with_status_code(400),
        MockQueryProvider::new(),
        completion.clone(),
    );

    controller
        .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap_err();
    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Failed
    );

    // Removal is the only way out of `Failed`, and it is idempotent.
    controller.remove_document();
    controller.remove_document();
    assert_eq!(controller.session().document.status, DocumentStatus::Empty);
}

#[tokio::test]
async fn test_processing_failure_marks_slot_failed() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        MockQueryProvider::new(),
        completion.clone(),
    );

    let task = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .submit_document("report.pdf", Bytes::from_static(b"%PDF-1.7"))
                .await
        }
    });

    settle().await;
    completion.fail();
    task.await.unwrap().unwrap_err();

    assert_eq!(
        controller.session().document.status,
        DocumentStatus::Failed
    );
}

#[tokio::test]
async fn test_question_appends_user_then_assistant_message() {
    let query = MockQueryProvider::new().with_answer("It is a quarterly report.");
    let completion = ManualCompletion::new();
    let controller = controller_with(MockIngestProvider::new(), query.clone(), completion.clone());
    attach_ready_document(&controller, &completion).await;

    let reply = controller
        .send_question("  What is this document?  ")
        .await
        .unwrap();
    assert_eq!(reply.content, "It is a quarterly report.");

    let session = controller.session();
    assert!(!session.pending_request);
    assert_eq!(session.transcript.len(), 2);
    assert!(session.transcript[0].is_user_message());
    assert_eq!(session.transcript[0].content, "What is this document?");
    assert!(session.transcript[1].is_assistant_message());

    let request = query.requests().remove(0);
    assert_eq!(request.question, "What is this document?");
    assert_eq!(request.document_name, "report.pdf");
}

#[tokio::test]
async fn test_question_requires_ready_document() {
    let query = MockQueryProvider::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        query.clone(),
        ManualCompletion::new(),
    );

    let err = controller.send_question("Anything?").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DocumentNotReady);
    assert!(controller.session().transcript.is_empty());
    assert_eq!(query.request_count(), 0);
}

#[tokio::test]
async fn test_blank_question_is_rejected_without_network_traffic() {
    let query = MockQueryProvider::new();
    let completion = ManualCompletion::new();
    let controller = controller_with(MockIngestProvider::new(), query.clone(), completion.clone());
    attach_ready_document(&controller, &completion).await;

    let err = controller.send_question("   \n").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(controller.session().transcript.is_empty());
    assert_eq!(query.request_count(), 0);
}

#[tokio::test]
async fn test_rejected_question_keeps_user_message_and_records_error() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        MockQueryProvider::new().with_status_code(500),
        completion.clone(),
    );
    attach_ready_document(&controller, &completion).await;

    let err = controller.send_question("Q1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);

    let session = controller.session();
    assert!(!session.pending_request);
    assert_eq!(session.transcript.len(), 1);
    assert!(session.transcript[0].is_user_message());
    assert!(session.last_error.as_deref().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_question_pending_clears_after_transport_failure() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        MockQueryProvider::new().with_transport_failure(),
        completion.clone(),
    );
    attach_ready_document(&controller, &completion).await;

    let err = controller.send_question("Q1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkError);
    assert!(!controller.session().pending_request);

    // The session accepts the next question; the flag is never left stuck.
    let err = controller.send_question("Q2").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkError);
    assert_eq!(controller.session().transcript.len(), 2);
}

#[tokio::test]
async fn test_answer_missing_from_accepted_response_is_a_decode_failure() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        MockQueryProvider::new().with_missing_answer(),
        completion.clone(),
    );
    attach_ready_document(&controller, &completion).await;

    let err = controller.send_question("Q1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
    assert!(!controller.session().pending_request);
}

#[tokio::test]
async fn test_conversation_preserves_insertion_order() {
    let completion = ManualCompletion::new();
    let controller = controller_with(
        MockIngestProvider::new(),
        MockQueryProvider::new().with_answer("A"),
        completion.clone(),
    );
    attach_ready_document(&controller, &completion).await;

    controller.send_question("Q1").await.unwrap();
    controller.send_question("Q2").await.unwrap();

    let transcript = controller.session().transcript;
    let contents: Vec<&str> = transcript.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["Q1", "A", "Q2", "A"]);
    assert!(transcript.windows(2).all(|pair| pair[0].id < pair[1].id));
}
