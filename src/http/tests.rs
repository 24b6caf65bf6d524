use std::future::Future;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use tokio_util::task::TaskTracker;

use super::test_support::RecordingTransport;
use super::*;
use crate::chain::{Entry, EntryPosition};
use crate::error::{AppError, AppResult, HttpError};
use crate::supervisor::RequestCounter;

const POSITION: EntryPosition = EntryPosition {
    chain: 1,
    pass: 1,
    entry: 1,
};

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

#[test]
fn build_applies_method_body_and_bearer_token() -> AppResult<()> {
    let transport = HttpTransport::new()?;
    let entry = Entry {
        method: Method::POST,
        body: Some("{\"id\":1}".to_owned()),
        bearer_token: Some("secret".to_owned()),
        ..Entry::new("http://localhost:8080/items")
    };

    let request = transport.build(&entry)?;

    if *request.method() != Method::POST {
        return Err(AppError::validation(format!(
            "Unexpected method: {}",
            request.method()
        )));
    }
    if request.url().as_str() != "http://localhost:8080/items" {
        return Err(AppError::validation(format!(
            "Unexpected url: {}",
            request.url()
        )));
    }
    let auth = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if auth != Some("Bearer secret") {
        return Err(AppError::validation(format!(
            "Unexpected authorization header: {:?}",
            auth
        )));
    }
    let body = request.body().and_then(reqwest::Body::as_bytes);
    if body != Some(b"{\"id\":1}".as_slice()) {
        return Err(AppError::validation("Unexpected request body"));
    }
    Ok(())
}

#[test]
fn build_without_token_sets_no_authorization() -> AppResult<()> {
    let transport = HttpTransport::new()?;
    let request = transport.build(&Entry::new("http://localhost/"))?;
    if request.headers().contains_key(AUTHORIZATION) {
        return Err(AppError::validation("Unexpected authorization header"));
    }
    if request.body().is_some() {
        return Err(AppError::validation("Unexpected request body"));
    }
    Ok(())
}

#[test]
fn build_rejects_invalid_url() -> AppResult<()> {
    let transport = HttpTransport::new()?;
    match transport.build(&Entry::new("not a url")) {
        Err(HttpError::InvalidUrl { url, .. }) if url == "not a url" => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::validation("Expected invalid url error")),
    }
}

#[test]
fn failed_awaited_request_is_still_counted() -> AppResult<()> {
    run_async_test(async {
        let transport = Arc::new(RecordingTransport::failing_on(&["http://down/"]));
        let counter = RequestCounter::new();
        let executor = RequestExecutor::new(Arc::clone(&transport), counter.clone(), TaskTracker::new());
        let entry = Entry {
            wait_for_reply: true,
            ..Entry::new("http://down/")
        };

        match executor.execute(&entry, POSITION).await {
            Err(HttpError::RequestFailed { position, .. }) if position == POSITION => {}
            Err(err) => return Err(AppError::validation(format!("Unexpected error: {}", err))),
            Ok(()) => return Err(AppError::validation("Expected RequestFailed")),
        }
        if counter.get() != 1 {
            return Err(AppError::validation(format!(
                "Expected one dispatch, got {}",
                counter.get()
            )));
        }
        Ok(())
    })
}

#[test]
fn unawaited_request_returns_before_send() -> AppResult<()> {
    run_async_test(async {
        let transport = Arc::new(RecordingTransport::failing_on(&["http://down/"]));
        let counter = RequestCounter::new();
        let executor = RequestExecutor::new(Arc::clone(&transport), counter.clone(), TaskTracker::new());

        executor.execute(&Entry::new("http://down/"), POSITION).await?;

        if counter.get() != 1 {
            return Err(AppError::validation("Unawaited request was not counted"));
        }
        if transport.sent() != 0 {
            return Err(AppError::validation("Send ran on the calling task"));
        }
        for _ in 0..10 {
            if transport.sent() == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        if transport.sent() != 1 {
            return Err(AppError::validation("Detached send never ran"));
        }
        Ok(())
    })
}

#[test]
fn unbuildable_request_is_not_counted() -> AppResult<()> {
    run_async_test(async {
        let transport = Arc::new(RecordingTransport::new());
        let counter = RequestCounter::new();
        let executor = RequestExecutor::new(transport, counter.clone(), TaskTracker::new());

        if executor.execute(&Entry::new(""), POSITION).await.is_ok() {
            return Err(AppError::validation("Expected build failure"));
        }
        if counter.get() != 0 {
            return Err(AppError::validation("Unbuilt request was counted"));
        }
        Ok(())
    })
}

#[test]
fn unawaited_send_runs_on_the_given_tracker() -> AppResult<()> {
    run_async_test(async {
        let transport = Arc::new(RecordingTransport::with_send_delay(
            std::time::Duration::from_millis(40),
        ));
        let tracker = TaskTracker::new();
        let executor =
            RequestExecutor::new(Arc::clone(&transport), RequestCounter::new(), tracker.clone());

        executor
            .execute(&Entry::new("http://localhost/last"), POSITION)
            .await?;
        if tracker.len() != 1 {
            return Err(AppError::validation(format!(
                "Expected one tracked send, got {}",
                tracker.len()
            )));
        }

        tracker.close();
        tracker.wait().await;
        if transport.delivered() != 1 {
            return Err(AppError::validation("Tracked send did not complete"));
        }
        Ok(())
    })
}
