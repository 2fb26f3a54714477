//! Scripted transport for testing.

use crate::error::{ErrorKind, Result};
use crate::transport::{Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(TransportResponse),
    Fail(ErrorKind),
    /// Sleeps before responding; pair with paused time to exercise timeouts.
    Delay(Duration, Box<MockReply>),
}
impl MockReply {
    /// A `200 OK` carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Respond(TransportResponse {
            status,
            url: String::new(),
            body: body.into(),
            set_cookies: Vec::new(),
        })
    }

    /// A `200 OK` handing out the given `Set-Cookie` values.
    pub fn cookies(cookies: &[&str]) -> Self {
        Self::Respond(TransportResponse {
            status: 200,
            url: String::new(),
            body: String::new(),
            set_cookies: cookies.iter().map(|cookie| cookie.to_string()).collect(),
        })
    }

    pub fn delayed(self, delay: Duration) -> Self {
        Self::Delay(delay, Box::new(self))
    }
}

/// In-memory [`Transport`] that replays scripted replies in order and
/// records every request it receives.
///
/// Once the script runs out, every further request fails with
/// [`ErrorKind::Transport`]. If test setup is wrong, then test should not
/// pass.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<TransportRequest>>,
}
impl MockTransport {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests received so far.
    pub async fn calls(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = request.url.clone();
        self.requests.lock().await.push(request);
        let mut reply = self.replies.lock().await.pop_front();
        loop {
            match reply {
                Some(MockReply::Respond(mut response)) => {
                    if response.url.is_empty() {
                        response.url = url;
                    }
                    return Ok(response);
                },
                Some(MockReply::Fail(kind)) => exn::bail!(kind),
                Some(MockReply::Delay(delay, inner)) => {
                    tokio::time::sleep(delay).await;
                    reply = Some(*inner);
                },
                None => exn::bail!(ErrorKind::Transport),
            }
        }
    }
}
