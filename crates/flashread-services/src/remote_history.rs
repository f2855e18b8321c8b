//! Chat history in a remote REST document store.
//!
//! Layout: `POST {base}/chats/{id}/messages` appends a message,
//! `GET {base}/chats/{id}/messages?limit=N` returns the newest `N` oldest
//! first, `GET {base}/chats` lists chats. This client blocks; keep it off
//! async executors.

use std::time::Duration;

use flashread_core::history::{ChatSummary, HistoryStore, StoredMessage, newest};
use log::debug;
use reqwest::{
    Url,
    blocking::{Client, RequestBuilder, Response},
};

use crate::{
    error::StoreError,
    records::{ChatListing, MessageRecord, newest_first},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RemoteHistoryStore {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl RemoteHistoryStore {
    pub fn new(base: &str, token: Option<String>) -> Result<Self, StoreError> {
        let base = Url::parse(base.trim())
            .map_err(|error| StoreError::Request(format!("invalid base url {base}: {error}")))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(request_error)?;

        Ok(Self {
            client,
            base,
            token: token.filter(|token| !token.trim().is_empty()),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Request(format!("base url cannot hold a path: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorized(request).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

impl HistoryStore for RemoteHistoryStore {
    type Error = StoreError;

    fn append(&mut self, chat_id: &str, message: &StoredMessage) -> Result<(), Self::Error> {
        let url = self.url(&["chats", chat_id, "messages"])?;
        self.send(self.client.post(url).json(&MessageRecord::from(message)))?;
        debug!("history: remote append chat={}", chat_id);
        Ok(())
    }

    fn load(&mut self, chat_id: &str, limit: usize) -> Result<Vec<StoredMessage>, Self::Error> {
        let url = self.url(&["chats", chat_id, "messages"])?;
        let request = self.client.get(url).query(&[("limit", limit)]);
        let records: Vec<MessageRecord> = self.send(request)?.json().map_err(request_error)?;

        let messages = records
            .into_iter()
            .filter_map(MessageRecord::into_stored)
            .collect();
        Ok(newest(messages, limit))
    }

    fn chats(&mut self) -> Result<Vec<ChatSummary>, Self::Error> {
        let url = self.url(&["chats"])?;
        let listings: Vec<ChatListing> = self.send(self.client.get(url))?.json().map_err(request_error)?;

        let mut summaries: Vec<ChatSummary> = listings
            .iter()
            .map(|listing| listing.record.summary(&listing.id))
            .collect();
        newest_first(&mut summaries);
        Ok(summaries)
    }
}

fn request_error(error: reqwest::Error) -> StoreError {
    StoreError::Request(error.to_string())
}
