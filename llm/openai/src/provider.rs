//! LLM trait implementation for the OpenAI-compatible provider.

use crate::{OpenAI, Request, sse::EventBuffer};
use anyhow::{Result, bail};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{LLM, Message, Response, StreamChunk, reqwest::Method};

impl LLM for OpenAI {
    type ChatConfig = Request;

    async fn send(&self, req: &Request, messages: &[Message]) -> Result<Response> {
        let body = req.messages(messages);
        tracing::trace!("request: {}", serde_json::to_string(&body)?);
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            bail!("{} returned {status}: {text}", self.endpoint);
        }

        tracing::trace!("response: {text}");
        serde_json::from_str(&text).map_err(Into::into)
    }

    fn stream(
        &self,
        req: Request,
        messages: &[Message],
        usage: bool,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let body = req.messages(messages).stream(usage);
        let endpoint = self.endpoint.clone();
        let request = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body);

        try_stream! {
            let response = request.send().await?;
            let status = response.status();
            tracing::debug!("{endpoint} responded with status: {status}");
            if !status.is_success() {
                let text = response.text().await?;
                Err::<(), _>(anyhow::anyhow!("{endpoint} returned {status}: {text}"))?;
            } else {
                let mut buffer = EventBuffer::default();
                let mut count = 0usize;
                let mut bytes = response.bytes_stream();
                while let Some(next) = bytes.next().await {
                    for chunk in buffer.feed(&next?) {
                        count += 1;
                        yield chunk;
                    }
                    if buffer.is_done() {
                        break;
                    }
                }
                tracing::debug!("stream closed after {count} chunks");
            }
        }
    }
}
