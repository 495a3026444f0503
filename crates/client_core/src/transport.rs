//! The network seam: the page only ever talks to a `PostsTransport`.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Post,
    protocol::{ContactSubmission, ListPostsQuery},
};
use url::Url;

use crate::error::TransportError;

#[async_trait]
pub trait PostsTransport: Send + Sync {
    /// Create-request. Any 2xx counts as success; the body is ignored.
    async fn create_post(&self, submission: &ContactSubmission) -> Result<(), TransportError>;
    /// Read-request for one page of posts, in server order.
    async fn list_posts(&self, query: &ListPostsQuery) -> Result<Vec<Post>, TransportError>;
}

pub struct HttpTransport {
    http: Client,
    api_base_url: String,
}

impl HttpTransport {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_base_url)
    }

    pub fn with_client(http: Client, api_base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn posts_url(&self) -> Result<Url, TransportError> {
        Ok(Url::parse(&format!("{}/posts", self.api_base_url))?)
    }
}

#[async_trait]
impl PostsTransport for HttpTransport {
    async fn create_post(&self, submission: &ContactSubmission) -> Result<(), TransportError> {
        self.http
            .post(self.posts_url()?)
            .json(submission)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn list_posts(&self, query: &ListPostsQuery) -> Result<Vec<Post>, TransportError> {
        let posts = self
            .http
            .get(self.posts_url()?)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(posts)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
