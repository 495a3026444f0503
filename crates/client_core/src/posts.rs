//! Remote post list state.

use shared::{domain::Post, protocol::ListPostsQuery};

use crate::{config::DEFAULT_POSTS_PAGE_SIZE, error::TransportError};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load posts.";

#[derive(Debug, Clone)]
pub struct PostsLoader {
    page_size: usize,
    posts: Vec<Post>,
    loading: bool,
    load_error: Option<String>,
}

impl Default for PostsLoader {
    fn default() -> Self {
        Self::new(DEFAULT_POSTS_PAGE_SIZE)
    }
}

impl PostsLoader {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            posts: Vec::new(),
            loading: false,
            load_error: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Marks the loader busy and returns the read-request to issue.
    pub fn begin_load(&mut self) -> ListPostsQuery {
        self.loading = true;
        ListPostsQuery::new(self.page_size)
    }

    pub fn finish_load(&mut self, result: Result<Vec<Post>, TransportError>) {
        match result {
            Ok(posts) => {
                self.posts = posts;
                self.load_error = None;
            }
            Err(_) => {
                self.load_error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::PostId;

    use super::*;

    fn post(id: i64) -> Post {
        Post {
            id: PostId(id),
            title: format!("title {id}"),
            body: format!("body {id}"),
        }
    }

    #[test]
    fn begin_load_requests_fixed_page() {
        let mut loader = PostsLoader::default();
        let query = loader.begin_load();
        assert_eq!(query.limit, 5);
        assert!(loader.loading());
    }

    #[test]
    fn success_replaces_posts_in_response_order() {
        let mut loader = PostsLoader::default();
        loader.begin_load();
        let response = vec![post(4), post(2), post(5), post(1), post(3)];

        loader.finish_load(Ok(response.clone()));

        assert_eq!(loader.posts(), response.as_slice());
        assert!(!loader.loading());
        assert!(loader.load_error().is_none());
    }

    #[test]
    fn duplicate_ids_are_kept_verbatim() {
        let mut loader = PostsLoader::default();
        loader.begin_load();
        loader.finish_load(Ok(vec![post(1), post(1)]));
        assert_eq!(loader.posts().len(), 2);
    }

    #[test]
    fn failure_keeps_previous_posts() {
        let mut loader = PostsLoader::default();
        loader.begin_load();
        loader.finish_load(Err(TransportError::unavailable("offline")));

        assert!(loader.posts().is_empty());
        assert!(!loader.loading());
        assert_eq!(loader.load_error(), Some(LOAD_FAILED_MESSAGE));

        loader.begin_load();
        loader.finish_load(Ok(vec![post(1)]));
        loader.begin_load();
        loader.finish_load(Err(TransportError::unavailable("offline")));
        assert_eq!(loader.posts(), &[post(1)]);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(PostsLoader::new(0).page_size(), 1);
    }
}
