use nostr::Event;

use crate::models::Post;

/// In-memory feed of text notes, newest first, de-duplicated by id.
#[derive(Debug, Default)]
pub struct FeedStore {
    posts: Vec<Post>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Getters =====

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.posts.iter().any(|p| p.id == id)
    }

    // ===== Mutations =====

    /// Insert keeping newest-first order. Returns false for duplicates.
    pub fn add_post(&mut self, post: Post) -> bool {
        if self.contains(&post.id) {
            return false;
        }
        // Ties keep arrival order
        let pos = self
            .posts
            .partition_point(|p| p.created_at >= post.created_at);
        self.posts.insert(pos, post);
        true
    }

    /// Parse and insert a text note. Returns false for other kinds and duplicates.
    pub fn ingest_event(&mut self, event: &Event) -> bool {
        match Post::from_event(event) {
            Some(post) => self.add_post(post),
            None => false,
        }
    }
}
