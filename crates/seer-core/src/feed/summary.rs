use crate::models::Post;

/// What the "new posts" toast shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct NewPostsSummary {
    pub count: u64,
    /// Distinct authors of the newest unseen posts, newest first
    pub avatar_pubkeys: Vec<String>,
}

impl NewPostsSummary {
    pub fn from_new_posts(new_posts: &[&Post], avatar_count: usize) -> Self {
        let mut avatar_pubkeys: Vec<String> = Vec::with_capacity(avatar_count);
        for post in new_posts {
            if avatar_pubkeys.len() >= avatar_count {
                break;
            }
            if !avatar_pubkeys.contains(&post.pubkey) {
                avatar_pubkeys.push(post.pubkey.clone());
            }
        }

        Self {
            count: new_posts.len() as u64,
            avatar_pubkeys,
        }
    }

    /// The toast is only presented while something is unseen
    pub fn is_visible(&self) -> bool {
        self.count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_post(id: &str, pubkey: &str) -> Post {
        Post {
            id: id.to_string(),
            pubkey: pubkey.to_string(),
            content: String::new(),
            created_at: 0,
            image_url: None,
            video_url: None,
        }
    }

    #[test]
    fn test_empty_summary_is_hidden() {
        let summary = NewPostsSummary::from_new_posts(&[], 3);
        assert_eq!(summary.count, 0);
        assert!(summary.avatar_pubkeys.is_empty());
        assert!(!summary.is_visible());
    }

    #[test]
    fn test_avatars_are_distinct_and_capped() {
        let posts = [
            make_test_post("1", "alice"),
            make_test_post("2", "alice"),
            make_test_post("3", "bob"),
            make_test_post("4", "carol"),
            make_test_post("5", "dave"),
        ];
        let refs: Vec<&Post> = posts.iter().collect();

        let summary = NewPostsSummary::from_new_posts(&refs, 3);

        assert_eq!(summary.count, 5);
        assert_eq!(summary.avatar_pubkeys, vec!["alice", "bob", "carol"]);
        assert!(summary.is_visible());
    }
}
