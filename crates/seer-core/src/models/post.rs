use nostr::Event;
use serde::{Deserialize, Serialize};

use crate::constants::{kinds, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

/// Anything the freshness tracker can order against its watermark.
pub trait FeedItem {
    /// Unix seconds; the only field the tracker looks at
    fn created_at(&self) -> u64;
}

/// A kind:1 text note as rendered in the home feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct Post {
    pub id: String,
    pub pubkey: String,
    pub content: String,
    pub created_at: u64,
    /// First inline image link in the content, if any
    pub image_url: Option<String>,
    /// First inline video link in the content; rendered in preference to the image
    pub video_url: Option<String>,
}

impl FeedItem for Post {
    fn created_at(&self) -> u64 {
        self.created_at
    }
}

impl Post {
    /// Build a Post from a text note. Returns None for any other kind.
    pub fn from_event(event: &Event) -> Option<Self> {
        if event.kind.as_u16() != kinds::TEXT_NOTE {
            return None;
        }

        let content = event.content.clone();
        let video_url = find_media_url(&content, VIDEO_EXTENSIONS);
        let image_url = find_media_url(&content, IMAGE_EXTENSIONS);

        Some(Self {
            id: event.id.to_hex(),
            pubkey: event.pubkey.to_hex(),
            content,
            created_at: event.created_at.as_u64(),
            image_url,
            video_url,
        })
    }
}

/// Find the first http(s) link whose path ends in one of `extensions`.
fn find_media_url(content: &str, extensions: &[&str]) -> Option<String> {
    content
        .split_whitespace()
        .map(|token| token.trim_start_matches('(').trim_end_matches(['.', ',', ';', ')']))
        .filter(|token| token.starts_with("https://") || token.starts_with("http://"))
        .find(|url| has_extension(url, extensions))
        .map(str::to_string)
}

fn has_extension(url: &str, extensions: &[&str]) -> bool {
    let Some((_, rest)) = url.split_once("://") else {
        return false;
    };
    // Only the path counts; a bare host like `cdn.png` is not a file
    let Some((_, path)) = rest.split_once('/') else {
        return false;
    };
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| *e == ext)
        }
        _ => false,
    }
}
