use std::collections::HashSet;

use nostr::{Event, PublicKey};

use crate::constants::kinds;

/// Pubkeys the user follows, taken from their NIP-02 contact list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowList {
    pubkeys: HashSet<String>,
}

impl FollowList {
    pub fn from_pubkeys<I: IntoIterator<Item = String>>(pubkeys: I) -> Self {
        Self {
            pubkeys: pubkeys.into_iter().collect(),
        }
    }

    /// Collect valid `p` tags from a kind:3 event. Returns None for any other kind.
    pub fn from_event(event: &Event) -> Option<Self> {
        if event.kind.as_u16() != kinds::CONTACT_LIST {
            return None;
        }

        let pubkeys = event
            .tags
            .iter()
            .filter_map(|tag| match tag.as_slice() {
                [name, value, ..] if name == "p" => PublicKey::from_hex(value)
                    .ok()
                    .map(|pk| pk.to_hex()),
                _ => None,
            })
            .collect();

        Some(Self { pubkeys })
    }

    pub fn contains(&self, pubkey: &str) -> bool {
        self.pubkeys.contains(pubkey)
    }

    pub fn len(&self) -> usize {
        self.pubkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pubkeys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr::{EventBuilder, Keys, Kind, Tag};

    #[test]
    fn test_from_contact_list() {
        let me = Keys::generate();
        let alice = Keys::generate().public_key();
        let bob = Keys::generate().public_key();

        let event = EventBuilder::new(Kind::ContactList, "")
            .tag(Tag::public_key(alice))
            .tag(Tag::public_key(bob))
            .tag(Tag::parse(["p", "not-a-pubkey"]).unwrap())
            .tag(Tag::parse(["t", "nostr"]).unwrap())
            .sign_with_keys(&me)
            .unwrap();

        let follows = FollowList::from_event(&event).unwrap();
        assert_eq!(follows.len(), 2);
        assert!(follows.contains(&alice.to_hex()));
        assert!(follows.contains(&bob.to_hex()));
        assert!(!follows.contains(&me.public_key().to_hex()));
    }

    #[test]
    fn test_rejects_text_note() {
        let keys = Keys::generate();
        let event = EventBuilder::text_note("hi").sign_with_keys(&keys).unwrap();
        assert!(FollowList::from_event(&event).is_none());
    }

    #[test]
    fn test_empty_by_default() {
        let follows = FollowList::default();
        assert!(follows.is_empty());
        assert!(!follows.contains("anyone"));
    }
}
