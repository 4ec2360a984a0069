mod common;

use std::io::Cursor;
use std::sync::Mutex;

use common::fren;
use fren_rank::workflows::frens::{
    highlight_pages, prune_candidates, publish_highlights, select_highlights, Account,
    AccountId, ActionError, ConfirmationGate, HighlightPublisher, RelationshipGateway,
    RemovalCandidate, TrendHistory,
};

#[derive(Default)]
struct RecordingPublisher {
    posts: Mutex<Vec<String>>,
}

impl HighlightPublisher for RecordingPublisher {
    fn publish(&self, text: &str) -> Result<(), ActionError> {
        self.posts.lock().expect("posts mutex").push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingGateway {
    unfollowed: Mutex<Vec<String>>,
}

impl RelationshipGateway for RecordingGateway {
    fn unfollow(&self, account: &Account) -> Result<(), ActionError> {
        self.unfollowed
            .lock()
            .expect("unfollow mutex")
            .push(account.handle.clone());
        Ok(())
    }
}

fn candidate(handle: &str) -> RemovalCandidate {
    RemovalCandidate {
        account: fren(handle, 0),
        history: TrendHistory {
            scores: vec![1, 0],
            tags: vec!["40,2025".to_string(), "41,2025".to_string()],
        },
    }
}

#[test]
fn highlights_publish_in_pages_of_ten() {
    let frens: Vec<_> = (0..14).map(|i| fren(&format!("f{i:02}"), i)).collect();
    let highlights = select_highlights(&frens, 12);
    let pages = highlight_pages(&highlights);
    let publisher = RecordingPublisher::default();

    let published = publish_highlights(&pages, &publisher).expect("publish succeeds");

    assert_eq!(published, 2);
    let posts = publisher.posts.lock().expect("posts mutex");
    assert!(posts[0].contains("🥇 @f13\n🥈 @f12\n🥉 @f11\n✨ @f10"));
    assert_eq!(posts[0].lines().count(), 11);
    assert_eq!(posts[1].lines().count(), 3);
    assert!(!posts[1].contains("🥇"));
}

#[test]
fn prune_requires_exact_phrase_per_account() {
    let candidates = vec![candidate("low"), candidate("lower")];
    let input = Cursor::new("yes, unfollow @low\nyes, unfollow @lower\n");
    let mut output = Vec::new();
    let gateway = RecordingGateway::default();

    let outcome = {
        let mut gate = ConfirmationGate::new(input, &mut output);
        prune_candidates(&candidates, &mut gate, &gateway).expect("prune succeeds")
    };

    assert!(!outcome.cancelled);
    assert_eq!(
        outcome.removed,
        vec![AccountId::from("low"), AccountId::from("lower")]
    );
    assert_eq!(
        *gateway.unfollowed.lock().expect("unfollow mutex"),
        vec!["low", "lower"]
    );
    let transcript = String::from_utf8(output).expect("utf8");
    assert!(transcript.contains("week 40,2025: 1"));
}

#[test]
fn declining_cancels_remaining_batch_but_keeps_earlier_removals() {
    let candidates = vec![candidate("one"), candidate("two"), candidate("three")];
    let input = Cursor::new("yes, unfollow @one\nyes\n");
    let mut output = Vec::new();
    let gateway = RecordingGateway::default();

    let outcome = {
        let mut gate = ConfirmationGate::new(input, &mut output);
        prune_candidates(&candidates, &mut gate, &gateway).expect("prune succeeds")
    };

    assert!(outcome.cancelled);
    assert_eq!(outcome.removed, vec![AccountId::from("one")]);
    assert_eq!(
        outcome.skipped,
        vec![AccountId::from("two"), AccountId::from("three")]
    );
    assert_eq!(
        *gateway.unfollowed.lock().expect("unfollow mutex"),
        vec!["one"]
    );
}

#[test]
fn end_of_input_counts_as_decline() {
    let candidates = vec![candidate("quiet")];
    let gateway = RecordingGateway::default();
    let mut gate = ConfirmationGate::new(Cursor::new(""), Vec::new());

    let outcome = prune_candidates(&candidates, &mut gate, &gateway).expect("prune succeeds");

    assert!(outcome.cancelled);
    assert!(outcome.removed.is_empty());
    assert!(gateway.unfollowed.lock().expect("unfollow mutex").is_empty());
}
