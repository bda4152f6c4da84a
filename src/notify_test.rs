use super::*;

#[test]
fn drain_is_one_shot() {
    let notifier = Notifier::new();
    notifier.push(Notification::new("Sync Complete", "Event logs have been synchronized successfully."));
    assert_eq!(notifier.pending(), 1);

    let first = notifier.drain();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].title, "Sync Complete");
    assert!(notifier.drain().is_empty());
}

#[test]
fn drain_preserves_order() {
    let notifier = Notifier::new();
    notifier.push(Notification::new("a", ""));
    notifier.push(Notification::new("b", ""));
    let titles: Vec<_> = notifier.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["a", "b"]);
}

#[test]
fn full_queue_drops_oldest() {
    let notifier = Notifier::with_capacity(2);
    for title in ["one", "two", "three"] {
        notifier.push(Notification::new(title, ""));
    }
    let titles: Vec<_> = notifier.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["two", "three"]);
}

#[test]
fn destructive_variant() {
    let toast = Notification::destructive("Missing Token", "Please enter your authentication token first.");
    assert_eq!(toast.variant, Variant::Destructive);
    let json = serde_json::to_value(&toast).unwrap();
    assert_eq!(json["variant"], "destructive");
}

#[test]
fn clones_share_queue() {
    let notifier = Notifier::new();
    let other = notifier.clone();
    other.push(Notification::new("shared", ""));
    assert_eq!(notifier.pending(), 1);
}
