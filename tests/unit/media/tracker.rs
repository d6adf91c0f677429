use super::*;
use crate::foundation::core::Size;
use crate::host::sim::{SimHost, SimNode};

fn setup() -> (SimHost, MediaTracker<SimNode>) {
    let mut host = SimHost::new(Size::new(1000.0, 800.0));
    host.place(SimNode(1), Axis::Horizontal, Extent::new(200.0, 400.0));
    host.place(SimNode(2), Axis::Horizontal, Extent::new(1250.0, 400.0));
    host.place(SimNode(3), Axis::Horizontal, Extent::new(1150.0, 400.0));
    let mut media = MediaTracker::new(MediaConfig::default());
    media.register(&mut host, ItemId::from("a"), SimNode(1), MediaKind::Image);
    media.register(&mut host, ItemId::from("b"), SimNode(2), MediaKind::Image);
    media.register(&mut host, ItemId::from("v"), SimNode(3), MediaKind::Video);
    (host, media)
}

#[test]
fn images_load_within_their_margin() {
    let (mut host, mut media) = setup();
    assert!(host.loads.is_empty());

    media.evaluate(&mut host, Extent::new(0.0, 1000.0), Axis::Horizontal);
    assert_eq!(host.loads, vec![SimNode(1), SimNode(2)]);
    assert_eq!(media.state_of(&ItemId::from("b")), Some(MediaState::Requested));

    // Requests are never repeated.
    media.evaluate(&mut host, Extent::new(10.0, 1000.0), Axis::Horizontal);
    assert_eq!(host.loads.len(), 2);
}

#[test]
fn videos_use_the_tighter_margin_and_pause_when_leaving() {
    let (mut host, mut media) = setup();
    let v = ItemId::from("v");
    media.evaluate(&mut host, Extent::new(-100.0, 1000.0), Axis::Horizontal);
    assert_eq!(media.state_of(&v), Some(MediaState::Deferred));
    assert!(!media.is_playing(&v));
    assert!(host.playing.is_empty());

    media.evaluate(&mut host, Extent::new(100.0, 1000.0), Axis::Horizontal);
    assert!(media.is_playing(&v));
    assert_eq!(host.playing.get(&SimNode(3)), Some(&true));

    media.evaluate(&mut host, Extent::new(-200.0, 1000.0), Axis::Horizontal);
    assert_eq!(host.playing.get(&SimNode(3)), Some(&false));
}

#[test]
fn eager_mode_requests_everything() {
    let (mut host, mut media) = setup();
    media.set_eager(&mut host, true);
    assert_eq!(host.loads.len(), 3);
    host.place(SimNode(4), Axis::Horizontal, Extent::new(9000.0, 10.0));
    media.register(&mut host, ItemId::from("late"), SimNode(4), MediaKind::Image);
    assert_eq!(host.loads.len(), 4);
}

#[test]
fn settling_is_reported_once_and_failures_are_isolated() {
    let (mut host, mut media) = setup();
    media.set_eager(&mut host, true);
    assert!(!media.take_settled());

    assert!(media.on_loaded(&ItemId::from("a")));
    assert!(media.on_failed(&ItemId::from("b")));
    assert!(!media.all_settled());
    assert!(!media.on_loaded(&ItemId::from("ghost")));
    assert!(media.on_loaded(&ItemId::from("v")));

    assert!(media.all_settled());
    assert!(media.take_settled());
    assert!(!media.take_settled());
    assert_eq!(media.state_of(&ItemId::from("a")), Some(MediaState::Loaded));
    assert_eq!(media.state_of(&ItemId::from("b")), Some(MediaState::Failed));
}

#[test]
fn failed_videos_never_play() {
    let (mut host, mut media) = setup();
    let v = ItemId::from("v");
    media.on_failed(&v);
    media.evaluate(&mut host, Extent::new(100.0, 1000.0), Axis::Horizontal);
    assert!(!media.is_playing(&v));
}

#[test]
fn pause_all_stops_playback() {
    let (mut host, mut media) = setup();
    media.evaluate(&mut host, Extent::new(100.0, 1000.0), Axis::Horizontal);
    media.pause_all(&mut host);
    assert_eq!(host.playing.get(&SimNode(3)), Some(&false));
    assert!(!media.is_playing(&ItemId::from("v")));
}
