use rand::{SeedableRng, rngs::StdRng};
use spotrec::types::{PlaylistItem, SimpleArtist, Track};
use spotrec::utils::*;
use std::collections::BTreeSet;

// Helper function to create a test track
fn create_test_track(id: Option<&str>, name: &str) -> Track {
    Track {
        id: id.map(str::to_string),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id.unwrap_or("local")),
        artists: vec![SimpleArtist {
            id: None,
            name: format!("{} artist", name),
        }],
        album: None,
        duration_ms: None,
        popularity: None,
    }
}

fn create_test_items(count: usize) -> Vec<PlaylistItem> {
    (0..count)
        .map(|i| PlaylistItem {
            track: Some(create_test_track(
                Some(&format!("t{}", i)),
                &format!("Track {}", i),
            )),
        })
        .collect()
}

#[test]
fn test_random_offset_small_playlists_start_at_zero() {
    let mut rng = StdRng::seed_from_u64(1);

    for total in [0, 1, 12, 49, 50] {
        for _ in 0..20 {
            assert_eq!(random_offset(total, &mut rng), 0, "total = {}", total);
        }
    }
}

#[test]
fn test_random_offset_keeps_page_inside_playlist() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let offset = random_offset(80, &mut rng);
        assert!(offset <= 30, "offset {} out of range", offset);
    }
}

#[test]
fn test_random_offset_one_extra_track() {
    let mut seen = BTreeSet::new();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        seen.insert(random_offset(51, &mut rng));
    }

    assert_eq!(seen, BTreeSet::from([0, 1]));
}

#[test]
fn test_pick_seed_tracks_uses_all_of_small_page() {
    let mut rng = StdRng::seed_from_u64(5);
    let seeds = pick_seed_tracks(create_test_items(3), &mut rng);

    let ids: BTreeSet<_> = seeds.iter().filter_map(|t| t.id.clone()).collect();
    assert_eq!(
        ids,
        BTreeSet::from(["t0".to_string(), "t1".to_string(), "t2".to_string()])
    );
}

#[test]
fn test_pick_seed_tracks_limits_to_five_distinct() {
    let items = create_test_items(50);
    let all: BTreeSet<String> = (0..50).map(|i| format!("t{}", i)).collect();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let seeds = pick_seed_tracks(items.clone(), &mut rng);

        assert_eq!(seeds.len(), MAX_SEED_TRACKS);
        let ids: BTreeSet<String> = seeds.iter().filter_map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), MAX_SEED_TRACKS);
        assert!(ids.is_subset(&all));
    }
}

#[test]
fn test_pick_seed_tracks_skips_unplayable_items() {
    let items = vec![
        PlaylistItem { track: None },
        PlaylistItem {
            track: Some(create_test_track(None, "Local file")),
        },
        PlaylistItem {
            track: Some(create_test_track(Some("t9"), "Remote")),
        },
    ];
    let mut rng = StdRng::seed_from_u64(0);

    let seeds = pick_seed_tracks(items, &mut rng);

    assert_eq!(seeds.len(), 1);
    assert_eq!(seeds[0].id.as_deref(), Some("t9"));
}

#[test]
fn test_pick_seed_tracks_empty_page() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(pick_seed_tracks(Vec::new(), &mut rng).is_empty());
}

#[test]
fn test_seed_query_param() {
    let seeds = vec![
        create_test_track(Some("a"), "A"),
        create_test_track(Some("b"), "B"),
        create_test_track(Some("c"), "C"),
    ];

    assert_eq!(seed_query_param(&seeds), "a,b,c");
    assert_eq!(seed_query_param(&[]), "");
}

#[test]
fn test_suggestion_playlist_name() {
    assert_eq!(
        suggestion_playlist_name("Chill"),
        "Suggestions based on Chill"
    );
    assert_eq!(suggestion_playlist_name(""), "Suggestions based on ");
}

#[test]
fn test_join_artist_names() {
    let mut track = create_test_track(Some("a"), "Song");
    track.artists.push(SimpleArtist {
        id: Some("x".to_string()),
        name: "Guest".to_string(),
    });

    assert_eq!(join_artist_names(&track), "Song artist, Guest");

    track.artists.clear();
    assert_eq!(join_artist_names(&track), "");
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(0), "0:00");
    assert_eq!(format_duration_ms(59_999), "0:59");
    assert_eq!(format_duration_ms(61_000), "1:01");
    assert_eq!(format_duration_ms(3_723_000), "62:03");
}

#[test]
fn test_format_epoch_ms() {
    assert_eq!(format_epoch_ms(0), "1970-01-01 00:00:00 UTC");
    assert_eq!(
        format_epoch_ms(1_700_000_000_000),
        "2023-11-14 22:13:20 UTC"
    );
}
