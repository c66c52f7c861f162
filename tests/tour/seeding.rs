use std::collections::BTreeSet;

use webspace_tour::model::{Snapshot, Webspace};
use webspace_tour::store::device::{parse_prefs, render_prefs};
use webspace_tour::store::{
    ListScheme, MemoryStore, PrefValue, PreferenceStore, StateSeeder, codec, full_key, keys,
};

#[tokio::test]
async fn store_listing_seeds_and_verifies_under_every_scheme() {
    for scheme in [
        ListScheme::StringSet,
        ListScheme::JsonArray,
        ListScheme::PrefixedJsonArray,
    ] {
        let mut seeder = StateSeeder::new(MemoryStore::new(), scheme);
        seeder.seed(&Snapshot::store_listing()).await.unwrap();

        let report = seeder.verify().await.unwrap();
        assert!(report.all_present(), "scheme {scheme:?}");
        // The reserved "All" webspace keeps an empty index set, which must
        // not affect the counts.
        assert_eq!(report.site_count(), Some(8), "scheme {scheme:?}");
        assert_eq!(report.webspace_count(), Some(4), "scheme {scheme:?}");
    }
}

#[tokio::test]
async fn seeded_webspaces_are_recognizable_by_name_and_membership() {
    // Webspace ids are regenerated per seed, so equality on them is
    // meaningless; names and index sets are the stable identity.
    let mut seeder = StateSeeder::new(MemoryStore::new(), ListScheme::JsonArray);
    seeder.seed(&Snapshot::store_listing()).await.unwrap();

    let wire = seeder
        .store()
        .get(&full_key(keys::WEBSPACES))
        .await
        .unwrap()
        .expect("webspaces key present");
    let records = codec::decode(&wire, ListScheme::JsonArray).unwrap();
    let webspaces: Vec<Webspace> = records
        .iter()
        .map(|record| Webspace::from_record(record).unwrap())
        .collect();

    let names: BTreeSet<&str> = webspaces.iter().map(|ws| ws.name.as_str()).collect();
    assert_eq!(
        names,
        BTreeSet::from(["All", "Work", "Home Server", "Personal"])
    );
    let work = webspaces.iter().find(|ws| ws.name == "Work").unwrap();
    assert_eq!(work.site_indices, vec![0, 3, 7]);
    let all = webspaces.iter().find(|ws| ws.is_all()).unwrap();
    assert!(all.site_indices.is_empty());
}

#[tokio::test]
async fn clearing_twice_equals_clearing_once() {
    let mut seeder = StateSeeder::new(MemoryStore::new(), ListScheme::StringSet);
    seeder.seed(&Snapshot::store_listing()).await.unwrap();

    seeder.clear().await.unwrap();
    let first = seeder.verify().await.unwrap();
    seeder.clear().await.unwrap();
    let second = seeder.verify().await.unwrap();

    assert!(first.all_absent());
    assert!(second.all_absent());
}

#[tokio::test]
async fn string_set_scheme_preserves_items_as_a_set() {
    let mut seeder = StateSeeder::new(MemoryStore::new(), ListScheme::StringSet);
    seeder.seed(&Snapshot::store_listing()).await.unwrap();

    let wire = seeder
        .store()
        .get(&full_key(keys::SITES))
        .await
        .unwrap()
        .expect("sites key present");
    let decoded = codec::decode(&wire, ListScheme::StringSet).unwrap();
    let names: BTreeSet<String> = decoded
        .iter()
        .map(|record| {
            webspace_tour::model::Site::from_record(record)
                .unwrap()
                .name
        })
        .collect();
    assert_eq!(decoded.len(), 8);
    assert!(names.contains("My Blog"));
    assert!(names.contains("Notes"));
}

/// The rendered preferences document survives a disk round trip untouched,
/// which is what the device store relies on when pushing a seeded file.
#[test]
fn preferences_document_round_trips_through_disk() {
    let snapshot = Snapshot::store_listing();
    let site_records: Vec<String> = snapshot.sites.iter().map(|s| s.to_record()).collect();

    let document = std::collections::BTreeMap::from([
        (
            full_key(keys::SITES),
            codec::encode(&site_records, ListScheme::StringSet),
        ),
        (
            full_key(keys::SELECTED_WEBSPACE),
            PrefValue::String(snapshot.selected_webspace.clone()),
        ),
        (
            full_key(keys::SELECTED_SITE),
            PrefValue::Long(snapshot.selected_site),
        ),
        (
            full_key(keys::SHOW_URL_BAR),
            PrefValue::Boolean(snapshot.show_url_bar),
        ),
    ]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("FlutterSharedPreferences.xml");
    std::fs::write(&path, render_prefs(&document)).unwrap();

    let read_back = std::fs::read_to_string(&path).unwrap();
    let parsed = parse_prefs(&read_back).unwrap();
    assert_eq!(parsed, document);

    let sites = codec::decode(
        parsed.get(&full_key(keys::SITES)).unwrap(),
        ListScheme::StringSet,
    )
    .unwrap();
    assert_eq!(sites.len(), 8);
}
