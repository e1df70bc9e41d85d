use dailysoul_core::{JournalEntry, Mood, NewEntry, Preferences};
use serde_json::json;

#[test]
fn entry_serializes_with_mood_key_and_epoch_millis() {
    let entry = NewEntry::new("2024-03-05", Some(Mood::Calm), "Quiet morning.", 1_000).with_id(3);

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 3,
            "date": "2024-03-05",
            "mood": "calm",
            "content": "Quiet morning.",
            "created_at": 1_000,
            "updated_at": 1_000,
        })
    );

    let back: JournalEntry = serde_json::from_value(value).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn deserializing_invalid_entry_fails() {
    let blank = json!({
        "id": 1,
        "date": "2024-03-05",
        "mood": null,
        "content": "  ",
        "created_at": 1,
        "updated_at": 1,
    });
    assert!(serde_json::from_value::<JournalEntry>(blank).is_err());

    let bad_date = json!({
        "id": 1,
        "date": "2024-3-5",
        "mood": null,
        "content": "ok",
        "created_at": 1,
        "updated_at": 1,
    });
    assert!(serde_json::from_value::<JournalEntry>(bad_date).is_err());

    let unknown_mood = json!({
        "id": 1,
        "date": "2024-03-05",
        "mood": "ecstatic",
        "content": "ok",
        "created_at": 1,
        "updated_at": 1,
    });
    assert!(serde_json::from_value::<JournalEntry>(unknown_mood).is_err());
}

#[test]
fn preferences_default_shape() {
    assert_eq!(
        serde_json::to_value(Preferences::default()).unwrap(),
        json!({
            "dark_mode": false,
            "notifications_on": true,
            "reminder_hour": 20,
            "reminder_minute": 0,
            "show_mood_screen": true,
        })
    );
}
