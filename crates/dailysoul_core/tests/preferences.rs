use dailysoul_core::db::open_db_in_memory;
use dailysoul_core::{
    apply_reminder_preferences, Preferences, PreferencesStore, ReminderAction,
    ReminderScheduler, ReminderTime, RepoError, SqlitePreferencesStore,
};
use std::cell::RefCell;

#[derive(Default)]
struct FakeScheduler {
    calls: RefCell<Vec<String>>,
}

impl ReminderScheduler for FakeScheduler {
    fn schedule_daily(&self, time: ReminderTime) {
        self.calls
            .borrow_mut()
            .push(format!("schedule {:02}:{:02}", time.hour(), time.minute()));
    }

    fn cancel(&self) {
        self.calls.borrow_mut().push("cancel".to_string());
    }
}

#[test]
fn fresh_database_loads_defaults() {
    let conn = open_db_in_memory().unwrap();
    let prefs = SqlitePreferencesStore::new(&conn).load().unwrap();

    assert_eq!(prefs, Preferences::default());
    assert!(!prefs.dark_mode);
    assert!(prefs.notifications_on);
    assert_eq!((prefs.reminder_hour, prefs.reminder_minute), (20, 0));
    assert!(prefs.show_mood_screen);
}

#[test]
fn save_then_load_round_trips_every_field() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePreferencesStore::new(&conn);
    let wanted = Preferences {
        dark_mode: true,
        notifications_on: false,
        reminder_hour: 7,
        reminder_minute: 45,
        show_mood_screen: false,
    };

    store.save(&wanted).unwrap();
    assert_eq!(store.load().unwrap(), wanted);
}

#[test]
fn single_setters_only_touch_their_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePreferencesStore::new(&conn);

    store.set_dark_mode(true).unwrap();
    store.set_reminder_time(6, 30).unwrap();

    let prefs = store.load().unwrap();
    assert!(prefs.dark_mode);
    assert_eq!((prefs.reminder_hour, prefs.reminder_minute), (6, 30));
    assert!(prefs.notifications_on);
    assert!(prefs.show_mood_screen);

    store.set_notifications_on(false).unwrap();
    store.set_show_mood_screen(false).unwrap();
    store.set_dark_mode(false).unwrap();
    let prefs = store.load().unwrap();
    assert!(!prefs.notifications_on);
    assert!(!prefs.show_mood_screen);
    assert!(!prefs.dark_mode);
}

#[test]
fn out_of_range_reminder_time_is_rejected_and_not_stored() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePreferencesStore::new(&conn);

    assert!(matches!(
        store.set_reminder_time(24, 0),
        Err(RepoError::InvalidPreference(_))
    ));
    assert!(matches!(
        store.set_reminder_time(8, 60),
        Err(RepoError::InvalidPreference(_))
    ));
    let bad = Preferences {
        reminder_hour: 99,
        ..Preferences::default()
    };
    assert!(matches!(
        store.save(&bad),
        Err(RepoError::InvalidPreference(_))
    ));

    assert_eq!(store.load().unwrap(), Preferences::default());
}

#[test]
fn corrupted_stored_value_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES ('dark_mode', 'maybe');",
        [],
    )
    .unwrap();

    let err = SqlitePreferencesStore::new(&conn).load().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("maybe")));
}

#[test]
fn preferences_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    {
        let conn = dailysoul_core::db::open_db(&path).unwrap();
        SqlitePreferencesStore::new(&conn)
            .set_reminder_time(21, 15)
            .unwrap();
    }

    let conn = dailysoul_core::db::open_db(&path).unwrap();
    let prefs = SqlitePreferencesStore::new(&conn).load().unwrap();
    assert_eq!((prefs.reminder_hour, prefs.reminder_minute), (21, 15));
}

#[test]
fn enabled_notifications_schedule_daily_reminder() {
    let scheduler = FakeScheduler::default();
    let prefs = Preferences {
        reminder_hour: 9,
        reminder_minute: 5,
        ..Preferences::default()
    };

    let action = apply_reminder_preferences(&prefs, &scheduler);

    assert_eq!(
        action,
        ReminderAction::Scheduled(ReminderTime::new(9, 5).unwrap())
    );
    assert_eq!(scheduler.calls.borrow().as_slice(), ["schedule 09:05"]);
}

#[test]
fn disabled_notifications_cancel_reminder() {
    let scheduler = FakeScheduler::default();
    let prefs = Preferences {
        notifications_on: false,
        ..Preferences::default()
    };

    assert_eq!(
        apply_reminder_preferences(&prefs, &scheduler),
        ReminderAction::Cancelled
    );
    assert_eq!(scheduler.calls.borrow().as_slice(), ["cancel"]);
}

#[test]
fn invalid_time_cancels_instead_of_scheduling() {
    let scheduler = FakeScheduler::default();
    let prefs = Preferences {
        reminder_minute: 75,
        ..Preferences::default()
    };

    assert_eq!(
        apply_reminder_preferences(&prefs, &scheduler),
        ReminderAction::Cancelled
    );
    assert_eq!(scheduler.calls.borrow().as_slice(), ["cancel"]);
}
