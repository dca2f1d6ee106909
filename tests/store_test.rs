mod helpers;

use daylog::db;
use daylog::entries::store;
use daylog::entries::{EntryInput, EntrySource};
use daylog::error::DaylogError;
use helpers::{day, income, log_entry, test_db, test_user};
use rust_decimal_macros::dec;

#[test]
fn entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daylog.db");

    let stored = {
        let mut conn = db::open_database(&path).unwrap();
        let user = test_user(&conn, "alex");
        log_entry(
            &mut conn,
            &user,
            "2024-05-01",
            EntryInput {
                income_today: dec!(123.45),
                cash_on_hand: Some(dec!(40.10)),
                notes: Some("payday".into()),
                ..Default::default()
            },
        )
    };

    let conn = db::open_database(&path).unwrap();
    let user = test_user(&conn, "alex");
    assert_eq!(user.id, stored.user_id);

    let reloaded = store::get_entry(&conn, &user.id, day("2024-05-01"))
        .unwrap()
        .unwrap();
    assert_eq!(reloaded, stored);
    assert_eq!(reloaded.income_today.to_string(), "123.45");
}

#[test]
fn one_row_per_user_and_date() {
    let mut conn = test_db();
    let user = test_user(&conn, "alex");

    let first = store::upsert_entry(&mut conn, &user.id, day("2024-05-01"), &income(dec!(10))).unwrap();
    assert!(store::set_feedback(&conn, &first.entry.id, &first.entry.updated_at, "nice").unwrap());
    let second =
        store::upsert_entry(&mut conn, &user.id, day("2024-05-01"), &income(dec!(25))).unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(second.entry.id, first.entry.id);
    assert_eq!(second.entry.created_at, first.entry.created_at);
    assert_eq!(second.entry.income_today, dec!(25));
    assert_eq!(second.entry.ai_feedback, None);
    assert_eq!(store::count_entries(&conn, &user.id).unwrap(), 1);
}

#[test]
fn users_only_see_their_own_entries() {
    let mut conn = test_db();
    let alex = test_user(&conn, "alex");
    let sam = test_user(&conn, "sam");

    log_entry(&mut conn, &alex, "2024-05-01", income(dec!(10)));
    log_entry(&mut conn, &alex, "2024-05-02", income(dec!(20)));
    log_entry(&mut conn, &sam, "2024-05-01", income(dec!(99)));

    let alex_entries = conn.fetch_all_entries_for_user(&alex.id).unwrap();
    assert_eq!(alex_entries.len(), 2);
    assert!(alex_entries.iter().all(|e| e.user_id == alex.id));

    assert!(!store::delete_entry(&conn, &sam.id, day("2024-05-02")).unwrap());
    assert!(store::delete_entry(&conn, &sam.id, day("2024-05-01")).unwrap());
    assert_eq!(store::count_entries(&conn, &alex.id).unwrap(), 2);
    assert_eq!(store::count_entries(&conn, &sam.id).unwrap(), 0);
}

#[test]
fn range_bounds_are_inclusive() {
    let mut conn = test_db();
    let user = test_user(&conn, "alex");
    for date in ["2024-05-01", "2024-05-02", "2024-05-03", "2024-05-04"] {
        log_entry(&mut conn, &user, date, EntryInput::default());
    }

    let middle = conn
        .fetch_entries_for_user(&user.id, Some(day("2024-05-02")), Some(day("2024-05-03")))
        .unwrap();
    let dates: Vec<_> = middle.iter().map(|e| e.entry_date.to_string()).collect();
    assert_eq!(dates, ["2024-05-02", "2024-05-03"]);

    let open_start = conn
        .fetch_entries_for_user(&user.id, None, Some(day("2024-05-02")))
        .unwrap();
    assert_eq!(open_start.len(), 2);
}

#[test]
fn invalid_input_never_reaches_the_table() {
    let mut conn = test_db();
    let user = test_user(&conn, "alex");

    let bad = [
        EntryInput {
            stress_level: 0,
            ..Default::default()
        },
        EntryInput {
            hours_worked: dec!(24.5),
            ..Default::default()
        },
        EntryInput {
            gas_spent: dec!(-1),
            ..Default::default()
        },
    ];
    for input in &bad {
        let err = store::upsert_entry(&mut conn, &user.id, day("2024-05-01"), input).unwrap_err();
        assert!(matches!(err, DaylogError::Validation { .. }), "{err}");
    }
    assert_eq!(store::count_entries(&conn, &user.id).unwrap(), 0);
}

#[test]
fn feedback_for_replaced_values_is_dropped() {
    let mut conn = test_db();
    let user = test_user(&conn, "alex");

    let older = store::upsert_entry(&mut conn, &user.id, day("2024-05-01"), &income(dec!(10)))
        .unwrap()
        .entry;
    // A second write lands while feedback for the first is being generated.
    std::thread::sleep(std::time::Duration::from_millis(5));
    let newer = store::upsert_entry(&mut conn, &user.id, day("2024-05-01"), &income(dec!(40)))
        .unwrap()
        .entry;
    assert_ne!(older.updated_at, newer.updated_at);

    assert!(!store::set_feedback(&conn, &older.id, &older.updated_at, "about 10").unwrap());
    assert!(store::set_feedback(&conn, &newer.id, &newer.updated_at, "about 40").unwrap());

    let stored = store::get_entry(&conn, &user.id, day("2024-05-01")).unwrap().unwrap();
    assert_eq!(stored.ai_feedback.as_deref(), Some("about 40"));
}
