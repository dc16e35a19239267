//! End-to-end calculation tests through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use codice_fiscale::{
    AttributeRecord, Birthplace, Calculator, CodiceError, Gender, PersonalAttributes, PlaceTable,
    calculate, checksum, config,
};

/// Serializes tests touching the process-wide configuration.
static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn global_guard() -> MutexGuard<'static, ()> {
    let guard = GLOBAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    config::reset();
    guard
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn mario() -> PersonalAttributes {
    PersonalAttributes::new(
        "mario",
        "rossi",
        Gender::Male,
        date(1987, 1, 1),
        Birthplace::domestic("Abbadia Lariana", "lc"),
    )
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn mario_rossi() {
    let code = Calculator::new().calculate(&mario()).unwrap();
    assert_eq!(code.as_str(), "RSSMRA87A01A005V");
}

#[test]
fn laura_bianchi_female_milano() {
    let attrs = PersonalAttributes::new(
        "Laura",
        "Bianchi",
        Gender::Female,
        date(1985, 12, 1),
        Birthplace::domestic("Milano", "MI"),
    );
    assert_eq!(
        Calculator::new().calculate(&attrs).unwrap().as_str(),
        "BNCLRA85T41F205Y"
    );
}

#[test]
fn mario_rossi_roma() {
    let attrs = PersonalAttributes::new(
        "Mario",
        "Rossi",
        Gender::Male,
        date(1980, 1, 1),
        Birthplace::domestic("Roma", "RM"),
    );
    assert_eq!(
        Calculator::new().calculate(&attrs).unwrap().as_str(),
        "RSSMRA80A01H501U"
    );
}

#[test]
fn foreign_born() {
    let attrs = PersonalAttributes::new(
        "Mario",
        "Rossi",
        Gender::Male,
        date(1980, 1, 1),
        Birthplace::foreign("Francia"),
    );
    let code = Calculator::new().calculate(&attrs).unwrap();
    assert_eq!(&code.as_str()[..15], "RSSMRA80A01Z110");
    assert!(checksum::verify(code.as_str()));
}

#[test]
fn explicit_home_country_is_domestic() {
    let mut attrs = mario();
    attrs.birthplace.country_name = Some("Italia".into());
    assert_eq!(
        Calculator::new().calculate(&attrs).unwrap().as_str(),
        "RSSMRA87A01A005V"
    );
}

#[test]
fn repeated_calls_are_identical() {
    let calc = Calculator::new();
    let first = calc.calculate(&mario()).unwrap();
    for _ in 0..10 {
        assert_eq!(calc.calculate(&mario()).unwrap(), first);
    }
}

#[test]
fn input_is_left_untouched() {
    let attrs = mario();
    let before = attrs.clone();
    Calculator::new().calculate(&attrs).unwrap();
    assert_eq!(attrs, before);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn empty_name_aborts_before_lookup() {
    let lookups = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&lookups);
    let mut calc = Calculator::new();
    calc.set_place_resolver(move |_: &str, _: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
        Some("A005".to_string())
    });

    let mut attrs = mario();
    attrs.name.clear();
    assert_eq!(
        calc.calculate(&attrs),
        Err(CodiceError::MissingField("name"))
    );
    assert_eq!(lookups.load(Ordering::SeqCst), 0);

    calc.calculate(&mario()).unwrap();
    assert_eq!(lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn unresolvable_place() {
    let mut attrs = mario();
    attrs.birthplace = Birthplace::domestic("Vattelapesca", "XX");
    assert!(matches!(
        Calculator::new().calculate(&attrs),
        Err(CodiceError::PlaceNotFound(_))
    ));

    attrs.birthplace = Birthplace::foreign("Utopia");
    assert!(matches!(
        Calculator::new().calculate(&attrs),
        Err(CodiceError::PlaceNotFound(_))
    ));
}

#[test]
fn malformed_override_code_fails() {
    let mut calc = Calculator::new();
    calc.set_place_resolver(|_: &str, _: &str| Some("Z1".to_string()));
    assert!(matches!(
        calc.calculate(&mario()),
        Err(CodiceError::PlaceNotFound(_))
    ));

    calc.set_place_resolver(|_: &str, _: &str| Some("A00599".to_string()));
    assert!(matches!(
        calc.calculate(&mario()),
        Err(CodiceError::PlaceNotFound(_))
    ));

    calc.set_place_resolver(|_: &str, _: &str| Some(" h501 ".to_string()));
    assert_eq!(calc.calculate(&mario()).unwrap().as_str(), "RSSMRA87A01H501B");
}

#[test]
fn csv_table_with_malformed_code_is_rejected() {
    let csv = "kind,name,province,code\ncity,Abbadia Lariana,LC,A00599\n";
    assert!(matches!(
        PlaceTable::from_csv_reader(csv.as_bytes()),
        Err(CodiceError::TableLoad(_))
    ));
}

#[test]
fn place_failure_takes_precedence_over_fields() {
    // The birthplace is encoded first, so an unknown place is reported even
    // though every other field is fine.
    let mut attrs = mario();
    attrs.birthplace = Birthplace::default();
    assert!(matches!(
        Calculator::new().calculate(&attrs),
        Err(CodiceError::PlaceNotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Untyped records
// ---------------------------------------------------------------------------

#[test]
fn json_record() {
    let record: AttributeRecord = serde_json::from_str(
        r#"{
            "name": "mario",
            "surname": "rossi",
            "gender": "male",
            "birthdate": "1987-01-01",
            "city_name": "Abbadia Lariana",
            "province_code": "lc"
        }"#,
    )
    .unwrap();
    assert_eq!(
        Calculator::new().calculate_record(&record).unwrap().as_str(),
        "RSSMRA87A01A005V"
    );
}

#[test]
fn json_record_with_empty_name() {
    let record: AttributeRecord = serde_json::from_str(
        r#"{"name": "", "surname": "rossi", "gender": "male", "birthdate": "1987-01-01"}"#,
    )
    .unwrap();
    assert_eq!(
        Calculator::new().calculate_record(&record),
        Err(CodiceError::MissingField("name"))
    );
}

#[test]
fn typed_attributes_round_trip_json() {
    let json = serde_json::to_value(mario()).unwrap();
    assert_eq!(json["gender"], "male");
    assert_eq!(json["birthdate"], "1987-01-01");
    assert_eq!(json["city_name"], "Abbadia Lariana");
    let back: PersonalAttributes = serde_json::from_value(json).unwrap();
    assert_eq!(back, mario());
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn global_defaults() {
    let _guard = global_guard();
    assert_eq!(calculate(&mario()).unwrap().as_str(), "RSSMRA87A01A005V");
}

#[test]
fn global_place_override_and_reset() {
    let _guard = global_guard();
    config::set_place_resolver(Some(Arc::new(|city: &str, _: &str| {
        (city == "Abbadia Lariana").then(|| "H501".to_string())
    })));
    assert_eq!(calculate(&mario()).unwrap().as_str(), "RSSMRA87A01H501B");

    config::reset();
    assert_eq!(calculate(&mario()).unwrap().as_str(), "RSSMRA87A01A005V");
}

#[test]
fn global_country_override_returning_nothing() {
    let _guard = global_guard();
    config::set_country_resolver(Some(Arc::new(|_: &str| -> Option<String> { None })));
    let mut attrs = mario();
    attrs.birthplace = Birthplace::foreign("Francia");
    assert!(matches!(
        calculate(&attrs),
        Err(CodiceError::PlaceNotFound(_))
    ));

    // Domestic lookups still use the table.
    assert_eq!(calculate(&mario()).unwrap().as_str(), "RSSMRA87A01A005V");
    config::set_country_resolver(None);
    assert!(calculate(&attrs).is_ok());
}

#[test]
fn last_write_wins() {
    let _guard = global_guard();
    config::set_place_resolver(Some(Arc::new(|_: &str, _: &str| Some("F205".to_string()))));
    config::set_place_resolver(Some(Arc::new(|_: &str, _: &str| Some("H501".to_string()))));
    assert_eq!(calculate(&mario()).unwrap().as_str(), "RSSMRA87A01H501B");
    config::reset();
}

#[test]
fn explicit_calculator_ignores_global_config() {
    let _guard = global_guard();
    config::set_place_resolver(Some(Arc::new(|_: &str, _: &str| Some("H501".to_string()))));
    assert_eq!(
        Calculator::new().calculate(&mario()).unwrap().as_str(),
        "RSSMRA87A01A005V"
    );
    config::reset();
}

#[test]
fn csv_table_calculator() {
    let csv = "kind,name,province,code\ncity,Abbadia Lariana,LC,A005\n";
    let table = PlaceTable::from_csv_reader(csv.as_bytes()).unwrap();
    let calc = Calculator::with_table(table);
    assert_eq!(calc.calculate(&mario()).unwrap().as_str(), "RSSMRA87A01A005V");
}

#[test]
fn calculator_is_shareable_across_threads() {
    let calc = Arc::new(Calculator::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let calc = Arc::clone(&calc);
            std::thread::spawn(move || calc.calculate(&mario()).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_str(), "RSSMRA87A01A005V");
    }
}
