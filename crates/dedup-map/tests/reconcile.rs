use chrono::NaiveDate;
use dedup_ingest::RawTable;
use dedup_map::reconcile;
use dedup_model::{DedupOptions, Field, RecordSet, SchemaError, SourceRole};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|v| (!v.is_empty()).then(|| v.to_string()))
                    .collect()
            })
            .collect(),
    )
}

#[test]
fn legacy_spanish_headers_map_to_canonical() {
    let table = raw(
        &["Enlace", "NOMBRE", "empresa ", "Puesto", "Telefono"],
        &[&["linkedin.com/in/ana", "Ana", "Acme", "CTO", "555-1234"]],
    );

    let set = reconcile(&table, SourceRole::Batch, &DedupOptions::strict(date())).unwrap();

    assert_eq!(set.columns(), RecordSet::canonical().columns());
    let record = &set.records()[0];
    assert_eq!(record.field(Field::Link), Some("linkedin.com/in/ana"));
    assert_eq!(record.field(Field::FullName), Some("Ana"));
    assert_eq!(record.field(Field::Company), Some("Acme"));
    assert_eq!(record.field(Field::Position), Some("CTO"));
    assert_eq!(record.field(Field::Phone), Some("555-1234"));
}

#[test]
fn strict_drops_unknown_columns() {
    let table = raw(
        &["link", "full_name", "company", "position", "phone", "email"],
        &[&["a", "b", "c", "d", "1", "x@y.z"]],
    );

    let set = reconcile(&table, SourceRole::Batch, &DedupOptions::strict(date())).unwrap();

    assert!(!set.has_column("email"));
    assert!(!set.records()[0].has_column("email"));
}

#[test]
fn lenient_passes_unknown_columns_through_after_canonical() {
    let table = raw(&["email", "enlace", "notas"], &[&["x@y.z", "a/b", "llamar"]]);

    let set = reconcile(&table, SourceRole::Batch, &DedupOptions::lenient(date())).unwrap();

    assert_eq!(
        set.columns(),
        &[
            "link",
            "full_name",
            "company",
            "position",
            "phone",
            "email",
            "notas"
        ]
        .map(String::from)[..]
    );
    let record = &set.records()[0];
    assert_eq!(record.get("email"), Some("x@y.z"));
    assert_eq!(record.field(Field::Phone), None);
    assert!(record.has_column("phone"));
}

#[test]
fn lenient_still_requires_link() {
    let table = raw(&["nombre"], &[&["Ana"]]);

    let err = reconcile(&table, SourceRole::History, &DedupOptions::lenient(date())).unwrap_err();

    assert_eq!(
        err,
        SchemaError::MissingFields {
            role: SourceRole::History,
            fields: vec!["link".to_string()],
        }
    );
    assert_eq!(err.to_string(), "history: missing mandatory columns: link");
}

#[test]
fn configured_alias_is_honored() {
    let table = raw(&["Perfil LinkedIn"], &[&["a/b"]]);
    let options = DedupOptions::lenient(date()).with_alias("perfil linkedin", Field::Link);

    let set = reconcile(&table, SourceRole::Blacklist, &options).unwrap();

    assert_eq!(set.records()[0].field(Field::Link), Some("a/b"));
}

#[test]
fn source_table_is_not_mutated() {
    let table = raw(&["enlace", "extra"], &[&["a/b", "z"]]);
    let before = table.clone();

    let _ = reconcile(&table, SourceRole::Batch, &DedupOptions::lenient(date())).unwrap();

    assert_eq!(table, before);
}
