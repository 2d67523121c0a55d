//! Durability tests: the backing file outlives the engine instance.

use saplingdb::{Column, ColumnType, Row, Schema, Table, Value};
use tempfile::tempdir;

fn schema() -> Schema {
    Schema::new(vec![
        Column::new("id", ColumnType::Int32),
        Column::new("name", ColumnType::FixedString(16)),
    ])
    .unwrap()
}

fn row(id: i32, name: &str) -> Row {
    let mut row = Row::new(id);
    row.set("id", Value::Int32(id))
        .set("name", Value::Str(name.to_string()));
    row
}

#[test]
fn reopen_after_flush_sees_all_rows() {
    let dir = tempdir().unwrap();

    {
        let table = Table::open_in(dir.path(), "users", schema(), 256).unwrap();
        for id in 1..=50 {
            table.insert(row(id, "user")).unwrap();
        }
        table.flush().unwrap();
    }

    {
        let table = Table::open_in(dir.path(), "users", schema(), 256).unwrap();
        for id in 1..=50 {
            let found = table.search(id).unwrap().unwrap();
            assert_eq!(found.id(), id);
            assert_eq!(found.get("name"), Some(&Value::Str("user".into())));
        }
        assert_eq!(table.search(51).unwrap(), None);
    }
}

#[test]
fn drop_flushes_buffered_inserts() {
    let dir = tempdir().unwrap();

    {
        let table = Table::open_in(dir.path(), "users", schema(), 256).unwrap();
        // Fewer inserts than the flush threshold; only Drop persists them.
        table.insert(row(1, "ada")).unwrap();
        table.insert(row(2, "grace")).unwrap();
    }

    let table = Table::open_in(dir.path(), "users", schema(), 256).unwrap();
    assert_eq!(table.search(1).unwrap().unwrap().id(), 1);
    assert_eq!(table.search(2).unwrap().unwrap().id(), 2);
}

#[test]
fn reopen_before_first_insert_finds_empty_root() {
    let dir = tempdir().unwrap();

    {
        Table::open_in(dir.path(), "users", schema(), 256).unwrap();
    }

    let table = Table::open_in(dir.path(), "users", schema(), 256).unwrap();
    assert_eq!(table.search(1).unwrap(), None);
    assert!(table.dump_rows().unwrap().is_empty());
}

#[test]
fn updates_survive_reopen_without_explicit_flush() {
    let dir = tempdir().unwrap();

    {
        let table = Table::open_in(dir.path(), "users", schema(), 256).unwrap();
        table.insert(row(1, "before")).unwrap();
        table.flush().unwrap();

        let mut updates = std::collections::HashMap::new();
        updates.insert("name".to_string(), Value::Str("after".into()));
        assert!(table.update(1, updates).unwrap());
        // No flush: update writes its leaf synchronously.
        std::mem::forget(table);
    }

    let table = Table::open_in(dir.path(), "users", schema(), 256).unwrap();
    let found = table.search(1).unwrap().unwrap();
    assert_eq!(found.get("name"), Some(&Value::Str("after".into())));
}

#[test]
fn split_tree_survives_reopen() {
    let dir = tempdir().unwrap();
    let one_col = Schema::new(vec![Column::new("id", ColumnType::Int32)]).unwrap();

    {
        let table = Table::open_in(dir.path(), "nums", one_col.clone(), 64).unwrap();
        for id in 1..=200 {
            let mut r = Row::new(id);
            r.set("id", Value::Int32(id));
            table.insert(r).unwrap();
        }
        table.flush().unwrap();

        let levels = table.dump_levels().unwrap();
        assert!(levels.len() >= 3);
    }

    let table = Table::open_in(dir.path(), "nums", one_col, 64).unwrap();
    for id in 1..=200 {
        assert_eq!(table.search(id).unwrap().unwrap().id(), id);
    }
    let ids: Vec<i32> = table.dump_rows().unwrap().iter().map(|r| r.id()).collect();
    assert_eq!(ids, (1..=200).collect::<Vec<_>>());
}
