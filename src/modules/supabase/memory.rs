//! In-memory stand-in for the Supabase backend used by tests.
//!
//! Mirrors the PostgREST semantics the application depends on: filters,
//! ordering, embedded joins, `PGRST116` for empty single reads, and
//! foreign-key rejections. Failures can be injected per table/operation and
//! every write attempt is recorded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::client::{DataClient, DataResult, Session, SessionUser};
use super::error::DataError;
use super::query::{Column, Filter, Query, Relation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Count,
    Insert,
    Update,
    Delete,
    Auth,
}

/// A write the application attempted, whether or not it succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCall {
    pub operation: Operation,
    pub table: String,
    pub id: Option<Uuid>,
}

#[derive(Debug, Clone)]
struct ForeignKey {
    table: String,
    column: String,
    references: String,
}

struct InjectedFailure {
    table: String,
    operation: Operation,
    error: DataError,
}

struct Account {
    email: String,
    password: String,
    user: SessionUser,
}

#[derive(Default)]
struct Store {
    tables: HashMap<String, Vec<Value>>,
    foreign_keys: Vec<ForeignKey>,
    sessions: HashMap<String, SessionUser>,
    accounts: Vec<Account>,
    failures: Vec<InjectedFailure>,
    writes: Vec<WriteCall>,
    clock: i64,
}

impl Store {
    fn take_failure(&mut self, table: &str, operation: Operation) -> DataResult<()> {
        match self
            .failures
            .iter()
            .position(|f| f.table == table && f.operation == operation)
        {
            Some(index) => Err(self.failures.remove(index).error),
            None => Ok(()),
        }
    }

    fn next_timestamp(&mut self) -> String {
        self.clock += 1;
        let base = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        (base + Duration::seconds(self.clock)).to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn rows(&self, table: &str) -> &[Value] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    fn check_references(&self, table: &str, row: &Value) -> DataResult<()> {
        for fk in self.foreign_keys.iter().filter(|fk| fk.table == table) {
            let value = row.get(&fk.column).cloned().unwrap_or(Value::Null);
            if value.is_null() {
                continue;
            }
            let exists = self
                .rows(&fk.references)
                .iter()
                .any(|r| r.get("id") == Some(&value));
            if !exists {
                return Err(DataError::new(
                    "23503",
                    format!(
                        "insert or update on table \"{}\" violates foreign key constraint \"{}_{}_fkey\"",
                        table, table, fk.column
                    ),
                )
                .with_status(409));
            }
        }
        Ok(())
    }

    fn check_not_referenced(&self, table: &str, id: &Value) -> DataResult<()> {
        for fk in self.foreign_keys.iter().filter(|fk| fk.references == table) {
            if self.rows(&fk.table).iter().any(|r| r.get(&fk.column) == Some(id)) {
                return Err(DataError::new(
                    "23503",
                    format!(
                        "update or delete on table \"{}\" violates foreign key constraint \"{}_{}_fkey\" on table \"{}\"",
                        table, fk.table, fk.column, fk.table
                    ),
                )
                .with_details(format!("Key is still referenced from table \"{}\".", fk.table))
                .with_status(409));
            }
        }
        Ok(())
    }

    fn run_query(&self, table: &str, query: &Query) -> Vec<Value> {
        let mut rows: Vec<&Value> = self
            .rows(table)
            .iter()
            .filter(|row| query.filters().iter().all(|f| matches_filter(row, f)))
            .collect();

        for order in query.orders().iter().rev() {
            rows.sort_by(|a, b| {
                let ordering = compare_values(
                    a.get(&order.column).unwrap_or(&NULL),
                    b.get(&order.column).unwrap_or(&NULL),
                );
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        if let Some(limit) = query.max_rows() {
            rows.truncate(limit);
        }

        rows.into_iter()
            .map(|row| self.project(row, query.columns()))
            .collect()
    }

    fn project(&self, row: &Value, columns: &[Column]) -> Value {
        let mut out = Map::new();
        let columns: &[Column] = if columns.is_empty() {
            &ALL_COLUMNS
        } else {
            columns
        };

        for column in columns {
            match column {
                Column::All => {
                    if let Some(obj) = row.as_object() {
                        out.extend(obj.iter().map(|(k, v)| (k.clone(), v.clone())));
                    }
                }
                Column::Field(name) => {
                    out.insert(name.clone(), row.get(name).cloned().unwrap_or(Value::Null));
                }
                Column::Embed(embed) => {
                    let value = match &embed.relation {
                        Relation::ToOne { fk_column } => {
                            match row.get(fk_column).filter(|v| !v.is_null()) {
                                Some(fk) => self
                                    .rows(&embed.table)
                                    .iter()
                                    .find(|r| r.get("id") == Some(fk))
                                    .map(|r| self.project(r, &embed.columns))
                                    .unwrap_or(Value::Null),
                                None => Value::Null,
                            }
                        }
                        Relation::ToMany { fk_column } => {
                            let parent_id = row.get("id").cloned().unwrap_or(Value::Null);
                            Value::Array(
                                self.rows(&embed.table)
                                    .iter()
                                    .filter(|r| r.get(fk_column) == Some(&parent_id))
                                    .map(|r| self.project(r, &embed.columns))
                                    .collect(),
                            )
                        }
                    };
                    out.insert(embed.alias.clone(), value);
                }
            }
        }

        Value::Object(out)
    }
}

static NULL: Value = Value::Null;
static ALL_COLUMNS: [Column; 1] = [Column::All];

fn matches_filter(row: &Value, filter: &Filter) -> bool {
    let value = row.get(filter.column()).unwrap_or(&NULL);
    match filter {
        Filter::Eq(_, expected) => value == expected,
        // SQL semantics: NULL <> x is not true
        Filter::Neq(_, expected) => !value.is_null() && value != expected,
        Filter::IsNull(_) => value.is_null(),
        Filter::NotNull(_) => !value.is_null(),
        Filter::In(_, values) => values.contains(value),
    }
}

fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        // Postgres sorts NULLs last in ascending order
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDataClient {
    store: Arc<Mutex<Store>>,
}

impl InMemoryDataClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client with the application's foreign keys (`asn.instansi_id`,
    /// `vehicles.asn_id`), both restricting deletes
    pub fn with_schema() -> Self {
        let client = Self::new();
        client.foreign_key("asn", "instansi_id", "instansi");
        client.foreign_key("vehicles", "asn_id", "asn");
        client
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn foreign_key(&self, table: &str, column: &str, references: &str) {
        self.lock().foreign_keys.push(ForeignKey {
            table: table.to_string(),
            column: column.to_string(),
            references: references.to_string(),
        });
    }

    /// Insert a row directly, bypassing failure injection and the write log
    pub fn seed(&self, table: &str, row: Value) -> Value {
        let mut store = self.lock();
        let row = fill_defaults(&mut store, row);
        store
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        row
    }

    pub fn seed_id(&self, table: &str, row: Value) -> Uuid {
        let row = self.seed(table, row);
        row.get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_default()
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().rows(table).to_vec()
    }

    pub fn add_session(&self, access_token: &str, user: SessionUser) {
        self.lock().sessions.insert(access_token.to_string(), user);
    }

    pub fn add_account(&self, email: &str, password: &str) -> SessionUser {
        let user = SessionUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        self.lock().accounts.push(Account {
            email: email.to_string(),
            password: password.to_string(),
            user: user.clone(),
        });
        user
    }

    pub fn has_session(&self, access_token: &str) -> bool {
        self.lock().sessions.contains_key(access_token)
    }

    /// Fail the next `operation` on `table` with `error`
    pub fn fail_next(&self, table: &str, operation: Operation, error: DataError) {
        self.lock().failures.push(InjectedFailure {
            table: table.to_string(),
            operation,
            error,
        });
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.lock().writes.clone()
    }

    fn record_write(store: &mut Store, operation: Operation, table: &str, id: Option<Uuid>) {
        store.writes.push(WriteCall {
            operation,
            table: table.to_string(),
            id,
        });
    }
}

fn fill_defaults(store: &mut Store, row: Value) -> Value {
    let mut obj = match row {
        Value::Object(obj) => obj,
        _ => Map::new(),
    };
    if obj.get("id").map_or(true, Value::is_null) {
        obj.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }
    if obj.get("created_at").map_or(true, Value::is_null) {
        let ts = store.next_timestamp();
        obj.insert("created_at".to_string(), Value::String(ts));
    }
    Value::Object(obj)
}

#[async_trait]
impl DataClient for InMemoryDataClient {
    async fn select(&self, table: &str, query: &Query) -> DataResult<Vec<Value>> {
        let mut store = self.lock();
        store.take_failure(table, Operation::Select)?;
        Ok(store.run_query(table, query))
    }

    async fn select_single(&self, table: &str, query: &Query) -> DataResult<Value> {
        let mut store = self.lock();
        store.take_failure(table, Operation::Select)?;
        let mut rows = store.run_query(table, query);
        if rows.len() != 1 {
            return Err(DataError::no_rows()
                .with_details(format!("The result contains {} rows", rows.len())));
        }
        Ok(rows.remove(0))
    }

    async fn count(&self, table: &str, filters: &[Filter]) -> DataResult<i64> {
        let mut store = self.lock();
        store.take_failure(table, Operation::Count)?;
        Ok(store
            .rows(table)
            .iter()
            .filter(|row| filters.iter().all(|f| matches_filter(row, f)))
            .count() as i64)
    }

    async fn insert(&self, table: &str, record: Value, returning: &Query) -> DataResult<Value> {
        let mut store = self.lock();
        Self::record_write(&mut store, Operation::Insert, table, None);
        store.take_failure(table, Operation::Insert)?;

        let row = fill_defaults(&mut store, record);
        store.check_references(table, &row)?;
        store
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(store.project(&row, returning.columns()))
    }

    async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: Value,
        returning: &Query,
    ) -> DataResult<Value> {
        let mut store = self.lock();
        Self::record_write(&mut store, Operation::Update, table, Some(id));
        store.take_failure(table, Operation::Update)?;

        let key = Value::String(id.to_string());
        let index = store
            .rows(table)
            .iter()
            .position(|r| r.get("id") == Some(&key))
            .ok_or_else(|| {
                DataError::no_rows().with_details("The result contains 0 rows".to_string())
            })?;

        let mut updated = store.rows(table)[index].clone();
        if let (Some(target), Value::Object(fields)) = (updated.as_object_mut(), patch) {
            target.extend(fields);
        }
        store.check_references(table, &updated)?;

        if let Some(rows) = store.tables.get_mut(table) {
            rows[index] = updated.clone();
        }
        Ok(store.project(&updated, returning.columns()))
    }

    async fn delete(&self, table: &str, id: Uuid) -> DataResult<()> {
        let mut store = self.lock();
        Self::record_write(&mut store, Operation::Delete, table, Some(id));
        store.take_failure(table, Operation::Delete)?;

        let key = Value::String(id.to_string());
        store.check_not_referenced(table, &key)?;
        if let Some(rows) = store.tables.get_mut(table) {
            rows.retain(|r| r.get("id") != Some(&key));
        }
        Ok(())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> DataResult<Session> {
        let mut store = self.lock();
        store.take_failure("auth", Operation::Auth)?;

        let user = store
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.user.clone())
            .ok_or_else(|| {
                DataError::new("invalid_credentials", "Invalid login credentials").with_status(400)
            })?;

        let access_token = format!("access-{}", Uuid::new_v4());
        store.sessions.insert(access_token.clone(), user.clone());

        Ok(Session {
            access_token,
            refresh_token: format!("refresh-{}", Uuid::new_v4()),
            expires_in: 3600,
            token_type: "bearer".to_string(),
            user,
        })
    }

    async fn get_session(&self, access_token: &str) -> DataResult<Option<SessionUser>> {
        let mut store = self.lock();
        store.take_failure("auth", Operation::Auth)?;
        Ok(store.sessions.get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> DataResult<()> {
        let mut store = self.lock();
        store.take_failure("auth", Operation::Auth)?;
        store.sessions.remove(access_token);
        Ok(())
    }

    fn scoped(&self, _access_token: &str) -> Arc<dyn DataClient> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::supabase::Embed;
    use serde_json::json;

    #[tokio::test]
    async fn test_embedded_joins_resolve_through_foreign_keys() {
        let client = InMemoryDataClient::with_schema();
        let instansi = client.seed_id("instansi", json!({"name": "Dinas A", "description": "-"}));
        let asn = client.seed_id(
            "asn",
            json!({"nip": "001", "name": "X", "position": "Staff", "instansi_id": instansi}),
        );
        client.seed("vehicles", json!({"nopol": "B 1", "wheel_count": 4, "asn_id": asn}));
        client.seed("vehicles", json!({"nopol": "B 2", "wheel_count": 2, "asn_id": null}));

        let query = Query::new().field("nopol").embed(
            Embed::to_one("asn", "asn", "asn_id")
                .embed(Embed::to_one("instansi", "instansi", "instansi_id").field("name")),
        );
        let rows = client.select("vehicles", &query).await.unwrap();

        assert_eq!(
            rows,
            vec![
                json!({"nopol": "B 1", "asn": {"instansi": {"name": "Dinas A"}}}),
                json!({"nopol": "B 2", "asn": null}),
            ]
        );
    }

    #[tokio::test]
    async fn test_to_many_embed_collects_children() {
        let client = InMemoryDataClient::with_schema();
        let instansi = client.seed_id("instansi", json!({"name": "Dinas A", "description": "-"}));
        client.seed("asn", json!({"name": "X", "instansi_id": instansi}));
        client.seed("asn", json!({"name": "Y", "instansi_id": instansi}));

        let query = Query::new()
            .field("name")
            .embed(Embed::to_many("asn", "instansi_id").field("name"));
        let rows = client.select("instansi", &query).await.unwrap();

        assert_eq!(
            rows,
            vec![json!({"name": "Dinas A", "asn": [{"name": "X"}, {"name": "Y"}]})]
        );
    }

    #[tokio::test]
    async fn test_select_single_without_match_is_no_rows() {
        let client = InMemoryDataClient::new();
        let err = client
            .select_single("vehicles", &Query::new().eq("asn_id", "nobody"))
            .await
            .unwrap_err();

        assert!(err.is_no_rows());
    }

    #[tokio::test]
    async fn test_order_desc_by_created_at() {
        let client = InMemoryDataClient::new();
        client.seed("instansi", json!({"name": "first"}));
        client.seed("instansi", json!({"name": "second"}));

        let rows = client
            .select(
                "instansi",
                &Query::new().field("name").order_desc("created_at"),
            )
            .await
            .unwrap();

        assert_eq!(rows, vec![json!({"name": "second"}), json!({"name": "first"})]);
    }

    #[tokio::test]
    async fn test_delete_referenced_row_is_rejected() {
        let client = InMemoryDataClient::with_schema();
        let instansi = client.seed_id("instansi", json!({"name": "Dinas A"}));
        client.seed("asn", json!({"name": "X", "instansi_id": instansi}));

        let err = client.delete("instansi", instansi).await.unwrap_err();

        assert_eq!(err.code.as_deref(), Some("23503"));
        assert_eq!(client.rows("instansi").len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_fires_once() {
        let client = InMemoryDataClient::new();
        client.fail_next(
            "instansi",
            Operation::Select,
            DataError::transport("connection reset"),
        );

        assert!(client.select("instansi", &Query::new()).await.is_err());
        assert!(client.select("instansi", &Query::new()).await.is_ok());
    }
}
