//! Lookup table accessor
//!
//! Turns a vindex's parameters into the statements that read and write its
//! backing table, and runs them through the caller's [`VCursor`]. Every
//! lookup vindex owns one of these; the vindex itself only decides what to
//! do with the rows that come back.
//!
//! # Statements
//!
//! For `table = t`, `from = c1, c2`, `to = ksid`:
//!
//! ```text
//! select ksid from t where c1 = :c1
//! select c1 from t where c1 = :c1 and ksid = :ksid
//! insert into t(c1, c2, ksid) values(:c10, :c20, :ksid0), (:c11, :c21, :ksid1)
//! delete from t where c1 = :c1 and c2 = :c2 and ksid = :ksid
//! ```
//!
//! Lookups and verifies match on the first "from" column only.

use std::slice;

use serde::Serialize;
use shardgate_config::{ConfigError, VindexParams};
use shardgate_query::{BindVars, QueryResult, VCursor, Value};
use shardgate_routing::KeyspaceId;
use tracing::debug;

use crate::error::{Result, VindexError};
use crate::lookup::codec::{KsidCodec, value_for, values_for};

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;

const METHOD_LOOKUP: &str = "VindexLookup";
const METHOD_VERIFY: &str = "VindexVerify";
const METHOD_CREATE: &str = "VindexCreate";
const METHOD_DELETE: &str = "VindexDelete";

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Backing table of a lookup vindex
#[derive(Debug, Clone, Serialize)]
pub struct LookupTable {
    table: String,
    from_columns: Vec<String>,
    to: String,
    #[serde(skip_serializing_if = "is_false")]
    autocommit: bool,
    #[serde(rename = "upsert", skip_serializing_if = "is_false")]
    upsert_on_insert: bool,
    #[serde(skip)]
    upsert_on_update: bool,
    #[serde(skip)]
    disallow_update: bool,
    #[serde(skip)]
    sel: String,
    #[serde(skip)]
    ver: String,
    #[serde(skip)]
    del: String,
}

impl LookupTable {
    /// Build the accessor from vindex parameters
    ///
    /// Reads `table`, `from` (comma-separated) and `to`, plus the
    /// `autocommit_on_insert` (alias `autocommit`), `upsert_on_insert`
    /// (alias `upsert`), `upsert_on_update` and `disallow_update` flags.
    ///
    /// # Errors
    /// - `ConfigError::MissingParam` if `table`, `from` or `to` is absent
    /// - `ConfigError::InvalidParam` if a name is blank
    /// - `ConfigError::InvalidBool` if a flag is not `true`/`false`
    pub fn new(params: &VindexParams) -> std::result::Result<Self, ConfigError> {
        let table = non_blank(params, "table")?;
        let to = non_blank(params, "to")?;

        let mut from_columns = Vec::new();
        for column in params.required("from")?.split(',') {
            let column = column.trim();
            if column.is_empty() {
                return Err(ConfigError::invalid_param("from", "empty column name"));
            }
            from_columns.push(column.to_string());
        }

        let autocommit = params.get_bool_either("autocommit_on_insert", "autocommit")?;
        let upsert_on_insert = params.get_bool_either("upsert_on_insert", "upsert")?;
        let upsert_on_update = params.get_bool("upsert_on_update")?;
        let disallow_update = params.get_bool("disallow_update")?;

        let from0 = &from_columns[0];
        let sel = format!("select {to} from {table} where {from0} = :{from0}");
        let ver = format!("select {from0} from {table} where {from0} = :{from0} and {to} = :{to}");
        let conds: Vec<String> = from_columns.iter().map(|c| format!("{c} = :{c}")).collect();
        let del = format!("delete from {table} where {} and {to} = :{to}", conds.join(" and "));

        Ok(Self {
            table,
            from_columns,
            to,
            autocommit,
            upsert_on_insert,
            upsert_on_update,
            disallow_update,
            sel,
            ver,
            del,
        })
    }

    /// Backing table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// "from" column names, in declaration order
    pub fn from_columns(&self) -> &[String] {
        &self.from_columns
    }

    /// "to" column name
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Whether inserts commit on their own
    pub fn autocommit(&self) -> bool {
        self.autocommit
    }

    /// Whether inserts overwrite existing entries
    pub fn upsert_on_insert(&self) -> bool {
        self.upsert_on_insert
    }

    /// Whether the insert half of an update overwrites existing entries
    pub fn upsert_on_update(&self) -> bool {
        self.upsert_on_update
    }

    /// Whether updates are rejected
    pub fn disallow_update(&self) -> bool {
        self.disallow_update
    }

    fn from0(&self) -> &str {
        &self.from_columns[0]
    }

    /// Fetch the "to" rows for each id, one select per id, in input order
    ///
    /// # Errors
    /// The first cursor failure aborts the batch as `lookup.Map`.
    pub async fn lookup(&self, vcursor: &dyn VCursor, ids: &[Value]) -> Result<Vec<QueryResult>> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            let mut bind_vars = BindVars::new();
            bind_vars.insert(self.from0().to_string(), id.clone());

            let result = vcursor
                .execute(METHOD_LOOKUP, &self.sel, &bind_vars, false)
                .await
                .map_err(|e| VindexError::execution("lookup.Map", e))?;
            results.push(result);
        }

        debug!(table = %self.table, ids = ids.len(), "looked up vindex entries");
        Ok(results)
    }

    /// Check that each `ids[i]` has an entry pointing at `values[i]`
    ///
    /// # Errors
    /// - `VindexError::LengthMismatch` if the lists differ in length
    /// - `VindexError::Execution` (`lookup.Verify`) on cursor failure
    pub async fn verify(
        &self,
        vcursor: &dyn VCursor,
        ids: &[Value],
        values: &[Value],
    ) -> Result<Vec<bool>> {
        if ids.len() != values.len() {
            return Err(VindexError::LengthMismatch {
                op: "lookup.Verify",
                left: ids.len(),
                right: values.len(),
            });
        }

        let mut out = Vec::with_capacity(ids.len());
        for (id, value) in ids.iter().zip(values) {
            let mut bind_vars = BindVars::new();
            bind_vars.insert(self.from0().to_string(), id.clone());
            bind_vars.insert(self.to.clone(), value.clone());

            let result = vcursor
                .execute(METHOD_VERIFY, &self.ver, &bind_vars, true)
                .await
                .map_err(|e| VindexError::execution("lookup.Verify", e))?;
            out.push(!result.is_empty());
        }
        Ok(out)
    }

    /// Insert one entry per row: the row's "from" values plus `to_values[i]`
    ///
    /// All rows go out as a single statement. `ignore_mode` skips rows that
    /// already exist; `upsert_on_insert` overwrites them.
    pub async fn create(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        to_values: &[Value],
        ignore_mode: bool,
    ) -> Result<()> {
        self.insert(vcursor, rows, to_values, ignore_mode, self.upsert_on_insert)
            .await
    }

    /// Delete the entry for each row that points at `to_value`
    ///
    /// Issues one statement per row.
    pub async fn delete(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        to_value: &Value,
    ) -> Result<()> {
        for (index, row) in rows.iter().enumerate() {
            self.check_row("lookup.Delete", index, row)?;

            let mut bind_vars: BindVars = self
                .from_columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect();
            bind_vars.insert(self.to.clone(), to_value.clone());

            vcursor
                .execute(METHOD_DELETE, &self.del, &bind_vars, true)
                .await
                .map_err(|e| VindexError::execution("lookup.Delete", e))?;
        }

        debug!(table = %self.table, rows = rows.len(), "deleted vindex entries");
        Ok(())
    }

    /// Repoint `to_value` from `old_values` to `new_values`
    ///
    /// Always a delete of the old entry followed by an insert of the new
    /// one; `upsert_on_update` selects the upsert form of the insert.
    ///
    /// # Errors
    /// `VindexError::UpdateDisallowed` without touching the cursor when
    /// `disallow_update` is set.
    pub async fn update(
        &self,
        vcursor: &dyn VCursor,
        old_values: &[Value],
        to_value: &Value,
        new_values: &[Value],
    ) -> Result<()> {
        if self.disallow_update {
            return Err(VindexError::update_disallowed(&self.table));
        }

        self.delete(vcursor, &[old_values.to_vec()], to_value).await?;
        self.insert(
            vcursor,
            &[new_values.to_vec()],
            slice::from_ref(to_value),
            false,
            self.upsert_on_update,
        )
        .await
    }

    async fn insert(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        to_values: &[Value],
        ignore_mode: bool,
        upsert: bool,
    ) -> Result<()> {
        if rows.len() != to_values.len() {
            return Err(VindexError::LengthMismatch {
                op: "lookup.Create",
                left: rows.len(),
                right: to_values.len(),
            });
        }
        if rows.is_empty() {
            return Ok(());
        }

        let mut bind_vars = BindVars::new();
        let mut tuples = Vec::with_capacity(rows.len());
        for (index, (row, to_value)) in rows.iter().zip(to_values).enumerate() {
            self.check_row("lookup.Create", index, row)?;

            let mut names = Vec::with_capacity(row.len() + 1);
            for (column, value) in self.from_columns.iter().zip(row) {
                let name = format!("{column}{index}");
                names.push(format!(":{name}"));
                bind_vars.insert(name, value.clone());
            }
            let name = format!("{}{index}", self.to);
            names.push(format!(":{name}"));
            bind_vars.insert(name, to_value.clone());

            tuples.push(format!("({})", names.join(", ")));
        }

        let verb = if ignore_mode { "insert ignore into" } else { "insert into" };
        let mut sql = format!(
            "{verb} {}({}, {}) values{}",
            self.table,
            self.from_columns.join(", "),
            self.to,
            tuples.join(", ")
        );
        if upsert {
            let assignments: Vec<String> = self
                .from_columns
                .iter()
                .chain(slice::from_ref(&self.to))
                .map(|c| format!("{c}=values({c})"))
                .collect();
            sql.push_str(" on duplicate key update ");
            sql.push_str(&assignments.join(", "));
        }

        let result = if self.autocommit {
            vcursor
                .execute_autocommit(METHOD_CREATE, &sql, &bind_vars, true)
                .await
        } else {
            vcursor.execute(METHOD_CREATE, &sql, &bind_vars, true).await
        };
        result.map_err(|e| VindexError::execution("lookup.Create", e))?;

        debug!(
            table = %self.table,
            rows = rows.len(),
            ignore_mode,
            upsert,
            autocommit = self.autocommit,
            "created vindex entries"
        );
        Ok(())
    }

    fn check_row(&self, op: &'static str, row: usize, values: &[Value]) -> Result<()> {
        if values.len() != self.from_columns.len() {
            return Err(VindexError::ColumnCountMismatch {
                op,
                table: self.table.clone(),
                row,
                got: values.len(),
                want: self.from_columns.len(),
            });
        }
        Ok(())
    }
}

// Keyspace id entry points: encode through the vindex's codec, then
// delegate to the value-level operations above.
impl LookupTable {
    pub(crate) async fn verify_ksids<C: KsidCodec>(
        &self,
        vcursor: &dyn VCursor,
        ids: &[Value],
        ksids: &[KeyspaceId],
    ) -> Result<Vec<bool>> {
        let values = values_for::<C>(ksids, "lookup.Verify.vunhash")?;
        self.verify(vcursor, ids, &values).await
    }

    pub(crate) async fn create_ksids<C: KsidCodec>(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        ksids: &[KeyspaceId],
        ignore_mode: bool,
    ) -> Result<()> {
        let values = values_for::<C>(ksids, "lookup.Create.vunhash")?;
        self.create(vcursor, rows, &values, ignore_mode).await
    }

    pub(crate) async fn delete_ksid<C: KsidCodec>(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        ksid: &KeyspaceId,
    ) -> Result<()> {
        let value = value_for::<C>(ksid, "lookup.Delete.vunhash")?;
        self.delete(vcursor, rows, &value).await
    }

    pub(crate) async fn update_ksid<C: KsidCodec>(
        &self,
        vcursor: &dyn VCursor,
        old_values: &[Value],
        ksid: &KeyspaceId,
        new_values: &[Value],
    ) -> Result<()> {
        let value = value_for::<C>(ksid, "lookup.Update.vunhash")?;
        self.update(vcursor, old_values, &value, new_values).await
    }

    /// JSON form used for VSchema introspection
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

fn non_blank(params: &VindexParams, key: &str) -> std::result::Result<String, ConfigError> {
    let value = params.required(key)?.trim();
    if value.is_empty() {
        return Err(ConfigError::invalid_param(key, "must not be empty"));
    }
    Ok(value.to_string())
}
