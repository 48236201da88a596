//! Unique lookup vindexes
//!
//! Each id has at most one entry in the backing table. A second entry is a
//! data integrity problem and fails the whole `map` call.

use std::marker::PhantomData;

use async_trait::async_trait;
use shardgate_config::{ConfigError, VindexParams};
use shardgate_query::{VCursor, Value};
use shardgate_routing::{Destination, KeyspaceId};
use tracing::warn;

use crate::error::{Result, VindexError};
use crate::lookup::codec::{Direct, Hashed, KsidCodec};
use crate::lookup::table::LookupTable;
use crate::vindex::{Lookup, Unique, Vindex};

#[cfg(test)]
#[path = "unique_test.rs"]
mod tests;

/// Flags that only make sense when an id may have several entries
const NON_UNIQUE_FLAGS: [&str; 2] = ["scatter_if_absent", "ignore"];

/// Unique lookup vindex over "to" values hashed with `vhash`
pub type LookupHashUnique = UniqueLookup<Hashed>;

/// Unique lookup vindex whose "to" column holds keyspace ids
pub type LookupUnique = UniqueLookup<Direct>;

/// Unique lookup vindex, generic over how "to" values become keyspace ids
#[derive(Debug)]
pub struct UniqueLookup<C: KsidCodec> {
    name: String,
    lkp: LookupTable,
    codec: PhantomData<fn() -> C>,
}

impl<C: KsidCodec> UniqueLookup<C> {
    /// Build from vindex parameters
    ///
    /// # Errors
    /// Everything [`LookupTable::new`] rejects, plus `scatter_if_absent` or
    /// `ignore` set to `true`.
    pub fn new(name: impl Into<String>, params: &VindexParams) -> Result<Self> {
        let lkp = LookupTable::new(params)?;
        for flag in NON_UNIQUE_FLAGS {
            if params.get_bool(flag)? {
                return Err(ConfigError::unique_conflict(flag).into());
            }
        }

        Ok(Self {
            name: name.into(),
            lkp,
            codec: PhantomData,
        })
    }

    /// Backing table accessor
    pub fn table(&self) -> &LookupTable {
        &self.lkp
    }
}

#[async_trait]
impl<C: KsidCodec> Vindex for UniqueLookup<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn cost(&self) -> u32 {
        10
    }

    async fn map(&self, vcursor: &dyn VCursor, ids: &[Value]) -> Result<Vec<Destination>> {
        let ksids = self.map_unique(vcursor, ids).await?;
        Ok(ksids.into_iter().map(Destination::from).collect())
    }

    async fn verify(
        &self,
        vcursor: &dyn VCursor,
        ids: &[Value],
        ksids: &[KeyspaceId],
    ) -> Result<Vec<bool>> {
        self.lkp.verify_ksids::<C>(vcursor, ids, ksids).await
    }

    fn as_unique(&self) -> Option<&dyn Unique> {
        Some(self)
    }

    fn as_lookup(&self) -> Option<&dyn Lookup> {
        Some(self)
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        self.lkp.to_json()
    }
}

#[async_trait]
impl<C: KsidCodec> Unique for UniqueLookup<C> {
    async fn map_unique(
        &self,
        vcursor: &dyn VCursor,
        ids: &[Value],
    ) -> Result<Vec<Option<KeyspaceId>>> {
        let results = self.lkp.lookup(vcursor, ids).await?;

        let mut out = Vec::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(results) {
            match result.rows.as_slice() {
                [] => out.push(None),
                [row] => {
                    let ksid = row.first().and_then(|value| match C::ksid_from_value(value) {
                        Ok(ksid) => Some(ksid),
                        Err(e) => {
                            warn!(vindex = %self.name, %id, error = %e, "unusable lookup value");
                            None
                        }
                    });
                    out.push(ksid);
                }
                rows => {
                    warn!(
                        vindex = %self.name,
                        table = %self.lkp.table(),
                        %id,
                        rows = rows.len(),
                        "unique vindex has multiple entries"
                    );
                    return Err(VindexError::multiple_results(self.lkp.table(), id.clone()));
                }
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl<C: KsidCodec> Lookup for UniqueLookup<C> {
    async fn create(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        ksids: &[KeyspaceId],
        ignore_mode: bool,
    ) -> Result<()> {
        self.lkp
            .create_ksids::<C>(vcursor, rows, ksids, ignore_mode)
            .await
    }

    async fn delete(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        ksid: &KeyspaceId,
    ) -> Result<()> {
        self.lkp.delete_ksid::<C>(vcursor, rows, ksid).await
    }

    async fn update(
        &self,
        vcursor: &dyn VCursor,
        old_values: &[Value],
        ksid: &KeyspaceId,
        new_values: &[Value],
    ) -> Result<()> {
        self.lkp
            .update_ksid::<C>(vcursor, old_values, ksid, new_values)
            .await
    }
}
