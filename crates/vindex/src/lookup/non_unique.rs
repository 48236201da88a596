//! Non-unique lookup vindexes
//!
//! Each id may have any number of entries in the backing table. Two flags
//! change how absence is handled:
//!
//! - `scatter_if_absent`: an id with no entries routes to every shard
//!   instead of nowhere, and verify always succeeds
//! - `ignore`: the table is never read; every id routes to every shard

use std::marker::PhantomData;

use async_trait::async_trait;
use shardgate_config::VindexParams;
use shardgate_query::{VCursor, Value};
use shardgate_routing::{Destination, KeyspaceId, Ksids};
use tracing::warn;

use crate::error::Result;
use crate::lookup::codec::{Direct, Hashed, KsidCodec};
use crate::lookup::table::LookupTable;
use crate::vindex::{Lookup, NonUnique, Vindex};

#[cfg(test)]
#[path = "non_unique_test.rs"]
mod tests;

/// Non-unique lookup vindex over "to" values hashed with `vhash`
pub type LookupHash = NonUniqueLookup<Hashed>;

/// Non-unique lookup vindex whose "to" column holds keyspace ids
pub type LookupNonUnique = NonUniqueLookup<Direct>;

/// Non-unique lookup vindex, generic over how "to" values become keyspace ids
#[derive(Debug)]
pub struct NonUniqueLookup<C: KsidCodec> {
    name: String,
    scatter_if_absent: bool,
    ignore: bool,
    lkp: LookupTable,
    codec: PhantomData<fn() -> C>,
}

impl<C: KsidCodec> NonUniqueLookup<C> {
    /// Build from vindex parameters
    ///
    /// # Errors
    /// Everything [`LookupTable::new`] rejects, plus non-boolean
    /// `scatter_if_absent` or `ignore` values.
    pub fn new(name: impl Into<String>, params: &VindexParams) -> Result<Self> {
        let lkp = LookupTable::new(params)?;
        let scatter_if_absent = params.get_bool("scatter_if_absent")?;
        let ignore = params.get_bool("ignore")?;

        Ok(Self {
            name: name.into(),
            scatter_if_absent,
            ignore,
            lkp,
            codec: PhantomData,
        })
    }

    /// Whether ids with no entries scatter
    pub fn scatter_if_absent(&self) -> bool {
        self.scatter_if_absent
    }

    /// Whether the table is bypassed entirely
    pub fn ignore(&self) -> bool {
        self.ignore
    }

    /// Backing table accessor
    pub fn table(&self) -> &LookupTable {
        &self.lkp
    }
}

#[async_trait]
impl<C: KsidCodec> Vindex for NonUniqueLookup<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn cost(&self) -> u32 {
        20
    }

    async fn map(&self, vcursor: &dyn VCursor, ids: &[Value]) -> Result<Vec<Destination>> {
        let ksids = self.map_ksids(vcursor, ids).await?;
        Ok(ksids.into_iter().map(Destination::from).collect())
    }

    async fn verify(
        &self,
        vcursor: &dyn VCursor,
        ids: &[Value],
        ksids: &[KeyspaceId],
    ) -> Result<Vec<bool>> {
        if self.scatter_if_absent || self.ignore {
            return Ok(vec![true; ids.len()]);
        }
        self.lkp.verify_ksids::<C>(vcursor, ids, ksids).await
    }

    fn as_non_unique(&self) -> Option<&dyn NonUnique> {
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
impl<C: KsidCodec> NonUnique for NonUniqueLookup<C> {
    async fn map_ksids(&self, vcursor: &dyn VCursor, ids: &[Value]) -> Result<Vec<Ksids>> {
        if self.ignore {
            return Ok(vec![Ksids::full_range(); ids.len()]);
        }

        let results = self.lkp.lookup(vcursor, ids).await?;

        let mut out = Vec::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(results) {
            if result.is_empty() {
                out.push(if self.scatter_if_absent {
                    Ksids::full_range()
                } else {
                    Ksids::none()
                });
                continue;
            }

            let mut ksids = Vec::with_capacity(result.row_count());
            for value in result.first_column() {
                match C::ksid_from_value(value) {
                    Ok(ksid) => ksids.push(ksid),
                    Err(e) => {
                        warn!(vindex = %self.name, %id, error = %e, "skipping unusable lookup value");
                    }
                }
            }
            out.push(Ksids::Ids(ksids));
        }
        Ok(out)
    }
}

#[async_trait]
impl<C: KsidCodec> Lookup for NonUniqueLookup<C> {
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
