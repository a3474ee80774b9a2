use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::{events::PriceFeedUpdateEvent, receipt::GovernanceWitness};

/// An emitter trusted to publish either governance instructions or price data.
#[cw_serde]
#[derive(Eq)]
pub struct PythDataSource {
    pub emitter_chain: u16,
    pub emitter_address: Binary,
}

impl PythDataSource {
    pub fn matches(&self, emitter_chain: u16, emitter_address: &[u8]) -> bool {
        self.emitter_chain == emitter_chain && self.emitter_address.as_slice() == emitter_address
    }
}

#[cw_serde]
pub struct ConfigInfo {
    // Wormhole core contract used to verify VAAs
    pub wormhole_contract: Addr,

    // Wormhole chain id of this deployment
    pub chain_id: u16,

    // The only emitter allowed to send governance instructions
    pub governance_source: PythDataSource,

    // Emitters allowed to publish price attestations
    pub data_sources: Vec<PythDataSource>,
}

#[cw_serde]
pub struct PriceFeed {
    pub id: Binary,
    pub price: i64,
    pub conf: u64,
    pub expo: i32,
    pub publish_time: i64,
}

pub const CONFIG: Item<ConfigInfo> = Item::new("config");
pub const STALE_PRICE_THRESHOLD: Item<u64> = Item::new("stale_price_threshold");

/// Sequence of the last executed governance VAA.
pub const GOVERNANCE_SEQUENCE: Item<u64> = Item::new("governance_sequence");

/// Digests of executed governance VAAs.
pub const CONSUMED_VAAS: Map<&[u8], bool> = Map::new("consumed_vaas");

pub const PRICE_FEEDS: Map<&[u8], PriceFeed> = Map::new("price_feeds");

pub fn get_stale_price_threshold_secs(storage: &dyn Storage) -> StdResult<u64> {
    STALE_PRICE_THRESHOLD.load(storage)
}

pub fn set_stale_price_threshold_secs(
    _witness: &GovernanceWitness,
    storage: &mut dyn Storage,
    value: u64,
) -> StdResult<()> {
    STALE_PRICE_THRESHOLD.save(storage, &value)
}

pub fn governance_sequence(storage: &dyn Storage) -> StdResult<u64> {
    GOVERNANCE_SEQUENCE.load(storage)
}

pub fn set_governance_sequence(
    _witness: &GovernanceWitness,
    storage: &mut dyn Storage,
    sequence: u64,
) -> StdResult<()> {
    GOVERNANCE_SEQUENCE.save(storage, &sequence)
}

pub fn set_governance_source(
    _witness: &GovernanceWitness,
    storage: &mut dyn Storage,
    source: PythDataSource,
) -> StdResult<()> {
    CONFIG.update(storage, |mut cfg| -> StdResult<_> {
        cfg.governance_source = source;
        Ok(cfg)
    })?;
    Ok(())
}

pub fn set_data_sources(
    _witness: &GovernanceWitness,
    storage: &mut dyn Storage,
    data_sources: Vec<PythDataSource>,
) -> StdResult<()> {
    CONFIG.update(storage, |mut cfg| -> StdResult<_> {
        cfg.data_sources = data_sources;
        Ok(cfg)
    })?;
    Ok(())
}

pub fn vaa_archive_add(storage: &mut dyn Storage, hash: &[u8]) -> StdResult<()> {
    CONSUMED_VAAS.save(storage, hash, &true)
}

pub fn vaa_archive_check(storage: &dyn Storage, hash: &[u8]) -> bool {
    CONSUMED_VAAS.has(storage, hash)
}

/// Stores `feed` if it is newer than the stored feed with the same id.
///
/// Returns the event to emit when the table changed; an older or equally old
/// feed leaves the table untouched and yields `None`.
///
/// This is the write hook for price attestation processing, which this
/// contract does not implement: no entry point calls it, so `PRICE_FEEDS`
/// stays empty in a deployment and the price queries answer
/// `PriceFeedNotFound` until an update path is added.
pub fn record_price_feed(
    storage: &mut dyn Storage,
    feed: PriceFeed,
    timestamp: u64,
) -> StdResult<Option<PriceFeedUpdateEvent>> {
    let key = feed.id.clone();
    if let Some(current) = PRICE_FEEDS.may_load(storage, key.as_slice())? {
        if current.publish_time >= feed.publish_time {
            return Ok(None);
        }
    }
    PRICE_FEEDS.save(storage, key.as_slice(), &feed)?;

    Ok(Some(PriceFeedUpdateEvent {
        price_feed: feed,
        timestamp,
    }))
}
