use cosmwasm_schema::cw_serde;
use cosmwasm_std::Event;

use crate::state::PriceFeed;

#[cw_serde]
pub struct PriceFeedUpdateEvent {
    pub price_feed: PriceFeed,
    // block time of the update, in seconds
    pub timestamp: u64,
}

impl From<PriceFeedUpdateEvent> for Event {
    fn from(evt: PriceFeedUpdateEvent) -> Self {
        let PriceFeedUpdateEvent {
            price_feed,
            timestamp,
        } = evt;

        Event::new("PriceFeedUpdate")
            .add_attribute("price_feed_id", hex::encode(price_feed.id.as_slice()))
            .add_attribute("price", price_feed.price.to_string())
            .add_attribute("conf", price_feed.conf.to_string())
            .add_attribute("expo", price_feed.expo.to_string())
            .add_attribute("publish_time", price_feed.publish_time.to_string())
            .add_attribute("timestamp", timestamp.to_string())
    }
}

#[cw_serde]
pub struct InitializationEvent {}

impl From<InitializationEvent> for Event {
    fn from(_: InitializationEvent) -> Self {
        Event::new("Initialization")
    }
}
