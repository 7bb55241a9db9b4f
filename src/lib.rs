//! Options open-interest tracker: fetch a ticker's option chain for one
//! expiration from a market-data provider and map call/put open interest
//! by strike, with the current spot price marked.

pub mod cli;
pub mod expirations;
pub mod fetch;
pub mod interactive;
pub mod model;
pub mod present;
pub mod session;
pub mod snapshot;
