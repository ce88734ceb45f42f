//! Pregame sabermetric aggregation for MLB game logs.
//!
//! Takes raw per-game counting stats (scraped upstream) and derives, for
//! every game, the exact aggregate state that existed before the game was
//! played: batting splits, trailing-window batting rates, and ERA/WHIP for
//! starters and bullpens.

pub mod batting;
pub mod bullpen;
pub mod gamelog;
pub mod innings;
pub mod input;
pub mod pipeline;
pub mod pitching;
pub mod rates;
pub mod store;
pub mod teams;
