// Composition root.
//
// - Read config from environment.
// - Instantiate the warehouse implementation.
// - Wire it into the use case handlers and the router.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
