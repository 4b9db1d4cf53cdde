// Adapters layer: concrete implementations for external systems (the
// salon's REST backend and its auth endpoints).

pub mod auth;
pub mod http;
