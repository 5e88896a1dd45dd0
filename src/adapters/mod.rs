// Adapters layer: concrete implementations for external systems (http, smtp).

pub mod http;
pub mod smtp;
