//! # sso-observability
//!
//! Structured Logging fuer den SSO-Dienst via tracing-subscriber.
//! Der Subscriber wird genau einmal vom Binary installiert; Bibliotheks-
//! Crates loggen nur ueber `tracing`-Spans und -Events.

pub mod logging;

pub use logging::{logging_initialisieren, LogUmgebung};
