//! Cross-crate flows: access client, signed request channel, door service.

pub mod flows;
