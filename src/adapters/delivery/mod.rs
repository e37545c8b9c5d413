//! Lead Delivery Adapters.
//!
//! - `EmailLeadDelivery` - staff notification plus prospect thank-you
//! - `ChannelLeadDelivery` - forwards leads into an mpsc channel

mod channel;
mod email;

pub use channel::ChannelLeadDelivery;
pub use email::{EmailLeadDelivery, LeadMailerConfig};
