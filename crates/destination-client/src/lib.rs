//! A client for the Destination Service.
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! use destination_client::{requests, Client, ClientConfiguration, Level};
//!
//! let client = Client::builder(ClientConfiguration::from_env()?).build()?;
//! for destination in requests::destinations(Level::Subaccount).send(&client).await? {
//!     println!("{}({})", destination.name, destination.r#type);
//! }
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod authentication;
mod client;
pub mod codec;
mod destination;
mod error;
mod psst;
pub mod requests;
pub mod responses;

pub use client::{Client, ClientBuilder, ClientConfiguration};
pub use destination::{properties, Destination, DestinationType};
pub use error::{Error, ErrorMessage};
pub use psst::Secret;
pub use requests::Level;
