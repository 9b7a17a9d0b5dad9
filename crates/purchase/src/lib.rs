//! Buy workflow for the order lifecycle.
//!
//! A buy request goes through these steps:
//! 1. Validate the request and turn it into a `BuyCommand`
//! 2. Create the order against the current goods snapshot
//! 3. Enable the stored order
//! 4. Map the enabled order into a response
//!
//! A failure at any step aborts the buy. Nothing is compensated: an order
//! left in `CREATED` after a failed enable stays there for inspection.

pub mod command;
pub mod monitor;
pub mod result;
pub mod service;
pub mod workflow;

pub use command::{BuyCommand, ValidationError};
pub use monitor::{CallMonitor, CallPolicy};
pub use result::BuyResult;
pub use service::{OrderBuyDto, OrderBuyRequest, OrderBuyResponse, OrderBuyService};
pub use workflow::BuyWorkflow;
