//! Deterministic simulation module
//!
//! All balance logic lives here. This module must stay pure and deterministic:
//! - Explicit tick signal only (no assumed frame rate)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod balance;
pub mod history;
pub mod session;
pub mod state;
pub mod tick;

pub use balance::{BalanceTotals, compute};
pub use history::HistoryManager;
pub use session::Session;
pub use state::{ShapeType, SimState, SpeedSetting, WeightEntity};
pub use tick::tick;
