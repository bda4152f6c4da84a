//! Console services.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the simulated behavior (timers, canned replies,
//! wizard state) so route handlers stay focused on request parsing and
//! response shaping. Everything stateful lives in memory and resets on
//! restart, and every store is capped (see `bounded`).

pub mod action;
pub mod bot_settings;
pub mod bounded;
pub mod chat;
pub mod forms;
pub mod wizard;
pub mod wordpress;
