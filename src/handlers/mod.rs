// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (token cookie + ownership check)
pub mod public;
pub mod protected;
