//! Mock collaborators and key material for testing sigil SDK components.
pub mod sessions;
pub mod wallets;
