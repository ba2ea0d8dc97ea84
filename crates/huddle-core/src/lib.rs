//! Huddle Core Types
//!
//! This crate provides the foundational types shared by the Huddle layout
//! engine and its tools:
//!
//! - **Identifiers**: String-interned participant identifiers ([`identifier::Id`])
//! - **Colors**: CSS color parsing for snapshot styling ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and insets ([`geometry`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
