//! Outbound adapters: implementations of the domain's store ports.

pub mod persistence;
