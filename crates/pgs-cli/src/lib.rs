//! Polygon Studio CLI library surface.

pub mod logging;
