//! Named-event handler registry.

pub mod dispatcher;
