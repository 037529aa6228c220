//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules of the shelter controller:
//! threshold evaluation, history recording, indicator mapping and report
//! dispatch.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
