//! adb backend: process runner, mock responder, output parsers and the
//! device operations built on top of them.

mod client;
mod error;
pub mod mock;
mod parse;
mod runner;

pub use client::{AdbClient, AdbSettings, Outcome};
pub use error::{AdbError, AdbResult};
pub use mock::MockRunner;
pub use parse::{parse_devices, parse_properties, DeviceRecord, PropertyMap};
pub use runner::{CommandRunner, ProcessRunner};
