//! Canned adb responses for running without a real device
//!
//! [`respond`] is pure: the same arguments always produce the same text.

use async_trait::async_trait;
use tracing::debug;

use super::error::AdbResult;
use super::runner::CommandRunner;

/// Output of `adb devices -l` with two emulator-like devices attached
pub const MOCK_DEVICES: &str = "List of devices attached
mock_device_001        device usb:1-1 product:sdk_gphone64_x86_64 model:Android_SDK_built_for_x86_64 device:emu64x
mock_device_002        device usb:1-2 product:sdk_gphone64_arm64 model:Pixel_7 device:panther";

/// Output of `adb shell getprop`, trimmed to five representative properties
pub const MOCK_PROPERTIES: &str = "[ro.build.version.release]: [14]
[ro.product.manufacturer]: [Google]
[ro.product.model]: [Android SDK built for x86_64]
[ro.build.display.id]: [UE1A.230829.036]
[ro.hardware]: [ranchu]";

/// Reply to `push` and `pull`
pub const MOCK_TRANSFER: &str = "1 file transferred successfully (mock)";

/// Produce the canned reply for an adb argument list.
///
/// Patterns are checked in order and the first match wins.
pub fn respond(args: &[String]) -> String {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if args == ["devices", "-l"] {
        return MOCK_DEVICES.to_string();
    }

    if strip_selector(&args).starts_with(&["shell", "getprop"]) {
        return MOCK_PROPERTIES.to_string();
    }

    if let Some(pos) = args.iter().position(|a| *a == "shell") {
        return format!("Mock command output for: {}", args[pos + 1..].join(" "));
    }

    if args.contains(&"install") || args.contains(&"uninstall") {
        return "Success".to_string();
    }

    if args.contains(&"push") || args.contains(&"pull") {
        return MOCK_TRANSFER.to_string();
    }

    format!("Mock response for: {}", args.join(" "))
}

/// Drop a leading `-s <serial>` pair
fn strip_selector<'a>(args: &'a [&'a str]) -> &'a [&'a str] {
    match args {
        ["-s", _, rest @ ..] => rest,
        _ => args,
    }
}

/// [`CommandRunner`] backed by [`respond`]; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRunner;

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, args: &[String]) -> AdbResult<String> {
        debug!("mock adb {}", args.join(" "));
        Ok(respond(args))
    }
}
