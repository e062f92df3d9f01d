//! Parsers for adb's line-oriented text output
//!
//! Both parsers are lenient: lines they do not understand are skipped, never
//! reported, so minor format drift between adb versions does not break callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One line of `adb devices -l`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device serial
    pub id: String,
    /// Raw state token (`device`, `offline`, `unauthorized`, ...)
    pub status: String,
    /// Trailing `key:value` tokens such as `usb`, `product`, `model`, `device`
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl DeviceRecord {
    /// Look up any field by name, including `id` and `status`
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "id" => Some(&self.id),
            "status" => Some(&self.status),
            _ => self.fields.get(key).map(String::as_str),
        }
    }

    /// True when adb reports the device as ready for commands
    pub fn is_online(&self) -> bool {
        self.status == "device"
    }
}

/// Full `getprop` dump of one device, in the order adb printed it.
/// Values are always JSON strings.
pub type PropertyMap = Map<String, Value>;

/// Parse the output of `adb devices -l`.
///
/// The first line is the header and is discarded. Lines with fewer than two
/// whitespace-separated tokens are skipped.
pub fn parse_devices(output: &str) -> Vec<DeviceRecord> {
    output
        .lines()
        .skip(1)
        .filter_map(parse_device_line)
        .collect()
}

fn parse_device_line(line: &str) -> Option<DeviceRecord> {
    let mut tokens = line.split_whitespace();
    let id = tokens.next()?;
    let status = tokens.next()?;

    let fields = tokens
        .filter_map(|token| token.split_once(':'))
        // id and status come from the leading tokens only
        .filter(|(key, _)| !matches!(*key, "id" | "status"))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    Some(DeviceRecord {
        id: id.to_string(),
        status: status.to_string(),
        fields,
    })
}

/// Parse the output of `adb shell getprop`.
///
/// Each `[key]: [value]` line becomes one entry; a repeated key keeps its first
/// position and its last value.
pub fn parse_properties(output: &str) -> PropertyMap {
    output
        .lines()
        .filter_map(|line| line.split_once(": ["))
        .map(|(key, value)| {
            (
                key.trim_matches(|c| c == '[' || c == ']').to_string(),
                Value::String(value.trim_end_matches(']').to_string()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_device() {
        let output = "List of devices attached\n\
                      1234567890abcdef\tdevice usb:1-1 product:test_product model:Test_Model device:test_device";
        let devices = parse_devices(output);

        assert_eq!(devices.len(), 1);
        let dev = &devices[0];
        assert_eq!(dev.id, "1234567890abcdef");
        assert_eq!(dev.status, "device");
        assert_eq!(dev.get("usb"), Some("1-1"));
        assert_eq!(dev.get("product"), Some("test_product"));
        assert_eq!(dev.get("model"), Some("Test_Model"));
        assert_eq!(dev.get("device"), Some("test_device"));
        assert!(dev.is_online());
    }

    #[test]
    fn test_header_only_yields_no_devices() {
        assert!(parse_devices("List of devices attached").is_empty());
        assert!(parse_devices("").is_empty());
    }

    #[test]
    fn test_blank_and_short_lines_skipped() {
        let output = "List of devices attached\n\
                      \n\
                      lonely_token\n   \n\
                      emulator-5554 offline\n";
        let devices = parse_devices(output);

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "emulator-5554");
        assert_eq!(devices[0].status, "offline");
        assert!(devices[0].fields.is_empty());
        assert!(!devices[0].is_online());
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let output = "List of devices attached\n\
                      192.168.1.20:5555 device transport_id:3 addr:192.168.1.20:5555";
        let devices = parse_devices(output);

        assert_eq!(devices[0].id, "192.168.1.20:5555");
        assert_eq!(devices[0].get("addr"), Some("192.168.1.20:5555"));
        assert_eq!(devices[0].get("transport_id"), Some("3"));
    }

    #[test]
    fn test_tokens_without_colon_ignored() {
        let output = "List of devices attached\nABC unauthorized no_permissions usb:2-1";
        let devices = parse_devices(output);

        assert_eq!(devices[0].status, "unauthorized");
        assert_eq!(devices[0].fields.len(), 1);
        assert_eq!(devices[0].get("usb"), Some("2-1"));
    }

    #[test]
    fn test_trailing_tokens_cannot_replace_id() {
        let output = "List of devices attached\nserial1 device id: status:bogus model:X";
        let devices = parse_devices(output);

        assert_eq!(devices[0].id, "serial1");
        assert_eq!(devices[0].status, "device");
        assert_eq!(devices[0].get("model"), Some("X"));
        assert_eq!(devices[0].fields.len(), 1);
    }

    #[test]
    fn test_device_order_preserved() {
        let output = "List of devices attached\nb device\na device\nc offline";
        let ids: Vec<_> = parse_devices(output).into_iter().map(|d| d.id).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_device_record_serializes_flat() {
        let output = "List of devices attached\nserial1 device model:Pixel_7";
        let json = serde_json::to_value(&parse_devices(output)[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "serial1", "status": "device", "model": "Pixel_7"})
        );
    }

    #[test]
    fn test_parse_properties() {
        let output = "[ro.build.version.release]: [14]\n\
                      [ro.product.model]: [Pixel 7]\n\
                      [persist.sys.empty]: []";
        let props = parse_properties(output);

        assert_eq!(props.len(), 3);
        assert_eq!(props["ro.build.version.release"], "14");
        assert_eq!(props["ro.product.model"], "Pixel 7");
        assert_eq!(props["persist.sys.empty"], "");
    }

    #[test]
    fn test_properties_skip_unrecognized_lines() {
        let output = "garbage line\n[no.separator] [x]\n[ok]: [yes]\n\n";
        let props = parse_properties(output);

        assert_eq!(props.len(), 1);
        assert_eq!(props["ok"], "yes");
    }

    #[test]
    fn test_properties_last_duplicate_wins() {
        let output = "[k]: [first]\n[k]: [second]";
        let props = parse_properties(output);

        assert_eq!(props.len(), 1);
        assert_eq!(props["k"], "second");
    }

    #[test]
    fn test_properties_keep_output_order() {
        let output = "[ro.product.model]: [Pixel 7]\n\
                      [ro.build.version.release]: [14]\n\
                      [persist.sys.empty]: []\n\
                      [ro.product.model]: [Pixel 8]";
        let props = parse_properties(output);
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["ro.product.model", "ro.build.version.release", "persist.sys.empty"]
        );
    }

    #[test]
    fn test_property_value_splits_on_first_separator_only() {
        let output = "[weird]: [a]: [b]";
        let props = parse_properties(output);
        assert_eq!(props["weird"], "a]: [b");
    }

    #[test]
    fn test_properties_handle_crlf() {
        let output = "[ro.hardware]: [ranchu]\r\n[ro.product.brand]: [google]\r\n";
        let props = parse_properties(output);
        assert_eq!(props["ro.hardware"], "ranchu");
        assert_eq!(props["ro.product.brand"], "google");
    }
}
