//! Text configuration parser
//!
//! A small line parser for the TOML subset used to describe a chain. It does
//! NOT support full TOML.
//!
//! ```toml
//! # chain-wide settings
//! intensity = 8
//!
//! [[element]]
//! mode = "matrix"
//! leaves = ["0:0-7"]
//!
//! [[element]]
//! mode = "seven_segment"
//! leaves = ["1:0-3", "1:4,5,6,7"]
//! ```
//!
//! Supported features:
//! - `key = value` pairs (integer, string, array of strings)
//! - `[[element]]` table headers, one per topology element
//! - Comments (# ...)
//!
//! A leaf is written `chip:digits`, where digits is a comma separated list
//! of raw indices or inclusive `a-b` ranges, kept in the written order.

use alloc::vec::Vec;

use ledchain_protocol::registers::flag;

use super::types::{ChainConfig, ConfigError, CONFIG_VERSION};
use crate::topology::{Mode, Node};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Element,
}

/// Element table being filled in
#[derive(Debug, Default)]
struct ElementDraft {
    mode: Option<Mode>,
    leaves: Vec<Node>,
}

impl ElementDraft {
    fn finish(self) -> Result<Node, ConfigError> {
        let mode = self.mode.ok_or(ConfigError::MissingMode)?;
        Ok(Node::container(mode, self.leaves))
    }
}

/// Parse text configuration into a ChainConfig
///
/// The described topology is validated before returning.
pub fn parse_config(input: &str) -> Result<ChainConfig, ConfigError> {
    let mut config = ChainConfig {
        version: CONFIG_VERSION,
        elements: Vec::new(),
        ..ChainConfig::default()
    };
    let mut section = Section::Root;
    let mut current: Option<ElementDraft> = None;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if line != "[[element]]" {
                return Err(ConfigError::InvalidSection(line_no));
            }
            if let Some(draft) = current.take() {
                config.elements.push(draft.finish()?);
            }
            current = Some(ElementDraft::default());
            section = Section::Element;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidKey(line_no))?;

        match (section, current.as_mut()) {
            (Section::Root, _) => match key {
                "intensity" => {
                    let intensity: u8 = parse_int(value, line_no)?;
                    if intensity > flag::INTENSITY_MAX {
                        return Err(ConfigError::InvalidValue(line_no));
                    }
                    config.settings.intensity = intensity;
                }
                "version" => {
                    config.version = parse_int(value, line_no)?;
                    if config.version != CONFIG_VERSION {
                        return Err(ConfigError::VersionMismatch);
                    }
                }
                _ => return Err(ConfigError::InvalidKey(line_no)),
            },
            (Section::Element, Some(draft)) => match key {
                "mode" => {
                    let name = parse_string(value).ok_or(ConfigError::InvalidValue(line_no))?;
                    draft.mode =
                        Some(Mode::from_name(name).ok_or(ConfigError::InvalidValue(line_no))?);
                }
                "leaves" => {
                    for leaf in parse_string_array(value).ok_or(ConfigError::InvalidValue(line_no))? {
                        draft
                            .leaves
                            .push(parse_leaf(leaf).ok_or(ConfigError::InvalidValue(line_no))?);
                    }
                }
                _ => return Err(ConfigError::InvalidKey(line_no)),
            },
            (Section::Element, None) => return Err(ConfigError::InvalidSection(line_no)),
        }
    }

    // Save final element
    if let Some(draft) = current.take() {
        config.elements.push(draft.finish()?);
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    let topology = config.topology()?;

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "Parsed chain config: {} elements over {} chips, intensity {}",
        topology.element_count(),
        topology.chip_count(),
        config.settings.intensity
    );

    Ok(config)
}

/// Remove a trailing comment unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value (removes quotes)
fn parse_string(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str, line_no: usize) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue(line_no))
}

/// Parse an array of quoted strings like ["a", "b"]
fn parse_string_array(value: &str) -> Option<Vec<&str>> {
    let value = value.trim();
    if !value.starts_with('[') || !value.ends_with(']') {
        return None;
    }
    let inner = value[1..value.len() - 1].trim();

    let mut items = Vec::new();
    let mut rest = inner;
    while !rest.is_empty() {
        let rest_trimmed = rest.trim_start();
        let body = rest_trimmed.strip_prefix('"')?;
        let end = body.find('"')?;
        items.push(&body[..end]);

        rest = body[end + 1..].trim_start();
        if let Some(after_comma) = rest.strip_prefix(',') {
            rest = after_comma.trim_start();
        } else if !rest.is_empty() {
            return None;
        }
    }

    Some(items)
}

/// Parse a leaf like "1:0-3" or "0:7,6,5"
fn parse_leaf(value: &str) -> Option<Node> {
    let (chip, digits) = value.split_once(':')?;
    let chip: u8 = chip.trim().parse().ok()?;

    let mut raw = Vec::new();
    for part in digits.split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            let start: u8 = start.trim().parse().ok()?;
            let end: u8 = end.trim().parse().ok()?;
            if start > end {
                return None;
            }
            raw.extend(start..=end);
        } else {
            raw.push(part.parse().ok()?);
        }
    }

    if raw.is_empty() {
        return None;
    }

    Some(Node::Leaf { chip, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::TopologyError;
    use alloc::vec;

    const TWO_CHIPS: &str = r#"
# chain-wide settings
intensity = 12

[[element]]
mode = "matrix"   # left module
leaves = ["0:0-7"]

[[element]]
mode = "seven_segment"
leaves = ["1:0-3", "1:4,5,6,7"]
"#;

    #[test]
    fn test_parse_two_chip_chain() {
        let config = parse_config(TWO_CHIPS).unwrap();

        assert_eq!(config.settings.intensity, 12);
        assert_eq!(config.elements.len(), 2);
        assert_eq!(config.elements[0], Node::matrix(0));
        assert_eq!(
            config.elements[1],
            Node::container(
                Mode::SevenSegment,
                vec![Node::leaf(1, &[0, 1, 2, 3]), Node::leaf(1, &[4, 5, 6, 7])],
            )
        );

        let topology = config.topology().unwrap();
        assert_eq!(topology.chip_count(), 2);
        assert_eq!(topology.digit_count_of(1), Ok(8));
    }

    #[test]
    fn test_leaf_order_is_kept() {
        assert_eq!(parse_leaf("2:7,6,0-1"), Some(Node::leaf(2, &[7, 6, 0, 1])));
        assert_eq!(parse_leaf("2:3-1"), None);
        assert_eq!(parse_leaf("x:1"), None);
        assert_eq!(parse_leaf("1"), None);
    }

    #[test]
    fn test_string_arrays() {
        assert_eq!(parse_string_array(r#"["a", "b#c"]"#), Some(vec!["a", "b#c"]));
        assert_eq!(parse_string_array("[]"), Some(vec![]));
        assert_eq!(parse_string_array(r#"["a" "b"]"#), None);
        assert_eq!(parse_string_array(r#""a""#), None);
    }

    #[test]
    fn test_comment_inside_string_kept() {
        assert_eq!(strip_comment(r#"a = "x#y" # note"#), r#"a = "x#y" "#);
    }

    #[test]
    fn test_unknown_section() {
        let result = parse_config("[chain]\nintensity = 3\n");
        assert_eq!(result.unwrap_err(), ConfigError::InvalidSection(1));
    }

    #[test]
    fn test_unknown_key() {
        let result = parse_config("brightness = 3\n");
        assert_eq!(result.unwrap_err(), ConfigError::InvalidKey(1));
    }

    #[test]
    fn test_settings_range_checked() {
        assert_eq!(parse_config("intensity = 16\n").unwrap_err(), ConfigError::InvalidValue(1));
        assert_eq!(parse_config("intensity = -1\n").unwrap_err(), ConfigError::InvalidValue(1));
        assert_eq!(parse_config("version = 2\n").unwrap_err(), ConfigError::VersionMismatch);
    }

    #[test]
    fn test_bad_mode() {
        let input = "[[element]]\nmode = \"ring\"\nleaves = [\"0:0-7\"]\n";
        assert_eq!(parse_config(input).unwrap_err(), ConfigError::InvalidValue(2));
    }

    #[test]
    fn test_missing_mode() {
        let input = "[[element]]\nleaves = [\"0:0-7\"]\n";
        assert_eq!(parse_config(input).unwrap_err(), ConfigError::MissingMode);
    }

    #[test]
    fn test_topology_validated() {
        let input = "[[element]]\nmode = \"matrix\"\nleaves = [\"1:0-7\"]\n";
        assert_eq!(
            parse_config(input).unwrap_err(),
            ConfigError::Topology(TopologyError::ChipSpan)
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse_config("# nothing here\n").unwrap_err(),
            ConfigError::Topology(TopologyError::Empty)
        );
    }
}
