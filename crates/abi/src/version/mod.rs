use std::fmt;

use thiserror::Error;

/// API generation a piece of source code targets.
///
/// Ordered by generation; the host reports the same quantity at runtime
/// through its feature version slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureVersion(u32);

impl FeatureVersion {
	/// Wraps a raw feature version number.
	pub const fn new(raw: u32) -> Self {
		Self(raw)
	}

	/// Returns the raw feature version number.
	pub const fn get(self) -> u32 {
		self.0
	}

	/// Returns true if `self` is the same generation as `other` or newer.
	pub const fn at_least(self, other: Self) -> bool {
		self.0 >= other.0
	}
}

impl fmt::Display for FeatureVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{:08x}", self.0)
	}
}

/// Binary layout generation a compiled artifact assumes.
///
/// The top byte carries the major generation: `0x01xxxxxx` for 1.x and
/// `0x02xxxxxx` for 2.x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbiVersion(u32);

impl AbiVersion {
	/// Wraps a raw ABI version number.
	pub const fn new(raw: u32) -> Self {
		Self(raw)
	}

	/// Returns the raw ABI version number.
	pub const fn get(self) -> u32 {
		self.0
	}

	/// Returns the major ABI generation.
	pub const fn major(self) -> u32 {
		self.0 >> 24
	}

	/// Returns true if `self` is the same generation as `other` or newer.
	pub const fn at_least(self, other: Self) -> bool {
		self.0 >= other.0
	}
}

impl fmt::Display for AbiVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{:08x}", self.0)
	}
}

/// Feature version of the 1.19 API, the oldest target a 2.x header build accepts by default.
pub const API_1_19: FeatureVersion = FeatureVersion::new(0x0000_000d);
/// Feature version of the 1.20 and 1.21 API.
pub const API_1_20: FeatureVersion = FeatureVersion::new(0x0000_000e);
/// Feature version of the 1.22 API.
pub const API_1_22: FeatureVersion = FeatureVersion::new(0x0000_000f);
/// Feature version of the 1.23 and 1.24 API.
pub const API_1_23: FeatureVersion = FeatureVersion::new(0x0000_0010);
/// Feature version of the 1.25 API.
pub const API_1_25: FeatureVersion = FeatureVersion::new(0x0000_0011);
/// Feature version of the 2.0 API. Boundary between the legacy and current generations.
pub const API_2_0: FeatureVersion = FeatureVersion::new(0x0000_0012);

/// ABI version shipped by every 1.x host.
pub const ABI_1: AbiVersion = AbiVersion::new(0x0100_0009);
/// ABI version of the 2.x hosts. Boundary between the legacy and current layouts.
pub const ABI_2_0: AbiVersion = AbiVersion::new(0x0200_0000);

/// ABI an artifact targeting `feature` actually builds against.
///
/// The 2.0 API only exists in 2.x headers, so a 1.x ABI paired with such a
/// target is raised to [`ABI_2_0`]. Every other pairing is kept.
pub const fn declared_abi(feature: FeatureVersion, abi: AbiVersion) -> AbiVersion {
	if feature.at_least(API_2_0) && !abi.at_least(ABI_2_0) { ABI_2_0 } else { abi }
}

/// A version literal that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version literal `{0}` (expected hex such as 0x12 or a decimal number)")]
pub struct ParseVersionError(pub String);

/// Parses a version literal as written in build configuration.
///
/// Accepts `0x`/`0X` prefixed hex and plain decimal. Surrounding whitespace and
/// `_` separators are ignored.
pub fn parse_raw(input: &str) -> Result<u32, ParseVersionError> {
	let cleaned: String = input.trim().chars().filter(|c| *c != '_').collect();
	let parsed = match cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
		Some(hex) => u32::from_str_radix(hex, 16),
		None => cleaned.parse::<u32>(),
	};
	parsed.map_err(|_| ParseVersionError(input.to_string()))
}
