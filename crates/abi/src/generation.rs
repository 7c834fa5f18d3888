use std::fmt;

use crate::types::TypeNum;
use crate::version::{API_2_0, FeatureVersion};

/// Host ABI generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
	/// 1.x hosts: `long` default integer, 32 dimensions, legacy descriptor layout.
	Legacy,
	/// 2.x hosts: `intp` default integer, 64 dimensions, current descriptor layout.
	Current,
}

impl Generation {
	/// Classifies a feature version reported by a host.
	pub const fn of(version: FeatureVersion) -> Self {
		if version.at_least(API_2_0) { Self::Current } else { Self::Legacy }
	}

	/// Returns the fixed values that belong to this generation.
	pub const fn profile(self) -> GenerationProfile {
		match self {
			Self::Legacy => LEGACY_PROFILE,
			Self::Current => CURRENT_PROFILE,
		}
	}

	/// Short lowercase name, used in logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Legacy => "legacy",
			Self::Current => "current",
		}
	}
}

impl fmt::Display for Generation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Values that change between generations.
///
/// Callers must read these through a resolved generation; hard-coding either
/// side breaks on the other host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProfile {
	/// Type number of the default integer.
	pub default_int: TypeNum,
	/// Axis argument meaning "operate on the flattened array".
	pub ravel_axis: i32,
	/// Maximum number of operands an iterator or ufunc accepts.
	pub max_args: usize,
	/// Maximum number of array dimensions.
	pub max_dims: usize,
}

/// Profile of 1.x hosts.
pub const LEGACY_PROFILE: GenerationProfile = GenerationProfile {
	default_int: TypeNum::Long,
	ravel_axis: 32,
	max_args: 32,
	max_dims: 32,
};

/// Profile of 2.x hosts.
pub const CURRENT_PROFILE: GenerationProfile = GenerationProfile {
	default_int: TypeNum::intp(),
	ravel_axis: i32::MIN,
	max_args: 64,
	max_dims: 64,
};
