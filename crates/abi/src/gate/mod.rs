use std::fmt;

use crate::generation::Generation;
use crate::version::{ABI_2_0, API_2_0, AbiVersion, FeatureVersion};

/// Which definition of a version-sensitive symbol a build uses.
///
/// Exactly one path applies to every `(feature, abi)` pair; see [`GatePath::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatePath {
	/// The source targets the 2.0 API or newer, so no legacy host can load it.
	Current,
	/// The build declares the 1.x ABI, so only legacy layouts can be present.
	Legacy,
	/// Built against the 2.x ABI while targeting a 1.x feature level: the host
	/// generation is only known at runtime.
	Dual,
}

impl GatePath {
	/// All paths, in resolution order.
	pub const ALL: [GatePath; 3] = [Self::Current, Self::Legacy, Self::Dual];

	/// Selects the path for a build configuration.
	///
	/// The feature axis is consulted first: targeting the 2.0 API or newer makes
	/// the ABI declaration irrelevant.
	pub const fn resolve(feature: FeatureVersion, abi: AbiVersion) -> Self {
		if feature.at_least(API_2_0) {
			Self::Current
		} else if !abi.at_least(ABI_2_0) {
			Self::Legacy
		} else {
			Self::Dual
		}
	}

	/// Generation fixed at build time, or `None` when a runtime probe is required.
	pub const fn static_generation(self) -> Option<Generation> {
		match self {
			Self::Current => Some(Generation::Current),
			Self::Legacy => Some(Generation::Legacy),
			Self::Dual => None,
		}
	}

	/// Returns true if this path defers to the host's runtime version.
	pub const fn is_dual(self) -> bool {
		matches!(self, Self::Dual)
	}

	/// Value of the `ndcompat_gate` cfg emitted for this path.
	pub const fn cfg_value(self) -> &'static str {
		match self {
			Self::Current => "current",
			Self::Legacy => "legacy",
			Self::Dual => "dual",
		}
	}
}

impl fmt::Display for GatePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.cfg_value())
	}
}

#[cfg(test)]
mod tests;
