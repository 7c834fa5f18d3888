//! Compiled version configuration.

use ndcompat_abi::{AbiVersion, FeatureVersion, GatePath, declared_abi};

use crate::error::{ImportError, Result};

mod generated {
	use ndcompat_abi::{AbiVersion, FeatureVersion};

	include!(concat!(env!("OUT_DIR"), "/build_config.rs"));
}

pub use generated::{ABI_VERSION, FEATURE_VERSION};

/// The two independent version axes of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildConfig {
	/// API generation the source targets.
	pub feature: FeatureVersion,
	/// ABI generation the artifact assumes.
	pub abi: AbiVersion,
}

impl BuildConfig {
	/// Configuration this crate was compiled with.
	pub const COMPILED: BuildConfig = BuildConfig::new(FEATURE_VERSION, ABI_VERSION);

	/// Pairs a feature version with an ABI version.
	///
	/// A 2.0 API target always declares the 2.x ABI; see [`declared_abi`].
	pub const fn new(feature: FeatureVersion, abi: AbiVersion) -> Self {
		Self {
			feature,
			abi: declared_abi(feature, abi),
		}
	}

	/// Path selected for this configuration.
	pub const fn gate(self) -> GatePath {
		GatePath::resolve(self.feature, self.abi)
	}

	/// Checks that a host reporting `host_abi` and `host_feature` can run this build.
	///
	/// An artifact may run on an older ABI generation (that is what the dual
	/// path is for) but never on a newer one, and never on a host missing API
	/// the source targets.
	pub fn check_host(self, host_abi: AbiVersion, host_feature: FeatureVersion) -> Result<()> {
		if self.abi.major() < host_abi.major() {
			return Err(ImportError::AbiMismatch {
				compiled: self.abi,
				runtime: host_abi,
			});
		}
		if self.feature > host_feature {
			return Err(ImportError::FeatureVersionTooNew {
				compiled: self.feature,
				runtime: host_feature,
			});
		}
		Ok(())
	}
}
