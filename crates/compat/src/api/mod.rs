//! The imported host API and every version-sensitive accessor.

use std::ffi::c_void;
use std::fmt;
use std::sync::OnceLock;

use ndcompat_abi::{DescrFlags, DescrRef, FeatureVersion, GatePath, Generation, GenerationProfile, TypeNum};
use tracing::debug;

use crate::config::BuildConfig;
use crate::error::Result;
use crate::table::ApiTable;

/// An imported host API table plus the build configuration it is read with.
///
/// Holding an `Api` proves the host was imported, so every accessor that may
/// consult the runtime version is a method here. When the gate is static the
/// answer is a constant and the table is never read.
pub struct Api {
	table: ApiTable,
	config: BuildConfig,
	runtime: OnceLock<FeatureVersion>,
}

impl Api {
	/// Validates `table` against `config` and wraps it.
	///
	/// The host's feature version is read here, once, and kept for the
	/// lifetime of the handle.
	pub fn new(table: ApiTable, config: BuildConfig) -> Result<Self> {
		let api = Self {
			table,
			config,
			runtime: OnceLock::new(),
		};
		config.check_host(api.table.abi_version(), api.host_feature_version())?;
		Ok(api)
	}

	/// Build configuration this handle resolves against.
	pub fn config(&self) -> BuildConfig {
		self.config
	}

	/// Path selected for this handle's configuration.
	pub fn gate(&self) -> GatePath {
		self.config.gate()
	}

	/// The underlying host table.
	pub fn table(&self) -> &ApiTable {
		&self.table
	}

	/// Feature version the host provides.
	///
	/// A legacy-only build never asks the host and reports its own target
	/// feature version instead; every other path returns the value captured
	/// from the host on first use.
	pub fn runtime_version(&self) -> FeatureVersion {
		match self.gate() {
			GatePath::Legacy => self.config.feature,
			GatePath::Current | GatePath::Dual => self.host_feature_version(),
		}
	}

	fn host_feature_version(&self) -> FeatureVersion {
		*self.runtime.get_or_init(|| {
			let version = self.table.feature_version();
			debug!(runtime_version = %version, "api.runtime_version.captured");
			version
		})
	}

	/// Generation whose values and layouts apply.
	pub fn generation(&self) -> Generation {
		match self.gate().static_generation() {
			Some(generation) => generation,
			None => Generation::of(self.runtime_version()),
		}
	}

	/// All generation-dependent values at once.
	pub fn profile(&self) -> GenerationProfile {
		self.generation().profile()
	}

	/// Type number of the default integer.
	pub fn default_int(&self) -> TypeNum {
		self.profile().default_int
	}

	/// Axis argument requesting the flattened array.
	///
	/// The two generations use different sentinels; never hard-code either.
	pub fn ravel_axis(&self) -> i32 {
		self.profile().ravel_axis
	}

	/// Maximum operand count of iterators and ufuncs.
	pub fn max_args(&self) -> usize {
		self.profile().max_args
	}

	/// Maximum number of array dimensions.
	pub fn max_dims(&self) -> usize {
		self.profile().max_dims
	}

	/// Reads the item flags of a host descriptor.
	///
	/// A null descriptor has no flags and yields `0`.
	///
	/// # Safety
	///
	/// A non-null `descr` must point to a live descriptor owned by the
	/// imported host.
	pub unsafe fn descr_flags(&self, descr: *const c_void) -> u64 {
		// SAFETY: the host owns `descr`, so it uses the host generation's layout.
		unsafe { DescrRef::from_raw(descr, self.generation()) }.map_or(0, |d| d.flags())
	}

	/// [`Self::descr_flags`] as a flag set.
	///
	/// # Safety
	///
	/// Same as [`Self::descr_flags`].
	pub unsafe fn descr_flag_set(&self, descr: *const c_void) -> DescrFlags {
		DescrFlags::from_bits_retain(unsafe { self.descr_flags(descr) })
	}
}

impl fmt::Debug for Api {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Api")
			.field("table", &self.table)
			.field("config", &self.config)
			.field("gate", &self.gate())
			.field("runtime", &self.runtime.get())
			.finish()
	}
}
