//! Version dispatch for extensions built against the NumPy C API.
//!
//! # Purpose
//!
//! - Let one compiled extension run against 1.x and 2.x hosts by resolving every version-sensitive value either at build time or, when the build supports both generations, from the host's runtime version.
//! - Own the one-time import of the host API table and the cache of its runtime version.
//!
//! # Mental model
//!
//! - A build has two independent version axes: the feature version the source targets and the ABI version the artifact declares ([`BuildConfig`]).
//! - The build script resolves them into one [`GatePath`] and emits it as `cfg(ndcompat_gate = "current" | "legacy" | "dual")`.
//! - On static paths every answer is a constant (see `fixed`). On the dual path the answer depends on the host, which is only known after import.
//! - [`import_api`] turns an [`ApiSource`] into the process-wide [`Api`]. All accessors that may need the runtime version are methods on [`Api`], so they cannot be called before import.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints | Constructed / mutated in |
//! |---|---|---|---|
//! | [`BuildConfig`] | Feature + ABI version of a build | `COMPILED` is fixed by the build script | `build.rs`, [`BuildConfig::new`] |
//! | [`GatePath`] | Current-only, legacy-only or dual | Exactly one per configuration | [`GatePath::resolve`] |
//! | [`ApiTable`] | Validated host `void **` table | Version slots must be non-null | [`ApiTable::from_raw`], [`SharedLibrary`] |
//! | [`Api`] | Imported table + runtime version cache | Runtime version captured once | [`Api::new`], [`import_api`] |
//! | [`Generation`] | Resolved host generation | Total over the two known generations | [`Api::generation`] |
//! | [`abi::DescrRef`] | Descriptor reference tagged with its layout | Never decoded without a generation | [`Api::descr_flags`] |
//!
//! # Invariants
//!
//! - The runtime version never changes once captured.
//! - Runtime-dependent accessors require an [`Api`]; there is no way to call them before import.
//! - On a legacy-only build the runtime version is the compiled target; the host is only asked once, during import, to check compatibility.
//! - A dual-path build resolved to a generation returns exactly what the static build for that generation returns.
//! - Raw descriptors are only read through the layout of the resolved generation.
//!
//! # Lifecycle
//!
//! - Build: features or `NDCOMPAT_FEATURE_VERSION` / `NDCOMPAT_ABI_VERSION` select the configuration. Selecting no feature version is a compile error.
//! - Import: the first successful [`import_api`] validates the host (ABI generation, feature version) and publishes the [`Api`]. Failed imports publish nothing.
//! - Use: accessors are O(1) reads; the host is called at most once for its feature version.
//! - Teardown: none. The table and any loaded library live until process exit.
//!
//! # Concurrency and ordering
//!
//! - Import must happen-before any accessor on the dual path; holding the [`Api`] returned by import guarantees it.
//! - Both process-wide values are write-once `OnceLock`s. Concurrent first imports may each acquire a table; one wins.
//!
//! # Failure modes and recovery
//!
//! - All failures are [`ImportError`]s raised during import. Accessors are infallible.
//! - An incompatible host (newer ABI generation than declared, or older API than targeted) is rejected before publication, so a retry with another source is possible.

#![warn(missing_docs)]

#[cfg(ndcompat_feature_unset)]
compile_error!(
	"ndcompat needs a target feature version: enable one of the `api-1-19`, `api-1-20`, `api-1-22`, `api-1-23`, \
	 `api-1-25` or `api-2-0` features, or set NDCOMPAT_FEATURE_VERSION (for example 0x0d) when building"
);

pub mod api;
pub mod config;
pub mod error;
#[cfg(any(ndcompat_gate = "current", ndcompat_gate = "legacy"))]
pub mod fixed;
pub mod import;
pub mod loader;
pub mod source;
pub mod table;
#[cfg(test)]
mod testing;

/// Legacy names, available when the build can only see a legacy host.
#[cfg(ndcompat_gate = "legacy")]
pub use ndcompat_abi::aliases;

pub use api::Api;
pub use config::BuildConfig;
pub use error::{ImportError, Result};
pub use import::{api, ensure_imported, import_api, is_imported};
pub use loader::{LoaderConfig, SharedLibrary};
pub use ndcompat_abi as abi;
pub use ndcompat_abi::{AbiVersion, DescrFlags, FeatureVersion, GatePath, Generation, GenerationProfile, TypeNum};
pub use source::{ApiSource, StaticTable};
pub use table::ApiTable;

/// Path selected for the compiled configuration.
pub const GATE: GatePath = BuildConfig::COMPILED.gate();

#[cfg(not(ndcompat_feature_unset))]
const _: () = assert!(
	(cfg!(ndcompat_gate = "current") && matches!(GATE, GatePath::Current))
		|| (cfg!(ndcompat_gate = "legacy") && matches!(GATE, GatePath::Legacy))
		|| (cfg!(ndcompat_gate = "dual") && matches!(GATE, GatePath::Dual)),
	"ndcompat_gate cfg disagrees with the compiled configuration"
);
