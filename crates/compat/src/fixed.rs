//! Constants for builds whose gate is decided at compile time.
//!
//! Only compiled on the current-only and legacy-only paths. A dual-path build
//! has no fixed answer, so naming anything in here is a compile error there and
//! the caller has to go through [`Api`](crate::Api).

use std::ffi::c_void;

#[cfg(ndcompat_gate = "legacy")]
use ndcompat_abi::FeatureVersion;
use ndcompat_abi::{DescrRef, Generation, GenerationProfile, TypeNum};

/// Generation fixed by the build.
#[cfg(ndcompat_gate = "current")]
pub const GENERATION: Generation = Generation::Current;
/// Generation fixed by the build.
#[cfg(ndcompat_gate = "legacy")]
pub const GENERATION: Generation = Generation::Legacy;

const PROFILE: GenerationProfile = GENERATION.profile();

/// Type number of the default integer.
pub const DEFAULT_INT: TypeNum = PROFILE.default_int;
/// Axis argument requesting the flattened array.
pub const RAVEL_AXIS: i32 = PROFILE.ravel_axis;
/// Maximum operand count of iterators and ufuncs.
pub const MAXARGS: usize = PROFILE.max_args;
/// Maximum number of array dimensions.
pub const MAXDIMS: usize = PROFILE.max_dims;

/// A legacy-only build stands in its own target for the host's version.
#[cfg(ndcompat_gate = "legacy")]
pub const RUNTIME_VERSION: FeatureVersion = crate::config::FEATURE_VERSION;

/// Reads the item flags of a descriptor without an imported API.
///
/// A null descriptor yields `0`.
///
/// # Safety
///
/// A non-null `descr` must point to a live descriptor in the layout of [`GENERATION`].
pub unsafe fn descr_flags(descr: *const c_void) -> u64 {
	unsafe { DescrRef::from_raw(descr, GENERATION) }.map_or(0, |d| d.flags())
}
