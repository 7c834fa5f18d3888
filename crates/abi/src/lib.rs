//! ABI definitions shared by the NumPy compatibility shim.
//!
//! Everything here is plain data and `const fn`: version newtypes and the
//! generation thresholds, the three-way [`GatePath`] resolver, per-generation
//! value profiles, built-in type numbers, and both descriptor layouts together
//! with the tagged [`DescrRef`] decoder.
//!
//! The crate holds no process state and performs no I/O, which lets the
//! `ndcompat` build script depend on it to evaluate the gate for the compiled
//! configuration with exactly the same policy the library uses at runtime.

#![warn(missing_docs)]

/// Legacy spellings of renamed symbols.
pub mod aliases;
/// Compile-time path selection.
pub mod gate;
/// Generation tags and the values that differ between them.
pub mod generation;
/// `#[repr(C)]` descriptor layouts and the tagged decoder.
pub mod layout;
/// Built-in type numbers.
pub mod types;
/// Version newtypes and threshold constants.
pub mod version;

pub use gate::GatePath;
pub use generation::{CURRENT_PROFILE, Generation, GenerationProfile, LEGACY_PROFILE};
pub use layout::{Descr, DescrFlags, DescrProto, DescrRef, ObjectHead};
pub use types::{NTYPES_LEGACY, TypeNum};
pub use version::{
	ABI_1, ABI_2_0, API_1_19, API_1_20, API_1_22, API_1_23, API_1_25, API_2_0, AbiVersion, FeatureVersion, ParseVersionError,
	declared_abi, parse_raw,
};
