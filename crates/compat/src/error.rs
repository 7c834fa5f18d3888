//! Error types for importing the host API.

use std::path::PathBuf;

use ndcompat_abi::{AbiVersion, FeatureVersion};
use thiserror::Error;

/// Failures while acquiring or validating the host API table.
///
/// Accessors never fail once a table is imported; every error surfaces here.
#[derive(Debug, Error)]
pub enum ImportError {
	/// The host library could not be opened.
	#[error("failed to load host library {}: {source}", path.display())]
	Load {
		/// Library that failed to open.
		path: PathBuf,
		/// Loader error.
		source: libloading::Error,
	},

	/// No candidate host library was found.
	#[error("no host library found (searched: {})", display_paths(searched))]
	LibraryNotFound {
		/// Directories that were scanned.
		searched: Vec<PathBuf>,
	},

	/// The host library does not export the API entry point.
	#[error("host library {} does not export `{symbol}`: {source}", path.display())]
	MissingSymbol {
		/// Library that was opened.
		path: PathBuf,
		/// Entry point that was looked up.
		symbol: String,
		/// Loader error.
		source: libloading::Error,
	},

	/// The host handed out a null table.
	#[error("host returned a null API table")]
	NullTable,

	/// A slot the shim reads is not populated.
	#[error("host API table slot {slot} ({name}) is null")]
	MissingSlot {
		/// Slot index.
		slot: usize,
		/// Host function expected in the slot.
		name: &'static str,
	},

	/// The artifact was built for an older ABI than the host provides.
	#[error("module compiled against ABI version {compiled} but the host provides ABI version {runtime}")]
	AbiMismatch {
		/// ABI version the artifact declares.
		compiled: AbiVersion,
		/// ABI version the host reports.
		runtime: AbiVersion,
	},

	/// The artifact targets API features the host does not have.
	#[error("module compiled against API version {compiled} but the host only provides API version {runtime}")]
	FeatureVersionTooNew {
		/// Feature version the artifact targets.
		compiled: FeatureVersion,
		/// Feature version the host reports.
		runtime: FeatureVersion,
	},
}

fn display_paths(paths: &[PathBuf]) -> String {
	if paths.is_empty() {
		return "nothing".to_string();
	}
	paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Result alias for import operations.
pub type Result<T, E = ImportError> = std::result::Result<T, E>;
