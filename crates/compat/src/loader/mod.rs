//! Host API from a shared library.
//!
//! Opens the host library with `libloading`, calls its entry point to obtain
//! the API table, and keeps the library mapped for as long as the table lives.
//!
//! Search order:
//! 1. `NDCOMPAT_HOST_LIBRARY` (or [`LoaderConfig::library_path`])
//! 2. Directories in `NDCOMPAT_HOST_PATH`, colon separated
//! 3. Directories added with [`LoaderConfig::with_search_path`]

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, info, warn};

use crate::error::{ImportError, Result};
use crate::source::ApiSource;
use crate::table::ApiTable;

/// Explicit host library path.
pub const HOST_LIBRARY_ENV: &str = "NDCOMPAT_HOST_LIBRARY";
/// Colon-separated directories to scan for the host library.
pub const HOST_PATH_ENV: &str = "NDCOMPAT_HOST_PATH";
/// Entry point symbol override.
pub const ENTRY_SYMBOL_ENV: &str = "NDCOMPAT_ENTRY_SYMBOL";

/// File name stem of the host's core extension module.
pub const DEFAULT_LIBRARY_STEM: &str = "_multiarray_umath";
/// Entry point returning the API table.
pub const DEFAULT_ENTRY_SYMBOL: &str = "ndcompat_array_api";

/// Signature of the entry point: returns the host's `void **` API table.
pub type EntryFn = unsafe extern "C" fn() -> *const *const c_void;

/// Where to look for the host library and what to call in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
	/// Library to try before scanning directories.
	pub library_path: Option<PathBuf>,
	/// Directories scanned for candidate libraries.
	pub search_paths: Vec<PathBuf>,
	/// File name stem candidates must start with (optionally behind the platform `lib` prefix).
	pub library_stem: String,
	/// Entry point symbol.
	pub entry_symbol: String,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			library_path: None,
			search_paths: Vec::new(),
			library_stem: DEFAULT_LIBRARY_STEM.to_string(),
			entry_symbol: DEFAULT_ENTRY_SYMBOL.to_string(),
		}
	}
}

impl LoaderConfig {
	/// Reads the loader environment variables.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a config from an environment-like lookup.
	///
	/// Empty values are treated as unset.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
		let mut config = Self::default();

		if let Some(path) = get(HOST_LIBRARY_ENV) {
			config.library_path = Some(PathBuf::from(path));
		}
		if let Some(dirs) = get(HOST_PATH_ENV) {
			config
				.search_paths
				.extend(dirs.split(':').filter(|dir| !dir.is_empty()).map(PathBuf::from));
		}
		if let Some(symbol) = get(ENTRY_SYMBOL_ENV) {
			config.entry_symbol = symbol;
		}
		config
	}

	/// Sets the library tried first.
	pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.library_path = Some(path.into());
		self
	}

	/// Appends a directory to scan.
	pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.search_paths.push(path.into());
		self
	}

	/// Replaces the library file name stem.
	pub fn with_library_stem(mut self, stem: impl Into<String>) -> Self {
		self.library_stem = stem.into();
		self
	}

	/// Replaces the entry point symbol.
	pub fn with_entry_symbol(mut self, symbol: impl Into<String>) -> Self {
		self.entry_symbol = symbol.into();
		self
	}

	/// Candidate library files in the order they are tried.
	///
	/// Missing or unreadable directories contribute nothing.
	pub fn candidates(&self) -> Vec<PathBuf> {
		let mut candidates: Vec<PathBuf> = self.library_path.iter().cloned().collect();
		for dir in &self.search_paths {
			candidates.extend(find_in_dir(dir, &self.library_stem));
		}
		candidates
	}
}

/// Loads the host API table from a shared library.
#[derive(Debug, Clone, Default)]
pub struct SharedLibrary {
	config: LoaderConfig,
}

impl SharedLibrary {
	/// Loader using `config`.
	pub fn new(config: LoaderConfig) -> Self {
		Self { config }
	}

	/// Loader configured from the environment.
	pub fn from_env() -> Self {
		Self::new(LoaderConfig::from_env())
	}

	/// Active configuration.
	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Opens one specific library and returns its API table.
	pub fn open(&self, path: &Path) -> Result<ApiTable> {
		open_library(path, &self.config.entry_symbol)
	}
}

impl ApiSource for SharedLibrary {
	fn acquire(&self) -> Result<ApiTable> {
		let mut last_error = None;

		for candidate in self.config.candidates() {
			match self.open(&candidate) {
				Ok(table) => {
					info!(path = %candidate.display(), symbol = %self.config.entry_symbol, "loader.host_library.loaded");
					return Ok(table);
				}
				Err(e) => {
					if self.config.library_path.as_ref() == Some(&candidate) {
						warn!(path = %candidate.display(), error = %e, "loader.explicit_library.failed");
					} else {
						debug!(path = %candidate.display(), error = %e, "loader.candidate.rejected");
					}
					last_error = Some(e);
				}
			}
		}

		Err(last_error.unwrap_or_else(|| ImportError::LibraryNotFound {
			searched: self.config.search_paths.clone(),
		}))
	}
}

fn open_library(path: &Path, symbol: &str) -> Result<ApiTable> {
	// SAFETY: loading runs the library's initializers; the host library is
	// chosen by the embedding application, not by untrusted input.
	let library = unsafe { Library::new(path) }.map_err(|source| ImportError::Load {
		path: path.to_path_buf(),
		source,
	})?;

	let table = {
		// SAFETY: the entry point's signature is part of the host contract.
		let entry: Symbol<'_, EntryFn> = unsafe { library.get(symbol.as_bytes()) }.map_err(|source| ImportError::MissingSymbol {
			path: path.to_path_buf(),
			symbol: symbol.to_string(),
			source,
		})?;
		unsafe { entry() }
	};

	// SAFETY: the table lives inside `library`, which the handle keeps loaded.
	let table = unsafe { ApiTable::from_raw(table) }?;
	Ok(table.with_library(library))
}

fn find_in_dir(dir: &Path, stem: &str) -> Vec<PathBuf> {
	let Ok(entries) = std::fs::read_dir(dir) else {
		return Vec::new();
	};

	let mut found: Vec<PathBuf> = entries
		.filter_map(|entry| entry.ok())
		.map(|entry| entry.path())
		.filter(|path| path.is_file())
		.filter(|path| path.file_name().and_then(|n| n.to_str()).is_some_and(|name| is_candidate(name, stem)))
		.collect();
	found.sort();
	found
}

fn is_candidate(name: &str, stem: &str) -> bool {
	let stem_matches = name.starts_with(stem) || name.strip_prefix(DLL_PREFIX).is_some_and(|rest| rest.starts_with(stem));
	let versioned_suffix = format!("{DLL_SUFFIX}.");
	stem_matches && (name.ends_with(DLL_SUFFIX) || name.contains(&versioned_suffix))
}
