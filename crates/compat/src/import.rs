//! Process-wide import of the host API.
//!
//! The first successful import publishes an [`Api`] for the rest of the
//! process. Later calls are no-ops that hand back the same handle, so every
//! entry point of an extension may call [`import_api`] defensively.

use std::sync::OnceLock;

use tracing::{debug, info, trace};

use crate::api::Api;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::source::ApiSource;

static HOST: OnceLock<Api> = OnceLock::new();

/// Imports the host API from `source` unless already imported.
///
/// Threads racing on the first import may each acquire a table from their
/// source; one is published and the others are dropped. A failed import
/// publishes nothing and may be retried.
pub fn import_api<S>(source: &S) -> Result<&'static Api>
where
	S: ApiSource + ?Sized,
{
	if let Some(api) = HOST.get() {
		trace!("import.already_imported");
		return Ok(api);
	}

	let api = Api::new(source.acquire()?, BuildConfig::COMPILED)?;
	let (api, installed) = publish(&HOST, api);
	if installed {
		info!(
			gate = %api.gate(),
			generation = %api.generation(),
			runtime_version = %api.runtime_version(),
			host_abi = %api.table().abi_version(),
			"import.host_api"
		);
	} else {
		debug!("import.lost_race");
	}
	Ok(api)
}

/// Stores `api` in `cell` unless it is already set; true when `api` was the one stored.
fn publish(cell: &OnceLock<Api>, api: Api) -> (&Api, bool) {
	let mut installed = false;
	let published = cell.get_or_init(|| {
		installed = true;
		api
	});
	(published, installed)
}

/// Makes sure the host API is imported; repeat calls do nothing.
pub fn ensure_imported<S>(source: &S) -> Result<()>
where
	S: ApiSource + ?Sized,
{
	import_api(source).map(|_| ())
}

/// The imported host API, if any.
///
/// For call sites that cannot thread an [`Api`] through; prefer holding the
/// handle returned by [`import_api`].
pub fn api() -> Option<&'static Api> {
	HOST.get()
}

/// Returns true once an import has succeeded.
pub fn is_imported() -> bool {
	HOST.get().is_some()
}
