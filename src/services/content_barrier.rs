//! Concurrent content fetch with an all-or-nothing barrier.
//!
//! One request per path is issued at once. The batch succeeds only if every
//! request succeeds; the first failure fails the whole batch and names the
//! path it was for. The returned batch follows the order of `paths`, no
//! matter in which order the requests complete.

use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::domain::errors::{Stage, WorkflowError, WorkflowResult};
use crate::domain::models::{FileContent, RepositoryReference};
use crate::domain::ports::GenerationService;

#[instrument(skip(service, repository, paths), fields(repository = %repository, files = paths.len()))]
pub async fn fetch_all<S>(
    service: &S,
    repository: &RepositoryReference,
    paths: &[String],
) -> WorkflowResult<Vec<FileContent>>
where
    S: GenerationService + ?Sized,
{
    let fetches = paths.iter().map(|path| async move {
        let content = service
            .fetch_content(repository, path)
            .await
            .map_err(|source| {
                WorkflowError::remote(Stage::ContentFetch { path: path.clone() }, source)
            })?;
        debug!(path = %path, bytes = content.len(), "fetched file content");
        Ok::<_, WorkflowError>(FileContent::new(path.clone(), content))
    });

    try_join_all(fetches).await
}
