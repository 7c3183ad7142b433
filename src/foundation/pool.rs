use crate::foundation::error::{PlanetError, PlanetResult};

/// Dedicated rayon pool; `None` uses rayon's default thread count.
pub(crate) fn build_thread_pool(threads: Option<usize>) -> PlanetResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PlanetError::validation("thread count must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PlanetError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/pool.rs"]
mod tests;
