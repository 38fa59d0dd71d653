use std::future::Future;

use crate::error::{Error, Result};

/// Split `items` into consecutive windows of at most `size`, run `f` on each
/// one in turn and concatenate the results in window order.
///
/// Windows are awaited one after the other; the first failure aborts the
/// whole run and no partial result is returned.
pub async fn for_each_window<'a, T, R, F, Fut>(
    items: &'a [T],
    size: usize,
    mut f: F,
) -> Result<Vec<R>>
where
    F: FnMut(&'a [T]) -> Fut,
    Fut: Future<Output = Result<Vec<R>>>,
{
    if size == 0 {
        return Err(Error::Parameter("Window size must be at least 1".to_string()));
    }

    log::debug!(
        "{} items in {} windows of {}",
        items.len(),
        window_count(items.len(), size),
        size
    );

    let mut results = Vec::with_capacity(items.len());
    for window in items.chunks(size) {
        results.extend(f(window).await?);
    }
    Ok(results)
}

pub fn window_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    len.div_ceil(size)
}
