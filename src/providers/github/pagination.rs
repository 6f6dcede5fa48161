use std::future::Future;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::error::{GhaTimeError, Result};

/// Drains a paginated listing starting at page 1 until an empty page comes
/// back. The first error is returned as-is. Cancellation is checked before
/// every request; a request already in flight is allowed to finish.
pub async fn paginate<T, F, Fut>(cancel: &CancellationToken, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        if cancel.is_cancelled() {
            debug!("Pagination cancelled before page {page}");
            return Err(GhaTimeError::Cancelled);
        }

        let batch = fetch_page(page).await?;
        if batch.is_empty() {
            break;
        }

        items.extend(batch);
        page += 1;
    }

    debug!("Fetched {} items over {} pages", items.len(), page - 1);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(data: &[&[u32]]) -> Vec<Vec<u32>> {
        data.iter().map(|page| page.to_vec()).collect()
    }

    #[tokio::test]
    async fn test_stops_at_first_empty_page() {
        let pages = pages(&[&[1, 2], &[3], &[], &[99]]);
        let mut requested = Vec::new();

        let items = paginate(&CancellationToken::new(), |page| {
            requested.push(page);
            let batch = pages.get(page as usize - 1).cloned().unwrap_or_default();
            async move { Ok(batch) }
        })
        .await
        .unwrap();

        assert_eq!(items, [1, 2, 3]);
        assert_eq!(requested, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_single_page_then_empty() {
        let mut calls = 0;

        let items = paginate(&CancellationToken::new(), |page| {
            calls += 1;
            let batch = if page == 1 { vec!["a", "b"] } else { vec![] };
            async move { Ok(batch) }
        })
        .await
        .unwrap();

        assert_eq!(items, ["a", "b"]);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let items: Vec<u32> = paginate(&CancellationToken::new(), |_| async { Ok(vec![]) })
            .await
            .unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_propagates_first_error_without_retry() {
        let mut calls = 0;

        let result = paginate(&CancellationToken::new(), |page| {
            calls += 1;
            let outcome = if page == 2 {
                Err(GhaTimeError::Api("502 Bad Gateway".to_string()))
            } else {
                Ok(vec![page])
            };
            async move { outcome }
        })
        .await;

        assert!(matches!(result, Err(GhaTimeError::Api(_))));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_requests() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut calls = 0;

        let result: Result<Vec<u32>> = paginate(&cancel, |_| {
            calls += 1;
            async { Ok(vec![1]) }
        })
        .await;

        assert!(matches!(result, Err(GhaTimeError::Cancelled)));
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_cancellation_ends_endless_listing() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        let result: Result<Vec<u32>> = paginate(&cancel, |page| {
            if page == 5 {
                trigger.cancel();
            }
            async move { Ok(vec![page]) }
        })
        .await;

        assert!(matches!(result, Err(GhaTimeError::Cancelled)));
    }
}
