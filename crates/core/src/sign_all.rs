//! Sequential "sign everything pending" runs.
//!
//! Items are signed one at a time in the given order. The run stops at the
//! first failure: earlier signatures stay in place and nothing after the
//! failing item is attempted, so rerunning over what is still pending
//! resumes where the last run stopped.

use std::future::Future;

use serde::Serialize;

use crate::error::CoreError;

/// Where a sign-all run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignAllFailure<K> {
    pub item: K,
    pub reason: String,
}

/// Result of a sign-all run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignAllOutcome<K, R> {
    /// Results of the items signed before the run stopped, in order.
    pub signed: Vec<R>,
    /// Items never attempted because an earlier item failed.
    pub skipped: Vec<K>,
    pub failed: Option<SignAllFailure<K>>,
    /// True only when every item was signed.
    pub all_done: bool,
}

impl<K, R> SignAllOutcome<K, R> {
    pub fn signed_count(&self) -> usize {
        self.signed.len()
    }
}

/// Sign `items` in order with `sign_one`, awaiting each before the next.
pub async fn sign_all<K, R, F, Fut>(items: Vec<K>, mut sign_one: F) -> SignAllOutcome<K, R>
where
    K: Clone,
    F: FnMut(K) -> Fut,
    Fut: Future<Output = Result<R, CoreError>>,
{
    let mut signed = Vec::with_capacity(items.len());
    let mut remaining = items.into_iter();

    while let Some(item) = remaining.next() {
        match sign_one(item.clone()).await {
            Ok(result) => signed.push(result),
            Err(err) => {
                return SignAllOutcome {
                    signed,
                    skipped: remaining.collect(),
                    failed: Some(SignAllFailure {
                        item,
                        reason: err.to_string(),
                    }),
                    all_done: false,
                };
            }
        }
    }

    SignAllOutcome {
        signed,
        skipped: Vec::new(),
        failed: None,
        all_done: true,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[tokio::test]
    async fn all_succeed() {
        let outcome = sign_all(vec![1, 2, 3], |id| async move { Ok::<_, CoreError>(id * 10) }).await;
        assert_eq!(outcome.signed, vec![10, 20, 30]);
        assert!(outcome.all_done);
        assert!(outcome.failed.is_none());
    }

    #[tokio::test]
    async fn failure_at_k_plus_one_reports_k_successes() {
        for k in 0..5usize {
            let attempts = Arc::new(Mutex::new(Vec::new()));
            let seen = Arc::clone(&attempts);
            let items: Vec<usize> = (0..5).collect();

            let outcome = sign_all(items, move |i| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push(i);
                    if i == k {
                        Err(CoreError::Internal("insert failed".into()))
                    } else {
                        Ok(i)
                    }
                }
            })
            .await;

            assert_eq!(outcome.signed_count(), k);
            assert!(!outcome.all_done);
            assert_eq!(outcome.failed.as_ref().map(|f| f.item), Some(k));
            assert_eq!(outcome.skipped, ((k + 1)..5).collect::<Vec<_>>());
            // Nothing after the failing item is attempted.
            assert_eq!(*attempts.lock().unwrap(), (0..=k).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn empty_run_is_done() {
        let outcome: SignAllOutcome<i32, i32> =
            sign_all(Vec::new(), |id| async move { Ok(id) }).await;
        assert!(outcome.all_done);
        assert_eq!(outcome.signed_count(), 0);
    }
}
