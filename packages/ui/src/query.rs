//! # Server-state hooks
//!
//! [`use_query`] loads a value through a service call, caching it in the shared
//! [`QueryCache`] under a typed [`QueryKey`]. A fresh entry is served without a
//! request. A stale entry is served too, and refetched in the background; the
//! view switches to the new value when it arrives. A missing one is fetched with
//! the [`RetryPolicy`] before anything renders.
//!
//! [`use_mutation`] runs a write, then invalidates every cached key of the
//! resources it touches (plus the dashboard), which makes the affected queries
//! refetch. Failures raise an error toast unless the call is marked silent.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`QueryClient`] | Context handle over the cache and per-resource invalidation epochs |
//! | [`Query`] | Handle returned by `use_query`: `state()`, `refetch()` |
//! | [`Mutation`] | Handle returned by `use_mutation`: `run()`, `is_busy()` |

use std::collections::HashMap;
use std::future::Future;

use api::{ApiClient, ApiError, RetryPolicy};
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{AdminConfig, CacheHit, QueryCache, QueryKey};

use crate::client::use_api;
use crate::timer::sleep;
use crate::toast::{use_toasts, Toasts};

#[derive(Clone, Copy, PartialEq)]
pub struct QueryClient {
    cache: Signal<QueryCache>,
    epochs: Signal<HashMap<store::Resource, u64>>,
    retry: RetryPolicy,
}

impl QueryClient {
    /// Must be called inside a component scope.
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            cache: Signal::new(QueryCache::new(config.cache.policy())),
            epochs: Signal::new(HashMap::new()),
            retry: RetryPolicy::default().with_max_attempts(config.cache.max_attempts),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Invalidation counter of `resource`. Reading it subscribes the caller.
    pub fn epoch(&self, resource: store::Resource) -> u64 {
        self.epochs.read().get(&resource).copied().unwrap_or(0)
    }

    /// Drop every cached key of `resource` and refetch the queries showing it.
    pub fn invalidate(self, resource: store::Resource) {
        let mut cache = self.cache;
        let mut epochs = self.epochs;
        let dropped = cache.write().invalidate(resource);
        *epochs.write().entry(resource).or_insert(0) += 1;
        tracing::debug!("Invalidated {resource} ({dropped} cached keys)");
    }

    /// Forget everything, e.g. on sign-out.
    pub fn clear(self) {
        let mut cache = self.cache;
        let mut epochs = self.epochs;
        cache.write().clear();
        let mut counters = epochs.write();
        for resource in store::Resource::ALL {
            *counters.entry(resource).or_insert(0) += 1;
        }
    }

    fn cached<T: DeserializeOwned>(self, key: &QueryKey) -> Option<CacheHit<T>> {
        let mut cache = self.cache;
        let hit = cache.write().get_as::<T>(key);
        hit
    }

    fn store<T: Serialize>(self, key: QueryKey, value: &T) {
        let mut cache = self.cache;
        cache.write().set_as(key, value);
    }

    fn forget(self, key: &QueryKey) {
        let mut cache = self.cache;
        cache.write().invalidate_key(key);
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}

/// Run `fetch` until it succeeds or `policy` gives up.
pub async fn fetch_with_retry<T, F, Fut>(policy: RetryPolicy, mut fetch: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 1;
    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(e) if policy.should_retry(attempt, &e) => {
                let delay = policy.delay_after(attempt);
                tracing::debug!("Attempt {attempt} failed ({e}), retrying in {delay:?}");
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Render-friendly view of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(ApiError),
}

pub struct Query<T: 'static> {
    key: Memo<QueryKey>,
    resource: Resource<Result<T, ApiError>>,
    client: QueryClient,
}

impl<T: 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Query<T> {}

impl<T: Clone + 'static> Query<T> {
    pub fn state(&self) -> QueryState<T> {
        match &*self.resource.read() {
            None => QueryState::Loading,
            Some(Ok(value)) => QueryState::Ready(value.clone()),
            Some(Err(e)) => QueryState::Failed(e.clone()),
        }
    }

    /// The loaded value, if any.
    pub fn data(&self) -> Option<T> {
        match &*self.resource.read() {
            Some(Ok(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.resource.read().is_none()
    }

    /// Bypass the cache and load again.
    pub fn refetch(mut self) {
        self.client.forget(&self.key.peek());
        self.resource.restart();
    }
}

/// Cached, retried query. `key` may read signals (page, search…); the query reruns
/// when they change or when its resource is invalidated.
pub fn use_query<T, K, F, Fut>(key: K, fetch: F) -> Query<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn(ApiClient) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_api();
    let refresh_api = api.clone();
    let client = use_query_client();
    let key = use_memo(key);
    let mut revalidate = use_signal(|| Option::<QueryKey>::None);

    let resource = use_resource(move || {
        let api = api.clone();
        let key = key();
        let _epoch = client.epoch(key.resource());
        async move {
            if let Some(hit) = client.cached::<T>(&key) {
                if !hit.is_fresh() {
                    revalidate.set(Some(key));
                }
                return Ok(hit.value);
            }
            let value = fetch_with_retry(client.retry_policy(), || fetch(api.clone())).await?;
            client.store(key, &value);
            Ok(value)
        }
    });

    use_effect(move || {
        let Some(stale) = revalidate() else {
            return;
        };
        let api = refresh_api.clone();
        let mut resource = resource;
        spawn(async move {
            match fetch_with_retry(client.retry_policy(), || fetch(api.clone())).await {
                Ok(value) => {
                    client.store(stale.clone(), &value);
                    // The view may have moved to another key meanwhile.
                    if *key.peek() == stale {
                        resource.set(Some(Ok(value)));
                    }
                }
                Err(e) => tracing::debug!("Background refresh of {stale} failed: {e}"),
            }
        });
    });

    Query {
        key,
        resource,
        client,
    }
}

/// Per-call options of a mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutateOptions {
    /// Toast shown on success.
    pub success: Option<String>,
    /// Suppress the error toast; the caller reports the error itself.
    pub silent: bool,
}

impl MutateOptions {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            silent: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            success: None,
            silent: true,
        }
    }

    pub fn with_success(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct Mutation {
    busy: Signal<bool>,
    client: QueryClient,
    toasts: Toasts,
    invalidates: &'static [store::Resource],
}

impl Mutation {
    pub fn is_busy(&self) -> bool {
        *self.busy.read()
    }

    /// Run `op` in the background and hand its result to `then`.
    pub fn run<T, Fut, Then>(self, options: MutateOptions, op: Fut, then: Then)
    where
        T: 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        Then: FnOnce(Result<T, ApiError>) + 'static,
    {
        let mut busy = self.busy;
        spawn(async move {
            busy.set(true);
            let result = op.await;
            busy.set(false);

            match &result {
                Ok(_) => {
                    for resource in self.invalidates {
                        self.client.invalidate(*resource);
                    }
                    self.client.invalidate(store::Resource::Dashboard);
                    if let Some(message) = options.success {
                        self.toasts.success(message);
                    }
                }
                // The 401 hook already redirects.
                Err(e) if e.is_unauthorized() => {}
                Err(e) => {
                    tracing::warn!("Mutation failed: {e}");
                    if !options.silent {
                        self.toasts.error(e.to_string());
                    }
                }
            }
            then(result);
        });
    }
}

/// Mutation invalidating `invalidates` on success.
pub fn use_mutation(invalidates: &'static [store::Resource]) -> Mutation {
    let busy = use_signal(|| false);
    Mutation {
        busy,
        client: use_query_client(),
        toasts: use_toasts(),
        invalidates,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    use dioxus::core::NoOpMutations;

    use super::*;

    fn server_error() -> ApiError {
        ApiError::from_response(503, Some("Service Unavailable"), "")
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = Cell::new(0);
        let result = fetch_with_retry(RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Err(ApiError::network("connection reset"))
                } else {
                    Ok(n)
                }
            }
        })
        .await;
        assert_eq!(result, Ok(3));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), ApiError> = fetch_with_retry(RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Err(server_error()) }
        })
        .await;
        assert_eq!(result.unwrap_err().status(), Some(503));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), ApiError> = fetch_with_retry(RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Err(ApiError::from_response(404, Some("Not Found"), "")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }

    thread_local! {
        static CALLS: Cell<u32> = const { Cell::new(0) };
    }

    /// Each call returns how many times the server has been asked so far.
    async fn count_call(_api: ApiClient) -> Result<u32, ApiError> {
        Ok(CALLS.with(|calls| {
            calls.set(calls.get() + 1);
            calls.get()
        }))
    }

    #[derive(Default)]
    struct Seen {
        mounted: Option<Signal<bool>>,
        data: Vec<Option<u32>>,
    }

    type Shared = Rc<RefCell<Seen>>;

    #[derive(Clone)]
    struct StaleSecs(u32);

    #[component]
    fn Root() -> Element {
        let shared = use_context::<Shared>();
        let StaleSecs(stale_secs) = use_context::<StaleSecs>();
        let mut config = AdminConfig::default();
        config.cache.stale_secs = stale_secs;
        use_context_provider(|| {
            ApiClient::new(&config, Arc::new(store::MemorySessionStore::new()))
        });
        use_context_provider(|| QueryClient::new(&config));
        let mounted = use_signal(|| true);
        shared.borrow_mut().mounted = Some(mounted);
        rsx! {
            if mounted() {
                CollegeCount {}
            }
        }
    }

    #[component]
    fn CollegeCount() -> Element {
        let shared = use_context::<Shared>();
        let query = use_query(|| QueryKey::new(store::Resource::Colleges), count_call);
        let data = query.data();
        {
            let mut seen = shared.borrow_mut();
            if seen.data.last() != Some(&data) {
                seen.data.push(data);
            }
        }
        rsx! {
            if let Some(count) = data {
                span { "{count}" }
            }
        }
    }

    async fn run_for(dom: &mut VirtualDom, duration: Duration) {
        let _ = tokio::time::timeout(duration, async move {
            loop {
                dom.wait_for_work().await;
                dom.render_immediate(&mut NoOpMutations);
            }
        })
        .await;
    }

    /// Mounts the page, leaves it, and comes back to it.
    async fn visit_twice(stale_secs: u32) -> Vec<Option<u32>> {
        CALLS.with(|calls| calls.set(0));
        let shared = Shared::default();
        let mut dom = VirtualDom::new(Root)
            .with_root_context(shared.clone())
            .with_root_context(StaleSecs(stale_secs));
        dom.rebuild_in_place();
        run_for(&mut dom, Duration::from_millis(100)).await;

        let mut mounted = shared.borrow().mounted.expect("root mounted");
        dom.in_runtime(|| mounted.set(false));
        run_for(&mut dom, Duration::from_millis(100)).await;
        dom.in_runtime(|| mounted.set(true));
        run_for(&mut dom, Duration::from_millis(100)).await;

        let data = shared.borrow().data.clone();
        data
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_served_without_request() {
        let data = visit_twice(300).await;
        assert_eq!(data, vec![None, Some(1), None, Some(1)]);
        assert_eq!(CALLS.with(Cell::get), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_served_then_refreshed() {
        let data = visit_twice(0).await;
        // The second visit shows the old value at once, then the refetched one.
        assert_eq!(data, vec![None, Some(1), None, Some(1), Some(2)]);
        assert_eq!(CALLS.with(Cell::get), 2);
    }

    #[test]
    fn test_mutate_options() {
        let opts = MutateOptions::silent().with_success("Saved");
        assert!(opts.silent);
        assert_eq!(opts.success.as_deref(), Some("Saved"));
        assert_eq!(MutateOptions::default().success, None);
    }
}
