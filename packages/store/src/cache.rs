//! # Query cache: client-side copy of server state
//!
//! The console never owns data; it keeps the last response of each query so a view
//! can render immediately and only refetch when the copy is too old or a mutation
//! has made it wrong.
//!
//! ## Keys
//!
//! A [`QueryKey`] is a [`Resource`] plus a sorted list of parameters (page, search,
//! status…). Empty parameter values are dropped, so `search=""` and "no search" are
//! the same key.
//!
//! ## Lifetimes
//!
//! | Age of entry | [`QueryCache::get`] returns |
//! |--------------|-----------------------------|
//! | `< stale_after` | [`Freshness::Fresh`]: serve, no request |
//! | `< retain_for` | [`Freshness::Stale`]: serve, refetch in background |
//! | `>= retain_for` | `None`: entry evicted |
//!
//! Every insert also sweeps out entries past retention, so keys nobody reads
//! again (old pages, abandoned searches) do not pile up.
//!
//! ## Invalidation
//!
//! [`QueryCache::invalidate`] drops every key belonging to one resource. Mutations
//! call it on success; the views watching that resource then refetch.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A backend resource whose queries can be cached and invalidated together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Colleges,
    Users,
    Posts,
    Testimonials,
    Payments,
    Contacts,
    EmailCampaigns,
    Dashboard,
    RecentActivity,
    CurrentUser,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Colleges,
        Resource::Users,
        Resource::Posts,
        Resource::Testimonials,
        Resource::Payments,
        Resource::Contacts,
        Resource::EmailCampaigns,
        Resource::Dashboard,
        Resource::RecentActivity,
        Resource::CurrentUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Colleges => "colleges",
            Resource::Users => "users",
            Resource::Posts => "posts",
            Resource::Testimonials => "testimonials",
            Resource::Payments => "payments",
            Resource::Contacts => "contacts",
            Resource::EmailCampaigns => "email-campaigns",
            Resource::Dashboard => "dashboard",
            Resource::RecentActivity => "recent-activity",
            Resource::CurrentUser => "current-user",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strongly typed cache key: resource + normalised parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Builder method adding a parameter. Blank values are ignored and a repeated
    /// name replaces the earlier value.
    pub fn with_param(mut self, name: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        self.params.retain(|(n, _)| n != name);
        if !value.trim().is_empty() {
            self.params.push((name.to_string(), value));
            self.params.sort();
        }
        self
    }

    /// Builder method adding an optional parameter.
    pub fn with_opt_param<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with_param(name, v),
            None => self,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource.as_str())?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

/// How long entries stay fresh and how long they are kept at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CachePolicy {
    pub stale_after: Duration,
    pub retain_for: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::minutes(5),
            retain_for: Duration::minutes(10),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CacheHit<T> {
    pub value: T,
    pub freshness: Freshness,
}

impl<T> CacheHit<T> {
    pub fn is_fresh(&self) -> bool {
        self.freshness == Freshness::Fresh
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: Value,
    stored_at: DateTime<Utc>,
}

/// In-memory query cache. Values are kept as JSON so one map serves every
/// resource type.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    policy: CachePolicy,
    entries: HashMap<QueryKey, CacheEntry>,
}

impl QueryCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, key: &QueryKey) -> Option<CacheHit<Value>> {
        self.get_at(key, Utc::now())
    }

    /// Look up `key` as of `now`, evicting it if past retention.
    pub fn get_at(&mut self, key: &QueryKey, now: DateTime<Utc>) -> Option<CacheHit<Value>> {
        let entry = self.entries.get(key)?;
        let age = now - entry.stored_at;
        if age >= self.policy.retain_for {
            self.entries.remove(key);
            return None;
        }
        let freshness = if age < self.policy.stale_after {
            Freshness::Fresh
        } else {
            Freshness::Stale
        };
        Some(CacheHit {
            value: entry.value.clone(),
            freshness,
        })
    }

    /// Typed lookup. An entry that no longer deserializes into `T` is dropped.
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &QueryKey) -> Option<CacheHit<T>> {
        self.get_as_at(key, Utc::now())
    }

    pub fn get_as_at<T: DeserializeOwned>(
        &mut self,
        key: &QueryKey,
        now: DateTime<Utc>,
    ) -> Option<CacheHit<T>> {
        let hit = self.get_at(key, now)?;
        match serde_json::from_value(hit.value) {
            Ok(value) => Some(CacheHit {
                value,
                freshness: hit.freshness,
            }),
            Err(e) => {
                tracing::warn!("Dropping cache entry {key}: {e}");
                self.entries.remove(key);
                None
            }
        }
    }

    pub fn set(&mut self, key: QueryKey, value: Value) {
        self.set_at(key, value, Utc::now());
    }

    pub fn set_at(&mut self, key: QueryKey, value: Value, now: DateTime<Utc>) {
        let evicted = self.evict_expired_at(now);
        if evicted > 0 {
            tracing::trace!("Evicted {evicted} expired cache entries");
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    /// Typed insert. Values that fail to serialize are not cached.
    pub fn set_as<T: Serialize>(&mut self, key: QueryKey, value: &T) {
        self.set_as_at(key, value, Utc::now());
    }

    pub fn set_as_at<T: Serialize>(&mut self, key: QueryKey, value: &T, now: DateTime<Utc>) {
        match serde_json::to_value(value) {
            Ok(json) => self.set_at(key, json, now),
            Err(e) => tracing::warn!("Not caching {key}: {e}"),
        }
    }

    /// Drop every entry of `resource`. Returns how many were removed.
    pub fn invalidate(&mut self, resource: Resource) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.resource != resource);
        before - self.entries.len()
    }

    pub fn invalidate_key(&mut self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop entries past retention.
    pub fn evict_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let retain_for = self.policy.retain_for;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now - entry.stored_at < retain_for);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
