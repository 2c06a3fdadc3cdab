//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod timer;
pub use timer::{now, sleep};

mod client;
pub use client::{make_client, make_session_store, use_api, ApiProvider};

mod auth;
pub use auth::{
    check_session, guard_decision, redirect_to_login, use_auth, AdminGuard, AuthProvider,
    AuthState, GuardDecision, LogoutButton, SessionCheck,
};

pub mod query;
pub use query::{use_mutation, use_query, use_query_client, MutateOptions, Mutation, Query, QueryClient, QueryState};

pub mod toast;
pub use toast::{use_toasts, ToastLevel, ToastProvider, Toasts};

pub mod table;

pub mod college_form;
pub use college_form::{CollegeForm, FormTab};

pub mod dashboard;

mod error_boundary;
pub use error_boundary::{AppErrorBoundary, ErrorFallback};

mod theme;
pub use theme::{apply_theme, load_theme_from_storage, ThemeSignal, ThemeToggle};
