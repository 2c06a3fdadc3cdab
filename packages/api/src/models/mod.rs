//! # Wire models for every backend resource
//!
//! Each record mirrors a backend document. Ids arrive as `_id` (also accepted as
//! `id`), field names are camelCase on the wire, and every optional field has a
//! default so partially populated documents still decode.
//!
//! | Module | Types |
//! |--------|-------|
//! | [`college`] | [`College`], [`CollegeInput`] |
//! | [`user`] | [`User`], [`UserRole`], [`UserStatus`], [`UserUpdate`], [`UserSummary`] |
//! | [`post`] | [`Post`], [`PostStatus`] |
//! | [`testimonial`] | [`Testimonial`], [`TestimonialInput`] |
//! | [`transaction`] | [`Transaction`], [`TransactionStatus`] |
//! | [`contact`] | [`Contact`], [`ContactStatus`] |
//! | [`email`] | [`EmailCampaign`], [`SendEmailRequest`], [`SendEmailResult`] |
//! | [`analytics`] | [`DashboardAnalytics`], [`RecentActivity`], [`SeriesPoint`] |
//! | [`auth`] | [`LoginRequest`], [`LoginResponse`] |

pub mod analytics;
pub mod auth;
pub mod college;
pub mod contact;
pub mod email;
pub mod post;
pub mod testimonial;
pub mod transaction;
pub mod user;

pub use analytics::{DashboardAnalytics, DashboardTotals, RecentActivity, SeriesPoint};
pub use auth::{LoginRequest, LoginResponse};
pub use college::{College, CollegeInput};
pub use contact::{Contact, ContactStatus};
pub use email::{EmailCampaign, SendEmailRequest, SendEmailResult};
pub use post::{Post, PostStatus};
pub use testimonial::{Testimonial, TestimonialInput};
pub use transaction::{Transaction, TransactionStatus};
pub use user::{User, UserRole, UserStatus, UserSummary, UserUpdate};
