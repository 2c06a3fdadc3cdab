mod list;

mod login;
pub use login::Login;

mod shell;
pub use shell::Shell;

mod dashboard;
pub use dashboard::Dashboard;

mod colleges;
pub use colleges::Colleges;

mod users;
pub use users::Users;

mod posts;
pub use posts::Posts;

mod testimonials;
pub use testimonials::Testimonials;

mod payments;
pub use payments::Payments;

mod contacts;
pub use contacts::Contacts;

mod email;
pub use email::EmailCampaigns;

mod not_found;
pub use not_found::NotFound;
