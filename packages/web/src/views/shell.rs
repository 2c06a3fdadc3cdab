//! Signed-in layout: sidebar navigation, top bar, and the routed page.

use dioxus::prelude::*;
use ui::icons::{
    FaBuildingColumns, FaCreditCard, FaEnvelope, FaGauge, FaNewspaper, FaPaperPlane,
    FaQuoteLeft, FaUsers,
};
use ui::{use_auth, AdminGuard, Icon, LogoutButton, ThemeToggle};

use crate::Route;

fn page_title(route: &Route) -> &'static str {
    match route {
        Route::Dashboard {} => "Dashboard",
        Route::Colleges {} => "Colleges",
        Route::Users {} => "Users",
        Route::Posts {} => "Posts",
        Route::Testimonials {} => "Testimonials",
        Route::Payments {} => "Payments",
        Route::Contacts {} => "Contact requests",
        Route::EmailCampaigns {} => "Email campaigns",
        Route::Login {} | Route::NotFound { .. } => "",
    }
}

#[component]
pub fn Shell() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let route = use_route::<Route>();
    let title = page_title(&route);
    let name = auth
        .read()
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        AdminGuard {
            on_unauthenticated: move |_| {
                nav.replace(Route::Login {});
            },
            div {
                class: "shell",
                aside {
                    class: "sidebar",
                    div { class: "sidebar-brand", "Campus Admin" }
                    nav {
                        class: "sidebar-nav",
                        NavItem { to: Route::Dashboard {}, label: "Dashboard",
                            Icon { icon: FaGauge, width: 16, height: 16 }
                        }
                        NavItem { to: Route::Colleges {}, label: "Colleges",
                            Icon { icon: FaBuildingColumns, width: 16, height: 16 }
                        }
                        NavItem { to: Route::Users {}, label: "Users",
                            Icon { icon: FaUsers, width: 16, height: 16 }
                        }
                        NavItem { to: Route::Posts {}, label: "Posts",
                            Icon { icon: FaNewspaper, width: 16, height: 16 }
                        }
                        NavItem { to: Route::Testimonials {}, label: "Testimonials",
                            Icon { icon: FaQuoteLeft, width: 16, height: 16 }
                        }
                        NavItem { to: Route::Payments {}, label: "Payments",
                            Icon { icon: FaCreditCard, width: 16, height: 16 }
                        }
                        NavItem { to: Route::Contacts {}, label: "Contacts",
                            Icon { icon: FaEnvelope, width: 16, height: 16 }
                        }
                        NavItem { to: Route::EmailCampaigns {}, label: "Email",
                            Icon { icon: FaPaperPlane, width: 16, height: 16 }
                        }
                    }
                }
                div {
                    class: "shell-main",
                    header {
                        class: "topbar",
                        h1 { class: "topbar-title", "{title}" }
                        div {
                            class: "topbar-actions",
                            ThemeToggle {}
                            span { class: "topbar-user", "{name}" }
                            LogoutButton { class: "btn btn-outline btn-sm" }
                        }
                    }
                    main {
                        class: "content",
                        Outlet::<Route> {}
                    }
                }
            }
        }
    }
}

#[component]
fn NavItem(to: Route, label: &'static str, children: Element) -> Element {
    rsx! {
        Link {
            class: "nav-item",
            active_class: "nav-item--active",
            to: to,
            {children}
            span { "{label}" }
        }
    }
}
