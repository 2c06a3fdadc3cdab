use dioxus::prelude::*;

use ui::{ApiProvider, AppErrorBoundary, AuthProvider, ThemeSignal, ToastProvider};
use views::{
    Colleges, Contacts, Dashboard, EmailCampaigns, Login, NotFound, Payments, Posts, Shell,
    Testimonials, Users,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/colleges")]
        Colleges {},
        #[route("/users")]
        Users {},
        #[route("/posts")]
        Posts {},
        #[route("/testimonials")]
        Testimonials {},
        #[route("/payments")]
        Payments {},
        #[route("/contacts")]
        Contacts {},
        #[route("/email")]
        EmailCampaigns {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // launch installs the tracing subscriber (console on wasm)
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let mut theme: ThemeSignal = use_context_provider(|| Signal::new(None));
    use_hook(move || ui::load_theme_from_storage(&mut theme));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppErrorBoundary {
            ApiProvider {
                AuthProvider {
                    ToastProvider {
                        Router::<Route> {}
                    }
                }
            }
        }
    }
}
